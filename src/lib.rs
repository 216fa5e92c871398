pub mod analysis;
pub mod cleaning;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

pub use analysis::Analyzer;
pub use cleaning::{clean_log, clean_shipments, CleanReport, CleanedShipments};
pub use config::ReportConfig;
pub use error::FreightError;
pub use io::{load_shipments, LoadOptions, ShipmentLog, ShipmentReader};
pub use models::{DayOfWeek, DeliveryStatus, Month, RawShipment, Shipment};
