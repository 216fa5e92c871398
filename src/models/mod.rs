mod calendar;
mod shipment;

pub use calendar::{DayOfWeek, Month};
pub use shipment::{DeliveryStatus, RawShipment, Shipment};
