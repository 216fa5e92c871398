mod csv_io;
mod excel_io;
mod json_io;
mod row;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::FreightError;
use crate::models::RawShipment;

pub use csv_io::{read_csv, read_csv_from_bytes};
pub use excel_io::read_excel;
pub use json_io::{read_json, read_json_from_bytes};
pub use row::REQUIRED_COLUMNS;

/// How raw cells are interpreted while loading.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Field delimiter for delimited text
    pub delimiter: u8,
    /// Cell values treated as missing
    pub null_markers: Vec<String>,
    /// Skip rows with unparseable values instead of failing
    pub skip_malformed: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            null_markers: ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            skip_malformed: false,
        }
    }
}

/// Row accounting for a single load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Data rows found in the source (header excluded)
    pub total_rows: usize,
    /// Rows skipped because a value could not be parsed
    pub malformed_rows: usize,
}

/// A loaded, not yet cleaned, shipment table.
#[derive(Debug, Clone)]
pub struct ShipmentLog {
    pub name: String,
    /// Column names as found in the source
    pub columns: Vec<String>,
    pub rows: Vec<RawShipment>,
    pub report: LoadReport,
}

impl ShipmentLog {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Trait for reading a shipment log from a file.
pub trait ShipmentReader {
    fn read(&self, path: &Path, options: &LoadOptions) -> Result<ShipmentLog, FreightError>;
}

/// Delimited text reader (CSV, TSV, ...).
pub struct CsvFormat;

impl ShipmentReader for CsvFormat {
    fn read(&self, path: &Path, options: &LoadOptions) -> Result<ShipmentLog, FreightError> {
        read_csv(path, options)
    }
}

/// Spreadsheet reader (.xlsx, .xls, .ods).
pub struct ExcelFormat;

impl ShipmentReader for ExcelFormat {
    fn read(&self, path: &Path, options: &LoadOptions) -> Result<ShipmentLog, FreightError> {
        read_excel(path, options)
    }
}

/// JSON array-of-objects reader.
pub struct JsonFormat;

impl ShipmentReader for JsonFormat {
    fn read(&self, path: &Path, options: &LoadOptions) -> Result<ShipmentLog, FreightError> {
        read_json(path, options)
    }
}

/// Pick a reader from the file extension. Anything that is not a
/// spreadsheet or JSON is read as delimited text.
pub fn reader_for(path: &Path) -> Box<dyn ShipmentReader> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" | "xls" | "xlsm" | "ods" => Box::new(ExcelFormat),
        "json" => Box::new(JsonFormat),
        _ => Box::new(CsvFormat),
    }
}

/// Load a shipment log, failing with `InputNotFound` when `path` is not a file.
pub fn load_shipments(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<ShipmentLog, FreightError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(FreightError::InputNotFound(path.to_path_buf()));
    }

    let log = reader_for(path).read(path, options)?;
    info!(
        path = %path.display(),
        rows = log.report.total_rows,
        malformed = log.report.malformed_rows,
        "loaded shipment log"
    );
    Ok(log)
}
