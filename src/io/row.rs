use serde::Deserialize;
use tracing::warn;

use crate::error::FreightError;
use crate::models::{DayOfWeek, Month, RawShipment};

use super::LoadOptions;

/// Column names the loader requires, in source order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Carrier_Name",
    "Source",
    "Destination",
    "DayOfWeek",
    "Month",
    "Shipment_Delay",
    "Delivery_Status",
    "Actual_Shipment_Time",
    "Planned_TimeofTravel",
];

/// Fail with `MissingColumn` for the first required column absent from `headers`.
pub(crate) fn check_columns<'a>(
    headers: impl IntoIterator<Item = &'a str>,
) -> Result<(), FreightError> {
    let present: Vec<&str> = headers.into_iter().map(str::trim).collect();
    match REQUIRED_COLUMNS.iter().find(|c| !present.contains(*c)) {
        Some(missing) => Err(FreightError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

/// A cell value that can be read as text.
pub(crate) trait CellText {
    fn into_text(self) -> String;
}

impl CellText for String {
    fn into_text(self) -> String {
        self
    }
}

/// Scalar JSON cell: the log may store numbers as numbers or as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum JsonCell {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl CellText for JsonCell {
    fn into_text(self) -> String {
        match self {
            JsonCell::Text(s) => s,
            JsonCell::Number(n) => n.to_string(),
            JsonCell::Flag(b) => u8::from(b).to_string(),
        }
    }
}

/// Shipment row keyed by the source column names.
#[derive(Debug, Deserialize)]
pub(crate) struct ShipmentRow<T> {
    #[serde(rename = "Carrier_Name")]
    pub carrier: Option<T>,
    #[serde(rename = "Source")]
    pub source: Option<T>,
    #[serde(rename = "Destination")]
    pub destination: Option<T>,
    #[serde(rename = "DayOfWeek")]
    pub day_of_week: Option<T>,
    #[serde(rename = "Month")]
    pub month: Option<T>,
    #[serde(rename = "Shipment_Delay")]
    pub delay: Option<T>,
    #[serde(rename = "Delivery_Status")]
    pub status: Option<T>,
    #[serde(rename = "Actual_Shipment_Time")]
    pub actual_shipment_time: Option<T>,
    #[serde(rename = "Planned_TimeofTravel")]
    pub planned_time_of_travel: Option<T>,
}

impl<T: CellText> ShipmentRow<T> {
    /// Apply null markers and parse the numeric columns.
    ///
    /// `row` is the 1-based data row number used in error messages.
    pub(crate) fn into_raw(
        self,
        row: usize,
        options: &LoadOptions,
    ) -> Result<RawShipment, FreightError> {
        let text = |cell: Option<T>| -> Option<String> {
            let value = cell?.into_text();
            let trimmed = value.trim();
            if options.null_markers.iter().any(|m| m == trimmed) {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        let day_of_week = match text(self.day_of_week) {
            Some(v) => {
                let n = parse_whole(&v, "DayOfWeek", row)?;
                Some(DayOfWeek::new(n).ok_or_else(|| FreightError::MalformedRow {
                    row,
                    message: format!("DayOfWeek must be in 1..=7, got {v}"),
                })?)
            }
            None => None,
        };
        let month = match text(self.month) {
            Some(v) => {
                let n = parse_whole(&v, "Month", row)?;
                Some(Month::new(n).ok_or_else(|| FreightError::MalformedRow {
                    row,
                    message: format!("Month must be in 1..=12, got {v}"),
                })?)
            }
            None => None,
        };
        let delay_minutes = text(self.delay)
            .map(|v| parse_number(&v, "Shipment_Delay", row))
            .transpose()?;
        let delivery_status = text(self.status)
            .map(|v| parse_number(&v, "Delivery_Status", row))
            .transpose()?;

        Ok(RawShipment {
            carrier: text(self.carrier),
            source: text(self.source),
            destination: text(self.destination),
            day_of_week,
            month,
            delay_minutes,
            delivery_status,
            actual_shipment_time: text(self.actual_shipment_time),
            planned_time_of_travel: text(self.planned_time_of_travel),
        })
    }
}

fn parse_number(value: &str, column: &str, row: usize) -> Result<f64, FreightError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FreightError::MalformedRow {
            row,
            message: format!("{column} '{value}' is not a number"),
        })
}

/// Parse a small whole number, accepting integral floats such as "3.0".
fn parse_whole(value: &str, column: &str, row: usize) -> Result<u8, FreightError> {
    let number = parse_number(value, column, row)?;
    if number.fract() != 0.0 || !(0.0..=255.0).contains(&number) {
        return Err(FreightError::MalformedRow {
            row,
            message: format!("{column} '{value}' is not a whole number"),
        });
    }
    Ok(number as u8)
}

/// Collects converted rows, skipping malformed ones when the options allow it.
#[derive(Debug, Default)]
pub(crate) struct RowCollector {
    pub rows: Vec<RawShipment>,
    pub malformed_rows: usize,
}

impl RowCollector {
    pub(crate) fn push(
        &mut self,
        result: Result<RawShipment, FreightError>,
        options: &LoadOptions,
    ) -> Result<(), FreightError> {
        match result {
            Ok(raw) => self.rows.push(raw),
            Err(e @ FreightError::MalformedRow { .. }) if options.skip_malformed => {
                warn!("skipping {e}");
                self.malformed_rows += 1;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}
