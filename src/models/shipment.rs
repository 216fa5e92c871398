use serde::{Deserialize, Serialize};

use super::calendar::{DayOfWeek, Month};

/// Delivery outcome of a shipment, encoded as 0 (on time) or 1 (delayed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    OnTime,
    Delayed,
}

impl DeliveryStatus {
    /// Integer encoding used in the source data.
    pub fn code(self) -> u8 {
        match self {
            DeliveryStatus::OnTime => 0,
            DeliveryStatus::Delayed => 1,
        }
    }

    /// Convert a raw (floating point) status value, truncating toward zero.
    ///
    /// `0.0` and `0.7` map to `OnTime`, `1.0` maps to `Delayed`; anything that
    /// does not truncate to 0 or 1 is rejected.
    pub fn from_raw(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        match value.trunc() as i64 {
            0 => Some(DeliveryStatus::OnTime),
            1 => Some(DeliveryStatus::Delayed),
            _ => None,
        }
    }

    /// Human-readable label used in charts.
    pub fn label(self) -> &'static str {
        match self {
            DeliveryStatus::OnTime => "On-Time",
            DeliveryStatus::Delayed => "Delayed",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One row of the shipment log as loaded, before cleaning.
///
/// Every column may be missing; numeric columns have already been parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawShipment {
    pub carrier: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub day_of_week: Option<DayOfWeek>,
    pub month: Option<Month>,
    /// Minutes between planned and actual delivery; negative means early
    pub delay_minutes: Option<f64>,
    /// Raw status flag as stored in the source (0.0 / 1.0)
    pub delivery_status: Option<f64>,
    pub actual_shipment_time: Option<String>,
    pub planned_time_of_travel: Option<String>,
}

/// A cleaned shipment record: all required fields are present and the
/// delivery status is a valid 0/1 flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub carrier: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub day_of_week: Option<DayOfWeek>,
    pub month: Option<Month>,
    /// Minutes between planned and actual delivery; negative means early
    pub delay_minutes: f64,
    pub status: DeliveryStatus,
    pub actual_shipment_time: String,
    pub planned_time_of_travel: String,
}

impl Shipment {
    /// The (source, destination) pair, if both ends are known.
    pub fn route(&self) -> Option<(&str, &str)> {
        Some((self.source.as_deref()?, self.destination.as_deref()?))
    }

    pub fn is_delayed(&self) -> bool {
        self.status == DeliveryStatus::Delayed
    }
}
