//! Drops incomplete shipment rows and normalizes the delivery status flag.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::io::ShipmentLog;
use crate::models::{DeliveryStatus, RawShipment, Shipment};

/// Row counts before and after cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    pub initial_rows: usize,
    pub cleaned_rows: usize,
    /// Rows missing delay, status, actual shipment time or planned travel time
    pub missing_required: usize,
    /// Rows whose status is neither 0 nor 1
    pub invalid_status: usize,
    /// Rows the loader skipped because a value could not be parsed
    pub malformed: usize,
}

impl CleanReport {
    /// Number of rows removed between reading the input and the cleaned
    /// table: missing fields, invalid status and skipped malformed rows.
    pub fn dropped(&self) -> usize {
        self.initial_rows - self.cleaned_rows
    }
}

/// The cleaned shipment table plus its accounting.
#[derive(Debug, Clone)]
pub struct CleanedShipments {
    pub shipments: Vec<Shipment>,
    pub report: CleanReport,
}

/// Why a raw row did not survive cleaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropReason {
    MissingField(&'static str),
    InvalidStatus(f64),
}

/// Convert one raw row, or report why it must be dropped.
pub fn clean_row(raw: RawShipment) -> Result<Shipment, DropReason> {
    let delay_minutes = raw
        .delay_minutes
        .ok_or(DropReason::MissingField("Shipment_Delay"))?;
    let raw_status = raw
        .delivery_status
        .ok_or(DropReason::MissingField("Delivery_Status"))?;
    let actual_shipment_time = raw
        .actual_shipment_time
        .ok_or(DropReason::MissingField("Actual_Shipment_Time"))?;
    let planned_time_of_travel = raw
        .planned_time_of_travel
        .ok_or(DropReason::MissingField("Planned_TimeofTravel"))?;
    let status =
        DeliveryStatus::from_raw(raw_status).ok_or(DropReason::InvalidStatus(raw_status))?;

    Ok(Shipment {
        carrier: raw.carrier,
        source: raw.source,
        destination: raw.destination,
        day_of_week: raw.day_of_week,
        month: raw.month,
        delay_minutes,
        status,
        actual_shipment_time,
        planned_time_of_travel,
    })
}

/// Keep only rows with every required field present and a valid status.
pub fn clean_shipments(rows: Vec<RawShipment>) -> CleanedShipments {
    let initial_rows = rows.len();
    let mut shipments = Vec::with_capacity(initial_rows);
    let mut missing_required = 0;
    let mut invalid_status = 0;

    for (index, raw) in rows.into_iter().enumerate() {
        match clean_row(raw) {
            Ok(shipment) => shipments.push(shipment),
            Err(reason) => {
                debug!(row = index + 1, ?reason, "dropping row");
                match reason {
                    DropReason::MissingField(_) => missing_required += 1,
                    DropReason::InvalidStatus(_) => invalid_status += 1,
                }
            }
        }
    }

    let report = CleanReport {
        initial_rows,
        cleaned_rows: shipments.len(),
        missing_required,
        invalid_status,
        malformed: 0,
    };
    info!(
        initial = report.initial_rows,
        cleaned = report.cleaned_rows,
        dropped = report.dropped(),
        "cleaned shipment log"
    );

    CleanedShipments { shipments, report }
}

/// Clean a loaded log. The report counts every record read from the input,
/// including rows the loader skipped as malformed.
pub fn clean_log(log: ShipmentLog) -> CleanedShipments {
    let malformed = log.report.malformed_rows;
    let mut cleaned = clean_shipments(log.rows);
    cleaned.report.malformed = malformed;
    cleaned.report.initial_rows += malformed;
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::LoadReport;

    fn complete_row(delay: f64, status: f64) -> RawShipment {
        RawShipment {
            carrier: Some("Acme".to_string()),
            source: Some("AUS".to_string()),
            destination: Some("DAL".to_string()),
            day_of_week: None,
            month: None,
            delay_minutes: Some(delay),
            delivery_status: Some(status),
            actual_shipment_time: Some("1015".to_string()),
            planned_time_of_travel: Some("60".to_string()),
        }
    }

    #[test]
    fn test_complete_row_survives() {
        let shipment = clean_row(complete_row(12.0, 1.0)).unwrap();
        assert_eq!(shipment.delay_minutes, 12.0);
        assert_eq!(shipment.status, DeliveryStatus::Delayed);
    }

    #[test]
    fn test_each_required_field_is_checked() {
        let mut row = complete_row(1.0, 0.0);
        row.delay_minutes = None;
        assert_eq!(
            clean_row(row),
            Err(DropReason::MissingField("Shipment_Delay"))
        );

        let mut row = complete_row(1.0, 0.0);
        row.delivery_status = None;
        assert_eq!(
            clean_row(row),
            Err(DropReason::MissingField("Delivery_Status"))
        );

        let mut row = complete_row(1.0, 0.0);
        row.actual_shipment_time = None;
        assert_eq!(
            clean_row(row),
            Err(DropReason::MissingField("Actual_Shipment_Time"))
        );

        let mut row = complete_row(1.0, 0.0);
        row.planned_time_of_travel = None;
        assert_eq!(
            clean_row(row),
            Err(DropReason::MissingField("Planned_TimeofTravel"))
        );
    }

    #[test]
    fn test_optional_fields_do_not_drop() {
        let mut row = complete_row(1.0, 0.0);
        row.carrier = None;
        row.source = None;
        assert!(clean_row(row).is_ok());
    }

    #[test]
    fn test_invalid_status_dropped() {
        assert_eq!(
            clean_row(complete_row(1.0, 3.0)),
            Err(DropReason::InvalidStatus(3.0))
        );
    }

    #[test]
    fn test_report_counts() {
        let mut null_delay = complete_row(0.0, 0.0);
        null_delay.delay_minutes = None;
        let rows = vec![
            complete_row(10.0, 0.0),
            null_delay,
            complete_row(5.0, 7.0),
            complete_row(-2.0, 1.0),
        ];

        let cleaned = clean_shipments(rows);
        assert_eq!(cleaned.report.initial_rows, 4);
        assert_eq!(cleaned.report.cleaned_rows, 2);
        assert_eq!(cleaned.report.dropped(), 2);
        assert_eq!(cleaned.report.missing_required, 1);
        assert_eq!(cleaned.report.invalid_status, 1);
        assert_eq!(cleaned.shipments.len(), 2);
    }

    #[test]
    fn test_clean_log_counts_skipped_malformed_rows() {
        let mut null_delay = complete_row(0.0, 0.0);
        null_delay.delay_minutes = None;
        let log = ShipmentLog {
            name: "test".to_string(),
            columns: Vec::new(),
            rows: vec![complete_row(4.0, 0.0), null_delay],
            report: LoadReport {
                total_rows: 3,
                malformed_rows: 1,
            },
        };

        let report = clean_log(log).report;
        assert_eq!(report.initial_rows, 3);
        assert_eq!(report.cleaned_rows, 1);
        assert_eq!(report.malformed, 1);
        assert_eq!(report.missing_required, 1);
        assert_eq!(
            report.dropped(),
            report.missing_required + report.invalid_status + report.malformed
        );
    }

    #[test]
    fn test_empty_input() {
        let cleaned = clean_shipments(Vec::new());
        assert_eq!(cleaned.report, CleanReport::default());
        assert!(cleaned.shipments.is_empty());
    }
}
