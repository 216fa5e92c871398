use std::path::Path;

use crate::error::FreightError;

use super::row::{check_columns, JsonCell, RowCollector, ShipmentRow};
use super::{LoadOptions, LoadReport, ShipmentLog};

/// Read a shipment log from a JSON file holding an array of row objects.
///
/// The columns are the union of keys across all objects and must cover the
/// required columns. A key absent from one object is a missing value there.
pub fn read_json(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<ShipmentLog, FreightError> {
    let path = path.as_ref();
    let content = std::fs::read(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    read_json_from_bytes(&content, &name, options)
}

/// Read a shipment log from JSON bytes.
pub fn read_json_from_bytes(
    data: &[u8],
    name: &str,
    options: &LoadOptions,
) -> Result<ShipmentLog, FreightError> {
    let values: Vec<serde_json::Value> = serde_json::from_slice(data)?;

    let mut columns: Vec<String> = Vec::new();
    for object in values.iter().filter_map(|v| v.as_object()) {
        for key in object.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    if !values.is_empty() {
        check_columns(columns.iter().map(String::as_str))?;
    }

    let mut collector = RowCollector::default();
    for (index, value) in values.iter().enumerate() {
        let converted = ShipmentRow::<JsonCell>::deserialize_value(value)
            .map_err(|e| FreightError::MalformedRow {
                row: index + 1,
                message: e.to_string(),
            })
            .and_then(|row| row.into_raw(index + 1, options));
        collector.push(converted, options)?;
    }

    Ok(ShipmentLog {
        name: name.to_string(),
        columns,
        rows: collector.rows,
        report: LoadReport {
            total_rows: values.len(),
            malformed_rows: collector.malformed_rows,
        },
    })
}

impl ShipmentRow<JsonCell> {
    fn deserialize_value(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        serde::Deserialize::deserialize(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_json_mixed_types() {
        let data = br#"[
            {"Carrier_Name": "Acme", "Source": "AUS", "Destination": "DAL",
             "DayOfWeek": 3, "Month": 11, "Shipment_Delay": -4.5,
             "Delivery_Status": 0.0, "Actual_Shipment_Time": 1015,
             "Planned_TimeofTravel": "60"},
            {"Carrier_Name": "Zip", "Shipment_Delay": null, "Delivery_Status": 1}
        ]"#;
        let log = read_json_from_bytes(data, "test", &LoadOptions::default()).unwrap();
        assert_eq!(log.report.total_rows, 2);
        assert_eq!(log.rows[0].delay_minutes, Some(-4.5));
        assert_eq!(log.rows[0].actual_shipment_time.as_deref(), Some("1015"));
        assert_eq!(log.rows[0].day_of_week.map(|d| d.number()), Some(3));
        assert_eq!(log.rows[1].delay_minutes, None);
        assert_eq!(log.rows[1].source, None);
    }

    #[test]
    fn test_read_json_rejects_non_array() {
        let result = read_json_from_bytes(br#"{"rows": []}"#, "test", &LoadOptions::default());
        assert!(matches!(result, Err(FreightError::Json(_))));
    }

    #[test]
    fn test_read_json_nested_value_is_malformed() {
        let data = br#"[{"Carrier_Name": {"name": "Acme"}, "Source": "AUS",
            "Destination": "DAL", "DayOfWeek": 1, "Month": 1, "Shipment_Delay": 0,
            "Delivery_Status": 0, "Actual_Shipment_Time": 1000,
            "Planned_TimeofTravel": 60}]"#;
        let result = read_json_from_bytes(data, "test", &LoadOptions::default());
        assert!(matches!(result, Err(FreightError::MalformedRow { row: 1, .. })));
    }

    #[test]
    fn test_read_json_missing_column() {
        let data = br#"[
            {"Carrier_Name": "Acme", "Source": "AUS", "Destination": "DAL",
             "DayOfWeek": 3, "Month": 11, "Shipment_Delay": 2,
             "Actual_Shipment_Time": 1015, "Planned_TimeofTravel": 60},
            {"Carrier_Name": "Zip", "Shipment_Delay": 4}
        ]"#;
        let result = read_json_from_bytes(data, "test", &LoadOptions::default());
        match result {
            Err(FreightError::MissingColumn(column)) => assert_eq!(column, "Delivery_Status"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_read_json_columns_are_union_of_keys() {
        let data = br#"[
            {"Carrier_Name": "Acme", "Source": "AUS", "Destination": "DAL",
             "DayOfWeek": 3, "Month": 11, "Shipment_Delay": 2},
            {"Delivery_Status": 1, "Actual_Shipment_Time": 1015,
             "Planned_TimeofTravel": 60, "Notes": "fragile"}
        ]"#;
        let log = read_json_from_bytes(data, "test", &LoadOptions::default()).unwrap();
        assert_eq!(log.columns.len(), 10);
        assert!(log.columns.iter().any(|c| c == "Notes"));
        assert_eq!(log.rows[1].carrier, None);
    }

    #[test]
    fn test_read_json_empty_array() {
        let log = read_json_from_bytes(b"[]", "test", &LoadOptions::default()).unwrap();
        assert!(log.columns.is_empty());
        assert!(log.rows.is_empty());
    }
}
