use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::FreightError;

use super::row::{check_columns, RowCollector, ShipmentRow};
use super::{LoadOptions, LoadReport, ShipmentLog};

fn reader_builder(options: &LoadOptions) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(options.delimiter)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

fn parse_csv_records<R: Read>(
    rdr: &mut csv::Reader<R>,
    name: &str,
    options: &LoadOptions,
) -> Result<ShipmentLog, FreightError> {
    let headers = rdr.headers()?.clone();
    check_columns(headers.iter())?;

    let mut collector = RowCollector::default();
    let mut total_rows = 0;
    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        total_rows += 1;
        let converted = record
            .deserialize::<ShipmentRow<String>>(Some(&headers))
            .map_err(|e| FreightError::MalformedRow {
                row: index + 1,
                message: e.to_string(),
            })
            .and_then(|row| row.into_raw(index + 1, options));
        collector.push(converted, options)?;
    }
    debug!(log = name, total_rows, "parsed delimited records");

    Ok(ShipmentLog {
        name: name.to_string(),
        columns: headers.iter().map(str::to_string).collect(),
        rows: collector.rows,
        report: LoadReport {
            total_rows,
            malformed_rows: collector.malformed_rows,
        },
    })
}

/// Read a shipment log from a delimited text file.
pub fn read_csv(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<ShipmentLog, FreightError> {
    let path = path.as_ref();
    let mut rdr = reader_builder(options).from_path(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    parse_csv_records(&mut rdr, &name, options)
}

/// Read a shipment log from delimited bytes.
pub fn read_csv_from_bytes(
    data: &[u8],
    name: &str,
    options: &LoadOptions,
) -> Result<ShipmentLog, FreightError> {
    let mut rdr = reader_builder(options).from_reader(data);
    parse_csv_records(&mut rdr, name, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayOfWeek;

    const HEADER: &str = "Carrier_Name,Source,Destination,DayOfWeek,Month,Shipment_Delay,Delivery_Status,Actual_Shipment_Time,Planned_TimeofTravel\n";

    fn with_header(body: &str) -> Vec<u8> {
        format!("{HEADER}{body}").into_bytes()
    }

    #[test]
    fn test_reads_rows() {
        let data = with_header("Acme,AUS,DAL,1,2,15.0,1.0,1015,60\nZip,DAL,HOU,7,12,-3,0.0,905,45\n");
        let log = read_csv_from_bytes(&data, "test", &LoadOptions::default()).unwrap();
        assert_eq!(log.report.total_rows, 2);
        assert_eq!(log.rows.len(), 2);
        assert_eq!(log.rows[0].carrier.as_deref(), Some("Acme"));
        assert_eq!(log.rows[1].day_of_week, DayOfWeek::new(7));
        assert_eq!(log.rows[1].delay_minutes, Some(-3.0));
        assert_eq!(log.columns.len(), 9);
    }

    #[test]
    fn test_empty_fields_are_missing() {
        let data = with_header("Acme,AUS,DAL,1,2,,1.0,1015,60\n");
        let log = read_csv_from_bytes(&data, "test", &LoadOptions::default()).unwrap();
        assert_eq!(log.rows[0].delay_minutes, None);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let data = b"Extra,Carrier_Name,Source,Destination,DayOfWeek,Month,Shipment_Delay,Delivery_Status,Actual_Shipment_Time,Planned_TimeofTravel\nx,Acme,AUS,DAL,1,2,5,0,1015,60\n";
        let log = read_csv_from_bytes(data, "test", &LoadOptions::default()).unwrap();
        assert_eq!(log.rows.len(), 1);
        assert_eq!(log.rows[0].delay_minutes, Some(5.0));
    }

    #[test]
    fn test_missing_column_fails() {
        let data = b"Carrier_Name,Source\nAcme,AUS\n";
        let result = read_csv_from_bytes(data, "test", &LoadOptions::default());
        assert!(matches!(result, Err(FreightError::MissingColumn(_))));
    }

    #[test]
    fn test_malformed_row_fails_fast() {
        let data = with_header("Acme,AUS,DAL,1,2,soon,1.0,1015,60\n");
        let result = read_csv_from_bytes(&data, "test", &LoadOptions::default());
        assert!(matches!(result, Err(FreightError::MalformedRow { row: 1, .. })));
    }

    #[test]
    fn test_malformed_row_skipped_when_lenient() {
        let data = with_header("Acme,AUS,DAL,1,2,soon,1.0,1015,60\nAcme,AUS,DAL,1,2,4,1.0,1015,60\n");
        let options = LoadOptions {
            skip_malformed: true,
            ..Default::default()
        };
        let log = read_csv_from_bytes(&data, "test", &options).unwrap();
        assert_eq!(log.report.total_rows, 2);
        assert_eq!(log.report.malformed_rows, 1);
        assert_eq!(log.rows.len(), 1);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let data = b"Carrier_Name;Source;Destination;DayOfWeek;Month;Shipment_Delay;Delivery_Status;Actual_Shipment_Time;Planned_TimeofTravel\nAcme;AUS;DAL;1;2;5;0;1015;60\n";
        let options = LoadOptions {
            delimiter: b';',
            ..Default::default()
        };
        let log = read_csv_from_bytes(data, "test", &options).unwrap();
        assert_eq!(log.rows[0].source.as_deref(), Some("AUS"));
    }

    #[test]
    fn test_read_csv_from_path_uses_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freight.csv");
        std::fs::write(&path, with_header("Acme,AUS,DAL,1,2,5,0,1015,60\n")).unwrap();
        let log = read_csv(&path, &LoadOptions::default()).unwrap();
        assert_eq!(log.name, "freight");
        assert_eq!(log.rows.len(), 1);
    }
}
