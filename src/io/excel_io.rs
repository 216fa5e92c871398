use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use crate::error::FreightError;

use super::row::{check_columns, RowCollector, ShipmentRow};
use super::{LoadOptions, LoadReport, ShipmentLog};

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Read a shipment log from the first sheet of a spreadsheet (.xlsx, .xls, .ods).
///
/// The first row must hold the column names.
pub fn read_excel(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<ShipmentLog, FreightError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| FreightError::Excel("No sheets found in workbook".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(|c| c.to_string().trim().to_string()).collect())
        .unwrap_or_default();
    check_columns(headers.iter().map(String::as_str))?;

    let index_of = |name: &str| headers.iter().position(|h| h == name);
    let columns = [
        index_of("Carrier_Name"),
        index_of("Source"),
        index_of("Destination"),
        index_of("DayOfWeek"),
        index_of("Month"),
        index_of("Shipment_Delay"),
        index_of("Delivery_Status"),
        index_of("Actual_Shipment_Time"),
        index_of("Planned_TimeofTravel"),
    ];

    let mut collector = RowCollector::default();
    let mut total_rows = 0;
    for (index, row) in rows.enumerate() {
        total_rows += 1;
        let get = |col: Option<usize>| col.and_then(|i| row.get(i)).and_then(cell_text);
        let shipment_row = ShipmentRow {
            carrier: get(columns[0]),
            source: get(columns[1]),
            destination: get(columns[2]),
            day_of_week: get(columns[3]),
            month: get(columns[4]),
            delay: get(columns[5]),
            status: get(columns[6]),
            actual_shipment_time: get(columns[7]),
            planned_time_of_travel: get(columns[8]),
        };
        collector.push(shipment_row.into_raw(index + 1, options), options)?;
    }
    debug!(sheet = %sheet_name, total_rows, "parsed spreadsheet rows");

    Ok(ShipmentLog {
        name: path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string()),
        columns: headers,
        rows: collector.rows,
        report: LoadReport {
            total_rows,
            malformed_rows: collector.malformed_rows,
        },
    })
}
