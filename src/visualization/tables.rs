use colored::Colorize;
use comfy_table::{presets::ASCII_MARKDOWN, Cell, ContentArrangement, Table};

use crate::analysis::{
    Analyzer, DelayStatistics, Dimension, GroupCount, GroupMean, StatusPercentages,
};
use crate::cleaning::CleanReport;

fn section_header(title: &str) -> String {
    format!("{}\n", title.bold().green())
}

fn new_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_MARKDOWN)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

fn key_headers(dimension: Dimension, value_header: &'static str) -> Vec<&'static str> {
    let mut headers = dimension.key_columns().to_vec();
    headers.push(value_header);
    headers
}

/// Format the before/after cleaning row counts.
pub fn format_clean_report(report: &CleanReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("Initial Rows : {}\n", report.initial_rows));
    output.push_str(&format!(
        "Rows after dropping NaNs in key column : {}\n",
        report.cleaned_rows
    ));
    output.push_str(&format!("Number of rows dropped : {}\n", report.dropped()));
    if report.malformed > 0 {
        output.push_str(&format!("Malformed rows skipped : {}\n", report.malformed));
    }
    if report.invalid_status > 0 || report.malformed > 0 {
        output.push_str(&format!(
            "{}\n",
            format!(
                "  ({} missing a key field, {} with a status other than 0/1, {} malformed)",
                report.missing_required, report.invalid_status, report.malformed
            )
            .dimmed()
        ));
    }
    output.push('\n');
    output
}

/// Print the cleaning summary.
pub fn print_clean_report(report: &CleanReport) {
    print!("{}", format_clean_report(report));
}

/// Format a count table (two columns, or three for routes).
pub fn format_count_table(title: &str, dimension: Dimension, counts: &[GroupCount]) -> String {
    let mut output = section_header(title);
    let mut table = new_table(key_headers(dimension, "Shipment_Count"));

    for row in counts {
        let mut cells: Vec<Cell> = row.key.cells().into_iter().map(Cell::new).collect();
        cells.push(Cell::new(row.count));
        table.add_row(cells);
    }

    output.push_str(&format!("{table}\n\n"));
    output
}

/// Format a mean-delay table; means are shown to 2 decimal places.
pub fn format_mean_table(title: &str, dimension: Dimension, means: &[GroupMean]) -> String {
    let mut output = section_header(title);
    let mut table = new_table(key_headers(dimension, "Average_Delay_Minutes"));

    for row in means {
        let mut cells: Vec<Cell> = row.key.cells().into_iter().map(Cell::new).collect();
        cells.push(Cell::new(format!("{:.2}", row.mean)));
        table.add_row(cells);
    }

    output.push_str(&format!("{table}\n\n"));
    output
}

/// Format the overall mean delay, plus descriptive statistics when available.
pub fn format_delay_overview(mean: Option<f64>, stats: Option<&DelayStatistics>) -> String {
    let mut output = String::new();
    let mean = mean.map_or_else(|| "n/a".to_string(), |m| format!("{m:.2}"));
    output.push_str(&format!(
        "Overall Average Shipment Delay (minutes) : {mean}\n"
    ));

    if let Some(stats) = stats {
        let mut table = new_table(vec!["Statistic", "Minutes"]);
        table.add_row(vec![Cell::new("Median"), Cell::new(format!("{:.2}", stats.median))]);
        table.add_row(vec![
            Cell::new("Std Dev"),
            Cell::new(
                stats
                    .std_dev
                    .map_or_else(|| "n/a".to_string(), |sd| format!("{sd:.2}")),
            ),
        ]);
        table.add_row(vec![Cell::new("Min"), Cell::new(format!("{:.2}", stats.min))]);
        table.add_row(vec![Cell::new("Max"), Cell::new(format!("{:.2}", stats.max))]);
        output.push_str(&format!("{table}\n"));
    }

    output.push('\n');
    output
}

/// Format the on-time/delayed percentage pair.
pub fn format_status_percentages(pct: &StatusPercentages) -> String {
    let mut output = section_header("On-Time Delivery (OTD) Rate :");
    output.push_str(&format!(
        "Percentage On-Time Deliveries : {:.2}%\n",
        pct.on_time
    ));
    output.push_str(&format!(
        "Percentage Delayed Deliveries : {:.2}%\n\n",
        pct.delayed
    ));
    output
}

/// Format the full volume and delay report in its fixed section order.
pub fn format_report(analyzer: &Analyzer, top_n: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n\n", "------- Shipment Volume -------".bold().cyan()));
    output.push_str(&format!(
        "Total Shipments Analyzed : {}\n\n",
        analyzer.total_shipments()
    ));
    output.push_str(&format_count_table(
        "Shipment Volume by Carrier :",
        Dimension::Carrier,
        &analyzer.carrier_volume(),
    ));
    output.push_str(&format_count_table(
        &format!("Top {top_n} Busiest Routes (Source - to - Destination) :"),
        Dimension::Route,
        &analyzer.busiest_routes(top_n),
    ));
    output.push_str(&format_count_table(
        "Shipment Volume by Day of Week (1 = Monday, 7 = Sunday) :",
        Dimension::DayOfWeek,
        &analyzer.day_of_week_volume(),
    ));
    output.push_str(&format_count_table(
        "Shipment Volume by Month :",
        Dimension::Month,
        &analyzer.month_volume(),
    ));

    output.push_str(&format!("{}\n\n", "------- Delay Analysis -------".bold().cyan()));
    output.push_str(&format_delay_overview(
        analyzer.overall_mean_delay(),
        analyzer.delay_statistics().as_ref(),
    ));
    output.push_str(&format_status_percentages(&analyzer.status_percentages()));
    output.push_str(&format_mean_table(
        &format!("Top {top_n} Carriers by Average Shipment Delay :"),
        Dimension::Carrier,
        &analyzer.carrier_mean_delay(Some(top_n)),
    ));
    output.push_str(&format_mean_table(
        &format!("Top {top_n} Routes with Highest Average Delay :"),
        Dimension::Route,
        &analyzer.route_mean_delay(Some(top_n)),
    ));
    output.push_str(&format_mean_table(
        "Average Shipment Delay by Day of the Week (1 = Monday, 7 = Sunday) :",
        Dimension::DayOfWeek,
        &analyzer.day_of_week_mean_delay(),
    ));
    output.push_str(&format_mean_table(
        "Average Shipment Delay by Month :",
        Dimension::Month,
        &analyzer.month_mean_delay(),
    ));

    output
}

/// Print the full volume and delay report.
pub fn print_report(analyzer: &Analyzer, top_n: usize) {
    print!("{}", format_report(analyzer, top_n));
}

/// Format the one-screen summary used by the `summary` command.
pub fn format_summary(name: &str, clean: &CleanReport, analyzer: &Analyzer) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Quick Summary".bold().cyan()));
    output.push_str(&format!("{}\n", "=".repeat(40)));
    output.push_str(&format!("  Log:            {name}\n"));
    output.push_str(&format!("  Rows loaded:    {}\n", clean.initial_rows));
    output.push_str(&format!("  Rows dropped:   {}\n", clean.dropped()));
    if clean.malformed > 0 {
        output.push_str(&format!("  Malformed:      {}\n", clean.malformed));
    }
    output.push_str(&format!("  Shipments:      {}\n", analyzer.total_shipments()));
    output.push_str(&format!("  Carriers:       {}\n", analyzer.carrier_volume().len()));
    output.push_str(&format!(
        "  Routes:         {}\n",
        analyzer.route_mean_delay(None).len()
    ));
    let pct = analyzer.status_percentages();
    output.push_str(&format!("  OTD rate:       {:.2}%\n", pct.on_time));
    match analyzer.delay_statistics() {
        Some(stats) => {
            output.push_str(&format!("  Mean delay:     {:.2} min\n", stats.mean));
            output.push_str(&format!("  Median delay:   {:.2} min\n", stats.median));
            output.push_str(&format!(
                "  Delay range:    {:.2} to {:.2} min ({:.2} min span)\n",
                stats.min,
                stats.max,
                stats.range()
            ));
        }
        None => output.push_str("  Mean delay:     n/a\n"),
    }
    output
}

/// Print the one-screen summary.
pub fn print_summary(name: &str, clean: &CleanReport, analyzer: &Analyzer) {
    print!("{}", format_summary(name, clean, analyzer));
}
