use colored::Colorize;

use crate::analysis::{Analyzer, GroupCount, GroupKey, GroupMean};
use crate::error::FreightError;
use crate::models::{DayOfWeek, DeliveryStatus, Month};

/// One bar of a bar chart. `value` is `None` for a category with no data,
/// which keeps its axis slot but draws no bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    /// File name (without extension) used when the chart is saved
    pub file_stem: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn has_data(&self) -> bool {
        self.bars.iter().any(|b| b.value.is_some())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub file_stem: String,
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn has_data(&self) -> bool {
        self.slices.iter().any(|s| s.percent > 0.0)
    }
}

/// A chart ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bar(BarChart),
    Pie(PieChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Bar(c) => &c.title,
            Chart::Pie(c) => &c.title,
        }
    }

    pub fn file_stem(&self) -> &str {
        match self {
            Chart::Bar(c) => &c.file_stem,
            Chart::Pie(c) => &c.file_stem,
        }
    }
}

/// Something that can present a chart to the user.
pub trait ChartRenderer {
    fn render(&self, chart: &Chart) -> Result<(), FreightError>;
}

fn bar_chart(file_stem: &str, title: &str, x_label: &str, y_label: &str, bars: Vec<Bar>) -> Chart {
    Chart::Bar(BarChart {
        file_stem: file_stem.to_string(),
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        bars,
    })
}

fn count_bars(counts: &[GroupCount]) -> Vec<Bar> {
    counts
        .iter()
        .map(|c| Bar {
            label: c.key.axis_label(),
            value: Some(c.count as f64),
        })
        .collect()
}

fn mean_bars(means: &[GroupMean]) -> Vec<Bar> {
    means
        .iter()
        .map(|m| Bar {
            label: m.key.axis_label(),
            value: Some(m.mean),
        })
        .collect()
}

/// Lay grouped values out on a fixed calendar axis; missing keys become gaps.
fn calendar_bars(axis: Vec<GroupKey>, values: &[(GroupKey, f64)]) -> Vec<Bar> {
    axis.into_iter()
        .map(|key| Bar {
            label: key.axis_label(),
            value: values.iter().find(|(k, _)| *k == key).map(|(_, v)| *v),
        })
        .collect()
}

fn weekday_axis() -> Vec<GroupKey> {
    DayOfWeek::all().map(GroupKey::DayOfWeek).collect()
}

fn month_axis() -> Vec<GroupKey> {
    Month::all().map(GroupKey::Month).collect()
}

fn counts_by_key(counts: &[GroupCount]) -> Vec<(GroupKey, f64)> {
    counts.iter().map(|c| (c.key.clone(), c.count as f64)).collect()
}

fn means_by_key(means: &[GroupMean]) -> Vec<(GroupKey, f64)> {
    means.iter().map(|m| (m.key.clone(), m.mean)).collect()
}

/// Build the seven report charts in presentation order.
pub fn build_charts(analyzer: &Analyzer) -> Vec<Chart> {
    let pct = analyzer.status_percentages();
    let pie = Chart::Pie(PieChart {
        file_stem: "on_time_vs_delayed".to_string(),
        title: "Percentage of On-Time vs Delayed Shipments".to_string(),
        slices: [DeliveryStatus::OnTime, DeliveryStatus::Delayed]
            .into_iter()
            .map(|status| PieSlice {
                label: status.label().to_string(),
                percent: pct.get(status),
            })
            .collect(),
    });

    vec![
        bar_chart(
            "shipment_volume_by_carrier",
            "Shipment Volume by Carrier",
            "Carrier Name",
            "Number of Shipments",
            count_bars(&analyzer.carrier_volume()),
        ),
        bar_chart(
            "shipment_volume_by_day_of_week",
            "Shipment Volume by Day of Week",
            "Day of the Week",
            "Number of Shipments",
            calendar_bars(weekday_axis(), &counts_by_key(&analyzer.day_of_week_volume())),
        ),
        bar_chart(
            "shipment_volume_by_month",
            "Shipment Volume by Month",
            "Month",
            "Number of Shipments",
            calendar_bars(month_axis(), &counts_by_key(&analyzer.month_volume())),
        ),
        bar_chart(
            "average_delay_by_carrier",
            "Average Shipment Delay by Carrier",
            "Carrier Name",
            "Average Delay (Minutes)",
            mean_bars(&analyzer.carrier_mean_delay(None)),
        ),
        pie,
        bar_chart(
            "average_delay_by_day_of_week",
            "Average Shipment Delay by Day of Week",
            "Day of the Week",
            "Average Delay (Minutes)",
            calendar_bars(weekday_axis(), &means_by_key(&analyzer.day_of_week_mean_delay())),
        ),
        bar_chart(
            "average_delay_by_month",
            "Average Shipment Delay by Month",
            "Month",
            "Average Delay (Minutes)",
            calendar_bars(month_axis(), &means_by_key(&analyzer.month_mean_delay())),
        ),
    ]
}

/// Pie slice label with its share to one decimal place, e.g. "On-Time (66.7%)".
pub fn slice_label(slice: &PieSlice) -> String {
    format!("{} ({:.1}%)", slice.label, slice.percent)
}

/// Format a chart as text bars scaled to the largest magnitude.
pub fn format_terminal_chart(chart: &Chart) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", chart.title().bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let rows: Vec<(String, Option<f64>, String)> = match chart {
        Chart::Bar(bar) => bar
            .bars
            .iter()
            .map(|b| {
                let text = b.value.map_or_else(String::new, |v| format!("{v:.2}"));
                (b.label.clone(), b.value, text)
            })
            .collect(),
        Chart::Pie(pie) => pie
            .slices
            .iter()
            .map(|s| (s.label.clone(), Some(s.percent), format!("{:.1}%", s.percent)))
            .collect(),
    };

    if rows.iter().all(|(_, v, _)| v.is_none()) {
        output.push_str("  No data available.\n");
        return output;
    }

    let max_abs = rows
        .iter()
        .filter_map(|(_, v, _)| v.map(f64::abs))
        .fold(0.0f64, f64::max);
    let label_width = rows.iter().map(|(l, _, _)| l.chars().count()).max().unwrap_or(0);
    let bar_width = 40;

    for (label, value, text) in &rows {
        let bar_len = match value {
            Some(v) if max_abs > 0.0 => ((v.abs() / max_abs) * bar_width as f64).round() as usize,
            _ => 0,
        };
        let bar = "\u{2588}".repeat(bar_len);
        let bar = if value.is_some_and(|v| v < 0.0) {
            bar.red()
        } else {
            bar.green()
        };
        output.push_str(&format!("  {label:<label_width$}  {text:>10}  {bar}\n"));
    }

    output.push('\n');
    output
}

/// Renders charts as text bars on stdout.
pub struct TerminalCharts;

impl ChartRenderer for TerminalCharts {
    fn render(&self, chart: &Chart) -> Result<(), FreightError> {
        print!("{}", format_terminal_chart(chart));
        Ok(())
    }
}
