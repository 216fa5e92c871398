mod charts;
mod svg;
mod tables;

pub use charts::{
    build_charts, format_terminal_chart, slice_label, Bar, BarChart, Chart, ChartRenderer,
    PieChart, PieSlice, TerminalCharts,
};
pub use svg::SvgCharts;
pub use tables::{
    format_clean_report, format_count_table, format_delay_overview, format_mean_table,
    format_report, format_status_percentages, format_summary, print_clean_report, print_report,
    print_summary,
};
