mod analyzer;
mod delivery;
mod grouping;
mod statistics;

pub use analyzer::Analyzer;
pub use delivery::{overall_mean_delay, status_percentages, StatusPercentages};
pub use grouping::{
    count_by, count_by_route, mean_delay_by, Dimension, GroupCount, GroupKey, GroupMean,
};
pub use statistics::DelayStatistics;
