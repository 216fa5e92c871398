use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution, Max, Median, Min};
use tracing::warn;

use crate::analysis::overall_mean_delay;
use crate::models::Shipment;

/// Descriptive statistics of `Shipment_Delay` across the cleaned table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayStatistics {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two shipments
    pub std_dev: Option<f64>,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

impl DelayStatistics {
    /// Compute delay statistics. `None` for an empty table, or when the mean
    /// or median cannot be represented as a finite number.
    pub fn compute(shipments: &[Shipment]) -> Option<Self> {
        let mean = overall_mean_delay(shipments)?;
        let delays: Vec<f64> = shipments.iter().map(|s| s.delay_minutes).collect();
        let count = delays.len();
        let data = Data::new(delays);

        let median = data.median();
        if !median.is_finite() {
            warn!(median, "median delay is not finite, statistics unavailable");
            return None;
        }
        let std_dev = if count >= 2 {
            data.std_dev().filter(|v| v.is_finite())
        } else {
            None
        };

        Some(DelayStatistics {
            count,
            mean,
            std_dev,
            min: data.min(),
            median,
            max: data.max(),
        })
    }

    /// Width of the delay range in minutes.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}
