use serde::{Deserialize, Serialize};

use crate::analysis::grouping::Accumulator;
use crate::models::{DeliveryStatus, Shipment};

/// Share of on-time and delayed shipments, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusPercentages {
    pub on_time: f64,
    pub delayed: f64,
}

impl StatusPercentages {
    /// Percentage for a single status.
    pub fn get(&self, status: DeliveryStatus) -> f64 {
        match status {
            DeliveryStatus::OnTime => self.on_time,
            DeliveryStatus::Delayed => self.delayed,
        }
    }
}

/// Percentage split of delivery status. Both shares are 0 for an empty table;
/// otherwise they sum to 100.
pub fn status_percentages(shipments: &[Shipment]) -> StatusPercentages {
    if shipments.is_empty() {
        return StatusPercentages::default();
    }
    let total = shipments.len() as f64;
    let delayed = shipments.iter().filter(|s| s.is_delayed()).count() as f64;
    let on_time = total - delayed;

    StatusPercentages {
        on_time: on_time / total * 100.0,
        delayed: delayed / total * 100.0,
    }
}

/// Mean `Shipment_Delay` over all shipments, `None` for an empty table or a
/// mean that is not finite.
pub fn overall_mean_delay(shipments: &[Shipment]) -> Option<f64> {
    let mut acc = Accumulator::default();
    for shipment in shipments {
        acc.push(shipment.delay_minutes);
    }
    acc.mean()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment(delay: f64, status: DeliveryStatus) -> Shipment {
        Shipment {
            carrier: None,
            source: None,
            destination: None,
            day_of_week: None,
            month: None,
            delay_minutes: delay,
            status,
            actual_shipment_time: "1000".to_string(),
            planned_time_of_travel: "60".to_string(),
        }
    }

    #[test]
    fn test_percentages_two_to_one() {
        let data = vec![
            shipment(10.0, DeliveryStatus::OnTime),
            shipment(20.0, DeliveryStatus::Delayed),
            shipment(5.0, DeliveryStatus::OnTime),
        ];
        let pct = status_percentages(&data);
        assert!((pct.on_time - 66.6667).abs() < 0.001);
        assert!((pct.delayed - 33.3333).abs() < 0.001);
        assert!((pct.on_time + pct.delayed - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_absent_status_defaults_to_zero() {
        let data = vec![shipment(1.0, DeliveryStatus::Delayed)];
        let pct = status_percentages(&data);
        assert_eq!(pct.get(DeliveryStatus::OnTime), 0.0);
        assert_eq!(pct.get(DeliveryStatus::Delayed), 100.0);
    }

    #[test]
    fn test_empty_percentages() {
        let pct = status_percentages(&[]);
        assert_eq!(pct.on_time, 0.0);
        assert_eq!(pct.delayed, 0.0);
    }

    #[test]
    fn test_overall_mean() {
        let data = vec![
            shipment(10.0, DeliveryStatus::OnTime),
            shipment(-4.0, DeliveryStatus::OnTime),
        ];
        assert_eq!(overall_mean_delay(&data), Some(3.0));
        assert_eq!(overall_mean_delay(&[]), None);
    }

    #[test]
    fn test_overall_mean_does_not_overflow() {
        let data = vec![
            shipment(1e308, DeliveryStatus::OnTime),
            shipment(1e308, DeliveryStatus::Delayed),
        ];
        let mean = overall_mean_delay(&data).unwrap();
        assert!(mean.is_finite());
        assert!((mean / 1e308 - 1.0).abs() < 1e-12);
    }
}
