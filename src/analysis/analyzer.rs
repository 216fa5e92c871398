use crate::analysis::{
    count_by, count_by_route, mean_delay_by, overall_mean_delay, status_percentages,
    DelayStatistics, Dimension, GroupCount, GroupMean, StatusPercentages,
};
use crate::models::Shipment;

/// Unified analysis API over a cleaned shipment table.
///
/// Every method recomputes its aggregate; nothing is cached between calls.
pub struct Analyzer<'a> {
    shipments: &'a [Shipment],
}

impl<'a> Analyzer<'a> {
    /// Create a new Analyzer for the given cleaned shipments.
    pub fn new(shipments: &'a [Shipment]) -> Self {
        Self { shipments }
    }

    pub fn shipments(&self) -> &'a [Shipment] {
        self.shipments
    }

    /// Total number of shipments analyzed.
    pub fn total_shipments(&self) -> usize {
        self.shipments.len()
    }

    /// Shipment count for every carrier, busiest first.
    pub fn carrier_volume(&self) -> Vec<GroupCount> {
        count_by(self.shipments, Dimension::Carrier)
    }

    /// The `limit` busiest (source, destination) routes.
    pub fn busiest_routes(&self, limit: usize) -> Vec<GroupCount> {
        count_by_route(self.shipments, limit)
    }

    /// Shipment count per day of week, Monday first.
    pub fn day_of_week_volume(&self) -> Vec<GroupCount> {
        count_by(self.shipments, Dimension::DayOfWeek)
    }

    /// Shipment count per month, January first.
    pub fn month_volume(&self) -> Vec<GroupCount> {
        count_by(self.shipments, Dimension::Month)
    }

    pub fn overall_mean_delay(&self) -> Option<f64> {
        overall_mean_delay(self.shipments)
    }

    pub fn delay_statistics(&self) -> Option<DelayStatistics> {
        DelayStatistics::compute(self.shipments)
    }

    /// On-time delivery (OTD) and delayed percentages.
    pub fn status_percentages(&self) -> StatusPercentages {
        status_percentages(self.shipments)
    }

    /// Mean delay per carrier, highest first; `limit` keeps only the top rows.
    pub fn carrier_mean_delay(&self, limit: Option<usize>) -> Vec<GroupMean> {
        top(mean_delay_by(self.shipments, Dimension::Carrier), limit)
    }

    /// Mean delay per route, highest first; `limit` keeps only the top rows.
    pub fn route_mean_delay(&self, limit: Option<usize>) -> Vec<GroupMean> {
        top(mean_delay_by(self.shipments, Dimension::Route), limit)
    }

    pub fn day_of_week_mean_delay(&self) -> Vec<GroupMean> {
        mean_delay_by(self.shipments, Dimension::DayOfWeek)
    }

    pub fn month_mean_delay(&self) -> Vec<GroupMean> {
        mean_delay_by(self.shipments, Dimension::Month)
    }
}

fn top<T>(mut rows: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(n) = limit {
        rows.truncate(n);
    }
    rows
}
