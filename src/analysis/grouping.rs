use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{DayOfWeek, Month, Shipment};

/// A column shipments can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Carrier,
    /// Ordered (source, destination) pair
    Route,
    DayOfWeek,
    Month,
}

impl Dimension {
    /// Source column name(s) the key is drawn from.
    pub fn key_columns(self) -> &'static [&'static str] {
        match self {
            Dimension::Carrier => &["Carrier_Name"],
            Dimension::Route => &["Source", "Destination"],
            Dimension::DayOfWeek => &["DayOfWeek"],
            Dimension::Month => &["Month"],
        }
    }

    /// Carrier and route results are ranked by value; calendar
    /// dimensions keep their natural order.
    pub fn is_ranked(self) -> bool {
        matches!(self, Dimension::Carrier | Dimension::Route)
    }

    /// Grouping key for a shipment, `None` when the key column is missing.
    pub fn key_of(self, shipment: &Shipment) -> Option<GroupKey> {
        match self {
            Dimension::Carrier => shipment.carrier.clone().map(GroupKey::Carrier),
            Dimension::Route => shipment.route().map(|(source, destination)| GroupKey::Route {
                source: source.to_string(),
                destination: destination.to_string(),
            }),
            Dimension::DayOfWeek => shipment.day_of_week.map(GroupKey::DayOfWeek),
            Dimension::Month => shipment.month.map(GroupKey::Month),
        }
    }
}

/// Value of a grouping dimension. Ordering is lexicographic for names and
/// natural for calendar values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroupKey {
    Carrier(String),
    Route { source: String, destination: String },
    DayOfWeek(DayOfWeek),
    Month(Month),
}

impl GroupKey {
    /// Table cells for this key, one per entry of `Dimension::key_columns`.
    pub fn cells(&self) -> Vec<String> {
        match self {
            GroupKey::Carrier(name) => vec![name.clone()],
            GroupKey::Route {
                source,
                destination,
            } => vec![source.clone(), destination.clone()],
            GroupKey::DayOfWeek(day) => vec![day.to_string()],
            GroupKey::Month(month) => vec![month.to_string()],
        }
    }

    /// Short label for chart axes.
    pub fn axis_label(&self) -> String {
        match self {
            GroupKey::Carrier(name) => name.clone(),
            GroupKey::Route {
                source,
                destination,
            } => format!("{source} -> {destination}"),
            GroupKey::DayOfWeek(day) => day.abbreviation().to_string(),
            GroupKey::Month(month) => month.abbreviation().to_string(),
        }
    }
}

/// Number of shipments in a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: GroupKey,
    pub count: usize,
}

/// Mean shipment delay in a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub key: GroupKey,
    /// Mean delay in minutes
    pub mean: f64,
    /// Shipments the mean is taken over
    pub count: usize,
}

/// Count and running mean of delays.
///
/// The mean is updated as `mean + x/n - mean/n`, which stays finite for
/// finite inputs where a plain sum can overflow.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    count: usize,
    mean: f64,
}

impl Accumulator {
    pub(crate) fn push(&mut self, delay: f64) {
        self.count += 1;
        let n = self.count as f64;
        self.mean += delay / n - self.mean / n;
    }

    /// `None` when empty or when the mean is not finite.
    pub(crate) fn mean(&self) -> Option<f64> {
        (self.count > 0 && self.mean.is_finite()).then_some(self.mean)
    }
}

fn accumulate(shipments: &[Shipment], dimension: Dimension) -> HashMap<GroupKey, Accumulator> {
    let mut groups: HashMap<GroupKey, Accumulator> = HashMap::new();
    for shipment in shipments {
        if let Some(key) = dimension.key_of(shipment) {
            groups.entry(key).or_default().push(shipment.delay_minutes);
        }
    }
    groups
}

/// Count shipments per distinct value of `dimension`.
///
/// Carrier and route counts are sorted by descending count with ties broken
/// by key; day of week and month are sorted by their natural value.
pub fn count_by(shipments: &[Shipment], dimension: Dimension) -> Vec<GroupCount> {
    let mut counts: Vec<GroupCount> = accumulate(shipments, dimension)
        .into_iter()
        .map(|(key, acc)| GroupCount {
            key,
            count: acc.count,
        })
        .collect();

    if dimension.is_ranked() {
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    } else {
        counts.sort_by(|a, b| a.key.cmp(&b.key));
    }
    counts
}

/// Busiest routes: shipment counts per (source, destination), at most `limit` rows.
pub fn count_by_route(shipments: &[Shipment], limit: usize) -> Vec<GroupCount> {
    let mut counts = count_by(shipments, Dimension::Route);
    counts.truncate(limit);
    counts
}

/// Mean `Shipment_Delay` per distinct value of `dimension`.
///
/// Carrier and route means are sorted descending with ties broken by key;
/// day of week and month are sorted by their natural value. A group whose
/// mean is not finite is left out with a warning.
pub fn mean_delay_by(shipments: &[Shipment], dimension: Dimension) -> Vec<GroupMean> {
    let mut means: Vec<GroupMean> = accumulate(shipments, dimension)
        .into_iter()
        .filter_map(|(key, acc)| match acc.mean() {
            Some(mean) => Some(GroupMean {
                key,
                mean,
                count: acc.count,
            }),
            None => {
                warn!(?key, "mean delay is not finite, group left out");
                None
            }
        })
        .collect();

    if dimension.is_ranked() {
        means.sort_by(|a, b| b.mean.total_cmp(&a.mean).then_with(|| a.key.cmp(&b.key)));
    } else {
        means.sort_by(|a, b| a.key.cmp(&b.key));
    }
    means
}
