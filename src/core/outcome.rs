use derive_more::IntoIterator;

use crate::core::{DateRange, PriceTable};

/// Outcome of fetching a single zone.
#[must_use]
#[derive(Debug)]
pub enum ZoneOutcome {
    Fetched(PriceTable),
    Failed { reason: String },
}

impl ZoneOutcome {
    /// Table with at least one record.
    #[must_use]
    pub fn usable_table(&self) -> Option<&PriceTable> {
        match self {
            Self::Fetched(table) if !table.is_empty() => Some(table),
            _ => None,
        }
    }
}

/// Per-zone outcomes in the requested zone order.
#[must_use]
#[derive(Debug, IntoIterator)]
pub struct ZoneResults {
    #[into_iterator(owned, ref)]
    outcomes: Vec<(String, ZoneOutcome)>,

    pub range: DateRange,
}

impl ZoneResults {
    pub const fn new(range: DateRange) -> Self {
        Self { outcomes: Vec::new(), range }
    }

    pub fn push(&mut self, zone: String, outcome: ZoneOutcome) {
        self.outcomes.push((zone, outcome));
    }

    #[must_use]
    pub fn get(&self, zone: &str) -> Option<&ZoneOutcome> {
        self.outcomes.iter().find(|(id, _)| id == zone).map(|(_, outcome)| outcome)
    }

    pub fn zones(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().map(|(zone, _)| zone.as_str())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
