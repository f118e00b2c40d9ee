//! The loaded transaction table: sorted once at build, immutable thereafter.

use super::record::TransactionRecord;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// All loaded transaction records, sorted ascending by timestamp. Ties keep
/// the original input order (stable sort). Never reordered after construction;
/// filtering produces derived views without touching this table.
#[derive(Debug, Clone)]
pub struct TransactionTable {
    records: Vec<TransactionRecord>,
}

impl TransactionTable {
    pub fn from_records(mut records: Vec<TransactionRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self { records }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct operator names, sorted. Feeds the operator selector (the
    /// presentation side prefixes its own "all" entry).
    pub fn operators(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.operator.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct item names, sorted.
    pub fn item_names(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.item_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Earliest and latest record dates, used as defaults for the date range
    /// filter. `None` for an empty table.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date();
        let last = self.records.last()?.date();
        Some((first, last))
    }
}
