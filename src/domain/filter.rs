//! Filter criteria and the pure filter pipeline.

use super::record::{Operation, TransactionRecord};
use super::table::TransactionTable;
use chrono::NaiveDate;
use std::fmt;

/// Operation-type selector: a single category, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationFilter {
    Deposit,
    Withdraw,
    Both,
}

impl OperationFilter {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "deposit" | "預ける" => Some(OperationFilter::Deposit),
            "withdraw" | "取り出す" => Some(OperationFilter::Withdraw),
            "both" | "預けた&取り出した" => Some(OperationFilter::Both),
            _ => None,
        }
    }

    fn matches(&self, operation: Operation) -> bool {
        match self {
            OperationFilter::Deposit => operation == Operation::Deposit,
            OperationFilter::Withdraw => operation == Operation::Withdraw,
            OperationFilter::Both => true,
        }
    }
}

impl fmt::Display for OperationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationFilter::Deposit => write!(f, "deposit"),
            OperationFilter::Withdraw => write!(f, "withdraw"),
            OperationFilter::Both => write!(f, "both"),
        }
    }
}

/// Operator selector: every operator, or one specific name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorFilter {
    All,
    Name(String),
}

impl OperatorFilter {
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed == "all" || trimmed == "全員" {
            OperatorFilter::All
        } else {
            OperatorFilter::Name(trimmed.to_string())
        }
    }

    fn matches(&self, operator: &str) -> bool {
        match self {
            OperatorFilter::All => true,
            OperatorFilter::Name(name) => operator == name,
        }
    }
}

/// The ephemeral set of user-chosen constraints for one report. Constructed
/// per invocation by the boundary layer, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive date bounds.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Item names to keep. An empty list keeps nothing: the record must match
    /// one of the chosen names, and with none chosen no record can.
    pub item_names: Vec<String>,
    pub operation: OperationFilter,
    pub operator: OperatorFilter,
}

impl FilterCriteria {
    /// Build criteria from raw item-name inputs: entries are trimmed, blanks
    /// dropped, duplicates removed.
    pub fn new<I, S>(
        start_date: NaiveDate,
        end_date: NaiveDate,
        item_names: I,
        operation: OperationFilter,
        operator: OperatorFilter,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in item_names {
            let trimmed = name.as_ref().trim();
            if !trimmed.is_empty() && !names.iter().any(|n| n == trimmed) {
                names.push(trimmed.to_string());
            }
        }

        Self {
            start_date,
            end_date,
            item_names: names,
            operation,
            operator,
        }
    }

    fn keeps(&self, record: &TransactionRecord) -> bool {
        let date = record.date();
        date >= self.start_date
            && date <= self.end_date
            && self.operation.matches(record.operation)
            && self.item_names.iter().any(|n| *n == record.item_name)
            && self.operator.matches(&record.operator)
    }
}

/// One row of a derived view: the record plus its signed quantity, computed
/// up front so aggregation never sees a row without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredRow {
    pub record: TransactionRecord,
    pub adjusted_quantity: i64,
}

/// A derived view of the transaction table. Rows keep the table's timestamp
/// order; the base table is never mutated.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    pub rows: Vec<FilteredRow>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Apply the four filters to the table. Each predicate is independent, so the
/// conceptual order (date, operation, item name, operator) does not affect the
/// result set. An empty view is valid output, not an error.
pub fn apply(table: &TransactionTable, criteria: &FilterCriteria) -> FilteredView {
    let rows = table
        .records()
        .iter()
        .filter(|r| criteria.keeps(r))
        .map(|r| FilteredRow {
            adjusted_quantity: r.adjusted_quantity(),
            record: r.clone(),
        })
        .collect();

    FilteredView { rows }
}
