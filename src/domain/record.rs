//! Warehouse transaction record representation.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// The two recognized warehouse operation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Deposit,
    Withdraw,
}

impl Operation {
    /// Parse a source label. The export data labels operations in Japanese
    /// (「預ける」 store in, 「取り出す」 remove from storage); the English
    /// words are accepted as well.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "deposit" | "預ける" => Some(Operation::Deposit),
            "withdraw" | "取り出す" => Some(Operation::Withdraw),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Deposit => write!(f, "deposit"),
            Operation::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// One row of warehouse activity history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Source-assigned sequence number, used only for display ordering.
    pub id: u64,
    pub timestamp: NaiveDateTime,
    pub item_name: String,
    pub operation: Operation,
    pub operator: String,
    /// Non-negative count of items moved.
    pub quantity: i64,
    pub alliance_points: i64,
}

impl TransactionRecord {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Signed quantity: withdrawals count negative so that summing across
    /// mixed records yields the net stored amount.
    pub fn adjusted_quantity(&self) -> i64 {
        match self.operation {
            Operation::Deposit => self.quantity,
            Operation::Withdraw => -self.quantity,
        }
    }
}

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a raw timestamp string. Accepts the common date-time layouts seen in
/// warehouse exports; a bare date is taken as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}
