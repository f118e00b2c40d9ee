#![allow(dead_code)]

use chrono::NaiveDate;
use warelog::domain::error::WarelogError;
use warelog::domain::record::{parse_timestamp, Operation, TransactionRecord};
use warelog::domain::table::TransactionTable;
use warelog::ports::data_port::DataPort;

pub struct MockDataPort {
    pub records: Vec<TransactionRecord>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            error: None,
        }
    }

    pub fn with_records(mut self, records: Vec<TransactionRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_records(&self) -> Result<Vec<TransactionRecord>, WarelogError> {
        if let Some(reason) = &self.error {
            return Err(WarelogError::DataLoad {
                reason: reason.clone(),
            });
        }
        Ok(self.records.clone())
    }
}

pub fn make_record(
    id: u64,
    ts: &str,
    item: &str,
    operation: Operation,
    operator: &str,
    quantity: i64,
    alliance_points: i64,
) -> TransactionRecord {
    TransactionRecord {
        id,
        timestamp: parse_timestamp(ts).unwrap(),
        item_name: item.into(),
        operation,
        operator: operator.into(),
        quantity,
        alliance_points,
    }
}

pub fn make_table(records: Vec<TransactionRecord>) -> TransactionTable {
    TransactionTable::from_records(records)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The two-record table from the reporting walkthrough: a deposit of 10 and a
/// withdrawal of 4 of the same item on consecutive days.
pub fn walkthrough_table() -> TransactionTable {
    make_table(vec![
        make_record(1, "2024-01-01 09:00:00", "A", Operation::Deposit, "X", 10, 5),
        make_record(2, "2024-01-02 09:00:00", "A", Operation::Withdraw, "X", 4, 2),
    ])
}
