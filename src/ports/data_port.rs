//! Data access port trait.

use crate::domain::error::WarelogError;
use crate::domain::record::TransactionRecord;
use chrono::NaiveDate;

/// Summary of a record source, for the `info` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSummary {
    pub record_count: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

pub trait DataPort {
    /// Load every transaction record from the source. Timestamps are parsed
    /// and column names unified; ordering is left to the table.
    fn load_records(&self) -> Result<Vec<TransactionRecord>, WarelogError>;

    fn data_summary(&self) -> Result<DataSummary, WarelogError> {
        let records = self.load_records()?;
        let min = records.iter().map(|r| r.date()).min();
        let max = records.iter().map(|r| r.date()).max();
        Ok(DataSummary {
            record_count: records.len(),
            date_range: min.zip(max),
        })
    }
}
