//! CSV directory data adapter.

use crate::domain::error::WarelogError;
use crate::domain::record::{parse_timestamp, Operation, TransactionRecord};
use crate::ports::data_port::DataPort;
use std::fs;
use std::path::{Path, PathBuf};

/// Canonical column names and the aliases accepted for each. The warehouse
/// exports label columns in Japanese, and older exports label the item column
/// 「アイテム」 instead of 「加工品」; all spellings unify to one canonical
/// field at load time.
const HEADER_ALIASES: &[(&str, &[&str])] = &[
    ("id", &["id", "No", "no"]),
    ("timestamp", &["timestamp", "日時"]),
    ("item_name", &["item_name", "item", "加工品", "アイテム"]),
    ("operation", &["operation", "操作"]),
    ("operator", &["operator", "操作者"]),
    ("quantity", &["quantity", "数量"]),
    ("alliance_points", &["alliance_points", "同盟ポイント"]),
];

/// Loads transaction records from every `*.csv` file in a directory.
pub struct CsvAdapter {
    base_path: PathBuf,
}

/// Resolved column positions for one file's header row.
struct ColumnMap {
    id: usize,
    timestamp: usize,
    item_name: usize,
    operation: usize,
    operator: usize,
    quantity: usize,
    alliance_points: usize,
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord, file: &Path) -> Result<Self, WarelogError> {
        let find = |canonical: &str| -> Result<usize, WarelogError> {
            let aliases = HEADER_ALIASES
                .iter()
                .find(|(name, _)| *name == canonical)
                .map(|(_, aliases)| *aliases)
                .unwrap_or_default();

            headers
                .iter()
                .position(|h| aliases.contains(&h.trim()))
                .ok_or_else(|| WarelogError::DataLoad {
                    reason: format!("missing column {} in {}", canonical, file.display()),
                })
        };

        Ok(Self {
            id: find("id")?,
            timestamp: find("timestamp")?,
            item_name: find("item_name")?,
            operation: find("operation")?,
            operator: find("operator")?,
            quantity: find("quantity")?,
            alliance_points: find("alliance_points")?,
        })
    }
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// All `*.csv` files in the base directory, sorted by name so record order
    /// is deterministic across runs.
    fn source_files(&self) -> Result<Vec<PathBuf>, WarelogError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| WarelogError::DataLoad {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| WarelogError::DataLoad {
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(WarelogError::NoSourceFiles {
                dir: self.base_path.display().to_string(),
            });
        }

        files.sort();
        Ok(files)
    }

    fn load_file(&self, path: &Path, out: &mut Vec<TransactionRecord>) -> Result<(), WarelogError> {
        let content = fs::read_to_string(path).map_err(|e| WarelogError::DataLoad {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        // Exports written by spreadsheet tools carry a UTF-8 BOM.
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| WarelogError::DataLoad {
            reason: format!("CSV parse error in {}: {}", path.display(), e),
        })?;
        let columns = ColumnMap::resolve(headers, path)?;

        for result in rdr.records() {
            let record = result.map_err(|e| WarelogError::DataLoad {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            out.push(parse_record(&record, &columns, path, line)?);
        }

        Ok(())
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
    file: &Path,
    line: u64,
) -> Result<&'a str, WarelogError> {
    record.get(index).ok_or_else(|| WarelogError::DataLoad {
        reason: format!("missing {} field in {} line {}", name, file.display(), line),
    })
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    file: &Path,
    line: u64,
) -> Result<TransactionRecord, WarelogError> {
    let id: u64 = field(record, columns.id, "id", file, line)?
        .trim()
        .parse()
        .map_err(|e| WarelogError::DataLoad {
            reason: format!("invalid id in {} line {}: {}", file.display(), line, e),
        })?;

    let raw_ts = field(record, columns.timestamp, "timestamp", file, line)?;
    // One bad timestamp aborts the whole load; there is no partial dashboard.
    let timestamp = parse_timestamp(raw_ts).ok_or_else(|| WarelogError::TimestampParse {
        file: file.display().to_string(),
        line,
        value: raw_ts.to_string(),
    })?;

    let raw_op = field(record, columns.operation, "operation", file, line)?;
    let operation = Operation::parse(raw_op).ok_or_else(|| WarelogError::DataLoad {
        reason: format!(
            "unknown operation {:?} in {} line {}",
            raw_op,
            file.display(),
            line
        ),
    })?;

    let quantity: i64 = field(record, columns.quantity, "quantity", file, line)?
        .trim()
        .parse()
        .map_err(|e| WarelogError::DataLoad {
            reason: format!("invalid quantity in {} line {}: {}", file.display(), line, e),
        })?;

    let alliance_points: i64 = field(record, columns.alliance_points, "alliance_points", file, line)?
        .trim()
        .parse()
        .map_err(|e| WarelogError::DataLoad {
            reason: format!(
                "invalid alliance_points in {} line {}: {}",
                file.display(),
                line,
                e
            ),
        })?;

    Ok(TransactionRecord {
        id,
        timestamp,
        item_name: field(record, columns.item_name, "item_name", file, line)?
            .trim()
            .to_string(),
        operation,
        operator: field(record, columns.operator, "operator", file, line)?
            .trim()
            .to_string(),
        quantity,
        alliance_points,
    })
}

impl DataPort for CsvAdapter {
    fn load_records(&self) -> Result<Vec<TransactionRecord>, WarelogError> {
        let mut records = Vec::new();
        for path in self.source_files()? {
            self.load_file(&path, &mut records)?;
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    const ENGLISH_CSV: &str = "\
id,timestamp,item_name,operation,operator,quantity,alliance_points\n\
1,2024-01-15 09:00:00,plank,deposit,alice,10,5\n\
2,2024-01-16 10:30:00,ingot,withdraw,bob,4,2\n";

    fn setup(files: &[(&str, &str)]) -> (TempDir, CsvAdapter) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        (dir, adapter)
    }

    #[test]
    fn loads_english_headers() {
        let (_dir, adapter) = setup(&[("jan.csv", ENGLISH_CSV)]);
        let records = adapter.load_records().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].item_name, "plank");
        assert_eq!(records[0].operation, Operation::Deposit);
        assert_eq!(records[0].operator, "alice");
        assert_eq!(records[0].quantity, 10);
        assert_eq!(records[0].alliance_points, 5);
        assert_eq!(records[1].operation, Operation::Withdraw);
    }

    #[test]
    fn loads_japanese_headers_and_labels() {
        let csv = "\
No,日時,加工品,操作,操作者,数量,同盟ポイント\n\
1,2024-02-01 08:00:00,木材,預ける,花子,12,3\n\
2,2024-02-02 09:00:00,鉄板,取り出す,太郎,5,1\n";
        let (_dir, adapter) = setup(&[("feb.csv", csv)]);
        let records = adapter.load_records().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].item_name, "木材");
        assert_eq!(records[0].operation, Operation::Deposit);
        assert_eq!(records[1].operation, Operation::Withdraw);
        assert_eq!(records[1].operator, "太郎");
    }

    #[test]
    fn alternate_item_header_unifies_to_item_name() {
        let csv = "\
No,日時,アイテム,操作,操作者,数量,同盟ポイント\n\
1,2024-02-01 08:00:00,木材,預ける,花子,12,3\n";
        let (_dir, adapter) = setup(&[("old.csv", csv)]);
        let records = adapter.load_records().unwrap();

        assert_eq!(records[0].item_name, "木材");
    }

    #[test]
    fn strips_utf8_bom() {
        let with_bom = format!("\u{feff}{}", ENGLISH_CSV);
        let (_dir, adapter) = setup(&[("bom.csv", &with_bom)]);
        let records = adapter.load_records().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
    }

    #[test]
    fn concatenates_multiple_files_in_name_order() {
        let second = "\
id,timestamp,item_name,operation,operator,quantity,alliance_points\n\
3,2024-02-01 09:00:00,cloth,deposit,carol,7,1\n";
        let (_dir, adapter) = setup(&[("b.csv", second), ("a.csv", ENGLISH_CSV)]);
        let records = adapter.load_records().unwrap();

        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn ignores_non_csv_files() {
        let (_dir, adapter) = setup(&[("jan.csv", ENGLISH_CSV), ("notes.txt", "ignore me")]);
        assert_eq!(adapter.load_records().unwrap().len(), 2);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let err = adapter.load_records().unwrap_err();
        assert!(matches!(err, WarelogError::NoSourceFiles { .. }));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let adapter = CsvAdapter::new(PathBuf::from("/nonexistent/warelog-data"));
        let err = adapter.load_records().unwrap_err();
        assert!(matches!(err, WarelogError::DataLoad { .. }));
    }

    #[test]
    fn missing_column_names_the_column() {
        let csv = "id,timestamp,operation,operator,quantity,alliance_points\n\
1,2024-01-15 09:00:00,deposit,alice,10,5\n";
        let (_dir, adapter) = setup(&[("bad.csv", csv)]);

        let err = adapter.load_records().unwrap_err();
        match err {
            WarelogError::DataLoad { reason } => assert!(reason.contains("item_name")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_timestamp_aborts_the_load() {
        let csv = "\
id,timestamp,item_name,operation,operator,quantity,alliance_points\n\
1,2024-01-15 09:00:00,plank,deposit,alice,10,5\n\
2,not-a-date,ingot,withdraw,bob,4,2\n";
        let (_dir, adapter) = setup(&[("bad.csv", csv)]);

        let err = adapter.load_records().unwrap_err();
        match err {
            WarelogError::TimestampParse { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_operation_label_is_an_error() {
        let csv = "\
id,timestamp,item_name,operation,operator,quantity,alliance_points\n\
1,2024-01-15 09:00:00,plank,transfer,alice,10,5\n";
        let (_dir, adapter) = setup(&[("bad.csv", csv)]);

        let err = adapter.load_records().unwrap_err();
        assert!(matches!(err, WarelogError::DataLoad { .. }));
    }

    #[test]
    fn data_summary_reports_count_and_range() {
        let (_dir, adapter) = setup(&[("jan.csv", ENGLISH_CSV)]);
        let summary = adapter.data_summary().unwrap();

        assert_eq!(summary.record_count, 2);
        assert_eq!(
            summary.date_range,
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
            ))
        );
    }
}
