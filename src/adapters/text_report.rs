//! Plain-text report adapter: filtered table plus totals.

use crate::domain::error::WarelogError;
use crate::domain::filter::{FilterCriteria, FilteredView, OperatorFilter};
use crate::domain::summary::Summary;
use crate::ports::report_port::ReportPort;
use std::io::Write;

const COLUMNS: &[&str] = &[
    "id",
    "timestamp",
    "item",
    "operation",
    "operator",
    "quantity",
    "adjusted",
    "points",
];

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn render_rows(view: &FilteredView) -> Vec<Vec<String>> {
        view.rows
            .iter()
            .map(|row| {
                vec![
                    row.record.id.to_string(),
                    row.record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                    row.record.item_name.clone(),
                    row.record.operation.to_string(),
                    row.record.operator.clone(),
                    row.record.quantity.to_string(),
                    row.adjusted_quantity.to_string(),
                    row.record.alliance_points.to_string(),
                ]
            })
            .collect()
    }

    fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
        let mut widths: Vec<usize> = COLUMNS.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        widths
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        view: &FilteredView,
        summary: &Summary,
        criteria: &FilterCriteria,
        out: &mut dyn Write,
    ) -> Result<(), WarelogError> {
        writeln!(
            out,
            "{} ~ {}  operation: {}",
            criteria.start_date, criteria.end_date, criteria.operation
        )?;
        match &criteria.operator {
            OperatorFilter::All => writeln!(out, "operator: all")?,
            OperatorFilter::Name(name) => writeln!(out, "operator: {}", name)?,
        }
        writeln!(out, "items: {}", criteria.item_names.join(", "))?;
        writeln!(out)?;

        let rows = Self::render_rows(view);
        let widths = Self::column_widths(&rows);

        let header: Vec<String> = COLUMNS
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:<w$}", h, w = *w))
            .collect();
        writeln!(out, "{}", header.join("  ").trim_end())?;

        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:<w$}", c, w = *w))
                .collect();
            writeln!(out, "{}", cells.join("  ").trim_end())?;
        }

        writeln!(out)?;
        writeln!(out, "{} records", view.len())?;
        writeln!(
            out,
            "total adjusted quantity: {}",
            summary.total_adjusted_quantity
        )?;
        writeln!(
            out,
            "total alliance points:   {}",
            summary.total_alliance_points
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{apply, FilterCriteria, OperationFilter};
    use crate::domain::record::{parse_timestamp, Operation, TransactionRecord};
    use crate::domain::table::TransactionTable;
    use chrono::NaiveDate;

    fn sample_view() -> (FilteredView, FilterCriteria) {
        let table = TransactionTable::from_records(vec![
            TransactionRecord {
                id: 1,
                timestamp: parse_timestamp("2024-01-01 09:00:00").unwrap(),
                item_name: "plank".into(),
                operation: Operation::Deposit,
                operator: "alice".into(),
                quantity: 10,
                alliance_points: 5,
            },
            TransactionRecord {
                id: 2,
                timestamp: parse_timestamp("2024-01-02 10:00:00").unwrap(),
                item_name: "plank".into(),
                operation: Operation::Withdraw,
                operator: "alice".into(),
                quantity: 4,
                alliance_points: 2,
            },
        ]);
        let criteria = FilterCriteria::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            ["plank"],
            OperationFilter::Both,
            OperatorFilter::All,
        );
        (apply(&table, &criteria), criteria)
    }

    fn render(view: &FilteredView, criteria: &FilterCriteria) -> String {
        let summary = Summary::compute(view);
        let mut buf = Vec::new();
        TextReportAdapter::new()
            .write(view, &summary, criteria, &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn report_echoes_criteria_caption() {
        let (view, criteria) = sample_view();
        let output = render(&view, &criteria);

        assert!(output.contains("2024-01-01 ~ 2024-01-02  operation: both"));
        assert!(output.contains("operator: all"));
        assert!(output.contains("items: plank"));
    }

    #[test]
    fn report_lists_rows_and_totals() {
        let (view, criteria) = sample_view();
        let output = render(&view, &criteria);

        assert!(output.contains("2 records"));
        assert!(output.contains("total adjusted quantity: 6"));
        assert!(output.contains("total alliance points:   7"));
        assert!(output.contains("withdraw"));
        assert!(output.contains("-4"));
    }

    #[test]
    fn empty_view_renders_zero_totals() {
        let criteria = FilterCriteria::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            std::iter::empty::<&str>(),
            OperationFilter::Both,
            OperatorFilter::All,
        );
        let output = render(&FilteredView::default(), &criteria);

        assert!(output.contains("0 records"));
        assert!(output.contains("total adjusted quantity: 0"));
        assert!(output.contains("total alliance points:   0"));
    }
}
