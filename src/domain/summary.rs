//! Aggregate totals over a filtered view.

use super::filter::FilteredView;

/// The two scalar totals reported alongside a filtered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    /// Net stored amount: deposits positive, withdrawals negative.
    pub total_adjusted_quantity: i64,
    pub total_alliance_points: i64,
}

impl Summary {
    /// Sum both metrics over the view. An empty view yields the additive
    /// identity; aggregation never fails.
    pub fn compute(view: &FilteredView) -> Self {
        let mut summary = Summary::default();
        for row in &view.rows {
            summary.total_adjusted_quantity += row.adjusted_quantity;
            summary.total_alliance_points += row.record.alliance_points;
        }
        summary
    }
}
