//! Report rendering port trait.

use crate::domain::error::WarelogError;
use crate::domain::filter::{FilterCriteria, FilteredView};
use crate::domain::summary::Summary;
use std::io::Write;

/// Port for rendering a filtered view plus its totals. The criteria are passed
/// through so the renderer can caption the report with the chosen date range
/// and operation type.
pub trait ReportPort {
    fn write(
        &self,
        view: &FilteredView,
        summary: &Summary,
        criteria: &FilterCriteria,
        out: &mut dyn Write,
    ) -> Result<(), WarelogError>;
}
