//! Sheet builders: turn a loaded run into in-memory sheet grids.
//!
//! Builders never touch the filesystem; the assembler renders their grids.
//!
//! Modules:
//! - `response_time`      : per-scenario iteration and percentile tables
//! - `journey_error_rate` : one table of journey outcomes plus totals
//! - `http_requests`      : per-scenario HTTP status counts
mod http_requests;
mod journey_error_rate;
mod response_time;

pub use http_requests::build_http_requests_sheet;
pub use journey_error_rate::build_journey_error_rate_sheet;
pub use response_time::build_response_time_sheet;

use perfkit_io_xlsx::util::validate_grid_bounds;
use perfkit_io_xlsx::{EnumFmtKey, SpecGridCell, SpecSheetGrid};

use crate::error::ReportError;
use crate::model::SpecPercentileRow;

////////////////////////////////////////////////////////////////////////////////
// #region RowHelpers

fn derive_title_row(text: &str) -> Vec<SpecGridCell> {
    vec![SpecGridCell::styled(text, EnumFmtKey::Title)]
}

fn derive_section_row(label: &str) -> Vec<SpecGridCell> {
    vec![SpecGridCell::styled(label, EnumFmtKey::Section)]
}

fn derive_header_row(headers: &[&str]) -> Vec<SpecGridCell> {
    headers
        .iter()
        .map(|header| SpecGridCell::styled(*header, EnumFmtKey::Header))
        .collect()
}

/// Percentiles as decimals, count as integer.
fn derive_percentile_row(row: &SpecPercentileRow) -> Vec<SpecGridCell> {
    vec![
        SpecGridCell::plain(row.transaction.as_str()),
        SpecGridCell::plain(row.p95),
        SpecGridCell::plain(row.p99),
        SpecGridCell::plain(row.count),
    ]
}

/// Reject grids that cannot fit a worksheet, before any file is created.
fn finalize_grid(grid: SpecSheetGrid) -> Result<SpecSheetGrid, ReportError> {
    validate_grid_bounds(&grid).map_err(ReportError::Xlsx)?;
    Ok(grid)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
