//! Journey error-rate sheet.

use perfkit_io_xlsx::{EnumCellValue, EnumFmtKey, SpecGridCell, SpecSheetGrid};

use super::{derive_header_row, derive_title_row, finalize_grid};
use crate::conf::{
    C_LABEL_JOURNEY_ERROR_RATE, C_LABEL_TOTAL, C_SHEET_JOURNEY_ERROR_RATE, SpecReportStyle,
    TUP_HEADER_JOURNEY_ERROR_RATE,
};
use crate::error::ReportError;
use crate::model::SpecRunData;

/// Build the "Journey Error Rate" sheet.
///
/// The TOTAL row copies the supplied aggregates; it is never summed from the
/// scenario rows.
pub fn build_journey_error_rate_sheet(
    run: &SpecRunData,
    style: &SpecReportStyle,
) -> Result<SpecSheetGrid, ReportError> {
    let mut grid = SpecSheetGrid::new(C_SHEET_JOURNEY_ERROR_RATE);

    grid.append_row(derive_title_row(C_LABEL_JOURNEY_ERROR_RATE));
    grid.append_blank_rows(style.spacing.after_title);
    grid.append_row(derive_header_row(&TUP_HEADER_JOURNEY_ERROR_RATE));

    for (scenario, summary) in &run.summary.scenarios {
        grid.append_row(vec![
            SpecGridCell::plain(scenario.as_str()),
            SpecGridCell::plain(summary.total_started),
            SpecGridCell::plain(summary.total_completed),
            SpecGridCell::plain(summary.failed),
            SpecGridCell::plain(EnumCellValue::from(&summary.error_rate)),
        ]);
    }

    let total = &run.summary.total;
    grid.append_row(vec![
        SpecGridCell::styled(C_LABEL_TOTAL, EnumFmtKey::Emphasis),
        SpecGridCell::styled(total.started, EnumFmtKey::Emphasis),
        SpecGridCell::styled(total.completed, EnumFmtKey::Emphasis),
        SpecGridCell::styled(total.failed, EnumFmtKey::Emphasis),
        SpecGridCell::styled(EnumCellValue::from(&total.error_rate), EnumFmtKey::Emphasis),
    ]);

    grid.set_column_widths(&style.widths_journey_error_rate);
    finalize_grid(grid)
}
