//! HTTP requests sheet.

use perfkit_io_xlsx::{EnumCellValue, SpecGridCell, SpecSheetGrid};

use super::{derive_header_row, derive_section_row, derive_title_row, finalize_grid};
use crate::conf::{
    C_LABEL_HTTP_REQUESTS, C_SHEET_HTTP_REQUESTS, SpecReportStyle, TUP_HEADER_HTTP_REQUESTS,
    derive_scenario_title,
};
use crate::error::ReportError;
use crate::model::SpecRunData;

/// Build the "HTTP Requests" sheet: per scenario a title, section label,
/// header and one row per group/status pair.
pub fn build_http_requests_sheet(
    run: &SpecRunData,
    style: &SpecReportStyle,
) -> Result<SpecSheetGrid, ReportError> {
    let mut grid = SpecSheetGrid::new(C_SHEET_HTTP_REQUESTS);

    for scenario in run.summary.scenario_names() {
        grid.append_row(derive_title_row(&derive_scenario_title(scenario)));
        grid.append_row(derive_section_row(C_LABEL_HTTP_REQUESTS));
        grid.append_row(derive_header_row(&TUP_HEADER_HTTP_REQUESTS));
        for row in run.summary.http_request_rows(scenario) {
            grid.append_row(vec![
                SpecGridCell::plain(row.group.as_str()),
                SpecGridCell::plain(EnumCellValue::from(&row.status)),
                SpecGridCell::plain(row.count),
            ]);
        }
        grid.append_blank_rows(style.spacing.between_scenarios);
    }

    grid.set_column_widths(&style.widths_http_requests);
    finalize_grid(grid)
}
