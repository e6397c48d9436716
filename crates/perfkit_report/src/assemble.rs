//! Workbook assembler: the only component that writes to the filesystem.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use perfkit_io_xlsx::{SpecXlsxValuePolicy, XlsxWriter};

use crate::conf::{SpecReportOptions, derive_report_file_name};
use crate::error::ReportError;
use crate::loader::load_run;
use crate::model::SpecRunData;
use crate::sheet::{
    build_http_requests_sheet, build_journey_error_rate_sheet, build_response_time_sheet,
};

/// Output workbook file name for `timestamp`.
pub fn file_name_for_timestamp(timestamp: &str) -> String {
    derive_report_file_name(timestamp)
}

/// Render `run` into `<dir_output>/Performance_Report_<timestamp>.xlsx`.
///
/// All grids are built before the file is created, so a builder failure
/// leaves the filesystem untouched. An existing file is overwritten.
pub fn generate_report(
    timestamp: &str,
    run: &SpecRunData,
    options: &SpecReportOptions,
) -> Result<PathBuf, ReportError> {
    let style = &options.style;
    let l_grids = [
        build_response_time_sheet(run, style)?,
        build_journey_error_rate_sheet(run, style)?,
        build_http_requests_sheet(run, style)?,
    ];

    let path_file_out = options.dir_output.join(file_name_for_timestamp(timestamp));
    let mut writer = XlsxWriter::new(
        path_file_out,
        style.xlsx.clone(),
        SpecXlsxValuePolicy::default(),
    );
    for grid in &l_grids {
        writer.write_sheet(grid).map_err(ReportError::Xlsx)?;
    }
    writer.close().map_err(ReportError::Xlsx)?;

    for report in writer.report() {
        for sheet in &report.sheets {
            debug!(
                "Sheet {:?}: {} row(s), {} cell(s)",
                sheet.sheet_name, sheet.n_rows, sheet.n_cells
            );
        }
        for msg in &report.warnings {
            warn!("{msg}");
        }
    }

    info!("Workbook written to {}", writer.file_out().display());
    Ok(writer.file_out().to_path_buf())
}

/// Load `path_data_file` with its companion files and render the workbook.
pub fn run_report(
    timestamp: &str,
    path_data_file: &Path,
    options: &SpecReportOptions,
) -> Result<PathBuf, ReportError> {
    let run = load_run(path_data_file, &options.dir_companion)?;
    generate_report(timestamp, &run, options)
}
