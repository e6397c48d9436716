//! Report constants, file naming, and default style/options factories.

use std::path::PathBuf;

use perfkit_io_xlsx::{SpecXlsxStyle, derive_default_xlsx_style};

/// Sheet names in workbook order.
pub const C_SHEET_RESPONSE_TIME: &str = "Response Time";
pub const C_SHEET_JOURNEY_ERROR_RATE: &str = "Journey Error Rate";
pub const C_SHEET_HTTP_REQUESTS: &str = "HTTP Requests";
pub const TUP_SHEET_NAMES: [&str; 3] = [
    C_SHEET_RESPONSE_TIME,
    C_SHEET_JOURNEY_ERROR_RATE,
    C_SHEET_HTTP_REQUESTS,
];

/// Companion CSV column headers.
pub const C_CSV_COL_TRANSACTION: &str = "Transaction Name";
pub const C_CSV_COL_P95: &str = "P95(ms)";
pub const C_CSV_COL_P99: &str = "P99(ms)";
pub const C_CSV_COL_COUNT: &str = "Count";

/// Section labels.
pub const C_LABEL_ITERATIONS_STARTED: &str = "ITERATIONS STARTED (STEADY-STATE)";
pub const C_LABEL_ITERATIONS_COMPLETED: &str = "ITERATIONS COMPLETED & THROUGHPUT (STEADY-STATE)";
pub const C_LABEL_STEADY_STATE_PERCENTILES: &str = "STEADY-STATE PERCENTILES";
pub const C_LABEL_FULL_DURATION_PERCENTILES: &str = "FULL TEST DURATION PERCENTILES";
pub const C_LABEL_JOURNEY_ERROR_RATE: &str = "JOURNEY ERROR RATE (ENTIRE TEST)";
pub const C_LABEL_HTTP_REQUESTS: &str = "HTTP REQUESTS BY STATUS (ENTIRE TEST)";
pub const C_LABEL_TOTAL: &str = "TOTAL";

/// Table headers.
pub const TUP_HEADER_ITERATIONS_STARTED: [&str; 2] = ["Scenario", "Count"];
pub const TUP_HEADER_ITERATIONS_COMPLETED: [&str; 3] = ["Scenario", "Count", "Throughput/sec"];
pub const TUP_HEADER_PERCENTILES: [&str; 4] =
    [C_CSV_COL_TRANSACTION, C_CSV_COL_P95, C_CSV_COL_P99, C_CSV_COL_COUNT];
pub const TUP_HEADER_JOURNEY_ERROR_RATE: [&str; 5] =
    ["Scenario", "Started", "Completed", "Failed", "Error Rate%"];
pub const TUP_HEADER_HTTP_REQUESTS: [&str; 3] = ["Group Name", "Status", "Count"];

/// Title line of a per-scenario block.
pub fn derive_scenario_title(scenario: &str) -> String {
    format!("SCENARIO: {scenario}")
}

/// Companion CSV file name: `SS_RT_<scenario>_<timestamp>.csv`.
pub fn derive_companion_file_name(scenario: &str, timestamp: &str) -> String {
    format!("SS_RT_{scenario}_{timestamp}.csv")
}

/// Output workbook file name: `Performance_Report_<timestamp>.xlsx`.
pub fn derive_report_file_name(timestamp: &str) -> String {
    format!("Performance_Report_{timestamp}.xlsx")
}

/// Blank rows inserted between blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecBlockSpacing {
    /// After a sheet or scenario title.
    pub after_title: usize,
    /// After a one-line iteration table.
    pub after_iteration_table: usize,
    /// After the steady-state percentile table.
    pub after_percentile_table: usize,
    /// After the last table of a scenario block.
    pub between_scenarios: usize,
}

impl Default for SpecBlockSpacing {
    fn default() -> Self {
        Self {
            after_title: 1,
            after_iteration_table: 1,
            after_percentile_table: 2,
            between_scenarios: 3,
        }
    }
}

/// Immutable styling passed into every sheet builder.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecReportStyle {
    /// Cell format presets.
    pub xlsx: SpecXlsxStyle,
    /// Column widths of the response-time sheet (A..D).
    pub widths_response_time: Vec<f64>,
    /// Column widths of the journey error-rate sheet (A..E).
    pub widths_journey_error_rate: Vec<f64>,
    /// Column widths of the HTTP requests sheet (A..C).
    pub widths_http_requests: Vec<f64>,
    /// Row spacing between blocks.
    pub spacing: SpecBlockSpacing,
}

impl Default for SpecReportStyle {
    fn default() -> Self {
        derive_default_report_style()
    }
}

/// Build default report style.
pub fn derive_default_report_style() -> SpecReportStyle {
    SpecReportStyle {
        xlsx: derive_default_xlsx_style(),
        widths_response_time: vec![70.0, 15.0, 15.0, 15.0],
        widths_journey_error_rate: vec![35.0, 15.0, 15.0, 15.0, 15.0],
        widths_http_requests: vec![70.0, 15.0, 15.0],
        spacing: SpecBlockSpacing::default(),
    }
}

/// Input options for one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecReportOptions {
    /// Directory searched for companion CSV files.
    pub dir_companion: PathBuf,
    /// Directory receiving the workbook.
    pub dir_output: PathBuf,
    /// Styling.
    pub style: SpecReportStyle,
}

impl Default for SpecReportOptions {
    fn default() -> Self {
        Self {
            dir_companion: PathBuf::from("."),
            dir_output: PathBuf::from("."),
            style: SpecReportStyle::default(),
        }
    }
}
