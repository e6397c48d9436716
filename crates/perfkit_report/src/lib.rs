//! `perfkit_report` v1:
//! Performance-test summary to XLSX report generator.
//!
//! Modules:
//! - `conf`     : labels, file naming, style and option presets
//! - `error`    : report error type
//! - `model`    : typed input model
//! - `loader`   : summary document and companion CSV loading
//! - `sheet`    : the three sheet builders
//! - `assemble` : workbook assembly and output
pub mod assemble;
pub mod conf;
pub mod error;
pub mod loader;
pub mod model;
pub mod sheet;

pub use assemble::{file_name_for_timestamp, generate_report, run_report};
pub use conf::{SpecBlockSpacing, SpecReportOptions, SpecReportStyle, derive_default_report_style};
pub use error::ReportError;
pub use loader::{
    load_run, load_run_summary, load_steady_state_percentiles, resolve_steady_state_source,
};
pub use model::{
    EnumReportScalar, EnumSteadyStateSource, SpecHttpRequestRow, SpecPercentileRow, SpecRunData,
    SpecRunSummary, SpecRunTotals, SpecScenarioSummary,
};
pub use sheet::{
    build_http_requests_sheet, build_journey_error_rate_sheet, build_response_time_sheet,
};
