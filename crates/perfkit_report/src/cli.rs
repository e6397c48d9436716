use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::error;

use perfkit_report::{ReportError, SpecReportOptions};

#[derive(Debug, Parser)]
#[command(version, about = "Render a performance-test summary into an XLSX report", long_about = None)]
pub struct CliArgs {
    /// Timestamp used in the output file name.
    pub timestamp: String,

    /// Path to the JSON summary document.
    pub data_file: PathBuf,

    /// Directory holding the `SS_RT_<scenario>_<timestamp>.csv` files.
    #[arg(long, default_value = ".")]
    pub dir_companion: PathBuf,

    /// Directory receiving the workbook.
    #[arg(long, default_value = ".")]
    pub dir_output: PathBuf,
}

impl CliArgs {
    /// Report options with the default style.
    pub fn derive_options(&self) -> SpecReportOptions {
        SpecReportOptions {
            dir_companion: self.dir_companion.clone(),
            dir_output: self.dir_output.clone(),
            ..Default::default()
        }
    }
}

/// Report the outcome of a run and return whether it succeeded.
///
/// Success prints the workbook path to `out`; failures go to the log only.
pub fn write_run_outcome(
    result: &Result<PathBuf, ReportError>,
    out: &mut impl Write,
) -> io::Result<bool> {
    match result {
        Ok(path_file_out) => {
            writeln!(out, "Excel report generated: {}", path_file_out.display())?;
            Ok(true)
        }
        Err(err) => {
            error!("{err}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn positional_arguments_with_default_directories() {
        let args = CliArgs::try_parse_from(["generate_report", "20240101", "summary.json"])
            .expect("parse");
        assert_eq!(args.timestamp, "20240101");
        assert_eq!(args.data_file, PathBuf::from("summary.json"));

        let options = args.derive_options();
        assert_eq!(options.dir_companion, PathBuf::from("."));
        assert_eq!(options.dir_output, PathBuf::from("."));
    }

    #[test]
    fn directory_flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "generate_report",
            "ts",
            "data.json",
            "--dir-companion",
            "csv",
            "--dir-output",
            "out",
        ])
        .expect("parse");
        assert_eq!(args.dir_companion, PathBuf::from("csv"));
        assert_eq!(args.dir_output, PathBuf::from("out"));
    }

    #[test]
    fn missing_data_file_is_usage_error() {
        let err = CliArgs::try_parse_from(["generate_report", "20240101"]).expect_err("fail");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn success_outcome_prints_workbook_path() {
        let mut buf: Vec<u8> = Vec::new();
        let result = Ok(PathBuf::from("out/Performance_Report_ts.xlsx"));
        assert!(write_run_outcome(&result, &mut buf).expect("write"));
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "Excel report generated: out/Performance_Report_ts.xlsx\n"
        );
    }

    #[test]
    fn failure_outcome_is_not_echoed() {
        let mut buf: Vec<u8> = Vec::new();
        let result = Err(ReportError::Xlsx("disk full".to_string()));
        assert!(!write_run_outcome(&result, &mut buf).expect("write"));
        assert!(buf.is_empty());
    }
}
