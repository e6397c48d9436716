//! Summary document and companion percentile CSV loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, SerReader};
use serde_json::error::Category;

use crate::conf::{
    C_CSV_COL_COUNT, C_CSV_COL_P95, C_CSV_COL_P99, C_CSV_COL_TRANSACTION, derive_companion_file_name,
};
use crate::error::ReportError;
use crate::model::{EnumSteadyStateSource, SpecPercentileRow, SpecRunData, SpecRunSummary};

////////////////////////////////////////////////////////////////////////////////
// #region SummaryDocument

/// Read and parse the summary JSON document.
///
/// IO failures map to [`ReportError::InputRead`], JSON syntax failures to
/// [`ReportError::InputParse`], and missing/mistyped fields to
/// [`ReportError::Schema`].
pub fn load_run_summary(path_data_file: &Path) -> Result<SpecRunSummary, ReportError> {
    let c_doc = fs::read_to_string(path_data_file).map_err(|e| ReportError::InputRead {
        path: path_data_file.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str::<SpecRunSummary>(&c_doc).map_err(|e| match e.classify() {
        Category::Data => ReportError::Schema {
            path: path_data_file.to_path_buf(),
            message: e.to_string(),
        },
        Category::Io | Category::Syntax | Category::Eof => ReportError::InputParse {
            path: path_data_file.to_path_buf(),
            source: e,
        },
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CompanionCsv

/// Resolve the steady-state percentile source of one scenario.
///
/// A missing companion file is not an error.
pub fn resolve_steady_state_source(
    dir_companion: &Path,
    scenario: &str,
    timestamp: &str,
) -> Result<EnumSteadyStateSource, ReportError> {
    let path_csv = dir_companion.join(derive_companion_file_name(scenario, timestamp));
    if !path_csv.is_file() {
        info!(
            "No steady-state percentiles for {scenario:?} ({} not found)",
            path_csv.display()
        );
        return Ok(EnumSteadyStateSource::Missing);
    }

    debug!("Reading steady-state percentiles from {}", path_csv.display());
    let l_rows = load_steady_state_percentiles(&path_csv)?;
    debug!("Read {} steady-state rows for {scenario:?}", l_rows.len());
    Ok(EnumSteadyStateSource::Loaded(l_rows))
}

/// Read a companion CSV with columns `Transaction Name, P95(ms), P99(ms), Count`.
///
/// A zero-byte file yields no rows.
pub fn load_steady_state_percentiles(path_csv: &Path) -> Result<Vec<SpecPercentileRow>, ReportError> {
    let derive_err = |message: String| ReportError::Companion {
        path: path_csv.to_path_buf(),
        message,
    };

    let meta_csv = fs::metadata(path_csv).map_err(|e| derive_err(e.to_string()))?;
    if meta_csv.len() == 0 {
        return Ok(vec![]);
    }

    let df_csv = read_csv_dataframe(path_csv.to_path_buf()).map_err(derive_err)?;
    derive_percentile_rows(&df_csv).map_err(derive_err)
}

/// Every column is read as text; cells are parsed one by one afterwards.
fn read_csv_dataframe(path_csv: PathBuf) -> Result<DataFrame, String> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path_csv))
        .and_then(|reader| reader.finish())
        .map_err(|err| format!("Failed to read CSV: {err}"))
}

fn derive_percentile_rows(df: &DataFrame) -> Result<Vec<SpecPercentileRow>, String> {
    let col_transaction = df
        .column(C_CSV_COL_TRANSACTION)
        .map_err(|_| format!("Column not found: {C_CSV_COL_TRANSACTION:?}"))?;
    let col_p95 = df
        .column(C_CSV_COL_P95)
        .map_err(|_| format!("Column not found: {C_CSV_COL_P95:?}"))?;
    let col_p99 = df
        .column(C_CSV_COL_P99)
        .map_err(|_| format!("Column not found: {C_CSV_COL_P99:?}"))?;
    let col_count = df
        .column(C_CSV_COL_COUNT)
        .map_err(|_| format!("Column not found: {C_CSV_COL_COUNT:?}"))?;

    let mut l_rows = Vec::with_capacity(df.height());
    for n_idx_row in 0..df.height() {
        let derive_cell_err = |err: String| format!("row {}: {err}", n_idx_row + 1);

        let transaction = derive_text_from_any_value(
            col_transaction
                .get(n_idx_row)
                .map_err(|err| derive_cell_err(err.to_string()))?,
        );
        let p95 = derive_f64_from_any_value(
            col_p95
                .get(n_idx_row)
                .map_err(|err| derive_cell_err(err.to_string()))?,
        )
        .ok_or_else(|| derive_cell_err(format!("{C_CSV_COL_P95:?} is not numeric")))?;
        let p99 = derive_f64_from_any_value(
            col_p99
                .get(n_idx_row)
                .map_err(|err| derive_cell_err(err.to_string()))?,
        )
        .ok_or_else(|| derive_cell_err(format!("{C_CSV_COL_P99:?} is not numeric")))?;
        let count = derive_u64_from_any_value(
            col_count
                .get(n_idx_row)
                .map_err(|err| derive_cell_err(err.to_string()))?,
        )
        .ok_or_else(|| derive_cell_err(format!("{C_CSV_COL_COUNT:?} is not an integer")))?;

        l_rows.push(SpecPercentileRow {
            transaction,
            p95,
            p99,
            count,
        });
    }
    Ok(l_rows)
}

fn derive_text_from_any_value(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(val) => val.to_string(),
        AnyValue::StringOwned(val) => val.to_string(),
        _ => value.to_string(),
    }
}

fn derive_f64_from_any_value(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::UInt32(val) => Some(val as f64),
        AnyValue::UInt64(val) => Some(val as f64),
        AnyValue::Int32(val) => Some(val as f64),
        AnyValue::Int64(val) => Some(val as f64),
        AnyValue::Float32(val) => Some(val as f64),
        AnyValue::Float64(val) => Some(val),
        AnyValue::String(val) => val.trim().parse::<f64>().ok(),
        AnyValue::StringOwned(val) => val.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn derive_u64_from_any_value(value: AnyValue<'_>) -> Option<u64> {
    match value {
        AnyValue::UInt32(val) => Some(val as u64),
        AnyValue::UInt64(val) => Some(val),
        AnyValue::Int32(val) => u64::try_from(val).ok(),
        AnyValue::Int64(val) => u64::try_from(val).ok(),
        AnyValue::Float64(val) if val.fract() == 0.0 && val >= 0.0 => Some(val as u64),
        AnyValue::String(val) => val.trim().parse::<u64>().ok(),
        AnyValue::StringOwned(val) => val.trim().parse::<u64>().ok(),
        _ => None,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Run

/// Load the summary document and every scenario's steady-state source.
///
/// All files are fully read and closed before this returns.
pub fn load_run(path_data_file: &Path, dir_companion: &Path) -> Result<SpecRunData, ReportError> {
    debug!("Loading summary from {}", path_data_file.display());
    let summary = load_run_summary(path_data_file)?;

    let mut dict_steady_state = BTreeMap::new();
    for scenario in summary.scenario_names() {
        let source = resolve_steady_state_source(dir_companion, scenario, &summary.timestamp)?;
        dict_steady_state.insert(scenario.to_string(), source);
    }

    info!(
        "Loaded run {:?} with {} scenario(s)",
        summary.timestamp,
        summary.scenarios.len()
    );
    Ok(SpecRunData {
        summary,
        steady_state: dict_steady_state,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::EnumReportScalar;

    const C_DOC_LOGIN: &str = r#"{"timestamp":"20240101","scenarios":{"Login":{"iter_started":100,"iter_completed":98,"throughput":12.5,"total_started":100,"total_completed":98,"failed":2,"error_rate":2.0}},"total":{"started":100,"completed":98,"failed":2,"error_rate":2.0}}"#;

    fn write_text(path: &Path, txt: &str) {
        std::fs::write(path, txt).expect("write text");
    }

    #[test]
    fn load_run_summary_parses_concrete_document() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_doc = tmp.path().join("summary.json");
        write_text(&path_doc, C_DOC_LOGIN);

        let summary = load_run_summary(&path_doc).expect("load");
        assert_eq!(summary.timestamp, "20240101");
        assert_eq!(summary.scenarios.len(), 1);
        let (name, scenario) = &summary.scenarios[0];
        assert_eq!(name, "Login");
        assert_eq!(scenario.iter_started, 100);
        assert_eq!(scenario.throughput, 12.5);
        assert_eq!(summary.total.error_rate, EnumReportScalar::Number(2.0));
    }

    #[test]
    fn load_run_summary_missing_file_is_input_read_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = load_run_summary(&tmp.path().join("absent.json")).expect_err("must fail");
        assert!(matches!(err, ReportError::InputRead { .. }));
    }

    #[test]
    fn load_run_summary_invalid_json_is_parse_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_doc = tmp.path().join("broken.json");
        write_text(&path_doc, "{\"timestamp\": ");

        let err = load_run_summary(&path_doc).expect_err("must fail");
        assert!(matches!(err, ReportError::InputParse { .. }));
    }

    #[test]
    fn load_run_summary_missing_required_key_is_schema_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_doc = tmp.path().join("no_total.json");
        write_text(&path_doc, r#"{"timestamp":"t","scenarios":{}}"#);

        let err = load_run_summary(&path_doc).expect_err("must fail");
        match err {
            ReportError::Schema { message, .. } => assert!(message.contains("total")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn steady_state_csv_is_read_in_file_order() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_text(
            &tmp.path().join("SS_RT_Login_20240101.csv"),
            "Transaction Name,P95(ms),P99(ms),Count\n\
             B01_Login_01_LaunchLandingPage,120,250.5,98\n\
             \"B01_Login_02_Submit, with comma\",80.25,99.75,97\n",
        );

        let source =
            resolve_steady_state_source(tmp.path(), "Login", "20240101").expect("resolve");
        assert_eq!(
            source,
            EnumSteadyStateSource::Loaded(vec![
                SpecPercentileRow {
                    transaction: "B01_Login_01_LaunchLandingPage".to_string(),
                    p95: 120.0,
                    p99: 250.5,
                    count: 98,
                },
                SpecPercentileRow {
                    transaction: "B01_Login_02_Submit, with comma".to_string(),
                    p95: 80.25,
                    p99: 99.75,
                    count: 97,
                },
            ])
        );
    }

    fn derive_csv_text(l_lines: &[String]) -> String {
        let mut c_text = String::from("Transaction Name,P95(ms),P99(ms),Count\n");
        for c_line in l_lines {
            c_text.push_str(c_line);
            c_text.push('\n');
        }
        c_text
    }

    #[test]
    fn decimal_after_many_integral_rows_is_accepted() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_csv = tmp.path().join("long.csv");
        let mut l_lines: Vec<String> = (0..150).map(|n| format!("T{n},100,200,5")).collect();
        l_lines.push("T_last,120.5,250.75,5".to_string());
        write_text(&path_csv, &derive_csv_text(&l_lines));

        let l_rows = load_steady_state_percentiles(&path_csv).expect("load");
        assert_eq!(l_rows.len(), 151);
        assert_eq!(l_rows[0].p95, 100.0);
        assert_eq!(
            l_rows[150],
            SpecPercentileRow {
                transaction: "T_last".to_string(),
                p95: 120.5,
                p99: 250.75,
                count: 5,
            }
        );
    }

    #[test]
    fn numeric_looking_names_stay_text() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_csv = tmp.path().join("names.csv");
        let mut l_lines: Vec<String> = (0..120).map(|n| format!("{n},1,2,3")).collect();
        l_lines.push("B01_Login,1,2,3".to_string());
        write_text(&path_csv, &derive_csv_text(&l_lines));

        let l_rows = load_steady_state_percentiles(&path_csv).expect("load");
        assert_eq!(l_rows.len(), 121);
        assert_eq!(l_rows[7].transaction, "7");
        assert_eq!(l_rows[120].transaction, "B01_Login");
        assert_eq!(l_rows[120].count, 3);
    }

    #[test]
    fn non_numeric_percentile_is_companion_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_csv = tmp.path().join("bad_value.csv");
        write_text(&path_csv, &derive_csv_text(&["T1,fast,2,3".to_string()]));

        let err = load_steady_state_percentiles(&path_csv).expect_err("must fail");
        match err {
            ReportError::Companion { message, .. } => {
                assert!(message.contains("row 1"));
                assert!(message.contains("P95(ms)"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_companion_resolves_to_missing_source() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let source =
            resolve_steady_state_source(tmp.path(), "Checkout", "20240101").expect("resolve");
        assert_eq!(source, EnumSteadyStateSource::Missing);
    }

    #[test]
    fn header_only_and_empty_companions_yield_no_rows() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_header_only = tmp.path().join("header_only.csv");
        write_text(&path_header_only, "Transaction Name,P95(ms),P99(ms),Count\n");
        let path_empty = tmp.path().join("empty.csv");
        write_text(&path_empty, "");

        assert!(
            load_steady_state_percentiles(&path_header_only)
                .expect("header only")
                .is_empty()
        );
        assert!(
            load_steady_state_percentiles(&path_empty)
                .expect("empty")
                .is_empty()
        );
    }

    #[test]
    fn companion_missing_column_is_companion_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_csv = tmp.path().join("bad.csv");
        write_text(&path_csv, "Transaction Name,P95(ms),Count\nT1,1.0,3\n");

        let err = load_steady_state_percentiles(&path_csv).expect_err("must fail");
        match err {
            ReportError::Companion { message, .. } => assert!(message.contains("P99(ms)")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_run_resolves_every_scenario_once() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_doc = tmp.path().join("summary.json");
        write_text(&path_doc, C_DOC_LOGIN);
        write_text(
            &tmp.path().join("SS_RT_Login_20240101.csv"),
            "Transaction Name,P95(ms),P99(ms),Count\nT1,1.5,2.5,4\n",
        );

        let run = load_run(&path_doc, tmp.path()).expect("load run");
        assert_eq!(run.steady_state.len(), 1);
        assert_eq!(run.steady_state_rows("Login").len(), 1);
        assert!(run.steady_state_rows("Unknown").is_empty());
    }
}
