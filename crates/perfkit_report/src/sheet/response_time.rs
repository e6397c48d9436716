//! Response-time sheet: one block of four tables per scenario.

use perfkit_io_xlsx::{SpecGridCell, SpecSheetGrid};

use super::{
    derive_header_row, derive_percentile_row, derive_section_row, derive_title_row, finalize_grid,
};
use crate::conf::{
    C_LABEL_FULL_DURATION_PERCENTILES, C_LABEL_ITERATIONS_COMPLETED, C_LABEL_ITERATIONS_STARTED,
    C_LABEL_STEADY_STATE_PERCENTILES, C_SHEET_RESPONSE_TIME, SpecReportStyle,
    TUP_HEADER_ITERATIONS_COMPLETED, TUP_HEADER_ITERATIONS_STARTED, TUP_HEADER_PERCENTILES,
    derive_scenario_title,
};
use crate::error::ReportError;
use crate::model::{SpecRunData, SpecScenarioSummary};

/// Build the "Response Time" sheet.
///
/// Per scenario, in document order: title, iterations started, iterations
/// completed with throughput, steady-state percentiles (header only when the
/// companion CSV is missing), full-duration percentiles.
pub fn build_response_time_sheet(
    run: &SpecRunData,
    style: &SpecReportStyle,
) -> Result<SpecSheetGrid, ReportError> {
    let spacing = &style.spacing;
    let mut grid = SpecSheetGrid::new(C_SHEET_RESPONSE_TIME);

    for (scenario, summary) in &run.summary.scenarios {
        grid.append_row(derive_title_row(&derive_scenario_title(scenario)));
        grid.append_blank_rows(spacing.after_title);

        append_iterations_started(&mut grid, scenario, summary);
        grid.append_blank_rows(spacing.after_iteration_table);

        append_iterations_completed(&mut grid, scenario, summary);
        grid.append_blank_rows(spacing.after_iteration_table);

        grid.append_row(derive_section_row(C_LABEL_STEADY_STATE_PERCENTILES));
        grid.append_row(derive_header_row(&TUP_HEADER_PERCENTILES));
        for row in run.steady_state_rows(scenario) {
            grid.append_row(derive_percentile_row(row));
        }
        grid.append_blank_rows(spacing.after_percentile_table);

        grid.append_row(derive_section_row(C_LABEL_FULL_DURATION_PERCENTILES));
        grid.append_row(derive_header_row(&TUP_HEADER_PERCENTILES));
        for row in run.summary.full_duration_rows(scenario) {
            grid.append_row(derive_percentile_row(row));
        }
        grid.append_blank_rows(spacing.between_scenarios);
    }

    grid.set_column_widths(&style.widths_response_time);
    finalize_grid(grid)
}

fn append_iterations_started(
    grid: &mut SpecSheetGrid,
    scenario: &str,
    summary: &SpecScenarioSummary,
) {
    grid.append_row(derive_section_row(C_LABEL_ITERATIONS_STARTED));
    grid.append_row(derive_header_row(&TUP_HEADER_ITERATIONS_STARTED));
    grid.append_row(vec![
        SpecGridCell::plain(scenario),
        SpecGridCell::plain(summary.iter_started),
    ]);
}

fn append_iterations_completed(
    grid: &mut SpecSheetGrid,
    scenario: &str,
    summary: &SpecScenarioSummary,
) {
    grid.append_row(derive_section_row(C_LABEL_ITERATIONS_COMPLETED));
    grid.append_row(derive_header_row(&TUP_HEADER_ITERATIONS_COMPLETED));
    grid.append_row(vec![
        SpecGridCell::plain(scenario),
        SpecGridCell::plain(summary.iter_completed),
        SpecGridCell::plain(summary.throughput),
    ]);
}

#[cfg(test)]
mod tests {
    use perfkit_io_xlsx::{EnumCellValue, EnumFmtKey};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::conf::derive_default_report_style;
    use crate::sheet::tests::{derive_non_blank_values, derive_run_two_scenarios};

    fn s(text: &str) -> EnumCellValue {
        EnumCellValue::String(text.to_string())
    }

    #[test]
    fn login_block_layout() {
        let run = derive_run_two_scenarios();
        let grid = build_response_time_sheet(&run, &derive_default_report_style()).expect("build");

        assert_eq!(grid.sheet_name, "Response Time");
        assert_eq!(grid.row_values(0), vec![s("SCENARIO: Login")]);
        assert!(grid.row_values(1).is_empty());
        assert_eq!(grid.row_values(2), vec![s("ITERATIONS STARTED (STEADY-STATE)")]);
        assert_eq!(grid.row_values(3), vec![s("Scenario"), s("Count")]);
        assert_eq!(grid.row_values(4), vec![s("Login"), EnumCellValue::Integer(100)]);
        assert!(grid.row_values(5).is_empty());
        assert_eq!(
            grid.row_values(8),
            vec![
                s("Login"),
                EnumCellValue::Integer(98),
                EnumCellValue::Number(12.5)
            ]
        );
        assert_eq!(grid.row_values(10), vec![s("STEADY-STATE PERCENTILES")]);
        assert_eq!(
            grid.row_values(12),
            vec![
                s("01_open"),
                EnumCellValue::Number(110.0),
                EnumCellValue::Number(200.0),
                EnumCellValue::Integer(90)
            ]
        );
        assert!(grid.row_values(13).is_empty());
        assert!(grid.row_values(14).is_empty());
        assert_eq!(grid.row_values(15), vec![s("FULL TEST DURATION PERCENTILES")]);
        assert_eq!(grid.row_values(17)[0], s("01_open"));
        assert_eq!(grid.row_values(18)[0], s("02_submit"));
        assert_eq!(grid.row_values(22), vec![s("SCENARIO: Checkout")]);
    }

    #[test]
    fn one_block_per_scenario_in_document_order() {
        let run = derive_run_two_scenarios();
        let grid = build_response_time_sheet(&run, &derive_default_report_style()).expect("build");
        let l_titles: Vec<EnumCellValue> = grid
            .rows
            .iter()
            .filter(|row| row.first().is_some_and(|cell| cell.fmt_key == Some(EnumFmtKey::Title)))
            .map(|row| row[0].value.clone())
            .collect();
        assert_eq!(l_titles, vec![s("SCENARIO: Login"), s("SCENARIO: Checkout")]);
    }

    #[test]
    fn missing_companion_csv_emits_header_only() {
        let run = derive_run_two_scenarios();
        let grid = build_response_time_sheet(&run, &derive_default_report_style()).expect("build");
        let l_values = derive_non_blank_values(&grid);

        let n_idx_checkout_steady = l_values
            .iter()
            .rposition(|row| *row == vec![s("STEADY-STATE PERCENTILES")])
            .expect("checkout steady-state section");
        assert_eq!(l_values[n_idx_checkout_steady + 1][0], s("Transaction Name"));
        assert_eq!(
            l_values[n_idx_checkout_steady + 2],
            vec![s("FULL TEST DURATION PERCENTILES")]
        );
    }

    #[test]
    fn headers_and_widths_are_styled() {
        let run = derive_run_two_scenarios();
        let grid = build_response_time_sheet(&run, &derive_default_report_style()).expect("build");
        assert!(grid.rows[3].iter().all(|cell| cell.fmt_key == Some(EnumFmtKey::Header)));
        assert_eq!(grid.rows[2][0].fmt_key, Some(EnumFmtKey::Section));
        assert_eq!(grid.widths_by_col.get(&0), Some(&70.0));
        assert_eq!(grid.widths_by_col.get(&3), Some(&15.0));
    }
}
