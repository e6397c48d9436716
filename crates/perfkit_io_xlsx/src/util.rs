//! Stateless helper utilities used by the XLSX writer kernel.

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_WIDTH_EXCEL_COLUMN_MAX,
    TUP_EXCEL_ILLEGAL,
};
use crate::spec::{EnumCellValue, SpecSheetGrid, SpecXlsxValuePolicy};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Convert `NaN`/`Inf` to policy string; return error for finite values.
pub fn convert_nan_inf_to_str(
    x: f64,
    value_policy: &SpecXlsxValuePolicy,
) -> Result<String, String> {
    if x.is_nan() {
        return Ok(value_policy.nan_str.clone());
    }
    if x.is_infinite() {
        return Ok(if x.is_sign_positive() {
            value_policy.posinf_str.clone()
        } else {
            value_policy.neginf_str.clone()
        });
    }
    Err("Input is neither NaN nor Inf.".to_string())
}

/// Normalize cell value before it reaches the encoder.
///
/// Non-finite numbers become policy text; everything else passes through.
pub fn convert_cell_value(
    value: &EnumCellValue,
    value_policy: &SpecXlsxValuePolicy,
) -> EnumCellValue {
    match value {
        EnumCellValue::Number(n) if !n.is_finite() => EnumCellValue::String(
            convert_nan_inf_to_str(*n, value_policy)
                .unwrap_or_else(|_| value_policy.nan_str.clone()),
        ),
        _ => value.clone(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Create suffixed sheet name (`base_1`, `base_2`, ...), respecting length cap.
pub fn create_sheet_identifier(base_name: &str, part_idx_1based: usize) -> String {
    let c_sheet_name_suffix = format!("_{part_idx_1based}");
    let n_len_base_name_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_sheet_name_suffix.len());

    let c_sheet_name_base: String = base_name
        .chars()
        .take(usize::max(1, n_len_base_name_max))
        .collect();

    format!("{c_sheet_name_base}{c_sheet_name_suffix}")
}

/// Check that the grid fits into one Excel worksheet.
pub fn validate_grid_bounds(grid: &SpecSheetGrid) -> Result<(), String> {
    let n_rows = grid.rows.len();
    if n_rows > N_NROWS_EXCEL_MAX {
        return Err(format!(
            "Sheet {:?} has {n_rows} rows; Excel limit is {N_NROWS_EXCEL_MAX}.",
            grid.sheet_name
        ));
    }

    let n_cols = grid.rows.iter().map(Vec::len).max().unwrap_or(0);
    if n_cols > N_NCOLS_EXCEL_MAX {
        return Err(format!(
            "Sheet {:?} has {n_cols} columns; Excel limit is {N_NCOLS_EXCEL_MAX}.",
            grid.sheet_name
        ));
    }

    if let Some(n_idx_col) = grid.widths_by_col.keys().find(|idx| **idx >= N_NCOLS_EXCEL_MAX) {
        return Err(format!(
            "Column width set for index {n_idx_col}; Excel limit is {N_NCOLS_EXCEL_MAX} columns."
        ));
    }
    Ok(())
}

/// Clamp a requested column width to Excel's accepted range.
pub fn clamp_column_width(width: f64) -> f64 {
    if !width.is_finite() {
        return 0.0;
    }
    width.clamp(0.0, N_WIDTH_EXCEL_COLUMN_MAX)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SpecGridCell;

    #[test]
    fn test_convert_cell_value_replaces_non_finite_numbers() {
        let value_policy = SpecXlsxValuePolicy::default();

        assert_eq!(
            convert_cell_value(&EnumCellValue::Number(f64::NAN), &value_policy),
            EnumCellValue::String("NaN".to_string())
        );
        assert_eq!(
            convert_cell_value(&EnumCellValue::Number(f64::NEG_INFINITY), &value_policy),
            EnumCellValue::String("-Inf".to_string())
        );
        assert_eq!(
            convert_cell_value(&EnumCellValue::Number(12.5), &value_policy),
            EnumCellValue::Number(12.5)
        );
        assert_eq!(
            convert_cell_value(&EnumCellValue::Integer(7), &value_policy),
            EnumCellValue::Integer(7)
        );
        assert!(convert_nan_inf_to_str(1.0, &value_policy).is_err());
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Response Time", "_"), "Response Time");
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        assert_eq!(sanitize_sheet_name("  ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40), "_").len(), 31);
    }

    #[test]
    fn test_create_sheet_identifier_respects_length_cap() {
        assert_eq!(create_sheet_identifier("HTTP Requests", 2), "HTTP Requests_2");
        let c_name = create_sheet_identifier(&"y".repeat(31), 12);
        assert_eq!(c_name.len(), 31);
        assert!(c_name.ends_with("_12"));
    }

    #[test]
    fn test_validate_grid_bounds() {
        let mut grid = SpecSheetGrid::new("S");
        grid.append_row(vec![SpecGridCell::plain("a"); 4]);
        grid.set_column_widths(&[70.0, 15.0]);
        assert!(validate_grid_bounds(&grid).is_ok());

        grid.widths_by_col.insert(N_NCOLS_EXCEL_MAX, 10.0);
        assert!(validate_grid_bounds(&grid).is_err());
    }

    #[test]
    fn test_clamp_column_width() {
        assert_eq!(clamp_column_width(70.0), 70.0);
        assert_eq!(clamp_column_width(999.0), 255.0);
        assert_eq!(clamp_column_width(-1.0), 0.0);
        assert_eq!(clamp_column_width(f64::NAN), 0.0);
    }
}
