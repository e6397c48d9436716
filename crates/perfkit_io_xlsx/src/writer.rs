//! XLSX writer kernel that renders in-memory sheet grids into workbook output.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatPattern, Workbook, Worksheet, XlsxError};

use crate::conf::EnumFmtKey;
use crate::spec::{
    EnumCellValue, SpecCellFormat, SpecSheetGrid, SpecSheetWriteSummary, SpecXlsxReport,
    SpecXlsxStyle, SpecXlsxValuePolicy,
};
use crate::util::{
    clamp_column_width, convert_cell_value, create_sheet_identifier, sanitize_sheet_name,
    validate_grid_bounds,
};

/// Stateful workbook writer.
///
/// The workbook starts with no sheets; each [`Self::write_sheet`] call appends
/// one in call order.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    style: SpecXlsxStyle,
    value_policy: SpecXlsxValuePolicy,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path and style/value presets.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(
        path_file_out: PathBuf,
        style: SpecXlsxStyle,
        value_policy: SpecXlsxValuePolicy,
    ) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            style,
            value_policy,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Return output file path.
    pub fn file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk, replacing any existing file. Idempotent.
    pub fn close(&mut self) -> Result<(), String> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(derive_xlsx_error_text)?;
        self.if_closed = true;
        Ok(())
    }

    /// Append one sheet rendered from `grid`.
    pub fn write_sheet(&mut self, grid: &SpecSheetGrid) -> Result<(), String> {
        if self.if_closed {
            return Err("Cannot write after close().".to_string());
        }
        validate_grid_bounds(grid)?;

        let mut report = SpecXlsxReport::default();

        let c_sheet_name = sanitize_sheet_name(&grid.sheet_name, "_");
        if c_sheet_name != grid.sheet_name {
            report.warn(format!(
                "Sheet name {:?} sanitized to {c_sheet_name:?}.",
                grid.sheet_name
            ));
        }
        let sheet_name_unique = self.derive_unique_sheet_name(&c_sheet_name);
        if sheet_name_unique != c_sheet_name {
            report.warn(format!(
                "Sheet name {c_sheet_name:?} already used; renamed to {sheet_name_unique:?}."
            ));
        }

        let dict_fmt_by_key = derive_formats_for_grid(grid, &self.style);

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name_unique)
            .map_err(derive_xlsx_error_text)?;

        for (row_idx, row_cells) in grid.iter_non_blank_rows() {
            for (col_idx, cell) in row_cells.iter().enumerate() {
                let value = convert_cell_value(&cell.value, &self.value_policy);
                let fmt = &dict_fmt_by_key[&cell.fmt_key_effective()];
                write_cell_with_format(worksheet, row_idx, col_idx, &value, fmt)?;
            }
        }

        for (col_idx, n_width) in &grid.widths_by_col {
            worksheet
                .set_column_width(cast_col_num(*col_idx)?, clamp_column_width(*n_width))
                .map_err(derive_xlsx_error_text)?;
        }

        report.sheets.push(SpecSheetWriteSummary {
            sheet_name: sheet_name_unique,
            n_rows: grid.rows.len(),
            n_cells: grid.cell_count(),
        });
        self.l_reports.push(report);
        Ok(())
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let mut n_idx = 2usize;
        loop {
            let candidate = create_sheet_identifier(name, n_idx);
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn derive_formats_for_grid(
    grid: &SpecSheetGrid,
    style: &SpecXlsxStyle,
) -> BTreeMap<EnumFmtKey, Format> {
    let mut dict_fmt_by_key = BTreeMap::new();
    for (_, row_cells) in grid.iter_non_blank_rows() {
        for cell in row_cells {
            let key = cell.fmt_key_effective();
            dict_fmt_by_key
                .entry(key)
                .or_insert_with(|| derive_rust_xlsx_format(&style.format(key)));
        }
    }
    dict_fmt_by_key
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), String> {
    match value {
        EnumCellValue::None => {
            worksheet
                .write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::String(val) => {
            worksheet
                .write_string_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    val,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::Number(val) => {
            worksheet
                .write_number_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    *val,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::Integer(val) => {
            worksheet
                .write_number_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    *val as f64,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
        }
    }
    Ok(())
}

/// Translate a preset into a `rust_xlsxwriter` format; fill is always solid.
fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();
    if let Some(n_size) = spec.font_size {
        format = format.set_font_size(n_size as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if let Some(c_num_format) = &spec.num_format {
        format = format.set_num_format(c_num_format.as_str());
    }
    if let Some(c_color) = &spec.bg_color {
        format = format
            .set_background_color(c_color.as_str())
            .set_pattern(FormatPattern::Solid);
    }
    if let Some(c_color) = &spec.font_color {
        format = format.set_font_color(c_color.as_str());
    }
    format
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}
