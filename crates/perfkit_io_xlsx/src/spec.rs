//! Shared XLSX specification models.

use std::collections::BTreeMap;

use crate::conf::EnumFmtKey;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification; `None` fields fall back to workbook defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color (solid pattern).
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats; set fields of `other` win.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Named format presets applied by the writer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxStyle {
    /// Format per preset key.
    pub formats: BTreeMap<EnumFmtKey, SpecCellFormat>,
}

impl SpecXlsxStyle {
    /// Resolve preset, falling back to the text preset, then to an empty format.
    pub fn format(&self, key: EnumFmtKey) -> SpecCellFormat {
        self.formats
            .get(&key)
            .or_else(|| self.formats.get(&EnumFmtKey::Text))
            .cloned()
            .unwrap_or_default()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValues

/// Normalized cell value during conversion/write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Floating-point value.
    Number(f64),
    /// Integer value (counts).
    Integer(i64),
}

impl EnumCellValue {
    /// Default format preset for this value kind.
    pub fn fmt_key_default(&self) -> EnumFmtKey {
        match self {
            Self::None | Self::String(_) => EnumFmtKey::Text,
            Self::Number(_) => EnumFmtKey::Decimal,
            Self::Integer(_) => EnumFmtKey::Integer,
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for EnumCellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for EnumCellValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => Self::Integer(n),
            Err(_) => Self::Number(value as f64),
        }
    }
}

/// Text replacements for values XLSX cannot store as numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxValuePolicy {
    /// Replacement text for NaN.
    pub nan_str: String,
    /// Replacement text for positive infinity.
    pub posinf_str: String,
    /// Replacement text for negative infinity.
    pub neginf_str: String,
}

impl Default for SpecXlsxValuePolicy {
    fn default() -> Self {
        Self {
            nan_str: "NaN".to_string(),
            posinf_str: "Inf".to_string(),
            neginf_str: "-Inf".to_string(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetGrid

/// One cell of an in-memory sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecGridCell {
    /// Cell value.
    pub value: EnumCellValue,
    /// Explicit format preset; `None` uses [`EnumCellValue::fmt_key_default`].
    pub fmt_key: Option<EnumFmtKey>,
}

impl SpecGridCell {
    /// Cell using the value's default preset.
    pub fn plain(value: impl Into<EnumCellValue>) -> Self {
        Self {
            value: value.into(),
            fmt_key: None,
        }
    }

    /// Cell with an explicit preset.
    pub fn styled(value: impl Into<EnumCellValue>, fmt_key: EnumFmtKey) -> Self {
        Self {
            value: value.into(),
            fmt_key: Some(fmt_key),
        }
    }

    /// Effective preset key.
    pub fn fmt_key_effective(&self) -> EnumFmtKey {
        self.fmt_key.unwrap_or_else(|| self.value.fmt_key_default())
    }
}

/// In-memory sheet laid out top-down with a row cursor.
///
/// Rows are zero-based; an empty row is rendered blank.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetGrid {
    /// Target sheet name.
    pub sheet_name: String,
    /// Rows in order, cells from column A.
    pub rows: Vec<Vec<SpecGridCell>>,
    /// Fixed column widths (character units) by zero-based column index.
    pub widths_by_col: BTreeMap<usize, f64>,
}

impl SpecSheetGrid {
    /// Create empty grid for `sheet_name`.
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            ..Default::default()
        }
    }

    /// Write `cells` at the cursor row and move the cursor down by one.
    pub fn append_row(&mut self, cells: Vec<SpecGridCell>) {
        self.rows.push(cells);
    }

    /// Move the cursor down by `n` rows, leaving them blank.
    pub fn append_blank_rows(&mut self, n: usize) {
        self.rows.extend(std::iter::repeat_with(Vec::new).take(n));
    }

    /// Zero-based index of the cursor row.
    pub fn row_cursor(&self) -> usize {
        self.rows.len()
    }

    /// Set widths for consecutive columns starting at column A.
    pub fn set_column_widths(&mut self, widths: &[f64]) {
        for (n_idx_col, n_width) in widths.iter().enumerate() {
            self.widths_by_col.insert(n_idx_col, *n_width);
        }
    }

    /// Iterate `(row_idx, cells)` over rows holding at least one cell.
    pub fn iter_non_blank_rows(&self) -> impl Iterator<Item = (usize, &[SpecGridCell])> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_empty())
            .map(|(n_idx_row, row)| (n_idx_row, row.as_slice()))
    }

    /// Values of one row; empty for blank or out-of-range rows.
    pub fn row_values(&self, row_idx: usize) -> Vec<EnumCellValue> {
        self.rows
            .get(row_idx)
            .map(|row| row.iter().map(|cell| cell.value.clone()).collect())
            .unwrap_or_default()
    }

    /// Number of written cells.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Summary of one sheet emitted to the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetWriteSummary {
    /// Actual sheet name in workbook.
    pub sheet_name: String,
    /// Rows spanned, blank rows included.
    pub n_rows: usize,
    /// Cells written.
    pub n_cells: usize,
}

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheets produced by the write call.
    pub sheets: Vec<SpecSheetWriteSummary>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
