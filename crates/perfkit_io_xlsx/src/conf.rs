//! XLSX constants and default preset factories.

use std::collections::BTreeMap;

use crate::spec::{SpecCellFormat, SpecXlsxStyle};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];
/// Excel column width upper bound (character units).
pub const N_WIDTH_EXCEL_COLUMN_MAX: f64 = 255.0;

/// Fill color of table header cells.
pub const C_COLOR_HEADER_FILL: &str = "#366092";
/// Font color of table header cells.
pub const C_COLOR_HEADER_FONT: &str = "#FFFFFF";

/// Canonical format preset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumFmtKey {
    /// Generic text cell format.
    Text,
    /// Integer number format.
    Integer,
    /// Decimal number format.
    Decimal,
    /// Block title (e.g. `SCENARIO: <name>`).
    Title,
    /// Section label above a table.
    Section,
    /// Table header cell format.
    Header,
    /// Bold body cell (totals).
    Emphasis,
}

/// Build default named format presets used by [`crate::writer::XlsxWriter`].
pub fn derive_default_xlsx_formats() -> BTreeMap<EnumFmtKey, SpecCellFormat> {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_size: Some(11),
        ..Default::default()
    };

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert(EnumFmtKey::Text, cfg_base_fmt_spec.clone());
    dict_fmt.insert(
        EnumFmtKey::Integer,
        cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some("0".to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(EnumFmtKey::Decimal, cfg_base_fmt_spec.clone());
    dict_fmt.insert(
        EnumFmtKey::Title,
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            font_size: Some(14),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        EnumFmtKey::Section,
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            font_size: Some(12),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        EnumFmtKey::Header,
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            bg_color: Some(C_COLOR_HEADER_FILL.to_string()),
            font_color: Some(C_COLOR_HEADER_FONT.to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        EnumFmtKey::Emphasis,
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            ..Default::default()
        }),
    );

    dict_fmt
}

/// Build default workbook style.
pub fn derive_default_xlsx_style() -> SpecXlsxStyle {
    SpecXlsxStyle {
        formats: derive_default_xlsx_formats(),
    }
}
