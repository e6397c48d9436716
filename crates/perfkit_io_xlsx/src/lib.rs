//! `perfkit_io_xlsx` v1:
//! Rust-side XLSX rendering kernel.
//!
//! Modules:
//! - `conf`   : constants and default presets
//! - `spec`   : cell/format/grid models and reports
//! - `util`   : pure helper functions
//! - `writer` : grid-to-workbook writer kernel
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_COLOR_HEADER_FILL, EnumFmtKey, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL, derive_default_xlsx_formats, derive_default_xlsx_style,
};
pub use spec::{
    EnumCellValue, SpecCellFormat, SpecGridCell, SpecSheetGrid, SpecSheetWriteSummary,
    SpecXlsxReport, SpecXlsxStyle, SpecXlsxValuePolicy,
};
pub use util::{convert_cell_value, convert_nan_inf_to_str, sanitize_sheet_name};
pub use writer::XlsxWriter;
