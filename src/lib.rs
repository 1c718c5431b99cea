//! FILENAME: src/lib.rs
//! CSV Export Module
//!
//! Converts a 2D grid of heterogeneous cell values into a BOM-prefixed,
//! spec-compliant CSV string, detects cell values that a spreadsheet
//! application would interpret as formulas, and saves the finished document
//! through a narrow file-save port.

mod cell;
mod date_format;
mod download;
mod encoder;
mod error;
mod injection;

pub use cell::CellValue;
pub use date_format::DateFormat;
pub use download::{download_csv_file, FileSaver, FsFileSaver};
pub use encoder::{create_csv, create_csv_with_options, ExportOptions, UTF8_BOM};
pub use error::ExportError;
pub use injection::{has_potential_injection, FORMULA_TRIGGERS};

/// A grid is an ordered sequence of rows of cells. Rows may vary in length;
/// the encoder never enforces a rectangular shape.
pub type Grid = Vec<Vec<CellValue>>;
