//! FILENAME: src/injection.rs
//! PURPOSE: Detects cell values a spreadsheet application would execute
//! as formulas when the exported CSV is opened.

use crate::cell::CellValue;
use crate::date_format::DateFormat;

/// Characters spreadsheet applications interpret as formula triggers when
/// they start a cell.
pub const FORMULA_TRIGGERS: [char; 4] = ['+', '-', '@', '='];

pub(crate) fn begins_with_trigger(text: &str) -> bool {
    text.chars()
        .next()
        .map_or(false, |c| FORMULA_TRIGGERS.contains(&c))
}

/// Returns true if any cell in the grid, after conversion to its export
/// text, begins with a formula trigger character. Every cell of every row
/// is scanned, not just headers. Pure; the grid is never mutated.
pub fn has_potential_injection(grid: &[Vec<CellValue>]) -> bool {
    let date_format = DateFormat::default();
    grid.iter()
        .flatten()
        .any(|cell| begins_with_trigger(&cell.export_string(&date_format)))
}
