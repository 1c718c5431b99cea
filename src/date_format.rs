//! FILENAME: src/date_format.rs
//! PURPOSE: Date rendering strategy for exported cells.
//! CONTEXT: Locale-default rendering mimics the host environment's
//! date-to-string conversion and is inherently non-deterministic across
//! machines. Callers needing stable output supply an explicit pattern.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// How date cells are rendered to text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DateFormat {
    /// Derive a pattern from the process locale (see `locale_pattern`).
    Locale,
    /// An explicit chrono format string, e.g. `"%Y-%m-%d %H:%M:%S"`.
    Pattern(String),
}

impl Default for DateFormat {
    fn default() -> Self {
        DateFormat::Locale
    }
}

impl DateFormat {
    pub fn format(&self, date: &DateTime<Local>) -> String {
        match self {
            DateFormat::Locale => date.format(locale_pattern()).to_string(),
            DateFormat::Pattern(pattern) => date.format(pattern).to_string(),
        }
    }
}

/// Pick a date/time pattern from the process locale.
/// English locales get US-style month-first 12-hour output; everything else
/// falls back to day-first 24-hour output.
fn locale_pattern() -> &'static str {
    match sys_locale::get_locale() {
        Some(tag) if tag.starts_with("en") => "%-m/%-d/%Y, %-I:%M:%S %p",
        _ => "%d/%m/%Y, %H:%M:%S",
    }
}
