//! Cell normalization: sentinel dates and `DD.MM.YYYY` strings

use chrono::NaiveDate;

use super::table::{CellValue, Table};

/// Placeholder the source system writes for an unset date.
pub const SENTINEL_DATE: &str = "01.01.0001";

/// Replacement for [`SENTINEL_DATE`].
pub const SENTINEL_REPLACEMENT: &str = "01/01/1900";

/// Normalize every cell of the table.
pub fn normalize_table(table: Table) -> Table {
    table.map_cells(normalize_cell)
}

/// Sentinel substitution first, then date reformatting.
///
/// The substituted sentinel is itself a valid `DD/MM/YYYY` string, so it ends
/// up as the date 1900-01-01.
pub fn normalize_cell(cell: CellValue) -> CellValue {
    match cell {
        CellValue::Text(s) => {
            let s = if s == SENTINEL_DATE {
                SENTINEL_REPLACEMENT.to_string()
            } else {
                s
            };
            match parse_day_first_date(&s) {
                Some(date) => CellValue::Date(date),
                None => CellValue::Text(s),
            }
        }
        other => other,
    }
}

/// Parse a ten-character `DD.MM.YYYY` or `DD/MM/YYYY` string.
///
/// Anything of another length, with a different shape, or naming an impossible
/// calendar day (`31.02.2023`) yields `None`.
pub fn parse_day_first_date(value: &str) -> Option<NaiveDate> {
    if value.chars().count() != 10 {
        return None;
    }
    let s = value.replace('.', "/");
    let b = s.as_bytes();
    if b[2] != b'/' || b[5] != b'/' {
        return None;
    }
    let digits_ok = b
        .iter()
        .enumerate()
        .all(|(i, c)| i == 2 || i == 5 || c.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    let day: u32 = s[0..2].parse().ok()?;
    let month: u32 = s[3..5].parse().ok()?;
    let year: i32 = s[6..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
