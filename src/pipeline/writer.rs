//! Spreadsheet writer

use std::path::Path;

use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, FormatBorder, Workbook};

use super::error::ConvertResult;
use super::table::{CellValue, Table};

pub const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Write the table to a single-sheet workbook: header row, then data rows, no index column.
pub fn write_xlsx(table: &Table, path: &Path) -> ConvertResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let excel_row = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let excel_col = c as u16;
            match cell {
                CellValue::Text(s) => {
                    worksheet.write_string(excel_row, excel_col, s)?;
                }
                CellValue::Number(n) if n.is_finite() => {
                    worksheet.write_number(excel_row, excel_col, *n)?;
                }
                // Sheet XML has no representation for inf or NaN
                CellValue::Number(_) => {
                    worksheet.write_string(excel_row, excel_col, cell.to_string())?;
                }
                CellValue::Date(d) => match excel_date(d) {
                    Some(dt) => {
                        worksheet.write_datetime_with_format(excel_row, excel_col, &dt, &date_format)?;
                    }
                    // Excel has no serial number for dates before 1900
                    None => {
                        worksheet.write_string(excel_row, excel_col, cell.to_string())?;
                    }
                },
                CellValue::Empty => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn excel_date(date: &chrono::NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    if !(1900..=9999).contains(&year) {
        return None;
    }
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).ok()
}
