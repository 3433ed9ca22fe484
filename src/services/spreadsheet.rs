use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;

use crate::domain::sheet_row::{Cell, SheetRow};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("could not read workbook: {0}")]
    Read(#[from] calamine::Error),
    #[error("workbook has no sheets")]
    NoSheets,
    #[error("could not write workbook: {0}")]
    Write(#[from] XlsxError),
}

/// Rows of the first sheet, keyed by the header row. Blank rows are dropped.
pub fn read_first_sheet(bytes: Vec<u8>) -> Result<Vec<SheetRow>, SpreadsheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SpreadsheetError::NoSheets)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(i, data)| match to_cell(data) {
                Some(cell) => cell.to_text(),
                None => format!("__EMPTY_{}", i),
            })
            .collect(),
        None => return Ok(vec![]),
    };

    Ok(rows
        .map(|data_row| {
            headers
                .iter()
                .zip(data_row.iter())
                .filter_map(|(header, data)| to_cell(data).map(|cell| (header.clone(), cell)))
                .collect::<SheetRow>()
        })
        .filter(|row| !row.is_empty())
        .collect())
}

fn to_cell(data: &Data) -> Option<Cell> {
    match data {
        Data::String(s) if s.is_empty() => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Cell::Text(s.clone())),
        Data::Float(f) => Some(Cell::Number(*f)),
        Data::Int(i) => Some(Cell::Number(*i as f64)),
        Data::Bool(b) => Some(Cell::Bool(*b)),
        Data::DateTime(dt) => Some(Cell::Number(dt.as_f64())),
        Data::Error(_) | Data::Empty => None,
    }
}

/// A single-sheet workbook with a header row and one example row.
pub fn write_template(
    sheet_name: &str,
    columns: &[(&str, &str)],
) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, (header, example)) in columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string(0, col, *header)?;
        worksheet.write_string(1, col, *example)?;
    }

    Ok(workbook.save_to_buffer()?)
}
