use rust_xlsxwriter::{Format, Workbook};

use crate::search::NewsRecord;
use crate::Result;

/// MIME type of the exported document
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "news";
const MAX_COLUMN_WIDTH: usize = 60;

/// Serialize records into an in-memory XLSX workbook: one sheet, a bold
/// header row, one row per record in collection order. Error rows are
/// written like any other row.
pub fn export_xlsx(records: &[NewsRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (row, col, value) in sheet_cells(records) {
        if row == 0 {
            worksheet.write_with_format(row, col, value, &header_format)?;
        } else {
            worksheet.write_string(row, col, value)?;
        }
    }

    for (col, width) in column_widths(records).iter().enumerate() {
        worksheet.set_column_width(col as u16, *width as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Cell grid fed to the worksheet as `(row, col, value)`: the header row
/// first, then one row per record in collection order, fields in
/// [`NewsRecord::COLUMNS`] order.
fn sheet_cells(records: &[NewsRecord]) -> Vec<(u32, u16, &str)> {
    let mut cells: Vec<(u32, u16, &str)> = NewsRecord::COLUMNS
        .iter()
        .enumerate()
        .map(|(col, header)| (0u32, col as u16, *header))
        .collect();

    cells.extend(records.iter().enumerate().flat_map(|(row, record)| {
        record
            .fields()
            .into_iter()
            .enumerate()
            .map(move |(col, value)| ((row + 1) as u32, col as u16, value))
    }));

    cells
}

/// Per-column width: longest stringified cell or header, plus padding,
/// capped at [`MAX_COLUMN_WIDTH`] characters. Cosmetic only.
fn column_widths(records: &[NewsRecord]) -> [usize; NewsRecord::COLUMNS.len()] {
    let mut widths = NewsRecord::COLUMNS.map(|header| header.chars().count());

    for record in records {
        for (width, value) in widths.iter_mut().zip(record.fields()) {
            *width = (*width).max(value.chars().count());
        }
    }

    widths.map(|w| (w + 2).min(MAX_COLUMN_WIDTH))
}

/// Suggested download filename, unique per export
pub fn suggested_filename() -> String {
    format!("DD_News_RSS_{}.xlsx", chrono::Utc::now().timestamp())
}
