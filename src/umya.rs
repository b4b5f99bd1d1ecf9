//! [`Document`] over umya-spreadsheet. All reads and writes target the first
//! worksheet.

use std::path::Path;

use anyhow::{Context, Result};
use umya_spreadsheet::{CellRawValue, Spreadsheet, Style};

use crate::document::{Backend, CellFormat, CellRange, CellValue, Document, parse_a1, to_a1};

#[derive(Debug, Clone, Copy)]
pub struct UmyaBackend;

impl Backend for UmyaBackend {
    type Doc = UmyaDocument;

    fn create(&self) -> UmyaDocument {
        UmyaDocument::new()
    }

    fn open(&self, path: &Path) -> UmyaDocument {
        UmyaDocument::open(path)
    }
}

pub struct UmyaDocument {
    book: Spreadsheet,
    loaded: bool,
}

impl UmyaDocument {
    pub fn new() -> Self {
        Self {
            book: umya_spreadsheet::new_file(),
            loaded: true,
        }
    }

    /// Opens `path`. A read failure leaves an empty workbook behind with
    /// `is_load_package()` returning false.
    pub fn open(path: &Path) -> Self {
        match umya_spreadsheet::reader::xlsx::read(path) {
            Ok(book) => Self { book, loaded: true },
            Err(e) => {
                log::debug!("umya read of {} failed: {e}", path.display());
                Self {
                    book: umya_spreadsheet::new_file(),
                    loaded: false,
                }
            }
        }
    }
}

fn to_style(format: &CellFormat) -> Style {
    let mut style = Style::default();
    style.get_font_mut().set_bold(format.bold);
    style
        .get_number_format_mut()
        .set_format_code(format.number_format.as_str());
    style
}

impl Document for UmyaDocument {
    fn is_load_package(&self) -> bool {
        self.loaded
    }

    fn dimension(&self) -> Option<CellRange> {
        let sheet = self.book.get_sheet(&0)?;
        CellRange::enclosing(
            sheet
                .get_cell_collection()
                .into_iter()
                .filter(|cell| !cell.get_value().is_empty())
                .filter_map(|cell| parse_a1(&cell.get_coordinate().get_coordinate())),
        )
    }

    fn read(&self, row: u32, column: u32) -> CellValue {
        let Some(sheet) = self.book.get_sheet(&0) else {
            return CellValue::Empty;
        };
        let addr = to_a1(column, row);
        match sheet.get_cell(addr.as_str()) {
            None => CellValue::Empty,
            Some(cell) => match cell.get_raw_value() {
                CellRawValue::Numeric(n) => CellValue::Number(*n),
                _ => CellValue::from(cell.get_value().into_owned()),
            },
        }
    }

    fn write(&mut self, row: u32, column: u32, value: &CellValue, format: Option<&CellFormat>) {
        let Some(sheet) = self.book.get_sheet_mut(&0) else {
            return;
        };
        let addr = to_a1(column, row);
        let cell = sheet.get_cell_mut(addr.as_str());
        match value {
            CellValue::Empty => {
                cell.set_value_string("");
            }
            CellValue::Text(s) => {
                cell.set_value_string(s.as_str());
            }
            CellValue::Number(n) => {
                cell.set_value_number(*n);
            }
        }
        if let Some(format) = format {
            cell.set_style(to_style(format));
        }
    }

    fn save_as(&mut self, path: &Path) -> Result<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, path)
            .with_context(|| format!("cannot save workbook: {}", path.display()))
    }
}
