use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) if n.fract() == 0.0 => write!(f, "{:.0}", n),
            CellValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Bounding box of non-empty cells. 1-based, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: u32,
    pub last_row: u32,
    pub first_column: u32,
    pub last_column: u32,
}

impl CellRange {
    pub fn single(row: u32, column: u32) -> Self {
        Self {
            first_row: row,
            last_row: row,
            first_column: column,
            last_column: column,
        }
    }

    pub fn include(&mut self, row: u32, column: u32) {
        self.first_row = self.first_row.min(row);
        self.last_row = self.last_row.max(row);
        self.first_column = self.first_column.min(column);
        self.last_column = self.last_column.max(column);
    }

    pub fn row_count(&self) -> u32 {
        self.last_row - self.first_row + 1
    }

    pub fn column_count(&self) -> u32 {
        self.last_column - self.first_column + 1
    }

    pub fn enclosing(cells: impl IntoIterator<Item = (u32, u32)>) -> Option<Self> {
        let mut range: Option<CellRange> = None;
        for (row, column) in cells {
            match range.as_mut() {
                Some(r) => r.include(row, column),
                None => range = Some(CellRange::single(row, column)),
            }
        }
        range
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} ({} x {})",
            to_a1(self.first_column, self.first_row),
            to_a1(self.last_column, self.last_row),
            self.row_count(),
            self.column_count()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFormat {
    pub bold: bool,
    pub number_format: String,
}

pub fn normal_format() -> CellFormat {
    CellFormat {
        bold: true,
        number_format: "@".to_string(),
    }
}

/// An open workbook, seen through its active sheet.
pub trait Document {
    /// False when the document was constructed from a path that failed to load.
    fn is_load_package(&self) -> bool;

    fn dimension(&self) -> Option<CellRange>;

    fn read(&self, row: u32, column: u32) -> CellValue;

    fn write(&mut self, row: u32, column: u32, value: &CellValue, format: Option<&CellFormat>);

    fn save_as(&mut self, path: &Path) -> Result<()>;
}

pub trait Backend {
    type Doc: Document;

    fn create(&self) -> Self::Doc;

    fn open(&self, path: &Path) -> Self::Doc;
}

fn column_number_to_name(mut column: u32) -> String {
    // 1 -> A, 26 -> Z, 27 -> AA ...
    let mut name = String::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.insert(0, (b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name
}

fn column_name_to_number(name: &str) -> u32 {
    name.bytes()
        .fold(0, |acc, b| acc * 26 + u32::from(b.to_ascii_uppercase() - b'A' + 1))
}

pub fn to_a1(col_1based: u32, row_1based: u32) -> String {
    format!("{}{}", column_number_to_name(col_1based), row_1based)
}

static A1_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$?([A-Za-z]{1,3})\$?([1-9][0-9]*)$").expect("A1 address pattern is valid")
});

/// `"B12"` / `"$B$12"` -> `(row, column)`
pub fn parse_a1(addr: &str) -> Option<(u32, u32)> {
    let caps = A1_ADDRESS.captures(addr.trim())?;
    let column = column_name_to_number(&caps[1]);
    let row = caps[2].parse().ok()?;
    Some((row, column))
}
