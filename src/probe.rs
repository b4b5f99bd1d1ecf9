//! Reads saved files back through calamine, independently of the document
//! that wrote them.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::document::CellRange;

#[cfg(test)]
fn datatype_to_string(cell: Option<&Data>) -> String {
    match cell {
        None => String::new(),
        Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(n)) => {
            if n.fract() == 0.0 {
                format!("{:.0}", n)
            } else {
                n.to_string()
            }
        }
        Some(Data::Int(n)) => n.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        Some(Data::Error(e)) => format!("{e:?}"),
        Some(other) => format!("{other:?}"),
    }
}

fn first_sheet_range(path: &Path) -> Result<Range<Data>> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("cannot open file: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("workbook has no sheets: {}", path.display()))?;

    workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("cannot read sheet: {sheet_name}"))
}

/// Used range of the first sheet in 1-based coordinates, `None` when empty.
pub fn file_dimension(path: &Path) -> Result<Option<CellRange>> {
    let range = first_sheet_range(path)?;
    // calamine positions are 0-based (row, column)
    Ok(match (range.start(), range.end()) {
        (Some((r0, c0)), Some((r1, c1))) => Some(CellRange {
            first_row: r0 + 1,
            last_row: r1 + 1,
            first_column: c0 + 1,
            last_column: c1 + 1,
        }),
        _ => None,
    })
}

/// Cell text at a 1-based position; empty for missing cells.
#[cfg(test)]
pub(crate) fn cell_text(path: &Path, row: u32, column: u32) -> Result<String> {
    let range = first_sheet_range(path)?;
    if row == 0 || column == 0 {
        return Ok(String::new());
    }
    Ok(datatype_to_string(range.get_value((row - 1, column - 1))))
}
