// FILENAME: core\persistence\src\xlsx_reader.rs

use crate::{ColumnMap, DataLoadError};
use calamine::{open_workbook, Data, Reader, Xlsx};
use engine::{format_general, Table};
use std::path::Path;

/// Loads the first worksheet of an XLSX workbook. Row 0 holds the headers.
pub fn load_xlsx(path: &Path) -> Result<Table, DataLoadError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| DataLoadError::InvalidFormat("Workbook contains no sheets".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| {
            DataLoadError::InvalidFormat(format!("Sheet '{}' has no header row", sheet_name))
        })?
        .iter()
        .map(cell_text)
        .collect();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (row_idx, row) in rows.enumerate() {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let fields: Vec<String> = row.iter().map(cell_text).collect();
        records.push(columns.build_record(row_idx + 1, &fields)?);
    }

    Ok(Table::new(records))
}

/// Renders a cell as the text the column parser expects.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_general(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
        Data::Error(e) => format!("{:?}", e),
        Data::DateTime(dt) => format_general(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}
