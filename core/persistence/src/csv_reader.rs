// FILENAME: core/persistence/src/csv_reader.rs

use crate::{ColumnMap, DataLoadError};
use engine::Table;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn load_csv(path: &Path) -> Result<Table, DataLoadError> {
    let file = File::open(path)?;
    read_csv(file)
}

/// Reads a headed CSV stream into a table.
pub fn read_csv<R: Read>(source: R) -> Result<Table, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row = result?;
        let fields: Vec<&str> = row.iter().collect();
        records.push(columns.build_record(row_idx + 1, &fields)?);
    }

    Ok(Table::new(records))
}
