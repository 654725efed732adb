//! FILENAME: tests/test_load_xlsx.rs
//! Integration tests for loading the dataset from XLSX.

mod common;

use common::{HEADER, ROWS};
use persistence::{load_dataset, DataLoadError};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

/// Writes the CSV fixture into a workbook, storing numeric-looking cells as numbers.
fn write_workbook(dir: &TempDir, header: &str, rows: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join("customers.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in header.split(',').enumerate() {
        sheet.write_string(0, col as u16, name).unwrap();
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col, value) in row.split(',').enumerate() {
            let r = (row_idx + 1) as u32;
            match value.parse::<f64>() {
                Ok(n) => sheet.write_number(r, col as u16, n).unwrap(),
                Err(_) => sheet.write_string(r, col as u16, value).unwrap(),
            };
        }
    }

    workbook.save(&path).unwrap();
    path
}

#[test]
fn test_load_sample_xlsx() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, HEADER, &ROWS);

    let table = load_dataset(&path).unwrap();
    assert_eq!(table.len(), 4);

    let first = table.rows().next().unwrap();
    assert_eq!(first.customer_id, "1");
    assert_eq!(first.age, 55);
    assert_eq!(first.purchase_amount, 53.0);
    assert_eq!(first.review_rating, 3.1);
    assert_eq!(first.frequency_of_purchases, "Fortnightly");
}

#[test]
fn test_xlsx_missing_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let header = HEADER.replace(",gender", "");
    let path = write_workbook(&dir, &header, &[]);

    let err = load_dataset(&path).unwrap_err();
    assert!(matches!(err, DataLoadError::MissingColumn(ref c) if c == "gender"));
}
