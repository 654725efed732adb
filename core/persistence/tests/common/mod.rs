//! FILENAME: tests/common/mod.rs
//! Fixtures for dataset loading tests.

use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "customer_id,age,gender,item_purchased,category,purchase_amount,location,size,color,season,review_rating,subscription_status,shipping_type,discount_applied,previous_purchases,payment_method,frequency_of_purchases,age_group,purchase_frequency_days";

/// A few rows in the shape of the production dataset.
pub const ROWS: [&str; 4] = [
    "1,55,Male,Blouse,Clothing,53,Kentucky,L,Gray,Winter,3.1,Yes,Express,Yes,14,Venmo,Fortnightly,Middle-aged,14",
    "2,19,Male,Sweater,Clothing,64,Maine,L,Maroon,Winter,3.1,Yes,Express,Yes,2,Cash,Fortnightly,Young Adult,14",
    "3,50,Male,Jeans,Clothing,73,Massachusetts,S,Maroon,Spring,3.1,Yes,Free Shipping,Yes,23,Credit Card,Weekly,Middle-aged,7",
    "3,21,Female,Sandals,Footwear,90,Rhode Island,M,Maroon,Spring,3.5,No,Next Day Air,No,49,PayPal,Weekly,Young Adult,7",
];

/// Writes a CSV file with the given header and rows to a temp file.
pub fn write_csv(header: &str, rows: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .unwrap();
    writeln!(file, "{}", header).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}

/// Writes the standard fixture as CSV.
pub fn sample_csv() -> NamedTempFile {
    write_csv(HEADER, &ROWS)
}
