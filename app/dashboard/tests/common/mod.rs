//! FILENAME: tests/common/mod.rs
//! Fixtures for dashboard shell tests.

use clap::Parser;
use dashboard_lib::config::Cli;
use std::io::Write;
use tempfile::NamedTempFile;

const CSV: &str = "\
Customer ID,Age,Gender,Item Purchased,Category,Purchase Amount,Location,Size,Color,Season,Review Rating,Subscription Status,Shipping Type,Discount Applied,Previous Purchases,Payment Method,Frequency of Purchases,Age Group,Purchase Frequency Days
1,55,Male,Blouse,Clothing,53,Kentucky,L,Gray,Winter,3.1,Yes,Express,Yes,14,Venmo,Fortnightly,Middle-aged,14
2,19,Male,Sweater,Clothing,64,Maine,L,Maroon,Winter,3.1,Yes,Express,Yes,2,Cash,Fortnightly,Young Adult,14
3,50,Male,Jeans,Clothing,73,Massachusetts,S,Maroon,Spring,3.1,Yes,Free Shipping,Yes,23,Credit Card,Weekly,Middle-aged,7
4,21,Female,Sandals,Footwear,90,Rhode Island,M,Maroon,Spring,3.5,No,Next Day Air,No,49,PayPal,Weekly,Young Adult,7
4,45,Female,Handbag,Accessories,20,Oregon,M,Pink,Summer,4.5,No,Standard,No,31,PayPal,Annually,Adult,365
";

/// The fixture dataset written to a temp `.csv` file.
pub fn sample_csv() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(CSV.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Parses `args` as if given after `dashboard --data <file>`.
pub fn cli_for(file: &NamedTempFile, args: &[&str]) -> Cli {
    let data = file.path().to_string_lossy().to_string();
    let mut argv = vec!["dashboard".to_string(), "--data".to_string(), data];
    argv.extend(args.iter().map(|a| a.to_string()));
    Cli::try_parse_from(argv).unwrap()
}
