//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting for KPI cards and chart data labels.
//! CONTEXT: Labels are formatted here so that every consumer of a chart
//! description shows the same text ("$1,234", "4.12", "1,024").

use serde::{Deserialize, Serialize};

/// How a numeric value should be turned into display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueFormat {
    /// Shortest faithful representation ("3", "3.1").
    General,
    /// Fixed decimals with thousands separators.
    Number { decimal_places: u8 },
    /// US dollars with thousands separators.
    Currency { decimal_places: u8 },
}

impl ValueFormat {
    pub fn count() -> ValueFormat {
        ValueFormat::Number { decimal_places: 0 }
    }

    pub fn dollars() -> ValueFormat {
        ValueFormat::Currency { decimal_places: 0 }
    }

    pub fn cents() -> ValueFormat {
        ValueFormat::Currency { decimal_places: 2 }
    }
}

/// Format a number according to the specified format.
pub fn format_value(value: f64, format: ValueFormat) -> String {
    match format {
        ValueFormat::General => format_general(value),
        ValueFormat::Number { decimal_places } => format_decimal(value, decimal_places, true),
        ValueFormat::Currency { decimal_places } => format_currency(value, decimal_places),
    }
}

/// Format a number in general format: integers without a decimal point,
/// everything else with trailing zeros trimmed.
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }

    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a number with specified decimal places and optional thousands separator.
fn format_decimal(value: f64, decimal_places: u8, use_thousands_separator: bool) -> String {
    let rounded = format!("{:.prec$}", value, prec = decimal_places as usize);

    if use_thousands_separator {
        add_thousands_separator(&rounded)
    } else {
        rounded
    }
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: Vec<char> = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::with_capacity(s.len() + digits.len() / 3 + 1);
    if negative {
        result.push('-');
    }

    let len = digits.len();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

/// Format a number as US dollars. Negative amounts are wrapped in parentheses.
fn format_currency(value: f64, decimal_places: u8) -> String {
    let formatted = format_decimal(value.abs(), decimal_places, true);

    if value < 0.0 {
        format!("(${})", formatted)
    } else {
        format!("${}", formatted)
    }
}
