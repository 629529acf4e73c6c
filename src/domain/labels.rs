// Axis and tooltip label formatting
use chrono::{DateTime, Datelike, Utc};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "June", "July", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// X tick label such as `"3. Jan"`. Dates are read in UTC; unrepresentable
/// timestamps get an empty label.
pub fn x_tick_label(time_ms: f64) -> String {
    if !time_ms.is_finite() {
        return String::new();
    }
    match DateTime::<Utc>::from_timestamp_millis(time_ms as i64) {
        Some(dt) => format!("{}. {}", dt.day(), MONTH_NAMES[dt.month0() as usize]),
        None => String::new(),
    }
}

pub fn y_tick_label(y: f64, unit: &str) -> String {
    format!("{}{}", y, unit)
}

pub fn tooltip_label(series_name: &str, value: f64, unit: &str) -> String {
    format!("{}: {:.2}{}", series_name, value, unit)
}

/// Secondary percent axis: only the outermost ticks carry a label.
pub fn percent_tick_label(y: f64, index: usize, tick_count: usize) -> Option<String> {
    if index == 0 || index + 1 == tick_count {
        Some(format!("{}%", y / 10.0))
    } else {
        None
    }
}
