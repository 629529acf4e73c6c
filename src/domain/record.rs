// Sensor record domain models
use serde::Deserialize;

/// Raw value as it appears in a fixture: a string, a number or nothing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(f64),
}

/// One sample from a sensor channel, exactly as supplied by the loader.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(default)]
    pub value: Option<RawValue>,
}

impl RawRecord {
    pub fn new(date_time: impl Into<String>, value: Option<RawValue>) -> Self {
        Self {
            date_time: date_time.into(),
            value,
        }
    }

    pub fn text(date_time: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(date_time, Some(RawValue::Text(value.into())))
    }

    pub fn number(date_time: impl Into<String>, value: f64) -> Self {
        Self::new(date_time, Some(RawValue::Number(value)))
    }

    pub fn empty(date_time: impl Into<String>) -> Self {
        Self::new(date_time, None)
    }
}

/// A parsed sample. `time_ms` and `value` are `NaN` when permissive
/// parsing met malformed input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreparedRecord {
    pub time_ms: f64,
    pub value: f64,
}

impl PreparedRecord {
    pub fn new(time_ms: f64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mixed_values() {
        let json = r#"[
            {"dateTime": "2021-01-01", "value": "32"},
            {"dateTime": "2021-01-02", "value": null},
            {"dateTime": "2021-01-03", "value": 40.5},
            {"dateTime": "2021-01-04"}
        ]"#;
        let records: Vec<RawRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0], RawRecord::text("2021-01-01", "32"));
        assert_eq!(records[1], RawRecord::empty("2021-01-02"));
        assert_eq!(records[2], RawRecord::number("2021-01-03", 40.5));
        assert_eq!(records[3].value, None);
    }
}
