// Chart data preparation - filter, parse, extrema, tick sampling, normalization
use crate::domain::chart::SeriesExtrema;
use crate::domain::error::PipelineError;
use crate::domain::record::{PreparedRecord, RawRecord, RawValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

pub const DEFAULT_TICK_STRIDE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Malformed values and dates become `NaN`. Of the textual
    /// non-finite forms only `Infinity`/`-Infinity` parse; `inf`, `nan`
    /// and friends are malformed.
    #[default]
    Permissive,
    /// Malformed values and dates are reported as `PipelineError`, and so
    /// are `Infinity` values.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Drops null, empty strings, numeric zero and numeric NaN.
    #[default]
    Truthy,
    /// Like `Truthy` but keeps numeric zero readings.
    KeepZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    None,
    /// `(v - min) / (max - min)`
    #[default]
    MinMax,
    /// `v / max`
    MaxRatio,
}

fn is_truthy(value: &RawValue, filter: FilterMode) -> bool {
    match value {
        RawValue::Text(s) => !s.is_empty(),
        RawValue::Number(n) if n.is_nan() => false,
        RawValue::Number(n) if *n == 0.0 => filter == FilterMode::KeepZero,
        RawValue::Number(_) => true,
    }
}

/// Numeric text in the JavaScript `Number()` sense: decimal and exponent
/// forms plus `Infinity`. Rust's own `inf`/`nan` spellings are rejected.
fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    text.parse::<f64>().ok()
}

fn parse_value(index: usize, value: &RawValue, mode: ParseMode) -> Result<f64, PipelineError> {
    let parsed = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => match parse_number(s) {
            Some(n) => n,
            None if mode == ParseMode::Strict => {
                return Err(PipelineError::InvalidValue {
                    index,
                    raw: s.clone(),
                });
            }
            None => f64::NAN,
        },
    };

    if mode == ParseMode::Strict && !parsed.is_finite() {
        return Err(PipelineError::NonFiniteValue {
            index,
            value: parsed,
        });
    }
    Ok(parsed)
}

/// Parse a date string to epoch milliseconds. Naive forms are read as UTC.
pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Drop records without a truthy value and parse the rest.
///
/// Indices in reported errors refer to positions in `records`.
pub fn prepare_records(
    records: &[RawRecord],
    filter: FilterMode,
    mode: ParseMode,
) -> Result<Vec<PreparedRecord>, PipelineError> {
    let mut prepared = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let Some(raw_value) = record.value.as_ref().filter(|v| is_truthy(v, filter)) else {
            continue;
        };

        let value = parse_value(index, raw_value, mode)?;
        let time_ms = match parse_timestamp_ms(&record.date_time) {
            Some(ms) => ms as f64,
            None if mode == ParseMode::Strict => {
                return Err(PipelineError::InvalidDateTime {
                    index,
                    raw: record.date_time.clone(),
                });
            }
            None => {
                tracing::debug!("record {} has an unparseable date {:?}", index, record.date_time);
                f64::NAN
            }
        };

        prepared.push(PreparedRecord::new(time_ms, value));
    }

    tracing::debug!("prepared {} of {} records", prepared.len(), records.len());
    Ok(prepared)
}

/// Minimum and maximum of the finite values, `None` if there are none.
pub fn compute_extrema(records: &[PreparedRecord]) -> Option<SeriesExtrema> {
    extrema_of(records.iter().map(|r| r.value))
}

pub fn extrema_of(values: impl IntoIterator<Item = f64>) -> Option<SeriesExtrema> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<SeriesExtrema>, v| match acc {
            None => Some(SeriesExtrema::new(v, v)),
            Some(e) => Some(SeriesExtrema::new(e.min.min(v), e.max.max(v))),
        })
}

/// Timestamps of the records at indices `0, stride, 2 * stride, ...`.
pub fn sample_ticks(records: &[PreparedRecord], stride: usize) -> Vec<f64> {
    records
        .iter()
        .step_by(stride.max(1))
        .map(|r| r.time_ms)
        .collect()
}

/// Map a value into display space. A zero denominator maps to 0.5.
pub fn normalize_value(value: f64, extrema: SeriesExtrema, mode: NormalizationMode) -> f64 {
    match mode {
        NormalizationMode::None => value,
        NormalizationMode::MinMax => {
            let range = extrema.max - extrema.min;
            if range == 0.0 {
                0.5
            } else if range.is_infinite() {
                // max - min overflowed; halve both sides first
                (value / 2.0 - extrema.min / 2.0) / (extrema.max / 2.0 - extrema.min / 2.0)
            } else {
                (value - extrema.min) / range
            }
        }
        NormalizationMode::MaxRatio => {
            if extrema.max == 0.0 {
                0.5
            } else {
                value / extrema.max
            }
        }
    }
}

pub fn normalize_series(
    records: &[PreparedRecord],
    extrema: Option<SeriesExtrema>,
    mode: NormalizationMode,
) -> Vec<f64> {
    match extrema {
        Some(extrema) => records
            .iter()
            .map(|r| normalize_value(r.value, extrema, mode))
            .collect(),
        None if mode == NormalizationMode::None => records.iter().map(|r| r.value).collect(),
        None => vec![f64::NAN; records.len()],
    }
}
