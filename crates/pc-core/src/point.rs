//! Point records as exchanged with the backend and as kept in history.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Placeholder shown when the backend sent no usable check time.
pub const MISSING_DATE: &str = "—";

const DISPLAY_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// A checked point as returned by `/api/points/check` and `/api/points/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub result: bool,
    #[serde(default)]
    pub check_time: Option<CheckTime>,
    #[serde(default)]
    pub exec_time: Option<f64>,
}

/// The backend's `checkTime`: either an ISO-8601 local date-time string or a
/// `[year, month, day, hour, minute, second?, nanos?]` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckTime {
    Text(String),
    Parts(Vec<i64>),
}

impl CheckTime {
    /// Interpret the value as a local date-time. Returns `None` for anything
    /// that does not describe a real calendar instant.
    #[must_use]
    pub fn to_local(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Text(text) => parse_text(text),
            Self::Parts(parts) => from_parts(parts),
        }
    }
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed);
    }
    // LocalDateTime#toString drops the seconds when they are zero.
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M") {
        return Some(parsed);
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

fn from_parts(parts: &[i64]) -> Option<NaiveDateTime> {
    let field = |index: usize| -> Option<u32> {
        parts
            .get(index)
            .map_or(Some(0), |value| u32::try_from(*value).ok())
    };

    if parts.len() < 5 {
        return None;
    }
    let year = i32::try_from(parts[0]).ok()?;
    NaiveDate::from_ymd_opt(year, field(1)?, field(2)?)?.and_hms_opt(field(3)?, field(4)?, field(5)?)
}

/// One row of the history table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub result: bool,
    pub check_time: Option<NaiveDateTime>,
    /// Round-trip latency in seconds when measured by this client, otherwise
    /// whatever the backend reported.
    pub exec_time: Option<f64>,
    pub formatted_date: String,
}

impl Point {
    /// Build a history row from a backend record.
    #[must_use]
    pub fn from_record(record: PointRecord) -> Self {
        let check_time = record.check_time.as_ref().and_then(CheckTime::to_local);
        let formatted_date = check_time.map_or_else(
            || MISSING_DATE.to_string(),
            |time| time.format(DISPLAY_FORMAT).to_string(),
        );
        Self {
            x: record.x,
            y: record.y,
            r: record.r,
            result: record.result,
            check_time,
            exec_time: record.exec_time,
            formatted_date,
        }
    }

    /// Replace the execution time with a locally measured latency.
    #[must_use]
    pub const fn with_exec_time(mut self, seconds: f64) -> Self {
        self.exec_time = Some(seconds);
        self
    }
}

impl From<PointRecord> for Point {
    fn from(record: PointRecord) -> Self {
        Self::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(check_time: serde_json::Value) -> PointRecord {
        serde_json::from_value(serde_json::json!({
            "x": 1.0,
            "y": -0.5,
            "r": 2.0,
            "result": false,
            "checkTime": check_time,
        }))
        .expect("record should parse")
    }

    #[test]
    fn parses_iso_text_check_time() {
        let point = Point::from_record(record(serde_json::json!("2025-01-10T12:30:05.123456")));
        assert_eq!(point.formatted_date, "10.01.2025, 12:30:05");
    }

    #[test]
    fn parses_text_without_seconds() {
        let point = Point::from_record(record(serde_json::json!("2025-01-10T12:30")));
        assert_eq!(point.formatted_date, "10.01.2025, 12:30:00");
    }

    #[test]
    fn parses_array_check_time() {
        let point = Point::from_record(record(serde_json::json!([2024, 12, 31, 23, 59, 58, 1000])));
        assert_eq!(point.formatted_date, "31.12.2024, 23:59:58");
    }

    #[test]
    fn array_without_seconds_defaults_to_zero() {
        let point = Point::from_record(record(serde_json::json!([2024, 2, 29, 8, 5])));
        assert_eq!(point.formatted_date, "29.02.2024, 08:05:00");
    }

    #[test]
    fn invalid_calendar_values_yield_placeholder() {
        let point = Point::from_record(record(serde_json::json!([2023, 2, 30, 8, 5])));
        assert!(point.check_time.is_none());
        assert_eq!(point.formatted_date, MISSING_DATE);
    }

    #[test]
    fn missing_check_time_yields_placeholder() {
        let record: PointRecord =
            serde_json::from_str(r#"{"x":0,"y":0,"r":1,"result":true}"#).expect("parse");
        let point = Point::from(record);
        assert_eq!(point.formatted_date, MISSING_DATE);
        assert!(point.exec_time.is_none());
    }

    #[test]
    fn exec_time_is_read_from_camel_case_field() {
        let record: PointRecord =
            serde_json::from_str(r#"{"x":0,"y":0,"r":1,"result":true,"execTime":0.25}"#)
                .expect("parse");
        assert_eq!(record.exec_time, Some(0.25));
    }

    #[test]
    fn measured_latency_replaces_backend_value() {
        let point = Point::from_record(record(serde_json::Value::Null)).with_exec_time(0.042);
        assert_eq!(point.exec_time, Some(0.042));
    }
}
