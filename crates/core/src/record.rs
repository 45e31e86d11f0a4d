//! Raw Records
//!
//! A `RawRecord` is one loosely-typed manufacturing event: an open-ended map
//! from field name to JSON value. Every lookup goes through the map by exact
//! string key, so keys such as `wo/lot#` or `total_cycle_time_(days)` need no
//! special treatment.
//!
//! The coercion helpers never fail loudly. A missing, null or unconvertible
//! value is simply `None`, leaving the caller to pick its documented default.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Date-time layouts tried before plain dates.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Plain date layouts seen in plant exports.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y", "%d %b %Y"];

/// Spreadsheet serial day numbers accepted as dates (roughly 1954..2119).
const SERIAL_DAY_RANGE: std::ops::RangeInclusive<f64> = 20_000.0..=80_000.0;

/// One raw manufacturing record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wrap an existing field map
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a record from a JSON value; only objects qualify
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Number of fields on the record
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a field by exact key. JSON `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Iterate fields in document order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field as trimmed, non-empty text. Numbers are stringified.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_to_text)
    }

    /// First field in `keys` that yields text
    pub fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// Field as a finite number; numeric strings are accepted
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(value_to_number)
    }

    /// First field in `keys` that yields a number
    pub fn first_number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().find_map(|key| self.number(key))
    }

    /// Field as a boolean flag. Absent or unrecognised values are `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).map(value_to_flag).unwrap_or(false)
    }

    /// Field as a calendar date
    pub fn date(&self, key: &str) -> Option<NaiveDate> {
        self.get(key).and_then(value_to_date)
    }

    /// First field in `keys` that yields a parseable date
    pub fn first_date(&self, keys: &[&str]) -> Option<NaiveDate> {
        keys.iter().find_map(|key| self.date(key))
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Render a scalar JSON value as trimmed text.
///
/// Strings are trimmed. Integers and whole-valued floats print without a
/// fractional part (`42.0` is `"42"`), other numbers use their JSON
/// spelling. Booleans, null, arrays and objects yield `None`.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(number_to_text(n)),
        _ => None,
    }
}

fn number_to_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Read a JSON value as a finite number.
pub fn value_to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Read a JSON value as a boolean flag.
pub fn value_to_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    }
}

/// Read a JSON value as a calendar date.
pub fn value_to_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n.as_f64().and_then(serial_to_date),
        _ => None,
    }
}

/// Parse the date formats found in plant exports into a calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    text.parse::<f64>().ok().and_then(serial_to_date)
}

/// Convert a spreadsheet serial day number (1900 date system) to a date.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !SERIAL_DAY_RANGE.contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.floor() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        RawRecord::from_value(value).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_value_requires_object() {
        assert!(RawRecord::from_value(json!([1, 2])).is_none());
        assert!(RawRecord::from_value(json!("NAR0001")).is_none());
        assert!(RawRecord::from_value(json!({})).is_some());
    }

    #[test]
    fn test_keys_with_special_characters() {
        let rec = record(json!({"wo/lot#": " NAR0007 ", "total_cycle_time_(days)": "18"}));
        assert_eq!(rec.text("wo/lot#"), Some("NAR0007".to_string()));
        assert_eq!(rec.number("total_cycle_time_(days)"), Some(18.0));
    }

    #[test]
    fn test_text_coercion() {
        let rec = record(json!({"a": "", "b": 42, "c": true, "d": null, "e": [1]}));
        assert_eq!(rec.text("a"), None);
        assert_eq!(rec.text("b"), Some("42".to_string()));
        assert_eq!(rec.text("c"), None);
        assert_eq!(rec.text("d"), None);
        assert_eq!(rec.text("e"), None);
        assert_eq!(rec.first_text(&["a", "missing", "b"]), Some("42".to_string()));
    }

    #[test]
    fn test_whole_floats_print_as_integers() {
        let rec = record(json!({"a": 42.0, "b": 1.5e3, "c": 2.4, "d": -7.0, "e": 99}));
        assert_eq!(rec.text("a").as_deref(), Some("42"));
        assert_eq!(rec.text("b").as_deref(), Some("1500"));
        assert_eq!(rec.text("c").as_deref(), Some("2.4"));
        assert_eq!(rec.text("d").as_deref(), Some("-7"));
        assert_eq!(rec.text("e").as_deref(), Some("99"));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let rec = record(json!({"release": null}));
        assert!(rec.get("release").is_none());
    }

    #[test]
    fn test_number_coercion() {
        let rec = record(json!({"n": 2.5, "s": " 7 ", "bad": "seven"}));
        assert_eq!(rec.number("n"), Some(2.5));
        assert_eq!(rec.number("s"), Some(7.0));
        assert_eq!(rec.number("bad"), None);
        assert_eq!(rec.first_number(&["bad", "s"]), Some(7.0));
    }

    #[test]
    fn test_flag_coercion() {
        let rec = record(json!({
            "t": true, "f": false, "yes": "Yes", "one": 1, "zero": 0, "junk": "maybe"
        }));
        assert!(rec.flag("t"));
        assert!(!rec.flag("f"));
        assert!(rec.flag("yes"));
        assert!(rec.flag("one"));
        assert!(!rec.flag("zero"));
        assert!(!rec.flag("junk"));
        assert!(!rec.flag("missing"));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-03-05"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("2024-03-05T14:30:00Z"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("2024-03-05T14:30:00.000"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("2024-03-05 08:00:00"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("2024/03/05"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("03/05/2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("05-Mar-2024"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("   "), None);
    }

    #[test]
    fn test_serial_dates() {
        // 45356 is 2024-03-05 in the 1900 date system
        assert_eq!(serial_to_date(45356.0), Some(ymd(2024, 3, 5)));
        assert_eq!(serial_to_date(12.0), None);
        let rec = record(json!({"release": 45356, "tiny": 3}));
        assert_eq!(rec.date("release"), Some(ymd(2024, 3, 5)));
        assert_eq!(rec.date("tiny"), None);
    }

    #[test]
    fn test_serde_transparent() {
        let rec: RawRecord = serde_json::from_str(r#"{"fg_batch":"NAR0001"}"#).unwrap();
        assert_eq!(rec.len(), 1);
        assert_eq!(serde_json::to_string(&rec).unwrap(), r#"{"fg_batch":"NAR0001"}"#);
    }
}
