//! Typed inference of setting values typed as text

use serde_json::{Number, Value};
use std::fmt;

/// A setting value inferred from raw text
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<SettingValue> for Value {
    fn from(value: SettingValue) -> Self {
        match value {
            SettingValue::Bool(b) => Value::Bool(b),
            SettingValue::Int(i) => Value::Number(i.into()),
            SettingValue::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            SettingValue::Text(s) => Value::String(s),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::Int(i) => write!(f, "{i}"),
            SettingValue::Float(x) => write!(f, "{x}"),
            SettingValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}

type Parser = fn(&str) -> Option<SettingValue>;

/// Tried in order; the first match wins
const PARSERS: [Parser; 3] = [parse_bool, parse_int, parse_float];

/// Infer the type of `raw`: boolean, then integer, then float, then text
///
/// # Example
/// ```rust
/// use vscode_sync::{SettingValue, infer_setting_value};
///
/// assert_eq!(infer_setting_value("TRUE"), SettingValue::Bool(true));
/// assert_eq!(infer_setting_value("14"), SettingValue::Int(14));
/// assert_eq!(infer_setting_value("1.5"), SettingValue::Float(1.5));
/// assert_eq!(infer_setting_value("black"), SettingValue::Text("black".into()));
/// ```
pub fn infer_setting_value(raw: &str) -> SettingValue {
    PARSERS
        .iter()
        .find_map(|parse| parse(raw))
        .unwrap_or_else(|| SettingValue::Text(raw.to_string()))
}

fn parse_bool(raw: &str) -> Option<SettingValue> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(SettingValue::Bool(true))
    } else if raw.eq_ignore_ascii_case("false") {
        Some(SettingValue::Bool(false))
    } else {
        None
    }
}

fn parse_int(raw: &str) -> Option<SettingValue> {
    raw.trim().parse::<i64>().ok().map(SettingValue::Int)
}

// Non-finite values have no JSON form and stay text.
fn parse_float(raw: &str) -> Option<SettingValue> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(SettingValue::Float)
}
