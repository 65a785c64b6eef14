use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Prioritized field resolution for schema-less backend records.
///
/// The same logical field shows up under different names across deployments
/// (an issue date may be `date_issued` or `date_created`, a customer amount
/// `total_amount` or `amount`). Each record model declares its candidate
/// keys once, in priority order, instead of scattering inline fallbacks.
pub(crate) struct FieldResolver {
    candidates: &'static [&'static str],
}

impl FieldResolver {
    pub(crate) const fn new(candidates: &'static [&'static str]) -> Self {
        Self { candidates }
    }

    /// First candidate present with a non-null value.
    pub(crate) fn raw<'v>(&self, record: &'v Value) -> Option<&'v Value> {
        self.candidates
            .iter()
            .filter_map(|key| record.get(key))
            .find(|v| !v.is_null())
    }

    pub(crate) fn string(&self, record: &Value) -> Option<String> {
        match self.raw(record)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Numeric value, accepting numeric strings. Anything else is `None`;
    /// amount-like callers default that to 0 rather than failing.
    pub(crate) fn number(&self, record: &Value) -> Option<f64> {
        match self.raw(record)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub(crate) fn amount(&self, record: &Value) -> f64 {
        self.number(record).unwrap_or(0.0)
    }

    pub(crate) fn datetime(&self, record: &Value) -> Option<NaiveDateTime> {
        match self.raw(record)? {
            Value::String(s) => parse_datetime(s),
            _ => None,
        }
    }
}

/// Accepts RFC 3339 timestamps (with or without offset) and bare ISO dates.
pub(crate) fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
