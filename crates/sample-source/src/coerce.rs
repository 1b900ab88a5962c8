//! Record Value Coercion

use serde_json::Value;

/// Interpret a raw record value as a sample.
///
/// Numbers and numeric strings are accepted; anything else, or a value that
/// is not finite, is absent.
pub fn coerce_sample(value: &Value) -> Option<f64> {
    let sample = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    sample.is_finite().then_some(sample)
}

/// Extract the `value` field of each record, keeping only usable samples.
///
/// Input order is preserved.
pub fn coerce_records(records: &[Value]) -> Vec<f64> {
    records
        .iter()
        .filter_map(|record| record.get("value"))
        .filter_map(coerce_sample)
        .collect()
}
