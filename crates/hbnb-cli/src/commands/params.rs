//! `key=value` attribute parsing for `create`

use serde_json::{Map, Number, Value};

/// Parse command-line attributes into a mapping
///
/// Quoted values are strings with `_` read as a space and `\"` as a quote.
/// Unquoted values are tried as an integer, then a float, then taken as a
/// plain string. Arguments without `=` are skipped.
pub fn parse_params(params: &[String]) -> Map<String, Value> {
    let mut map = Map::new();
    for param in params {
        let Some((key, raw)) = param.split_once('=') else {
            tracing::warn!(param = %param, "ignoring argument without '='");
            continue;
        };
        if key.is_empty() {
            continue;
        }
        map.insert(key.to_string(), parse_value(raw));
    }
    map
}

fn parse_value(raw: &str) -> Value {
    if let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return Value::String(inner.replace('_', " ").replace("\\\"", "\""));
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Some(float) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(float);
    }
    Value::String(raw.replace('_', " "))
}
