use serde::Serialize;
use serde_json::Value;

const REDACTED: &str = "<redacted>";
const SECRET_FIELDS: [&str; 3] = ["password", "access_token", "token"];

/// Pretty-print `value` for a debug log line, masking credential fields.
/// Does nothing unless DEBUG is enabled.
pub(crate) fn with_redacted_json_debug<T, F>(value: &T, log_action: F)
where
    T: Serialize + ?Sized,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let pretty_json = serde_json::to_value(value)
        .map(|mut v| {
            redact(&mut v);
            v
        })
        .and_then(|v| serde_json::to_string_pretty(&v))
        .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
    log_action(pretty_json.as_str());
}

fn redact(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if SECRET_FIELDS.contains(&key.as_str()) {
                    *field = Value::String(REDACTED.to_string());
                } else {
                    redact(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact),
        _ => {}
    }
}
