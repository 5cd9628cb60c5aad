use serde_json::Value;

pub fn short_json(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_string()),
    }
}

pub fn fmt_bytes(value: Option<u64>) -> String {
    let Some(bytes) = value else {
        return "-".to_string();
    };
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

/// Numbers and numeric strings both count; the API is not consistent.
pub fn get_u64(row: &Value, key: &str) -> Option<u64> {
    row.get(key).and_then(|v| match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse::<u64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{fmt_bytes, get_u64, short_json};

    #[test]
    fn formats_sizes() {
        assert_eq!(fmt_bytes(None), "-");
        assert_eq!(fmt_bytes(Some(512)), "512 B");
        assert_eq!(fmt_bytes(Some(20_480)), "20.0 KB");
        assert_eq!(fmt_bytes(Some(5 * 1024 * 1024)), "5.0 MB");
    }

    #[test]
    fn reads_numeric_strings() {
        let row = json!({"file_size": "2048", "height": 600, "title": "x"});
        assert_eq!(get_u64(&row, "file_size"), Some(2048));
        assert_eq!(get_u64(&row, "height"), Some(600));
        assert_eq!(get_u64(&row, "title"), None);
    }

    #[test]
    fn nested_values_render_as_json() {
        assert_eq!(short_json(&json!(null)), "-");
        assert_eq!(short_json(&json!({"w": 1})), r#"{"w":1}"#);
    }
}
