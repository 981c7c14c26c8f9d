use serde_json::Value;

/// Render `data` as JSON: two-space indentation when `pretty`, compact otherwise.
pub fn render(data: &Value, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(data)
    } else {
        serde_json::to_string(data)
    }
}
