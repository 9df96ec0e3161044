// Health check.

pub fn handle_ok() -> serde_json::Value {
    serde_json::json!({ "ok": true })
}
