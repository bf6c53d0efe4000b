//! The `{success, data|error}` response envelope, admin flavor.

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

/// Wrap a payload in the success envelope.
pub fn success<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

/// Build the error envelope body.
#[must_use]
pub fn error_body(code: &str, message: &str, fields: Option<Value>) -> Value {
    let mut error = json!({ "code": code, "message": message });
    if let Some(fields) = fields
        && let Some(obj) = error.as_object_mut()
    {
        obj.insert("fields".to_string(), fields);
    }
    json!({ "success": false, "error": error })
}
