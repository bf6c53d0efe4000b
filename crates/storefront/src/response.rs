//! The `{success, data|error}` response envelope.
//!
//! Every API route wraps its payload in the same envelope so clients can
//! branch on `success` before touching the body.

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

/// Wrap a payload in the success envelope.
pub fn success<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

/// Build the error envelope body.
///
/// `fields` carries field-level validation detail when present.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let Json(body) = success(json!({"id": 1}));
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["id"], json!(1));
    }

    #[test]
    fn error_envelope_carries_optional_fields() {
        let body = error_body("validation", "invalid input", Some(json!({"email": "bad"})));
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"]["code"], json!("validation"));
        assert_eq!(body["error"]["fields"]["email"], json!("bad"));

        let bare = error_body("not_found", "missing", None);
        assert!(bare["error"].get("fields").is_none());
    }
}
