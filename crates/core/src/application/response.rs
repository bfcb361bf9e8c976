// Response Classification
// Success/failure rules shared by every AskOmics call

use crate::domain::api::ERROR_FIELD;
use crate::error::CallError;
use crate::port::{Cookie, HttpResponse};
use serde_json::Value;

/// Successful reply, body already decoded
#[derive(Debug, Clone)]
pub struct ServerReply {
    pub status: u16,
    pub body: String,
    pub json: Value,
    pub cookies: Vec<Cookie>,
}

/// Classify a raw response
///
/// 1. non-2xx status: `Status` with the raw body
/// 2. body not JSON: `InvalidBody`
/// 3. truthy `error` field: `Server` with its value
/// 4. anything else succeeds
pub fn classify(response: HttpResponse) -> Result<ServerReply, CallError> {
    if !response.is_success() {
        return Err(CallError::Status {
            status: response.status,
            body: response.body,
        });
    }

    let json: Value = serde_json::from_str(&response.body).map_err(CallError::InvalidBody)?;

    if let Some(message) = json.get(ERROR_FIELD).and_then(error_message) {
        return Err(CallError::Server(message));
    }

    Ok(ServerReply {
        status: response.status,
        body: response.body,
        json,
        cookies: response.cookies,
    })
}

/// Message carried by an `error` field, `None` when the field is falsy
fn error_message(value: &Value) -> Option<String> {
    let truthy = match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    };
    if !truthy {
        return None;
    }

    match value {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok(body: Value) -> HttpResponse {
        HttpResponse::new(200, body.to_string())
    }

    #[test]
    fn test_success_keeps_raw_body() {
        let reply = classify(ok(json!({"files": ["a.tsv"]}))).unwrap();
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, r#"{"files":["a.tsv"]}"#);
        assert_eq!(reply.json["files"][0], "a.tsv");
    }

    #[test]
    fn test_non_success_status_embeds_body() {
        let err = classify(HttpResponse::new(500, "Internal Server Error")).unwrap_err();
        match err {
            CallError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_field_on_success_status() {
        let err = classify(ok(json!({"error": "bad key"}))).unwrap_err();
        assert!(matches!(err, CallError::Server(ref m) if m == "bad key"));
    }

    #[test]
    fn test_non_string_error_rendered_as_json() {
        let err = classify(ok(json!({"error": ["file missing", "no header"]}))).unwrap_err();
        assert!(matches!(err, CallError::Server(ref m) if m == r#"["file missing","no header"]"#));

        let err = classify(ok(json!({"error": true}))).unwrap_err();
        assert!(matches!(err, CallError::Server(ref m) if m == "true"));
    }

    #[test]
    fn test_falsy_error_field_is_success() {
        for falsy in [json!(null), json!(false), json!(""), json!([]), json!({}), json!(0)] {
            let reply = classify(ok(json!({"error": falsy.clone(), "status": "ok"})));
            assert!(reply.is_ok(), "error field {falsy} should not fail");
        }
    }

    #[test]
    fn test_unparseable_body() {
        let err = classify(HttpResponse::new(200, "<html>oops</html>")).unwrap_err();
        assert!(matches!(err, CallError::InvalidBody(_)));
    }

    #[test]
    fn test_non_json_error_page_reports_status() {
        let err = classify(HttpResponse::new(401, "<html>Unauthorized</html>")).unwrap_err();
        assert!(matches!(err, CallError::Status { status: 401, .. }));
    }

    #[test]
    fn test_cookies_carried_through() {
        let response = ok(json!({})).with_cookie("session", "abc");
        let reply = classify(response).unwrap();
        assert_eq!(reply.cookies, vec![Cookie::new("session", "abc")]);
    }
}
