use lambda_http::Request;
use serde_json::{json, Value};

/// How deep a caller may nest the real fields under `data`.
const MAX_CALLABLE_WRAPPING: usize = 2;

/// Extracts the JSON body from a request.
pub fn extract_body(event: &Request) -> Value {
    serde_json::from_slice(event.body().as_ref()).unwrap_or_else(|_| json!({}))
}

/// Recovers the canonical callable payload. Callable clients wrap the arguments as
/// `{ "data": {...} }` and some SDK versions wrap them twice.
pub fn unwrap_callable_payload(payload: &Value) -> &Value {
    let mut current = payload;
    for _ in 0..MAX_CALLABLE_WRAPPING {
        match current.get("data") {
            Some(inner) if inner.is_object() => current = inner,
            _ => break,
        }
    }
    current
}
