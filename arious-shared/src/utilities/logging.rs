use serde_json::{json, Value};
use log::{info, error};

const SERVICE: &str = "arious-push";

/// Logs an informational event to CloudWatch in JSON format.
pub fn log_info(event: &str, message: &str) {
    info!("{}", json!({
        "service": SERVICE,
        "event": event,
        "message": message
    }));
}

/// Logs an error event to CloudWatch in JSON format.
pub fn log_error(event: &str, error_message: &str) {
    error!("{}", json!({
        "service": SERVICE,
        "event": event,
        "error": error_message
    }));
}

/// Logs an event with structured fields, e.g. per-request dispatch counts.
pub fn log_event(event: &str, fields: Value) {
    info!("{}", json!({
        "service": SERVICE,
        "event": event,
        "fields": fields
    }));
}
