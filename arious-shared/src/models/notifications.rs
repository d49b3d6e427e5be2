use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::models::errors::ValidationError;
use crate::utilities::requests::unwrap_callable_payload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Message,
    Call,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Message => "message",
            NotificationType::Call => "call",
        }
    }

    /// Body shown when the caller sends an empty one.
    pub fn default_body(&self) -> &'static str {
        match self {
            NotificationType::Message => "New message",
            NotificationType::Call => "Incoming call",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated push request. Only constructed through [`NotificationRequest::from_callable`]
/// or [`NotificationRequest::validate`], so the per-type field requirements always hold.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub notification_type: NotificationType,
    pub title: String,
    pub body: String,
    pub to_user_id: Option<String>,
    pub chat_id: Option<String>,
    pub message_id: Option<String>,
    pub device_token: Option<String>,
    pub call: Option<Value>,
    pub sender_id: Option<String>,
}

/// Wire form of the request before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNotificationRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub to_user_id: Option<String>,
    pub chat_id: Option<String>,
    pub message_id: Option<String>,
    pub device_token: Option<String>,
    pub call: Option<Value>,
    pub sender_id: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Drops call values a JS client would treat as absent: null, false, 0 and "".
fn truthy(value: Option<Value>) -> Option<Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

impl NotificationRequest {
    /// Canonicalizes a possibly wrapped callable payload and validates it.
    pub fn from_callable(payload: &Value) -> Result<Self, ValidationError> {
        let canonical = unwrap_callable_payload(payload);
        if !canonical.is_object() {
            return Err(ValidationError::MissingCoreFields);
        }

        let raw: RawNotificationRequest = serde_json::from_value(canonical.clone())
            .map_err(|e| ValidationError::Malformed(e.to_string()))?;

        Self::validate(raw)
    }

    pub fn validate(raw: RawNotificationRequest) -> Result<Self, ValidationError> {
        // body may be empty; the composer substitutes a per-type default
        let (Some(kind), Some(title), Some(body)) = (present(raw.kind), present(raw.title), raw.body) else {
            return Err(ValidationError::MissingCoreFields);
        };

        let notification_type = match kind.as_str() {
            "message" => NotificationType::Message,
            "call" => NotificationType::Call,
            other => return Err(ValidationError::UnsupportedType(other.to_string())),
        };

        let request = NotificationRequest {
            notification_type,
            title,
            body,
            to_user_id: present(raw.to_user_id),
            chat_id: present(raw.chat_id),
            message_id: present(raw.message_id),
            device_token: present(raw.device_token),
            call: truthy(raw.call),
            sender_id: present(raw.sender_id),
        };

        match request.notification_type {
            NotificationType::Message
                if request.device_token.is_none()
                    && (request.to_user_id.is_none() || request.chat_id.is_none() || request.message_id.is_none()) =>
            {
                Err(ValidationError::MissingMessageFields)
            }
            NotificationType::Call if request.device_token.is_none() || request.call.is_none() => {
                Err(ValidationError::MissingCallFields)
            }
            _ => Ok(request),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleNotification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidConfig {
    pub priority: String,
    pub notification: AndroidNotification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidNotification {
    pub channel_id: String,
    pub sound: String,
    pub notification_priority: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnsHeaders {
    #[serde(rename = "apns-priority")]
    pub priority: String,
    #[serde(rename = "apns-push-type")]
    pub push_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<VisibleNotification>,
    pub sound: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<u32>,
    #[serde(rename = "content-available", skip_serializing_if = "Option::is_none")]
    pub content_available: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnsConfig {
    pub headers: ApnsHeaders,
    pub payload: ApnsPayload,
}

/// Notification, data and per-platform blocks shared by every token of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<VisibleNotification>,
    pub data: BTreeMap<String, String>,
    pub android: AndroidConfig,
    pub apns: ApnsConfig,
}

/// One delivery attempt: the shared payload addressed to a single device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenScopedMessage {
    pub token: String,
    #[serde(flatten)]
    pub payload: Arc<PlatformPayload>,
}

impl TokenScopedMessage {
    pub fn new(token: impl Into<String>, payload: Arc<PlatformPayload>) -> Self {
        Self {
            token: token.into(),
            payload,
        }
    }

    /// Token prefix safe to write to logs.
    pub fn token_prefix(&self) -> &str {
        token_prefix(&self.token)
    }
}

pub fn token_prefix(token: &str) -> &str {
    match token.char_indices().nth(20) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServiceAccountKey {
    pub private_key: String,
    pub client_email: String,
    pub token_uri: String,
}

#[derive(Serialize)]
pub struct FirebaseClaims<'a> {
    pub iss: &'a str,
    pub scope: &'a str,
    pub aud: &'a str,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_with_recipient_fields_is_valid() {
        let request = NotificationRequest::from_callable(&json!({
            "type": "message",
            "title": "Ana",
            "body": "hola",
            "toUserId": "u2",
            "chatId": "c1",
            "messageId": "m1",
            "senderId": "u1"
        }))
        .unwrap();

        assert_eq!(request.notification_type, NotificationType::Message);
        assert_eq!(request.to_user_id.as_deref(), Some("u2"));
        assert_eq!(request.sender_id.as_deref(), Some("u1"));
        assert!(request.device_token.is_none());
    }

    #[test]
    fn test_missing_core_fields_rejected() {
        let err = NotificationRequest::from_callable(&json!({ "type": "message", "title": "Ana" })).unwrap_err();
        assert_eq!(err, ValidationError::MissingCoreFields);
        assert_eq!(err.to_string(), "Missing required fields: type, title, body");

        let err = NotificationRequest::from_callable(&Value::Null).unwrap_err();
        assert_eq!(err, ValidationError::MissingCoreFields);
    }

    #[test]
    fn test_message_missing_any_recipient_field_rejected() {
        for missing in ["toUserId", "chatId", "messageId"] {
            let mut payload = json!({
                "type": "message",
                "title": "Ana",
                "body": "hola",
                "toUserId": "u2",
                "chatId": "c1",
                "messageId": "m1"
            });
            payload.as_object_mut().unwrap().remove(missing);

            let err = NotificationRequest::from_callable(&payload).unwrap_err();
            assert_eq!(err, ValidationError::MissingMessageFields, "missing {}", missing);
        }
    }

    #[test]
    fn test_message_with_device_token_skips_recipient_checks() {
        let request = NotificationRequest::from_callable(&json!({
            "type": "message",
            "title": "Ana",
            "body": "hola",
            "deviceToken": "T1"
        }))
        .unwrap();

        assert_eq!(request.device_token.as_deref(), Some("T1"));
    }

    #[test]
    fn test_call_requires_token_and_call_object() {
        let err = NotificationRequest::from_callable(&json!({
            "type": "call",
            "title": "Incoming",
            "body": "",
            "deviceToken": "T1"
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingCallFields);

        let err = NotificationRequest::from_callable(&json!({
            "type": "call",
            "title": "Incoming",
            "body": "",
            "call": { "id": "c1" }
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingCallFields);
    }

    #[test]
    fn test_falsy_call_value_is_missing() {
        for call in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            let err = NotificationRequest::from_callable(&json!({
                "type": "call",
                "title": "Incoming",
                "body": "",
                "deviceToken": "T1",
                "call": call
            }))
            .unwrap_err();
            assert_eq!(err, ValidationError::MissingCallFields, "call = {}", call);
        }

        let request = NotificationRequest::from_callable(&json!({
            "type": "call",
            "title": "Incoming",
            "body": "",
            "deviceToken": "T1",
            "call": "c1"
        }))
        .unwrap();
        assert_eq!(request.call, Some(json!("c1")));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = NotificationRequest::from_callable(&json!({
            "type": "alert",
            "title": "x",
            "body": "y",
            "deviceToken": "T1"
        }))
        .unwrap_err();

        assert_eq!(err, ValidationError::UnsupportedType("alert".into()));
    }

    #[test]
    fn test_double_wrapped_payload_is_canonicalized() {
        let request = NotificationRequest::from_callable(&json!({
            "data": { "data": {
                "type": "call",
                "title": "Incoming",
                "body": "",
                "deviceToken": "T1",
                "call": { "id": "c1" }
            }}
        }))
        .unwrap();

        assert_eq!(request.notification_type, NotificationType::Call);
        assert_eq!(request.call, Some(json!({ "id": "c1" })));
    }

    #[test]
    fn test_token_prefix_truncates_long_tokens() {
        assert_eq!(token_prefix("short"), "short");
        assert_eq!(token_prefix("abcdefghijklmnopqrstuvwxyz"), "abcdefghijklmnopqrst");
    }

    #[test]
    fn test_token_scoped_message_flattens_payload() {
        let payload = PlatformPayload {
            notification: None,
            data: BTreeMap::from([("type".to_string(), "message".to_string())]),
            android: AndroidConfig {
                priority: "high".into(),
                notification: AndroidNotification {
                    channel_id: "messages_channel".into(),
                    sound: "default".into(),
                    notification_priority: "PRIORITY_HIGH".into(),
                },
            },
            apns: ApnsConfig {
                headers: ApnsHeaders { priority: "10".into(), push_type: "alert".into() },
                payload: ApnsPayload {
                    aps: Aps { alert: None, sound: "default".into(), badge: None, content_available: Some(1) },
                },
            },
        };

        let message = TokenScopedMessage::new("T1", Arc::new(payload));
        let wire = serde_json::to_value(&message).unwrap();

        assert_eq!(wire["token"], "T1");
        assert!(wire.get("notification").is_none());
        assert_eq!(wire["android"]["notification"]["channel_id"], "messages_channel");
        assert_eq!(wire["apns"]["headers"]["apns-priority"], "10");
        assert_eq!(wire["apns"]["payload"]["aps"]["content-available"], 1);
        assert!(wire["apns"]["payload"]["aps"].get("badge").is_none());
    }
}
