use once_cell::sync::OnceCell;
use serde_json::json;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use crate::models::notifications::{NotificationRequest, NotificationType};
use crate::services::cipher_service::CipherConfig;

pub const TEST_CIPHER_KEY: &[u8; 32] = b"01234567890123456789012345678900";
pub const TEST_CIPHER_IV: &[u8; 16] = b"0123456789012345";

static INIT: OnceCell<()> = OnceCell::new();

pub fn init_tracing() {
    INIT.get_or_init(|| {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env()) // optionally set RUST_LOG
            .with_test_writer() // required to capture test output
            .finish();

        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// u1 writes "hola" to u2 in chat c1.
pub fn message_request() -> NotificationRequest {
    NotificationRequest {
        notification_type: NotificationType::Message,
        title: "Ana".into(),
        body: "hola".into(),
        to_user_id: Some("u2".into()),
        chat_id: Some("c1".into()),
        message_id: Some("m1".into()),
        device_token: None,
        call: None,
        sender_id: Some("u1".into()),
    }
}

/// Call addressed straight to device T1, with no body.
pub fn call_request() -> NotificationRequest {
    NotificationRequest {
        notification_type: NotificationType::Call,
        title: "Incoming".into(),
        body: String::new(),
        to_user_id: None,
        chat_id: None,
        message_id: None,
        device_token: Some("T1".into()),
        call: Some(json!({ "id": "c1" })),
        sender_id: None,
    }
}

pub fn test_cipher_config() -> CipherConfig {
    CipherConfig::new(*TEST_CIPHER_KEY, *TEST_CIPHER_IV)
}
