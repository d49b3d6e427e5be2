use std::fs;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use crate::models::errors::{FirebaseError, TransportError};
use crate::models::notifications::{FirebaseClaims, ServiceAccountKey, TokenResponse, TokenScopedMessage};

const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const FCM_ERROR_TYPE: &str = "type.googleapis.com/google.firebase.fcm.v1.FcmError";

pub const NETWORK_ERROR: &str = "messaging/network-error";
pub const INVALID_CREDENTIAL: &str = "app/invalid-credential";
pub const UNKNOWN_ERROR: &str = "messaging/unknown-error";

/// Delivers one token-scoped message and returns the platform's delivery id.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait MessagingTransport: Send + Sync {
    async fn send(&self, message: &TokenScopedMessage) -> Result<String, TransportError>;
}

// Holds the service account and token cache
pub struct FirebaseClient {
    key: ServiceAccountKey,
    cached_token: Arc<RwLock<Option<(String, DateTime<Utc>)>>>,
    project_id: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct FcmSendResponse {
    name: String,
}

#[derive(Deserialize)]
struct FcmErrorEnvelope {
    error: FcmErrorBody,
}

#[derive(Deserialize)]
struct FcmErrorBody {
    status: Option<String>,
    #[serde(default)]
    details: Vec<FcmErrorDetail>,
}

#[derive(Deserialize)]
struct FcmErrorDetail {
    #[serde(rename = "@type")]
    type_url: Option<String>,
    #[serde(rename = "errorCode")]
    error_code: Option<String>,
}

impl FirebaseClient {
    pub fn new(key: ServiceAccountKey, project_id: &str) -> Self {
        Self {
            key,
            project_id: project_id.to_string(),
            cached_token: Arc::new(RwLock::new(None)),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_key_file(path: &str, project_id: &str) -> Result<Self, FirebaseError> {
        let key = load_service_account_key(path)?;
        Ok(Self::new(key, project_id))
    }

    fn send_url(&self) -> String {
        format!(
            "https://fcm.googleapis.com/v1/projects/{}/messages:send",
            self.project_id
        )
    }

    async fn get_access_token(&self) -> Result<String, FirebaseError> {
        let refresh_margin = Duration::minutes(5);
        let now = Utc::now();

        let mut guard = self.cached_token.write().await;
        if let Some((token, expiry)) = guard.as_ref() {
            let seconds_remaining = (*expiry - now).num_seconds();
            if *expiry - refresh_margin > now {
                log::debug!("[Push] Firebase token cache hit (expires in {}s)", seconds_remaining);
                return Ok(token.clone());
            }
            log::info!("[Push] Firebase token near expiry ({}s remaining), refreshing", seconds_remaining);
        } else {
            log::info!("[Push] Firebase token cache miss, no token loaded yet");
        }

        let jwt = create_jwt(&self.key)?;
        let token = exchange_jwt_for_token(&self.http, &self.key.token_uri, &jwt).await?;

        let expiry = Utc::now() + Duration::minutes(50);
        *guard = Some((token.clone(), expiry));

        log::info!("[Push] New Firebase token cached (valid until {})", expiry);

        Ok(token)
    }
}

#[async_trait]
impl MessagingTransport for FirebaseClient {
    async fn send(&self, message: &TokenScopedMessage) -> Result<String, TransportError> {
        let access_token = self.get_access_token().await.map_err(|e| {
            log::error!("[Push] Could not obtain Firebase access token: {}", e);
            TransportError::new(INVALID_CREDENTIAL, e.to_string())
        })?;

        let res = self
            .http
            .post(self.send_url())
            .bearer_auth(access_token)
            .json(&json!({ "message": message }))
            .send()
            .await
            .map_err(|e| TransportError::new(NETWORK_ERROR, e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| TransportError::new(NETWORK_ERROR, e.to_string()))?;

        if !status.is_success() {
            log::warn!("[Push] Send to {}... failed with {}: {}", message.token_prefix(), status, text);
            return Err(TransportError::new(error_code_from_response(status, &text), text));
        }

        let sent: FcmSendResponse = serde_json::from_str(&text)
            .map_err(|e| TransportError::new(UNKNOWN_ERROR, format!("Unexpected FCM response: {}", e)))?;

        Ok(sent.name)
    }
}

/// Maps an FCM v1 error response onto the admin-SDK style code reported to callers.
pub fn error_code_from_response(status: StatusCode, body: &str) -> String {
    let Ok(envelope) = serde_json::from_str::<FcmErrorEnvelope>(body) else {
        return match status {
            StatusCode::SERVICE_UNAVAILABLE => "messaging/server-unavailable".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR => "messaging/internal-error".to_string(),
            _ => UNKNOWN_ERROR.to_string(),
        };
    };

    let fcm_code = envelope
        .error
        .details
        .iter()
        .find(|d| d.type_url.as_deref() == Some(FCM_ERROR_TYPE))
        .and_then(|d| d.error_code.clone());

    match fcm_code.or(envelope.error.status).as_deref() {
        Some("UNREGISTERED") | Some("NOT_FOUND") => "messaging/registration-token-not-registered",
        Some("INVALID_ARGUMENT") => "messaging/invalid-argument",
        Some("SENDER_ID_MISMATCH") | Some("PERMISSION_DENIED") => "messaging/mismatched-credential",
        Some("QUOTA_EXCEEDED") | Some("RESOURCE_EXHAUSTED") => "messaging/message-rate-exceeded",
        Some("THIRD_PARTY_AUTH_ERROR") | Some("UNAUTHENTICATED") => "messaging/third-party-auth-error",
        Some("UNAVAILABLE") => "messaging/server-unavailable",
        Some("INTERNAL") => "messaging/internal-error",
        _ => UNKNOWN_ERROR,
    }
    .to_string()
}

fn load_service_account_key(path: &str) -> Result<ServiceAccountKey, FirebaseError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn create_jwt(sa: &ServiceAccountKey) -> Result<String, FirebaseError> {
    let now = Utc::now();
    let claims = FirebaseClaims {
        iss: &sa.client_email,
        scope: FCM_SCOPE,
        aud: &sa.token_uri,
        iat: now.timestamp(),
        exp: (now + Duration::minutes(60)).timestamp(),
    };

    let key = EncodingKey::from_rsa_pem(sa.private_key.replace("\\n", "\n").as_bytes())?;

    Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
}

async fn exchange_jwt_for_token(http: &reqwest::Client, token_uri: &str, jwt: &str) -> Result<String, FirebaseError> {
    let params = [
        ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
        ("assertion", jwt),
    ];

    let res = http
        .post(token_uri)
        .form(&params)
        .send()
        .await?;

    if !res.status().is_success() {
        let body = res.text().await?;
        return Err(FirebaseError::TokenExchangeFailed(body));
    }

    let token_response: TokenResponse = res.json().await?;
    Ok(token_response.access_token)
}
