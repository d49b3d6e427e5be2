use std::sync::Arc;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use serde_json::{json, Value};
use crate::models::dispatch::{DispatchOutcome, NO_DEVICE_TOKENS_MESSAGE};
use crate::models::errors::{FirebaseError, NotificationError};
use crate::models::notifications::{NotificationRequest, NotificationType};
use crate::repositories::presence_repository::{DynamoPresenceStore, PresenceStore};
use crate::repositories::user_directory::{DynamoUserDirectory, UserDirectory};
use crate::services::dispatch_fanout::DispatchFanout;
use crate::services::notification_services::{FirebaseClient, MessagingTransport};
use crate::services::payload_composer::compose_payload;
use crate::services::presence_oracle::PresenceOracle;
use crate::services::token_resolver::TokenResolver;
use crate::state_machine::dispatch_state::{DispatchState, DispatchTracker};
use crate::utilities::config;
use crate::utilities::logging::{log_error, log_event, log_info};

const EVENT: &str = "SendPushNotification";

/// Validates a push request, resolves its devices, checks presence and fans the
/// composed payload out to every device.
pub struct PushDispatchService {
    tokens: TokenResolver,
    presence: PresenceOracle,
    fanout: DispatchFanout,
}

impl PushDispatchService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        presence: Arc<dyn PresenceStore>,
        transport: Arc<dyn MessagingTransport>,
    ) -> Self {
        Self {
            tokens: TokenResolver::new(directory),
            presence: PresenceOracle::new(presence),
            fanout: DispatchFanout::new(transport),
        }
    }

    /// Production wiring: DynamoDB-backed directory and presence, FCM transport.
    pub fn from_env(db: DynamoDbClient) -> Result<Self, FirebaseError> {
        let transport = FirebaseClient::from_key_file(
            &config::get_service_account_path(),
            &config::get_firebase_project_id(),
        )?;

        Ok(Self::new(
            Arc::new(DynamoUserDirectory::new(db.clone(), config::get_users_table())),
            Arc::new(DynamoPresenceStore::new(db, config::get_presence_table())),
            Arc::new(transport),
        ))
    }

    /// Callable entry point: canonicalizes the raw payload, then sends.
    pub async fn handle_callable(&self, payload: &Value) -> Result<DispatchOutcome, NotificationError> {
        let mut tracker = DispatchTracker::new();

        let request = match NotificationRequest::from_callable(payload) {
            Ok(request) => request,
            Err(e) => {
                tracker.advance(DispatchState::Rejected)?;
                log_error(EVENT, &e.to_string());
                return Err(e.into());
            }
        };
        tracker.advance(DispatchState::Validated)?;

        self.send_validated(&request, &mut tracker).await
    }

    async fn send_validated(
        &self,
        request: &NotificationRequest,
        tracker: &mut DispatchTracker,
    ) -> Result<DispatchOutcome, NotificationError> {
        log_event(EVENT, json!({
            "type": request.notification_type.as_str(),
            "toUserId": request.to_user_id,
            "chatId": request.chat_id,
            "messageId": request.message_id,
            "hasDeviceToken": request.device_token.is_some(),
        }));

        let tokens = self.tokens.resolve(request).await?;
        tracker.advance(DispatchState::TokensResolved)?;

        let mut is_active = false;
        if !tokens.is_empty() && request.notification_type == NotificationType::Message {
            if let (Some(user_id), Some(chat_id)) = (&request.to_user_id, &request.chat_id) {
                is_active = self.presence.is_active_in_chat(user_id, chat_id).await;
            }
            tracker.advance(DispatchState::PresenceChecked)?;
        }

        let payload = compose_payload(request, is_active);
        tracker.advance(DispatchState::PayloadComposed)?;

        let outcome = self.fanout.dispatch(&tokens, payload).await;
        tracker.advance(DispatchState::Dispatched)?;

        match &outcome {
            DispatchOutcome::NoDeviceTokens => log_info(EVENT, NO_DEVICE_TOKENS_MESSAGE),
            DispatchOutcome::Delivered(report) => log_event(EVENT, json!({
                "result": if report.success() { "delivered" } else { "failed" },
                "successCount": report.success_count,
                "failureCount": report.failure_count,
                "silent": is_active,
            })),
        }
        tracker.advance(DispatchState::ResultAggregated)?;

        Ok(outcome)
    }
}
