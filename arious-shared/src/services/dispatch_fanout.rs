use std::sync::Arc;
use futures::future::join_all;
use tracing::{error, info, warn};
use crate::models::dispatch::{DeliveryFailure, DeliveryReport, DispatchOutcome};
use crate::models::errors::TransportError;
use crate::models::notifications::{token_prefix, PlatformPayload, TokenScopedMessage};
use crate::services::notification_services::MessagingTransport;

/// Code recorded when a delivery task dies before reporting a result.
pub const TASK_FAILED: &str = "messaging/internal-error";

/// Sends one payload to many tokens. Every token gets exactly one attempt on its own
/// task; a failure never cancels or delays the others, and all tasks are joined
/// before the outcome is aggregated.
pub struct DispatchFanout {
    transport: Arc<dyn MessagingTransport>,
}

impl DispatchFanout {
    pub fn new(transport: Arc<dyn MessagingTransport>) -> Self {
        Self { transport }
    }

    pub async fn dispatch(&self, tokens: &[String], payload: PlatformPayload) -> DispatchOutcome {
        if tokens.is_empty() {
            info!("No device tokens found, nothing to send");
            return DispatchOutcome::NoDeviceTokens;
        }

        let payload = Arc::new(payload);
        let handles = tokens
            .iter()
            .map(|token| {
                let transport = Arc::clone(&self.transport);
                let message = TokenScopedMessage::new(token.clone(), Arc::clone(&payload));

                tokio::spawn(async move {
                    match transport.send(&message).await {
                        Ok(delivery_id) => {
                            info!("✅ Sent to token {}... id: {}", message.token_prefix(), delivery_id);
                            Ok(())
                        }
                        Err(e) => {
                            warn!("⚠️ Failed for token {}...: {}", message.token_prefix(), e.code);
                            Err(e)
                        }
                    }
                })
            })
            .collect::<Vec<_>>();

        // join_all keeps spawn order, so failures come back in token order
        let results = join_all(handles).await;

        let mut report = DeliveryReport::default();
        for (token, result) in tokens.iter().zip(results) {
            let attempt = result.unwrap_or_else(|join_err| {
                error!("❌ Delivery task for token {}... aborted: {}", token_prefix(token), join_err);
                Err(TransportError::new(TASK_FAILED, join_err.to_string()))
            });

            match attempt {
                Ok(()) => report.success_count += 1,
                Err(e) => {
                    report.failure_count += 1;
                    report.failures.push(DeliveryFailure {
                        token: token.clone(),
                        error: e.code,
                    });
                }
            }
        }

        info!(
            "Dispatch finished: {} succeeded, {} failed",
            report.success_count, report.failure_count
        );
        DispatchOutcome::Delivered(report)
    }
}
