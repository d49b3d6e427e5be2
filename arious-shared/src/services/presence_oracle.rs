use std::sync::Arc;
use crate::repositories::presence_repository::PresenceStore;

/// Decides whether a recipient is already looking at a conversation.
/// Lookup failures read as "not active" so a visible notification is still shown.
pub struct PresenceOracle {
    store: Arc<dyn PresenceStore>,
}

impl PresenceOracle {
    pub fn new(store: Arc<dyn PresenceStore>) -> Self {
        Self { store }
    }

    pub async fn is_active_in_chat(&self, user_id: &str, chat_id: &str) -> bool {
        match self.store.get_presence(user_id).await {
            Ok(Some(record)) => {
                let active = record.is_active_in(chat_id);
                log::info!(
                    "[presence] user={} online={} active_chat={:?} target_chat={} active={}",
                    user_id, record.is_online, record.active_chat_id, chat_id, active
                );
                active
            }
            Ok(None) => {
                log::info!("[presence] No presence record for {}", user_id);
                false
            }
            Err(e) => {
                log::warn!("[presence] Presence check failed for {}: {}", user_id, e);
                false
            }
        }
    }
}
