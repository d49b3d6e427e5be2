use std::collections::HashMap;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize};
use crate::utilities::fields::dynamodb;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceRecord {
    pub is_online: bool,
    pub active_chat_id: Option<String>,
}

impl PresenceRecord {
    pub fn online_in(chat_id: impl Into<String>) -> Self {
        Self {
            is_online: true,
            active_chat_id: Some(chat_id.into()),
        }
    }

    pub fn is_active_in(&self, chat_id: &str) -> bool {
        self.is_online && self.active_chat_id.as_deref() == Some(chat_id)
    }

    /// Missing or mistyped attributes read as offline / no active chat.
    pub fn from_item(item: &HashMap<String, AttributeValue>) -> Self {
        let is_online = item
            .get(dynamodb::IS_ONLINE_FIELD)
            .and_then(|v| v.as_bool().ok())
            .copied()
            .unwrap_or(false);

        let active_chat_id = item
            .get(dynamodb::ACTIVE_CHAT_FIELD)
            .and_then(|v| v.as_s().ok())
            .cloned();

        PresenceRecord {
            is_online,
            active_chat_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_requires_online_and_matching_chat() {
        assert!(PresenceRecord::online_in("c1").is_active_in("c1"));
        assert!(!PresenceRecord::online_in("c2").is_active_in("c1"));

        let offline = PresenceRecord { is_online: false, active_chat_id: Some("c1".into()) };
        assert!(!offline.is_active_in("c1"));
        assert!(!PresenceRecord::default().is_active_in("c1"));
    }

    #[test]
    fn test_from_item() {
        let item = HashMap::from([
            ("is_online".to_string(), AttributeValue::Bool(true)),
            ("active_chat_id".to_string(), AttributeValue::S("c9".into())),
        ]);
        assert_eq!(PresenceRecord::from_item(&item), PresenceRecord::online_in("c9"));

        let partial = HashMap::from([("is_online".to_string(), AttributeValue::S("yes".into()))]);
        assert_eq!(PresenceRecord::from_item(&partial), PresenceRecord::default());
    }
}
