// src/models/user_device.rs

use std::collections::HashMap;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize};
use crate::utilities::fields::dynamodb;

/// Push tokens registered for one user, in the order they were stored.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserDevices {
    pub user_id: String,
    pub push_tokens: Vec<String>,
}

impl UserDevices {
    pub fn new(user_id: impl Into<String>, push_tokens: Vec<String>) -> Self {
        Self {
            user_id: user_id.into(),
            push_tokens,
        }
    }

    /// Reads `push_tokens` as either a list or a string set. A missing attribute
    /// means the user has no registered devices. Non-string list entries are skipped.
    pub fn from_item(user_id: &str, item: &HashMap<String, AttributeValue>) -> Self {
        let push_tokens = match item.get(dynamodb::PUSH_TOKENS_FIELD) {
            Some(AttributeValue::L(values)) => values
                .iter()
                .filter_map(|v| v.as_s().ok())
                .cloned()
                .collect(),
            Some(AttributeValue::Ss(values)) => values.clone(),
            Some(other) => {
                log::warn!("Unexpected push_tokens attribute for user {}: {:?}", user_id, other);
                Vec::new()
            }
            None => Vec::new(),
        };

        UserDevices {
            user_id: user_id.to_string(),
            push_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_item_reads_list_in_order() {
        let item = HashMap::from([(
            "push_tokens".to_string(),
            AttributeValue::L(vec![
                AttributeValue::S("t2".into()),
                AttributeValue::S("t1".into()),
                AttributeValue::N("7".into()),
                AttributeValue::S("t2".into()),
            ]),
        )]);

        let devices = UserDevices::from_item("u1", &item);

        assert_eq!(devices.push_tokens, vec!["t2", "t1", "t2"]);
    }

    #[test]
    fn test_from_item_reads_string_set() {
        let item = HashMap::from([(
            "push_tokens".to_string(),
            AttributeValue::Ss(vec!["a".into(), "b".into()]),
        )]);

        assert_eq!(UserDevices::from_item("u1", &item).push_tokens, vec!["a", "b"]);
    }

    #[test]
    fn test_from_item_without_tokens_is_empty() {
        let devices = UserDevices::from_item("u1", &HashMap::new());
        assert!(devices.push_tokens.is_empty());
        assert_eq!(devices.user_id, "u1");
    }
}
