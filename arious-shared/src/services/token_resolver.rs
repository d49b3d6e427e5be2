use std::sync::Arc;
use crate::database::errors::DynamoDbError;
use crate::models::notifications::NotificationRequest;
use crate::repositories::user_directory::UserDirectory;

/// Maps a request to the device tokens to notify. An explicit device token wins and
/// the directory is not consulted; otherwise the recipient's stored tokens are used verbatim.
pub struct TokenResolver {
    directory: Arc<dyn UserDirectory>,
}

impl TokenResolver {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    pub async fn resolve(&self, request: &NotificationRequest) -> Result<Vec<String>, DynamoDbError> {
        if let Some(token) = &request.device_token {
            log::info!("[tokens] Using explicit device token (len {})", token.len());
            return Ok(vec![token.clone()]);
        }

        let Some(user_id) = &request.to_user_id else {
            return Ok(Vec::new());
        };

        let devices = self.directory.get_user_devices(user_id).await?;
        log::info!("[tokens] Found {} tokens for user {}", devices.push_tokens.len(), user_id);
        Ok(devices.push_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user_device::UserDevices;
    use crate::repositories::user_directory::MockUserDirectory;
    use crate::utilities::test::{call_request, message_request};

    #[tokio::test]
    async fn test_explicit_token_skips_directory() {
        let mut directory = MockUserDirectory::new();
        directory.expect_get_user_devices().never();
        let resolver = TokenResolver::new(Arc::new(directory));

        let mut request = message_request();
        request.device_token = Some("T1".into());

        assert_eq!(resolver.resolve(&request).await.unwrap(), vec!["T1"]);
        assert_eq!(resolver.resolve(&call_request()).await.unwrap(), vec!["T1"]);
    }

    #[tokio::test]
    async fn test_directory_tokens_returned_verbatim() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_get_user_devices()
            .withf(|user_id| user_id == "u2")
            .times(1)
            .returning(|user_id| Ok(UserDevices::new(user_id, vec!["b".into(), "a".into(), "b".into()])));
        let resolver = TokenResolver::new(Arc::new(directory));

        assert_eq!(resolver.resolve(&message_request()).await.unwrap(), vec!["b", "a", "b"]);
    }

    #[tokio::test]
    async fn test_directory_error_propagates() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_get_user_devices()
            .returning(|_| Err(DynamoDbError::DynamoDbOperation("throttled".into())));
        let resolver = TokenResolver::new(Arc::new(directory));

        assert!(resolver.resolve(&message_request()).await.is_err());
    }
}
