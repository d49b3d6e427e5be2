#[cfg(test)]
mod dispatcher_tests {
    use std::sync::Arc;
    use lambda_runtime::{Context, LambdaEvent};
    use serde_json::{json, Value};
    use arious_shared::database::errors::DynamoDbError;
    use arious_shared::models::user_device::UserDevices;
    use arious_shared::repositories::presence_repository::MockPresenceStore;
    use arious_shared::repositories::user_directory::MockUserDirectory;
    use arious_shared::services::notification_services::MockMessagingTransport;
    use arious_shared::services::push_dispatch_service::PushDispatchService;
    use arious_shared::utilities::test::init_tracing;
    use crate::dispatch_handler::function_handler;

    fn event(payload: Value) -> LambdaEvent<Value> {
        LambdaEvent::new(payload, Context::default())
    }

    fn dispatcher(
        directory: MockUserDirectory,
        presence: MockPresenceStore,
        transport: MockMessagingTransport,
    ) -> Arc<PushDispatchService> {
        Arc::new(PushDispatchService::new(Arc::new(directory), Arc::new(presence), Arc::new(transport)))
    }

    #[tokio::test]
    async fn test_invalid_call_is_prefixed_with_status() {
        init_tracing();
        let mut directory = MockUserDirectory::new();
        directory.expect_get_user_devices().never();
        let mut transport = MockMessagingTransport::new();
        transport.expect_send().never();

        let err = function_handler(
            event(json!({ "type": "call", "title": "Incoming", "body": "", "deviceToken": "T1" })),
            dispatcher(directory, MockPresenceStore::new(), transport),
            None,
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid-argument: Missing required fields for call: deviceToken, call"
        );
    }

    #[tokio::test]
    async fn test_directory_failure_is_internal() {
        init_tracing();
        let mut directory = MockUserDirectory::new();
        directory
            .expect_get_user_devices()
            .returning(|_| Err(DynamoDbError::DynamoDbOperation("throttled".into())));

        let err = function_handler(
            event(json!({ "data": {
                "type": "message", "title": "Ana", "body": "hola",
                "toUserId": "u2", "chatId": "c1", "messageId": "m1"
            }})),
            dispatcher(directory, MockPresenceStore::new(), MockMessagingTransport::new()),
            None,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().starts_with("internal: "));
        assert!(err.to_string().contains("throttled"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_message_to_offline_user_is_delivered() {
        init_tracing();
        let mut directory = MockUserDirectory::new();
        directory
            .expect_get_user_devices()
            .returning(|user_id| Ok(UserDevices::new(user_id, vec!["token1".into(), "token2".into()])));
        let mut presence = MockPresenceStore::new();
        presence.expect_get_presence().times(1).returning(|_| Ok(None));
        let mut transport = MockMessagingTransport::new();
        transport
            .expect_send()
            .withf(|message| message.payload.notification.is_some())
            .times(2)
            .returning(|message| Ok(format!("projects/arious/messages/{}", message.token)));

        let response = function_handler(
            event(json!({
                "type": "message", "title": "Ana", "body": "hola",
                "toUserId": "u2", "chatId": "c1", "messageId": "m1", "senderId": "u1"
            })),
            dispatcher(directory, presence, transport),
            None,
        )
        .await
        .unwrap();

        assert_eq!(
            response,
            json!({ "success": true, "successCount": 2, "failureCount": 0, "failures": [] })
        );
    }
}
