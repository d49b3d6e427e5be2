use aws_sdk_cloudwatch::Client as CloudWatchClient;
use arious_shared::database::client::get_dynamodb_client;
use arious_shared::services::cipher_service::{CipherConfig, CipherService};
use arious_shared::services::cloudwatch_services::{create_cloudwatch_client, OperationMetricTracker};
use arious_shared::services::push_dispatch_service::PushDispatchService;

/// Everything an invocation needs, built once per container.
pub struct AppState {
    pub dispatcher: PushDispatchService,
    pub cipher: CipherService,
    pub cloudwatch: Option<CloudWatchClient>,
}

impl AppState {
    pub fn new(dispatcher: PushDispatchService, cipher: CipherService, cloudwatch: Option<CloudWatchClient>) -> Self {
        Self {
            dispatcher,
            cipher,
            cloudwatch,
        }
    }

    /// Panics when configuration is missing or invalid; the function cannot serve without it.
    pub async fn from_env() -> Self {
        let cipher_config = CipherConfig::from_env()
            .unwrap_or_else(|e| panic!("Invalid message cipher configuration: {}", e));

        let dispatcher = PushDispatchService::from_env(get_dynamodb_client().await)
            .unwrap_or_else(|e| panic!("Failed to initialise Firebase messaging: {}", e));

        Self::new(
            dispatcher,
            CipherService::new(cipher_config),
            Some(create_cloudwatch_client().await),
        )
    }

    pub fn metrics(&self, operation: &'static str) -> Option<OperationMetricTracker> {
        self.cloudwatch
            .as_ref()
            .map(|client| OperationMetricTracker::new(client.clone(), operation))
    }
}
