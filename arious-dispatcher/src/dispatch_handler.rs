use std::sync::Arc;
use lambda_runtime::{LambdaEvent, Error};
use serde_json::Value;
use tracing::{error, info};

use arious_shared::models::dispatch::SendPushResponse;
use arious_shared::services::cloudwatch_services::OperationMetricTracker;
use arious_shared::services::push_dispatch_service::PushDispatchService;

use aws_sdk_cloudwatch::Client as CloudWatchClient;

/// Direct-invoke form of the send operation. The event is the callable payload itself;
/// failures surface as a function error prefixed with the callable status.
pub async fn function_handler(
    event: LambdaEvent<Value>,
    dispatcher: Arc<PushDispatchService>,
    cloudwatch: Option<Arc<CloudWatchClient>>,
) -> Result<Value, Error> {
    let tracker = cloudwatch.map(|client| OperationMetricTracker::new((*client).clone(), "DispatchInvoked"));
    info!("Dispatch invoked, request id {}", event.context.request_id);

    let result = dispatcher.handle_callable(&event.payload).await;

    if let Some(tracker) = &tracker {
        tracker.track(&result).await;
        if let Ok(outcome) = &result {
            tracker.emit_dispatch_counts(outcome).await;
        }
    }

    match result {
        Ok(outcome) => {
            info!("✅ Dispatch complete, success: {}", outcome.success());
            Ok(serde_json::to_value(SendPushResponse::from(&outcome))?)
        }
        Err(err) => {
            error!("❌ Dispatch rejected: {}", err);
            Err(format!("{}: {}", err.status(), err).into())
        }
    }
}
