use std::sync::Arc;
use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use serde_json::Value;
use arious_shared::database::client::get_dynamodb_client;
use arious_shared::services::cloudwatch_services::create_cloudwatch_client;
use arious_shared::services::push_dispatch_service::PushDispatchService;
use arious_shared::utilities::config;

mod dispatch_handler;

#[cfg(test)]
mod dispatcher_test;

#[tokio::main]
async fn main() -> Result<(), Error> {
    config::init();
    // also bridges `log` records from arious-shared
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let dispatcher = Arc::new(PushDispatchService::from_env(get_dynamodb_client().await)?);
    let cloudwatch = Arc::new(create_cloudwatch_client().await);
    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        let dispatcher = dispatcher.clone();
        let cloudwatch = cloudwatch.clone();
        async move {
            dispatch_handler::function_handler(event, dispatcher, Some(cloudwatch)).await
        }
    }))
        .await?;

    Ok(())
}
