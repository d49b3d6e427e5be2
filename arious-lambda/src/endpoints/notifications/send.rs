use http::Response;
use lambda_http::Body;
use serde_json::Value;
use arious_shared::models::dispatch::SendPushResponse;
use arious_shared::utilities::logging::log_error;
use arious_shared::utilities::responses::{callable_error_response, success_response};
use crate::state::AppState;

const EVENT: &str = "SendPushNotification";

pub async fn handler(state: &AppState, body: Value) -> Result<Response<Body>, lambda_http::Error> {
    let metrics = state.metrics(EVENT);
    let result = state.dispatcher.handle_callable(&body).await;

    if let Some(metrics) = &metrics {
        metrics.track(&result).await;
        if let Ok(outcome) = &result {
            metrics.emit_dispatch_counts(outcome).await;
        }
    }

    match result {
        Ok(outcome) => success_response(SendPushResponse::from(&outcome)),
        Err(err) => {
            log_error(EVENT, &format!("{} ({})", err, err.status()));
            callable_error_response(err.status(), &err.to_string())
        }
    }
}
