use http::Response;
use lambda_http::Body;
use serde_json::Value;
use arious_shared::models::errors::CallableStatus;
use arious_shared::utilities::logging::log_error;
use arious_shared::utilities::requests::unwrap_callable_payload;
use arious_shared::utilities::responses::{callable_error_response, success_response};
use crate::models::messages::{DecryptMessageRequest, DecryptMessageResponse, MISSING_CIPHERTEXT};
use crate::state::AppState;

const EVENT: &str = "DecryptMessage";

pub async fn handler(state: &AppState, body: Value) -> Result<Response<Body>, lambda_http::Error> {
    let request: DecryptMessageRequest = match serde_json::from_value(unwrap_callable_payload(&body).clone()) {
        Ok(request) => request,
        Err(e) => {
            log_error(EVENT, &format!("Deserialization error: {}", e));
            return callable_error_response(CallableStatus::InvalidArgument, &format!("Malformed request: {}", e));
        }
    };

    let Some(ciphertext) = request.ciphertext else {
        return callable_error_response(CallableStatus::InvalidArgument, MISSING_CIPHERTEXT);
    };

    let metrics = state.metrics(EVENT);
    let message_id = request.message_id.as_deref().unwrap_or("unknown");
    let text = state.cipher.decrypt(&ciphertext, message_id);

    if let Some(metrics) = &metrics {
        metrics.track(&Ok::<(), ()>(())).await;
    }

    success_response(DecryptMessageResponse {
        message_id: request.message_id,
        text,
    })
}
