use std::sync::Arc;
use http::StatusCode;
use lambda_http::{Body, Request, Response};
use lambda_http::RequestExt;
use crate::endpoints::{messages, notifications, status, test};
use crate::state::AppState;
use arious_shared::utilities::responses::{success_response, response_with_code};
use arious_shared::utilities::requests::extract_body;

const GET: &str = "GET";
const POST: &str = "POST";

pub async fn handle_lambda(event: Request, state: Arc<AppState>) -> Result<Response<Body>, lambda_http::Error> {
    let raw_path = event.raw_http_path();
    let path = raw_path.strip_prefix("/dev")
        .or_else(|| raw_path.strip_prefix("/prod"))
        .unwrap_or(&raw_path);

    log::info!("Received {} request for path: {}", event.method(), path);

    match (event.method().as_str(), path) {
        //Monitor
        (GET, "/test") => success_response(test::handle().await),
        (GET, "/status") => success_response(status::handle().await),

        //Push
        (POST, "/notifications/send") => notifications::send::handler(&state, extract_body(&event)).await,

        //Messages
        (POST, "/messages/decrypt") => messages::decrypt::handler(&state, extract_body(&event)).await,

        //Not found
        _ => response_with_code("Not Found", StatusCode::NOT_FOUND),
    }
}
