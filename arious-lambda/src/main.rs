use std::sync::Arc;
use lambda_http::{service_fn, Error, Request};
use env_logger;
use log;
use crate::router::handle_lambda;
use crate::state::AppState;
use arious_shared::utilities::config;

mod router;
mod endpoints;
mod models;
mod state;


#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    std::panic::set_hook(Box::new(|info| {
        log::error!("Application panicked: {}", info);
    }));

    config::init();

    // Cold start: collaborators are built once and shared by every invocation
    let state = Arc::new(AppState::from_env().await);

    lambda_http::run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { handle_lambda(event, state).await }
    }))
    .await?;
    Ok(())
}
