use serde::Serialize;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub environment: String,
}

pub async fn handle() -> StatusResponse {
    StatusResponse {
        status: "OK".to_string(),
        environment: arious_shared::utilities::config::get_environment(),
    }
}
