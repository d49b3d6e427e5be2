use http::StatusCode;
use lambda_http::{Response, Body};
use serde::Serialize;
use serde_json::json;
use crate::models::errors::CallableStatus;

pub fn success_response<T: Serialize>(data: T) -> Result<Response<Body>, lambda_http::Error> {
    response_with_code(data, StatusCode::OK)
}

/// Error body in the callable protocol shape: `{"error": {"status", "message"}}`.
pub fn callable_error_response(status: CallableStatus, message: &str) -> Result<Response<Body>, lambda_http::Error> {
    let body = json!({
        "error": {
            "status": status.canonical(),
            "message": message
        }
    });
    response_with_code(body, status.http_status())
}

pub fn response_with_code<T: Serialize>(data: T, code: StatusCode) -> Result<Response<Body>, lambda_http::Error> {
    let body = serde_json::to_string(&data).map_err(|_| lambda_http::Error::from("Serialization error"))?;
    log::info!("Response Code:{}\nBody: {}", code, body);
    Response::builder()
        .status(code)
        .header("Content-Type", "application/json")
        .body(Body::Text(body))
        .map_err(|e| {
            log::error!("Failed to build response: {:?}", e);
            lambda_http::Error::from("Failed to construct HTTP response")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callable_error_response_shape() {
        let response = callable_error_response(CallableStatus::InvalidArgument, "Missing required fields: type, title, body").unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = match response.body() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            other => panic!("unexpected body {:?}", other),
        };
        assert_eq!(body["error"]["status"], "INVALID_ARGUMENT");
        assert_eq!(body["error"]["message"], "Missing required fields: type, title, body");
    }

    #[test]
    fn test_internal_maps_to_500() {
        let response = callable_error_response(CallableStatus::Internal, "boom").unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
