// this file contains models which are limited in scope to the endpoints, so don't
// really belong in the shared project

use serde::{Deserialize, Serialize};

pub const MISSING_CIPHERTEXT: &str = "Missing required fields: ciphertext";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptMessageRequest {
    #[serde(alias = "text")]
    pub ciphertext: Option<String>,
    pub message_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptMessageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub text: String,
}
