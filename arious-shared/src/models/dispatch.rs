use serde::{Deserialize, Serialize};

pub const NO_DEVICE_TOKENS_MESSAGE: &str = "No device tokens found";

/// A token whose delivery attempt failed, with the transport's error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryFailure {
    pub token: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub success_count: usize,
    pub failure_count: usize,
    pub failures: Vec<DeliveryFailure>,
}

impl DeliveryReport {
    pub fn success(&self) -> bool {
        self.success_count > 0
    }

    pub fn attempts(&self) -> usize {
        self.success_count + self.failure_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    NoDeviceTokens,
    Delivered(DeliveryReport),
}

impl DispatchOutcome {
    pub fn success(&self) -> bool {
        match self {
            DispatchOutcome::NoDeviceTokens => false,
            DispatchOutcome::Delivered(report) => report.success(),
        }
    }
}

/// Response body returned to the caller of the callable operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPushResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failures: Option<Vec<DeliveryFailure>>,
}

impl From<&DispatchOutcome> for SendPushResponse {
    fn from(outcome: &DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::NoDeviceTokens => SendPushResponse {
                success: false,
                message: Some(NO_DEVICE_TOKENS_MESSAGE.to_string()),
                success_count: None,
                failure_count: None,
                failures: None,
            },
            DispatchOutcome::Delivered(report) => SendPushResponse {
                success: report.success(),
                message: None,
                success_count: Some(report.success_count),
                failure_count: Some(report.failure_count),
                failures: Some(report.failures.clone()),
            },
        }
    }
}
