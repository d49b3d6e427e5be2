use aws_sdk_cloudwatch::{Client as CloudWatchClient};
use aws_sdk_cloudwatch::types::{MetricDatum, StandardUnit, Dimension};
use aws_smithy_types::date_time::DateTime;
use std::time::Instant;

use aws_config::BehaviorVersion;
use std::sync::Arc;
use crate::models::dispatch::DispatchOutcome;
use crate::utilities::config::get_environment;

pub async fn create_cloudwatch_client() -> CloudWatchClient {
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    CloudWatchClient::new(&config)
}

pub fn metrics_namespace(environment: &str) -> String {
    format!("{}/AriousPush/Metrics", environment)
}

/// Builds one datum tagged with the operation plus any extra dimensions.
fn operation_datum(
    operation: &str,
    metric_name: &str,
    value: f64,
    unit: &str,
    dimensions: &[(&str, &str)],
) -> MetricDatum {
    let mut dims = vec![
        Dimension::builder()
            .name("Operation")
            .value(operation)
            .build(),
    ];

    dims.extend(dimensions.iter().map(|(k, v)| {
        Dimension::builder()
            .name(*k)
            .value(*v)
            .build()
    }));

    MetricDatum::builder()
        .metric_name(metric_name)
        .timestamp(DateTime::from_secs(chrono::Utc::now().timestamp()))
        .value(value)
        .unit(StandardUnit::from(unit))
        .set_dimensions(Some(dims))
        .build()
}

#[derive(Clone, Debug)]
pub struct OperationMetricTracker {
    cloudwatch: Arc<CloudWatchClient>,
    start: Instant,
    environment: String,
    operation: &'static str,  // "SendPushNotification", "DecryptMessage", etc.
}

impl OperationMetricTracker {
    pub fn new(cloudwatch: CloudWatchClient, operation: &'static str) -> Self {
        Self {
            cloudwatch: Arc::new(cloudwatch),
            start: Instant::now(),
            environment: get_environment(),
            operation,
        }
    }

    pub async fn track<T, E>(&self, result: &Result<T, E>)
    where
        E: std::fmt::Debug + Send + Sync + 'static,
    {
        let status = if result.is_ok() { "Success" } else { "Error" };
        let elapsed = self.start.elapsed().as_millis() as f64;

        self.emit("Latency", elapsed, "Milliseconds", &[("Status", status)])
            .await;

        self.emit("Calls", 1.0, "Count", &[("Status", status)])
            .await;
    }

    /// Per-token delivery counts, or a single NoDeviceTokens count when the recipient had none.
    pub async fn emit_dispatch_counts(&self, outcome: &DispatchOutcome) {
        let DispatchOutcome::Delivered(report) = outcome else {
            self.emit("NoDeviceTokens", 1.0, "Count", &[]).await;
            return;
        };

        self.emit("PushDelivered", report.success_count as f64, "Count", &[])
            .await;
        self.emit("PushFailed", report.failure_count as f64, "Count", &[])
            .await;
    }

    pub async fn emit(
        &self,
        metric_name: &str,
        value: f64,
        unit: &str,
        dimensions: &[(&str, &str)],
    ) {
        let datum = operation_datum(self.operation, metric_name, value, unit, dimensions);

        if let Err(e) = self
            .cloudwatch
            .put_metric_data()
            .namespace(metrics_namespace(&self.environment))
            .metric_data(datum)
            .send()
            .await
        {
            log::error!("Failed to emit {} metric: {:?}", metric_name, e);
        }
    }
}
