use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client as DynamoDbClient;

/// Builds a DynamoDB client from the Lambda execution environment.
/// The users and presence tables share one client.
pub async fn get_dynamodb_client() -> DynamoDbClient {
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    DynamoDbClient::new(&config)
}
