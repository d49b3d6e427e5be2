use crate::database::errors::DynamoDbError;
use crate::models::user_device::UserDevices;
use crate::utilities::fields::dynamodb;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::types::AttributeValue;

/// Interface
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Registered push tokens for a user; an unknown user has none.
    async fn get_user_devices(&self, user_id: &str) -> Result<UserDevices, DynamoDbError>;
}

/// DynamoDB-backed implementation
pub struct DynamoUserDirectory {
    db: DynamoDbClient,
    table_name: String,
}

impl DynamoUserDirectory {
    pub fn new(db: DynamoDbClient, table_name: impl Into<String>) -> Self {
        Self {
            db,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl UserDirectory for DynamoUserDirectory {
    async fn get_user_devices(&self, user_id: &str) -> Result<UserDevices, DynamoDbError> {
        let pk = format!("{}{}", dynamodb::USER_PREFIX, user_id);

        let res = self
            .db
            .get_item()
            .table_name(&self.table_name)
            .key(dynamodb::PARTITION_KEY, AttributeValue::S(pk))
            .key(dynamodb::SORT_KEY, AttributeValue::S(dynamodb::PROFILE_SORT_KEY.to_string()))
            .projection_expression(dynamodb::PUSH_TOKENS_FIELD)
            .send()
            .await?;

        match res.item {
            Some(item) => Ok(UserDevices::from_item(user_id, &item)),
            None => {
                log::warn!("No user record found for {}", user_id);
                Ok(UserDevices::new(user_id, Vec::new()))
            }
        }
    }
}
