use crate::database::errors::DynamoDbError;
use crate::models::presence::PresenceRecord;
use crate::utilities::fields::dynamodb;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::types::AttributeValue;

/// Read-only view of the live presence written by the chat clients.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait PresenceStore: Send + Sync {
    /// `Ok(None)` when the user has never reported presence.
    async fn get_presence(&self, user_id: &str) -> Result<Option<PresenceRecord>, DynamoDbError>;
}

pub struct DynamoPresenceStore {
    db: DynamoDbClient,
    table_name: String,
}

impl DynamoPresenceStore {
    pub fn new(db: DynamoDbClient, table_name: impl Into<String>) -> Self {
        Self {
            db,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl PresenceStore for DynamoPresenceStore {
    async fn get_presence(&self, user_id: &str) -> Result<Option<PresenceRecord>, DynamoDbError> {
        let res = self
            .db
            .get_item()
            .table_name(&self.table_name)
            .key(
                dynamodb::PARTITION_KEY,
                AttributeValue::S(format!("{}{}", dynamodb::PRESENCE_PREFIX, user_id)),
            )
            .consistent_read(true)
            .send()
            .await?;

        Ok(res.item.as_ref().map(PresenceRecord::from_item))
    }
}
