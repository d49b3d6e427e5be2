use std::fmt;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;

#[derive(Debug)]
pub enum DynamoDbError {
    DynamoDbOperation(String),
}

impl From<SdkError<GetItemError>> for DynamoDbError {
    fn from(err: SdkError<GetItemError>) -> Self {
        DynamoDbError::DynamoDbOperation(format!("GetItem error: {}", err))
    }
}

impl fmt::Display for DynamoDbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamoDbError::DynamoDbOperation(e) => write!(f, "DynamoDB operation failed: {}", e),
        }
    }
}

impl std::error::Error for DynamoDbError {}
