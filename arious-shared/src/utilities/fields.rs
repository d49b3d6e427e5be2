pub mod dynamodb {
    pub const PARTITION_KEY: &str = "PK";
    pub const SORT_KEY: &str = "SK";
    pub const USER_PREFIX: &str = "User#";
    pub const PROFILE_SORT_KEY: &str = "Profile";
    pub const PRESENCE_PREFIX: &str = "Presence#";

    pub const PUSH_TOKENS_FIELD: &str = "push_tokens";
    pub const IS_ONLINE_FIELD: &str = "is_online";
    pub const ACTIVE_CHAT_FIELD: &str = "active_chat_id";
}


pub mod data {
    pub const TYPE: &str = "type";
    pub const CHAT_ID: &str = "chatId";
    pub const MESSAGE_ID: &str = "messageId";
    pub const SENDER_ID: &str = "senderId";
    pub const CALL: &str = "call";
}
