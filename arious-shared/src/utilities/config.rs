
use dotenv::dotenv;
use std::env;

/// Initialize dotenv (only needs to be called once at startup)
pub fn init() {
    if dotenv().is_ok() {
        println!("Loaded .env file");
    } else {
        println!("No .env file found, using process environment");
    }
}

/// Fetch environment variables by key
pub fn get_env_var(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("Environment variable {} must be set", key))
}

//Get table names
pub fn get_users_table() -> String {
    get_env_var("DYNAMODB_USERS_TABLE_NAME")
}

pub fn get_presence_table() -> String {
    get_env_var("DYNAMODB_PRESENCE_TABLE_NAME")
}

pub fn get_firebase_project_id() -> String {
    get_env_var("FIREBASE_PROJECT_ID")
}

pub fn get_service_account_path() -> String {
    get_env_var("FIREBASE_SERVICE_ACCOUNT_PATH")
}

/// Base64 AES-256 key shared with the content-producing client.
pub fn get_message_cipher_key() -> String {
    get_env_var("MESSAGE_CIPHER_KEY")
}

/// Base64 CBC initialization vector shared with the content-producing client.
pub fn get_message_cipher_iv() -> String {
    get_env_var("MESSAGE_CIPHER_IV")
}

pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string())
}
