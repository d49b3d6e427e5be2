pub mod dispatch;
pub mod errors;
pub mod notifications;
pub mod presence;
pub mod user_device;
