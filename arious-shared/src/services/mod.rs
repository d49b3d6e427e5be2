pub mod cipher_service;
pub mod cloudwatch_services;
pub mod dispatch_fanout;
pub mod notification_services;
pub mod payload_composer;
pub mod presence_oracle;
pub mod push_dispatch_service;
pub mod token_resolver;
