pub mod presence_repository;
pub mod user_directory;
