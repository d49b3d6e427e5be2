pub mod database;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state_machine;
pub mod utilities;
