pub mod api;
pub mod config;
pub mod constants;
pub mod parser;
pub mod portal;
pub mod schedule;
pub mod schema;
pub mod session_store;
