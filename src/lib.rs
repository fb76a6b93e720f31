pub mod config;
pub mod errors;
pub mod feed;
pub mod handlers;
pub mod models;
pub mod state;
pub mod store;
pub mod templates_structs;
