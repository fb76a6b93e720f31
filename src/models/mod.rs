pub mod aggregate;
pub mod attendance;
pub mod dashboard;
pub mod filter;
pub mod zone;
