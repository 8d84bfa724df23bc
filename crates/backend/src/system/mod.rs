pub mod auth;
pub mod handlers;
pub mod initialization;
pub mod profiles;
pub mod tracing;
