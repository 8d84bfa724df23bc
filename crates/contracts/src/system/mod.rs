pub mod auth;
pub mod profiles;
