pub mod common;

pub mod a001_client;
pub mod a002_call;
pub mod a003_product;
pub mod a004_order;
