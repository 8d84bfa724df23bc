//! Общие типы (contracts) для backend и клиентов API VinoTrack.

pub mod dashboards;
pub mod domain;
pub mod system;
