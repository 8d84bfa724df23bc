use serde::{Deserialize, Serialize};

/// Сводка для административной панели
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSummary {
    #[serde(rename = "totalReps")]
    pub total_reps: i64,
    #[serde(rename = "activeClients")]
    pub active_clients: i64,
    #[serde(rename = "callsThisMonth")]
    pub calls_this_month: i64,
    #[serde(rename = "pendingOrders")]
    pub pending_orders: i64,
}
