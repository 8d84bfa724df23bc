use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Допустимые итоги визита для отметки при завершении звонка
pub const AVAILABLE_OUTCOMES: [&str; 10] = [
    "Order Placed",
    "Sample Left",
    "Brochure Left",
    "Price List Updated",
    "Menu Reviewed",
    "Follow-up Scheduled",
    "Promotional Materials Left",
    "No Interest",
    "Competitor Present",
    "Decision Pending",
];

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub Uuid);

impl CallId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CallId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CallId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Status
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Pending => "pending",
            CallStatus::Completed => "completed",
            CallStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(CallStatus::Pending),
            "completed" => Some(CallStatus::Completed),
            "cancelled" => Some(CallStatus::Cancelled),
            _ => None,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Визит (звонок) торгового представителя к клиенту
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    #[serde(flatten)]
    pub base: BaseAggregate<CallId>,

    #[serde(rename = "repId")]
    pub rep_id: String,

    #[serde(rename = "clientId")]
    pub client_id: String,

    /// Запланированная дата и время визита
    #[serde(rename = "scheduledAt")]
    pub scheduled_at: chrono::DateTime<chrono::Utc>,

    /// Фактическая длительность в минутах
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: Option<i32>,

    pub notes: Option<String>,

    pub status: CallStatus,

    /// Итоги визита из списка AVAILABLE_OUTCOMES
    #[serde(default)]
    pub outcomes: Vec<String>,
}

impl Call {
    pub fn new_for_insert(
        code: String,
        rep_id: String,
        client_id: String,
        scheduled_at: chrono::DateTime<chrono::Utc>,
        notes: Option<String>,
    ) -> Self {
        Self {
            base: BaseAggregate::new(CallId::new_v4(), code.clone(), code),
            rep_id,
            client_id,
            scheduled_at,
            duration_minutes: None,
            notes,
            status: CallStatus::Pending,
            outcomes: Vec::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Завершить визит с итогами
    pub fn complete(&mut self, outcomes: Vec<String>, notes: Option<String>, duration: Option<i32>) {
        self.status = CallStatus::Completed;
        self.outcomes = outcomes;
        if notes.is_some() {
            self.notes = notes;
        }
        self.duration_minutes = duration;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.rep_id.trim().is_empty() {
            return Err("Не указан торговый представитель".into());
        }
        if self.client_id.trim().is_empty() {
            return Err("Не указан клиент".into());
        }
        for outcome in &self.outcomes {
            if !AVAILABLE_OUTCOMES.contains(&outcome.as_str()) {
                return Err(format!("Недопустимый итог визита: {}", outcome));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Call {
    type Id = CallId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "call"
    }

    fn element_name() -> &'static str {
        "Визит"
    }

    fn list_name() -> &'static str {
        "Визиты"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CallDto {
    pub id: Option<String>,
    #[serde(rename = "repId")]
    pub rep_id: Option<String>,
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "scheduledAt")]
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub notes: Option<String>,
}

/// DTO завершения визита
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompleteCallDto {
    #[serde(default)]
    pub outcomes: Vec<String>,
    pub notes: Option<String>,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: Option<i32>,
}

/// DTO внепланового визита (создаётся сразу завершённым)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdHocVisitDto {
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(default)]
    pub outcomes: Vec<String>,
    pub notes: Option<String>,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: Option<i32>,
}
