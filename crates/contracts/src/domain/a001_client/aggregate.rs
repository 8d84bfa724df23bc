use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub Uuid);

impl ClientId {
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

impl AggregateId for ClientId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ClientId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Клиент (торговая точка): магазин, ресторан, бар и т.д.
///
/// `base.description` содержит название точки.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(flatten)]
    pub base: BaseAggregate<ClientId>,

    #[serde(rename = "storeType")]
    pub store_type: String,

    pub location: String,

    #[serde(rename = "contactPerson")]
    pub contact_person: String,

    pub phone: Option<String>,

    pub email: String,

    /// ID закреплённого торгового представителя
    #[serde(rename = "assignedRepId")]
    pub assigned_rep_id: Option<String>,

    /// Источник записи: приложение или CSV-импорт
    pub origin: Origin,
}

impl Client {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        name: String,
        store_type: String,
        location: String,
        contact_person: String,
        phone: Option<String>,
        email: String,
        assigned_rep_id: Option<String>,
        origin: Origin,
    ) -> Self {
        Self {
            base: BaseAggregate::new(ClientId::new_v4(), code, name),
            store_type,
            location,
            contact_person,
            phone,
            email,
            assigned_rep_id,
            origin,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn update(&mut self, dto: &ClientDto) {
        self.base.description = dto.name.clone();
        self.base.comment = dto.comment.clone();
        self.store_type = dto.store_type.clone();
        self.location = dto.location.clone();
        self.contact_person = dto.contact_person.clone();
        self.phone = dto.phone.clone();
        self.email = dto.email.clone();
        self.assigned_rep_id = dto.assigned_rep_id.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название не может быть пустым".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.email.trim().is_empty() {
            return Err("Email не может быть пустым".into());
        }
        if !super::import::is_valid_email(self.email.trim()) {
            return Err("Некорректный формат email".into());
        }
        if self.store_type.trim().is_empty() {
            return Err("Тип точки не может быть пустым".into());
        }
        if self.location.trim().is_empty() {
            return Err("Адрес не может быть пустым".into());
        }
        if self.contact_person.trim().is_empty() {
            return Err("Контактное лицо не может быть пустым".into());
        }
        if let Some(phone) = &self.phone {
            if !phone.trim().is_empty() && !super::import::is_valid_phone(phone.trim()) {
                return Err("Некорректный формат телефона".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Client {
    type Id = ClientId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "client"
    }

    fn element_name() -> &'static str {
        "Клиент"
    }

    fn list_name() -> &'static str {
        "Клиенты"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: String,
    #[serde(rename = "storeType")]
    pub store_type: String,
    pub location: String,
    #[serde(rename = "contactPerson")]
    pub contact_person: String,
    pub phone: Option<String>,
    pub email: String,
    #[serde(rename = "assignedRepId")]
    pub assigned_rep_id: Option<String>,
    pub comment: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}
