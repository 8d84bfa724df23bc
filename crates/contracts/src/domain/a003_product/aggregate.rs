use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
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

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Товар (вино) каталога
///
/// `base.description` содержит название вина.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductId>,

    /// Год урожая ("2018", "NV" для невинтажных)
    pub vintage: String,

    /// Цена за кейс
    #[serde(rename = "pricePerCase")]
    pub price_per_case: f64,

    /// Дегустационные заметки
    #[serde(rename = "tastingNotes", default)]
    pub tasting_notes: String,

    pub category: String,

    #[serde(rename = "inStock", default)]
    pub in_stock: bool,

    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        name: String,
        vintage: String,
        price_per_case: f64,
        tasting_notes: String,
        category: String,
        in_stock: bool,
        image_url: Option<String>,
    ) -> Self {
        Self {
            base: BaseAggregate::new(ProductId::new_v4(), code, name),
            vintage,
            price_per_case,
            tasting_notes,
            category,
            in_stock,
            image_url,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn update(&mut self, dto: &ProductDto) {
        self.base.description = dto.name.clone();
        self.base.comment = dto.comment.clone();
        self.vintage = dto.vintage.clone();
        self.price_per_case = dto.price_per_case;
        self.tasting_notes = dto.tasting_notes.clone().unwrap_or_default();
        self.category = dto.category.clone();
        self.in_stock = dto.in_stock;
        self.image_url = dto.image_url.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название не может быть пустым".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.price_per_case < 0.0 {
            return Err("Цена не может быть отрицательной".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Товар"
    }

    fn list_name() -> &'static str {
        "Товары"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: String,
    pub vintage: String,
    #[serde(rename = "pricePerCase")]
    pub price_per_case: f64,
    #[serde(rename = "tastingNotes")]
    pub tasting_notes: Option<String>,
    pub category: String,
    #[serde(rename = "inStock", default)]
    pub in_stock: bool,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub comment: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}
