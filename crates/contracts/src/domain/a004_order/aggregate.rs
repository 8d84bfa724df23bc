use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
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

impl AggregateId for OrderId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(OrderId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Status
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

// ============================================================================
// Order Item
// ============================================================================
/// Строка заказа
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub quantity: i64,
    /// Цена за кейс на момент заказа
    #[serde(rename = "pricePerCase")]
    pub price_per_case: f64,
    #[serde(rename = "lineTotal")]
    pub line_total: f64,
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Заказ клиента, оформленный торговым представителем
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(flatten)]
    pub base: BaseAggregate<OrderId>,

    #[serde(rename = "repId")]
    pub rep_id: String,

    #[serde(rename = "clientId")]
    pub client_id: String,

    pub status: OrderStatus,

    pub subtotal: f64,

    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn new_for_insert(
        code: String,
        rep_id: String,
        client_id: String,
        items: Vec<OrderItem>,
    ) -> Self {
        let subtotal = items.iter().map(|i| i.line_total).sum();
        Self {
            base: BaseAggregate::new(OrderId::new_v4(), code.clone(), code),
            rep_id,
            client_id,
            status: OrderStatus::Pending,
            subtotal,
            items,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
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
        if self.items.is_empty() {
            return Err("Заказ не может быть пустым".into());
        }
        for item in &self.items {
            if item.quantity <= 0 {
                return Err("Количество должно быть положительным".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Order {
    type Id = OrderId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "order"
    }

    fn element_name() -> &'static str {
        "Заказ"
    }

    fn list_name() -> &'static str {
        "Заказы"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrderItemDto {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrderDto {
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(default)]
    pub items: Vec<OrderItemDto>,
}
