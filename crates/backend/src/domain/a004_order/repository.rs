use chrono::Utc;
use contracts::domain::a004_order::aggregate::{Order, OrderId, OrderItem, OrderStatus};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub rep_id: String,
    pub client_id: String,
    pub status: String,
    pub subtotal: f64,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Строки заказа (отдельная таблица)
pub mod item {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a004_order_item")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub order_id: String,
        pub product_id: String,
        pub quantity: i64,
        pub price_per_case: f64,
        pub line_total: f64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn header_from_model(m: Model, items: Vec<OrderItem>) -> Order {
    let metadata = EntityMetadata {
        created_at: m.created_at.unwrap_or_else(Utc::now),
        updated_at: m.updated_at.unwrap_or_else(Utc::now),
        is_deleted: m.is_deleted,
        version: m.version,
    };
    let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

    Order {
        base: BaseAggregate::with_metadata(
            OrderId(uuid),
            m.code,
            m.description,
            m.comment.clone(),
            metadata,
        ),
        rep_id: m.rep_id,
        client_id: m.client_id,
        status: OrderStatus::from_code(&m.status).unwrap_or(OrderStatus::Pending),
        subtotal: m.subtotal,
        items,
    }
}

fn item_from_model(m: item::Model) -> OrderItem {
    OrderItem {
        product_id: m.product_id,
        quantity: m.quantity,
        price_per_case: m.price_per_case,
        line_total: m.line_total,
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Записать заголовок заказа и его строки одной транзакцией
pub async fn insert_with_items(aggregate: &Order) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let txn = conn().begin().await?;

    let header = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        rep_id: Set(aggregate.rep_id.clone()),
        client_id: Set(aggregate.client_id.clone()),
        status: Set(aggregate.status.as_str().to_string()),
        subtotal: Set(aggregate.subtotal),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    header.insert(&txn).await?;

    let items: Vec<item::ActiveModel> = aggregate
        .items
        .iter()
        .map(|line| item::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            order_id: Set(uuid.to_string()),
            product_id: Set(line.product_id.clone()),
            quantity: Set(line.quantity),
            price_per_case: Set(line.price_per_case),
            line_total: Set(line.line_total),
        })
        .collect();
    item::Entity::insert_many(items).exec(&txn).await?;

    txn.commit().await?;
    Ok(uuid)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Order>> {
    let header = Entity::find_by_id(id.to_string()).one(conn()).await?;
    let Some(header) = header else {
        return Ok(None);
    };

    let items = item::Entity::find()
        .filter(item::Column::OrderId.eq(id.to_string()))
        .order_by_asc(item::Column::ProductId)
        .all(conn())
        .await?
        .into_iter()
        .map(item_from_model)
        .collect();

    Ok(Some(header_from_model(header, items)))
}

/// Заказы представителя, новые сверху, без строк
pub async fn list_by_rep(rep_id: &str) -> anyhow::Result<Vec<Order>> {
    let headers = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::RepId.eq(rep_id))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?;
    Ok(headers
        .into_iter()
        .map(|m| header_from_model(m, Vec::new()))
        .collect())
}

pub async fn count_by_status(status: OrderStatus) -> anyhow::Result<i64> {
    use sea_orm::PaginatorTrait;
    let count = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::Status.eq(status.as_str()))
        .count(conn())
        .await?;
    Ok(count as i64)
}
