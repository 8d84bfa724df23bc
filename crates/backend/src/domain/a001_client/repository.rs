use chrono::Utc;
use contracts::domain::a001_client::aggregate::{Client, ClientId};
use contracts::domain::common::{BaseAggregate, EntityMetadata, Origin};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_client")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub store_type: String,
    pub location: String,
    pub contact_person: String,
    pub phone: Option<String>,
    pub email: String,
    pub assigned_rep_id: Option<String>,
    pub origin: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Client {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Client {
            base: BaseAggregate::with_metadata(
                ClientId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            store_type: m.store_type,
            location: m.location,
            contact_person: m.contact_person,
            phone: m.phone,
            email: m.email,
            assigned_rep_id: m.assigned_rep_id,
            origin: Origin::from_code(&m.origin).unwrap_or(Origin::App),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Client) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        store_type: Set(aggregate.store_type.clone()),
        location: Set(aggregate.location.clone()),
        contact_person: Set(aggregate.contact_person.clone()),
        phone: Set(aggregate.phone.clone()),
        email: Set(aggregate.email.clone()),
        assigned_rep_id: Set(aggregate.assigned_rep_id.clone()),
        origin: Set(aggregate.origin.as_str().to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Client>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Description)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn list_by_rep(rep_id: &str) -> anyhow::Result<Vec<Client>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::AssignedRepId.eq(rep_id))
        .order_by_asc(Column::Description)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Client>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Client) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

/// Bulk insert in one round trip (CSV import)
pub async fn insert_many(aggregates: &[Client]) -> anyhow::Result<usize> {
    if aggregates.is_empty() {
        return Ok(0);
    }
    let models: Vec<ActiveModel> = aggregates.iter().map(to_active).collect();
    let count = models.len();
    Entity::insert_many(models).exec(conn()).await?;
    Ok(count)
}

pub async fn update(aggregate: &Client) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn count_active() -> anyhow::Result<i64> {
    use sea_orm::PaginatorTrait;
    let count = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .count(conn())
        .await?;
    Ok(count as i64)
}
