use chrono::Utc;
use contracts::domain::a002_call::aggregate::{Call, CallId, CallStatus};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_call")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub rep_id: String,
    pub client_id: String,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
    pub status: String,
    /// Итоги визита, JSON-массив строк
    pub outcomes: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Call {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Call {
            base: BaseAggregate::with_metadata(
                CallId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            rep_id: m.rep_id,
            client_id: m.client_id,
            scheduled_at: m.scheduled_at,
            duration_minutes: m.duration_minutes,
            notes: m.notes,
            status: CallStatus::from_code(&m.status).unwrap_or(CallStatus::Pending),
            outcomes: serde_json::from_str(&m.outcomes).unwrap_or_default(),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Call) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        rep_id: Set(aggregate.rep_id.clone()),
        client_id: Set(aggregate.client_id.clone()),
        scheduled_at: Set(aggregate.scheduled_at),
        duration_minutes: Set(aggregate.duration_minutes),
        notes: Set(aggregate.notes.clone()),
        status: Set(aggregate.status.as_str().to_string()),
        outcomes: Set(serde_json::to_string(&aggregate.outcomes)?),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    })
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Call>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Call) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate)?.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Call) -> anyhow::Result<()> {
    let mut active = to_active(aggregate)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn list_by_rep(rep_id: &str) -> anyhow::Result<Vec<Call>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::RepId.eq(rep_id))
        .order_by_desc(Column::ScheduledAt)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

/// Визиты представителя в заданном окне времени, по возрастанию
pub async fn list_by_rep_between(
    rep_id: &str,
    from: chrono::DateTime<chrono::Utc>,
    to: chrono::DateTime<chrono::Utc>,
) -> anyhow::Result<Vec<Call>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::RepId.eq(rep_id))
        .filter(Column::ScheduledAt.gte(from))
        .filter(Column::ScheduledAt.lt(to))
        .order_by_asc(Column::ScheduledAt)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

/// Последний завершённый визит к клиенту строго до указанного момента
pub async fn last_completed_before(
    client_id: &str,
    before: chrono::DateTime<chrono::Utc>,
) -> anyhow::Result<Option<Call>> {
    let item = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::ClientId.eq(client_id))
        .filter(Column::Status.eq(CallStatus::Completed.as_str()))
        .filter(Column::ScheduledAt.lt(before))
        .order_by_desc(Column::ScheduledAt)
        .one(conn())
        .await?;
    Ok(item.map(Into::into))
}

pub async fn count_between(
    from: chrono::DateTime<chrono::Utc>,
    to: chrono::DateTime<chrono::Utc>,
) -> anyhow::Result<i64> {
    use sea_orm::PaginatorTrait;
    let count = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::ScheduledAt.gte(from))
        .filter(Column::ScheduledAt.lt(to))
        .count(conn())
        .await?;
    Ok(count as i64)
}
