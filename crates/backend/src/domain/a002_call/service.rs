use super::repository;
use chrono::{Duration, TimeZone, Utc};
use contracts::domain::a002_call::aggregate::{Call, CallDto, CompleteCallDto};
use uuid::Uuid;

/// Запланировать визит (админ указывает представителя явно)
pub async fn schedule(dto: CallDto) -> anyhow::Result<Uuid> {
    let rep_id = dto
        .rep_id
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Rep is required"))?;
    let scheduled_at = dto
        .scheduled_at
        .ok_or_else(|| anyhow::anyhow!("Scheduled date is required"))?;

    let mut aggregate = Call::new_for_insert(
        format!("CALL-{}", Uuid::new_v4()),
        rep_id,
        dto.client_id,
        scheduled_at,
        dto.notes,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Визиты текущего представителя за сегодняшний день (UTC), по возрастанию
pub async fn today(rep_id: &str) -> anyhow::Result<Vec<Call>> {
    let now = Utc::now();
    let day_start = Utc
        .from_utc_datetime(&now.date_naive().and_hms_opt(0, 0, 0).unwrap_or_default());
    let day_end = day_start + Duration::days(1);
    repository::list_by_rep_between(rep_id, day_start, day_end).await
}

pub async fn list_my(rep_id: &str) -> anyhow::Result<Vec<Call>> {
    repository::list_by_rep(rep_id).await
}

/// Предыдущий завершённый визит к клиенту (последний строго до текущего момента)
pub async fn previous_visit(client_id: &str) -> anyhow::Result<Option<Call>> {
    repository::last_completed_before(client_id, Utc::now()).await
}

/// Отметить существующий визит как завершённый
pub async fn log_visit(id: Uuid, rep_id: &str, dto: CompleteCallDto) -> anyhow::Result<()> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    if aggregate.rep_id != rep_id {
        return Err(anyhow::anyhow!("Call belongs to another rep"));
    }

    aggregate.complete(dto.outcomes, dto.notes, dto.duration_minutes);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Зафиксировать внеплановый визит: создаётся сразу завершённым,
/// с текущим временем в качестве запланированного
pub async fn log_adhoc_visit(
    rep_id: &str,
    client_id: &str,
    dto: CompleteCallDto,
) -> anyhow::Result<Uuid> {
    let mut aggregate = Call::new_for_insert(
        format!("CALL-{}", Uuid::new_v4()),
        rep_id.to_string(),
        client_id.to_string(),
        Utc::now(),
        None,
    );
    aggregate.complete(dto.outcomes, dto.notes, dto.duration_minutes);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}
