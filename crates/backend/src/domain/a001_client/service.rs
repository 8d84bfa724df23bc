use super::{csv_import, repository};
use contracts::domain::a001_client::aggregate::{Client, ClientDto};
use contracts::domain::a001_client::{ClientImportResult, ValidationError};
use contracts::domain::common::Origin;
use contracts::system::profiles::UserRole;
use uuid::Uuid;

pub async fn create(dto: ClientDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("CLT-{}", Uuid::new_v4()));
    let mut aggregate = Client::new_for_insert(
        code,
        dto.name.clone(),
        dto.store_type.clone(),
        dto.location.clone(),
        dto.contact_person.clone(),
        dto.phone.clone(),
        dto.email.clone(),
        dto.assigned_rep_id.clone(),
        Origin::App,
    );
    aggregate.base.comment = dto.comment;

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: ClientDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Client>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Client>> {
    repository::list_all().await
}

/// Клиенты представителя с поиском по подстроке
///
/// Поиск без учёта регистра по названию, email, адресу,
/// контактному лицу и типу точки.
pub async fn list_my(rep_id: &str, search: Option<&str>) -> anyhow::Result<Vec<Client>> {
    let clients = repository::list_by_rep(rep_id).await?;

    let term = match search.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => return Ok(clients),
    };

    Ok(clients
        .into_iter()
        .filter(|c| {
            c.base.description.to_lowercase().contains(&term)
                || c.email.to_lowercase().contains(&term)
                || c.location.to_lowercase().contains(&term)
                || c.contact_person.to_lowercase().contains(&term)
                || c.store_type.to_lowercase().contains(&term)
        })
        .collect())
}

/// Массовый импорт клиентов из CSV
///
/// Ошибки уровня файла не прерывают ответ: они возвращаются одной
/// синтетической ошибкой (row 0, field "file") с нулевым счётчиком.
pub async fn import_csv(text: &str) -> anyhow::Result<ClientImportResult> {
    let reps = crate::system::profiles::service::list_all(Some(UserRole::Rep)).await?;
    let available_reps: Vec<String> = reps
        .into_iter()
        .filter(|p| p.is_active)
        .map(|p| p.id)
        .collect();

    let parsed = match csv_import::process(text, &available_reps) {
        Ok(parsed) => parsed,
        Err(err) => {
            return Ok(ClientImportResult {
                success_count: 0,
                errors: vec![ValidationError::for_file(&err.to_string())],
            });
        }
    };

    let mut aggregates = Vec::with_capacity(parsed.records.len());
    for record in &parsed.records {
        let mut aggregate = Client::new_for_insert(
            format!("CLT-{}", Uuid::new_v4()),
            record.row.name.clone(),
            record.row.store_type.clone(),
            record.row.location.clone(),
            record.row.contact_person.clone(),
            record.row.phone.clone(),
            record.row.email.clone(),
            Some(record.rep_id.clone()),
            Origin::CsvImport,
        );
        aggregate.before_write();
        aggregates.push(aggregate);
    }

    let success_count = repository::insert_many(&aggregates).await?;

    tracing::info!(
        "CSV import: {} clients inserted, {} validation errors",
        success_count,
        parsed.errors.len()
    );

    Ok(ClientImportResult {
        success_count,
        errors: parsed.errors,
    })
}
