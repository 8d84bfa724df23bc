use anyhow::{Context, Result};
use contracts::system::profiles::{Profile, RepStats, UserRole};
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::db::get_connection;

fn profile_from_row(row: &QueryResult) -> Result<Profile> {
    let role_code: String = row.try_get("", "role")?;
    Ok(Profile {
        id: row.try_get("", "id")?,
        email: row.try_get("", "email")?,
        display_name: row.try_get("", "display_name")?,
        photo_url: row.try_get("", "photo_url")?,
        role: UserRole::from_code(&role_code)
            .ok_or_else(|| anyhow::anyhow!("Unknown role: {}", role_code))?,
        is_active: row.try_get::<i32>("", "is_active")? != 0,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
        last_login_at: row.try_get("", "last_login_at")?,
    })
}

const PROFILE_COLUMNS: &str =
    "id, email, display_name, photo_url, role, is_active, created_at, updated_at, last_login_at";

/// Create profile with password hash
pub async fn create_with_password(profile: &Profile, password_hash: &str) -> Result<()> {
    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_profiles (id, email, password_hash, display_name, photo_url, role, is_active, created_at, updated_at, last_login_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        [
            profile.id.clone().into(),
            profile.email.clone().into(),
            password_hash.to_string().into(),
            profile.display_name.clone().into(),
            profile.photo_url.clone().into(),
            profile.role.as_str().into(),
            (if profile.is_active { 1 } else { 0 }).into(),
            profile.created_at.clone().into(),
            profile.updated_at.clone().into(),
            profile.last_login_at.clone().into(),
        ],
    ))
    .await
    .context("Failed to insert profile")?;

    Ok(())
}

/// Get profile by ID
pub async fn get_by_id(id: &str) -> Result<Option<Profile>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {} FROM sys_profiles WHERE id = ?", PROFILE_COLUMNS),
            [id.into()],
        ))
        .await?;

    result.as_ref().map(profile_from_row).transpose()
}

/// Get profile by email (login identity)
pub async fn get_by_email(email: &str) -> Result<Option<Profile>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {} FROM sys_profiles WHERE email = ?",
                PROFILE_COLUMNS
            ),
            [email.into()],
        ))
        .await?;

    result.as_ref().map(profile_from_row).transpose()
}

/// Get password hash for profile
pub async fn get_password_hash(profile_id: &str) -> Result<Option<String>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT password_hash FROM sys_profiles WHERE id = ?",
            [profile_id.into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let hash: String = row.try_get("", "password_hash")?;
            Ok(Some(hash))
        }
        None => Ok(None),
    }
}

/// List profiles, optionally filtered by role
pub async fn list_all(role: Option<UserRole>) -> Result<Vec<Profile>> {
    let conn = get_connection();

    let rows = match role {
        Some(role) => {
            conn.query_all(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                &format!(
                    "SELECT {} FROM sys_profiles WHERE role = ? ORDER BY created_at ASC",
                    PROFILE_COLUMNS
                ),
                [role.as_str().into()],
            ))
            .await?
        }
        None => {
            conn.query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                format!(
                    "SELECT {} FROM sys_profiles ORDER BY created_at ASC",
                    PROFILE_COLUMNS
                ),
            ))
            .await?
        }
    };

    rows.iter().map(profile_from_row).collect()
}

/// Update profile
pub async fn update(profile: &Profile) -> Result<()> {
    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_profiles \
         SET display_name = ?, photo_url = ?, is_active = ?, updated_at = ? \
         WHERE id = ?",
        [
            profile.display_name.clone().into(),
            profile.photo_url.clone().into(),
            (if profile.is_active { 1 } else { 0 }).into(),
            profile.updated_at.clone().into(),
            profile.id.clone().into(),
        ],
    ))
    .await
    .context("Failed to update profile")?;

    Ok(())
}

/// Delete profile (hard delete)
pub async fn delete(id: &str) -> Result<bool> {
    let conn = get_connection();

    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM sys_profiles WHERE id = ?",
            [id.into()],
        ))
        .await
        .context("Failed to delete profile")?;

    Ok(result.rows_affected() > 0)
}

/// Update last login timestamp
pub async fn update_last_login(id: &str) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_profiles SET last_login_at = ? WHERE id = ?",
        [now.into(), id.to_string().into()],
    ))
    .await
    .context("Failed to update last login")?;

    Ok(())
}

/// Count total profiles
pub async fn count_profiles() -> Result<usize> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) as count FROM sys_profiles".to_string(),
        ))
        .await?;

    match result {
        Some(row) => {
            let count: i64 = row.try_get("", "count")?;
            Ok(count as usize)
        }
        None => Ok(0),
    }
}

/// Count active profiles with the given role
pub async fn count_by_role(role: UserRole) -> Result<i64> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) as count FROM sys_profiles WHERE role = ? AND is_active = 1",
            [role.as_str().into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let count: i64 = row.try_get("", "count")?;
            Ok(count)
        }
        None => Ok(0),
    }
}

/// Update profile password
pub async fn update_password(id: &str, password_hash: &str) -> Result<()> {
    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_profiles SET password_hash = ?, updated_at = ? WHERE id = ?",
        [
            password_hash.to_string().into(),
            chrono::Utc::now().to_rfc3339().into(),
            id.to_string().into(),
        ],
    ))
    .await
    .context("Failed to update password")?;

    Ok(())
}

/// List reps with their client/call/order counts
pub async fn list_rep_stats() -> Result<Vec<RepStats>> {
    let conn = get_connection();

    let rows = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!(
                "SELECT {}, \
                 (SELECT COUNT(*) FROM a001_client c WHERE c.assigned_rep_id = p.id AND c.is_deleted = 0) AS client_count, \
                 (SELECT COUNT(*) FROM a002_call v WHERE v.rep_id = p.id AND v.is_deleted = 0) AS call_count, \
                 (SELECT COUNT(*) FROM a004_order o WHERE o.rep_id = p.id AND o.is_deleted = 0) AS order_count \
                 FROM sys_profiles p WHERE p.role = 'rep' ORDER BY p.created_at ASC",
                PROFILE_COLUMNS
                    .split(", ")
                    .map(|c| format!("p.{}", c))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ))
        .await?;

    let mut stats = Vec::new();
    for row in &rows {
        stats.push(RepStats {
            profile: profile_from_row(row)?,
            client_count: row.try_get("", "client_count")?,
            call_count: row.try_get("", "call_count")?,
            order_count: row.try_get("", "order_count")?,
        });
    }

    Ok(stats)
}
