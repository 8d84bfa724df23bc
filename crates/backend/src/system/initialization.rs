use anyhow::Result;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;

/// Ensure auth system tables exist (sys_profiles, sys_refresh_tokens, sys_settings)
pub async fn ensure_auth_tables() -> Result<()> {
    let conn = get_connection();

    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS sys_profiles (
            id TEXT PRIMARY KEY NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            display_name TEXT NOT NULL,
            photo_url TEXT,
            role TEXT NOT NULL DEFAULT 'rep',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login_at TEXT
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
            id TEXT PRIMARY KEY NOT NULL,
            profile_id TEXT NOT NULL,
            token_hash TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            revoked_at TEXT
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ];

    for sql in statements {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }

    tracing::info!("Auth system tables ready");

    Ok(())
}

/// Ensure admin profile exists (create if table is empty)
pub async fn ensure_admin_profile_exists() -> Result<()> {
    use crate::system::profiles::{repository, service};
    use contracts::system::profiles::{CreateProfileDto, UserRole};

    let count = repository::count_profiles().await?;

    if count == 0 {
        tracing::info!("No profiles found. Creating default admin profile...");

        let admin_dto = CreateProfileDto {
            email: "admin@vinotrack.app".to_string(),
            password: "admin123".to_string(),
            display_name: "Administrator".to_string(),
            photo_url: None,
        };

        let admin_id = service::create(admin_dto, UserRole::Admin).await?;

        tracing::warn!("═══════════════════════════════════════════════");
        tracing::warn!("  Default admin profile created!");
        tracing::warn!("  Email: admin@vinotrack.app");
        tracing::warn!("  Password: admin123");
        tracing::warn!("  Profile ID: {}", admin_id);
        tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
        tracing::warn!("═══════════════════════════════════════════════");
    }

    Ok(())
}
