use anyhow::Result;
use chrono::Utc;
use contracts::system::profiles::{
    ChangePasswordDto, CreateProfileDto, Profile, RepStats, UpdateProfileDto, UserRole,
};

use super::repository;
use crate::system::auth::password;
use contracts::domain::a001_client::is_valid_email;

/// Create a new profile with the given role
pub async fn create(dto: CreateProfileDto, role: UserRole) -> Result<String> {
    let email = dto.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(anyhow::anyhow!("Email cannot be empty"));
    }
    if !is_valid_email(&email) {
        return Err(anyhow::anyhow!("Invalid email format"));
    }
    if dto.display_name.trim().is_empty() {
        return Err(anyhow::anyhow!("Display name cannot be empty"));
    }

    // Email is the login identity, must be unique
    if repository::get_by_email(&email).await?.is_some() {
        return Err(anyhow::anyhow!("Email already registered"));
    }

    password::validate_password_strength(&dto.password)?;
    let password_hash = password::hash_password(&dto.password)?;

    let profile_id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let profile = Profile {
        id: profile_id.clone(),
        email,
        display_name: dto.display_name,
        photo_url: dto.photo_url,
        role,
        is_active: true,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    repository::create_with_password(&profile, &password_hash).await?;

    Ok(profile_id)
}

/// Update profile (display name, photo, active flag)
pub async fn update(dto: UpdateProfileDto) -> Result<()> {
    let mut profile = repository::get_by_id(&dto.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Profile not found"))?;

    if dto.display_name.trim().is_empty() {
        return Err(anyhow::anyhow!("Display name cannot be empty"));
    }

    profile.display_name = dto.display_name;
    profile.photo_url = dto.photo_url;
    profile.is_active = dto.is_active;
    profile.updated_at = Utc::now().to_rfc3339();

    repository::update(&profile).await?;

    Ok(())
}

pub async fn delete(id: &str) -> Result<bool> {
    repository::delete(id).await
}

pub async fn get_by_id(id: &str) -> Result<Option<Profile>> {
    repository::get_by_id(id).await
}

pub async fn list_all(role: Option<UserRole>) -> Result<Vec<Profile>> {
    repository::list_all(role).await
}

/// Reps with activity counts for the admin panel
pub async fn list_rep_stats() -> Result<Vec<RepStats>> {
    repository::list_rep_stats().await
}

/// Change profile password
///
/// Self-change verifies the old password; admin can change anyone's without it.
pub async fn change_password(dto: ChangePasswordDto, requester_id: &str) -> Result<()> {
    repository::get_by_id(&dto.profile_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Profile not found"))?;

    let requester = repository::get_by_id(requester_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Requester not found"))?;

    if dto.profile_id != requester_id {
        if requester.role != UserRole::Admin {
            return Err(anyhow::anyhow!("Permission denied"));
        }
        // Admin can change without old password
    } else {
        let old_password = dto
            .old_password
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Old password is required"))?;
        let current_hash = repository::get_password_hash(&dto.profile_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

        if !password::verify_password(old_password, &current_hash)? {
            return Err(anyhow::anyhow!("Invalid old password"));
        }
    }

    password::validate_password_strength(&dto.new_password)?;
    let new_hash = password::hash_password(&dto.new_password)?;
    repository::update_password(&dto.profile_id, &new_hash).await?;

    Ok(())
}

/// Verify credentials by email (for login)
pub async fn verify_credentials(email: &str, password_input: &str) -> Result<Option<Profile>> {
    let email = email.trim().to_lowercase();
    let profile = match repository::get_by_email(&email).await? {
        Some(p) => p,
        None => return Ok(None),
    };

    if !profile.is_active {
        return Err(anyhow::anyhow!("Account is inactive"));
    }

    let password_hash = repository::get_password_hash(&profile.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(password_input, &password_hash)? {
        return Ok(None);
    }

    let _ = repository::update_last_login(&profile.id).await;

    Ok(Some(profile))
}
