use anyhow::Result;
use chrono::Utc;
use contracts::system::users::{CreateUserDto, User};

use super::repository;
use crate::shared::error::ServiceError;
use crate::system::auth::password;

pub async fn create(dto: CreateUserDto) -> Result<String> {
    let username = dto.username.trim().to_string();
    if username.is_empty() {
        return Err(ServiceError::Validation("Username cannot be empty".into()).into());
    }

    if repository::get_by_username(&username).await?.is_some() {
        return Err(ServiceError::Conflict(format!("Username '{}' already exists", username)).into());
    }

    password::validate_password_strength(&dto.password)
        .map_err(|e| ServiceError::Validation(e.to_string()))?;
    let password_hash = password::hash_password(&dto.password)?;

    let user_id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();
    let user = User {
        id: user_id.clone(),
        username,
        full_name: dto.full_name.filter(|n| !n.trim().is_empty()),
        role: dto.role,
        is_active: true,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    repository::create_with_password(&user, &password_hash).await?;
    tracing::info!("Created user {} ({})", user.username, user.role.as_str());

    Ok(user_id)
}

pub async fn delete(id: &str) -> Result<bool> {
    repository::delete(id).await
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<User>> {
    repository::list_all().await
}

/// `None` for an unknown user, a wrong password or an inactive account
pub async fn verify_credentials(username: &str, password: &str) -> Result<Option<User>> {
    let user = match repository::get_by_username(username).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        tracing::warn!("Login attempt for inactive user {}", user.username);
        return Ok(None);
    }

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(password, &password_hash)? {
        return Ok(None);
    }

    if let Err(e) = repository::update_last_login(&user.id).await {
        tracing::warn!("Failed to record login for {}: {}", user.username, e);
    }

    Ok(Some(user))
}
