use anyhow::{Context, Result};
use contracts::system::auth::Role;
use contracts::system::users::User;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::db::get_connection;

const USER_COLUMNS: &str =
    "id, username, full_name, role, is_active, created_at, updated_at, last_login_at";

fn user_from_row(row: &QueryResult) -> Result<User> {
    Ok(User {
        id: row.try_get("", "id")?,
        username: row.try_get("", "username")?,
        full_name: row.try_get("", "full_name")?,
        role: Role::parse(&row.try_get::<String>("", "role")?),
        is_active: row.try_get::<i32>("", "is_active")? != 0,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
        last_login_at: row.try_get("", "last_login_at")?,
    })
}

pub async fn create_with_password(user: &User, password_hash: &str) -> Result<()> {
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_users (id, username, password_hash, full_name, role, is_active, created_at, updated_at, last_login_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            [
                user.id.clone().into(),
                user.username.clone().into(),
                password_hash.to_string().into(),
                user.full_name.clone().into(),
                user.role.as_str().into(),
                (if user.is_active { 1 } else { 0 }).into(),
                user.created_at.clone().into(),
                user.updated_at.clone().into(),
                user.last_login_at.clone().into(),
            ],
        ))
        .await
        .context("Failed to insert user")?;
    Ok(())
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {} FROM sys_users WHERE id = ?", USER_COLUMNS),
            [id.into()],
        ))
        .await?;
    row.as_ref().map(user_from_row).transpose()
}

/// Usernames match case-insensitively
pub async fn get_by_username(username: &str) -> Result<Option<User>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "SELECT {} FROM sys_users WHERE lower(username) = lower(?)",
                USER_COLUMNS
            ),
            [username.trim().into()],
        ))
        .await?;
    row.as_ref().map(user_from_row).transpose()
}

pub async fn get_password_hash(user_id: &str) -> Result<Option<String>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT password_hash FROM sys_users WHERE id = ?",
            [user_id.into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("", "password_hash")?)),
        None => Ok(None),
    }
}

pub async fn list_all() -> Result<Vec<User>> {
    let rows = get_connection()
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("SELECT {} FROM sys_users ORDER BY username", USER_COLUMNS),
        ))
        .await?;
    rows.iter().map(user_from_row).collect()
}

pub async fn delete(id: &str) -> Result<bool> {
    let result = get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM sys_users WHERE id = ?",
            [id.into()],
        ))
        .await
        .context("Failed to delete user")?;
    Ok(result.rows_affected() > 0)
}

pub async fn update_last_login(id: &str) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_users SET last_login_at = ? WHERE id = ?",
            [now.into(), id.to_string().into()],
        ))
        .await
        .context("Failed to update last login")?;
    Ok(())
}

pub async fn count_users() -> Result<usize> {
    let row = get_connection()
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) as count FROM sys_users".to_string(),
        ))
        .await?;

    match row {
        Some(row) => {
            let count: i64 = row.try_get("", "count")?;
            Ok(count as usize)
        }
        None => Ok(0),
    }
}
