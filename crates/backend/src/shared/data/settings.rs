//! Key/value rows in `sys_settings`.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use super::db::get_connection;

pub async fn get(key: &str) -> Result<Option<String>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [key.into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("", "value")?)),
        None => Ok(None),
    }
}

pub async fn set(key: &str, value: &str, description: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_settings (key, value, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            [
                key.into(),
                value.into(),
                description.into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await?;
    Ok(())
}

pub async fn get_bool(key: &str) -> Result<bool> {
    Ok(matches!(get(key).await?.as_deref(), Some("true")))
}
