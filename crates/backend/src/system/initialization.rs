use anyhow::Result;
use contracts::system::auth::Role;
use contracts::system::users::CreateUserDto;

use crate::domain::a004_dining_table;
use crate::shared::config::FloorConfig;
use crate::system::users::{repository, service};

/// Creates `admin`/`admin` when the users table is empty
pub async fn ensure_admin_user_exists() -> Result<()> {
    if repository::count_users().await? > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");
    let admin_id = service::create(CreateUserDto {
        username: "admin".to_string(),
        password: "admin".to_string(),
        full_name: Some("Administrator".to_string()),
        role: Role::Admin,
    })
    .await?;

    tracing::warn!("Default admin user created (id {})", admin_id);
    tracing::warn!("Username: admin, password: admin. Change it before service.");
    Ok(())
}

/// Seeds the dining room from `[floor]` when no tables exist yet
pub async fn ensure_tables_exist(floor: &FloorConfig) -> Result<()> {
    let seeded = a004_dining_table::service::seed_if_empty(floor).await?;
    if seeded > 0 {
        tracing::info!("Seeded {} dining tables", seeded);
    }
    Ok(())
}
