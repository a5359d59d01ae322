use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Schema bootstrap, applied on every start
const SCHEMA: &[(&str, &str)] = &[
    (
        "sys_settings",
        r#"
        CREATE TABLE IF NOT EXISTS sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "sys_users",
        r#"
        CREATE TABLE IF NOT EXISTS sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            full_name TEXT,
            role TEXT NOT NULL DEFAULT 'staff',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login_at TEXT
        );
        "#,
    ),
    (
        "sys_refresh_tokens",
        r#"
        CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            token_hash TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            revoked_at TEXT
        );
        "#,
    ),
    (
        "a001_menu_category",
        r#"
        CREATE TABLE IF NOT EXISTS a001_menu_category (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            kind TEXT NOT NULL DEFAULT 'meal',
            icon TEXT NOT NULL DEFAULT '',
            sort_order INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a002_meal",
        r#"
        CREATE TABLE IF NOT EXISTS a002_meal (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            price REAL NOT NULL DEFAULT 0,
            category TEXT NOT NULL DEFAULT 'meals',
            allergens TEXT NOT NULL DEFAULT 'None',
            calories INTEGER,
            ingredients_json TEXT NOT NULL DEFAULT '[]',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a003_stock_item",
        r#"
        CREATE TABLE IF NOT EXISTS a003_stock_item (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            quantity REAL NOT NULL DEFAULT 0,
            unit TEXT NOT NULL DEFAULT '',
            price REAL NOT NULL DEFAULT 0,
            calories_per_100g REAL,
            allergens TEXT NOT NULL DEFAULT 'None',
            minimum_level REAL NOT NULL DEFAULT 5,
            expiry_date TEXT,
            is_prepped INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a004_dining_table",
        r#"
        CREATE TABLE IF NOT EXISTS a004_dining_table (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            zone TEXT NOT NULL DEFAULT 'Main',
            seats INTEGER NOT NULL DEFAULT 4,
            status TEXT NOT NULL DEFAULT 'free',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a005_order_line",
        r#"
        CREATE TABLE IF NOT EXISTS a005_order_line (
            id TEXT PRIMARY KEY NOT NULL,
            batch_id TEXT,
            table_number TEXT,
            order_type TEXT NOT NULL DEFAULT 'dine-in',
            meal_id TEXT,
            meal_name TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'meals',
            quantity INTEGER NOT NULL DEFAULT 1,
            total_price REAL NOT NULL DEFAULT 0,
            options TEXT,
            note TEXT,
            paid INTEGER NOT NULL DEFAULT 0,
            payment_method TEXT,
            delivery_status TEXT,
            delivery_code TEXT,
            created_at TEXT NOT NULL,
            bumped_at TEXT,
            closed_at TEXT
        );
        "#,
    ),
    (
        "a006_incident_report",
        r#"
        CREATE TABLE IF NOT EXISTS a006_incident_report (
            id TEXT PRIMARY KEY NOT NULL,
            order_id TEXT NOT NULL,
            item_name TEXT NOT NULL,
            reason TEXT NOT NULL,
            reported_by TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1,
            redo INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a007_payment",
        r#"
        CREATE TABLE IF NOT EXISTS a007_payment (
            id TEXT PRIMARY KEY NOT NULL,
            table_number TEXT,
            amount REAL NOT NULL,
            method TEXT NOT NULL,
            kind TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a008_supplier",
        r#"
        CREATE TABLE IF NOT EXISTS a008_supplier (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            website TEXT NOT NULL DEFAULT '',
            phone TEXT NOT NULL DEFAULT '',
            contact_name TEXT NOT NULL DEFAULT '',
            delivery_days_json TEXT NOT NULL DEFAULT '[]',
            supplies_json TEXT NOT NULL DEFAULT '[]',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a009_supplier_order",
        r#"
        CREATE TABLE IF NOT EXISTS a009_supplier_order (
            id TEXT PRIMARY KEY NOT NULL,
            supplier_id TEXT,
            supplier_name TEXT NOT NULL,
            lines_json TEXT NOT NULL DEFAULT '[]',
            total REAL NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'placed',
            placed_by TEXT NOT NULL,
            created_at TEXT NOT NULL,
            received_at TEXT
        );
        "#,
    ),
    (
        "a010_prep_recipe",
        r#"
        CREATE TABLE IF NOT EXISTS a010_prep_recipe (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            unit TEXT NOT NULL DEFAULT 'kg',
            ingredients_json TEXT NOT NULL DEFAULT '[]',
            hold_temperature TEXT NOT NULL DEFAULT '',
            shelf_life_hours INTEGER NOT NULL DEFAULT 48,
            minimum_level REAL NOT NULL DEFAULT 2,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_a005_table ON a005_order_line (table_number);",
    "CREATE INDEX IF NOT EXISTS idx_a005_batch ON a005_order_line (batch_id);",
    "CREATE INDEX IF NOT EXISTS idx_a007_table ON a007_payment (table_number);",
    "CREATE INDEX IF NOT EXISTS idx_a009_created ON a009_supplier_order (created_at);",
];

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize separators so Windows paths form a valid URL
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    tracing::info!("Opening database {}", db_url);
    let conn = Database::connect(&db_url).await?;

    for (table, sql) in SCHEMA {
        tracing::debug!("Ensuring table {}", table);
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }
    for sql in INDEXES {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
