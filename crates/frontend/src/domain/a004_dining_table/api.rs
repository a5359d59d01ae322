use contracts::domain::a004_dining_table::aggregate::{
    DiningTable, TableStatus, TableStatusDto, TableTotal,
};

use crate::shared::api_utils::{get_json, send_no_content};

pub async fn fetch_tables() -> Result<Vec<DiningTable>, String> {
    get_json("/api/tables").await
}

pub async fn set_status(id: &str, status: TableStatus) -> Result<(), String> {
    send_no_content("POST", &format!("/api/tables/{}/status", id), &TableStatusDto { status }).await
}

pub async fn fetch_total(id: &str) -> Result<TableTotal, String> {
    get_json(&format!("/api/tables/{}/total", id)).await
}
