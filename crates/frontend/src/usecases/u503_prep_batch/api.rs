use contracts::usecases::u503_prep_batch::{PrepDue, PrepareBatchRequest, PrepareBatchResult};

use crate::shared::api_utils::{get_json, post_json};

pub async fn fetch_due() -> Result<Vec<PrepDue>, String> {
    get_json("/api/prep/due").await
}

pub async fn prepare(name: &str, batch_quantity: f64) -> Result<PrepareBatchResult, String> {
    post_json(
        "/api/prep/prepare",
        &PrepareBatchRequest { name: name.to_string(), batch_quantity },
    )
    .await
}
