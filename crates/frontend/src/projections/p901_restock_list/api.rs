use contracts::projections::p901_restock_list::dto::RestockList;

use crate::shared::api_utils::get_json;

pub async fn fetch_restock_list() -> Result<RestockList, String> {
    get_json("/api/stock/restock").await
}
