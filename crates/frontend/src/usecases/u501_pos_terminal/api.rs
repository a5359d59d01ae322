use contracts::domain::a005_order_line::aggregate::OrderLine;
use contracts::domain::a005_order_line::requests::{GroupedOrderRequest, GroupedOrderResponse};
use contracts::domain::a007_payment::aggregate::PaymentMethod;
use contracts::usecases::u501_pos_terminal::request::{
    AffectedRows, CloseTableRequest, MarkPaidRequest, PayShareRequest, PayShareResponse,
    PaymentResult, PosSettings, SplitByPeopleRequest, SplitByPeopleResponse, SplitPayRequest,
    TableBalance, TransferTableRequest, TransferTableResponse,
};

use crate::shared::api_utils::{delete_json, encode_segment, get_json, post_json, put_json};

pub async fn fetch_settings() -> Result<PosSettings, String> {
    get_json("/api/pos/settings").await
}

pub async fn place_order(request: &GroupedOrderRequest) -> Result<GroupedOrderResponse, String> {
    post_json("/api/orders/grouped", request).await
}

/// Open rows of a table, paid and unpaid
pub async fn fetch_table_orders(table: &str) -> Result<Vec<OrderLine>, String> {
    get_json(&format!("/api/orders/by-table/{}", encode_segment(table))).await
}

/// Unpaid total and shares already taken on a table
pub async fn fetch_balance(table: &str) -> Result<TableBalance, String> {
    get_json(&format!("/api/orders/balance/{}", encode_segment(table))).await
}

pub async fn split_pay(item_ids: Vec<String>, payment_method: PaymentMethod) -> Result<PaymentResult, String> {
    post_json(
        "/api/orders/split-pay",
        &SplitPayRequest {
            item_ids,
            payment_method,
        },
    )
    .await
}

pub async fn mark_paid(request: &MarkPaidRequest) -> Result<PaymentResult, String> {
    post_json("/api/orders/mark-paid", request).await
}

pub async fn split_by_people(table_number: &str, people: u32) -> Result<SplitByPeopleResponse, String> {
    post_json(
        "/api/orders/split-by-people",
        &SplitByPeopleRequest {
            table_number: table_number.to_string(),
            people,
        },
    )
    .await
}

pub async fn pay_share(
    table_number: &str,
    amount: f64,
    payment_method: PaymentMethod,
) -> Result<PayShareResponse, String> {
    post_json(
        "/api/orders/pay-share",
        &PayShareRequest {
            table_number: table_number.to_string(),
            amount,
            payment_method,
        },
    )
    .await
}

pub async fn transfer_table(old_table: &str, new_table: &str) -> Result<TransferTableResponse, String> {
    put_json(
        "/api/orders/transfer-table",
        &TransferTableRequest {
            old_table: old_table.to_string(),
            new_table: new_table.to_string(),
        },
    )
    .await
}

pub async fn close_table(table_number: &str) -> Result<AffectedRows, String> {
    post_json(
        "/api/orders/close",
        &CloseTableRequest {
            table_number: table_number.to_string(),
        },
    )
    .await
}

pub async fn clear_unpaid(table_number: &str) -> Result<AffectedRows, String> {
    delete_json(&format!("/api/orders/clear-unpaid/{}", encode_segment(table_number))).await
}
