//! End-to-end service flow against a throwaway SQLite file.

use contracts::dashboards::d400_daily_summary::dto::DailySummaryQuery;
use contracts::domain::a002_meal::aggregate::{MealDto, MealIngredient};
use contracts::domain::a003_stock_item::aggregate::StockItemDto;
use contracts::domain::a005_order_line::aggregate::{DeliveryStatus, OrderType};
use contracts::domain::a005_order_line::requests::{GroupedOrderItem, GroupedOrderRequest};
use contracts::domain::a006_incident_report::aggregate::IncidentReportDto;
use contracts::domain::a007_payment::aggregate::PaymentMethod;
use contracts::domain::a008_supplier::aggregate::SupplierDto;
use contracts::domain::a009_supplier_order::aggregate::{PlaceOrdersRequest, SupplierOrderStatus};
use contracts::domain::a010_prep_recipe::aggregate::{PrepIngredient, PrepRecipeDto};
use contracts::usecases::u501_pos_terminal::request::{
    CloseTableRequest, MarkPaidRequest, PayShareRequest, SplitByPeopleRequest, SplitPayRequest,
    TransferTableRequest,
};
use contracts::usecases::u501_pos_terminal::BillAdjustments;
use contracts::usecases::u502_kitchen_display::request::PauseStatus;
use contracts::usecases::u503_prep_batch::PrepareBatchRequest;

use crate::dashboards::d400_daily_summary;
use crate::domain::{
    a002_meal, a003_stock_item, a004_dining_table, a005_order_line, a006_incident_report, a008_supplier,
    a009_supplier_order, a010_prep_recipe,
};
use crate::projections::p902_smart_order;
use crate::shared::config::FloorConfig;
use crate::shared::data::db;
use crate::shared::error::ServiceError;
use crate::usecases::{u501_pos_terminal, u502_kitchen_display, u503_prep_batch};

fn item(name: &str, quantity: u32, total: f64) -> GroupedOrderItem {
    GroupedOrderItem {
        meal_id: None,
        meal_name: name.into(),
        quantity,
        total_price: total,
        category: Some("meals".into()),
        options: None,
        note: None,
    }
}

async fn table_status(name: &str) -> bool {
    a004_dining_table::service::list_all()
        .await
        .unwrap()
        .into_iter()
        .find(|t| t.name() == name)
        .map(|t| t.is_free())
        .unwrap()
}

async fn revenue() -> f64 {
    d400_daily_summary::service::get_daily_summary(DailySummaryQuery::default())
        .await
        .unwrap()
        .revenue
}

fn is_conflict(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<ServiceError>(), Some(ServiceError::Conflict(_)))
}

fn is_validation(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<ServiceError>(), Some(ServiceError::Validation(_)))
}

async fn add_stock(name: &str, quantity: f64, price: f64, minimum: f64) {
    a003_stock_item::service::create(StockItemDto {
        ingredient: name.into(),
        quantity,
        unit: "kg".into(),
        price,
        minimum_level: Some(minimum),
        ..Default::default()
    })
    .await
    .unwrap();
}

async fn stock_of(name: &str) -> (f64, f64) {
    let item = a003_stock_item::service::list_all()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.ingredient() == name)
        .unwrap();
    (item.quantity, item.price)
}

/// Places £40 on a table: a £30 main and a £10 drink
async fn forty_pound_bill(table: &str) -> Vec<String> {
    a005_order_line::service::place_grouped(GroupedOrderRequest {
        table_number: Some(table.into()),
        order_type: OrderType::DineIn,
        items: vec![item("Sunday Roast", 2, 30.0), item("Ale", 2, 10.0)],
    })
    .await
    .unwrap()
    .line_ids
}

async fn share(table: &str, amount: f64) {
    u501_pos_terminal::service::pay_share(PayShareRequest {
        table_number: table.into(),
        amount,
        payment_method: PaymentMethod::Card,
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_service_flows() {
    let db_file = std::env::temp_dir().join(format!("maks_os_flow_{}.db", uuid::Uuid::new_v4()));
    db::initialize_database(&db_file).await.unwrap();

    order_to_settlement().await;
    shares_move_with_the_bill().await;
    full_payment_takes_off_shares().await;
    split_items_after_shares().await;
    supplier_order_books_delivery().await;
    prep_batch_uses_stock().await;

    let _ = std::fs::remove_file(&db_file);
}

async fn order_to_settlement() {
    let seeded = a004_dining_table::service::seed_if_empty(&FloorConfig::default()).await.unwrap();
    assert_eq!(seeded, 12);
    assert_eq!(a004_dining_table::service::seed_if_empty(&FloorConfig::default()).await.unwrap(), 0);

    // Menu and stock for plate cost
    a003_stock_item::service::create(StockItemDto {
        ingredient: "Eggs".into(),
        quantity: 30.0,
        unit: "pcs".into(),
        price: 6.0,
        ..Default::default()
    })
    .await
    .unwrap();
    let meal_id = a002_meal::service::create(MealDto {
        id: None,
        name: "Full English".into(),
        price: 9.5,
        category: "meals".into(),
        allergens: None,
        calories: Some(900),
        ingredients: vec![MealIngredient {
            ingredient: "eggs".into(),
            quantity: 2.0,
        }],
    })
    .await
    .unwrap();
    let cost = a002_meal::service::cost_of(meal_id).await.unwrap();
    assert_eq!(cost.total_cost, 0.4);
    assert!(cost.missing.is_empty());

    // Place a dine-in batch
    let placed = a005_order_line::service::place_grouped(GroupedOrderRequest {
        table_number: Some("Table 1".into()),
        order_type: OrderType::DineIn,
        items: vec![item("Full English", 2, 19.0), item("Latte", 1, 3.0)],
    })
    .await
    .unwrap();
    assert_eq!(placed.line_ids.len(), 2);
    assert!(!table_status("Table 1").await);

    let feed = a005_order_line::service::kitchen_feed().await.unwrap();
    assert_eq!(feed.len(), 2);
    let delay = u502_kitchen_display::service::estimated_delay().await.unwrap();
    assert_eq!(delay.open_batches, 1);
    assert_eq!(delay.delay, 15);

    // Move the party, then split the bill two ways
    let moved = u501_pos_terminal::service::transfer_table(TransferTableRequest {
        old_table: "Table 1".into(),
        new_table: "Table 2".into(),
    })
    .await
    .unwrap();
    assert_eq!(moved.moved, 2);
    assert!(table_status("Table 1").await);
    assert!(!table_status("Table 2").await);

    let split = u501_pos_terminal::service::split_by_people(SplitByPeopleRequest {
        table_number: "Table 2".into(),
        people: 3,
    })
    .await
    .unwrap();
    assert_eq!(split.total, 22.0);
    assert_eq!(split.shares, vec![7.34, 7.33, 7.33]);

    let first = u501_pos_terminal::service::pay_share(PayShareRequest {
        table_number: "Table 2".into(),
        amount: 11.0,
        payment_method: PaymentMethod::Card,
    })
    .await
    .unwrap();
    assert!(!first.settled);
    assert_eq!(first.remaining, 11.0);

    let second = u501_pos_terminal::service::pay_share(PayShareRequest {
        table_number: "Table 2".into(),
        amount: 11.0,
        payment_method: PaymentMethod::Cash,
    })
    .await
    .unwrap();
    assert!(second.settled);
    let total = a004_dining_table::service::total_by_name("Table 2").await.unwrap();
    assert_eq!(total.total, 0.0);

    // Kitchen clears and restores
    let cleared = a005_order_line::service::clear_all().await.unwrap();
    assert_eq!(cleared.ids.len(), 2);
    assert!(a005_order_line::service::kitchen_feed().await.unwrap().is_empty());
    assert_eq!(a005_order_line::service::restore(&cleared.ids).await.unwrap(), 2);

    // Complaint with a redo goes back to the kitchen for free
    let report = a006_incident_report::service::create(
        IncidentReportDto {
            order_id: placed.line_ids[0].clone(),
            item_name: "Full English".into(),
            reason: "complaint".into(),
            reported_by: None,
            quantity: 1,
            redo: true,
        },
        "chef",
    )
    .await
    .unwrap();
    assert_eq!(report.reason, "Complaint");
    let feed = a005_order_line::service::kitchen_feed().await.unwrap();
    assert!(feed
        .iter()
        .any(|l| l.note.as_deref() == Some("REDO: Complaint") && l.total_price == 0.0));

    let closed = u501_pos_terminal::service::close_table(CloseTableRequest {
        table_number: "Table 2".into(),
    })
    .await
    .unwrap();
    assert_eq!(closed.affected, 3);
    assert!(table_status("Table 2").await);

    // Paused kitchen refuses deliveries but still takes the floor
    u502_kitchen_display::service::set_paused(PauseStatus { is_paused: true }).await.unwrap();
    let refused = a005_order_line::service::place_grouped(GroupedOrderRequest {
        table_number: None,
        order_type: OrderType::Delivery,
        items: vec![item("Latte", 1, 3.0)],
    })
    .await
    .unwrap_err();
    assert!(matches!(refused.downcast_ref::<ServiceError>(), Some(ServiceError::KitchenPaused)));

    u502_kitchen_display::service::set_paused(PauseStatus { is_paused: false }).await.unwrap();
    let delivery = a005_order_line::service::place_grouped(GroupedOrderRequest {
        table_number: None,
        order_type: OrderType::Delivery,
        items: vec![item("Latte", 1, 3.0)],
    })
    .await
    .unwrap();
    let accepted = a005_order_line::service::set_delivery_status(&delivery.batch_id, DeliveryStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(accepted.delivery_code.map(|c| c.len()), Some(4));

    let summary = d400_daily_summary::service::get_daily_summary(DailySummaryQuery::default())
        .await
        .unwrap();
    assert_eq!(summary.revenue, 22.0);
    assert_eq!(summary.incidents, 1);
    assert_eq!(summary.open_tables, 0);
}

async fn shares_move_with_the_bill() {
    let before = revenue().await;
    forty_pound_bill("Table 3").await;
    share("Table 3", 20.0).await;

    u501_pos_terminal::service::transfer_table(TransferTableRequest {
        old_table: "Table 3".into(),
        new_table: "Table 4".into(),
    })
    .await
    .unwrap();
    let old = u501_pos_terminal::service::table_balance("Table 3").await.unwrap();
    assert_eq!(old.shares_paid, 0.0);
    let balance = u501_pos_terminal::service::table_balance("Table 4").await.unwrap();
    assert_eq!(balance.unpaid_total, 40.0);
    assert_eq!(balance.shares_paid, 20.0);
    assert_eq!(balance.remaining, 20.0);

    let split = u501_pos_terminal::service::split_by_people(SplitByPeopleRequest {
        table_number: "Table 4".into(),
        people: 2,
    })
    .await
    .unwrap();
    assert_eq!(split.total, 20.0);
    assert_eq!(split.shares, vec![10.0, 10.0]);

    let paid = u501_pos_terminal::service::mark_paid(MarkPaidRequest {
        table_number: Some("Table 4".into()),
        item_ids: Vec::new(),
        payment_method: PaymentMethod::Cash,
        adjustments: BillAdjustments::default(),
    })
    .await
    .unwrap();
    assert_eq!(paid.paid_items, 2);
    assert_eq!(paid.amount, 20.0);
    assert_eq!(a004_dining_table::service::total_by_name("Table 4").await.unwrap().total, 0.0);
    assert_eq!(revenue().await - before, 40.0);
}

async fn full_payment_takes_off_shares() {
    let before = revenue().await;
    let ids = forty_pound_bill("Table 5").await;
    share("Table 5", 10.0).await;
    let adjustments = BillAdjustments {
        service_enabled: true,
        ..Default::default()
    };

    let partial = u501_pos_terminal::service::mark_paid(MarkPaidRequest {
        table_number: Some("Table 5".into()),
        item_ids: vec![ids[0].clone()],
        payment_method: PaymentMethod::Card,
        adjustments,
    })
    .await
    .unwrap_err();
    assert!(is_conflict(&partial));

    let paid = u501_pos_terminal::service::mark_paid(MarkPaidRequest {
        table_number: Some("Table 5".into()),
        item_ids: ids,
        payment_method: PaymentMethod::Card,
        adjustments,
    })
    .await
    .unwrap();
    // £40 plus 10% service, less the £10 share
    assert_eq!(paid.amount, 34.0);
    assert_eq!(revenue().await - before, 44.0);
}

async fn split_items_after_shares() {
    let before = revenue().await;
    let ids = forty_pound_bill("Table 6").await;
    share("Table 6", 15.0).await;

    let partial = u501_pos_terminal::service::split_pay(SplitPayRequest {
        item_ids: vec![ids[1].clone()],
        payment_method: PaymentMethod::Cash,
    })
    .await
    .unwrap_err();
    assert!(is_conflict(&partial));
    assert_eq!(
        u501_pos_terminal::service::table_balance("Table 6").await.unwrap().remaining,
        25.0
    );

    let paid = u501_pos_terminal::service::split_pay(SplitPayRequest {
        item_ids: ids.clone(),
        payment_method: PaymentMethod::Cash,
    })
    .await
    .unwrap();
    assert_eq!(paid.paid_items, 2);
    assert_eq!(paid.amount, 25.0);
    assert_eq!(revenue().await - before, 40.0);

    let again = u501_pos_terminal::service::split_pay(SplitPayRequest {
        item_ids: ids,
        payment_method: PaymentMethod::Cash,
    })
    .await
    .unwrap_err();
    assert!(is_conflict(&again));
}

async fn supplier_order_books_delivery() {
    add_stock("Plain Flour", 2.0, 4.0, 5.0).await;
    add_stock("Double Cream", 1.0, 3.0, 4.0).await;
    let every_day: Vec<String> = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        .iter()
        .map(|d| d.to_string())
        .collect();
    let booker = a008_supplier::service::create(SupplierDto {
        name: "Booker".into(),
        delivery_days: every_day.clone(),
        supplies: vec!["plain flour".into()],
        ..Default::default()
    })
    .await
    .unwrap();

    let smart = p902_smart_order::service::get_smart_order().await.unwrap();
    let group = smart.groups.iter().find(|g| g.supplier_name == "Booker").unwrap();
    assert_eq!(group.days_until_delivery, Some(0));
    assert_eq!(group.lines.len(), 1);
    assert!(smart
        .unassigned()
        .unwrap()
        .lines
        .iter()
        .any(|l| l.ingredient == "Double Cream"));

    let orders = p902_smart_order::service::place_orders(PlaceOrdersRequest::default(), "manager")
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    // 3 kg to get back to the minimum at 2.00 a kg
    assert_eq!(orders[0].lines[0].quantity, 3.0);
    assert_eq!(orders[0].total, 6.0);

    let received = a009_supplier_order::service::receive(&orders[0].id).await.unwrap();
    assert_eq!(received.status, SupplierOrderStatus::Received);
    assert_eq!(stock_of("Plain Flour").await, (5.0, 10.0));
    let twice = a009_supplier_order::service::receive(&orders[0].id).await.unwrap_err();
    assert!(is_conflict(&twice));
    assert_eq!(stock_of("Plain Flour").await, (5.0, 10.0));

    let history = a009_supplier_order::service::list_history().await.unwrap();
    assert_eq!(history[0].id, orders[0].id);
    assert!(history[0].received_at.is_some());

    let flour_id = a003_stock_item::service::list_all()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.ingredient() == "Plain Flour")
        .unwrap()
        .base
        .id
        .value();
    a003_stock_item::service::set_price(flour_id, 12.0).await.unwrap();
    assert_eq!(stock_of("Plain Flour").await, (5.0, 12.0));
    let negative = a003_stock_item::service::set_price(flour_id, -1.0).await.unwrap_err();
    assert!(is_validation(&negative));

    let cream_id = a003_stock_item::service::list_all()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.ingredient() == "Double Cream")
        .unwrap()
        .base
        .id
        .value();
    let nobody = p902_smart_order::service::auto_restock(cream_id, "manager").await.unwrap_err();
    assert!(is_validation(&nobody));

    a008_supplier::service::update(
        booker,
        SupplierDto {
            name: "Booker".into(),
            delivery_days: every_day,
            supplies: vec!["Plain Flour".into(), "Double Cream".into()],
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let cream = p902_smart_order::service::auto_restock(cream_id, "manager").await.unwrap();
    assert_eq!(cream.supplier_name, "Booker");
    assert_eq!(cream.lines[0].quantity, 3.0);
    assert_eq!(cream.total, 9.0);
}

async fn prep_batch_uses_stock() {
    add_stock("Beef Stock", 10.0, 20.0, 2.0).await;
    add_stock("Cornflour", 5.0, 5.0, 1.0).await;
    a010_prep_recipe::service::create(PrepRecipeDto {
        name: "Gravy".into(),
        ingredients: vec![
            PrepIngredient { ingredient: "beef stock".into(), amount: 0.5 },
            PrepIngredient { ingredient: "Cornflour".into(), amount: 0.1 },
        ],
        minimum_level: Some(3.0),
        ..Default::default()
    })
    .await
    .unwrap();

    let due = u503_prep_batch::service::list_due().await.unwrap();
    assert_eq!(due.iter().find(|d| d.prepped_item == "Gravy").unwrap().to_prepare, 3.0);

    let made = u503_prep_batch::service::prepare(PrepareBatchRequest {
        name: "gravy".into(),
        batch_quantity: 4.0,
    })
    .await
    .unwrap();
    // 2 kg of stock at 2.00 plus 0.4 kg of cornflour at 1.00
    assert_eq!(made.plan.cost, 4.4);
    assert_eq!(made.in_stock, 4.0);
    assert_eq!(stock_of("Beef Stock").await, (8.0, 16.0));
    assert_eq!(stock_of("Gravy").await, (4.0, 4.4));
    assert!(!u503_prep_batch::service::list_due()
        .await
        .unwrap()
        .iter()
        .any(|d| d.prepped_item == "Gravy"));

    let too_much = u503_prep_batch::service::prepare(PrepareBatchRequest {
        name: "Gravy".into(),
        batch_quantity: 100.0,
    })
    .await
    .unwrap_err();
    assert!(is_conflict(&too_much));
    assert_eq!(stock_of("Beef Stock").await, (8.0, 16.0));

    let again = u503_prep_batch::service::prepare(PrepareBatchRequest {
        name: "Gravy".into(),
        batch_quantity: 2.0,
    })
    .await
    .unwrap();
    assert_eq!(again.in_stock, 6.0);
    assert_eq!(stock_of("Beef Stock").await.0, 7.0);

    let unknown = u503_prep_batch::service::prepare(PrepareBatchRequest {
        name: "Custard".into(),
        batch_quantity: 1.0,
    })
    .await
    .unwrap_err();
    assert!(matches!(
        unknown.downcast_ref::<ServiceError>(),
        Some(ServiceError::NotFound(_))
    ));
}
