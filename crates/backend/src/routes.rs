use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, system};

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route("/api/system/auth/login", post(system::handlers::auth::login))
        .route("/api/system/auth/refresh", post(system::handlers::auth::refresh))
        .route("/api/system/auth/logout", post(system::handlers::auth::logout))
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // Staff accounts (admin only)
        .route(
            "/api/system/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id",
            delete(system::handlers::users::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        // Cost data (managers and admins)
        .route(
            "/api/meals/:id/cost",
            get(handlers::a002_meal::plate_cost)
                .layer(middleware::from_fn(system::auth::middleware::require_manager)),
        )
        .merge(business_routes())
}

/// Everything the till and the kitchen use; any signed-in user
fn business_routes() -> Router {
    Router::new()
        // A001 Menu categories
        .route(
            "/api/categories",
            get(handlers::a001_menu_category::list_all).post(handlers::a001_menu_category::create),
        )
        .route(
            "/api/categories/:id",
            delete(handlers::a001_menu_category::delete),
        )
        // A002 Meals
        .route(
            "/api/meals",
            get(handlers::a002_meal::list_page).post(handlers::a002_meal::upsert),
        )
        .route(
            "/api/meals/ingredients-index",
            get(handlers::a002_meal::ingredients_index),
        )
        .route(
            "/api/meals/:id",
            get(handlers::a002_meal::get_by_id).delete(handlers::a002_meal::delete),
        )
        // A003 Stock + P901 restock list
        .route(
            "/api/stock",
            get(handlers::a003_stock_item::list_all).post(handlers::a003_stock_item::create),
        )
        .route(
            "/api/stock/expired",
            delete(handlers::a003_stock_item::remove_expired),
        )
        .route(
            "/api/stock/restock",
            get(handlers::p901_restock_list::get_restock_list),
        )
        .route(
            "/api/stock/:id",
            put(handlers::a003_stock_item::update).delete(handlers::a003_stock_item::delete),
        )
        .route(
            "/api/stock/:id/price",
            put(handlers::a003_stock_item::set_price),
        )
        // A008 Suppliers, P902 smart order, A009 supplier orders
        .route(
            "/api/suppliers",
            get(handlers::a008_supplier::list_all).post(handlers::a008_supplier::create),
        )
        .route(
            "/api/suppliers/:id",
            put(handlers::a008_supplier::update).delete(handlers::a008_supplier::delete),
        )
        .route(
            "/api/ordering/smart-order",
            get(handlers::p902_smart_order::get_smart_order),
        )
        .route(
            "/api/ordering/orders",
            get(handlers::a009_supplier_order::history).post(handlers::p902_smart_order::place_orders),
        )
        .route(
            "/api/ordering/orders/:id/receive",
            post(handlers::a009_supplier_order::receive),
        )
        .route(
            "/api/ordering/auto-restock/:stock_id",
            post(handlers::p902_smart_order::auto_restock),
        )
        // A010 Prepped items + U503 prep batches
        .route(
            "/api/prep-recipes",
            get(handlers::a010_prep_recipe::list_all).post(handlers::a010_prep_recipe::create),
        )
        .route(
            "/api/prep-recipes/:id",
            put(handlers::a010_prep_recipe::update).delete(handlers::a010_prep_recipe::delete),
        )
        .route("/api/prep/prepare", post(handlers::u503_prep_batch::prepare))
        .route("/api/prep/due", get(handlers::u503_prep_batch::due))
        // A004 Tables
        .route("/api/tables", get(handlers::a004_dining_table::list_all))
        .route(
            "/api/tables/:id/status",
            post(handlers::a004_dining_table::set_status),
        )
        .route(
            "/api/tables/:id/total",
            get(handlers::a004_dining_table::total),
        )
        // A005 Orders (placement and kitchen)
        .route("/api/orders", get(handlers::a005_order_line::kitchen_feed))
        .route(
            "/api/orders/grouped",
            post(handlers::a005_order_line::place_grouped),
        )
        .route(
            "/api/orders/by-table/:table",
            get(handlers::a005_order_line::by_table),
        )
        .route(
            "/api/orders/clear-all",
            delete(handlers::a005_order_line::clear_all),
        )
        .route(
            "/api/orders/restore",
            post(handlers::a005_order_line::restore),
        )
        .route(
            "/api/orders/delivery-status/:batch_id",
            put(handlers::a005_order_line::delivery_status),
        )
        .route(
            "/api/orders/:id",
            delete(handlers::a005_order_line::bump),
        )
        // U501 POS payments and table moves
        .route("/api/pos/settings", get(handlers::u501_pos_terminal::settings))
        .route(
            "/api/orders/split-pay",
            post(handlers::u501_pos_terminal::split_pay),
        )
        .route(
            "/api/orders/mark-paid",
            post(handlers::u501_pos_terminal::mark_paid),
        )
        .route(
            "/api/orders/balance/:table",
            get(handlers::u501_pos_terminal::balance),
        )
        .route(
            "/api/orders/split-by-people",
            post(handlers::u501_pos_terminal::split_by_people),
        )
        .route(
            "/api/orders/pay-share",
            post(handlers::u501_pos_terminal::pay_share),
        )
        .route(
            "/api/orders/transfer-table",
            put(handlers::u501_pos_terminal::transfer_table),
        )
        .route(
            "/api/orders/close",
            post(handlers::u501_pos_terminal::close_table),
        )
        .route(
            "/api/orders/clear-unpaid/:table",
            delete(handlers::u501_pos_terminal::clear_unpaid),
        )
        // U502 Kitchen
        .route(
            "/api/kitchen/pause-status",
            get(handlers::u502_kitchen_display::pause_status)
                .put(handlers::u502_kitchen_display::set_pause_status),
        )
        .route(
            "/api/kitchen/estimated-delay",
            get(handlers::u502_kitchen_display::estimated_delay),
        )
        // A006 Incident reports
        .route(
            "/api/reports",
            get(handlers::a006_incident_report::list_for_day)
                .post(handlers::a006_incident_report::create),
        )
        // D400 Daily summary
        .route(
            "/api/analytics/summary",
            get(handlers::d400_daily_summary::get_daily_summary),
        )
        .route_layer(middleware::from_fn(system::auth::middleware::require_auth))
}
