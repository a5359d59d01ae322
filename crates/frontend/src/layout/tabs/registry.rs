//! Tab key → page component. The only place new screens are wired in.

use crate::dashboards::d400_daily_summary::ui::DailySummaryDashboard;
use crate::domain::a001_menu_category::ui::CategoryList;
use crate::domain::a002_meal::ui::details::MealDetails;
use crate::domain::a002_meal::ui::list::MealList;
use crate::domain::a003_stock_item::ui::StockList;
use crate::domain::a004_dining_table::ui::TableBoard;
use crate::domain::a008_supplier::ui::SupplierList;
use crate::domain::a010_prep_recipe::ui::PrepRecipeList;
use crate::layout::global_context::AppGlobalContext;
use crate::projections::p901_restock_list::ui::RestockListView;
use crate::projections::p902_smart_order::ui::OrderingHubView;
use crate::usecases::u501_pos_terminal::ui::PosTerminalView;
use crate::usecases::u502_kitchen_display::ui::KitchenDisplayView;
use crate::usecases::u503_prep_batch::ui::PrepListView;
use crate::usecases::u504_menu_builder::ui::MenuBuilderView;
use leptos::prelude::*;
use std::rc::Rc;

pub const MEAL_DETAILS_PREFIX: &str = "a002_meal_details_";

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    match key {
        "u501_pos_terminal" => view! { <PosTerminalView /> }.into_any(),
        "u502_kitchen_display" => view! { <KitchenDisplayView /> }.into_any(),
        "a004_dining_table" => view! { <TableBoard /> }.into_any(),
        "a001_menu_category" => view! { <CategoryList /> }.into_any(),
        "a002_meal" => view! { <MealList /> }.into_any(),
        "a003_stock_item" => view! { <StockList /> }.into_any(),
        "p901_restock_list" => view! { <RestockListView /> }.into_any(),
        "a008_supplier" => view! { <SupplierList /> }.into_any(),
        "p902_smart_order" => view! { <OrderingHubView /> }.into_any(),
        "a010_prep_recipe" => view! { <PrepRecipeList /> }.into_any(),
        "u503_prep_batch" => view! { <PrepListView /> }.into_any(),
        "u504_menu_builder" => view! { <MenuBuilderView /> }.into_any(),
        "d400_daily_summary" => view! { <DailySummaryDashboard /> }.into_any(),
        "a002_meal_new" => meal_details(None, key.to_string(), tabs_store),
        k if k.starts_with(MEAL_DETAILS_PREFIX) => {
            let id = k.trim_start_matches(MEAL_DETAILS_PREFIX).to_string();
            meal_details(Some(id), key.to_string(), tabs_store)
        }
        _ => {
            log::warn!("Unknown tab key: {}", key);
            view! { <div class="placeholder">"Not available"</div> }.into_any()
        }
    }
}

fn meal_details(id: Option<String>, tab_key: String, tabs_store: AppGlobalContext) -> AnyView {
    let close_key = tab_key.clone();
    let close: Rc<dyn Fn(())> = Rc::new(move |_| tabs_store.close_tab(&close_key));
    view! {
        <MealDetails
            id=id
            tab_key=tab_key
            on_saved=close.clone()
            on_cancel=close
        />
    }
    .into_any()
}
