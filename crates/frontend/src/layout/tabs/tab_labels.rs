//! Tab titles, shared by the sidebar, the tab bar and `?active=` restores.

use contracts::domain::a001_menu_category::aggregate::MenuCategory;
use contracts::domain::a002_meal::aggregate::Meal;
use contracts::domain::a003_stock_item::aggregate::StockItem;
use contracts::domain::a004_dining_table::aggregate::DiningTable;
use contracts::domain::a008_supplier::aggregate::Supplier;
use contracts::domain::a010_prep_recipe::aggregate::PrepRecipe;
use contracts::domain::common::AggregateRoot;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_pos_terminal::PosTerminal;
use contracts::usecases::u502_kitchen_display::KitchenDisplay;
use contracts::usecases::u503_prep_batch::PrepBatch;
use contracts::usecases::u504_menu_builder::MenuBuilder;

pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        // ── Aggregates ────────────────────────────────────────────────────
        "a001_menu_category" => MenuCategory::list_name(),
        "a002_meal" => Meal::list_name(),
        "a002_meal_new" => "New meal",
        "a003_stock_item" => StockItem::list_name(),
        "a004_dining_table" => DiningTable::list_name(),
        "a008_supplier" => Supplier::list_name(),
        "a010_prep_recipe" => PrepRecipe::list_name(),

        // ── Use cases ─────────────────────────────────────────────────────
        "u501_pos_terminal" => PosTerminal::display_name(),
        "u502_kitchen_display" => KitchenDisplay::display_name(),
        "u503_prep_batch" => PrepBatch::display_name(),
        "u504_menu_builder" => MenuBuilder::display_name(),

        // ── Projections and dashboards ────────────────────────────────────
        "p901_restock_list" => "Restock list",
        "p902_smart_order" => "Ordering",
        "d400_daily_summary" => "Daily summary",

        _ => "",
    }
}

/// Title of a detail tab: «<entity> · <identifier>».
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key("u501_pos_terminal"), "POS");
        assert_eq!(tab_label_for_key("a002_meal"), "Meals");
        assert_eq!(tab_label_for_key("a008_supplier"), "Suppliers");
        assert_eq!(tab_label_for_key("u504_menu_builder"), "Menu builder");
        assert_eq!(tab_label_for_key("nope"), "");
        assert_eq!(detail_tab_label("Meal", "Full English"), "Meal · Full English");
    }
}
