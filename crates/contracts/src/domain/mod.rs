pub mod a001_menu_category;
pub mod a002_meal;
pub mod a003_stock_item;
pub mod a004_dining_table;
pub mod a005_order_line;
pub mod a006_incident_report;
pub mod a007_payment;
pub mod a008_supplier;
pub mod a009_supplier_order;
pub mod a010_prep_recipe;
pub mod common;
