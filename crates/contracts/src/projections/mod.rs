pub mod p901_restock_list;
pub mod p902_smart_order;
