//! Till and kitchen screen caches in the browser.
//!
//! Carts live in sessionStorage per table (`cart_table_<id>`) so a refresh
//! keeps the order being built. Held tickets, the kitchen's category toggles
//! and its last cleared rows survive in localStorage, as does the menu
//! draft from the menu builder.

use contracts::usecases::u501_pos_terminal::held::HeldTickets;
use contracts::usecases::u501_pos_terminal::Cart;
use contracts::usecases::u504_menu_builder::MenuDraft;
use web_sys::window;

const CART_PREFIX: &str = "cart_table_";
const HELD_ORDERS_KEY: &str = "held_orders";
const TAKEAWAY_KEY: &str = "takeaway";
const KDS_CATEGORIES_KEY: &str = "kds_active_categories";
const KDS_LAST_CLEARED_KEY: &str = "kds_last_cleared";
const MENU_DRAFT_KEY: &str = "menu_draft";

fn session_storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn cart_key(table_id: Option<&str>) -> String {
    format!("{}{}", CART_PREFIX, table_id.unwrap_or(TAKEAWAY_KEY))
}

pub fn load_cart(table_id: Option<&str>) -> Cart {
    session_storage()
        .and_then(|s| s.get_item(&cart_key(table_id)).ok().flatten())
        .and_then(|json| serde_json::from_str::<Cart>(&json).ok())
        .unwrap_or_default()
}

/// Empty carts are removed rather than stored.
pub fn save_cart(table_id: Option<&str>, cart: &Cart) {
    let Some(storage) = session_storage() else {
        return;
    };
    let key = cart_key(table_id);
    if cart.is_empty() {
        let _ = storage.remove_item(&key);
        return;
    }
    if let Ok(json) = serde_json::to_string(cart) {
        let _ = storage.set_item(&key, &json);
    }
}

pub fn load_held() -> HeldTickets {
    load_local(HELD_ORDERS_KEY)
}

pub fn save_held(held: &HeldTickets) {
    save_local(HELD_ORDERS_KEY, held)
}

fn load_local<T: serde::de::DeserializeOwned + Default>(key: &str) -> T {
    local_storage()
        .and_then(|s| s.get_item(key).ok().flatten())
        .and_then(|json| serde_json::from_str::<T>(&json).ok())
        .unwrap_or_default()
}

fn save_local<T: serde::Serialize>(key: &str, value: &T) {
    if let (Some(storage), Ok(json)) = (local_storage(), serde_json::to_string(value)) {
        let _ = storage.set_item(key, &json);
    }
}

pub fn load_kds_categories() -> Vec<String> {
    load_local(KDS_CATEGORIES_KEY)
}

pub fn save_kds_categories(active: &[String]) {
    save_local(KDS_CATEGORIES_KEY, &active)
}

/// Row ids of the last "clear all", for restore
pub fn load_last_cleared() -> Vec<String> {
    load_local(KDS_LAST_CLEARED_KEY)
}

pub fn save_last_cleared(ids: &[String]) {
    save_local(KDS_LAST_CLEARED_KEY, &ids)
}

pub fn load_menu_draft() -> MenuDraft {
    load_local(MENU_DRAFT_KEY)
}

pub fn save_menu_draft(draft: &MenuDraft) {
    save_local(MENU_DRAFT_KEY, draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_key() {
        assert_eq!(cart_key(Some("abc")), "cart_table_abc");
        assert_eq!(cart_key(None), "cart_table_takeaway");
    }
}
