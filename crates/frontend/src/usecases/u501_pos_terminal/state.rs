//! Till state shared by the POS panels and dialogs.

use super::api;
use crate::domain::a001_menu_category::api as category_api;
use crate::domain::a002_meal::api as meal_api;
use crate::domain::a004_dining_table::api as table_api;
use crate::shared::browser_storage;
use chrono::Utc;
use contracts::domain::a001_menu_category::aggregate::MenuCategory;
use contracts::domain::a002_meal::aggregate::Meal;
use contracts::domain::a004_dining_table::aggregate::DiningTable;
use contracts::domain::a005_order_line::aggregate::{lines_total, OrderLine, OrderType};
use contracts::domain::a005_order_line::requests::{GroupedOrderRequest, GroupedOrderResponse};
use contracts::domain::a007_payment::aggregate::PaymentMethod;
use contracts::domain::common::AggregateId;
use contracts::shared::money::parse_amount;
use contracts::usecases::u501_pos_terminal::held::HeldTickets;
use contracts::usecases::u501_pos_terminal::receipt::{Receipt, RECEIPT_WIDTH};
use contracts::usecases::u501_pos_terminal::request::MarkPaidRequest;
use contracts::usecases::u501_pos_terminal::totals::{compute_totals, DEFAULT_SERVICE_RATE};
use contracts::usecases::u501_pos_terminal::{BillAdjustments, Cart, Discount, DiscountKind, Totals};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Menu items shown for the active category, or matches across the whole
/// menu while a search is typed.
pub fn filter_menu(meals: &[Meal], category: &str, search: &str) -> Vec<Meal> {
    let search = search.trim().to_lowercase();
    let category = category.trim().to_lowercase();
    meals
        .iter()
        .filter(|m| {
            if !search.is_empty() {
                m.name().to_lowercase().contains(&search)
            } else {
                category.is_empty() || m.category.trim().to_lowercase() == category
            }
        })
        .cloned()
        .collect()
}

/// Discount inputs as typed at the till; blank or unparseable means none.
pub fn bill_adjustments(
    discount_kind: &str,
    discount_text: &str,
    service_enabled: bool,
    service_rate: f64,
) -> BillAdjustments {
    let kind = if discount_kind == "amount" {
        DiscountKind::Amount
    } else {
        DiscountKind::Percent
    };
    BillAdjustments {
        discount: parse_amount(discount_text).map(|value| Discount { kind, value }),
        service_enabled,
        service_rate,
    }
}

/// Delivery and collection are picked explicitly; otherwise the table decides.
pub fn order_type_for(table: Option<&str>, chosen: OrderType) -> OrderType {
    if chosen.is_remote() {
        return chosen;
    }
    match table {
        Some(t) if !t.trim().is_empty() => OrderType::DineIn,
        _ => OrderType::Takeaway,
    }
}

fn now_millis() -> i64 {
    js_sys::Date::now() as i64
}

#[derive(Clone, Copy)]
pub struct PosState {
    pub tables: RwSignal<Vec<DiningTable>>,
    pub categories: RwSignal<Vec<MenuCategory>>,
    pub menu: RwSignal<Vec<Meal>>,
    pub active_category: RwSignal<String>,
    pub search: RwSignal<String>,
    /// Table name; None is a takeaway till
    pub table: RwSignal<Option<String>>,
    pub order_type: RwSignal<OrderType>,
    pub cart: RwSignal<Cart>,
    /// Unpaid rows already sent for the table
    pub bill_lines: RwSignal<Vec<OrderLine>>,
    /// Shares already taken against the table's bill
    pub shares_paid: RwSignal<f64>,
    pub held: RwSignal<HeldTickets>,
    pub discount_kind: RwSignal<String>,
    pub discount_value: RwSignal<String>,
    pub service_enabled: RwSignal<bool>,
    pub service_rate: RwSignal<f64>,
    pub payment_method: RwSignal<String>,
    pub receipt: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub busy: RwSignal<bool>,
}

impl PosState {
    pub fn new() -> Self {
        Self {
            tables: RwSignal::new(Vec::new()),
            categories: RwSignal::new(Vec::new()),
            menu: RwSignal::new(Vec::new()),
            active_category: RwSignal::new(String::new()),
            search: RwSignal::new(String::new()),
            table: RwSignal::new(None),
            order_type: RwSignal::new(OrderType::Takeaway),
            cart: RwSignal::new(browser_storage::load_cart(None)),
            bill_lines: RwSignal::new(Vec::new()),
            shares_paid: RwSignal::new(0.0),
            held: RwSignal::new(browser_storage::load_held()),
            discount_kind: RwSignal::new("percent".to_string()),
            discount_value: RwSignal::new(String::new()),
            service_enabled: RwSignal::new(false),
            service_rate: RwSignal::new(DEFAULT_SERVICE_RATE),
            payment_method: RwSignal::new(PaymentMethod::Card.as_str().to_string()),
            receipt: RwSignal::new(None),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            busy: RwSignal::new(false),
        }
    }

    fn fail(&self, message: String) {
        log::warn!("POS: {}", message);
        self.notice.set(None);
        self.error.set(Some(message));
    }

    fn inform(&self, message: String) {
        self.error.set(None);
        self.notice.set(Some(message));
    }

    /// Menu, categories, tables and till settings
    pub fn load(self) {
        spawn_local(async move {
            match meal_api::fetch_full_menu().await {
                Ok(meals) => self.menu.set(meals),
                Err(e) => self.fail(format!("Failed to load menu: {}", e)),
            }
            match api::fetch_settings().await {
                Ok(settings) => self.service_rate.set(settings.default_service_rate),
                Err(e) => log::warn!("POS settings unavailable: {}", e),
            }
        });
        self.load_categories();
        self.load_tables();
    }

    pub fn load_categories(self) {
        spawn_local(async move {
            match category_api::fetch_categories().await {
                Ok(mut list) => {
                    list.sort_by_key(|c| c.sort_order);
                    if self.active_category.get_untracked().is_empty() {
                        if let Some(first) = list.first() {
                            self.active_category.set(first.normalized_name());
                        }
                    }
                    self.categories.set(list);
                }
                Err(e) => self.fail(format!("Failed to load categories: {}", e)),
            }
        });
    }

    pub fn load_tables(self) {
        spawn_local(async move {
            match table_api::fetch_tables().await {
                Ok(list) => self.tables.set(list),
                Err(e) => log::warn!("Tables unavailable: {}", e),
            }
        });
    }

    /// Parks the current cart under its table and switches to `table`.
    pub fn select_table(self, table: Option<String>) {
        let table = table.filter(|t| !t.trim().is_empty());
        let current = self.table.get_untracked();
        if current == table {
            self.refresh_bill();
            return;
        }
        self.cart
            .with_untracked(|cart| browser_storage::save_cart(current.as_deref(), cart));
        self.cart.set(browser_storage::load_cart(table.as_deref()));
        self.order_type
            .update(|t| *t = order_type_for(table.as_deref(), *t));
        self.table.set(table);
        self.receipt.set(None);
        self.discount_value.set(String::new());
        self.refresh_bill();
    }

    pub fn set_order_type(self, order_type: OrderType) {
        let table = self.table.get_untracked();
        self.order_type.set(order_type_for(table.as_deref(), order_type));
    }

    pub fn refresh_bill(self) {
        let Some(table) = self.table.get_untracked() else {
            self.bill_lines.set(Vec::new());
            self.shares_paid.set(0.0);
            return;
        };
        spawn_local(async move {
            let loaded = match api::fetch_table_orders(&table).await {
                Ok(lines) => api::fetch_balance(&table).await.map(|b| (lines, b.shares_paid)),
                Err(e) => Err(e),
            };
            match loaded {
                Ok((lines, shares_paid)) => {
                    // Switched away while loading
                    if self.table.get_untracked().as_deref() != Some(table.as_str()) {
                        return;
                    }
                    self.bill_lines
                        .set(lines.into_iter().filter(OrderLine::is_unpaid).collect());
                    self.shares_paid.set(shares_paid);
                }
                Err(e) => self.fail(format!("Failed to load {} orders: {}", table, e)),
            }
        });
    }

    /// Applies `f` to the cart and writes it to session storage.
    pub fn update_cart(self, f: impl FnOnce(&mut Cart)) {
        self.cart.update(f);
        let table = self.table.get_untracked();
        self.cart
            .with_untracked(|cart| browser_storage::save_cart(table.as_deref(), cart));
    }

    pub fn add_meal(self, meal: &Meal) {
        let id = meal.base.id.as_string();
        self.update_cart(|cart| cart.add_meal(&id, meal.name(), meal.price, &meal.category));
    }

    pub fn add_customised(self, meal: &Meal, option: Option<String>, note: Option<String>) {
        let id = meal.base.id.as_string();
        self.update_cart(|cart| {
            cart.add_customised(
                &id,
                meal.name(),
                meal.price,
                &meal.category,
                option.as_deref(),
                note.as_deref(),
                now_millis(),
            )
        });
    }

    pub fn add_misc(self, name: &str, price: &str) -> bool {
        let mut result = Ok(());
        self.update_cart(|cart| result = cart.add_misc(name, price, now_millis()));
        match result {
            Ok(()) => true,
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    pub fn hold(self) {
        let table = self.table.get_untracked();
        let mut cart = self.cart.get_untracked();
        let mut held = self.held.get_untracked();
        match held.hold(&mut cart, table.clone(), Utc::now()) {
            Ok(_) => {
                browser_storage::save_held(&held);
                self.held.set(held);
                self.update_cart(|c| *c = cart);
                self.inform("Order held".to_string());
            }
            Err(e) => self.fail(e),
        }
    }

    /// Restores a held ticket; its items join the cart of the ticket's table.
    pub fn resume(self, id: i64) {
        let mut held = self.held.get_untracked();
        let Some((resumed, table)) = held.resume(id) else {
            return;
        };
        browser_storage::save_held(&held);
        self.held.set(held);
        self.select_table(table);
        self.update_cart(|cart| cart.items.extend(resumed.items));
    }

    pub fn discard_held(self, id: i64) {
        let mut held = self.held.get_untracked();
        held.0.retain(|t| t.id != id);
        browser_storage::save_held(&held);
        self.held.set(held);
    }

    pub fn adjustments(&self) -> BillAdjustments {
        bill_adjustments(
            &self.discount_kind.get(),
            &self.discount_value.get(),
            self.service_enabled.get(),
            self.service_rate.get(),
        )
    }

    /// Stacked view of what the table has already ordered
    pub fn bill(&self) -> Cart {
        self.bill_lines.with(|lines| Cart::from_unpaid_lines(lines))
    }

    /// Totals of the sent bill plus the cart not yet sent, less any shares
    /// already taken
    pub fn totals(&self) -> Totals {
        let subtotal =
            self.bill_lines.with(|l| lines_total(l.iter())) + self.cart.with(|c| c.subtotal());
        compute_totals(subtotal, &self.adjustments()).less_shares(self.shares_paid.get())
    }

    pub fn method(&self) -> PaymentMethod {
        PaymentMethod::parse(&self.payment_method.get_untracked()).unwrap_or_default()
    }

    /// Sends the cart to the kitchen. `Ok(None)` when there was nothing to send.
    async fn send_cart(self) -> Result<Option<GroupedOrderResponse>, String> {
        let cart = self.cart.get_untracked();
        if cart.is_empty() {
            return Ok(None);
        }
        let table = self.table.get_untracked();
        let request = GroupedOrderRequest {
            table_number: table.clone(),
            order_type: order_type_for(table.as_deref(), self.order_type.get_untracked()),
            items: cart.to_order_items(),
        };
        request.validate()?;
        let response = api::place_order(&request).await?;
        self.update_cart(|c| c.clear());
        log::info!("Placed batch {} ({} rows)", response.batch_id, response.line_ids.len());
        Ok(Some(response))
    }

    pub fn place_order_command(self) {
        self.busy.set(true);
        spawn_local(async move {
            match self.send_cart().await {
                Ok(Some(_)) => {
                    self.inform("Order sent to the kitchen".to_string());
                    self.refresh_bill();
                    self.load_tables();
                }
                Ok(None) => self.fail("Cart is empty".to_string()),
                Err(e) => self.fail(e),
            }
            self.busy.set(false);
        });
    }

    /// Sends any pending cart, then charges every unpaid row with the
    /// current discount and service. Returns the receipt text.
    async fn complete_payment(self) -> Result<String, String> {
        let table = self.table.get_untracked();
        let pending = self.cart.get_untracked();
        let placed = self.send_cart().await?;
        let method = self.method();
        let adjustments = self.adjustments();

        let (item_ids, bill, shares_paid) = match &table {
            Some(t) => {
                let lines: Vec<OrderLine> = api::fetch_table_orders(t)
                    .await?
                    .into_iter()
                    .filter(OrderLine::is_unpaid)
                    .collect();
                if lines.is_empty() {
                    return Err(format!("{} has nothing to pay", t));
                }
                let balance = api::fetch_balance(t).await?;
                (
                    lines.iter().map(|l| l.id.clone()).collect::<Vec<_>>(),
                    Cart::from_unpaid_lines(&lines),
                    balance.shares_paid,
                )
            }
            None => match placed {
                Some(response) => (response.line_ids, pending, 0.0),
                None => return Err("Cart is empty".to_string()),
            },
        };

        let result = api::mark_paid(&MarkPaidRequest {
            table_number: table.clone(),
            item_ids,
            payment_method: method,
            adjustments,
        })
        .await?;
        log::info!("Paid {:.2} for {} rows", result.amount, result.paid_items);

        let totals = compute_totals(bill.subtotal(), &adjustments).less_shares(shares_paid);
        let receipt = Receipt::new(table, &bill, totals, method, Utc::now());
        Ok(receipt.render_text(RECEIPT_WIDTH))
    }

    pub fn complete_payment_command(self) {
        self.busy.set(true);
        spawn_local(async move {
            match self.complete_payment().await {
                Ok(text) => {
                    self.receipt.set(Some(text));
                    self.discount_value.set(String::new());
                    self.inform("Payment complete".to_string());
                    self.refresh_bill();
                    self.load_tables();
                }
                Err(e) => {
                    self.fail(e);
                    self.refresh_bill();
                }
            }
            self.busy.set(false);
        });
    }

    pub fn close_table_command(self) {
        let Some(table) = self.table.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::close_table(&table).await {
                Ok(result) => {
                    self.inform(format!("{} closed ({} rows)", table, result.affected));
                    self.select_table(None);
                    self.load_tables();
                }
                Err(e) => self.fail(e),
            }
        });
    }

    pub fn clear_unpaid_command(self) {
        let Some(table) = self.table.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::clear_unpaid(&table).await {
                Ok(result) => {
                    self.inform(format!("{} unpaid item(s) removed", result.affected));
                    self.refresh_bill();
                    self.load_tables();
                }
                Err(e) => self.fail(e),
            }
        });
    }

    pub fn transfer_command(self, new_table: String) {
        let Some(old_table) = self.table.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::transfer_table(&old_table, &new_table).await {
                Ok(result) => {
                    self.inform(format!("Moved {} row(s) to {}", result.moved, new_table));
                    self.select_table(Some(new_table));
                    self.load_tables();
                }
                Err(e) => self.fail(e),
            }
        });
    }

    /// Pays the chosen unpaid rows at their line prices.
    pub fn split_pay_command(self, item_ids: Vec<String>, on_done: impl Fn() + 'static) {
        let method = self.method();
        spawn_local(async move {
            match api::split_pay(item_ids, method).await {
                Ok(result) => {
                    self.inform(format!("Paid {} item(s)", result.paid_items));
                    self.refresh_bill();
                    on_done();
                }
                Err(e) => self.fail(e),
            }
        });
    }

    pub fn report_done(self, redo: bool) {
        self.inform(if redo {
            "Report saved, item sent again".to_string()
        } else {
            "Report saved".to_string()
        });
        self.refresh_bill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_meal::aggregate::{MealDto, MealIngredient};

    fn meal(name: &str, category: &str) -> Meal {
        Meal::new_for_insert(&MealDto {
            name: name.to_string(),
            price: 5.0,
            category: category.to_string(),
            ingredients: vec![MealIngredient {
                ingredient: "Eggs".to_string(),
                quantity: 1.0,
            }],
            ..Default::default()
        })
    }

    #[test]
    fn test_filter_menu_by_category() {
        let menu = vec![meal("Full English", "breakfast"), meal("Latte", "drinks")];
        let shown = filter_menu(&menu, "Drinks", "");
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name(), "Latte");
    }

    #[test]
    fn test_search_spans_all_categories() {
        let menu = vec![meal("Full English", "breakfast"), meal("English Tea", "drinks")];
        assert_eq!(filter_menu(&menu, "breakfast", "english").len(), 2);
    }

    #[test]
    fn test_bill_adjustments_ignores_blank_discount() {
        let adj = bill_adjustments("percent", "", true, 12.5);
        assert!(adj.discount.is_none());
        assert!(adj.service_enabled);
        assert_eq!(adj.service_rate, 12.5);

        let adj = bill_adjustments("amount", "£3", false, 10.0);
        assert_eq!(
            adj.discount,
            Some(Discount {
                kind: DiscountKind::Amount,
                value: 3.0
            })
        );
    }

    #[test]
    fn test_order_type_follows_table() {
        assert_eq!(order_type_for(Some("Table 1"), OrderType::Takeaway), OrderType::DineIn);
        assert_eq!(order_type_for(None, OrderType::DineIn), OrderType::Takeaway);
        assert_eq!(order_type_for(Some("Table 1"), OrderType::Delivery), OrderType::Delivery);
    }
}
