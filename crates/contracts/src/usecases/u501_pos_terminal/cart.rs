use serde::{Deserialize, Serialize};

use crate::domain::a005_order_line::aggregate::OrderLine;
use crate::domain::a005_order_line::requests::{GroupedOrderItem, MAX_LINE_QUANTITY};
use crate::shared::money::{parse_amount, round_pennies};

pub const MISC_CATEGORY: &str = "misc";
pub const DEFAULT_CATEGORY: &str = "meals";

/// Line of the till cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Cart-local identity; quantity edits and removal address it
    pub id: String,
    pub meal_id: Option<String>,
    pub name: String,
    /// Unit price
    pub price: f64,
    pub quantity: u32,
    pub category: String,
    #[serde(default)]
    pub options: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        round_pennies(self.price * self.quantity as f64)
    }

    /// Plain items stack; customised ones stay on their own line.
    fn is_plain(&self) -> bool {
        self.options.is_none() && self.note.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds one of a menu item. The same meal added plainly again bumps the quantity.
    pub fn add_meal(&mut self, meal_id: &str, name: &str, price: f64, category: &str) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.meal_id.as_deref() == Some(meal_id) && i.is_plain())
        {
            existing.quantity += 1;
            return;
        }
        self.items.push(CartItem {
            id: meal_id.to_string(),
            meal_id: Some(meal_id.to_string()),
            name: name.to_string(),
            price: round_pennies(price),
            quantity: 1,
            category: category.to_string(),
            options: None,
            note: None,
        });
    }

    /// Adds a customised item (chosen option and/or note) as its own line.
    pub fn add_customised(
        &mut self,
        meal_id: &str,
        name: &str,
        price: f64,
        category: &str,
        options: Option<&str>,
        note: Option<&str>,
        now_millis: i64,
    ) {
        let options = non_blank(options);
        let note = non_blank(note);
        if options.is_none() && note.is_none() {
            self.add_meal(meal_id, name, price, category);
            return;
        }
        self.items.push(CartItem {
            id: format!("{}-{}", meal_id, now_millis),
            meal_id: Some(meal_id.to_string()),
            name: name.to_string(),
            price: round_pennies(price),
            quantity: 1,
            category: category.to_string(),
            options,
            note,
        });
    }

    /// Adds an off-menu item typed at the till.
    pub fn add_misc(&mut self, name: &str, price_input: &str, now_millis: i64) -> Result<(), String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Item name is required".into());
        }
        let price = parse_amount(price_input)
            .filter(|p| *p >= 0.0)
            .ok_or_else(|| "Valid price is required".to_string())?;
        self.items.push(CartItem {
            id: format!("misc-{}", now_millis),
            meal_id: None,
            name: name.to_string(),
            price: round_pennies(price),
            quantity: 1,
            category: MISC_CATEGORY.to_string(),
            options: None,
            note: None,
        });
        Ok(())
    }

    /// Changes a line's quantity; it never drops below one.
    pub fn change_quantity(&mut self, id: &str, delta: i32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            let next = item.quantity as i64 + delta as i64;
            item.quantity = next.clamp(1, MAX_LINE_QUANTITY as i64) as u32;
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn subtotal(&self) -> f64 {
        round_pennies(self.items.iter().map(|i| i.price * i.quantity as f64).sum())
    }

    /// Lines of a grouped order request
    pub fn to_order_items(&self) -> Vec<GroupedOrderItem> {
        self.items
            .iter()
            .map(|i| GroupedOrderItem {
                meal_id: i.meal_id.clone(),
                meal_name: i.name.clone(),
                quantity: i.quantity,
                total_price: i.line_total(),
                category: Some(i.category.clone()),
                options: i.options.clone(),
                note: i.note.clone(),
            })
            .collect()
    }

    /// Rebuilds a read-only bill from a table's unpaid rows, stacking rows
    /// with the same name, unit price, options and note.
    pub fn from_unpaid_lines(lines: &[OrderLine]) -> Self {
        let mut cart = Cart::new();
        for line in lines.iter().filter(|l| l.is_unpaid()) {
            let unit_price = line.unit_price();
            let options = non_blank(line.options.as_deref());
            let note = non_blank(line.note.as_deref());
            let key = if options.is_none() && note.is_none() {
                format!("{}-{:.2}", line.meal_name, unit_price)
            } else {
                format!(
                    "{}-{:.2}|{}|{}",
                    line.meal_name,
                    unit_price,
                    options.as_deref().unwrap_or(""),
                    note.as_deref().unwrap_or("")
                )
            };
            match cart.items.iter_mut().find(|i| i.id == key) {
                Some(existing) => existing.quantity += line.quantity,
                None => cart.items.push(CartItem {
                    id: key,
                    meal_id: line.meal_id.clone(),
                    name: line.meal_name.clone(),
                    price: unit_price,
                    quantity: line.quantity,
                    category: if line.category.trim().is_empty() {
                        DEFAULT_CATEGORY.to_string()
                    } else {
                        line.category.clone()
                    },
                    options,
                    note,
                }),
            }
        }
        cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_order_line::aggregate::sample_line;

    #[test]
    fn test_add_meal_stacks_plain_items() {
        let mut cart = Cart::new();
        cart.add_meal("m1", "Latte", 3.2, "drinks");
        cart.add_meal("m1", "Latte", 3.2, "drinks");
        cart.add_meal("m2", "Toast", 1.5, "meals");
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), 7.9);
    }

    #[test]
    fn test_customised_items_get_own_line() {
        let mut cart = Cart::new();
        cart.add_meal("m1", "Full English", 9.5, "meals");
        cart.add_customised("m1", "Full English", 9.5, "meals", Some("Brown Bread"), Some(" no beans "), 1000);
        cart.add_meal("m1", "Full English", 9.5, "meals");
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[1].id, "m1-1000");
        assert_eq!(cart.items[1].note.as_deref(), Some("no beans"));

        // blank customisation behaves like a plain add
        cart.add_customised("m1", "Full English", 9.5, "meals", Some(""), None, 2000);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_misc_item_validation() {
        let mut cart = Cart::new();
        assert!(cart.add_misc("  ", "2.00", 1).is_err());
        assert!(cart.add_misc("Corkage", "-1", 1).is_err());
        assert!(cart.add_misc("Corkage", "abc", 1).is_err());
        assert!(cart.add_misc("Corkage", "£5", 42).is_ok());
        assert_eq!(cart.items[0].id, "misc-42");
        assert_eq!(cart.items[0].category, MISC_CATEGORY);
        assert_eq!(cart.items[0].meal_id, None);
    }

    #[test]
    fn test_change_quantity_clamps_at_one() {
        let mut cart = Cart::new();
        cart.add_meal("m1", "Latte", 3.0, "drinks");
        cart.change_quantity("m1", -5);
        assert_eq!(cart.items[0].quantity, 1);
        cart.change_quantity("m1", 4);
        assert_eq!(cart.items[0].quantity, 5);
        cart.change_quantity("m1", i32::MAX);
        assert_eq!(cart.items[0].quantity, MAX_LINE_QUANTITY);
        cart.remove("m1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_order_items_carry_line_totals() {
        let mut cart = Cart::new();
        cart.add_meal("m1", "Latte", 3.1, "drinks");
        cart.change_quantity("m1", 2);
        let items = cart.to_order_items();
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[0].total_price, 9.3);
        assert_eq!(items[0].category.as_deref(), Some("drinks"));
    }

    #[test]
    fn test_from_unpaid_lines_groups_by_name_and_unit_price() {
        let mut paid = sample_line("Latte", 1, 3.0);
        paid.paid = true;
        let lines = vec![
            sample_line("Latte", 2, 6.0),
            sample_line("Latte", 1, 3.0),
            // same name, different price (happy hour)
            sample_line("Latte", 1, 2.0),
            paid,
        ];
        let bill = Cart::from_unpaid_lines(&lines);
        assert_eq!(bill.items.len(), 2);
        assert_eq!(bill.items[0].id, "Latte-3.00");
        assert_eq!(bill.items[0].quantity, 3);
        assert_eq!(bill.items[1].quantity, 1);
        assert_eq!(bill.subtotal(), 11.0);
    }

    #[test]
    fn test_from_unpaid_lines_keeps_options_apart() {
        let mut brown = sample_line("Full English", 1, 9.5);
        brown.options = Some("Brown Bread".into());
        let mut white = sample_line("Full English", 1, 9.5);
        white.options = Some("White Bread".into());
        let mut another_brown = brown.clone();
        another_brown.id = "second".into();
        let mut noted = sample_line("Full English", 1, 9.5);
        noted.note = Some("Brown Bread".into());

        let bill = Cart::from_unpaid_lines(&[brown, white, another_brown, noted]);
        assert_eq!(bill.items.len(), 3);
        assert_eq!(bill.items[0].options.as_deref(), Some("Brown Bread"));
        assert_eq!(bill.items[0].quantity, 2);
        assert_eq!(bill.items[1].options.as_deref(), Some("White Bread"));
        assert_eq!(bill.items[2].options, None);
        assert_eq!(bill.items[2].note.as_deref(), Some("Brown Bread"));
        assert_eq!(bill.subtotal(), 38.0);
    }
}
