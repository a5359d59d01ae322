use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::BaseAggregate;
use crate::shared::money::round_pennies;

crate::uuid_aggregate_id!(StockItemId);

pub const DEFAULT_MINIMUM_LEVEL: f64 = 5.0;
pub const DEFAULT_ALLERGENS: &str = "None";

/// Ingredient held in stock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItem {
    #[serde(flatten)]
    pub base: BaseAggregate<StockItemId>,
    pub quantity: f64,
    pub unit: String,
    /// Price paid for the stocked quantity
    pub price: f64,
    pub calories_per_100g: Option<f64>,
    pub allergens: String,
    pub minimum_level: f64,
    pub expiry_date: Option<NaiveDate>,
    pub is_prepped: bool,
}

impl StockItem {
    pub fn new_for_insert(dto: &StockItemDto) -> Self {
        let id = StockItemId::new_v4();
        let code = format!("STK-{}", &id.value().simple().to_string()[..8]);
        let mut item = Self {
            base: BaseAggregate::new(id, code, String::new()),
            quantity: 0.0,
            unit: String::new(),
            price: 0.0,
            calories_per_100g: None,
            allergens: DEFAULT_ALLERGENS.to_string(),
            minimum_level: DEFAULT_MINIMUM_LEVEL,
            expiry_date: None,
            is_prepped: false,
        };
        item.update(dto);
        item
    }

    pub fn ingredient(&self) -> &str {
        &self.base.description
    }

    pub fn update(&mut self, dto: &StockItemDto) {
        let price = round_pennies(dto.price.max(0.0));
        if (self.price - price).abs() > f64::EPSILON && !self.base.description.is_empty() {
            self.base.events.record("price_changed");
        }
        self.base.description = dto.ingredient.trim().to_string();
        self.quantity = dto.quantity;
        self.unit = dto.unit.trim().to_string();
        self.price = price;
        self.calories_per_100g = dto.calories_per_100g;
        self.allergens = dto
            .allergens
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_ALLERGENS)
            .to_string();
        self.minimum_level = dto
            .minimum_level
            .filter(|m| m.is_finite() && *m >= 0.0)
            .unwrap_or(DEFAULT_MINIMUM_LEVEL);
        self.expiry_date = dto.expiry_date;
        self.is_prepped = dto.is_prepped;
    }

    pub fn set_price(&mut self, price: f64) -> Result<(), String> {
        if !price.is_finite() || price < 0.0 {
            return Err("Price must be zero or more".into());
        }
        self.price = round_pennies(price);
        self.base.events.record("price_changed");
        Ok(())
    }

    /// Adds a delivery; `cost` is what was paid for it.
    pub fn receive(&mut self, quantity: f64, cost: f64) -> Result<(), String> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(format!("Delivered quantity of {} must be greater than zero", self.ingredient()));
        }
        self.quantity += quantity;
        self.price = round_pennies(self.price + cost.max(0.0));
        self.base.events.record("received");
        Ok(())
    }

    /// Takes `amount` out of stock at the current unit price and returns the value taken.
    pub fn take(&mut self, amount: f64) -> Result<f64, String> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(format!("Amount of {} must be greater than zero", self.ingredient()));
        }
        if amount > self.quantity + 1e-9 {
            return Err(format!(
                "Only {} {} of {} in stock",
                self.quantity,
                self.unit,
                self.ingredient()
            ));
        }
        let value = round_pennies(self.unit_price().unwrap_or(0.0) * amount);
        self.quantity = (self.quantity - amount).max(0.0);
        self.price = round_pennies((self.price - value).max(0.0));
        self.base.events.record("used");
        Ok(value)
    }

    /// Price of one unit; `None` while nothing is in stock.
    pub fn unit_price(&self) -> Option<f64> {
        if self.quantity > 0.0 {
            Some(self.price / self.quantity)
        } else {
            None
        }
    }

    /// An item expires at the end of its expiry day.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        matches!(self.expiry_date, Some(date) if date < today)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.is_empty() {
            return Err("Ingredient name is required".into());
        }
        if self.quantity.is_nan() || self.quantity <= 0.0 {
            return Err("Quantity must be greater than zero".into());
        }
        if let Some(calories) = self.calories_per_100g {
            if calories < 0.0 {
                return Err("Calories cannot be negative".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

crate::impl_aggregate_root!(StockItem, StockItemId, "a003", "stock_item", "Stock item", "Stock");

/// Payload of POST /api/stock and PUT /api/stock/:id
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StockItemDto {
    #[serde(alias = "name")]
    pub ingredient: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub calories_per_100g: Option<f64>,
    #[serde(default)]
    pub allergens: Option<String>,
    #[serde(default, alias = "minimum")]
    pub minimum_level: Option<f64>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_prepped: bool,
}

/// Payload of PUT /api/stock/:id/price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockPriceDto {
    pub price: f64,
}

/// Result of DELETE /api/stock/expired
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiredRemoval {
    pub removed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> StockItemDto {
        StockItemDto {
            ingredient: " Free Range Eggs ".into(),
            quantity: 30.0,
            unit: "pcs".into(),
            price: 7.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let item = StockItem::new_for_insert(&dto());
        assert_eq!(item.ingredient(), "Free Range Eggs");
        assert_eq!(item.minimum_level, DEFAULT_MINIMUM_LEVEL);
        assert_eq!(item.allergens, "None");
        assert_eq!(item.unit_price(), Some(0.25));
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let mut bad = dto();
        bad.quantity = 0.0;
        assert!(StockItem::new_for_insert(&bad).validate().is_err());
    }

    #[test]
    fn test_is_expired_after_expiry_day() {
        let mut with_expiry = dto();
        with_expiry.expiry_date = NaiveDate::from_ymd_opt(2024, 3, 10);
        let item = StockItem::new_for_insert(&with_expiry);
        assert!(!item.is_expired(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
        assert!(item.is_expired(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));
        assert!(!StockItem::new_for_insert(&dto()).is_expired(NaiveDate::MAX));
    }

    #[test]
    fn test_set_price_rejects_negative() {
        let mut item = StockItem::new_for_insert(&dto());
        assert!(item.set_price(-1.0).is_err());
        assert!(item.set_price(9.999).is_ok());
        assert_eq!(item.price, 10.0);
    }

    #[test]
    fn test_price_changes_record_events() {
        let mut item = StockItem::new_for_insert(&dto());
        assert!(item.base.events.pending().is_empty());

        item.update(&dto());
        assert!(item.base.events.pending().is_empty());

        item.set_price(12.5).unwrap();
        assert_eq!(item.base.events.drain(), vec!["price_changed".to_string()]);
        assert!(item.base.events.pending().is_empty());

        let mut changed = dto();
        changed.price += 1.0;
        item.update(&changed);
        assert_eq!(item.base.events.pending(), ["price_changed".to_string()]);
    }

    #[test]
    fn test_receive_and_take_move_value() {
        let mut item = StockItem::new_for_insert(&dto());
        item.receive(30.0, 6.0).unwrap();
        assert_eq!(item.quantity, 60.0);
        assert_eq!(item.price, 13.5);

        // 13.50 over 60 eggs is 0.225 each
        assert_eq!(item.take(20.0).unwrap(), 4.5);
        assert_eq!(item.quantity, 40.0);
        assert_eq!(item.price, 9.0);
        assert_eq!(item.base.events.drain(), vec!["received".to_string(), "used".to_string()]);

        assert_eq!(item.take(41.0).unwrap_err(), "Only 40 pcs of Free Range Eggs in stock");
        assert!(item.receive(0.0, 1.0).is_err());
        assert_eq!(item.quantity, 40.0);
    }
}
