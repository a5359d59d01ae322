use serde::{Deserialize, Serialize};

use crate::domain::a003_stock_item::aggregate::StockItem;
use crate::shared::money::round_pennies;

/// How soon a stock line needs buying
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestockUrgency {
    Urgent,
    OrderSoon,
    CanWait,
}

impl RestockUrgency {
    pub fn for_levels(quantity: f64, minimum_level: f64) -> Self {
        if quantity <= 0.0 {
            RestockUrgency::Urgent
        } else if quantity <= minimum_level {
            RestockUrgency::OrderSoon
        } else {
            RestockUrgency::CanWait
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RestockUrgency::Urgent => "Urgent",
            RestockUrgency::OrderSoon => "Order soon",
            RestockUrgency::CanWait => "Can wait",
        }
    }
}

/// Row of the restock list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockLine {
    pub stock_id: String,
    pub ingredient: String,
    pub unit: String,
    pub quantity: f64,
    pub minimum_level: f64,
    pub urgency: RestockUrgency,
    /// Whole units to buy to get back to the minimum
    pub order_amount: f64,
    pub unit_price: f64,
    pub estimated_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RestockList {
    pub lines: Vec<RestockLine>,
    pub estimated_total: f64,
}

impl RestockList {
    pub fn urgent_count(&self) -> usize {
        self.lines.iter().filter(|l| l.urgency == RestockUrgency::Urgent).count()
    }
}

fn restock_line(item: &StockItem) -> RestockLine {
    let order_amount = (item.minimum_level - item.quantity).ceil().max(0.0);
    let unit_price = item.unit_price().unwrap_or(item.price);
    RestockLine {
        stock_id: item.base.id.value().to_string(),
        ingredient: item.ingredient().to_string(),
        unit: item.unit.clone(),
        quantity: item.quantity,
        minimum_level: item.minimum_level,
        urgency: RestockUrgency::for_levels(item.quantity, item.minimum_level),
        order_amount,
        unit_price,
        estimated_cost: round_pennies(unit_price * order_amount),
    }
}

/// Items at or below their minimum, urgent first then by name.
pub fn build_restock_list(items: &[StockItem]) -> RestockList {
    let mut lines: Vec<RestockLine> = items
        .iter()
        .filter(|i| !i.base.metadata.is_deleted)
        .map(restock_line)
        .filter(|l| l.urgency != RestockUrgency::CanWait)
        .collect();
    lines.sort_by(|a, b| {
        a.urgency
            .cmp(&b.urgency)
            .then_with(|| a.ingredient.to_lowercase().cmp(&b.ingredient.to_lowercase()))
    });
    let estimated_total = round_pennies(lines.iter().map(|l| l.estimated_cost).sum());
    RestockList { lines, estimated_total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_stock_item::aggregate::StockItemDto;

    fn item(name: &str, quantity: f64, minimum: f64, price: f64) -> StockItem {
        StockItem::new_for_insert(&StockItemDto {
            ingredient: name.into(),
            quantity,
            unit: "kg".into(),
            price,
            minimum_level: Some(minimum),
            ..Default::default()
        })
    }

    #[test]
    fn test_urgency_thresholds() {
        assert_eq!(RestockUrgency::for_levels(0.0, 5.0), RestockUrgency::Urgent);
        assert_eq!(RestockUrgency::for_levels(-1.0, 5.0), RestockUrgency::Urgent);
        assert_eq!(RestockUrgency::for_levels(5.0, 5.0), RestockUrgency::OrderSoon);
        assert_eq!(RestockUrgency::for_levels(5.1, 5.0), RestockUrgency::CanWait);
        assert_eq!(RestockUrgency::OrderSoon.label(), "Order soon");
    }

    #[test]
    fn test_list_order_and_amounts() {
        let items = vec![
            item("Flour", 2.5, 5.0, 10.0),
            item("Bacon", 0.0, 4.0, 6.0),
            item("Eggs", 20.0, 5.0, 4.0),
            item("Butter", 1.0, 3.0, 2.0),
        ];
        let list = build_restock_list(&items);
        let names: Vec<&str> = list.lines.iter().map(|l| l.ingredient.as_str()).collect();
        assert_eq!(names, vec!["Bacon", "Butter", "Flour"]);

        let bacon = &list.lines[0];
        assert_eq!(bacon.order_amount, 4.0);
        // Nothing on hand: falls back to the stored price.
        assert_eq!(bacon.estimated_cost, 24.0);

        let flour = &list.lines[2];
        assert_eq!(flour.order_amount, 3.0);
        assert_eq!(flour.unit_price, 4.0);
        assert_eq!(flour.estimated_cost, 12.0);

        assert_eq!(list.urgent_count(), 1);
        assert_eq!(list.estimated_total, 24.0 + 4.0 + 12.0);
    }
}
