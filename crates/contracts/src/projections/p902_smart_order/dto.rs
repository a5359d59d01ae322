use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::domain::a008_supplier::aggregate::Supplier;
use crate::domain::a009_supplier_order::aggregate::{SupplierOrder, SupplierOrderLine};
use crate::projections::p901_restock_list::dto::{RestockLine, RestockList};
use crate::shared::money::round_pennies;

pub const UNASSIGNED_SUPPLIER: &str = "Unassigned";

/// Restock lines going to one supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierGroup {
    /// `None` for lines no supplier carries
    pub supplier_id: Option<String>,
    pub supplier_name: String,
    pub days_until_delivery: Option<u32>,
    pub lines: Vec<RestockLine>,
    pub subtotal: f64,
}

impl SupplierGroup {
    pub fn is_assigned(&self) -> bool {
        self.supplier_id.is_some()
    }

    pub fn to_order(&self, placed_by: &str) -> SupplierOrder {
        let lines = self
            .lines
            .iter()
            .map(|l| SupplierOrderLine {
                stock_id: l.stock_id.clone(),
                ingredient: l.ingredient.clone(),
                unit: l.unit.clone(),
                quantity: l.order_amount,
                unit_price: l.unit_price,
                line_total: l.estimated_cost,
            })
            .collect();
        SupplierOrder::new(self.supplier_id.clone(), &self.supplier_name, lines, placed_by)
    }
}

/// GET /api/ordering/smart-order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SmartOrder {
    pub groups: Vec<SupplierGroup>,
    pub total: f64,
}

impl SmartOrder {
    pub fn unassigned(&self) -> Option<&SupplierGroup> {
        self.groups.iter().find(|g| !g.is_assigned())
    }
}

/// Supplier carrying the ingredient with the soonest delivery; name breaks ties.
/// Suppliers with no delivery days come last.
pub fn best_supplier<'a>(ingredient: &str, suppliers: &'a [Supplier], today: Weekday) -> Option<&'a Supplier> {
    suppliers
        .iter()
        .filter(|s| !s.base.metadata.is_deleted && s.supplies_item(ingredient))
        .min_by(|a, b| {
            let gap = |s: &Supplier| s.days_until_delivery(today).unwrap_or(u32::MAX);
            gap(a)
                .cmp(&gap(b))
                .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
        })
}

/// Splits the restock list by supplier. Lines with nothing to buy are
/// dropped; lines nobody carries end up in a trailing unassigned group.
pub fn build_smart_order(list: &RestockList, suppliers: &[Supplier], today: Weekday) -> SmartOrder {
    let mut groups: Vec<SupplierGroup> = Vec::new();
    let mut unassigned: Vec<RestockLine> = Vec::new();

    for line in list.lines.iter().filter(|l| l.order_amount > 0.0) {
        let Some(supplier) = best_supplier(&line.ingredient, suppliers, today) else {
            unassigned.push(line.clone());
            continue;
        };
        let id = supplier.base.id.value().to_string();
        match groups.iter_mut().find(|g| g.supplier_id.as_deref() == Some(id.as_str())) {
            Some(group) => group.lines.push(line.clone()),
            None => groups.push(SupplierGroup {
                supplier_id: Some(id),
                supplier_name: supplier.name().to_string(),
                days_until_delivery: supplier.days_until_delivery(today),
                lines: vec![line.clone()],
                subtotal: 0.0,
            }),
        }
    }
    groups.sort_by(|a, b| {
        a.days_until_delivery
            .unwrap_or(u32::MAX)
            .cmp(&b.days_until_delivery.unwrap_or(u32::MAX))
            .then_with(|| a.supplier_name.to_lowercase().cmp(&b.supplier_name.to_lowercase()))
    });
    if !unassigned.is_empty() {
        groups.push(SupplierGroup {
            supplier_id: None,
            supplier_name: UNASSIGNED_SUPPLIER.to_string(),
            days_until_delivery: None,
            lines: unassigned,
            subtotal: 0.0,
        });
    }
    for group in &mut groups {
        group.subtotal = round_pennies(group.lines.iter().map(|l| l.estimated_cost).sum());
    }
    let total = round_pennies(groups.iter().map(|g| g.subtotal).sum());
    SmartOrder { groups, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_stock_item::aggregate::{StockItem, StockItemDto};
    use crate::domain::a008_supplier::aggregate::SupplierDto;
    use crate::projections::p901_restock_list::dto::build_restock_list;

    fn stock(name: &str, quantity: f64, price: f64) -> StockItem {
        StockItem::new_for_insert(&StockItemDto {
            ingredient: name.into(),
            quantity,
            unit: "kg".into(),
            price,
            minimum_level: Some(5.0),
            ..Default::default()
        })
    }

    fn supplier(name: &str, days: &[&str], supplies: &[&str]) -> Supplier {
        Supplier::new_for_insert(&SupplierDto {
            name: name.into(),
            delivery_days: days.iter().map(|d| d.to_string()).collect(),
            supplies: supplies.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_soonest_delivery_wins() {
        let suppliers = vec![
            supplier("Brakes", &["Friday"], &["Flour", "Eggs"]),
            supplier("Booker", &["Wednesday"], &["flour"]),
            supplier("Anglia", &[], &["Flour"]),
        ];
        let chosen = best_supplier("Flour", &suppliers, Weekday::Tue).unwrap();
        assert_eq!(chosen.name(), "Booker");
        let chosen = best_supplier("Flour", &suppliers, Weekday::Thu).unwrap();
        assert_eq!(chosen.name(), "Brakes");
        assert!(best_supplier("Bacon", &suppliers, Weekday::Mon).is_none());
    }

    #[test]
    fn test_groups_by_supplier_with_unassigned_last() {
        let items = vec![
            stock("Flour", 2.0, 4.0),
            stock("Eggs", 1.0, 2.0),
            stock("Bacon", 0.0, 0.0),
            stock("Milk", 20.0, 10.0),
        ];
        let list = build_restock_list(&items);
        let suppliers = vec![
            supplier("Brakes", &["Friday"], &["Eggs"]),
            supplier("Booker", &["Wednesday"], &["Flour"]),
        ];
        let order = build_smart_order(&list, &suppliers, Weekday::Mon);

        let names: Vec<&str> = order.groups.iter().map(|g| g.supplier_name.as_str()).collect();
        assert_eq!(names, vec!["Booker", "Brakes", UNASSIGNED_SUPPLIER]);
        assert_eq!(order.groups[0].days_until_delivery, Some(2));
        // 3 kg of flour at 2.00
        assert_eq!(order.groups[0].subtotal, 6.0);
        // 4 eggs at 2.00
        assert_eq!(order.groups[1].subtotal, 8.0);
        assert_eq!(order.unassigned().unwrap().lines[0].ingredient, "Bacon");
        assert_eq!(order.total, 14.0);

        let placed = order.groups[0].to_order("manager");
        assert_eq!(placed.supplier_name, "Booker");
        assert_eq!(placed.lines[0].quantity, 3.0);
        assert_eq!(placed.total, 6.0);
    }
}
