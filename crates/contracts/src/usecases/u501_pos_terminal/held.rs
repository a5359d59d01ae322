use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::{Cart, CartItem};

/// Cart parked at the till without being sent to the kitchen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldTicket {
    pub id: i64,
    pub table: Option<String>,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

/// Newest first. Persisted by the till under `held_orders`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeldTickets(pub Vec<HeldTicket>);

impl HeldTickets {
    /// Parks the cart and empties it. Ids are creation millis, bumped when
    /// two holds land in the same millisecond.
    pub fn hold(&mut self, cart: &mut Cart, table: Option<String>, now: DateTime<Utc>) -> Result<i64, String> {
        if cart.is_empty() {
            return Err("Nothing to hold".into());
        }
        let mut id = now.timestamp_millis();
        while self.0.iter().any(|t| t.id == id) {
            id += 1;
        }
        let ticket = HeldTicket {
            id,
            table,
            total: cart.subtotal(),
            items: std::mem::take(&mut cart.items),
            created_at: now,
        };
        self.0.insert(0, ticket);
        Ok(id)
    }

    /// Removes the ticket and returns its items as a cart.
    pub fn resume(&mut self, id: i64) -> Option<(Cart, Option<String>)> {
        let position = self.0.iter().position(|t| t.id == id)?;
        let ticket = self.0.remove(position);
        Some((Cart { items: ticket.items }, ticket.table))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_and_resume() {
        let now = Utc::now();
        let mut held = HeldTickets::default();
        let mut cart = Cart::new();
        assert!(held.hold(&mut cart, None, now).is_err());

        cart.add_meal("m1", "Latte", 3.0, "drinks");
        let first = held.hold(&mut cart, Some("Table 3".into()), now).unwrap();
        assert!(cart.is_empty());

        cart.add_meal("m2", "Toast", 1.5, "meals");
        let second = held.hold(&mut cart, None, now).unwrap();
        assert_ne!(first, second);
        assert_eq!(held.0[0].id, second);
        assert_eq!(held.0[1].total, 3.0);

        let (resumed, table) = held.resume(first).unwrap();
        assert_eq!(resumed.items[0].name, "Latte");
        assert_eq!(table.as_deref(), Some("Table 3"));
        assert_eq!(held.len(), 1);
        assert!(held.resume(first).is_none());
    }
}
