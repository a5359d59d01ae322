//! Till workflow: build a cart, adjust the bill, place and settle orders.

pub mod cart;
pub mod held;
pub mod meal_options;
pub mod receipt;
pub mod request;
pub mod split;
pub mod totals;

pub use cart::{Cart, CartItem};
pub use totals::{BillAdjustments, Discount, DiscountKind, Totals};

use crate::usecases::common::UseCaseMetadata;

pub struct PosTerminal;

impl UseCaseMetadata for PosTerminal {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "pos_terminal"
    }

    fn display_name() -> &'static str {
        "POS"
    }

    fn description() -> &'static str {
        "Order entry, bill adjustments, splits and payment"
    }
}
