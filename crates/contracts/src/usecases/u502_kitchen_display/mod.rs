//! Kitchen display: live batches, category filters, timers and prep counts.

pub mod batch;
pub mod categories;
pub mod elapsed;
pub mod prep_summary;
pub mod request;
pub mod row;

pub use batch::{batch_key, group_batches, open_batch_count, KitchenBatch};
pub use row::KitchenRow;

use crate::usecases::common::UseCaseMetadata;

pub struct KitchenDisplay;

impl UseCaseMetadata for KitchenDisplay {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "kitchen_display"
    }

    fn display_name() -> &'static str {
        "Kitchen"
    }

    fn description() -> &'static str {
        "Live order batches for the kitchen"
    }
}
