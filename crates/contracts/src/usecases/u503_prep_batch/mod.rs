//! Prep batches: turn stock ingredients into prepped stock.

pub mod plan;

pub use plan::{plan_batch, prep_due, prepped_stock_dto, BatchPlan, PrepDue, PrepareBatchRequest, PrepareBatchResult};

use crate::usecases::common::UseCaseMetadata;

pub struct PrepBatch;

impl UseCaseMetadata for PrepBatch {
    fn usecase_index() -> &'static str {
        "u503"
    }

    fn usecase_name() -> &'static str {
        "prep_batch"
    }

    fn display_name() -> &'static str {
        "Prep list"
    }

    fn description() -> &'static str {
        "Make prepped items from stock"
    }
}
