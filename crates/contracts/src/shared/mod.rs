pub mod item_classifier;
pub mod money;
