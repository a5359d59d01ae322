//! Meal details (MVVM)
//!
//! - model.rs: API calls (fetch, save)
//! - view_model.rs: form state and commands
//! - view.rs: the Leptos component

mod model;
mod view;
mod view_model;

pub use view::MealDetails;
pub use view_model::MealDetailsViewModel;
