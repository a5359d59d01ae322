//! Printable menu put together from the meal list.

pub mod draft;

pub use draft::{MenuDraft, MenuEntry, MenuSection, MenuTemplate};

use crate::usecases::common::UseCaseMetadata;

pub struct MenuBuilder;

impl UseCaseMetadata for MenuBuilder {
    fn usecase_index() -> &'static str {
        "u504"
    }

    fn usecase_name() -> &'static str {
        "menu_builder"
    }

    fn display_name() -> &'static str {
        "Menu builder"
    }

    fn description() -> &'static str {
        "Arrange meals into a printed menu"
    }
}
