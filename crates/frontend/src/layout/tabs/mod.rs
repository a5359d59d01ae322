//! Tab management
//!
//! - `page` wraps one opened tab and hides it when inactive
//! - `registry` maps tab keys to page components
//! - `tab_labels` holds the titles shown in the sidebar and tab bar

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, tab_label_for_key};
