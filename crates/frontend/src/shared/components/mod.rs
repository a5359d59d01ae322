pub mod money_cell;
pub mod page_header;
pub mod pagination_controls;
pub mod stat_card;

pub use money_cell::TableCellMoney;
pub use page_header::{ErrorBox, PageHeader};
pub use pagination_controls::PaginationControls;
pub use stat_card::{StatCard, StatTone};
