//! Till screen: categories and menu on the left, cart and bill on the right,
//! everything else in dialogs.

mod bill_panel;
mod dialogs;
mod menu_panel;
mod view;

pub use view::PosTerminalView;
