mod card;
mod view;

pub use view::KitchenDisplayView;
