pub mod common;
pub mod u501_pos_terminal;
pub mod u502_kitchen_display;
pub mod u503_prep_batch;
pub mod u504_menu_builder;
