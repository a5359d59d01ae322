pub mod api_utils;
pub mod browser_storage;
pub mod components;
pub mod date_utils;
pub mod icons;
