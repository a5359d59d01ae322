pub mod aggregate;
pub mod plate_cost;
