pub mod d400_daily_summary;

pub use d400_daily_summary::ui::DailySummaryDashboard;
