pub mod d400_daily_summary;
