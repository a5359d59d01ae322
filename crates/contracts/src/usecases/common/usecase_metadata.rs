/// Identification of a use case for logs and UI labels
pub trait UseCaseMetadata {
    /// Index (e.g. "u501")
    fn usecase_index() -> &'static str;

    /// Technical name (e.g. "pos_terminal")
    fn usecase_name() -> &'static str;

    /// Name shown in the UI
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Full name like "u501_pos_terminal"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
