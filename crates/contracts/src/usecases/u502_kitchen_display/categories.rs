//! Category toggles on the kitchen screen.

pub const DEFAULT_CATEGORIES: [&str; 3] = ["meals", "drinks", "desserts"];

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Defaults followed by server categories, normalised and de-duplicated
/// with first-seen order kept.
pub fn merge_categories<'a>(server: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in DEFAULT_CATEGORIES.into_iter().chain(server) {
        let name = normalize(name);
        if !name.is_empty() && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// Keeps the previous selection where it still exists; defaults when none.
pub fn retain_active(all: &[String], previous: &[String]) -> Vec<String> {
    let defaults: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
    let wanted = if previous.is_empty() { &defaults[..] } else { previous };
    all.iter().filter(|c| wanted.contains(*c)).cloned().collect()
}

/// Flips one category, keeping the order of `all`.
pub fn toggle(all: &[String], active: &[String], category: &str) -> Vec<String> {
    let category = normalize(category);
    all.iter()
        .filter(|c| {
            let on = active.contains(*c);
            if **c == category {
                !on
            } else {
                on
            }
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_defaults_first() {
        let merged = merge_categories([" Drinks", "Specials", "specials", ""]);
        assert_eq!(merged, vec!["meals", "drinks", "desserts", "specials"]);
    }

    #[test]
    fn test_retain_and_toggle() {
        let all = merge_categories(["specials"]);
        let active = retain_active(&all, &[]);
        assert_eq!(active, vec!["meals", "drinks", "desserts"]);

        let active = toggle(&all, &active, "Drinks");
        assert_eq!(active, vec!["meals", "desserts"]);
        let active = toggle(&all, &active, "specials");
        assert_eq!(active, vec!["meals", "desserts", "specials"]);

        let stale = vec!["gone".to_string(), "meals".to_string()];
        assert_eq!(retain_active(&all, &stale), vec!["meals"]);
    }
}
