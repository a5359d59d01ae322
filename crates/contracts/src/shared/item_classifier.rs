/// Words that mark a menu item as a drink when they appear in its name.
pub const DRINK_KEYWORDS: &[&str] = &[
    "vodka", "whiskey", "wine", "beer", "coke", "fanta", "sprite", "rum", "gin", "tonic", "juice",
    "water", "soda", "red bull", "tequila", "liqueur", "prosecco", "champagne", "alcohol", "lager",
    "brandy", "cider",
];

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive whole-word match on the item name, so "Apple Crumble"
/// does not count as rum.
pub fn is_drink(name: &str) -> bool {
    let name_words = words(name);
    DRINK_KEYWORDS.iter().any(|keyword| {
        let keyword_words = words(keyword);
        name_words
            .windows(keyword_words.len())
            .any(|window| window == keyword_words.as_slice())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_drink() {
        assert!(is_drink("Diet Coke"));
        assert!(is_drink("House RED WINE 175ml"));
        assert!(is_drink("Red Bull"));
        assert!(is_drink("Gin & Tonic"));
        assert!(!is_drink("Full English"));
        assert!(!is_drink("Sticky Toffee Pudding"));
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        assert!(!is_drink("Apple Crumble"));
        assert!(!is_drink("Bull's Eye Steak"));
        assert!(is_drink("Spiced Rum"));
    }
}
