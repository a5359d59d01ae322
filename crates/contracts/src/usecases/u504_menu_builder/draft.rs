use serde::{Deserialize, Serialize};

use crate::domain::a002_meal::aggregate::Meal;
use crate::shared::money::format_gbp;

pub const DEFAULT_SECTIONS: &[&str] = &["Starters", "Mains", "Desserts"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuTemplate {
    #[default]
    Classic,
    Elegant,
    Modern,
    Chalkboard,
}

impl MenuTemplate {
    pub const ALL: [MenuTemplate; 4] = [
        MenuTemplate::Classic,
        MenuTemplate::Elegant,
        MenuTemplate::Modern,
        MenuTemplate::Chalkboard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuTemplate::Classic => "Classic B&W",
            MenuTemplate::Elegant => "Elegant",
            MenuTemplate::Modern => "Bold Modern",
            MenuTemplate::Chalkboard => "Chalkboard",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            MenuTemplate::Classic => "menu-sheet--classic",
            MenuTemplate::Elegant => "menu-sheet--elegant",
            MenuTemplate::Modern => "menu-sheet--modern",
            MenuTemplate::Chalkboard => "menu-sheet--chalkboard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub meal_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub allergens: String,
}

impl From<&Meal> for MenuEntry {
    fn from(meal: &Meal) -> Self {
        Self {
            meal_id: meal.base.id.value().to_string(),
            name: meal.name().to_string(),
            price: meal.price,
            allergens: meal.allergens.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSection {
    pub name: String,
    pub items: Vec<MenuEntry>,
}

/// Menu being arranged; kept in browser storage between visits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDraft {
    pub title: String,
    pub sections: Vec<MenuSection>,
    #[serde(default)]
    pub template: MenuTemplate,
}

impl Default for MenuDraft {
    fn default() -> Self {
        Self {
            title: "Menu".into(),
            sections: DEFAULT_SECTIONS
                .iter()
                .map(|name| MenuSection { name: name.to_string(), items: Vec::new() })
                .collect(),
            template: MenuTemplate::Classic,
        }
    }
}

impl MenuDraft {
    fn section_mut(&mut self, section: &str) -> Option<&mut MenuSection> {
        self.sections.iter_mut().find(|s| s.name.eq_ignore_ascii_case(section.trim()))
    }

    /// Returns false when the section is unknown or already lists the meal.
    pub fn add(&mut self, section: &str, entry: MenuEntry) -> bool {
        match self.section_mut(section) {
            Some(target) if !target.items.iter().any(|i| i.meal_id == entry.meal_id) => {
                target.items.push(entry);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, section: &str, meal_id: &str) -> bool {
        let Some(target) = self.section_mut(section) else {
            return false;
        };
        let before = target.items.len();
        target.items.retain(|i| i.meal_id != meal_id);
        target.items.len() != before
    }

    /// Moves an entry up (`-1`) or down (`1`) inside its section.
    pub fn shift(&mut self, section: &str, meal_id: &str, step: isize) {
        if let Some(target) = self.section_mut(section) {
            if let Some(from) = target.items.iter().position(|i| i.meal_id == meal_id) {
                let to = from.saturating_add_signed(step).min(target.items.len() - 1);
                let entry = target.items.remove(from);
                target.items.insert(to, entry);
            }
        }
    }

    pub fn move_to(&mut self, from: &str, to: &str, meal_id: &str) -> bool {
        let entry = self
            .section_mut(from)
            .and_then(|s| s.items.iter().find(|i| i.meal_id == meal_id).cloned());
        match entry {
            Some(entry) if self.add(to, entry.clone()) => self.remove(from, meal_id),
            _ => false,
        }
    }

    pub fn add_section(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.section_mut(name).is_some() {
            return false;
        }
        self.sections.push(MenuSection { name: name.to_string(), items: Vec::new() });
        true
    }

    /// Drops entries whose meal is gone and refreshes names and prices.
    pub fn sync_with(&mut self, meals: &[Meal]) {
        for section in &mut self.sections {
            section.items.retain_mut(|entry| {
                match meals.iter().find(|m| m.base.id.value().to_string() == entry.meal_id) {
                    Some(meal) => {
                        *entry = MenuEntry::from(meal);
                        true
                    }
                    None => false,
                }
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.items.is_empty())
    }

    /// Plain text preview; empty sections are left out.
    pub fn render_text(&self, width: usize) -> String {
        let mut out = format!("{:^width$}\n", self.title.to_uppercase(), width = width);
        for section in self.sections.iter().filter(|s| !s.items.is_empty()) {
            out.push('\n');
            out.push_str(&section.name);
            out.push('\n');
            out.push_str(&"-".repeat(width));
            out.push('\n');
            for item in &section.items {
                let price = format_gbp(item.price);
                let room = width.saturating_sub(price.chars().count() + 1);
                let name: String = item.name.chars().take(room).collect();
                let dots = width.saturating_sub(name.chars().count() + price.chars().count());
                out.push_str(&format!("{}{}{}\n", name, ".".repeat(dots), price));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, price: f64) -> MenuEntry {
        MenuEntry { meal_id: id.into(), name: name.into(), price, allergens: "None".into() }
    }

    #[test]
    fn test_add_refuses_duplicates_and_unknown_sections() {
        let mut draft = MenuDraft::default();
        assert!(draft.add("mains", entry("m1", "Sunday Roast", 15.0)));
        assert!(!draft.add("Mains", entry("m1", "Sunday Roast", 15.0)));
        assert!(!draft.add("Sides", entry("m2", "Chips", 3.5)));
        assert!(draft.add("Starters", entry("m1", "Sunday Roast", 15.0)));
        assert!(draft.add_section("Sides"));
        assert!(!draft.add_section(" sides "));
        assert!(draft.add("Sides", entry("m2", "Chips", 3.5)));
    }

    #[test]
    fn test_shift_and_move_between_sections() {
        let mut draft = MenuDraft::default();
        draft.add("Mains", entry("m1", "Roast", 15.0));
        draft.add("Mains", entry("m2", "Pie", 12.0));
        draft.add("Mains", entry("m3", "Fish", 13.0));

        draft.shift("Mains", "m3", -1);
        let ids: Vec<&str> = draft.sections[1].items.iter().map(|i| i.meal_id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m3", "m2"]);
        draft.shift("Mains", "m1", -1);
        draft.shift("Mains", "m2", 1);
        assert_eq!(draft.sections[1].items[0].meal_id, "m1");
        assert_eq!(draft.sections[1].items[2].meal_id, "m2");

        assert!(draft.move_to("Mains", "Desserts", "m2"));
        assert_eq!(draft.sections[1].items.len(), 2);
        assert_eq!(draft.sections[2].items[0].name, "Pie");
        assert!(!draft.move_to("Mains", "Desserts", "m9"));
        assert!(draft.remove("Desserts", "m2"));
        assert!(!draft.remove("Desserts", "m2"));
    }

    #[test]
    fn test_render_text_lines_up_prices() {
        let mut draft = MenuDraft::default();
        assert!(draft.is_empty());
        draft.add("Mains", entry("m1", "Pie", 12.0));
        let text = draft.render_text(20);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].trim(), "MENU");
        assert_eq!(lines[2], "Mains");
        assert_eq!(lines[4], "Pie...........£12.00");
        assert!(!text.contains("Starters"));
    }
}
