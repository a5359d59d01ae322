use serde::{Deserialize, Serialize};

use crate::domain::common::BaseAggregate;

crate::uuid_aggregate_id!(MenuCategoryId);

pub const DEFAULT_ICON: &str = "🍽️";

/// Which part of the menu a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    #[default]
    Meal,
    Drink,
    Dessert,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Meal => "meal",
            CategoryKind::Drink => "drink",
            CategoryKind::Dessert => "dessert",
        }
    }

    /// Lenient parse; anything unknown is a meal category.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "drink" | "drinks" => CategoryKind::Drink,
            "dessert" | "desserts" => CategoryKind::Dessert,
            _ => CategoryKind::Meal,
        }
    }
}

/// Normalised form used to compare category names (trimmed, lowercase).
pub fn normalize_category_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Menu category shown in the POS sidebar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    #[serde(flatten)]
    pub base: BaseAggregate<MenuCategoryId>,
    pub kind: CategoryKind,
    pub icon: String,
    pub sort_order: i32,
}

impl MenuCategory {
    pub fn new_for_insert(name: &str, kind: CategoryKind, icon: Option<String>, sort_order: i32) -> Self {
        let name = name.trim().to_string();
        let code = format!("CAT-{}", normalize_category_name(&name).replace(' ', "-"));
        let icon = icon
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_string());
        Self {
            base: BaseAggregate::new(MenuCategoryId::new_v4(), code, name),
            kind,
            icon,
            sort_order,
        }
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    pub fn normalized_name(&self) -> String {
        normalize_category_name(&self.base.description)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Category name is required".into());
        }
        if self.base.description.chars().count() > 40 {
            return Err("Category name must be at most 40 characters".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

crate::impl_aggregate_root!(
    MenuCategory,
    MenuCategoryId,
    "a001",
    "menu_category",
    "Category",
    "Categories"
);

/// Payload of POST /api/categories
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuCategoryDto {
    pub name: String,
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_defaults() {
        let category = MenuCategory::new_for_insert("  Hot Drinks ", CategoryKind::Drink, None, 3);
        assert_eq!(category.name(), "Hot Drinks");
        assert_eq!(category.base.code, "CAT-hot-drinks");
        assert_eq!(category.icon, DEFAULT_ICON);
        assert_eq!(category.normalized_name(), "hot drinks");
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let category = MenuCategory::new_for_insert("   ", CategoryKind::Meal, Some("🍳".into()), 0);
        assert!(category.validate().is_err());
    }

    #[test]
    fn test_kind_parse_is_lenient() {
        assert_eq!(CategoryKind::parse("Drinks"), CategoryKind::Drink);
        assert_eq!(CategoryKind::parse("dessert"), CategoryKind::Dessert);
        assert_eq!(CategoryKind::parse("breakfast"), CategoryKind::Meal);
    }

    #[test]
    fn test_dto_accepts_type_alias() {
        let dto: MenuCategoryDto =
            serde_json::from_str(r#"{"name":"Shakes","type":"drink","icon":"🥤"}"#).unwrap();
        assert_eq!(dto.kind.as_deref(), Some("drink"));
        assert_eq!(dto.sort_order, None);
    }
}
