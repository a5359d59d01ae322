use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::domain::common::BaseAggregate;

crate::uuid_aggregate_id!(SupplierId);

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Accepts "mon", "Monday", "MONDAY" and so on
pub fn parse_day(value: &str) -> Option<Weekday> {
    value.trim().parse::<Weekday>().ok()
}

/// Wholesaler the kitchen buys from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(flatten)]
    pub base: BaseAggregate<SupplierId>,
    pub website: String,
    pub phone: String,
    pub contact_name: String,
    /// Canonical day names, Monday first
    pub delivery_days: Vec<String>,
    /// Stock ingredient names this supplier can deliver
    pub supplies: Vec<String>,
}

impl Supplier {
    pub fn new_for_insert(dto: &SupplierDto) -> Self {
        let id = SupplierId::new_v4();
        let code = format!("SUP-{}", &id.value().simple().to_string()[..8]);
        let mut supplier = Self {
            base: BaseAggregate::new(id, code, String::new()),
            website: String::new(),
            phone: String::new(),
            contact_name: String::new(),
            delivery_days: Vec::new(),
            supplies: Vec::new(),
        };
        supplier.update(dto);
        supplier
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    /// Known days are stored canonically and in week order; anything else
    /// is kept as typed so `validate` can name it.
    pub fn update(&mut self, dto: &SupplierDto) {
        self.base.description = dto.name.trim().to_string();
        self.website = dto.website.trim().to_string();
        self.phone = dto.phone.trim().to_string();
        self.contact_name = dto.contact_name.trim().to_string();

        let mut known: Vec<Weekday> = Vec::new();
        let mut unknown: Vec<String> = Vec::new();
        for raw in dto.delivery_days.iter().map(|d| d.trim()).filter(|d| !d.is_empty()) {
            match parse_day(raw) {
                Some(day) if !known.contains(&day) => known.push(day),
                Some(_) => {}
                None => unknown.push(raw.to_string()),
            }
        }
        known.sort_by_key(|d| d.num_days_from_monday());
        self.delivery_days = known.into_iter().map(|d| day_name(d).to_string()).collect();
        self.delivery_days.extend(unknown);

        self.supplies.clear();
        for item in dto.supplies.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            if !self.supplies_item(item) {
                self.supplies.push(item.to_string());
            }
        }
    }

    pub fn supplies_item(&self, ingredient: &str) -> bool {
        let wanted = ingredient.trim();
        self.supplies.iter().any(|s| s.eq_ignore_ascii_case(wanted))
    }

    /// Days from `today` to the next delivery; 0 when a van comes today.
    pub fn days_until_delivery(&self, today: Weekday) -> Option<u32> {
        self.delivery_days
            .iter()
            .filter_map(|d| parse_day(d))
            .map(|d| (d.num_days_from_monday() + 7 - today.num_days_from_monday()) % 7)
            .min()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.is_empty() {
            return Err("Supplier name is required".into());
        }
        if let Some(bad) = self.delivery_days.iter().find(|d| parse_day(d).is_none()) {
            return Err(format!("'{}' is not a day of the week", bad));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

crate::impl_aggregate_root!(Supplier, SupplierId, "a008", "supplier", "Supplier", "Suppliers");

/// Payload of POST /api/suppliers and PUT /api/suppliers/:id
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SupplierDto {
    pub name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub delivery_days: Vec<String>,
    #[serde(default)]
    pub supplies: Vec<String>,
}

impl From<&Supplier> for SupplierDto {
    fn from(s: &Supplier) -> Self {
        Self {
            name: s.name().to_string(),
            website: s.website.clone(),
            phone: s.phone.clone(),
            contact_name: s.contact_name.clone(),
            delivery_days: s.delivery_days.clone(),
            supplies: s.supplies.clone(),
        }
    }
}

/// Names of the week for the delivery day picker
pub fn week_day_names() -> Vec<&'static str> {
    WEEK.iter().map(|d| day_name(*d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier(days: &[&str], supplies: &[&str]) -> Supplier {
        Supplier::new_for_insert(&SupplierDto {
            name: " Brakes ".into(),
            delivery_days: days.iter().map(|d| d.to_string()).collect(),
            supplies: supplies.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_days_are_canonical_and_ordered() {
        let s = supplier(&["fri", "Monday", "MON", " wed "], &[]);
        assert_eq!(s.name(), "Brakes");
        assert_eq!(s.delivery_days, vec!["Monday", "Wednesday", "Friday"]);
        assert!(s.validate().is_ok());

        let bad = supplier(&["Mon", "Someday"], &[]);
        assert_eq!(bad.validate().unwrap_err(), "'Someday' is not a day of the week");
    }

    #[test]
    fn test_days_until_delivery_wraps_the_week() {
        let s = supplier(&["Monday", "Thursday"], &[]);
        assert_eq!(s.days_until_delivery(Weekday::Mon), Some(0));
        assert_eq!(s.days_until_delivery(Weekday::Tue), Some(2));
        assert_eq!(s.days_until_delivery(Weekday::Fri), Some(3));
        assert_eq!(supplier(&[], &[]).days_until_delivery(Weekday::Mon), None);
    }

    #[test]
    fn test_supplies_match_ignores_case() {
        let s = supplier(&[], &["Flour", "flour", " Eggs "]);
        assert_eq!(s.supplies, vec!["Flour", "Eggs"]);
        assert!(s.supplies_item("FLOUR"));
        assert!(s.supplies_item("eggs"));
        assert!(!s.supplies_item("Bacon"));
    }

    #[test]
    fn test_name_is_required() {
        let s = Supplier::new_for_insert(&SupplierDto::default());
        assert_eq!(s.validate().unwrap_err(), "Supplier name is required");
        assert_eq!(week_day_names().len(), 7);
    }
}
