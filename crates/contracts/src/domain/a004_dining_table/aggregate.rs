use serde::{Deserialize, Serialize};

use crate::domain::common::BaseAggregate;

crate::uuid_aggregate_id!(DiningTableId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Free => "free",
            TableStatus::Occupied => "occupied",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "free" | "available" => Some(TableStatus::Free),
            "occupied" | "busy" => Some(TableStatus::Occupied),
            _ => None,
        }
    }
}

/// Restaurant table. Orders refer to it by `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(flatten)]
    pub base: BaseAggregate<DiningTableId>,
    pub zone: String,
    pub seats: i32,
    pub status: TableStatus,
}

impl DiningTable {
    pub fn new_for_insert(name: &str, zone: &str, seats: i32) -> Self {
        let name = name.trim().to_string();
        let code = format!("TBL-{}", name.to_lowercase().replace(' ', "-"));
        Self {
            base: BaseAggregate::new(DiningTableId::new_v4(), code, name),
            zone: zone.trim().to_string(),
            seats,
            status: TableStatus::Free,
        }
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    pub fn is_free(&self) -> bool {
        self.status == TableStatus::Free
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.is_empty() {
            return Err("Table name is required".into());
        }
        if self.seats < 1 {
            return Err("A table needs at least one seat".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

crate::impl_aggregate_root!(DiningTable, DiningTableId, "a004", "dining_table", "Table", "Tables");

/// Builds the initial floor: `Table 1..=count`, zones assigned round-robin.
pub fn seed_tables(count: u32, zones: &[String], seats: i32) -> Vec<DiningTable> {
    (1..=count)
        .map(|n| {
            let zone = if zones.is_empty() {
                "Main"
            } else {
                zones[(n as usize - 1) % zones.len()].as_str()
            };
            DiningTable::new_for_insert(&format!("Table {}", n), zone, seats)
        })
        .collect()
}

/// Payload of POST /api/tables/:id/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatusDto {
    pub status: TableStatus,
}

/// Unpaid balance of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableTotal {
    pub table_number: String,
    pub total: f64,
    pub unpaid_items: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_tables_round_robin_zones() {
        let zones = vec!["Window".to_string(), "Patio".to_string()];
        let tables = seed_tables(3, &zones, 4);
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[0].name(), "Table 1");
        assert_eq!(tables[0].zone, "Window");
        assert_eq!(tables[1].zone, "Patio");
        assert_eq!(tables[2].zone, "Window");
        assert_eq!(tables[2].base.code, "TBL-table-3");
        assert!(tables.iter().all(|t| t.is_free() && t.validate().is_ok()));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TableStatus::parse("Occupied"), Some(TableStatus::Occupied));
        assert_eq!(TableStatus::parse("free"), Some(TableStatus::Free));
        assert_eq!(TableStatus::parse("closed"), None);
        let dto: TableStatusDto = serde_json::from_str(r#"{"status":"occupied"}"#).unwrap();
        assert_eq!(dto.status, TableStatus::Occupied);
    }
}
