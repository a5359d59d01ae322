use super::{EntityMetadata, EventStore};

/// Aggregate root contract
///
/// Every catalogue aggregate (categories, meals, stock, tables) exposes its
/// identity, lifecycle metadata and the names used for storage and UI.
pub trait AggregateRoot {
    type Id;

    fn id(&self) -> Self::Id;

    /// Business code (e.g. "MEAL-0007")
    fn code(&self) -> &str;

    /// Display name of the record
    fn description(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    fn events(&self) -> &EventStore;

    fn events_mut(&mut self) -> &mut EventStore;

    /// Aggregate index (e.g. "a002")
    fn aggregate_index() -> &'static str;

    /// Collection name used for tables (e.g. "meal")
    fn collection_name() -> &'static str;

    /// Singular UI name
    fn element_name() -> &'static str;

    /// Plural UI name
    fn list_name() -> &'static str;

    /// Full system name (e.g. "a002_meal")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}

/// Implements [`AggregateRoot`] for a struct with a `base: BaseAggregate<Id>` field.
#[macro_export]
macro_rules! impl_aggregate_root {
    ($ty:ty, $id:ty, $index:literal, $collection:literal, $element:literal, $list:literal) => {
        impl $crate::domain::common::AggregateRoot for $ty {
            type Id = $id;

            fn id(&self) -> Self::Id {
                self.base.id
            }

            fn code(&self) -> &str {
                &self.base.code
            }

            fn description(&self) -> &str {
                &self.base.description
            }

            fn metadata(&self) -> &$crate::domain::common::EntityMetadata {
                &self.base.metadata
            }

            fn metadata_mut(&mut self) -> &mut $crate::domain::common::EntityMetadata {
                &mut self.base.metadata
            }

            fn events(&self) -> &$crate::domain::common::EventStore {
                &self.base.events
            }

            fn events_mut(&mut self) -> &mut $crate::domain::common::EventStore {
                &mut self.base.events
            }

            fn aggregate_index() -> &'static str {
                $index
            }

            fn collection_name() -> &'static str {
                $collection
            }

            fn element_name() -> &'static str {
                $element
            }

            fn list_name() -> &'static str {
                $list
            }
        }
    };
}
