pub mod catalog;
pub mod constants;
pub mod equipment;
pub mod knight;
pub mod resolution;

pub use catalog::{CatalogEntry, EquipmentCatalog};
pub use equipment::{Equipment, ItemKind, PerKind};
pub use knight::{normalize_name, BaseStats, Knight, Loot, TrainingStat};
pub use resolution::{
    resolve_exchange, resolve_strike, roll_exchange, ExchangeEvent, ExchangeResult, Guard,
    RolledExchange, Strike, StrikeOutcome, StrikeResolution,
};
