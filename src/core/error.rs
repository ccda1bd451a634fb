use thiserror::Error;

use crate::combat::ItemKind;

#[derive(Error, Debug)]
pub enum TourneyError {
    #[error("Invalid equipment '{name}': {reason}")]
    InvalidEquipment { name: String, reason: String },

    #[error("No {kind} in the catalog within one level of level {level}")]
    NoEligibleItems { kind: ItemKind, level: u32 },

    #[error("No {0} equipped")]
    EmptySlot(ItemKind),

    #[error("No {kind} at inventory index {index} (inventory holds {len})")]
    InventoryIndex {
        kind: ItemKind,
        index: usize,
        len: usize,
    },

    #[error("The vendor has no {kind} at index {index} (stock holds {len})")]
    VendorIndex {
        kind: ItemKind,
        index: usize,
        len: usize,
    },

    #[error("No knight at index {index} (arena holds {len})")]
    KnightIndex { index: usize, len: usize },

    #[error("Knight name must not be empty")]
    EmptyName,

    #[error("At least {required} knights are required, arena holds {present}")]
    NotEnoughKnights { required: usize, present: usize },

    #[error("Not enough gold: {needed} needed, {available} available")]
    InsufficientGold { needed: u64, available: u64 },

    #[error("Nothing to heal: {0}")]
    NothingToHeal(String),

    #[error("A stat has already been trained since the last round")]
    AlreadyTrained,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TourneyError>;
