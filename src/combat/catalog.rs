//! Equipment catalog and level-gated item generation
//!
//! The catalog is a TOML document with one array of tables per kind:
//!
//! ```toml
//! [[weapons]]
//! name = "Arming Sword"
//! min_stat = 7.0
//! max_stat = 14.0
//! weight = 5.0
//! value = 21
//! level = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::combat::equipment::{Equipment, ItemKind, PerKind};
use crate::core::error::{Result, TourneyError};
use crate::core::random::RandomSource;

const BUILTIN_CATALOG: &str = include_str!("../../data/equipment.toml");

/// One catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub min_stat: f64,
    pub max_stat: f64,
    pub weight: f64,
    pub value: u32,
    pub level: u32,
}

impl CatalogEntry {
    /// Whether the entry may be generated at the given arena level (±1)
    pub fn eligible_at(&self, level: u32) -> bool {
        self.level.abs_diff(level) <= 1
    }

    /// Build the equipment this entry describes
    pub fn to_equipment(&self, kind: ItemKind) -> Result<Equipment> {
        Equipment::new(
            self.name.clone(),
            kind,
            self.min_stat,
            self.max_stat,
            self.weight,
            self.value,
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    weapons: Vec<CatalogEntry>,
    #[serde(default)]
    shields: Vec<CatalogEntry>,
    #[serde(default)]
    armours: Vec<CatalogEntry>,
}

/// All catalog entries, grouped by kind
#[derive(Debug, Clone, Default)]
pub struct EquipmentCatalog {
    entries: PerKind<Vec<CatalogEntry>>,
}

impl EquipmentCatalog {
    /// Build a catalog, rejecting entries that would make invalid equipment
    pub fn new(entries: PerKind<Vec<CatalogEntry>>) -> Result<Self> {
        for (kind, list) in entries.iter() {
            for entry in list {
                entry.to_equipment(kind)?;
            }
        }
        Ok(Self { entries })
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(PerKind {
            weapon: file.weapons,
            shield: file.shields,
            armour: file.armours,
        })
    }

    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            "Loaded catalog from {}: {} weapons, {} shields, {} armours",
            path.display(),
            catalog.entries.weapon.len(),
            catalog.entries.shield.len(),
            catalog.entries.armour.len()
        );
        Ok(catalog)
    }

    /// The catalog compiled into the crate (levels 0 to 10)
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn entries(&self, kind: ItemKind) -> &[CatalogEntry] {
        &self.entries[kind]
    }

    /// Entries of `kind` within one level of `level`, in catalog order
    pub fn eligible(&self, kind: ItemKind, level: u32) -> Vec<&CatalogEntry> {
        self.entries[kind]
            .iter()
            .filter(|entry| entry.eligible_at(level))
            .collect()
    }

    /// Generate a fresh item of `kind` for an arena at `level`
    ///
    /// Fails with `NoEligibleItems` when nothing in the catalog is within one
    /// level; no fallback item is substituted.
    pub fn generate(
        &self,
        kind: ItemKind,
        level: u32,
        rng: &mut impl RandomSource,
    ) -> Result<Equipment> {
        let eligible = self.eligible(kind, level);
        let entry = rng
            .choose(&eligible)
            .ok_or(TourneyError::NoEligibleItems { kind, level })?;
        entry.to_equipment(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;

    const SMALL: &str = r#"
        [[weapons]]
        name = "Stick"
        min_stat = 1.0
        max_stat = 2.0
        weight = 2.0
        value = 1
        level = 0

        [[weapons]]
        name = "Spear"
        min_stat = 5.0
        max_stat = 9.0
        weight = 6.0
        value = 20
        level = 3

        [[shields]]
        name = "Lid"
        min_stat = 1.0
        max_stat = 1.0
        weight = 1.0
        value = 0
        level = 1
    "#;

    #[test]
    fn test_builtin_catalog_covers_every_level() {
        let catalog = EquipmentCatalog::builtin().unwrap();
        for kind in ItemKind::ALL {
            for level in 0..=11 {
                assert!(
                    !catalog.eligible(kind, level).is_empty(),
                    "no {kind} near level {level}"
                );
            }
        }
    }

    #[test]
    fn test_eligibility_window() {
        let catalog = EquipmentCatalog::from_toml_str(SMALL).unwrap();
        let names = |level| {
            catalog
                .eligible(ItemKind::Weapon, level)
                .iter()
                .map(|e| e.name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(0), vec!["Stick"]);
        assert_eq!(names(1), vec!["Stick"]);
        assert!(names(2).contains(&"Spear".to_string()));
        assert_eq!(names(4), vec!["Spear"]);
        assert!(names(5).is_empty());
    }

    #[test]
    fn test_generate_uses_choice() {
        let catalog = EquipmentCatalog::from_toml_str(SMALL).unwrap();
        let mut rng = ScriptedRandom::constant(0.5).with_choices([0]);
        let item = catalog.generate(ItemKind::Shield, 0, &mut rng).unwrap();
        assert_eq!(item.name(), "Lid");
        assert_eq!(item.kind(), ItemKind::Shield);
    }

    #[test]
    fn test_generate_without_candidates_fails() {
        let catalog = EquipmentCatalog::from_toml_str(SMALL).unwrap();
        let mut rng = ScriptedRandom::constant(0.5);
        let result = catalog.generate(ItemKind::Armour, 0, &mut rng);
        assert!(matches!(
            result,
            Err(TourneyError::NoEligibleItems {
                kind: ItemKind::Armour,
                level: 0
            })
        ));
    }

    #[test]
    fn test_invalid_entry_rejected_on_load() {
        let bad = r#"
            [[armours]]
            name = "Air"
            min_stat = 1.0
            max_stat = 2.0
            weight = 0.0
            value = 0
            level = 0
        "#;
        assert!(matches!(
            EquipmentCatalog::from_toml_str(bad),
            Err(TourneyError::InvalidEquipment { .. })
        ));
    }
}
