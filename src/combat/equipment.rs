//! Equipment: stat ranges, weight, and the per-kind roll formulas
//!
//! Weapons, shields and armour share one record. The kind only selects which
//! formula row is used for a roll.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::combat::constants::*;
use crate::core::error::{Result, TourneyError};
use crate::core::random::RandomSource;

/// Equipment slot / catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Shield,
    Armour,
}

impl ItemKind {
    /// All kinds, in the order equipped items are rolled
    pub const ALL: [ItemKind; 3] = [ItemKind::Weapon, ItemKind::Shield, ItemKind::Armour];

    /// Plural label, also the catalog table name
    pub fn plural(self) -> &'static str {
        match self {
            ItemKind::Weapon => "weapons",
            ItemKind::Shield => "shields",
            ItemKind::Armour => "armours",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Shield => "shield",
            ItemKind::Armour => "armour",
        };
        f.write_str(label)
    }
}

/// One value per item kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerKind<T> {
    pub weapon: T,
    pub shield: T,
    pub armour: T,
}

impl<T> PerKind<T> {
    pub fn from_fn(mut f: impl FnMut(ItemKind) -> T) -> Self {
        Self {
            weapon: f(ItemKind::Weapon),
            shield: f(ItemKind::Shield),
            armour: f(ItemKind::Armour),
        }
    }

    /// Iterate `(kind, value)` pairs in `ItemKind::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (ItemKind, &T)> {
        ItemKind::ALL.into_iter().map(move |kind| (kind, &self[kind]))
    }
}

impl<T> Index<ItemKind> for PerKind<T> {
    type Output = T;

    fn index(&self, kind: ItemKind) -> &T {
        match kind {
            ItemKind::Weapon => &self.weapon,
            ItemKind::Shield => &self.shield,
            ItemKind::Armour => &self.armour,
        }
    }
}

impl<T> IndexMut<ItemKind> for PerKind<T> {
    fn index_mut(&mut self, kind: ItemKind) -> &mut T {
        match kind {
            ItemKind::Weapon => &mut self.weapon,
            ItemKind::Shield => &mut self.shield,
            ItemKind::Armour => &mut self.armour,
        }
    }
}

/// A piece of equipment. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    name: String,
    kind: ItemKind,
    min_stat: f64,
    max_stat: f64,
    weight: f64,
    value: u32,
}

impl Equipment {
    /// Build a validated piece of equipment
    ///
    /// Weight must be positive (every formula divides by it or its root) and
    /// the stat range must be non-negative with `min_stat <= max_stat`.
    pub fn new(
        name: impl Into<String>,
        kind: ItemKind,
        min_stat: f64,
        max_stat: f64,
        weight: f64,
        value: u32,
    ) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: String| TourneyError::InvalidEquipment {
            name: name.clone(),
            reason,
        };

        if !weight.is_finite() || weight <= 0.0 {
            return Err(invalid(format!("weight {weight} must be positive")));
        }
        if !min_stat.is_finite() || !max_stat.is_finite() || min_stat < 0.0 {
            return Err(invalid(format!(
                "stats {min_stat}..{max_stat} must be finite and non-negative"
            )));
        }
        if min_stat > max_stat {
            return Err(invalid(format!(
                "min_stat {min_stat} exceeds max_stat {max_stat}"
            )));
        }

        Ok(Self {
            name,
            kind,
            min_stat,
            max_stat,
            weight,
            value,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn min_stat(&self) -> f64 {
        self.min_stat
    }

    pub fn max_stat(&self) -> f64 {
        self.max_stat
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Sale price in gold
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Defence contributed by this item for one exchange
    pub fn roll_defend(&self, rng: &mut impl RandomSource) -> f64 {
        let r = rng.uniform();
        match self.kind {
            ItemKind::Armour | ItemKind::Shield => {
                if r <= CRITICAL_HIT_THRESHOLD {
                    self.max_stat * GEAR_CRITICAL_DEFENCE * self.weight / GEAR_WEIGHT_DIVISOR
                } else if r >= CRITICAL_FAILURE_THRESHOLD {
                    0.0
                } else {
                    let spread = (self.max_stat - self.min_stat) * rng.uniform() + self.min_stat;
                    spread * self.weight / GEAR_WEIGHT_DIVISOR
                }
            }
            ItemKind::Weapon => {
                let glancing = self.min_stat * WEAPON_GLANCING_DEFENCE;
                if r <= CRITICAL_HIT_THRESHOLD {
                    self.max_stat * WEAPON_CRITICAL_DEFENCE * self.weight / WEAPON_WEIGHT_DIVISOR
                } else if r >= WEAPON_FAILURE_THRESHOLD {
                    glancing * self.weight / WEAPON_WEIGHT_DIVISOR
                } else {
                    // Only reachable for a NaN draw; kept so the formula table stays whole.
                    let spread = (self.max_stat - glancing) * rng.uniform() + glancing;
                    spread * self.weight / WEAPON_WEIGHT_DIVISOR
                }
            }
        }
    }

    /// Damage contributed by this item for one exchange
    pub fn roll_attack(&self, rng: &mut impl RandomSource) -> f64 {
        let r = rng.uniform();
        let root_weight = self.weight.sqrt();
        match self.kind {
            ItemKind::Armour | ItemKind::Shield => {
                if r <= CRITICAL_HIT_THRESHOLD {
                    self.max_stat / root_weight
                } else if r >= CRITICAL_FAILURE_THRESHOLD {
                    0.0
                } else {
                    self.min_stat / root_weight
                }
            }
            ItemKind::Weapon => {
                let glancing = self.min_stat * WEAPON_GLANCING_ATTACK;
                if r <= CRITICAL_HIT_THRESHOLD {
                    self.max_stat * WEAPON_CRITICAL_ATTACK / root_weight
                } else if r >= WEAPON_FAILURE_THRESHOLD {
                    glancing / root_weight
                } else {
                    let spread = (self.max_stat - glancing) * rng.uniform() + glancing;
                    spread / root_weight
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn armour() -> Equipment {
        Equipment::new("Hauberk", ItemKind::Armour, 4.0, 10.0, 25.0, 40).unwrap()
    }

    fn sword() -> Equipment {
        Equipment::new("Arming Sword", ItemKind::Weapon, 4.0, 10.0, 25.0, 30).unwrap()
    }

    #[test]
    fn test_zero_weight_rejected() {
        let result = Equipment::new("Feather", ItemKind::Shield, 1.0, 2.0, 0.0, 1);
        assert!(matches!(result, Err(TourneyError::InvalidEquipment { .. })));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = Equipment::new("Oddity", ItemKind::Shield, 5.0, 2.0, 3.0, 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_armour_critical_defence() {
        let mut rng = ScriptedRandom::new([0.05], 0.5);
        // 10 * 2.5 * 25 / 50
        assert!(close(armour().roll_defend(&mut rng), 12.5));
    }

    #[test]
    fn test_armour_critical_failure_defence() {
        let mut rng = ScriptedRandom::new([0.95, 0.5], 0.5);
        assert_eq!(armour().roll_defend(&mut rng), 0.0);
        // Failure does not consume a second draw
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn test_armour_standard_defence_interpolates() {
        let mut rng = ScriptedRandom::new([0.5, 0.5], 0.0);
        // ((10 - 4) * 0.5 + 4) * 25 / 50
        assert!(close(armour().roll_defend(&mut rng), 3.5));
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_threshold_boundary_is_critical() {
        let mut rng = ScriptedRandom::new([0.10], 0.5);
        assert!(close(armour().roll_attack(&mut rng), 2.0));
    }

    #[test]
    fn test_armour_standard_attack_uses_min_stat_only() {
        let mut rng = ScriptedRandom::new([0.5, 0.99], 0.5);
        // 4 / sqrt(25), no interpolation and no second draw
        assert!(close(armour().roll_attack(&mut rng), 0.8));
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn test_armour_attack_failure() {
        let mut rng = ScriptedRandom::new([0.9], 0.5);
        assert_eq!(armour().roll_attack(&mut rng), 0.0);
    }

    #[test]
    fn test_weapon_critical_attack() {
        let mut rng = ScriptedRandom::new([0.01], 0.5);
        // 10 * 3.5 / 5
        assert!(close(sword().roll_attack(&mut rng), 7.0));
    }

    #[test]
    fn test_weapon_non_critical_attack_is_glancing() {
        for r in [0.11, 0.5, 0.95] {
            let mut rng = ScriptedRandom::new([r], 0.5);
            // 4 * 1.5 / 5
            assert!(close(sword().roll_attack(&mut rng), 1.2));
            assert_eq!(rng.remaining(), 0);
        }
    }

    #[test]
    fn test_weapon_defence_branches() {
        let mut crit = ScriptedRandom::new([0.0], 0.5);
        // 10 * 1.5 * 25 / 100
        assert!(close(sword().roll_defend(&mut crit), 3.75));

        let mut glance = ScriptedRandom::new([0.95], 0.5);
        // 4 * 0.5 * 25 / 100
        assert!(close(sword().roll_defend(&mut glance), 0.5));
    }

    #[test]
    fn test_per_kind_indexing() {
        let mut counts: PerKind<u32> = PerKind::default();
        counts[ItemKind::Shield] += 2;
        assert_eq!(counts.shield, 2);
        assert_eq!(counts[ItemKind::Weapon], 0);

        let labels = PerKind::from_fn(|kind| kind.plural());
        let collected: Vec<_> = labels.iter().map(|(_, label)| *label).collect();
        assert_eq!(collected, vec!["weapons", "shields", "armours"]);
    }
}
