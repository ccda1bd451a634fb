//! Knights: base stats, equipped gear, inventory, and what happens on a loss

use serde::{Deserialize, Serialize};
use std::mem;

use crate::combat::constants::*;
use crate::combat::equipment::{Equipment, ItemKind, PerKind};
use crate::core::error::{Result, TourneyError};
use crate::core::random::RandomSource;

/// Base stats a knight is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub health: u32,
    pub damage: u32,
    pub defence: u32,
    pub speed: u32,
}

impl BaseStats {
    /// Roll fresh stats: health, damage, defence, speed in that order
    pub fn roll(rng: &mut impl RandomSource) -> Self {
        let health = (HEALTH_SPAN * rng.uniform() + HEALTH_FLOOR) as u32;
        let damage = (DAMAGE_SPAN * rng.uniform() + DAMAGE_FLOOR) as u32;
        let defence = (DEFENCE_SPAN * rng.uniform() + DEFENCE_FLOOR) as u32;
        let speed = (SPEED_SPAN * rng.uniform() + SPEED_FLOOR) as u32;
        Self {
            health,
            damage,
            defence,
            speed,
        }
    }
}

/// Stat a knight can train between rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingStat {
    MaxHealth,
    Speed,
    Damage,
    Defence,
}

/// Everything a knocked-out knight forfeits to the victor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Loot {
    pub items: PerKind<Vec<Equipment>>,
    pub gold: u64,
}

impl Loot {
    pub fn item_count(&self) -> usize {
        self.items.iter().map(|(_, items)| items.len()).sum()
    }
}

/// Trim a raw name and capitalise each space-separated word
pub fn normalize_name(raw: &str) -> Result<String> {
    let name = raw
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    let name = name.trim();
    if name.is_empty() {
        return Err(TourneyError::EmptyName);
    }
    Ok(name.to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// A knight in the tournament
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Knight {
    name: String,
    gold: u64,
    health: u32,
    max_health: u32,
    damage: u32,
    defence: u32,
    speed: u32,
    /// Speed after the weight penalty, as of the last attack or defence
    current_speed: u32,
    /// Total weight of equipped items
    weight: f64,
    equipped: PerKind<Option<Equipment>>,
    inventory: PerKind<Vec<Equipment>>,
}

impl Knight {
    /// Create a knight with freshly rolled stats and no gear
    pub fn new(name: impl Into<String>, rng: &mut impl RandomSource) -> Result<Self> {
        Self::with_stats(name, BaseStats::roll(rng))
    }

    /// Create a knight with the given stats and no gear
    pub fn with_stats(name: impl Into<String>, stats: BaseStats) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TourneyError::EmptyName);
        }
        Ok(Self {
            name,
            gold: 0,
            health: stats.health,
            max_health: stats.health,
            damage: stats.damage,
            defence: stats.defence,
            speed: stats.speed,
            current_speed: stats.speed,
            weight: 0.0,
            equipped: PerKind::default(),
            inventory: PerKind::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn base_damage(&self) -> u32 {
        self.damage
    }

    pub fn base_defence(&self) -> u32 {
        self.defence
    }

    pub fn base_speed(&self) -> u32 {
        self.speed
    }

    pub fn current_speed(&self) -> u32 {
        self.current_speed
    }

    /// Total weight of equipped items
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn equipped(&self, kind: ItemKind) -> Option<&Equipment> {
        self.equipped[kind].as_ref()
    }

    /// Equipped items in weapon, shield, armour order
    pub fn equipped_items(&self) -> impl Iterator<Item = &Equipment> {
        ItemKind::ALL
            .into_iter()
            .filter_map(move |kind| self.equipped[kind].as_ref())
    }

    pub fn inventory(&self, kind: ItemKind) -> &[Equipment] {
        &self.inventory[kind]
    }

    /// Add gold, saturating at `u64::MAX`
    pub fn add_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Deduct gold, refusing to go below zero
    pub fn spend_gold(&mut self, amount: u64) -> Result<()> {
        if amount > self.gold {
            return Err(TourneyError::InsufficientGold {
                needed: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    /// Put an item at the tail of the inventory
    pub fn stash(&mut self, item: Equipment) {
        self.inventory[item.kind()].push(item);
    }

    /// Speed after the weight penalty: `trunc(speed² / √weight)`
    pub fn compute_speed(&mut self) -> u32 {
        self.current_speed = if self.weight > 0.0 {
            (f64::from(self.speed).powi(2) / self.weight.sqrt()) as u32
        } else {
            self.speed
        };
        self.current_speed
    }

    /// Roll an attack: `(speed, damage)`
    pub fn attack(&mut self, rng: &mut impl RandomSource) -> (u32, u32) {
        let speed = self.compute_speed();
        let mut damage = f64::from(self.damage);
        for item in self.equipped_items() {
            damage += item.roll_attack(rng);
        }
        (speed, damage as u32)
    }

    /// Roll a defence: `(speed, defence)`
    pub fn defend(&mut self, rng: &mut impl RandomSource) -> (u32, u32) {
        let speed = self.compute_speed();
        let mut defence = f64::from(self.defence);
        for item in self.equipped_items() {
            defence += item.roll_defend(rng);
        }
        (speed, defence as u32)
    }

    /// Equip an item in its kind's slot; a displaced item goes to the inventory
    pub fn equip(&mut self, item: Equipment) {
        let kind = item.kind();
        self.stow_equipped(kind);
        self.weight += item.weight();
        self.equipped[kind] = Some(item);
    }

    /// Move the equipped item of `kind` to the inventory tail
    pub fn unequip(&mut self, kind: ItemKind) -> Result<()> {
        if self.stow_equipped(kind) {
            Ok(())
        } else {
            Err(TourneyError::EmptySlot(kind))
        }
    }

    /// Equip the inventory item at `index`, stowing whatever it replaces
    pub fn equip_from_inventory(&mut self, kind: ItemKind, index: usize) -> Result<()> {
        let item = self.take_from_inventory(kind, index)?;
        self.equip(item);
        Ok(())
    }

    /// Sell the inventory item at `index`; returns the gold credited
    pub fn sell_item(&mut self, kind: ItemKind, index: usize) -> Result<u32> {
        let item = self.take_from_inventory(kind, index)?;
        self.add_gold(u64::from(item.value()));
        Ok(item.value())
    }

    /// Apply incoming damage. Returns the forfeited loot on a knockout.
    pub fn take_damage(&mut self, amount: u32) -> Option<Loot> {
        if amount < self.health {
            self.health -= amount;
            None
        } else {
            Some(self.lose())
        }
    }

    /// Absorb a defeated knight's inventory and gold
    pub fn receive_loot(&mut self, loot: Loot) {
        let Loot { items, gold } = loot;
        let PerKind {
            weapon,
            shield,
            armour,
        } = items;
        self.inventory.weapon.extend(weapon);
        self.inventory.shield.extend(shield);
        self.inventory.armour.extend(armour);
        self.add_gold(gold);
    }

    /// Restore `points` of health at one gold per point
    pub fn heal(&mut self, points: u32) -> Result<()> {
        let missing = self.max_health.saturating_sub(self.health);
        if points == 0 || missing == 0 {
            return Err(TourneyError::NothingToHeal(format!(
                "{} is at {}/{} health",
                self.name, self.health, self.max_health
            )));
        }
        if points > missing {
            return Err(TourneyError::NothingToHeal(format!(
                "{} is only missing {} health",
                self.name, missing
            )));
        }
        self.spend_gold(u64::from(points))?;
        self.health += points;
        Ok(())
    }

    /// Raise one base stat by its training increment
    pub fn train(&mut self, stat: TrainingStat) {
        match stat {
            TrainingStat::MaxHealth => {
                self.health += MAX_HEALTH_GROWTH;
                self.max_health += MAX_HEALTH_GROWTH;
            }
            TrainingStat::Speed => self.speed += SPEED_GROWTH,
            TrainingStat::Damage => self.damage += DAMAGE_GROWTH,
            TrainingStat::Defence => self.defence += DEFENCE_GROWTH,
        }
    }

    fn lose(&mut self) -> Loot {
        let gold_lost = self.gold / 2;
        let items = mem::take(&mut self.inventory);

        self.health = self.max_health;
        self.gold -= gold_lost;

        // Losing is also training for the next bout
        self.speed += SPEED_GROWTH;
        self.damage += DAMAGE_GROWTH;
        self.defence += DEFENCE_GROWTH;
        self.max_health += MAX_HEALTH_GROWTH;

        Loot {
            items,
            gold: gold_lost,
        }
    }

    fn stow_equipped(&mut self, kind: ItemKind) -> bool {
        let Some(item) = self.equipped[kind].take() else {
            return false;
        };
        self.weight -= item.weight();
        if self.equipped_items().next().is_none() {
            // Nothing left on: drop any float residue so speed falls back to base
            self.weight = 0.0;
        }
        self.inventory[kind].push(item);
        true
    }

    fn take_from_inventory(&mut self, kind: ItemKind, index: usize) -> Result<Equipment> {
        let len = self.inventory[kind].len();
        if index >= len {
            return Err(TourneyError::InventoryIndex { kind, index, len });
        }
        Ok(self.inventory[kind].remove(index))
    }
}
