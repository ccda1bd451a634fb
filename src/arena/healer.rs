//! Healer: restores health between rounds at one gold per point

use serde::{Deserialize, Serialize};

use crate::arena::tournament::Arena;
use crate::combat::Knight;
use crate::core::error::{Result, TourneyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealTier {
    Max,
    Mid,
    Min,
}

/// Healing amounts on offer to a knight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealOffer {
    pub max: u32,
    pub mid: u32,
    pub min: u32,
}

impl HealOffer {
    /// Offer for `knight`, capped by both missing health and gold
    pub fn for_knight(knight: &Knight) -> Result<Self> {
        if knight.gold() == 0 {
            return Err(TourneyError::InsufficientGold {
                needed: 1,
                available: 0,
            });
        }
        let missing = knight.max_health().saturating_sub(knight.health());
        if missing == 0 {
            return Err(TourneyError::NothingToHeal(format!(
                "{} is perfectly healthy",
                knight.name()
            )));
        }

        let max = u32::try_from(knight.gold()).map_or(missing, |gold| missing.min(gold));
        Ok(Self {
            max,
            mid: (max + 1) / 2,
            min: 1,
        })
    }

    pub fn points(&self, tier: HealTier) -> u32 {
        match tier {
            HealTier::Max => self.max,
            HealTier::Mid => self.mid,
            HealTier::Min => self.min,
        }
    }
}

impl Arena {
    /// Heal the player by one of the offered amounts; returns points healed
    pub fn heal_player(&mut self, tier: HealTier) -> Result<u32> {
        let player = self.player_mut()?;
        let points = HealOffer::for_knight(player)?.points(tier);
        player.heal(points)?;
        tracing::info!("{} heals {} points", player.name(), points);
        Ok(points)
    }
}
