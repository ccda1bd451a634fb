//! Exchange resolution
//!
//! One exchange: the attacker rolls an attack, the defender rolls a defence,
//! and speed decides whether defence matters at all.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::combat::constants::SPEED_GATE_RATIO;
use crate::combat::knight::{Knight, Loot};
use crate::core::random::RandomSource;

/// How a strike landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrikeOutcome {
    /// Attacker at least twice as fast: defence ignored, full damage
    Unblockable,
    /// Defender at least twice as fast: no damage
    Dodged,
    /// Damage beat defence; the difference lands
    Penetrated,
    /// Defence matched or beat damage; nothing lands
    Blocked,
}

/// Rolled attack: `(speed, damage)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub speed: u32,
    pub damage: u32,
}

/// Rolled defence: `(speed, defence)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guard {
    pub speed: u32,
    pub defence: u32,
}

/// Outcome and damage dealt for a pair of rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeResolution {
    pub outcome: StrikeOutcome,
    pub damage: u32,
}

/// Resolve rolled numbers. Speed gates are checked before damage.
pub fn resolve_strike(strike: Strike, guard: Guard) -> StrikeResolution {
    let (outcome, damage) = if strike.speed >= guard.speed.saturating_mul(SPEED_GATE_RATIO) {
        (StrikeOutcome::Unblockable, strike.damage)
    } else if guard.speed >= strike.speed.saturating_mul(SPEED_GATE_RATIO) {
        (StrikeOutcome::Dodged, 0)
    } else if strike.damage > guard.defence {
        (StrikeOutcome::Penetrated, strike.damage - guard.defence)
    } else {
        (StrikeOutcome::Blocked, 0)
    };
    StrikeResolution { outcome, damage }
}

/// Record of one exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeEvent {
    pub attacker: String,
    pub defender: String,
    pub attack_speed: u32,
    pub attack_damage: u32,
    pub defence_speed: u32,
    pub defence: u32,
    pub outcome: StrikeOutcome,
    pub damage: u32,
    pub knockout: bool,
}

impl ExchangeEvent {
    /// `(knockout, message)` pair for a presentation layer
    pub fn result(&self) -> (bool, String) {
        (self.knockout, self.to_string())
    }
}

impl fmt::Display for ExchangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (atk, def) = (&self.attacker, &self.defender);
        if self.knockout {
            return write!(f, "{def} was knocked out! {atk} WON!!");
        }
        match self.outcome {
            StrikeOutcome::Unblockable => write!(
                f,
                "{def} wasn't fast enough and couldn't block {atk}'s attack! {} damage dealt.",
                self.damage
            ),
            StrikeOutcome::Dodged => write!(
                f,
                "{def} was too fast and successfully dodged {atk}'s attack! 0 damage dealt."
            ),
            StrikeOutcome::Penetrated => write!(
                f,
                "{def} was able to block {atk}'s attack! {} damage made it through.",
                self.damage
            ),
            StrikeOutcome::Blocked => write!(
                f,
                "{def} was able to completely block {atk}'s attack! 0 damage dealt."
            ),
        }
    }
}

/// Exchange record plus the loot, if the defender was knocked out
#[derive(Debug, Clone)]
pub struct ExchangeResult {
    pub event: ExchangeEvent,
    pub loot: Option<Loot>,
}

/// Rolled but not yet applied exchange
///
/// Only the knights' current speeds have been updated; no damage is dealt
/// until [`RolledExchange::apply`].
#[derive(Debug, Clone)]
pub struct RolledExchange {
    attacker: String,
    defender: String,
    strike: Strike,
    guard: Guard,
    resolution: StrikeResolution,
}

impl RolledExchange {
    pub fn resolution(&self) -> StrikeResolution {
        self.resolution
    }

    /// Whether applying this exchange to `defender` knocks them out
    pub fn knocks_out(&self, defender: &Knight) -> bool {
        self.lands() && self.resolution.damage >= defender.health()
    }

    fn lands(&self) -> bool {
        matches!(
            self.resolution.outcome,
            StrikeOutcome::Unblockable | StrikeOutcome::Penetrated
        )
    }

    /// Apply the damage to the defender the exchange was rolled against
    pub fn apply(self, defender: &mut Knight) -> ExchangeResult {
        debug_assert_eq!(defender.name(), self.defender);
        let loot = if self.lands() {
            defender.take_damage(self.resolution.damage)
        } else {
            None
        };

        let event = ExchangeEvent {
            attacker: self.attacker,
            defender: self.defender,
            attack_speed: self.strike.speed,
            attack_damage: self.strike.damage,
            defence_speed: self.guard.speed,
            defence: self.guard.defence,
            outcome: self.resolution.outcome,
            damage: self.resolution.damage,
            knockout: loot.is_some(),
        };

        tracing::debug!(
            "{} ({} spd, {} dmg) vs {} ({} spd, {} def): {:?}, {} damage",
            event.attacker,
            event.attack_speed,
            event.attack_damage,
            event.defender,
            event.defence_speed,
            event.defence,
            event.outcome,
            event.damage
        );

        ExchangeResult { event, loot }
    }
}

/// Roll attack and defence for one exchange without applying damage
pub fn roll_exchange(
    attacker: &mut Knight,
    defender: &mut Knight,
    rng: &mut impl RandomSource,
) -> RolledExchange {
    let (attack_speed, attack_damage) = attacker.attack(rng);
    let (defence_speed, defence) = defender.defend(rng);

    let strike = Strike {
        speed: attack_speed,
        damage: attack_damage,
    };
    let guard = Guard {
        speed: defence_speed,
        defence,
    };

    RolledExchange {
        attacker: attacker.name().to_string(),
        defender: defender.name().to_string(),
        strike,
        guard,
        resolution: resolve_strike(strike, guard),
    }
}

/// Roll and apply one exchange between two knights
///
/// Damage is applied to the defender. Handing out the loot and the pot is up
/// to the arena.
pub fn resolve_exchange(
    attacker: &mut Knight,
    defender: &mut Knight,
    rng: &mut impl RandomSource,
) -> ExchangeResult {
    roll_exchange(attacker, defender, rng).apply(defender)
}
