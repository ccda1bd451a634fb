//! The arena: knight queue, gold pot, level, and the round loop

use serde::{Deserialize, Serialize};

use crate::combat::{
    normalize_name, roll_exchange, Equipment, EquipmentCatalog, ExchangeEvent, ExchangeResult,
    ItemKind, Knight, Loot, TrainingStat,
};
use crate::core::config::TournamentConfig;
use crate::core::error::{Result, TourneyError};
use crate::core::random::RandomSource;

/// How a round ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Knockout { winner: String, loser: String },
    Draw,
}

/// Everything that happened in one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub player: String,
    pub opponent: String,
    pub events: Vec<ExchangeEvent>,
    pub outcome: RoundOutcome,
    /// Arena level after the round
    pub level: u32,
    /// Gold pot after the round
    pub pot: u64,
}

impl RoundReport {
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == RoundOutcome::Draw
    }
}

/// Pot after a knockout: `trunc(pot + pot * growth)`, saturating at `u64::MAX`
pub fn grow_pot(pot: u64, growth: f64) -> u64 {
    let bonus = (pot as f64 * growth) as u64;
    pot.saturating_add(bonus)
}

/// Tournament state. Index 0 of the queue is the player.
#[derive(Debug, Clone)]
pub struct Arena {
    pub(super) config: TournamentConfig,
    pub(super) catalog: EquipmentCatalog,
    pub(super) level: u32,
    pub(super) pot: u64,
    pub(super) knights: Vec<Knight>,
    pub(super) trained_this_round: bool,
}

impl Arena {
    pub fn new(catalog: EquipmentCatalog, config: TournamentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pot: config.starting_pot,
            config,
            catalog,
            level: 0,
            knights: Vec::new(),
            trained_this_round: false,
        })
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn catalog(&self) -> &EquipmentCatalog {
        &self.catalog
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn knights(&self) -> &[Knight] {
        &self.knights
    }

    pub fn player(&self) -> Option<&Knight> {
        self.knights.first()
    }

    /// Mutable access to the player, for equipping, selling and the like
    pub fn player_mut(&mut self) -> Result<&mut Knight> {
        let len = self.knights.len();
        self.knights
            .first_mut()
            .ok_or(TourneyError::KnightIndex { index: 0, len })
    }

    /// The tournament is over once the arena reaches its final level
    pub fn is_concluded(&self) -> bool {
        self.level >= self.config.final_level
    }

    /// Register a knight, kitted out with gear for the current level
    pub fn add_knight(&mut self, name: &str, rng: &mut impl RandomSource) -> Result<&Knight> {
        let name = normalize_name(name)?;
        let mut knight = Knight::new(name, rng)?;
        for item in self.generate_loadout(self.level, rng)? {
            knight.equip(item);
        }

        tracing::info!(
            "{} joins the arena ({} hp, {} dmg, {} def, {} spd)",
            knight.name(),
            knight.max_health(),
            knight.base_damage(),
            knight.base_defence(),
            knight.base_speed()
        );

        self.knights.push(knight);
        let index = self.knights.len() - 1;
        Ok(&self.knights[index])
    }

    /// Move the knight at `index` to the front; the rest keep their order
    pub fn select_player(&mut self, index: usize) -> Result<()> {
        if index >= self.knights.len() {
            return Err(TourneyError::KnightIndex {
                index,
                len: self.knights.len(),
            });
        }
        let knight = self.knights.remove(index);
        self.knights.insert(0, knight);
        Ok(())
    }

    /// Train the player; allowed once between rounds
    pub fn train_player(&mut self, stat: TrainingStat) -> Result<()> {
        if self.trained_this_round {
            return Err(TourneyError::AlreadyTrained);
        }
        self.player_mut()?.train(stat);
        self.trained_this_round = true;
        Ok(())
    }

    /// Knights holding the most gold (all of them on a tie)
    pub fn find_winners(&self) -> Vec<&Knight> {
        let Some(most) = self.knights.iter().map(Knight::gold).max() else {
            return Vec::new();
        };
        self.knights.iter().filter(|k| k.gold() == most).collect()
    }

    /// Fight one round between the player and a random opponent
    ///
    /// Player strikes first, then the opponent, for up to `max_alternations`
    /// alternations. A knockout ends the round at once; otherwise it is a draw.
    pub fn run_round(&mut self, rng: &mut impl RandomSource) -> Result<RoundReport> {
        let present = self.knights.len();
        let required = self.config.min_knights;
        if present < required {
            return Err(TourneyError::NotEnoughKnights { required, present });
        }

        self.trained_this_round = false;
        let opponent = 1 + rng.choose_index(present - 1);
        let player_name = self.knights[0].name().to_string();
        let opponent_name = self.knights[opponent].name().to_string();

        tracing::info!(
            "Round at level {}: {} vs {} for {} gold",
            self.level,
            player_name,
            opponent_name,
            self.pot
        );

        let mut events = Vec::new();
        let mut outcome = RoundOutcome::Draw;

        'round: for _ in 0..self.config.max_alternations {
            for (attacker, defender) in [(0, opponent), (opponent, 0)] {
                let event = self.exchange(attacker, defender, rng)?;
                let knockout = event.knockout;
                if knockout {
                    outcome = RoundOutcome::Knockout {
                        winner: event.attacker.clone(),
                        loser: event.defender.clone(),
                    };
                }
                events.push(event);
                if knockout {
                    break 'round;
                }
            }
        }

        if outcome == RoundOutcome::Draw {
            tracing::info!("{} and {} fought to a draw", player_name, opponent_name);
        }

        Ok(RoundReport {
            player: player_name,
            opponent: opponent_name,
            events,
            outcome,
            level: self.level,
            pot: self.pot,
        })
    }

    fn exchange(
        &mut self,
        attacker: usize,
        defender: usize,
        rng: &mut impl RandomSource,
    ) -> Result<ExchangeEvent> {
        let (atk, def) = pair_mut(&mut self.knights, attacker, defender);
        let rolled = roll_exchange(atk, def, rng);

        // The winner's gear for the next level is rolled before the loser
        // forfeits anything, so a catalog gap leaves both knights as they were
        let loadout = if rolled.knocks_out(&self.knights[defender]) {
            Some(self.generate_loadout(self.level + 1, rng)?)
        } else {
            None
        };

        let ExchangeResult { event, loot } = rolled.apply(&mut self.knights[defender]);
        if let (Some(loot), Some(loadout)) = (loot, loadout) {
            self.award_knockout(attacker, defender, loot, loadout);
        }
        Ok(event)
    }

    fn award_knockout(&mut self, winner: usize, loser: usize, loot: Loot, loadout: Vec<Equipment>) {
        let next_level = self.level + 1;
        let knight = &mut self.knights[winner];
        tracing::info!(
            "{} wins {} items, {} gold and the {} gold pot",
            knight.name(),
            loot.item_count(),
            loot.gold,
            self.pot
        );
        knight.receive_loot(loot);
        knight.add_gold(self.pot);
        for item in loadout {
            knight.equip(item);
        }

        self.level = next_level;
        if loser != 0 {
            let knight = self.knights.remove(loser);
            self.knights.push(knight);
        }
        self.pot = grow_pot(self.pot, self.config.pot_growth);

        tracing::info!("Arena rises to level {}; pot now {} gold", self.level, self.pot);
    }

    /// One fresh item per kind, in weapon, shield, armour order
    fn generate_loadout(&self, level: u32, rng: &mut impl RandomSource) -> Result<Vec<Equipment>> {
        ItemKind::ALL
            .into_iter()
            .map(|kind| self.catalog.generate(kind, level, rng))
            .collect()
    }
}

/// Two distinct knights borrowed mutably at once
fn pair_mut(knights: &mut [Knight], a: usize, b: usize) -> (&mut Knight, &mut Knight) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = knights.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = knights.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;

    #[test]
    fn test_pot_compounding() {
        assert_eq!(grow_pot(5, 1.25), 11);
        assert_eq!(grow_pot(11, 1.25), 24);
        assert_eq!(grow_pot(0, 1.25), 0);
    }

    #[test]
    fn test_pot_saturates() {
        assert_eq!(grow_pot(u64::MAX / 2, 1.25), u64::MAX);
        assert_eq!(grow_pot(u64::MAX, 1.25), u64::MAX);
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut rng = ScriptedRandom::constant(0.5);
        let mut knights = vec![
            Knight::new("A", &mut rng).unwrap(),
            Knight::new("B", &mut rng).unwrap(),
            Knight::new("C", &mut rng).unwrap(),
        ];
        let (x, y) = pair_mut(&mut knights, 2, 0);
        assert_eq!((x.name(), y.name()), ("C", "A"));
        let (x, y) = pair_mut(&mut knights, 0, 1);
        assert_eq!((x.name(), y.name()), ("A", "B"));
    }

    #[test]
    fn test_generate_loadout_fills_every_slot() {
        let arena = Arena::new(
            EquipmentCatalog::builtin().unwrap(),
            TournamentConfig::default(),
        )
        .unwrap();
        let mut rng = ScriptedRandom::constant(0.5);
        let loadout = arena.generate_loadout(0, &mut rng).unwrap();
        let kinds: Vec<_> = loadout.iter().map(|item| item.kind()).collect();
        assert_eq!(kinds, ItemKind::ALL.to_vec());
    }
}
