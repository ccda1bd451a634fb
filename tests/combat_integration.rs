//! Combat integration tests
//!
//! End-to-end checks of the exchange rules: speed gating, damage against
//! defence, and what a knockout hands over.

use knights_tourney::combat::{
    resolve_exchange, resolve_strike, BaseStats, Equipment, Guard, ItemKind, Knight, Strike,
    StrikeOutcome,
};
use knights_tourney::core::ScriptedRandom;

fn knight(name: &str, health: u32, damage: u32, defence: u32, speed: u32) -> Knight {
    Knight::with_stats(
        name,
        BaseStats {
            health,
            damage,
            defence,
            speed,
        },
    )
    .unwrap()
}

/// A fast attacker lands full damage no matter the defence
#[test]
fn test_speed_gate_full_damage() {
    let result = resolve_strike(
        Strike {
            speed: 10,
            damage: 15,
        },
        Guard {
            speed: 4,
            defence: 10,
        },
    );
    assert_eq!(result.outcome, StrikeOutcome::Unblockable);
    assert_eq!(result.damage, 15);
}

/// The mirror image: a fast defender takes nothing
#[test]
fn test_speed_gate_dodge() {
    let result = resolve_strike(
        Strike {
            speed: 4,
            damage: 15,
        },
        Guard {
            speed: 10,
            defence: 10,
        },
    );
    assert_eq!(result.outcome, StrikeOutcome::Dodged);
    assert_eq!(result.damage, 0);
}

/// Comparable speeds: 15 damage against 10 defence lets 5 through
#[test]
fn test_comparable_speed_damage_minus_defence() {
    let result = resolve_strike(
        Strike {
            speed: 10,
            damage: 15,
        },
        Guard {
            speed: 12,
            defence: 10,
        },
    );
    assert_eq!(result.outcome, StrikeOutcome::Penetrated);
    assert_eq!(result.damage, 5);
}

/// Two bare knights: 20 damage against 5 defence, then a finishing blow
#[test]
fn test_bare_knights_until_knockout() {
    let mut attacker = knight("Galahad", 100, 20, 5, 10);
    let mut defender = knight("Agravain", 100, 20, 5, 10);
    defender.add_gold(11);
    let mut rng = ScriptedRandom::constant(0.5);

    let first = resolve_exchange(&mut attacker, &mut defender, &mut rng);
    assert_eq!(first.event.damage, 15);
    assert_eq!(defender.health(), 85);
    assert!(first.loot.is_none());

    let loot = defender.take_damage(defender.health()).expect("knockout");
    assert_eq!(loot.gold, 5);
    assert_eq!(loot.item_count(), 0);
    assert_eq!(defender.gold(), 6);
    assert_eq!(defender.health(), defender.max_health());
    assert_eq!(defender.max_health(), 110);
}

/// Heavy gear slows a knight enough to be outpaced
#[test]
fn test_heavy_armour_gets_outpaced() {
    let mut nimble = knight("Dinadan", 100, 12, 5, 10);
    let mut armoured = knight("Bors", 100, 12, 5, 10);
    // Speed 100 / √64 = 12 against a bare 10: no gate either way
    armoured.equip(Equipment::new("Tower Plate", ItemKind::Armour, 0.0, 0.0, 64.0, 1).unwrap());
    let mut rng = ScriptedRandom::constant(0.5);
    let exchange = resolve_exchange(&mut nimble, &mut armoured, &mut rng);
    assert_eq!(exchange.event.defence_speed, 12);
    assert_eq!(exchange.event.outcome, StrikeOutcome::Penetrated);

    // At 400 weight the armoured knight drops to speed 5 and cannot block
    armoured
        .equip(Equipment::new("Anvil Plate", ItemKind::Armour, 0.0, 0.0, 400.0, 1).unwrap());
    let exchange = resolve_exchange(&mut nimble, &mut armoured, &mut rng);
    assert_eq!(exchange.event.defence_speed, 5);
    assert_eq!(exchange.event.outcome, StrikeOutcome::Unblockable);
    assert_eq!(exchange.event.damage, 12);
}

/// Only the inventory is forfeited; equipped gear stays with the loser
#[test]
fn test_knockout_loot_is_inventory_and_half_gold() {
    // The loser's 4-weight sword gives speed 50; 40 keeps both inside the speed gates
    let mut winner = knight("Kay", 100, 200, 5, 40);
    let mut loser = knight("Lamorak", 50, 10, 5, 10);
    loser.equip(Equipment::new("Kept Sword", ItemKind::Weapon, 1.0, 2.0, 4.0, 10).unwrap());
    loser.stash(Equipment::new("Spare Shield", ItemKind::Shield, 1.0, 2.0, 4.0, 10).unwrap());
    loser.add_gold(9);
    let mut rng = ScriptedRandom::constant(0.5);

    let result = resolve_exchange(&mut winner, &mut loser, &mut rng);
    let loot = result.loot.expect("200 damage knocks out a 50 health knight");
    winner.receive_loot(loot);

    assert_eq!(winner.gold(), 4);
    assert_eq!(winner.inventory(ItemKind::Shield)[0].name(), "Spare Shield");
    assert_eq!(loser.gold(), 5);
    assert!(loser.inventory(ItemKind::Shield).is_empty());
    assert_eq!(loser.equipped(ItemKind::Weapon).unwrap().name(), "Kept Sword");
}
