//! Combat constants - every fixed number of the formulas in one place

// Roll thresholds
pub const CRITICAL_HIT_THRESHOLD: f64 = 0.10;
pub const CRITICAL_FAILURE_THRESHOLD: f64 = 0.90;
/// Weapons treat everything at or above this as a failure branch
pub const WEAPON_FAILURE_THRESHOLD: f64 = 0.10;

// Armour and shield formulas
pub const GEAR_WEIGHT_DIVISOR: f64 = 50.0;
pub const GEAR_CRITICAL_DEFENCE: f64 = 2.5;

// Weapon formulas
pub const WEAPON_WEIGHT_DIVISOR: f64 = 100.0;
pub const WEAPON_CRITICAL_DEFENCE: f64 = 1.5;
pub const WEAPON_GLANCING_DEFENCE: f64 = 0.5;
pub const WEAPON_CRITICAL_ATTACK: f64 = 3.5;
pub const WEAPON_GLANCING_ATTACK: f64 = 1.5;

// Stat rolls at creation: trunc(SPAN * r + FLOOR)
pub const HEALTH_FLOOR: f64 = 75.0;
pub const HEALTH_SPAN: f64 = 75.0;
pub const DAMAGE_FLOOR: f64 = 10.0;
pub const DAMAGE_SPAN: f64 = 10.0;
pub const DEFENCE_FLOOR: f64 = 5.0;
pub const DEFENCE_SPAN: f64 = 5.0;
pub const SPEED_FLOOR: f64 = 7.5;
pub const SPEED_SPAN: f64 = 7.5;

// Growth after a loss, and per training session
pub const SPEED_GROWTH: u32 = 2;
pub const DAMAGE_GROWTH: u32 = 5;
pub const DEFENCE_GROWTH: u32 = 5;
pub const MAX_HEALTH_GROWTH: u32 = 10;

/// Speed ratio at which one side outclasses the other
pub const SPEED_GATE_RATIO: u32 = 2;
