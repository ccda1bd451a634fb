//! Knights Tourney - turn-based knight tournament simulation

pub mod arena;
pub mod combat;
pub mod core;
