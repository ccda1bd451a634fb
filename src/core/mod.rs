pub mod config;
pub mod error;
pub mod random;

pub use config::TournamentConfig;
pub use error::{Result, TourneyError};
pub use random::{RandomSource, RngSource, ScriptedRandom};
