//! Tournament configuration with documented defaults
//!
//! The combat formulas themselves are fixed (see `combat::constants`); these
//! values only shape the pacing of a tournament.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, TourneyError};

/// Configuration for an arena and its tournament loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Gold in the pot before the first knockout
    pub starting_pot: u64,

    /// Fraction of the pot added after each knockout
    ///
    /// At 1.25 the pot becomes `trunc(pot * 2.25)`: 5, 11, 24, 54, ...
    pub pot_growth: f64,

    /// Maximum attacker/defender alternations in a round before it is a draw
    ///
    /// Each alternation is two exchanges (player strikes, then opponent).
    pub max_alternations: u32,

    /// Arena level at which the tournament is over
    pub final_level: u32,

    /// Knights needed before a round can be fought
    pub min_knights: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            starting_pot: 5,
            pot_growth: 1.25,
            max_alternations: 10,
            final_level: 8,
            min_knights: 2,
        }
    }
}

impl TournamentConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TournamentConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !self.pot_growth.is_finite() || self.pot_growth < 0.0 {
            return Err(TourneyError::InvalidConfig(format!(
                "pot_growth ({}) must be a non-negative number",
                self.pot_growth
            )));
        }

        if self.max_alternations == 0 {
            return Err(TourneyError::InvalidConfig(
                "max_alternations must be at least 1".into(),
            ));
        }

        // Opponents are drawn from everyone but the player
        if self.min_knights < 2 {
            return Err(TourneyError::InvalidConfig(format!(
                "min_knights ({}) must be at least 2",
                self.min_knights
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TournamentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TournamentConfig::from_toml_str("final_level = 3\n").unwrap();
        assert_eq!(config.final_level, 3);
        assert_eq!(config.starting_pot, 5);
        assert_eq!(config.max_alternations, 10);
    }

    #[test]
    fn test_single_knight_minimum_rejected() {
        let result = TournamentConfig::from_toml_str("min_knights = 1\n");
        assert!(matches!(result, Err(TourneyError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_alternations_rejected() {
        let config = TournamentConfig {
            max_alternations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = TournamentConfig::from_toml_str("starting_pot = \"lots\"");
        assert!(matches!(result, Err(TourneyError::TomlError(_))));
    }
}
