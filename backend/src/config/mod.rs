//! Configuration management for the Fitness RPG backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FR__)

use anyhow::Result;
use fitness_rpg_shared::plans::{FitnessLevel, DEFAULT_TARGET_CALORIES};
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub plans: PlansConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

/// Defaults for daily plan requests that leave fields out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlansConfig {
    pub default_workout_minutes: u32,
    pub default_target_calories: u32,
    pub default_fitness_level: FitnessLevel,
}

impl Default for PlansConfig {
    fn default() -> Self {
        Self {
            default_workout_minutes: 45,
            default_target_calories: DEFAULT_TARGET_CALORIES,
            default_fitness_level: FitnessLevel::Intermediate,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                request_timeout_secs: 30,
            },
            plans: PlansConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FR__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., FR__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("FR").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Settings the router cannot serve with; empty when usable
    pub fn problems(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();

        if self.server.request_timeout_secs == 0 {
            problems.push("server.request_timeout_secs must be greater than zero");
        }
        if !(1..=1440).contains(&self.plans.default_workout_minutes) {
            problems.push("plans.default_workout_minutes must be between 1 and 1440");
        }
        if !(1..=50_000).contains(&self.plans.default_target_calories) {
            problems.push("plans.default_target_calories must be between 1 and 50000");
        }

        problems
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.plans.default_workout_minutes, 45);
        assert_eq!(config.plans.default_target_calories, 2_000);
    }

    #[test]
    fn test_defaults_round_trip_through_config_builder() {
        let built = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default()).unwrap())
            .build()
            .unwrap();
        let loaded: AppConfig = built.try_deserialize().unwrap();
        assert_eq!(loaded.plans.default_fitness_level, FitnessLevel::Intermediate);
    }

    #[test]
    fn test_problems() {
        assert!(AppConfig::default().problems().is_empty());

        let mut config = AppConfig::default();
        config.server.request_timeout_secs = 0;
        config.plans.default_workout_minutes = 2_000;
        assert_eq!(config.problems().len(), 2);
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }
}
