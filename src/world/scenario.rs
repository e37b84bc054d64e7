//! Preset starting conditions

use serde::{Deserialize, Serialize};

use crate::core::config::{PopulationConfig, SimulationConfig};
use crate::core::environment::Environment;

/// Named starting state for a fresh timeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// The configured environment and population
    #[default]
    Reef,
    /// Cool clean water with extra algae and coral
    Healthy,
    /// Hot polluted water: algae die back, everything slowly sickens
    Threatened,
    /// Conditions just back under the bloom thresholds with a thinned reef
    Recovery,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Reef,
        Scenario::Healthy,
        Scenario::Threatened,
        Scenario::Recovery,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Reef => "reef",
            Self::Healthy => "healthy",
            Self::Threatened => "threatened",
            Self::Recovery => "recovery",
        }
    }

    pub fn environment(&self, config: &SimulationConfig) -> Environment {
        match self {
            Self::Reef => config.environment.initial,
            Self::Healthy => Environment::new(25.0, 0.0),
            Self::Threatened => Environment::new(31.0, 40.0),
            Self::Recovery => Environment::new(27.0, 10.0),
        }
    }

    pub fn population(&self, config: &SimulationConfig) -> PopulationConfig {
        let base = &config.population;
        match self {
            Self::Reef => base.clone(),
            Self::Healthy => PopulationConfig {
                algae: base.algae + base.algae / 2,
                coral: base.coral + 2,
                ..base.clone()
            },
            Self::Threatened => PopulationConfig {
                algae: base.algae / 2,
                ..base.clone()
            },
            Self::Recovery => PopulationConfig {
                fish: base.fish / 2,
                shrimp: base.shrimp / 2,
                algae: base.algae / 3,
                ..base.clone()
            },
        }
    }

    /// Marker label for the first snapshot
    pub fn start_label(&self) -> String {
        match self {
            Self::Reef => "Start".to_string(),
            other => format!("Start: {}", other.name()),
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|sc| sc.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown scenario '{}'", s))
    }
}
