//! Global environmental parameters shared by every agent each tick
//!
//! Set by the operator, read-only from the simulation's point of view.

use serde::{Deserialize, Serialize};

/// Temperature (°C) and pollution (%) of the reef
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub temperature: f32,
    pub pollution: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            pollution: 0.0,
        }
    }
}

impl Environment {
    pub fn new(temperature: f32, pollution: f32) -> Self {
        Self { temperature, pollution }
    }

    /// Pollution above the baseline, zero when below
    pub fn pollution_excess(&self, baseline: f32) -> f32 {
        (self.pollution - baseline).max(0.0)
    }
}

/// Inclusive numeric range an operator-set parameter is clamped to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Which environmental parameter an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentParam {
    Temperature,
    Pollution,
}

impl EnvironmentParam {
    /// Timeline marker label for a new value
    pub fn label(&self, value: f32) -> String {
        match self {
            Self::Temperature => format!("Temperature: {}°C", value),
            Self::Pollution => format!("Pollution: {}%", value),
        }
    }
}
