//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for agents
///
/// Assigned once from a monotonically increasing counter and never reused
/// within a timeline, so it survives snapshot round-trips and lets the
/// interpolator match an agent across two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Simulated time (abstract units, one snapshot per unit by default)
pub type SimTime = f64;

/// Species enumeration
///
/// Closed set: adding a species forces every behavior and parameter match
/// to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Apex predator, hunts fish
    Shark,
    /// Mid-level forager, eats shrimp, shelters near coral
    Fish,
    /// Smallest prey, grazes on algae
    Shrimp,
    /// Stationary producer driven by temperature and pollution
    Algae,
    /// Stationary shelter species
    Coral,
    /// Inert terrain obstacle
    Rock,
}

impl Species {
    pub const ALL: [Species; 6] = [
        Species::Shark,
        Species::Fish,
        Species::Shrimp,
        Species::Algae,
        Species::Coral,
        Species::Rock,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Shark => "shark",
            Self::Fish => "fish",
            Self::Shrimp => "shrimp",
            Self::Algae => "algae",
            Self::Coral => "coral",
            Self::Rock => "rock",
        }
    }

    /// Sharks, fish and shrimp move, steer and reproduce
    pub fn is_mobile(&self) -> bool {
        matches!(self, Self::Shark | Self::Fish | Self::Shrimp)
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, Self::Rock)
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|species| species.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown species '{}'", s))
    }
}

/// 2D position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0001 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::default()
        }
    }

    /// Heading in radians, measured from +x
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Component-wise linear interpolation
    ///
    /// Weighted form so that `u` = 0 gives exactly `self` and `u` = 1
    /// exactly `other`.
    pub fn lerp(&self, other: &Self, u: f32) -> Self {
        let w = 1.0 - u;
        Self {
            x: self.x * w + other.x * u,
            y: self.y * w + other.y * u,
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

/// Rectangular world extent, origin at (0, 0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}
