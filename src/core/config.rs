//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Every section deserializes from
//! TOML with missing keys falling back to the tuned defaults, so a config
//! file only needs to name what it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::environment::{Environment, ParamRange};
use crate::core::error::{ReefError, Result};
use crate::core::types::{Bounds, Species};

/// Configuration for the whole simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the deterministic random source
    pub seed: u64,
    pub world: WorldConfig,
    pub timeline: TimelineConfig,
    pub ecology: EcologyConfig,
    pub environment: EnvironmentConfig,
    pub population: PopulationConfig,
    pub species: SpeciesTable,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            world: WorldConfig::default(),
            timeline: TimelineConfig::default(),
            ecology: EcologyConfig::default(),
            environment: EnvironmentConfig::default(),
            population: PopulationConfig::default(),
            species: SpeciesTable::default(),
        }
    }
}

// === WORLD ===

/// Extent of the reef in world units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl WorldConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }
}

// === TIMELINE ===

/// Pacing of the simulated clock and the snapshot cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Simulated time advanced per animation frame
    ///
    /// At 0.08 and 60 frames per second, one time unit passes roughly
    /// every 12.5 frames.
    pub time_step: f64,

    /// A snapshot is recorded whenever `floor(time / snapshot_interval)`
    /// advances, so at 1.0 there is one snapshot per whole time unit.
    pub snapshot_interval: f64,

    /// How far behind the live head a seek must land to enter review
    ///
    /// Seeks closer than this to the head are treated as "go live".
    pub review_tolerance: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            time_step: 0.08,
            snapshot_interval: 1.0,
            review_tolerance: 0.5,
        }
    }
}

// === ECOLOGY ===

/// Rules shared by every species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcologyConfig {
    /// Upper bound on health; damage and healing are clamped to [0, max]
    pub max_health: f32,

    /// Pollution level above which every sensitive species loses health
    pub pollution_baseline: f32,

    /// Health lost per tick per unit of pollution above the baseline
    ///
    /// At 0.002, pollution 40 costs 0.04 health per tick, the same drain
    /// as a shark's metabolism.
    pub pollution_damage_rate: f32,

    /// Fraction of an obstacle's size that counts as solid
    ///
    /// Below 1.0 lets agents brush the jagged outline of a rock.
    pub obstacle_contact_factor: f32,

    /// Velocity retained after bouncing off an obstacle
    pub bounce_damping: f32,

    /// Minimum speed for the facing angle to follow velocity
    ///
    /// Below this the previous angle is latched, which keeps slow or
    /// stopped agents from snapping to angle zero.
    pub angle_speed_threshold: f32,

    pub bloom: BloomConfig,
}

impl Default for EcologyConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            pollution_baseline: 20.0,
            pollution_damage_rate: 0.002,
            obstacle_contact_factor: 0.8,
            bounce_damping: 0.9,
            angle_speed_threshold: 0.1,
            bloom: BloomConfig::default(),
        }
    }
}

/// Spontaneous algae growth offsetting grazing losses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    /// Probability per tick of one new algae when conditions are favorable
    pub chance: f32,
    /// Bloom requires temperature strictly below this
    pub max_temperature: f32,
    /// Bloom requires pollution strictly below this
    pub max_pollution: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            chance: 0.025,
            max_temperature: 28.0,
            max_pollution: 40.0,
        }
    }
}

impl BloomConfig {
    pub fn favorable(&self, env: &Environment) -> bool {
        env.temperature < self.max_temperature && env.pollution < self.max_pollution
    }
}

// === ENVIRONMENT ===

/// Starting values and operator-settable ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub initial: Environment,
    pub temperature_range: ParamRange,
    pub pollution_range: ParamRange,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            initial: Environment::default(),
            temperature_range: ParamRange::new(15.0, 35.0),
            pollution_range: ParamRange::new(0.0, 100.0),
        }
    }
}

// === POPULATION ===

/// Initial head count per species for the default reef
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub shark: usize,
    pub fish: usize,
    pub shrimp: usize,
    pub algae: usize,
    pub coral: usize,
    pub rock: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            shark: 2,
            fish: 15,
            shrimp: 8,
            algae: 25,
            coral: 5,
            rock: 8,
        }
    }
}

impl PopulationConfig {
    pub fn count(&self, species: Species) -> usize {
        match species {
            Species::Shark => self.shark,
            Species::Fish => self.fish,
            Species::Shrimp => self.shrimp,
            Species::Algae => self.algae,
            Species::Coral => self.coral,
            Species::Rock => self.rock,
        }
    }

    pub fn total(&self) -> usize {
        Species::ALL.iter().map(|&s| self.count(s)).sum()
    }
}

// === SPECIES ===

/// Physical constants every species has
///
/// A `[species.<name>.body]` table is merged over that species' own
/// defaults, see `BodyOverlay`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyParams {
    /// Body radius (world units)
    pub size: f32,
    /// Random extra radius drawn in [0, size_jitter) at creation
    pub size_jitter: f32,
    /// Speed cap; zero means the species never moves
    pub max_speed: f32,
    /// Sensing radius; `None` is unbounded
    pub vision: Option<f32>,
    /// Whether pollution above the baseline drains health
    pub pollution_sensitive: bool,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            size: 10.0,
            size_jitter: 0.0,
            max_speed: 0.0,
            vision: None,
            pollution_sensitive: true,
        }
    }
}

impl BodyParams {
    fn with(size: f32, max_speed: f32, vision: Option<f32>) -> Self {
        Self {
            size,
            max_speed,
            vision,
            ..Self::default()
        }
    }
}

/// Keys present in a `body` table; the rest keep the species' values
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BodyOverlay {
    size: Option<f32>,
    size_jitter: Option<f32>,
    max_speed: Option<f32>,
    vision: Option<f32>,
    pollution_sensitive: Option<bool>,
}

impl BodyOverlay {
    fn apply(self, mut body: BodyParams) -> BodyParams {
        if let Some(size) = self.size {
            body.size = size;
        }
        if let Some(jitter) = self.size_jitter {
            body.size_jitter = jitter;
        }
        if let Some(speed) = self.max_speed {
            body.max_speed = speed;
        }
        if let Some(vision) = self.vision {
            body.vision = Some(vision);
        }
        if let Some(sensitive) = self.pollution_sensitive {
            body.pollution_sensitive = sensitive;
        }
        body
    }
}

/// Keys present in a `breeding` table; the rest keep the species' values
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BreedingOverlay {
    required_health: Option<f32>,
    cooldown_reset: Option<f32>,
    birth_cost: Option<f32>,
}

impl BreedingOverlay {
    fn apply(self, mut breeding: BreedingParams) -> BreedingParams {
        if let Some(health) = self.required_health {
            breeding.required_health = health;
        }
        if let Some(cooldown) = self.cooldown_reset {
            breeding.cooldown_reset = cooldown;
        }
        if let Some(cost) = self.birth_cost {
            breeding.birth_cost = cost;
        }
        breeding
    }
}

fn merge_body<'de, D: Deserializer<'de>>(d: D, base: BodyParams) -> std::result::Result<BodyParams, D::Error> {
    BodyOverlay::deserialize(d).map(|overlay| overlay.apply(base))
}

fn merge_breeding<'de, D: Deserializer<'de>>(
    d: D,
    base: BreedingParams,
) -> std::result::Result<BreedingParams, D::Error> {
    BreedingOverlay::deserialize(d).map(|overlay| overlay.apply(base))
}

fn shark_body<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BodyParams, D::Error> {
    merge_body(d, SharkParams::default().body)
}

fn fish_body<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BodyParams, D::Error> {
    merge_body(d, FishParams::default().body)
}

fn shrimp_body<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BodyParams, D::Error> {
    merge_body(d, ShrimpParams::default().body)
}

fn algae_body<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BodyParams, D::Error> {
    merge_body(d, AlgaeParams::default().body)
}

fn coral_body<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BodyParams, D::Error> {
    merge_body(d, CoralParams::default().body)
}

fn rock_body<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BodyParams, D::Error> {
    merge_body(d, RockParams::default().body)
}

fn shark_breeding<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BreedingParams, D::Error> {
    merge_breeding(d, SharkParams::default().breeding)
}

fn fish_breeding<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BreedingParams, D::Error> {
    merge_breeding(d, FishParams::default().breeding)
}

fn shrimp_breeding<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BreedingParams, D::Error> {
    merge_breeding(d, ShrimpParams::default().breeding)
}

/// Per-species breeding thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreedingParams {
    /// Both partners need at least this much health
    pub required_health: f32,
    /// Ticks both partners wait after a birth
    pub cooldown_reset: f32,
    /// Health each partner pays for a birth
    pub birth_cost: f32,
}

impl Default for BreedingParams {
    fn default() -> Self {
        Self {
            required_health: 80.0,
            cooldown_reset: 0.0,
            birth_cost: 20.0,
        }
    }
}

/// Breeding rules shared by every mobile species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReproductionRules {
    /// Probability per tick that an eligible pair produces offspring
    pub chance: f32,
    /// Mate must be closer than this multiple of the agent's own size
    pub mate_range_factor: f32,
    /// Newborns start with a cooldown drawn in [min, max)
    pub initial_cooldown_min: f32,
    pub initial_cooldown_max: f32,
    /// Cooldown entered after a failed roll; zero retries next tick
    pub retry_cooldown: f32,
}

impl Default for ReproductionRules {
    fn default() -> Self {
        Self {
            chance: 0.05,
            mate_range_factor: 3.0,
            initial_cooldown_min: 200.0,
            initial_cooldown_max: 400.0,
            retry_cooldown: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharkParams {
    #[serde(deserialize_with = "shark_body")]
    pub body: BodyParams,
    /// Health burned per tick
    pub metabolism: f32,
    /// Hunting starts below this health
    pub hunt_below: f32,
    /// Steering acceleration toward prey
    pub pursuit_accel: f32,
    /// Health restored per kill (capped at max health)
    pub meal_heal: f32,
    #[serde(deserialize_with = "shark_breeding")]
    pub breeding: BreedingParams,
}

impl Default for SharkParams {
    fn default() -> Self {
        Self {
            body: BodyParams::with(22.0, 4.5, Some(350.0)),
            metabolism: 0.04,
            hunt_below: 85.0,
            pursuit_accel: 0.3,
            meal_heal: 35.0,
            breeding: BreedingParams {
                required_health: 90.0,
                cooldown_reset: 800.0,
                birth_cost: 25.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishParams {
    #[serde(deserialize_with = "fish_body")]
    pub body: BodyParams,
    pub metabolism: f32,
    /// A shark closer than this triggers fleeing
    pub flee_radius: f32,
    pub flee_accel: f32,
    /// Foraging starts below this health
    pub hungry_below: f32,
    pub pursuit_accel: f32,
    /// Shrimp closer than this is eaten
    pub eat_radius: f32,
    /// Coral further than this is ignored when seeking shelter
    pub shelter_radius: f32,
    pub shelter_accel: f32,
    /// Ticks spent resting at a coral before moving on
    pub rest_ticks: u32,
    /// Velocity retained per tick while resting
    pub rest_damping: f32,
    /// Ticks after a rest before shelter is sought again
    pub shelter_cooldown_ticks: u32,
    #[serde(deserialize_with = "fish_breeding")]
    pub breeding: BreedingParams,
}

impl Default for FishParams {
    fn default() -> Self {
        Self {
            body: BodyParams::with(12.0, 3.0, Some(180.0)),
            metabolism: 0.01,
            flee_radius: 150.0,
            flee_accel: 0.9,
            hungry_below: 70.0,
            pursuit_accel: 0.2,
            eat_radius: 20.0,
            shelter_radius: 120.0,
            shelter_accel: 0.1,
            rest_ticks: 90,
            rest_damping: 0.85,
            shelter_cooldown_ticks: 240,
            breeding: BreedingParams {
                required_health: 75.0,
                cooldown_reset: 400.0,
                birth_cost: 15.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShrimpParams {
    #[serde(deserialize_with = "shrimp_body")]
    pub body: BodyParams,
    pub metabolism: f32,
    pub hungry_below: f32,
    pub pursuit_accel: f32,
    pub eat_radius: f32,
    /// Probability per tick of an idle random nudge
    pub wander_chance: f32,
    /// Nudge components are drawn in [-strength/2, strength/2)
    pub wander_strength: f32,
    #[serde(deserialize_with = "shrimp_breeding")]
    pub breeding: BreedingParams,
}

impl Default for ShrimpParams {
    fn default() -> Self {
        Self {
            body: BodyParams::with(6.0, 1.8, Some(120.0)),
            metabolism: 0.005,
            hungry_below: 75.0,
            pursuit_accel: 0.2,
            eat_radius: 15.0,
            wander_chance: 0.05,
            wander_strength: 1.5,
            breeding: BreedingParams {
                required_health: 70.0,
                cooldown_reset: 250.0,
                birth_cost: 10.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgaeParams {
    #[serde(deserialize_with = "algae_body")]
    pub body: BodyParams,
    /// Heat stress kicks in above this temperature
    pub heat_stress_above: f32,
    pub heat_damage: f32,
    /// Growth needs temperature strictly below this ...
    pub growth_max_temperature: f32,
    /// ... and pollution strictly below this
    pub growth_max_pollution: f32,
    pub growth_rate: f32,
}

impl Default for AlgaeParams {
    fn default() -> Self {
        Self {
            body: BodyParams::with(8.0, 0.0, None),
            heat_stress_above: 30.0,
            heat_damage: 0.1,
            growth_max_temperature: 28.0,
            growth_max_pollution: 40.0,
            growth_rate: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoralParams {
    #[serde(deserialize_with = "coral_body")]
    pub body: BodyParams,
}

impl Default for CoralParams {
    fn default() -> Self {
        Self {
            body: BodyParams::with(18.0, 0.0, None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RockParams {
    #[serde(deserialize_with = "rock_body")]
    pub body: BodyParams,
}

impl Default for RockParams {
    fn default() -> Self {
        Self {
            body: BodyParams {
                size: 25.0,
                size_jitter: 55.0,
                pollution_sensitive: false,
                ..BodyParams::default()
            },
        }
    }
}

/// Typed parameter block for every species
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesTable {
    pub shark: SharkParams,
    pub fish: FishParams,
    pub shrimp: ShrimpParams,
    pub algae: AlgaeParams,
    pub coral: CoralParams,
    pub rock: RockParams,
    pub reproduction: ReproductionRules,
}

impl SpeciesTable {
    pub fn body(&self, species: Species) -> &BodyParams {
        match species {
            Species::Shark => &self.shark.body,
            Species::Fish => &self.fish.body,
            Species::Shrimp => &self.shrimp.body,
            Species::Algae => &self.algae.body,
            Species::Coral => &self.coral.body,
            Species::Rock => &self.rock.body,
        }
    }

    /// Breeding thresholds, `None` for species that never reproduce
    pub fn breeding(&self, species: Species) -> Option<&BreedingParams> {
        match species {
            Species::Shark => Some(&self.shark.breeding),
            Species::Fish => Some(&self.fish.breeding),
            Species::Shrimp => Some(&self.shrimp.breeding),
            Species::Algae | Species::Coral | Species::Rock => None,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate().map_err(ReefError::InvalidConfig)?;
        Ok(config)
    }

    /// Load a TOML config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            return Err(format!(
                "world size must be positive, got {}x{}",
                self.world.width, self.world.height
            ));
        }

        if self.timeline.time_step <= 0.0 || self.timeline.snapshot_interval <= 0.0 {
            return Err("time_step and snapshot_interval must be positive".into());
        }

        if self.timeline.review_tolerance < 0.0 {
            return Err("review_tolerance must not be negative".into());
        }

        if self.ecology.max_health <= 0.0 {
            return Err("max_health must be positive".into());
        }

        let env = &self.environment;
        for (name, range) in [
            ("temperature_range", env.temperature_range),
            ("pollution_range", env.pollution_range),
        ] {
            if range.min > range.max {
                return Err(format!(
                    "{} min ({}) exceeds max ({})",
                    name, range.min, range.max
                ));
            }
        }
        if !env.temperature_range.contains(env.initial.temperature)
            || !env.pollution_range.contains(env.initial.pollution)
        {
            return Err("initial environment lies outside the configured ranges".into());
        }

        for species in Species::ALL {
            let body = self.species.body(species);
            if body.size <= 0.0 || body.size_jitter < 0.0 || body.max_speed < 0.0 {
                return Err(format!("{} has a non-positive size or negative speed", species));
            }
        }

        let rules = &self.species.reproduction;
        for (name, p) in [
            ("reproduction.chance", rules.chance),
            ("bloom.chance", self.ecology.bloom.chance),
            ("shrimp.wander_chance", self.species.shrimp.wander_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{} ({}) must be a probability", name, p));
            }
        }
        if rules.initial_cooldown_min > rules.initial_cooldown_max {
            return Err(format!(
                "initial_cooldown_min ({}) should be <= initial_cooldown_max ({})",
                rules.initial_cooldown_min, rules.initial_cooldown_max
            ));
        }

        Ok(())
    }
}
