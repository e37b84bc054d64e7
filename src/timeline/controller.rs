//! Time-travel controller
//!
//! Drives the reef one animation frame at a time and owns the recorded
//! timeline. Two modes:
//!
//! - LIVE: each playing frame advances the clock, steps the world and
//!   records a snapshot whenever the snapshot interval is crossed.
//! - REVIEW: the world is frozen; the display shows a state reconstructed
//!   from the bracketing snapshots at the query time.
//!
//! Edits (spawns, environment changes) are only accepted while LIVE. To
//! change the past, `rewrite_history` cuts the timeline at the review time
//! and continues live from there.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::environment::{Environment, EnvironmentParam};
use crate::core::error::{ReefError, Result};
use crate::core::types::{AgentId, SimTime, Species, Vec2};
use crate::history::interpolate::{reconstruct, ReviewFrame};
use crate::history::snapshot::AgentRecord;
use crate::history::store::HistoryStore;
use crate::render::{collect_render_agents, collect_render_records, RenderAgent};
use crate::simulation::tick::{run_world_step, SimulationEvent};
use crate::spatial::obstacles::{obstacle_footprints, ObstacleFootprint};
use crate::timeline::markers::TimelineMarkers;
use crate::timeline::observer::{Notice, NullObserver, TimelineObserver};
use crate::timeline::selection::{hit_test, Selection};
use crate::world::{Census, ReefWorld, Scenario};

const REVIEW_REJECTION: &str = "Cannot edit the past: go live first";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    Review,
}

pub struct TimeTravelController<R: Rng = ChaCha8Rng> {
    config: SimulationConfig,
    world: ReefWorld,
    history: HistoryStore,
    markers: TimelineMarkers,
    selection: Selection,
    observer: Box<dyn TimelineObserver>,
    rng: R,
    mode: Mode,
    playing: bool,
    /// Live clock in LIVE, query time in REVIEW
    time: SimTime,
    /// Reconstructed display state, only while reviewing
    review: Option<ReviewFrame>,
    scenario: Scenario,
}

impl TimeTravelController<ChaCha8Rng> {
    /// Controller seeded from `config.seed`, starting on the default reef
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> TimeTravelController<R> {
    /// Controller driven by `rng`, starting on the default reef
    pub fn with_rng(config: SimulationConfig, rng: R) -> Result<Self> {
        config.validate().map_err(ReefError::InvalidConfig)?;

        let world = ReefWorld::new(config.world.bounds(), config.environment.initial);
        let mut controller = Self {
            config,
            world,
            history: HistoryStore::new(),
            markers: TimelineMarkers::new(),
            selection: Selection::new(),
            observer: Box::new(NullObserver),
            rng,
            mode: Mode::Live,
            playing: true,
            time: 0.0,
            review: None,
            scenario: Scenario::Reef,
        };
        controller.reset(Scenario::Reef)?;
        Ok(controller)
    }

    pub fn with_observer(mut self, observer: Box<dyn TimelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn set_observer(&mut self, observer: Box<dyn TimelineObserver>) {
        self.observer = observer;
    }

    /// Start a fresh timeline from a preset
    ///
    /// Clears world, history, markers and selection, seeds the preset's
    /// population and records the time-zero snapshot.
    pub fn reset(&mut self, scenario: Scenario) -> Result<()> {
        let environment = scenario.environment(&self.config);
        let population = scenario.population(&self.config);

        self.world.clear(environment);
        self.world.populate(&population, &self.config, &mut self.rng);
        self.history.clear();
        self.markers.clear();
        self.selection.deselect();
        self.review = None;
        self.mode = Mode::Live;
        self.playing = true;
        self.time = 0.0;
        self.scenario = scenario;

        self.record()?;
        self.markers.add(0.0, scenario.start_label());

        tracing::info!(
            "Reef reset to '{}' with {} agents (T={}°C, pollution={}%)",
            scenario,
            self.world.agent_count(),
            environment.temperature,
            environment.pollution
        );
        self.observer.notice(&Notice::Reset { scenario });
        Ok(())
    }

    // === FRAME LOOP ===

    /// Advance one animation frame
    ///
    /// Returns the world events of the tick, empty unless LIVE and playing.
    pub fn frame(&mut self) -> Result<Vec<SimulationEvent>> {
        let mut events = Vec::new();
        if self.playing {
            match self.mode {
                Mode::Live => events = self.live_tick()?,
                Mode::Review => self.advance_review(),
            }
        }
        self.resolve_selection();
        Ok(events)
    }

    fn live_tick(&mut self) -> Result<Vec<SimulationEvent>> {
        let previous = self.time;
        self.time += self.config.timeline.time_step;

        let events = run_world_step(&mut self.world, &self.config, &mut self.rng);
        for event in &events {
            if let SimulationEvent::Removed { id, species } = event {
                tracing::debug!("{} {} removed at t={:.2}", species, id, self.time);
                self.observer.agent_removed(*id, *species);
            }
        }

        let interval = self.config.timeline.snapshot_interval;
        if (self.time / interval).floor() > (previous / interval).floor() {
            self.record()?;
        }
        Ok(events)
    }

    fn advance_review(&mut self) {
        let next = self.time + self.config.timeline.time_step;
        if next >= self.live_head() {
            self.go_live();
        } else {
            self.time = next;
            self.refresh_review();
        }
    }

    fn record(&mut self) -> Result<()> {
        self.history
            .record(self.time, self.world.environment, &self.world.agents)?;
        tracing::debug!(
            "Recorded snapshot {} at t={:.2} ({} agents)",
            self.history.len(),
            self.time,
            self.world.agent_count()
        );
        Ok(())
    }

    fn refresh_review(&mut self) {
        let threshold = self.config.ecology.angle_speed_threshold;
        self.review = self
            .history
            .bracket(self.time)
            .map(|bracket| reconstruct(bracket, self.time, threshold));
    }

    fn resolve_selection(&mut self) {
        let lost = match (&self.mode, &self.review) {
            (Mode::Review, Some(frame)) => {
                let agents = &frame.agents;
                self.selection.resolve(|id| agents.iter().any(|r| r.id == id))
            }
            (Mode::Review, None) => self.selection.resolve(|_| false),
            (Mode::Live, _) => {
                let agents = &self.world.agents;
                self.selection
                    .resolve(|id| agents.iter().any(|a| a.id == id && !a.dead))
            }
        };
        if let Some(id) = lost {
            tracing::debug!("Selected agent {} is gone", id);
            self.observer.notice(&Notice::SelectionLost { id });
        }
    }

    // === TIME TRAVEL ===

    /// Move the display to time `t`
    ///
    /// `t` is clamped to `[0, live_head]`. Landing within the review
    /// tolerance of the head is the same as `go_live`; anywhere earlier
    /// enters (or stays in) REVIEW, paused.
    pub fn seek(&mut self, t: SimTime) {
        let head = self.live_head();
        let target = if t.is_nan() { head } else { t.clamp(0.0, head) };

        if head - target <= self.config.timeline.review_tolerance {
            self.go_live();
            return;
        }

        if self.mode == Mode::Live {
            tracing::info!("Entering review at t={:.2} (live head {:.2})", target, head);
            self.mode = Mode::Review;
        }
        self.playing = false;
        self.time = target;
        self.refresh_review();
        self.observer.notice(&Notice::Rewound { time: target });
    }

    /// Return to the live head
    ///
    /// The authoritative world is restored from the newest snapshot, so
    /// anything simulated after it is discarded.
    pub fn go_live(&mut self) {
        let was_reviewing = self.mode == Mode::Review;
        self.mode = Mode::Live;
        self.review = None;

        if let Some(last) = self.history.latest() {
            self.time = last.time;
            self.world.restore(last.restore_agents(), last.environment);
        }
        self.playing = true;

        if was_reviewing {
            tracing::info!("Back to live at t={:.2}", self.time);
            self.observer.notice(&Notice::Live);
        }
    }

    /// Make the reviewed moment the new present
    ///
    /// Drops every snapshot at or after the review time and every marker
    /// after it, installs the displayed state as the live world, records it
    /// and resumes live play.
    pub fn rewrite_history(&mut self) -> Result<()> {
        if self.mode != Mode::Review {
            return Err(self.reject("Already live: there is no future to rewrite"));
        }
        let cut = self.time;
        let threshold = self.config.ecology.angle_speed_threshold;
        let frame = match self.review.take() {
            Some(frame) => frame,
            None => match self.history.bracket(cut) {
                Some(bracket) => reconstruct(bracket, cut, threshold),
                None => {
                    self.go_live();
                    return Ok(());
                }
            },
        };

        let discarded = self.history.truncate_from(cut);
        self.markers.truncate_after(cut);
        self.world.restore(
            frame.agents.iter().map(AgentRecord::to_agent).collect(),
            frame.environment,
        );
        self.mode = Mode::Live;
        self.playing = true;

        self.record()?;
        self.markers.add(cut, "New path");

        tracing::info!(
            "History rewritten at t={:.2}: {} later snapshots discarded",
            cut,
            discarded
        );
        self.observer.notice(&Notice::Branched {
            time: cut,
            discarded,
        });
        Ok(())
    }

    /// Pause or resume; returns whether now playing
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    // === OPERATOR EDITS ===

    fn reject(&mut self, reason: &str) -> ReefError {
        tracing::warn!("Rejected: {}", reason);
        self.observer.notice(&Notice::Rejected {
            reason: reason.to_string(),
        });
        ReefError::InvalidOperation(reason.to_string())
    }

    fn ensure_live(&mut self) -> Result<()> {
        if self.mode == Mode::Review {
            return Err(self.reject(REVIEW_REJECTION));
        }
        Ok(())
    }

    /// Place a new agent; rejected while reviewing
    pub fn spawn(&mut self, species: Species, position: Vec2) -> Result<AgentId> {
        self.ensure_live()?;
        let id = self
            .world
            .spawn_agent(species, position, &self.config, &mut self.rng);
        self.after_spawn(species, id)?;
        Ok(id)
    }

    /// Place a new agent at a random position; rejected while reviewing
    pub fn spawn_random(&mut self, species: Species) -> Result<AgentId> {
        self.ensure_live()?;
        let id = self.world.spawn_random(species, &self.config, &mut self.rng);
        self.after_spawn(species, id)?;
        Ok(id)
    }

    fn after_spawn(&mut self, species: Species, id: AgentId) -> Result<()> {
        tracing::info!("Spawned {} {} at t={:.2}", species, id, self.time);
        self.markers.add(self.time, format!("Spawned {}", species));
        self.record()
    }

    pub fn set_temperature(&mut self, value: f32) -> Result<f32> {
        self.set_environment(EnvironmentParam::Temperature, value)
    }

    pub fn set_pollution(&mut self, value: f32) -> Result<f32> {
        self.set_environment(EnvironmentParam::Pollution, value)
    }

    /// Change an environmental parameter; rejected while reviewing
    ///
    /// The value is clamped to its configured range. Returns the value
    /// actually applied.
    pub fn set_environment(&mut self, param: EnvironmentParam, value: f32) -> Result<f32> {
        self.ensure_live()?;
        if value.is_nan() {
            return Err(self.reject("Environment value is not a number"));
        }

        let ranges = &self.config.environment;
        let range = match param {
            EnvironmentParam::Temperature => ranges.temperature_range,
            EnvironmentParam::Pollution => ranges.pollution_range,
        };
        let applied = range.clamp(value);
        if applied != value {
            tracing::warn!("{:?} {} outside [{}, {}], clamped to {}", param, value, range.min, range.max, applied);
        }

        let env = &mut self.world.environment;
        match param {
            EnvironmentParam::Temperature => env.temperature = applied,
            EnvironmentParam::Pollution => env.pollution = applied,
        }

        tracing::info!("{} at t={:.2}", param.label(applied), self.time);
        self.markers.add(self.time, param.label(applied));
        self.record()?;
        self.observer.notice(&Notice::EnvironmentChanged { param, value: applied });
        Ok(applied)
    }

    // === SELECTION ===

    /// Select the topmost displayed agent under `point`, or clear the
    /// selection when there is none
    pub fn select_at(&mut self, point: Vec2) -> Option<AgentId> {
        let hit = hit_test(&self.render_agents(), point);
        match hit {
            Some(id) => self.selection.select(id),
            None => self.selection.deselect(),
        }
        hit
    }

    pub fn select(&mut self, id: AgentId) {
        self.selection.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.deselect();
    }

    /// Fresh record of the selected agent from the displayed set
    pub fn selected(&self) -> Option<AgentRecord> {
        let id = self.selection.selected()?;
        match self.mode {
            Mode::Review => self
                .review
                .as_ref()?
                .agents
                .iter()
                .find(|r| r.id == id)
                .cloned(),
            Mode::Live => self.world.get(id).filter(|a| !a.dead).map(AgentRecord::from),
        }
    }

    // === QUERIES ===

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_reviewing(&self) -> bool {
        self.mode == Mode::Review
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Live clock in LIVE, query time in REVIEW
    pub fn current_time(&self) -> SimTime {
        self.time
    }

    /// Time of the newest snapshot
    pub fn live_head(&self) -> SimTime {
        self.history.live_head()
    }

    /// Environment on display
    pub fn environment(&self) -> Environment {
        match (&self.mode, &self.review) {
            (Mode::Review, Some(frame)) => frame.environment,
            _ => self.world.environment,
        }
    }

    /// Reconstructed state while reviewing
    pub fn review_frame(&self) -> Option<&ReviewFrame> {
        self.review.as_ref()
    }

    /// Displayed agents in draw order
    pub fn render_agents(&self) -> Vec<RenderAgent> {
        let mut buffer = Vec::new();
        self.collect_render(&mut buffer);
        buffer
    }

    /// Fill `buffer` with the displayed agents, reusing its allocation
    pub fn collect_render(&self, buffer: &mut Vec<RenderAgent>) {
        let max_health = self.config.ecology.max_health;
        match (&self.mode, &self.review) {
            (Mode::Review, Some(frame)) => collect_render_records(&frame.agents, max_health, buffer),
            (Mode::Review, None) => buffer.clear(),
            (Mode::Live, _) => collect_render_agents(&self.world.agents, max_health, buffer),
        }
    }

    /// Per-species counts of the displayed set
    pub fn census(&self) -> Census {
        match (&self.mode, &self.review) {
            (Mode::Review, Some(frame)) => Census::from_records(&frame.agents),
            (Mode::Review, None) => Census::default(),
            (Mode::Live, _) => Census::from_agents(&self.world.agents),
        }
    }

    /// Rocks on display, for terrain rendering and collision overlays
    pub fn obstacle_footprints(&self) -> Vec<ObstacleFootprint> {
        match (&self.mode, &self.review) {
            (Mode::Review, Some(frame)) => frame
                .agents
                .iter()
                .filter(|r| r.species.is_obstacle())
                .map(|r| ObstacleFootprint {
                    id: r.id,
                    position: r.position,
                    size: r.size,
                })
                .collect(),
            (Mode::Review, None) => Vec::new(),
            (Mode::Live, _) => obstacle_footprints(&self.world.agents),
        }
    }

    pub fn world(&self) -> &ReefWorld {
        &self.world
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn markers(&self) -> &TimelineMarkers {
        &self.markers
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }
}
