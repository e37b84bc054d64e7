//! Recorded timeline: snapshots, their store and in-between reconstruction

pub mod interpolate;
pub mod snapshot;
pub mod store;

pub use interpolate::{interpolate, reconstruct, ReviewFrame};
pub use snapshot::{AgentRecord, WorldSnapshot};
pub use store::{Bracket, HistoryStore};
