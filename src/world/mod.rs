//! The reef world, its starting presets and population counts

pub mod census;
pub mod reef;
pub mod scenario;

pub use census::Census;
pub use reef::ReefWorld;
pub use scenario::Scenario;
