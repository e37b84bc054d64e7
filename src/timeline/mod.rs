//! Time travel over the recorded reef: LIVE/REVIEW control, markers,
//! selection and operator notifications

pub mod controller;
pub mod markers;
pub mod observer;
pub mod selection;

pub use controller::{Mode, TimeTravelController};
pub use markers::{TimelineMarker, TimelineMarkers};
pub use observer::{Notice, NoticeLog, NullObserver, TimelineObserver};
pub use selection::Selection;
