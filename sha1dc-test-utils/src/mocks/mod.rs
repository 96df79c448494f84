//! Mock implementations for testing

mod engine;
mod region;

pub use engine::{CollidingEngine, RecordingEngine};
pub use region::{MockHostRegion, RegionEvent};
