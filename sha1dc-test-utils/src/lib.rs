//! Test utilities for the SHA-1 collision-detection bridge
//!
//! This crate provides mock engines, mock host regions and test data
//! builders for exercising the session and marshaling layers.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{TestDataBuilder, reference_sha1, reference_sha1_hex};
pub use mocks::{CollidingEngine, MockHostRegion, RecordingEngine, RegionEvent};
