//! Test data builders

mod test_data;

pub use test_data::{TestDataBuilder, reference_sha1, reference_sha1_hex};
