//! Core trait for hash engines driven by the bridge

use super::DigestResult;

/// Incremental SHA-1 engine with collision detection
///
/// Implementations must be plain values: [`HashEngine::duplicate`] has to
/// produce a fully independent copy, with no shared buffers or handles.
pub trait HashEngine: Send + 'static {
    /// Create an engine at its start state
    fn init() -> Self
    where
        Self: Sized;

    /// Return the engine to its start state, discarding ingested data
    fn reset(&mut self);

    /// Consume a contiguous run of bytes
    fn update(&mut self, data: &[u8]);

    /// Produce the digest and collision flag
    ///
    /// The engine is left in an unspecified state; callers reset before
    /// reusing it.
    fn finalize(&mut self) -> DigestResult;

    /// Copy the full engine state into a new, independent engine
    fn duplicate(&self) -> Self
    where
        Self: Sized;
}
