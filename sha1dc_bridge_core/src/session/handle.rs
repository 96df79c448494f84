//! Opaque session handles
//!
//! A handle packs a slot index and that slot's generation into one `u64`:
//! the low 32 bits hold `index + 1`, the high 32 bits the generation. The
//! `+ 1` keeps every issued handle non-zero, leaving 0 as the null handle.

use std::fmt;

/// Caller-visible reference to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionHandle(u64);

impl SessionHandle {
    /// The handle returned when no session could be created
    pub const NULL: SessionHandle = SessionHandle(0);

    pub(crate) fn new(index: u32, generation: u32) -> Self {
        let slot = u64::from(index) + 1;
        Self((u64::from(generation) << 32) | slot)
    }

    /// Rebuild a handle from the integer the host holds
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Integer form handed to the host
    pub fn into_raw(self) -> u64 {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Slot index, or `None` for the null handle
    pub(crate) fn index(self) -> Option<u32> {
        let slot = (self.0 & 0xffff_ffff) as u32;
        slot.checked_sub(1)
    }

    pub(crate) fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<SessionHandle> for u64 {
    fn from(handle: SessionHandle) -> Self {
        handle.into_raw()
    }
}
