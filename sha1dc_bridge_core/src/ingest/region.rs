//! Host region abstractions
//!
//! [`HostRegion`] is memory the host runtime manages and may move; it has to
//! be acquired (pinned or copied) before native code reads it and released
//! afterwards. [`DirectRegion`] is memory whose address is already stable.

use super::{IngestStrategy, ReleaseMode};
use std::ops::Deref;

/// Bytes obtained from a host region
#[derive(Debug)]
pub enum RegionBytes<'a> {
    /// Memory owned by the host: the pinned region or a host-made copy
    Host(&'a [u8]),
    /// Copy owned by the bridge
    Owned(Vec<u8>),
}

impl Deref for RegionBytes<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Host(bytes) => bytes,
            Self::Owned(bytes) => bytes,
        }
    }
}

/// A host-managed byte region
pub trait HostRegion {
    /// Make the whole region readable, or `None` if it can't be resolved
    fn acquire(&self, strategy: IngestStrategy) -> Option<RegionBytes<'_>>;

    /// Hand the bytes from [`HostRegion::acquire`] back to the host
    fn release(&self, bytes: RegionBytes<'_>, mode: ReleaseMode);
}

/// A region with a directly usable address
pub trait DirectRegion {
    /// The region's bytes, or `None` if no address can be resolved
    fn address(&self) -> Option<&[u8]>;
}

impl DirectRegion for [u8] {
    fn address(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl DirectRegion for Vec<u8> {
    fn address(&self) -> Option<&[u8]> {
        Some(self)
    }
}

/// Host region over memory Rust already owns
///
/// `Pin` lends the slice out directly; `Copy` hands out a fresh copy.
#[derive(Debug, Clone, Copy)]
pub struct HeapRegion<'a> {
    bytes: &'a [u8],
}

impl<'a> HeapRegion<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl HostRegion for HeapRegion<'_> {
    fn acquire(&self, strategy: IngestStrategy) -> Option<RegionBytes<'_>> {
        Some(match strategy {
            IngestStrategy::Pin => RegionBytes::Host(self.bytes),
            IngestStrategy::Copy => RegionBytes::Owned(self.bytes.to_vec()),
        })
    }

    fn release(&self, _bytes: RegionBytes<'_>, _mode: ReleaseMode) {}
}

/// Releases acquired bytes on every exit path, including unwinding
pub(crate) struct AcquiredRegion<'r, R: HostRegion + ?Sized> {
    region: &'r R,
    bytes: Option<RegionBytes<'r>>,
}

impl<'r, R: HostRegion + ?Sized> AcquiredRegion<'r, R> {
    pub(crate) fn acquire(region: &'r R, strategy: IngestStrategy) -> Option<Self> {
        let bytes = region.acquire(strategy)?;
        Some(Self {
            region,
            bytes: Some(bytes),
        })
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        self.bytes.as_deref().unwrap_or_default()
    }
}

impl<R: HostRegion + ?Sized> Drop for AcquiredRegion<'_, R> {
    fn drop(&mut self) {
        if let Some(bytes) = self.bytes.take() {
            // Ingestion never writes, so nothing is copied back.
            self.region.release(bytes, ReleaseMode::Abort);
        }
    }
}
