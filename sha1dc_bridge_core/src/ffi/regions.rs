//! Adapters from host region descriptors to the ingestion traits

use crate::ffi::types::{Sha1dcAccessMode, Sha1dcDirectBuffer, Sha1dcHostRegion, Sha1dcReleaseMode};
use crate::ingest::{DirectRegion, HostRegion, IngestStrategy, RegionBytes, ReleaseMode};

impl From<IngestStrategy> for Sha1dcAccessMode {
    fn from(strategy: IngestStrategy) -> Self {
        match strategy {
            IngestStrategy::Copy => Self::Copy,
            IngestStrategy::Pin => Self::Critical,
        }
    }
}

impl From<ReleaseMode> for Sha1dcReleaseMode {
    fn from(mode: ReleaseMode) -> Self {
        match mode {
            ReleaseMode::Commit => Self::Commit,
            ReleaseMode::Abort => Self::Abort,
        }
    }
}

/// A host region reached through the host's acquire/release callbacks
///
/// Only built inside FFI entry points, from a descriptor the host keeps
/// alive for the call.
pub(crate) struct FfiHostRegion<'a> {
    raw: &'a Sha1dcHostRegion,
}

impl<'a> FfiHostRegion<'a> {
    pub(crate) fn new(raw: &'a Sha1dcHostRegion) -> Self {
        Self { raw }
    }
}

impl HostRegion for FfiHostRegion<'_> {
    fn acquire(&self, strategy: IngestStrategy) -> Option<RegionBytes<'_>> {
        // Without a release callback a pin could never be undone.
        let (Some(acquire), Some(_)) = (self.raw.acquire, self.raw.release) else {
            return None;
        };
        let mut length = 0usize;
        let data = acquire(self.raw.context, strategy.into(), &mut length);
        if data.is_null() {
            return None;
        }
        // SAFETY: the host guarantees `length` readable bytes at `data`
        // until the matching release.
        Some(RegionBytes::Host(unsafe {
            std::slice::from_raw_parts(data, length)
        }))
    }

    fn release(&self, bytes: RegionBytes<'_>, mode: ReleaseMode) {
        if let (Some(release), RegionBytes::Host(slice)) = (self.raw.release, &bytes) {
            release(self.raw.context, slice.as_ptr().cast_mut(), mode.into());
        }
    }
}

/// A direct buffer as described by the host
pub(crate) struct FfiDirectBuffer<'a> {
    raw: &'a Sha1dcDirectBuffer,
}

impl<'a> FfiDirectBuffer<'a> {
    pub(crate) fn new(raw: &'a Sha1dcDirectBuffer) -> Self {
        Self { raw }
    }
}

impl DirectRegion for FfiDirectBuffer<'_> {
    fn address(&self) -> Option<&[u8]> {
        if self.raw.address.is_null() {
            return None;
        }
        // SAFETY: the host guarantees `capacity` readable bytes at `address`
        // for the duration of the call.
        Some(unsafe { std::slice::from_raw_parts(self.raw.address, self.raw.capacity) })
    }
}
