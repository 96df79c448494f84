//! Mock host region that records how the bridge accesses it

use sha1dc_bridge_core::{HostRegion, IngestStrategy, RegionBytes, ReleaseMode};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// One access the bridge made to a [`MockHostRegion`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionEvent {
    Acquired(IngestStrategy),
    Released { copied: bool, mode: ReleaseMode },
}

/// Host region backed by a `Vec`, with a switch to make it unresolvable
pub struct MockHostRegion {
    data: Vec<u8>,
    resolvable: AtomicBool,
    events: Mutex<Vec<RegionEvent>>,
}

impl MockHostRegion {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            resolvable: AtomicBool::new(true),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Region whose memory can never be resolved
    pub fn unresolvable(data: impl Into<Vec<u8>>) -> Self {
        let region = Self::new(data);
        region.invalidate();
        region
    }

    /// Make later acquisitions fail, as for a released host object
    pub fn invalidate(&self) {
        self.resolvable.store(false, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn events(&self) -> Vec<RegionEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Acquisitions not yet matched by a release
    pub fn outstanding(&self) -> usize {
        let events = self.events.lock().unwrap();
        let acquired = events
            .iter()
            .filter(|e| matches!(e, RegionEvent::Acquired(_)))
            .count();
        acquired - (events.len() - acquired)
    }

    fn record(&self, event: RegionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl HostRegion for MockHostRegion {
    fn acquire(&self, strategy: IngestStrategy) -> Option<RegionBytes<'_>> {
        if !self.resolvable.load(Ordering::SeqCst) {
            return None;
        }
        self.record(RegionEvent::Acquired(strategy));
        Some(match strategy {
            IngestStrategy::Pin => RegionBytes::Host(&self.data),
            IngestStrategy::Copy => RegionBytes::Owned(self.data.clone()),
        })
    }

    fn release(&self, bytes: RegionBytes<'_>, mode: ReleaseMode) {
        let copied = matches!(bytes, RegionBytes::Owned(_));
        self.record(RegionEvent::Released { copied, mode });
    }
}
