//! Buffer ingestion
//!
//! Every entry shape ends in a single `HashEngine::update` call over one
//! contiguous slice. Offsets and lengths arrive as the host's signed 32-bit
//! integers and are checked against the resolved region before any byte is
//! read; a rejected range ingests nothing.

pub mod region;
pub mod strategy;

pub use region::{DirectRegion, HeapRegion, HostRegion, RegionBytes};
pub use strategy::{IngestStrategy, ReleaseMode};

use crate::engine::HashEngine;
use region::AcquiredRegion;

/// What an ingestion call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// `bytes` bytes were fed to the engine
    Ingested { bytes: usize },
    /// The region could not be resolved to memory; nothing was read
    Unresolvable,
    /// The offset/length pair does not fit the region; nothing was read
    OutOfBounds {
        offset: i32,
        length: i32,
        available: usize,
    },
}

impl IngestOutcome {
    pub fn is_ingested(&self) -> bool {
        matches!(self, Self::Ingested { .. })
    }

    /// Bytes fed to the engine, zero unless ingested
    pub fn bytes(&self) -> usize {
        match self {
            Self::Ingested { bytes } => *bytes,
            _ => 0,
        }
    }
}

/// A host buffer object that is backed either by direct memory or by a
/// host-managed array
pub enum HostBuffer<'a> {
    Direct {
        region: &'a dyn DirectRegion,
        position: i32,
        remaining: i32,
    },
    Heap {
        region: &'a dyn HostRegion,
        offset: i32,
        length: i32,
    },
}

fn checked_range(offset: i32, length: i32, available: usize) -> Result<(usize, usize), IngestOutcome> {
    let out_of_bounds = IngestOutcome::OutOfBounds {
        offset,
        length,
        available,
    };
    let (Ok(start), Ok(len)) = (usize::try_from(offset), usize::try_from(length)) else {
        return Err(out_of_bounds);
    };
    match start.checked_add(len) {
        Some(end) if end <= available => Ok((start, end)),
        _ => Err(out_of_bounds),
    }
}

fn ingest_slice<E: HashEngine>(
    engine: &mut E,
    bytes: &[u8],
    offset: i32,
    length: i32,
) -> IngestOutcome {
    match checked_range(offset, length, bytes.len()) {
        Ok((start, end)) => {
            engine.update(&bytes[start..end]);
            IngestOutcome::Ingested { bytes: end - start }
        }
        Err(outcome) => outcome,
    }
}

fn log_rejected(outcome: &IngestOutcome) {
    if let IngestOutcome::OutOfBounds {
        offset,
        length,
        available,
    } = outcome
    {
        log::warn!(
            "Rejected region range offset={offset} length={length} (region holds {available} bytes)"
        );
    }
}

/// Feed exactly one byte
pub fn consume_byte<E: HashEngine>(engine: &mut E, byte: u8) {
    engine.update(&[byte]);
}

/// Feed `length` bytes at `offset` from a host-managed region
///
/// The region is acquired with `strategy`, read once, and released in
/// [`ReleaseMode::Abort`] mode whatever happens in between.
pub fn consume_region<E, R>(
    engine: &mut E,
    region: &R,
    offset: i32,
    length: i32,
    strategy: IngestStrategy,
) -> IngestOutcome
where
    E: HashEngine,
    R: HostRegion + ?Sized,
{
    let outcome = match AcquiredRegion::acquire(region, strategy) {
        Some(acquired) => ingest_slice(engine, acquired.bytes(), offset, length),
        None => IngestOutcome::Unresolvable,
    };
    // Logged only once the region has been released
    match outcome {
        IngestOutcome::Unresolvable => {
            log::warn!("Host region could not be resolved ({strategy}); nothing ingested")
        }
        _ => log_rejected(&outcome),
    }
    outcome
}

/// Feed `length` bytes at `offset` from a directly addressable region
pub fn consume_external_region<E, D>(
    engine: &mut E,
    region: &D,
    offset: i32,
    length: i32,
) -> IngestOutcome
where
    E: HashEngine,
    D: DirectRegion + ?Sized,
{
    match region.address() {
        Some(bytes) => {
            let outcome = ingest_slice(engine, bytes, offset, length);
            log_rejected(&outcome);
            outcome
        }
        None => {
            log::warn!("Direct region has no resolvable address; nothing ingested");
            IngestOutcome::Unresolvable
        }
    }
}

/// Dispatch a host buffer to the direct or the region path
pub fn consume_buffer<E: HashEngine>(
    engine: &mut E,
    buffer: &HostBuffer<'_>,
    strategy: IngestStrategy,
) -> IngestOutcome {
    match *buffer {
        HostBuffer::Direct {
            region,
            position,
            remaining,
        } => consume_external_region(engine, region, position, remaining),
        HostBuffer::Heap {
            region,
            offset,
            length,
        } => consume_region(engine, region, offset, length, strategy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DigestResult;

    #[derive(Default)]
    struct Recorder {
        chunks: Vec<Vec<u8>>,
    }

    impl HashEngine for Recorder {
        fn init() -> Self {
            Self::default()
        }

        fn reset(&mut self) {
            self.chunks.clear();
        }

        fn update(&mut self, data: &[u8]) {
            self.chunks.push(data.to_vec());
        }

        fn finalize(&mut self) -> DigestResult {
            DigestResult::clean([0; 20])
        }

        fn duplicate(&self) -> Self {
            Self {
                chunks: self.chunks.clone(),
            }
        }
    }

    struct Unresolvable;

    impl HostRegion for Unresolvable {
        fn acquire(&self, _strategy: IngestStrategy) -> Option<RegionBytes<'_>> {
            None
        }

        fn release(&self, _bytes: RegionBytes<'_>, _mode: ReleaseMode) {
            panic!("nothing was acquired");
        }
    }

    impl DirectRegion for Unresolvable {
        fn address(&self) -> Option<&[u8]> {
            None
        }
    }

    #[test]
    fn test_consume_byte_is_single_update() {
        let mut engine = Recorder::init();
        consume_byte(&mut engine, b'a');
        consume_byte(&mut engine, b'b');
        assert_eq!(engine.chunks, vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn test_consume_region_with_offset() {
        let data = b"123test456";
        for strategy in [IngestStrategy::Copy, IngestStrategy::Pin] {
            let mut engine = Recorder::init();
            let outcome = consume_region(&mut engine, &HeapRegion::new(data), 3, 4, strategy);
            assert_eq!(outcome, IngestOutcome::Ingested { bytes: 4 });
            assert_eq!(engine.chunks, vec![b"test".to_vec()]);
        }
    }

    #[test]
    fn test_consume_region_unresolvable_is_noop() {
        let mut engine = Recorder::init();
        let outcome = consume_region(&mut engine, &Unresolvable, 0, 4, IngestStrategy::Pin);
        assert_eq!(outcome, IngestOutcome::Unresolvable);
        assert!(engine.chunks.is_empty());
    }

    #[test]
    fn test_out_of_bounds_ranges_rejected() {
        let data = b"0123456789";
        let region = HeapRegion::new(data);
        for (offset, length) in [(-1, 2), (0, -1), (8, 3), (11, 0), (i32::MAX, i32::MAX)] {
            let mut engine = Recorder::init();
            let outcome = consume_region(&mut engine, &region, offset, length, IngestStrategy::Copy);
            assert_eq!(
                outcome,
                IngestOutcome::OutOfBounds {
                    offset,
                    length,
                    available: 10
                }
            );
            assert!(engine.chunks.is_empty());
        }
    }

    #[test]
    fn test_zero_length_at_end_is_allowed() {
        let mut engine = Recorder::init();
        let outcome = consume_external_region(&mut engine, &b"abc"[..], 3, 0);
        assert_eq!(outcome, IngestOutcome::Ingested { bytes: 0 });
    }

    #[test]
    fn test_consume_external_region() {
        let mut engine = Recorder::init();
        let data = b"123test456".to_vec();
        assert!(consume_external_region(&mut engine, &data, 3, 4).is_ingested());
        assert_eq!(consume_external_region(&mut engine, &Unresolvable, 0, 1), IngestOutcome::Unresolvable);
        assert_eq!(engine.chunks, vec![b"test".to_vec()]);
    }

    #[test]
    fn test_consume_buffer_dispatch() {
        let data = b"xxtestyy".to_vec();
        let heap = HeapRegion::new(&data);

        let mut engine = Recorder::init();
        let direct = HostBuffer::Direct {
            region: &data,
            position: 2,
            remaining: 4,
        };
        let heap_buffer = HostBuffer::Heap {
            region: &heap,
            offset: 2,
            length: 4,
        };
        assert_eq!(consume_buffer(&mut engine, &direct, IngestStrategy::Pin).bytes(), 4);
        assert_eq!(consume_buffer(&mut engine, &heap_buffer, IngestStrategy::Copy).bytes(), 4);
        assert_eq!(engine.chunks, vec![b"test".to_vec(), b"test".to_vec()]);

        let broken = HostBuffer::Direct {
            region: &Unresolvable,
            position: 0,
            remaining: 0,
        };
        assert_eq!(consume_buffer(&mut engine, &broken, IngestStrategy::Copy), IngestOutcome::Unresolvable);
    }

    mod release_order {
        use super::*;
        use std::cell::RefCell;

        thread_local! {
            static EVENTS: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
        }

        fn record(event: &'static str) {
            EVENTS.with(|events| events.borrow_mut().push(event));
        }

        struct EventLogger;

        impl log::Log for EventLogger {
            fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
                true
            }

            fn log(&self, entry: &log::Record<'_>) {
                if entry.args().to_string().starts_with("Rejected region range") {
                    record("warned");
                }
            }

            fn flush(&self) {}
        }

        static LOGGER: EventLogger = EventLogger;

        struct PinnedRegion(Vec<u8>);

        impl HostRegion for PinnedRegion {
            fn acquire(&self, _strategy: IngestStrategy) -> Option<RegionBytes<'_>> {
                record("acquired");
                Some(RegionBytes::Host(&self.0))
            }

            fn release(&self, _bytes: RegionBytes<'_>, _mode: ReleaseMode) {
                record("released");
            }
        }

        #[test]
        fn test_rejection_logged_after_release() {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(log::LevelFilter::Warn);
            EVENTS.with(|events| events.borrow_mut().clear());

            let mut engine = Recorder::init();
            let region = PinnedRegion(vec![0; 4]);
            let outcome = consume_region(&mut engine, &region, 2, 8, IngestStrategy::Pin);

            assert!(matches!(outcome, IngestOutcome::OutOfBounds { .. }));
            EVENTS.with(|events| {
                assert_eq!(*events.borrow(), vec!["acquired", "released", "warned"]);
            });
        }
    }
}
