//! Hashing inputs through the bridge's session API

use anyhow::{Context, Result};
use serde::Serialize;
use sha1dc_bridge_core::{
    CarrierLayout, DigestCarrier, HeapRegion, IngestOutcome, SessionHandle, SessionManager,
    Sha1CdEngine,
};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Outcome of hashing one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashReport {
    pub name: String,
    pub bytes: u64,
    /// Hex digest; absent when a collision attack was detected
    pub digest: Option<String>,
    pub collision: bool,
}

/// Feeds inputs into bridge sessions in fixed-size regions
pub struct Hasher {
    sessions: SessionManager<Sha1CdEngine>,
    layout: CarrierLayout,
    chunk_size: usize,
}

impl Hasher {
    pub fn new(sessions: SessionManager<Sha1CdEngine>, chunk_size: usize) -> Self {
        Self {
            sessions,
            layout: CarrierLayout::digest_carrier(),
            chunk_size,
        }
    }

    /// Hash a file, or stdin when `path` is `-`
    pub fn hash_path(&self, path: &Path) -> Result<HashReport> {
        if path == Path::new("-") {
            return self.hash_reader("-", io::stdin().lock());
        }
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        self.hash_reader(&path.display().to_string(), BufReader::new(file))
            .with_context(|| format!("Failed to hash {}", path.display()))
    }

    pub fn hash_reader<R: Read>(&self, name: &str, reader: R) -> Result<HashReport> {
        let handle = self
            .sessions
            .allocate()
            .context("Failed to allocate a hashing session")?;
        let report = self.run_session(handle, name, reader);
        if let Err(e) = self.sessions.release(handle) {
            log::warn!("Failed to release session {handle}: {e}");
        }
        report
    }

    fn run_session<R: Read>(
        &self,
        handle: SessionHandle,
        name: &str,
        mut reader: R,
    ) -> Result<HashReport> {
        let mut buffer = vec![0u8; self.chunk_size];
        let mut bytes = 0u64;

        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context("Read failed"),
            };
            let region = HeapRegion::new(&buffer[..read]);
            // chunk_size is validated to fit an i32
            let outcome = self
                .sessions
                .consume_region_default(handle, &region, 0, read as i32)?;
            if outcome != (IngestOutcome::Ingested { bytes: read }) {
                anyhow::bail!("Bridge rejected a {read}-byte region: {outcome:?}");
            }
            bytes += read as u64;
        }

        let mut carrier = DigestCarrier::default();
        let collision = self.sessions.finalize(handle, &self.layout, &mut carrier)?;
        log::debug!("Hashed {bytes} bytes from {name} (collision: {collision})");

        Ok(HashReport {
            name: name.to_string(),
            bytes,
            digest: (!collision).then(|| sha1dc_bridge_core::to_hex(&carrier.digest())),
            collision,
        })
    }
}
