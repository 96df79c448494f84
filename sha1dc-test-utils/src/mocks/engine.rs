//! Mock hash engines

use sha1::{Digest, Sha1};
use sha1dc_bridge_core::{DIGEST_LEN, DigestResult, HashEngine};

fn finish(hasher: &mut Sha1) -> [u8; DIGEST_LEN] {
    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&hasher.finalize_reset());
    digest
}

/// Plain SHA-1 engine that records the size of every update
#[derive(Clone, Default)]
pub struct RecordingEngine {
    hasher: Sha1,
    updates: Vec<usize>,
    resets: usize,
}

impl RecordingEngine {
    /// Sizes of the updates since the last reset, in order
    pub fn updates(&self) -> &[usize] {
        &self.updates
    }

    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl HashEngine for RecordingEngine {
    fn init() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.hasher = Sha1::new();
        self.updates.clear();
        self.resets += 1;
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.hasher, data);
        self.updates.push(data.len());
    }

    fn finalize(&mut self) -> DigestResult {
        DigestResult::clean(finish(&mut self.hasher))
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }
}

/// Engine that flags every finalize as a collision
#[derive(Clone, Default)]
pub struct CollidingEngine {
    hasher: Sha1,
}

impl HashEngine for CollidingEngine {
    fn init() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.hasher = Sha1::new();
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.hasher, data);
    }

    fn finalize(&mut self) -> DigestResult {
        DigestResult::collision(finish(&mut self.hasher))
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }
}
