//! Deterministic test inputs and reference digests

use sha1::{Digest, Sha1};
use sha1dc_bridge_core::{DIGEST_LEN, to_hex};

/// SHA-1 of `data` computed by the `sha1` crate
pub fn reference_sha1(data: &[u8]) -> [u8; DIGEST_LEN] {
    Sha1::digest(data).into()
}

pub fn reference_sha1_hex(data: &[u8]) -> String {
    to_hex(&reference_sha1(data))
}

/// Builder for pseudo-random byte inputs and chunkings of them
#[derive(Debug, Clone)]
pub struct TestDataBuilder {
    len: usize,
    seed: u64,
}

impl Default for TestDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDataBuilder {
    pub fn new() -> Self {
        Self {
            len: 1024,
            seed: 0x5eed_1234_abcd_ef01,
        }
    }

    pub fn len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        // xorshift has a fixed point at zero
        self.seed = seed.max(1);
        self
    }

    fn next(state: &mut u64) -> u64 {
        let mut x = *state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        *state = x;
        x
    }

    /// The input bytes
    pub fn build(&self) -> Vec<u8> {
        let mut state = self.seed;
        (0..self.len).map(|_| Self::next(&mut state) as u8).collect()
    }

    /// Chunk lengths partitioning the input, each between 1 and `max_chunk`
    pub fn partition(&self, max_chunk: usize) -> Vec<usize> {
        let max_chunk = max_chunk.max(1) as u64;
        let mut state = self.seed.rotate_left(17) | 1;
        let mut remaining = self.len;
        let mut chunks = Vec::new();
        while remaining > 0 {
            let size = ((Self::next(&mut state) % max_chunk) + 1) as usize;
            let size = size.min(remaining);
            chunks.push(size);
            remaining -= size;
        }
        chunks
    }
}
