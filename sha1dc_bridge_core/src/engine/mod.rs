//! Hash engine abstraction
//!
//! The bridge never computes SHA-1 itself. It drives an engine through the
//! four primitives in [`HashEngine`] and treats the engine state as an opaque
//! value that can be duplicated.

pub mod sha1cd;
pub mod traits;

pub use sha1cd::Sha1CdEngine;
pub use traits::HashEngine;

/// Length of a SHA-1 digest in bytes
pub const DIGEST_LEN: usize = 20;

/// Digest bytes and collision flag, always produced together by finalize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestResult {
    pub digest: [u8; DIGEST_LEN],
    pub collision_detected: bool,
}

impl DigestResult {
    /// Result for a clean (collision-free) digest
    pub fn clean(digest: [u8; DIGEST_LEN]) -> Self {
        Self {
            digest,
            collision_detected: false,
        }
    }

    /// Result for a digest the engine flagged as a collision attack
    pub fn collision(digest: [u8; DIGEST_LEN]) -> Self {
        Self {
            digest,
            collision_detected: true,
        }
    }

    /// Lowercase hex of the digest bytes
    pub fn to_hex(&self) -> String {
        to_hex(&self.digest)
    }
}

/// Lowercase hex encoding of a digest
pub fn to_hex(digest: &[u8]) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
