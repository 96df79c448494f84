//! SHA-1 with collision detection, backed by `sha1collisiondetection`

use super::{DIGEST_LEN, DigestResult, HashEngine};
use sha1collisiondetection::{Builder, Digest, Sha1CD};

/// Engine wrapping a [`Sha1CD`] context
#[derive(Clone)]
pub struct Sha1CdEngine {
    ctx: Sha1CD,
}

impl Sha1CdEngine {
    fn build() -> Sha1CD {
        Builder::default()
            .detect_collisions(true)
            .use_ubc(true)
            .safe_hash(true)
            .build()
    }
}

impl HashEngine for Sha1CdEngine {
    fn init() -> Self {
        Self { ctx: Self::build() }
    }

    fn reset(&mut self) {
        self.ctx = Self::build();
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.ctx, data);
    }

    fn finalize(&mut self) -> DigestResult {
        let mut out = Default::default();
        let outcome = self.ctx.finalize_into_dirty_cd(&mut out);
        digest_result(&out, outcome)
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }
}

/// Pair the output with the detector's verdict; an `Err` is a detected
/// collision and `out` then holds the mitigated (safe) hash
fn digest_result<C>(out: &[u8], outcome: Result<(), C>) -> DigestResult {
    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(out);
    match outcome {
        Ok(()) => DigestResult::clean(digest),
        Err(_) => DigestResult::collision(digest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::to_hex;

    fn hash(chunks: &[&[u8]]) -> DigestResult {
        let mut engine = Sha1CdEngine::init();
        for chunk in chunks {
            engine.update(chunk);
        }
        engine.finalize()
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            hash(&[]).to_hex(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(
            hash(&[b"abc"]).to_hex(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            hash(&[b"te", b"st"]).to_hex(),
            "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3"
        );
        assert!(!hash(&[b"abc"]).collision_detected);
    }

    #[test]
    fn test_reset_discards_input() {
        let mut engine = Sha1CdEngine::init();
        engine.update(b"test");
        engine.reset();
        engine.update(b"test_hash");
        assert_eq!(
            to_hex(&engine.finalize().digest),
            "327d106bf608b1f63bf5cbc5d1b6ea2d6836b446"
        );
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut original = Sha1CdEngine::init();
        original.update(b"te");
        let mut copy = original.duplicate();
        copy.update(b"st_hash");
        original.update(b"st");

        assert_eq!(
            copy.finalize().to_hex(),
            "327d106bf608b1f63bf5cbc5d1b6ea2d6836b446"
        );
        assert_eq!(
            original.finalize().to_hex(),
            "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3"
        );
    }

    #[test]
    fn test_detector_verdict_maps_to_collision_flag() {
        let out = [0x5a; DIGEST_LEN];

        let clean = digest_result::<()>(&out, Ok(()));
        assert!(!clean.collision_detected);
        assert_eq!(clean.digest, out);

        let flagged = digest_result(&out, Err(()));
        assert!(flagged.collision_detected);
        assert_eq!(flagged.digest, out);
    }
}
