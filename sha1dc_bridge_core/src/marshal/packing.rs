//! Fixed-width packing of a digest into the carrier's three slots

use crate::engine::DIGEST_LEN;

/// A digest split into two 64-bit words and one 32-bit word, big-endian
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackedDigest {
    /// Digest bytes 0..8
    pub part1: u64,
    /// Digest bytes 8..16
    pub part2: u64,
    /// Digest bytes 16..20
    pub part3: u32,
}

impl PackedDigest {
    pub fn pack(digest: &[u8; DIGEST_LEN]) -> Self {
        let mut part1 = [0u8; 8];
        let mut part2 = [0u8; 8];
        let mut part3 = [0u8; 4];
        part1.copy_from_slice(&digest[0..8]);
        part2.copy_from_slice(&digest[8..16]);
        part3.copy_from_slice(&digest[16..20]);
        Self {
            part1: u64::from_be_bytes(part1),
            part2: u64::from_be_bytes(part2),
            part3: u32::from_be_bytes(part3),
        }
    }

    /// Reassemble the 20 digest bytes
    pub fn to_bytes(&self) -> [u8; DIGEST_LEN] {
        let mut digest = [0u8; DIGEST_LEN];
        digest[0..8].copy_from_slice(&self.part1.to_be_bytes());
        digest[8..16].copy_from_slice(&self.part2.to_be_bytes());
        digest[16..20].copy_from_slice(&self.part3.to_be_bytes());
        digest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA-1("abc")
    const ABC: [u8; DIGEST_LEN] = [
        0xa9, 0x99, 0x3e, 0x36, 0x47, 0x06, 0x81, 0x6a, 0xba, 0x3e, 0x25, 0x71, 0x78, 0x50, 0xc2,
        0x6c, 0x9c, 0xd0, 0xd8, 0x9d,
    ];

    #[test]
    fn test_pack_known_digest() {
        let packed = PackedDigest::pack(&ABC);
        assert_eq!(packed.part1, 0xa999_3e36_4706_816a);
        assert_eq!(packed.part2, 0xba3e_2571_7850_c26c);
        assert_eq!(packed.part3, 0x9cd0_d89d);
    }

    #[test]
    fn test_unpack_reconstructs_digest() {
        assert_eq!(PackedDigest::pack(&ABC).to_bytes(), ABC);
    }

    #[test]
    fn test_high_bit_bytes_keep_their_value() {
        let digest = [0xff; DIGEST_LEN];
        let packed = PackedDigest::pack(&digest);
        assert_eq!(packed.part1, u64::MAX);
        assert_eq!(packed.part3, u32::MAX);
        assert_eq!(packed.part1 as i64, -1);
        assert_eq!(packed.to_bytes(), digest);
    }
}
