//! Result marshaling
//!
//! Finalize hands the host a digest without allocating anything on the
//! host's side: the 20 bytes are packed into two 64-bit and one 32-bit slot of
//! a carrier the host already owns.

pub mod carrier;
pub mod packing;
pub mod registration;

pub use carrier::{DigestCarrier, RawCarrier, ResultCarrier};
pub use packing::PackedDigest;
pub use registration::{
    CarrierDescriptor, CarrierLayout, CarrierSlot, FieldDescriptor, FieldId, INT_SIGNATURE,
    LONG_SIGNATURE, RESULT_CARRIER_CLASS,
};

use crate::engine::HashEngine;

/// Finalize `engine` and write the packed digest into `carrier`
///
/// Returns `true` when the engine detected a collision attack. The digest is
/// discarded in that case and the carrier is left untouched.
pub fn finalize_into<E, C>(engine: &mut E, layout: &CarrierLayout, carrier: &mut C) -> bool
where
    E: HashEngine,
    C: ResultCarrier + ?Sized,
{
    let result = engine.finalize();
    if result.collision_detected {
        log::debug!("Collision detected during finalize; carrier left untouched");
        return true;
    }

    let packed = PackedDigest::pack(&result.digest);
    carrier.set_long_field(layout.part1, packed.part1 as i64);
    carrier.set_long_field(layout.part2, packed.part2 as i64);
    carrier.set_int_field(layout.part3, packed.part3 as i32);
    false
}
