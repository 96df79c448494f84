//! Result carriers
//!
//! A carrier is caller-owned storage with three numeric slots. The bridge
//! never allocates one; it only writes the slots a [`CarrierLayout`] names.

use super::{CarrierLayout, CarrierSlot, FieldId, PackedDigest};
use crate::engine::DIGEST_LEN;
use std::ffi::c_void;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Storage the marshaler writes a packed digest into
pub trait ResultCarrier {
    fn set_long_field(&mut self, field: FieldId, value: i64);
    fn set_int_field(&mut self, field: FieldId, value: i32);
}

/// Carrier with the canonical field order, for Rust callers and C hosts that
/// mirror it
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DigestCarrier {
    pub part1: i64,
    pub part2: i64,
    pub part3: i32,
}

impl DigestCarrier {
    pub fn packed(&self) -> PackedDigest {
        PackedDigest {
            part1: self.part1 as u64,
            part2: self.part2 as u64,
            part3: self.part3 as u32,
        }
    }

    /// Digest bytes held by the carrier
    pub fn digest(&self) -> [u8; DIGEST_LEN] {
        self.packed().to_bytes()
    }
}

// Slots are picked by role, so any resolved layout fills this carrier whole.
impl ResultCarrier for DigestCarrier {
    fn set_long_field(&mut self, field: FieldId, value: i64) {
        match field.slot() {
            CarrierSlot::Part1 => self.part1 = value,
            CarrierSlot::Part2 => self.part2 = value,
            CarrierSlot::Part3 => log::warn!("64-bit value offered for the 32-bit part3 slot"),
        }
    }

    fn set_int_field(&mut self, field: FieldId, value: i32) {
        match field.slot() {
            CarrierSlot::Part3 => self.part3 = value,
            slot => log::warn!("32-bit value offered for the 64-bit {} slot", slot.name()),
        }
    }
}

/// Carrier living in host memory, written through resolved byte offsets
pub struct RawCarrier<'a> {
    base: NonNull<u8>,
    size: usize,
    _memory: PhantomData<&'a mut [u8]>,
}

impl RawCarrier<'_> {
    /// Wrap host carrier memory, or `None` for a null pointer
    ///
    /// # Safety
    ///
    /// `base` must be valid for writes of `layout.size()` bytes for the
    /// lifetime of the returned carrier, and nothing else may access that
    /// memory meanwhile.
    pub unsafe fn from_raw(base: *mut c_void, layout: &CarrierLayout) -> Option<Self> {
        Some(Self {
            base: NonNull::new(base.cast::<u8>())?,
            size: layout.size(),
            _memory: PhantomData,
        })
    }

    fn write<const N: usize>(&mut self, field: FieldId, bytes: [u8; N]) {
        let offset = field.offset();
        if offset.checked_add(N).is_none_or(|end| end > self.size) {
            log::warn!("Carrier slot at offset {offset} does not fit {} bytes", self.size);
            return;
        }
        // SAFETY: the range was checked against the size from_raw's caller
        // vouched for.
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), self.base.as_ptr().add(offset), N);
        }
    }
}

impl ResultCarrier for RawCarrier<'_> {
    fn set_long_field(&mut self, field: FieldId, value: i64) {
        self.write(field, value.to_ne_bytes());
    }

    fn set_int_field(&mut self, field: FieldId, value: i32) {
        self.write(field, value.to_ne_bytes());
    }
}
