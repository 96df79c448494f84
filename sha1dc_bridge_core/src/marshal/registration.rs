//! One-time resolution of the result carrier layout
//!
//! The host describes its carrier type once, at load. Resolution finds the
//! three digest slots by name and type signature and checks that they fit
//! inside the carrier. The resulting [`CarrierLayout`] is immutable and is
//! passed to every finalize call.

use crate::error::RegistrationError;
use std::collections::HashSet;
use std::mem::offset_of;

/// Host type name of the result carrier
pub const RESULT_CARRIER_CLASS: &str = "sha1dc/Bridge$Result";

/// Type signature of a 64-bit slot
pub const LONG_SIGNATURE: &str = "J";
/// Type signature of a 32-bit slot
pub const INT_SIGNATURE: &str = "I";

const PART1: &str = "part1";
const PART2: &str = "part2";
const PART3: &str = "part3";

/// Which part of the packed digest a carrier slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarrierSlot {
    /// Digest bytes 0..8, 64-bit
    Part1,
    /// Digest bytes 8..16, 64-bit
    Part2,
    /// Digest bytes 16..20, 32-bit
    Part3,
}

impl CarrierSlot {
    pub fn name(self) -> &'static str {
        match self {
            Self::Part1 => PART1,
            Self::Part2 => PART2,
            Self::Part3 => PART3,
        }
    }

    fn signature(self) -> &'static str {
        match self {
            Self::Part1 | Self::Part2 => LONG_SIGNATURE,
            Self::Part3 => INT_SIGNATURE,
        }
    }

    /// Bytes the slot occupies in the carrier
    pub fn width(self) -> usize {
        match self {
            Self::Part1 | Self::Part2 => 8,
            Self::Part3 => 4,
        }
    }
}

/// Resolved location of one carrier slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    slot: CarrierSlot,
    offset: usize,
}

impl FieldId {
    pub fn slot(self) -> CarrierSlot {
        self.slot
    }

    pub fn offset(self) -> usize {
        self.offset
    }

    fn end(self) -> usize {
        self.offset + self.slot.width()
    }

    fn overlaps(self, other: FieldId) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

/// One field as declared by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub signature: String,
    pub offset: usize,
}

impl FieldDescriptor {
    pub fn new(name: &str, signature: &str, offset: usize) -> Self {
        Self {
            name: name.to_string(),
            signature: signature.to_string(),
            offset,
        }
    }
}

/// The host's description of its carrier type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierDescriptor {
    pub class_name: String,
    /// Total carrier size in bytes
    pub size: usize,
    pub fields: Vec<FieldDescriptor>,
}

impl CarrierDescriptor {
    /// Descriptor for the bridge's own [`DigestCarrier`](super::DigestCarrier)
    pub fn digest_carrier() -> Self {
        use super::DigestCarrier;
        Self {
            class_name: RESULT_CARRIER_CLASS.to_string(),
            size: std::mem::size_of::<DigestCarrier>(),
            fields: vec![
                FieldDescriptor::new(PART1, LONG_SIGNATURE, offset_of!(DigestCarrier, part1)),
                FieldDescriptor::new(PART2, LONG_SIGNATURE, offset_of!(DigestCarrier, part2)),
                FieldDescriptor::new(PART3, INT_SIGNATURE, offset_of!(DigestCarrier, part3)),
            ],
        }
    }
}

/// Resolved slot locations of the result carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierLayout {
    pub part1: FieldId,
    pub part2: FieldId,
    pub part3: FieldId,
    size: usize,
}

impl CarrierLayout {
    /// Resolve the three digest slots from a host descriptor
    pub fn resolve(descriptor: &CarrierDescriptor) -> Result<Self, RegistrationError> {
        if descriptor.class_name != RESULT_CARRIER_CLASS {
            return Err(RegistrationError::missing_class(&descriptor.class_name));
        }

        let mut seen = HashSet::new();
        for field in &descriptor.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(RegistrationError::duplicate_field(&field.name));
            }
        }

        let find = |slot: CarrierSlot| -> Result<FieldId, RegistrationError> {
            let (name, signature) = (slot.name(), slot.signature());
            let field = descriptor
                .fields
                .iter()
                .find(|f| f.name == name && f.signature == signature)
                .ok_or_else(|| RegistrationError::missing_field(name, signature))?;
            match field.offset.checked_add(slot.width()) {
                Some(end) if end <= descriptor.size => Ok(FieldId {
                    slot,
                    offset: field.offset,
                }),
                _ => Err(RegistrationError::field_out_of_bounds(
                    name,
                    field.offset,
                    descriptor.size,
                )),
            }
        };

        let layout = Self {
            part1: find(CarrierSlot::Part1)?,
            part2: find(CarrierSlot::Part2)?,
            part3: find(CarrierSlot::Part3)?,
            size: descriptor.size,
        };

        // Slots sharing bytes would overwrite each other on finalize
        let slots = [layout.part1, layout.part2, layout.part3];
        for (i, first) in slots.iter().enumerate() {
            if let Some(second) = slots[i + 1..].iter().find(|other| first.overlaps(**other)) {
                return Err(RegistrationError::overlapping_fields(
                    first.slot.name(),
                    second.slot.name(),
                ));
            }
        }

        log::debug!(
            "Resolved result carrier layout: part1@{} part2@{} part3@{} size={}",
            layout.part1.offset,
            layout.part2.offset,
            layout.part3.offset,
            layout.size
        );
        Ok(layout)
    }

    /// Layout of the bridge's own [`DigestCarrier`](super::DigestCarrier)
    pub fn digest_carrier() -> Self {
        use super::DigestCarrier;
        Self {
            part1: FieldId {
                slot: CarrierSlot::Part1,
                offset: offset_of!(DigestCarrier, part1),
            },
            part2: FieldId {
                slot: CarrierSlot::Part2,
                offset: offset_of!(DigestCarrier, part2),
            },
            part3: FieldId {
                slot: CarrierSlot::Part3,
                offset: offset_of!(DigestCarrier, part3),
            },
            size: std::mem::size_of::<DigestCarrier>(),
        }
    }

    /// Size in bytes a carrier must have for this layout
    pub fn size(&self) -> usize {
        self.size
    }
}
