//! C-compatible type definitions for the bridge ABI

use std::ffi::{c_char, c_void};

/* ========================================================================== */
/*                              Type Definitions                               */
/* ========================================================================== */

/// Session handle as seen by the host; 0 is the null handle
pub type Sha1dcHandle = u64;

/// Handle returned when no session was created
pub const SHA1DC_NULL_HANDLE: Sha1dcHandle = 0;

/// ABI version returned by a successful `sha1dc_on_load`
pub const SHA1DC_ABI_VERSION: i32 = 1;
/// `sha1dc_on_load` status: carrier descriptor could not be resolved
pub const SHA1DC_ERR: i32 = -1;
/// `sha1dc_on_load` status: environment configuration is invalid
pub const SHA1DC_ERR_CONFIG: i32 = -2;

/// How the host should expose a region to `acquire`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sha1dcAccessMode {
    /// Hand out a copy of the region
    Copy = 0,
    /// Pin the region in place; the host may stall until release
    Critical = 1,
}

/// How acquired memory is handed back
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sha1dcReleaseMode {
    /// Copy changes back and free the copy
    Commit = 0,
    /// Free the copy without copying back
    Abort = 2,
}

/* ========================================================================== */
/*                            Structure Definitions                            */
/* ========================================================================== */

/// Acquire callback: returns the region's first byte and stores its length,
/// or returns null if the region can't be resolved
pub type Sha1dcAcquireFn =
    extern "C" fn(context: *mut c_void, mode: Sha1dcAccessMode, length: *mut usize) -> *mut u8;

/// Release callback: hands back a pointer previously returned by acquire
pub type Sha1dcReleaseFn =
    extern "C" fn(context: *mut c_void, data: *mut u8, mode: Sha1dcReleaseMode);

/// A host-managed region, described by the host's access callbacks
#[repr(C)]
pub struct Sha1dcHostRegion {
    pub context: *mut c_void,
    pub acquire: Option<Sha1dcAcquireFn>,
    pub release: Option<Sha1dcReleaseFn>,
}

/// An externally allocated region with a stable address
#[repr(C)]
pub struct Sha1dcDirectBuffer {
    pub address: *const u8,
    pub capacity: usize,
}

/// One field of the host's result carrier type
#[repr(C)]
pub struct Sha1dcFieldDescriptor {
    pub name: *const c_char,
    pub signature: *const c_char,
    pub offset: usize,
}

/// The host's result carrier type
#[repr(C)]
pub struct Sha1dcCarrierDescriptor {
    pub class_name: *const c_char,
    pub size: usize,
    pub fields: *const Sha1dcFieldDescriptor,
    pub field_count: usize,
}
