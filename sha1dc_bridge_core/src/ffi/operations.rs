//! Ingestion and finalize entry points

use crate::ffi::handles::loaded_bridge;
use crate::ffi::regions::{FfiDirectBuffer, FfiHostRegion};
use crate::ffi::types::{Sha1dcDirectBuffer, Sha1dcHandle, Sha1dcHostRegion};
use crate::ffi_catch_panic;
use crate::ingest::IngestStrategy;
use crate::marshal::RawCarrier;
use crate::session::SessionHandle;
use std::ffi::c_void;

/// Feed one byte
#[unsafe(no_mangle)]
pub extern "C" fn sha1dc_consume_byte(handle: Sha1dcHandle, byte: u8) {
    ffi_catch_panic!((), {
        if let Some(bridge) = loaded_bridge() {
            let _ = bridge
                .sessions
                .consume_byte(SessionHandle::from_raw(handle), byte);
        }
    })
}

/// Feed `length` bytes at `offset` of a host-managed region
///
/// A region that can't be resolved, or a range outside it, ingests nothing
/// and is not reported.
#[unsafe(no_mangle)]
pub extern "C" fn sha1dc_consume_region(
    handle: Sha1dcHandle,
    region: *const Sha1dcHostRegion,
    offset: i32,
    length: i32,
    prefer_copy: bool,
) {
    ffi_catch_panic!((), {
        if region.is_null() {
            log::warn!("sha1dc_consume_region called with a null region");
            return;
        }
        let Some(bridge) = loaded_bridge() else {
            return;
        };
        // SAFETY: non-null; the host keeps the descriptor alive for the call.
        let region = FfiHostRegion::new(unsafe { &*region });
        let _ = bridge.sessions.consume_region(
            SessionHandle::from_raw(handle),
            &region,
            offset,
            length,
            IngestStrategy::from_prefer_copy(prefer_copy),
        );
    })
}

/// Feed `length` bytes at `offset` of a direct buffer
///
/// Returns `false`, having ingested nothing, when the buffer has no
/// resolvable address or the range does not fit it.
#[unsafe(no_mangle)]
pub extern "C" fn sha1dc_consume_direct(
    handle: Sha1dcHandle,
    buffer: *const Sha1dcDirectBuffer,
    offset: i32,
    length: i32,
) -> bool {
    ffi_catch_panic!(false, {
        if buffer.is_null() {
            return false;
        }
        let Some(bridge) = loaded_bridge() else {
            return false;
        };
        // SAFETY: non-null; the host keeps the descriptor alive for the call.
        let buffer = FfiDirectBuffer::new(unsafe { &*buffer });
        bridge
            .sessions
            .consume_external_region(SessionHandle::from_raw(handle), &buffer, offset, length)
            .is_ok_and(|outcome| outcome.is_ingested())
    })
}

/// Finalize a session into the host's result carrier
///
/// Returns `true` when a collision was detected; the carrier is not written
/// then. Any failure to finalize (invalid handle, null carrier, bridge not
/// loaded) also returns `true` with the carrier untouched, so `false` always
/// means the carrier holds a digest.
#[unsafe(no_mangle)]
pub extern "C" fn sha1dc_finalize(handle: Sha1dcHandle, carrier: *mut c_void) -> bool {
    ffi_catch_panic!(true, {
        let Some(bridge) = loaded_bridge() else {
            return true;
        };
        // SAFETY: the carrier is an instance of the type described at load,
        // so it spans `layout.size()` writable bytes.
        let Some(mut carrier) = (unsafe { RawCarrier::from_raw(carrier, &bridge.layout) }) else {
            log::warn!("sha1dc_finalize called with a null carrier");
            return true;
        };
        bridge
            .sessions
            .finalize(SessionHandle::from_raw(handle), &bridge.layout, &mut carrier)
            .unwrap_or(true)
    })
}
