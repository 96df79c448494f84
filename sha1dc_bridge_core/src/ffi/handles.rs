//! Bridge state and session lifecycle entry points
//!
//! The loaded bridge pairs the session table with the carrier layout that
//! was resolved at load. It only exists between `sha1dc_on_load` and
//! `sha1dc_on_unload`; every entry point fails closed when it is absent.

use crate::engine::Sha1CdEngine;
use crate::ffi::types::{SHA1DC_NULL_HANDLE, Sha1dcHandle};
use crate::ffi_catch_panic;
use crate::marshal::CarrierLayout;
use crate::session::{SessionHandle, SessionManager};
use std::sync::{Arc, RwLock};

/// Everything resolved and allocated at load
pub(crate) struct LoadedBridge {
    pub sessions: SessionManager<Sha1CdEngine>,
    pub layout: CarrierLayout,
}

lazy_static::lazy_static! {
    pub(crate) static ref BRIDGE: RwLock<Option<Arc<LoadedBridge>>> = RwLock::new(None);
}

/// The loaded bridge, if any
pub(crate) fn loaded_bridge() -> Option<Arc<LoadedBridge>> {
    let bridge = BRIDGE.read().unwrap_or_else(|e| e.into_inner()).clone();
    if bridge.is_none() {
        log::error!("Bridge used before sha1dc_on_load");
    }
    bridge
}

/// Allocate a session; returns 0 on failure
#[unsafe(no_mangle)]
pub extern "C" fn sha1dc_session_alloc() -> Sha1dcHandle {
    ffi_catch_panic!(SHA1DC_NULL_HANDLE, {
        let Some(bridge) = loaded_bridge() else {
            return SHA1DC_NULL_HANDLE;
        };
        bridge
            .sessions
            .allocate()
            .map(SessionHandle::into_raw)
            .unwrap_or(SHA1DC_NULL_HANDLE)
    })
}

/// Duplicate a session; returns 0 on failure
#[unsafe(no_mangle)]
pub extern "C" fn sha1dc_session_clone(handle: Sha1dcHandle) -> Sha1dcHandle {
    ffi_catch_panic!(SHA1DC_NULL_HANDLE, {
        let Some(bridge) = loaded_bridge() else {
            return SHA1DC_NULL_HANDLE;
        };
        bridge
            .sessions
            .clone_session(SessionHandle::from_raw(handle))
            .map(SessionHandle::into_raw)
            .unwrap_or(SHA1DC_NULL_HANDLE)
    })
}

/// Return a session to the start state
#[unsafe(no_mangle)]
pub extern "C" fn sha1dc_session_reset(handle: Sha1dcHandle) {
    ffi_catch_panic!((), {
        if let Some(bridge) = loaded_bridge() {
            let _ = bridge.sessions.reset(SessionHandle::from_raw(handle));
        }
    })
}

/// Free a session
#[unsafe(no_mangle)]
pub extern "C" fn sha1dc_session_free(handle: Sha1dcHandle) {
    ffi_catch_panic!((), {
        if let Some(bridge) = loaded_bridge() {
            let _ = bridge.sessions.release(SessionHandle::from_raw(handle));
        }
    })
}
