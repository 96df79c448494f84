//! C ABI for the SHA-1 collision-detection bridge
//!
//! The host loads the library, calls [`sha1dc_on_load`] once with a
//! description of its result carrier type, and then drives sessions through
//! opaque integer handles.
//!
//! # Safety
//!
//! - Handles are generation-checked: a released or never-issued handle is
//!   detected and the call fails closed instead of touching freed memory
//! - Null region, buffer and carrier pointers are rejected
//! - Offset/length pairs are checked against the resolved region
//! - No Rust panic crosses the boundary; each entry point maps a panic to its
//!   failure value
//!
//! Pointers that are non-null but dangling, and carriers smaller than the
//! size declared at load, remain the host's responsibility.

#![allow(clippy::not_unsafe_ptr_arg_deref)]

pub mod handles;
pub mod helpers;
pub mod operations;
mod regions;
pub mod types;

pub use handles::*;
pub use operations::*;
pub use types::*;

pub(crate) use crate::ffi_catch_panic;

use crate::config::BridgeConfig;
use crate::marshal::CarrierLayout;
use crate::session::SessionManager;
use handles::{BRIDGE, LoadedBridge};
use helpers::descriptor_from_ffi;
use std::ffi::c_char;
use std::sync::Arc;

const VERSION_STRING: &str = "0.1.0-alpha\0";

/* ========================================================================== */
/*                          Library Initialization                             */
/* ========================================================================== */

/// Resolve the result carrier layout and bring the bridge up
///
/// Returns [`SHA1DC_ABI_VERSION`] on success, [`SHA1DC_ERR`] if the
/// descriptor can't be resolved, and [`SHA1DC_ERR_CONFIG`] if the
/// `SHA1DC_*` environment is invalid. A failed load leaves the bridge
/// unusable. Loading again with the same layout is a no-op; a different
/// layout requires `sha1dc_on_unload` first.
#[unsafe(no_mangle)]
pub extern "C" fn sha1dc_on_load(descriptor: *const Sha1dcCarrierDescriptor) -> i32 {
    ffi_catch_panic!(SHA1DC_ERR, {
        let layout = match descriptor_from_ffi(descriptor)
            .and_then(|descriptor| CarrierLayout::resolve(&descriptor))
        {
            Ok(layout) => layout,
            Err(e) => {
                log::error!("Bridge load failed: {e}");
                return SHA1DC_ERR;
            }
        };

        let mut bridge = BRIDGE.write().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = bridge.as_ref() {
            if existing.layout == layout {
                return SHA1DC_ABI_VERSION;
            }
            log::error!("Bridge already loaded with a different result carrier layout");
            return SHA1DC_ERR;
        }

        let config = match BridgeConfig::from_env() {
            Ok(config) => config,
            Err(e) => {
                log::error!("Bridge load failed: {e}");
                return SHA1DC_ERR_CONFIG;
            }
        };
        log::debug!(
            "Bridge loaded (default strategy {}, max {} sessions)",
            config.default_strategy,
            config.max_sessions
        );
        *bridge = Some(Arc::new(LoadedBridge {
            sessions: SessionManager::new(config),
            layout,
        }));
        SHA1DC_ABI_VERSION
    })
}

/// Release every session and forget the resolved layout
#[unsafe(no_mangle)]
pub extern "C" fn sha1dc_on_unload() {
    ffi_catch_panic!((), {
        let previous = BRIDGE.write().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(bridge) = previous {
            bridge.sessions.clear();
            log::debug!("Bridge unloaded");
        }
    })
}

/// Library version string
#[unsafe(no_mangle)]
pub extern "C" fn sha1dc_get_version() -> *const c_char {
    VERSION_STRING.as_ptr() as *const c_char
}

/// ABI version a successful load reports
#[unsafe(no_mangle)]
pub extern "C" fn sha1dc_get_abi_version() -> i32 {
    SHA1DC_ABI_VERSION
}
