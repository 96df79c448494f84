//! SHA-1 Collision-Detection Bridge Core Library
//!
//! Session lifecycle and buffer marshaling around an incremental SHA-1 engine
//! with collision detection, for hosts that reach native code through a C
//! ABI.
//!
//! A session is allocated through a [`SessionManager`], fed bytes from
//! host-managed regions (pinned or copied), direct buffers or single bytes,
//! and finalized into a caller-owned carrier whose layout was resolved once
//! at load.

pub mod config;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod ingest;
pub mod marshal;
pub mod session;

// Re-export main types
pub use config::BridgeConfig;
pub use engine::{DIGEST_LEN, DigestResult, HashEngine, Sha1CdEngine, to_hex};
pub use error::{ConfigError, Error, RegistrationError, Result, SessionError};
pub use ingest::{
    DirectRegion, HeapRegion, HostBuffer, HostRegion, IngestOutcome, IngestStrategy,
    RegionBytes, ReleaseMode,
};
pub use marshal::{
    CarrierDescriptor, CarrierLayout, DigestCarrier, FieldDescriptor, PackedDigest, ResultCarrier,
};
pub use session::{Session, SessionHandle, SessionManager};
