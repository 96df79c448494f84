//! Session lifecycle management
//!
//! Sessions live in a generation-checked table owned by [`SessionManager`].
//! Each session sits behind its own mutex, so independent sessions never
//! contend; the table lock is only held long enough to look a session up.
//! Ingestion on one session is applied in the order calls acquire its lock.

pub mod handle;
pub mod table;

pub use handle::SessionHandle;
pub use table::SessionTable;

use crate::config::BridgeConfig;
use crate::engine::HashEngine;
use crate::error::SessionError;
use crate::ingest::{self, DirectRegion, HostBuffer, HostRegion, IngestOutcome, IngestStrategy};
use crate::marshal::{self, CarrierLayout, ResultCarrier};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One hashing session: engine state plus the session's preferred strategy
pub struct Session<E> {
    engine: E,
    strategy: IngestStrategy,
}

impl<E: HashEngine> Session<E> {
    fn new(strategy: IngestStrategy) -> Self {
        Self {
            engine: E::init(),
            strategy,
        }
    }

    fn duplicate(&self) -> Self {
        Self {
            engine: self.engine.duplicate(),
            strategy: self.strategy,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn strategy(&self) -> IngestStrategy {
        self.strategy
    }
}

type SharedSession<E> = Arc<Mutex<Session<E>>>;

/// Owns every live session and hands out handles to them
pub struct SessionManager<E: HashEngine> {
    sessions: RwLock<SessionTable<SharedSession<E>>>,
    config: BridgeConfig,
}

impl<E: HashEngine> Default for SessionManager<E> {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

impl<E: HashEngine> SessionManager<E> {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            sessions: RwLock::new(SessionTable::with_limit(config.max_sessions)),
            config,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    // Engine state is plain data, so a poisoned lock is still usable.
    fn read_table(&self) -> RwLockReadGuard<'_, SessionTable<SharedSession<E>>> {
        self.sessions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_table(&self) -> RwLockWriteGuard<'_, SessionTable<SharedSession<E>>> {
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock(session: &SharedSession<E>) -> MutexGuard<'_, Session<E>> {
        session.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lookup(&self, handle: SessionHandle) -> Result<SharedSession<E>, SessionError> {
        match self.read_table().get(handle) {
            Some(session) => Ok(Arc::clone(session)),
            None => {
                log::warn!("Operation on invalid session handle {handle}");
                Err(SessionError::invalid_handle(handle))
            }
        }
    }

    fn insert(&self, session: Session<E>) -> Result<SessionHandle, SessionError> {
        self.write_table()
            .insert(Arc::new(Mutex::new(session)))
            .inspect_err(|e| log::warn!("Session allocation failed: {e}"))
    }

    /// Run `f` with exclusive access to a session
    pub fn with_session<R>(
        &self,
        handle: SessionHandle,
        f: impl FnOnce(&mut Session<E>) -> R,
    ) -> Result<R, SessionError> {
        let session = self.lookup(handle)?;
        let mut guard = Self::lock(&session);
        Ok(f(&mut guard))
    }

    /// Create a session at the engine's start state
    pub fn allocate(&self) -> Result<SessionHandle, SessionError> {
        let handle = self.insert(Session::new(self.config.default_strategy))?;
        log::debug!("Allocated session {handle}");
        Ok(handle)
    }

    /// Create a new session holding a copy of `handle`'s state
    pub fn clone_session(&self, handle: SessionHandle) -> Result<SessionHandle, SessionError> {
        let copy = self.with_session(handle, |session| session.duplicate())?;
        let cloned = self.insert(copy)?;
        log::debug!("Cloned session {handle} into {cloned}");
        Ok(cloned)
    }

    /// Return a session to the start state
    pub fn reset(&self, handle: SessionHandle) -> Result<(), SessionError> {
        self.with_session(handle, |session| session.engine.reset())
    }

    /// Free a session; its handle never resolves again
    pub fn release(&self, handle: SessionHandle) -> Result<(), SessionError> {
        match self.write_table().remove(handle) {
            Some(_) => {
                log::debug!("Released session {handle}");
                Ok(())
            }
            None => {
                log::warn!("Release of invalid session handle {handle}");
                Err(SessionError::invalid_handle(handle))
            }
        }
    }

    /// Change the strategy [`SessionManager::consume_region_default`] uses
    pub fn set_strategy(
        &self,
        handle: SessionHandle,
        strategy: IngestStrategy,
    ) -> Result<(), SessionError> {
        self.with_session(handle, |session| session.strategy = strategy)
    }

    pub fn strategy(&self, handle: SessionHandle) -> Result<IngestStrategy, SessionError> {
        self.with_session(handle, |session| session.strategy)
    }

    pub fn consume_byte(&self, handle: SessionHandle, byte: u8) -> Result<(), SessionError> {
        self.with_session(handle, |session| {
            ingest::consume_byte(&mut session.engine, byte)
        })
    }

    pub fn consume_region<R: HostRegion + ?Sized>(
        &self,
        handle: SessionHandle,
        region: &R,
        offset: i32,
        length: i32,
        strategy: IngestStrategy,
    ) -> Result<IngestOutcome, SessionError> {
        self.with_session(handle, |session| {
            ingest::consume_region(&mut session.engine, region, offset, length, strategy)
        })
    }

    /// [`SessionManager::consume_region`] with the session's own strategy
    pub fn consume_region_default<R: HostRegion + ?Sized>(
        &self,
        handle: SessionHandle,
        region: &R,
        offset: i32,
        length: i32,
    ) -> Result<IngestOutcome, SessionError> {
        self.with_session(handle, |session| {
            let strategy = session.strategy;
            ingest::consume_region(&mut session.engine, region, offset, length, strategy)
        })
    }

    pub fn consume_external_region<D: DirectRegion + ?Sized>(
        &self,
        handle: SessionHandle,
        region: &D,
        offset: i32,
        length: i32,
    ) -> Result<IngestOutcome, SessionError> {
        self.with_session(handle, |session| {
            ingest::consume_external_region(&mut session.engine, region, offset, length)
        })
    }

    pub fn consume_buffer(
        &self,
        handle: SessionHandle,
        buffer: &HostBuffer<'_>,
    ) -> Result<IngestOutcome, SessionError> {
        self.with_session(handle, |session| {
            let strategy = session.strategy;
            ingest::consume_buffer(&mut session.engine, buffer, strategy)
        })
    }

    /// Finalize a session into `carrier`; `Ok(true)` means a collision was
    /// detected and the carrier was not written
    pub fn finalize<C: ResultCarrier + ?Sized>(
        &self,
        handle: SessionHandle,
        layout: &CarrierLayout,
        carrier: &mut C,
    ) -> Result<bool, SessionError> {
        self.with_session(handle, |session| {
            marshal::finalize_into(&mut session.engine, layout, carrier)
        })
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.read_table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release every session
    pub fn clear(&self) {
        let mut table = self.write_table();
        let released = table.len();
        table.clear();
        if released > 0 {
            log::debug!("Released {released} outstanding sessions");
        }
    }
}
