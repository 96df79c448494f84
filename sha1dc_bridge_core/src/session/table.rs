//! Generation-checked slot table backing the session manager

use super::SessionHandle;
use crate::error::SessionError;

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot table mapping handles to owned values
///
/// Releasing a slot bumps its generation, so handles issued for the previous
/// occupant no longer resolve. A slot whose generation would overflow is
/// retired instead of reused.
pub struct SessionTable<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
    limit: usize,
}

impl<T> SessionTable<T> {
    /// Create an empty table holding at most `limit` live values
    pub fn with_limit(limit: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            limit,
        }
    }

    /// Store a value and return its handle
    pub fn insert(&mut self, value: T) -> Result<SessionHandle, SessionError> {
        if self.live >= self.limit {
            return Err(SessionError::limit_reached(self.limit));
        }

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            self.live += 1;
            return Ok(SessionHandle::new(index, slot.generation));
        }

        let index = u32::try_from(self.slots.len())
            .ok()
            .filter(|index| *index < u32::MAX)
            .ok_or_else(|| SessionError::allocation_failed("session table index space exhausted"))?;

        // Reserve the free-list entry now so removal never allocates.
        self.slots
            .try_reserve(1)
            .map_err(|e| SessionError::allocation_failed(e.to_string()))?;
        self.free
            .try_reserve(self.slots.len() + 1 - self.free.len())
            .map_err(|e| SessionError::allocation_failed(e.to_string()))?;

        self.slots.push(Slot {
            generation: 1,
            value: Some(value),
        });
        self.live += 1;
        Ok(SessionHandle::new(index, 1))
    }

    fn slot(&self, handle: SessionHandle) -> Option<&Slot<T>> {
        let slot = self.slots.get(handle.index()? as usize)?;
        (slot.generation == handle.generation()).then_some(slot)
    }

    /// Look up a live value
    pub fn get(&self, handle: SessionHandle) -> Option<&T> {
        self.slot(handle)?.value.as_ref()
    }

    /// Remove a value, invalidating its handle
    pub fn remove(&mut self, handle: SessionHandle) -> Option<T> {
        let index = handle.index()?;
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        let value = slot.value.take()?;
        self.live -= 1;
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free.push(index);
        }
        Some(value)
    }

    /// Drop every value and invalidate every outstanding handle
    pub fn clear(&mut self) {
        for index in 0..self.slots.len() {
            let handle = SessionHandle::new(index as u32, self.slots[index].generation);
            self.remove(handle);
        }
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut table = SessionTable::with_limit(8);
        let a = table.insert("a").unwrap();
        let b = table.insert("b").unwrap();

        assert_ne!(a, b);
        assert_eq!(table.get(a), Some(&"a"));
        assert_eq!(table.get(b), Some(&"b"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_removed_handle_is_stale() {
        let mut table = SessionTable::with_limit(8);
        let a = table.insert(1).unwrap();

        assert_eq!(table.remove(a), Some(1));
        assert_eq!(table.get(a), None);
        assert_eq!(table.remove(a), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let mut table = SessionTable::with_limit(8);
        let first = table.insert(1).unwrap();
        table.remove(first);
        let second = table.insert(2).unwrap();

        assert_eq!(first.index(), second.index());
        assert_ne!(first, second);
        assert_eq!(table.get(first), None);
        assert_eq!(table.get(second), Some(&2));
    }

    #[test]
    fn test_limit_reached() {
        let mut table = SessionTable::with_limit(2);
        table.insert(1).unwrap();
        let b = table.insert(2).unwrap();

        assert_eq!(table.insert(3), Err(SessionError::limit_reached(2)));

        table.remove(b);
        assert!(table.insert(4).is_ok());
    }

    #[test]
    fn test_unknown_handles() {
        let mut table: SessionTable<u8> = SessionTable::with_limit(2);
        assert_eq!(table.get(SessionHandle::NULL), None);
        assert_eq!(table.get(SessionHandle::from_raw(0xdead_beef)), None);
        assert_eq!(table.remove(SessionHandle::NULL), None);
    }

    #[test]
    fn test_clear_invalidates_everything() {
        let mut table = SessionTable::with_limit(4);
        let handles: Vec<_> = (0..3).map(|i| table.insert(i).unwrap()).collect();

        table.clear();

        assert!(table.is_empty());
        for handle in handles {
            assert_eq!(table.get(handle), None);
        }
    }
}
