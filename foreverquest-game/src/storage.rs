//! Persisting the session blob and deciding whether it can be resumed.
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use thiserror::Error;

use crate::SessionStorage;
use crate::constants::STATE_KEY;
use crate::state::SessionState;

#[derive(Debug, Error)]
pub enum StoreError<E>
where
    E: std::error::Error + 'static,
{
    #[error("storage backend failed: {0}")]
    Backend(#[source] E),
    #[error("session could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What the start-up check found under the session key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resume {
    /// Nothing usable was stored; begin a new session.
    Fresh,
    /// An unfinished session the user may continue.
    Resumable(SessionState),
}

/// Overwrite the stored session with `state`.
///
/// # Errors
///
/// Returns an error if the state cannot be encoded or the backend rejects the write.
pub fn save_session<S: SessionStorage>(
    storage: &S,
    state: &SessionState,
) -> Result<(), StoreError<S::Error>> {
    let json = serde_json::to_string(state)?;
    storage.write(STATE_KEY, &json).map_err(StoreError::Backend)
}

/// Inspect the stored session.
///
/// A blob that does not parse is removed. A completed session is left in place
/// but never offered for resume.
///
/// # Errors
///
/// Returns an error only when the backend itself fails.
pub fn load_resumable<S: SessionStorage>(storage: &S) -> Result<Resume, S::Error> {
    let Some(raw) = storage.read(STATE_KEY)? else {
        return Ok(Resume::Fresh);
    };
    match serde_json::from_str::<SessionState>(&raw) {
        Ok(state) if state.is_resumable() => Ok(Resume::Resumable(state)),
        Ok(_) => {
            log::debug!("stored session is already completed; starting fresh");
            Ok(Resume::Fresh)
        }
        Err(err) => {
            log::warn!("discarding unreadable saved session: {err}");
            storage.remove(STATE_KEY)?;
            Ok(Resume::Fresh)
        }
    }
}

/// Drop whatever session is stored.
///
/// # Errors
///
/// Returns an error when the backend fails.
pub fn clear_session<S: SessionStorage>(storage: &S) -> Result<(), S::Error> {
    storage.remove(STATE_KEY)
}

/// In-process key/value store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    type Error = Infallible;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Settings;
    use chrono::Utc;

    #[test]
    fn empty_storage_starts_fresh() {
        let storage = MemoryStorage::new();
        assert_eq!(load_resumable(&storage).unwrap(), Resume::Fresh);
    }

    #[test]
    fn unfinished_session_is_offered() {
        let storage = MemoryStorage::new();
        let mut state = SessionState::fresh(Settings::default(), Utc::now());
        state.current_index = 3;
        save_session(&storage, &state).unwrap();
        assert_eq!(
            load_resumable(&storage).unwrap(),
            Resume::Resumable(state)
        );
    }

    #[test]
    fn corrupt_blob_is_removed() {
        let storage = MemoryStorage::new();
        storage.write(STATE_KEY, "{not json").unwrap();
        assert_eq!(load_resumable(&storage).unwrap(), Resume::Fresh);
        assert!(storage.is_empty());
    }

    #[test]
    fn completed_session_is_ignored() {
        let storage = MemoryStorage::new();
        let mut state = SessionState::fresh(Settings::default(), Utc::now());
        state.finalize(Utc::now());
        save_session(&storage, &state).unwrap();
        assert_eq!(load_resumable(&storage).unwrap(), Resume::Fresh);
        assert_eq!(storage.len(), 1);

        clear_session(&storage).unwrap();
        assert!(storage.is_empty());
    }
}
