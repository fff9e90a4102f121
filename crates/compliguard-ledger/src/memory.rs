use crate::transport::{LedgerTransport, PutOutcome, TransportError};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

/// In-process transport for tests and dry runs.
///
/// The conditional put holds the write lock across check-and-insert. The `tamper_*` hooks
/// mutate stored bytes behind the client's back to exercise read-side verification.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    unavailable: AtomicBool,
}

fn poisoned<T>(_: PoisonError<T>) -> TransportError {
    TransportError::Unavailable("in-memory ledger lock poisoned".to_string())
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`TransportError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), TransportError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable(
                "in-memory ledger switched off".to_string(),
            ));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply `edit` to the bytes stored under `key`. Returns false when the key is absent.
    pub fn tamper_with<F: FnOnce(&mut Vec<u8>)>(&self, key: &str, edit: F) -> bool {
        match self.entries.write() {
            Ok(mut entries) => match entries.get_mut(key) {
                Some(bytes) => {
                    edit(bytes);
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    /// Store `bytes` under `key` unconditionally, bypassing create-once semantics.
    pub fn tamper_replace(&self, key: &str, bytes: Vec<u8>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), bytes);
        }
    }
}

impl LedgerTransport for InMemoryTransport {
    fn put_if_absent(&self, key: &str, value: &[u8]) -> Result<PutOutcome, TransportError> {
        self.check_available()?;
        let mut entries = self.entries.write().map_err(poisoned)?;
        if entries.contains_key(key) {
            return Ok(PutOutcome::AlreadyExists);
        }
        entries.insert(key.to_string(), value.to_vec());
        Ok(PutOutcome::Stored)
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, TransportError> {
        self.check_available()?;
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }
}
