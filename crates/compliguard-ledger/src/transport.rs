use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result of a conditional put.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PutOutcome {
    Stored,
    /// The key already holds a value; nothing was written.
    AlreadyExists,
}

/// Substrate failure. Callers may retry; the core never does.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("ledger transport unavailable: {0}")]
    Unavailable(String),

    #[error("ledger transport timed out after {0:?}")]
    Timeout(Duration),

    #[error("ledger io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Durable key/value substrate with per-key read-your-writes consistency.
///
/// `put_if_absent` must be atomic: of two concurrent puts to one key, exactly one returns
/// [`PutOutcome::Stored`].
pub trait LedgerTransport: Send + Sync {
    fn put_if_absent(&self, key: &str, value: &[u8]) -> Result<PutOutcome, TransportError>;

    /// `Ok(None)` when the key holds nothing.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, TransportError>;
}

impl<T: LedgerTransport + ?Sized> LedgerTransport for Arc<T> {
    fn put_if_absent(&self, key: &str, value: &[u8]) -> Result<PutOutcome, TransportError> {
        (**self).put_if_absent(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, TransportError> {
        (**self).get(key)
    }
}

impl<T: LedgerTransport + ?Sized> LedgerTransport for &T {
    fn put_if_absent(&self, key: &str, value: &[u8]) -> Result<PutOutcome, TransportError> {
        (**self).put_if_absent(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, TransportError> {
        (**self).get(key)
    }
}
