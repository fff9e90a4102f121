//! Ledger adapters: the transport seam, two transports, and the client that verifies every read.
//!
//! [`LedgerClient`] is the only type that talks to a transport. Records are written create-once
//! and re-verified (digest, seal, key, canonical form) on every fetch.

#![forbid(unsafe_code)]

mod client;
mod file;
mod memory;
mod transport;

pub use client::{LedgerClient, LedgerError, SubmitReceipt};
pub use file::FileTransport;
pub use memory::InMemoryTransport;
pub use transport::{LedgerTransport, PutOutcome, TransportError};

/// Fuzz-friendly entry points. Never panic on any input.
pub mod fuzz {
    use compliguard_types::{EventRecord, LogRecord};

    /// Run the full read-side verification of a stored log record against `key`.
    pub fn open_record(key: &str, bytes: &[u8]) -> Result<LogRecord, super::LedgerError> {
        super::client::open::<LogRecord>(key, bytes)
    }

    pub fn open_event(key: &str, bytes: &[u8]) -> Result<EventRecord, super::LedgerError> {
        super::client::open::<EventRecord>(key, bytes)
    }
}
