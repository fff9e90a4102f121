use crate::transport::{LedgerTransport, PutOutcome, TransportError};
use compliguard_domain::canonical::{EncodingError, decode, encode};
use compliguard_domain::record::{self, IntegrityError};
use compliguard_types::{AuditReport, EventRecord, LogRecord};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Successful submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitReceipt {
    Stored,
    /// The key already held byte-identical content. Nothing was written.
    Duplicate,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid reference id {0:?}: must be non-empty")]
    InvalidRefId(String),

    #[error("record '{0}' not found")]
    NotFound(String),

    #[error("record '{0}' already exists with different content")]
    AlreadyExists(String),

    #[error("record '{ref_id}' failed verification: {reason}")]
    Tampered { ref_id: String, reason: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl LedgerError {
    fn tampered(ref_id: &str, reason: impl Into<String>) -> Self {
        LedgerError::Tampered {
            ref_id: ref_id.to_string(),
            reason: reason.into(),
        }
    }

    /// Transport failures are worth retrying with the same record.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Transport(_))
    }
}

/// Stored unit that carries its own key and integrity fields.
pub(crate) trait Sealed: Serialize + DeserializeOwned {
    fn ref_id(&self) -> &str;
    fn verify(&self) -> Result<(), IntegrityError>;
}

impl Sealed for LogRecord {
    fn ref_id(&self) -> &str {
        &self.ref_id
    }

    fn verify(&self) -> Result<(), IntegrityError> {
        record::verify(self)
    }
}

impl Sealed for EventRecord {
    fn ref_id(&self) -> &str {
        &self.ref_id
    }

    fn verify(&self) -> Result<(), IntegrityError> {
        record::verify_event(self)
    }
}

fn check_ref_id(ref_id: &str) -> Result<(), LedgerError> {
    if ref_id.trim().is_empty() {
        return Err(LedgerError::InvalidRefId(ref_id.to_string()));
    }
    Ok(())
}

fn integrity(ref_id: &str, err: IntegrityError) -> LedgerError {
    match err {
        IntegrityError::Encoding(e) => LedgerError::Encoding(e),
        other => LedgerError::tampered(ref_id, other.to_string()),
    }
}

/// Decode and fully verify bytes stored under `key`.
pub(crate) fn open<R: Sealed>(key: &str, bytes: &[u8]) -> Result<R, LedgerError> {
    let rec: R = decode(bytes).map_err(|e| LedgerError::tampered(key, e.to_string()))?;

    if rec.ref_id() != key {
        return Err(LedgerError::tampered(
            key,
            format!("stored under '{key}' but names '{}'", rec.ref_id()),
        ));
    }

    rec.verify().map_err(|e| integrity(key, e))?;

    if encode(&rec)? != bytes {
        return Err(LedgerError::tampered(key, "stored bytes are not canonical"));
    }

    Ok(rec)
}

/// The only path to the ledger transport.
#[derive(Debug)]
pub struct LedgerClient<T> {
    transport: T,
}

impl<T: LedgerTransport> LedgerClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Write `record` under its `refId`. Never overwrites.
    pub fn submit(&self, record: &LogRecord) -> Result<SubmitReceipt, LedgerError> {
        self.put_sealed(record)
    }

    /// Read and verify the record stored under `ref_id`.
    pub fn fetch(&self, ref_id: &str) -> Result<LogRecord, LedgerError> {
        self.get_sealed(ref_id)
    }

    pub fn submit_event(&self, record: &EventRecord) -> Result<SubmitReceipt, LedgerError> {
        self.put_sealed(record)
    }

    pub fn fetch_event(&self, ref_id: &str) -> Result<EventRecord, LedgerError> {
        self.get_sealed(ref_id)
    }

    /// Compare an off-ledger copy of a record with the verified ledger copy.
    ///
    /// The local digest is recomputed from the local profile and verdict, not taken on trust.
    pub fn reconcile(&self, ref_id: &str, local: &LogRecord) -> Result<AuditReport, LedgerError> {
        let ledger = self.fetch(ref_id)?;
        let local_digest = record::content_digest(&local.profile, &local.verdict)?;
        let matches = local_digest == ledger.digest;
        if matches {
            info!(ref_id, "local copy matches ledger");
        } else {
            warn!(ref_id, local = %local_digest, ledger = %ledger.digest, "local copy diverges from ledger");
        }
        Ok(AuditReport {
            ref_id: ref_id.to_string(),
            matches,
            local_digest,
            ledger_digest: ledger.digest,
        })
    }

    fn put_sealed<R: Sealed>(&self, rec: &R) -> Result<SubmitReceipt, LedgerError> {
        let ref_id = rec.ref_id();
        check_ref_id(ref_id)?;
        rec.verify().map_err(|e| integrity(ref_id, e))?;

        let bytes = encode(rec)?;
        match self.transport.put_if_absent(ref_id, &bytes)? {
            PutOutcome::Stored => {
                info!(ref_id, "record stored");
                Ok(SubmitReceipt::Stored)
            }
            PutOutcome::AlreadyExists => {
                let existing = self.transport.get(ref_id)?;
                if existing.as_deref() == Some(bytes.as_slice()) {
                    debug!(ref_id, "identical record already stored");
                    Ok(SubmitReceipt::Duplicate)
                } else {
                    warn!(ref_id, "refusing to overwrite existing record");
                    Err(LedgerError::AlreadyExists(ref_id.to_string()))
                }
            }
        }
    }

    fn get_sealed<R: Sealed>(&self, ref_id: &str) -> Result<R, LedgerError> {
        check_ref_id(ref_id)?;
        let bytes = self
            .transport
            .get(ref_id)?
            .ok_or_else(|| LedgerError::NotFound(ref_id.to_string()))?;
        let rec = open::<R>(ref_id, &bytes).inspect_err(|err| {
            if let LedgerError::Tampered { reason, .. } = err {
                warn!(ref_id, reason = %reason, "ledger record failed verification");
            }
        })?;
        debug!(ref_id, "record fetched and verified");
        Ok(rec)
    }
}
