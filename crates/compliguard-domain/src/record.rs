//! Record builder: content digests, envelope seals and record assembly.
//!
//! `digest` covers what was evaluated (profile + verdict, or event type + payload). `seal` covers
//! the envelope (`refId`, `digest`, `createdAt`). Together they make every field of a stored
//! record tamper-evident.

use crate::canonical::{EncodingError, encode};
use compliguard_types::{Digest, DeviceProfile, EventRecord, LogRecord, Verdict};
use serde::Serialize;
use serde_json::Value as JsonValue;
use sha2::{Digest as _, Sha256};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Ways a decoded record can fail verification.
#[derive(Debug, Error)]
pub enum IntegrityError {
    #[error("content digest mismatch (stored {stored}, recomputed {recomputed})")]
    DigestMismatch { stored: Digest, recomputed: Digest },

    #[error("envelope seal mismatch")]
    SealMismatch,

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

fn finish(hasher: Sha256) -> Digest {
    let mut bytes = [0u8; Digest::LEN];
    bytes.copy_from_slice(hasher.finalize().as_slice());
    Digest::from_bytes(bytes)
}

/// SHA-256 over `encode(profile) ++ encode(verdict)`.
pub fn content_digest(profile: &DeviceProfile, verdict: &Verdict) -> Result<Digest, EncodingError> {
    let mut hasher = Sha256::new();
    hasher.update(encode(profile)?);
    hasher.update(encode(verdict)?);
    Ok(finish(hasher))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventContent<'a> {
    event_type: &'a str,
    payload: &'a JsonValue,
}

/// SHA-256 over the canonical encoding of `{eventType, payload}`.
pub fn event_digest(event_type: &str, payload: &JsonValue) -> Result<Digest, EncodingError> {
    let mut hasher = Sha256::new();
    hasher.update(encode(&EventContent {
        event_type,
        payload,
    })?);
    Ok(finish(hasher))
}

/// SHA-256 over the length-prefixed `ref_id`, the digest bytes and the RFC 3339 timestamp.
pub fn seal_for(
    ref_id: &str,
    digest: &Digest,
    created_at: OffsetDateTime,
) -> Result<Digest, EncodingError> {
    let timestamp = created_at.format(&Rfc3339)?;
    let mut hasher = Sha256::new();
    hasher.update((ref_id.len() as u64).to_le_bytes());
    hasher.update(ref_id.as_bytes());
    hasher.update(digest.as_bytes());
    hasher.update(timestamp.as_bytes());
    Ok(finish(hasher))
}

pub fn build(
    profile: &DeviceProfile,
    verdict: &Verdict,
    ref_id: &str,
    now: OffsetDateTime,
) -> Result<LogRecord, EncodingError> {
    let digest = content_digest(profile, verdict)?;
    let seal = seal_for(ref_id, &digest, now)?;
    Ok(LogRecord {
        ref_id: ref_id.to_string(),
        digest,
        profile: profile.clone(),
        verdict: verdict.clone(),
        created_at: now,
        seal,
    })
}

pub fn build_event(
    event_type: &str,
    payload: JsonValue,
    ref_id: &str,
    now: OffsetDateTime,
) -> Result<EventRecord, EncodingError> {
    let digest = event_digest(event_type, &payload)?;
    let seal = seal_for(ref_id, &digest, now)?;
    Ok(EventRecord {
        ref_id: ref_id.to_string(),
        event_type: event_type.to_string(),
        payload,
        digest,
        created_at: now,
        seal,
    })
}

/// Reference id for callers that supply none: `"<name>-<unix nanos>"`.
pub fn derive_ref_id(profile: &DeviceProfile, now: OffsetDateTime) -> String {
    let name = profile.name.trim();
    let name = if name.is_empty() { "device" } else { name };
    format!("{}-{}", name, now.unix_timestamp_nanos())
}

fn check_envelope(
    ref_id: &str,
    stored: &Digest,
    recomputed: Digest,
    created_at: OffsetDateTime,
    seal: &Digest,
) -> Result<(), IntegrityError> {
    if recomputed != *stored {
        return Err(IntegrityError::DigestMismatch {
            stored: *stored,
            recomputed,
        });
    }
    if seal_for(ref_id, stored, created_at)? != *seal {
        return Err(IntegrityError::SealMismatch);
    }
    Ok(())
}

/// Recompute digest and seal of a decoded record and compare with the stored values.
pub fn verify(record: &LogRecord) -> Result<(), IntegrityError> {
    check_envelope(
        &record.ref_id,
        &record.digest,
        content_digest(&record.profile, &record.verdict)?,
        record.created_at,
        &record.seal,
    )
}

pub fn verify_event(record: &EventRecord) -> Result<(), IntegrityError> {
    check_envelope(
        &record.ref_id,
        &record.digest,
        event_digest(&record.event_type, &record.payload)?,
        record.created_at,
        &record.seal,
    )
}
