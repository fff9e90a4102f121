//! Canonical encoding used for digests and ledger values.
//!
//! Compact JSON: struct fields in declaration order, map keys sorted (`serde_json::Map` is a
//! `BTreeMap` here), no whitespace. The same logical value always yields the same bytes.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("canonical encoding failed: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("timestamp cannot be formatted: {0}")]
    Timestamp(#[from] time::error::Format),
}

#[derive(Debug, Error)]
#[error("decode failed: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodingError> {
    serde_json::to_vec(value).map_err(EncodingError::Serialize)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}
