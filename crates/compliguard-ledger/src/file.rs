use crate::transport::{LedgerTransport, PutOutcome, TransportError};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::{ErrorKind, Write};
use tempfile::NamedTempFile;
use tracing::debug;

/// Directory-backed transport: one file per key, named by the hex encoding of the key.
///
/// Values are written to a temp file in the same directory and then linked into place with
/// no-clobber semantics, so a key is created at most once and readers never see partial values.
#[derive(Clone, Debug)]
pub struct FileTransport {
    root: Utf8PathBuf,
}

fn io_error(path: &Utf8Path, source: std::io::Error) -> TransportError {
    TransportError::Io {
        path: path.to_string(),
        source,
    }
}

impl FileTransport {
    /// Open (creating if needed) the ledger directory at `root`.
    pub fn open(root: impl Into<Utf8PathBuf>) -> Result<Self, TransportError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| io_error(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Location of the value stored under `key`.
    pub fn path_for(&self, key: &str) -> Utf8PathBuf {
        self.root.join(format!("{}.json", hex::encode(key.as_bytes())))
    }
}

impl LedgerTransport for FileTransport {
    fn put_if_absent(&self, key: &str, value: &[u8]) -> Result<PutOutcome, TransportError> {
        let target = self.path_for(key);

        let mut tmp = NamedTempFile::new_in(&self.root).map_err(|e| io_error(&self.root, e))?;
        tmp.write_all(value).map_err(|e| io_error(&target, e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| io_error(&target, e))?;

        match tmp.persist_noclobber(&target) {
            Ok(_) => {
                debug!(path = %target, "ledger value written");
                Ok(PutOutcome::Stored)
            }
            Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
                Ok(PutOutcome::AlreadyExists)
            }
            Err(err) => Err(io_error(&target, err.error)),
        }
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, TransportError> {
        let path = self.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path, err)),
        }
    }
}
