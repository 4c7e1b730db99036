//! Per-file fingerprint records
//!
//! A record pairs a content digest with the modification time observed
//! immediately before the digest was computed. The two are only ever
//! produced together by [`FileRecord::observe`].

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::Metadata;
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Read size used when streaming a file through the hasher
pub const CHUNK_SIZE: usize = 8192;

/// Digest bytes kept in a fingerprint (128 bits)
const FINGERPRINT_BYTES: usize = 16;

/// Observed state of a single file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Hex digest of the file contents
    #[serde(rename = "hash", default)]
    pub fingerprint: String,

    /// Modification time in fractional seconds since the Unix epoch
    #[serde(default)]
    pub mtime: f64,
}

impl FileRecord {
    /// Read the current mtime and fingerprint of `path`
    pub async fn observe(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path).await?;
        let mtime = modified_secs(&metadata)?;
        let fingerprint = fingerprint_file(path).await?;
        Ok(Self { fingerprint, mtime })
    }
}

/// Stream `path` through SHA-256 and return the first 128 bits as hex
pub async fn fingerprint_file(path: &Path) -> io::Result<String> {
    let mut file = fs::File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let read = file.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    let digest = hasher.finalize();
    Ok(hex::encode(&digest[..FINGERPRINT_BYTES]))
}

/// Modification time of `metadata` as seconds since the epoch
///
/// Times before the epoch come back negative.
pub fn modified_secs(metadata: &Metadata) -> io::Result<f64> {
    let modified = metadata.modified()?;
    Ok(match modified.duration_since(UNIX_EPOCH) {
        Ok(since) => since.as_secs_f64(),
        Err(before) => -before.duration().as_secs_f64(),
    })
}
