//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! Digests are the first 16 bytes of the BLAKE3 output stream, which is a
//! valid 128-bit BLAKE3 hash. Files are read in fixed-size chunks so memory
//! use does not grow with file size, and each file handle is dropped before
//! the function returns.
//!
//! # Example
//!
//! ```no_run
//! use dupefind::scanner::{hash_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let digest = hasher.full_hash(Path::new("Cargo.toml")).unwrap();
//! println!("{}", hash_to_hex(&digest));
//! ```

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::HashError;

/// Length of a digest in bytes (128 bits).
pub const DIGEST_LEN: usize = 16;

/// A 128-bit content digest.
pub type Digest = [u8; DIGEST_LEN];

/// Number of leading bytes covered by a partial hash.
pub const PARTIAL_HASH_SIZE: usize = 1024;

/// Read buffer size for streaming full hashes.
const CHUNK_SIZE: usize = 64 * 1024;

/// Streaming BLAKE3 hasher.
#[derive(Debug, Clone, Default)]
pub struct Hasher;

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash at most the first `limit` bytes of a file.
    ///
    /// Returns the digest and the number of bytes actually read.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn partial_hash(&self, path: &Path, limit: usize) -> Result<(Digest, u64), HashError> {
        let file = open(path)?;
        let mut buffer = Vec::with_capacity(limit);
        file.take(limit as u64)
            .read_to_end(&mut buffer)
            .map_err(|e| HashError::from_io(path, e))?;

        let mut hasher = blake3::Hasher::new();
        hasher.update(&buffer);
        Ok((finalize(&hasher), buffer.len() as u64))
    }

    /// Hash the entire content of a file.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn full_hash(&self, path: &Path) -> Result<Digest, HashError> {
        self.full_hash_counted(path).map(|(digest, _)| digest)
    }

    /// Hash the entire content of a file, also returning the byte count.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn full_hash_counted(&self, path: &Path) -> Result<(Digest, u64), HashError> {
        let mut file = open(path)?;
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut total = 0u64;

        loop {
            let bytes_read = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(HashError::from_io(path, e)),
            };
            hasher.update(&buffer[..bytes_read]);
            total += bytes_read as u64;
        }

        Ok((finalize(&hasher), total))
    }
}

fn open(path: &Path) -> Result<File, HashError> {
    File::open(path).map_err(|e| HashError::from_io(path, e))
}

fn finalize(hasher: &blake3::Hasher) -> Digest {
    let mut digest = [0u8; DIGEST_LEN];
    hasher.finalize_xof().fill(&mut digest);
    digest
}

/// Render a digest as lowercase hex.
#[must_use]
pub fn hash_to_hex(digest: &Digest) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
