//! Content-addressed storage for extracted cover art.
//!
//! Artwork is written to `<dir>/<prefix>.<digest>.<ext>` where the digest is the
//! SHA-1 of the image bytes, so the same picture seen on many tracks or many plays
//! maps to a single file that is written once. A file only appears under its final
//! name once it is complete.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use log::debug;
use sha1::{Digest, Sha1};

/// Result of storing artwork in the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedIcon {
    pub path: PathBuf,
    /// False when an identical file already existed
    pub written: bool,
}

/// Directory-backed, write-once artwork cache
#[derive(Debug, Clone)]
pub struct IconCache {
    dir: PathBuf,
    prefix: String,
}

impl IconCache {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Filesystem-safe digest of the image bytes
    pub fn digest(data: &[u8]) -> String {
        let mut hasher = Sha1::new();
        hasher.update(data);
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }

    /// Cache path for the given bytes, whether or not it exists yet
    pub fn path_for(&self, data: &[u8], extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{}.{}", self.prefix, Self::digest(data), extension))
    }

    /// Store the bytes unless a file for the same digest is already present
    pub fn store(&self, data: &[u8], extension: &str) -> io::Result<CachedIcon> {
        let path = self.path_for(data, extension);
        if path.exists() {
            debug!("Reusing cached artwork {}", path.display());
            return Ok(CachedIcon { path, written: false });
        }

        let partial = partial_path(&path);
        if let Err(e) = fs::write(&partial, data).and_then(|_| fs::rename(&partial, &path)) {
            debug!("Failed to write artwork to {}: {}", path.display(), e);
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
        debug!("Wrote {} bytes of artwork to {}", data.len(), path.display());
        Ok(CachedIcon { path, written: true })
    }
}

/// Scratch name the artwork is written under before being renamed into place
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}
