//! Asset loading and the memoizing asset store.
//!
//! Reading bytes is delegated to an [`AssetSource`]; decoding to
//! [`parse_ansi`](crate::parse_ansi). Each path is read and decoded at most
//! once and the result is shared as an `Rc<Asset>`, so the cached value can
//! never be mutated in place.

use std::cell::Cell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::data::Asset;
use crate::parser::{parse_ansi, ParseError};

/// Failure to produce an asset for a path.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    /// The source could not be read.
    #[error("failed to read asset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The bytes were read but are not valid styled art.
    #[error("failed to decode asset {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl AssetLoadError {
    /// Path of the asset that failed.
    pub fn path(&self) -> &Path {
        match self {
            AssetLoadError::Read { path, .. } | AssetLoadError::Decode { path, .. } => path,
        }
    }
}

/// Trait for raw asset byte providers.
///
/// Implement this to serve artwork from somewhere other than the local
/// filesystem (embedded bytes, archives, ...).
pub trait AssetSource {
    /// Read the raw bytes stored at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads assets from the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsSource;

impl AssetSource for FsSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Serves assets from memory and counts how often each path is read.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, Vec<u8>>,
    reads: Cell<usize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `path`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    /// Total number of successful and failed reads so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl AssetSource for MemorySource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.reads.set(self.reads.get() + 1);
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no in-memory asset at {}", path.display()),
            )
        })
    }
}

/// Write-once cache from path to decoded asset.
///
/// Entries live as long as the store; there is no eviction.
#[derive(Debug, Default)]
pub struct AssetStore<S = FsSource> {
    source: S,
    cache: HashMap<PathBuf, Rc<Asset>>,
}

impl AssetStore<FsSource> {
    /// Store backed by the local filesystem.
    pub fn from_fs() -> Self {
        Self::new(FsSource)
    }
}

impl<S: AssetSource> AssetStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Load the asset at `path`, reading and decoding it only on first use.
    ///
    /// Failed loads are not cached.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Rc<Asset>, AssetLoadError> {
        let path = path.as_ref();
        if let Some(asset) = self.cache.get(path) {
            debug!(path = %path.display(), "asset cache hit");
            return Ok(Rc::clone(asset));
        }

        let bytes = self.source.read(path).map_err(|source| AssetLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let lines = parse_ansi(&bytes).map_err(|source| AssetLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let asset = Rc::new(Asset::new(lines));
        debug!(
            path = %path.display(),
            width = asset.width(),
            height = asset.height(),
            "asset loaded"
        );

        self.cache.insert(path.to_path_buf(), Rc::clone(&asset));
        Ok(asset)
    }

    /// Whether `path` has already been loaded.
    pub fn is_loaded(&self, path: impl AsRef<Path>) -> bool {
        self.cache.contains_key(path.as_ref())
    }

    /// Number of cached assets.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// The underlying byte source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn store() -> AssetStore<MemorySource> {
        AssetStore::new(
            MemorySource::new()
                .with("art/big.ans", "\x1b[31mAAA\x1b[34mBBB\n\x1b[31mAAA\x1b[34mBBB\n")
                .with("art/broken.ans", b"\x1b[3".to_vec()),
        )
    }

    #[test]
    fn load_decodes_lines() {
        let mut store = store();
        let asset = store.load("art/big.ans").unwrap();
        assert_eq!(asset.dimensions(), (6, 2));
        assert_eq!(asset.lines[0].runs().len(), 2);
    }

    #[test]
    fn load_is_memoized() {
        let mut store = store();
        let first = store.load("art/big.ans").unwrap();
        let second = store.load("art/big.ans").unwrap();

        assert_eq!(store.source().reads(), 1);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn derived_copies_do_not_touch_cache() {
        let mut store = store();
        let cached = store.load("art/big.ans").unwrap();

        let mut copy = (*cached).clone();
        copy.lines.truncate(1);

        let again = store.load("art/big.ans").unwrap();
        assert_eq!(again.height(), 2);
        assert_eq!(copy.height(), 1);
    }

    #[test]
    fn missing_file_is_read_error() {
        let mut store = store();
        let err = store.load("art/missing.ans").unwrap_err();
        assert!(matches!(err, AssetLoadError::Read { .. }));
        assert_eq!(err.path(), Path::new("art/missing.ans"));
        assert!(!store.is_loaded("art/missing.ans"));
    }

    #[test]
    fn bad_escape_is_decode_error() {
        let mut store = store();
        let err = store.load("art/broken.ans").unwrap_err();
        assert!(matches!(
            err,
            AssetLoadError::Decode {
                source: ParseError::UnterminatedEscape { .. },
                ..
            }
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn stray_escape_next_to_glyphs_loads() {
        let mut store = AssetStore::new(
            MemorySource::new()
                .with("art/stray.ans", "ok\x1b█\n")
                .with("art/accent.ans", "\x1bé\n"),
        );
        let asset = store.load("art/stray.ans").unwrap();
        assert_eq!(asset.lines[0].plain_text(), "ok█");
        assert_eq!(asset.width(), 3);

        let asset = store.load("art/accent.ans").unwrap();
        assert_eq!(asset.lines[0].plain_text(), "é");
    }

    #[test]
    fn fs_source_missing_file() {
        let mut store = AssetStore::from_fs();
        let err = store.load("/nonexistent/pipe_strip_v12.ans").unwrap_err();
        assert!(err.to_string().contains("failed to read asset"));
    }

    #[test]
    #[traced_test]
    fn logs_cache_hits() {
        let mut store = store();
        store.load("art/big.ans").unwrap();
        assert!(logs_contain("asset loaded"));
        store.load("art/big.ans").unwrap();
        assert!(logs_contain("asset cache hit"));
    }
}
