// src/file.rs

use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{self, Write},
    path::Path,
};

use atomic_write_file::AtomicWriteFile;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}

/// Create the parent directory of `path` if there is one.
pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

/// Filename bookkeeping for one catalog build.
#[derive(Default)]
pub struct FileNames {
    /// Occurrences per `stem + ext`.
    counts: HashMap<String, usize>,
    /// Every name handed out, lowercased (case-insensitive filesystems).
    taken: HashSet<String>,
}

impl FileNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// First occurrence of a `stem + ext` keeps the bare name, later ones get
    /// `_<id>` before the extension. A name already handed out (ignoring case)
    /// falls through to the next candidate: bare, then `_<id>`, then `_<id>_<n>`.
    pub fn resolve(&mut self, stem: &str, ext: &str, id: u64) -> String {
        let count = self.counts.entry(join!(stem, ext)).or_insert(0);
        let first = *count == 0;
        *count += 1;

        let bare = join!(stem, ext);
        let mut name = if first && !self.is_taken(&bare) {
            bare
        } else {
            format!("{stem}_{id}{ext}")
        };

        let mut n = 2usize;
        while self.is_taken(&name) {
            name = format!("{stem}_{id}_{n}{ext}");
            n += 1;
        }
        self.taken.insert(name.to_lowercase());
        name
    }

    fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(&name.to_lowercase())
    }
}

/// Hex SHA-256 of a file's bytes, streamed.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Write `bytes` to a temporary sibling and rename it over `path`.
/// Readers never observe a half-written file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = AtomicWriteFile::options().open(path)?;
    file.write_all(bytes)?;
    file.commit()
}
