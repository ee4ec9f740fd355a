// src/store.rs
//
// The two JSON documents the pipeline persists. Each is read whole at stage
// start and written whole, atomically, at stage end: a killed run leaves the
// previous document intact.

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use atomic_write_file::AtomicWriteFile;
use serde::{Serialize, de::DeserializeOwned};

use crate::data::{DetailStore, PosterRecord};
use crate::error::{Error, Result};
use crate::file::ensure_parent;

pub fn load_manifest(path: &Path) -> Result<Vec<PosterRecord>> {
    read_json(path)
}

pub fn save_manifest(path: &Path, records: &[PosterRecord]) -> Result<()> {
    write_json(path, records)
}

pub fn load_details(path: &Path) -> Result<DetailStore> {
    read_json(path)
}

pub fn save_details(path: &Path, details: &DetailStore) -> Result<()> {
    write_json(path, details)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&text).map_err(|source| Error::Document { path: path.to_path_buf(), source })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;

    let mut file = AtomicWriteFile::options().open(path).map_err(|e| Error::io(path, e))?;
    {
        let mut out = BufWriter::new(&mut file);
        serde_json::to_writer_pretty(&mut out, value)
            .map_err(|source| Error::Document { path: path.to_path_buf(), source })?;
        out.flush().map_err(|e| Error::io(path, e))?;
    }
    file.commit().map_err(|e| Error::io(path, e))
}
