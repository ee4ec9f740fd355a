// src/scrape/dedupe.rs
//! Duplicate reducer: drop manifest entries whose image bytes were already
//! seen, and delete their files. No network.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::{
    data::PosterRecord,
    file::hash_file,
    progress::Progress,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DedupeSummary {
    pub kept: usize,
    pub duplicates: usize,
    pub missing: usize,
    pub deleted: usize,
    /// Files that exist but could not be read; their records are kept.
    pub unreadable: usize,
}

impl fmt::Display for DedupeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Posters kept: {} | Duplicates removed: {} | Missing files skipped: {} | Files deleted: {}",
            self.kept, self.duplicates, self.missing, self.deleted
        )?;
        if self.unreadable > 0 {
            write!(f, " | Unreadable: {}", self.unreadable)?;
        }
        Ok(())
    }
}

/// What happened to one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    /// Same bytes as the already-kept poster `of`.
    Duplicate { of: u64 },
    Missing,
}

/// Running state for one reduce pass: content hash → id of the kept poster.
pub struct Deduper<'a> {
    image_dir: &'a Path,
    dry_run: bool,
    seen: HashMap<String, u64>,
    /// Files already kept; a second record naming one must not delete it.
    kept_files: HashSet<String>,
    summary: DedupeSummary,
}

impl<'a> Deduper<'a> {
    pub fn new(image_dir: &'a Path, dry_run: bool) -> Self {
        Self {
            image_dir,
            dry_run,
            seen: HashMap::new(),
            kept_files: HashSet::new(),
            summary: DedupeSummary::default(),
        }
    }

    /// Judge one record, in manifest order. First content wins.
    pub fn offer(&mut self, poster: &PosterRecord) -> Verdict {
        let path = self.image_dir.join(&poster.file);
        if !path.is_file() {
            self.summary.missing += 1;
            return Verdict::Missing;
        }

        let hash = match hash_file(&path) {
            Ok(h) => h,
            Err(e) => {
                logw!("Cannot hash {}: {e}; keeping it", path.display());
                self.summary.unreadable += 1;
                self.summary.kept += 1;
                return Verdict::Keep;
            }
        };

        if let Some(&of) = self.seen.get(&hash) {
            self.summary.duplicates += 1;
            if !self.dry_run && !self.kept_files.contains(&poster.file) {
                match fs::remove_file(&path) {
                    Ok(()) => self.summary.deleted += 1,
                    Err(e) => logw!("Duplicate {} not deleted: {e}", path.display()),
                }
            }
            return Verdict::Duplicate { of };
        }

        self.seen.insert(hash, poster.id);
        self.kept_files.insert(poster.file.clone());
        self.summary.kept += 1;
        Verdict::Keep
    }

    pub fn summary(&self) -> DedupeSummary {
        self.summary
    }
}

/// Reduce `manifest` to one record per distinct image content.
///
/// Manifest order decides which copy survives, so the catalog's sort order
/// (see `catalog::sort_catalog`) is part of this contract. Records with no
/// file on disk are dropped too, and counted as missing rather than duplicate.
/// A duplicate whose file cannot be deleted is still dropped.
pub fn reduce(
    manifest: Vec<PosterRecord>,
    image_dir: &Path,
    dry_run: bool,
    mut progress: Option<&mut dyn Progress>,
) -> (Vec<PosterRecord>, DedupeSummary) {
    let mut deduper = Deduper::new(image_dir, dry_run);
    if let Some(p) = progress.as_deref_mut() {
        p.begin("dedupe", manifest.len());
    }

    let mut kept = Vec::with_capacity(manifest.len());
    for poster in manifest {
        let id = poster.id;
        match deduper.offer(&poster) {
            Verdict::Keep => kept.push(poster),
            Verdict::Duplicate { of } => logd!("Poster {id} duplicates {of}"),
            Verdict::Missing => logd!("Poster {id} has no file {}", poster.file),
        }
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(id);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    (kept, deduper.summary())
}
