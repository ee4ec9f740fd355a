// src/scrape/download.rs
//! Asset downloader: fetch each poster image once. Files already on disk are
//! never requested again, so a re-run only fills the gaps.

use std::fmt;
use std::path::Path;

use crate::{
    core::net::{Http, Throttle},
    data::PosterRecord,
    error::{Error, Result},
    file::{ensure_directory, write_atomic},
    progress::Progress,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub total: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for DownloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Posters: {} | Downloaded: {} | Skipped: {} | Failed: {}",
            self.total, self.downloaded, self.skipped, self.failed
        )
    }
}

/// Download every missing image of `catalog` into `image_dir`.
///
/// Only a missing/unusable image directory is fatal. A failed fetch is
/// counted and the record stays in the catalog without a file.
/// Real fetches go through `throttle`; skips don't wait.
pub fn download(
    http: &dyn Http,
    catalog: &[PosterRecord],
    image_dir: &Path,
    throttle: &mut Throttle,
    mut progress: Option<&mut dyn Progress>,
) -> Result<DownloadSummary> {
    ensure_directory(image_dir)?;

    let mut summary = DownloadSummary { total: catalog.len(), ..Default::default() };
    if let Some(p) = progress.as_deref_mut() {
        p.begin("download", catalog.len());
    }

    for poster in catalog {
        let dest = image_dir.join(&poster.file);
        if dest.exists() {
            summary.skipped += 1;
            if let Some(p) = progress.as_deref_mut() {
                p.item_done(poster.id);
            }
            continue;
        }

        match fetch_one(http, poster, &dest, throttle) {
            Ok(bytes) => {
                summary.downloaded += 1;
                logd!("Downloaded {} ({bytes} bytes)", poster.file);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(poster.id);
                }
            }
            Err(e) => {
                summary.failed += 1;
                logw!("Poster {} ({}): {e}", poster.id, poster.file);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(poster.id, &e.to_string());
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(summary)
}

fn fetch_one(http: &dyn Http, poster: &PosterRecord, dest: &Path, throttle: &mut Throttle) -> Result<usize> {
    let bytes = throttle.call(|| http.get(&poster.image_url, &[]))?;
    write_atomic(dest, &bytes).map_err(|e| Error::io(dest, e))?;
    Ok(bytes.len())
}
