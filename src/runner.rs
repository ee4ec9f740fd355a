// src/runner.rs
//
// One function per command: load what the stage needs, run it, persist what
// it produced, hand back the counters. Persistence happens once, at the end.

use crate::{
    config::PipelineOptions,
    core::net::{Http, Throttle},
    error::Result,
    progress::Progress,
    scrape::{self, DedupeSummary, DownloadSummary, EnrichSummary},
    store,
};

/// Discover the catalog, fetch missing images, write the manifest.
///
/// The manifest lists every discovered poster, including ones whose download
/// failed this time.
pub fn run_download(
    http: &dyn Http,
    opts: &PipelineOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<DownloadSummary> {
    logf!("Discovering posters in {}", opts.api.category);
    let mut lookups = Throttle::new(opts.pauses.lookup);
    let catalog = scrape::discover(http, &opts.api, &mut lookups, progress.as_mut().map(|p| &mut **p as &mut dyn Progress))?;

    logf!("Downloading into {}", opts.paths.image_dir.display());
    let mut fetches = Throttle::new(opts.pauses.download);
    let summary = scrape::download(http, &catalog, &opts.paths.image_dir, &mut fetches, progress.as_mut().map(|p| &mut **p as &mut dyn Progress))?;

    store::save_manifest(&opts.paths.manifest, &catalog)?;
    logf!("Images stored in {}", opts.paths.image_dir.display());
    logf!("Data written to {}", opts.paths.manifest.display());
    Ok(summary)
}

/// Drop content duplicates from the manifest and the image directory.
/// With `dry_run`, count only.
pub fn run_dedupe(opts: &PipelineOptions, progress: Option<&mut dyn Progress>) -> Result<DedupeSummary> {
    let manifest = store::load_manifest(&opts.paths.manifest)?;
    logf!("Deduplicating {} posters", manifest.len());

    let (kept, summary) = scrape::reduce(manifest, &opts.paths.image_dir, opts.dry_run, progress);

    if opts.dry_run {
        logf!("Dry run: manifest and images left untouched");
    } else {
        store::save_manifest(&opts.paths.manifest, &kept)?;
    }
    Ok(summary)
}

/// Rebuild the detail store from scratch for the current manifest.
pub fn run_enrich(
    http: &dyn Http,
    opts: &PipelineOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<EnrichSummary> {
    let manifest = store::load_manifest(&opts.paths.manifest)?;
    logf!("Enriching {} posters", manifest.len());

    let mut lookups = Throttle::new(opts.pauses.lookup);
    let (details, summary) = scrape::enrich(http, &opts.api, &manifest, &mut lookups, progress);

    store::save_details(&opts.paths.details, &details)?;
    logf!("Details written to {}", opts.paths.details.display());
    Ok(summary)
}
