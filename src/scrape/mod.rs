// src/scrape/mod.rs
//
// The four pipeline stages, in data-flow order:
// catalog → download → dedupe → enrich.
// Stages never touch the persisted documents; `runner` does.
pub mod catalog;
pub mod dedupe;
pub mod download;
pub mod enrich;

pub use catalog::discover;
pub use dedupe::{DedupeSummary, reduce};
pub use download::{DownloadSummary, download};
pub use enrich::{EnrichSummary, enrich};
