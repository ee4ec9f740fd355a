// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

/// Where the upstream API lives and how we identify ourselves to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiOptions {
    pub endpoint: String,
    pub category: String,
    pub user_agent: String,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            endpoint: s!(API_URL),
            category: s!(CATEGORY_TITLE),
            user_agent: s!(USER_AGENT),
        }
    }
}

/// On-disk locations shared by all stages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathOptions {
    pub image_dir: PathBuf,
    pub manifest: PathBuf,
    pub details: PathBuf,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            details: PathBuf::from(DEFAULT_DETAILS),
        }
    }
}

/// Minimum gaps between outbound requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PauseOptions {
    pub download: Duration,
    pub lookup: Duration,
}

impl Default for PauseOptions {
    fn default() -> Self {
        Self {
            download: Duration::from_millis(DOWNLOAD_PAUSE_MS),
            lookup: Duration::from_millis(LOOKUP_PAUSE_MS),
        }
    }
}

impl PauseOptions {
    /// No waiting at all. Offline runs and tests.
    pub fn none() -> Self {
        Self { download: Duration::ZERO, lookup: Duration::ZERO }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub api: ApiOptions,
    pub paths: PathOptions,
    pub pauses: PauseOptions,
    /// Dedupe only: report, but neither delete files nor rewrite the manifest.
    pub dry_run: bool,
}
