// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::{
    config::{ApiOptions, PathOptions, PauseOptions, PipelineOptions, consts::*},
    core::net::UreqClient,
    error::Result,
    log::Verbosity,
    progress::Progress,
    runner,
};

#[derive(Parser, Debug)]
#[command(name = "poster_scrape")]
#[command(about = "Archive wiki bounty posters and their character details", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Log every poster, not just stage totals
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Discover posters, download missing images, write the manifest.
    Download,

    /// Remove posters whose image bytes duplicate an earlier poster.
    Dedupe {
        /// Report only; delete nothing and keep the manifest as is.
        #[arg(long)]
        dry_run: bool,
    },

    /// Look up each poster's character page and write the detail store.
    Enrich,

    /// download, dedupe and enrich in one go.
    Run,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// MediaWiki api.php endpoint
    #[arg(long, global = true, default_value = API_URL)]
    pub api: String,

    /// Category whose files are the posters
    #[arg(long, global = true, default_value = CATEGORY_TITLE)]
    pub category: String,

    /// Client identifier sent with every request
    #[arg(long, global = true, default_value = USER_AGENT)]
    pub user_agent: String,

    /// Image directory
    #[arg(long, global = true, default_value = DEFAULT_IMAGE_DIR)]
    pub images: PathBuf,

    /// Manifest JSON file
    #[arg(long, global = true, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,

    /// Detail store JSON file
    #[arg(long, global = true, default_value = DEFAULT_DETAILS)]
    pub details: PathBuf,

    /// Minimum gap between image downloads (ms)
    #[arg(long, global = true, default_value_t = DOWNLOAD_PAUSE_MS)]
    pub download_pause_ms: u64,

    /// Minimum gap between API lookups (ms)
    #[arg(long, global = true, default_value_t = LOOKUP_PAUSE_MS)]
    pub lookup_pause_ms: u64,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }

    pub fn options(&self) -> PipelineOptions {
        let c = &self.common;
        PipelineOptions {
            api: ApiOptions {
                endpoint: c.api.clone(),
                category: c.category.clone(),
                user_agent: c.user_agent.clone(),
            },
            paths: PathOptions {
                image_dir: c.images.clone(),
                manifest: c.manifest.clone(),
                details: c.details.clone(),
            },
            pauses: PauseOptions {
                download: Duration::from_millis(c.download_pause_ms),
                lookup: Duration::from_millis(c.lookup_pause_ms),
            },
            dry_run: matches!(self.command, Command::Dedupe { dry_run: true }),
        }
    }
}

/// Progress sink for the terminal: stage banners at info, per-poster lines at debug.
#[derive(Default)]
struct LogProgress {
    stage: String,
    total: usize,
    done: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, stage: &str, total: usize) {
        self.stage = s!(stage);
        self.total = total;
        self.done = 0;
        logf!("{stage}: {total} poster(s)");
    }

    fn log(&mut self, msg: &str) {
        logd!("{msg}");
    }

    fn item_done(&mut self, id: u64) {
        self.done += 1;
        logd!("[{}] {}/{} poster {id}", self.stage, self.done, self.total);
    }

    fn item_failed(&mut self, id: u64, reason: &str) {
        self.done += 1;
        logd!("[{}] {}/{} poster {id} failed: {reason}", self.stage, self.done, self.total);
    }

    fn finish(&mut self) {
        logd!("[{}] finished {}/{}", self.stage, self.done, self.total);
    }
}

/// Execute the parsed command. Each stage prints its one-line summary to stdout.
pub fn run(cli: &Cli) -> Result<()> {
    let opts = cli.options();
    let http = UreqClient::new(&opts.api.user_agent);
    let mut progress = LogProgress::default();

    match cli.command {
        Command::Download => {
            println!("{}", runner::run_download(&http, &opts, Some(&mut progress))?);
        }
        Command::Dedupe { .. } => {
            println!("{}", runner::run_dedupe(&opts, Some(&mut progress))?);
        }
        Command::Enrich => {
            println!("{}", runner::run_enrich(&http, &opts, Some(&mut progress))?);
        }
        Command::Run => {
            println!("{}", runner::run_download(&http, &opts, Some(&mut progress))?);
            println!("{}", runner::run_dedupe(&opts, Some(&mut progress))?);
            println!("{}", runner::run_enrich(&http, &opts, Some(&mut progress))?);
        }
    }
    Ok(())
}
