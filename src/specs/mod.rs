//! # Upstream query “specs”
//!
//! One module per MediaWiki API query the pipeline issues. Each spec knows
//! *what to ask for* (the query parameters) and *what comes back* (serde
//! shapes), and nothing else.
//!
//! ## What lives here
//! - **Request parameters** for `api.php` (`action=query` variants).
//! - **Response shapes** as serde structs. The API is loosely typed: every
//!   field that can be missing is an `Option` or has a `#[serde(default)]`,
//!   so a sparse response decodes to "nothing found" instead of an error.
//! - Small accessors that flatten the response into what a stage needs.
//!
//! ## What does **not** live here
//! - Networking, politeness delays, counting, persistence. Those belong to
//!   `scrape::*` and `runner`.
//!
//! ## Current specs
//! - `category` – `generator=categorymembers` + `prop=imageinfo`, paginated.
//! - `fileusage` – which pages embed a given file.
//! - `pageprops` – the portable-infobox JSON blob of a page.
pub mod category;
pub mod fileusage;
pub mod pageprops;
