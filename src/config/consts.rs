// src/config/consts.rs

// Upstream
pub const API_URL: &str = "https://onepiece.fandom.com/api.php";
pub const CATEGORY_TITLE: &str = "Category:Bounty_Images";
pub const FILE_PREFIX: &str = "File:";
pub const FILE_NAMESPACE: &str = "6";
pub const MAIN_NAMESPACE: i64 = 0;
pub const CATEGORY_PAGE_SIZE: &str = "500";
pub const FILE_USAGE_LIMIT: &str = "50";
pub const USER_AGENT: &str = "PosterScrape/1.0 (personal project)";

// Politeness
pub const DOWNLOAD_PAUSE_MS: u64 = 60;
pub const LOOKUP_PAUSE_MS: u64 = 40;

// Local layout
pub const DEFAULT_IMAGE_DIR: &str = "public/posters";
pub const DEFAULT_MANIFEST: &str = "src/data/posters.json";
pub const DEFAULT_DETAILS: &str = "src/data/poster-details.json";

// Naming
pub const FALLBACK_EXTENSION: &str = ".jpg";
pub const SYNTHETIC_STEM: &str = "poster";
