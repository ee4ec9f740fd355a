// src/specs/category.rs
//! Category listing: every file in a category with its image info.
//!
//! Responses use the default (v1) format, where `query.pages` is an object
//! keyed by page id and continuation lives in a top-level `continue` object.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::config::consts::{CATEGORY_PAGE_SIZE, FILE_NAMESPACE};

/// Continuation parameters to send back verbatim on the next request.
pub type Continuation = Vec<(String, String)>;

/// The key whose presence means "there is another page".
pub const CONTINUE_KEY: &str = "gcmcontinue";

/// Query pairs for one listing request. `cont` is empty for the first page.
pub fn query<'a>(category: &'a str, cont: &'a Continuation) -> Vec<(&'a str, &'a str)> {
    let mut q = vec![
        ("action", "query"),
        ("format", "json"),
        ("generator", "categorymembers"),
        ("gcmtitle", category),
        ("gcmnamespace", FILE_NAMESPACE),
        ("gcmlimit", CATEGORY_PAGE_SIZE),
        ("prop", "imageinfo"),
        ("iiprop", "url|size|mime"),
    ];
    q.extend(cont.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    q
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryResponse {
    #[serde(default, rename = "continue")]
    pub continuation: BTreeMap<String, Value>,
    #[serde(default)]
    pub query: Option<CategoryQuery>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    #[serde(default)]
    pub pages: BTreeMap<String, ListedPage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListedPage {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageInfo {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// A listed file that has everything a poster record needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListedAsset {
    pub id: u64,
    /// Raw upstream title, namespace included (`File:Luffy.jpg`).
    pub title: String,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// One decoded listing page.
#[derive(Debug, Default)]
pub struct CategoryPage {
    /// Usable assets in ascending page-id order.
    pub assets: Vec<ListedAsset>,
    /// `None` when this was the last page.
    pub next: Option<Continuation>,
}

impl CategoryResponse {
    pub fn into_page(self) -> CategoryPage {
        let next = match self.continuation.get(CONTINUE_KEY) {
            Some(Value::String(token)) if !token.is_empty() => Some(
                self.continuation
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), s!(v))))
                    .collect(),
            ),
            _ => None,
        };

        let pages = self.query.map(|q| q.pages).unwrap_or_default();
        let mut assets: Vec<ListedAsset> = pages
            .into_values()
            .filter_map(|page| {
                let id = page.pageid?;
                let info = page.imageinfo.into_iter().next()?;
                let url = info.url.filter(|u| !u.is_empty())?;
                Some(ListedAsset { id, title: page.title, url, width: info.width, height: info.height })
            })
            .collect();
        // Keys are ids as strings; order numerically, not lexically.
        assets.sort_by_key(|a| a.id);

        CategoryPage { assets, next }
    }
}
