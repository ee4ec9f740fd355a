// src/specs/fileusage.rs
//! Which pages embed a file (`prop=fileusage`, `formatversion=2`).

use serde::Deserialize;

use crate::config::consts::{FILE_PREFIX, FILE_USAGE_LIMIT, MAIN_NAMESPACE};

/// `Luffy.jpg` → `File:Luffy.jpg`; already-prefixed titles pass through.
pub fn file_title(title: &str) -> String {
    if title.starts_with(FILE_PREFIX) { s!(title) } else { join!(FILE_PREFIX, title) }
}

pub fn query(file_title: &str) -> Vec<(&str, &str)> {
    vec![
        ("action", "query"),
        ("format", "json"),
        ("formatversion", "2"),
        ("titles", file_title),
        ("prop", "fileusage"),
        ("fuprop", "title|pageid|ns"),
        ("fulimit", FILE_USAGE_LIMIT),
    ]
}

#[derive(Debug, Default, Deserialize)]
pub struct UsageResponse {
    #[serde(default)]
    pub query: Option<UsageQuery>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UsageQuery {
    #[serde(default)]
    pub pages: Vec<UsagePage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UsagePage {
    #[serde(default)]
    pub fileusage: Vec<FileUsage>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FileUsage {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub ns: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

impl UsageResponse {
    /// Usages of the first (only) queried page; empty when there are none.
    pub fn into_usages(self) -> Vec<FileUsage> {
        self.query
            .and_then(|q| q.pages.into_iter().next())
            .map(|p| p.fileusage)
            .unwrap_or_default()
    }
}

/// The page whose infobox describes the poster: the first main-namespace
/// usage if there is one, else the first usage of any kind. Usages without a
/// title are skipped.
pub fn pick_usage_title(usages: &[FileUsage]) -> Option<&str> {
    let titled = || usages.iter().filter(|u| u.title.is_some());
    titled()
        .find(|u| u.ns == Some(MAIN_NAMESPACE))
        .or_else(|| titled().next())?
        .title
        .as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(ns: i64, title: &str) -> FileUsage {
        FileUsage { pageid: Some(1), ns: Some(ns), title: Some(s!(title)) }
    }

    #[test]
    fn prefixes_file_namespace_once() {
        assert_eq!(file_title("Luffy.jpg"), "File:Luffy.jpg");
        assert_eq!(file_title("File:Luffy.jpg"), "File:Luffy.jpg");
    }

    #[test]
    fn prefers_main_namespace() {
        let usages = vec![usage(14, "Category:Pirates"), usage(0, "Monkey D. Luffy"), usage(0, "Other")];
        assert_eq!(pick_usage_title(&usages), Some("Monkey D. Luffy"));
    }

    #[test]
    fn falls_back_to_first_usage() {
        let usages = vec![usage(2, "User:Fan"), usage(14, "Category:Pirates")];
        assert_eq!(pick_usage_title(&usages), Some("User:Fan"));
        assert_eq!(pick_usage_title(&[]), None);
    }

    #[test]
    fn untitled_usages_are_skipped() {
        let untitled = |ns| FileUsage { pageid: Some(2), ns: Some(ns), title: None };
        let usages = vec![untitled(0), usage(14, "Category:Pirates"), usage(0, "Nami")];
        assert_eq!(pick_usage_title(&usages), Some("Nami"));

        let usages = vec![untitled(0), usage(2, "User:Fan")];
        assert_eq!(pick_usage_title(&usages), Some("User:Fan"));
        assert_eq!(pick_usage_title(&[untitled(0)]), None);
    }

    #[test]
    fn decodes_sparse_responses() {
        let body = r#"{"batchcomplete":true,"query":{"pages":[{"ns":6,"title":"File:X.jpg","fileusage":[{"pageid":5,"ns":0,"title":"X"}]}]}}"#;
        let usages = serde_json::from_str::<UsageResponse>(body).unwrap().into_usages();
        assert_eq!(usages, vec![FileUsage { pageid: Some(5), ns: Some(0), title: Some(s!("X")) }]);

        let none = r#"{"query":{"pages":[{"ns":6,"title":"File:Y.jpg"}]}}"#;
        assert!(serde_json::from_str::<UsageResponse>(none).unwrap().into_usages().is_empty());
        assert!(serde_json::from_str::<UsageResponse>("{}").unwrap().into_usages().is_empty());
    }
}
