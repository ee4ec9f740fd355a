// src/specs/pageprops.rs
//! Page properties (`prop=pageprops`, `formatversion=2`). Portable infoboxes
//! arrive as a JSON *string* under `pageprops.infoboxes`, decoded in a second step.

use serde::Deserialize;
use serde_json::Value;

pub fn query(page_title: &str) -> Vec<(&str, &str)> {
    vec![
        ("action", "query"),
        ("format", "json"),
        ("formatversion", "2"),
        ("prop", "pageprops"),
        ("titles", page_title),
    ]
}

#[derive(Debug, Default, Deserialize)]
pub struct PropsResponse {
    #[serde(default)]
    pub query: Option<PropsQuery>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PropsQuery {
    #[serde(default)]
    pub pages: Vec<PropsPage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PropsPage {
    #[serde(default)]
    pub pageprops: Option<PageProps>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageProps {
    #[serde(default)]
    pub infoboxes: Option<String>,
}

impl PropsResponse {
    /// The raw infobox blob of the first page, if it has a non-empty one.
    pub fn into_infobox_blob(self) -> Option<String> {
        self.query?
            .pages
            .into_iter()
            .next()?
            .pageprops?
            .infoboxes
            .filter(|raw| !raw.trim().is_empty())
    }
}

/// One infobox on a page.
#[derive(Debug, Default, Deserialize)]
pub struct Infobox {
    #[serde(default)]
    pub data: Vec<InfoboxEntry>,
}

/// `{"type": "data", "data": {"label": "...", "value": "..."}}` and friends.
#[derive(Debug, Default, Deserialize)]
pub struct InfoboxEntry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub data: EntryBody,
}

/// Most entries carry an object; image entries carry an array. Anything
/// that is not the object shape lands in `Other` and is ignored.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EntryBody {
    Fields(EntryFields),
    Other(Value),
}

impl Default for EntryBody {
    fn default() -> Self {
        EntryBody::Other(Value::Null)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EntryFields {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<EntryValue>,
}

/// A value is an HTML fragment, or for `group`/`panel`/`section` entries,
/// a list of nested entries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EntryValue {
    Html(String),
    Nested(Vec<InfoboxEntry>),
    Other(Value),
}

impl InfoboxEntry {
    pub fn label(&self) -> Option<&str> {
        match &self.data {
            EntryBody::Fields(f) => f.label.as_deref(),
            EntryBody::Other(_) => None,
        }
    }

    pub fn value(&self) -> Option<&EntryValue> {
        match &self.data {
            EntryBody::Fields(f) => f.value.as_ref(),
            EntryBody::Other(_) => None,
        }
    }

    pub fn html(&self) -> Option<&str> {
        match self.value()? {
            EntryValue::Html(s) => Some(s),
            _ => None,
        }
    }

    pub fn children(&self) -> &[InfoboxEntry] {
        match self.value() {
            Some(EntryValue::Nested(children)) => children,
            _ => &[],
        }
    }
}

/// Decode the infobox blob. Anything that is not a list of infobox objects is an error.
pub fn parse_infoboxes(raw: &str) -> Result<Vec<Infobox>, serde_json::Error> {
    serde_json::from_str(raw)
}
