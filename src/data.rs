// src/data.rs
//
// Records that cross stage boundaries.
//
// - PosterRecord: one discovered image. Created by the catalog fetcher,
//                 only ever dropped (dedupe), never edited in place.
// - DetailRecord: sparse character attributes for one poster, rebuilt from
//                 scratch on every enrich run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::sanitize::split_list;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterRecord {
    /// Upstream page id. Unique within a manifest.
    pub id: u64,
    /// Upstream title without the `File:` namespace.
    pub title: String,
    pub name: String,
    /// Local filename inside the image directory. Unique within a manifest.
    pub file: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Semantic fields the enricher knows how to fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetailField {
    Crew,
    Affiliation,
    Origin,
    Role,
    Bounty,
    Status,
    Age,
    Birthday,
    Size,
    Fruit,
    FirstSeen,
    MatchedName,
}

impl DetailField {
    pub const ALL: [DetailField; 12] = [
        DetailField::Crew,
        DetailField::Affiliation,
        DetailField::Origin,
        DetailField::Role,
        DetailField::Bounty,
        DetailField::Status,
        DetailField::Age,
        DetailField::Birthday,
        DetailField::Size,
        DetailField::Fruit,
        DetailField::FirstSeen,
        DetailField::MatchedName,
    ];

    /// Key used in the detail store document.
    pub fn key(self) -> &'static str {
        match self {
            DetailField::Crew => "crew",
            DetailField::Affiliation => "affiliation",
            DetailField::Origin => "origin",
            DetailField::Role => "role",
            DetailField::Bounty => "bounty",
            DetailField::Status => "status",
            DetailField::Age => "age",
            DetailField::Birthday => "birthday",
            DetailField::Size => "size",
            DetailField::Fruit => "fruit",
            DetailField::FirstSeen => "firstSeen",
            DetailField::MatchedName => "matchedName",
        }
    }
}

/// Absent field = unknown. A present field is never empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fruit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_name: Option<String>,
    /// Wiki page the attributes were read from.
    pub source_page: String,
}

/// Detail records keyed by poster id. Serialized as a JSON object with the
/// ids as string keys, in ascending numeric order.
pub type DetailStore = BTreeMap<u64, DetailRecord>;

impl DetailRecord {
    pub fn new(source_page: impl Into<String>) -> Self {
        Self { source_page: source_page.into(), ..Self::default() }
    }

    pub fn get(&self, field: DetailField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Add `value` to `field`; see [`merge_value`].
    pub fn merge(&mut self, field: DetailField, value: &str) {
        merge_value(self.slot_mut(field), value);
    }

    /// At least one semantic field (anything but `sourcePage`) is known.
    pub fn has_fields(&self) -> bool {
        DetailField::ALL.iter().any(|f| self.slot(*f).is_some())
    }

    fn slot(&self, field: DetailField) -> &Option<String> {
        match field {
            DetailField::Crew => &self.crew,
            DetailField::Affiliation => &self.affiliation,
            DetailField::Origin => &self.origin,
            DetailField::Role => &self.role,
            DetailField::Bounty => &self.bounty,
            DetailField::Status => &self.status,
            DetailField::Age => &self.age,
            DetailField::Birthday => &self.birthday,
            DetailField::Size => &self.size,
            DetailField::Fruit => &self.fruit,
            DetailField::FirstSeen => &self.first_seen,
            DetailField::MatchedName => &self.matched_name,
        }
    }

    fn slot_mut(&mut self, field: DetailField) -> &mut Option<String> {
        match field {
            DetailField::Crew => &mut self.crew,
            DetailField::Affiliation => &mut self.affiliation,
            DetailField::Origin => &mut self.origin,
            DetailField::Role => &mut self.role,
            DetailField::Bounty => &mut self.bounty,
            DetailField::Status => &mut self.status,
            DetailField::Age => &mut self.age,
            DetailField::Birthday => &mut self.birthday,
            DetailField::Size => &mut self.size,
            DetailField::Fruit => &mut self.fruit,
            DetailField::FirstSeen => &mut self.first_seen,
            DetailField::MatchedName => &mut self.matched_name,
        }
    }
}

/// Merge policy for repeated fields: the list items of both sides, exact
/// repeats dropped, first-seen order kept, joined with `", "`.
pub fn merge_value(slot: &mut Option<String>, value: &str) {
    let value = value.trim();
    if value.is_empty() { return; }

    let Some(current) = slot.as_deref() else {
        *slot = Some(s!(value));
        return;
    };
    if current == value { return; }

    let mut parts: Vec<&str> = Vec::new();
    for part in split_list(current).into_iter().chain(split_list(value)) {
        if !parts.contains(&part) {
            parts.push(part);
        }
    }
    let merged = parts.join(", ");
    *slot = if merged.is_empty() { None } else { Some(merged) };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(values: &[&str]) -> Option<String> {
        let mut slot = None;
        for v in values {
            merge_value(&mut slot, v);
        }
        slot
    }

    #[test]
    fn merge_dedups_exact_repeats() {
        assert_eq!(merged(&["Straw Hat Pirates", "Straw Hat Pirates"]).as_deref(), Some("Straw Hat Pirates"));
    }

    #[test]
    fn merge_appends_distinct_values_in_order() {
        assert_eq!(
            merged(&["Straw Hat Pirates", "Red Hair Pirates"]).as_deref(),
            Some("Straw Hat Pirates, Red Hair Pirates")
        );
        assert_eq!(
            merged(&["A, B", "B, C", "A"]).as_deref(),
            Some("A, B, C")
        );
    }

    #[test]
    fn merge_ignores_empty_and_keeps_grouped_numbers() {
        assert_eq!(merged(&["", "  "]), None);
        assert_eq!(
            merged(&["1,500,000,000", "3,000,000,000"]).as_deref(),
            Some("1,500,000,000, 3,000,000,000")
        );
    }

    #[test]
    fn record_serializes_sparse_camel_case() {
        let mut rec = DetailRecord::new("Monkey D. Luffy");
        rec.merge(DetailField::FirstSeen, "Chapter 1");
        rec.merge(DetailField::MatchedName, "Monkey D. Luffy");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "firstSeen": "Chapter 1",
                "matchedName": "Monkey D. Luffy",
                "sourcePage": "Monkey D. Luffy"
            })
        );
        assert!(rec.has_fields());
        assert!(!DetailRecord::new("X").has_fields());
    }

    #[test]
    fn store_keys_are_numeric_strings() {
        let mut store = DetailStore::new();
        store.insert(10, DetailRecord::new("B"));
        store.insert(9, DetailRecord::new("A"));
        let text = serde_json::to_string(&store).unwrap();
        assert_eq!(text, r#"{"9":{"sourcePage":"A"},"10":{"sourcePage":"B"}}"#);
        let back: DetailStore = serde_json::from_str(&text).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn poster_record_round_trips_manifest_shape() {
        let json = r#"{"id":7,"title":"Luffy.jpg","name":"Luffy","file":"Luffy.jpg","imageUrl":"https://x/Luffy.jpg","width":300}"#;
        let rec: PosterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.width, Some(300));
        assert_eq!(rec.height, None);
        assert_eq!(serde_json::to_string(&rec).unwrap(), json);
    }
}
