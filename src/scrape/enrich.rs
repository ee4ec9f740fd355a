// src/scrape/enrich.rs
//! Detail enricher: poster → page that uses it → that page's infobox →
//! a sparse `DetailRecord`. Best effort per poster; nothing here aborts a run.

use std::fmt;

use crate::{
    config::ApiOptions,
    core::html::clean_html,
    core::net::{self, Http, Throttle},
    core::sanitize::normalize_label,
    data::{DetailField, DetailRecord, DetailStore, PosterRecord},
    error::Result,
    progress::Progress,
    specs::fileusage::{self, FileUsage, UsageResponse, pick_usage_title},
    specs::pageprops::{self, Infobox, InfoboxEntry, PropsResponse},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    pub total: usize,
    /// Posters with a using page and a decodable infobox.
    pub with_infobox: usize,
    /// Posters with at least one extracted field.
    pub with_fields: usize,
    /// Usage or infobox requests that failed outright.
    pub lookup_failures: usize,
}

impl fmt::Display for EnrichSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Posters: {} | With infobox: {} | With extracted fields: {} | Lookup failures: {}",
            self.total, self.with_infobox, self.with_fields, self.lookup_failures
        )
    }
}

/// How a normalized label selects a field.
enum Keyword {
    Contains(&'static str),
    Exactly(&'static str),
}

use Keyword::{Contains, Exactly};

/// Label keywords per field. Every rule is checked, so one label can fill
/// several fields.
const LABEL_RULES: &[(DetailField, &[Keyword])] = &[
    (DetailField::Crew, &[Contains("crew")]),
    (DetailField::Affiliation, &[Contains("affiliation")]),
    (DetailField::Origin, &[Contains("origin"), Contains("birthplace")]),
    (DetailField::Role, &[Contains("occupation"), Contains("job"), Contains("role")]),
    (DetailField::Bounty, &[Contains("bounty"), Contains("reward")]),
    (DetailField::Status, &[Contains("status")]),
    (DetailField::Age, &[Contains("age")]),
    (DetailField::Birthday, &[Contains("birthday")]),
    (DetailField::Size, &[Contains("height"), Contains("size")]),
    (DetailField::Fruit, &[Contains("devil fruit"), Exactly("fruit")]),
    (DetailField::FirstSeen, &[Contains("first appearance"), Contains("debut")]),
];

/// Fields a normalized label maps to, in rule order.
pub fn fields_for_label(normalized: &str) -> Vec<DetailField> {
    LABEL_RULES
        .iter()
        .filter(|(_, keywords)| {
            keywords.iter().any(|k| match k {
                Contains(word) => normalized.contains(word),
                Exactly(word) => normalized == *word,
            })
        })
        .map(|(field, _)| *field)
        .collect()
}

/// Build the detail record for one page's infoboxes. Nested sections
/// (`group`, `panel`, `section`) are walked too.
pub fn extract_fields(infoboxes: &[Infobox], source_page: &str) -> DetailRecord {
    let mut record = DetailRecord::new(source_page);
    for infobox in infoboxes {
        collect_entries(&infobox.data, &mut record);
    }
    record
}

fn collect_entries(entries: &[InfoboxEntry], record: &mut DetailRecord) {
    for entry in entries {
        match entry.kind.as_str() {
            "title" => {
                if let Some(name) = entry.html().and_then(clean_html) {
                    record.merge(DetailField::MatchedName, &name);
                }
            }
            "data" => {
                let (Some(label), Some(value)) = (entry.label(), entry.html().and_then(clean_html)) else {
                    continue;
                };
                for field in fields_for_label(&normalize_label(label)) {
                    record.merge(field, &value);
                }
            }
            _ => collect_entries(entry.children(), record),
        }
    }
}

/// Enrich every poster of `manifest`. Posters without a using page or
/// without a usable infobox are left out of the store.
pub fn enrich(
    http: &dyn Http,
    api: &ApiOptions,
    manifest: &[PosterRecord],
    throttle: &mut Throttle,
    mut progress: Option<&mut dyn Progress>,
) -> (DetailStore, EnrichSummary) {
    let mut store = DetailStore::new();
    let mut summary = EnrichSummary { total: manifest.len(), ..Default::default() };
    if let Some(p) = progress.as_deref_mut() {
        p.begin("enrich", manifest.len());
    }

    for poster in manifest {
        match enrich_one(http, api, poster, throttle) {
            Ok(Some(record)) => {
                summary.with_infobox += 1;
                if record.has_fields() {
                    summary.with_fields += 1;
                }
                store.insert(poster.id, record);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(poster.id);
                }
            }
            Ok(None) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(poster.id);
                }
            }
            Err(e) => {
                summary.lookup_failures += 1;
                logw!("Poster {} ({}): {e}", poster.id, poster.title);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(poster.id, &e.to_string());
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    (store, summary)
}

/// `Ok(None)`: nothing to record (no using page, no infobox, bad blob).
fn enrich_one(
    http: &dyn Http,
    api: &ApiOptions,
    poster: &PosterRecord,
    throttle: &mut Throttle,
) -> Result<Option<DetailRecord>> {
    let usages = lookup_usages(http, api, &poster.title, throttle)?;
    let Some(page_title) = pick_usage_title(&usages) else {
        logd!("Poster {}: no page uses {}", poster.id, poster.title);
        return Ok(None);
    };

    let Some(infoboxes) = lookup_infoboxes(http, api, page_title, throttle)? else {
        logd!("Poster {}: no usable infobox on {page_title}", poster.id);
        return Ok(None);
    };

    Ok(Some(extract_fields(&infoboxes, page_title)))
}

fn lookup_usages(http: &dyn Http, api: &ApiOptions, title: &str, throttle: &mut Throttle) -> Result<Vec<FileUsage>> {
    let file_title = fileusage::file_title(title);
    let query = fileusage::query(&file_title);
    let resp: UsageResponse = throttle.call(|| net::get_json(http, &api.endpoint, &query))?;
    Ok(resp.into_usages())
}

/// `Ok(None)` when the page has no infobox or the blob does not decode.
fn lookup_infoboxes(
    http: &dyn Http,
    api: &ApiOptions,
    page_title: &str,
    throttle: &mut Throttle,
) -> Result<Option<Vec<Infobox>>> {
    let query = pageprops::query(page_title);
    let resp: PropsResponse = throttle.call(|| net::get_json(http, &api.endpoint, &query))?;
    let Some(raw) = resp.into_infobox_blob() else {
        return Ok(None);
    };
    match pageprops::parse_infoboxes(&raw) {
        Ok(boxes) => Ok(Some(boxes)),
        Err(e) => {
            logd!("Malformed infobox on {page_title}: {e}");
            Ok(None)
        }
    }
}
