// src/core/sanitize.rs

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::config::consts::SYNTHETIC_STEM;

/// Entities that actually show up in infobox values. Anything else is left alone.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&#039;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

/// Characters no filesystem we care about accepts in a name.
const ILLEGAL: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Single left-to-right pass, so `&amp;lt;` decodes to `&lt;` and stops there.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match ENTITIES.iter().find(|(ent, _)| rest.starts_with(ent)) {
            Some((ent, rep)) => {
                out.push_str(rep);
                rest = &rest[ent.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collapse whitespace runs to one space and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Filesystem-safe stem: ASCII only, no illegal characters, whitespace runs
/// become a single `_`, no leading/trailing `_`. Falls back to `poster_<id>`.
pub fn sanitize_file_base(name: &str, id: u64) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.nfkd() {
        if !ch.is_ascii() || ILLEGAL.contains(&ch) { continue; }
        if ch.is_whitespace() || ch == '_' {
            if !last_us { out.push('_'); last_us = true; }
        } else {
            out.push(ch);
            last_us = false;
        }
    }
    let out = out.trim_matches('_');
    if out.is_empty() { format!("{SYNTHETIC_STEM}_{id}") } else { s!(out) }
}

/// Split `name.ext` into `("name", Some(".ext"))`.
///
/// Looks only at the last path segment, needs at least one character after the
/// dot, and a leading dot (`.hidden`) is not an extension.
pub fn split_extension(title: &str) -> (&str, Option<&str>) {
    let seg_start = title.rfind('/').map_or(0, |i| i + 1);
    let seg = &title[seg_start..];
    match seg.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < seg.len() => {
            let at = seg_start + dot;
            (&title[..at], Some(&title[at..]))
        }
        _ => (title, None),
    }
}

/// Extension of the last segment of a URL path, e.g. `.png` for
/// `https://host/images/a/ab/Luffy.png?cb=1`.
pub fn url_extension(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw).ok()?;
    let (_, ext) = split_extension(parsed.path());
    ext.map(|e| s!(e))
}

/// Human-facing name: extension dropped, underscores as spaces, single-spaced.
pub fn display_name(title: &str) -> String {
    let (base, _) = split_extension(title);
    normalize_ws(&base.replace('_', " "))
}

/// Sort key approximating a locale-aware comparison: accents folded,
/// case ignored. Callers break ties on the raw string.
pub fn collation_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Infobox label → matching key: lowercase, entities dropped, every run of
/// non-alphanumerics becomes one space.
pub fn normalize_label(label: &str) -> String {
    let lower = label.to_lowercase();

    let mut no_entities = String::with_capacity(lower.len());
    let mut rest = lower.as_str();
    while let Some(amp) = rest.find('&') {
        no_entities.push_str(&rest[..amp]);
        match rest[amp + 1..].find(';') {
            Some(semi) if semi > 0 => {
                no_entities.push(' ');
                rest = &rest[amp + 1 + semi + 1..];
            }
            _ => {
                no_entities.push('&');
                rest = &rest[amp + 1..];
            }
        }
    }
    no_entities.push_str(rest);

    let mut out = String::with_capacity(no_entities.len());
    let mut gap = false;
    for ch in no_entities.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if gap && !out.is_empty() { out.push(' '); }
            out.push(ch);
            gap = false;
        } else {
            gap = true;
        }
    }
    out
}

/// Split a comma list into trimmed, non-empty parts.
/// A comma between two digits (`1,000,000`) is digit grouping, not a separator.
pub fn split_list(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        if b != b',' { continue; }
        let grouped = i > 0
            && bytes[i - 1].is_ascii_digit()
            && bytes.get(i + 1).is_some_and(|n| n.is_ascii_digit());
        if grouped { continue; }
        parts.push(s[start..i].trim());
        start = i + 1;
    }
    parts.push(s[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}
