// src/core/html.rs
//
// Just enough HTML handling for infobox values: they are short fragments
// (links, <br>, small lists), not documents.

use super::sanitize::{decode_entities, normalize_ws, split_list};

/// Tags whose boundaries separate list items in a value.
const SEPARATOR_TAGS: &[&str] = &["br", "li"];

/// Turn an infobox value fragment into plain text.
///
/// - `<br>`, `<li>` and `</li>` become `, `; every other tag becomes a space
/// - known entities are decoded after the tags are gone
/// - whitespace collapses, repeated/dangling commas collapse into single `, `
///
/// Returns `None` when nothing is left.
pub fn clean_html(fragment: &str) -> Option<String> {
    let text = strip_tags(fragment);
    let text = normalize_ws(&decode_entities(&text));
    let joined = split_list(&text).join(", ");
    if joined.is_empty() { None } else { Some(joined) }
}

/// Replace each `<...>` with a separator. Quoted `>` inside attributes does not end a tag.
/// A `<` that never closes is kept as text.
pub fn strip_tags(s: &str) -> String {
    let b = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0usize;
    let mut text_from = 0usize;

    while i < b.len() {
        if b[i] != b'<' {
            i += 1;
            continue;
        }
        let Some(end) = tag_end(b, i) else { i += 1; continue; };
        out.push_str(&s[text_from..i]);
        out.push_str(if is_separator_tag(&s[i + 1..end]) { ", " } else { " " });
        i = end + 1;
        text_from = i;
    }
    out.push_str(&s[text_from..]);
    out
}

/// Index of the `>` closing the tag opened at `open`, honoring quotes.
/// `<>` is not a tag.
fn tag_end(b: &[u8], open: usize) -> Option<usize> {
    let mut in_s = false; // '
    let mut in_d = false; // "
    let mut i = open + 1;
    while i < b.len() {
        match b[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return (i > open + 1).then_some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

fn is_separator_tag(inner: &str) -> bool {
    let name: String = inner
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    SEPARATOR_TAGS.contains(&name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_and_list_items_become_commas() {
        assert_eq!(clean_html("A<br>B<li>C</li>").as_deref(), Some("A, B, C"));
        assert_eq!(clean_html("A<br/>B<BR />C").as_deref(), Some("A, B, C"));
        assert_eq!(clean_html("<ul><li>X</li><li>Y</li></ul>").as_deref(), Some("X, Y"));
    }

    #[test]
    fn other_tags_become_spaces() {
        assert_eq!(
            clean_html(r#"<a href="/wiki/Straw_Hat_Pirates" title="a>b">Straw Hat Pirates</a>"#).as_deref(),
            Some("Straw Hat Pirates")
        );
        assert_eq!(clean_html("Monkey<b>D.</b>Luffy").as_deref(), Some("Monkey D. Luffy"));
    }

    #[test]
    fn entities_and_whitespace() {
        assert_eq!(clean_html("Tom&nbsp;&amp;  Jerry\n").as_deref(), Some("Tom & Jerry"));
        assert_eq!(clean_html("&lt;b&gt;").as_deref(), Some("<b>"));
        assert_eq!(clean_html("Age &#039;19&#039;").as_deref(), Some("Age '19'"));
    }

    #[test]
    fn comma_runs_collapse() {
        assert_eq!(clean_html("A ,  , B,,C").as_deref(), Some("A, B, C"));
        assert_eq!(clean_html(",A,").as_deref(), Some("A"));
        assert_eq!(clean_html("3,000,000,000<br>").as_deref(), Some("3,000,000,000"));
    }

    #[test]
    fn empty_after_cleaning_is_none() {
        assert_eq!(clean_html(""), None);
        assert_eq!(clean_html("<br><br/>"), None);
        assert_eq!(clean_html("&nbsp; , "), None);
    }

    #[test]
    fn unclosed_angle_is_text() {
        assert_eq!(clean_html("a < b").as_deref(), Some("a < b"));
        assert_eq!(clean_html("<>").as_deref(), Some("<>"));
    }
}
