// benches/clean_html.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use poster_scrape::{
    s,
    core::html::clean_html,
    scrape::enrich::extract_fields,
    specs::pageprops::parse_infoboxes,
};

const FRAGMENT: &str = r##"<a href="/wiki/Straw_Hat_Pirates" title="Straw Hat Pirates">Straw Hat Pirates</a>
<sup id="cite_ref-1" class="reference"><a href="#cite_note-1">[1]</a></sup><br>
<a href="/wiki/Straw_Hat_Grand_Fleet" title="Straw Hat Grand Fleet">Straw Hat Grand Fleet</a>&#039;s captain;
<ul><li>Four Emperors</li><li>Worst Generation</li></ul> &amp; 3,000,000,000&nbsp;berries"##;

fn infobox_blob() -> String {
    let row = |label: &str, value: &str| {
        format!(r#"{{"type":"data","data":{{"label":"{label}","value":"{}"}}}}"#, value.replace('"', "\\\""))
    };
    let mut rows = vec![s!(r#"{"type":"title","data":{"value":"<b>Monkey D. Luffy</b>"}}"#)];
    for _ in 0..4 {
        rows.push(row("Affiliations:", "<a href=\"/wiki/A\">Straw Hat Pirates</a><br>Straw Hat Grand Fleet"));
        rows.push(row("Occupations:", "Pirate<br>Captain"));
        rows.push(row("Bounty:", "3,000,000,000<br>1,500,000,000"));
        rows.push(row("Japanese Name:", "モンキー・D・ルフィ"));
    }
    format!(r#"[{{"data":[{},{{"type":"group","data":{{"value":[{}]}}}}]}}]"#, rows.join(","), rows[1..].join(","))
}

fn bench_clean_html(c: &mut Criterion) {
    c.bench_function("clean_html_fragment", |b| {
        b.iter(|| clean_html(black_box(FRAGMENT)))
    });
}

fn bench_extract_fields(c: &mut Criterion) {
    let blob = infobox_blob();
    let boxes = parse_infoboxes(&blob).unwrap_or_default();
    assert!(!boxes.is_empty(), "sample infobox should decode");

    c.bench_function("parse_infoboxes", |b| {
        b.iter(|| parse_infoboxes(black_box(&blob)).map(|v| v.len()))
    });

    c.bench_function("extract_fields", |b| {
        b.iter(|| {
            let rec = extract_fields(black_box(&boxes), "Monkey D. Luffy");
            black_box(rec.has_fields())
        })
    });
}

criterion_group!(benches, bench_clean_html, bench_extract_fields);
criterion_main!(benches);
