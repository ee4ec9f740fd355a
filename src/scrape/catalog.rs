// src/scrape/catalog.rs
//! Catalog fetcher: page through the category listing and turn every listed
//! file into a `PosterRecord` with a unique, filesystem-safe name.

use std::collections::HashSet;

use crate::{
    config::{ApiOptions, consts::{FALLBACK_EXTENSION, FILE_PREFIX}},
    core::net::{self, Http, Throttle},
    core::sanitize::{collation_key, display_name, sanitize_file_base, split_extension, url_extension},
    data::PosterRecord,
    error::Result,
    file::FileNames,
    progress::Progress,
    specs::category::{self, CategoryResponse, Continuation, ListedAsset},
};

/// Fetch the full catalog. Any failed or undecodable listing request aborts
/// the whole discovery: a partial catalog is never returned.
pub fn discover(
    http: &dyn Http,
    api: &ApiOptions,
    throttle: &mut Throttle,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<PosterRecord>> {
    let mut listed: Vec<ListedAsset> = Vec::new();
    let mut cont: Continuation = Vec::new();
    let mut pages = 0usize;

    loop {
        let page = {
            let query = category::query(&api.category, &cont);
            throttle.call(|| net::get_json::<CategoryResponse>(http, &api.endpoint, &query))?.into_page()
        };
        pages += 1;
        logd!("Catalog page {pages}: {} assets", page.assets.len());
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Catalog page {pages}: {} assets", page.assets.len()));
        }
        listed.extend(page.assets);

        match page.next {
            Some(next) if next == cont => {
                logw!("Catalog continuation did not advance after page {pages}; stopping");
                break;
            }
            Some(next) => cont = next,
            None => break,
        }
    }

    logf!("Catalog: {} assets over {pages} page(s)", listed.len());
    Ok(build_catalog(listed))
}

/// Offline half of discovery: derive titles, names and files, resolve
/// collisions in listing order, then sort for the manifest.
///
/// Repeated page ids (the same file listed twice) keep their first listing.
pub fn build_catalog(listed: Vec<ListedAsset>) -> Vec<PosterRecord> {
    let mut names = FileNames::new();
    let mut ids = HashSet::new();
    let mut records = Vec::with_capacity(listed.len());

    for asset in listed {
        if !ids.insert(asset.id) {
            logd!("Catalog: page {} listed twice, keeping the first", asset.id);
            continue;
        }
        records.push(to_record(asset, &mut names));
    }

    sort_catalog(&mut records);
    records
}

fn to_record(asset: ListedAsset, names: &mut FileNames) -> PosterRecord {
    let title = s!(asset.title.strip_prefix(FILE_PREFIX).unwrap_or(&asset.title));
    let (base, ext) = split_extension(&title);
    let ext = match ext {
        Some(ext) => s!(ext),
        None => url_extension(&asset.url).unwrap_or_else(|| s!(FALLBACK_EXTENSION)),
    };
    let stem = sanitize_file_base(base, asset.id);
    let file = names.resolve(&stem, &ext, asset.id);

    PosterRecord {
        id: asset.id,
        name: display_name(&title),
        title,
        file,
        image_url: asset.url,
        width: asset.width,
        height: asset.height,
    }
}

/// Manifest order: collation key of the display name, then the raw name,
/// then id. This order also decides which copy survives deduplication.
pub fn sort_catalog(records: &mut [PosterRecord]) {
    records.sort_by_cached_key(|r| (collation_key(&r.name), r.name.clone(), r.id));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: u64, title: &str, url: &str) -> ListedAsset {
        ListedAsset { id, title: s!(title), url: s!(url), width: None, height: None }
    }

    #[test]
    fn shared_base_name_gets_id_suffix() {
        let out = build_catalog(vec![
            asset(1, "File:Luffy.jpg", "https://img/a/Luffy.jpg"),
            asset(2, "File:Luffy?.jpg", "https://img/b/Luffy.jpg"),
        ]);
        let files: Vec<&str> = out.iter().map(|r| r.file.as_str()).collect();
        assert!(files.contains(&"Luffy.jpg"));
        assert!(files.contains(&"Luffy_2.jpg"));
    }

    #[test]
    fn extension_comes_from_title_then_url_then_fallback() {
        let out = build_catalog(vec![
            asset(1, "File:Zoro.png", "https://img/x/Zoro.gif"),
            asset(2, "File:Nami", "https://img/x/Nami.webp?cb=1"),
            asset(3, "File:Usopp", "https://img/x/Usopp/revision/latest"),
        ]);
        let by_id = |id| out.iter().find(|r| r.id == id).unwrap();
        assert_eq!(by_id(1).file, "Zoro.png");
        assert_eq!(by_id(2).file, "Nami.webp");
        assert_eq!(by_id(3).file, "Usopp.jpg");
    }

    #[test]
    fn titles_and_names_are_derived() {
        let out = build_catalog(vec![asset(5, "File:Monkey_D._Luffy_Wanted.jpg", "https://img/l.jpg")]);
        let r = &out[0];
        assert_eq!(r.title, "Monkey_D._Luffy_Wanted.jpg");
        assert_eq!(r.name, "Monkey D. Luffy Wanted");
        assert_eq!(r.file, "Monkey_D._Luffy_Wanted.jpg");
    }

    #[test]
    fn sorted_by_display_name_ignoring_case_and_accents() {
        let out = build_catalog(vec![
            asset(1, "File:zeff.jpg", "https://img/1.jpg"),
            asset(2, "File:Édouard.jpg", "https://img/2.jpg"),
            asset(3, "File:Arlong.jpg", "https://img/3.jpg"),
            asset(4, "File:buggy.jpg", "https://img/4.jpg"),
        ]);
        let names: Vec<&str> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Arlong", "buggy", "Édouard", "zeff"]);
    }

    #[test]
    fn duplicate_ids_are_listed_once() {
        let out = build_catalog(vec![
            asset(1, "File:A.jpg", "https://img/1.jpg"),
            asset(1, "File:A.jpg", "https://img/1.jpg"),
        ]);
        assert_eq!(out.len(), 1);
    }
}
