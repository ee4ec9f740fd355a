// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use poster_scrape::config::{ApiOptions, PathOptions, PauseOptions, PipelineOptions};
use poster_scrape::core::Http;
use poster_scrape::data::PosterRecord;
use poster_scrape::{Error, Result};

pub const API: &str = "https://wiki.test/api.php";

/// One recorded call: url plus its query pairs.
#[derive(Clone, Debug)]
pub struct Request {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

type Responder = Box<dyn Fn(&Request) -> Result<Vec<u8>>>;

/// Canned HTTP: answers through a closure and remembers every request.
pub struct FakeHttp {
    respond: Responder,
    pub log: RefCell<Vec<Request>>,
}

impl FakeHttp {
    pub fn new(respond: impl Fn(&Request) -> Result<Vec<u8>> + 'static) -> Self {
        Self { respond: Box::new(respond), log: RefCell::new(Vec::new()) }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.log.borrow().clone()
    }

    /// Requests whose url is not the API endpoint (image fetches).
    pub fn image_requests(&self) -> Vec<String> {
        self.log.borrow().iter().filter(|r| r.url != API).map(|r| r.url.clone()).collect()
    }
}

impl Http for FakeHttp {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>> {
        let req = Request {
            url: url.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        };
        let out = (self.respond)(&req);
        self.log.borrow_mut().push(req);
        out
    }
}

pub fn reply(value: serde_json::Value) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&value).unwrap())
}

pub fn not_found(url: &str) -> Result<Vec<u8>> {
    Err(Error::Status { url: url.to_string(), code: 404 })
}

/// Options pointing every path into `root`, with no pauses.
pub fn options(root: &Path) -> PipelineOptions {
    PipelineOptions {
        api: ApiOptions { endpoint: API.to_string(), ..ApiOptions::default() },
        paths: PathOptions {
            image_dir: root.join("posters"),
            manifest: root.join("data/posters.json"),
            details: root.join("data/poster-details.json"),
        },
        pauses: PauseOptions { download: Duration::ZERO, lookup: Duration::ZERO },
        dry_run: false,
    }
}

pub fn poster(id: u64, file: &str) -> PosterRecord {
    PosterRecord {
        id,
        title: file.to_string(),
        name: file.rsplit_once('.').map_or(file, |(b, _)| b).replace('_', " "),
        file: file.to_string(),
        image_url: format!("https://img.test/{file}"),
        width: None,
        height: None,
    }
}

/// Start and end of each round-trip seen by a `timed` responder.
pub type Timings = Rc<RefCell<Vec<(Instant, Instant)>>>;

/// Wrap `respond` so every call takes `latency` and its span is recorded.
pub fn timed(
    latency: Duration,
    respond: impl Fn(&Request) -> Result<Vec<u8>> + 'static,
) -> (FakeHttp, Timings) {
    let timings: Timings = Rc::default();
    let log = Rc::clone(&timings);
    let http = FakeHttp::new(move |req| {
        let start = Instant::now();
        thread::sleep(latency);
        let out = respond(req);
        log.borrow_mut().push((start, Instant::now()));
        out
    });
    (http, timings)
}

/// Idle time between the end of each round-trip and the start of the next.
pub fn idle_gaps(timings: &Timings) -> Vec<Duration> {
    timings
        .borrow()
        .windows(2)
        .map(|w| w[1].0.duration_since(w[0].1))
        .collect()
}
