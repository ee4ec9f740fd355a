// src/core/net.rs
//
// Blocking HTTP behind a small trait so stages can run against canned
// responses offline. One request at a time; no retries, no timeouts beyond
// the transport defaults.

use std::io::Read;
use std::thread;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// The only network operation the pipeline needs: GET with query pairs.
/// Implementations return the body for 2xx responses and an error otherwise.
pub trait Http {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>>;
}

/// `ureq`-backed client that sends our client identifier on every request.
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new(user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new().user_agent(user_agent).build();
        Self { agent }
    }
}

impl Http for UreqClient {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>> {
        let mut req = self.agent.get(url);
        for (k, v) in query {
            req = req.query(k, v);
        }

        let resp = match req.call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, _)) => {
                return Err(Error::Status { url: s!(url), code });
            }
            Err(ureq::Error::Transport(t)) => {
                return Err(Error::Transport { url: s!(url), message: t.to_string() });
            }
        };

        let mut body = Vec::new();
        resp.into_reader()
            .read_to_end(&mut body)
            .map_err(|e| Error::Transport { url: s!(url), message: e.to_string() })?;
        Ok(body)
    }
}

/// GET and decode a JSON body into `T`. Shape problems surface as `Error::Decode`.
pub fn get_json<T: DeserializeOwned>(http: &dyn Http, url: &str, query: &[(&str, &str)]) -> Result<T> {
    let body = http.get(url, query)?;
    serde_json::from_slice(&body).map_err(|e| Error::decode(url, e))
}

/// Enforces a minimum idle gap between consecutive requests.
///
/// The gap runs from the end of one round-trip to the start of the next, so a
/// slow response never eats into the pause. Route every request through
/// `call`; the first one goes out immediately.
pub struct Throttle {
    gap: Duration,
    /// When the previous round-trip finished, successful or not.
    last_done: Option<Instant>,
}

impl Throttle {
    pub fn new(gap: Duration) -> Self {
        Self { gap, last_done: None }
    }

    /// Sleep out whatever is left of the gap, run `request`, stamp its end.
    pub fn call<T>(&mut self, request: impl FnOnce() -> T) -> T {
        self.wait();
        let out = request();
        self.last_done = Some(Instant::now());
        out
    }

    fn wait(&self) {
        if let Some(done) = self.last_done {
            let idle = done.elapsed();
            if idle < self.gap {
                thread::sleep(self.gap - idle);
            }
        }
    }
}
