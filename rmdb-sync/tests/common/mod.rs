#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use rmdb_api::{FetchCause, PageSource};
use rmdb_catalog::ResourceKind;
use rmdb_sync::{SyncProgress, SyncReport, SyncStage};
use serde_json::{Value, json};

const BASE: &str = "https://rickandmortyapi.com/api";

/// Serves fixed listing pages and records every request.
#[derive(Default)]
pub struct FakeApi {
    pages: HashMap<(ResourceKind, u32), Result<String, u16>>,
    pub requests: RefCell<Vec<(ResourceKind, u32)>>,
}

impl FakeApi {
    /// Serve `pages` of results for `kind`, one inner vec per page.
    pub fn listing(mut self, kind: ResourceKind, pages: Vec<Vec<Value>>) -> Self {
        let total = pages.len();
        for (i, results) in pages.into_iter().enumerate() {
            let body = json!({
                "info": {"count": results.len(), "pages": total, "next": null, "prev": null},
                "results": results,
            });
            self.pages.insert((kind, i as u32 + 1), Ok(body.to_string()));
        }
        self
    }

    /// Make page `page` of `kind` fail with HTTP `status`.
    pub fn failing(mut self, kind: ResourceKind, page: u32, status: u16) -> Self {
        self.pages.insert((kind, page), Err(status));
        self
    }

    pub fn requested(&self) -> Vec<(ResourceKind, u32)> {
        self.requests.borrow().clone()
    }
}

impl PageSource for FakeApi {
    fn get_page(&self, kind: ResourceKind, page: u32) -> Result<String, FetchCause> {
        self.requests.borrow_mut().push((kind, page));
        match self.pages.get(&(kind, page)) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchCause::Status { status: *status }),
            None => Ok(json!({"error": "There is nothing here"}).to_string()),
        }
    }
}

/// Answer every request on a local port with `status` and `body`; returns
/// the base URL.
pub fn serve_http(status: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}/api")
}

pub fn location(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "Planet",
        "dimension": "Dimension C-137",
        "residents": [],
        "url": format!("{BASE}/location/{id}"),
    })
}

pub fn episode(id: i64, name: &str, air_date: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "air_date": air_date,
        "episode": format!("S01E{id:02}"),
        "characters": [],
        "url": format!("{BASE}/episode/{id}"),
    })
}

/// A character whose origin, location and episodes are given as ids.
/// `None` for origin or location produces the API's empty URL.
pub fn character(id: i64, origin: Option<i64>, location: Option<i64>, episodes: &[i64]) -> Value {
    let link = |loc: Option<i64>| match loc {
        Some(l) => json!({"name": format!("Location {l}"), "url": format!("{BASE}/location/{l}")}),
        None => json!({"name": "unknown", "url": ""}),
    };
    json!({
        "id": id,
        "name": format!("Character {id}"),
        "status": "Alive",
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": link(origin),
        "location": link(location),
        "episode": episodes
            .iter()
            .map(|e| format!("{BASE}/episode/{e}"))
            .collect::<Vec<_>>(),
    })
}

/// Two locations, one episode, one character linked to all of them.
pub fn fixture_api() -> FakeApi {
    FakeApi::default()
        .listing(
            ResourceKind::Location,
            vec![vec![location(1, "Earth (C-137)"), location(2, "Abadango")]],
        )
        .listing(
            ResourceKind::Episode,
            vec![vec![episode(1, "Pilot", "December 2, 2013")]],
        )
        .listing(
            ResourceKind::Character,
            vec![vec![character(1, Some(1), Some(2), &[1])]],
        )
}

/// Records stage transitions.
#[derive(Default)]
pub struct RecordingProgress {
    pub stages: RefCell<Vec<SyncStage>>,
    pub fetched: RefCell<Vec<(ResourceKind, usize)>>,
    pub loaded: RefCell<Vec<(ResourceKind, u64)>>,
    pub completed: RefCell<usize>,
}

impl SyncProgress for RecordingProgress {
    fn on_stage(&self, stage: SyncStage) {
        self.stages.borrow_mut().push(stage);
    }

    fn on_fetched(&self, kind: ResourceKind, records: usize) {
        self.fetched.borrow_mut().push((kind, records));
    }

    fn on_loaded(&self, kind: ResourceKind, rows: u64) {
        self.loaded.borrow_mut().push((kind, rows));
    }

    fn on_complete(&self, _report: &SyncReport) {
        *self.completed.borrow_mut() += 1;
    }
}
