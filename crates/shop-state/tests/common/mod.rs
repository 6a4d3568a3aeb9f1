//! Scripted in-process transport for synchronization tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shop_data::{FetchError, ProgressCounter, RequestBuilder, Response, Transport};
use shop_state::{Storefront, StorefrontConfig};
use tokio::sync::oneshot;

pub const BASE_URL: &str = "https://api.shop.test";

enum Reply {
    Body(u16, String),
    Down,
}

struct Scripted {
    reply: Reply,
    gate: Option<oneshot::Receiver<()>>,
}

/// Answers requests by path, in FIFO order per path.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<Scripted>>>,
    seen: Mutex<Vec<RequestBuilder>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply for the next request to `path`.
    pub fn reply(&self, path: &str, status: u16, body: &str) {
        self.push(path, Reply::Body(status, body.to_string()), None);
    }

    /// Queue a reply that is held back until the returned sender fires.
    pub fn gated(&self, path: &str, status: u16, body: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(path, Reply::Body(status, body.to_string()), Some(rx));
        tx
    }

    /// Queue a network failure.
    pub fn down(&self, path: &str) {
        self.push(path, Reply::Down, None);
    }

    pub fn requests(&self) -> Vec<RequestBuilder> {
        self.seen.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Yield until `n` requests have reached the transport.
    pub async fn wait_for_requests(&self, n: usize) {
        while self.request_count() < n {
            tokio::task::yield_now().await;
        }
    }

    fn push(&self, path: &str, reply: Reply, gate: Option<oneshot::Receiver<()>>) {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(Scripted { reply, gate });
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let path = request
            .url()
            .trim_start_matches(BASE_URL)
            .split('?')
            .next()
            .unwrap_or("")
            .to_string();
        let scripted = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&path)
            .and_then(VecDeque::pop_front);
        self.seen.lock().unwrap().push(request);

        let Some(scripted) = scripted else {
            return Ok(Response::new(
                404,
                HashMap::new(),
                format!(r#"{{"message": "no script for {}"}}"#, path).into_bytes(),
            ));
        };
        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }
        match scripted.reply {
            Reply::Body(status, body) => Ok(Response::new(status, HashMap::new(), body.into_bytes())),
            Reply::Down => Err(FetchError::Transport("connection refused".into())),
        }
    }
}

/// A storefront over `transport` with default settings.
pub fn storefront(transport: &Arc<ScriptedTransport>) -> Storefront {
    storefront_with(transport, StorefrontConfig::default(), Arc::new(ProgressCounter::new()))
}

pub fn storefront_with(
    transport: &Arc<ScriptedTransport>,
    mut config: StorefrontConfig,
    progress: Arc<ProgressCounter>,
) -> Storefront {
    config.api.base_url = BASE_URL.to_string();
    Storefront::connect(config, transport.clone(), progress).unwrap()
}

pub fn products_page(page: i64, total: i64, names: &[&str]) -> String {
    let items: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            format!(
                r#"{{"id": "p{page}_{i}", "name": "{name}", "price": 1000, "currency": "NGN"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"data": {{"items": [{}], "page": {page}, "per_page": 12, "total": {total}}}}}"#,
        items.join(", ")
    )
}
