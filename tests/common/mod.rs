#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::TcpListener,
    sync::{Arc, Mutex},
};

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    Router,
};

use openshelf::{config::Config, traits::Notifier, CatalogClient};

/// Canned upstream answers keyed by request path, plus a log of every request.
#[derive(Default)]
struct Upstream {
    routes: Mutex<HashMap<String, (StatusCode, String)>>,
    hits:   Mutex<Vec<String>>,
}

async fn answer(
    State(upstream): State<Arc<Upstream>>,
    uri: Uri,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    upstream.hits.lock().unwrap().push(uri.to_string());
    let (status, body) = upstream
        .routes
        .lock()
        .unwrap()
        .get(uri.path())
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, r#"{"error": "notfound"}"#.to_string()));
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

pub struct MockUpstream {
    pub port: u16,
    upstream: Arc<Upstream>,
}

impl MockUpstream {
    /// Must be called from inside a tokio runtime.
    pub fn start() -> Self {
        let upstream = Arc::new(Upstream::default());
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let app = Router::new()
            .fallback(answer)
            .with_state(upstream.clone());
        tokio::spawn(async move {
            axum::Server::from_tcp(listener)
                .unwrap()
                .serve(app.into_make_service())
                .await
                .unwrap();
        });
        Self { port, upstream }
    }

    pub fn respond(&self, path: &str, status: u16, body: impl Into<String>) {
        self.upstream.routes.lock().unwrap().insert(
            path.to_string(),
            (StatusCode::from_u16(status).unwrap(), body.into()),
        );
    }

    pub fn respond_json(&self, path: &str, body: &serde_json::Value) {
        self.respond(path, 200, body.to_string());
    }

    /// Path and query of every request served so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.upstream.hits.lock().unwrap().clone()
    }

    pub fn base(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Every upstream on this server; the shard host is substituted into the
    /// host part, so metadata must name `127.0.0.1` as its `d1`.
    pub fn config(&self) -> Config {
        Config {
            openlibrary_url: self.base(),
            archive_url: self.base(),
            fulltext_url: format!("http://{{shard}}:{}/fulltext/inside.php", self.port),
            system_proxy: false,
            ..Config::default()
        }
    }

    pub fn client(&self) -> (CatalogClient, Arc<RecordingNotifier>) {
        client_for(&self.config())
    }
}

pub fn client_for(config: &Config) -> (CatalogClient, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let client = CatalogClient::new(config, notifier.clone()).unwrap();
    (client, notifier)
}

/// Config whose upstreams refuse connections.
pub fn offline_config() -> Config {
    Config {
        openlibrary_url: "http://127.0.0.1:9".into(),
        archive_url: "http://127.0.0.1:9".into(),
        fulltext_url: "http://{shard}:9/fulltext/inside.php".into(),
        system_proxy: false,
        ..Config::default()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

/// Decoded query pairs of a recorded hit.
pub fn query_of(hit: &str) -> Vec<(String, String)> {
    url::Url::parse(&format!("http://upstream{hit}"))
        .unwrap()
        .query_pairs()
        .into_owned()
        .collect()
}

pub fn path_of(hit: &str) -> &str {
    hit.split('?').next().unwrap_or(hit)
}
