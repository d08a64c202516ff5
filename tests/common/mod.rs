#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use shortlink::config::parse_base_url;
use shortlink::domain::entities::Mapping;
use shortlink::infrastructure::http::HttpGateway;
use shortlink::state::AppState;
use std::sync::{Arc, Mutex};
use url::Url;

/// Host used for the short URLs the stub hands out.
pub const SHORT_HOST: &str = "http://sho.rt";

#[derive(Default)]
struct Store {
    mappings: Vec<Mapping>,
    fail_list: bool,
    next_code: u64,
}

impl Store {
    fn find_mut(&mut self, query: &str) -> Option<&mut Mapping> {
        let suffix = format!("/{query}");
        self.mappings
            .iter_mut()
            .find(|m| m.short_url == query || m.short_url.ends_with(&suffix))
    }
}

/// In-memory shortening service listening on a random local port.
#[derive(Clone)]
pub struct StubService {
    store: Arc<Mutex<Store>>,
    base_url: Url,
}

impl StubService {
    pub async fn start() -> Self {
        let store = Arc::new(Mutex::new(Store::default()));

        let app = Router::new()
            .route("/api/v1/shortner/list", get(list))
            .route("/api/v1/shortner/encode", post(encode))
            .route("/api/v1/shortner/decode", get(decode))
            .route("/api/v1/shortner/statistics", get(statistics))
            .route("/api/v1/shortner/", get(resolve))
            .with_state(store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            store,
            base_url: parse_base_url(&format!("http://{addr}")).unwrap(),
        }
    }

    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    pub fn gateway(&self) -> HttpGateway {
        HttpGateway::new(self.base_url()).unwrap()
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(Arc::new(self.gateway()))
    }

    /// Stores a mapping directly, returning its short URL.
    pub fn insert(&self, code: &str, original_url: &str) -> String {
        let short_url = format!("{SHORT_HOST}/{code}");
        self.store.lock().unwrap().mappings.push(Mapping::new(
            original_url,
            short_url.clone(),
            Utc::now(),
        ));
        short_url
    }

    pub fn mappings(&self) -> Vec<Mapping> {
        self.store.lock().unwrap().mappings.clone()
    }

    /// Makes the list endpoint answer `500` with an error body.
    pub fn fail_list(&self, fail: bool) {
        self.store.lock().unwrap().fail_list = fail;
    }
}

type SharedStore = Arc<Mutex<Store>>;

#[derive(Deserialize)]
struct EncodeBody {
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Lookup {
    short_url: String,
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}

async fn list(State(store): State<SharedStore>) -> Response {
    let store = store.lock().unwrap();
    if store.fail_list {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "database unavailable" })),
        )
            .into_response();
    }
    Json(json!({ "data": store.mappings })).into_response()
}

async fn encode(State(store): State<SharedStore>, Json(body): Json<EncodeBody>) -> Response {
    if Url::parse(&body.url).is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid URL" })),
        )
            .into_response();
    }

    let mut store = store.lock().unwrap();
    store.next_code += 1;
    let short_url = format!("{SHORT_HOST}/code{}", store.next_code);
    store
        .mappings
        .push(Mapping::new(body.url, short_url.clone(), Utc::now()));

    Json(json!({ "data": short_url })).into_response()
}

async fn decode(State(store): State<SharedStore>, Query(lookup): Query<Lookup>) -> Response {
    let mut store = store.lock().unwrap();
    match store.find_mut(&lookup.short_url) {
        Some(mapping) => Json(json!({ "data": mapping.original_url })).into_response(),
        None => not_found(),
    }
}

async fn resolve(State(store): State<SharedStore>, Query(lookup): Query<Lookup>) -> Response {
    let mut store = store.lock().unwrap();
    match store.find_mut(&lookup.short_url) {
        Some(mapping) => {
            mapping.visits += 1;
            mapping.last_visited = Some(Utc::now());
            Json(json!({ "data": mapping.original_url })).into_response()
        }
        None => not_found(),
    }
}

async fn statistics(State(store): State<SharedStore>, Query(lookup): Query<Lookup>) -> Response {
    let mut store = store.lock().unwrap();
    match store.find_mut(&lookup.short_url) {
        Some(mapping) => Json(json!({ "data": mapping })).into_response(),
        None => not_found(),
    }
}
