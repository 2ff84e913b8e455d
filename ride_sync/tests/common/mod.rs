//! In-process stand-ins for the telemetry API and the sheet webhook.

#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use ride_sync::Config;
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";
pub const SCOOTER_ID: &str = "b7f3c1d2";

#[derive(Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: String,
}

impl Canned {
    pub fn json(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: value.to_string(),
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    fn respond(&self) -> Response {
        (self.status, [(header::CONTENT_TYPE, "application/json")], self.body.clone()).into_response()
    }
}

/// One recorded call: the route name and its query parameters.
#[derive(Debug, Clone)]
pub struct Hit {
    pub route: &'static str,
    pub query: HashMap<String, String>,
}

#[derive(Clone)]
pub struct FakeServices {
    pub triplogs: Arc<Mutex<Canned>>,
    pub rides: Arc<Mutex<Canned>>,
    pub known_ids: Arc<Mutex<Canned>>,
    /// Zero-based indices of pushes answered with a 500.
    pub failing_pushes: Arc<Mutex<HashSet<usize>>>,
    pub hits: Arc<Mutex<Vec<Hit>>>,
    pub pushes: Arc<Mutex<Vec<Value>>>,
}

impl FakeServices {
    pub fn new(rides: Value, known_ids: Value) -> Self {
        Self {
            triplogs: Arc::new(Mutex::new(Canned::json(json!([
                {"id": 991, "start_time_tz": "2026-10-17T08:00:00+05:30", "scooter": {"display_id": "S-450X2201", "model": "450X"}}
            ])))),
            rides: Arc::new(Mutex::new(Canned::json(json!({"data": {"trips": rides}})))),
            known_ids: Arc::new(Mutex::new(Canned::json(known_ids))),
            failing_pushes: Arc::new(Mutex::new(HashSet::new())),
            hits: Arc::new(Mutex::new(Vec::new())),
            pushes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn hits(&self, route: &str) -> Vec<Hit> {
        self.hits.lock().unwrap().iter().filter(|hit| hit.route == route).cloned().collect()
    }

    pub fn pushes(&self) -> Vec<Value> {
        self.pushes.lock().unwrap().clone()
    }

    fn record(&self, route: &'static str, query: HashMap<String, String>) {
        self.hits.lock().unwrap().push(Hit { route, query });
    }

    /// Serves the fakes on a random local port and returns the matching config.
    pub async fn start(&self) -> Config {
        let app = Router::new()
            .route("/api/v1/triplogs", get(triplogs))
            .route("/api/v1/rides", get(rides))
            .route("/exec", get(known_ids).post(push))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut config = Config::new(SCOOTER_ID.into(), TOKEN.into(), format!("http://{addr}/exec"));
        config.api_base_url = format!("http://{addr}/api/v1");
        config
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TOKEN}"))
}

async fn triplogs(State(state): State<FakeServices>, headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Response {
    state.record("triplogs", query);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.triplogs.lock().unwrap().respond()
}

async fn rides(State(state): State<FakeServices>, headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Response {
    state.record("rides", query);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.rides.lock().unwrap().respond()
}

async fn known_ids(State(state): State<FakeServices>, Query(query): Query<HashMap<String, String>>) -> Response {
    let wants_ids = query.get("getids").is_some_and(|value| value == "true");
    state.record("getids", query);
    if !wants_ids {
        return StatusCode::BAD_REQUEST.into_response();
    }
    state.known_ids.lock().unwrap().respond()
}

async fn push(State(state): State<FakeServices>, Json(body): Json<Value>) -> Response {
    state.record("push", HashMap::new());
    let index = {
        let mut pushes = state.pushes.lock().unwrap();
        pushes.push(body);
        pushes.len() - 1
    };

    if state.failing_pushes.lock().unwrap().contains(&index) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "sheet is locked").into_response();
    }
    (StatusCode::OK, "Success").into_response()
}

pub fn ride(id: i64) -> Value {
    json!({
        "ride_id": id,
        "ride_start_time": format!("2026-10-{:02}T09:15:00+05:30", (id % 28) + 1),
        "distance_km": id as f64 * 1.5,
        "ride_mode": {"name": "Warp", "efficiency_wh_km": 21},
        "start_location": "Koramangala, Bengaluru",
    })
}

pub fn rides_with_ids(ids: impl IntoIterator<Item = i64>) -> Value {
    Value::Array(ids.into_iter().map(ride).collect())
}
