//! A stand-in compute endpoint for binary tests. It serves the handful of
//! routes computectl calls and records every request it receives.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub name_filter: Option<String>,
    pub token: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub struct FakeCompute {
    servers: Arc<Vec<Value>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeCompute {
    /// `(id, name)` pairs returned by every server listing, whatever the filter.
    pub fn with_servers(servers: &[(&str, &str)]) -> Self {
        let servers = servers
            .iter()
            .map(|(id, name)| json!({"id": id, "name": name, "status": "ACTIVE"}))
            .collect();
        Self {
            servers: Arc::new(servers),
            requests: Arc::default(),
        }
    }

    /// Binds a free local port and serves on a background thread. Returns the
    /// endpoint URL.
    pub fn start(&self) -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .route("/servers", post(create_server))
            .route("/servers/detail", get(list_servers))
            .route("/servers/:id/action", post(server_action))
            .with_state(self.clone());

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app).await.ok();
            });
        });

        format!("http://{}", addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn record(
        &self,
        path: String,
        name_filter: Option<String>,
        headers: &HeaderMap,
        body: Option<Value>,
    ) {
        let token = headers
            .get("x-auth-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            path,
            name_filter,
            token,
            body,
        });
    }
}

async fn create_server(
    State(fake): State<FakeCompute>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.record("/servers".into(), None, &headers, Some(body.clone()));

    let server = &body["server"];
    if server.get("imageRef").is_none() && server.get("block_device_mapping_v2").is_none() {
        let fault = json!({"badRequest": {"message": "Missing imageRef attribute", "code": 400}});
        return (StatusCode::BAD_REQUEST, Json(fault));
    }

    // Like the real API, the create response carries only id, links and adminPass.
    let created = json!({"server": {"id": "srv-new", "adminPass": "gen-pass", "links": []}});
    (StatusCode::ACCEPTED, Json(created))
}

async fn list_servers(
    State(fake): State<FakeCompute>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    fake.record(
        "/servers/detail".into(),
        query.get("name").cloned(),
        &headers,
        None,
    );
    Json(json!({"servers": fake.servers.as_slice()}))
}

async fn server_action(
    State(fake): State<FakeCompute>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    fake.record(format!("/servers/{}/action", id), None, &headers, Some(body));
    StatusCode::ACCEPTED
}
