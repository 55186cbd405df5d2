#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use forkscount::{ForksService, Project};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// The five projects used by the summary examples.
pub fn five_projects() -> Vec<Project> {
    vec![
        Project::new("hcs_utils", 1),
        Project::new("K", 1),
        Project::new("Heroes of Wesnoth", 5),
        Project::new("Leiningen", 1),
        Project::new("TearDownWalls", 5),
    ]
}

/// A request as seen by the fake GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

/// What the fake GraphQL endpoint answers with.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: Value,
    pub delay: Duration,
}

impl Canned {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone)]
struct FakeState {
    canned: Canned,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

pub struct FakeGraphql {
    pub url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FakeGraphql {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// Start a local stand-in for the GraphQL endpoint on an ephemeral port.
pub async fn spawn_fake_graphql(canned: Canned) -> FakeGraphql {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = FakeState {
        canned,
        seen: Arc::clone(&seen),
    };

    let app = Router::new()
        .route("/graphql", post(answer))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeGraphql {
        url: format!("http://{}/graphql", addr),
        seen,
    }
}

async fn answer(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    state
        .seen
        .lock()
        .unwrap()
        .push(SeenRequest { authorization, body });

    tokio::time::sleep(state.canned.delay).await;
    (state.canned.status, Json(state.canned.body.clone())).into_response()
}

/// Serve `service` on an ephemeral port and return its base URL.
pub async fn spawn_service(service: ForksService) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(service.serve(listener, std::future::pending()));
    format!("http://{}", addr)
}
