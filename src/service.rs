use crate::aggregate::latest_summary;
use crate::context::{ContextError, FetchContext};
use crate::error::{ForksError, Result};
use crate::source::ProjectSource;
use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, info_span, Span};

pub const DEFAULT_COUNT: usize = 5;
pub const MAX_COUNT: usize = 100;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<ProjectSource>,
    pub request_timeout: Option<Duration>,
}

impl AppState {
    fn request_context(&self) -> FetchContext {
        match self.request_timeout {
            Some(timeout) => FetchContext::with_timeout(timeout),
            None => FetchContext::background(),
        }
    }
}

/// The forks summary HTTP service.
///
/// Owns its route table and its tracing span; nothing is registered on
/// process-wide state, so several services can run side by side.
pub struct ForksService {
    state: AppState,
    span: Span,
}

impl ForksService {
    pub fn new(source: ProjectSource) -> Self {
        let span = info_span!("service", source = source.kind());

        Self {
            state: AppState {
                source: Arc::new(source),
                request_timeout: None,
            },
            span,
        }
    }

    /// Bound every fetch by `timeout`. `None` leaves fetches unbounded.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.state.request_timeout = timeout;
        self
    }

    pub fn router(&self) -> Router {
        let parent = self.span.clone();

        Router::new()
            .route("/", get(latest_projects))
            .layer(TraceLayer::new_for_http().make_span_with(move |req: &Request<Body>| {
                info_span!(
                    parent: &parent,
                    "request",
                    method = %req.method(),
                    uri = %req.uri()
                )
            }))
            .with_state(self.state.clone())
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!(parent: &self.span, "forkscount service listening on http://{}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!(parent: &self.span, "service stopped");
        Ok(())
    }
}

/// `GET /?n=<count>`
async fn latest_projects(State(state): State<AppState>, uri: Uri) -> Response {
    let count = last_count(uri.query());

    let ctx = state.request_context();
    let _cancel = ctx.cancel_on_drop();

    let summary = match latest_summary(&ctx, &state.source, count).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, count, "failed to fetch latest project(s)");
            return (status_for(&e), e.to_string()).into_response();
        }
    };

    match serde_json::to_vec(&summary) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode summary as json");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Only an expired deadline is a timeout; every other failure, including a
/// canceled context, is internal.
fn status_for(err: &ForksError) -> StatusCode {
    match err {
        ForksError::ContextError(ContextError::DeadlineExceeded) => StatusCode::REQUEST_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Resolve the `n` query parameter into a fetch count.
///
/// Missing, empty, non-numeric or negative values fall back to
/// [`DEFAULT_COUNT`]; the result never exceeds [`MAX_COUNT`].
pub fn last_count(query: Option<&str>) -> usize {
    let raw = query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == "n")
            .map(|(_, value)| value.into_owned())
    });

    let count = match raw.as_deref() {
        None | Some("") => DEFAULT_COUNT,
        Some(value) => match value.parse::<i64>() {
            Ok(n) if n >= 0 => usize::try_from(n).unwrap_or(MAX_COUNT),
            _ => {
                debug!(value, "invalid n parameter, using default {}", DEFAULT_COUNT);
                DEFAULT_COUNT
            }
        },
    };

    count.min(MAX_COUNT)
}
