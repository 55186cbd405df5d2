use crate::cli::{ServiceArgs, SourceKind};
use crate::error::{ForksError, Result};
use crate::graphql::{GraphqlSource, GITLAB_GRAPHQL_ENDPOINT};
use crate::source::{InMemorySource, ProjectSource};
use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_SERVICE_ADDR: &str = "localhost:9000";

/// Service settings after environment and CLI fallbacks are applied.
#[derive(Clone)]
pub struct ServiceConfig {
    pub service_addr: String,
    pub graphql_addr: String,
    pub graphql_token: Option<String>,
    pub source: SourceKind,
    pub request_timeout: Option<Duration>,
    pub log_file: Option<PathBuf>,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("service_addr", &self.service_addr)
            .field("graphql_addr", &self.graphql_addr)
            .field("graphql_token", &self.graphql_token.as_ref().map(|_| "[REDACTED]"))
            .field("source", &self.source)
            .field("request_timeout", &self.request_timeout)
            .field("log_file", &self.log_file)
            .finish()
    }
}

impl ServiceConfig {
    /// Fill in defaults for anything left unset, logging each fallback.
    pub fn resolve(args: ServiceArgs) -> Self {
        let service_addr = non_empty(args.service_addr).unwrap_or_else(|| {
            info!(
                "missing FORKSCOUNT_SERVICE_ADDR, defaulting to {:?}; set it to configure the bind address",
                DEFAULT_SERVICE_ADDR
            );
            DEFAULT_SERVICE_ADDR.to_string()
        });

        let graphql_addr = non_empty(args.graphql_addr).unwrap_or_else(|| {
            info!(
                "missing FORKSCOUNT_GRAPHQL_SERVER_ADDR, defaulting to {:?}; please consider setting it",
                GITLAB_GRAPHQL_ENDPOINT
            );
            GITLAB_GRAPHQL_ENDPOINT.to_string()
        });

        let graphql_token = non_empty(args.graphql_token);
        if graphql_token.is_none() && args.source == SourceKind::Remote {
            warn!("missing FORKSCOUNT_GRAPHQL_TOKEN, graphql queries will be unauthenticated");
        }

        Self {
            service_addr,
            graphql_addr,
            graphql_token,
            source: args.source,
            request_timeout: args
                .request_timeout_ms
                .filter(|&ms| ms > 0)
                .map(Duration::from_millis),
            log_file: args.log_file,
        }
    }

    pub fn project_source(&self) -> Result<ProjectSource> {
        let source = match self.source {
            SourceKind::Fixture => InMemorySource::default().into(),
            SourceKind::Remote => {
                GraphqlSource::new(self.graphql_addr.clone(), self.graphql_token.clone())?.into()
            }
        };

        Ok(source)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Install the global tracing subscriber, writing to `log_file` when given
/// and to stderr otherwise.
pub fn setup_tracing(log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,forkscount=debug"));

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => {
            let enable_color = std::io::IsTerminal::is_terminal(&std::io::stderr());
            builder
                .with_ansi(enable_color)
                .with_writer(std::io::stderr)
                .try_init()
        }
    };

    installed.map_err(|e| ForksError::ConfigError(format!("failed to install logger: {}", e)))
}
