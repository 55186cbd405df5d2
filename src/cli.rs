use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "forkscount")]
#[command(about = "Sums the fork counts of the latest projects from a GraphQL repository listing")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Number of repository projects to fetch
    #[arg(short = 'n', long = "count", default_value_t = 5, allow_negative_numbers = true)]
    pub count: i64,

    /// Time (in units of 100 milliseconds) to wait before the request times out; 0 disables it
    #[arg(short = 't', long = "timeout", default_value_t = 0, allow_negative_numbers = true)]
    pub timeout: i64,

    #[command(flatten)]
    pub service: ServiceArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the service until interrupted
    Serve,
}

/// Settings shared by every mode that starts the service.
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Address the service binds to
    #[arg(long, env = "FORKSCOUNT_SERVICE_ADDR", global = true)]
    pub service_addr: Option<String>,

    /// Remote GraphQL endpoint
    #[arg(long, env = "FORKSCOUNT_GRAPHQL_SERVER_ADDR", global = true)]
    pub graphql_addr: Option<String>,

    /// Bearer token for authenticated GraphQL queries
    #[arg(long, env = "FORKSCOUNT_GRAPHQL_TOKEN", hide_env_values = true, global = true)]
    pub graphql_token: Option<String>,

    /// Which project source backs the service
    #[arg(long, env = "FORKSCOUNT_SOURCE", value_enum, default_value_t = SourceKind::Remote, global = true)]
    pub source: SourceKind,

    /// Server-side deadline for each fetch, in milliseconds; 0 disables it
    #[arg(long, env = "FORKSCOUNT_REQUEST_TIMEOUT_MS", global = true)]
    pub request_timeout_ms: Option<u64>,

    /// Log file (appended to); defaults to stderr
    #[arg(short = 'l', long = "log-file", env = "FORKSCOUNT_LOGGING_ENABLED", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Built-in fixture projects, no network access
    Fixture,
    /// The configured GraphQL endpoint
    Remote,
}
