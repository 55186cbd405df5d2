pub mod aggregate;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod graphql;
pub mod models;
pub mod service;
pub mod source;
pub mod types;

pub use context::{ContextError, FetchContext};
pub use error::{ForksError, Result};
pub use models::{Project, SummaryResponse};
pub use service::ForksService;
pub use source::{InMemorySource, ProjectSource};
