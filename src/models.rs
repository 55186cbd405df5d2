use serde::{Deserialize, Serialize};

/// A project record as returned by a project source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "forksCount")]
    pub forks_count: u64,
}

impl Project {
    pub fn new(name: impl Into<String>, forks_count: u64) -> Self {
        Self {
            name: name.into(),
            description: None,
            forks_count,
        }
    }
}

/// Aggregate served by the HTTP API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub names: String,
    #[serde(rename = "forksSum")]
    pub forks_sum: u64,
}
