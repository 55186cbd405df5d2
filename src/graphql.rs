use crate::context::FetchContext;
use crate::error::{ForksError, Result};
use crate::models::Project;
use crate::types::{GraphqlRequest, GraphqlResponse, LastProjectsData, LastProjectsVariables};
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const GITLAB_GRAPHQL_ENDPOINT: &str = "https://gitlab.com/api/graphql";

const LAST_PROJECTS_QUERY: &str = r#"
query last_projects($n: Int) {
  projects(last: $n) {
    nodes {
      name
      description
      forksCount
    }
  }
}
"#;

/// Project source backed by a remote GraphQL endpoint.
#[derive(Clone)]
pub struct GraphqlSource {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl fmt::Debug for GraphqlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphqlSource")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GraphqlSource {
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("forkscount/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GraphqlSource {
            client,
            endpoint: endpoint.into(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Fetch the last `count` projects, in the order the endpoint returns them.
    pub async fn fetch(&self, ctx: &FetchContext, count: usize) -> Result<Vec<Project>> {
        ctx.run(self.query_last_projects(count)).await?
    }

    async fn query_last_projects(&self, count: usize) -> Result<Vec<Project>> {
        let body = GraphqlRequest {
            query: LAST_PROJECTS_QUERY,
            variables: LastProjectsVariables { n: count },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        debug!(endpoint = %self.endpoint, count, "querying last projects");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ForksError::UpstreamError { status, body });
        }

        let payload: GraphqlResponse<LastProjectsData> = response.json().await?;

        if let Some(errors) = payload.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(ForksError::GraphqlError(messages.join("; ")));
        }

        let data = payload
            .data
            .ok_or_else(|| ForksError::GraphqlError("response carried no data".to_string()))?;

        let projects = data
            .projects
            .ok_or_else(|| ForksError::GraphqlError("response carried no projects".to_string()))?;

        Ok(projects.nodes.unwrap_or_default())
    }
}
