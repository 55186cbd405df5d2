use crate::models::Project;
use serde::{Deserialize, Serialize};

// GraphQL wire structures
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: LastProjectsVariables,
}

#[derive(Debug, Serialize)]
pub struct LastProjectsVariables {
    pub n: usize,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LastProjectsData {
    pub projects: Option<ProjectConnection>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectConnection {
    pub nodes: Option<Vec<Project>>,
}
