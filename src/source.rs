use crate::context::FetchContext;
use crate::error::Result;
use crate::graphql::GraphqlSource;
use crate::models::Project;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Where the latest projects come from.
#[derive(Debug, Clone)]
pub enum ProjectSource {
    InMemory(InMemorySource),
    Graphql(GraphqlSource),
}

impl ProjectSource {
    /// Fetch up to `count` of the latest projects, bounded by `ctx`.
    pub async fn fetch(&self, ctx: &FetchContext, count: usize) -> Result<Vec<Project>> {
        match self {
            ProjectSource::InMemory(source) => source.fetch(ctx, count).await,
            ProjectSource::Graphql(source) => source.fetch(ctx, count).await,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProjectSource::InMemory(_) => "fixture",
            ProjectSource::Graphql(_) => "graphql",
        }
    }
}

impl From<InMemorySource> for ProjectSource {
    fn from(source: InMemorySource) -> Self {
        ProjectSource::InMemory(source)
    }
}

impl From<GraphqlSource> for ProjectSource {
    fn from(source: GraphqlSource) -> Self {
        ProjectSource::Graphql(source)
    }
}

/// Deterministic stand-in source serving a fixed list of projects.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    projects: Arc<[Project]>,
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self {
            projects: default_fixtures().into(),
        }
    }
}

impl InMemorySource {
    /// Seed the source with `projects`. An empty list falls back to the
    /// built-in fixtures.
    pub fn new(projects: Vec<Project>) -> Self {
        if projects.is_empty() {
            return Self::default();
        }

        Self {
            projects: projects.into(),
        }
    }

    /// Return the first `min(count, len)` projects.
    ///
    /// The selection runs on its own task and is raced against `ctx`, so an
    /// expired or canceled context fails the fetch instead of returning data.
    pub async fn fetch(&self, ctx: &FetchContext, count: usize) -> Result<Vec<Project>> {
        let projects = Arc::clone(&self.projects);
        run_on_task(ctx, async move {
            let take = count.min(projects.len());
            projects[..take].to_vec()
        })
        .await
    }
}

/// Spawn `work` and race it against `ctx`. The task never outlives the call.
async fn run_on_task<F>(ctx: &FetchContext, work: F) -> Result<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let mut task = AbortOnDrop(tokio::spawn(work));
    Ok(ctx.run(&mut task.0).await??)
}

/// Aborts the wrapped task when the fetch that spawned it goes away.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

pub fn default_fixtures() -> Vec<Project> {
    vec![
        Project::new("Boner project", 0),
        Project::new("grup", 0),
        Project::new("easy", 2),
        Project::new("slothbeast", 4),
        Project::new("sspssptest", 0),
        Project::new("hcs_utils", 1),
        Project::new("K", 1),
        Project::new("Heroes of Wesnoth", 5),
        Project::new("Leiningen", 1),
        Project::new("TearDownWalls", 5),
    ]
}
