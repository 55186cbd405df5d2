use crate::context::FetchContext;
use crate::error::Result;
use crate::models::{Project, SummaryResponse};
use crate::source::ProjectSource;

/// Collapse projects into one summary.
///
/// Names are joined with a bare `,`; a name that itself contains a comma is
/// indistinguishable from two names.
pub fn summarize(projects: &[Project]) -> SummaryResponse {
    let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
    let forks_sum = projects.iter().map(|p| p.forks_count).sum();

    SummaryResponse {
        names: names.join(","),
        forks_sum,
    }
}

/// Fetch the latest `count` projects from `source` and summarize them.
pub async fn latest_summary(
    ctx: &FetchContext,
    source: &ProjectSource,
    count: usize,
) -> Result<SummaryResponse> {
    let projects = source.fetch(ctx, count).await?;
    Ok(summarize(&projects))
}
