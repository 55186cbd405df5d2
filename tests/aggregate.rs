mod common;

use forkscount::aggregate::{latest_summary, summarize};
use forkscount::{FetchContext, InMemorySource, ProjectSource, SummaryResponse};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

#[test]
fn test_summarize_five_projects() {
    let summary = summarize(&common::five_projects());

    assert_eq!(
        summary,
        SummaryResponse {
            names: "hcs_utils,K,Heroes of Wesnoth,Leiningen,TearDownWalls".to_string(),
            forks_sum: 13,
        }
    );
}

#[test]
fn test_summarize_empty() {
    assert_eq!(summarize(&[]), SummaryResponse::default());
}

#[tokio::test]
async fn test_latest_summary_from_source() {
    let source = ProjectSource::from(InMemorySource::new(common::five_projects()));

    let summary = assert_ok!(latest_summary(&FetchContext::background(), &source, 5).await);

    assert_eq!(summary.names, "hcs_utils,K,Heroes of Wesnoth,Leiningen,TearDownWalls");
    assert_eq!(summary.forks_sum, 13);
}

#[tokio::test]
async fn test_latest_summary_default_fixtures() {
    let source = ProjectSource::from(InMemorySource::default());
    let ctx = FetchContext::background();

    let first_five = assert_ok!(latest_summary(&ctx, &source, 5).await);
    assert_eq!(first_five.forks_sum, 6);

    let all = assert_ok!(latest_summary(&ctx, &source, 10).await);
    assert_eq!(all.forks_sum, 19);
}

#[tokio::test]
async fn test_latest_summary_zero_count() {
    let source = ProjectSource::from(InMemorySource::default());

    let summary = assert_ok!(latest_summary(&FetchContext::background(), &source, 0).await);

    assert_eq!(summary, SummaryResponse::default());
}

#[tokio::test]
async fn test_latest_summary_propagates_cancellation() {
    let source = ProjectSource::from(InMemorySource::default());
    let ctx = FetchContext::with_timeout(Duration::ZERO);

    let err = assert_err!(latest_summary(&ctx, &source, 5).await);

    assert!(err.is_cancellation());
}
