use forkscount::error::{ForksError, Result};
use forkscount::ContextError;
use std::error::Error;

#[test]
fn test_error_display() {
    let error = ForksError::ContextError(ContextError::DeadlineExceeded);
    assert_eq!(format!("{}", error), "repository fetch error: context deadline exceeded");

    let error = ForksError::ContextError(ContextError::Canceled);
    assert_eq!(format!("{}", error), "repository fetch error: context canceled");

    let error = ForksError::GraphqlError("bad query".to_string());
    assert_eq!(format!("{}", error), "repository fetch error: graphql: bad query");

    let error = ForksError::HttpStatusError("500 Internal Server Error".to_string());
    assert_eq!(format!("{}", error), "unexpected http status: 500 Internal Server Error");
}

#[test]
fn test_cancellation_classification() {
    assert!(ForksError::ContextError(ContextError::DeadlineExceeded).is_cancellation());
    assert!(ForksError::ContextError(ContextError::Canceled).is_cancellation());
    assert!(!ForksError::GraphqlError("x".to_string()).is_cancellation());
    assert!(!ForksError::ConfigError("x".to_string()).is_cancellation());
}

#[test]
fn test_error_source() {
    let error = ForksError::GraphqlError("oops".to_string());
    assert!(error.source().is_none());

    let error = ForksError::ContextError(ContextError::DeadlineExceeded);
    assert!(error.source().is_some());
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: ForksError = io_error.into();
    assert!(matches!(error, ForksError::IoError(_)));

    let error: ForksError = ContextError::Canceled.into();
    assert!(error.is_cancellation());
}

#[test]
fn test_question_mark_conversions() {
    fn expired() -> Result<()> {
        let outcome: std::result::Result<(), ContextError> = Err(ContextError::DeadlineExceeded);
        outcome?;
        Ok(())
    }

    fn decode(raw: &str) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(raw)?)
    }

    let err = expired().unwrap_err();
    assert!(err.is_cancellation());
    assert_eq!(err.to_string(), "repository fetch error: context deadline exceeded");

    let err = decode("{not json").unwrap_err();
    assert!(matches!(err, ForksError::JsonError(_)));
    assert!(!err.is_cancellation());
    assert!(err.to_string().starts_with("JSON parsing error:"));
}
