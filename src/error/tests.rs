use crate::error::format::format_error_with_color;
use serial_test::serial;
use crate::error::*;

#[test]
fn test_error_context_rate_limit_exceeded() {
    let error = AdoptError::RateLimitExceeded {
        retry_after_seconds: 120,
    };
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.is_some());
    assert!(context.suggestion.unwrap().contains("Wait 120 seconds"));
    assert!(context.details.is_some());
}

#[test]
fn test_error_context_transport_failure_with_cause() {
    let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = AdoptError::transport_with_source("GET https://example.com failed", cause);
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.unwrap().contains("internet connection"));
    assert!(context.details.unwrap().contains("refused"));
}

#[test]
fn test_error_context_transport_failure_without_cause() {
    let error = AdoptError::transport("HTTP 503");
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.is_some());
    assert!(context.details.is_none());
}

#[test]
fn test_error_context_invalid_parameter() {
    let error = AdoptError::invalid_parameter("page", "must not be negative (got -1)");
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.unwrap().contains("'page'"));
    assert_eq!(
        error.to_string(),
        "Invalid parameter 'page': must not be negative (got -1)"
    );
}

#[test]
fn test_error_context_with_custom_suggestion() {
    let error = AdoptError::malformed("https://example.com/variants", "expected array");
    let context =
        ErrorContext::new(&error).with_suggestion("Report this to the API maintainers.".to_string());

    assert_eq!(
        context.suggestion,
        Some("Report this to the API maintainers.".to_string())
    );
}

#[test]
fn test_retry_after_only_for_rate_limit() {
    let throttled = AdoptError::RateLimitExceeded {
        retry_after_seconds: 60,
    };
    assert_eq!(throttled.retry_after(), Some(60));
    assert_eq!(AdoptError::transport("boom").retry_after(), None);
}

#[test]
fn test_transport_failure_keeps_source() {
    use std::error::Error;

    let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
    let error = AdoptError::transport_with_source("request failed", cause);
    let source = error.source().expect("source should be preserved");
    assert_eq!(source.to_string(), "timed out");
}

#[test]
fn test_exit_codes() {
    assert_eq!(
        get_exit_code(&AdoptError::RateLimitExceeded {
            retry_after_seconds: 1
        }),
        75
    );
    assert_eq!(get_exit_code(&AdoptError::transport("x")), 20);
    assert_eq!(get_exit_code(&AdoptError::malformed("t", "m")), 20);
    assert_eq!(
        get_exit_code(&AdoptError::invalid_parameter("page_size", "negative")),
        2
    );
    assert_eq!(get_exit_code(&AdoptError::UnsupportedApiVersion(2)), 2);
}

#[test]
#[serial]
fn test_format_error_chain() {
    let error = AdoptError::UnsupportedApiVersion(2);
    let formatted = format_error_chain(&error);

    assert!(formatted.starts_with("Error: API version 2 is not supported"));
    assert!(formatted.contains("Suggestion: Supported API versions: 1, 3."));
}

#[test]
#[serial]
fn test_format_error_without_color() {
    let error = AdoptError::RateLimitExceeded {
        retry_after_seconds: 30,
    };
    let formatted = format_error_with_color(&error, false);

    assert!(formatted.contains("Error: API rate limit exceeded; retry in 30 seconds"));
    assert!(formatted.contains("Suggestions:"));
    assert!(formatted.contains("• Wait 30 seconds"));
    assert!(!formatted.contains("\x1b["));
}
