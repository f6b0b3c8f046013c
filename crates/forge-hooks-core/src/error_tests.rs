use super::*;
use std::error::Error as _;

#[test]
fn test_unknown_event_message_quotes_raw_identifier() {
    let err = ParseError::UnknownEvent {
        event: "weird event".to_string(),
    };
    assert_eq!(err.to_string(), "unknown event \"weird event\"");
}

#[test]
fn test_auth_failures_are_classified() {
    assert!(ParseError::auth_failed(AuthMethod::HmacSignature).is_auth_failure());
    assert!(ParseError::AuthHeaderMissing {
        header: "X-Hook-UUID"
    }
    .is_auth_failure());
    assert!(!ParseError::NoEventsSpecified.is_auth_failure());
    assert!(!ParseError::UnknownEvent {
        event: "x".to_string()
    }
    .is_auth_failure());
}

#[test]
fn test_auth_failure_message_names_method() {
    let err = ParseError::auth_failed(AuthMethod::HookUuid);
    assert_eq!(err.to_string(), "hook UUID verification failed");
}

#[test]
fn test_decode_error_keeps_json_source() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = ParseError::DecodeError {
        schema: "PushPayload",
        source,
    };

    assert!(err.to_string().contains("PushPayload"));
    assert!(err.source().is_some());
    assert_eq!(err.kind(), "decode_error");
}

#[test]
fn test_empty_body_has_no_source() {
    let err = ParseError::empty_body();
    assert!(err.source().is_none());
    assert_eq!(err.kind(), "empty_or_unreadable_body");
}

#[test]
fn test_config_error_names_provider_and_option() {
    let err = ConfigError::UnsupportedOption {
        provider: ProviderKind::DockerHub,
        option: "secret",
    };
    assert_eq!(
        err.to_string(),
        "option 'secret' is not supported by the docker-hub provider"
    );
}
