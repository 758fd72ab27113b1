#![allow(non_snake_case)]

use super::*;

#[test]
fn BrambleError___config_error___returns_code_9() {
    let err = BrambleError::ConfigError("test".into());

    let code = err.error_code();

    assert_eq!(code, 9);
}

#[test]
fn BrambleError___activation_failed___displays_bundle_and_reason() {
    let err = BrambleError::ActivationFailed {
        bundle: "org.example.foo".into(),
        reason: "boom".into(),
    };

    let display = err.to_string();

    assert_eq!(display, "activation of bundle 'org.example.foo' failed: boom");
}

#[test]
fn BrambleError___service_in_use___displays_reference_count() {
    let err = BrambleError::ServiceInUse {
        id: "svc".into(),
        references: 2,
    };

    assert!(err.to_string().contains("2 holder(s)"));
}

#[test]
fn BrambleError___is_activator_failure___only_for_entry_points() {
    let start = BrambleError::ActivationFailed {
        bundle: "a".into(),
        reason: "r".into(),
    };
    let stop = BrambleError::DeactivationFailed {
        bundle: "a".into(),
        reason: "r".into(),
    };
    let other = BrambleError::Internal("x".into());

    assert!(start.is_activator_failure());
    assert!(stop.is_activator_failure());
    assert!(!other.is_activator_failure());
}

#[test]
fn BrambleError___from_toml_error___converts_to_config_error() {
    let toml_err = toml::from_str::<toml::Table>("= broken").unwrap_err();

    let err: BrambleError = toml_err.into();

    assert!(matches!(err, BrambleError::ConfigError(_)));
}

#[test]
fn BrambleError___all_variants___have_unique_codes() {
    let errors = vec![
        BrambleError::InvalidState {
            expected: "a".into(),
            actual: "b".into(),
        },
        BrambleError::ActivationFailed {
            bundle: "a".into(),
            reason: "b".into(),
        },
        BrambleError::DeactivationFailed {
            bundle: "a".into(),
            reason: "b".into(),
        },
        BrambleError::UnknownActivator("a".into()),
        BrambleError::ServiceNotFound("a".into()),
        BrambleError::ServiceTypeMismatch("a".into()),
        BrambleError::DuplicateService("a".into()),
        BrambleError::ServiceInUse {
            id: "a".into(),
            references: 1,
        },
        BrambleError::ConfigError("a".into()),
        BrambleError::Internal("a".into()),
    ];

    let mut codes: Vec<u32> = errors.iter().map(|e| e.error_code()).collect();
    codes.sort_unstable();
    codes.dedup();

    assert_eq!(codes.len(), errors.len());
}
