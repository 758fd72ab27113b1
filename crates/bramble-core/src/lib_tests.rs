#![allow(non_snake_case)]

use super::*;

// LogLevel tests

#[test]
fn LogLevel___ordering___trace_less_than_debug() {
    assert!(LogLevel::Trace < LogLevel::Debug);
}

#[test]
fn LogLevel___ordering___warn_less_than_error() {
    assert!(LogLevel::Warn < LogLevel::Error);
}

#[test]
fn LogLevel___ordering___error_less_than_off() {
    assert!(LogLevel::Error < LogLevel::Off);
}

#[test]
fn LogLevel___from_u8___2_returns_info() {
    assert_eq!(LogLevel::from_u8(2), LogLevel::Info);
}

#[test]
fn LogLevel___from_u8___invalid_returns_off() {
    assert_eq!(LogLevel::from_u8(100), LogLevel::Off);
}

#[test]
fn LogLevel___parse___accepts_mixed_case() {
    assert_eq!(LogLevel::parse("Debug"), Some(LogLevel::Debug));
    assert_eq!(LogLevel::parse(" WARN "), Some(LogLevel::Warn));
}

#[test]
fn LogLevel___parse___warning_alias() {
    assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
}

#[test]
fn LogLevel___parse___unknown_returns_none() {
    assert_eq!(LogLevel::parse("verbose"), None);
}

#[test]
fn LogLevel___display___info_shows_uppercase() {
    assert_eq!(LogLevel::Info.to_string(), "INFO");
}

#[test]
fn LogLevel___display___error_shows_uppercase() {
    assert_eq!(LogLevel::Error.to_string(), "ERROR");
}
