use crate::config::*;
use crate::error::{ErrorKind, Result};
use crate::symbols::LabelPolicy;
use std::path::PathBuf;

/// Parse the way `main` does, with usage problems turned into `ErrorKind::Usage`.
fn from_args(args: &[&str]) -> Result<Config> {
    Config::try_from_args(args.iter().copied()).map_err(|e| usage_error(&e))
}

#[test]
fn test_single_positional_argument() {
    let config = from_args(&["mifasm", "prog.s"]).unwrap();
    assert_eq!(config.input, PathBuf::from("prog.s"));
    assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
    assert!(!config.verbose);
    assert!(!config.has_dumps());
    assert_eq!(config.options().label_policy, LabelPolicy::LastWins);
    assert!(!config.options().show_progress);
}

#[test]
fn test_missing_source_path_is_usage_error() {
    let err = from_args(&["mifasm"]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Usage(_)));
    assert!(err.location.is_none());
}

#[test]
fn test_unknown_option_is_usage_error() {
    let err = from_args(&["mifasm", "--bogus", "prog.s"]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Usage(_)));
}

#[test]
fn test_all_options() {
    let config = from_args(&[
        "mifasm",
        "-v",
        "-o",
        "out.mif",
        "--strict-labels",
        "--dump-symbols",
        "--dump-code",
        "prog.s",
    ])
    .unwrap();
    assert_eq!(config.output, PathBuf::from("out.mif"));
    assert!(config.verbose);
    assert!(config.has_dumps());
    assert_eq!(config.options().label_policy, LabelPolicy::Reject);
    assert!(config.options().show_progress);
}

#[test]
fn test_help_is_informational() {
    let err = Config::try_from_args(["mifasm", "--help"]).unwrap_err();
    assert!(is_informational(&err));
    let err = Config::try_from_args(["mifasm"]).unwrap_err();
    assert!(!is_informational(&err));
}
