//! End-to-end tests driving the CLI entry point.

use clap::Parser;
use dupescan::cli::Cli;
use dupescan::error::ExitCode;
use dupescan::scanner::ScanError;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_run_app_success() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"dup").unwrap();
    fs::write(dir.path().join("b.txt"), b"dup").unwrap();

    let cli = Cli::try_parse_from(["dupescan", dir.path().to_str().unwrap(), "--sort"]).unwrap();

    assert_eq!(dupescan::run_app(cli).unwrap(), ExitCode::Success);
}

#[test]
fn test_run_app_json_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("unique.txt"), b"unique").unwrap();

    let cli = Cli::try_parse_from([
        "dupescan",
        "--path",
        dir.path().to_str().unwrap(),
        "--output",
        "json",
    ])
    .unwrap();

    assert_eq!(dupescan::run_app(cli).unwrap(), ExitCode::Success);
}

#[test]
fn test_run_app_missing_directory_is_general_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    let cli = Cli::try_parse_from(["dupescan", missing.to_str().unwrap()]).unwrap();

    let err = dupescan::run_app(cli).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ScanError>(),
        Some(ScanError::NotFound(_))
    ));
    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
}

#[test]
fn test_run_app_with_config_file() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("x.txt"), b"x").unwrap();
    let config = dir.path().join("dupescan.toml");
    fs::write(&config, "sort_entries = true\noutput = \"json\"\n").unwrap();

    let cli = Cli::try_parse_from([
        "dupescan",
        data.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(dupescan::run_app(cli).unwrap(), ExitCode::Success);
}

#[test]
fn test_run_app_invalid_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("dupescan.toml");
    fs::write(&config, "timeout_secs = \"soon\"\n").unwrap();

    let cli = Cli::try_parse_from([
        "dupescan",
        dir.path().to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();

    let err = dupescan::run_app(cli).unwrap_err();
    assert!(err.to_string().contains("Invalid configuration"));
}

#[test]
fn test_run_app_missing_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("typo.toml");

    let cli = Cli::try_parse_from([
        "dupescan",
        dir.path().to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();

    let err = dupescan::run_app(cli).unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));
    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
}

#[test]
fn test_run_app_print_config_skips_scan() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    let cli = Cli::try_parse_from(["dupescan", missing.to_str().unwrap(), "--print-config"]).unwrap();

    assert_eq!(dupescan::run_app(cli).unwrap(), ExitCode::Success);
}
