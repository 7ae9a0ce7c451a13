use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tempfile::{tempdir, NamedTempFile};

use kigo::cli::{CliArgs, CliCommand};
use kigo::config::defaults::{available_tags, find_default, parse_catalog};
use kigo::config::{
    create_default_config, load_and_validate, load_from_path, WatchConfig, BUILTIN_CATALOG,
    DEFAULT_FILES_PLACEHOLDER,
};
use kigo::errors::KigoError;
use kigo::types::HashErrorPolicy;
use kigo_test_utils::builders::WatchConfigBuilder;

type TestResult = Result<(), Box<dyn Error>>;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_is_loaded_and_compiled() -> TestResult {
    let file = config_file(
        r#"
root_path = "src"
include_patterns = ["*.go"]
exclude_patterns = ["*.git*"]
delimiter = "-----"
interval = 3
files_placeholder = "{files}"
on_hash_error = "skip"
commands = ["gofmt -w {files}", "go test ./..."]
"#,
    );

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.root, PathBuf::from("src"));
    assert_eq!(cfg.include.sources(), vec!["*.go".to_string()]);
    assert!(cfg.include.matches("cmd/main.go"));
    assert!(cfg.exclude.matches(".git/config"));
    assert_eq!(cfg.delimiter, "-----");
    assert_eq!(cfg.interval, Duration::from_secs(3));
    assert_eq!(cfg.placeholder, "{files}");
    assert_eq!(cfg.on_hash_error, HashErrorPolicy::Skip);
    assert_eq!(cfg.commands.len(), 2);
    Ok(())
}

#[test]
fn unknown_field_is_rejected() {
    let file = config_file(
        r#"
root_path = "."
include_patterns = ["*.go"]
comands = ["typo"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(KigoError::ConfigError(msg)) => {
            assert!(msg.contains("unknown field"), "{msg}");
            assert!(msg.contains("comands"), "{msg}");
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn missing_fields_take_defaults() -> TestResult {
    let file = config_file(r#"include_patterns = ["*.txt"]"#);

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.root, PathBuf::from("."));
    assert_eq!(cfg.placeholder, DEFAULT_FILES_PLACEHOLDER);
    assert_eq!(cfg.interval, Duration::from_secs(1));
    assert_eq!(cfg.on_hash_error, HashErrorPolicy::Abort);
    assert!(cfg.commands.is_empty());
    Ok(())
}

#[test]
fn empty_placeholder_falls_back_to_default() {
    let cfg = WatchConfigBuilder::new(".").placeholder("").build();
    assert_eq!(cfg.placeholder, "<files>");
}

#[test]
fn interval_is_clamped_to_one_second() {
    for secs in [-5, 0, 1] {
        let cfg = WatchConfigBuilder::new(".").interval(secs).build();
        assert_eq!(cfg.interval, Duration::from_secs(1), "interval {secs}");
    }
    let cfg = WatchConfigBuilder::new(".").interval(7).build();
    assert_eq!(cfg.interval, Duration::from_secs(7));
}

#[test]
fn blank_command_is_a_config_error() {
    let raw = WatchConfigBuilder::new(".").command("echo ok").command("   ").raw();

    match WatchConfig::try_from(raw) {
        Err(KigoError::ConfigError(msg)) => assert!(msg.contains("commands[1]"), "{msg}"),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn empty_root_is_a_config_error() {
    let raw = WatchConfigBuilder::new("").raw();
    assert!(matches!(
        WatchConfig::try_from(raw),
        Err(KigoError::ConfigError(_))
    ));
}

#[test]
fn missing_config_file_names_the_path() {
    match load_from_path("/definitely/not/Kigo.toml") {
        Err(KigoError::ConfigError(msg)) => assert!(msg.contains("/definitely/not/Kigo.toml")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn written_default_config_loads_back_equivalent() -> TestResult {
    let dir = tempdir()?;
    let out = dir.path().join("Kigo.toml");

    create_default_config(BUILTIN_CATALOG, "go", &out)?;

    let catalog = parse_catalog(BUILTIN_CATALOG)?;
    let expected_raw = find_default(&catalog, "go")?.clone();

    assert_eq!(load_from_path(&out)?, expected_raw);
    assert_eq!(load_and_validate(&out)?, WatchConfig::try_from(expected_raw)?);
    Ok(())
}

#[test]
fn every_builtin_default_is_valid() -> TestResult {
    let dir = tempdir()?;
    let tags = available_tags(BUILTIN_CATALOG)?;
    assert!(tags.contains(&"go".to_string()));
    assert!(tags.contains(&"rust".to_string()));

    for tag in tags {
        let out = dir.path().join(format!("{tag}.toml"));
        create_default_config(BUILTIN_CATALOG, &tag, &out)?;
        let cfg = load_and_validate(&out)?;
        assert!(!cfg.include.is_empty(), "{tag} watches nothing");
        assert!(!cfg.commands.is_empty(), "{tag} runs nothing");
    }
    Ok(())
}

#[test]
fn unknown_tag_is_an_error_and_writes_nothing() -> TestResult {
    let dir = tempdir()?;
    let out = dir.path().join("Kigo.toml");

    match create_default_config(BUILTIN_CATALOG, "cobol", &out) {
        Err(KigoError::UnknownTag(tag)) => assert_eq!(tag, "cobol"),
        other => panic!("expected UnknownTag, got {other:?}"),
    }
    assert!(!out.exists());
    Ok(())
}

#[test]
fn catalog_rejects_unknown_fields() {
    let src = r#"
[[defaults]]
tag = "x"
colour = "red"

[defaults.configuration]
include_patterns = ["*"]
"#;
    assert!(matches!(parse_catalog(src), Err(KigoError::TomlError(_))));
}

#[test]
fn cli_parses_both_subcommands() {
    let args = CliArgs::try_parse_from(["kigo", "run", "--config", "conf/Kigo.toml"]).unwrap();
    match args.command {
        CliCommand::Run { config, dry_run } => {
            assert_eq!(config, PathBuf::from("conf/Kigo.toml"));
            assert!(!dry_run);
        }
        other => panic!("expected run, got {other:?}"),
    }

    let args = CliArgs::try_parse_from(["kigo", "create", "-t", "rust"]).unwrap();
    match args.command {
        CliCommand::Create { tag, out } => {
            assert_eq!(tag, "rust");
            assert_eq!(out, PathBuf::from("Kigo.toml"));
        }
        other => panic!("expected create, got {other:?}"),
    }

    assert!(CliArgs::try_parse_from(["kigo", "create"]).is_err());
}
