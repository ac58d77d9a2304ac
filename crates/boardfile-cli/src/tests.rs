use std::fs;

use boardfile_core::{Locale, ManagerConfig, Mode};
use clap::Parser;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use crate::cli::{ChangeArgs, Cli, Commands, CompletionShell, LocaleArg};
use crate::commands::common::{
    load_existing, parse_fields, prepare_manager, read_raw_files, resolve_config,
};
use crate::commands::completions::{render_completions, run_completions};
use crate::commands::preview::{build_report, format_report_lines};
use crate::error::CliError;

#[test]
fn parse_fields_splits_on_first_equals() {
    let fields = parse_fields(&["title=Hello".to_string(), "query=a=b".to_string()]).unwrap();
    assert_eq!(
        fields,
        vec![
            ("title".to_string(), "Hello".to_string()),
            ("query".to_string(), "a=b".to_string()),
        ]
    );
}

#[test]
fn parse_fields_rejects_missing_name_or_separator() {
    assert!(matches!(
        parse_fields(&["novalue".to_string()]),
        Err(CliError::InvalidField(_))
    ));
    assert!(matches!(
        parse_fields(&[" =x".to_string()]),
        Err(CliError::InvalidField(_))
    ));
}

#[test]
fn read_raw_files_uses_file_name_and_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.png");
    fs::write(&path, vec![0_u8; 100]).unwrap();

    let files = read_raw_files(&[path]).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "a.png");
    assert_eq!(files[0].size(), 100);
}

#[test]
fn read_raw_files_reports_missing_path() {
    let dir = tempdir().unwrap();
    let error = read_raw_files(&[dir.path().join("missing.bin")]).unwrap_err();
    assert!(matches!(error, CliError::ReadFile { .. }));
    assert!(error.to_string().contains("missing.bin"));
}

#[test]
fn load_existing_defaults_to_nothing() {
    let existing = load_existing(None).unwrap();
    assert!(existing.into_items().is_empty());
}

#[test]
fn resolve_config_applies_overrides_on_top_of_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("boardfile.json");
    fs::write(
        &config_path,
        r#"{"action_url": "https://example.com/save", "entity_id": "NOTICE"}"#,
    )
    .unwrap();

    let changes = ChangeArgs {
        locale: Some(LocaleArg::Ko),
        ..ChangeArgs::default()
    };
    let config = resolve_config(
        Some(&config_path),
        &changes,
        Some("https://other.example.com/save".to_string()),
        Some(10),
    )
    .unwrap();

    assert_eq!(
        config.action_url.as_deref(),
        Some("https://other.example.com/save")
    );
    assert_eq!(config.entity_id, "NOTICE");
    assert_eq!(config.locale, Locale::Ko);
    assert_eq!(config.request_timeout_secs, Some(10));
}

#[test]
fn resolve_config_rejects_non_http_url() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("boardfile.json");
    fs::write(&config_path, "{}").unwrap();

    let result = resolve_config(
        Some(&config_path),
        &ChangeArgs::default(),
        Some("ftp://example.com".to_string()),
        None,
    );
    assert!(matches!(result, Err(CliError::Core(_))));
}

#[test]
fn prepared_manager_reflects_picks_and_removals() {
    let dir = tempdir().unwrap();
    let existing_path = dir.path().join("existing.json");
    fs::write(
        &existing_path,
        r#"[{"seq": 7, "name": "b.pdf", "size": 20}, {"seq": 8, "name": "keep.txt", "size": 3}]"#,
    )
    .unwrap();
    let upload_path = dir.path().join("a.png");
    fs::write(&upload_path, vec![1_u8; 100]).unwrap();

    let changes = ChangeArgs {
        existing: Some(existing_path),
        add: vec![upload_path],
        remove: vec!["7".to_string()],
        fields: vec!["title=Hello".to_string()],
        ..ChangeArgs::default()
    };
    let prepared = prepare_manager(ManagerConfig::default(), &changes).unwrap();

    let modes: Vec<Mode> = prepared
        .manager
        .snapshot()
        .iter()
        .map(boardfile_core::AttachmentItem::mode)
        .collect();
    assert_eq!(modes, vec![Mode::Del, Mode::Upd, Mode::Reg]);

    let report = build_report(&prepared);
    let labels: Vec<&str> = report
        .options
        .iter()
        .map(|option| option.label.as_str())
        .collect();
    assert_eq!(labels, vec!["b.pdf (removed)", "keep.txt", "a.png (new)"]);
    assert_eq!(report.uploads.len(), 1);
    assert_eq!(report.uploads[0].name, "a.png");
    assert_eq!(report.remove_keys, vec!["7".to_string()]);
    assert_eq!(
        report.form_fields,
        vec![("title".to_string(), "Hello".to_string())]
    );
}

#[test]
fn same_named_files_from_different_folders_are_both_uploaded() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("x").join("a.png");
    let second = dir.path().join("y").join("a.png");
    for path in [&first, &second] {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![2_u8; 10]).unwrap();
    }

    let changes = ChangeArgs {
        add: vec![first.clone(), second, first],
        ..ChangeArgs::default()
    };
    let prepared = prepare_manager(ManagerConfig::default(), &changes).unwrap();

    let report = build_report(&prepared);
    assert_eq!(report.uploads.len(), 2);
    assert!(report
        .options
        .iter()
        .all(|option| option.label == "a.png (new)"));
}

#[test]
fn report_lines_summarize_changes() {
    let changes = ChangeArgs::default();
    let prepared = prepare_manager(ManagerConfig::default(), &changes).unwrap();
    let lines = format_report_lines(&build_report(&prepared));
    assert_eq!(
        lines,
        vec![
            "No attachments".to_string(),
            "Uploads: 0".to_string(),
            "Removals: none".to_string(),
        ]
    );
}

#[test]
fn cli_parses_repeatable_change_flags() {
    let cli = Cli::try_parse_from([
        "boardfile",
        "submit",
        "--url",
        "https://example.com/save",
        "--add",
        "a.png",
        "--add",
        "b.png",
        "--remove",
        "7",
        "--field",
        "title=Hello",
    ])
    .unwrap();

    let Commands::Submit { changes, url, .. } = cli.command else {
        panic!("expected submit command");
    };
    assert_eq!(url.as_deref(), Some("https://example.com/save"));
    assert_eq!(changes.add.len(), 2);
    assert_eq!(changes.remove, vec!["7".to_string()]);
    assert_eq!(changes.fields, vec!["title=Hello".to_string()]);
}

#[test]
fn completions_mention_binary_name() {
    for shell in [CompletionShell::Bash, CompletionShell::PowerShell] {
        let script = String::from_utf8(render_completions(shell)).unwrap();
        assert!(script.contains("boardfile"));
    }
}

#[test]
fn completions_are_written_under_missing_folders() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("completions").join("boardfile.fish");

    run_completions(CompletionShell::Fish, Some(&path)).unwrap();

    let script = fs::read_to_string(&path).unwrap();
    assert!(script.contains("complete -c boardfile"));
}
