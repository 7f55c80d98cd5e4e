//! Config and keymap files on disk

use std::io::Write;

use gridpilot::config::{ConfigError, GridConfig};
use gridpilot::keymap::{
    load_keymap_file, merge_bindings, parse_keymap_yaml, Command, KeyAction, KeyContext, Keymap,
    KeymapError, Keystroke,
};
use gridpilot::model::{CommitAction, Rectangularity};

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "instructions: Fill in the blanks.\nrectangularity: per_batch\nreplace_labels:\n  pre_commit: Swap?\n  post_commit: Swapped"
    )
    .unwrap();

    let config = GridConfig::load_from(file.path()).unwrap();
    assert_eq!(config.instructions, "Fill in the blanks.");
    assert_eq!(config.rectangularity, Rectangularity::PerBatch);
    assert_eq!(config.labels_for(CommitAction::Replace).pre_commit, "Swap?");
    assert_eq!(
        config.labels_for(CommitAction::Append).pre_commit,
        "Append rows"
    );
}

#[test]
fn test_broken_config_reports_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "rectangularity: [not, a, policy]").unwrap();

    let err = GridConfig::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("Failed to parse config"));
}

#[test]
fn test_user_keymap_unbinds_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    std::fs::write(
        &path,
        "bindings:\n  - key: \"cmd+k\"\n    command: Unbound\n  - key: \"alt+enter\"\n    command: AcceptSuggestion\n",
    )
    .unwrap();

    let defaults = parse_keymap_yaml(gridpilot::keymap::get_default_keymap_yaml()).unwrap();
    let user = load_keymap_file(&path).unwrap();
    let keymap = Keymap::with_bindings(merge_bindings(defaults, user));
    let ctx = KeyContext::default();

    let cmd_k: Keystroke = "cmd+k".parse().unwrap();
    let alt_enter: Keystroke = "alt+enter".parse().unwrap();
    assert_eq!(
        keymap.handle_keystroke_with_context(cmd_k, Some(&ctx)),
        KeyAction::NoMatch
    );
    assert_eq!(
        keymap.handle_keystroke_with_context(alt_enter, Some(&ctx)),
        KeyAction::Execute(Command::AcceptSuggestion)
    );
}

#[test]
fn test_missing_keymap_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_keymap_file(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, KeymapError::IoError(_)));
}
