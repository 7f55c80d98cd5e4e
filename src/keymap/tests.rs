//! Keymap tests against the shipped defaults

use super::*;

fn defaults() -> Keymap {
    Keymap::with_bindings(parse_keymap_yaml(get_default_keymap_yaml()).unwrap())
}

fn focused() -> KeyContext {
    KeyContext {
        cell_active: true,
        suggestion_available: false,
    }
}

#[test]
fn test_embedded_yaml_parses() {
    let bindings = parse_keymap_yaml(get_default_keymap_yaml())
        .expect("Embedded keymap.yaml should parse successfully");

    for command in [
        Command::AcceptSuggestion,
        Command::ClearActiveCell,
        Command::AddRow,
        Command::AddColumn,
    ] {
        assert!(
            bindings.iter().any(|b| b.command == command),
            "missing default binding for {:?}",
            command
        );
    }
}

#[test]
fn test_accept_is_unconditional() {
    let keymap = defaults();
    let cmd_k: Keystroke = "cmd+k".parse().unwrap();
    let ctrl_k: Keystroke = "ctrl+k".parse().unwrap();
    let meta_k: Keystroke = "meta+k".parse().unwrap();

    for ctx in [KeyContext::default(), focused()] {
        for stroke in [cmd_k, ctrl_k, meta_k] {
            assert_eq!(
                keymap.handle_keystroke_with_context(stroke, Some(&ctx)),
                KeyAction::Execute(Command::AcceptSuggestion),
                "{} should accept",
                stroke
            );
        }
    }
}

#[test]
fn test_escape_only_with_active_cell() {
    let keymap = defaults();
    let escape = Keystroke::key(KeyCode::Escape);

    assert_eq!(
        keymap.handle_keystroke_with_context(escape, Some(&KeyContext::default())),
        KeyAction::NoMatch
    );
    assert_eq!(
        keymap.handle_keystroke_with_context(escape, Some(&focused())),
        KeyAction::Execute(Command::ClearActiveCell)
    );
}

#[test]
fn test_plain_k_passes_through() {
    let keymap = defaults();
    assert_eq!(
        keymap.handle_keystroke_with_context(Keystroke::char('k'), Some(&focused())),
        KeyAction::NoMatch
    );
}

#[test]
fn test_grid_shape_bindings() {
    let keymap = defaults();
    let add_row: Keystroke = "cmd+shift+down".parse().unwrap();
    let add_column: Keystroke = "cmd+shift+right".parse().unwrap();

    assert_eq!(keymap.lookup(&add_row), Some(Command::AddRow));
    assert_eq!(keymap.lookup(&add_column), Some(Command::AddColumn));
}

#[test]
fn test_accept_label_uses_platform_notation() {
    let keymap = defaults();
    let label = keymap.display_for(Command::AcceptSuggestion).unwrap();
    assert!(label.ends_with('K'));
}

#[test]
fn test_load_default_keymap_not_empty() {
    assert!(!load_default_keymap().is_empty());
}
