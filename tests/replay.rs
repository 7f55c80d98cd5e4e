//! End-to-end replay of session scripts

use gridpilot::config::GridConfig;
use gridpilot::keymap::{default_bindings, Keymap};
use gridpilot::replay::{write_csv, ReplayScript};

fn run(source: &str) -> gridpilot::replay::ReplayOutcome {
    ReplayScript::from_yaml_str(source)
        .unwrap()
        .run(
            GridConfig::default(),
            Keymap::with_bindings(default_bindings()),
            false,
        )
        .unwrap()
}

#[test]
fn test_sample_budget_script() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("samples/budget.yaml");
    let outcome = ReplayScript::load(&path)
        .unwrap()
        .run(
            GridConfig::default(),
            Keymap::with_bindings(default_bindings()),
            true,
        )
        .unwrap();

    assert_eq!(outcome.grid.title, "Household budget");
    assert_eq!(
        outcome.grid.values(),
        vec![
            vec!["Item", "Monthly", "Yearly"],
            vec!["Rent", "1200", "14400"],
            vec!["Power", "80", "960"],
            vec!["Groceries", "400", "4800"],
        ]
    );
    assert_eq!(outcome.emitted, 2);
    assert_eq!(outcome.intercepted, 1);

    let mut csv = Vec::new();
    write_csv(&outcome.grid, &mut csv).unwrap();
    assert!(String::from_utf8(csv)
        .unwrap()
        .ends_with("Groceries,400,4800\n"));
}

#[test]
fn test_key_without_suggestion_changes_nothing() {
    let outcome = run("rows: [[a]]\nevents:\n  - key: \"cmd+k\"\n");
    assert_eq!(outcome.grid.values(), vec![vec!["a"]]);
    assert_eq!(outcome.intercepted, 1);
    assert_eq!(outcome.emitted, 0);
}

#[test]
fn test_json_script() {
    let outcome = run(
        r#"{"title": "T", "rows": [{"cells": [{"value": 1}]}],
            "events": [{"grid": {"type": "add_column"}}, {"grid": {"type": "set_title", "title": "U"}}]}"#,
    );
    assert_eq!(outcome.grid.title, "U");
    assert_eq!(outcome.grid.values(), vec![vec!["1", ""]]);
}
