//! Tests for command dispatch.

use super::*;
use crate::cli::LogArgs;
use crate::test_support::{DirGuard, create_workspace};
use clap::Parser;
use edict::error::EdictError;
use edict::events::{EventAction, read_events};
use edict::exit_codes;
use serial_test::serial;
use std::fs;

const DEFINITION: &str = r#"
libraries:
  gates:
    - include: builtin:quality-gates
commands:
  task:validate:
    store:
      - name: TASK
        description: The task under validation.
    steps:
      - include: gates
      - guideline: workflow
        goal: Validate {$TASK}.
        phases:
          - Read {$TASK}.
          - verify: [tests pass]
  review:
    steps:
      - rule: be-brief
        severity: low
        text: Keep it short.
"#;

fn run(args: &[&str], cwd: &Path) -> Result<()> {
    let mut argv = vec!["edict"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    dispatch_in(cli, cwd)
}

#[test]
fn render_writes_one_document_per_command() {
    let temp = create_workspace(DEFINITION);

    run(&["render", "defs.yaml"], temp.path()).unwrap();

    let out = temp.path().join("out");
    let validate = fs::read_to_string(out.join("task-validate.md")).unwrap();
    let review = fs::read_to_string(out.join("review.md")).unwrap();

    assert!(validate.starts_with("=== RULES: CRITICAL ===\n- [tests-pass]"));
    assert!(validate.contains("GOAL: Validate {TASK}."));
    assert!(review.contains("- [be-brief] Keep it short."));
}

#[test]
fn render_single_command_into_custom_dir() {
    let temp = create_workspace(DEFINITION);

    run(
        &["render", "defs.yaml", "--command", "review", "--out", "docs"],
        temp.path(),
    )
    .unwrap();

    assert!(temp.path().join("docs/review.md").is_file());
    assert!(!temp.path().join("docs/task-validate.md").exists());
}

#[test]
fn render_unknown_command_is_user_error() {
    let temp = create_workspace(DEFINITION);

    let err = run(&["render", "defs.yaml", "-c", "missing"], temp.path()).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn render_is_deterministic_across_runs() {
    let temp = create_workspace(DEFINITION);
    let path = temp.path().join("out/task-validate.md");

    run(&["render", "defs.yaml"], temp.path()).unwrap();
    let first = fs::read_to_string(&path).unwrap();
    run(&["render", "defs.yaml"], temp.path()).unwrap();
    let second = fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn render_collision_fails_but_other_commands_still_render() {
    let temp = create_workspace(
        r#"
commands:
  broken:
    steps:
      - include: builtin:quality-gates
      - include: builtin:quality-gates
  fine:
    steps:
      - rule: ok
        text: Fine.
"#,
    );

    let err = run(&["render", "defs.yaml"], temp.path()).unwrap_err();
    assert!(matches!(err, EdictError::DefinitionError(_)));
    assert_eq!(err.exit_code(), exit_codes::DEFINITION_FAILURE);
    assert!(temp.path().join("out/fine.md").is_file());
    assert!(!temp.path().join("out/broken.md").exists());
}

#[test]
fn overwrite_policy_from_config_allows_repeated_includes() {
    let temp = create_workspace(
        r#"
commands:
  twice:
    steps:
      - include: builtin:quality-gates
      - include: builtin:quality-gates
"#,
    );
    fs::write(
        temp.path().join("edict.yaml"),
        "collision_policy: overwrite\n",
    )
    .unwrap();

    run(&["render", "defs.yaml"], temp.path()).unwrap();
    assert!(temp.path().join("out/twice.md").is_file());
}

#[test]
fn strict_unresolved_writes_document_then_fails() {
    let temp = create_workspace(
        r#"
commands:
  dangling:
    steps:
      - rule: uses-missing
        text: Send it to {$NOWHERE}.
"#,
    );
    fs::write(temp.path().join("edict.yaml"), "fail_on_unresolved: true\n").unwrap();

    let err = run(&["render", "defs.yaml"], temp.path()).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::LINT_FAILURE);

    let doc = fs::read_to_string(temp.path().join("out/dangling.md")).unwrap();
    assert!(doc.contains("{NOWHERE?unresolved}"));
}

#[test]
fn unresolved_is_only_a_warning_by_default() {
    let temp = create_workspace(
        r#"
commands:
  dangling:
    steps:
      - rule: uses-missing
        text: Send it to {$NOWHERE}.
"#,
    );

    run(&["render", "defs.yaml"], temp.path()).unwrap();
    run(&["lint", "defs.yaml"], temp.path()).unwrap();
}

#[test]
fn lint_reports_collisions_as_definition_failure() {
    let temp = create_workspace(
        r#"
commands:
  broken:
    steps:
      - rule: dup
        text: One.
      - rule: dup
        text: Two.
"#,
    );

    let err = run(&["lint", "defs.yaml", "--json"], temp.path()).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::DEFINITION_FAILURE);
    assert!(!temp.path().join("out").exists());
}

#[test]
fn events_log_records_compiles_and_lints() {
    let temp = create_workspace(DEFINITION);
    fs::write(
        temp.path().join("edict.yaml"),
        "events_log: logs/events.ndjson\n",
    )
    .unwrap();

    run(&["render", "defs.yaml"], temp.path()).unwrap();
    run(&["lint", "defs.yaml"], temp.path()).unwrap();

    let events = read_events(&temp.path().join("logs/events.ndjson")).unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(
        events
            .iter()
            .filter(|e| e.action == EventAction::Compile)
            .count(),
        2
    );
    // Commands compile in name order.
    assert_eq!(events[0].command.as_deref(), Some("review"));
    assert_eq!(events[1].command.as_deref(), Some("task:validate"));
}

#[test]
fn log_reads_back_recorded_events() {
    let temp = create_workspace(DEFINITION);
    fs::write(
        temp.path().join("edict.yaml"),
        "events_log: logs/events.ndjson\n",
    )
    .unwrap();

    run(&["log"], temp.path()).unwrap();
    run(&["render", "defs.yaml"], temp.path()).unwrap();
    run(&["log", "--command", "review", "-n", "1"], temp.path()).unwrap();

    let events = read_events(&temp.path().join("logs/events.ndjson")).unwrap();
    let args = LogArgs {
        command: Some("task:validate".to_string()),
        limit: None,
    };
    let selected = log::select_events(events.clone(), &args);
    assert_eq!(selected.len(), 1);
    assert!(log::format_event(&selected[0]).contains("compile  task:validate"));

    let newest = log::select_events(
        events,
        &LogArgs {
            command: None,
            limit: Some(1),
        },
    );
    assert_eq!(newest.len(), 1);
    assert_eq!(newest[0].command.as_deref(), Some("task:validate"));
}

#[test]
fn log_without_configured_audit_log_is_user_error() {
    let temp = create_workspace(DEFINITION);
    let err = run(&["log"], temp.path()).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn explicit_config_must_exist() {
    let temp = create_workspace(DEFINITION);

    let err = run(
        &["--config", "nope.yaml", "list", "defs.yaml"],
        temp.path(),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn list_includes_file_and_builtin_libraries() {
    let file = edict::definition::DefinitionFile::from_yaml(DEFINITION).unwrap();
    let listing = list::format_listing(&file);

    assert!(listing.contains("  review (1 step(s))"));
    assert!(listing.contains("  task:validate (2 step(s))"));
    assert!(listing.contains("  gates (1 step(s))"));
    assert!(listing.contains("  builtin:quality-gates"));
    assert!(listing.contains("  builtin:error-handling"));
}

#[test]
fn scan_flags_unresolved_tokens_in_rendered_output() {
    let temp = create_workspace(
        r#"
commands:
  dangling:
    steps:
      - rule: uses-missing
        text: Send it to {$NOWHERE}.
  clean:
    steps:
      - rule: ok
        text: Fine.
"#,
    );

    run(&["render", "defs.yaml"], temp.path()).unwrap();

    let err = run(&["scan", "out"], temp.path()).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::LINT_FAILURE);

    run(&["scan", "out", "--globs", "clean.md"], temp.path()).unwrap();
}

#[test]
fn document_file_stem_replaces_separators() {
    assert_eq!(render::document_file_stem("task:validate"), "task-validate");
    assert_eq!(render::document_file_stem("a/b c"), "a-b-c");
    assert_eq!(render::document_file_stem("plain_name-1.x"), "plain_name-1.x");
}

#[test]
#[serial]
fn dispatch_discovers_config_in_current_directory() {
    let temp = create_workspace(DEFINITION);
    fs::write(temp.path().join("edict.yaml"), "output_dir: rendered\n").unwrap();
    let _guard = DirGuard::new(temp.path());

    let cli = Cli::try_parse_from(["edict", "render", "defs.yaml", "-c", "review"]).unwrap();
    dispatch(cli).unwrap();

    assert!(temp.path().join("rendered/review.md").is_file());
}
