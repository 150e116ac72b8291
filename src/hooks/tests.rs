use super::*;

const SAMPLE: &str = r#"
default_stages: [pre-commit]
repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v5.0.0
    hooks:
      - id: trailing-whitespace
      - id: end-of-file-fixer
  - repo: https://github.com/asottile/add-trailing-comma
    rev: v3.1.0
    hooks:
      - id: add-trailing-comma
  - repo: https://github.com/asottile/pyupgrade
    rev: v3.19.1
    hooks:
      - id: pyupgrade
        args: [--py39-plus]
  - repo: https://github.com/astral-sh/ruff-pre-commit
    rev: v0.9.4
    hooks:
      - id: ruff
        args: [--fix]
      - id: ruff-format
  - repo: https://github.com/pre-commit/mirrors-mypy
    rev: v1.14.1
    hooks:
      - id: mypy
        additional_dependencies: [types-requests]
"#;

fn kinds(findings: &[Finding]) -> Vec<&FindingKind> {
    findings.iter().map(|f| &f.kind).collect()
}

#[test]
fn test_parses_repository_blocks() {
    let config = PreCommitConfig::from_yaml(SAMPLE).unwrap();

    assert_eq!(config.repos.len(), 5);
    assert_eq!(config.hook_count(), 7);
    assert_eq!(config.repos[2].rev.as_deref(), Some("v3.19.1"));
    assert_eq!(config.repos[2].hooks[0].args, vec!["--py39-plus"]);
    assert!(config.options.contains_key("default_stages"));
}

#[test]
fn test_unknown_hook_options_are_kept() {
    let config = PreCommitConfig::from_yaml(SAMPLE).unwrap();
    let mypy = &config.repos[4].hooks[0];

    assert_eq!(mypy.id, "mypy");
    assert_eq!(
        mypy.options["additional_dependencies"],
        serde_json::json!(["types-requests"])
    );
}

#[test]
fn test_registrations_follow_execution_order() {
    let config = PreCommitConfig::from_yaml(SAMPLE).unwrap();
    let registrations = config.registrations();

    let ids: Vec<_> = registrations.iter().map(|r| r.id).collect();
    assert_eq!(
        ids,
        vec![
            "trailing-whitespace",
            "end-of-file-fixer",
            "add-trailing-comma",
            "pyupgrade",
            "ruff",
            "ruff-format",
            "mypy",
        ]
    );
    assert_eq!(registrations[4].position, 5);
    assert_eq!(registrations[4].repo, "https://github.com/astral-sh/ruff-pre-commit");
    assert_eq!(registrations[4].rev, Some("v0.9.4"));
    assert_eq!(registrations[4].args, ["--fix".to_string()]);
}

#[test]
fn test_well_formed_config_has_no_findings() {
    let config = PreCommitConfig::from_yaml(SAMPLE).unwrap();
    assert!(config.check().is_empty());
}

#[test]
fn test_repository_config_is_well_formed() {
    let config =
        PreCommitConfig::from_yaml(include_str!("../../.pre-commit-config.yaml")).unwrap();
    assert!(config.check().is_empty());

    // One hook per kind: whitespace, end of file, commas, syntax upgrades,
    // lints, formatting, type checking
    let ids: Vec<_> = config.registrations().iter().map(|r| r.id).collect();
    for id in [
        "trailing-whitespace",
        "end-of-file-fixer",
        "trailing-comma",
        "edition-idioms",
        "clippy",
        "fmt",
        "cargo-check",
    ] {
        assert!(ids.contains(&id), "missing hook {id}");
    }

    let local = config.repos.iter().find(|block| block.repo == "local").unwrap();
    assert!(!local.is_remote());
    assert_eq!(
        local.hooks[0].options["entry"],
        "cargo fmt --all -- --config trailing_comma=Vertical"
    );
    assert_eq!(
        local.hooks[1].options["entry"],
        "cargo fix --edition-idioms --allow-dirty --allow-staged"
    );
}

#[test]
fn test_local_repos_need_no_rev() {
    let config = PreCommitConfig::from_yaml(
        r#"
repos:
  - repo: local
    hooks:
      - id: zig-deps
        name: zig-deps
        entry: zig-deps --fail-on-outdated
        language: system
        pass_filenames: false
"#,
    )
    .unwrap();

    assert!(!config.repos[0].is_remote());
    assert!(config.check().is_empty());
}

#[test]
fn test_missing_rev_is_an_error() {
    let config = PreCommitConfig::from_yaml(
        "repos:\n  - repo: https://github.com/pre-commit/pre-commit-hooks\n    hooks:\n      - id: check-yaml\n",
    )
    .unwrap();

    let findings = config.check();
    assert_eq!(findings.len(), 1);
    assert!(findings[0].is_error());
    assert_eq!(findings[0].location, "repos[0]");
    assert!(matches!(findings[0].kind, FindingKind::MissingRev { .. }));
}

#[test]
fn test_conflicting_and_duplicate_hooks_are_warnings() {
    let config = PreCommitConfig::from_yaml(
        r#"
repos:
  - repo: https://github.com/astral-sh/ruff-pre-commit
    rev: v0.9.4
    hooks:
      - id: ruff
        args: [--fix]
      - id: ruff
        args: [--fix]
      - id: ruff
        args: [--no-fix]
"#,
    )
    .unwrap();

    let findings = config.check();
    assert_eq!(findings.len(), 2);
    assert!(findings.iter().all(|f| f.severity == Severity::Warning));
    assert!(matches!(findings[0].kind, FindingKind::DuplicateHook { .. }));
    assert!(matches!(findings[1].kind, FindingKind::ConflictingArgs { .. }));
    assert_eq!(
        findings[1].to_string(),
        "repos[0].hooks[2]: 'ruff' from https://github.com/astral-sh/ruff-pre-commit is configured at repos[0].hooks[0] with different args"
    );
}

#[test]
fn test_same_hook_id_from_different_repos_is_fine() {
    let config = PreCommitConfig::from_yaml(
        r#"
repos:
  - repo: https://github.com/a/hooks
    rev: v1
    hooks: [{ id: lint }]
  - repo: https://github.com/b/hooks
    rev: v2
    hooks: [{ id: lint, args: [--strict] }]
"#,
    )
    .unwrap();

    assert!(config.check().is_empty());
}

#[test]
fn test_empty_values_are_reported() {
    let config = PreCommitConfig::from_yaml(
        r#"
repos:
  - repo: ""
    rev: v1
    hooks:
      - id: ""
  - repo: https://github.com/a/hooks
    rev: v1
    hooks: []
"#,
    )
    .unwrap();

    let findings = config.check();
    assert_eq!(
        kinds(&findings),
        vec![
            &FindingKind::EmptyRepo,
            &FindingKind::EmptyHookId { repo: String::new() },
            &FindingKind::NoHooks { repo: "https://github.com/a/hooks".to_string() },
        ]
    );
    assert!(findings.iter().all(Finding::is_error));
}

#[test]
fn test_empty_file_has_no_repos() {
    let config = PreCommitConfig::from_yaml("repos: []\n").unwrap();
    let findings = config.check();
    assert_eq!(kinds(&findings), vec![&FindingKind::NoRepos]);
    assert!(!findings[0].is_error());
}

#[test]
fn test_hook_without_id_fails_to_parse() {
    let result = PreCommitConfig::from_yaml(
        "repos:\n  - repo: https://github.com/a/hooks\n    rev: v1\n    hooks:\n      - args: [--x]\n",
    );
    assert!(result.is_err());
}

#[test]
fn test_findings_serialize_with_kind_tag() {
    let finding = Finding::new(
        "repos[0]",
        FindingKind::MissingRev {
            repo: "https://github.com/a/hooks".to_string(),
        },
    );
    let value = serde_json::to_value(&finding).unwrap();

    assert_eq!(value["kind"], "missing_rev");
    assert_eq!(value["severity"], "error");
    assert_eq!(value["repo"], "https://github.com/a/hooks");
}
