//! Integration tests for the `syl` binary.
//!
//! These tests exercise the full CLI against matrices written to a
//! temporary directory: load → build graph → check → report → exit status.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

// =============================================================================
// Test Fixtures
// =============================================================================

const CLEAN_TOML: &str = r#"
[[sections]]
id = "intro"
title = "Introduction"
ordinal = 1
enables = ["basics"]

[[sections]]
id = "basics"
title = "Basics"
ordinal = 2
depends_on = ["intro"]
enables = ["advanced"]

[[sections]]
id = "advanced"
title = "Advanced Topics"
ordinal = 3
depends_on = ["basics"]
"#;

/// `basics` depends on `intro`, but `intro` forgot to list it.
const ASYMMETRIC_TOML: &str = r#"
[[sections]]
id = "intro"
ordinal = 1

[[sections]]
id = "basics"
ordinal = 2
depends_on = ["intro"]
"#;

const CYCLE_JSON: &str = r#"{"sections": [
    {"id": "a", "ordinal": 1, "depends_on": ["c"], "enables": ["b"]},
    {"id": "b", "ordinal": 2, "depends_on": ["a"], "enables": ["c"]},
    {"id": "c", "ordinal": 3, "depends_on": ["b"], "enables": ["a"]}
]}"#;

const ORPHAN_TOML: &str = r#"
[[sections]]
id = "intro"
enables = ["basics"]

[[sections]]
id = "basics"
depends_on = ["intro"]

[[sections]]
id = "appendix"
"#;

const MARKDOWN: &str = "\
# Course Plan

Some prose before the matrix.

## Section Dependencies Matrix

| # | Section | Title | Depends On | Enables |
|---|---------|-------|------------|---------|
| 1 | intro | Introduction | - | basics, tooling |
| 2 | basics | Basics | intro | advanced |
| 3 | tooling | Tooling | intro | advanced |
| 4 | advanced | Advanced | basics, tooling | None |
";

/// Temporary workspace with an isolated global config.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn write(&self, name: &str, contents: &str) -> &Self {
        self.dir.child(name).write_str(contents).unwrap();
        self
    }

    /// A `syl` command running inside this workspace.
    fn syl(&self) -> Command {
        let mut cmd = Command::cargo_bin("syl").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("SYLLABUS_CONFIG")
            .env_remove("RUST_LOG")
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env("HOME", self.dir.path().join("home"));
        cmd
    }
}

// =============================================================================
// check
// =============================================================================

#[test]
fn clean_matrix_passes() {
    let ws = Workspace::new();
    ws.write("matrix.toml", CLEAN_TOML);

    ws.syl()
        .args(["check", "matrix.toml"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("checked 3 sections, 2 edges"))
        .stdout(predicate::str::contains("teaching order: intro, basics, advanced"))
        .stdout(predicate::str::contains("ok: 0 cycles, 0 errors, 0 warnings"));
}

#[test]
fn symmetry_slip_fails_with_one_issue() {
    let ws = Workspace::new();
    ws.write("matrix.toml", ASYMMETRIC_TOML);

    ws.syl()
        .args(["check", "matrix.toml"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error[missing-enables]"))
        .stdout(predicate::str::contains(
            "'basics' depends on 'intro', but 'intro' does not list 'basics' under enables",
        ))
        .stdout(predicate::str::contains("failed: 0 cycles, 1 error, 0 warnings"));
}

#[test]
fn cycle_fails_and_names_members() {
    let ws = Workspace::new();
    ws.write("matrix.json", CYCLE_JSON);

    ws.syl()
        .args(["check", "matrix.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error[cycle]: a -> b -> c -> a"))
        .stdout(predicate::str::contains("teaching order").not());
}

#[test]
fn warnings_pass_unless_strict() {
    let ws = Workspace::new();
    ws.write("matrix.toml", ORPHAN_TOML);

    ws.syl()
        .args(["check", "matrix.toml"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("warning[orphan-node]"))
        .stdout(predicate::str::contains("'appendix'"));

    ws.syl()
        .args(["check", "matrix.toml", "--strict"])
        .assert()
        .code(1);

    ws.syl()
        .args(["check", "matrix.toml", "--strict", "--allow-orphans"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("orphan-node").not());
}

#[test]
fn single_section_is_clean() {
    let ws = Workspace::new();
    ws.write("matrix.toml", "[[sections]]\nid = \"only\"\n");

    ws.syl()
        .args(["check", "matrix.toml"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("teaching order: only"));
}

#[test]
fn json_report() {
    let ws = Workspace::new();
    ws.write("matrix.toml", ASYMMETRIC_TOML);

    let output = ws
        .syl()
        .args(["check", "matrix.toml", "--format", "json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["ok"], false);
    assert_eq!(report["sections"], 2);
    assert_eq!(report["errors"], 1);
    assert_eq!(report["sequence"], serde_json::json!(["intro", "basics"]));
    assert_eq!(report["sequence_matches_declared"], true);

    let issue = &report["issues"][0];
    assert_eq!(issue["kind"], "missing-enables");
    assert_eq!(issue["severity"], "error");
    assert_eq!(issue["from"], "intro");
    assert_eq!(issue["to"], "basics");
    assert!(issue["id"].as_str().unwrap().starts_with("missing-enables:"));
}

#[test]
fn markdown_matrix() {
    let ws = Workspace::new();
    ws.write("PLAN.md", MARKDOWN);

    ws.syl()
        .args(["check", "PLAN.md"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("checked 4 sections, 4 edges"))
        .stdout(predicate::str::contains(
            "teaching order: intro, basics, tooling, advanced",
        ));
}

#[test]
fn forced_input_format() {
    let ws = Workspace::new();
    ws.write("matrix.txt", CLEAN_TOML);

    ws.syl().args(["check", "matrix.txt"]).assert().code(2);

    ws.syl()
        .args(["check", "matrix.txt", "--input-format", "toml"])
        .assert()
        .code(0);
}

#[test]
fn quiet_text_prints_nothing() {
    let ws = Workspace::new();
    ws.write("matrix.toml", ASYMMETRIC_TOML);

    ws.syl()
        .args(["-q", "check", "matrix.toml"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

// =============================================================================
// malformed input
// =============================================================================

#[test]
fn missing_file_is_malformed() {
    let ws = Workspace::new();

    ws.syl()
        .args(["check", "nope.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn unknown_reference_is_malformed() {
    let ws = Workspace::new();
    ws.write(
        "matrix.toml",
        "[[sections]]\nid = \"intro\"\ndepends_on = [\"ghost\"]\n",
    );

    ws.syl()
        .args(["check", "matrix.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown lesson 'ghost'"));
}

#[test]
fn duplicate_id_is_malformed() {
    let ws = Workspace::new();
    ws.write(
        "matrix.toml",
        "[[sections]]\nid = \"intro\"\n\n[[sections]]\nid = \"intro\"\n",
    );

    ws.syl().args(["check", "matrix.toml"]).assert().code(2);
}

#[test]
fn markdown_row_without_section_is_malformed() {
    let ws = Workspace::new();
    ws.write(
        "PLAN.md",
        "| Section | Depends On |\n|---|---|\n| a | |\n|  | a |\n| b | a |\n",
    );

    ws.syl()
        .args(["check", "PLAN.md"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("row 2: empty section id"));
}

#[test]
fn empty_matrix_prints_no_order_line() {
    let ws = Workspace::new();
    ws.write("matrix.toml", "");

    ws.syl()
        .args(["check", "matrix.toml"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("checked 0 sections, 0 edges"))
        .stdout(predicate::str::contains("teaching order").not());
}

#[test]
fn no_matrix_and_no_config() {
    let ws = Workspace::new();

    ws.syl()
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No matrix given"));
}

// =============================================================================
// order / info
// =============================================================================

#[test]
fn order_lists_sections() {
    let ws = Workspace::new();
    ws.write("matrix.toml", CLEAN_TOML);

    ws.syl()
        .args(["order", "matrix.toml"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("intro  Introduction"))
        .stdout(predicate::str::contains("advanced  Advanced Topics"));
}

#[test]
fn order_fails_on_cycle() {
    let ws = Workspace::new();
    ws.write("matrix.json", CYCLE_JSON);

    ws.syl()
        .args(["order", "matrix.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cycle detected"));
}

#[test]
fn info_shows_neighbours() {
    let ws = Workspace::new();
    ws.write("matrix.toml", CLEAN_TOML);

    let output = ws
        .syl()
        .args(["info", "advanced", "matrix.toml", "--format", "json"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();

    let info: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(info["ordinal"], 3);
    assert_eq!(info["prerequisites"], serde_json::json!(["basics"]));
    assert_eq!(info["all_prerequisites"], serde_json::json!(["intro", "basics"]));
    assert_eq!(info["dependents"], serde_json::json!([]));
}

#[test]
fn info_unknown_section() {
    let ws = Workspace::new();
    ws.write("matrix.toml", CLEAN_TOML);

    ws.syl()
        .args(["info", "ghost", "matrix.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown section 'ghost'"));
}

// =============================================================================
// config
// =============================================================================

#[test]
fn project_config_supplies_matrix() {
    let ws = Workspace::new();
    ws.write("docs/matrix.toml", ORPHAN_TOML);
    ws.write("syllabus.toml", "matrix = \"docs/matrix.toml\"\nstrict = true\n");
    ws.dir.child("chapters").create_dir_all().unwrap();

    // Found from a subdirectory; strict comes from the file.
    ws.syl()
        .current_dir(ws.dir.path().join("chapters"))
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("warning[orphan-node]"));
}

#[test]
fn config_init_then_check() {
    let ws = Workspace::new();
    ws.write("matrix.toml", CLEAN_TOML);

    ws.syl()
        .args(["config", "init", "matrix.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("syllabus.toml"));
    ws.dir
        .child("syllabus.toml")
        .assert(predicate::str::contains("matrix = \"matrix.toml\""));

    ws.syl().arg("check").assert().code(0);

    // Never overwrites.
    ws.syl().args(["config", "init", "other.toml"]).assert().code(2);
}

#[test]
fn config_show_reports_sources() {
    let ws = Workspace::new();
    ws.write("global.toml", "format = \"json\"\n");

    ws.syl()
        .args(["--config", "global.toml", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("global.toml"))
        .stdout(predicate::str::contains("format = json"))
        .stdout(predicate::str::contains("project config: (none)"));
}

#[test]
fn invalid_config_is_malformed() {
    let ws = Workspace::new();
    ws.write("matrix.toml", CLEAN_TOML);
    ws.write("syllabus.toml", "colour = \"blue\"\n");

    ws.syl().args(["check", "matrix.toml"]).assert().code(2);
}

// =============================================================================
// misc
// =============================================================================

#[test]
fn completion_generates_script() {
    let ws = Workspace::new();

    ws.syl()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("syl"));
}

#[test]
fn debug_flag_logs_to_stderr() {
    let ws = Workspace::new();
    ws.write("matrix.toml", CLEAN_TOML);

    ws.syl()
        .args(["--debug", "check", "matrix.toml"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("logging initialized"))
        .stderr(predicate::str::contains("graph built"))
        .stdout(predicate::str::contains("graph built").not());
}

#[test]
fn help_flag_works() {
    let ws = Workspace::new();

    ws.syl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"));
}
