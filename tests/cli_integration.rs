//! Integration tests for the docbrand CLI.
//!
//! Each test builds a throwaway corpus in a TempDir with a rules.toml at its
//! root and runs the compiled binary against it.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const RULES: &str = r#"
protected = ["Contoso Studio Classic"]

[[first_mention]]
term = "Contoso Studio"
first = "Contoso Fabric"
subsequent = "Fabric"

[[cleanup]]
search = "teh"
replace = "the"
"#;

/// Helper to create a corpus with a rules file at its root.
fn setup_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();

    fs::write(dir.path().join("rules.toml"), RULES).unwrap();

    fs::write(
        dir.path().join("guide.md"),
        "---\ntitle: Contoso Studio guide\n---\n# Contoso Studio\nContoso Studio intro. Contoso Studio again. teh end.\n",
    )
    .unwrap();

    fs::write(
        dir.path().join("index.yml"),
        "title: Contoso Studio index\nsummary: Contoso Studio everywhere\n",
    )
    .unwrap();

    fs::write(dir.path().join("unrelated.md"), "# Nothing here\n").unwrap();

    dir
}

fn docbrand(args: &[&str], root: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_docbrand"))
        .args(args)
        .arg("--root")
        .arg(root)
        .output()
        .unwrap()
}

#[test]
fn test_apply_rewrites_documents() {
    let dir = setup_corpus();
    let output = docbrand(&["apply"], dir.path());
    assert!(output.status.success());

    let guide = fs::read_to_string(dir.path().join("guide.md")).unwrap();
    assert_eq!(
        guide,
        "---\ntitle: Contoso Fabric guide\n---\n# Contoso Fabric\nContoso Fabric intro. Fabric again. the end.\n"
    );

    // YAML gets uniform replacement.
    let index = fs::read_to_string(dir.path().join("index.yml")).unwrap();
    assert_eq!(
        index,
        "title: Contoso Fabric index\nsummary: Contoso Fabric everywhere\n"
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Summary:"));
    assert!(stdout.contains("3 scanned"));
    assert!(stdout.contains("2 modified"));
}

#[test]
fn test_apply_is_idempotent_across_runs() {
    let dir = setup_corpus();
    assert!(docbrand(&["apply"], dir.path()).status.success());
    let after_first = fs::read_to_string(dir.path().join("guide.md")).unwrap();

    let output = docbrand(&["apply"], dir.path());
    assert!(output.status.success());
    let after_second = fs::read_to_string(dir.path().join("guide.md")).unwrap();

    assert_eq!(after_first, after_second);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0 modified"));
}

#[test]
fn test_dry_run_leaves_files_alone() {
    let dir = setup_corpus();
    let before = fs::read_to_string(dir.path().join("guide.md")).unwrap();

    let output = docbrand(&["apply", "--dry-run"], dir.path());
    assert!(output.status.success());

    let after = fs::read_to_string(dir.path().join("guide.md")).unwrap();
    assert_eq!(before, after);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("would be modified"));
}

#[test]
fn test_kind_filter_restricts_processing() {
    let dir = setup_corpus();
    let output = docbrand(&["apply", "--kind", "yaml"], dir.path());
    assert!(output.status.success());

    // Markdown untouched, YAML rewritten.
    let guide = fs::read_to_string(dir.path().join("guide.md")).unwrap();
    assert!(guide.contains("Contoso Studio"));
    let index = fs::read_to_string(dir.path().join("index.yml")).unwrap();
    assert!(index.contains("Contoso Fabric"));
}

#[test]
fn test_check_exits_nonzero_when_changes_pending() {
    let dir = setup_corpus();
    let output = docbrand(&["check"], dir.path());
    assert!(!output.status.success());

    // Still read-only.
    let guide = fs::read_to_string(dir.path().join("guide.md")).unwrap();
    assert!(guide.contains("Contoso Studio"));
}

#[test]
fn test_check_passes_on_clean_corpus() {
    let dir = setup_corpus();
    assert!(docbrand(&["apply"], dir.path()).status.success());

    let output = docbrand(&["check"], dir.path());
    assert!(output.status.success());
}

#[test]
fn test_invalid_rules_abort_before_processing() {
    let dir = setup_corpus();
    fs::write(
        dir.path().join("rules.toml"),
        "[[compound]]\nsearch = \"\"\nreplace = \"x\"\n",
    )
    .unwrap();
    let before = fs::read_to_string(dir.path().join("guide.md")).unwrap();

    let output = docbrand(&["apply"], dir.path());
    assert!(!output.status.success());

    let after = fs::read_to_string(dir.path().join("guide.md")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_invalid_utf8_document_is_skipped_not_fatal() {
    let dir = setup_corpus();
    fs::write(dir.path().join("broken.md"), b"Contoso Studio caf\xE9 \xFF\xFE").unwrap();

    let output = docbrand(&["apply"], dir.path());
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 skipped"));
    // The rest of the batch still ran.
    let guide = fs::read_to_string(dir.path().join("guide.md")).unwrap();
    assert!(guide.contains("Contoso Fabric"));
}

#[test]
fn test_bom_is_stripped_on_rewrite() {
    let dir = setup_corpus();
    fs::write(
        dir.path().join("bom.md"),
        b"\xEF\xBB\xBF# Contoso Studio\nContoso Studio text.\n",
    )
    .unwrap();

    assert!(docbrand(&["apply"], dir.path()).status.success());

    let bytes = fs::read(dir.path().join("bom.md")).unwrap();
    assert!(!bytes.starts_with(&[0xEF, 0xBB, 0xBF]));
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text, "# Contoso Fabric\nContoso Fabric text.\n");
}

#[test]
fn test_list_summarizes_rule_tables() {
    let dir = setup_corpus();
    let output = Command::new(env!("CARGO_BIN_EXE_docbrand"))
        .args(["list", "--rules"])
        .arg(dir.path().join("rules.toml"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FIRST MENTION"));
    assert!(stdout.contains("Contoso Studio -> Contoso Fabric (then Fabric)"));
    assert!(stdout.contains("PROTECTED"));
}

#[test]
fn test_sync_articles_appends_derived_cleanup_rules() {
    let dir = TempDir::new().unwrap();
    let rules_path = dir.path().join("rules.toml");
    fs::write(
        &rules_path,
        "[[compound]]\nsearch = \"Azure Search\"\nreplace = \"Search\"\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_docbrand"))
        .args(["sync-articles", "--rules"])
        .arg(&rules_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let updated = fs::read_to_string(&rules_path).unwrap();
    // The compound table is untouched and the derived rule is appended.
    assert!(updated.contains("search = \"Azure Search\""));
    assert!(updated.contains("[[cleanup]]"));
    assert!(updated.contains("search = \"an Search\""));
    assert!(updated.contains("replace = \"a Search\""));

    // A second run finds nothing left to add.
    let output = Command::new(env!("CARGO_BIN_EXE_docbrand"))
        .args(["sync-articles", "--rules"])
        .arg(&rules_path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("already present"));
}

#[test]
fn test_sync_articles_dry_run_leaves_rules_alone() {
    let dir = TempDir::new().unwrap();
    let rules_path = dir.path().join("rules.toml");
    let rules = "[[compound]]\nsearch = \"Azure Search\"\nreplace = \"Search\"\n";
    fs::write(&rules_path, rules).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_docbrand"))
        .args(["sync-articles", "--dry-run", "--rules"])
        .arg(&rules_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("an Search -> a Search"));
    assert_eq!(fs::read_to_string(&rules_path).unwrap(), rules);
}

#[test]
fn test_apply_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_docbrand"))
        .args(["apply", "--help"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--root"));
}
