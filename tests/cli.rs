use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::tempdir;

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

#[test]
fn analyze_builtin_sample() {
    let mut cmd = cargo_bin_cmd!("serpent");

    let output_pred = predicate::str::contains("Lexical Analysis")
        .and(predicate::str::contains("Lexeme  Token"))
        .and(predicate::str::contains("Syntax Analysis"))
        .and(predicate::str::contains("Syntax OK"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn analyze_file() {
    let mut cmd = cargo_bin_cmd!("serpent");
    cmd.arg(sample_path("nested_loops.srp"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Syntax OK"));
}

#[test]
fn lexical_errors_skip_syntax_analysis() {
    let mut cmd = cargo_bin_cmd!("serpent");
    cmd.arg("-c").arg("x = @");

    let output_pred = predicate::str::contains("Lexical errors:")
        .and(predicate::str::contains(" - Error, '@' is not a valid token"))
        .and(predicate::str::contains("Syntax Analysis").not());

    cmd.assert().code(1).stdout(output_pred);
}

#[test]
fn syntax_error_reports_line() {
    let mut cmd = cargo_bin_cmd!("serpent");
    cmd.arg(sample_path("missing_endif.srp"));

    cmd.assert().code(1).stdout(predicate::str::contains(
        "Syntax error: Line 6: Expected 'endif', got end of input",
    ));
}

#[test]
fn missing_input_file() {
    let mut cmd = cargo_bin_cmd!("serpent");
    cmd.arg(sample_path("does_not_exist.srp"));

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn missing_config_dir() {
    let dir = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("serpent");
    cmd.arg("--config-dir").arg(dir.path()).arg("-c").arg("x = 1");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("token_lexeme.txt"));
}

#[test]
fn block_termination_override() {
    let dir = tempdir().unwrap();
    let blocks = dir.path().join("blocks.txt");
    std::fs::write(&blocks, "if = endfor\n").unwrap();

    let mut cmd = cargo_bin_cmd!("serpent");
    cmd.arg("--block-termination")
        .arg(&blocks)
        .arg("-c")
        .arg("if x:\n  y = 1\nendfor\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Syntax OK"));
}

#[test]
fn json_format() {
    let mut cmd = cargo_bin_cmd!("serpent");
    cmd.arg("-c").arg("if x:\n  y = 1\nendif").arg("--format").arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"token\": \"Keyword\""));
}

#[test]
fn json_format_serializes_tree() {
    let mut cmd = cargo_bin_cmd!("serpent");
    cmd.arg("-c").arg("total = 1 + n").arg("-f").arg("json");

    let output_pred = predicate::str::contains("Syntax OK")
        .and(predicate::str::contains("Syntax Tree"))
        .and(predicate::str::contains("\"assign\": {"))
        .and(predicate::str::contains("\"target\": \"total\""))
        .and(predicate::str::contains("\"op\": \"+\""));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn yaml_format_serializes_tree() {
    let mut cmd = cargo_bin_cmd!("serpent");
    cmd.arg("-c").arg("print(x)").arg("-f").arg("yaml");

    let output_pred = predicate::str::contains("Syntax Tree")
        .and(predicate::str::contains("statements:"))
        .and(predicate::str::contains("args:"))
        .and(predicate::str::contains("line: 1"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn ast_format_prints_tree() {
    let mut cmd = cargo_bin_cmd!("serpent");
    cmd.arg("-c").arg("total = 1 + 2 * 3").arg("-f").arg("ast");

    let output_pred = predicate::str::contains("Syntax Tree")
        .and(predicate::str::contains("total = (+ 1 (* 2 3))"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn raw_tokens_without_table() {
    let mut cmd = cargo_bin_cmd!("serpent");
    cmd.arg("-c")
        .arg("x = 1")
        .arg("--show-tokens")
        .arg("--no-table");

    let output_pred = predicate::str::contains("Raw Tokens")
        .and(predicate::str::contains("     IDENT : x"))
        .and(predicate::str::contains("Lexeme").not());

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn unknown_format_is_rejected() {
    let mut cmd = cargo_bin_cmd!("serpent");
    cmd.arg("-f").arg("xml");

    cmd.assert().failure();
}
