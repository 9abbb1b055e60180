use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ANSI-colored"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("mdvl"));
}

#[test]
fn test_basic_markdown_rendering() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, "# Hello World\n\nThis is **bold** text.").unwrap();

    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg(temp_file.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Hello World"));
}

#[test]
fn test_stdin_input() {
    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-");
    cmd.write_stdin("# Test\n\nFrom stdin");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Test"));
}

#[test]
fn test_stdin_input_with_bom() {
    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-").arg("-A");
    cmd.write_stdin("\u{feff}# Heading\n\nBody text");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("# Heading").not())
        .stdout(predicate::str::contains("Heading"))
        .stdout(predicate::str::contains("\u{feff}").not());
}

#[test]
fn test_no_colors_strips_every_escape() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, "# Test\n\n**Bold** and *italic* and `code`").unwrap();

    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-A").arg(temp_file.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\x1b").not())
        .stdout(predicate::str::contains("Bold"));
}

#[test]
fn test_column_width_option_wraps_lines() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(
        &temp_file,
        "This is a long paragraph that should be wrapped according to the requested column width option.",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-A").arg("-c").arg("30").arg(temp_file.path());
    cmd.assert()
        .success()
        .stdout(predicate::function(|out: &str| {
            out.lines().count() > 2
                && out
                    .lines()
                    .all(|line| line.trim_end().chars().count() <= 30)
        }));
}

#[test]
fn test_scheme_option() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, "# Scheme Test").unwrap();

    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-t").arg("blue").arg(temp_file.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Scheme Test"));
}

#[test]
fn test_unknown_scheme_fails() {
    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-t").arg("nonexistent").arg("-");
    cmd.write_stdin("x");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown color scheme"));
}

#[test]
fn test_single_line_input_has_no_outer_blanks() {
    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-A").arg("-");
    cmd.write_stdin("> single line note");
    cmd.assert()
        .success()
        .stdout(predicate::eq("┃ single line note\n"));
}

#[test]
fn test_header_numbering_option() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, "# A\n## B\n## C\n# D").unwrap();

    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-A").arg("-N").arg("0").arg(temp_file.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1 A"))
        .stdout(predicate::str::contains("1.1 B"))
        .stdout(predicate::str::contains("1.2 C"))
        .stdout(predicate::str::contains("2 D"));
}

#[test]
fn test_fenced_code_gets_gutter_marks() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, "before\n\n```\ncode line\n```\n\nafter").unwrap();

    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-A").arg(temp_file.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("│ code line"))
        .stdout(predicate::str::contains("```").not());
}

#[test]
fn test_header_underlining_option() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, "# Title\n\ntext").unwrap();

    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-A").arg("-u").arg("*").arg("-c").arg("20").arg(temp_file.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("───"));
}

#[test]
fn test_config_file_option() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, "indent: 5\n").unwrap();

    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-A")
        .arg("--config-file")
        .arg(&config_path)
        .arg("-");
    cmd.write_stdin("some text\nmore");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("     some text more"));
}

#[test]
fn test_invalid_environment_value_fails_with_key_name() {
    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.env("MDVL_TERM_WIDTH", "wide").arg("-");
    cmd.write_stdin("x");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("MDVL_TERM_WIDTH"))
        .stderr(predicate::str::contains("wide"));
}

#[test]
fn test_missing_file_fails() {
    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("/definitely/not/here.md");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_blockquote_renders_marker_glyphs() {
    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-A").arg("-");
    cmd.write_stdin(">> nested quote\n\n> shallow quote\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("┃┃ nested quote"))
        .stdout(predicate::str::contains("┃ shallow quote"));
}

#[test]
fn test_list_items_render_glyphs() {
    let mut cmd = Command::cargo_bin("mdvl").unwrap();
    cmd.arg("-A").arg("-");
    cmd.write_stdin("- first item\n- second item\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("❖ first item"))
        .stdout(predicate::str::contains("❖ second item"));
}
