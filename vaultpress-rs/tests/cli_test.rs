//! Integration tests for the vaultpress CLI using the fixture book.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Get the path to a fixture file or folder.
fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

/// Run the vaultpress CLI with an isolated config dir; returns (stdout, stderr, code).
fn run_vaultpress(args: &[&str]) -> (String, String, i32) {
    let config_home = TempDir::new().unwrap();
    let binary = env!("CARGO_BIN_EXE_vaultpress");

    let output = Command::new(binary)
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute vaultpress");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn fixture_arg(name: &str) -> String {
    fixture_path(name).to_string_lossy().into_owned()
}

fn parse_json(stdout: &str) -> Value {
    serde_json::from_str(stdout).expect("stdout is not JSON")
}

mod convert_command {
    use super::*;

    #[test]
    fn convert_prints_notes() {
        let opening = fixture_arg("book/01-opening.md");
        let (stdout, _, code) = run_vaultpress(&["convert", &opening]);
        assert_eq!(code, 0);

        let json = parse_json(&stdout);
        assert_eq!(json["total"], 1);
        let note = &json["notes"][0];
        assert_eq!(note["title"], "Ch. 1");
        assert_eq!(note["images"][0], "diagram.png");
        assert_eq!(note["frontmatter"]["author"], "A. Writer");
        assert!(note["html"].as_str().unwrap().contains("<h1 id=\"intro\">Intro</h1>"));
    }

    #[test]
    fn convert_styled_links_and_placeholders() {
        let opening = fixture_arg("book/01-opening.md");
        let (stdout, _, code) = run_vaultpress(&[
            "convert",
            &opening,
            "--wikilinks",
            "styled",
            "--asset-placeholders",
        ]);
        assert_eq!(code, 0);

        let json = parse_json(&stdout);
        let html = json["notes"][0]["html"].as_str().unwrap();
        assert!(html.contains("<span class=\"wikilink\">See status</span>"));
        assert!(html.contains("src=\"images/diagram.png\""));
    }

    #[test]
    fn convert_writes_fragments() {
        let out = TempDir::new().unwrap();
        let out_dir = out.path().to_string_lossy().into_owned();
        let opening = fixture_arg("book/01-opening.md");
        let middle = fixture_arg("book/02-middle.md");

        let (stdout, _, code) =
            run_vaultpress(&["convert", &opening, &middle, "--out-dir", &out_dir]);
        assert_eq!(code, 0);

        let written = std::fs::read_to_string(out.path().join("02-middle.html")).unwrap();
        assert!(written.contains("<h1 id=\"the-middle\">The Middle</h1>"));
        assert!(out.path().join("01-opening.html").is_file());

        let json = parse_json(&stdout);
        assert_eq!(json["total"], 2);
        assert!(json["notes"][0].get("html").is_none());
        assert!(json["notes"][0]["output"].as_str().unwrap().ends_with("01-opening.html"));
    }

    #[test]
    fn convert_yaml_output() {
        let middle = fixture_arg("book/02-middle.md");
        let (stdout, _, code) = run_vaultpress(&["--yaml", "convert", &middle]);
        assert_eq!(code, 0);
        assert!(stdout.contains("title: The Middle"));
        assert!(stdout.contains("total: 1"));
    }

    #[test]
    fn convert_without_files() {
        let (_, stderr, code) = run_vaultpress(&["convert"]);
        assert_eq!(code, 3);
        assert!(stderr.contains("No input files provided"));
    }

    #[test]
    fn convert_without_files_skips_pipeline_setup() {
        let (_, stderr, code) = run_vaultpress(&["convert", "--code-style", "no-such-theme"]);
        assert_eq!(code, 3);
        assert!(!stderr.contains("unknown code theme"));
    }

    #[test]
    fn unknown_theme_warns_and_converts() {
        let middle = fixture_arg("book/02-middle.md");
        let (_, stderr, code) =
            run_vaultpress(&["convert", &middle, "--code-style", "no-such-theme"]);
        assert_eq!(code, 0);
        assert!(stderr.contains("unknown code theme"));
    }

    #[test]
    fn convert_missing_file() {
        let missing = fixture_arg("book/does-not-exist.md");
        let (stdout, stderr, code) = run_vaultpress(&["convert", &missing]);
        assert_eq!(code, 2);
        assert!(stderr.contains("does-not-exist.md"));
        assert!(stdout.is_empty());
    }

    #[test]
    fn quiet_suppresses_error_message() {
        let (_, stderr, code) = run_vaultpress(&["-q", "convert"]);
        assert_eq!(code, 3);
        assert!(!stderr.contains("Error:"));
    }
}

mod config_file {
    use super::*;

    fn write_config(dir: &Path, body: &str) -> String {
        let path = dir.join("config.toml");
        std::fs::write(&path, body).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn config_sets_defaults_and_flags_override() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path(), "wikilink_mode = \"styled\"\ntitle_source = \"heading\"\n");
        let opening = fixture_arg("book/01-opening.md");

        let (stdout, _, code) = run_vaultpress(&["--config", &config, "convert", &opening]);
        assert_eq!(code, 0);
        let json = parse_json(&stdout);
        assert_eq!(json["notes"][0]["title"], "Intro");
        assert!(json["notes"][0]["html"].as_str().unwrap().contains("class=\"wikilink\""));

        let (stdout, _, code) = run_vaultpress(&[
            "--config",
            &config,
            "convert",
            &opening,
            "--title-source",
            "filename",
        ]);
        assert_eq!(code, 0);
        assert_eq!(parse_json(&stdout)["notes"][0]["title"], "01 Opening");
    }

    #[test]
    fn invalid_config() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path(), "highlight_code = \"sometimes\"\n");
        let opening = fixture_arg("book/01-opening.md");

        let (_, stderr, code) = run_vaultpress(&["--config", &config, "convert", &opening]);
        assert_eq!(code, 4);
        assert!(stderr.contains("TOML parse error"));
    }
}

mod chapters_command {
    use super::*;

    #[test]
    fn lists_tagged_chapters() {
        let book = fixture_arg("book");
        let (stdout, _, code) = run_vaultpress(&["chapters", &book]);
        assert_eq!(code, 0);

        let json = parse_json(&stdout);
        assert_eq!(json["tag"], "4epub");
        assert_eq!(json["total"], 2);
        assert_eq!(json["chapters"][0]["title"], "Ch. 1");
        assert_eq!(json["chapters"][0]["number"], 1);
        assert_eq!(json["chapters"][1]["title"], "The Middle");
    }

    #[test]
    fn custom_tag() {
        let book = fixture_arg("book");
        let (stdout, _, code) = run_vaultpress(&["chapters", &book, "--tag", "draft"]);
        assert_eq!(code, 0);
        assert_eq!(parse_json(&stdout)["chapters"][0]["title"], "Unfinished");
    }

    #[test]
    fn no_tagged_notes() {
        let book = fixture_arg("book");
        let (_, stderr, code) = run_vaultpress(&["chapters", &book, "--tag", "nothing-has-this"]);
        assert_eq!(code, 3);
        assert!(stderr.contains("nothing-has-this"));
    }

    #[test]
    fn missing_folder() {
        let missing = fixture_arg("no-such-folder");
        let (_, stderr, code) = run_vaultpress(&["chapters", &missing]);
        assert_eq!(code, 2);
        assert!(stderr.contains("Folder not found"));
    }
}
