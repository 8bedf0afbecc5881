//! CLI integration tests for paperfeed commands.
//!
//! Each test runs against a local copy of the published layout: a file index under
//! `assets/` and JSONL data files under `data/`.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// File index listing two dates.
const INDEX: &str = "\
data/2025-03-01_AI_enhanced_English.jsonl
data/2025-03-02_AI_enhanced_English.jsonl
";

/// Papers published on 2025-03-01.
const MARCH_1: &str = r#"{"id":"2503.00001","title":"Retrieval for LLM agents","authors":["Ann Lee","Bo Chen"],"categories":["cs.CL"],"summary":"An abstract.","AI":{"tldr":"LLM agents retrieve.","method":"Dense retrieval."},"abs":"https://arxiv.org/abs/2503.00001"}
{"id":"2503.00002","title":"Graph kernels","authors":["Cy Diaz","Di Ek","Ed Fu","Flo Gu","Gus Hu"],"categories":["cs.LG"],"summary":"Kernels.","abs":"https://arxiv.org/abs/2503.00002","code_url":"https://github.com/x/y","code_stars":"12"}
"#;

/// Papers published on 2025-03-02.
const MARCH_2: &str = r#"{"id":"2503.00003","title":"Graph kernels for molecules","authors":["Ann Lee"],"categories":["cs.LG"],"summary":"Molecular graphs.","abs":"https://arxiv.org/abs/2503.00003"}
{"id":"2503.00004","title":"Sparse attention in LLM decoders","authors":["Dan Fox"],"categories":["cs.CL"],"summary":"Faster decoding.","abs":"https://arxiv.org/abs/2503.00004"}
"#;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to create a temp directory holding a published feed and a config pointing at it.
fn feed_dir() -> tempfile::TempDir {
    let dir = temp_dir();
    let root = dir.path();
    fs::create_dir_all(root.join("assets")).unwrap();
    fs::create_dir_all(root.join("data")).unwrap();
    fs::write(root.join("assets/file-list.txt"), INDEX).unwrap();
    fs::write(
        root.join("data/2025-03-01_AI_enhanced_English.jsonl"),
        MARCH_1,
    )
    .unwrap();
    fs::write(
        root.join("data/2025-03-02_AI_enhanced_English.jsonl"),
        MARCH_2,
    )
    .unwrap();
    fs::write(
        root.join(".paperfeed.toml"),
        "root = true\n\n[source]\nbase = \".\"\n\n[preferences]\npath = \"prefs.json\"\n",
    )
    .unwrap();
    dir
}

/// Helper to get a paperfeed command.
fn paperfeed() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("paperfeed").unwrap()
}

/// Helper to run `paperfeed` in `dir` with HOME isolated to it.
fn paperfeed_in(dir: &Path) -> Command {
    let mut cmd = paperfeed();
    cmd.env("HOME", dir).env_remove("PAPERFEED_LOG").current_dir(dir);
    cmd
}

/// Runs a command that should succeed and returns its stdout without ANSI escapes.
fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = paperfeed_in(dir).args(args).assert().success();
    strip_ansi(&String::from_utf8_lossy(&output.get_output().stdout))
}

/// Runs a command that should succeed and parses its stdout as JSON.
fn json_of(dir: &Path, args: &[&str]) -> Value {
    let output = paperfeed_in(dir).args(args).assert().success();
    serde_json::from_slice(&output.get_output().stdout).unwrap()
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

mod dates {
    use super::*;

    #[test]
    fn lists_dates_with_languages() {
        let dir = feed_dir();
        let output = stdout_of(dir.path(), &["dates"]);
        assert!(output.contains("2025-03-01"));
        assert!(output.contains("2025-03-02"));
        assert!(output.contains("English"));
    }

    #[test]
    fn json_is_most_recent_first() {
        let dir = feed_dir();
        let json = json_of(dir.path(), &["dates", "--json"]);
        let dates = json.as_array().unwrap();
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0]["date"], "2025-03-02");
        assert_eq!(dates[0]["languages"][0], "English");
    }

    #[test]
    fn missing_index_is_empty() {
        let dir = feed_dir();
        fs::remove_file(dir.path().join("assets/file-list.txt")).unwrap();
        let output = stdout_of(dir.path(), &["dates"]);
        assert!(output.contains("No dates available."));
    }
}

mod show {
    use super::*;

    #[test]
    fn defaults_to_latest_date() {
        let dir = feed_dir();
        let output = stdout_of(dir.path(), &["show"]);
        assert!(output.contains("2025-03-02 · 2 papers"));
        assert!(output.contains("All 2 | cs.CL 1 | cs.LG 1"));
        assert!(output.contains("Graph kernels for molecules"));
        assert!(!output.contains("Retrieval for LLM agents"));
    }

    #[test]
    fn keyword_flag_ranks_matches_first() {
        let dir = feed_dir();
        let json = json_of(
            dir.path(),
            &["show", "-d", "2025-03-01", "-k", "llm", "--json"],
        );
        assert_eq!(json["selection"], "2025-03-01");
        assert_eq!(json["matched"], 1);
        let papers = json["papers"].as_array().unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0]["paper"]["id"], "2503.00001");
        assert_eq!(papers[0]["matched"], true);
        assert_eq!(papers[0]["reason"]["keywords"][0], "llm");
        assert_eq!(papers[1]["matched"], false);
    }

    #[test]
    fn category_flag_restricts_papers() {
        let dir = feed_dir();
        let json = json_of(
            dir.path(),
            &["show", "-d", "2025-03-01", "-c", "cs.LG", "--json"],
        );
        let papers = json["papers"].as_array().unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0]["paper"]["title"], "Graph kernels");
    }

    #[test]
    fn query_matches_authors() {
        let dir = feed_dir();
        let json = json_of(
            dir.path(),
            &["show", "-d", "2025-03-01", "-q", "diaz", "--json"],
        );
        assert_eq!(json["matched"], 1);
        assert_eq!(json["papers"][0]["paper"]["id"], "2503.00002");
    }

    #[test]
    fn range_merges_dates() {
        let dir = feed_dir();
        let json = json_of(
            dir.path(),
            &["show", "--from", "2025-03-01", "--to", "2025-03-02", "--json"],
        );
        assert_eq!(json["papers"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn list_mode_prints_one_line_per_paper() {
        let dir = feed_dir();
        let output = stdout_of(dir.path(), &["show", "-d", "2025-03-01", "--list"]);
        assert!(output.contains("Retrieval for LLM agents [cs.CL]"));
        assert!(output.contains("Graph kernels [cs.LG]"));
    }

    #[test]
    fn html_mode_marks_highlights() {
        let dir = feed_dir();
        paperfeed_in(dir.path())
            .args(["show", "-d", "2025-03-01", "-k", "llm", "--html"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "<span class=\"keyword-highlight\">LLM</span>",
            ));
    }

    #[test]
    fn missing_date_is_empty_not_failure() {
        let dir = feed_dir();
        let output = stdout_of(dir.path(), &["show", "-d", "2025-02-01"]);
        assert!(output.contains("No papers found for this date."));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = feed_dir();
        fs::write(
            dir.path().join("data/2025-03-02_AI_enhanced_English.jsonl"),
            format!("not json at all\n{MARCH_2}"),
        )
        .unwrap();
        let json = json_of(dir.path(), &["show", "--json"]);
        assert_eq!(json["papers"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn unreadable_file_is_a_failure() {
        let dir = feed_dir();
        let data = dir.path().join("data/2025-03-02_AI_enhanced_English.jsonl");
        fs::remove_file(&data).unwrap();
        fs::create_dir(&data).unwrap();
        paperfeed_in(dir.path())
            .arg("show")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Loading data failed. Please retry."));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let dir = feed_dir();
        paperfeed_in(dir.path())
            .args(["show", "--from", "2025-03-02", "--to", "2025-03-01"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }

    #[test]
    fn invalid_date_flag_is_rejected() {
        let dir = feed_dir();
        paperfeed_in(dir.path())
            .args(["show", "-d", "March"])
            .assert()
            .failure();
    }
}

mod detail {
    use super::*;

    #[test]
    fn shows_position_and_links() {
        let dir = feed_dir();
        let output = stdout_of(dir.path(), &["detail", "2", "-d", "2025-03-01"]);
        assert!(output.contains("2 / 2"));
        assert!(output.contains("Graph kernels"));
        assert!(output.contains("https://arxiv.org/pdf/2503.00002"));
        assert!(output.contains("(★ 12)"));
    }

    #[test]
    fn json_includes_paper() {
        let dir = feed_dir();
        let json = json_of(dir.path(), &["detail", "1", "-d", "2025-03-01", "--json"]);
        assert_eq!(json["index"], 1);
        assert_eq!(json["paper"]["id"], "2503.00001");
        assert_eq!(json["paper"]["method"], "Dense retrieval.");
    }

    #[test]
    fn out_of_range_fails() {
        let dir = feed_dir();
        paperfeed_in(dir.path())
            .args(["detail", "5", "-d", "2025-03-01"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "no paper at position 5 (the list has 2)",
            ));
    }

    #[test]
    fn zero_is_rejected() {
        let dir = feed_dir();
        paperfeed_in(dir.path())
            .args(["detail", "0"])
            .assert()
            .failure();
    }

    #[test]
    fn random_picks_a_listed_paper() {
        let dir = feed_dir();
        let json = json_of(dir.path(), &["random", "-d", "2025-03-01", "--json"]);
        let index = json["index"].as_u64().unwrap();
        assert!((1..=2).contains(&index));
    }

    #[test]
    fn random_on_empty_date_prints_message() {
        let dir = feed_dir();
        let output = stdout_of(dir.path(), &["random", "-d", "2025-02-01"]);
        assert!(output.contains("No papers found for this date."));
    }
}

mod stats {
    use super::*;

    #[test]
    fn counts_phrases_across_range() {
        let dir = feed_dir();
        let output = stdout_of(
            dir.path(),
            &["stats", "--from", "2025-03-01", "--to", "2025-03-02"],
        );
        assert!(output.contains("Popular keywords"));
        assert!(output.contains("graph kernels"));
        assert!(output.contains("Keyword trends:"));
    }

    #[test]
    fn json_report() {
        let dir = feed_dir();
        let json = json_of(
            dir.path(),
            &["stats", "--from", "2025-03-01", "--to", "2025-03-02", "--json"],
        );
        assert_eq!(json["titles"], 4);
        let keywords = json["keywords"].as_array().unwrap();
        let graph = keywords
            .iter()
            .find(|k| k["term"] == "graph kernels")
            .unwrap();
        assert_eq!(graph["frequency"], 2);
        assert_eq!(graph["per_date"]["2025-03-01"], 1);
        assert_eq!(graph["per_date"]["2025-03-02"], 1);
    }

    #[test]
    fn single_date_without_repeats_has_empty_cloud() {
        let dir = feed_dir();
        let output = stdout_of(dir.path(), &["stats", "-d", "2025-03-01"]);
        assert!(output.contains("No keyword appears in at least 2 titles."));
    }
}

mod related {
    use super::*;

    #[test]
    fn finds_papers_across_range() {
        let dir = feed_dir();
        let json = json_of(
            dir.path(),
            &[
                "related", "llm", "--from", "2025-03-01", "--to", "2025-03-02", "--json",
            ],
        );
        let mut ids: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, ["2503.00001", "2503.00004"]);
    }

    #[test]
    fn no_matches_prints_message() {
        let dir = feed_dir();
        let output = stdout_of(dir.path(), &["related", "quantum"]);
        assert!(output.contains("No related papers found."));
    }
}

mod prefs {
    use super::*;

    #[test]
    fn saved_keyword_seeds_the_filter() {
        let dir = feed_dir();
        let output = stdout_of(dir.path(), &["prefs", "add-keyword", "llm"]);
        assert!(output.contains("Saved keyword \"llm\""));
        assert!(dir.path().join("prefs.json").exists());

        let json = json_of(dir.path(), &["prefs", "list", "--json"]);
        assert_eq!(json["keywords"][0], "llm");

        let feed = json_of(dir.path(), &["show", "-d", "2025-03-01", "--json"]);
        assert_eq!(feed["matched"], 1);
        assert_eq!(feed["papers"][0]["paper"]["id"], "2503.00001");
    }

    #[test]
    fn remove_and_reset() {
        let dir = feed_dir();
        stdout_of(dir.path(), &["prefs", "add-author", "Ann Lee"]);
        stdout_of(dir.path(), &["prefs", "add-keyword", "graph"]);
        let output = stdout_of(dir.path(), &["prefs", "list"]);
        assert!(output.contains("Ann Lee"));
        assert!(output.contains("graph"));

        stdout_of(dir.path(), &["prefs", "remove-author", "Ann Lee"]);
        let json = json_of(dir.path(), &["prefs", "list", "--json"]);
        assert_eq!(json["authors"].as_array().unwrap().len(), 0);
        assert_eq!(json["keywords"][0], "graph");

        stdout_of(dir.path(), &["prefs", "reset"]);
        let output = stdout_of(dir.path(), &["prefs", "list"]);
        assert!(output.contains("(none)"));
    }
}

mod browse {
    use super::*;

    #[test]
    fn navigates_and_toggles() {
        let dir = feed_dir();
        let output = paperfeed_in(dir.path())
            .args(["browse", "-d", "2025-03-01"])
            .write_stdin("k llm\n1\nn\nn\nq\n")
            .assert()
            .success();
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.get_output().stdout));
        assert!(stdout.contains("keyword \"llm\" on"));
        assert!(stdout.contains("1 / 2"));
        assert!(stdout.contains("2 / 2"));
    }

    #[test]
    fn loads_another_date() {
        let dir = feed_dir();
        let output = paperfeed_in(dir.path())
            .args(["browse", "-d", "2025-03-01"])
            .write_stdin("d 2025-03-02\n")
            .assert()
            .success();
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.get_output().stdout));
        assert!(stdout.contains("2025-03-02 · 2 papers"));
        assert!(stdout.contains("Sparse attention in LLM decoders"));
    }

    #[test]
    fn reports_unknown_commands() {
        let dir = feed_dir();
        paperfeed_in(dir.path())
            .arg("browse")
            .write_stdin("zzz\nq\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("unknown command"));
    }

    #[test]
    fn saved_keyword_outlives_the_session() {
        let dir = feed_dir();
        let output = paperfeed_in(dir.path())
            .args(["browse", "-d", "2025-03-01"])
            .write_stdin("+k llm\nq\n")
            .assert()
            .success();
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.get_output().stdout));
        assert!(stdout.contains("Saved keyword \"llm\""));

        let json = json_of(dir.path(), &["prefs", "list", "--json"]);
        assert_eq!(json["keywords"][0], "llm");
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();
        paperfeed_in(dir.path()).arg("init").assert().success();

        let contents = fs::read_to_string(dir.path().join(".paperfeed.toml")).unwrap();
        assert!(contents.contains("# [source]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".paperfeed.toml"), "existing").unwrap();

        paperfeed_in(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn force_overwrites() {
        let dir = temp_dir();
        fs::write(dir.path().join(".paperfeed.toml"), "existing").unwrap();

        paperfeed_in(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();
        let contents = fs::read_to_string(dir.path().join(".paperfeed.toml")).unwrap();
        assert_ne!(contents, "existing");
    }

    #[test]
    fn works_with_invalid_existing_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".paperfeed.toml"), "not [valid toml").unwrap();

        paperfeed_in(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_effective_settings() {
        let dir = feed_dir();
        let output = stdout_of(dir.path(), &["config"]);
        assert!(output.contains("[source]"));
        assert!(output.contains("[stats]"));
        assert!(output.contains("cloud_size = 30"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".paperfeed.toml"), "[stats]\ncloud_size = \"x\"\n").unwrap();

        paperfeed_in(dir.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}
