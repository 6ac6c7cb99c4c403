//! Integration tests for the `dbk` binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated config and snapshot locations for one test
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn snapshot(&self) -> PathBuf {
        self.dir.path().join("data").join("snapshot.json")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn dbk(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dbk"));
        cmd.env("DAYBOOK_CONFIG", self.config())
            .env_remove("DAYBOOK_SNAPSHOT")
            .env_remove("DAYBOOK_LOG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("--snapshot")
            .arg(self.snapshot());
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self.dbk().args(args).arg("--json").output().unwrap();
        assert!(output.status.success(), "{:?} failed: {:?}", args, output);
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

fn block_ids(show: &Value) -> Vec<String> {
    show["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn first_run_builds_starter_state() {
    let sb = Sandbox::new();
    let show = sb.json(&["show"]);
    assert_eq!(show["kind"], "journal");
    assert_eq!(show["blocks"].as_array().unwrap().len(), 3);
    assert_eq!(show["blocks"][0]["tags"][0], "work");
    assert_eq!(show["blocks"][0]["links"][0], "ProjectX");
    assert_eq!(show["blocks"][2]["query"]["subtitle"], "scope:current · status:TODO");
    assert!(sb.snapshot().exists());

    let docs = sb.json(&["docs"]);
    let titles: Vec<&str> = docs
        .as_array()
        .unwrap()
        .iter()
        .filter(|d| d["kind"] == "page")
        .map(|d| d["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Dashboard", "ProjectX"]);
}

#[test]
fn add_edit_cycle_remove_by_prefix() {
    let sb = Sandbox::new();
    let added = sb.json(&["add", "draft #idea"]);
    let id = added["id"].as_str().unwrap().to_string();
    assert_eq!(added["status"], "TODO");

    let prefix = &id[..8];
    sb.dbk()
        .args(["edit", prefix, "final [[Report]]"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    let cycled = sb.json(&["cycle", prefix]);
    assert_eq!(cycled["status"], "DOING");

    let show = sb.json(&["show"]);
    assert_eq!(show["blocks"][0]["id"], id.as_str());
    assert_eq!(show["blocks"][0]["text"], "final [[Report]]");
    assert_eq!(show["blocks"][0]["status"], "DOING");

    // The link created the page
    sb.dbk().args(["open", "page", "Report"]).assert().success();

    sb.dbk().args(["rm", &id]).assert().success();
    sb.dbk().arg("today").assert().success();
    assert!(!block_ids(&sb.json(&["show"])).contains(&id));
}

#[test]
fn backlinks_follow_page_references() {
    let sb = Sandbox::new();
    let today = sb.json(&["today"]);
    let journal_id = today["id"].as_str().unwrap().to_string();

    let added = sb.json(&["add", "see [[Foo]]"]);
    let block_id = added["id"].as_str().unwrap().to_string();

    sb.dbk().args(["page", "Foo"]).assert().success();
    let hits = sb.json(&["backlinks"]);
    let hits = hits.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], block_id.as_str());
    assert_eq!(hits[0]["scopeId"], journal_id.as_str());

    sb.dbk().args(["open", "journal", &journal_id]).assert().success();
    let hits = sb.json(&["backlinks"]);
    assert!(hits
        .as_array()
        .unwrap()
        .iter()
        .all(|h| h["id"] != block_id.as_str()));
}

#[test]
fn query_and_tags() {
    let sb = Sandbox::new();
    let results = sb.json(&["query", "status:todo tag:#work scope:all"]);
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0]["text"].as_str().unwrap().contains("#work"));

    let limited = sb.json(&["query", "scope:all", "--limit", "2"]);
    assert_eq!(limited.as_array().unwrap().len(), 2);

    let tags = sb.json(&["tags"]);
    assert_eq!(tags[0]["tag"], "work");
    assert_eq!(tags[0]["count"], 1);

    let tagged = sb.json(&["tags", "work"]);
    assert_eq!(tagged.as_array().unwrap().len(), 1);
}

#[test]
fn saved_views_lifecycle() {
    let sb = Sandbox::new();
    let saved = sb.json(&["views", "save", "Open work", "status:TODO tag:work"]);
    let id = saved["id"].as_str().unwrap().to_string();
    assert_eq!(saved["subtitle"], "scope:all · status:TODO · #work");

    sb.dbk()
        .args(["views", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Open work"));

    let results = sb.json(&["views", "run", &id[..6]]);
    assert_eq!(results.as_array().unwrap().len(), 1);

    sb.dbk().args(["views", "rm", &id]).assert().success();
    sb.dbk()
        .args(["views", "run", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No view matches"));

    sb.dbk()
        .args(["views", "save", "   ", "status:TODO"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn add_query_block_defaults() {
    let sb = Sandbox::new();
    let added = sb.json(&["add", "--query"]);
    assert_eq!(added["text"], "{{query status:TODO scope:current}}");

    let added = sb.json(&["add", "--query", "status:doing"]);
    assert_eq!(added["text"], "{{query status:DOING scope:all}}");
}

#[test]
fn corrupt_snapshot_recovers_to_defaults() {
    let sb = Sandbox::new();
    std::fs::create_dir_all(sb.snapshot().parent().unwrap()).unwrap();
    std::fs::write(sb.snapshot(), "{ definitely not json").unwrap();

    let show = sb.json(&["show"]);
    assert_eq!(show["blocks"].as_array().unwrap().len(), 3);
    let content = std::fs::read_to_string(sb.snapshot()).unwrap();
    assert!(content.contains("\"journals\""));
}

#[test]
fn errors_are_reported() {
    let sb = Sandbox::new();
    sb.dbk()
        .args(["open", "page", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page not found: Nowhere"));

    sb.dbk()
        .args(["page", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));

    sb.dbk()
        .args(["cycle", "zzzz-no-such-block"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No block matches"));
}

#[test]
fn reset_requires_confirmation() {
    let sb = Sandbox::new();
    sb.dbk().args(["page", "Scratch"]).assert().success();

    sb.dbk()
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    sb.dbk().args(["reset", "--yes"]).assert().success();
    let docs = sb.json(&["docs"]);
    assert!(docs
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d["title"] != "Scratch"));
}

#[test]
fn config_init_and_show() {
    let sb = Sandbox::new();
    sb.dbk()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));
    assert!(sb.config().exists());

    sb.dbk()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    sb.dbk()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snippet_width = 120"));
}

#[test]
fn config_limits_apply() {
    let sb = Sandbox::new();
    std::fs::write(sb.config(), "[display]\nquery_limit = 1\n").unwrap();
    let results = sb.json(&["query", "scope:all"]);
    assert_eq!(results.as_array().unwrap().len(), 1);
}

#[test]
fn malformed_config_is_an_error() {
    let sb = Sandbox::new();
    std::fs::write(sb.config(), "[display\n").unwrap();
    sb.dbk().arg("show").assert().failure();
    // Config commands still work so the file can be regenerated
    sb.dbk().args(["config", "init", "--force"]).assert().success();
    sb.dbk().arg("show").assert().success();
}
