use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_notevault"))
}

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir should be available");
        std::fs::create_dir_all(dir.path().join("c")).expect("create config dir");
        std::fs::create_dir_all(dir.path().join("d")).expect("create data dir");
        Self { dir }
    }

    fn initialized() -> Self {
        let sandbox = Self::new();
        let output = sandbox.run(&["init"]);
        assert_success(&output);
        sandbox
    }

    fn config_home(&self) -> PathBuf {
        self.dir.path().join("c")
    }

    fn data_home(&self) -> PathBuf {
        self.dir.path().join("d")
    }

    fn key_path(&self) -> PathBuf {
        self.config_home().join("notevault").join("notevault.key")
    }

    fn store_path(&self) -> PathBuf {
        self.data_home().join("notevault").join("notes.vault")
    }

    fn backup_dir(&self) -> PathBuf {
        self.data_home().join("notevault").join("backups")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_DATA_HOME", self.data_home())
            .env("HOME", self.dir.path())
            .env_remove("NOTEVAULT_STORE")
            .env_remove("NOTEVAULT_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("binary should run")
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.run(args);
        assert_success(&output);
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
    }
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed: {}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_file(path: &Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write should succeed");
}

#[test]
fn test_init_creates_config_and_key() {
    let sandbox = Sandbox::initialized();

    let config_path = sandbox.config_home().join("notevault").join("config.toml");
    let config = std::fs::read_to_string(config_path).expect("config should exist");
    assert!(config.contains("[store]"));
    assert!(config.contains("[key]"));
    let key = std::fs::read(sandbox.key_path()).expect("key should exist");
    assert_eq!(key.len(), 32);

    let again = sandbox.run(&["init"]);
    assert_eq!(again.status.code(), Some(4));
    assert!(stderr(&again).contains("--force"));
}

#[test]
fn test_commands_without_config_fail_not_found() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["list"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("notevault init"));
}

#[test]
fn test_add_list_show_round_trip() {
    let sandbox = Sandbox::initialized();

    let added = sandbox.json(&[
        "add",
        "Buy milk",
        "--tag",
        "errand",
        "--priority",
        "low",
        "--json",
    ]);
    let id = added["id"]
        .as_str()
        .expect("id should be a string")
        .to_string();

    let listed = sandbox.json(&["list", "--json"]);
    let notes = listed.as_array().expect("list should be an array");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], id.as_str());
    assert_eq!(notes[0]["title"], "Buy milk");
    assert_eq!(notes[0]["tags"][0], "errand");
    assert_eq!(notes[0]["priority"], "low");

    let shown = sandbox.json(&["show", &id[..8], "--json"]);
    assert_eq!(shown["id"], id.as_str());

    let raw = std::fs::read(sandbox.store_path()).expect("store should exist");
    assert!(!String::from_utf8_lossy(&raw).contains("Buy milk"));
}

#[test]
fn test_edit_and_delete() {
    let sandbox = Sandbox::initialized();
    let added = sandbox.json(&["add", "Draft", "--json"]);
    let id = added["id"].as_str().expect("id").to_string();

    assert_success(&sandbox.run(&[
        "edit",
        &id,
        "--title",
        "Final",
        "--favorite",
        "true",
        "--category",
        "work",
    ]));
    let shown = sandbox.json(&["show", &id, "--json"]);
    assert_eq!(shown["title"], "Final");
    assert_eq!(shown["isFavorite"], true);
    assert_eq!(shown["category"], "work");

    let favorites = sandbox.json(&["list", "--favorites", "--json"]);
    assert_eq!(favorites.as_array().expect("array").len(), 1);

    let nothing = sandbox.run(&["edit", &id]);
    assert_eq!(nothing.status.code(), Some(4));

    assert_success(&sandbox.run(&["delete", &id]));
    let missing = sandbox.run(&["show", &id]);
    assert_eq!(missing.status.code(), Some(3));
}

#[test]
fn test_invalid_priority_is_invalid_input() {
    let sandbox = Sandbox::initialized();
    let output = sandbox.run(&["add", "x", "--priority", "urgent"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("urgent"));
    assert!(!sandbox.store_path().exists());
}

#[test]
fn test_wrong_key_fails_authentication() {
    let sandbox = Sandbox::initialized();
    assert_success(&sandbox.run(&["add", "secret"]));

    write_file(&sandbox.key_path(), &[0x42; 32]);

    let output = sandbox.run(&["list"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("key file"));
}

#[test]
fn test_truncated_key_is_reported() {
    let sandbox = Sandbox::initialized();
    write_file(&sandbox.key_path(), &[0x42; 10]);

    let output = sandbox.run(&["list"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("expected 32 bytes, found 10"));
    assert_eq!(
        std::fs::read(sandbox.key_path()).expect("key file").len(),
        10
    );
}

#[test]
fn test_backup_and_restore() {
    let sandbox = Sandbox::initialized();
    assert_success(&sandbox.run(&["add", "keep me"]));

    let backup = sandbox.run(&["backup", "--quiet"]);
    assert_success(&backup);
    let backup_path = PathBuf::from(stdout(&backup).trim());
    assert!(backup_path.starts_with(sandbox.backup_dir()));

    let listed = sandbox.json(&["backups", "--json"]);
    let name = listed[0]["name"].as_str().expect("name").to_string();

    assert_success(&sandbox.run(&["add", "added later"]));
    let before = sandbox.json(&["list", "--json"]);
    assert_eq!(before.as_array().expect("array").len(), 2);

    assert_success(&sandbox.run(&["restore", &name]));
    let notes = sandbox.json(&["list", "--json"]);
    let notes = notes.as_array().expect("array");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "keep me");
}

#[test]
fn test_restore_corrupt_backup_keeps_store() {
    let sandbox = Sandbox::initialized();
    assert_success(&sandbox.run(&["add", "live"]));
    let backup = sandbox.run(&["backup", "--quiet"]);
    assert_success(&backup);
    let backup_path = PathBuf::from(stdout(&backup).trim());

    let raw = std::fs::read(&backup_path).expect("read backup");
    write_file(&backup_path, &raw[..raw.len() / 2]);

    let output = sandbox.run(&["restore", backup_path.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(5));
    let notes = sandbox.json(&["list", "--json"]);
    assert_eq!(notes[0]["title"], "live");

    let missing = sandbox.run(&["restore", "notes_backup_19990101_000000.nvbak"]);
    assert_eq!(missing.status.code(), Some(3));
}

#[test]
fn test_import_skips_bad_rows_and_exports() {
    let sandbox = Sandbox::initialized();
    let csv = sandbox.dir.path().join("in.csv");
    write_file(
        &csv,
        b"title,content,tags,priority,category,due_date\n\
          Buy milk,,errand,low,shopping,2026-02-01 08:00\n\
          Bad,,x,urgent,,\n\
          Plan <trip>,beach,travel,high,personal,2026-06-01\n",
    );

    let output = sandbox.run(&["import", csv.to_str().expect("utf-8 path")]);
    assert_success(&output);
    assert!(stdout(&output).contains("Imported 2 notes (1 rows skipped)"));
    assert!(stderr(&output).contains("Skipped row 2"));

    let exported = sandbox.run(&["export", "--format", "csv"]);
    assert_success(&exported);
    let text = stdout(&exported);
    assert!(text.starts_with("title,content,tags,priority,category,due_date"));
    assert!(text.contains("Buy milk,,errand,low,shopping,2026-02-01 08:00"));

    let html_path = sandbox.dir.path().join("out.html");
    assert_success(&sandbox.run(&[
        "export",
        "--format",
        "html",
        "--output",
        html_path.to_str().expect("utf-8 path"),
    ]));
    let html = std::fs::read_to_string(&html_path).expect("html should exist");
    assert!(html.contains("Plan &lt;trip&gt;"));
}

#[test]
fn test_stats_json() {
    let sandbox = Sandbox::initialized();
    let output = sandbox.run(&["add", "a", "--favorite", "--category", "work"]);
    assert_success(&output);
    assert_success(&sandbox.run(&["add", "b"]));

    let stats = sandbox.json(&["stats", "--json"]);
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["favorite_count"], 1);
    assert_eq!(stats["archived_count"], 0);
    assert_eq!(stats["categories"], serde_json::json!(["work", "general"]));
}

#[test]
fn test_store_flag_works_without_config() {
    let sandbox = Sandbox::new();
    let store = sandbox.dir.path().join("elsewhere.vault");
    let store_arg = store.to_str().expect("utf-8 path");

    assert_success(&sandbox.run(&["--store", store_arg, "add", "portable"]));
    assert!(store.exists());
    assert!(sandbox.key_path().exists());

    let notes = sandbox.json(&["--store", store_arg, "list", "--json"]);
    assert_eq!(notes[0]["title"], "portable");
}
