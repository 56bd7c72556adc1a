#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway store directory with helpers for driving the tl binary.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A tl command pointed at this store, run from inside the store dir so
    /// no stray tl.toml from the checkout leaks in.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tl").expect("binary");
        cmd.current_dir(self.dir.path());
        cmd.arg("--store").arg(self.dir.path());
        cmd
    }

    pub fn add(&self, title: &str, description: &str) {
        self.cmd()
            .args(["add", "--title", title, "--description", description])
            .assert()
            .success();
    }

    pub fn login(&self) {
        self.cmd()
            .args(["login", "--username", "casey", "--password", "abcdef1!"])
            .assert()
            .success();
    }

    /// The persisted task list, or an empty array when no document exists.
    pub fn tasks_json(&self) -> serde_json::Value {
        let path = self.dir.path().join("tasks.json");
        if !path.exists() {
            return serde_json::json!([]);
        }
        let contents = fs::read_to_string(path).expect("read tasks.json");
        serde_json::from_str(&contents).expect("parse tasks.json")
    }

    pub fn first_id(&self) -> String {
        self.tasks_json()[0]["id"]
            .as_str()
            .expect("first task id")
            .to_string()
    }

    pub fn write_tasks_raw(&self, contents: &str) {
        fs::write(self.dir.path().join("tasks.json"), contents).expect("write tasks.json");
    }

    pub fn session_raw(&self) -> String {
        let path = self.dir.path().join("session.json");
        if !path.exists() {
            return String::new();
        }
        fs::read_to_string(path).expect("read session.json")
    }
}
