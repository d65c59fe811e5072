#![allow(deprecated)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const GOOD_YAML: &str = r#"
tables:
  - name: users
    filter:
      match: "users.active = TRUE"
      limit: 25
    anonymise:
      email: EmailAddress
      username: UserName
  - name: audit_log
    ignore_data: true
"#;

pub const GOOD_JSON: &str = r#"{
  "tables": [
    { "name": "customers", "anonymise": { "phone": "PhoneNumber" } }
  ]
}"#;

/// A scratch project directory to run klepto in
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    pub fn binary_path(&self) -> &'static str {
        env!("CARGO_BIN_EXE_klepto")
    }

    pub fn klepto(&self) -> Command {
        let mut cmd = Command::cargo_bin("klepto").expect("klepto binary");
        cmd.current_dir(self.dir.path());
        cmd
    }
}
