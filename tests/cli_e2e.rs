//! End-to-end tests: run the `convview` binary against a snapshot file.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

const SNAPSHOT: &str = r#"{
    "alive": true,
    "models": [{"engine": "llama", "name": "small"}],
    "conversations": [
        {
            "id": {"tb": "conversation", "id": {"String": "older"}},
            "name": "Older chat",
            "start_time": "2020-01-01T00:00:00Z",
            "modified_time": "2020-01-02T00:00:00Z",
            "messages": [
                {"timestamp": "2020-01-01T00:00:00Z", "role": "user", "content": "hi"}
            ]
        },
        {
            "id": {"tb": "conversation", "id": {"String": "newer"}},
            "name": "Newer chat",
            "start_time": "2021-01-01T00:00:00Z",
            "modified_time": "2021-01-02T00:00:00Z",
            "messages": [
                {"timestamp": "2021-01-01T00:00:00Z", "role": "assistant",
                 "content": "```python\nprint(1)\n```"}
            ]
        }
    ]
}"#;

/// Scratch directory holding a snapshot and a config that keeps logs local.
struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("convview_e2e_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("snapshot.json"), SNAPSHOT).unwrap();
        fs::write(
            dir.join("config.toml"),
            format!(
                "log_file_path = {:?}\n\n[[windows]]\nlabel = \"Since 2021\"\nmax_age_hours = {}\n",
                dir.join("convview.log").display().to_string(),
                hours_since_2021(),
            ),
        )
        .unwrap();
        Self { dir }
    }

    fn run(&self, extra: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_convview"))
            .arg(self.dir.join("snapshot.json"))
            .arg("--config")
            .arg(self.dir.join("config.toml"))
            .args(extra)
            .env_remove("CONVVIEW_THEME")
            .output()
            .expect("Failed to execute binary")
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

/// A window reaching back to 2021-01-01, so only "newer" falls inside it.
fn hours_since_2021() -> i64 {
    let start = chrono::DateTime::parse_from_rfc3339("2021-01-01T00:00:00Z").unwrap();
    (chrono::Utc::now() - start.with_timezone(&chrono::Utc)).num_hours()
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "binary failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn binary_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_convview"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "Expected version in output, got: {}",
        stdout
    );
}

#[test]
fn lists_most_recent_first() {
    let fixture = Fixture::new("list");
    let json = stdout_json(&fixture.run(&[]));

    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["newer", "older"]);
}

#[test]
fn single_conversation_by_id() {
    let fixture = Fixture::new("by_id");
    let json = stdout_json(&fixture.run(&["--id", "newer", "--plain"]));

    assert_eq!(json["name"], "Newer chat");
    assert_eq!(json["messages"][0]["role"], "assistant");
    assert_eq!(
        json["messages"][0]["chunks"][0],
        serde_json::json!({"kind": "code_block", "language": "python", "code": "print(1)"})
    );
}

#[test]
fn unknown_id_fails() {
    let fixture = Fixture::new("unknown_id");
    let output = fixture.run(&["--id", "missing"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing"));
}

#[test]
fn grouped_uses_configured_windows() {
    let fixture = Fixture::new("grouped");
    let json = stdout_json(&fixture.run(&["--grouped"]));

    let groups = json.as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["name"], "Since 2021");
    let members: Vec<&str> = groups[0]["conversations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(members, vec!["newer"]);
}
