//! Integration tests for ctxsync

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use filetime::FileTime;
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    struct Project {
        dir: TempDir,
        config: PathBuf,
    }

    impl Project {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let config = dir.path().join("ctxsync-config.toml");
            Self { dir, config }
        }

        fn root(&self) -> &Path {
            self.dir.path()
        }

        fn write_config(&self, content: &str) {
            std::fs::write(&self.config, content).unwrap();
        }

        /// Command isolated from the user's global and local config
        fn ctxsync(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("ctxsync");
            cmd.current_dir(self.root())
                .arg("--no-local")
                .arg("--config")
                .arg(&self.config);
            cmd
        }

        fn hook(&self, subcommand: &str, payload: serde_json::Value) -> assert_cmd::assert::Assert {
            self.ctxsync()
                .arg(subcommand)
                .write_stdin(payload.to_string())
                .assert()
        }

        fn record(&self, file: &str) {
            self.hook(
                "record",
                serde_json::json!({
                    "cwd": self.root(),
                    "hook_event_name": "PostToolUse",
                    "tool_name": "Write",
                    "tool_input": {"file_path": file}
                }),
            )
            .success()
            .stdout(predicate::str::is_empty());
        }

        fn detect(&self) -> assert_cmd::assert::Assert {
            self.hook(
                "detect",
                serde_json::json!({"cwd": self.root(), "hook_event_name": "UserPromptSubmit"}),
            )
        }

        fn store_path(&self) -> PathBuf {
            self.root().join(".cache-state").join("cache.json")
        }

        fn store(&self) -> serde_json::Value {
            serde_json::from_slice(&std::fs::read(self.store_path()).unwrap()).unwrap()
        }
    }

    fn set_mtime(path: &Path, secs: i64) {
        filetime::set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("ctxsync")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Detect external file changes"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("ctxsync")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("ctxsync"));
    }

    #[test]
    fn record_writes_store_entry() {
        let project = Project::new();
        let file = project.root().join("a.py");
        std::fs::write(&file, "x = 1\n").unwrap();

        project.record("a.py");

        let store = project.store();
        let entry = &store[file.to_str().unwrap()];
        assert_eq!(entry["hash"].as_str().unwrap().len(), 32);
        assert!(entry["mtime"].is_f64());
    }

    #[test]
    fn changed_file_is_reported() {
        let project = Project::new();
        let file = project.root().join("a.py");
        std::fs::write(&file, "x = 1\n").unwrap();
        set_mtime(&file, 1_700_000_000);
        project.record("a.py");
        let old_hash = project.store()[file.to_str().unwrap()]["hash"].clone();

        std::fs::write(&file, "x = 2\n").unwrap();
        set_mtime(&file, 1_700_000_060);

        let output = project.detect().success().get_output().stdout.clone();
        let payload: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(payload["hookSpecificOutput"]["hookEventName"], "UserPromptSubmit");
        let context = payload["hookSpecificOutput"]["additionalContext"]
            .as_str()
            .unwrap();
        assert!(context.starts_with("The following files have been modified externally:"));
        assert!(context.contains("\n- a.py\n"));
        assert!(context.ends_with("Please check the current state of these files."));

        let entry = &project.store()[file.to_str().unwrap()];
        assert_ne!(entry["hash"], old_hash);
        assert_eq!(entry["mtime"], 1_700_000_060.0);
    }

    #[test]
    fn deleted_file_is_reported_then_forgotten() {
        let project = Project::new();
        let file = project.root().join("b.txt");
        std::fs::write(&file, "bye").unwrap();
        project.record("b.txt");

        std::fs::remove_file(&file).unwrap();

        project
            .detect()
            .success()
            .stdout(predicate::str::contains("- b.txt (deleted)"));
        assert!(project.store().as_object().unwrap().is_empty());

        project.detect().success().stdout(predicate::str::is_empty());
    }

    #[test]
    fn steady_state_is_silent() {
        let project = Project::new();
        std::fs::write(project.root().join("a.py"), "x").unwrap();
        project.record("a.py");

        project.detect().success().stdout(predicate::str::is_empty());
    }

    #[test]
    fn empty_store_is_silent() {
        let project = Project::new();

        project.detect().success().stdout(predicate::str::is_empty());
        assert!(!project.store_path().exists());
    }

    #[test]
    fn malformed_payload_is_ignored() {
        let project = Project::new();

        for subcommand in ["record", "detect", "lifecycle", "lint"] {
            project
                .ctxsync()
                .arg(subcommand)
                .write_stdin("not json at all")
                .assert()
                .success()
                .stdout(predicate::str::is_empty());
        }
        assert!(!project.root().join(".cache-state").exists());
    }

    #[test]
    fn corrupt_store_is_treated_as_empty() {
        let project = Project::new();
        std::fs::create_dir_all(project.root().join(".cache-state")).unwrap();
        std::fs::write(project.store_path(), "{{{{").unwrap();

        project.detect().success().stdout(predicate::str::is_empty());

        std::fs::write(project.root().join("a.py"), "x").unwrap();
        project.record("a.py");
        assert_eq!(project.store().as_object().unwrap().len(), 1);
    }

    #[test]
    fn resume_keeps_cache() {
        let project = Project::new();
        std::fs::write(project.root().join("a.py"), "x").unwrap();
        project.record("a.py");
        let before = std::fs::read(project.store_path()).unwrap();

        project
            .hook(
                "lifecycle",
                serde_json::json!({
                    "cwd": project.root(),
                    "hook_event_name": "SessionStart",
                    "source": "resume"
                }),
            )
            .success();

        assert_eq!(std::fs::read(project.store_path()).unwrap(), before);
    }

    #[test]
    fn clear_and_end_remove_cache() {
        let project = Project::new();
        let events = [
            serde_json::json!({"cwd": project.root(), "hook_event_name": "SessionStart", "source": "clear"}),
            serde_json::json!({"cwd": project.root(), "hook_event_name": "SessionEnd"}),
        ];

        std::fs::write(project.root().join("a.py"), "x").unwrap();
        for event in events {
            project.record("a.py");
            assert!(project.store_path().exists());

            project.hook("lifecycle", event).success();

            assert!(!project.root().join(".cache-state").exists());
        }
    }

    #[test]
    fn lint_missing_tool_exits_2() {
        let project = Project::new();
        project.write_config("[lint]\nprogram = \"ctxsync-no-such-linter\"\n");
        std::fs::write(project.root().join("a.py"), "x = 1\n").unwrap();

        project
            .hook(
                "lint",
                serde_json::json!({"cwd": project.root(), "tool_input": {"file_path": "a.py"}}),
            )
            .code(2)
            .stderr(predicate::str::contains("Linter not found"));
    }

    #[test]
    fn lint_ignores_other_files() {
        let project = Project::new();
        project.write_config("[lint]\nprogram = \"ctxsync-no-such-linter\"\n");
        std::fs::write(project.root().join("main.rs"), "fn main() {}").unwrap();

        project
            .hook(
                "lint",
                serde_json::json!({"cwd": project.root(), "tool_input": {"file_path": "main.rs"}}),
            )
            .success();
    }

    #[test]
    fn disabled_cache_records_nothing() {
        let project = Project::new();
        project.write_config("[cache]\nenabled = false\n");
        std::fs::write(project.root().join("a.py"), "x").unwrap();

        project.record("a.py");

        assert!(!project.store_path().exists());
    }

    #[test]
    fn broken_config_still_clears_on_session_end() {
        let project = Project::new();
        std::fs::write(project.root().join("a.py"), "x").unwrap();
        project.record("a.py");
        project.write_config("[lint\n");

        project
            .hook(
                "lifecycle",
                serde_json::json!({"cwd": project.root(), "hook_event_name": "SessionEnd"}),
            )
            .success()
            .stdout(predicate::str::is_empty());

        assert!(!project.root().join(".cache-state").exists());
    }

    #[test]
    fn broken_config_falls_back_to_defaults() {
        let project = Project::new();
        let file = project.root().join("a.py");
        std::fs::write(&file, "x = 1\n").unwrap();
        set_mtime(&file, 1_700_000_000);
        project.record("a.py");
        project.write_config("[lint\n");

        std::fs::write(&file, "x = 2\n").unwrap();
        set_mtime(&file, 1_700_000_060);

        project
            .detect()
            .success()
            .stdout(predicate::str::contains("- a.py"))
            .stderr(predicate::str::contains("Ignoring configuration"));
    }

    #[test]
    fn local_config_is_found_from_payload_root() {
        let project = Project::new();
        let elsewhere = TempDir::new().unwrap();
        std::fs::write(
            project.root().join(".ctxsync.toml"),
            "[cache]\nenabled = false\n",
        )
        .unwrap();
        std::fs::write(project.root().join("a.py"), "x").unwrap();

        cargo_bin_cmd!("ctxsync")
            .current_dir(elsewhere.path())
            .arg("--config")
            .arg(&project.config)
            .arg("record")
            .write_stdin(
                serde_json::json!({
                    "cwd": project.root(),
                    "tool_input": {"file_path": "a.py"}
                })
                .to_string(),
            )
            .assert()
            .success();

        assert!(!project.store_path().exists());
    }

    #[test]
    fn cache_list_json() {
        let project = Project::new();
        std::fs::write(project.root().join("a.py"), "x").unwrap();
        project.record("a.py");

        let output = project
            .ctxsync()
            .args(["cache", "list", "--format", "json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let entries: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(entries.as_array().unwrap().len(), 1);
        assert!(entries[0]["path"].as_str().unwrap().ends_with("a.py"));
    }

    #[test]
    fn cache_clear_removes_directory() {
        let project = Project::new();
        std::fs::write(project.root().join("a.py"), "x").unwrap();
        project.record("a.py");

        project
            .ctxsync()
            .args(["cache", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Cleared"));

        assert!(!project.root().join(".cache-state").exists());
    }

    #[test]
    fn hooks_prints_settings() {
        let project = Project::new();
        project
            .ctxsync()
            .arg("hooks")
            .assert()
            .success()
            .stdout(predicate::str::contains("UserPromptSubmit"))
            .stdout(predicate::str::contains("lifecycle"));
    }

    #[test]
    fn config_path_shows_override() {
        let project = Project::new();
        project
            .ctxsync()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("ctxsync-config.toml"));
    }

    #[test]
    fn config_show() {
        let project = Project::new();
        project
            .ctxsync()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[lint]"));
    }
}
