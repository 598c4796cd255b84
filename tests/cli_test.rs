use std::process::Command;

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_indexnow"));
    for var in ["RUST_LOG", "INDEXNOW_SITE_URL", "INDEXNOW_BIND_ADDR", "INDEXNOW_ENABLED"] {
        command.env_remove(var);
    }
    command
}

#[test]
fn test_version_flag() {
    let output = binary()
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success(), "Version flag should exit with code 0");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.trim().strip_prefix("indexnow ").unwrap_or("");
    assert_eq!(version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_help_lists_commands() {
    let output = binary().arg("--help").output().expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["serve", "key", "submit"] {
        assert!(stdout.contains(command), "help should mention {}", command);
    }
}

#[test]
fn test_unknown_argument_fails() {
    let output = binary()
        .arg("--frobnicate")
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected argument '--frobnicate'"));
}

#[test]
fn test_key_command_creates_and_reuses_key() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let key_path = dir.path().join("key.json");
    std::fs::write(&config_path, r#"{"site_url": "https://example.com/"}"#).unwrap();

    let run = || {
        binary()
            .arg("key")
            .env("INDEXNOW_CONFIG", &config_path)
            .env("INDEXNOW_KEY_STORE", &key_path)
            .output()
            .expect("Failed to execute binary")
    };

    let first = run();
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    let stdout = String::from_utf8_lossy(&first.stdout).to_string();
    let mut lines = stdout.lines();
    let key = lines.next().unwrap().to_string();
    assert_eq!(key.len(), 32);
    assert_eq!(lines.next().unwrap(), format!("https://example.com/{}.txt", key));
    assert!(key_path.exists());

    let second = run();
    assert_eq!(String::from_utf8_lossy(&second.stdout), stdout);
}

#[test]
fn test_submit_disabled_prints_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{"site_url": "https://example.com", "enabled": false}"#,
    )
    .unwrap();

    let output = binary()
        .args(["submit", "https://example.com/a/"])
        .env("INDEXNOW_CONFIG", &config_path)
        .env("INDEXNOW_KEY_STORE", dir.path().join("key.json"))
        .env_remove("INDEXNOW_ENABLED")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let outcomes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcomes, serde_json::json!([]));
}
