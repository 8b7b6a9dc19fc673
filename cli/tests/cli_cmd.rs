//! Runs the `brandcopy` binary in an isolated environment: empty XDG config home, no
//! `.env`, no API key. Only paths that never reach the network are exercised.

use std::path::{Path, PathBuf};
use std::process::Command;

struct Sandbox {
    home: tempfile::TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            home: tempfile::tempdir().unwrap(),
        }
    }

    fn run(&self, args: &[&str]) -> std::process::Output {
        self.run_with_env(args, &[])
    }

    /// Like `run`, with extra variables set on the child process only.
    fn run_with_env(&self, args: &[&str], vars: &[(&str, &Path)]) -> std::process::Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_brandcopy"));
        cmd.args(args)
            .current_dir(self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path())
            .env_remove("OPENAI_API_KEY")
            .env_remove("BRAND_PACK")
            .env_remove("LOG_FILE")
            .env_remove("RUST_LOG");
        for (key, value) in vars {
            cmd.env(key, value);
        }
        cmd.output().expect("failed to run brandcopy binary")
    }

    /// Writes the bundled pack under another brand name.
    fn write_pack(&self, file: &str, brand: &str) -> PathBuf {
        let mut pack: serde_json::Value =
            serde_json::from_str(include_str!("../../brandcopy/brand_packs/bk_brand_pack.json")).unwrap();
        pack["brand"] = serde_json::Value::from(brand);
        let path = self.home.path().join(file);
        std::fs::write(&path, pack.to_string()).unwrap();
        path
    }
}

#[test]
fn help_lists_generation_flags() {
    let out = Sandbox::new().run(&["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("--channel"));
    assert!(stdout.contains("--dry-run"));
}

/// **Scenario**: a dry run prints the composed prompt and needs no credentials.
#[test]
fn dry_run_prints_prompt() {
    let out = Sandbox::new().run(&[
        "--dry-run",
        "--country",
        "Argentina",
        "--channel",
        "push",
        "--segment",
        "Reactivación",
        "--theme",
        "Stranger Things",
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("voseo"));
    assert!(stdout.contains("Burger King x Stranger Things"));
    assert!(stdout.contains("max 130 characters"));
}

#[test]
fn dry_run_json_to_file() {
    let sandbox = Sandbox::new();
    let path = sandbox.home.path().join("prompt.json");
    let out = sandbox.run(&["--dry-run", "--json", "--file", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(v["prompt"].as_str().unwrap().contains("Chilean Spanish"));
}

#[test]
fn missing_api_key_fails_before_any_request() {
    let out = Sandbox::new().run(&["--channel", "inapp"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("missing credential"), "stderr: {}", stderr);
}

/// **Scenario**: `[generate]` defaults from the XDG config file apply to the prompt.
#[test]
fn config_settings_apply_to_prompt() {
    let sandbox = Sandbox::new();
    let dir = sandbox.home.path().join("brandcopy");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[generate]\noptions = 5\nplaceholders = true\n").unwrap();

    let out = sandbox.run(&["--dry-run"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Write EXACTLY 5 copy options"));
    assert!(stdout.contains("Product (optional): (none)"));
}

#[test]
fn invalid_brand_pack_is_reported() {
    let sandbox = Sandbox::new();
    let pack = sandbox.home.path().join("pack.json");
    std::fs::write(&pack, "{ \"brand\": ").unwrap();
    let out = sandbox.run(&["--dry-run", "--brand-pack", pack.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("brand pack"));
}

/// **Scenario**: `BRAND_PACK` replaces the bundled pack, and `--brand-pack` wins over it.
#[test]
fn brand_pack_env_and_flag_precedence() {
    let sandbox = Sandbox::new();
    let env_pack = sandbox.write_pack("env_pack.json", "Other Brand");
    let flag_pack = sandbox.write_pack("flag_pack.json", "Flag Brand");

    let out = sandbox.run_with_env(&["--dry-run"], &[("BRAND_PACK", env_pack.as_path())]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("copywriter for Other Brand"));
    assert!(!stdout.contains("copywriter for Burger King"));

    let out = sandbox.run_with_env(
        &["--dry-run", "--brand-pack", flag_pack.to_str().unwrap()],
        &[("BRAND_PACK", env_pack.as_path())],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("copywriter for Flag Brand"));
    assert!(!stdout.contains("Other Brand"));
}

/// **Scenario**: with `LOG_FILE` set, logs land in that file as plain text and stdout
/// keeps only the prompt.
#[test]
fn log_file_receives_plain_text_logs() {
    let sandbox = Sandbox::new();
    let log = sandbox.home.path().join("brandcopy.log");

    let out = sandbox.run_with_env(&["--dry-run"], &[("LOG_FILE", log.as_path())]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(!String::from_utf8_lossy(&out.stdout).contains("logging to file"));

    let text = std::fs::read_to_string(&log).unwrap();
    assert!(text.contains("brandcopy logging to file"), "log: {}", text);
    assert!(!text.contains("\x1b["));
}
