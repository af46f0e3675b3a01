use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serial_test::serial;

/// Helper to create a Command for the `qubit` binary with a temporary home.
fn qubit_cmd(home: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("qubit").expect("binary exists");
    cmd.env("QUBIT_HOME", home.path());
    cmd
}

#[test]
#[serial]
fn test_init_topics_show() {
    let temp = assert_fs::TempDir::new().unwrap();

    // Seed the knowledge base file
    qubit_cmd(&temp)
        .args(["init"])
        .assert()
        .success()
        .stdout(contains("Seeded knowledge base").and(contains("21 topics")));
    assert!(temp.path().join("knowledge_base.json").exists());

    // A second init without --force refuses to clobber it
    qubit_cmd(&temp)
        .args(["init"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    qubit_cmd(&temp)
        .args(["init", "--force"])
        .assert()
        .success();

    // Topics list spans the whole catalog
    qubit_cmd(&temp)
        .args(["topics"])
        .assert()
        .success()
        .stdout(contains("password reset").and(contains("no internet connection")));

    // Show is case-insensitive and numbers the solutions
    qubit_cmd(&temp)
        .args(["show", "PASSWORD RESET"])
        .assert()
        .success()
        .stdout(contains("password reset").and(contains("1. Click **Forgot Password**")));

    qubit_cmd(&temp)
        .args(["show", "quantum gravity"])
        .assert()
        .failure()
        .stderr(contains("not found"));

    temp.close().unwrap();
}

#[test]
#[serial]
fn test_ask_known_problem() {
    let temp = assert_fs::TempDir::new().unwrap();

    // Exact topic text scores 1.0 no matter the drift, so the wifi
    // solutions come back verbatim with the overflow note
    qubit_cmd(&temp)
        .args(["ask", "--seed", "7", "wifi", "not", "connecting"])
        .assert()
        .success()
        .stdout(
            contains("Toggle Airplane mode or reboot router and modem")
                .and(contains("• Forget network and reconnect with correct credentials"))
                .and(contains("more quantum possibilities")),
        );

    temp.close().unwrap();
}

#[test]
#[serial]
fn test_ask_reserved_commands() {
    let temp = assert_fs::TempDir::new().unwrap();

    qubit_cmd(&temp)
        .args(["ask", "voice", "support"])
        .assert()
        .success()
        .stdout(contains("🚧").and(contains("Voice Support")));

    qubit_cmd(&temp)
        .args(["ask", "help"])
        .assert()
        .success()
        .stdout(contains("**Quantum Assistant Help:**"));

    qubit_cmd(&temp)
        .args(["ask", "quantum", "stats"])
        .assert()
        .success()
        .stdout(contains("1 queries this session, 0 total searches"));

    temp.close().unwrap();
}

#[test]
#[serial]
fn test_ask_simulated_faults_fail_loudly() {
    let temp = assert_fs::TempDir::new().unwrap();

    qubit_cmd(&temp)
        .args(["ask", "simulate", "error"])
        .assert()
        .failure()
        .stderr(contains("Quantum instability").and(contains("decoherence")));

    qubit_cmd(&temp)
        .args(["ask", "quantum", "flux"])
        .assert()
        .failure()
        .stderr(contains("flux capacitor"));

    temp.close().unwrap();
}

#[test]
#[serial]
fn test_ask_respects_config_file() {
    let temp = assert_fs::TempDir::new().unwrap();

    // Zero drift pinned in config: an unrelated query cannot luck its
    // way over the threshold, so no hedged or related lines appear
    std::fs::write(temp.path().join("config.json"), r#"{"randomness_factor": 0.0}"#).unwrap();

    qubit_cmd(&temp)
        .args(["ask", "--seed", "3", "xylophone", "zebra"])
        .assert()
        .success()
        .stdout(contains("Related idea").not().and(contains("Possible match").not()));

    temp.close().unwrap();
}

#[test]
#[serial]
fn test_ask_with_custom_kb_file() {
    let temp = assert_fs::TempDir::new().unwrap();

    let kb_file = temp.path().join("custom.json");
    std::fs::write(&kb_file, r#"{"teleporter stuck": ["Reverse the polarity"]}"#).unwrap();

    qubit_cmd(&temp)
        .args(["ask", "--kb"])
        .arg(&kb_file)
        .args(["teleporter", "stuck"])
        .assert()
        .success()
        .stdout(contains("Reverse the polarity"));

    temp.close().unwrap();
}

#[test]
#[serial]
fn test_chat_session_runs_to_summary() {
    let temp = assert_fs::TempDir::new().unwrap();

    qubit_cmd(&temp)
        .args(["chat", "--seed", "11"])
        .write_stdin("help\nprinter offline\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Quantum AI Assistant Pro")
                .and(contains("**Quantum Assistant Help:**"))
                .and(contains("Session complete"))
                .and(contains("Queries")),
        );

    temp.close().unwrap();
}

#[test]
#[serial]
fn test_chat_handles_eof_without_input() {
    let temp = assert_fs::TempDir::new().unwrap();

    qubit_cmd(&temp)
        .args(["chat"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(contains("Session complete"));

    temp.close().unwrap();
}

#[test]
#[serial]
fn test_chat_renders_coming_soon_as_notice() {
    let temp = assert_fs::TempDir::new().unwrap();

    qubit_cmd(&temp)
        .args(["chat"])
        .write_stdin("dark mode\nquit\n")
        .assert()
        .success()
        .stdout(contains("🚧").and(contains("Dark Mode")));

    temp.close().unwrap();
}

#[test]
#[serial]
fn test_chat_survives_a_simulated_fault() {
    let temp = assert_fs::TempDir::new().unwrap();

    // The REPL reports the instability and keeps going
    qubit_cmd(&temp)
        .args(["chat"])
        .write_stdin("simulate error\nprinter offline\nexit\n")
        .assert()
        .success()
        .stdout(contains("Quantum instability").and(contains("Session complete")));

    temp.close().unwrap();
}
