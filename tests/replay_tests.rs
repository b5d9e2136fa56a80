//! Replay driver tests - scripts through the library and the binary

use std::io::Write;
use std::process::Command;

use blockdrop::core::GameConfig;
use blockdrop::replay::ReplayScript;

const TWO_LINE_SCRIPT: &str = r#"{
    "pieces": ["o"],
    "board": ["ZZZZ..ZZZZ", "SSSS..SSSS"],
    "frames": [
        { "keys": ["hardDrop"], "elapsed_ms": 16 },
        { "keys": [], "elapsed_ms": 200 }
    ]
}"#;

fn write_script(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn test_replay_clears_lines() {
    let script = ReplayScript::from_json(TWO_LINE_SCRIPT).unwrap();
    let report = script.compile(GameConfig::default()).unwrap().run();

    assert_eq!(report.status, "playing");
    assert_eq!(report.points, 100);
    assert_eq!(report.lines, 2);
    assert_eq!(report.pieces_locked, 1);
    assert_eq!(report.ticks, 2);
    assert_eq!(report.elapsed_ms, 216);
    assert_eq!(report.locks.len(), 1);
    assert_eq!(report.locks[0].tick, 1);
    assert_eq!(report.locks[0].runs, vec![2]);
    assert_eq!(report.board.len(), 20);
    assert!(report.board.iter().all(|row| row == ".........."));
}

#[test]
fn test_replay_is_deterministic_for_a_seed() {
    let text = r#"{
        "seed": 31337,
        "randomizer": "seven-bag",
        "frames": [
            { "keys": ["rotate"], "elapsed_ms": 16 },
            { "keys": ["left"], "elapsed_ms": 100, "repeat": 2 },
            { "keys": ["hardDrop"], "elapsed_ms": 16 },
            { "keys": [], "elapsed_ms": 200, "repeat": 3 }
        ]
    }"#;
    let run = || {
        ReplayScript::from_json(text)
            .unwrap()
            .compile(GameConfig::default())
            .unwrap()
            .run()
    };
    let first = run();
    assert_eq!(first, run());
    assert!(first.pieces_locked >= 1);
}

#[test]
fn test_replay_reports_lost_game() {
    let rows: Vec<String> = vec!["....O.....".to_string(); 22];
    let text = serde_json::json!({
        "pieces": ["o"],
        "board": rows,
        "frames": [ { "elapsed_ms": 200 } ]
    })
    .to_string();
    let report = ReplayScript::from_json(&text)
        .unwrap()
        .compile(GameConfig::default())
        .unwrap()
        .run();
    assert_eq!(report.status, "lost");
}

#[test]
fn test_cli_prints_json_report() {
    let file = write_script(TWO_LINE_SCRIPT);
    let output = Command::new(env!("CARGO_BIN_EXE_blockdrop"))
        .arg("replay")
        .arg(file.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["status"], "playing");
    assert_eq!(report["points"], 100);
    assert_eq!(report["lines"], 2);
}

#[test]
fn test_cli_flags_override_defaults() {
    // With a 100ms fall interval the lock happens one frame earlier.
    let file = write_script(
        r#"{ "pieces": ["i"], "frames": [ { "keys": ["hardDrop"] }, { "elapsed_ms": 100 } ] }"#,
    );
    let output = Command::new(env!("CARGO_BIN_EXE_blockdrop"))
        .args(["replay", "--speed-factor", "1.0"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["pieces_locked"], 1);
}

#[test]
fn test_cli_rejects_bad_config_and_scripts() {
    let file = write_script(TWO_LINE_SCRIPT);
    let output = Command::new(env!("CARGO_BIN_EXE_blockdrop"))
        .args(["replay", "--base-tick-ms", "0"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid game configuration"));

    let bad = write_script(r#"{ "frames": [ { "keys": ["jump"] } ] }"#);
    let output = Command::new(env!("CARGO_BIN_EXE_blockdrop"))
        .arg("replay")
        .arg(bad.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown key name"));

    let huge = write_script(r#"{ "frames": [ { "repeat": 4000000000 } ] }"#);
    let output = Command::new(env!("CARGO_BIN_EXE_blockdrop"))
        .arg("replay")
        .arg(huge.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("4000000000 ticks"));

    let output = Command::new(env!("CARGO_BIN_EXE_blockdrop"))
        .args(["replay", "--start-level", "4294967295"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("start level"));

    let output = Command::new(env!("CARGO_BIN_EXE_blockdrop"))
        .args(["replay", "/nonexistent/script.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
