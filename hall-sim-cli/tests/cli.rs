//! End-to-end tests driving the built binary

use std::fs;
use std::process::Command;

fn hall_sim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hall-sim"))
}

fn write_script(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn accepted_script_prints_transcript_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(
        &dir,
        "day.txt",
        "1\n08:00 09:00\n100\n08:10 1 ann\n08:15 2 ann 1\n08:50 4 ann\n",
    );

    let output = hall_sim().arg(&script).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "08:00\n\
         08:10 1 ann\n\
         08:15 2 ann 1\n\
         08:50 4 ann\n\
         09:00\n\
         1 100 00:35\n"
    );
}

#[test]
fn rejected_script_prints_line_number_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "day.txt", "0\n08:00 20:00\n100\n");

    let output = hall_sim().arg(&script).output().unwrap();
    // Rejection is a reported outcome, not a process failure
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\n");
}

#[test]
fn missing_script_file_fails() {
    let output = hall_sim().arg("/no/such/script.txt").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn json_format_emits_report() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "day.txt", "2\n08:00 09:00\n5\n");

    let output = hall_sim()
        .arg(&script)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["report"].as_array().unwrap().len(), 2);
}

#[test]
fn output_file_and_config_are_honored() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "day.txt", "1\n10:00 11:00\n7\n");
    let out_path = dir.path().join("transcript.txt");
    let config = write_script(
        &dir,
        "config.toml",
        &format!(
            "[input]\nscript = {:?}\n\n[output]\nfile = {:?}\n",
            script, out_path
        ),
    );

    let output = hall_sim().args(["--config"]).arg(&config).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(&out_path).unwrap(),
        "10:00\n11:00\n1 0 00:00\n"
    );
}
