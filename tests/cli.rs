use skein256::{hash, hash_with_config, Config};
use std::error::Error;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn skein256_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_skein256"))
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(skein256_cmd().args(args).output()?)
}

#[test]
fn version_flag_prints_build_information() -> Result<(), Box<dyn Error>> {
    let output = run(&["--version"])?;
    assert!(
        output.status.success(),
        "version command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("skein256 "), "unexpected version line: {}", stdout);
    assert!(stdout.contains("build"), "version output should include build value: {}", stdout);
    Ok(())
}

#[test]
fn running_without_subcommand_displays_help() -> Result<(), Box<dyn Error>> {
    let output = run(&[])?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Usage: skein256"), "help output missing usage: {}", stdout);
    assert!(stdout.contains("Commands:"), "help output missing command list: {}", stdout);
    Ok(())
}

#[test]
fn sum_prints_checksum_line() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("data.bin");
    fs::write(&input, b"cli payload")?;
    let input_str = input.to_str().ok_or("non-utf8 temp path")?;

    let output = run(&["sum", input_str])?;
    assert!(
        output.status.success(),
        "sum failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let expected = format!("{}  {}\n", hex::encode(hash(32, b"cli payload")?), input_str);
    assert_eq!(String::from_utf8(output.stdout)?, expected);
    Ok(())
}

#[test]
fn sum_reads_stdin_with_custom_size() -> Result<(), Box<dyn Error>> {
    let mut child = skein256_cmd()
        .args(["sum", "--size", "20"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .ok_or("stdin not captured")?
        .write_all(b"from stdin")?;
    let output = child.wait_with_output()?;
    assert!(output.status.success());

    let expected = format!("{}  -\n", hex::encode(hash(20, b"from stdin")?));
    assert_eq!(String::from_utf8(output.stdout)?, expected);
    Ok(())
}

#[test]
fn sum_applies_config_file_and_flags() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("msg");
    let config_path = dir.path().join("skein.json");
    fs::write(&input, b"configured")?;
    fs::write(&config_path, r#"{"key": "6b6579", "nonce": "00"}"#)?;

    let output = run(&[
        "sum",
        "--config",
        config_path.to_str().ok_or("non-utf8 temp path")?,
        "--nonce",
        "0102",
        "--personal",
        "61707040323032",
        input.to_str().ok_or("non-utf8 temp path")?,
    ])?;
    assert!(
        output.status.success(),
        "sum failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let config = Config::new()
        .with_key(b"key".to_vec())
        .with_nonce(vec![1, 2])
        .with_personal(b"app@202".to_vec());
    let digest = hash_with_config(32, &config, b"configured")?;
    assert!(String::from_utf8(output.stdout)?.starts_with(&hex::encode(digest)));
    Ok(())
}

#[test]
fn sum_rejects_zero_size() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("f");
    fs::write(&input, b"x")?;

    let output = run(&["sum", "--size", "0", input.to_str().ok_or("non-utf8 temp path")?])?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Invalid digest size"));
    Ok(())
}

#[test]
fn check_round_trips_sum_output() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("one.txt"), b"first file")?;
    fs::write(dir.path().join("two.txt"), b"second file")?;

    let list = format!(
        "{}  one.txt\n{}  two.txt\n",
        hex::encode(hash(32, b"first file")?),
        hex::encode(hash(64, b"second file")?),
    );
    let list_path = dir.path().join("SUMS");
    fs::write(&list_path, list)?;

    let output = run(&["check", list_path.to_str().ok_or("non-utf8 temp path")?])?;
    assert!(
        output.status.success(),
        "check failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("one.txt: OK"));
    assert!(stdout.contains("two.txt: OK"));

    fs::write(dir.path().join("two.txt"), b"changed")?;
    let output = run(&["check", list_path.to_str().ok_or("non-utf8 temp path")?])?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains("two.txt: FAILED"));
    Ok(())
}

#[test]
fn config_command_prints_merged_fields() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let config_path = dir.path().join("skein.json");
    fs::write(&config_path, r#"{"key": "6b6579", "nonce": "00"}"#)?;

    let output = run(&[
        "config",
        "--config",
        config_path.to_str().ok_or("non-utf8 temp path")?,
        "--nonce",
        "0102",
    ])?;
    assert!(
        output.status.success(),
        "config failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let printed = Config::from_json(&String::from_utf8(output.stdout)?)?;
    assert_eq!(printed, Config::new().with_key(b"key".to_vec()).with_nonce(vec![1, 2]));
    Ok(())
}
