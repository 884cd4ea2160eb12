//! End-to-end tests for the beatnik binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A beatnik command isolated from the host's config files and environment
fn beatnik(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("beatnik").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("BEATNIK_CONFIG")
        .env_remove("BEATNIK_DEFAULT_BPM")
        .env_remove("BEATNIK_LOG_LEVEL");
    cmd
}

#[test]
fn converts_file_to_midi_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("rock.beat"), "bpm:100\nK,HH. HH. S,HH. HH.\n").unwrap();

    beatnik(&dir)
        .args(["convert", "rock.beat", "-o", "rock.mid"])
        .assert()
        .success()
        .stdout("");

    let bytes = fs::read(dir.path().join("rock.mid")).unwrap();
    assert_eq!(&bytes[0..4], b"MThd");
    let expected = beatnik::to_midi(&beatnik::parse("bpm:100 K,HH. HH. S,HH. HH.").unwrap());
    assert_eq!(bytes, expected);
}

#[test]
fn converts_stdin_to_stdout() {
    let dir = TempDir::new().unwrap();
    let expected = beatnik::to_midi(&beatnik::parse("bpm:90 K S K S").unwrap());

    beatnik(&dir)
        .arg("convert")
        .write_stdin("bpm:90 K S K S")
        .assert()
        .success()
        .stdout(predicate::eq(expected));
}

#[test]
fn dash_means_stdin_and_stdout() {
    let dir = TempDir::new().unwrap();
    let expected = beatnik::to_midi(&beatnik::parse("bpm:90 36 38").unwrap());

    beatnik(&dir)
        .args(["convert", "-", "-o", "-"])
        .write_stdin("bpm:90 36 38")
        .assert()
        .success()
        .stdout(predicate::eq(expected));
}

#[test]
fn bpm_flag_fills_in_missing_tempo() {
    let dir = TempDir::new().unwrap();
    let expected = beatnik::to_midi(&beatnik::parse("bpm:75 K S").unwrap());

    beatnik(&dir)
        .args(["convert", "--bpm", "75"])
        .write_stdin("K S")
        .assert()
        .success()
        .stdout(predicate::eq(expected));
}

#[test]
fn bpm_directive_beats_bpm_flag() {
    let dir = TempDir::new().unwrap();
    let expected = beatnik::to_midi(&beatnik::parse("bpm:140 K S").unwrap());

    beatnik(&dir)
        .args(["convert", "--bpm", "75"])
        .write_stdin("bpm:140 K S")
        .assert()
        .success()
        .stdout(predicate::eq(expected));
}

#[test]
fn rejects_out_of_range_bpm_flag() {
    let dir = TempDir::new().unwrap();

    beatnik(&dir)
        .args(["convert", "--bpm", "501"])
        .write_stdin("K S")
        .assert()
        .failure()
        .stderr(predicate::str::contains("501"));
}

#[test]
fn parse_error_names_the_token_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.beat"), "K HH (S HH").unwrap();

    beatnik(&dir)
        .args(["convert", "bad.beat", "-o", "bad.mid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            r#"token #3 ("(S"): grace notes require parentheses on both sides"#,
        ));

    assert!(!dir.path().join("bad.mid").exists());
}

#[test]
fn missing_input_file_fails() {
    let dir = TempDir::new().unwrap();

    beatnik(&dir)
        .args(["convert", "nope.beat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read nope.beat"));
}

#[test]
fn check_prints_summary() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("groove.beat"), "bpm:100 K,HH. HH. S,HH. HH.").unwrap();

    beatnik(&dir)
        .args(["check", "groove.beat"])
        .assert()
        .success()
        .stdout("4 hits, 6 notes, 192 ticks (2 quarter notes), 100 bpm\n");
}

#[test]
fn check_reports_bad_velocity() {
    let dir = TempDir::new().unwrap();

    beatnik(&dir)
        .arg("check")
        .write_stdin("K++ S+++")
        .assert()
        .failure()
        .stderr(predicate::str::contains("token #2"));
}

#[test]
fn config_shows_defaults() {
    let dir = TempDir::new().unwrap();

    beatnik(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]\nbpm = 120\n"))
        .stdout(predicate::str::contains("log_level = \"warn\""));
}

#[test]
fn local_config_file_sets_default_bpm() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("beatnik.toml"), "[defaults]\nbpm = 66\n").unwrap();

    beatnik(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("bpm = 66"))
        .stdout(predicate::str::contains("# loaded from beatnik.toml"));

    let expected = beatnik::to_midi(&beatnik::parse("bpm:66 K").unwrap());
    beatnik(&dir)
        .arg("convert")
        .write_stdin("K")
        .assert()
        .success()
        .stdout(predicate::eq(expected));
}

#[test]
fn env_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("beatnik.toml"), "[defaults]\nbpm = 66\n").unwrap();

    beatnik(&dir)
        .arg("config")
        .env("BEATNIK_DEFAULT_BPM", "150")
        .assert()
        .success()
        .stdout(predicate::str::contains("bpm = 150"))
        .stdout(predicate::str::contains("# overridden by $BEATNIK_DEFAULT_BPM"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();

    beatnik(&dir)
        .args(["--config", "missing.toml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn invalid_config_bpm_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("custom.toml"), "[defaults]\nbpm = 900\n").unwrap();

    beatnik(&dir)
        .args(["config", "--config", "custom.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("defaults.bpm"));
}
