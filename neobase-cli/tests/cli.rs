//! Integration tests driving the `neobase` binary.
//!
//! Every run gets an isolated, nonexistent config file and a fixed reference
//! date so results do not depend on the user's home or today's date.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// A `neobase` command with a clean environment.
fn neobase(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_neobase"));
    cmd.env_remove("OPTD_POR_DATE")
        .env_remove("OPTD_POR_DUPLICATES")
        .env_remove("OPTD_POR_FILE")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(home.join("missing.ini"));
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    neobase(home)
        .args(["--date", "2026-10-19"])
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "neobase failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

// =============================================================================
// Modes
// =============================================================================

#[test]
fn test_lookup_prints_record() {
    let home = TempDir::new().unwrap();
    let text = stdout(&run(home.path(), &["ORY"]));

    assert!(text.starts_with("13 points of reference\n"));
    assert!(text.contains("**  ORY  **"));
    assert!(text.contains("name                Paris Orly Airport\n"));
    assert!(text.contains("city_code_list      PAR\n"));
}

#[test]
fn test_lookup_unknown_key() {
    let home = TempDir::new().unwrap();
    let text = stdout(&run(home.path(), &["ory", "XXX"]));

    assert!(text.contains("'XXX' not found in data.\n"));
    assert!(text.contains("**  ory  **"));
}

#[test]
fn test_show_csv() {
    let home = TempDir::new().unwrap();
    let text = stdout(&run(
        home.path(),
        &["--show", "name,country_code", "ORY", "CDG"],
    ));
    assert_eq!(
        text,
        "Paris Orly Airport,FR\nParis Charles de Gaulle Airport,FR\n"
    );
}

#[test]
fn test_radius() {
    let home = TempDir::new().unwrap();
    let text = stdout(&run(
        home.path(),
        &["--radius", "14.5", "--show", "iata_code", "ORY"],
    ));
    assert_eq!(text, "ORY\nPAR\n");

    let text = stdout(&run(home.path(), &["-r", "50", "ORY"]));
    assert!(text.contains("ORY(+50km)"));
    let cdg = text.lines().find(|l| l.starts_with("CDG")).unwrap();
    assert!(cdg.ends_with("   34.9km"));
}

#[test]
fn test_closest() {
    let home = TempDir::new().unwrap();
    let text = stdout(&run(
        home.path(),
        &["--closest", "3", "--show", "name", "NCE"],
    ));
    assert_eq!(
        text,
        "Nice Côte d'Azur International Airport\nNice Ville Railway Station\nNice\n"
    );
}

#[test]
fn test_field_search() {
    let home = TempDir::new().unwrap();
    let text = stdout(&run(
        home.path(),
        &["-f", "city_code_list", "-w", "--show", "iata_code", "par"],
    ));
    assert_eq!(text, "CDG\nORY\nPAR\nXPG\n");

    let text = stdout(&run(home.path(), &["-f", "name", "-c", "orly"]));
    assert!(text.contains("**  name=orly  **"));
    assert!(!text.contains("ORY "));
}

#[test]
fn test_keys_from_stdin() {
    let home = TempDir::new().unwrap();
    let mut child = neobase(home.path())
        .args(["--date", "2026-10-19", "--show", "iata_code,location_type", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"LHR\nLON\n")
        .unwrap();

    let text = stdout(&child.wait_with_output().unwrap());
    assert_eq!(text, "LHR,A\nLON,C\n");
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_date_selects_rows() {
    let home = TempDir::new().unwrap();
    let output = neobase(home.path())
        .args(["--date", "2012-01-01", "CPQ"])
        .output()
        .unwrap();
    let text = stdout(&output);
    assert!(text.starts_with("14 points of reference\n"));
    assert!(!text.contains("not found"));
}

#[test]
fn test_duplicates_from_env() {
    let home = TempDir::new().unwrap();
    let output = neobase(home.path())
        .env("OPTD_POR_DUPLICATES", "0")
        .args(["--date", "2026-10-19", "NCE@1"])
        .output()
        .unwrap();
    let text = stdout(&output);
    assert!(text.starts_with("10 points of reference\n"));
    assert!(text.contains("'NCE@1' not found in data."));
}

#[test]
fn test_config_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.ini");
    std::fs::write(&config, "[data]\ndate = 2012-01-01\nduplicates = keep-first\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_neobase"))
        .env_remove("OPTD_POR_DATE")
        .env_remove("OPTD_POR_DUPLICATES")
        .env_remove("OPTD_POR_FILE")
        .arg("--config")
        .arg(&config)
        .arg("KMG")
        .output()
        .unwrap();
    let text = stdout(&output);
    assert!(text.starts_with("11 points of reference\n"));
    assert!(text.contains("Kunming Wujiaba International Airport"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_missing_por_file() {
    let home = TempDir::new().unwrap();
    let output = run(
        home.path(),
        &["--por-file", "/nonexistent/optd_por_public.csv", "ORY"],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("POR file not found"));
    assert!(stderr.contains("optd_por_public.csv"));
}

#[test]
fn test_invalid_date() {
    let home = TempDir::new().unwrap();
    let output = neobase(home.path())
        .args(["--date", "19/10/2026", "ORY"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("19/10/2026"));
}

#[test]
fn test_unknown_show_field() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["--show", "runway", "ORY"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("runway"));
}
