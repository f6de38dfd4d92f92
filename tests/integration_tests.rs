//! Integration tests for the chd CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONTACTS_CSV: &str = "\
part_number,type,contact_size,awg_range,mm2_range,description
10-375-20,Pin,20,26-20,0.13-0.52,Crimp pin
10-376-20,Socket,20,26-20,0.13-0.52,Crimp socket
10-375-16,Pin,16,20-16,0.52-1.31,
";

const ARRANGEMENTS_CSV: &str = "\
arrangement,total_contacts,contact_size,contact_count
10SL-3,3,20,3
12S-3,3,16,3
14S-5,5,20,3
14S-5,5,16,2
";

const WIRE_MAP_CSV: &str = "\
wire_size,system,contact_size
20,AWG,20
22,AWG,20
16,AWG,16
0.52,MM2,20
";

const PHM_CSV: &str = "\
arrangement,shell_size,dash_number
10SL-3,10,10
";

/// Helper to get a chd command isolated from the user's config
fn chd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("chd").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .env_remove("CHD_CATALOG")
        .env_remove("CHD_WIRE_SYSTEM")
        .env_remove("CHD_SHELL_STYLE")
        .env_remove("CHD_LOG");
    cmd
}

/// Helper to create an empty project in a temp directory
fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    chd(tmp.path()).arg("init").assert().success();
    tmp
}

fn import(tmp: &TempDir, kind: &str, contents: &str) {
    let file = tmp.path().join(format!("{}.csv", kind));
    fs::write(&file, contents).unwrap();
    chd(tmp.path())
        .args(["import", kind, file.to_str().unwrap()])
        .assert()
        .success();
}

/// Helper to create a project with a small seeded catalog
fn setup_seeded_project() -> TempDir {
    let tmp = setup_test_project();
    import(&tmp, "contacts", CONTACTS_CSV);
    import(&tmp, "arrangements", ARRANGEMENTS_CSV);
    import(&tmp, "wire-map", WIRE_MAP_CSV);
    import(&tmp, "phm", PHM_CSV);
    tmp
}

// ============================================================================
// Basic commands
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    chd(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("catalog"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    chd(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("chd"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    chd(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chd"));
}

// ============================================================================
// Init
// ============================================================================

#[test]
fn test_init_creates_project_and_catalog() {
    let tmp = TempDir::new().unwrap();
    chd(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized CHD project"));

    assert!(tmp.path().join(".chd/config.yaml").exists());
    assert!(tmp.path().join(".chd/catalog.db").exists());
}

#[test]
fn test_init_twice_reports_existing() {
    let tmp = setup_test_project();
    chd(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_commands_outside_project_fail() {
    let tmp = TempDir::new().unwrap();
    chd(tmp.path())
        .args(["catalog", "contacts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a CHD project"));
}

// ============================================================================
// Import
// ============================================================================

#[test]
fn test_import_template() {
    let tmp = TempDir::new().unwrap();
    chd(tmp.path())
        .args(["import", "--template", "wire-map"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("wire_size,system,contact_size\n"));
}

#[test]
fn test_import_reports_duplicates() {
    let tmp = setup_test_project();
    import(&tmp, "wire-map", WIRE_MAP_CSV);

    let file = tmp.path().join("again.csv");
    fs::write(&file, WIRE_MAP_CSV).unwrap();
    chd(tmp.path())
        .args(["import", "wire-map", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicates ignored: 4"));
}

#[test]
fn test_import_stops_on_bad_row() {
    let tmp = setup_test_project();
    let file = tmp.path().join("contacts.csv");
    fs::write(
        &file,
        "part_number,type,contact_size\n10-375-20,Pin,20\n10-999-20,Plug,20\n",
    )
    .unwrap();

    chd(tmp.path())
        .args(["import", "contacts", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Row 3"));

    // Nothing from the stopped import reaches the catalog
    chd(tmp.path())
        .args(["catalog", "contacts", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10-375-20").not());

    chd(tmp.path())
        .args(["import", "contacts", file.to_str().unwrap(), "--skip-errors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Errors:"));

    chd(tmp.path())
        .args(["catalog", "contacts", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10-375-20"));
}

#[test]
fn test_import_missing_column() {
    let tmp = setup_test_project();
    let file = tmp.path().join("phm.csv");
    fs::write(&file, "arrangement,shell_size\n10SL-3,10\n").unwrap();

    chd(tmp.path())
        .args(["import", "phm", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dash_number"));
}

#[test]
fn test_import_dry_run_leaves_catalog_empty() {
    let tmp = setup_test_project();
    let file = tmp.path().join("contacts.csv");
    fs::write(&file, CONTACTS_CSV).unwrap();

    chd(tmp.path())
        .args(["import", "contacts", file.to_str().unwrap(), "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run complete"));

    chd(tmp.path())
        .args(["catalog", "contacts", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_import_warns_on_inconsistent_arrangement() {
    let tmp = setup_test_project();
    let file = tmp.path().join("arrangements.csv");
    fs::write(
        &file,
        "arrangement,total_contacts,contact_size,contact_count\n14S-7,7,20,5\n",
    )
    .unwrap();

    chd(tmp.path())
        .args(["import", "arrangements", file.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("14S-7"));

    chd(tmp.path())
        .args(["catalog", "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("size rows sum to 5"));
}

// ============================================================================
// Catalog browsing
// ============================================================================

#[test]
fn test_catalog_sizes_for_wire() {
    let tmp = setup_seeded_project();
    chd(tmp.path())
        .args(["catalog", "sizes", "--wire", "22", "-f", "id"])
        .assert()
        .success()
        .stdout("20\n");

    chd(tmp.path())
        .args(["catalog", "sizes", "--wire", "0.52", "--system", "mm2", "-f", "id"])
        .assert()
        .success()
        .stdout("20\n");
}

#[test]
fn test_catalog_contacts_json() {
    let tmp = setup_seeded_project();
    let output = chd(tmp.path())
        .args(["catalog", "contacts", "--size", "20", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let contacts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let contacts = contacts.as_array().unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0]["part_number"], "10-375-20");
    assert_eq!(contacts[0]["type"], "Pin");
    assert_eq!(contacts[1]["type"], "Socket");
}

#[test]
fn test_catalog_arrangements_exact_count() {
    let tmp = setup_seeded_project();
    chd(tmp.path())
        .args(["catalog", "arrangements", "--count", "3", "--size", "20", "-f", "id"])
        .assert()
        .success()
        .stdout("10SL-3\n");
}

#[test]
fn test_catalog_arrangement_detail_with_phm() {
    let tmp = setup_seeded_project();
    chd(tmp.path())
        .args(["catalog", "arrangement", "10SL-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shell size 10"));

    chd(tmp.path())
        .args(["catalog", "arrangement", "99Z-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_catalog_check_consistent() {
    let tmp = setup_seeded_project();
    chd(tmp.path())
        .args(["catalog", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("consistent"));
}

#[test]
fn test_catalog_shell_styles() {
    let tmp = setup_test_project();
    chd(tmp.path())
        .args(["catalog", "shell-styles", "-f", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7\tRear Mount Jam Nut"));
}

#[test]
fn test_catalog_shell_styles_outside_project() {
    let tmp = TempDir::new().unwrap();
    chd(tmp.path())
        .args(["catalog", "shell-styles", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CODE,SHELL STYLE"));

    assert!(!tmp.path().join(".chd").exists());
}

// ============================================================================
// Build
// ============================================================================

#[test]
fn test_build_part_number() {
    let tmp = setup_seeded_project();
    chd(tmp.path())
        .args([
            "build",
            "--wire",
            "20",
            "--conductors",
            "3",
            "--contact",
            "10-375-20",
            "--shell-style",
            "6",
            "-f",
            "id",
        ])
        .assert()
        .success()
        .stdout("806-10SL-3-P20\n");
}

#[test]
fn test_build_json_result() {
    let tmp = setup_seeded_project();
    let output = chd(tmp.path())
        .args([
            "build",
            "--wire",
            "20",
            "-n",
            "3",
            "--contact",
            "10-376-20",
            "--shell-style",
            "7",
            "-f",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["partNumber"], "807-10SL-3-S20");
    assert_eq!(result["metadata"]["wireSize"], "20");
    assert_eq!(result["metadata"]["wireSystem"], "AWG");
    assert_eq!(result["metadata"]["contactPN"], "10-376-20");
}

#[test]
fn test_build_ambiguous_contact_needs_flag() {
    let tmp = setup_seeded_project();
    chd(tmp.path())
        .args(["build", "--wire", "20", "-n", "3", "--shell-style", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("10-376-20"));

    chd(tmp.path())
        .args([
            "build",
            "--wire",
            "20",
            "-n",
            "3",
            "--contact-type",
            "socket",
            "--shell-style",
            "6",
            "-f",
            "id",
        ])
        .assert()
        .success()
        .stdout("806-10SL-3-S20\n");
}

#[test]
fn test_build_shell_style_from_config() {
    let tmp = setup_seeded_project();
    fs::write(tmp.path().join(".chd/config.yaml"), "shell_style: \"2\"\n").unwrap();

    chd(tmp.path())
        .args(["build", "-w", "20", "-n", "3", "-c", "10-375-20", "-f", "id"])
        .assert()
        .success()
        .stdout("802-10SL-3-P20\n");
}

#[test]
fn test_build_unknown_wire_fails() {
    let tmp = setup_seeded_project();
    chd(tmp.path())
        .args(["build", "--wire", "8", "--shell-style", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No compatible contact size"));

    chd(tmp.path())
        .args(["build", "--wire", "thick", "--shell-style", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid"));
}

#[test]
fn test_build_rejects_unlisted_arrangement() {
    let tmp = setup_seeded_project();
    chd(tmp.path())
        .args([
            "build",
            "--wire",
            "20",
            "-n",
            "3",
            "-c",
            "10-375-20",
            "--arrangement",
            "14S-5",
            "--shell-style",
            "6",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("14S-5"));
}

#[test]
fn test_build_requires_wire_without_interactive() {
    let tmp = setup_seeded_project();
    chd(tmp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--wire"));
}

// ============================================================================
// Wire conversion
// ============================================================================

#[test]
fn test_wire_convert_zero_series() {
    let tmp = TempDir::new().unwrap();
    chd(tmp.path())
        .args(["wire", "convert", "1/0", "-f", "id"])
        .assert()
        .success()
        .stdout("1/0\n");
}

#[test]
fn test_wire_convert_awg_to_mm2() {
    let tmp = TempDir::new().unwrap();
    let output = chd(tmp.path())
        .args(["wire", "convert", "20", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let xref: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(xref["awg"], "20");
    assert_eq!(xref["mm2"], "0.52");
}

#[test]
fn test_wire_convert_rejects_garbage() {
    let tmp = TempDir::new().unwrap();
    chd(tmp.path())
        .args(["wire", "convert", "abc", "--from", "mm2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid"));
}

#[test]
fn test_wire_table() {
    let tmp = TempDir::new().unwrap();
    chd(tmp.path())
        .args(["wire", "table", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4,21.1"))
        .stdout(predicate::str::contains("40,0.01"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_show_key() {
    let tmp = setup_test_project();
    fs::write(tmp.path().join(".chd/config.yaml"), "wire_system: mm2\n").unwrap();

    chd(tmp.path())
        .args(["config", "show", "wire_system"])
        .assert()
        .success()
        .stdout("mm2\n");

    chd(tmp.path())
        .args(["config", "show", "wire_system"])
        .env("CHD_WIRE_SYSTEM", "awg")
        .assert()
        .success()
        .stdout("awg\n");
}

#[test]
fn test_config_show_unknown_key() {
    let tmp = setup_test_project();
    chd(tmp.path())
        .args(["config", "show", "author"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_path_lists_project_file() {
    let tmp = setup_test_project();
    chd(tmp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}
