// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use tempfile::TempDir;

use crate::{get_cmd_output, get_scenario_args_file, make_file_in_dir, skyfilter};

/// Find the mask line for a target in stdout.
fn mask_line<'a>(stdout: &'a str, name: &str) -> Option<&'a str> {
    stdout
        .lines()
        .find(|l| l.starts_with(&format!("{name}:")))
}

#[test]
fn test_all_policy_rejects_setting_target() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = get_scenario_args_file(tmp_dir.path());

    let cmd = skyfilter()
        .arg(format!("{}", args_file.display()))
        .ok();
    assert!(cmd.is_ok(), "skyfilter failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);

    assert!(
        stdout.contains("# Guillermo Haro (0 of 1 targets observable, policy 'all')"),
        "{stdout}"
    );
    assert_eq!(mask_line(&stdout, "UGC03858"), Some("UGC03858: false"));
}

#[test]
fn test_any_policy_accepts_setting_target() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = get_scenario_args_file(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = skyfilter()
        .args([
            args_file.to_str().unwrap(),
            "--policy", "any",
        ])
        .ok();
    assert!(cmd.is_ok(), "skyfilter failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);

    assert!(
        stdout.contains("# Guillermo Haro (1 of 1 targets observable, policy 'any')"),
        "{stdout}"
    );
    assert_eq!(mask_line(&stdout, "UGC03858"), Some("UGC03858: true"));
}

#[test]
fn test_command_line_only() {
    // Everything given on the command line; raising the ceiling lets the
    // target pass at every instant.
    #[rustfmt::skip]
    let cmd = skyfilter()
        .args([
            "--location", "-110.384722", "31.052778", "2480",
            "--target", "UGC03858", "7.51289", "73.63019",
            "--target", "PGC616899", "14.55716", "-37.83552",
            "--start", "2019-04-10 06:00",
            "--end", "2019-04-10 10:00",
            "--max-airmass", "3",
        ])
        .ok();
    assert!(cmd.is_ok(), "skyfilter failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);

    assert!(stdout.contains("# location ("), "{stdout}");
    assert_eq!(mask_line(&stdout, "UGC03858"), Some("UGC03858:  true"));
    // PGC616899 is too low at the start of the window.
    assert_eq!(mask_line(&stdout, "PGC616899"), Some("PGC616899: false"));
}

#[test]
fn test_show_grid() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = get_scenario_args_file(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = skyfilter()
        .args([
            args_file.to_str().unwrap(),
            "--show-grid",
        ])
        .ok();
    assert!(cmd.is_ok(), "skyfilter failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);

    let header = stdout
        .lines()
        .find(|l| l.starts_with("target"))
        .unwrap_or_else(|| panic!("no grid header in: {stdout}"));
    assert!(header.contains("06:00"), "{header}");
    assert!(header.contains("10:00"), "{header}");
    // 9 timestamps after the target column.
    assert_eq!(header.split_whitespace().count(), 10, "{header}");

    let row = stdout
        .lines()
        .find(|l| l.starts_with("UGC03858 "))
        .unwrap_or_else(|| panic!("no grid row in: {stdout}"));
    // The late instants fail the ceiling.
    assert!(row.trim_end().ends_with('*'), "{row}");
}

#[test]
fn test_dry_run() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = get_scenario_args_file(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = skyfilter()
        .args([
            args_file.to_str().unwrap(),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "skyfilter failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run"), "{stdout}");
    assert!(mask_line(&stdout, "UGC03858").is_none(), "{stdout}");
}

#[test]
fn test_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = get_scenario_args_file(tmp_dir.path());
    let saved = tmp_dir.path().join("saved.toml");

    #[rustfmt::skip]
    let cmd = skyfilter()
        .args([
            args_file.to_str().unwrap(),
            "--policy", "any",
            "--save-toml", &format!("{}", saved.display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "skyfilter failed: {}", cmd.err().unwrap());
    assert!(saved.exists());

    // The saved file reproduces the run.
    let cmd = skyfilter()
        .arg(format!("{}", saved.display()))
        .ok();
    assert!(cmd.is_ok(), "skyfilter failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(mask_line(&stdout, "UGC03858"), Some("UGC03858: true"));
}

#[test]
fn test_target_table() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = get_scenario_args_file(tmp_dir.path());
    let (table, mut f) = make_file_in_dir("targets.txt", tmp_dir.path());
    writeln!(f, "# name RA Dec").unwrap();
    writeln!(f, "ESO336-006 18.60201 -37.94586").unwrap();
    drop(f);

    #[rustfmt::skip]
    let cmd = skyfilter()
        .args([
            args_file.to_str().unwrap(),
            "--target-table", &format!("{}", table.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "skyfilter failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("of 2 targets observable"), "{stdout}");
    // Table targets follow the arguments file's targets.
    let first = mask_line(&stdout, "UGC03858").expect("UGC03858 missing");
    let second = mask_line(&stdout, "ESO336-006").expect("ESO336-006 missing");
    assert!(stdout.find(first).unwrap() < stdout.find(second).unwrap());
}

#[test]
fn test_no_targets_is_an_error() {
    #[rustfmt::skip]
    let cmd = skyfilter()
        .args([
            "--location", "-110.384722", "31.052778", "2480",
            "--start", "2019-04-10 06:00",
            "--end", "2019-04-10 10:00",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error:"), "{stderr}");
}

#[test]
fn test_bad_ceiling_is_an_error() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = get_scenario_args_file(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = skyfilter()
        .args([
            args_file.to_str().unwrap(),
            "--max-airmass", "0.9",
        ])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Error:"), "{stderr}");
    assert!(mask_line(&stdout, "UGC03858").is_none(), "{stdout}");
}

#[test]
fn test_end_before_start_is_an_error() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = get_scenario_args_file(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = skyfilter()
        .args([
            args_file.to_str().unwrap(),
            "--end", "2019-04-10 05:00",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Error:"), "{stderr}");
}
