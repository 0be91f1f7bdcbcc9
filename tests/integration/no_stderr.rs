// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{get_cmd_output, get_scenario_args_file, skyfilter};

#[test]
fn test_filter_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = get_scenario_args_file(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = skyfilter()
        .args([
            args_file.to_str().unwrap(),
            "--show-grid",
        ])
        .ok();
    assert!(
        cmd.is_ok(),
        "skyfilter failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_help_no_stderr() {
    let cmd = skyfilter().arg("--help").ok();
    assert!(cmd.is_ok(), "skyfilter --help failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.contains("--max-airmass"), "{stdout}");
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
