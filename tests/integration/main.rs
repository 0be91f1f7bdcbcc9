// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod filter;
mod no_stderr;

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};
use indoc::indoc;

fn skyfilter() -> Command {
    Command::cargo_bin("skyfilter").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

fn make_file_in_dir<T: AsRef<Path>, U: AsRef<Path>>(filename: T, dir: U) -> (PathBuf, File) {
    let path = dir.as_ref().join(filename);
    let f = File::create(&path).expect("couldn't make file");
    (path, f)
}

/// UGC03858 as seen from Guillermo Haro on 2019-04-10 between 06:00 and 10:00
/// UTC. Its airmass climbs from ~1.7 to ~2.8 over the window, so it passes a
/// ceiling of 2.5 at some instants but not all of them.
const SCENARIO_TOML: &str = indoc! {r#"
    observatories = [
        { name = "Guillermo Haro", longitude = "-110d23m05s", latitude = "31d03m10s", height = 2480 },
    ]
    targets = [["UGC03858", 7.51289, 73.63019]]
    start = "2019-04-10 06:00"
    end = "2019-04-10 10:00"
    max_airmass = 2.5
"#};

/// Write the scenario arguments file into `dir`.
fn get_scenario_args_file<T: AsRef<Path>>(dir: T) -> PathBuf {
    let (path, mut f) = make_file_in_dir("args.toml", dir);
    f.write_all(SCENARIO_TOML.as_bytes())
        .expect("couldn't write args file");
    path
}
