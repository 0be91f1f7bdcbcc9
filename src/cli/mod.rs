// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.
//!
//! Only 3 things should be public in this module: `Skyfilter`,
//! `Skyfilter::run`, and `SkyfilterError`.

#[macro_use]
mod common;
mod error;
mod filter;

pub use error::SkyfilterError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser};
use log::info;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = r#"Filter astronomical targets by their airmass as seen from observatories.
A target is observable if its airmass stays within bounds over a time window."#
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(infer_long_args = true)]
pub struct Skyfilter {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(flatten)]
    filter_args: filter::FilterArgs,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,

    /// Only verify that arguments were correctly ingested and print out
    /// high-level information.
    #[clap(long)]
    dry_run: bool,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run.
    #[clap(long)]
    save_toml: Option<PathBuf>,
}

impl Skyfilter {
    pub fn run(self) -> Result<(), SkyfilterError> {
        // Set up logging.
        let GlobalArgs {
            verbosity,
            dry_run,
            save_toml,
        } = self.global_opts;
        setup_logging(verbosity).expect("Failed to initialise logging.");

        // Print the version of skyfilter and its build-time information.
        info!("skyfilter {}", env!("CARGO_PKG_VERSION"));
        display_build_info();

        let args = self.filter_args.merge()?;
        if let Some(toml) = save_toml {
            use std::{
                fs::File,
                io::{BufWriter, Write},
            };

            let mut f = BufWriter::new(File::create(toml)?);
            let toml_str = toml::to_string(&args)
                .map_err(|e| SkyfilterError::ArgFile(format!("Couldn't write toml: {e}")))?;
            f.write_all(toml_str.as_bytes())?;
        }
        args.run(dry_run)?;

        info!("skyfilter complete.");
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write many info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
