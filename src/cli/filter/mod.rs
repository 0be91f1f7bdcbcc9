// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Filter targets by their airmass as seen from observatories.


use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use hifitime::{Duration, Unit};
use itertools::Itertools;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;
use vec1::Vec1;

use super::common::{
    display_warnings, InfoPrinter, Warn, AIRMASS_MODEL_HELP, ARG_FILE_HELP, MAX_AIRMASS_HELP,
    MIN_AIRMASS_HELP, POLICY_HELP, TIME_RES_HELP,
};
use crate::{
    constants::{DEFAULT_MAX_AIRMASS, DEFAULT_MIN_AIRMASS, DEFAULT_TIME_RES_MINUTES},
    normalise::{
        normalise_observers, normalise_targets, read_target_table_file, ObservatoryRecord,
        RecordValue, TargetRecord,
    },
    observability::{
        AirmassConstraint, AirmassModel, EvaluationSettings, InvalidArgumentError, Policy,
    },
    params::FilterParams,
    time::TimeWindow,
    unit_parsing::{parse_duration, TimeFormat, UnitParseError},
    SkyfilterError,
};

/// The name given to an observatory specified with `--location`.
const LOCATION_NAME: &str = "location";

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct FilterArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// Observatories, each with a name, longitude, latitude and height. These
    /// can only be given in an arguments file.
    #[clap(skip)]
    pub(super) observatories: Option<Vec<ObservatoryRecord>>,

    /// Only use the observatory with this name. The default is to use every
    /// observatory.
    #[clap(short, long, help_heading = "OBSERVATORIES")]
    pub(super) observatory: Option<String>,

    /// The Earth longitude, latitude, and height of an additional observatory
    /// [degrees, degrees, metres]. Angles may be sexagesimal (e.g. -110d23m05s
    /// or -110:23:05).
    #[clap(
        long, help_heading = "OBSERVATORIES",
        number_of_values = 3,
        allow_hyphen_values = true,
        value_names = &["LONG_DEG", "LAT_DEG", "HEIGHT_M"]
    )]
    pub(super) location: Option<Vec<String>>,

    /// Targets, each with a name, RA [hours] and Dec [degrees]. These can only
    /// be given in an arguments file.
    #[clap(skip)]
    pub(super) targets: Option<Vec<TargetRecord>>,

    /// A target to assess, with a name, RA [hours] and Dec [degrees]. May be
    /// given many times.
    #[clap(
        short, long, help_heading = "TARGETS",
        multiple_occurrences(true),
        number_of_values = 3,
        allow_hyphen_values = true,
        value_names = &["NAME", "RA_HOURS", "DEC_DEG"]
    )]
    pub(super) target: Option<Vec<String>>,

    /// A whitespace-delimited table of targets; each line has a name, RA
    /// [hours] and Dec [degrees]. These targets are added to any others.
    #[clap(long, parse(from_os_str), help_heading = "TARGETS")]
    pub(super) target_table: Option<PathBuf>,

    /// The start of the time window (ISO-8601, UTC if no timezone is given),
    /// e.g. "2019-04-10 06:00".
    #[clap(short, long, help_heading = "TIME WINDOW")]
    pub(super) start: Option<String>,

    /// The end of the time window (ISO-8601, UTC if no timezone is given),
    /// e.g. "2019-04-10 10:00".
    #[clap(short, long, help_heading = "TIME WINDOW")]
    pub(super) end: Option<String>,

    #[clap(long, help = TIME_RES_HELP.as_str(), help_heading = "TIME WINDOW")]
    pub(super) time_res: Option<String>,

    /// Use this value as the DUT1 [seconds].
    #[clap(long, allow_hyphen_values = true, help_heading = "TIME WINDOW")]
    pub(super) dut1: Option<f64>,

    #[clap(short, long, help = MAX_AIRMASS_HELP.as_str(), help_heading = "CONSTRAINT")]
    pub(super) max_airmass: Option<f64>,

    #[clap(long, help = MIN_AIRMASS_HELP.as_str(), help_heading = "CONSTRAINT")]
    pub(super) min_airmass: Option<f64>,

    #[clap(short, long, help = POLICY_HELP.as_str(), help_heading = "CONSTRAINT")]
    pub(super) policy: Option<String>,

    #[clap(long, help = AIRMASS_MODEL_HELP.as_str(), help_heading = "CONSTRAINT")]
    pub(super) airmass_model: Option<String>,

    /// Don't precess the observatories' sidereal time and latitude to J2000
    /// (the frame of the targets' coordinates).
    #[clap(long, help_heading = "CONSTRAINT")]
    #[serde(default)]
    pub(super) no_precession: bool,

    /// Also print the airmass of every target at every sampled time.
    #[clap(long, help_heading = "OUTPUT")]
    #[serde(default)]
    pub(super) show_grid: bool,
}

impl FilterArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<FilterArgs, SkyfilterError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let FilterArgs {
                args_file: _,
                observatories,
                observatory,
                location,
                targets,
                target,
                target_table,
                start,
                end,
                time_res,
                dut1,
                max_airmass,
                min_airmass,
                policy,
                airmass_model,
                no_precession,
                show_grid,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(FilterArgs {
                args_file: None,
                observatories: cli_args.observatories.or(observatories),
                observatory: cli_args.observatory.or(observatory),
                location: cli_args.location.or(location),
                targets: cli_args.targets.or(targets),
                target: cli_args.target.or(target),
                target_table: cli_args.target_table.or(target_table),
                start: cli_args.start.or(start),
                end: cli_args.end.or(end),
                time_res: cli_args.time_res.or(time_res),
                dut1: cli_args.dut1.or(dut1),
                max_airmass: cli_args.max_airmass.or(max_airmass),
                min_airmass: cli_args.min_airmass.or(min_airmass),
                policy: cli_args.policy.or(policy),
                airmass_model: cli_args.airmass_model.or(airmass_model),
                no_precession: cli_args.no_precession || no_precession,
                show_grid: cli_args.show_grid || show_grid,
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<FilterParams, SkyfilterError> {
        debug!("{:#?}", self);

        // Expose all the struct fields to ensure they're all used.
        let FilterArgs {
            args_file: _,
            observatories,
            observatory,
            location,
            targets,
            target,
            target_table,
            start,
            end,
            time_res,
            dut1,
            max_airmass,
            min_airmass,
            policy,
            airmass_model,
            no_precession,
            show_grid,
        } = self;

        // Observatories.
        let mut observatory_records = observatories.unwrap_or_default();
        if let Some(location) = location {
            let (longitude, latitude, height) = match location.as_slice() {
                [lon, lat, h] => (lon.clone(), lat.clone(), h.clone()),
                _ => return Err(FilterArgsError::BadLocation(location).into()),
            };
            observatory_records.push(ObservatoryRecord {
                name: Some(LOCATION_NAME.to_string()),
                longitude: Some(RecordValue::Text(longitude)),
                latitude: Some(RecordValue::Text(latitude)),
                height: Some(RecordValue::Text(height)),
            });
        }
        let mut observers = normalise_observers(&observatory_records)?;
        if let Some(name) = observatory {
            let available = observers.iter().map(|o| o.name()).join(", ");
            observers.retain(|o| o.name().eq_ignore_ascii_case(name.trim()));
            if observers.is_empty() {
                return Err(FilterArgsError::UnknownObservatory { name, available }.into());
            }
        }
        let observers =
            Vec1::try_from_vec(observers).map_err(|_| FilterArgsError::NoObservatories)?;

        let mut obs_printer = InfoPrinter::new("Observatories".into());
        obs_printer.push_block(
            observers
                .iter()
                .map(|o| {
                    format!(
                        "{}: {:>9.4}° {:>8.4}° {:.1}m",
                        o.name(),
                        o.longitude_deg(),
                        o.latitude_deg(),
                        o.height_m()
                    )
                    .into()
                })
                .collect(),
        );
        obs_printer.display();

        // Targets.
        let mut target_records = targets.unwrap_or_default();
        if let Some(target) = target {
            if target.len() % 3 != 0 {
                return Err(FilterArgsError::BadTargetArgs(target.len()).into());
            }
            target_records.extend(target.chunks(3).map(|chunk| {
                TargetRecord::Row(chunk.iter().map(|s| RecordValue::from(s.as_str())).collect())
            }));
        }
        if let Some(target_table) = target_table {
            target_records.extend(read_target_table_file(target_table)?);
        }
        let targets = normalise_targets(&target_records)?;
        if targets.is_empty() {
            return Err(InvalidArgumentError::NoTargets.into());
        }
        let duplicates = targets.iter().map(|t| t.name()).duplicates().collect::<Vec<_>>();
        if !duplicates.is_empty() {
            format!(
                "These target names appear more than once: {}",
                duplicates.join(", ")
            )
            .warn();
        }
        let mut target_printer = InfoPrinter::new("Targets".into());
        target_printer.push_line(format!("{} targets", targets.len()).into());
        if log::log_enabled!(log::Level::Debug) {
            target_printer.push_block(
                targets
                    .iter()
                    .map(|t| {
                        format!(
                            "{}: RA {:.5}h Dec {:.5}°",
                            t.name(),
                            t.ra_hours(),
                            t.dec_deg()
                        )
                        .into()
                    })
                    .collect(),
            );
        }
        target_printer.display();

        // Time window.
        let start = start.ok_or(FilterArgsError::NoStart)?;
        let end = end.ok_or(FilterArgsError::NoEnd)?;
        let window = TimeWindow::from_iso(&start, &end)?;
        let time_res = match time_res {
            Some(s) => parse_duration(&s, TimeFormat::Min).map_err(FilterArgsError::TimeRes)?,
            None => Duration::from_f64(DEFAULT_TIME_RES_MINUTES, Unit::Minute),
        };
        let timestamps = window.grid(time_res)?;
        if window.duration() > Duration::from_seconds(0.0) && time_res > window.duration() {
            format!(
                "The time resolution ({time_res}) is longer than the window ({}); only its start and end are assessed",
                window.duration()
            )
            .warn();
        }
        let dut1 = Duration::from_seconds(dut1.unwrap_or_default());
        let mut time_printer = InfoPrinter::new("Time window".into());
        time_printer.push_block(vec![
            format!("Start: {}", window.start()).into(),
            format!("End:   {}", window.end()).into(),
        ]);
        time_printer.push_line(
            format!(
                "{} samples at a resolution of {time_res}",
                timestamps.len()
            )
            .into(),
        );
        time_printer.push_line(format!("DUT1: {:.10} s", dut1.to_seconds()).into());
        time_printer.display();

        // Constraint.
        let policy = match policy {
            Some(p) => Policy::from_str(&p).map_err(|_| FilterArgsError::BadPolicy(p))?,
            None => Policy::default(),
        };
        let airmass_model = match airmass_model {
            Some(m) => {
                AirmassModel::from_str(&m).map_err(|_| FilterArgsError::BadAirmassModel(m))?
            }
            None => AirmassModel::default(),
        };
        // Set the ceiling before the floor; a floor above the default ceiling
        // is fine if the ceiling is also raised.
        let constraint = AirmassConstraint::default()
            .with_model(airmass_model)
            .with_max(max_airmass.unwrap_or(DEFAULT_MAX_AIRMASS))?
            .with_min(min_airmass.unwrap_or(DEFAULT_MIN_AIRMASS))?;
        let settings = EvaluationSettings {
            time_res,
            policy,
            precess: !no_precession,
            dut1,
        };
        let mut constraint_printer = InfoPrinter::new("Constraint".into());
        constraint_printer.push_block(vec![
            format!(
                "Airmass between {} and {} ({airmass_model})",
                constraint.min(),
                constraint.max()
            )
            .into(),
            format!("Satisfied at {policy} sampled times").into(),
        ]);
        if no_precession {
            constraint_printer.push_line("Not precessing to J2000".into());
        }
        constraint_printer.display();

        display_warnings();

        Ok(FilterParams {
            observers,
            targets,
            window,
            constraint,
            settings,
            show_grid,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), SkyfilterError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub(super) enum FilterArgsError {
    #[error("No observatories were supplied")]
    NoObservatories,

    #[error("Observatory '{name}' wasn't found; available observatories are: {available}")]
    UnknownObservatory { name: String, available: String },

    #[error("Targets must be specified as <NAME> <RA_HOURS> <DEC_DEG>, but got {0} values")]
    BadTargetArgs(usize),

    #[error("Location specified as {0:?}, not [<Longitude>, <Latitude>, <Height>]")]
    BadLocation(Vec<String>),

    #[error("No start time was supplied for the time window")]
    NoStart,

    #[error("No end time was supplied for the time window")]
    NoEnd,

    #[error("Unrecognised policy '{0}'; supported policies are: {}", Policy::iter().join(", "))]
    BadPolicy(String),

    #[error("Unrecognised airmass model '{0}'; supported models are: {}", AirmassModel::iter().join(", "))]
    BadAirmassModel(String),

    #[error("Couldn't parse the time resolution: {0}")]
    TimeRes(#[source] UnitParseError),
}
