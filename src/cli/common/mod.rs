// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common code for command-line interfaces: argument files, help texts and
//! pretty printers.

mod printers;
#[cfg(test)]
mod tests;

pub(super) use printers::{display_warnings, InfoPrinter, Warn};

use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    constants::{DEFAULT_MAX_AIRMASS, DEFAULT_MIN_AIRMASS, DEFAULT_TIME_RES_MINUTES},
    observability::{AirmassModel, Policy},
    unit_parsing::TimeFormat,
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref MAX_AIRMASS_HELP: String =
        format!("The largest acceptable airmass (1 is the zenith). Default: {DEFAULT_MAX_AIRMASS}");

    pub(super) static ref MIN_AIRMASS_HELP: String =
        format!("The smallest acceptable airmass. Default: {DEFAULT_MIN_AIRMASS}");

    pub(super) static ref TIME_RES_HELP: String =
        format!("The time between samples of the window. Supported units: {}. A number without a unit is in minutes. Default: {DEFAULT_TIME_RES_MINUTES}min",
                TimeFormat::iter().join(", "));

    pub(super) static ref POLICY_HELP: String =
        format!("Whether a target must satisfy the airmass constraint at all sampled times, or any sampled time. Supported policies: {}. Default: {}",
                Policy::iter().join(", "), Policy::default());

    pub(super) static ref AIRMASS_MODEL_HELP: String =
        format!("How altitudes are converted to airmasses. Supported models: {}. Default: {}",
                AirmassModel::iter().join(", "), AirmassModel::default());
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
    #[strum(to_string = "yaml", serialize = "yml")]
    Yaml,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(SkyfilterError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(SkyfilterError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Yaml) => {
                debug!("Parsing yaml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_yaml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(SkyfilterError::ArgFile(format!(
                            "Couldn't decode yaml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(SkyfilterError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}
