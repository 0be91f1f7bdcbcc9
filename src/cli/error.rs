// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all skyfilter-related errors. This should be the *only*
//! error enum that is publicly visible from the binary.

use thiserror::Error;

use super::filter::FilterArgsError;
use crate::{
    normalise::{InvalidRecordError, TargetTableError},
    observability::{InvalidArgumentError, ObservabilityError},
    params::FilterError,
};

const RECORD_HELP: &str = "Observatories need a name, longitude and latitude [degrees] and height [metres].
Targets need a name, RA [hours] and Dec [degrees], e.g. [\"UGC03858\", 7.51289, 73.63019].";

/// The *only* publicly visible error from skyfilter. Each error message should
/// include a hint, unless it's "generic".
#[derive(Error, Debug)]
pub enum SkyfilterError {
    /// A bad observatory or target record.
    #[error("{0}\n\n{RECORD_HELP}")]
    Record(String),

    /// A bad target table file.
    #[error("{0}\n\nTarget tables have one target per line: <name> <RA [hours]> <Dec [degrees]>")]
    TargetTable(String),

    /// A bad time window, airmass constraint or list of targets.
    #[error("{0}")]
    InvalidArgument(String),

    /// The maths went wrong.
    #[error("{0}\n\nThis is a bug; please report it along with the arguments used.")]
    Computation(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files may be toml, json or yaml, and use the same names as the command-line flags (with underscores)")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<FilterArgsError> for SkyfilterError {
    fn from(e: FilterArgsError) -> Self {
        let s = e.to_string();
        match e {
            FilterArgsError::NoObservatories
            | FilterArgsError::UnknownObservatory { .. }
            | FilterArgsError::BadTargetArgs(_)
            | FilterArgsError::BadLocation(_) => Self::Record(s),
            FilterArgsError::NoStart
            | FilterArgsError::NoEnd
            | FilterArgsError::BadPolicy(_)
            | FilterArgsError::BadAirmassModel(_)
            | FilterArgsError::TimeRes(_) => Self::InvalidArgument(s),
        }
    }
}

impl From<InvalidRecordError> for SkyfilterError {
    fn from(e: InvalidRecordError) -> Self {
        Self::Record(e.to_string())
    }
}

impl From<TargetTableError> for SkyfilterError {
    fn from(e: TargetTableError) -> Self {
        let s = e.to_string();
        match e {
            TargetTableError::WrongFieldCount { .. } | TargetTableError::Empty => {
                Self::TargetTable(s)
            }
            TargetTableError::IO(_) => Self::Generic(s),
        }
    }
}

impl From<InvalidArgumentError> for SkyfilterError {
    fn from(e: InvalidArgumentError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}

impl From<ObservabilityError> for SkyfilterError {
    fn from(e: ObservabilityError) -> Self {
        match e {
            ObservabilityError::InvalidArgument(e) => Self::from(e),
            ObservabilityError::Computation(e) => Self::Computation(e.to_string()),
        }
    }
}

impl From<FilterError> for SkyfilterError {
    fn from(e: FilterError) -> Self {
        match e {
            FilterError::Observability(e) => Self::from(e),
            FilterError::IO(e) => Self::from(e),
        }
    }
}

// Library errors.

impl From<std::io::Error> for SkyfilterError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
