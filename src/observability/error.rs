// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from assessing observability.

use thiserror::Error;

use crate::time::DateTimeParseError;

/// The inputs to an observability assessment don't make sense. Nothing is
/// computed when one of these is returned.
#[derive(Error, Debug)]
pub enum InvalidArgumentError {
    #[error("No targets were supplied")]
    NoTargets,

    #[error("No observatories were supplied")]
    NoObservers,

    #[error("The time window ends ({end}) before it starts ({start})")]
    WindowNotMonotonic { start: String, end: String },

    #[error("The time resolution must be positive, but got {0}")]
    ZeroTimeResolution(String),

    #[error(transparent)]
    BadDateTime(#[from] DateTimeParseError),

    #[error("The airmass ceiling must be at least 1 (the zenith), but got {0}")]
    AirmassCeilingTooLow(f64),

    #[error("The airmass floor ({min}) must be finite and no greater than the ceiling ({max})")]
    AirmassFloorAboveCeiling { min: f64, max: f64 },
}

/// Something went wrong with the numbers. This shouldn't happen once the
/// inputs have been validated.
#[derive(Error, Debug)]
pub enum ComputationError {
    #[error("The altitude of '{target}' at {epoch} is not finite")]
    NonFiniteAltitude { target: String, epoch: String },
}

#[derive(Error, Debug)]
pub enum ObservabilityError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    #[error(transparent)]
    Computation(#[from] ComputationError),
}
