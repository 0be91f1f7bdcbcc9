// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from turning raw records into observers and targets.

use thiserror::Error;

use crate::angle::AngleParseError;

#[derive(Error, Debug)]
pub enum InvalidRecordError {
    #[error("{record}: the required field '{field}' is missing")]
    MissingField {
        record: String,
        field: &'static str,
    },

    #[error("{record}: the name is empty")]
    EmptyName { record: String },

    #[error("{record}: couldn't parse '{field}': {err}")]
    BadAngle {
        record: String,
        field: &'static str,
        err: AngleParseError,
    },

    #[error("{record}: '{field}' must be a number, but got '{value}'")]
    NotNumeric {
        record: String,
        field: &'static str,
        value: String,
    },

    #[error("{record}: '{field}' was {value}, which is outside of {range}")]
    OutOfRange {
        record: String,
        field: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("{record}: expected a row of 3 fields (name, RA [hours], Dec [degrees]), but got {len}")]
    WrongRowLength { record: String, len: usize },
}

#[derive(Error, Debug)]
pub enum TargetTableError {
    #[error("Line {line} of the target table has {len} fields; expected 3 (name, RA [hours], Dec [degrees])")]
    WrongFieldCount { line: usize, len: usize },

    #[error("The target table has no targets")]
    Empty,

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
