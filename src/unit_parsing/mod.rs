// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into plain numbers or some quantity with a unit.

mod error;

pub use error::*;

use hifitime::{Duration, Unit};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum TimeFormat {
    /// Seconds
    S,

    /// Minutes
    Min,

    /// Hours
    H,
}

impl TimeFormat {
    fn unit(self) -> Unit {
        match self {
            TimeFormat::S => Unit::Second,
            TimeFormat::Min => Unit::Minute,
            TimeFormat::H => Unit::Hour,
        }
    }
}

/// Parse a string that may have a unit of time attached to it. If there's no
/// unit, the second element of the returned tuple is `None`.
pub fn parse_time(s: &str) -> Result<(f64, Option<TimeFormat>), UnitParseError> {
    // Try to parse a naked number.
    let maybe_number: Option<f64> = s.trim().parse().ok();
    if let Some(number) = maybe_number {
        return Ok((number, None));
    };

    // That didn't work; let's search over our supported formats.
    let suffix = s
        .trim()
        .trim_start_matches(|c| char::is_numeric(c) || c == '.')
        .trim();
    for time_format in TimeFormat::iter() {
        let time_format_str: &'static str = time_format.into();
        if suffix.to_uppercase() == time_format_str.to_uppercase() {
            let prefix = s.trim().trim_end_matches(char::is_alphabetic).trim();
            let number: f64 = match prefix.parse() {
                Ok(n) => n,
                Err(_) => {
                    return Err(UnitParseError::GotTimeUnitButCantParse {
                        input: s.to_string(),
                        unit: time_format_str,
                    })
                }
            };
            return Ok((number, Some(time_format)));
        }
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
        unit_type: "time",
    })
}

/// Parse a string into a [`Duration`]. If the string doesn't carry a unit,
/// `default_format` is used. The duration must be positive and finite.
pub fn parse_duration(s: &str, default_format: TimeFormat) -> Result<Duration, UnitParseError> {
    let (number, format) = parse_time(s)?;
    if !number.is_finite() || number <= 0.0 {
        return Err(UnitParseError::NotPositive(s.to_string()));
    }
    Ok(Duration::from_f64(
        number,
        format.unwrap_or(default_format).unit(),
    ))
}
