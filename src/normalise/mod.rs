// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Observers and targets, and the code to make them out of raw records.
//!
//! Records are deliberately loose (every field is optional and numbers may be
//! strings) so that a missing or malformed field is reported as an
//! [`InvalidRecordError`] naming the offending record, rather than as a
//! deserialisation error.

mod error;
mod table;

pub use error::{InvalidRecordError, TargetTableError};
pub use table::{read_target_table, read_target_table_file};

use std::borrow::Cow;

use marlu::{LatLngHeight, RADec};
use serde::{Deserialize, Serialize};

use crate::{
    angle::{parse_degrees, parse_hours, AngleParseError},
    constants::{DEGREES_PER_HOUR, MAX_ABS_LATITUDE_DEG},
};

/// A single value in a record. Angles may be given as numbers or as strings
/// (e.g. "-64.5467d" or "07:30:46.4").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RecordValue {
    fn from(n: f64) -> Self {
        RecordValue::Number(n)
    }
}

impl From<&str> for RecordValue {
    fn from(s: &str) -> Self {
        RecordValue::Text(s.to_string())
    }
}

/// An observatory, as it is written in an arguments file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservatoryRecord {
    pub name: Option<String>,

    /// \[degrees\]
    pub longitude: Option<RecordValue>,

    /// \[degrees\]
    pub latitude: Option<RecordValue>,

    /// Height above the reference ellipsoid \[metres\]
    pub height: Option<RecordValue>,
}

/// A target, as it is written in an arguments file or target table. Either a
/// mapping with named fields or a row of `[name, ra_hours, dec_degrees]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetRecord {
    Row(Vec<RecordValue>),

    Fields {
        name: Option<String>,

        /// Right ascension \[hours\]
        ra: Option<RecordValue>,

        /// Declination \[degrees\]
        dec: Option<RecordValue>,
    },
}

impl TargetRecord {
    fn name(&self) -> Option<Cow<'_, str>> {
        match self {
            TargetRecord::Row(fields) => fields.first().map(|v| match v {
                RecordValue::Text(s) => Cow::Borrowed(s.as_str()),
                RecordValue::Number(n) => Cow::Owned(n.to_string()),
            }),
            TargetRecord::Fields { name, .. } => name.as_deref().map(Cow::Borrowed),
        }
    }
}

/// A named location on the Earth. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Observer {
    name: String,
    longitude_rad: f64,
    latitude_rad: f64,
    height_m: f64,
}

impl Observer {
    /// Make a new observer. The location is not checked; use
    /// [`normalise_observer`] for raw input.
    pub fn new(name: &str, longitude_deg: f64, latitude_deg: f64, height_m: f64) -> Observer {
        Observer {
            name: name.to_string(),
            longitude_rad: longitude_deg.to_radians(),
            latitude_rad: latitude_deg.to_radians(),
            height_m,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> LatLngHeight {
        LatLngHeight {
            longitude_rad: self.longitude_rad,
            latitude_rad: self.latitude_rad,
            height_metres: self.height_m,
        }
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_rad.to_degrees()
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_rad.to_degrees()
    }

    pub fn height_m(&self) -> f64 {
        self.height_m
    }
}

/// A named, fixed position on the celestial sphere (J2000). Immutable once
/// constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    name: String,
    ra_rad: f64,
    dec_rad: f64,
}

impl Target {
    /// Make a new target from a right ascension in *hours* and a declination
    /// in degrees.
    pub fn new(name: &str, ra_hours: f64, dec_deg: f64) -> Target {
        Target {
            name: name.to_string(),
            ra_rad: (ra_hours * DEGREES_PER_HOUR).to_radians(),
            dec_rad: dec_deg.to_radians(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radec(&self) -> RADec {
        RADec::from_radians(self.ra_rad, self.dec_rad)
    }

    pub fn ra_deg(&self) -> f64 {
        self.ra_rad.to_degrees()
    }

    pub fn ra_hours(&self) -> f64 {
        self.ra_deg() / DEGREES_PER_HOUR
    }

    pub fn dec_deg(&self) -> f64 {
        self.dec_rad.to_degrees()
    }
}

/// Turn a single observatory record into an [`Observer`].
pub fn normalise_observer(record: &ObservatoryRecord) -> Result<Observer, InvalidRecordError> {
    let label = match record.name.as_deref() {
        Some(n) => format!("Observatory '{n}'"),
        None => "Observatory record".to_string(),
    };
    observer_from_record(record, label)
}

/// Turn many observatory records into [`Observer`]s, preserving order. The
/// first bad record stops normalisation.
pub fn normalise_observers(
    records: &[ObservatoryRecord],
) -> Result<Vec<Observer>, InvalidRecordError> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let label = match record.name.as_deref() {
                Some(n) => format!("Observatory record {i} ('{n}')"),
                None => format!("Observatory record {i}"),
            };
            observer_from_record(record, label)
        })
        .collect()
}

/// Turn a single target record into a [`Target`].
pub fn normalise_target(record: &TargetRecord) -> Result<Target, InvalidRecordError> {
    let label = match record.name() {
        Some(n) => format!("Target '{n}'"),
        None => "Target record".to_string(),
    };
    target_from_record(record, label)
}

/// Turn many target records into [`Target`]s, preserving order. The first
/// bad record stops normalisation.
pub fn normalise_targets(records: &[TargetRecord]) -> Result<Vec<Target>, InvalidRecordError> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let label = match record.name() {
                Some(n) => format!("Target record {i} ('{n}')"),
                None => format!("Target record {i}"),
            };
            target_from_record(record, label)
        })
        .collect()
}

fn observer_from_record(
    record: &ObservatoryRecord,
    label: String,
) -> Result<Observer, InvalidRecordError> {
    let ObservatoryRecord {
        name,
        longitude,
        latitude,
        height,
    } = record;

    let name = require_name(name.as_deref(), &label)?;
    let longitude = angle_field(longitude.as_ref(), "longitude", &label, parse_degrees)?;
    check_range(longitude, -180.0..360.0, "longitude", "[-180, 360)", &label)?;
    let latitude = angle_field(latitude.as_ref(), "latitude", &label, parse_degrees)?;
    check_range(
        latitude,
        -MAX_ABS_LATITUDE_DEG..=MAX_ABS_LATITUDE_DEG,
        "latitude",
        "[-90, 90]",
        &label,
    )?;
    let height = height_field(height.as_ref(), &label)?;

    Ok(Observer::new(name, longitude, latitude, height))
}

fn target_from_record(record: &TargetRecord, label: String) -> Result<Target, InvalidRecordError> {
    let (name, ra, dec) = match record {
        TargetRecord::Row(fields) => match fields.as_slice() {
            [name, ra, dec] => {
                let name = match name {
                    RecordValue::Text(s) => Cow::Borrowed(s.as_str()),
                    RecordValue::Number(n) => Cow::Owned(n.to_string()),
                };
                (Some(name), Some(ra), Some(dec))
            }
            _ => {
                return Err(InvalidRecordError::WrongRowLength {
                    record: label,
                    len: fields.len(),
                })
            }
        },
        TargetRecord::Fields { name, ra, dec } => {
            (name.as_deref().map(Cow::Borrowed), ra.as_ref(), dec.as_ref())
        }
    };

    let name = require_name(name.as_deref(), &label)?;
    let ra_hours = angle_field(ra, "ra", &label, parse_hours)?;
    check_range(ra_hours, 0.0..=24.0, "ra", "[0, 24] hours", &label)?;
    let dec = angle_field(dec, "dec", &label, parse_degrees)?;
    check_range(
        dec,
        -MAX_ABS_LATITUDE_DEG..=MAX_ABS_LATITUDE_DEG,
        "dec",
        "[-90, 90]",
        &label,
    )?;

    Ok(Target::new(name, ra_hours, dec))
}

fn require_name<'a>(name: Option<&'a str>, label: &str) -> Result<&'a str, InvalidRecordError> {
    match name.map(str::trim) {
        None => Err(InvalidRecordError::MissingField {
            record: label.to_string(),
            field: "name",
        }),
        Some("") => Err(InvalidRecordError::EmptyName {
            record: label.to_string(),
        }),
        Some(n) => Ok(n),
    }
}

fn angle_field(
    value: Option<&RecordValue>,
    field: &'static str,
    label: &str,
    parser: fn(&str) -> Result<f64, AngleParseError>,
) -> Result<f64, InvalidRecordError> {
    match value {
        None => Err(InvalidRecordError::MissingField {
            record: label.to_string(),
            field,
        }),
        Some(RecordValue::Number(n)) if n.is_finite() => Ok(*n),
        Some(RecordValue::Number(n)) => Err(InvalidRecordError::NotNumeric {
            record: label.to_string(),
            field,
            value: n.to_string(),
        }),
        Some(RecordValue::Text(s)) => parser(s).map_err(|err| InvalidRecordError::BadAngle {
            record: label.to_string(),
            field,
            err,
        }),
    }
}

fn height_field(value: Option<&RecordValue>, label: &str) -> Result<f64, InvalidRecordError> {
    let not_numeric = |value: String| InvalidRecordError::NotNumeric {
        record: label.to_string(),
        field: "height",
        value,
    };
    match value {
        None => Err(InvalidRecordError::MissingField {
            record: label.to_string(),
            field: "height",
        }),
        Some(RecordValue::Number(n)) if n.is_finite() => Ok(*n),
        Some(RecordValue::Number(n)) => Err(not_numeric(n.to_string())),
        Some(RecordValue::Text(s)) => {
            // Allow a trailing "m", as in "1350m".
            let trimmed = s.trim();
            match trimmed.strip_suffix('m').unwrap_or(trimmed).trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(n),
                _ => Err(not_numeric(s.clone())),
            }
        }
    }
}

fn check_range<R: std::ops::RangeBounds<f64>>(
    value: f64,
    range: R,
    field: &'static str,
    range_str: &'static str,
    label: &str,
) -> Result<(), InvalidRecordError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(InvalidRecordError::OutOfRange {
            record: label.to_string(),
            field,
            value,
            range: range_str,
        })
    }
}
