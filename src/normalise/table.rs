// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plain-text target tables.
//!
//! Each line is `name ra_hours dec_degrees`, separated by whitespace, e.g.
//!
//! ```text
//! # name     RA [h]   Dec [deg]
//! PGC003183  0.90109  73.08478
//! UGC03858   7.51289  73.63019
//! ```
//!
//! Blank lines and anything after a `#` are ignored. The fields are kept as
//! text; they are checked when the records are normalised.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::debug;

use super::{RecordValue, TargetRecord, TargetTableError};

/// Read target records out of a whitespace-delimited table.
pub fn read_target_table<R: BufRead>(reader: R) -> Result<Vec<TargetRecord>, TargetTableError> {
    let mut records = vec![];
    for (i_line, line) in reader.lines().enumerate() {
        let line = line?;
        let content = match line.split_once('#') {
            Some((before, _)) => before,
            None => line.as_str(),
        };
        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != 3 {
            return Err(TargetTableError::WrongFieldCount {
                line: i_line + 1,
                len: fields.len(),
            });
        }
        records.push(TargetRecord::Row(
            fields.into_iter().map(RecordValue::from).collect(),
        ));
    }

    if records.is_empty() {
        return Err(TargetTableError::Empty);
    }
    Ok(records)
}

/// Read target records out of a whitespace-delimited table file.
pub fn read_target_table_file<P: AsRef<Path>>(
    file: P,
) -> Result<Vec<TargetRecord>, TargetTableError> {
    let file = file.as_ref();
    debug!("Reading target table {}", file.display());
    let records = read_target_table(BufReader::new(File::open(file)?))?;
    debug!("Read {} target records", records.len());
    Ok(records)
}
