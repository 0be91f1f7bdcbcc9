// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turn observability results into text.

use std::fmt::Write;

use hifitime::Epoch;
use itertools::Itertools;
use thiserror::Error;

use crate::{
    normalise::{Observer, Target},
    observability::ObservabilityGrid,
};

/// Render an observability mask as `name: true/false` lines, one per target.
/// The values are aligned in a column.
pub fn render_mask(targets: &[Target], mask: &[bool]) -> String {
    let width = targets
        .iter()
        .map(|t| t.name().chars().count())
        .max()
        .unwrap_or(0)
        + 1;
    let mut out = String::new();
    for (target, &observable) in targets.iter().zip(mask.iter()) {
        let name = format!("{}:", target.name());
        // Writing to a String can't fail.
        let _ = writeln!(out, "{name:width$} {observable}");
    }
    out
}

/// Render the airmass of every target at every sampled instant. Airmasses
/// that fail the constraint are marked with a `*`; a target below the horizon
/// is shown as `-`.
pub fn render_grid(targets: &[Target], grid: &ObservabilityGrid) -> String {
    let name_width = targets
        .iter()
        .map(|t| t.name().chars().count())
        .chain(std::iter::once("target".len()))
        .max()
        .unwrap_or(0);
    let multi_day = {
        let (y0, m0, d0, ..) = grid.timestamps.first().to_gregorian_utc();
        let (y1, m1, d1, ..) = grid.timestamps.last().to_gregorian_utc();
        (y0, m0, d0) != (y1, m1, d1)
    };
    let headers = grid
        .timestamps
        .iter()
        .map(|&t| column_header(t, multi_day))
        .collect::<Vec<_>>();
    let cell_width = headers.iter().map(|h| h.len()).max().unwrap_or(0).max(7);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:name_width$}  {}",
        "target",
        headers
            .iter()
            .format_with(" ", |h, f| f(&format_args!("{h:>cell_width$}")))
    );
    for ((target, airmasses), satisfied) in targets
        .iter()
        .zip(grid.airmass.outer_iter())
        .zip(grid.satisfied.outer_iter())
    {
        let cells = airmasses.iter().zip(satisfied.iter()).map(|(&am, &ok)| {
            if am.is_infinite() {
                "-".to_string()
            } else if ok {
                format!("{am:.2}")
            } else {
                format!("{am:.2}*")
            }
        });
        let _ = writeln!(
            out,
            "{:name_width$}  {}",
            target.name(),
            cells.format_with(" ", |c, f| f(&format_args!("{c:>cell_width$}")))
        );
    }
    out
}

fn column_header(t: Epoch, with_date: bool) -> String {
    let (_, month, day, hour, minute, ..) = t.to_gregorian_utc();
    if with_date {
        format!("{month:02}-{day:02} {hour:02}:{minute:02}")
    } else {
        format!("{hour:02}:{minute:02}")
    }
}

/// Render the results for an observer: a heading, the mask, and (optionally)
/// the airmass grid.
pub fn render(
    observer: &Observer,
    targets: &[Target],
    grid: &ObservabilityGrid,
    show_grid: bool,
) -> String {
    let mut out = format!(
        "# {} ({} of {} {HEADING_MARKER}{}')\n",
        observer.name(),
        grid.observable.iter().filter(|&&o| o).count(),
        grid.observable.len(),
        grid.policy
    );
    out.push_str(&render_mask(targets, &grid.observable));
    if show_grid {
        out.push('\n');
        out.push_str(&render_grid(targets, grid));
    }
    out
}

/// Every heading written by [`render`] contains this, and ends with `')`.
const HEADING_MARKER: &str = "targets observable, policy '";

fn is_heading(line: &str) -> bool {
    line.starts_with("# ") && line.ends_with("')") && line.contains(HEADING_MARKER)
}

/// Read back the lines written by [`render_mask`]. Blank lines and the
/// headings written by [`render`] are skipped; target names may start with
/// `#`.
pub fn parse_rendered_mask(s: &str) -> Result<Vec<(String, bool)>, MaskParseError> {
    let mut pairs = vec![];
    for (i_line, line) in s.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || is_heading(line) {
            continue;
        }
        // Names may contain colons, but the value never does.
        let (name, value) = line
            .rsplit_once(':')
            .ok_or_else(|| MaskParseError::NoColon {
                line: i_line + 1,
                content: line.to_string(),
            })?;
        let value = value
            .trim()
            .parse()
            .map_err(|_| MaskParseError::NotBool {
                line: i_line + 1,
                content: line.to_string(),
            })?;
        pairs.push((name.trim().to_string(), value));
    }
    Ok(pairs)
}

#[derive(Error, Debug)]
pub enum MaskParseError {
    #[error("Line {line} ('{content}') has no ':' separating the name and value")]
    NoColon { line: usize, content: String },

    #[error("Line {line} ('{content}') doesn't end with 'true' or 'false'")]
    NotBool { line: usize, content: String },
}
