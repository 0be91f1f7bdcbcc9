// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Assess targets against observatories and report the results.

use std::{
    io::{self, Write},
    time::Instant,
};

use log::info;
use thiserror::Error;
use vec1::Vec1;

use crate::{
    normalise::{Observer, Target},
    observability::{
        evaluate_all_observers, AirmassConstraint, EvaluationSettings, ObservabilityError,
        ObservabilityGrid,
    },
    report::render,
    time::TimeWindow,
};

/// Parameters needed to filter targets.
pub(crate) struct FilterParams {
    pub(crate) observers: Vec1<Observer>,

    /// The targets to assess, in the order they were given.
    pub(crate) targets: Vec<Target>,

    pub(crate) window: TimeWindow,

    pub(crate) constraint: AirmassConstraint,

    pub(crate) settings: EvaluationSettings,

    /// Print the airmass grid as well as the observable mask.
    pub(crate) show_grid: bool,
}

impl FilterParams {
    /// Assess every target from every observer.
    pub(crate) fn evaluate(&self) -> Result<Vec<ObservabilityGrid>, ObservabilityError> {
        evaluate_all_observers(
            &self.observers,
            &self.targets,
            &self.window,
            &self.constraint,
            &self.settings,
        )
    }

    /// Render the results of [`FilterParams::evaluate`], one section per
    /// observer.
    pub(crate) fn report(&self, grids: &[ObservabilityGrid]) -> String {
        self.observers
            .iter()
            .zip(grids)
            .map(|(observer, grid)| render(observer, &self.targets, grid, self.show_grid))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn run(&self) -> Result<(), FilterError> {
        let start = Instant::now();
        let grids = self.evaluate()?;
        info!(
            "Assessed {} targets from {} observatories in {:.3?}",
            self.targets.len(),
            self.observers.len(),
            start.elapsed()
        );

        let mut stdout = io::stdout().lock();
        stdout.write_all(self.report(&grids).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub(crate) enum FilterError {
    #[error(transparent)]
    Observability(#[from] ObservabilityError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
