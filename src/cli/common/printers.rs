// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Tree-shaped summaries of parsed arguments, logged as they're made sense of.
use std::{
    borrow::Cow,
    sync::{Mutex, MutexGuard},
};

use log::{log, Level};

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

type Block = Vec<Cow<'static, str>>;

lazy_static::lazy_static! {
    /// Warnings are held back until every argument has been summarised.
    static ref WARNINGS: Mutex<Vec<Block>> = Mutex::new(vec![]);
}

/// Nothing panics while holding the lock, but don't lose warnings if it ever
/// does.
fn warnings() -> MutexGuard<'static, Vec<Block>> {
    WARNINGS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn tree_symbol(i_line: usize, num_lines: usize, i_block: usize, num_blocks: usize) -> char {
    match (i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks) {
        (0, false, _) => VERTICAL_AND_RIGHT,
        (0, _, false) => VERTICAL_AND_RIGHT,
        (0, true, true) => UP_AND_RIGHT,
        _ => VERTICAL,
    }
}

/// Log a bold title followed by its blocks, each block hanging off the tree.
fn log_tree(level: Level, title: &str, blocks: &[Block]) {
    log!(level, "{}", console::style(title).bold());
    for (i_block, block) in blocks.iter().enumerate() {
        for (i_line, line) in block.iter().enumerate() {
            let symbol = tree_symbol(i_line, block.len(), i_block, blocks.len());
            log!(level, "{symbol} {line}");
        }
    }
    log!(level, "");
}

/// A titled summary, e.g. the observatories or the time window.
pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Block>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub(crate) fn display(self) {
        log_tree(Level::Info, &self.title, &self.blocks);
    }
}

pub(crate) trait Warn {
    fn warn(self);
}

impl Warn for String {
    fn warn(self) {
        warnings().push(vec![self.into()]);
    }
}

/// Print out any warnings that have been collected as CLI arguments have been
/// parsed. This should only be called once before all arguments have been
/// parsed into parameters.
pub(crate) fn display_warnings() {
    log::debug!("Displaying warnings");
    let mut warnings = warnings();
    if warnings.is_empty() {
        return;
    }
    log_tree(Level::Warn, "Warnings", &warnings);
    warnings.clear();
}
