//! Conway's Game of Life.

use cellarium_api::{CellState, Component, InitMode, Rule, RuleHandle};
use std::sync::Arc;

/// Classic B3/S23 outer-totalistic rule.
///
/// Full construction precomputes a next-state table indexed by
/// `(cell, live neighbor count)`; minimal construction skips it and answers
/// metadata only, so probing stays cheap.
pub struct LifeRule {
    table: Option<[[CellState; 9]; 2]>,
}

impl LifeRule {
    pub const BASE_NAME: &'static str = "Life";

    pub fn factory(mode: InitMode) -> RuleHandle {
        Arc::new(Self::new(mode))
    }

    pub fn new(mode: InitMode) -> Self {
        let table = match mode {
            InitMode::Minimal => None,
            InitMode::Full => {
                let mut table = [[0; 9]; 2];
                for live in 0..=8 {
                    table[0][live] = u8::from(live == 3);
                    table[1][live] = u8::from(live == 2 || live == 3);
                }
                Some(table)
            }
        };
        Self { table }
    }

    pub fn is_execution_ready(&self) -> bool {
        self.table.is_some()
    }

    fn live_neighbors(neighbors: &[CellState]) -> usize {
        neighbors.iter().filter(|&&s| s != 0).count()
    }
}

impl Component for LifeRule {
    fn display_name(&self) -> &str {
        "Game of Life"
    }

    fn tooltip(&self) -> &str {
        "Conway's classic: birth on 3 live neighbors, survival on 2 or 3"
    }
}

impl Rule for LifeRule {
    fn next_state(&self, cell: CellState, neighbors: &[CellState]) -> CellState {
        let live = Self::live_neighbors(neighbors).min(8);
        match &self.table {
            Some(table) => table[usize::from(cell.min(1))][live],
            None => {
                let alive = cell != 0;
                u8::from(if alive { live == 2 || live == 3 } else { live == 3 })
            }
        }
    }
}
