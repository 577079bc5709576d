//! Fraction of cells that changed state since the previous generation.

use cellarium_api::{Analysis, AnalysisHandle, CellState, Component, InitMode};
use std::sync::{Arc, Mutex};

/// Holds the previous generation for the diff; allocated on first
/// observation, never during construction, so minimal and full instances
/// cost the same to build.
pub struct ActivityAnalysis {
    previous: Mutex<Option<Vec<CellState>>>,
}

impl ActivityAnalysis {
    pub const BASE_NAME: &'static str = "Activity";

    pub fn factory(_mode: InitMode) -> AnalysisHandle {
        Arc::new(Self::new())
    }

    pub fn new() -> Self {
        Self {
            previous: Mutex::new(None),
        }
    }
}

impl Default for ActivityAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ActivityAnalysis {
    fn display_name(&self) -> &str {
        "Activity Trace"
    }

    fn tooltip(&self) -> &str {
        "Fraction of cells that changed since the previous generation"
    }
}

impl Analysis for ActivityAnalysis {
    fn observe(&self, _generation: u64, cells: &[CellState]) -> f64 {
        let mut previous = self.previous.lock().unwrap();
        let activity = match previous.as_deref() {
            Some(last) if last.len() == cells.len() && !cells.is_empty() => {
                let changed = last.iter().zip(cells).filter(|(a, b)| a != b).count();
                changed as f64 / cells.len() as f64
            }
            // First generation, or the lattice was rebuilt underneath us.
            _ => 0.0,
        };
        *previous = Some(cells.to_vec());
        activity
    }
}
