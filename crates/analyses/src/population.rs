//! Live-cell population count.

use cellarium_api::{Analysis, AnalysisHandle, CellState, Component, InitMode};
use std::sync::Arc;

pub struct PopulationAnalysis;

impl PopulationAnalysis {
    pub const BASE_NAME: &'static str = "Population";

    pub fn factory(_mode: InitMode) -> AnalysisHandle {
        Arc::new(Self)
    }
}

impl Component for PopulationAnalysis {
    fn display_name(&self) -> &str {
        "Population Count"
    }

    fn tooltip(&self) -> &str {
        "Number of cells in a non-quiescent state each generation"
    }
}

impl Analysis for PopulationAnalysis {
    fn observe(&self, _generation: u64, cells: &[CellState]) -> f64 {
        cells.iter().filter(|&&s| s != 0).count() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_live_cells() {
        let analysis = PopulationAnalysis;
        assert_eq!(analysis.observe(0, &[0, 1, 2, 0, 1]), 3.0);
        assert_eq!(analysis.observe(1, &[]), 0.0);
    }
}
