//! Majority vote rule.

use cellarium_api::{CellState, Component, InitMode, Rule, RuleHandle};
use std::sync::Arc;

/// A cell takes the most common state in its neighborhood, itself included.
/// Ties keep the current state.
pub struct MajorityRule;

impl MajorityRule {
    pub const BASE_NAME: &'static str = "Majority";

    pub fn factory(_mode: InitMode) -> RuleHandle {
        Arc::new(Self)
    }
}

impl Component for MajorityRule {
    fn display_name(&self) -> &str {
        "Majority Vote"
    }

    fn tooltip(&self) -> &str {
        "Each cell joins the local majority; ties leave it unchanged"
    }
}

impl Rule for MajorityRule {
    fn next_state(&self, cell: CellState, neighbors: &[CellState]) -> CellState {
        let mut counts = [0usize; 256];
        counts[usize::from(cell)] += 1;
        for &n in neighbors {
            counts[usize::from(n)] += 1;
        }
        let best = counts.iter().copied().max().unwrap_or(0);
        if counts[usize::from(cell)] == best {
            return cell;
        }
        counts
            .iter()
            .position(|&c| c == best)
            .map(|s| s as CellState)
            .unwrap_or(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_wins() {
        let rule = MajorityRule;
        assert_eq!(rule.next_state(0, &[1, 1, 1, 0]), 1);
        assert_eq!(rule.next_state(1, &[0, 0, 1]), 1); // tie keeps the cell
        assert_eq!(rule.next_state(5, &[]), 5);
    }
}
