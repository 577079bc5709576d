//! Voter model: a cell adopts the state of a pseudo-randomly picked
//! neighbor.

use cellarium_api::{CellState, Component, InitMode, Rule, RuleHandle};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generator state shared by every `VoterRule` instance in the process.
///
/// The workbench relies on this: a reseed applied through one instance must
/// steer all of them, no matter which scan pass produced the identifier they
/// were resolved from.
static SHARED_SEED: AtomicU64 = AtomicU64::new(0x9E37_79B9_7F4A_7C15);

pub struct VoterRule;

impl VoterRule {
    pub const BASE_NAME: &'static str = "Voter";

    pub fn factory(_mode: InitMode) -> RuleHandle {
        Arc::new(Self)
    }

    /// Reset the shared generator, e.g. when the user fixes a seed for a
    /// reproducible run.
    pub fn reseed(&self, seed: u64) {
        // 0 would trap the xorshift generator.
        SHARED_SEED.store(seed.max(1), Ordering::SeqCst);
    }

    pub fn current_seed(&self) -> u64 {
        SHARED_SEED.load(Ordering::SeqCst)
    }

    fn step(mut x: u64) -> u64 {
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        x
    }

    fn next_random(&self) -> u64 {
        SHARED_SEED
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |x| Some(Self::step(x)))
            .map(Self::step)
            .unwrap_or(1)
    }
}

impl Component for VoterRule {
    fn display_name(&self) -> &str {
        "Voter Model"
    }

    fn tooltip(&self) -> &str {
        "Each cell copies the opinion of one randomly chosen neighbor"
    }
}

impl Rule for VoterRule {
    fn next_state(&self, cell: CellState, neighbors: &[CellState]) -> CellState {
        if neighbors.is_empty() {
            return cell;
        }
        let pick = (self.next_random() % neighbors.len() as u64) as usize;
        neighbors[pick]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adopts_a_neighbor_state() {
        let rule = VoterRule;
        rule.reseed(42);
        let neighbors = [3u8, 3, 3, 3];
        assert_eq!(rule.next_state(0, &neighbors), 3);
        assert_eq!(rule.next_state(7, &[]), 7);
    }

    #[test]
    fn test_seed_is_shared_across_instances() {
        let a = VoterRule;
        let b = VoterRule;
        a.reseed(1234);
        assert_eq!(b.current_seed(), 1234);
        b.next_state(0, &[1, 2, 3]);
        assert_ne!(a.current_seed(), 1234);
    }
}
