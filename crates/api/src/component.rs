use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// State of one lattice cell. Rules with richer state pack it into the byte.
pub type CellState = u8;

/// Metadata every component exposes regardless of kind.
///
/// `display_name` is the catalog lookup key; a component returning an empty
/// name is discarded during discovery.
pub trait Component: Send + Sync {
    /// Human-readable label shown in workbench menus.
    fn display_name(&self) -> &str;

    /// Short description for tooltips.
    fn tooltip(&self) -> &str {
        ""
    }
}

/// A simulation-step provider: computes the next state of a single cell from
/// its current state and its neighborhood.
pub trait Rule: Component {
    fn next_state(&self, cell: CellState, neighbors: &[CellState]) -> CellState;
}

/// An observer run once per generation over the flattened cell states,
/// producing a scalar observation for the analysis panel.
pub trait Analysis: Component {
    fn observe(&self, generation: u64, cells: &[CellState]) -> f64;
}

/// A topology provider. The actual neighbor wiring is the lattice builder's
/// concern; the registry only needs construction and metadata.
pub trait Lattice: Component {
    /// Number of neighbors each cell has in this topology.
    fn neighbor_count(&self) -> usize;

    fn geometry(&self) -> LatticeGeometry;
}

/// Geometry descriptor used by the host for cell layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatticeGeometry {
    Square,
    Hexagonal,
    Triangular,
}

/// Locates auxiliary resources (images, help text) living outside the
/// packaged application, e.g. in user extension folders. Constructed with no
/// arguments through the loader.
pub trait ResourceDelegate: Send + Sync {
    fn locate(&self, name: &str) -> Option<PathBuf>;
}

pub type RuleHandle = Arc<dyn Rule>;
pub type AnalysisHandle = Arc<dyn Analysis>;
pub type LatticeHandle = Arc<dyn Lattice>;
