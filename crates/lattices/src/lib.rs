//! Built-in lattice topologies.
//!
//! The neighbor wiring itself lives in the lattice builder; these components
//! carry the construction contract and the metadata the workbench shows.

use cellarium_api::manifest::PluginManifest;
use cellarium_api::{Component, InitMode, Lattice, LatticeGeometry, LatticeHandle};
use std::sync::Arc;

/// Square grid with the Moore neighborhood.
pub struct SquareLattice;

impl SquareLattice {
    pub const BASE_NAME: &'static str = "Square";

    pub fn factory(_mode: InitMode) -> LatticeHandle {
        Arc::new(Self)
    }
}

impl Component for SquareLattice {
    fn display_name(&self) -> &str {
        "Square (8 neighbor)"
    }

    fn tooltip(&self) -> &str {
        "Square grid, Moore neighborhood"
    }
}

impl Lattice for SquareLattice {
    fn neighbor_count(&self) -> usize {
        8
    }

    fn geometry(&self) -> LatticeGeometry {
        LatticeGeometry::Square
    }
}

/// Hexagonal grid.
pub struct HexLattice;

impl HexLattice {
    pub const BASE_NAME: &'static str = "Hex";

    pub fn factory(_mode: InitMode) -> LatticeHandle {
        Arc::new(Self)
    }
}

impl Component for HexLattice {
    fn display_name(&self) -> &str {
        "Hexagonal (6 neighbor)"
    }

    fn tooltip(&self) -> &str {
        "Hexagonal tiling, six neighbors per cell"
    }
}

impl Lattice for HexLattice {
    fn neighbor_count(&self) -> usize {
        6
    }

    fn geometry(&self) -> LatticeGeometry {
        LatticeGeometry::Hexagonal
    }
}

/// Declarations for every built-in lattice, in one manifest.
pub fn builtin_manifest() -> PluginManifest {
    let mut manifest = PluginManifest::new();
    manifest
        .lattice(SquareLattice::BASE_NAME, SquareLattice::factory)
        .lattice(HexLattice::BASE_NAME, HexLattice::factory);
    manifest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        let square = SquareLattice;
        assert_eq!(square.display_name(), "Square (8 neighbor)");
        assert_eq!(square.neighbor_count(), 8);
        assert_eq!(square.geometry(), LatticeGeometry::Square);

        let hex = HexLattice;
        assert_eq!(hex.neighbor_count(), 6);
        assert_eq!(hex.geometry(), LatticeGeometry::Hexagonal);
    }
}
