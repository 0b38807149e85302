//! The graph seam: the pather trait hierarchy, and the terrain-filtered
//! adapter that gives search strategies their view of the voxel world.

use voxnav_core::{Cell, LATERAL_DIRS, WorldSampler};

use crate::distance::manhattan;
use crate::terrain::{StepClass, TerrainOracle};

/// Neighbor enumeration over an implicit graph of cells.
///
/// This is the only seam between terrain logic and the search strategies:
/// a strategy sees cells and edges, never blocks.
pub trait Pather {
    /// Append the neighbors of `c` into `buf`. The caller clears `buf`
    /// before calling.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}

/// [`Pather`] with positive edge costs.
pub trait WeightedPather: Pather {
    /// Cost of the edge from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Cell, to: Cell) -> i32;
}

/// [`WeightedPather`] with an admissible goal-distance estimate.
pub trait AstarPather: WeightedPather {
    /// Lower-bound estimate of the remaining cost from `from` to `to`.
    /// Must never overestimate.
    fn estimate(&self, from: Cell, to: Cell) -> i32;
}

/// Candidate elevation offsets for a lateral step, in probe order: level
/// first, then the step-up, then in-band drops. The first legal candidate
/// wins, so each direction contributes at most one neighbor.
const ELEVATIONS: [i32; 4] = [0, 1, -1, -2];

/// Graph adapter over a sampled voxel world.
///
/// Neighbors are generated in the fixed lateral order +x, −x, +z, −z so
/// searches are deterministic and reproducible. A candidate is included
/// only when [`TerrainOracle`] classifies the transition as traversable by
/// a generic walk step (`Flat` or `StepUp`).
pub struct TerrainPather<'a, W: WorldSampler> {
    oracle: TerrainOracle<'a, W>,
}

impl<'a, W: WorldSampler> TerrainPather<'a, W> {
    pub fn new(world: &'a W) -> Self {
        Self {
            oracle: TerrainOracle::new(world),
        }
    }

    /// The terrain rules backing this adapter.
    pub fn oracle(&self) -> &TerrainOracle<'a, W> {
        &self.oracle
    }
}

impl<W: WorldSampler> Pather for TerrainPather<'_, W> {
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        for d in LATERAL_DIRS {
            for dy in ELEVATIONS {
                let n = Cell::new(c.x + d.x, c.y + dy, c.z + d.z);
                let class = self.oracle.step_class(c, n);
                if matches!(class, StepClass::Flat | StepClass::StepUp) {
                    buf.push(n);
                    break;
                }
            }
        }
    }
}

impl<W: WorldSampler> WeightedPather for TerrainPather<'_, W> {
    fn cost(&self, _from: Cell, _to: Cell) -> i32 {
        // Uniform unit cost per lateral step.
        1
    }
}

impl<W: WorldSampler> AstarPather for TerrainPather<'_, W> {
    fn estimate(&self, from: Cell, to: Cell) -> i32 {
        manhattan(from, to)
    }
}
