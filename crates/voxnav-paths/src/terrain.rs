//! Terrain validity rules: which cells a body can occupy, and how a single
//! step may change elevation.

use voxnav_core::{Cell, WorldSampler};

/// Maximum elevation gain of a generic walk step.
pub const MAX_STEP_UP: i32 = 1;
/// Maximum elevation gain reachable with a jump transition.
pub const MAX_JUMP: i32 = 2;
/// Maximum drop walked down without a special transition.
pub const MAX_DROP: i32 = 2;
/// Hard cap on vertical displacement across one evaluated transition.
/// Anything beyond is rejected regardless of surface type.
pub const MAX_VERTICAL_SPAN: i32 = 3;

/// Classification of a transition between two laterally adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepClass {
    /// Level ground, or an in-band descent (walking down needs no special
    /// move; [`TerrainOracle::is_downhill`] carries the distinction).
    Flat,
    /// One cell up, within reach of a plain step.
    StepUp,
    /// Two cells up: legal only for hosts that implement a jump move.
    Jump,
    /// Not traversable.
    Blocked,
}

/// Pure walkability classifier over sampled blocks.
///
/// Stateless beyond the sampler reference; every method is a function of
/// the sampled blocks and nothing else, so the oracle is safe to rebuild
/// per query and to use from any thread the sampler tolerates.
pub struct TerrainOracle<'a, W: WorldSampler> {
    world: &'a W,
}

impl<'a, W: WorldSampler> TerrainOracle<'a, W> {
    pub fn new(world: &'a W) -> Self {
        Self { world }
    }

    /// Whether a two-cell-tall body can legally stand at `cell`: the cell
    /// itself is open, the block below it gives footing, and the two
    /// blocks above leave head clearance.
    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.world.block_at(cell).is_open()
            && self.world.block_at(cell.below()).solid
            && self.world.block_at(cell.shift(0, 1, 0)).is_open()
            && self.world.block_at(cell.shift(0, 2, 0)).is_open()
    }

    /// Whether `from -> to` is an upward jump: `0 < Δy <=` [`MAX_JUMP`]
    /// with a standable, clear-headroom destination.
    pub fn is_jumpable(&self, from: Cell, to: Cell) -> bool {
        let dy = to.y - from.y;
        dy > 0 && dy <= MAX_JUMP && self.is_walkable(to)
    }

    /// Whether `from -> to` is an in-band descent:
    /// `-`[`MAX_DROP`]` <= Δy < 0` onto standable ground.
    pub fn is_downhill(&self, from: Cell, to: Cell) -> bool {
        let dy = to.y - from.y;
        dy < 0 && dy >= -MAX_DROP && self.is_walkable(to)
    }

    /// Classify the transition from the agent's current footing at `from`
    /// to the laterally adjacent column cell `to`.
    pub fn step_class(&self, from: Cell, to: Cell) -> StepClass {
        let dy = to.y - from.y;
        if dy.abs() > MAX_VERTICAL_SPAN || !self.is_walkable(to) {
            return StepClass::Blocked;
        }
        match dy {
            0 => StepClass::Flat,
            1 => StepClass::StepUp,
            2 => StepClass::Jump,
            -1 | -2 => StepClass::Flat,
            _ => StepClass::Blocked,
        }
    }
}
