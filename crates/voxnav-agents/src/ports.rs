//! Outbound ports consumed by the follower.

use voxnav_core::{Cell, Vec3};

use crate::AgentId;

/// Motion port exposed by the host's entity-movement system.
///
/// The follower emits at most one `look_at` and one `set_motion` per
/// steered agent per tick. Implementations decide what the vectors mean
/// physically (velocity, impulse, animation target).
pub trait AgentMotion {
    /// Apply a motion vector to the agent for this tick.
    fn set_motion(&mut self, agent: AgentId, motion: Vec3);

    /// Turn the agent toward a cell.
    fn look_at(&mut self, agent: AgentId, target: Cell);
}
