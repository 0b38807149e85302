//! Waypoint following: cache entries in, motion vectors out.

use voxnav_core::{Cell, Vec3};

use crate::AgentId;
use crate::cache::PathCache;
use crate::ports::AgentMotion;

/// Tuning for [`PathFollower`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FollowConfig {
    /// Motion vector magnitude, in cells per tick.
    pub step_speed: f32,
    /// Distance to a waypoint center below which the cursor advances.
    pub arrive_tolerance: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            step_speed: 0.25,
            arrive_tolerance: 0.3,
        }
    }
}

/// Turns cached paths into per-tick motion.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathFollower {
    config: FollowConfig,
}

impl PathFollower {
    pub fn new(config: FollowConfig) -> Self {
        Self { config }
    }

    /// The active tuning.
    pub fn config(&self) -> FollowConfig {
        self.config
    }

    /// Steering for `agent` standing at `position`.
    ///
    /// Advances the cursor past every waypoint already within tolerance,
    /// then returns the target cell and a motion vector of `step_speed`
    /// magnitude toward its center. `None` when the agent has no entry or
    /// just arrived at the final waypoint; an exhausted entry stays in the
    /// cache for the caller to clear or replace.
    pub fn steer(
        &self,
        cache: &mut PathCache,
        agent: AgentId,
        position: Vec3,
    ) -> Option<(Vec3, Cell)> {
        let mut target = cache.waypoint(agent)?;
        while (target.center() - position).length() <= self.config.arrive_tolerance {
            target = cache.advance(agent)?;
        }
        let motion = (target.center() - position).normalized() * self.config.step_speed;
        Some((motion, target))
    }

    /// Steer and forward the result to the host's motion port.
    ///
    /// Returns `false` when there was nothing to follow this tick.
    pub fn drive<M: AgentMotion>(
        &self,
        cache: &mut PathCache,
        agent: AgentId,
        position: Vec3,
        motion: &mut M,
    ) -> bool {
        match self.steer(cache, agent, position) {
            Some((v, target)) => {
                motion.look_at(agent, target);
                motion.set_motion(agent, v);
                true
            }
            None => false,
        }
    }
}
