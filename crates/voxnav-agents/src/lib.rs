//! Per-agent navigation on top of the voxnav search engine: a path cache,
//! an asynchronous search scheduler, and a waypoint follower.
//!
//! The intended wiring is a single synchronous tick loop: call
//! [`SearchScheduler::drain`] once per tick to apply finished searches to
//! the [`PathCache`], then steer each agent through [`PathFollower`].
//! Searches themselves run off-tick on a bounded Tokio worker pool, so a
//! long search never stalls agent updates.

pub mod cache;
pub mod follower;
pub mod ports;
pub mod scheduler;

pub use cache::{PathCache, PathEntry};
pub use follower::{FollowConfig, PathFollower};
pub use ports::AgentMotion;
pub use scheduler::{SearchRequest, SearchScheduler};

/// Agent identity, assigned by the host's entity system.
pub type AgentId = u64;
