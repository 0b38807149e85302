//! **voxnav-core** — Voxel-world agent navigation (core types).
//!
//! This crate provides the foundational types used across the *voxnav*
//! ecosystem: the integer [`Cell`] grid coordinate, [`Vec3`] motion vectors,
//! voxel [`BlockState`] samples, and the [`WorldSampler`] port through which
//! the engine reads the host world.

pub mod block;
pub mod geom;
pub mod world;

pub use block::BlockState;
pub use geom::{Cell, LATERAL_DIRS, Vec3};
pub use world::{InMemoryWorld, WorldSampler};
