//! Shared test worlds.

use voxnav_core::{BlockState, Cell, InMemoryWorld};

/// Flat open platform: floor slab at y = -1 over `x, z ∈ 0..size`, so the
/// walk surface is y = 0. Everything else is air.
pub(crate) fn platform(size: i32) -> InMemoryWorld {
    let mut w = InMemoryWorld::new();
    w.fill_box(
        Cell::new(0, -1, 0),
        Cell::new(size - 1, -1, size - 1),
        BlockState::STONE,
    );
    w
}

/// Raise a solid wall at `x`, `height` cells tall above the walk surface,
/// spanning the platform's full depth (no opening).
pub(crate) fn wall(w: &mut InMemoryWorld, x: i32, height: i32, size: i32) {
    w.fill_box(
        Cell::new(x, 0, 0),
        Cell::new(x, height - 1, size - 1),
        BlockState::STONE,
    );
}
