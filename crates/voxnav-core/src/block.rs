//! Voxel block samples.

/// The state of a single voxel, as sampled from the host world.
///
/// The engine only ever sees this two-bit summary; block identity, metadata
/// and storage stay on the host side of the [`WorldSampler`] port.
///
/// [`WorldSampler`]: crate::world::WorldSampler
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockState {
    /// A body cannot occupy a solid voxel.
    pub solid: bool,
    /// Whether sight passes through (air, glass, foliage).
    pub transparent: bool,
}

impl BlockState {
    /// Open, see-through space.
    pub const AIR: Self = Self {
        solid: false,
        transparent: true,
    };

    /// Full opaque block.
    pub const STONE: Self = Self {
        solid: true,
        transparent: false,
    };

    /// Solid but see-through (glass, ice).
    pub const GLASS: Self = Self {
        solid: true,
        transparent: true,
    };

    /// Whether a body can occupy this voxel.
    #[inline]
    pub fn is_open(self) -> bool {
        !self.solid
    }
}

impl Default for BlockState {
    fn default() -> Self {
        Self::AIR
    }
}
