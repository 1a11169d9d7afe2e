use crate::grid::{AIR, BlockId, VoxelGrid, WorldDims};

/// Block id used for generated terrain and default placement.
pub const STONE: BlockId = 1;

/// Fallback terrain: solid up to two thirds of the world depth, air above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatSlab {
    surface_y: usize,
}

impl FlatSlab {
    pub fn for_dims(dims: WorldDims) -> Self {
        Self {
            surface_y: dims.sy() * 2 / 3,
        }
    }

    /// Highest solid layer of the slab.
    #[inline]
    pub fn surface_y(&self) -> usize {
        self.surface_y
    }

    /// Whether `y` is the exposed slab layer (textured as grass by the mesher).
    #[inline]
    pub fn is_top_layer(&self, y: i32) -> bool {
        usize::try_from(y).is_ok_and(|y| y == self.surface_y)
    }

    #[inline]
    pub fn block_at(&self, y: usize) -> BlockId {
        if y <= self.surface_y { STONE } else { AIR }
    }

    pub fn fill(&self, dims: WorldDims) -> VoxelGrid {
        VoxelGrid::from_fn(dims, |_, y, _| self.block_at(y))
    }
}
