use thiserror::Error;

/// Block identifier. `AIR` is empty; every other id is a solid, opaque cube.
pub type BlockId = u8;

pub const AIR: BlockId = 0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid world dimensions {sx}x{sy}x{sz}")]
    InvalidDims { sx: usize, sy: usize, sz: usize },
    #[error("block data holds {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Grid extents: `sx` = width (x), `sy` = depth (y, vertical), `sz` = height (z).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldDims {
    sx: usize,
    sy: usize,
    sz: usize,
}

impl WorldDims {
    pub fn new(sx: usize, sy: usize, sz: usize) -> Result<Self, GridError> {
        let fits = |v: usize| v > 0 && i32::try_from(v).is_ok();
        let volume = sx.checked_mul(sy).and_then(|v| v.checked_mul(sz));
        // column tops are stored as i16
        let sy_ok = sy <= i16::MAX as usize + 1;
        if !(fits(sx) && fits(sy) && fits(sz)) || !sy_ok || volume.is_none() {
            return Err(GridError::InvalidDims { sx, sy, sz });
        }
        Ok(Self { sx, sy, sz })
    }

    #[inline]
    pub fn sx(&self) -> usize {
        self.sx
    }

    #[inline]
    pub fn sy(&self) -> usize {
        self.sy
    }

    #[inline]
    pub fn sz(&self) -> usize {
        self.sz
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.sx * self.sy * self.sz
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.sx * self.sz
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.sx
            && (y as usize) < self.sy
            && (z as usize) < self.sz
    }

    /// Linear index of an in-bounds cell. This ordering is the on-disk layout.
    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }
}

/// Dense block storage; the only source of truth for occupancy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    dims: WorldDims,
    blocks: Vec<BlockId>,
}

impl VoxelGrid {
    /// All-air grid.
    pub fn new(dims: WorldDims) -> Self {
        Self {
            dims,
            blocks: vec![AIR; dims.volume()],
        }
    }

    /// Grid over raw block bytes laid out in `WorldDims::idx` order.
    pub fn from_bytes(dims: WorldDims, blocks: Vec<BlockId>) -> Result<Self, GridError> {
        if blocks.len() != dims.volume() {
            return Err(GridError::SizeMismatch {
                expected: dims.volume(),
                actual: blocks.len(),
            });
        }
        Ok(Self { dims, blocks })
    }

    /// Grid filled cell by cell from `f(x, y, z)`.
    pub fn from_fn(dims: WorldDims, mut f: impl FnMut(usize, usize, usize) -> BlockId) -> Self {
        let mut blocks = Vec::with_capacity(dims.volume());
        for y in 0..dims.sy() {
            for z in 0..dims.sz() {
                for x in 0..dims.sx() {
                    blocks.push(f(x, y, z));
                }
            }
        }
        Self { dims, blocks }
    }

    #[inline]
    pub fn dims(&self) -> WorldDims {
        self.dims
    }

    #[inline]
    pub fn as_bytes(&self) -> &[BlockId] {
        &self.blocks
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        self.dims.contains(x, y, z)
    }

    /// Block at `(x, y, z)`; `AIR` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockId {
        if !self.in_bounds(x, y, z) {
            return AIR;
        }
        self.blocks[self.dims.idx(x as usize, y as usize, z as usize)]
    }

    /// Overwrites the block at `(x, y, z)`. Returns false (and does nothing)
    /// outside the grid.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, id: BlockId) -> bool {
        if !self.in_bounds(x, y, z) {
            return false;
        }
        let i = self.dims.idx(x as usize, y as usize, z as usize);
        self.blocks[i] = id;
        true
    }

    #[inline]
    pub fn occupied(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z) != AIR
    }

    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|&&b| b != AIR).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(sx: usize, sy: usize, sz: usize) -> WorldDims {
        WorldDims::new(sx, sy, sz).unwrap()
    }

    #[test]
    fn index_is_y_major_then_z_then_x() {
        let d = dims(4, 3, 5);
        assert_eq!(d.idx(0, 0, 0), 0);
        assert_eq!(d.idx(1, 0, 0), 1);
        assert_eq!(d.idx(0, 0, 1), 4);
        assert_eq!(d.idx(0, 1, 0), 20);
        assert_eq!(d.idx(3, 2, 4), d.volume() - 1);
    }

    #[test]
    fn rejects_degenerate_dims() {
        assert!(WorldDims::new(0, 4, 4).is_err());
        assert!(WorldDims::new(4, 0, 4).is_err());
        assert!(WorldDims::new(usize::MAX, 2, 2).is_err());
        assert!(WorldDims::new(2, 40_000, 2).is_err());
    }

    #[test]
    fn tallest_accepted_depth_is_i16_range() {
        let d = dims(1, 32_768, 1);
        assert_eq!((d.sx(), d.sy(), d.sz()), (1, 32_768, 1));
        assert_eq!(
            WorldDims::new(1, 32_769, 1),
            Err(GridError::InvalidDims {
                sx: 1,
                sy: 32_769,
                sz: 1
            })
        );
    }

    #[test]
    fn from_bytes_requires_exact_volume() {
        let d = dims(2, 2, 2);
        assert_eq!(
            VoxelGrid::from_bytes(d, vec![0; 7]),
            Err(GridError::SizeMismatch {
                expected: 8,
                actual: 7
            })
        );
        assert!(VoxelGrid::from_bytes(d, vec![0; 8]).is_ok());
    }

    #[test]
    fn from_fn_matches_index_layout() {
        let d = dims(3, 2, 4);
        let g = VoxelGrid::from_fn(d, |x, y, z| (d.idx(x, y, z) % 251) as u8);
        for (i, b) in g.as_bytes().iter().enumerate() {
            assert_eq!(*b as usize, i % 251);
        }
    }

    #[test]
    fn out_of_bounds_reads_air_and_ignores_writes() {
        let mut g = VoxelGrid::from_fn(dims(2, 2, 2), |_, _, _| 1);
        let before = g.clone();
        for (x, y, z) in [(-1, 0, 0), (0, -1, 0), (0, 0, -1), (2, 0, 0), (0, 2, 0), (0, 0, 2)] {
            assert_eq!(g.get(x, y, z), AIR);
            assert!(!g.set(x, y, z, 7));
        }
        assert_eq!(g, before);
        assert!(g.set(1, 1, 1, 7));
        assert_eq!(g.get(1, 1, 1), 7);
        assert!(g.occupied(0, 0, 0));
    }
}
