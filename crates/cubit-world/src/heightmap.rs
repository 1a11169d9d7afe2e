use crate::grid::VoxelGrid;

/// Brightness of a cell with open sky above it.
pub const FULL_BRIGHT: f32 = 1.0;
/// Brightness of a cell below its column's top block.
pub const SHADOWED: f32 = 0.5;

/// Per-column top solid `y` (`-1` for empty columns), indexed `z * sx + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightMap {
    sx: usize,
    sz: usize,
    tops: Vec<i16>,
}

impl HeightMap {
    /// Heightmap computed from every column of `grid`.
    pub fn build(grid: &VoxelGrid) -> Self {
        let dims = grid.dims();
        let mut hm = Self {
            sx: dims.sx(),
            sz: dims.sz(),
            tops: vec![-1; dims.columns()],
        };
        hm.rebuild(grid);
        hm
    }

    pub fn rebuild(&mut self, grid: &VoxelGrid) {
        for z in 0..self.sz {
            for x in 0..self.sx {
                self.recompute_column(grid, x as i32, z as i32);
            }
        }
    }

    /// Rescans one column top-down. Columns outside the map are ignored.
    pub fn recompute_column(&mut self, grid: &VoxelGrid, x: i32, z: i32) {
        let Some(i) = self.column_index(x, z) else {
            return;
        };
        let sy = grid.dims().sy() as i32;
        let mut y = sy - 1;
        while y >= 0 && !grid.occupied(x, y, z) {
            y -= 1;
        }
        // WorldDims caps sy so every top fits an i16
        self.tops[i] = y as i16;
    }

    #[inline]
    fn column_index(&self, x: i32, z: i32) -> Option<usize> {
        if x < 0 || z < 0 || x as usize >= self.sx || z as usize >= self.sz {
            return None;
        }
        Some(z as usize * self.sx + x as usize)
    }

    /// Top solid `y` of column `(x, z)`: `Some(-1)` when the column is empty,
    /// `None` outside the map.
    #[inline]
    pub fn top(&self, x: i32, z: i32) -> Option<i32> {
        self.column_index(x, z).map(|i| i32::from(self.tops[i]))
    }

    /// Two-level sky light: `FULL_BRIGHT` at or above the column top and
    /// anywhere outside the grid, `SHADOWED` below it.
    #[inline]
    pub fn brightness(&self, grid: &VoxelGrid, x: i32, y: i32, z: i32) -> f32 {
        if !grid.in_bounds(x, y, z) {
            return FULL_BRIGHT;
        }
        match self.top(x, z) {
            Some(top) if top > y => SHADOWED,
            _ => FULL_BRIGHT,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[i16] {
        &self.tops
    }
}
