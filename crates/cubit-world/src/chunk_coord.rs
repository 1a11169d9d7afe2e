/// Edge length of a mesh-invalidation region. Chunks do not affect storage.
pub const CHUNK_SIZE: i32 = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    /// Chunk owning block `(x, y, z)`.
    #[inline]
    pub fn of_block(x: i32, y: i32, z: i32) -> Self {
        Self {
            cx: x.div_euclid(CHUNK_SIZE),
            cy: y.div_euclid(CHUNK_SIZE),
            cz: z.div_euclid(CHUNK_SIZE),
        }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}

// -1 toward the lower neighbour, +1 toward the upper one, 0 for interior cells.
#[inline]
fn border_side(local: i32) -> i32 {
    if local == 0 {
        -1
    } else if local == CHUNK_SIZE - 1 {
        1
    } else {
        0
    }
}

/// Chunks whose meshes go stale when block `(x, y, z)` changes.
///
/// The owning chunk comes first, then at most one neighbour per axis in
/// X, Z, Y order for edits on a chunk face. Diagonal neighbours are never
/// included, so a corner edit yields four chunks. Neighbours outside the
/// world are still reported.
pub fn affected_chunks(x: i32, y: i32, z: i32) -> Vec<ChunkCoord> {
    let owner = ChunkCoord::of_block(x, y, z);
    let lx = x.rem_euclid(CHUNK_SIZE);
    let ly = y.rem_euclid(CHUNK_SIZE);
    let lz = z.rem_euclid(CHUNK_SIZE);

    let mut affected = Vec::with_capacity(4);
    affected.push(owner);
    let dx = border_side(lx);
    if dx != 0 {
        affected.push(owner.offset(dx, 0, 0));
    }
    let dz = border_side(lz);
    if dz != 0 {
        affected.push(owner.offset(0, 0, dz));
    }
    let dy = border_side(ly);
    if dy != 0 {
        affected.push(owner.offset(0, dy, 0));
    }
    affected
}
