use cubit_geom::{Aabb, Vec3};
use cubit_raycast::BlockHit;

use crate::chunk_coord::affected_chunks;
use crate::dirty::ChunkListener;
use crate::fill::FlatSlab;
use crate::grid::{BlockId, VoxelGrid, WorldDims};
use crate::heightmap::HeightMap;

/// The block world: grid, derived heightmap and the renderer's listener.
///
/// `set` is the only mutation path; it keeps the heightmap in sync and
/// notifies the listener before returning.
pub struct World {
    grid: VoxelGrid,
    heights: HeightMap,
    listener: Option<Box<dyn ChunkListener>>,
}

impl World {
    /// World over an existing grid; the heightmap is computed once here.
    pub fn from_grid(grid: VoxelGrid) -> Self {
        let heights = HeightMap::build(&grid);
        Self {
            grid,
            heights,
            listener: None,
        }
    }

    /// World filled with the default flat slab.
    pub fn flat(dims: WorldDims) -> Self {
        Self::from_grid(FlatSlab::for_dims(dims).fill(dims))
    }

    pub fn set_listener(&mut self, listener: impl ChunkListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    #[inline]
    pub fn dims(&self) -> WorldDims {
        self.grid.dims()
    }

    #[inline]
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    #[inline]
    pub fn heightmap(&self) -> &HeightMap {
        &self.heights
    }

    #[inline]
    pub fn block_id(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.grid.get(x, y, z)
    }

    #[inline]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.grid.occupied(x, y, z)
    }

    #[inline]
    pub fn brightness(&self, x: i32, y: i32, z: i32) -> f32 {
        self.heights.brightness(&self.grid, x, y, z)
    }

    /// Writes one block, recomputes its column and notifies the listener of
    /// every chunk whose mesh it invalidates. Out-of-range writes do nothing.
    pub fn set(&mut self, x: i32, y: i32, z: i32, id: BlockId) {
        if !self.grid.set(x, y, z, id) {
            return;
        }
        self.heights.recompute_column(&self.grid, x, z);
        let Some(listener) = self.listener.as_mut() else {
            return;
        };
        for chunk in affected_chunks(x, y, z) {
            log::debug!(target: "world", "chunk modified ({}, {}, {}) by ({}, {}, {})",
                chunk.cx, chunk.cy, chunk.cz, x, y, z);
            listener.on_chunk_modified(chunk);
        }
    }

    /// Full heightmap recompute.
    pub fn rebuild_heightmap(&mut self) {
        self.heights.rebuild(&self.grid);
    }

    /// Unit boxes of every solid block overlapping `bounds`, for collision.
    ///
    /// Each axis scans `[min, max + 1)` clamped to the grid, so blocks touching
    /// the box from above are included.
    pub fn cubes_in(&self, bounds: &Aabb) -> Vec<Aabb> {
        let dims = self.dims();
        let span = |lo: f64, hi: f64, extent: usize| {
            let extent = extent as f64;
            (lo.clamp(0.0, extent) as i32, (hi + 1.0).clamp(0.0, extent) as i32)
        };
        let (x0, x1) = span(bounds.min.x, bounds.max.x, dims.sx());
        let (y0, y1) = span(bounds.min.y, bounds.max.y, dims.sy());
        let (z0, z1) = span(bounds.min.z, bounds.max.z, dims.sz());

        let mut boxes = Vec::new();
        for y in y0..y1 {
            for z in z0..z1 {
                for x in x0..x1 {
                    if self.is_solid(x, y, z) {
                        boxes.push(Aabb::unit_cube(x, y, z));
                    }
                }
            }
        }
        boxes
    }

    /// First solid block along the segment `start..end` and its entry face.
    pub fn raytrace_block(&self, start: Vec3, end: Vec3) -> Option<BlockHit> {
        cubit_raycast::raytrace_block(start, end, |x, y, z| self.is_solid(x, y, z))
    }

    /// Block picked from `origin` looking along `direction`, up to `reach` blocks.
    pub fn pick(&self, origin: Vec3, direction: Vec3, reach: f64) -> Option<BlockHit> {
        let end = origin + direction.normalized() * reach;
        self.raytrace_block(origin, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk_coord::ChunkCoord;
    use crate::fill::STONE;
    use crate::grid::AIR;
    use crate::heightmap::{FULL_BRIGHT, SHADOWED};
    use cubit_geom::Face;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dims(sx: usize, sy: usize, sz: usize) -> WorldDims {
        WorldDims::new(sx, sy, sz).unwrap()
    }

    fn recording(world: &mut World) -> Rc<RefCell<Vec<ChunkCoord>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        world.set_listener(move |c: ChunkCoord| sink.borrow_mut().push(c));
        log
    }

    #[test]
    fn set_updates_heightmap_before_notifying() {
        let mut world = World::from_grid(VoxelGrid::new(dims(8, 8, 8)));
        world.set(2, 5, 3, STONE);
        assert_eq!(world.heightmap().top(2, 3), Some(5));
        assert_eq!(world.brightness(2, 4, 3), SHADOWED);
        world.set(2, 5, 3, AIR);
        assert_eq!(world.heightmap().top(2, 3), Some(-1));
        assert_eq!(world.brightness(2, 4, 3), FULL_BRIGHT);
    }

    #[test]
    fn out_of_range_set_is_silent() {
        let mut world = World::flat(dims(4, 6, 4));
        let log = recording(&mut world);
        let before = world.grid().clone();
        world.set(-1, 0, 0, AIR);
        world.set(0, 6, 0, STONE);
        world.set(0, 0, 4, STONE);
        assert_eq!(world.grid(), &before);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn interior_edit_notifies_owner_once() {
        let mut world = World::from_grid(VoxelGrid::new(dims(64, 64, 64)));
        let log = recording(&mut world);
        world.set(40, 40, 40, STONE);
        assert_eq!(*log.borrow(), vec![ChunkCoord::new(1, 1, 1)]);
    }

    #[test]
    fn corner_edit_notifies_owner_and_three_neighbours() {
        let mut world = World::from_grid(VoxelGrid::new(dims(64, 64, 64)));
        let log = recording(&mut world);
        world.set(32, 32, 32, STONE);
        assert_eq!(
            *log.borrow(),
            vec![
                ChunkCoord::new(1, 1, 1),
                ChunkCoord::new(0, 1, 1),
                ChunkCoord::new(1, 1, 0),
                ChunkCoord::new(1, 0, 1),
            ]
        );
    }

    #[test]
    fn each_set_gets_its_own_burst() {
        let mut world = World::from_grid(VoxelGrid::new(dims(64, 64, 64)));
        let log = recording(&mut world);
        world.set(5, 5, 5, STONE);
        world.set(5, 5, 5, STONE);
        assert_eq!(log.borrow().len(), 2);
        world.clear_listener();
        world.set(6, 5, 5, STONE);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn cubes_in_lists_solid_unit_boxes() {
        let mut world = World::from_grid(VoxelGrid::new(dims(8, 8, 8)));
        world.set(1, 1, 1, STONE);
        world.set(2, 1, 1, STONE);
        world.set(6, 6, 6, STONE);
        let query = Aabb::new(Vec3::new(0.5, 0.5, 0.5), Vec3::new(2.2, 1.9, 1.5));
        let boxes = world.cubes_in(&query);
        assert_eq!(boxes, vec![Aabb::unit_cube(1, 1, 1), Aabb::unit_cube(2, 1, 1)]);
    }

    #[test]
    fn cubes_in_clamps_to_grid() {
        let world = World::flat(dims(2, 3, 2));
        let query = Aabb::new(Vec3::new(-10.0, -10.0, -10.0), Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(world.cubes_in(&query).len(), world.grid().solid_count());
        let above = Aabb::new(Vec3::new(0.0, 50.0, 0.0), Vec3::new(1.0, 60.0, 1.0));
        assert!(world.cubes_in(&above).is_empty());
    }

    #[test]
    fn pick_straight_down_onto_slab() {
        let world = World::flat(dims(16, 16, 16));
        let surface = FlatSlab::for_dims(world.dims()).surface_y() as i32;
        let hit = world.pick(Vec3::new(4.5, 14.5, 7.5), Vec3::new(0.0, -1.0, 0.0), 8.0);
        let hit = hit.expect("slab within reach");
        assert_eq!((hit.x, hit.y, hit.z, hit.face), (4, surface, 7, Face::Up));
        assert!(world.pick(Vec3::new(4.5, 14.5, 7.5), Vec3::new(0.0, 1.0, 0.0), 8.0).is_none());
    }
}
