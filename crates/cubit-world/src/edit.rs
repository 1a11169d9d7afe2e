//! Block breaking and placing driven by a ray hit.

use cubit_geom::Aabb;
use cubit_raycast::BlockHit;

use crate::grid::{AIR, BlockId};
use crate::world::World;

/// Clears the struck block. Returns whether anything changed.
pub fn break_block(world: &mut World, hit: &BlockHit) -> bool {
    if world.block_id(hit.x, hit.y, hit.z) == AIR {
        return false;
    }
    world.set(hit.x, hit.y, hit.z, AIR);
    log::debug!(target: "world", "broke block at ({}, {}, {})", hit.x, hit.y, hit.z);
    true
}

/// Places `id` against the struck face, unless the new cube would overlap
/// `obstruction` (typically the player's box) or fall outside the world.
/// The cell is written and its chunks notified even if it already holds `id`.
pub fn place_block(
    world: &mut World,
    hit: &BlockHit,
    id: BlockId,
    obstruction: Option<&Aabb>,
) -> bool {
    let (x, y, z) = hit.adjacent();
    if !world.grid().in_bounds(x, y, z) {
        return false;
    }
    if obstruction.is_some_and(|b| b.intersects(&Aabb::unit_cube(x, y, z))) {
        log::debug!(target: "world", "placement at ({}, {}, {}) obstructed", x, y, z);
        return false;
    }
    world.set(x, y, z, id);
    log::debug!(target: "world", "placed block {} at ({}, {}, {})", id, x, y, z);
    true
}
