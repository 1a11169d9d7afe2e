//! Per-face visibility and shading that the external mesher consumes.
//!
//! A face is drawn only when the neighbouring cell is air. Its light is the
//! neighbour's brightness scaled by a fixed per-axis factor, and it goes into
//! the lit pass when the neighbour is fully bright, else the shadowed pass.

use cubit_geom::Face;

use crate::grid::AIR;
use crate::heightmap::FULL_BRIGHT;
use crate::world::World;

/// Render pass a face belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadeLayer {
    Lit,
    Shadowed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceShade {
    pub face: Face,
    pub light: f32,
    pub layer: ShadeLayer,
}

/// Directional shading factor applied to a face's brightness.
#[inline]
pub const fn face_factor(face: Face) -> f32 {
    match face {
        Face::Down | Face::Up => 1.0,
        Face::North | Face::South => 0.8,
        Face::West | Face::East => 0.6,
    }
}

/// Visible faces of block `(x, y, z)` in `Face::ALL` order.
pub fn face_shades(world: &World, x: i32, y: i32, z: i32) -> Vec<FaceShade> {
    let mut out = Vec::with_capacity(6);
    for face in Face::ALL {
        let (nx, ny, nz) = face.normal();
        let (ax, ay, az) = (x + nx, y + ny, z + nz);
        if world.block_id(ax, ay, az) != AIR {
            continue;
        }
        let brightness = world.brightness(ax, ay, az);
        let layer = if brightness == FULL_BRIGHT {
            ShadeLayer::Lit
        } else {
            ShadeLayer::Shadowed
        };
        out.push(FaceShade {
            face,
            light: brightness * face_factor(face),
            layer,
        });
    }
    out
}
