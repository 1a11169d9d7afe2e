//! Ray vs voxel-grid traversal with exact entry-face resolution.
#![forbid(unsafe_code)]

use cubit_geom::{Face, Vec3};

mod face;

pub use face::intersect_unit_cube;

/// Cell budget for one trace; a trace that has not resolved after this many
/// steps (plus the initial cell) reports no hit.
pub const MAX_ATTEMPTS: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockHit {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub face: Face,
}

impl BlockHit {
    /// Cell on the struck side of the hit block, where a placed block goes.
    #[inline]
    pub fn adjacent(&self) -> (i32, i32, i32) {
        let (nx, ny, nz) = self.face.normal();
        (self.x + nx, self.y + ny, self.z + nz)
    }
}

/// How far along the remaining segment an axis reaches its next cell boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Advance {
    /// Already in the end cell on this axis.
    Stays,
    At(f64),
}

impl Advance {
    #[inline]
    fn for_axis(cell: i32, end_cell: i32, pos: f64, delta: f64) -> Self {
        if cell == end_cell {
            return Advance::Stays;
        }
        let boundary = if end_cell > cell {
            f64::from(cell) + 1.0
        } else {
            f64::from(cell)
        };
        Advance::At((boundary - pos) / delta)
    }

    /// `self` strictly before `other`; an axis that stays is never before anything
    /// and everything is before it.
    #[inline]
    fn before(self, other: Advance) -> bool {
        match (self, other) {
            (Advance::At(a), Advance::At(b)) => a < b,
            (Advance::At(_), Advance::Stays) => true,
            (Advance::Stays, _) => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Z,
}

// X must beat both others strictly; otherwise Y must beat Z strictly; else Z.
// On equal fractions the later axis is taken.
fn pick_axis(ax: Advance, ay: Advance, az: Advance) -> Option<(Axis, f64)> {
    if let Advance::At(t) = ax {
        if ax.before(ay) && ax.before(az) {
            return Some((Axis::X, t));
        }
    }
    if let Advance::At(t) = ay {
        if ay.before(az) {
            return Some((Axis::Y, t));
        }
    }
    match az {
        Advance::At(t) => Some((Axis::Z, t)),
        Advance::Stays => None,
    }
}

/// Walks the segment `start..end` cell by cell and returns the first solid cell
/// whose cube the segment actually enters, with the face it enters through.
///
/// `is_solid` is queried with integer cell coordinates and may be called for
/// cells outside any world bounds.
pub fn raytrace_block<F>(start: Vec3, end: Vec3, mut is_solid: F) -> Option<BlockHit>
where
    F: FnMut(i32, i32, i32) -> bool,
{
    if !start.is_finite() || !end.is_finite() {
        return None;
    }
    let (end_x, end_y, end_z) = end.floor_cell();
    let mut pos = start;
    let (mut x, mut y, mut z) = pos.floor_cell();

    for _ in 0..=MAX_ATTEMPTS {
        if !pos.is_finite() {
            return None;
        }

        if is_solid(x, y, z) {
            let origin = Vec3::from((x, y, z));
            if let Some(face) = intersect_unit_cube(pos - origin, end - origin) {
                return Some(BlockHit { x, y, z, face });
            }
        }

        if x == end_x && y == end_y && z == end_z {
            return None;
        }

        let delta = end - pos;
        let ax = Advance::for_axis(x, end_x, pos.x, delta.x);
        let ay = Advance::for_axis(y, end_y, pos.y, delta.y);
        let az = Advance::for_axis(z, end_z, pos.z, delta.z);
        let (axis, t) = pick_axis(ax, ay, az)?;

        // Advance every axis by the same fraction, then snap the stepped axis
        // exactly onto its boundary.
        match axis {
            Axis::X => {
                pos.x = if end_x > x { f64::from(x) + 1.0 } else { f64::from(x) };
                pos.y += delta.y * t;
                pos.z += delta.z * t;
            }
            Axis::Y => {
                pos.x += delta.x * t;
                pos.y = if end_y > y { f64::from(y) + 1.0 } else { f64::from(y) };
                pos.z += delta.z * t;
            }
            Axis::Z => {
                pos.x += delta.x * t;
                pos.y += delta.y * t;
                pos.z = if end_z > z { f64::from(z) + 1.0 } else { f64::from(z) };
            }
        }

        let stepped_back_x = axis == Axis::X && end_x < x;
        let stepped_back_y = axis == Axis::Y && end_y < y;
        let stepped_back_z = axis == Axis::Z && end_z < z;
        let (fx, fy, fz) = pos.floor_cell();
        // A boundary hit on a negative step floors to the cell just left.
        x = if stepped_back_x { fx - 1 } else { fx };
        y = if stepped_back_y { fy - 1 } else { fy };
        z = if stepped_back_z { fz - 1 } else { fz };
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_axis_prefers_strictly_smallest() {
        let pick = pick_axis(Advance::At(0.1), Advance::At(0.5), Advance::At(0.7));
        assert_eq!(pick, Some((Axis::X, 0.1)));
        let pick = pick_axis(Advance::At(0.9), Advance::At(0.5), Advance::At(0.7));
        assert_eq!(pick, Some((Axis::Y, 0.5)));
        let pick = pick_axis(Advance::At(0.9), Advance::At(0.5), Advance::At(0.2));
        assert_eq!(pick, Some((Axis::Z, 0.2)));
    }

    #[test]
    fn pick_axis_ties_go_to_later_axis() {
        let pick = pick_axis(Advance::At(0.5), Advance::At(0.5), Advance::Stays);
        assert_eq!(pick, Some((Axis::Y, 0.5)));
        let pick = pick_axis(Advance::At(0.5), Advance::Stays, Advance::At(0.5));
        assert_eq!(pick, Some((Axis::Z, 0.5)));
        let pick = pick_axis(Advance::At(0.5), Advance::At(0.5), Advance::At(0.5));
        assert_eq!(pick, Some((Axis::Z, 0.5)));
    }

    #[test]
    fn pick_axis_skips_staying_axes() {
        let pick = pick_axis(Advance::Stays, Advance::At(0.3), Advance::Stays);
        assert_eq!(pick, Some((Axis::Y, 0.3)));
        let pick = pick_axis(Advance::Stays, Advance::Stays, Advance::At(0.3));
        assert_eq!(pick, Some((Axis::Z, 0.3)));
        assert_eq!(pick_axis(Advance::Stays, Advance::Stays, Advance::Stays), None);
    }

    #[test]
    fn advance_targets_boundary_in_travel_direction() {
        assert_eq!(Advance::for_axis(2, 2, 2.5, 1.0), Advance::Stays);
        assert_eq!(Advance::for_axis(2, 5, 2.5, 2.0), Advance::At(0.25));
        assert_eq!(Advance::for_axis(2, 0, 2.5, -2.0), Advance::At(0.25));
    }

    #[test]
    fn adjacent_follows_face_normal() {
        let hit = BlockHit { x: 4, y: 5, z: 6, face: Face::Up };
        assert_eq!(hit.adjacent(), (4, 6, 6));
        let hit = BlockHit { x: 4, y: 5, z: 6, face: Face::West };
        assert_eq!(hit.adjacent(), (3, 5, 6));
    }
}
