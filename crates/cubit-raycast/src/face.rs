use cubit_geom::{Aabb, Face, Vec3};

const UNIT: Aabb = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));

// Segments whose delta on the plane's axis is this small are treated as parallel.
const PARALLEL_EPS: f64 = 1.0e-7;

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
    Z,
}

#[inline]
fn component(v: Vec3, axis: Axis) -> f64 {
    match axis {
        Axis::X => v.x,
        Axis::Y => v.y,
        Axis::Z => v.z,
    }
}

/// Point where the segment `start..end` crosses the plane `axis == value`,
/// or `None` if it runs parallel or the crossing lies outside the segment.
#[inline]
fn point_on_plane(start: Vec3, end: Vec3, axis: Axis, value: f64) -> Option<Vec3> {
    let d = end - start;
    let da = component(d, axis);
    if da * da < PARALLEL_EPS {
        return None;
    }
    let t = (value - component(start, axis)) / da;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some(start + d * t)
}

#[inline]
fn on_face(face: Face, p: Vec3) -> bool {
    match face {
        Face::Down | Face::Up => UNIT.contains_in_xz(p),
        Face::North | Face::South => UNIT.contains_in_xy(p),
        Face::West | Face::East => UNIT.contains_in_yz(p),
    }
}

#[inline]
fn plane_of(face: Face) -> (Axis, f64) {
    match face {
        Face::Down => (Axis::Y, UNIT.min.y),
        Face::Up => (Axis::Y, UNIT.max.y),
        Face::North => (Axis::Z, UNIT.min.z),
        Face::South => (Axis::Z, UNIT.max.z),
        Face::West => (Axis::X, UNIT.min.x),
        Face::East => (Axis::X, UNIT.max.x),
    }
}

/// Entry face of a segment against the unit cube `[0,1]^3`.
///
/// `start` and `end` are in cube-local coordinates. Every face whose plane
/// crossing lies on the face (bounds inclusive) is a candidate; the one
/// closest to `start` wins and exact ties keep the face evaluated first
/// (down, up, north, south, west, east).
pub fn intersect_unit_cube(start: Vec3, end: Vec3) -> Option<Face> {
    let mut best: Option<(Face, f64)> = None;
    for face in Face::ALL {
        let (axis, value) = plane_of(face);
        let Some(p) = point_on_plane(start, end, axis, value) else {
            continue;
        };
        if !on_face(face, p) {
            continue;
        }
        let dist = start.distance(p);
        match best {
            Some((_, d)) if d <= dist => {}
            _ => best = Some((face, dist)),
        }
    }
    best.map(|(face, _)| face)
}
