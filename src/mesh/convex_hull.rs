use std::collections::BTreeMap;

use crate::math::{Point3, Tolerance};

use crate::geometry::Plane;

use super::ConvexMesh;

/// Computes the convex hull of a point set with the quickhull algorithm,
/// merging coplanar triangles into polygonal faces.
///
/// Returns `None` for a degenerate point set: fewer than four distinct
/// points, or points that are (near-)collinear or coplanar. Callers treat a
/// missing hull as a legitimate outcome (a fully clipped-away cell), not an
/// error.
#[must_use]
pub fn convex_hull(points: &[Point3], tol: Tolerance) -> Option<ConvexMesh> {
    let points = dedup_points(points, tol);
    if points.len() < 4 {
        return None;
    }

    let mut faces = initial_simplex(&points, tol)?;

    // Assign every remaining point to the first face it lies in front of.
    for (idx, p) in points.iter().enumerate() {
        for face in &mut faces {
            if face.plane.signed_distance(p) > tol.epsilon() {
                face.outside.push(idx);
                break;
            }
        }
    }

    // Expand the hull until no face has points in front of it.
    loop {
        let Some(face_idx) = faces
            .iter()
            .position(|f| f.alive && !f.outside.is_empty())
        else {
            break;
        };
        let apex = farthest_outside_point(&faces[face_idx], &points);

        // All alive faces the apex can see.
        let visible: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.alive && f.plane.signed_distance(&points[apex]) > tol.epsilon())
            .map(|(i, _)| i)
            .collect();

        // Horizon: directed edges of visible faces whose reverse belongs to
        // a face that stays.
        let mut visible_edges: Vec<(usize, usize)> = Vec::new();
        for &fi in &visible {
            let [a, b, c] = faces[fi].verts;
            visible_edges.extend_from_slice(&[(a, b), (b, c), (c, a)]);
        }
        let horizon: Vec<(usize, usize)> = visible_edges
            .iter()
            .filter(|(a, b)| !visible_edges.contains(&(*b, *a)))
            .copied()
            .collect();

        // Points orphaned by the removed faces.
        let mut orphans: Vec<usize> = Vec::new();
        for &fi in &visible {
            orphans.append(&mut faces[fi].outside);
            faces[fi].alive = false;
        }

        for (a, b) in horizon {
            if let Some(face) = HullFace::new(a, b, apex, &points) {
                faces.push(face);
            }
        }

        // Re-home each orphan onto the first face that can still see it.
        for o in orphans {
            if o == apex {
                continue;
            }
            for face in &mut faces {
                if face.alive && face.plane.signed_distance(&points[o]) > tol.epsilon() {
                    face.outside.push(o);
                    break;
                }
            }
        }
    }

    build_mesh(&points, &faces, tol)
}

struct HullFace {
    verts: [usize; 3],
    plane: Plane,
    outside: Vec<usize>,
    alive: bool,
}

impl HullFace {
    fn new(a: usize, b: usize, c: usize, points: &[Point3]) -> Option<Self> {
        let plane = Plane::from_points(points[a], points[b], points[c]).ok()?;
        Some(Self {
            verts: [a, b, c],
            plane,
            outside: Vec::new(),
            alive: true,
        })
    }
}

/// Collapses points that coincide within tolerance.
fn dedup_points(points: &[Point3], tol: Tolerance) -> Vec<Point3> {
    let mut unique: Vec<Point3> = Vec::with_capacity(points.len());
    for p in points {
        if !unique
            .iter()
            .any(|q| tol.is_zero_sq((q - p).norm_squared()))
        {
            unique.push(*p);
        }
    }
    unique
}

/// Builds the four outward-oriented faces of the initial tetrahedron from
/// extreme points. `None` when the set is degenerate (collinear or
/// coplanar within tolerance).
fn initial_simplex(points: &[Point3], tol: Tolerance) -> Option<Vec<HullFace>> {
    // Farthest pair among the six axis extremes.
    let mut i0 = 0;
    let mut i1 = 0;
    let mut best = -1.0;
    for axis in 0..3 {
        let min = index_of_extreme(points, |p| -p[axis]);
        let max = index_of_extreme(points, |p| p[axis]);
        let d = (points[max] - points[min]).norm_squared();
        if d > best {
            best = d;
            i0 = min;
            i1 = max;
        }
    }
    if tol.is_zero(best.sqrt()) {
        return None;
    }

    // Farthest point from the base line.
    let a = points[i0];
    let b = points[i1];
    let dir = (b - a).normalize();
    let line_dist = |p: &Point3| {
        let ap = p - a;
        (ap - dir * ap.dot(&dir)).norm()
    };
    let i2 = index_of_extreme(points, line_dist);
    if tol.is_zero(line_dist(&points[i2])) {
        return None;
    }

    // Farthest point from the base plane.
    let base = Plane::from_points(a, b, points[i2]).ok()?;
    let i3 = index_of_extreme(points, |p| base.signed_distance(p).abs());
    if tol.is_zero(base.signed_distance(&points[i3]).abs()) {
        return None;
    }

    let (i0, i1, i2, i3) = if base.signed_distance(&points[i3]) > 0.0 {
        // Swap two base vertices so every face winds outward.
        (i1, i0, i2, i3)
    } else {
        (i0, i1, i2, i3)
    };
    let faces = [
        [i0, i1, i2],
        [i0, i3, i1],
        [i1, i3, i2],
        [i2, i3, i0],
    ];
    let mut result = Vec::with_capacity(4);
    for [a, b, c] in faces {
        result.push(HullFace::new(a, b, c, points)?);
    }
    Some(result)
}

fn index_of_extreme<F: Fn(&Point3) -> f64>(points: &[Point3], key: F) -> usize {
    let mut best_idx = 0;
    let mut best = f64::NEG_INFINITY;
    for (i, p) in points.iter().enumerate() {
        let v = key(p);
        if v > best {
            best = v;
            best_idx = i;
        }
    }
    best_idx
}

fn farthest_outside_point(face: &HullFace, points: &[Point3]) -> usize {
    let mut best_idx = face.outside[0];
    let mut best = f64::NEG_INFINITY;
    for &o in &face.outside {
        let d = face.plane.signed_distance(&points[o]);
        if d > best {
            best = d;
            best_idx = o;
        }
    }
    best_idx
}

/// Gathers the surviving triangles, merges coplanar neighbors into polygonal
/// faces, and compacts the vertex list to the used subset.
fn build_mesh(points: &[Point3], faces: &[HullFace], tol: Tolerance) -> Option<ConvexMesh> {
    let alive: Vec<&HullFace> = faces.iter().filter(|f| f.alive).collect();
    if alive.len() < 4 {
        return None;
    }

    let merged = merge_coplanar(&alive, tol);

    // Compact the vertex list.
    let mut used: Vec<usize> = merged.iter().flatten().copied().collect();
    used.sort_unstable();
    used.dedup();
    let remap: BTreeMap<usize, usize> = used.iter().enumerate().map(|(new, &old)| (old, new)).collect();
    let vertices: Vec<Point3> = used.iter().map(|&i| points[i]).collect();
    let faces: Vec<Vec<usize>> = merged
        .iter()
        .map(|face| face.iter().map(|v| remap[v]).collect())
        .collect();
    ConvexMesh::new(vertices, faces).ok()
}

/// Groups coplanar adjacent triangles and walks each group's boundary loop.
fn merge_coplanar(alive: &[&HullFace], tol: Tolerance) -> Vec<Vec<usize>> {
    let n = alive.len();
    let mut group_of: Vec<Option<usize>> = vec![None; n];
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for i in 0..n {
        if group_of[i].is_some() {
            continue;
        }
        let group_idx = groups.len();
        let mut members = vec![i];
        group_of[i] = Some(group_idx);
        let mut cursor = 0;
        while cursor < members.len() {
            let current = members[cursor];
            cursor += 1;
            for j in 0..n {
                if group_of[j].is_none()
                    && alive[current].plane.is_equal(&alive[j].plane, tol)
                    && shares_edge(alive[current].verts, alive[j].verts)
                {
                    group_of[j] = Some(group_idx);
                    members.push(j);
                }
            }
        }
        groups.push(members);
    }

    let mut result = Vec::with_capacity(groups.len());
    for group in groups {
        if group.len() == 1 {
            result.push(alive[group[0]].verts.to_vec());
            continue;
        }
        match boundary_loop(&group.iter().map(|&i| alive[i].verts).collect::<Vec<_>>()) {
            Some(loop_verts) => result.push(loop_verts),
            // Unmergeable group: keep the triangles as they are.
            None => {
                for &i in &group {
                    result.push(alive[i].verts.to_vec());
                }
            }
        }
    }
    result
}

fn shares_edge(a: [usize; 3], b: [usize; 3]) -> bool {
    let mut shared = 0;
    for va in a {
        if b.contains(&va) {
            shared += 1;
        }
    }
    shared >= 2
}

/// Chains the unpaired directed edges of a triangle group into a single
/// loop. `None` when the edges do not close up.
fn boundary_loop(triangles: &[[usize; 3]]) -> Option<Vec<usize>> {
    let mut directed: Vec<(usize, usize)> = Vec::new();
    for tri in triangles {
        directed.extend_from_slice(&[(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])]);
    }
    let boundary: Vec<(usize, usize)> = directed
        .iter()
        .filter(|(a, b)| !directed.contains(&(*b, *a)))
        .copied()
        .collect();
    if boundary.len() < 3 {
        return None;
    }
    let next: BTreeMap<usize, usize> = boundary.iter().copied().collect();
    if next.len() != boundary.len() {
        return None;
    }
    let start = boundary[0].0;
    let mut loop_verts = vec![start];
    let mut current = *next.get(&start)?;
    while current != start {
        if loop_verts.len() > boundary.len() {
            return None;
        }
        loop_verts.push(current);
        current = *next.get(&current)?;
    }
    if loop_verts.len() == boundary.len() {
        Some(loop_verts)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn cube_corners() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 0.0, 1.0),
            p(1.0, 0.0, 1.0),
            p(0.0, 1.0, 1.0),
            p(1.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn hull_of_cube_corners() {
        let tol = Tolerance::default();
        let mesh = convex_hull(&cube_corners(), tol).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);
        assert_relative_eq!(mesh.volume(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn interior_points_are_dropped() {
        let tol = Tolerance::default();
        let mut pts = cube_corners();
        pts.push(p(0.5, 0.5, 0.5));
        pts.push(p(0.25, 0.5, 0.5));
        let mesh = convex_hull(&pts, tol).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_relative_eq!(mesh.volume(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn duplicate_points_are_collapsed() {
        let tol = Tolerance::default();
        let mut pts = cube_corners();
        pts.extend(cube_corners());
        let mesh = convex_hull(&pts, tol).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
    }

    #[test]
    fn tetrahedron_hull() {
        let tol = Tolerance::default();
        let pts = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.0, 1.0),
        ];
        let mesh = convex_hull(&pts, tol).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 4);
        assert_relative_eq!(mesh.volume(), 1.0 / 6.0, epsilon = 1e-9);
    }

    #[test]
    fn octahedron_hull() {
        let tol = Tolerance::default();
        let pts = vec![
            p(1.0, 0.0, 0.0),
            p(-1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, -1.0, 0.0),
            p(0.0, 0.0, 1.0),
            p(0.0, 0.0, -1.0),
        ];
        let mesh = convex_hull(&pts, tol).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 8);
        assert_relative_eq!(mesh.volume(), 4.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn coplanar_points_have_no_hull() {
        let tol = Tolerance::default();
        let pts = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.5, 0.5, 0.0),
        ];
        assert!(convex_hull(&pts, tol).is_none());
    }

    #[test]
    fn collinear_points_have_no_hull() {
        let tol = Tolerance::default();
        let pts = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
            p(3.0, 0.0, 0.0),
        ];
        assert!(convex_hull(&pts, tol).is_none());
    }

    #[test]
    fn too_few_points_have_no_hull() {
        let tol = Tolerance::default();
        assert!(convex_hull(&[p(0.0, 0.0, 0.0)], tol).is_none());
        assert!(convex_hull(&cube_corners()[..3], tol).is_none());
    }

    #[test]
    fn every_point_is_inside_or_on_the_hull() {
        let tol = Tolerance::default();
        let pts = vec![
            p(0.3, 0.1, 0.2),
            p(2.0, 0.4, 0.1),
            p(0.9, 1.7, 0.3),
            p(0.2, 0.3, 2.2),
            p(1.5, 1.5, 1.5),
            p(0.1, 1.9, 1.8),
            p(1.8, 0.2, 1.6),
        ];
        let mesh = convex_hull(&pts, tol).unwrap();
        for plane in mesh.face_planes() {
            for q in &pts {
                assert!(
                    plane.signed_distance(q) > -1e-6,
                    "input point ended up outside the hull"
                );
            }
        }
    }
}
