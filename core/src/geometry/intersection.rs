//! 2D line intersection used by the in-plane constructions.

/// Calculate intersection point of two infinite lines (not segments).
/// Returns Some((point, t, s)) where `point = l1_start + t * (l1_end - l1_start)`
/// and `point = l2_start + s * (l2_end - l2_start)`, or None if parallel.
pub fn line_line_intersection_unbounded(
    l1_start: [f64; 2], l1_end: [f64; 2],
    l2_start: [f64; 2], l2_end: [f64; 2]
) -> Option<([f64; 2], f64, f64)> {
    let d1x = l1_end[0] - l1_start[0];
    let d1y = l1_end[1] - l1_start[1];
    let d2x = l2_end[0] - l2_start[0];
    let d2y = l2_end[1] - l2_start[1];

    // Cross product of direction vectors (2D determinant)
    let cross = d1x * d2y - d1y * d2x;

    // Parallel or coincident lines
    let scale = (d1x * d1x + d1y * d1y).sqrt() * (d2x * d2x + d2y * d2y).sqrt();
    if scale == 0.0 || cross.abs() < 1e-12 * scale {
        return None;
    }

    let dx = l2_start[0] - l1_start[0];
    let dy = l2_start[1] - l1_start[1];

    let t = (dx * d2y - dy * d2x) / cross;
    let s = (dx * d1y - dy * d1x) / cross;

    Some(([
        l1_start[0] + t * d1x,
        l1_start[1] + t * d1y
    ], t, s))
}

/// Perpendicular bisector of the segment `a`-`b`, as two points on the line.
pub fn perpendicular_bisector(a: [f64; 2], b: [f64; 2]) -> ([f64; 2], [f64; 2]) {
    let mid = [(a[0] + b[0]) * 0.5, (a[1] + b[1]) * 0.5];
    // Rotate the segment direction by 90 degrees
    let dir = [-(b[1] - a[1]), b[0] - a[0]];
    (mid, [mid[0] + dir[0], mid[1] + dir[1]])
}

/// Intersection of the perpendicular bisectors of `p0`-`p1` and `p1`-`p2`,
/// i.e. the circumcenter of the triangle. None if the bisectors are parallel.
pub fn circumcenter_2d(p0: [f64; 2], p1: [f64; 2], p2: [f64; 2]) -> Option<[f64; 2]> {
    let (a_start, a_end) = perpendicular_bisector(p0, p1);
    let (b_start, b_end) = perpendicular_bisector(p1, p2);
    line_line_intersection_unbounded(a_start, a_end, b_start, b_end).map(|(p, _, _)| p)
}
