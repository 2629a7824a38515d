// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Adaptive bezier flattening.
//!
//! De Casteljau subdivision of an arbitrary-degree control polygon. The
//! termination test estimates the curve's local curvature from the maximum
//! second forward difference of the control points ("twist"), scaled by
//! `n*(n-1)`; subdivision stops once the twist drops below the caller's
//! threshold, which callers derive from the current zoom so that remaining
//! deviation is sub-pixel.

use crate::core::Point2;

/// Recursion cap. The curvature test terminates long before this in
/// practice; the cap only guards against degenerate inputs (NaN coordinates).
const MAX_DEPTH: usize = 32;

/// Maximum second-forward-difference magnitude of the control polygon,
/// scaled by `n*(n-1)` for degree n.
fn twist(points: &[Point2]) -> f64 {
    let n = points.len() - 1;
    let mut max_sq = 0.0f64;
    for w in points.windows(3) {
        let dx = w[2].x - 2.0 * w[1].x + w[0].x;
        let dy = w[2].y - 2.0 * w[1].y + w[0].y;
        let sq = dx * dx + dy * dy;
        if sq > max_sq {
            max_sq = sq;
        }
    }
    max_sq.sqrt() * (n * (n - 1)) as f64
}

/// Flatten a bezier curve given by its control polygon, appending points to
/// `out`. The caller is expected to have emitted the start point already;
/// this function appends intermediate points and ends with the last control
/// point.
///
/// `threshold` is the twist value below which a chord is accurate enough;
/// use `1.0 / sqrt(sx*sx + sy*sy)` for sub-pixel output at the current zoom.
pub fn flatten(points: &[Point2], threshold: f64, out: &mut Vec<Point2>) {
    debug_assert!(points.len() >= 2);
    flatten_rec(points, threshold.max(1e-9), 0, out);
}

fn flatten_rec(points: &[Point2], threshold: f64, depth: usize, out: &mut Vec<Point2>) {
    let t = twist(points);
    // non-finite twist (NaN coordinates) terminates instead of recursing
    if points.len() < 3 || depth >= MAX_DEPTH || !t.is_finite() || t <= threshold {
        out.push(points[points.len() - 1]);
        return;
    }
    // de Casteljau split at t = 0.5
    let n = points.len();
    let mut work = points.to_vec();
    let mut left = Vec::with_capacity(n);
    let mut right = vec![Point2::default(); n];
    left.push(work[0]);
    right[n - 1] = work[n - 1];
    for level in 1..n {
        for i in 0..n - level {
            work[i] = Point2::new(
                (work[i].x + work[i + 1].x) * 0.5,
                (work[i].y + work[i + 1].y) * 0.5,
            );
        }
        left.push(work[0]);
        right[n - 1 - level] = work[n - 1 - level];
    }
    flatten_rec(&left, threshold, depth + 1, out);
    flatten_rec(&right, threshold, depth + 1, out);
}
