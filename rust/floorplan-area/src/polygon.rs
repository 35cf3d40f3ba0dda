// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon measurements and simplification on integer pixel chains

use crate::types::{BoundingBox, Point};

/// Enclosed area of a closed polygon using the shoelace formula
pub fn polygon_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x as f64 * points[j].y as f64;
        area -= points[j].x as f64 * points[i].y as f64;
    }

    (area / 2.0).abs()
}

/// Total length of a polyline, including the closing segment when `closed`
pub fn arc_length(points: &[Point], closed: bool) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let open: f64 = points.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
    if closed {
        open + points[points.len() - 1].distance_to(&points[0])
    } else {
        open
    }
}

/// Smallest upright rectangle containing every point, with inclusive extents
pub fn bounding_rect(points: &[Point]) -> BoundingBox {
    let Some(first) = points.first() else {
        return BoundingBox::default();
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    BoundingBox {
        x: min_x,
        y: min_y,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    }
}

/// Compress a closed chain of neighbouring pixels to the points where its
/// direction changes
///
/// Straight horizontal, vertical and diagonal runs collapse to their two end
/// points.
pub fn compress_chain(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |a: &Point, b: &Point| (b.x - a.x, b.y - a.y);

    let compressed: Vec<Point> = (0..n)
        .filter(|&i| {
            let prev = &points[(i + n - 1) % n];
            let next = &points[(i + 1) % n];
            step(prev, &points[i]) != step(&points[i], next)
        })
        .map(|i| points[i])
        .collect();

    // A chain with no turns is degenerate; keep its extremes
    if compressed.is_empty() {
        vec![points[0], points[n - 1]]
    } else {
        compressed
    }
}

/// Douglas-Peucker over an open chain whose two end points are always kept
///
/// Spans are processed from an explicit work list and surviving points are
/// marked in place, so the output keeps the input order.
fn simplify_open_chain(points: &[Point], epsilon: f64) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut spans = vec![(0, n - 1)];
    while let Some((lo, hi)) = spans.pop() {
        let (mut farthest, mut farthest_dist) = (lo, 0.0);
        for i in lo + 1..hi {
            let dist = distance_to_line(points[i], points[lo], points[hi]);
            if dist > farthest_dist {
                farthest = i;
                farthest_dist = dist;
            }
        }

        if farthest_dist > epsilon {
            keep[farthest] = true;
            spans.push((lo, farthest));
            spans.push((farthest, hi));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(*p))
        .collect()
}

/// Distance from `p` to the infinite line through `a` and `b`, or to `a`
/// when the two coincide
fn distance_to_line(p: Point, a: Point, b: Point) -> f64 {
    if a == b {
        return p.distance_to(&a);
    }
    let (abx, aby) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
    let (apx, apy) = ((p.x - a.x) as f64, (p.y - a.y) as f64);
    (abx * apy - aby * apx).abs() / abx.hypot(aby)
}

/// Douglas-Peucker simplification of a closed polygon.
///
/// The ring is split at its first point and at the point farthest from it,
/// each half is simplified on its own and the halves are joined again.
pub fn approximate_closed_polygon(points: &[Point], epsilon: f64) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let start = points[0];
    let (split, _) = points
        .iter()
        .enumerate()
        .skip(1)
        .fold((0, 0.0), |(best, best_dist), (i, p)| {
            let dist = start.distance_to(p);
            if dist > best_dist {
                (i, dist)
            } else {
                (best, best_dist)
            }
        });

    if split == 0 {
        return vec![start];
    }

    let first_half = simplify_open_chain(&points[..=split], epsilon);

    let mut second: Vec<Point> = points[split..].to_vec();
    second.push(start);
    let second_half = simplify_open_chain(&second, epsilon);

    // Both halves share the split point; the second one also repeats the start
    let mut result = first_half;
    result.extend_from_slice(&second_half[1..second_half.len() - 1]);
    result
}
