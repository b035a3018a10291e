// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The `intersection` module contains functions for calculating the
//! intersections of segments and line strings.
//!
//! The segments are projected onto the Mercator plane, where the standard
//! parametric line intersection is solved. The segments are therefore
//! treated as rhumb lines, so the lines should have been densified for
//! the required Earth model first.
//!
//! The longitudes are not unwrapped: segments that cross the antimeridian
//! are treated as spanning the globe and may be reported to intersect near
//! the prime meridian instead of at the antimeridian.

use crate::geometry::{segment_bounds, LineString};
use crate::latlon::LatLon;
use crate::mercator::MercatorPoint;
use geo::Intersects;

/// Calculate the distance along segment `p1`-`p2` to its intersection with
/// segment `q1`-`q2` as a fraction of the segment's length, if it exists.
///
/// returns the fraction and the projected start and direction of the first
/// segment.
#[must_use]
fn calculate_intersection_fraction(
    p1: &LatLon,
    p2: &LatLon,
    q1: &LatLon,
    q2: &LatLon,
) -> Option<(f64, MercatorPoint, MercatorPoint)> {
    // reject segments with disjoint latitude and longitude ranges
    if !segment_bounds(p1, p2).intersects(&segment_bounds(q1, q2)) {
        return None;
    }

    let mp1 = MercatorPoint::from(p1);
    let mp2 = MercatorPoint::from(p2);
    let mq1 = MercatorPoint::from(q1);
    let mq2 = MercatorPoint::from(q2);

    let s1 = MercatorPoint::new(mp2.x - mp1.x, mp2.y - mp1.y);
    let s2 = MercatorPoint::new(mq2.x - mq1.x, mq2.y - mq1.y);
    let denominator = -s2.x * s1.y + s1.x * s2.y;

    // the fractions are NaN for parallel segments
    let s = (-s1.y * (mp1.x - mq1.x) + s1.x * (mp1.y - mq1.y)) / denominator;
    if !(0.0..=1.0).contains(&s) {
        return None;
    }

    let t = (s2.x * (mp1.y - mq1.y) - s2.y * (mp1.x - mq1.x)) / denominator;
    if (0.0..=1.0).contains(&t) {
        Some((t, mp1, s1))
    } else {
        None
    }
}

/// Calculate the intersection point of segments `p1`-`p2` and `q1`-`q2`.
/// * `p1`, `p2` - the start and end points of the first segment.
/// * `q1`, `q2` - the start and end points of the second segment.
///
/// returns the intersection point, or None if the segments do not intersect.
///
/// # Examples
/// ```
/// use geodensify::intersection::segment_intersection;
/// use geodensify::latlon::LatLon;
///
/// let p1 = LatLon::from_degrees(0.0, 0.0);
/// let p2 = LatLon::from_degrees(20.0, 20.0);
/// let q1 = LatLon::from_degrees(0.0, 10.0);
/// let q2 = LatLon::from_degrees(20.0, 10.0);
///
/// let point = segment_intersection(&p1, &p2, &q1, &q2).unwrap();
/// assert!((point.lat.0 - 10.155_89).abs() < 1e-5);
/// assert!((point.lon.0 - 10.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn segment_intersection(
    p1: &LatLon,
    p2: &LatLon,
    q1: &LatLon,
    q2: &LatLon,
) -> Option<LatLon> {
    calculate_intersection_fraction(p1, p2, q1, q2).map(|(t, start, direction)| {
        LatLon::from(&MercatorPoint::new(
            start.x + t * direction.x,
            start.y + t * direction.y,
        ))
    })
}

/// Whether segments `p1`-`p2` and `q1`-`q2` intersect.
#[must_use]
pub fn segments_intersect(p1: &LatLon, p2: &LatLon, q1: &LatLon, q2: &LatLon) -> bool {
    calculate_intersection_fraction(p1, p2, q1, q2).is_some()
}

/// Calculate all of the intersection points of two line strings.
/// The intersections are in the order of the segments of `l1`, then `l2`.
/// Line strings with fewer than two points have no intersections.
#[must_use]
pub fn line_string_intersections(l1: &LineString, l2: &LineString) -> Vec<LatLon> {
    l1.lines()
        .flat_map(|p| {
            l2.lines().filter_map(move |q| {
                segment_intersection(
                    &LatLon::from(p.start),
                    &LatLon::from(p.end),
                    &LatLon::from(q.start),
                    &LatLon::from(q.end),
                )
            })
        })
        .collect()
}

/// Whether two line strings intersect.
#[must_use]
pub fn line_strings_intersect(l1: &LineString, l2: &LineString) -> bool {
    l1.lines().any(|p| {
        l2.lines().any(|q| {
            segments_intersect(
                &LatLon::from(p.start),
                &LatLon::from(p.end),
                &LatLon::from(q.start),
                &LatLon::from(q.end),
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_segment_intersection() {
        let p1 = LatLon::from_degrees(0.0, 0.0);
        let p2 = LatLon::from_degrees(20.0, 20.0);

        // simple intersection
        let q1 = LatLon::from_degrees(0.0, 10.0);
        let q2 = LatLon::from_degrees(20.0, 10.0);
        let result = segment_intersection(&p1, &p2, &q1, &q2);
        assert!(result.is_some());
        if let Some(point) = result {
            assert!(is_within_tolerance(10.155_889, point.lat.0, 1e-6));
            assert!(is_within_tolerance(10.0, point.lon.0, 1e-9));
        }
        assert!(segments_intersect(&p1, &p2, &q1, &q2));

        // parallel in latitude/longitude
        let q1 = LatLon::from_degrees(0.0, 10.0);
        let q2 = LatLon::from_degrees(20.0, 30.0);
        assert!(segment_intersection(&p1, &p2, &q1, &q2).is_none());
        assert!(!segments_intersect(&p1, &p2, &q1, &q2));

        // collinear in latitude/longitude
        let q1 = LatLon::from_degrees(10.0, 10.0);
        let q2 = LatLon::from_degrees(30.0, 30.0);
        assert!(segment_intersection(&p1, &p2, &q1, &q2).is_some());

        // collinear sharing a point
        let q1 = LatLon::from_degrees(20.0, 20.0);
        let q2 = LatLon::from_degrees(40.0, 40.0);
        assert!(segment_intersection(&p1, &p2, &q1, &q2).is_some());
        assert!(segments_intersect(&p1, &p2, &q1, &q2));

        // the middle of one segment meets the end of the other
        let q1 = LatLon::from_degrees(0.0, 20.0);
        let q2 = LatLon::from_degrees(40.0, 20.0);
        assert!(segment_intersection(&p1, &p2, &q1, &q2).is_some());

        // no intersection
        let q1 = LatLon::from_degrees(0.0, 10.0);
        let q2 = LatLon::from_degrees(5.0, 10.0);
        assert!(segment_intersection(&p1, &p2, &q1, &q2).is_none());
        assert!(!segments_intersect(&p1, &p2, &q1, &q2));

        // disjoint bounds
        let q1 = LatLon::from_degrees(30.0, 30.0);
        let q2 = LatLon::from_degrees(40.0, 40.0);
        assert!(!segments_intersect(&p1, &p2, &q1, &q2));
    }

    #[test]
    fn test_segment_intersection_across_antimeridian() {
        let p1 = LatLon::from_degrees(10.0, 170.0);
        let p2 = LatLon::from_degrees(-10.0, -170.0);
        let q1 = LatLon::from_degrees(10.0, -170.0);
        let q2 = LatLon::from_degrees(-10.0, 170.0);

        // the segments are treated as spanning the globe
        let result = segment_intersection(&p1, &p2, &q1, &q2);
        assert!(result.is_some());
        if let Some(point) = result {
            assert!(is_within_tolerance(0.0, point.lat.0, 1e-9));
            assert!(is_within_tolerance(0.0, point.lon.0, 1e-9));
        }
    }

    #[test]
    fn test_line_string_intersections() {
        // [longitude, latitude]
        let l1 = LineString::from(vec![[0.0, 0.0], [20.0, 0.0], [20.0, 20.0]]);
        let l2 = LineString::from(vec![[10.0, -10.0], [10.0, 10.0], [30.0, 10.0]]);

        let points = line_string_intersections(&l1, &l2);
        assert_eq!(2, points.len());
        assert!(is_within_tolerance(0.0, points[0].lat.0, 1e-9));
        assert!(is_within_tolerance(10.0, points[0].lon.0, 1e-9));
        assert!(is_within_tolerance(10.0, points[1].lat.0, 1e-9));
        assert!(is_within_tolerance(20.0, points[1].lon.0, 1e-9));
        assert!(line_strings_intersect(&l1, &l2));

        let l3 = LineString::from(vec![[0.0, 30.0], [20.0, 30.0]]);
        assert!(line_string_intersections(&l1, &l3).is_empty());
        assert!(!line_strings_intersect(&l1, &l3));

        // too short
        let point = LineString::from(vec![[10.0, 0.0]]);
        assert!(line_string_intersections(&l1, &point).is_empty());
        assert!(!line_strings_intersect(&point, &l2));
    }
}
