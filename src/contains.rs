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

//! The contains module tests whether points are inside rings, polygons and
//! multi-polygons by ray casting.
//!
//! A ray is cast from the point towards the North pole, i.e. in the
//! direction of increasing latitude, and the crossings of the ring's
//! edges are counted: an odd number of crossings means the point is inside.
//! Where the point is within the latitude range of an edge, the bearing of
//! the edge in the `EarthModel` is compared with the bearing from the edge
//! start to the point.
//!
//! Points on the boundary of an outer ring are inside it, points on the
//! boundary of a hole are not inside the hole.
//!
//! The rings must have been densified for the `EarthModel`, so that their
//! latitude/longitude bounds are accurate. The longitudes are not wrapped:
//! a ring that crosses the antimeridian must be given with longitudes in
//! the range [0°, 360°).

#![allow(clippy::float_cmp)]

use crate::geometry::{
    multi_polygon_bounds, polygon_bounds, rect_contains, LineString, MultiPolygon, Polygon, Rect,
};
use crate::latlon::LatLon;
use crate::model::EarthModel;
use crate::Degrees;
use geo::BoundingRect;

/// The relationship between a ray and an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RayCrossing {
    /// The ray does not cross the edge.
    Misses,
    /// The ray crosses the edge.
    Crosses,
    /// The point is on the edge.
    OnEdge,
}

/// Whether a ray cast from `point` crosses the edge `start`-`end`.
///
/// A ray that passes through the end of an edge would also cross the
/// adjacent edge and cancel the crossing, so the point's longitude is moved
/// to the next larger float if it coincides with either end.
fn ray_crosses(point: &LatLon, start: &LatLon, end: &LatLon, model: &EarthModel) -> RayCrossing {
    // start at the smaller longitude
    let (s, e) = if start.lon.0 > end.lon.0 {
        (end, start)
    } else {
        (start, end)
    };

    let lat = point.lat.0;
    let mut lon = point.lon.0;
    if lon == s.lon.0 {
        if lat == s.lat.0 {
            return RayCrossing::OnEdge;
        }
        if s.lon.0 == e.lon.0 {
            // on a meridian edge
            let (min_lat, max_lat) = if s.lat.0 > e.lat.0 {
                (e.lat.0, s.lat.0)
            } else {
                (s.lat.0, e.lat.0)
            };
            if (min_lat..=max_lat).contains(&lat) {
                return RayCrossing::OnEdge;
            }
        }
        lon = libm::nextafter(lon, f64::INFINITY);
    } else if lon == e.lon.0 {
        if lat == e.lat.0 {
            return RayCrossing::OnEdge;
        }
        lon = libm::nextafter(lon, f64::INFINITY);
    }

    if lon < s.lon.0 || lon > e.lon.0 {
        return RayCrossing::Misses;
    }

    let (south, north) = if s.lat.0 > e.lat.0 {
        (e.lat.0, s.lat.0)
    } else {
        (s.lat.0, e.lat.0)
    };
    if lat > north {
        return RayCrossing::Misses;
    }
    if lat < south {
        return RayCrossing::Crosses;
    }

    let edge_bearing = model.initial_bearing(s, e);
    let point_bearing = model.initial_bearing(s, &LatLon::new(Degrees(lat), Degrees(lon)));
    if edge_bearing.0 == point_bearing.0 {
        RayCrossing::OnEdge
    } else if edge_bearing.0 <= point_bearing.0 {
        RayCrossing::Crosses
    } else {
        RayCrossing::Misses
    }
}

/// Whether `point` is inside `ring`, given the `bound` of the ring.
/// * `ring` - the ring, closed or not.
/// * `bound` - the bounding rectangle of the ring.
/// * `point` - the point to test.
/// * `is_hole` - whether the ring is a hole.
/// * `model` - the Earth model of the ring's edges.
///
/// returns true if the point is inside the ring, or on the boundary of an
/// outer ring.
#[must_use]
pub fn ring_with_bound_contains(
    ring: &LineString,
    bound: &Rect,
    point: &LatLon,
    is_hole: bool,
    model: &EarthModel,
) -> bool {
    if !rect_contains(bound, point) {
        return false;
    }

    let (Some(first), Some(last)) = (ring.0.first(), ring.0.last()) else {
        return false;
    };

    let closing_edge = ray_crosses(point, &LatLon::from(*last), &LatLon::from(*first), model);
    let mut inside = match closing_edge {
        RayCrossing::OnEdge => return !is_hole,
        crossing => crossing == RayCrossing::Crosses,
    };

    for edge in ring.lines() {
        match ray_crosses(
            point,
            &LatLon::from(edge.start),
            &LatLon::from(edge.end),
            model,
        ) {
            RayCrossing::OnEdge => return !is_hole,
            RayCrossing::Crosses => inside = !inside,
            RayCrossing::Misses => {}
        }
    }

    inside
}

/// Whether `point` is inside `ring`.
///
/// # Examples
/// ```
/// use geodensify::contains::ring_contains;
/// use geodensify::geometry::LineString;
/// use geodensify::latlon::LatLon;
/// use geodensify::model::EarthModel;
///
/// // [longitude, latitude]
/// let ring = LineString::from(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
/// let model = EarthModel::rhumb();
/// assert!(ring_contains(&ring, &LatLon::from_degrees(0.5, 0.5), false, &model));
/// assert!(!ring_contains(&ring, &LatLon::from_degrees(1.5, 0.5), false, &model));
/// ```
#[must_use]
pub fn ring_contains(ring: &LineString, point: &LatLon, is_hole: bool, model: &EarthModel) -> bool {
    ring.bounding_rect()
        .is_some_and(|bound| ring_with_bound_contains(ring, &bound, point, is_hole, model))
}

/// Whether `point` is inside `ring`, given an optional bound.
fn ring_with_optional_bound_contains(
    ring: &LineString,
    bound: Option<&Rect>,
    point: &LatLon,
    is_hole: bool,
    model: &EarthModel,
) -> bool {
    bound.is_some_and(|bound| ring_with_bound_contains(ring, bound, point, is_hole, model))
}

/// Whether `point` is inside `polygon`, given the bounds of its exterior
/// and then its interiors, see `geometry::polygon_bounds`.
/// The bounds are calculated from the polygon if there is not one for each
/// ring.
#[must_use]
pub fn polygon_with_bounds_contains(
    polygon: &Polygon,
    bounds: &[Option<Rect>],
    point: &LatLon,
    model: &EarthModel,
) -> bool {
    if bounds.len() != 1 + polygon.interiors().len() {
        return polygon_with_bounds_contains(polygon, &polygon_bounds(polygon), point, model);
    }

    ring_with_optional_bound_contains(polygon.exterior(), bounds[0].as_ref(), point, false, model)
        && !polygon
            .interiors()
            .iter()
            .zip(&bounds[1..])
            .any(|(hole, bound)| {
                ring_with_optional_bound_contains(hole, bound.as_ref(), point, true, model)
            })
}

/// Whether `point` is inside `polygon`: inside its exterior and not
/// inside any of its interiors.
#[must_use]
pub fn polygon_contains(polygon: &Polygon, point: &LatLon, model: &EarthModel) -> bool {
    polygon_with_bounds_contains(polygon, &polygon_bounds(polygon), point, model)
}

/// Whether `point` is inside any of the polygons of `multi_polygon`, given
/// their bounds, see `geometry::multi_polygon_bounds`.
#[must_use]
pub fn multi_polygon_with_bounds_contains(
    multi_polygon: &MultiPolygon,
    bounds: &[Vec<Option<Rect>>],
    point: &LatLon,
    model: &EarthModel,
) -> bool {
    if bounds.len() != multi_polygon.0.len() {
        return multi_polygon_with_bounds_contains(
            multi_polygon,
            &multi_polygon_bounds(multi_polygon),
            point,
            model,
        );
    }

    multi_polygon
        .0
        .iter()
        .zip(bounds)
        .any(|(polygon, bounds)| polygon_with_bounds_contains(polygon, bounds, point, model))
}

/// Whether `point` is inside any of the polygons of `multi_polygon`.
#[must_use]
pub fn multi_polygon_contains(
    multi_polygon: &MultiPolygon,
    point: &LatLon,
    model: &EarthModel,
) -> bool {
    multi_polygon
        .0
        .iter()
        .any(|polygon| polygon_contains(polygon, point, model))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A point from its longitude and latitude, unwrapped.
    fn point(lon: f64, lat: f64) -> LatLon {
        LatLon::new(Degrees(lat), Degrees(lon))
    }

    fn square(min: f64, max: f64) -> LineString {
        LineString::from(vec![
            [min, min],
            [max, min],
            [max, max],
            [min, max],
            [min, min],
        ])
    }

    #[test]
    fn test_ray_crosses() {
        let model = EarthModel::Planar;
        let s = point(0.0, 0.0);
        let e = point(2.0, 2.0);

        assert_eq!(RayCrossing::OnEdge, ray_crosses(&s, &s, &e, &model));
        assert_eq!(RayCrossing::OnEdge, ray_crosses(&e, &e, &s, &model));
        let on_edge = ray_crosses(&point(1.0, 1.0), &s, &e, &model);
        assert_eq!(RayCrossing::OnEdge, on_edge);
        let below = ray_crosses(&point(1.0, -1.0), &s, &e, &model);
        assert_eq!(RayCrossing::Crosses, below);
        let under = ray_crosses(&point(1.0, 0.5), &s, &e, &model);
        assert_eq!(RayCrossing::Crosses, under);
        let over = ray_crosses(&point(1.0, 1.5), &s, &e, &model);
        assert_eq!(RayCrossing::Misses, over);
        let beyond = ray_crosses(&point(3.0, 0.0), &s, &e, &model);
        assert_eq!(RayCrossing::Misses, beyond);

        // meridian edge
        let e = point(0.0, 2.0);
        let on_edge = ray_crosses(&point(0.0, 1.0), &s, &e, &model);
        assert_eq!(RayCrossing::OnEdge, on_edge);
        let above = ray_crosses(&point(0.0, 3.0), &s, &e, &model);
        assert_eq!(RayCrossing::Misses, above);
    }

    #[test]
    fn test_ring_contains() {
        let ring = LineString::from(vec![
            [0.0, 0.0],
            [0.0, 1.0],
            [1.0, 1.0],
            [1.0, 0.5],
            [2.0, 0.5],
            [2.0, 1.0],
            [3.0, 1.0],
            [3.0, 0.0],
            [0.0, 0.0],
        ]);
        let data = [
            ((1.5, 0.25), true),
            ((0.5, 0.75), true),
            ((1.5, 0.75), false),
            ((2.5, 0.75), true),
            ((1.5, 1.0), false),
            ((2.5, 1.75), false),
            ((2.5, -1.75), false),
            ((-2.5, -0.75), false),
            ((3.5, 0.75), false),
        ];
        let mut reversed = ring.clone();
        reversed.0.reverse();

        for model in [
            EarthModel::Planar,
            EarthModel::rhumb(),
            EarthModel::spherical(),
        ] {
            for ((lon, lat), expected) in data {
                let p = point(lon, lat);
                let result = ring_contains(&ring, &p, false, &model);
                assert_eq!(expected, result, "{model:?}: {lon}, {lat}");
                let result = ring_contains(&reversed, &p, false, &model);
                assert_eq!(expected, result, "{model:?}: reversed {lon}, {lat}");
            }

            for &c in ring.coords() {
                let p = LatLon::from(c);
                assert!(ring_contains(&ring, &p, false, &model), "{model:?}: vertex {p}");
                assert!(!ring_contains(&ring, &p, true, &model), "{model:?}: hole vertex {p}");
            }

            for edge in ring.lines() {
                let interpolate = |fraction: f64| {
                    point(
                        edge.end.x + fraction * (edge.start.x - edge.end.x),
                        edge.end.y + fraction * (edge.start.y - edge.end.y),
                    )
                };
                let mid = interpolate(0.5);
                assert!(ring_contains(&ring, &mid, false, &model), "{model:?}: mid {mid}");
                for fraction in [5.0, -5.0] {
                    let p = interpolate(fraction);
                    assert!(!ring_contains(&ring, &p, false, &model), "{model:?}: {p}");
                }
            }
        }
    }

    #[test]
    fn test_ring_contains_across_antimeridian() {
        let ring = LineString::from(vec![[160.0, -10.0], [220.0, -10.0], [220.0, -55.0]]);
        let start = LatLon::from(ring.0[0]);
        let end = LatLon::from(ring.0[2]);

        for model in [
            EarthModel::Planar,
            EarthModel::rhumb(),
            EarthModel::spherical(),
        ] {
            let mid = model.mid_point(&start, &end);
            let lon = crate::angle::wrap360(mid.lon).0;

            let below = point(lon, mid.lat.0 - 0.000_01);
            assert!(!ring_contains(&ring, &below, false, &model), "{model:?}: {below}");
            let above = point(lon, mid.lat.0 + 0.000_01);
            assert!(ring_contains(&ring, &above, false, &model), "{model:?}: {above}");
        }
    }

    #[test]
    fn test_ring_contains_empty() {
        let model = EarthModel::Planar;
        let origin = point(0.0, 0.0);
        let empty = LineString::new(vec![]);
        assert!(!ring_contains(&empty, &origin, false, &model));
        let polygon = Polygon::new(empty, vec![]);
        assert!(!polygon_contains(&polygon, &origin, &model));
        assert!(!multi_polygon_contains(&MultiPolygon(vec![]), &origin, &model));
        assert!(!multi_polygon_contains(&MultiPolygon(vec![polygon]), &origin, &model));
    }

    #[test]
    fn test_polygon_contains() {
        let model = EarthModel::rhumb();
        let p = point(1.5, 1.5);
        let polygon = Polygon::new(square(0.0, 3.0), vec![]);
        assert!(polygon_contains(&polygon, &p, &model));

        // a hole oriented the same as the exterior
        let polygon = Polygon::new(square(0.0, 3.0), vec![square(1.0, 2.0)]);
        assert!(!polygon_contains(&polygon, &p, &model));

        // a hole oriented opposite to the exterior
        let mut hole = square(1.0, 2.0);
        hole.0.reverse();
        let polygon = Polygon::new(square(0.0, 3.0), vec![hole]);
        assert!(!polygon_contains(&polygon, &p, &model));

        // on a vertex of the hole
        assert!(polygon_contains(&polygon, &point(2.0, 2.0), &model));

        // on an edge of the hole
        assert!(polygon_contains(&polygon, &point(2.0, 1.5), &model));

        let corner = point(0.5, 0.5);
        let bounds = polygon_bounds(&polygon);
        assert!(!polygon_with_bounds_contains(&polygon, &bounds, &p, &model));
        assert!(polygon_with_bounds_contains(&polygon, &bounds, &corner, &model));

        // missing bounds are calculated
        assert!(!polygon_with_bounds_contains(&polygon, &[], &p, &model));
        assert!(polygon_with_bounds_contains(&polygon, &[], &corner, &model));

        // a point outside of the given bound
        let bound = Rect::new((0.0, 0.0), (0.25, 0.25));
        assert!(!ring_with_bound_contains(polygon.exterior(), &bound, &corner, false, &model));
    }

    #[test]
    fn test_multi_polygon_contains() {
        let model = EarthModel::rhumb();
        let mut multi_polygon = MultiPolygon(vec![Polygon::new(square(0.0, 1.0), vec![])]);
        assert!(multi_polygon_contains(&multi_polygon, &point(0.5, 0.5), &model));
        assert!(!multi_polygon_contains(&multi_polygon, &point(1.5, 1.5), &model));

        let exterior = LineString::from(vec![
            [2.0, 0.0],
            [3.0, 0.0],
            [3.0, 1.0],
            [2.0, 1.0],
            [2.0, 0.0],
        ]);
        multi_polygon.0.push(Polygon::new(exterior, vec![]));
        assert!(multi_polygon_contains(&multi_polygon, &point(2.5, 0.5), &model));
        assert!(!multi_polygon_contains(&multi_polygon, &point(1.5, 0.5), &model));

        // on meridian edges
        multi_polygon.0.push(Polygon::new(square(-10.0, 10.0), vec![]));
        let on_edge = point(10.0, 10.0);
        assert!(multi_polygon_contains(&multi_polygon, &on_edge, &model));
        let outside = point(10.000_000_000_01, 10.0);
        assert!(!multi_polygon_contains(&multi_polygon, &outside, &model));
        let inside = point(-9.999_999_999_999_99, 10.0);
        assert!(multi_polygon_contains(&multi_polygon, &inside, &model));

        let bounds = multi_polygon_bounds(&multi_polygon);
        for lon in [0.5, 2.5, 10.0] {
            let p = point(lon, 0.5);
            assert_eq!(
                multi_polygon_contains(&multi_polygon, &p, &model),
                multi_polygon_with_bounds_contains(&multi_polygon, &bounds, &p, &model)
            );
        }
        let p = point(2.5, 0.5);
        assert!(multi_polygon_with_bounds_contains(&multi_polygon, &[], &p, &model));
    }
}
