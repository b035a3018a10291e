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

//! The geometry module connects `LatLon` with the `geo_types` geometries
//! used by the densification, containment and intersection functions, and
//! calculates their latitude/longitude bounding rectangles.
//!
//! A `Coord` holds the longitude in `x` and the latitude in `y`, in degrees.
//! Conversions between `Coord` and `LatLon` do not wrap the longitude, so
//! rings that cross the antimeridian may use longitudes in [0°, 360°).
//!
//! A `LineString` ring is closed if its first and last points are equal.
//! A `Polygon` is an exterior ring and any interior rings: its holes.

use crate::latlon::LatLon;
use crate::{Degrees, Validate};
use geo::{BoundingRect, Intersects};

pub use geo_types::{Coord, LineString, MultiPolygon, Point, Polygon, Rect};

impl From<LatLon> for Coord {
    fn from(a: LatLon) -> Self {
        Self {
            x: a.lon.0,
            y: a.lat.0,
        }
    }
}

impl From<Coord> for LatLon {
    fn from(c: Coord) -> Self {
        Self::new(Degrees(c.y), Degrees(c.x))
    }
}

impl From<LatLon> for Point {
    fn from(a: LatLon) -> Self {
        Self(Coord::from(a))
    }
}

impl From<Point> for LatLon {
    fn from(p: Point) -> Self {
        Self::from(p.0)
    }
}

/// The points of `line_string` as `LatLon`s.
#[must_use]
pub fn to_lat_lons(line_string: &LineString) -> Vec<LatLon> {
    line_string.coords().map(|&c| LatLon::from(c)).collect()
}

/// The bounding rectangle of segment `a`-`b`.
#[must_use]
pub fn segment_bounds(a: &LatLon, b: &LatLon) -> Rect {
    Rect::new(Coord::from(*a), Coord::from(*b))
}

/// Whether `point` is inside `rect` or on its edge.
///
/// # Examples
/// ```
/// use geodensify::geometry::{segment_bounds, rect_contains};
/// use geodensify::latlon::LatLon;
///
/// let a = LatLon::from_degrees(-10.0, 20.0);
/// let b = LatLon::from_degrees(5.0, -30.0);
/// let rect = segment_bounds(&a, &b);
/// assert!(rect_contains(&rect, &LatLon::from_degrees(5.0, 20.0)));
/// assert!(!rect_contains(&rect, &LatLon::from_degrees(6.0, 0.0)));
/// ```
#[must_use]
pub fn rect_contains(rect: &Rect, point: &LatLon) -> bool {
    point.is_valid() && rect.intersects(&Coord::from(*point))
}

/// The bounds of the exterior and then the interiors of `polygon`.
/// An empty ring has no bound.
#[must_use]
pub fn polygon_bounds(polygon: &Polygon) -> Vec<Option<Rect>> {
    core::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring.bounding_rect())
        .collect()
}

/// The bounds of each of the rings of each of the polygons of `multi_polygon`.
#[must_use]
pub fn multi_polygon_bounds(multi_polygon: &MultiPolygon) -> Vec<Vec<Option<Rect>>> {
    multi_polygon.0.iter().map(polygon_bounds).collect()
}
