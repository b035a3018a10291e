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

//! The densify module inserts points into segments, rings, polygons and
//! multi-polygons so that lines drawn between their points in a `reference`
//! `EarthModel` follow the lines of a `model` `EarthModel` to within a
//! tolerance.
//!
//! The `model` defines the shape of the lines between the points, e.g.
//! `Spherical` great circles, and the points are inserted on those lines.
//! The `reference` defines how the lines between the densified points are
//! drawn, e.g. `Planar` straight lines in latitude/longitude.
//!
//! The error of a segment is the distance between its mid point in the
//! `model` and its mid point in the `reference`. Segments are bisected
//! until their errors are within the tolerance, or the maximum recursion
//! depth is reached: a depth of 15 adds up to 2<sup>14</sup> points per
//! segment. A result that does not meet the tolerance is still returned,
//! flagged by `Densified::tolerance_too_low`.
//!
//! The geometries should have longitudes in the range [-180°, 180°].
//!
//! # Examples
//! ```
//! use geodensify::densify::densify_ring;
//! use geodensify::geometry::LineString;
//! use geodensify::model::EarthModel;
//! use geodensify::Metres;
//!
//! // [longitude, latitude]
//! let ring = LineString::from(vec![[-154.5, -35.0], [180.0, -35.0], [-165.0, -25.0]]);
//! let densified = densify_ring(
//!     &ring,
//!     &EarthModel::spherical(),
//!     &EarthModel::Planar,
//!     Metres(1000.0),
//! )
//! .unwrap();
//! assert!(!densified.tolerance_too_low);
//! assert!(densified.geometry.0.len() > ring.0.len() + 1);
//! assert!(densified.geometry.is_closed());
//! ```

#![allow(clippy::float_cmp)]

use crate::cancel::{Cancelled, CancellationToken};
use crate::geometry::{to_lat_lons, LineString, MultiPolygon, Polygon};
use crate::latlon::LatLon;
use crate::model::EarthModel;
use crate::{Degrees, Metres};
use log::{debug, trace, warn};
use thiserror::Error;

/// The default maximum depth of segment bisection.
pub const DEFAULT_MAX_DEPTH: u32 = 15;

/// The errors that densification may return.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DensifyError {
    /// The tolerance is not a positive number of metres.
    #[error("invalid tolerance: {0} metres, it must be positive")]
    InvalidTolerance(f64),
    /// A ring has fewer than two points.
    #[error("invalid geometry: ring has {0} points only")]
    InvalidGeometry(usize),
    /// The maximum depth was reached before the tolerance was met.
    #[error("tolerance too low")]
    ToleranceTooLow,
    /// An invariant was violated.
    #[error("internal error: {0}")]
    Internal(&'static str),
    /// The densification was cancelled.
    #[error("densification cancelled")]
    Cancelled,
}

impl From<Cancelled> for DensifyError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

/// A densified geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Densified<T> {
    /// The densified geometry.
    pub geometry: T,
    /// Whether any part of the geometry reached the maximum depth without
    /// meeting the tolerance.
    pub tolerance_too_low: bool,
}

impl<T> Densified<T> {
    #[must_use]
    const fn new(geometry: T, tolerance_too_low: bool) -> Self {
        Self {
            geometry,
            tolerance_too_low,
        }
    }

    /// The geometry, whether or not it meets the tolerance.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.geometry
    }

    /// The geometry, only if it meets the tolerance.
    ///
    /// # Errors
    ///
    /// `DensifyError::ToleranceTooLow` if it does not.
    pub fn into_strict(self) -> Result<T, DensifyError> {
        if self.tolerance_too_low {
            Err(DensifyError::ToleranceTooLow)
        } else {
            Ok(self.geometry)
        }
    }
}

/// The larger of two residual errors.
fn max_residual(a: Option<Metres>, b: Option<Metres>) -> Option<Metres> {
    match (a, b) {
        (Some(a), Some(b)) => Some(Metres(a.0.max(b.0))),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Densifies geometries between a pair of `EarthModel`s.
#[derive(Clone, Debug)]
pub struct Densifier {
    model: EarthModel,
    reference: EarthModel,
    tolerance: Metres,
    max_depth: u32,
    token: Option<CancellationToken>,
}

impl Densifier {
    /// Constructor.
    /// * `model` - the model of the lines to follow.
    /// * `reference` - the model of the lines between densified points.
    /// * `tolerance` - the maximum error of a densified segment.
    ///
    /// # Errors
    ///
    /// `DensifyError::InvalidTolerance` if `tolerance` is not positive.
    pub fn new(
        model: EarthModel,
        reference: EarthModel,
        tolerance: Metres,
    ) -> Result<Self, DensifyError> {
        if tolerance.0.is_nan() || tolerance.0 <= 0.0 {
            return Err(DensifyError::InvalidTolerance(tolerance.0));
        }

        Ok(Self {
            model,
            reference,
            tolerance,
            max_depth: DEFAULT_MAX_DEPTH,
            token: None,
        })
    }

    /// Set the maximum depth of segment bisection, at least 1.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Set a token to cancel the densification.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// The model of the lines to follow.
    #[must_use]
    pub const fn model(&self) -> &EarthModel {
        &self.model
    }

    /// The model of the lines between densified points.
    #[must_use]
    pub const fn reference(&self) -> &EarthModel {
        &self.reference
    }

    /// The maximum error of a densified segment.
    #[must_use]
    pub const fn tolerance(&self) -> Metres {
        self.tolerance
    }

    /// The maximum depth of segment bisection.
    #[must_use]
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }

    fn check_cancelled(&self) -> Result<(), DensifyError> {
        if let Some(token) = &self.token {
            if let Err(e) = token.check() {
                debug!("densification cancelled");
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// The error of the part of segment `ll0`-`ll1` between `from` and `to`,
    /// its mid point in the model is at `fraction`.
    fn calculate_error(
        &self,
        ll0: &LatLon,
        ll1: &LatLon,
        fraction: f64,
        from: &LatLon,
        to: &LatLon,
    ) -> Metres {
        // all models follow meridians
        if from.lon.0 == to.lon.0 {
            return Metres(0.0);
        }

        let mut mid = self.model.intermediate_point(ll0, ll1, fraction);
        // distances between -180° and 180° are confused
        if mid.lon.0 == -180.0 {
            mid.lon = Degrees(180.0);
        }
        let ref_mid = self.reference.intermediate_point(from, to, 0.5);
        self.model.distance(&mid, &ref_mid)
    }

    /// The error of segment `p0`-`p1`: the distance between its mid points
    /// in the model and the reference.
    #[must_use]
    pub fn segment_error(&self, p0: &LatLon, p1: &LatLon) -> Metres {
        self.calculate_error(p0, p1, 0.5, p0, p1)
    }

    /// Densify the part of segment `ll0`-`ll1` between fractions
    /// `start` and `end`, i.e. between points `from` and `to`.
    /// The points after `from` are appended to `points`.
    ///
    /// returns the largest error of the parts that did not meet the
    /// tolerance, if any.
    fn bisect(
        &self,
        (ll0, ll1): (&LatLon, &LatLon),
        (from, to): (&LatLon, &LatLon),
        (start, end): (f64, f64),
        depth: u32,
        points: &mut Vec<LatLon>,
    ) -> Result<Option<Metres>, DensifyError> {
        self.check_cancelled()?;

        let depth = depth - 1;
        let fraction = (start + end) / 2.0;
        let error = self.calculate_error(ll0, ll1, fraction, from, to);
        if error.0 <= self.tolerance.0 {
            points.push(*to);
            return Ok(None);
        }
        if depth == 0 {
            points.push(*to);
            return Ok(Some(error));
        }

        let mid = self.model.intermediate_point(ll0, ll1, fraction);
        trace!("bisecting {from} - {to} at {mid}, error: {}", error.0);
        let left = self.bisect((ll0, ll1), (from, &mid), (start, fraction), depth, points)?;
        let right = self.bisect((ll0, ll1), (&mid, to), (fraction, end), depth, points)?;
        Ok(max_residual(left, right))
    }

    /// Densify segment `p0`-`p1`, appending the points after `p0` to `points`.
    ///
    /// returns whether the segment did not meet the tolerance.
    fn densify_edge(
        &self,
        p0: &LatLon,
        p1: &LatLon,
        points: &mut Vec<LatLon>,
    ) -> Result<bool, DensifyError> {
        let residual = self.bisect((p0, p1), (p0, p1), (0.0, 1.0), self.max_depth, points)?;
        if let Some(error) = residual {
            warn!(
                "segment {p0} - {p1} did not meet tolerance {} after {} levels, error: {}",
                self.tolerance.0, self.max_depth, error.0
            );
        }
        Ok(residual.is_some())
    }

    /// Densify segment `p0`-`p1`.
    ///
    /// returns the densified segment, including both end points.
    ///
    /// # Errors
    ///
    /// `DensifyError::Cancelled` if cancelled.
    pub fn segment(
        &self,
        p0: &LatLon,
        p1: &LatLon,
    ) -> Result<Densified<LineString>, DensifyError> {
        let mut points = vec![*p0];
        let tolerance_too_low = self.densify_edge(p0, p1, &mut points)?;
        Ok(Densified::new(LineString::from(points), tolerance_too_low))
    }

    /// Densify `ring`, including the edge from its last point to its first
    /// point if the ring is not closed.
    ///
    /// returns the densified ring, closed.
    ///
    /// # Errors
    ///
    /// `DensifyError::InvalidGeometry` if the ring has fewer than two points.
    /// `DensifyError::Cancelled` if cancelled.
    pub fn ring(&self, ring: &LineString) -> Result<Densified<LineString>, DensifyError> {
        let vertices = to_lat_lons(ring);
        let (Some(first), Some(last)) = (vertices.first(), vertices.last()) else {
            return Err(DensifyError::InvalidGeometry(0));
        };
        if vertices.len() < 2 {
            return Err(DensifyError::InvalidGeometry(vertices.len()));
        }

        let closing_edge = if first.coincides_with(last) {
            None
        } else {
            Some([*last, *first])
        };
        let edges = vertices
            .windows(2)
            .chain(closing_edge.as_ref().map(<[LatLon; 2]>::as_slice));

        let mut points = Vec::with_capacity(vertices.len() + 1);
        points.push(*first);
        let mut tolerance_too_low = false;
        for edge in edges {
            let count = points.len();
            tolerance_too_low |= self.densify_edge(&edge[0], &edge[1], &mut points)?;
            if points.len() == count {
                return Err(DensifyError::Internal("segment has fewer than 2 points"));
            }
        }

        Ok(Densified::new(LineString::from(points), tolerance_too_low))
    }

    /// Densify the exterior and interiors of `polygon`.
    ///
    /// # Errors
    ///
    /// As `ring`.
    pub fn polygon(&self, polygon: &Polygon) -> Result<Densified<Polygon>, DensifyError> {
        let exterior = self.ring(polygon.exterior())?;
        let mut tolerance_too_low = exterior.tolerance_too_low;
        let interiors = polygon
            .interiors()
            .iter()
            .map(|ring| -> Result<LineString, DensifyError> {
                let densified = self.ring(ring)?;
                tolerance_too_low |= densified.tolerance_too_low;
                Ok(densified.geometry)
            })
            .collect::<Result<Vec<LineString>, DensifyError>>()?;
        Ok(Densified::new(
            Polygon::new(exterior.geometry, interiors),
            tolerance_too_low,
        ))
    }

    /// Densify each of the polygons of `multi_polygon`.
    ///
    /// # Errors
    ///
    /// As `ring`.
    pub fn multi_polygon(
        &self,
        multi_polygon: &MultiPolygon,
    ) -> Result<Densified<MultiPolygon>, DensifyError> {
        let mut tolerance_too_low = false;
        let polygons = multi_polygon
            .0
            .iter()
            .map(|polygon| -> Result<Polygon, DensifyError> {
                let densified = self.polygon(polygon)?;
                tolerance_too_low |= densified.tolerance_too_low;
                Ok(densified.geometry)
            })
            .collect::<Result<Vec<Polygon>, DensifyError>>()?;
        Ok(Densified::new(MultiPolygon(polygons), tolerance_too_low))
    }
}

/// Densify segment `p0`-`p1` with the default maximum depth.
/// * `p0`, `p1` - the start and end points of the segment.
/// * `model` - the model of the lines to follow.
/// * `reference` - the model of the lines between densified points.
/// * `tolerance` - the maximum error of a densified segment.
///
/// # Errors
///
/// `DensifyError::InvalidTolerance` if `tolerance` is not positive.
pub fn densify_segment(
    p0: &LatLon,
    p1: &LatLon,
    model: &EarthModel,
    reference: &EarthModel,
    tolerance: Metres,
) -> Result<Densified<LineString>, DensifyError> {
    Densifier::new(*model, *reference, tolerance)?.segment(p0, p1)
}

/// Densify `ring` with the default maximum depth.
///
/// # Errors
///
/// `DensifyError::InvalidTolerance` if `tolerance` is not positive.
/// `DensifyError::InvalidGeometry` if the ring has fewer than two points.
pub fn densify_ring(
    ring: &LineString,
    model: &EarthModel,
    reference: &EarthModel,
    tolerance: Metres,
) -> Result<Densified<LineString>, DensifyError> {
    Densifier::new(*model, *reference, tolerance)?.ring(ring)
}

/// Densify `polygon` with the default maximum depth.
///
/// # Errors
///
/// As `densify_ring`.
pub fn densify_polygon(
    polygon: &Polygon,
    model: &EarthModel,
    reference: &EarthModel,
    tolerance: Metres,
) -> Result<Densified<Polygon>, DensifyError> {
    Densifier::new(*model, *reference, tolerance)?.polygon(polygon)
}

/// Densify `multi_polygon` with the default maximum depth.
///
/// # Errors
///
/// As `densify_ring`.
pub fn densify_multi_polygon(
    multi_polygon: &MultiPolygon,
    model: &EarthModel,
    reference: &EarthModel,
    tolerance: Metres,
) -> Result<Densified<MultiPolygon>, DensifyError> {
    Densifier::new(*model, *reference, tolerance)?.multi_polygon(multi_polygon)
}

/// The error of segment `p0`-`p1`: the distance between its mid points in
/// `model` and `reference`, measured in `model`.
/// Segments along meridians have no error.
#[must_use]
pub fn segment_error(
    p0: &LatLon,
    p1: &LatLon,
    model: &EarthModel,
    reference: &EarthModel,
) -> Metres {
    let densifier = Densifier {
        model: *model,
        reference: *reference,
        tolerance: Metres(f64::INFINITY),
        max_depth: DEFAULT_MAX_DEPTH,
        token: None,
    };
    densifier.segment_error(p0, p1)
}
