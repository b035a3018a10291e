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

//! geodensify
//!
//! [![License](https://img.shields.io/badge/License-MIT-blue)](https://opensource.org/license/mit/)
//!
//! A library for performing geodesic calculations on different models of the
//! Earth, and for densifying, intersecting and testing containment in
//! polygons whose edges follow those models, including polygons that cross
//! the antimeridian.
//!
//! ## Earth models
//!
//! The `model` module contains four models of the Earth, see `EarthModel`:
//!
//! - `Spherical` - [great circles](https://en.wikipedia.org/wiki/Great_circle)
//!   on a sphere of configurable radius;
//! - `Rhumb` - [rhumb lines](https://en.wikipedia.org/wiki/Rhumb_line),
//!   lines of constant bearing, on a sphere;
//! - `Vincenty` - [geodesics](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid)
//!   on an ellipsoid, default WGS-84, using
//!   [Vincenty's formulae](https://en.wikipedia.org/wiki/Vincenty%27s_formulae);
//! - `Planar` - straight lines in latitude and longitude.
//!
//! Each model calculates the distance, initial and final bearings,
//! destination point, mid point and intermediate points between positions.
//! Where the difference in longitude between positions exceeds 180°,
//! the models take the shorter path across the antimeridian.
//!
//! ## Densification
//!
//! A line drawn between two positions in one model, e.g. a straight line on
//! a map, deviates from the line between them in another model,
//! e.g. a great circle. The `densify` module inserts points into
//! segments, rings, polygons and multi-polygons until the deviation is within
//! a tolerance, see `densify::Densifier`.
//!
//! ## Design
//!
//! Positions are represented by `LatLon`, a latitude and longitude in
//! `Degrees`. Invalid positions and distances, e.g. where Vincenty's
//! formulae fail to converge, have NaN values: test them with `Validate`.
//!
//! The `Ellipsoid` class represents an ellipsoid of revolution.
//! The static `WGS84_ELLIPSOID` represents the WGS-84 `Ellipsoid` which is
//! the default `Ellipsoid` of the `Vincenty` model.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to perform
//!   great-circle calculations;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them;
//! - [geo-types](https://crates.io/crates/geo-types) - to define `LineString`,
//!   `Polygon`, `MultiPolygon` and `Rect`;
//! - [geo](https://crates.io/crates/geo) - to calculate and intersect bounding
//!   rectangles;
//! - [nalgebra](https://crates.io/crates/nalgebra) - for 3D vectors;
//! - [rayon](https://crates.io/crates/rayon) - to calculate intermediate
//!   points in parallel.

pub mod angle;
pub mod cancel;
pub mod cartesian;
pub mod contains;
pub mod densify;
pub mod distance;
pub mod dms;
pub mod ellipsoid;
pub mod geometry;
pub mod intersection;
pub mod latlon;
pub mod mercator;
pub mod model;
pub mod vector;

pub use angle_sc::{Angle, Degrees, Radians, Validate};
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use latlon::LatLon;
pub use model::{EarthModel, GeodesicModel};

use lazy_static::lazy_static;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    #[must_use]
    pub fn new(a: Metres, f: f64) -> Self {
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            one_minus_f: 1.0 - f,
            e_2: ellipsoid::calculate_sq_eccentricity(f),
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::new(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// Convert a geodetic Latitude to a parametric Latitude on the
    /// auxiliary sphere.
    /// * `lat` - the geodetic Latitude
    #[must_use]
    pub fn calculate_parametric_latitude(&self, lat: Angle) -> Angle {
        ellipsoid::calculate_parametric_latitude(lat, self.one_minus_f)
    }

    /// Convert a parametric Latitude on the auxiliary sphere to a
    /// geodetic Latitude.
    /// * `beta` - the parametric Latitude
    #[must_use]
    pub fn calculate_geodetic_latitude(&self, beta: Angle) -> Angle {
        ellipsoid::calculate_geodetic_latitude(beta, self.one_minus_f)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::wgs84()
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `Ellipsoid`.
    pub static ref WGS84_ELLIPSOID: Ellipsoid = Ellipsoid::wgs84();
}
