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

//! The model module contains the Earth models used to calculate distances,
//! bearings and intermediate points between positions.
//!
//! Each model is a small immutable point type wrapping a `LatLon` that
//! implements the `GeodesicModel` trait:
//!
//! - `LatLonSpherical` - great circles on a sphere;
//! - `LatLonRhumb` - rhumb lines (constant bearing) on a sphere;
//! - `LatLonVincenty` - geodesics on an ellipsoid, using Vincenty's formulae;
//! - `LatLonPlanar` - straight lines in latitude/longitude space.
//!
//! `EarthModel` selects a model (and its configuration) at runtime, it is
//! used by the densification, containment and intersection functions.
//!
//! Where the difference in longitude between two positions exceeds 180°,
//! all models take the shorter path across the antimeridian, see
//! `angle::delta_longitude`.

pub mod planar;
pub mod rhumb;
pub mod spherical;
pub mod vincenty;

pub use planar::LatLonPlanar;
pub use rhumb::LatLonRhumb;
pub use spherical::LatLonSpherical;
pub use vincenty::LatLonVincenty;

use crate::cancel::{Cancelled, CancellationToken};
use crate::latlon::LatLon;
use crate::{Degrees, Ellipsoid, Metres, WGS84_ELLIPSOID};
use rayon::prelude::*;

/// The default radius of the spherical Earth models, in metres.
pub const DEFAULT_EARTH_RADIUS: Metres = Metres(6_371_000.0);

/// The calculations that every Earth model provides from its position.
pub trait GeodesicModel: Sync {
    /// The position of the point.
    fn lat_lon(&self) -> LatLon;

    /// The distance to `dest`.
    /// It is invalid (NaN) if the calculation does not converge.
    fn distance_to(&self, dest: &LatLon) -> Metres;

    /// The initial bearing to `dest` in degrees from North, [0°, 360°).
    /// It is NaN if `dest` coincides with this point.
    fn initial_bearing_to(&self, dest: &LatLon) -> Degrees;

    /// The final bearing arriving at `dest` in degrees from North, [0°, 360°).
    fn final_bearing_on(&self, dest: &LatLon) -> Degrees;

    /// The destination point after travelling `distance` from this point on
    /// the initial `bearing`.
    fn destination_point(&self, distance: Metres, bearing: Degrees) -> LatLon;

    /// The point half way to `dest`.
    fn mid_point_to(&self, dest: &LatLon) -> LatLon {
        self.intermediate_point_to(dest, 0.5)
    }

    /// The point at `fraction` of the way to `dest`:
    /// 0 is this point, 1 is `dest`.
    fn intermediate_point_to(&self, dest: &LatLon, fraction: f64) -> LatLon;

    /// The points at each of the `fractions` of the way to `dest`, in the
    /// order of `fractions`.
    /// The points are calculated in parallel.
    fn intermediate_points_to(&self, dest: &LatLon, fractions: &[f64]) -> Vec<LatLon> {
        self.try_intermediate_points_to(dest, fractions, &CancellationToken::new())
            .unwrap_or_default()
    }

    /// The cancellable form of `intermediate_points_to`.
    ///
    /// # Errors
    ///
    /// `Cancelled` if `token` is cancelled before all the points are calculated.
    fn try_intermediate_points_to(
        &self,
        dest: &LatLon,
        fractions: &[f64],
        token: &CancellationToken,
    ) -> Result<Vec<LatLon>, Cancelled> {
        fractions
            .par_iter()
            .map(|&fraction| -> Result<LatLon, Cancelled> {
                token.check()?;
                Ok(self.intermediate_point_to(dest, fraction))
            })
            .collect()
    }
}

/// The configuration of the spherical and rhumb line models.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereConfig {
    /// The radius of the sphere.
    pub radius: Metres,
}

impl SphereConfig {
    /// Construct a `SphereConfig`.
    /// * `radius` - the radius of the sphere.
    #[must_use]
    pub const fn new(radius: Metres) -> Self {
        Self { radius }
    }
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EARTH_RADIUS)
    }
}

/// The configuration of the Vincenty model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VincentyConfig {
    /// The ellipsoid.
    pub ellipsoid: Ellipsoid,
}

impl VincentyConfig {
    /// Construct a `VincentyConfig`.
    /// * `ellipsoid` - the ellipsoid the geodesics are calculated on.
    #[must_use]
    pub const fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }
}

impl Default for VincentyConfig {
    fn default() -> Self {
        Self::new(*WGS84_ELLIPSOID)
    }
}

/// An Earth model and its configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EarthModel {
    /// Great circles on a sphere.
    Spherical(SphereConfig),
    /// Rhumb lines on a sphere.
    Rhumb(SphereConfig),
    /// Geodesics on an ellipsoid.
    Vincenty(VincentyConfig),
    /// Straight lines in latitude/longitude space.
    Planar,
}

impl Default for EarthModel {
    fn default() -> Self {
        Self::Spherical(SphereConfig::default())
    }
}

impl EarthModel {
    /// The spherical model with the default Earth radius.
    #[must_use]
    pub fn spherical() -> Self {
        Self::Spherical(SphereConfig::default())
    }

    /// The rhumb line model with the default Earth radius.
    #[must_use]
    pub fn rhumb() -> Self {
        Self::Rhumb(SphereConfig::default())
    }

    /// The Vincenty model on the WGS-84 ellipsoid.
    #[must_use]
    pub fn vincenty() -> Self {
        Self::Vincenty(VincentyConfig::default())
    }

    /// Call `f` with the model's point type at `start`.
    fn with_point<R>(&self, start: &LatLon, f: impl FnOnce(&dyn GeodesicModel) -> R) -> R {
        match *self {
            Self::Spherical(config) => f(&LatLonSpherical::new(*start, config)),
            Self::Rhumb(config) => f(&LatLonRhumb::new(*start, config)),
            Self::Vincenty(config) => f(&LatLonVincenty::new(*start, config)),
            Self::Planar => f(&LatLonPlanar::new(*start)),
        }
    }

    /// The distance between `start` and `end`.
    ///
    /// # Examples
    /// ```
    /// use geodensify::latlon::LatLon;
    /// use geodensify::model::EarthModel;
    ///
    /// let a = LatLon::from_degrees(51.127, 1.338);
    /// let b = LatLon::from_degrees(50.964, 1.853);
    /// assert_eq!(40308.0, EarthModel::rhumb().distance(&a, &b).0.round());
    /// ```
    #[must_use]
    pub fn distance(&self, start: &LatLon, end: &LatLon) -> Metres {
        self.with_point(start, |p| p.distance_to(end))
    }

    /// The initial bearing from `start` to `end`.
    #[must_use]
    pub fn initial_bearing(&self, start: &LatLon, end: &LatLon) -> Degrees {
        self.with_point(start, |p| p.initial_bearing_to(end))
    }

    /// The final bearing arriving at `end` from `start`.
    #[must_use]
    pub fn final_bearing(&self, start: &LatLon, end: &LatLon) -> Degrees {
        self.with_point(start, |p| p.final_bearing_on(end))
    }

    /// The destination point after travelling `distance` from `start` on the
    /// initial `bearing`.
    #[must_use]
    pub fn destination_point(&self, start: &LatLon, distance: Metres, bearing: Degrees) -> LatLon {
        self.with_point(start, |p| p.destination_point(distance, bearing))
    }

    /// The point half way between `start` and `end`.
    #[must_use]
    pub fn mid_point(&self, start: &LatLon, end: &LatLon) -> LatLon {
        self.with_point(start, |p| p.mid_point_to(end))
    }

    /// The point at `fraction` of the way from `start` to `end`.
    #[must_use]
    pub fn intermediate_point(&self, start: &LatLon, end: &LatLon, fraction: f64) -> LatLon {
        self.with_point(start, |p| p.intermediate_point_to(end, fraction))
    }

    /// The points at each of the `fractions` of the way from `start` to `end`.
    #[must_use]
    pub fn intermediate_points(
        &self,
        start: &LatLon,
        end: &LatLon,
        fractions: &[f64],
    ) -> Vec<LatLon> {
        self.with_point(start, |p| p.intermediate_points_to(end, fractions))
    }

    /// The cancellable form of `intermediate_points`.
    ///
    /// # Errors
    ///
    /// `Cancelled` if `token` is cancelled before all the points are calculated.
    pub fn try_intermediate_points(
        &self,
        start: &LatLon,
        end: &LatLon,
        fractions: &[f64],
        token: &CancellationToken,
    ) -> Result<Vec<LatLon>, Cancelled> {
        self.with_point(start, |p| p.try_intermediate_points_to(end, fractions, token))
    }
}
