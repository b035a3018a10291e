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

//! The rhumb module contains `LatLonRhumb`: calculations along rhumb lines
//! (loxodromes) on a spherical Earth.
//!
//! A rhumb line crosses every meridian at the same angle, so it is a
//! straight line on a Mercator projection.

#![allow(clippy::suboptimal_flops, clippy::similar_names)]

use super::{GeodesicModel, SphereConfig};
use crate::angle::{longitude_difference, wrap360};
use crate::cancel::{Cancelled, CancellationToken};
use crate::latlon::LatLon;
use crate::{Degrees, Metres, Radians};
use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use rayon::prelude::*;

/// Differences in projected latitude smaller than this are treated as an
/// East-West course.
const MIN_DELTA_PSI: f64 = 10e-12;

/// The difference in projected (Mercator) latitude between two latitudes.
fn delta_psi(phi1: f64, phi2: f64) -> f64 {
    libm::log(libm::tan(phi2 / 2.0 + FRAC_PI_4) / libm::tan(phi1 / 2.0 + FRAC_PI_4))
}

/// The ratio of the latitude difference to the projected latitude difference,
/// the cosine of the latitude on an East-West course.
fn stretch(dphi: f64, dpsi: f64, phi1: f64) -> f64 {
    if libm::fabs(dpsi) > MIN_DELTA_PSI {
        dphi / dpsi
    } else {
        libm::cos(phi1)
    }
}

/// A position on a spherical Earth, joined to other positions by rhumb lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLonRhumb {
    lat_lon: LatLon,
    config: SphereConfig,
}

impl LatLonRhumb {
    /// Constructor.
    /// * `lat_lon` - the position.
    /// * `config` - the radius of the sphere.
    #[must_use]
    pub const fn new(lat_lon: LatLon, config: SphereConfig) -> Self {
        Self { lat_lon, config }
    }

    /// Construct a position on a sphere of the default Earth radius.
    #[must_use]
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self::new(LatLon::from_degrees(lat, lon), SphereConfig::default())
    }
}

impl GeodesicModel for LatLonRhumb {
    fn lat_lon(&self) -> LatLon {
        self.lat_lon
    }

    /// # Examples
    /// ```
    /// use geodensify::model::{GeodesicModel, LatLonRhumb};
    /// use geodensify::latlon::LatLon;
    ///
    /// let p1 = LatLonRhumb::from_degrees(51.127, 1.338);
    /// let p2 = LatLon::from_degrees(50.964, 1.853);
    /// assert_eq!(40308.0, p1.distance_to(&p2).0.round());
    /// ```
    fn distance_to(&self, dest: &LatLon) -> Metres {
        let phi1 = self.lat_lon.lat.0.to_radians();
        let phi2 = dest.lat.0.to_radians();
        let dphi = phi2 - phi1;
        let dlambda = longitude_difference(self.lat_lon.lon, dest.lon).0.to_radians();

        let q = stretch(dphi, delta_psi(phi1, phi2), phi1);
        let delta = libm::sqrt(dphi * dphi + q * q * dlambda * dlambda);
        Metres(delta * self.config.radius.0)
    }

    fn initial_bearing_to(&self, dest: &LatLon) -> Degrees {
        if self.lat_lon == *dest {
            return Degrees(f64::NAN);
        }

        let phi1 = self.lat_lon.lat.0.to_radians();
        let phi2 = dest.lat.0.to_radians();
        let dlambda = longitude_difference(self.lat_lon.lon, dest.lon).0.to_radians();

        let theta = libm::atan2(dlambda, delta_psi(phi1, phi2));
        wrap360(Degrees::from(Radians(theta)))
    }

    /// The bearing of a rhumb line is constant.
    fn final_bearing_on(&self, dest: &LatLon) -> Degrees {
        self.initial_bearing_to(dest)
    }

    fn destination_point(&self, distance: Metres, bearing: Degrees) -> LatLon {
        let phi1 = self.lat_lon.lat.0.to_radians();
        let lambda1 = self.lat_lon.lon.0.to_radians();
        let theta = bearing.0.to_radians();
        let delta = distance.0 / self.config.radius.0;

        let dphi = delta * libm::cos(theta);
        let mut phi2 = phi1 + dphi;
        // over a pole
        if libm::fabs(phi2) > FRAC_PI_2 {
            phi2 = if phi2 > 0.0 { PI - phi2 } else { -PI - phi2 };
        }

        let q = stretch(dphi, delta_psi(phi1, phi2), phi1);
        let dlambda = delta * libm::sin(theta) / q;
        LatLon::from_degrees(phi2.to_degrees(), (lambda1 + dlambda).to_degrees())
    }

    /// The point half way along the rhumb line, see
    /// [Rhumb lines](https://www.movable-type.co.uk/scripts/latlong.html#rhumblines).
    fn mid_point_to(&self, dest: &LatLon) -> LatLon {
        let phi1 = self.lat_lon.lat.0.to_radians();
        let lambda1 = self.lat_lon.lon.0.to_radians();
        let phi2 = dest.lat.0.to_radians();
        let lambda2 = lambda1 + longitude_difference(self.lat_lon.lon, dest.lon).0.to_radians();

        let phi3 = (phi1 + phi2) / 2.0;
        let f1 = libm::tan(FRAC_PI_4 + phi1 / 2.0);
        let f2 = libm::tan(FRAC_PI_4 + phi2 / 2.0);
        let f3 = libm::tan(FRAC_PI_4 + phi3 / 2.0);
        let mut lambda3 = ((lambda2 - lambda1) * libm::log(f3) + lambda1 * libm::log(f2)
            - lambda2 * libm::log(f1))
            / libm::log(f2 / f1);
        // along a parallel of latitude
        if !lambda3.is_finite() {
            lambda3 = (lambda1 + lambda2) / 2.0;
        }

        LatLon::from_degrees(phi3.to_degrees(), lambda3.to_degrees())
    }

    fn intermediate_point_to(&self, dest: &LatLon, fraction: f64) -> LatLon {
        if self.lat_lon == *dest {
            return self.lat_lon;
        }

        let distance = self.distance_to(dest);
        let bearing = self.initial_bearing_to(dest);
        self.destination_point(Metres(distance.0 * fraction), bearing)
    }

    /// The distance and bearing are calculated once, then the points are
    /// calculated in parallel.
    fn try_intermediate_points_to(
        &self,
        dest: &LatLon,
        fractions: &[f64],
        token: &CancellationToken,
    ) -> Result<Vec<LatLon>, Cancelled> {
        if self.lat_lon == *dest {
            token.check()?;
            return Ok(vec![self.lat_lon; fractions.len()]);
        }

        let distance = self.distance_to(dest);
        let bearing = self.initial_bearing_to(dest);
        fractions
            .par_iter()
            .map(|&fraction| -> Result<LatLon, Cancelled> {
                token.check()?;
                Ok(self.destination_point(Metres(distance.0 * fraction), bearing))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_distance_and_bearing() {
        let p1 = LatLonRhumb::from_degrees(51.127, 1.338);
        let p2 = LatLon::from_degrees(50.964, 1.853);

        let distance = p1.distance_to(&p2);
        assert!(is_within_tolerance(40_307.745, distance.0, 1e-3));
        assert_eq!(40308.0, libm::round(distance.0));

        let bearing = p1.initial_bearing_to(&p2);
        assert!(is_within_tolerance(116.721_86, bearing.0, 1e-5));
        assert_eq!(116.7, crate::angle::round_to(bearing, 1));
        assert_eq!(bearing.0, p1.final_bearing_on(&p2).0);

        assert_eq!(0.0, p1.distance_to(&p1.lat_lon()).0);
        assert!(p1.initial_bearing_to(&p1.lat_lon()).0.is_nan());
    }

    #[test]
    fn test_destination_point() {
        let p1 = LatLonRhumb::from_degrees(51.127, 1.338);
        let p2 = p1.destination_point(Metres(40_300.0), Degrees(116.7));
        assert!(is_within_tolerance(50.9642, p2.lat.0, 5e-5));
        assert!(is_within_tolerance(1.8530, p2.lon.0, 5e-5));

        // due East along the equator
        let p1 = LatLonRhumb::from_degrees(0.0, 179.0);
        let degree = 6_371_000.0 * PI / 180.0;
        let p2 = p1.destination_point(Metres(2.0 * degree), Degrees(90.0));
        assert!(is_within_tolerance(0.0, p2.lat.0, 1e-9));
        assert!(is_within_tolerance(-179.0, p2.lon.0, 1e-9));

        // over the North pole
        let p1 = LatLonRhumb::from_degrees(89.0, 0.0);
        let p2 = p1.destination_point(Metres(2.0 * degree), Degrees(0.0));
        assert!(is_within_tolerance(89.0, p2.lat.0, 1e-9));
    }

    #[test]
    fn test_mid_and_intermediate_points() {
        let p1 = LatLonRhumb::from_degrees(51.127, 1.338);
        let p2 = LatLon::from_degrees(50.964, 1.853);

        let mid = p1.mid_point_to(&p2);
        assert!(is_within_tolerance(51.0455, mid.lat.0, 5e-5));
        assert!(is_within_tolerance(1.5957, mid.lon.0, 5e-5));

        let half = p1.intermediate_point_to(&p2, 0.5);
        assert!(is_within_tolerance(51.0455, half.lat.0, 5e-5));
        assert!(is_within_tolerance(1.595_73, half.lon.0, 5e-6));

        let points = p1.intermediate_points_to(&p2, &[0.0, 0.5, 1.0]);
        assert_eq!(3, points.len());
        assert!(is_within_tolerance(half.lon.0, points[1].lon.0, 1e-12));
        assert!(is_within_tolerance(p2.lat.0, points[2].lat.0, 1e-9));
        assert!(is_within_tolerance(p2.lon.0, points[2].lon.0, 1e-9));

        // coincident points
        assert_eq!(p1.lat_lon(), p1.intermediate_point_to(&p1.lat_lon(), 0.5));
        let points = p1.intermediate_points_to(&p1.lat_lon(), &[0.25, 0.75]);
        assert_eq!(vec![p1.lat_lon(); 2], points);
    }

    #[test]
    fn test_antimeridian() {
        let p1 = LatLonRhumb::from_degrees(0.0, 170.0);
        let p2 = LatLon::from_degrees(0.0, -170.0);
        assert!(is_within_tolerance(90.0, p1.initial_bearing_to(&p2).0, 1e-9));

        let mid = p1.mid_point_to(&p2);
        assert!(is_within_tolerance(0.0, mid.lat.0, 1e-9));
        assert!(is_within_tolerance(180.0, libm::fabs(mid.lon.0), 1e-9));

        let p1 = LatLonRhumb::from_degrees(-70.0, -170.0);
        let p2 = LatLon::from_degrees(-60.0, 170.0);
        assert!(p1.initial_bearing_to(&p2).0 > 270.0);
        let mid = p1.mid_point_to(&p2);
        assert!(libm::fabs(mid.lon.0) > 170.0);
        let half = p1.intermediate_point_to(&p2, 0.5);
        assert!(libm::fabs(half.lon.0) > 170.0);
    }
}
