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

//! The spherical module contains `LatLonSpherical`: calculations along great
//! circles on a spherical Earth.
//!
//! See: [Movable Type Scripts](https://www.movable-type.co.uk/scripts/latlong.html).

#![allow(clippy::float_cmp, clippy::suboptimal_flops, clippy::similar_names)]

use super::{GeodesicModel, SphereConfig};
use crate::angle::{longitude_difference, wrap360};
use crate::latlon::LatLon;
use crate::vector;
use crate::{Angle, Degrees, Metres};
use core::f64::consts::PI;
use unit_sphere::great_circle;

/// A position on a spherical Earth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLonSpherical {
    lat_lon: LatLon,
    config: SphereConfig,
}

/// The haversine angle between a pair of positions in radians.
fn angular_distance(a: &LatLon, b: &LatLon) -> f64 {
    let phi1 = a.lat.0.to_radians();
    let phi2 = b.lat.0.to_radians();
    let sin_half_dphi = libm::sin((phi2 - phi1) / 2.0);
    let sin_half_dlambda = libm::sin((b.lon.0.to_radians() - a.lon.0.to_radians()) / 2.0);

    let h = sin_half_dphi * sin_half_dphi
        + libm::cos(phi1) * libm::cos(phi2) * sin_half_dlambda * sin_half_dlambda;
    2.0 * libm::atan2(libm::sqrt(h), libm::sqrt(1.0 - h))
}

impl LatLonSpherical {
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

    /// The radius of the sphere.
    #[must_use]
    pub const fn radius(&self) -> Metres {
        self.config.radius
    }

    /// The intersection of the great circle paths from this point on
    /// `bearing1` and from `other` on `bearing2`.
    /// * `bearing1` - the initial bearing from this point.
    /// * `other` - the start of the second path.
    /// * `bearing2` - the initial bearing from `other`.
    ///
    /// returns this point if the start points coincide, or an invalid
    /// position if there are infinite or ambiguous intersections.
    ///
    /// # Examples
    /// ```
    /// use geodensify::model::LatLonSpherical;
    /// use geodensify::latlon::LatLon;
    /// use geodensify::Degrees;
    ///
    /// let p1 = LatLonSpherical::from_degrees(51.8853, 0.2545);
    /// let p2 = LatLon::from_degrees(49.0034, 2.5735);
    /// let p = p1.intersection(Degrees(108.547), &p2, Degrees(32.435));
    /// assert!((p.lat.0 - 50.9078).abs() < 5e-5);
    /// assert!((p.lon.0 - 4.5084).abs() < 5e-5);
    /// ```
    #[must_use]
    pub fn intersection(&self, bearing1: Degrees, other: &LatLon, bearing2: Degrees) -> LatLon {
        let phi1 = self.lat_lon.lat.0.to_radians();
        let lambda1 = self.lat_lon.lon.0.to_radians();
        let phi2 = other.lat.0.to_radians();
        let lambda2 = other.lon.0.to_radians();
        let theta13 = bearing1.0.to_radians();
        let theta23 = bearing2.0.to_radians();

        let delta12 = angular_distance(&self.lat_lon, other);
        if libm::fabs(delta12) < f64::EPSILON {
            return self.lat_lon;
        }

        // initial and final bearings between the points
        let cos_theta_a = (libm::sin(phi2) - libm::sin(phi1) * libm::cos(delta12))
            / (libm::sin(delta12) * libm::cos(phi1));
        let cos_theta_b = (libm::sin(phi1) - libm::sin(phi2) * libm::cos(delta12))
            / (libm::sin(delta12) * libm::cos(phi2));
        let theta_a = libm::acos(cos_theta_a.clamp(-1.0, 1.0));
        let theta_b = libm::acos(cos_theta_b.clamp(-1.0, 1.0));

        let sin_dlambda = libm::sin(lambda2 - lambda1);
        let theta12 = if sin_dlambda > 0.0 {
            theta_a
        } else {
            2.0 * PI - theta_a
        };
        let theta21 = if sin_dlambda > 0.0 {
            2.0 * PI - theta_b
        } else {
            theta_b
        };

        let alpha1 = theta13 - theta12; // angle 2-1-3
        let alpha2 = theta21 - theta23; // angle 1-2-3

        let sin_alpha1 = libm::sin(alpha1);
        let sin_alpha2 = libm::sin(alpha2);
        if sin_alpha1 == 0.0 && sin_alpha2 == 0.0 {
            // infinite intersections
            return LatLon::invalid();
        }
        if sin_alpha1 * sin_alpha2 < 0.0 {
            // ambiguous intersection, antipodal or behind
            return LatLon::invalid();
        }

        let cos_alpha3 = -libm::cos(alpha1) * libm::cos(alpha2)
            + sin_alpha1 * sin_alpha2 * libm::cos(delta12);
        let delta13 = libm::atan2(
            libm::sin(delta12) * sin_alpha1 * sin_alpha2,
            libm::cos(alpha2) + libm::cos(alpha1) * cos_alpha3,
        );
        let phi3 = libm::asin(
            (libm::sin(phi1) * libm::cos(delta13)
                + libm::cos(phi1) * libm::sin(delta13) * libm::cos(theta13))
            .clamp(-1.0, 1.0),
        );
        let dlambda13 = libm::atan2(
            libm::sin(theta13) * libm::sin(delta13) * libm::cos(phi1),
            libm::cos(delta13) - libm::sin(phi1) * libm::sin(phi3),
        );

        LatLon::from_degrees(phi3.to_degrees(), (lambda1 + dlambda13).to_degrees())
    }
}

impl GeodesicModel for LatLonSpherical {
    fn lat_lon(&self) -> LatLon {
        self.lat_lon
    }

    fn distance_to(&self, dest: &LatLon) -> Metres {
        let dlon = longitude_difference(self.lat_lon.lon, dest.lon);
        let arc = great_circle::calculate_gc_distance(
            Angle::from(self.lat_lon.lat),
            Angle::from(dest.lat),
            Angle::from(dlon),
        );
        Metres(self.config.radius.0 * arc.0)
    }

    fn initial_bearing_to(&self, dest: &LatLon) -> Degrees {
        if self.lat_lon == *dest {
            return Degrees(f64::NAN);
        }

        let dlon = longitude_difference(self.lat_lon.lon, dest.lon);
        let azimuth = great_circle::calculate_gc_azimuth(
            Angle::from(self.lat_lon.lat),
            Angle::from(dest.lat),
            Angle::from(dlon),
        );
        wrap360(Degrees::from(azimuth))
    }

    fn final_bearing_on(&self, dest: &LatLon) -> Degrees {
        let reverse = Self::new(*dest, self.config).initial_bearing_to(&self.lat_lon);
        wrap360(Degrees(reverse.0 + 180.0))
    }

    fn destination_point(&self, distance: Metres, bearing: Degrees) -> LatLon {
        let delta = distance.0 / self.config.radius.0;
        let theta = bearing.0.to_radians();
        let phi1 = self.lat_lon.lat.0.to_radians();
        let lambda1 = self.lat_lon.lon.0.to_radians();

        let sin_phi2 = libm::sin(phi1) * libm::cos(delta)
            + libm::cos(phi1) * libm::sin(delta) * libm::cos(theta);
        let phi2 = libm::asin(sin_phi2);
        let y = libm::sin(theta) * libm::sin(delta) * libm::cos(phi1);
        let x = libm::cos(delta) - libm::sin(phi1) * sin_phi2;
        let lambda2 = lambda1 + libm::atan2(y, x);

        LatLon::from_degrees(phi2.to_degrees(), lambda2.to_degrees())
    }

    /// The mid point is the sum of the vectors to the points.
    fn mid_point_to(&self, dest: &LatLon) -> LatLon {
        let dlon = longitude_difference(self.lat_lon.lon, dest.lon);

        // place this point on the prime meridian
        let a = vector::to_point(self.lat_lon.lat, Degrees(0.0));
        let b = vector::to_point(dest.lat, dlon);
        let c = a + b;

        LatLon::from_degrees(
            vector::latitude(&c).0,
            self.lat_lon.lon.0 + vector::longitude(&c).0,
        )
    }

    fn intermediate_point_to(&self, dest: &LatLon, fraction: f64) -> LatLon {
        if self.lat_lon == *dest {
            return self.lat_lon;
        }

        let delta = angular_distance(&self.lat_lon, dest);
        let sin_delta = libm::sin(delta);
        let a = libm::sin((1.0 - fraction) * delta) / sin_delta;
        let b = libm::sin(fraction * delta) / sin_delta;

        let point = vector::to_point(self.lat_lon.lat, self.lat_lon.lon) * a
            + vector::to_point(dest.lat, dest.lon) * b;
        vector::to_lat_lon(&point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Validate;
    use angle_sc::is_within_tolerance;

    /// The length of a degree of a great circle on the default sphere.
    const DEFAULT_DEGREE: f64 = 6_371_000.0 * PI / 180.0;

    #[test]
    fn test_distance_and_bearings() {
        let p1 = LatLonSpherical::from_degrees(52.205, 0.119);
        let p2 = LatLon::from_degrees(48.857, 2.351);

        assert!(is_within_tolerance(404_279.164, p1.distance_to(&p2).0, 1e-3));
        assert!(is_within_tolerance(156.2, p1.initial_bearing_to(&p2).0, 0.05));
        assert!(is_within_tolerance(157.9, p1.final_bearing_on(&p2).0, 0.05));

        let p1 = LatLonSpherical::new(
            LatLon::from_degrees(52.205, 0.119),
            SphereConfig::new(Metres(3959.0)),
        );
        assert_eq!(Metres(3959.0), p1.radius());
        assert!(is_within_tolerance(251.2229, p1.distance_to(&p2).0, 1e-4));

        // coincident points
        assert_eq!(0.0, p1.distance_to(&p1.lat_lon()).0);
        assert!(p1.initial_bearing_to(&p1.lat_lon()).0.is_nan());
        assert!(p1.final_bearing_on(&p1.lat_lon()).0.is_nan());
    }

    #[test]
    fn test_antimeridian() {
        let p1 = LatLonSpherical::from_degrees(0.0, 170.0);
        let p2 = LatLon::from_degrees(0.0, -170.0);

        let expected = DEFAULT_DEGREE * 20.0;
        assert!(is_within_tolerance(expected, p1.distance_to(&p2).0, 1e-6));
        assert!(is_within_tolerance(90.0, p1.initial_bearing_to(&p2).0, 1e-9));
        assert!(is_within_tolerance(90.0, p1.final_bearing_on(&p2).0, 1e-9));

        let mid = p1.mid_point_to(&p2);
        assert!(is_within_tolerance(0.0, mid.lat.0, 1e-9));
        assert!(is_within_tolerance(180.0, libm::fabs(mid.lon.0), 1e-9));

        let quarter = p1.intermediate_point_to(&p2, 0.25);
        assert!(is_within_tolerance(175.0, quarter.lon.0, 1e-9));
    }

    #[test]
    fn test_mid_and_intermediate_points() {
        let p1 = LatLonSpherical::from_degrees(52.205, 0.119);
        let p2 = LatLon::from_degrees(48.857, 2.351);

        let mid = p1.mid_point_to(&p2);
        assert!(is_within_tolerance(50.536_327, mid.lat.0, 1e-6));
        assert!(is_within_tolerance(1.274_614, mid.lon.0, 1e-6));

        let half = p1.intermediate_point_to(&p2, 0.5);
        assert!(is_within_tolerance(mid.lat.0, half.lat.0, 1e-9));
        assert!(is_within_tolerance(mid.lon.0, half.lon.0, 1e-9));

        let quarter = p1.intermediate_point_to(&p2, 0.25);
        assert!(is_within_tolerance(51.372_084, quarter.lat.0, 1e-6));
        assert!(is_within_tolerance(0.707_337, quarter.lon.0, 1e-6));

        let start = p1.intermediate_point_to(&p2, 0.0);
        assert!(is_within_tolerance(52.205, start.lat.0, 1e-12));
        let end = p1.intermediate_point_to(&p2, 1.0);
        assert!(is_within_tolerance(2.351, end.lon.0, 1e-12));

        // coincident points
        assert_eq!(p1.lat_lon(), p1.intermediate_point_to(&p1.lat_lon(), 0.5));
    }

    #[test]
    fn test_destination_point() {
        let p1 = LatLonSpherical::from_degrees(51.477_88, -0.001_47);
        let p2 = p1.destination_point(Metres(7794.0), Degrees(300.7));
        assert!(is_within_tolerance(51.5136, p2.lat.0, 5e-5));
        assert!(is_within_tolerance(-0.0983, p2.lon.0, 5e-5));

        // there and back again
        let p3 = LatLon::from_degrees(48.857, 2.351);
        let p1 = LatLonSpherical::from_degrees(52.205, 0.119);
        let p4 = p1.destination_point(p1.distance_to(&p3), p1.initial_bearing_to(&p3));
        assert!(is_within_tolerance(p3.lat.0, p4.lat.0, 1e-9));
        assert!(is_within_tolerance(p3.lon.0, p4.lon.0, 1e-9));
    }

    #[test]
    fn test_intersection() {
        let p1 = LatLonSpherical::from_degrees(51.8853, 0.2545);
        let p2 = LatLon::from_degrees(49.0034, 2.5735);

        let p = p1.intersection(Degrees(108.547), &p2, Degrees(32.435));
        assert!(is_within_tolerance(50.9078, p.lat.0, 5e-5));
        assert!(is_within_tolerance(4.5084, p.lon.0, 5e-5));

        // coincident start points
        let p = p1.intersection(Degrees(108.547), &p1.lat_lon(), Degrees(32.435));
        assert_eq!(p1.lat_lon(), p);

        // meridians meet at the pole
        let p0 = LatLonSpherical::from_degrees(0.0, 0.0);
        let p = p0.intersection(Degrees(0.0), &LatLon::from_degrees(0.0, 10.0), Degrees(0.0));
        assert!(is_within_tolerance(90.0, p.lat.0, 1e-9));

        // paths away from each other meet on the other side of the Earth
        let p = p1.intersection(Degrees(288.547), &p2, Degrees(212.435));
        assert!(is_within_tolerance(-50.9078, p.lat.0, 5e-5));
        assert!(is_within_tolerance(-175.4916, p.lon.0, 5e-5));

        // ambiguous intersection
        let p = p1.intersection(Degrees(108.547), &p2, Degrees(212.435));
        assert!(!p.is_valid());
    }
}
