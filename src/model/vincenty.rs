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

//! The vincenty module contains `LatLonVincenty`: calculations along
//! geodesics on an ellipsoidal Earth using the iterative formulae of
//! T Vincenty, [Direct and Inverse Solutions of Geodesics on the Ellipsoid
//! with application of nested equations](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf),
//! Survey Review, vol XXIII no 176, 1975.
//!
//! The iterations do not converge for some nearly antipodal positions,
//! in which case the results are invalid (NaN).

#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::suboptimal_flops
)]

use super::{GeodesicModel, VincentyConfig};
use crate::angle::{longitude_difference, wrap360};
use crate::cancel::{Cancelled, CancellationToken};
use crate::latlon::LatLon;
use crate::{Angle, Degrees, Ellipsoid, Metres, Radians, Validate};
use core::f64::consts::{FRAC_PI_2, PI};
use log::debug;
use rayon::prelude::*;

/// The convergence criterion of the iterations, in radians.
const CONVERGENCE: f64 = 1e-12;

/// The maximum number of iterations of the direct solution.
const MAX_DIRECT_ITERATIONS: u32 = 100;

/// The maximum number of iterations of the inverse solution.
const MAX_INVERSE_ITERATIONS: u32 = 1000;

/// The sine and cosine of the parametric latitude of `lat`.
fn parametric_sin_cos(ellipsoid: &Ellipsoid, lat: Degrees) -> (f64, f64) {
    let beta = ellipsoid.calculate_parametric_latitude(Angle::from(lat));
    (beta.sin().0, beta.cos().0)
}

/// Vincenty's A and B coefficients.
fn calculate_a_b(u_sq: f64) -> (f64, f64) {
    let a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    (a, b)
}

/// The difference between the angular distances on the auxiliary sphere and
/// the ellipsoid.
fn calculate_delta_sigma(b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
    let cos_sq_2sigma_m = cos_2sigma_m * cos_2sigma_m;
    b * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_sq_2sigma_m)
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_sq_2sigma_m)))
}

/// A position on an ellipsoidal Earth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLonVincenty {
    lat_lon: LatLon,
    config: VincentyConfig,
}

impl LatLonVincenty {
    /// Constructor.
    /// * `lat_lon` - the position.
    /// * `config` - the ellipsoid.
    #[must_use]
    pub const fn new(lat_lon: LatLon, config: VincentyConfig) -> Self {
        Self { lat_lon, config }
    }

    /// Construct a position on the WGS-84 ellipsoid.
    #[must_use]
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self::new(LatLon::from_degrees(lat, lon), VincentyConfig::default())
    }

    /// The ellipsoid.
    #[must_use]
    pub const fn ellipsoid(&self) -> &Ellipsoid {
        &self.config.ellipsoid
    }

    /// Vincenty's direct solution: the destination point and final bearing
    /// after travelling `distance` along the geodesic starting on
    /// `initial_bearing`.
    /// * `distance` - the distance along the geodesic.
    /// * `initial_bearing` - the initial bearing in degrees from North.
    ///
    /// returns the destination point and final bearing, both invalid if the
    /// solution does not converge.
    ///
    /// # Examples
    /// ```
    /// use geodensify::model::LatLonVincenty;
    /// use geodensify::{Degrees, Metres};
    ///
    /// let p1 = LatLonVincenty::from_degrees(-37.95103, 144.42487);
    /// let (p2, final_bearing) = p1.direct(Metres(54_972.271), Degrees(306.86816));
    /// assert!((p2.lat.0 + 37.6528).abs() < 5e-5);
    /// assert!((p2.lon.0 - 143.9265).abs() < 5e-5);
    /// assert!((final_bearing.0 - 307.1736).abs() < 5e-5);
    /// ```
    #[must_use]
    pub fn direct(&self, distance: Metres, initial_bearing: Degrees) -> (LatLon, Degrees) {
        let ellipsoid = self.ellipsoid();
        let a = ellipsoid.a().0;
        let b = ellipsoid.b().0;
        let f = ellipsoid.f();

        let lambda1 = self.lat_lon.lon.0.to_radians();
        let alpha1 = initial_bearing.0.to_radians();
        let sin_alpha1 = libm::sin(alpha1);
        let cos_alpha1 = libm::cos(alpha1);
        let (sin_u1, cos_u1) = parametric_sin_cos(ellipsoid, self.lat_lon.lat);

        // angular distance on the sphere from the equator to the start
        let sigma1 = libm::atan2(sin_u1, cos_u1 * cos_alpha1);
        // azimuth of the geodesic at the equator
        let sin_alpha = cos_u1 * sin_alpha1;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let (big_a, big_b) = calculate_a_b(u_sq);

        let s_over_ba = distance.0 / (b * big_a);
        let mut sigma = s_over_ba;
        let mut sin_sigma;
        let mut cos_sigma;
        let mut cos_2sigma_m;
        let mut iterations = 0;
        loop {
            cos_2sigma_m = libm::cos(2.0 * sigma1 + sigma);
            sin_sigma = libm::sin(sigma);
            cos_sigma = libm::cos(sigma);
            let delta_sigma = calculate_delta_sigma(big_b, sin_sigma, cos_sigma, cos_2sigma_m);
            let previous = sigma;
            sigma = s_over_ba + delta_sigma;
            iterations += 1;
            if libm::fabs(sigma - previous) <= CONVERGENCE || iterations >= MAX_DIRECT_ITERATIONS
            {
                break;
            }
        }
        if iterations >= MAX_DIRECT_ITERATIONS {
            debug!(
                "Vincenty direct failed to converge from {}, distance: {}, bearing: {}",
                self.lat_lon, distance.0, initial_bearing.0
            );
            return (LatLon::invalid(), Degrees(f64::NAN));
        }

        let x = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
        let phi2 = libm::atan2(
            sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1,
            (1.0 - f) * libm::sqrt(sin_alpha * sin_alpha + x * x),
        );
        let lambda = libm::atan2(
            sin_sigma * sin_alpha1,
            cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1,
        );
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let l = lambda
            - (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
        let lambda2 = lambda1 + l;
        let alpha2 = libm::atan2(sin_alpha, -x);

        (
            LatLon::from_degrees(phi2.to_degrees(), lambda2.to_degrees()),
            wrap360(Degrees::from(Radians(alpha2))),
        )
    }

    /// Vincenty's inverse solution: the distance, initial and final bearings
    /// of the geodesic to `dest`.
    /// * `dest` - the destination point.
    ///
    /// returns the distance, initial bearing and final bearing.
    /// Coincident points have zero distance and invalid bearings.
    /// All are invalid if the solution does not converge.
    ///
    /// # Examples
    /// ```
    /// use geodensify::model::LatLonVincenty;
    /// use geodensify::latlon::LatLon;
    ///
    /// let p1 = LatLonVincenty::from_degrees(50.06632, -5.71475);
    /// let p2 = LatLon::from_degrees(58.64402, -3.07009);
    /// let (distance, initial_bearing, final_bearing) = p1.inverse(&p2);
    /// assert!((distance.0 - 969_954.166).abs() < 1e-3);
    /// assert!((initial_bearing.0 - 9.1419).abs() < 5e-5);
    /// assert!((final_bearing.0 - 11.2972).abs() < 5e-5);
    /// ```
    #[must_use]
    pub fn inverse(&self, dest: &LatLon) -> (Metres, Degrees, Degrees) {
        const INVALID: (Metres, Degrees, Degrees) =
            (Metres(f64::NAN), Degrees(f64::NAN), Degrees(f64::NAN));

        if self.lat_lon == *dest {
            return (Metres(0.0), Degrees(f64::NAN), Degrees(f64::NAN));
        }

        let ellipsoid = self.ellipsoid();
        let a = ellipsoid.a().0;
        let b = ellipsoid.b().0;
        let f = ellipsoid.f();

        let phi1 = self.lat_lon.lat.0.to_radians();
        let phi2 = dest.lat.0.to_radians();
        // difference in longitude
        let l = longitude_difference(self.lat_lon.lon, dest.lon).0.to_radians();
        let (sin_u1, cos_u1) = parametric_sin_cos(ellipsoid, self.lat_lon.lat);
        let (sin_u2, cos_u2) = parametric_sin_cos(ellipsoid, dest.lat);

        let is_antipodal = libm::fabs(l) > FRAC_PI_2 || libm::fabs(phi2 - phi1) > FRAC_PI_2;

        // difference in longitude on the auxiliary sphere
        let mut lambda = l;
        let mut sin_lambda;
        let mut cos_lambda;
        // angular distance on the sphere
        let mut sin_sq_sigma;
        let mut sigma = if is_antipodal { PI } else { 0.0 };
        let mut sin_sigma = 0.0;
        let mut cos_sigma = if is_antipodal { -1.0 } else { 1.0 };
        // angular distance from the equator to the mid point
        let mut cos_2sigma_m = 1.0;
        // azimuth of the geodesic at the equator
        let mut sin_alpha;
        let mut cos_sq_alpha = 1.0;
        let mut iterations = 0;
        loop {
            sin_lambda = libm::sin(lambda);
            cos_lambda = libm::cos(lambda);
            let y = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
            sin_sq_sigma = (cos_u2 * sin_lambda) * (cos_u2 * sin_lambda) + y * y;
            if libm::fabs(sin_sq_sigma) < f64::EPSILON {
                // coincident or antipodal points
                break;
            }

            sin_sigma = libm::sqrt(sin_sq_sigma);
            cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            sigma = libm::atan2(sin_sigma, cos_sigma);
            sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
            // on the equator cos_sq_alpha is zero
            cos_2sigma_m = if cos_sq_alpha == 0.0 {
                0.0
            } else {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            };
            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
            let previous = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

            let iteration_check = if is_antipodal {
                libm::fabs(lambda) - PI
            } else {
                libm::fabs(lambda)
            };
            if iteration_check > PI {
                debug!(
                    "Vincenty inverse lambda > pi from {} to {}",
                    self.lat_lon, dest
                );
                return INVALID;
            }

            iterations += 1;
            if libm::fabs(lambda - previous) <= CONVERGENCE
                || iterations >= MAX_INVERSE_ITERATIONS
            {
                break;
            }
        }
        if iterations >= MAX_INVERSE_ITERATIONS {
            debug!(
                "Vincenty inverse failed to converge from {} to {}",
                self.lat_lon, dest
            );
            return INVALID;
        }

        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let (big_a, big_b) = calculate_a_b(u_sq);
        let delta_sigma = calculate_delta_sigma(big_b, sin_sigma, cos_sigma, cos_2sigma_m);
        // length of the geodesic
        let s = b * big_a * (sigma - delta_sigma);

        let has_azimuths = libm::fabs(sin_sq_sigma) >= f64::EPSILON;
        let alpha1 = if has_azimuths {
            libm::atan2(
                cos_u2 * sin_lambda,
                cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda,
            )
        } else {
            0.0
        };
        let alpha2 = if has_azimuths {
            libm::atan2(
                cos_u1 * sin_lambda,
                -sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda,
            )
        } else {
            PI
        };

        if libm::fabs(s) < f64::EPSILON {
            (Metres(s), Degrees(f64::NAN), Degrees(f64::NAN))
        } else {
            (
                Metres(s),
                wrap360(Degrees::from(Radians(alpha1))),
                wrap360(Degrees::from(Radians(alpha2))),
            )
        }
    }
}

impl GeodesicModel for LatLonVincenty {
    fn lat_lon(&self) -> LatLon {
        self.lat_lon
    }

    fn distance_to(&self, dest: &LatLon) -> Metres {
        self.inverse(dest).0
    }

    fn initial_bearing_to(&self, dest: &LatLon) -> Degrees {
        self.inverse(dest).1
    }

    fn final_bearing_on(&self, dest: &LatLon) -> Degrees {
        self.inverse(dest).2
    }

    fn destination_point(&self, distance: Metres, bearing: Degrees) -> LatLon {
        self.direct(distance, bearing).0
    }

    fn intermediate_point_to(&self, dest: &LatLon, fraction: f64) -> LatLon {
        if self.lat_lon == *dest {
            return self.lat_lon;
        }

        let (distance, bearing, _) = self.inverse(dest);
        if !distance.0.is_finite() {
            return LatLon::invalid();
        }
        self.direct(Metres(distance.0 * fraction), bearing).0
    }

    /// The inverse solution is calculated once, then the direct solutions
    /// are calculated in parallel.
    fn try_intermediate_points_to(
        &self,
        dest: &LatLon,
        fractions: &[f64],
        token: &CancellationToken,
    ) -> Result<Vec<LatLon>, Cancelled> {
        token.check()?;
        if self.lat_lon == *dest {
            return Ok(vec![self.lat_lon; fractions.len()]);
        }

        let (distance, bearing, _) = self.inverse(dest);
        fractions
            .par_iter()
            .map(|&fraction| -> Result<LatLon, Cancelled> {
                token.check()?;
                let point = self.direct(Metres(distance.0 * fraction), bearing).0;
                Ok(if point.is_valid() {
                    point
                } else {
                    LatLon::invalid()
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_inverse() {
        let p1 = LatLonVincenty::from_degrees(-37.951_033_42, 144.424_867_89);
        let p2 = LatLon::from_degrees(-37.652_821_14, 143.926_495_54);
        let (distance, initial_bearing, final_bearing) = p1.inverse(&p2);
        assert!(is_within_tolerance(54_972.271, distance.0, 1e-3));
        assert!(is_within_tolerance(306.868_16, initial_bearing.0, 1e-5));
        assert!(is_within_tolerance(307.173_63, final_bearing.0, 1e-5));

        let p1 = LatLonVincenty::from_degrees(0.0, 0.0);
        let p2 = LatLon::from_degrees(0.0, 1.0);
        let (distance, initial_bearing, final_bearing) = p1.inverse(&p2);
        assert!(is_within_tolerance(111_319.491, distance.0, 1e-3));
        assert!(is_within_tolerance(90.0, initial_bearing.0, 1e-9));
        assert!(is_within_tolerance(90.0, final_bearing.0, 1e-9));

        let p1 = LatLonVincenty::from_degrees(52.205, 0.119);
        let p2 = LatLon::from_degrees(48.857, 2.351);
        assert!(is_within_tolerance(404_607.806, p1.distance_to(&p2).0, 1e-3));
    }

    #[test]
    fn test_inverse_coincident_and_nearly_antipodal() {
        let p1 = LatLonVincenty::from_degrees(51.5, -0.1);
        let (distance, initial_bearing, final_bearing) = p1.inverse(&p1.lat_lon());
        assert_eq!(0.0, distance.0);
        assert!(initial_bearing.0.is_nan());
        assert!(final_bearing.0.is_nan());

        // fails to converge
        let p1 = LatLonVincenty::from_degrees(0.0, 0.0);
        let p2 = LatLon::from_degrees(0.5, 179.7);
        let (distance, initial_bearing, final_bearing) = p1.inverse(&p2);
        assert!(distance.0.is_nan());
        assert!(initial_bearing.0.is_nan());
        assert!(final_bearing.0.is_nan());
        assert!(!p1.intermediate_point_to(&p2, 0.5).is_valid());
    }

    #[test]
    fn test_direct() {
        let p1 = LatLonVincenty::from_degrees(-37.951_03, 144.424_87);
        let (p2, final_bearing) = p1.direct(Metres(54_972.271), Degrees(306.868_16));
        assert!(is_within_tolerance(-37.6528, p2.lat.0, 5e-5));
        assert!(is_within_tolerance(143.9265, p2.lon.0, 5e-5));
        assert!(is_within_tolerance(307.1736, final_bearing.0, 5e-5));

        // due East along the equator
        let p1 = LatLonVincenty::from_degrees(0.0, 0.0);
        let p2 = p1.destination_point(Metres(111_319.490_793_273_57), Degrees(90.0));
        assert!(is_within_tolerance(0.0, p2.lat.0, 1e-9));
        assert!(is_within_tolerance(1.0, p2.lon.0, 1e-9));
    }

    #[test]
    fn test_intermediate_points() {
        let p1 = LatLonVincenty::from_degrees(50.066_32, -5.714_75);
        let p2 = LatLon::from_degrees(58.644_02, -3.070_09);

        let end = p1.intermediate_point_to(&p2, 1.0);
        assert!(is_within_tolerance(p2.lat.0, end.lat.0, 1e-8));
        assert!(is_within_tolerance(p2.lon.0, end.lon.0, 1e-8));

        let mid = p1.mid_point_to(&p2);
        let distance = p1.distance_to(&p2).0;
        let d1 = p1.distance_to(&mid).0;
        let d2 = LatLonVincenty::from_degrees(mid.lat.0, mid.lon.0)
            .distance_to(&p2)
            .0;
        assert!(is_within_tolerance(distance / 2.0, d1, 1e-3));
        assert!(is_within_tolerance(distance / 2.0, d2, 1e-3));

        let points = p1.intermediate_points_to(&p2, &[0.0, 0.5, 1.0]);
        assert_eq!(3, points.len());
        assert!(is_within_tolerance(p1.lat_lon().lat.0, points[0].lat.0, 1e-12));
        assert!(is_within_tolerance(mid.lat.0, points[1].lat.0, 1e-12));
        assert!(is_within_tolerance(mid.lon.0, points[1].lon.0, 1e-12));

        // coincident points
        assert_eq!(p1.lat_lon(), p1.intermediate_point_to(&p1.lat_lon(), 0.5));
    }
}
