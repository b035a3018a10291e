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

//! The planar module contains `LatLonPlanar`: calculations along straight
//! lines in latitude/longitude space.
//!
//! Distances are approximated from tabulated lengths of a degree of
//! longitude at each whole degree of latitude, so the model is only
//! suitable for short distances. Longitudes still wrap across the
//! antimeridian.

#![allow(clippy::float_cmp, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use super::GeodesicModel;
use crate::angle::{longitude_difference, wrap180, wrap360, wrap90};
use crate::cancel::{Cancelled, CancellationToken};
use crate::latlon::LatLon;
use crate::{Degrees, Metres};

/// The length of a degree of latitude, in metres.
pub const METRES_PER_DEGREE_LAT: f64 = 111_195.0;

/// The length of a degree of longitude at each whole degree of latitude,
/// in metres.
const LNG_DISTANCES: [f64; 91] = [
    111_195.0, 111_178.0, 111_127.0, 111_043.0, 110_924.0, 110_772.0, 110_586.0, 110_366.0,
    110_113.0, 109_826.0, 109_506.0, 109_152.0, 108_765.0, 108_345.0, 107_892.0, 107_406.0,
    106_887.0, 106_336.0, 105_753.0, 105_137.0, 104_489.0, 103_809.0, 103_098.0, 102_355.0,
    101_581.0, 100_777.0, 99_941.0, 99_075.0, 98_179.0, 97_253.0, 96_297.0, 95_312.0, 94_298.0,
    93_256.0, 92_184.0, 91_085.0, 89_958.0, 88_804.0, 87_622.0, 86_414.0, 85_180.0, 83_919.0,
    82_633.0, 81_322.0, 79_986.0, 78_626.0, 77_242.0, 75_834.0, 74_403.0, 72_950.0, 71_474.0,
    69_977.0, 68_458.0, 66_918.0, 65_358.0, 63_778.0, 62_179.0, 60_561.0, 58_924.0, 57_269.0,
    55_597.0, 53_908.0, 52_202.0, 50_481.0, 48_744.0, 46_993.0, 45_227.0, 43_447.0, 41_654.0,
    39_848.0, 38_030.0, 36_201.0, 34_361.0, 32_510.0, 30_649.0, 28_779.0, 26_900.0, 25_013.0,
    23_118.0, 21_217.0, 19_309.0, 17_395.0, 15_475.0, 13_551.0, 11_623.0, 9_691.0, 7_756.0,
    5_819.0, 3_881.0, 1_941.0, 20.0,
];

/// The length of a degree of longitude at the mean of latitudes `lat1` and
/// `lat2`, rounded to a whole degree.
#[must_use]
fn lng_distance(lat1: Degrees, lat2: Degrees) -> f64 {
    let mean = libm::round(libm::fabs(lat1.0 + lat2.0) / 2.0);
    if mean.is_finite() && mean <= 90.0 {
        LNG_DISTANCES[mean as usize]
    } else {
        METRES_PER_DEGREE_LAT
    }
}

/// A position on a latitude/longitude plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLonPlanar {
    lat_lon: LatLon,
}

impl LatLonPlanar {
    #[must_use]
    pub const fn new(lat_lon: LatLon) -> Self {
        Self { lat_lon }
    }

    #[must_use]
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self::new(LatLon::from_degrees(lat, lon))
    }

    /// The differences in longitude and latitude to `dest` in degrees,
    /// taking the shorter path across the antimeridian.
    fn deltas_to(&self, dest: &LatLon) -> (f64, f64) {
        let dx = longitude_difference(wrap180(self.lat_lon.lon), wrap180(dest.lon)).0;
        let dy = wrap90(dest.lat).0 - wrap90(self.lat_lon.lat).0;
        (dx, dy)
    }
}

impl GeodesicModel for LatLonPlanar {
    fn lat_lon(&self) -> LatLon {
        self.lat_lon
    }

    fn distance_to(&self, dest: &LatLon) -> Metres {
        let (dx, dy) = self.deltas_to(dest);
        let dy = libm::fabs(dy) * METRES_PER_DEGREE_LAT;
        let dx = dx * lng_distance(wrap90(self.lat_lon.lat), wrap90(dest.lat));
        Metres(libm::hypot(dx, dy))
    }

    /// The bearing of the straight line to `dest` in degrees of latitude and
    /// longitude, i.e. unscaled by the length of a degree of longitude.
    fn initial_bearing_to(&self, dest: &LatLon) -> Degrees {
        let (dx, dy) = self.deltas_to(dest);
        if dx == 0.0 {
            return if dy == 0.0 {
                Degrees(f64::NAN)
            } else if dy > 0.0 {
                Degrees(0.0)
            } else {
                Degrees(180.0)
            };
        }

        let bearing = 90.0 - libm::atan(dy / dx).to_degrees();
        wrap360(Degrees(if dx < 0.0 { bearing + 180.0 } else { bearing }))
    }

    /// The bearing is constant along a straight line.
    fn final_bearing_on(&self, dest: &LatLon) -> Degrees {
        self.initial_bearing_to(dest)
    }

    fn destination_point(&self, distance: Metres, bearing: Degrees) -> LatLon {
        let theta = bearing.0.to_radians();
        let lat1 = self.lat_lon.lat;
        let lat2 = Degrees(lat1.0 + distance.0 * libm::cos(theta) / METRES_PER_DEGREE_LAT);
        let dlon = distance.0 * libm::sin(theta) / lng_distance(lat1, lat2);
        LatLon::new(wrap90(lat2), wrap180(Degrees(self.lat_lon.lon.0 + dlon)))
    }

    fn intermediate_point_to(&self, dest: &LatLon, fraction: f64) -> LatLon {
        let (dx, dy) = self.deltas_to(dest);
        let lat = wrap90(Degrees(self.lat_lon.lat.0 + dy * fraction));

        // longitudes are undefined at the poles
        if libm::fabs(dest.lat.0) == 90.0 {
            LatLon::new(lat, self.lat_lon.lon)
        } else if libm::fabs(self.lat_lon.lat.0) == 90.0 {
            LatLon::new(lat, dest.lon)
        } else {
            LatLon::new(lat, wrap180(Degrees(self.lat_lon.lon.0 + dx * fraction)))
        }
    }

    /// The points are cheap to calculate, so they are calculated in sequence.
    fn try_intermediate_points_to(
        &self,
        dest: &LatLon,
        fractions: &[f64],
        token: &CancellationToken,
    ) -> Result<Vec<LatLon>, Cancelled> {
        fractions
            .iter()
            .map(|&fraction| -> Result<LatLon, Cancelled> {
                token.check()?;
                Ok(self.intermediate_point_to(dest, fraction))
            })
            .collect()
    }
}
