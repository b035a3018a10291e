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

//! The cartesian module contains conversions between geodetic positions
//! with a height above an `Ellipsoid` and ECEF (earth-centred earth-fixed)
//! geocentric cartesian coordinates.

#![allow(clippy::suboptimal_flops, clippy::similar_names)]

use crate::ellipsoid::calculate_prime_vertical_radius;
use crate::latlon::LatLon;
use crate::vector::Vector3d;
use crate::{Degrees, Ellipsoid, Metres, Radians, WGS84_ELLIPSOID};

/// A geodetic position with a height above an `Ellipsoid`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLonEllipsoidal {
    /// The geodetic latitude and longitude.
    pub lat_lon: LatLon,
    /// The height above the ellipsoid.
    pub height: Metres,
    /// The ellipsoid.
    pub ellipsoid: Ellipsoid,
}

impl LatLonEllipsoidal {
    /// Constructor.
    /// * `lat_lon` - the geodetic latitude and longitude.
    /// * `height` - the height above the ellipsoid.
    /// * `ellipsoid` - the ellipsoid.
    #[must_use]
    pub const fn new(lat_lon: LatLon, height: Metres, ellipsoid: Ellipsoid) -> Self {
        Self {
            lat_lon,
            height,
            ellipsoid,
        }
    }

    /// Construct a position on the surface of the WGS-84 ellipsoid.
    #[must_use]
    pub fn wgs84(lat_lon: LatLon) -> Self {
        Self::new(lat_lon, Metres(0.0), *WGS84_ELLIPSOID)
    }

    /// Convert to ECEF coordinates.
    ///
    /// # Examples
    /// ```
    /// use geodensify::cartesian::LatLonEllipsoidal;
    /// use geodensify::latlon::LatLon;
    ///
    /// let p = LatLonEllipsoidal::wgs84(LatLon::from_degrees(45.0, 45.0));
    /// let c = p.to_cartesian();
    /// assert!((c.0.x - 3_194_419.145).abs() < 1e-3);
    /// assert!((c.0.z - 4_487_348.409).abs() < 1e-3);
    /// ```
    #[must_use]
    pub fn to_cartesian(&self) -> Cartesian {
        let phi = self.lat_lon.lat.0.to_radians();
        let lambda = self.lat_lon.lon.0.to_radians();
        let h = self.height.0;
        let e_2 = self.ellipsoid.e_2();

        let sin_phi = libm::sin(phi);
        let cos_phi = libm::cos(phi);
        let nu = calculate_prime_vertical_radius(self.ellipsoid.a(), e_2, sin_phi).0;

        Cartesian(Vector3d::new(
            (nu + h) * cos_phi * libm::cos(lambda),
            (nu + h) * cos_phi * libm::sin(lambda),
            (nu * (1.0 - e_2) + h) * sin_phi,
        ))
    }
}

/// ECEF geocentric cartesian coordinates in metres from the centre of the
/// Earth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cartesian(pub Vector3d);

impl Cartesian {
    /// Convert to a geodetic position on `ellipsoid`, using Bowring's
    /// (1985) formulation for μm precision.
    /// * `ellipsoid` - the ellipsoid of the geodetic position.
    #[must_use]
    pub fn to_lat_lon_ellipsoidal(&self, ellipsoid: &Ellipsoid) -> LatLonEllipsoidal {
        let (x, y, z) = (self.0.x, self.0.y, self.0.z);
        let a = ellipsoid.a().0;
        let b = ellipsoid.b().0;
        let e_2 = ellipsoid.e_2();
        let ep_2 = ellipsoid.ep_2();

        // distance from the minor axis
        let p = libm::hypot(x, y);
        // polar radius
        let r = libm::hypot(p, z);

        // parametric latitude, Bowring eqn 17
        let tan_beta = (b * z) / (a * p) * (1.0 + ep_2 * b / r);
        let sin_beta = tan_beta / libm::sqrt(1.0 + tan_beta * tan_beta);
        let cos_beta = sin_beta / tan_beta;

        // geodetic latitude, Bowring eqn 18
        let phi = if cos_beta.is_nan() {
            0.0
        } else {
            libm::atan2(
                z + ep_2 * b * sin_beta * sin_beta * sin_beta,
                p - e_2 * a * cos_beta * cos_beta * cos_beta,
            )
        };
        let lambda = libm::atan2(y, x);

        // height above the ellipsoid, Bowring eqn 7
        let sin_phi = libm::sin(phi);
        let cos_phi = libm::cos(phi);
        let nu = calculate_prime_vertical_radius(ellipsoid.a(), e_2, sin_phi).0;
        let h = p * cos_phi + z * sin_phi - (a * a / nu);

        LatLonEllipsoidal::new(
            LatLon::new(Degrees::from(Radians(phi)), Degrees::from(Radians(lambda))),
            Metres(h),
            *ellipsoid,
        )
    }
}

impl From<&LatLonEllipsoidal> for Cartesian {
    fn from(a: &LatLonEllipsoidal) -> Self {
        a.to_cartesian()
    }
}
