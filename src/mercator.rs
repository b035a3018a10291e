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

//! The mercator module converts positions to and from normalised
//! [Web Mercator](https://en.wikipedia.org/wiki/Web_Mercator_projection)
//! coordinates.
//!
//! The projected coordinates are in the range [0, 1]: x increases eastward
//! from the antimeridian and y increases northward from `-MERCATOR_MAX_LAT`.

use crate::latlon::LatLon;
use crate::{Degrees, Radians, Validate};
use core::f64::consts::{FRAC_PI_4, PI};

/// The maximum latitude that can be projected, in degrees.
/// The latitude at which the projection is square.
pub const MERCATOR_MAX_LAT: Degrees = Degrees(85.051_128_779_806_44);

/// A point in normalised Mercator coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MercatorPoint {
    pub x: f64,
    pub y: f64,
}

impl MercatorPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Validate for MercatorPoint {
    fn is_valid(&self) -> bool {
        !self.x.is_nan() && !self.y.is_nan()
    }
}

impl From<&LatLon> for MercatorPoint {
    /// Project a position.
    ///
    /// Positions further from the equator than `MERCATOR_MAX_LAT` cannot be
    /// projected and result in an invalid (NaN) point.
    ///
    /// # Examples
    /// ```
    /// use geodensify::mercator::MercatorPoint;
    /// use geodensify::latlon::LatLon;
    ///
    /// let point = MercatorPoint::from(&LatLon::from_degrees(0.0, 0.0));
    /// assert!((point.x - 0.5).abs() < 1e-15);
    /// assert!((point.y - 0.5).abs() < 1e-15);
    /// ```
    fn from(a: &LatLon) -> Self {
        if libm::fabs(a.lat.0) > MERCATOR_MAX_LAT.0 {
            return Self::new(f64::NAN, f64::NAN);
        }

        let x = (a.lon.0 + 180.0) / 360.0;
        let y = 0.5 + libm::log(libm::tan(FRAC_PI_4 + a.lat.0.to_radians() / 2.0)) / (2.0 * PI);
        Self::new(x, y)
    }
}

impl From<&MercatorPoint> for LatLon {
    /// The inverse projection.
    fn from(a: &MercatorPoint) -> Self {
        let lat = 2.0 * (libm::atan(libm::exp((a.y - 0.5) * 2.0 * PI)) - FRAC_PI_4);
        Self::new(Degrees::from(Radians(lat)), Degrees(a.x * 360.0 - 180.0))
    }
}
