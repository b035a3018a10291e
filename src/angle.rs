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

//! The angle module contains functions for constraining angles measured in
//! degrees to the ranges used for bearings, longitudes and latitudes.
//!
//! * `wrap360` is a sawtooth wave with period 360°, range [0°, 360°).
//! * `wrap180` is a sawtooth wave with period 360°, range (-180°, 180°].
//! * `wrap90` is a triangle wave with period 360°, range [-90°, 90°].
//!
//! Values already in range are returned unchanged, so that arithmetic
//! rounding is not introduced into canonical values.
//!
//! `delta_longitude` is the single place where a difference in longitude is
//! converted to the shorter path across the antimeridian.

use crate::Degrees;

/// Constrain `degrees` to the range [0°, 360°), e.g. for bearings.
/// -1° → 359°, 361° → 1°.
/// * `degrees` - the angle in degrees.
///
/// # Examples
/// ```
/// use geodensify::{angle::wrap360, Degrees};
///
/// assert_eq!(270.0, wrap360(Degrees(-450.0)).0);
/// ```
#[must_use]
pub fn wrap360(degrees: Degrees) -> Degrees {
    let d = degrees.0;
    if (0.0..360.0).contains(&d) {
        degrees
    } else {
        Degrees(libm::fmod(libm::fmod(d, 360.0) + 360.0, 360.0))
    }
}

/// Constrain `degrees` to the range (-180°, 180°], e.g. for longitudes.
/// -181° → 179°, 181° → -179°.
///
/// Note: -180° is returned as -180°.
/// * `degrees` - the angle in degrees.
#[must_use]
pub fn wrap180(degrees: Degrees) -> Degrees {
    let d = degrees.0;
    if -180.0 < d && d <= 180.0 {
        degrees
    } else {
        let cycles = libm::floor(libm::fabs(d / 360.0)) + 1.0;
        Degrees(libm::fmod(d + 180.0 + 360.0 * cycles, 360.0) - 180.0)
    }
}

/// Constrain `degrees` to the range [-90°, 90°], e.g. for latitudes.
/// Values beyond a pole are reflected back: 91° → 89°, -91° → -89°.
/// * `degrees` - the angle in degrees.
#[must_use]
pub fn wrap90(degrees: Degrees) -> Degrees {
    let d = degrees.0;
    if (-90.0..=90.0).contains(&d) {
        degrees
    } else {
        let x = libm::fmod(libm::fmod(d, 360.0) + 360.0, 360.0);
        Degrees(libm::fabs(libm::fmod(x + 270.0, 360.0) - 180.0) - 90.0)
    }
}

/// Convert a difference in longitude to the shorter way around the globe.
///
/// Differences greater than 180° have 360° subtracted, differences less than
/// -180° have 360° added. Exactly ±180° is returned unchanged.
/// * `delta` - the difference in longitude in degrees.
///
/// # Examples
/// ```
/// use geodensify::{angle::delta_longitude, Degrees};
///
/// assert_eq!(-20.0, delta_longitude(Degrees(340.0)).0);
/// assert_eq!(180.0, delta_longitude(Degrees(180.0)).0);
/// ```
#[must_use]
pub fn delta_longitude(delta: Degrees) -> Degrees {
    if delta.0 > 180.0 {
        Degrees(delta.0 - 360.0)
    } else if delta.0 < -180.0 {
        Degrees(delta.0 + 360.0)
    } else {
        delta
    }
}

/// The difference in longitude from `lon1` to `lon2`, taking the shorter path.
#[must_use]
pub fn longitude_difference(lon1: Degrees, lon2: Degrees) -> Degrees {
    delta_longitude(Degrees(lon2.0 - lon1.0))
}

/// Round `degrees` to `n` decimal places.
#[must_use]
pub fn round_to(degrees: Degrees, n: i32) -> f64 {
    let p10 = libm::pow(10.0, f64::from(n));
    libm::round(p10 * degrees.0) / p10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap360() {
        let data = [
            (-450.0, 270.0),
            (-405.0, 315.0),
            (-360.0, 0.0),
            (-315.0, 45.0),
            (-270.0, 90.0),
            (-225.0, 135.0),
            (-180.0, 180.0),
            (-135.0, 225.0),
            (-90.0, 270.0),
            (-45.0, 315.0),
            (0.0, 0.0),
            (45.0, 45.0),
            (90.0, 90.0),
            (135.0, 135.0),
            (180.0, 180.0),
            (225.0, 225.0),
            (270.0, 270.0),
            (315.0, 315.0),
            (360.0, 0.0),
            (405.0, 45.0),
            (450.0, 90.0),
        ];
        for (input, expected) in data {
            assert_eq!(expected, wrap360(Degrees(input)).0, "wrap360({input})");
        }
    }

    #[test]
    fn test_wrap180() {
        let data = [
            (-450.0, -90.0),
            (-405.0, -45.0),
            (-360.0, 0.0),
            (-315.0, 45.0),
            (-270.0, 90.0),
            (-225.0, 135.0),
            (-180.0, -180.0),
            (-135.0, -135.0),
            (-90.0, -90.0),
            (-45.0, -45.0),
            (0.0, 0.0),
            (45.0, 45.0),
            (90.0, 90.0),
            (135.0, 135.0),
            (180.0, 180.0),
            (225.0, -135.0),
            (270.0, -90.0),
            (315.0, -45.0),
            (360.0, 0.0),
            (405.0, 45.0),
            (450.0, 90.0),
        ];
        for (input, expected) in data {
            assert_eq!(expected, wrap180(Degrees(input)).0, "wrap180({input})");
        }
    }

    #[test]
    fn test_wrap90() {
        let data = [
            (-450.0, -90.0),
            (-405.0, -45.0),
            (-360.0, 0.0),
            (-350.0, 10.0),
            (-315.0, 45.0),
            (-300.0, 60.0),
            (-270.0, 90.0),
            (-225.0, 45.0),
            (-180.0, 0.0),
            (-135.0, -45.0),
            (-90.0, -90.0),
            (-45.0, -45.0),
            (0.0, 0.0),
            (45.0, 45.0),
            (90.0, 90.0),
            (135.0, 45.0),
            (180.0, 0.0),
            (225.0, -45.0),
            (270.0, -90.0),
            (315.0, -45.0),
            (360.0, 0.0),
            (405.0, 45.0),
            (450.0, 90.0),
        ];
        for (input, expected) in data {
            assert_eq!(expected, wrap90(Degrees(input)).0, "wrap90({input})");
        }
    }

    #[test]
    fn test_wrap_idempotence() {
        let mut d = -1000.0;
        while d < 1000.0 {
            let w = wrap360(Degrees(d));
            assert_eq!(w.0, wrap360(w).0);
            let w = wrap180(Degrees(d));
            assert_eq!(w.0, wrap180(w).0);
            let w = wrap90(Degrees(d));
            assert_eq!(w.0, wrap90(w).0);
            d += 7.3;
        }
    }

    #[test]
    fn test_delta_longitude() {
        assert_eq!(10.0, delta_longitude(Degrees(10.0)).0);
        assert_eq!(-170.0, delta_longitude(Degrees(190.0)).0);
        assert_eq!(170.0, delta_longitude(Degrees(-190.0)).0);
        assert_eq!(180.0, delta_longitude(Degrees(180.0)).0);
        assert_eq!(-180.0, delta_longitude(Degrees(-180.0)).0);
        assert_eq!(0.0, delta_longitude(Degrees(-360.0)).0);

        assert_eq!(20.0, longitude_difference(Degrees(170.0), Degrees(-170.0)).0);
        assert_eq!(-20.0, longitude_difference(Degrees(-170.0), Degrees(170.0)).0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(51.48, round_to(Degrees(51.477_88), 2));
        assert_eq!(-0.0015, round_to(Degrees(-0.001_47), 4));
    }
}
