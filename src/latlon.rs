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

//! The latlon module contains the `LatLon` type: a position on the Earth
//! defined by its latitude and longitude in degrees.

#![allow(clippy::float_cmp)]

use crate::angle::{wrap180, wrap90};
use crate::dms::{format_dms, parse_dms, DmsFormat, ParseError};
use crate::{Degrees, Validate};
use core::fmt;
use core::str::FromStr;

/// A position defined by its latitude and longitude in degrees.
///
/// Invalid positions, e.g. the result of a calculation that failed to
/// converge, have a NaN latitude or longitude.
#[derive(Clone, Copy, Debug)]
pub struct LatLon {
    /// The latitude in degrees, positive North.
    pub lat: Degrees,
    /// The longitude in degrees, positive East.
    pub lon: Degrees,
}

impl LatLon {
    /// Construct a `LatLon` from its latitude and longitude without wrapping.
    #[must_use]
    pub const fn new(lat: Degrees, lon: Degrees) -> Self {
        Self { lat, lon }
    }

    /// Construct a `LatLon` from a latitude and longitude in degrees.
    /// The latitude is wrapped to [-90°, 90°] and the longitude to
    /// (-180°, 180°].
    #[must_use]
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self {
            lat: wrap90(Degrees(lat)),
            lon: wrap180(Degrees(lon)),
        }
    }

    /// An invalid `LatLon`.
    #[must_use]
    pub const fn invalid() -> Self {
        Self {
            lat: Degrees(f64::NAN),
            lon: Degrees(f64::NAN),
        }
    }

    /// Whether the latitudes and longitudes of the positions are identical.
    #[must_use]
    pub fn coincides_with(&self, other: &Self) -> bool {
        self.lat.0 == other.lat.0 && self.lon.0 == other.lon.0
    }
}

impl Validate for LatLon {
    /// Test whether a `LatLon` is valid: neither latitude nor longitude is NaN.
    fn is_valid(&self) -> bool {
        !self.lat.0.is_nan() && !self.lon.0.is_nan()
    }
}

impl PartialEq for LatLon {
    /// Positions are equal if their latitudes and longitudes differ by no
    /// more than machine epsilon.
    fn eq(&self, other: &Self) -> bool {
        libm::fabs(self.lat.0 - other.lat.0) <= f64::EPSILON
            && libm::fabs(self.lon.0 - other.lon.0) <= f64::EPSILON
    }
}

/// Parse a position from separate latitude and longitude strings.
///
/// Each value may be signed decimal degrees or degrees-minutes-seconds
/// suffixed by a compass direction.
/// * `lat` - the latitude string.
/// * `lon` - the longitude string.
///
/// # Errors
///
/// Returns a `ParseError` if either value cannot be parsed or is NaN.
///
/// # Examples
/// ```
/// use geodensify::latlon::parse_lat_lon;
///
/// let p = parse_lat_lon("51°28′40″N", "000°00′05″W").unwrap();
/// assert!((p.lat.0 - 51.477_778).abs() < 1e-6);
/// assert!((p.lon.0 + 0.001_389).abs() < 1e-6);
/// ```
pub fn parse_lat_lon(lat: &str, lon: &str) -> Result<LatLon, ParseError> {
    let lat = parse_dms(lat)?;
    if lat.0.is_nan() {
        return Err(ParseError::NotANumber("latitude"));
    }
    let lon = parse_dms(lon)?;
    if lon.0.is_nan() {
        return Err(ParseError::NotANumber("longitude"));
    }
    Ok(LatLon::new(wrap90(lat), wrap180(lon)))
}

impl FromStr for LatLon {
    type Err = ParseError;

    /// Parse a comma separated "latitude, longitude" string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split(',');
        let lat = tokens.next().ok_or(ParseError::Empty)?;
        let lon = tokens.next().ok_or(ParseError::MissingCoordinate)?;
        if tokens.next().is_some() {
            return Err(ParseError::TooManyItems);
        }
        parse_lat_lon(lat, lon)
    }
}

impl fmt::Display for LatLon {
    /// Format as degrees with compass directions, e.g. `51.4779°N, 000.0015°W`.
    /// The precision may be set with the formatter, e.g. `{:.2}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "-, -");
        }

        let precision = f.precision();
        let lat = wrap90(self.lat);
        let lon = wrap180(self.lon);
        let lat_text = format_dms(lat, DmsFormat::Deg, precision);
        write!(
            f,
            "{}{}, {}{}",
            &lat_text[1..],
            if lat.0 < 0.0 { 'S' } else { 'N' },
            format_dms(lon, DmsFormat::Deg, precision),
            if lon.0 < 0.0 { 'W' } else { 'E' }
        )
    }
}
