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

//! The dms module parses and formats angles in degrees, minutes and seconds.
//!
//! Parsing is flexible: signed decimal degrees, or degrees-minutes-seconds
//! separated by symbols (`°º`, `′’'`, `″”"`) or whitespace, optionally
//! suffixed by a compass direction (NSEW). Examples: `-3.62`, `3 37 12W`,
//! `3°37′12″W`.

use crate::Degrees;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// An error parsing an angle or a position.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty string")]
    Empty,
    #[error("failed to parse DMS string {0:?}")]
    Malformed(String),
    #[error("failed to parse {component} ({value}) in DMS string {input:?}")]
    Component {
        component: &'static str,
        value: String,
        input: String,
    },
    #[error("latitude and longitude are required")]
    MissingCoordinate,
    #[error("too many items")]
    TooManyItems,
    #[error("{0} cannot be NaN")]
    NotANumber(&'static str),
}

/// The components to show when formatting an angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DmsFormat {
    /// Degrees, e.g. `009.1525°`.
    #[default]
    Deg,
    /// Degrees and minutes, e.g. `009°09.15′`.
    DegMin,
    /// Degrees, minutes and seconds, e.g. `009°09′09″`.
    DegMinSec,
}

impl DmsFormat {
    /// The default number of decimal places for the format:
    /// 4 for `Deg`, 2 for `DegMin` and 0 for `DegMinSec`.
    #[must_use]
    pub const fn default_precision(self) -> usize {
        match self {
            Self::Deg => 4,
            Self::DegMin => 2,
            Self::DegMinSec => 0,
        }
    }
}

lazy_static! {
    static ref DMS_RE: Regex = Regex::new(concat!(
        r#"^-?(?:([0-9.,]+)(?:[°º]|\s|[nwseNWSE]?$))?\s*"#,
        r#"(?:([0-9.,]+)(?:[′’']|\s|[nwseNWSE]?$))?\s*"#,
        r#"(?:([0-9.,]+)[″”"]?)?\s*[nwseNWSE]?$"#
    ))
    .expect("DMS regular expression");
}

fn parse_component(
    component: &'static str,
    value: Option<regex::Match>,
    input: &str,
) -> Result<f64, ParseError> {
    value.map_or(Ok(0.0), |m| {
        m.as_str()
            .parse::<f64>()
            .map_err(|_| ParseError::Component {
                component,
                value: m.as_str().to_owned(),
                input: input.to_owned(),
            })
    })
}

/// Parse a string representing degrees, minutes and seconds into decimal
/// degrees.
/// * `dms` - the string to parse.
///
/// returns the angle in decimal degrees, negative for a leading `-` or a
/// trailing `S` or `W`.
///
/// # Errors
///
/// Returns a `ParseError` if the string is empty or is not a recognised
/// format.
///
/// # Examples
/// ```
/// use geodensify::dms::parse_dms;
///
/// let lat = parse_dms("51° 28′ 40.37″ N").unwrap();
/// assert!((lat.0 - 51.477_880_6).abs() < 1e-7);
/// let lon = parse_dms("000° 00′ 05.29″ W").unwrap();
/// assert!((lon.0 + 0.001_469_4).abs() < 1e-7);
/// ```
pub fn parse_dms(dms: &str) -> Result<Degrees, ParseError> {
    if dms.is_empty() {
        return Err(ParseError::Empty);
    }

    // signed decimal degrees without NSEW
    if let Ok(value) = dms.parse::<f64>() {
        return Ok(Degrees(value));
    }

    let dms = dms.trim();
    let parts = DMS_RE
        .captures(dms)
        .ok_or_else(|| ParseError::Malformed(dms.to_owned()))?;

    let degrees = parse_component("degrees", parts.get(1), dms)?;
    let minutes = parse_component("minutes", parts.get(2), dms)?;
    let seconds = parse_component("seconds", parts.get(3), dms)?;

    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    let negative = dms.starts_with('-') || dms.ends_with(['W', 'S', 'w', 's']);
    Ok(Degrees(if negative { -value } else { value }))
}

/// Left pad a value with zeros to `width` whole digits.
fn zero_pad(value: f64, text: &str, width: usize) -> String {
    let digits = if value < 10.0 {
        1
    } else if value < 100.0 {
        2
    } else {
        3
    };
    let padding = width.saturating_sub(digits);
    format!("{}{text}", "0".repeat(padding))
}

/// Format an angle in degrees, minutes and seconds.
///
/// Degree, prime and double-prime symbols are added, the sign is discarded
/// and no compass direction is added. Degrees are zero-padded to 3 digits,
/// minutes and seconds to 2 digits.
/// * `degrees` - the angle to format.
/// * `format` - the components to show.
/// * `precision` - the number of decimal places of the last component,
///   `None` for the format's default.
///
/// returns the formatted string, empty if `degrees` is not finite.
///
/// # Examples
/// ```
/// use geodensify::dms::{format_dms, DmsFormat};
/// use geodensify::Degrees;
///
/// assert_eq!("009°09′09″", format_dms(Degrees(9.1525), DmsFormat::DegMinSec, None));
/// assert_eq!("009°09.15′", format_dms(Degrees(9.1525), DmsFormat::DegMin, None));
/// assert_eq!("009.1525°", format_dms(Degrees(9.1525), DmsFormat::Deg, None));
/// ```
#[must_use]
pub fn format_dms(degrees: Degrees, format: DmsFormat, precision: Option<usize>) -> String {
    if !degrees.0.is_finite() {
        return String::new();
    }

    let dp = precision.unwrap_or_else(|| format.default_precision());
    #[allow(clippy::cast_precision_loss)]
    let p10 = libm::pow(10.0, dp as f64);
    let value = libm::fabs(degrees.0);

    match format {
        DmsFormat::Deg => zero_pad(value, &format!("{value:.dp$}"), 3) + "°",
        DmsFormat::DegMin => {
            let mut d = libm::floor(value);
            let mut m = libm::round(p10 * libm::fmod(value * 60.0, 60.0)) / p10;
            if m >= 60.0 {
                d += 1.0;
                m = 0.0;
            }
            format!(
                "{}°{}′",
                zero_pad(d, &format!("{d:.0}"), 3),
                zero_pad(m, &format!("{m:.dp$}"), 2)
            )
        }
        DmsFormat::DegMinSec => {
            let mut d = libm::floor(value);
            let mut m = libm::fmod(libm::floor(value * 3600.0 / 60.0), 60.0);
            let mut s = libm::round(p10 * libm::fmod(value * 3600.0, 60.0)) / p10;
            if s >= 60.0 {
                m += 1.0;
                s = 0.0;
            }
            if m >= 60.0 {
                d += 1.0;
                m = 0.0;
            }
            format!(
                "{}°{}′{}″",
                zero_pad(d, &format!("{d:.0}"), 3),
                zero_pad(m, &format!("{m:.0}"), 2),
                zero_pad(s, &format!("{s:.dp$}"), 2)
            )
        }
    }
}
