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

//! The distance module extends `Metres` with conversions to the other units
//! commonly used for distances on the Earth.

use crate::{Metres, NauticalMiles};

/// The number of metres in a statute mile.
pub const METRES_PER_MILE: f64 = 1609.344;

/// The number of metres in a foot.
pub const METRES_PER_FOOT: f64 = 0.3048;

/// Unit conversions for a distance in `Metres`.
pub trait DistanceUnits {
    /// The distance in metres.
    fn metres(&self) -> f64;

    /// The distance in kilometres.
    fn kilometres(&self) -> f64 {
        self.metres() / 1000.0
    }

    /// The distance in statute miles.
    fn miles(&self) -> f64 {
        self.metres() / METRES_PER_MILE
    }

    /// The distance in feet.
    fn feet(&self) -> f64 {
        self.metres() / METRES_PER_FOOT
    }

    /// The distance in international nautical miles.
    fn nautical_miles(&self) -> NauticalMiles;

    /// Whether the distance is valid, i.e. not NaN.
    /// Invalid distances are returned when a calculation fails to converge.
    fn is_valid(&self) -> bool {
        !self.metres().is_nan()
    }
}

impl DistanceUnits for Metres {
    fn metres(&self) -> f64 {
        self.0
    }

    fn nautical_miles(&self) -> NauticalMiles {
        NauticalMiles::from(*self)
    }
}
