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

//! The vector module contains functions for performing spherical calculations
//! with 3D vectors.
//!
//! Vectors are `nalgebra::Vector3<f64>`, so addition, subtraction, scaling,
//! negation, dot and cross products are provided by `nalgebra`.
//! This module adds the conversions between positions and points on the unit
//! sphere, signed angles between vectors and rotation about an axis.

use crate::latlon::LatLon;
use crate::{Degrees, Radians};
use nalgebra::{Rotation3, Unit};

/// A 3D vector of f64s.
pub type Vector3d = nalgebra::Vector3<f64>;

/// Convert a latitude and longitude to a point on the unit sphere.
/// * `lat` - the latitude.
/// * `lon` - the longitude.
///
/// returns a unit `Vector3d` of the point.
///
/// # Examples
/// ```
/// use geodensify::vector::{to_point, Vector3d};
/// use geodensify::Degrees;
///
/// let point = to_point(Degrees(0.0), Degrees(90.0));
/// assert!((point - Vector3d::new(0.0, 1.0, 0.0)).norm() < 1e-15);
/// ```
#[must_use]
pub fn to_point(lat: Degrees, lon: Degrees) -> Vector3d {
    let phi = lat.0.to_radians();
    let lambda = lon.0.to_radians();
    let cos_phi = libm::cos(phi);
    Vector3d::new(
        cos_phi * libm::cos(lambda),
        cos_phi * libm::sin(lambda),
        libm::sin(phi),
    )
}

/// The latitude of a point on the sphere.
/// The point does not need to be normalised.
#[must_use]
pub fn latitude(point: &Vector3d) -> Degrees {
    Degrees::from(Radians(libm::atan2(point.z, libm::hypot(point.x, point.y))))
}

/// The longitude of a point on the sphere.
#[must_use]
pub fn longitude(point: &Vector3d) -> Degrees {
    Degrees::from(Radians(libm::atan2(point.y, point.x)))
}

/// Convert a point on the sphere to a `LatLon`.
#[must_use]
pub fn to_lat_lon(point: &Vector3d) -> LatLon {
    LatLon::from_degrees(latitude(point).0, longitude(point).0)
}

/// The unit vector of `v`.
/// Zero length and unit vectors are returned unchanged.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn unit(v: &Vector3d) -> Vector3d {
    let length = v.norm();
    if length == 0.0 || length == 1.0 {
        *v
    } else {
        v / length
    }
}

/// The angle from vector `a` to vector `b`.
/// * `a`, `b` - the vectors.
/// * `normal` - an optional plane normal: if given, the angle is negative
///   when measured clockwise looking along the normal, otherwise it is
///   always positive.
///
/// returns the angle in the range [-π, π].
#[must_use]
pub fn angle_to(a: &Vector3d, b: &Vector3d, normal: Option<&Vector3d>) -> Radians {
    let cross = a.cross(b);
    let sign = match normal {
        Some(n) if cross.dot(n) < 0.0 => -1.0,
        _ => 1.0,
    };
    Radians(libm::atan2(sign * cross.norm(), a.dot(b)))
}

/// Rotate the unit vector of `v` around `axis` by `angle`, using the
/// right-hand rule.
/// * `v` - the vector to rotate.
/// * `axis` - the axis of rotation, it does not need to be normalised.
/// * `angle` - the angle of rotation.
#[must_use]
pub fn rotate_around(v: &Vector3d, axis: &Vector3d, angle: Degrees) -> Vector3d {
    let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle.0.to_radians());
    rotation * unit(v)
}
