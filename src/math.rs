//! Types, aliases and helper operations for doing math with `ultraviolet`.
use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};
pub use ultraviolet as uv;

pub type Vec2 = uv::DVec2;
pub type Vec3 = uv::DVec3;
pub type Rotor2 = uv::DRotor2;
/// A 3D rotation. Equivalent to a unit quaternion,
/// see [`quat_from_array`][self::quat_from_array] and [`quat_to_array`][self::quat_to_array]
/// for conversions to and from the usual `[x, y, z, w]` form.
pub type Rotor3 = uv::DRotor3;
/// A 3D pose has a rotation and a translation, no scaling.
pub type Pose3 = uv::DIsometry3;

/// An angle in either degrees or radians.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde-types", derive(serde::Deserialize, serde::Serialize))]
pub enum Angle {
    Rad(f64),
    Deg(f64),
}
impl Angle {
    /// Get the angle as degrees.
    #[inline]
    pub fn deg(&self) -> f64 {
        match self {
            Angle::Rad(rad) => rad * 180.0 / PI,
            Angle::Deg(deg) => *deg,
        }
    }

    /// Get the angle as radians.
    #[inline]
    pub fn rad(&self) -> f64 {
        match self {
            Angle::Rad(rad) => *rad,
            Angle::Deg(deg) => deg * PI / 180.0,
        }
    }
}
impl Default for Angle {
    fn default() -> Self {
        Angle::Rad(0.0)
    }
}

/// Vector types that can be addressed one axis at a time.
///
/// Lets bounding box and ray code be written once for both 2D and 3D.
/// Axis 1 is always the "up" axis.
pub trait Coords:
    Copy + std::fmt::Debug + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
    /// Number of axes.
    const DIM: usize;

    fn zero() -> Self;
    /// Get the component along the given axis.
    ///
    /// # Panics
    /// Panics if `axis >= DIM`.
    fn component(&self, axis: usize) -> f64;
    /// A vector of length `sign` pointing along the given axis.
    fn axis(axis: usize, sign: f64) -> Self;

    #[inline]
    fn up() -> Self {
        Self::axis(1, 1.0)
    }
}

impl Coords for Vec2 {
    const DIM: usize = 2;

    #[inline]
    fn zero() -> Self {
        Vec2::zero()
    }

    #[inline]
    fn component(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => panic!("axis {axis} out of range for a 2D vector"),
        }
    }

    #[inline]
    fn axis(axis: usize, sign: f64) -> Self {
        let mut v = Vec2::zero();
        match axis {
            0 => v.x = sign,
            1 => v.y = sign,
            _ => panic!("axis {axis} out of range for a 2D vector"),
        }
        v
    }
}

impl Coords for Vec3 {
    const DIM: usize = 3;

    #[inline]
    fn zero() -> Self {
        Vec3::zero()
    }

    #[inline]
    fn component(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis {axis} out of range for a 3D vector"),
        }
    }

    #[inline]
    fn axis(axis: usize, sign: f64) -> Self {
        let mut v = Vec3::zero();
        match axis {
            0 => v.x = sign,
            1 => v.y = sign,
            2 => v.z = sign,
            _ => panic!("axis {axis} out of range for a 3D vector"),
        }
        v
    }
}

// Vec2 utils

/// Normalize a vector, leaving zero-length vectors at zero instead of producing NaNs.
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let mag = v.mag();
    if mag > 0.0 {
        v / mag
    } else {
        Vec2::zero()
    }
}

/// The 2D cross product, i.e. the z component of the 3D cross product.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Cross product of a scalar (z axis) and a vector.
#[inline]
pub fn cross_scalar_vec(s: f64, v: Vec2) -> Vec2 {
    Vec2::new(-s * v.y, s * v.x)
}

/// Cross product of a vector and a scalar (z axis).
#[inline]
pub fn cross_vec_scalar(v: Vec2, s: f64) -> Vec2 {
    Vec2::new(s * v.y, -s * v.x)
}

/// Rotate a vector counterclockwise by an angle in radians.
#[inline]
pub fn rotate2(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

// Vec3 and quaternion utils

#[inline]
pub fn normalize_or_zero_3d(v: Vec3) -> Vec3 {
    let mag = v.mag();
    if mag > 0.0 {
        v / mag
    } else {
        Vec3::zero()
    }
}

#[inline]
pub fn quat_identity() -> Rotor3 {
    Rotor3::identity()
}

/// Build a rotation from yaw (about z), pitch (about y) and roll (about x), in radians.
pub fn quat_from_euler(yaw: f64, pitch: f64, roll: f64) -> Rotor3 {
    let (sy, cy) = (yaw * 0.5).sin_cos();
    let (sp, cp) = (pitch * 0.5).sin_cos();
    let (sr, cr) = (roll * 0.5).sin_cos();
    quat_from_array([
        sr * cp * cy - cr * sp * sy,
        cr * sp * cy + sr * cp * sy,
        cr * cp * sy - sr * sp * cy,
        cr * cp * cy + sr * sp * sy,
    ])
}

/// Compose two rotations. The result applies `second` after `first`.
#[inline]
pub fn quat_compose(first: Rotor3, second: Rotor3) -> Rotor3 {
    second * first
}

#[inline]
pub fn quat_rotate(q: Rotor3, v: Vec3) -> Vec3 {
    q * v
}

/// Convert a quaternion in `[x, y, z, w]` form into a rotor.
#[inline]
pub fn quat_from_array(q: [f64; 4]) -> Rotor3 {
    Rotor3::from_quaternion_array(q)
}

/// Convert a rotor into a quaternion in `[x, y, z, w]` form.
#[inline]
pub fn quat_to_array(r: Rotor3) -> [f64; 4] {
    r.into_quaternion_array()
}
