//! Ground-plane geometry.
//!
//! The world is a flat plane addressed by `(x, z)`; `y` is up and never
//! simulated here.  Headings follow the renderer's convention: a heading of
//! `0` points along `+z`, `π/2` along `+x`, so a unit step is
//! `(sin(heading), cos(heading))`.

use std::f32::consts::{PI, TAU};

/// A point (or displacement) on the ground plane, single precision.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub z: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Unit vector pointing along `heading`.
    #[inline]
    pub fn from_heading(heading: f32) -> Self {
        Self { x: heading.sin(), z: heading.cos() }
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.z * self.z
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Squared distance; use for radius checks to skip the square root.
    #[inline]
    pub fn distance_sq(self, other: Vec2) -> f32 {
        (other - self).length_sq()
    }

    /// Heading from `self` towards `other`, in (−π, π].
    ///
    /// Returns `0.0` when the points coincide.
    #[inline]
    pub fn heading_to(self, other: Vec2) -> f32 {
        let d = other - self;
        if d.length_sq() == 0.0 {
            return 0.0;
        }
        // atan2 yields −π for a signed-zero x; fold it onto +π.
        normalize_angle(d.x.atan2(d.z))
    }

    /// Clamp each axis independently into `[-half_x, half_x] × [-half_z, half_z]`.
    #[inline]
    pub fn clamp_to(self, half_x: f32, half_z: f32) -> Vec2 {
        Vec2 {
            x: self.x.clamp(-half_x, half_x),
            z: self.z.clamp(-half_z, half_z),
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x + rhs.x, z: self.z + rhs.z }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x - rhs.x, z: self.z - rhs.z }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2 { x: self.x * rhs, z: self.z * rhs }
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.z)
    }
}

/// Wrap an angle in radians into the half-open interval (−π, π].
///
/// Steering code must normalize *differences* with this before scaling them,
/// otherwise a target just across the ±π seam produces a near-full turn the
/// wrong way round.
pub fn normalize_angle(angle: f32) -> f32 {
    let r = angle % TAU; // (−2π, 2π)
    if r <= -PI {
        r + TAU
    } else if r > PI {
        r - TAU
    } else {
        r
    }
}
