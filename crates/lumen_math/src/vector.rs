use std::ops::{Deref, Neg};

use crate::Vec3;

/// A vector of unit length.
///
/// The only way to build one is [`UnitVec3::new`], which rejects zero-length
/// and non-finite input, so every `UnitVec3` in the program satisfies
/// `‖v‖ = 1` up to floating-point error.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UnitVec3(Vec3);

impl UnitVec3 {
    /// Normalize `v`. Returns `None` if `v` has zero length or is not finite.
    #[inline]
    pub fn new(v: Vec3) -> Option<Self> {
        v.try_normalize().map(Self)
    }

    /// The underlying vector.
    #[inline]
    pub fn get(self) -> Vec3 {
        self.0
    }
}

impl Deref for UnitVec3 {
    type Target = Vec3;

    #[inline]
    fn deref(&self) -> &Vec3 {
        &self.0
    }
}

impl Neg for UnitVec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl From<UnitVec3> for Vec3 {
    #[inline]
    fn from(v: UnitVec3) -> Vec3 {
        v.0
    }
}

/// Fixed world-space axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    Left,
    Right,
    Down,
    Up,
    Back,
    Forward,
}

impl Axis {
    /// Direction of this axis as a vector.
    #[inline]
    pub fn vector(self) -> Vec3 {
        match self {
            Axis::Left => Vec3::NEG_X,
            Axis::Right => Vec3::X,
            Axis::Down => Vec3::NEG_Y,
            Axis::Up => Vec3::Y,
            Axis::Back => Vec3::NEG_Z,
            Axis::Forward => Vec3::Z,
        }
    }

    /// Direction of this axis as a unit vector.
    #[inline]
    pub fn unit(self) -> UnitVec3 {
        UnitVec3(self.vector())
    }
}
