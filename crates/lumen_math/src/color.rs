use std::ops::{Add, AddAssign, Div, Index, Mul, MulAssign};

use crate::Interval;

/// Linear RGB color, used for both radiance and reflectance.
///
/// Channels are not normalized. Emissive contributions exceed 1.0 and are
/// only clamped when converted to 8-bit with [`Color::to_rgb8`].
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Linear blend: `a * t + b * (1 - t)`.
    #[inline]
    pub fn mix(a: Color, b: Color, t: f32) -> Color {
        a * t + b * (1.0 - t)
    }

    /// Smallest of the three channels.
    #[inline]
    pub fn min_channel(self) -> f32 {
        self.r.min(self.g).min(self.b)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Clamp each channel to [0, 1] and quantize to a byte.
    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f32| (Interval::UNIT.clamp(c) * 255.0) as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

impl Add for Color {
    type Output = Color;

    #[inline]
    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

impl Mul for Color {
    type Output = Color;

    #[inline]
    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl MulAssign for Color {
    #[inline]
    fn mul_assign(&mut self, rhs: Color) {
        *self = *self * rhs;
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    #[inline]
    fn mul(self, rhs: f32) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl Div<f32> for Color {
    type Output = Color;

    #[inline]
    fn div(self, rhs: f32) -> Color {
        Color::new(self.r / rhs, self.g / rhs, self.b / rhs)
    }
}

impl Index<usize> for Color {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.r,
            1 => &self.g,
            2 => &self.b,
            _ => panic!("color channel index out of range: {index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_arithmetic() {
        let a = Color::new(0.5, 1.0, 2.0);
        let b = Color::new(2.0, 0.5, 0.25);

        assert_eq!(a + b, Color::new(2.5, 1.5, 2.25));
        assert_eq!(a * b, Color::new(1.0, 0.5, 0.5));
        assert_eq!(a * 2.0, Color::new(1.0, 2.0, 4.0));
        assert_eq!(a / 2.0, Color::new(0.25, 0.5, 1.0));

        let mut acc = Color::BLACK;
        acc += a;
        acc += a;
        assert_eq!(acc, a * 2.0);
    }

    #[test]
    fn test_mix_weights_first_argument() {
        let red = Color::new(1.0, 0.0, 0.0);
        let blue = Color::new(0.0, 0.0, 1.0);

        assert_eq!(Color::mix(red, blue, 1.0), red);
        assert_eq!(Color::mix(red, blue, 0.0), blue);
        assert_eq!(Color::mix(red, blue, 0.25), Color::new(0.25, 0.0, 0.75));
    }

    #[test]
    fn test_to_rgb8_clamps() {
        assert_eq!(Color::new(-1.0, 0.5, 4.0).to_rgb8(), [0, 127, 255]);
        assert_eq!(Color::WHITE.to_rgb8(), [255, 255, 255]);
        assert_eq!(Color::BLACK.to_rgb8(), [0, 0, 0]);
    }

    #[test]
    fn test_indexing() {
        let c = Color::new(0.1, 0.2, 0.3);
        assert_eq!([c[0], c[1], c[2]], [c.r, c.g, c.b]);
        assert_eq!(c.min_channel(), 0.1);
    }
}
