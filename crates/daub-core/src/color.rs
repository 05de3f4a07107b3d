//! RGB color triples and HSV conversion

use serde::{Deserialize, Serialize};

/// A linear RGB color with channels nominally in [0, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Per-channel complement `1 - c`
    pub fn inverted(&self) -> Self {
        Self::new(1.0 - self.r, 1.0 - self.g, 1.0 - self.b)
    }

    /// Convert hue (degrees), saturation and value (0..1) to RGB.
    ///
    /// Hue is wrapped into [0, 360) first, so any finite hue is accepted.
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let h = hue.rem_euclid(360.0);
        let c = value * saturation;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = value - c;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::new(r + m, g + m, b + m)
    }
}

impl From<[f32; 3]> for Rgb {
    fn from(arr: [f32; 3]) -> Self {
        Self::from_array(arr)
    }
}
