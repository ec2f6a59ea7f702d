//! Linear RGBA color used for vertex colors and material tints

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// RGBA color with components in the 0..=1 range
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component
    pub a: f32,
}

impl Color {
    /// Opaque white, the neutral material tint
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque red
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// Opaque yellow
    pub const YELLOW: Self = Self::new(1.0, 0.92, 0.016, 1.0);
    /// Opaque cyan
    pub const CYAN: Self = Self::new(0.0, 1.0, 1.0, 1.0);

    /// X axis color used by the axes gizmo
    pub const AXIS_X: Self = Self::new(219.0 / 255.0, 62.0 / 255.0, 29.0 / 255.0, 0.93);
    /// Y axis color used by the axes gizmo
    pub const AXIS_Y: Self = Self::new(154.0 / 255.0, 243.0 / 255.0, 72.0 / 255.0, 0.93);
    /// Z axis color used by the axes gizmo
    pub const AXIS_Z: Self = Self::new(58.0 / 255.0, 122.0 / 255.0, 248.0 / 255.0, 0.93);

    /// Create a color from components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color with a different alpha
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Components as an array, in RGBA order
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}
