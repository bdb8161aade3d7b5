//! RGBA tint для HUD indicators (engine-independent, Godot layer конвертирует в Color)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Tint {
    pub const WHITE: Tint = Tint::rgb(1.0, 1.0, 1.0);

    /// Godot `Colors.Gray`
    pub const GRAY: Tint = Tint::rgb(0.745, 0.745, 0.745);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Линейная интерполяция, `t` clamp в [0, 1]
    pub fn lerp(self, other: Tint, t: f32) -> Tint {
        let t = t.clamp(0.0, 1.0);
        Tint {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_and_clamp() {
        let from = Tint::rgb(0.0, 0.0, 0.0);
        let to = Tint::WHITE;

        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
        assert_eq!(from.lerp(to, 2.0), to);
        assert_eq!(from.lerp(to, 0.5).r, 0.5);
    }

    #[test]
    fn test_from_rgb8() {
        let tint = Tint::from_rgb8(255, 0, 51);
        assert_eq!(tint.to_array(), [1.0, 0.0, 0.2, 1.0]);
    }
}
