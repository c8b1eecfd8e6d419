use nalgebra::Vector3;

/// Linear RGB color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }

    /// Builds a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Color {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

/// Shadow-map parameters for a shadow-casting light.
#[derive(Debug, Clone)]
pub struct ShadowConfig {
    pub bias: f32,
    pub map_size: u32,
    pub znear: f32,
    pub zfar: f32,
    /// Half extent of the orthographic shadow frustum.
    pub extent: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        ShadowConfig {
            bias: -0.001,
            map_size: 2048,
            znear: 0.5,
            zfar: 500.0,
            extent: 100.0,
        }
    }
}

/// A sun-style light shining from `position` towards `target`.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    pub cast_shadow: bool,
    pub shadow: ShadowConfig,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        DirectionalLight {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vector3::new(20.0, 15.0, 5.0),
            target: Vector3::zeros(),
            cast_shadow: true,
            shadow: ShadowConfig::default(),
        }
    }
}

impl DirectionalLight {
    pub fn direction(&self) -> Vector3<f32> {
        (self.target - self.position).normalize()
    }
}

/// Uniform fill light with no direction.
#[derive(Debug, Clone)]
pub struct AmbientLight {
    pub color: Color,
}

impl Default for AmbientLight {
    fn default() -> Self {
        AmbientLight {
            color: Color::BLACK,
        }
    }
}

/// The scene's complete lighting rig.
#[derive(Debug, Clone, Default)]
pub struct Lighting {
    pub sun: Option<DirectionalLight>,
    pub ambient: AmbientLight,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hex_colors_unpack() {
        let c = Color::from_hex(0x808080);
        assert_relative_eq!(c.r, 128.0 / 255.0);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
    }

    #[test]
    fn sun_direction_is_normalized() {
        let sun = DirectionalLight::default();
        assert_relative_eq!(sun.direction().norm(), 1.0, epsilon = 1e-6);
    }
}
