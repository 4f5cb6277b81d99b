use glam::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    /// Sky colour from above, ground colour from below.
    Hemisphere { ground_color: Vec3 },
    Directional,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,
    pub cast_shadows: bool,
}

impl Light {
    #[must_use]
    pub fn new_hemisphere(sky: Vec3, ground: Vec3, intensity: f32) -> Self {
        Self {
            color: sky,
            intensity,
            kind: LightKind::Hemisphere {
                ground_color: ground,
            },
            cast_shadows: false,
        }
    }

    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Directional,
            cast_shadows: false,
        }
    }
}
