//! Scene description.

use crate::{AmbientLight, Color, Geometries, LightSource};

/// Everything a tracer needs: surfaces, lights and the background.
///
/// Scenes are read-only while rendering and may be shared across threads.
#[derive(Debug, Clone)]
pub struct Scene {
    pub name: String,
    pub background: Color,
    pub ambient_light: AmbientLight,
    pub geometries: Geometries,
    pub lights: Vec<LightSource>,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::ZERO,
            ambient_light: AmbientLight::NONE,
            geometries: Geometries::new(),
            lights: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    pub fn with_lights<I>(mut self, lights: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<LightSource>,
    {
        self.lights = lights.into_iter().map(Into::into).collect();
        self
    }

    /// Append one light.
    pub fn add_light(&mut self, light: impl Into<LightSource>) -> &mut Self {
        self.lights.push(light.into());
        self
    }
}
