//! Light sources for the Phong model.

use crate::{Color, GeometryError, GeometryResult};
use whitted_math::Vec3;

/// Uniform light reaching every surface regardless of occlusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient contribution.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::ZERO,
    };

    pub fn new(intensity: Color) -> Self {
        Self { intensity }
    }

    /// Ambient light from a base color scaled by a per-channel coefficient.
    pub fn scaled(color: Color, ka: Vec3) -> Self {
        Self::new(color * ka)
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// Light arriving from infinitely far away along one direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vec3,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vec3) -> GeometryResult<Self> {
        let direction = direction
            .try_normalize()
            .ok_or(GeometryError::ZeroVector("light direction"))?;
        Ok(Self {
            intensity,
            direction,
        })
    }
}

/// Omnidirectional light with distance attenuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: Vec3,
    kc: f32,
    kl: f32,
    kq: f32,
}

impl PointLight {
    /// Create an unattenuated point light (`kc = 1`, `kl = kq = 0`).
    pub fn new(intensity: Color, position: Vec3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    /// Constant attenuation factor.
    pub fn with_kc(mut self, kc: f32) -> Self {
        self.kc = kc;
        self
    }

    /// Linear attenuation factor.
    pub fn with_kl(mut self, kl: f32) -> Self {
        self.kl = kl;
        self
    }

    /// Quadratic attenuation factor.
    pub fn with_kq(mut self, kq: f32) -> Self {
        self.kq = kq;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    fn intensity_at(&self, point: Vec3) -> Color {
        let d = self.position.distance(point);
        self.intensity / (self.kc + self.kl * d + self.kq * d * d)
    }

    fn direction_to(&self, point: Vec3) -> Vec3 {
        (point - self.position).normalize_or_zero()
    }
}

/// Point light focused along a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    point: PointLight,
    direction: Vec3,
    narrow_beam: u32,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Vec3, direction: Vec3) -> GeometryResult<Self> {
        let direction = direction
            .try_normalize()
            .ok_or(GeometryError::ZeroVector("spot light direction"))?;
        Ok(Self {
            point: PointLight::new(intensity, position),
            direction,
            narrow_beam: 1,
        })
    }

    pub fn with_kc(mut self, kc: f32) -> Self {
        self.point = self.point.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f32) -> Self {
        self.point = self.point.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f32) -> Self {
        self.point = self.point.with_kq(kq);
        self
    }

    /// Exponent applied to the beam falloff; higher is narrower.
    pub fn with_narrow_beam(mut self, narrow_beam: u32) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }

    fn intensity_at(&self, point: Vec3) -> Color {
        let falloff = self.direction.dot(self.point.direction_to(point)).max(0.0);
        self.point.intensity_at(point) * falloff.powi(self.narrow_beam as i32)
    }
}

/// A light that can cast shadows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightSource {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl LightSource {
    /// Intensity arriving at `point`.
    pub fn intensity_at(&self, point: Vec3) -> Color {
        match self {
            LightSource::Directional(light) => light.intensity,
            LightSource::Point(light) => light.intensity_at(point),
            LightSource::Spot(light) => light.intensity_at(point),
        }
    }

    /// Unit vector from the light towards `point`.
    ///
    /// Zero when `point` coincides with a point light's position.
    pub fn direction_to(&self, point: Vec3) -> Vec3 {
        match self {
            LightSource::Directional(light) => light.direction,
            LightSource::Point(light) => light.direction_to(point),
            LightSource::Spot(light) => light.point.direction_to(point),
        }
    }

    /// Distance from the light to `point`; infinite for directional lights.
    pub fn distance(&self, point: Vec3) -> f32 {
        match self {
            LightSource::Directional(_) => f32::INFINITY,
            LightSource::Point(light) => light.position.distance(point),
            LightSource::Spot(light) => light.point.position.distance(point),
        }
    }
}

impl From<DirectionalLight> for LightSource {
    fn from(light: DirectionalLight) -> Self {
        LightSource::Directional(light)
    }
}

impl From<PointLight> for LightSource {
    fn from(light: PointLight) -> Self {
        LightSource::Point(light)
    }
}

impl From<SpotLight> for LightSource {
    fn from(light: SpotLight) -> Self {
        LightSource::Spot(light)
    }
}
