//! Phong surface material.

use whitted_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Anything usable as a per-channel coefficient: a scalar applies to all
/// three channels.
pub trait Coefficient {
    fn into_triple(self) -> Vec3;
}

impl Coefficient for f32 {
    fn into_triple(self) -> Vec3 {
        Vec3::splat(self)
    }
}

impl Coefficient for Vec3 {
    fn into_triple(self) -> Vec3 {
        self
    }
}

/// Empirical Phong material with reflection and transmission coefficients.
///
/// The default passes ambient light through and contributes nothing else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient coefficient
    pub ka: Vec3,
    /// Diffuse coefficient
    pub kd: Vec3,
    /// Specular coefficient
    pub ks: Vec3,
    /// Specular exponent
    pub shininess: u32,
    /// Reflection coefficient
    pub kr: Vec3,
    /// Transmission (refraction) coefficient
    pub kt: Vec3,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: Vec3::ONE,
            kd: Vec3::ZERO,
            ks: Vec3::ZERO,
            shininess: 0,
            kr: Vec3::ZERO,
            kt: Vec3::ZERO,
        }
    }
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ka(mut self, ka: impl Coefficient) -> Self {
        self.ka = ka.into_triple();
        self
    }

    pub fn with_kd(mut self, kd: impl Coefficient) -> Self {
        self.kd = kd.into_triple();
        self
    }

    pub fn with_ks(mut self, ks: impl Coefficient) -> Self {
        self.ks = ks.into_triple();
        self
    }

    pub fn with_shininess(mut self, shininess: u32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_kr(mut self, kr: impl Coefficient) -> Self {
        self.kr = kr.into_triple();
        self
    }

    pub fn with_kt(mut self, kt: impl Coefficient) -> Self {
        self.kt = kt.into_triple();
        self
    }
}

/// Returns true if every channel of `k` is below `threshold`.
#[inline]
pub fn below(k: Vec3, threshold: f32) -> bool {
    k.max_element() < threshold
}
