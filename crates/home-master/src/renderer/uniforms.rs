use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::core::config::VisualConfig;
use crate::core::section::Section;

/// Per-section uniform block read by the visualizer shaders.
/// Must match the JS protocol: 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SectionUniforms {
    pub grid_density: f32,
    pub morph_factor: f32,
    pub rotation_speed: f32,
    pub glitch_intensity: f32,
    pub dimension: f32,
    pub line_thickness: f32,
    pub pattern_intensity: f32,
    pub universe_modifier: f32,
    pub color_shift: f32,
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    /// Base color, HSB converted to linear RGB in [0, brightness].
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// `Geometry::index()` as a float.
    pub geometry: f32,
}

impl SectionUniforms {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_config(config: &VisualConfig) -> Self {
        let p = &config.params;
        let rgb = hsb_to_rgb(p.hue, p.saturation, p.brightness);
        Self {
            grid_density: p.grid_density,
            morph_factor: p.morph_factor,
            rotation_speed: p.rotation_speed,
            glitch_intensity: p.glitch_intensity,
            dimension: p.dimension,
            line_thickness: p.line_thickness,
            pattern_intensity: p.pattern_intensity,
            universe_modifier: p.universe_modifier,
            color_shift: p.color_shift,
            hue: p.hue,
            saturation: p.saturation,
            brightness: p.brightness,
            r: rgb.x,
            g: rgb.y,
            b: rgb.z,
            geometry: config.geometry.index() as f32,
        }
    }
}

/// HSB (all components in [0, 1], brightness may exceed 1) to RGB.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> Vec3 {
    let h = hue.rem_euclid(1.0) * 6.0;
    let s = saturation.clamp(0.0, 1.0);
    let v = brightness.max(0.0);

    // Distance from each channel's peak on the hue hexagon.
    let k = Vec3::new(5.0, 3.0, 1.0) + Vec3::splat(h);
    let k = Vec3::new(k.x % 6.0, k.y % 6.0, k.z % 6.0);
    let ramp = k.min(Vec3::splat(4.0) - k).clamp(Vec3::ZERO, Vec3::ONE);
    Vec3::splat(v) - Vec3::splat(v * s) * ramp
}

/// One uniform block per section, in `Section::ALL` order.
pub struct UniformBuffer {
    blocks: Vec<SectionUniforms>,
}

impl UniformBuffer {
    pub fn new() -> Self {
        Self {
            blocks: vec![SectionUniforms::default(); Section::ALL.len()],
        }
    }

    pub fn write(&mut self, section: Section, config: &VisualConfig) {
        self.blocks[section.slot()] = SectionUniforms::from_config(config);
    }

    pub fn get(&self, section: Section) -> &SectionUniforms {
        &self.blocks[section.slot()]
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.blocks)
    }

    /// Raw pointer to block data for reads from JS memory.
    pub fn as_ptr(&self) -> *const f32 {
        self.blocks.as_ptr() as *const f32
    }

    pub fn float_count(&self) -> u32 {
        (self.blocks.len() * SectionUniforms::FLOATS) as u32
    }
}

impl Default for UniformBuffer {
    fn default() -> Self {
        Self::new()
    }
}
