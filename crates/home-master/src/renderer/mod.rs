pub mod uniforms;

pub use uniforms::{hsb_to_rgb, SectionUniforms, UniformBuffer};
