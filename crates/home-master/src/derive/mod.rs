// derive/mod.rs
//
// Derivation engine: home record in, one record per section out.

pub mod bundle;
pub mod rules;

pub use bundle::{derive_section, ConfigBundle};
pub use rules::{FieldRule, SectionRule, RULES};
