pub mod combinations;
pub mod presets;
pub mod system;

pub use combinations::{Resolution, COMBINATIONS, DEFAULT_COMBINATION};
pub use presets::{Preset, PresetCatalog, BUILTIN_PRESETS};
pub use system::HomeMaster;
