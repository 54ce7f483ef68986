// extensions/mod.rs
//
// Per-frame helpers for the render loop. None of these write back into the
// store: they take configurations by reference and return new ones.

pub mod easing;
pub mod interpolate;
pub mod overlay;
pub mod tracker;

pub use easing::{lerp, Easing};
pub use interpolate::{interpolate, Transition};
pub use overlay::scroll_overlay;
pub use tracker::{ScrollTracker, ScrollTrackerConfig};
