pub mod config;
pub mod params;
pub mod rng;
pub mod section;
