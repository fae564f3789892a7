pub mod canvas;
pub mod color;
pub mod disk;
pub mod loader;
pub mod low_discrepancy;
pub mod rng;
