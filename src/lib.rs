pub mod callback;
pub mod data;
pub mod error;
pub mod geometry;
pub mod math;
pub mod plot;
pub mod tessellation;

pub use error::{Result, SpiralError};
