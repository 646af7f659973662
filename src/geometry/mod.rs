pub mod curve;

pub use curve::{Curve, CurveDomain, Jet, Spiral, SpiralConfig, SpiralFunction};
