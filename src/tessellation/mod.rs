mod tessellate_curve;

pub use tessellate_curve::TessellateCurve;

use crate::math::Point3;

/// Parameters controlling how densely a curve is sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleParams {
    /// First sampled parameter.
    pub t_min: f64,
    /// Last sampled parameter.
    pub t_max: f64,
    /// Number of samples, both endpoints included.
    pub samples: usize,
}

impl SampleParams {
    /// Creates sampling parameters over `[t_min, t_max]`.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64, samples: usize) -> Self {
        Self {
            t_min,
            t_max,
            samples,
        }
    }
}

impl Default for SampleParams {
    /// Two full turns of the spiral, `[0, 4*pi]`, with 200 samples.
    fn default() -> Self {
        Self {
            t_min: 0.0,
            t_max: 4.0 * std::f64::consts::PI,
            samples: 200,
        }
    }
}

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
    /// Curve parameter of each vertex.
    pub params: Vec<f64>,
}

impl Polyline {
    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the polyline has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
