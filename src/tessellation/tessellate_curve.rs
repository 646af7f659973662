use crate::error::{Result, TessellationError};
use crate::geometry::Curve;
use crate::math::linspace;

use super::{Polyline, SampleParams};

/// Samples a curve at evenly spaced parameters into a polyline.
pub struct TessellateCurve {
    params: SampleParams,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation.
    #[must_use]
    pub fn new(params: SampleParams) -> Self {
        Self { params }
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two samples are requested, the bounds
    /// are not finite or not increasing, or the curve fails to evaluate.
    pub fn execute<C: Curve + ?Sized>(&self, curve: &C) -> Result<Polyline> {
        let SampleParams {
            t_min,
            t_max,
            samples,
        } = self.params;

        if samples < 2 {
            return Err(TessellationError::InvalidParameters(format!(
                "need at least 2 samples, got {samples}"
            ))
            .into());
        }
        if !t_min.is_finite() || !t_max.is_finite() {
            return Err(TessellationError::InvalidParameters(
                "parameter bounds must be finite".into(),
            )
            .into());
        }
        if t_max <= t_min {
            return Err(TessellationError::InvalidParameters(format!(
                "empty parameter range [{t_min}, {t_max}]"
            ))
            .into());
        }

        let params = linspace(t_min, t_max, samples);
        let points = params
            .iter()
            .map(|&t| curve.evaluate(t))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(samples, t_min, t_max, "tessellated curve");

        Ok(Polyline { points, params })
    }
}
