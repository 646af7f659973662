use crate::callback::{Arity, FunctionTable};
use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain, Jet};

/// Evaluation settings for [`Spiral`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpiralConfig {
    /// Emit a trace event naming the callback and its argument on every call.
    pub trace: bool,
}

/// The two named callbacks exposed by [`Spiral`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpiralFunction {
    /// `curvex`: the position triple.
    CurveX,
    /// `curvey`: the derivative triple.
    CurveY,
}

impl SpiralFunction {
    /// Both callbacks, in registration order.
    pub const ALL: [Self; 2] = [Self::CurveX, Self::CurveY];

    /// Returns the name the solver calls this function by.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CurveX => "curvex",
            Self::CurveY => "curvey",
        }
    }

    /// Looks up a callback by its solver-facing name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Spiral curve evaluator.
///
/// With `s = sin(t)` and `c = cos(t)`:
///
/// - position (`curvex`): `(t*s, s + t*c, 2*c - t*s)`
/// - derivative (`curvey`): `(t*c, c - t*s, -2*s - t*c)`
///
/// Each triple is the value and first two derivatives of one coordinate of
/// the planar spiral `P(t) = (t*sin(t), t*cos(t), 0)`, which is what the
/// [`Curve`] implementation evaluates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spiral {
    config: SpiralConfig,
}

impl Spiral {
    /// Creates a new evaluator.
    #[must_use]
    pub fn new(config: SpiralConfig) -> Self {
        Self { config }
    }

    /// Returns the evaluator settings.
    #[must_use]
    pub fn config(&self) -> SpiralConfig {
        self.config
    }

    /// Position triple at `t`.
    #[must_use]
    pub fn position(&self, t: f64) -> Jet {
        self.trace(SpiralFunction::CurveX, t);
        let (sint, cost) = t.sin_cos();
        let tsint = t * sint;
        let tcost = t * cost;
        Jet::new(tsint, sint + tcost, 2.0 * cost - tsint)
    }

    /// Derivative triple at `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Jet {
        self.trace(SpiralFunction::CurveY, t);
        let (sint, cost) = t.sin_cos();
        let tsint = t * sint;
        let tcost = t * cost;
        Jet::new(tcost, cost - tsint, -2.0 * sint - tcost)
    }

    /// Evaluates one of the two callbacks.
    #[must_use]
    pub fn call(&self, function: SpiralFunction, t: f64) -> Jet {
        match function {
            SpiralFunction::CurveX => self.position(t),
            SpiralFunction::CurveY => self.derivative(t),
        }
    }

    /// Evaluates a callback by its solver-facing name, or `None` for an unknown name.
    #[must_use]
    pub fn call_by_name(&self, name: &str, t: f64) -> Option<Jet> {
        SpiralFunction::from_name(name).map(|f| self.call(f, t))
    }

    /// Declares `curvex` and `curvey` in `table`, each taking one numeric argument.
    ///
    /// # Errors
    ///
    /// Returns an error if either name is already registered.
    pub fn register(&self, table: &mut FunctionTable) -> Result<()> {
        for function in SpiralFunction::ALL {
            let spiral = *self;
            table.add_func(function.name(), Arity::Exactly(1), move |args| {
                spiral.call(function, args[0])
            })?;
        }
        Ok(())
    }

    fn trace(&self, function: SpiralFunction, t: f64) {
        if self.config.trace {
            tracing::trace!(function = function.name(), t, "evaluating spiral callback");
        }
    }
}

impl Curve for Spiral {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(Point3::new(
            self.position(t).value,
            self.derivative(t).value,
            0.0,
        ))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let tangent = Vector3::new(self.position(t).d1, self.derivative(t).d1, 0.0);
        let len = tangent.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(tangent / len)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::math::central_difference;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    const STEP: f64 = 1e-4;
    const FD_TOL: f64 = 1e-5;

    fn assert_jet(jet: Jet, expected: [f64; 3]) {
        let got = jet.to_array();
        for (g, e) in got.iter().zip(expected) {
            assert_abs_diff_eq!(*g, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn returns_three_components() {
        let spiral = Spiral::default();
        let p: [f64; 3] = spiral.position(1.3).into();
        let d: [f64; 3] = spiral.derivative(1.3).into();
        assert_eq!(p.len(), 3);
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn values_at_zero() {
        let spiral = Spiral::default();
        assert_jet(spiral.position(0.0), [0.0, 0.0, 2.0]);
        assert_jet(spiral.derivative(0.0), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn values_at_pi() {
        let spiral = Spiral::default();
        // s = 0, c = -1: y = s + t*c and z' = -2*s - t*c pick up the factor t.
        assert_jet(spiral.position(PI), [0.0, -PI, -2.0]);
        assert_jet(spiral.derivative(PI), [-PI, -1.0, PI]);
    }

    #[test]
    fn values_at_half_pi() {
        let spiral = Spiral::default();
        assert_jet(spiral.position(FRAC_PI_2), [FRAC_PI_2, 1.0, -FRAC_PI_2]);
        assert_jet(spiral.derivative(FRAC_PI_2), [0.0, -FRAC_PI_2, -2.0]);
    }

    #[test]
    fn deterministic_bitwise() {
        let spiral = Spiral::default();
        for &t in &[-7.25, -1.0, 0.0, 0.3, 2.0, 11.5] {
            let a = spiral.position(t).to_array().map(f64::to_bits);
            let b = spiral.position(t).to_array().map(f64::to_bits);
            assert_eq!(a, b);
            let a = spiral.derivative(t).to_array().map(f64::to_bits);
            let b = spiral.derivative(t).to_array().map(f64::to_bits);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn jets_match_finite_differences() {
        let spiral = Spiral::default();
        for i in -20_i32..=20 {
            let t = f64::from(i) * 0.37;
            for f in SpiralFunction::ALL {
                let jet = spiral.call(f, t);
                let d1 = central_difference(|u| spiral.call(f, u).value, t, STEP);
                let d2 = central_difference(|u| spiral.call(f, u).d1, t, STEP);
                assert_abs_diff_eq!(jet.d1, d1, epsilon = FD_TOL);
                assert_abs_diff_eq!(jet.d2, d2, epsilon = FD_TOL);
            }
        }
    }

    #[test]
    fn tangent_matches_finite_difference_of_evaluate() {
        let spiral = Spiral::default();
        for &t in &[-3.0, -0.5, 0.0, 0.75, 2.5, 9.0] {
            let dx = central_difference(|u| spiral.evaluate(u).unwrap().x, t, STEP);
            let dy = central_difference(|u| spiral.evaluate(u).unwrap().y, t, STEP);
            let numeric = Vector3::new(dx, dy, 0.0).normalize();
            let tangent = spiral.tangent(t).unwrap();
            assert!((tangent - numeric).norm() < FD_TOL);
        }
    }

    #[test]
    fn evaluate_traces_planar_spiral() {
        let spiral = Spiral::default();
        let t = 2.0_f64;
        let p = spiral.evaluate(t).unwrap();
        assert_abs_diff_eq!(p.x, t * t.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, t * t.cos(), epsilon = 1e-12);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn tangent_at_zero() {
        let t = Spiral::default().tangent(0.0).unwrap();
        assert!((t - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn unbounded_open_domain() {
        let spiral = Spiral::default();
        let d = spiral.domain();
        assert!(d.t_min.is_infinite() && d.t_max.is_infinite());
        assert!(!spiral.is_closed());
    }

    #[test]
    fn non_finite_input_propagates() {
        let spiral = Spiral::default();
        assert!(spiral.position(f64::NAN).to_array().iter().all(|v| v.is_nan()));
        assert!(spiral
            .derivative(f64::INFINITY)
            .to_array()
            .iter()
            .all(|v| v.is_nan()));
    }

    #[test]
    fn call_by_name_dispatches() {
        let spiral = Spiral::default();
        assert_eq!(spiral.call_by_name("curvex", 0.4), Some(spiral.position(0.4)));
        assert_eq!(spiral.call_by_name("curvey", 0.4), Some(spiral.derivative(0.4)));
        assert_eq!(spiral.call_by_name("curvez", 0.4), None);
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn captured<F: FnOnce()>(f: F) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = capture.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn trace_disabled_by_default() {
        let spiral = Spiral::default();
        assert!(!spiral.config().trace);
        let out = captured(|| {
            let _ = spiral.position(1.0);
            let _ = spiral.derivative(1.0);
        });
        assert!(out.is_empty(), "unexpected trace output: {out}");
    }

    #[test]
    fn trace_enabled_names_function_without_changing_values() {
        let quiet = Spiral::default();
        let loud = Spiral::new(SpiralConfig { trace: true });
        let mut values = Vec::new();
        let out = captured(|| {
            values.push(loud.position(1.5));
            values.push(loud.derivative(1.5));
        });
        assert!(out.contains("curvex"));
        assert!(out.contains("curvey"));
        assert!(out.contains("t=1.5"));
        assert_eq!(values, vec![quiet.position(1.5), quiet.derivative(1.5)]);
    }
}
