/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `count` evenly spaced values over `[start, end]`, endpoints included.
///
/// A `count` of one yields `[start]`; zero yields an empty vector.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Central finite difference `(f(t + h) - f(t - h)) / 2h`.
pub fn central_difference<F>(f: F, t: f64, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(t + h) - f(t - h)) / (2.0 * h)
}
