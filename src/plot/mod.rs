//! SVG overlay of solver samples on a reference curve.

use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{DataError, PlotError, Result, SpiralError};
use crate::math::Point2;
use crate::tessellation::Polyline;

/// Reference curve drawn as a red line with solver samples as blue dots.
#[derive(Debug, Clone)]
pub struct Overlay {
    reference: Vec<Point2>,
    samples: Vec<Point2>,
    size: (u32, u32),
}

impl Overlay {
    /// Builds an overlay from a sampled reference curve and paired solver output.
    ///
    /// The reference is projected onto its `x`/`y` coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` and `y` differ in length.
    pub fn new(reference: &Polyline, x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(DataError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            }
            .into());
        }
        Ok(Self {
            reference: reference.points.iter().map(|p| Point2::new(p.x, p.y)).collect(),
            samples: x.iter().zip(y).map(|(&x, &y)| Point2::new(x, y)).collect(),
            size: (800, 800),
        })
    }

    /// Sets the output size in pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Number of solver samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Renders the overlay to an SVG file.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to draw or the file cannot be written.
    pub fn render_to_file(&self, path: &Path) -> Result<()> {
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        self.draw(&root)?;
        tracing::info!(path = %path.display(), samples = self.samples.len(), "wrote plot");
        Ok(())
    }

    /// Renders the overlay to an SVG document in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to draw.
    pub fn render_to_string(&self) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            self.draw(&root)?;
        }
        Ok(svg)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let (x_range, y_range) = self.bounds().ok_or(PlotError::NoData)?;

        root.fill(&WHITE).map_err(backend_error)?;
        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .build_cartesian_2d(x_range, y_range)
            .map_err(backend_error)?;

        chart
            .draw_series(LineSeries::new(
                self.reference.iter().map(|p| (p.x, p.y)),
                &RED,
            ))
            .map_err(backend_error)?;
        chart
            .draw_series(
                self.samples
                    .iter()
                    .map(|p| Circle::new((p.x, p.y), 3, BLUE.filled())),
            )
            .map_err(backend_error)?;

        root.present().map_err(backend_error)?;
        Ok(())
    }

    // Padded bounding box of every finite point, or `None` if there is none.
    fn bounds(&self) -> Option<(Range<f64>, Range<f64>)> {
        let mut points = self
            .reference
            .iter()
            .chain(&self.samples)
            .filter(|p| p.x.is_finite() && p.y.is_finite());
        let first = points.next()?;
        let (mut lo, mut hi) = (*first, *first);
        for p in points {
            lo = Point2::new(lo.x.min(p.x), lo.y.min(p.y));
            hi = Point2::new(hi.x.max(p.x), hi.y.max(p.y));
        }
        Some((padded(lo.x, hi.x), padded(lo.y, hi.y)))
    }
}

fn padded(lo: f64, hi: f64) -> Range<f64> {
    let pad = if hi - lo > 0.0 { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad)..(hi + pad)
}

fn backend_error<E: std::fmt::Display>(err: E) -> SpiralError {
    PlotError::Backend(err.to_string()).into()
}
