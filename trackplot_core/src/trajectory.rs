//! Ordered (x, y) paths with gaps for missing samples.

use serde::Serialize;

/// Axis-aligned extent of a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Degenerate bounds around a single point.
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        }
    }
    
    /// Grows the bounds to contain `(x, y)`.
    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }
    
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }
    
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A trajectory sampled in row order. A sample is `None` when either coordinate is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<Option<(f64, f64)>>,
}

impl Trajectory {
    /// Zips two coordinate columns. The shorter column bounds the length.
    pub fn from_columns(xs: &[Option<f64>], ys: &[Option<f64>]) -> Self {
        let samples = xs
            .iter()
            .zip(ys)
            .map(|(x, y)| match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
                _ => None,
            })
            .collect();
        Self { samples }
    }
    
    /// Builds a trajectory from a subset of rows, in the given order.
    pub fn from_rows(xs: &[Option<f64>], ys: &[Option<f64>], rows: &[usize]) -> Self {
        let xs: Vec<Option<f64>> = rows.iter().map(|&r| xs.get(r).copied().flatten()).collect();
        let ys: Vec<Option<f64>> = rows.iter().map(|&r| ys.get(r).copied().flatten()).collect();
        Self::from_columns(&xs, &ys)
    }
    
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    
    /// True when no sample has both coordinates.
    pub fn is_all_missing(&self) -> bool {
        self.samples.iter().all(Option::is_none)
    }
    
    /// Present samples, in order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().flatten().copied()
    }
    
    /// First present sample.
    pub fn start(&self) -> Option<(f64, f64)> {
        self.points().next()
    }
    
    /// Last present sample.
    pub fn end(&self) -> Option<(f64, f64)> {
        self.samples.iter().rev().flatten().next().copied()
    }
    
    /// Maximal runs of consecutive present samples. The drawn path breaks at gaps.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for sample in &self.samples {
            match sample {
                Some(p) => current.push(*p),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
    
    /// Extent of the present samples.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.points();
        let (x, y) = points.next()?;
        let mut bounds = Bounds::point(x, y);
        for (x, y) in points {
            bounds.include(x, y);
        }
        Some(bounds)
    }
}
