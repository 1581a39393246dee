#![warn(missing_docs)]
//! Module for scoring the convergence quality of a traced ray bundle
//!
//! The focus score condenses the terminal points of a bundle into a single scalar in
//! `(0, 100]`: 100 for perfect convergence, approaching 0 the wider the terminal
//! points scatter. Only rays whose terminal point lies past the eye center (positive
//! x in the eye-centered frame) count; rays absorbed at the iris or lost at an
//! earlier interface do not reach the imaging region.
use nalgebra::Point2;

use crate::tracer::RayPath;

/// Computes the focus score of a traced ray bundle.
///
/// The score is `100 / (1 + d)` where `d` is the mean Euclidean distance of the
/// qualifying terminal points from their centroid. Degenerate cases: without any
/// qualifying ray the convergence is undefined and the score is 0; a single
/// qualifying ray trivially converges and scores 100.
#[must_use]
pub fn focus_score(paths: &[RayPath]) -> f64 {
    let terminals: Vec<Point2<f64>> = paths
        .iter()
        .filter_map(RayPath::terminal_point)
        .filter(|p| p.x > 0.0)
        .collect();
    match terminals.len() {
        0 => 0.0,
        1 => 100.0,
        n => {
            let n = n as f64;
            let centroid = Point2::new(
                terminals.iter().map(|p| p.x).sum::<f64>() / n,
                terminals.iter().map(|p| p.y).sum::<f64>() / n,
            );
            let mean_distance = terminals
                .iter()
                .map(|p| (*p - centroid).norm())
                .sum::<f64>()
                / n;
            100.0 / (1.0 + mean_distance)
        }
    }
}
