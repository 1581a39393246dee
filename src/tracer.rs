#![warn(missing_docs)]
//! Module for tracing rays through the surface sequence of the eye
//!
//! [`trace_ray`] chains the intersector, the refraction evaluator and the aperture
//! gate across the ordered interfaces (cornea front, cornea back, iris, lens front,
//! lens back, retina) into one polyline per ray. The pipeline is strictly sequential:
//! a geometric miss, a total internal reflection or an iris absorption terminates the
//! path at the last recorded point; none of these conditions is an error.
//!
//! [`trace_bundle`] fans a bundle of rays across the pupil region (collimated for a
//! distant source, divergent for a near one), traces every ray independently in
//! parallel and aggregates the terminal points into a focus score. No ray reads
//! another ray's state; the only synchronization is the join before scoring.
use log::debug;
use nalgebra::Point2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{OcellusError, OclResult},
    eye::EyeSurfaces,
    focus::focus_score,
    parameters::{OpticalParameters, RefractiveIndices},
    ray::{ApertureInteraction, ArcInteraction, Ray},
};

/// Source distances above this threshold are treated as infinitely far away and
/// produce a collimated (parallel) ray fan.
pub const COLLIMATED_DISTANCE_THRESHOLD: f64 = 999.0;
/// The ray fan covers this fraction of the eye radius on either side of the axis.
pub const RAY_SPREAD_FACTOR: f64 = 0.8;
/// Index ratio of the retina step. The retina is a pure absorber in this model: the
/// unit ratio makes total internal reflection impossible there, so every in-span
/// retina intersection records a terminal point.
const RETINA_ETA: f64 = 1.0;

/// The polyline of one traced ray: its launch origin followed by each surface hit in
/// propagation order.
///
/// A path ends early when the ray misses a surface segment, is absorbed by the iris
/// or is totally internally reflected. It is recomputed from scratch on every trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayPath {
    points: Vec<Point2<f64>>,
}
impl RayPath {
    /// Creates a new [`RayPath`] holding only the launch origin.
    #[must_use]
    pub fn new(origin: Point2<f64>) -> Self {
        Self {
            points: vec![origin],
        }
    }
    pub(crate) fn push(&mut self, point: Point2<f64>) {
        self.points.push(point);
    }
    /// Returns the points of this [`RayPath`] in propagation order.
    #[must_use]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }
    /// Returns the terminal point of this [`RayPath`].
    ///
    /// This is the launch origin if the ray hit nothing at all. `None` only occurs
    /// for a deserialized path with an empty point list; traced paths always hold at
    /// least their origin.
    #[must_use]
    pub fn terminal_point(&self) -> Option<Point2<f64>> {
        self.points.last().copied()
    }
    /// Returns the number of recorded points (origin included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }
    /// Returns `true` if this path holds no points. A traced path always holds at
    /// least its origin.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The result of tracing one ray bundle: all per-ray polylines plus the aggregate
/// focus score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleTrace {
    /// one polyline per launched ray, in launch order
    pub paths: Vec<RayPath>,
    /// aggregate convergence quality in `[0, 100]`
    pub focus_score: f64,
}

/// Traces a single ray through the surface sequence of the eye.
///
/// The trace runs the fixed interface order: cornea front, cornea back, iris, lens
/// front, lens back, retina. The retina is the absorbing terminal interface and uses
/// the fixed unit index ratio [`RETINA_ETA`], so a steep retina hit is recorded like
/// any other instead of being reflected.
#[must_use]
pub fn trace_ray(ray: &Ray, surfaces: &EyeSurfaces, indices: &RefractiveIndices) -> RayPath {
    let mut path = RayPath::new(ray.position());
    let ArcInteraction::Refracted(ray) =
        ray.refract_on_arc(&surfaces.cornea, indices.air / indices.cornea)
    else {
        return path;
    };
    path.push(ray.position());
    let ArcInteraction::Refracted(ray) =
        ray.refract_on_arc(&surfaces.aqueous, indices.cornea / indices.aqueous)
    else {
        return path;
    };
    path.push(ray.position());
    match ray.pass_aperture(&surfaces.iris) {
        ApertureInteraction::Transmitted => {}
        ApertureInteraction::Absorbed(point) => {
            path.push(point);
            return path;
        }
        ApertureInteraction::Miss => return path,
    }
    let ArcInteraction::Refracted(ray) =
        ray.refract_on_arc(&surfaces.lens_front, indices.aqueous / indices.lens)
    else {
        return path;
    };
    path.push(ray.position());
    let ArcInteraction::Refracted(ray) =
        ray.refract_on_arc(&surfaces.lens_back, indices.lens / indices.vitreous)
    else {
        return path;
    };
    path.push(ray.position());
    if let ArcInteraction::Refracted(ray) = ray.refract_on_arc(&surfaces.retina, RETINA_ETA) {
        path.push(ray.position());
    }
    path
}

/// Generates the launch rays of a bundle fanned across the front of the eye.
///
/// All rays start at `x = -(eye radius) - (source distance)`. For a source farther
/// than [`COLLIMATED_DISTANCE_THRESHOLD`] the rays are collimated at evenly spaced
/// heights; for a nearer source they diverge from a single on-axis point, each aimed
/// at one of the evenly spaced heights. A single-ray bundle launches on the optical
/// axis. For a source closer than the fan spread the outermost rays are pinned to
/// vertical; they miss the eye and terminate at their origin.
///
/// # Errors
///
/// This function will return an error if `ray_count` is zero.
pub fn generate_rays(
    ray_count: usize,
    eye_radius: f64,
    source_distance: f64,
) -> OclResult<Vec<Ray>> {
    if ray_count == 0 {
        return Err(OcellusError::Parameters("ray count must be >0".into()));
    }
    let start_x = -eye_radius - source_distance;
    let spread = eye_radius * RAY_SPREAD_FACTOR;
    let interval = if ray_count > 1 {
        2.0 * spread / (ray_count - 1) as f64
    } else {
        0.0
    };
    let mut rays = Vec::with_capacity(ray_count);
    for i in 0..ray_count {
        let height = if ray_count > 1 {
            (i as f64).mul_add(interval, -spread)
        } else {
            0.0
        };
        let ray = if source_distance > COLLIMATED_DISTANCE_THRESHOLD {
            Ray::from_angle(Point2::new(start_x, height), 0.0)?
        } else {
            // a source closer than the fan spread would put the asin argument out of
            // range; clamping pins those rays to +-90 deg, where they miss the eye
            let sine = (height / source_distance).clamp(-1.0, 1.0);
            Ray::from_angle(Point2::new(start_x, 0.0), sine.asin())?
        };
        rays.push(ray);
    }
    Ok(rays)
}

/// Traces a full ray bundle and scores its convergence.
///
/// Composes [`generate_rays`], [`trace_ray`] for every ray (in parallel, rays are
/// independent) and [`focus_score`] over the joined terminal points.
///
/// # Errors
///
/// This function will return an error if `ray_count` is zero.
pub fn trace_bundle(
    ray_count: usize,
    params: &OpticalParameters,
    surfaces: &EyeSurfaces,
) -> OclResult<BundleTrace> {
    let rays = generate_rays(ray_count, params.eye_radius(), params.light_source_distance)?;
    let paths: Vec<RayPath> = rays
        .par_iter()
        .map(|ray| trace_ray(ray, surfaces, &params.indices))
        .collect();
    for (i, path) in paths.iter().enumerate() {
        if let Some(terminal) = path.terminal_point() {
            debug!(
                "ray {i} terminated at ({:.2}, {:.2}) after {} points",
                terminal.x,
                terminal.y,
                path.len()
            );
        }
    }
    let focus_score = focus_score(&paths);
    Ok(BundleTrace { paths, focus_score })
}
