#![warn(missing_docs)]
//! Module for handling the refractive surface descriptors
//!
//! An [`ArcSurface`] models one refractive interface of the eye as a circular-arc
//! segment in the meridional plane. A [`PlanarAperture`] models the iris plane: a
//! vertical line with a central transmissive gap (the pupil) between two absorbing
//! segments.
//!
//! Angular spans may wrap through the 0 / 2π boundary. The membership test handles
//! wrapping spans identically to plain ones:
//! ```rust
//! use std::f64::consts::PI;
//! use nalgebra::Point2;
//! use ocellus::surface::ArcSurface;
//!
//! let arc = ArcSurface::new(Point2::origin(), 1.0, 1.5 * PI, 0.5 * PI).unwrap();
//! assert!(arc.contains_angle(0.0));
//! assert!(!arc.contains_angle(PI));
//! ```
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::{
    error::{OcellusError, OclResult},
    geometry::normalize_angle,
};

/// A circular-arc segment modelling one refractive interface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSurface {
    center: Point2<f64>,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
}
impl ArcSurface {
    /// Creates a new [`ArcSurface`] from its center, radius and angular bounds.
    ///
    /// The angular bounds are given in radians. The span runs counterclockwise from
    /// `start_angle` to `end_angle` and may wrap through 0.
    ///
    /// # Errors
    ///
    /// This function will return an error if the radius is non-positive, `NaN` or
    /// infinite, or if an angular bound is not finite.
    pub fn new(
        center: Point2<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> OclResult<Self> {
        if !(radius.is_normal() && radius.is_sign_positive()) {
            return Err(OcellusError::Geometry("radius must be positive".into()));
        }
        if !(start_angle.is_finite() && end_angle.is_finite()) {
            return Err(OcellusError::Geometry(
                "angular bounds must be finite".into(),
            ));
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            end_angle,
        })
    }
    /// Returns the center of this [`ArcSurface`].
    #[must_use]
    pub const fn center(&self) -> Point2<f64> {
        self.center
    }
    /// Returns the radius of this [`ArcSurface`].
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }
    /// Returns the start angle of this [`ArcSurface`] in radians.
    #[must_use]
    pub const fn start_angle(&self) -> f64 {
        self.start_angle
    }
    /// Returns the end angle of this [`ArcSurface`] in radians.
    #[must_use]
    pub const fn end_angle(&self) -> f64 {
        self.end_angle
    }
    /// Checks whether a polar angle (about the arc center) lies on this arc.
    ///
    /// Both the given angle and the angular bounds are normalized into `[0, 2π)`
    /// first; a span whose normalized start exceeds its normalized end is interpreted
    /// as wrapping through 0.
    #[must_use]
    pub fn contains_angle(&self, angle: f64) -> bool {
        let a0 = normalize_angle(self.start_angle);
        let a1 = normalize_angle(self.end_angle);
        let a = normalize_angle(angle);
        if a0 <= a1 {
            a >= a0 && a <= a1
        } else {
            // span crosses the zero line
            a >= a0 || a <= a1
        }
    }
    /// Returns the outward unit normal of the arc's circle at the given point.
    ///
    /// The point is assumed to lie on the circle; the normal points away from the
    /// center.
    #[must_use]
    pub fn outward_normal_at(&self, point: &Point2<f64>) -> Vector2<f64> {
        (point - self.center) / self.radius
    }
}

/// The iris plane: a vertical line at `x` with a central transmissive gap.
///
/// Rays crossing the plane strictly within the inner half-height (the pupil radius)
/// pass unrefracted; rays crossing outside of it are absorbed by the iris tissue. The
/// outer half-height gives the vertical extent of the iris for rendering purposes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarAperture {
    x: f64,
    inner_half_height: f64,
    outer_half_height: f64,
}
impl PlanarAperture {
    /// Creates a new [`PlanarAperture`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the half-heights are non-positive, not
    /// finite or the inner one exceeds the outer one, or if `x` is not finite.
    pub fn new(x: f64, inner_half_height: f64, outer_half_height: f64) -> OclResult<Self> {
        if !x.is_finite() {
            return Err(OcellusError::Geometry("x must be finite".into()));
        }
        if !(inner_half_height.is_normal() && inner_half_height.is_sign_positive())
            || !(outer_half_height.is_normal() && outer_half_height.is_sign_positive())
        {
            return Err(OcellusError::Geometry(
                "half-heights must be positive".into(),
            ));
        }
        if inner_half_height > outer_half_height {
            return Err(OcellusError::Geometry(
                "inner half-height must not exceed the outer one".into(),
            ));
        }
        Ok(Self {
            x,
            inner_half_height,
            outer_half_height,
        })
    }
    /// Returns the x position of the iris plane.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }
    /// Returns the pupil radius (inner half-height of the iris).
    #[must_use]
    pub const fn inner_half_height(&self) -> f64 {
        self.inner_half_height
    }
    /// Returns the vertical iris extent (outer half-height).
    #[must_use]
    pub const fn outer_half_height(&self) -> f64 {
        self.outer_half_height
    }
}
