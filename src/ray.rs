#![warn(missing_docs)]
//! Module for handling meridional rays and their surface interactions
//!
//! A [`Ray`] is an origin plus a unit direction in the meridional plane. Rays are
//! ephemeral: every refraction produces a fresh ray starting at the intersection
//! point, nothing is mutated in place.
//!
//! The three per-surface operations live here: the ray/arc intersector
//! ([`Ray::intersect_arc`]), the vector-Snell refraction evaluator
//! ([`Ray::refract_on_arc`]) and the iris aperture gate ([`Ray::pass_aperture`]).
//! Their expected non-hit outcomes (geometric miss, total internal reflection,
//! absorption) are encoded as enum variants, not errors.
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::{
    error::{OcellusError, OclResult},
    surface::{ArcSurface, PlanarAperture},
};

/// A light ray in the meridional plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// origin of the ray
    pos: Point2<f64>,
    /// unit propagation direction
    dir: Vector2<f64>,
}
impl Ray {
    /// Creates a new [`Ray`]. The direction vector is normalized.
    ///
    /// # Errors
    ///
    /// This function will return an error if the direction vector has a zero length
    /// or a non-finite component.
    pub fn new(position: Point2<f64>, direction: Vector2<f64>) -> OclResult<Self> {
        if !(direction.x.is_finite() && direction.y.is_finite()) || direction.norm() == 0.0 {
            return Err(OcellusError::Other(
                "direction must be finite and of non-zero length".into(),
            ));
        }
        Ok(Self {
            pos: position,
            dir: direction.normalize(),
        })
    }
    /// Creates a new [`Ray`] from an origin and a propagation angle in radians.
    ///
    /// # Errors
    ///
    /// This function will return an error if the angle is not finite.
    pub fn from_angle(position: Point2<f64>, angle: f64) -> OclResult<Self> {
        Self::new(position, Vector2::new(angle.cos(), angle.sin()))
    }
    /// Returns the origin of this [`Ray`].
    #[must_use]
    pub const fn position(&self) -> Point2<f64> {
        self.pos
    }
    /// Returns the unit direction of this [`Ray`].
    #[must_use]
    pub const fn direction(&self) -> Vector2<f64> {
        self.dir
    }
    /// Returns the propagation angle of this [`Ray`] in radians.
    #[must_use]
    pub fn direction_angle(&self) -> f64 {
        self.dir.y.atan2(self.dir.x)
    }
    /// Intersects this [`Ray`] with an [`ArcSurface`].
    ///
    /// Solves the ray/circle quadratic in the circle frame and picks the nearest
    /// forward intersection (smallest non-negative ray parameter). Returns `None` if
    /// the ray misses the circle entirely, points away from it, or the intersection
    /// falls outside the arc's angular span (the ray passes beside the modelled
    /// surface segment).
    #[must_use]
    pub fn intersect_arc(&self, arc: &ArcSurface) -> Option<Point2<f64>> {
        let local = self.pos - arc.center();
        // dir is unit length, so the quadratic is t^2 + b t + c = 0
        let b = 2.0 * local.dot(&self.dir);
        let c = local.norm_squared() - arc.radius() * arc.radius();
        let discriminant = b.mul_add(b, -4.0 * c);
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let t1 = (-b + sqrt_d) / 2.0;
        let t2 = (-b - sqrt_d) / 2.0;
        let t = match (t1 >= 0.0, t2 >= 0.0) {
            (true, true) => t1.min(t2),
            (true, false) => t1,
            (false, true) => t2,
            // both intersections behind the origin
            (false, false) => return None,
        };
        let point = self.pos + t * self.dir;
        let theta = (point.y - arc.center().y).atan2(point.x - arc.center().x);
        arc.contains_angle(theta).then_some(point)
    }
    /// Refracts this [`Ray`] on an [`ArcSurface`] using Snell's law in vector form.
    ///
    /// `eta` is the refractive index ratio `n_incident / n_transmitted`. The surface
    /// normal is taken from the arc's circle at the intersection point and flipped
    /// towards the incident side if necessary, so rays may approach the surface from
    /// either side.
    ///
    /// On success the returned [`ArcInteraction::Refracted`] carries a fresh ray
    /// starting at the intersection point with the refracted direction. If the Snell
    /// discriminant is negative the interface totally reflects; no reflected ray is
    /// modelled and [`ArcInteraction::TotalReflection`] is returned.
    #[must_use]
    pub fn refract_on_arc(&self, arc: &ArcSurface, eta: f64) -> ArcInteraction {
        let Some(point) = self.intersect_arc(arc) else {
            return ArcInteraction::Miss;
        };
        let mut normal = arc.outward_normal_at(&point);
        if self.dir.dot(&normal) > 0.0 {
            normal = -normal;
        }
        let cos_i = -self.dir.dot(&normal);
        let k = (eta * eta).mul_add(-(1.0 - cos_i * cos_i), 1.0);
        if k < 0.0 {
            return ArcInteraction::TotalReflection;
        }
        // T = eta * I + (eta * cos_i - sqrt(k)) * N
        let refracted_dir = eta * self.dir + (eta.mul_add(cos_i, -k.sqrt())) * normal;
        ArcInteraction::Refracted(Self {
            pos: point,
            dir: refracted_dir,
        })
    }
    /// Tests this [`Ray`] against the iris plane of a [`PlanarAperture`].
    ///
    /// A ray crossing the plane strictly inside the pupil gap is transmitted
    /// unchanged (the aperture is non-refractive, no point is recorded). A ray
    /// reaching the plane outside the gap is absorbed at the crossing point. A ray
    /// parallel to the plane or moving away from it never reaches it.
    #[must_use]
    pub fn pass_aperture(&self, aperture: &PlanarAperture) -> ApertureInteraction {
        if self.dir.x == 0.0 {
            // parallel to the iris plane
            return ApertureInteraction::Miss;
        }
        let t = (aperture.x() - self.pos.x) / self.dir.x;
        if t < 0.0 {
            return ApertureInteraction::Miss;
        }
        let y = self.dir.y.mul_add(t, self.pos.y);
        if y.abs() < aperture.inner_half_height() {
            ApertureInteraction::Transmitted
        } else {
            ApertureInteraction::Absorbed(Point2::new(aperture.x(), y))
        }
    }
}

/// Outcome of refracting a [`Ray`] on an [`ArcSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcInteraction {
    /// the ray hit the arc and refracted; the new ray starts at the intersection point
    Refracted(Ray),
    /// the ray hit the arc beyond the critical angle; propagation stops
    TotalReflection,
    /// the ray does not hit the arc within its angular span
    Miss,
}

/// Outcome of testing a [`Ray`] against a [`PlanarAperture`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApertureInteraction {
    /// the ray crosses the plane inside the pupil gap and continues unchanged
    Transmitted,
    /// the ray is absorbed by the iris tissue at the given point
    Absorbed(Point2<f64>),
    /// the ray never reaches the iris plane
    Miss,
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use assert_matches::assert_matches;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn right_half_circle(radius: f64) -> ArcSurface {
        ArcSurface::new(Point2::origin(), radius, -FRAC_PI_2, FRAC_PI_2).unwrap()
    }
    #[test]
    fn new() {
        assert!(Ray::new(Point2::origin(), Vector2::new(0.0, 0.0)).is_err());
        assert!(Ray::new(Point2::origin(), Vector2::new(f64::NAN, 1.0)).is_err());
        assert!(Ray::new(Point2::origin(), Vector2::new(0.0, f64::INFINITY)).is_err());
        let ray = Ray::new(Point2::origin(), Vector2::new(3.0, 0.0)).unwrap();
        assert_abs_diff_eq!(ray.direction().norm(), 1.0);
    }
    #[test]
    fn from_angle() {
        assert!(Ray::from_angle(Point2::origin(), f64::NAN).is_err());
        let ray = Ray::from_angle(Point2::new(1.0, 2.0), FRAC_PI_2).unwrap();
        assert_abs_diff_eq!(ray.direction().x, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(ray.direction().y, 1.0);
        assert_abs_diff_eq!(ray.direction_angle(), FRAC_PI_2);
    }
    #[test]
    fn intersect_nearest_forward() {
        let arc = ArcSurface::new(Point2::origin(), 1.0, 0.0, 6.2831).unwrap();
        let ray = Ray::new(Point2::new(-5.0, 0.0), Vector2::new(1.0, 0.0)).unwrap();
        let point = ray.intersect_arc(&arc).unwrap();
        assert_abs_diff_eq!(point.x, -1.0);
        assert_abs_diff_eq!(point.y, 0.0);
    }
    #[test]
    fn intersect_from_inside() {
        let arc = right_half_circle(1.0);
        let ray = Ray::new(Point2::origin(), Vector2::new(1.0, 0.0)).unwrap();
        let point = ray.intersect_arc(&arc).unwrap();
        assert_abs_diff_eq!(point.x, 1.0);
    }
    #[test]
    fn intersect_pointing_away() {
        let arc = right_half_circle(1.0);
        let ray = Ray::new(Point2::new(5.0, 0.0), Vector2::new(1.0, 0.0)).unwrap();
        assert_eq!(ray.intersect_arc(&arc), None);
    }
    #[test]
    fn intersect_beside_span() {
        // circle is hit on its left side which is outside the modelled right half
        let arc = right_half_circle(1.0);
        let ray = Ray::new(Point2::new(-5.0, 0.0), Vector2::new(1.0, 0.0)).unwrap();
        assert_eq!(ray.intersect_arc(&arc), None);
    }
    #[test]
    fn intersect_no_overlap() {
        let arc = right_half_circle(1.0);
        let ray = Ray::new(Point2::new(-5.0, 3.0), Vector2::new(1.0, 0.0)).unwrap();
        assert_eq!(ray.intersect_arc(&arc), None);
    }
    #[test]
    fn intersect_wrapping_span() {
        // the right-half span wraps through 0; a hit at angle slightly below 2π counts
        let arc = right_half_circle(1.0);
        let ray = Ray::new(Point2::origin(), Vector2::new(1.0, -0.1)).unwrap();
        let point = ray.intersect_arc(&arc).unwrap();
        assert!(point.x > 0.0);
        assert!(point.y < 0.0);
    }
    #[test]
    fn refract_normal_incidence() {
        let arc = ArcSurface::new(Point2::origin(), 1.0, PI - 0.5, PI + 0.5).unwrap();
        let ray = Ray::new(Point2::new(-10.0, 0.0), Vector2::new(1.0, 0.0)).unwrap();
        let interaction = ray.refract_on_arc(&arc, 1.0 / 1.5);
        let refracted = assert_matches!(interaction, ArcInteraction::Refracted(r) => r);
        assert_abs_diff_eq!(refracted.position().x, -1.0);
        assert_abs_diff_eq!(refracted.position().y, 0.0);
        // normal incidence passes straight through for any index ratio
        assert_relative_eq!(refracted.direction().x, 1.0);
        assert_abs_diff_eq!(refracted.direction().y, 0.0);
    }
    #[test]
    fn refract_tangential_scaling() {
        // hit (1, 0) from inside with 30° incidence; the normal there is the x axis
        let arc = right_half_circle(1.0);
        let dir = Vector2::new(30.0_f64.to_radians().cos(), 30.0_f64.to_radians().sin());
        let origin = Point2::new(1.0, 0.0) - 0.5 * dir;
        let eta = 1.5;
        let ray = Ray::new(origin, dir).unwrap();
        let refracted =
            assert_matches!(ray.refract_on_arc(&arc, eta), ArcInteraction::Refracted(r) => r);
        // the tangential direction component scales by eta, the result stays unit length
        assert_relative_eq!(refracted.direction().y, eta * dir.y, epsilon = 1e-12);
        assert_relative_eq!(refracted.direction().norm(), 1.0, epsilon = 1e-12);
    }
    #[test]
    fn refract_total_internal_reflection() {
        // n1 = 1.5 against n2 = 1.0: critical angle is asin(1/1.5) ≈ 41.8°
        let arc = right_half_circle(1.0);
        let steep = Vector2::new(60.0_f64.to_radians().cos(), 60.0_f64.to_radians().sin());
        let ray = Ray::new(Point2::new(1.0, 0.0) - 0.5 * steep, steep).unwrap();
        assert_matches!(ray.refract_on_arc(&arc, 1.5), ArcInteraction::TotalReflection);
        // infinitesimally below the critical angle the ray still refracts
        let critical = (1.0_f64 / 1.5).asin() - 1e-9;
        let shallow = Vector2::new(critical.cos(), critical.sin());
        let ray = Ray::new(Point2::new(1.0, 0.0) - 0.5 * shallow, shallow).unwrap();
        assert_matches!(ray.refract_on_arc(&arc, 1.5), ArcInteraction::Refracted(_));
    }
    #[test]
    fn refract_miss() {
        let arc = right_half_circle(1.0);
        let ray = Ray::new(Point2::new(5.0, 0.0), Vector2::new(1.0, 0.0)).unwrap();
        assert_matches!(ray.refract_on_arc(&arc, 1.5), ArcInteraction::Miss);
    }
    #[test]
    fn aperture_transmitted() {
        let aperture = PlanarAperture::new(10.0, 2.0, 5.0).unwrap();
        let ray = Ray::new(Point2::new(0.0, 1.0), Vector2::new(1.0, 0.0)).unwrap();
        assert_matches!(ray.pass_aperture(&aperture), ApertureInteraction::Transmitted);
    }
    #[test]
    fn aperture_absorbed() {
        let aperture = PlanarAperture::new(10.0, 2.0, 5.0).unwrap();
        let ray = Ray::new(Point2::new(0.0, 3.0), Vector2::new(1.0, 0.0)).unwrap();
        let point =
            assert_matches!(ray.pass_aperture(&aperture), ApertureInteraction::Absorbed(p) => p);
        assert_abs_diff_eq!(point.x, 10.0);
        assert_abs_diff_eq!(point.y, 3.0);
        // oblique ray: the absorption point is exactly the plane crossing
        let ray = Ray::new(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.5)).unwrap();
        let point =
            assert_matches!(ray.pass_aperture(&aperture), ApertureInteraction::Absorbed(p) => p);
        assert_abs_diff_eq!(point.x, 10.0);
        assert_abs_diff_eq!(point.y, 5.0, epsilon = 1e-12);
    }
    #[test]
    fn aperture_parallel_or_backward() {
        let aperture = PlanarAperture::new(10.0, 2.0, 5.0).unwrap();
        let parallel = Ray::new(Point2::new(0.0, 0.0), Vector2::new(0.0, 1.0)).unwrap();
        assert_matches!(parallel.pass_aperture(&aperture), ApertureInteraction::Miss);
        let backward = Ray::new(Point2::new(20.0, 0.0), Vector2::new(1.0, 0.0)).unwrap();
        assert_matches!(backward.pass_aperture(&aperture), ApertureInteraction::Miss);
    }
}
