#![warn(missing_docs)]
//! Module for deriving the refractive surface geometry of the schematic eye
//!
//! [`build_surfaces`] derives all arc and aperture descriptors of the five optical
//! interfaces from an [`OpticalParameters`] snapshot using closed-form trigonometric
//! identities only. The derivation is a pure function of the snapshot and is rerun
//! wholesale on every parameter change.
//!
//! The coordinate frame is centered on the eye: the eye center is at the origin, light
//! travels toward +x and the cornea sits on the −x side.
//!
//! The lens radii and fillet radius use fixed empirical calibration constants
//! reproducing the visual behavior of the model. They carry no physical derivation and
//! must not be "corrected".
use std::f64::consts::FRAC_PI_6;

use log::warn;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{
    error::OclResult,
    geometry::{chord_half_angle, chord_x_offset},
    parameters::OpticalParameters,
    surface::{ArcSurface, PlanarAperture},
};

/// Fixed half-opening angle of the sclera toward the cornea.
pub const SCLERA_OPENING_ANGLE: f64 = FRAC_PI_6;
/// Inward offset of the vitreous boundary from the scleral shell.
const VITREOUS_INSET: f64 = 2.5;
/// Inward offset of the retina from the vitreous boundary.
const RETINA_INSET: f64 = 2.0;
/// Fixed angular span of the retina arc, centered on the eye axis.
const RETINA_SPAN: f64 = 1.5 * std::f64::consts::PI;
/// Axial thickness of the iris; the lens sits directly behind it.
const IRIS_THICKNESS: f64 = 4.0;
/// Half thickness of the cornea shell: the front surface sits this far beyond the
/// nominal curvature radius, the back surface this far inside it.
const CORNEA_SHELL_OFFSET: f64 = 2.0;
/// Calibration coefficient for the front lens radius (`0.2 * h^1.5`).
const LENS_FRONT_COEFF: f64 = 0.2;
/// Calibration coefficient for the back lens radius (`0.13 * h^1.5`).
const LENS_BACK_COEFF: f64 = 0.13;
/// Calibration coefficient for the lens fillet radius (`600 / h`).
const LENS_FILLET_COEFF: f64 = 600.0;

/// The refractive surface set of one eye, in propagation order.
///
/// Derived by [`build_surfaces`]; never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeSurfaces {
    /// front (outer) cornea arc, first interface hit by an incoming ray
    pub cornea: ArcSurface,
    /// back (inner) cornea arc bounding the aqueous humor
    pub aqueous: ArcSurface,
    /// iris plane with the pupil gap
    pub iris: PlanarAperture,
    /// front arc of the crystalline lens
    pub lens_front: ArcSurface,
    /// back arc of the crystalline lens
    pub lens_back: ArcSurface,
    /// retina arc; final, absorbing interface
    pub retina: ArcSurface,
}

/// Non-refractive anatomy arcs, for the external rendering collaborator.
///
/// These take no part in ray tracing; they complete the silhouette of the eye
/// (scleral shell, vitreous boundary, cornea mid-shell and the two fillet arcs
/// joining the lens surfaces without discontinuities).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeOutline {
    /// scleral shell (main eye outline)
    pub sclera: ArcSurface,
    /// vitreous chamber boundary
    pub vitreous: ArcSurface,
    /// cornea mid-shell arc at the nominal curvature radius
    pub cornea_shell: ArcSurface,
    /// fillet arc joining the lens surfaces on the upper seam
    pub lens_upper_fillet: ArcSurface,
    /// fillet arc joining the lens surfaces on the lower seam
    pub lens_lower_fillet: ArcSurface,
}

/// Clamp a parameter snapshot such that all chord constructions below are valid.
///
/// The chord helpers fail (NaN) if a chord height exceeds the circle diameter. Three
/// inputs can violate this: a cornea curvature radius smaller than the scleral opening
/// half-height, a lens height so small that its own chord no longer fits on the derived
/// lens radii, and a pupil wider than the iris extent.
fn clamp_params(params: &OpticalParameters) -> OpticalParameters {
    let mut clamped = *params;
    let sclera_end_y = params.eye_radius() * SCLERA_OPENING_ANGLE.sin();
    if clamped.cornea_radius < sclera_end_y {
        warn!(
            "cornea radius {} below scleral opening half-height, clamping to {}",
            clamped.cornea_radius, sclera_end_y
        );
        clamped.cornea_radius = sclera_end_y;
    }
    // h/2 <= LENS_BACK_COEFF * h^1.5 (the smaller of the two lens radii) requires
    // h >= (1 / (2 * LENS_BACK_COEFF))^2
    let min_lens_height = (1.0 / (2.0 * LENS_BACK_COEFF)).powi(2);
    if clamped.lens_height < min_lens_height {
        warn!(
            "lens height {} below chord limit, clamping to {}",
            clamped.lens_height, min_lens_height
        );
        clamped.lens_height = min_lens_height;
    }
    if clamped.pupil_diameter / 2.0 > sclera_end_y {
        warn!(
            "pupil radius {} exceeds iris extent, clamping to {}",
            clamped.pupil_diameter / 2.0,
            sclera_end_y
        );
        clamped.pupil_diameter = 2.0 * sclera_end_y;
    }
    clamped
}

/// Derives the refractive surface set from a parameter snapshot.
///
/// Out-of-range inputs are clamped (with a log warning) before derivation, see
/// [`clamp_params`].
///
/// # Errors
///
/// This function will return an error if a derived arc degenerates (e.g. the eye is
/// too small to hold the retina inside the vitreous boundary).
pub fn build_surfaces(params: &OpticalParameters) -> OclResult<EyeSurfaces> {
    let params = clamp_params(params);
    let eye_radius = params.eye_radius();
    let lens_height = params.lens_height;

    let sclera_end_x = -eye_radius * SCLERA_OPENING_ANGLE.cos();
    let sclera_end_y = eye_radius * SCLERA_OPENING_ANGLE.sin();

    let cornea_arc_angle = (sclera_end_y / params.cornea_radius).asin();
    let cornea_center_x = -params.cornea_radius * cornea_arc_angle.cos();
    let cornea_center = Point2::new(sclera_end_x - cornea_center_x, 0.0);
    let cornea = ArcSurface::new(
        cornea_center,
        params.cornea_radius + CORNEA_SHELL_OFFSET,
        std::f64::consts::PI - cornea_arc_angle,
        std::f64::consts::PI + cornea_arc_angle,
    )?;
    let aqueous = ArcSurface::new(
        cornea_center,
        params.cornea_radius - CORNEA_SHELL_OFFSET,
        std::f64::consts::PI - cornea_arc_angle,
        std::f64::consts::PI + cornea_arc_angle,
    )?;

    let iris_x = sclera_end_x;
    let iris = PlanarAperture::new(iris_x, params.pupil_diameter / 2.0, sclera_end_y)?;

    let lens_position = iris_x + IRIS_THICKNESS;
    let lens_front_radius = lens_height.powf(1.5) * LENS_FRONT_COEFF;
    let lens_back_radius = lens_height.powf(1.5) * LENS_BACK_COEFF;
    let lens_fillet = LENS_FILLET_COEFF / lens_height;
    let lens_front_angle = chord_half_angle(lens_front_radius, lens_height);
    let lens_back_angle = chord_half_angle(lens_back_radius, lens_height);
    let lens_front = ArcSurface::new(
        Point2::new(lens_position + lens_front_radius, 0.0),
        lens_front_radius,
        std::f64::consts::PI - lens_front_angle,
        std::f64::consts::PI + lens_front_angle,
    )?;
    let lens_back_center_x = lens_position + lens_front_radius
        - chord_x_offset(lens_front_radius, lens_height)
        - chord_x_offset(lens_back_radius, lens_height)
        + lens_fillet;
    let lens_back = ArcSurface::new(
        Point2::new(lens_back_center_x, 0.0),
        lens_back_radius,
        -lens_back_angle,
        lens_back_angle,
    )?;

    let retina = ArcSurface::new(
        Point2::origin(),
        eye_radius - VITREOUS_INSET - RETINA_INSET,
        -RETINA_SPAN / 2.0,
        RETINA_SPAN / 2.0,
    )?;

    Ok(EyeSurfaces {
        cornea,
        aqueous,
        iris,
        lens_front,
        lens_back,
        retina,
    })
}

/// Derives the non-refractive anatomy arcs from a parameter snapshot.
///
/// Uses the same clamping rules as [`build_surfaces`].
///
/// # Errors
///
/// This function will return an error if a derived arc degenerates.
pub fn build_outline(params: &OpticalParameters) -> OclResult<EyeOutline> {
    let params = clamp_params(params);
    let eye_radius = params.eye_radius();
    let lens_height = params.lens_height;
    let pi = std::f64::consts::PI;

    let sclera = ArcSurface::new(
        Point2::origin(),
        eye_radius,
        pi + SCLERA_OPENING_ANGLE,
        pi - SCLERA_OPENING_ANGLE,
    )?;
    let vitreous = ArcSurface::new(
        Point2::origin(),
        eye_radius - VITREOUS_INSET,
        pi + SCLERA_OPENING_ANGLE,
        pi - SCLERA_OPENING_ANGLE,
    )?;

    let sclera_end_x = -eye_radius * SCLERA_OPENING_ANGLE.cos();
    let sclera_end_y = eye_radius * SCLERA_OPENING_ANGLE.sin();
    let cornea_arc_angle = (sclera_end_y / params.cornea_radius).asin();
    let cornea_center_x = -params.cornea_radius * cornea_arc_angle.cos();
    let cornea_shell = ArcSurface::new(
        Point2::new(sclera_end_x - cornea_center_x, 0.0),
        params.cornea_radius,
        pi - cornea_arc_angle,
        pi + cornea_arc_angle,
    )?;

    // The fillet arcs bridge the seam between the front and back lens arcs. Their
    // radius carries an extra 1.1 factor so that the fillet chord sits slightly
    // inside its circle.
    let lens_position = sclera_end_x + IRIS_THICKNESS;
    let lens_front_radius = lens_height.powf(1.5) * LENS_FRONT_COEFF;
    let lens_fillet = LENS_FILLET_COEFF / lens_height;
    let fillet_radius = 1.1 * lens_fillet / 2.0;
    let fillet_angle = chord_half_angle(fillet_radius, lens_fillet);
    let fillet_x = lens_position + lens_front_radius
        - chord_x_offset(lens_front_radius, lens_height)
        + lens_fillet / 2.0;
    let fillet_y = lens_height / 2.0 - chord_x_offset(fillet_radius, lens_fillet);
    let lens_upper_fillet = ArcSurface::new(
        Point2::new(fillet_x, fillet_y),
        fillet_radius,
        pi / 2.0 - fillet_angle,
        pi / 2.0 + fillet_angle,
    )?;
    let lens_lower_fillet = ArcSurface::new(
        Point2::new(fillet_x, -fillet_y),
        fillet_radius,
        -pi / 2.0 - fillet_angle,
        -pi / 2.0 + fillet_angle,
    )?;

    Ok(EyeOutline {
        sclera,
        vitreous,
        cornea_shell,
        lens_upper_fillet,
        lens_lower_fillet,
    })
}
