#![warn(missing_docs)]
//! Module for handling the optical parameter snapshot of the eye model
//!
//! An [`OpticalParameters`] value is an immutable snapshot of all scalar inputs of the
//! simulation: the four anatomical lengths, the light source distance and the five
//! refractive indices. External parameter inputs (sliders etc.) construct a fresh
//! snapshot on every change; the surface builder and the ray tracer are pure functions
//! of one snapshot.
//!
//! All lengths are stored in render units. The [`OpticalParameters::from_millimeters`]
//! constructor applies the fixed millimeter-to-render-unit translation factors of the
//! model calibration.
use serde::{Deserialize, Serialize};

use crate::error::{OcellusError, OclResult};

/// Millimeter to render unit factor for the eye diameter.
pub const EYE_SIZE_SCALE: f64 = 6.0;
/// Millimeter to render unit factor for the cornea curvature radius.
pub const CORNEA_RADIUS_SCALE: f64 = 8.0;
/// Millimeter to render unit factor for the pupil diameter.
pub const PUPIL_SIZE_SCALE: f64 = 8.0;
/// Millimeter to render unit factor for the axial lens height.
pub const LENS_HEIGHT_SCALE: f64 = 10.0;
/// Millimeter to render unit factor for the light source distance.
pub const LIGHT_SOURCE_DISTANCE_SCALE: f64 = 1.0;

/// Refractive indices of the five media a ray passes through.
///
/// All indices are dimensionless and must be >= 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefractiveIndices {
    /// index of the surrounding air
    pub air: f64,
    /// index of the cornea tissue
    pub cornea: f64,
    /// index of the aqueous humor (anterior chamber)
    pub aqueous: f64,
    /// index of the crystalline lens
    pub lens: f64,
    /// index of the vitreous humor
    pub vitreous: f64,
}
impl RefractiveIndices {
    /// Creates new [`RefractiveIndices`].
    ///
    /// # Errors
    ///
    /// This function will return an error if any index is < 1.0 or not finite.
    pub fn new(air: f64, cornea: f64, aqueous: f64, lens: f64, vitreous: f64) -> OclResult<Self> {
        for index in [air, cornea, aqueous, lens, vitreous] {
            if index < 1.0 || !index.is_finite() {
                return Err(OcellusError::Parameters(
                    "refractive index must be >=1.0 and finite".into(),
                ));
            }
        }
        Ok(Self {
            air,
            cornea,
            aqueous,
            lens,
            vitreous,
        })
    }
}
impl Default for RefractiveIndices {
    fn default() -> Self {
        Self {
            air: 1.0003,
            cornea: 1.38,
            aqueous: 1.336,
            lens: 1.42,
            vitreous: 1.336,
        }
    }
}

/// Immutable snapshot of all scalar simulation inputs.
///
/// Lengths are in render units, see the module documentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalParameters {
    /// overall eye diameter
    pub eye_diameter: f64,
    /// curvature radius of the cornea
    pub cornea_radius: f64,
    /// diameter of the pupil (the transmissive gap of the iris)
    pub pupil_diameter: f64,
    /// axial height of the crystalline lens
    pub lens_height: f64,
    /// distance of the light source from the front of the eye
    pub light_source_distance: f64,
    /// refractive indices of the traversed media
    pub indices: RefractiveIndices,
}
impl OpticalParameters {
    /// Creates new [`OpticalParameters`] with all lengths given in render units.
    ///
    /// # Errors
    ///
    /// This function will return an error if any length is non-positive or not finite.
    pub fn new(
        eye_diameter: f64,
        cornea_radius: f64,
        pupil_diameter: f64,
        lens_height: f64,
        light_source_distance: f64,
        indices: RefractiveIndices,
    ) -> OclResult<Self> {
        for length in [
            eye_diameter,
            cornea_radius,
            pupil_diameter,
            lens_height,
            light_source_distance,
        ] {
            if !(length.is_normal() && length.is_sign_positive()) {
                return Err(OcellusError::Parameters(
                    "lengths must be positive and finite".into(),
                ));
            }
        }
        Ok(Self {
            eye_diameter,
            cornea_radius,
            pupil_diameter,
            lens_height,
            light_source_distance,
            indices,
        })
    }
    /// Creates new [`OpticalParameters`] from lengths in millimeters.
    ///
    /// The fixed calibration factors of the model are applied to translate each length
    /// into render units.
    ///
    /// # Errors
    ///
    /// This function will return an error if any length is non-positive or not finite.
    pub fn from_millimeters(
        eye_diameter: f64,
        cornea_radius: f64,
        pupil_diameter: f64,
        lens_height: f64,
        light_source_distance: f64,
        indices: RefractiveIndices,
    ) -> OclResult<Self> {
        Self::new(
            eye_diameter * EYE_SIZE_SCALE,
            cornea_radius * CORNEA_RADIUS_SCALE,
            pupil_diameter * PUPIL_SIZE_SCALE,
            lens_height * LENS_HEIGHT_SCALE,
            light_source_distance * LIGHT_SOURCE_DISTANCE_SCALE,
            indices,
        )
    }
    /// Returns the eye radius (half the eye diameter).
    #[must_use]
    pub fn eye_radius(&self) -> f64 {
        self.eye_diameter / 2.0
    }
}
impl Default for OpticalParameters {
    /// Default parameters of the schematic eye: a 35 mm eye with an 8 mm cornea
    /// curvature, 4 mm pupil, 4 mm lens and a light source 500 mm away.
    fn default() -> Self {
        Self {
            eye_diameter: 35.0 * EYE_SIZE_SCALE,
            cornea_radius: 8.0 * CORNEA_RADIUS_SCALE,
            pupil_diameter: 4.0 * PUPIL_SIZE_SCALE,
            lens_height: 4.0 * LENS_HEIGHT_SCALE,
            light_source_distance: 500.0 * LIGHT_SOURCE_DISTANCE_SCALE,
            indices: RefractiveIndices::default(),
        }
    }
}
