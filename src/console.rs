#![warn(missing_docs)]
//! Command line interface definition of the `ocellus` binary
use std::path::PathBuf;

use clap::Parser;

use crate::{
    error::OclResult,
    parameters::{OpticalParameters, RefractiveIndices},
};

/// Trace light rays through a schematic eye and report the focus quality.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// eye diameter in millimeters
    #[arg(long, default_value_t = 35.0)]
    pub eye_size: f64,

    /// cornea curvature radius in millimeters
    #[arg(long, default_value_t = 8.0)]
    pub cornea_radius: f64,

    /// pupil diameter in millimeters
    #[arg(long, default_value_t = 4.0)]
    pub pupil_size: f64,

    /// axial lens height in millimeters
    #[arg(long, default_value_t = 4.0)]
    pub lens_height: f64,

    /// distance of the light source from the eye in millimeters
    #[arg(long, default_value_t = 500.0)]
    pub light_source_distance: f64,

    /// refractive index of air
    #[arg(long, default_value_t = 1.0003)]
    pub air_index: f64,

    /// refractive index of the cornea
    #[arg(long, default_value_t = 1.38)]
    pub cornea_index: f64,

    /// refractive index of the aqueous humor
    #[arg(long, default_value_t = 1.336)]
    pub aqueous_index: f64,

    /// refractive index of the crystalline lens
    #[arg(long, default_value_t = 1.42)]
    pub lens_index: f64,

    /// refractive index of the vitreous humor
    #[arg(long, default_value_t = 1.336)]
    pub vitreous_index: f64,

    /// number of rays in the traced bundle
    #[arg(short, long, default_value_t = 18)]
    pub rays: usize,

    /// write the derived geometry and all ray paths as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Builds the optical parameter snapshot from the parsed arguments.
    ///
    /// # Errors
    ///
    /// This function will return an error if a length is non-positive or an index is
    /// below 1.0.
    pub fn parameters(&self) -> OclResult<OpticalParameters> {
        let indices = RefractiveIndices::new(
            self.air_index,
            self.cornea_index,
            self.aqueous_index,
            self.lens_index,
            self.vitreous_index,
        )?;
        OpticalParameters::from_millimeters(
            self.eye_size,
            self.cornea_radius,
            self.pupil_size,
            self.lens_height,
            self.light_source_distance,
            indices,
        )
    }
}
