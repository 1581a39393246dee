//! This is the documentation for the **Ocellus** crate, a geometric-optics ray
//! tracer for a schematic (reduced) eye.
//!
//! The eye is modelled as a stack of refractive surfaces in a single meridional
//! plane: cornea shell, aqueous humor, iris aperture, crystalline lens and retina.
//! From an immutable [`OpticalParameters`] snapshot, [`build_surfaces`] derives all
//! surface descriptors in closed form; [`trace_bundle`] then fans a bundle of rays
//! through the surface sequence and condenses their terminal points into a single
//! focus-quality score.
//!
//! All computations are pure functions of the snapshot: a trace can be recomputed
//! wholesale on every parameter change and rays are independent of each other.
#![allow(clippy::module_name_repetitions)]

pub mod console;
pub mod error;
pub mod eye;
pub mod focus;
pub mod geometry;
pub mod parameters;
pub mod ray;
pub mod surface;
pub mod tracer;

pub use eye::{build_outline, build_surfaces, EyeOutline, EyeSurfaces};
pub use focus::focus_score;
pub use parameters::{OpticalParameters, RefractiveIndices};
pub use tracer::{trace_bundle, trace_ray, BundleTrace, RayPath};
