//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Radon transform (parallel-beam projection) and its inverse (filtered backprojection).
//!
//! Images and sinograms are `Image`s; a sinogram has one row per detector position and one column
//! per projection angle. Angles are given in degrees. For an angle θ the image is rotated by θ about
//! its center and summed along the vertical axis, so that the detector coordinate of pixel offset
//! (dx, dy) (relative to the center, `y` pointing down) is `dx·cos θ - dy·sin θ`.
//!

mod fft;
pub mod filter;
pub mod geometry;
mod iradon;
mod radon;
mod rotate;

#[cfg(test)]
mod test_images;

pub use filter::FilterKind;
pub use geometry::sinogram_circle_to_square;
pub use iradon::{iradon, InterpolationKind};
pub use radon::radon;

#[derive(Debug, PartialEq)]
pub enum TransformError {
    /// Image is nonzero outside the reconstruction circle.
    Geometry(String),
    /// Number of angles differs from the number of sinogram columns.
    ShapeMismatch{ angles: usize, projections: usize },
    UnknownFilter(String),
    UnknownInterpolation(String)
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::Geometry(msg) => write!(f, "invalid geometry: {}", msg),
            TransformError::ShapeMismatch{ angles, projections } => write!(
                f, "number of angles ({}) does not match the number of projections in the sinogram ({})",
                angles, projections
            ),
            TransformError::UnknownFilter(name) => write!(f, "unknown filter: {}", name),
            TransformError::UnknownInterpolation(name) => write!(f, "unknown interpolation: {}", name)
        }
    }
}

impl std::error::Error for TransformError {}

/// Angles used by `radon` if none are given: 0, 1, ..., 179 degrees.
pub fn default_projection_angles() -> Vec<f64> {
    (0..180).map(|a| a as f64).collect()
}

/// Angles assumed by `iradon` if none are given: `count` angles evenly spaced over [0, 180).
pub fn default_reconstruction_angles(count: usize) -> Vec<f64> {
    crate::utils::linspace_degrees(0.0, 180.0, count)
}
