//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Inverse Radon transform (filtered backprojection).
//!

use crate::image::Image;
use rayon::prelude::*;
use strum::IntoEnumIterator;
use super::{default_reconstruction_angles, filter, geometry, FilterKind, TransformError};

/// Interpolation used when sampling filtered projections during backprojection.
#[derive(Copy, Clone, Debug, strum_macros::EnumIter, PartialEq)]
pub enum InterpolationKind {
    Nearest,
    Linear
}

impl Default for InterpolationKind {
    fn default() -> InterpolationKind { InterpolationKind::Linear }
}

impl From<InterpolationKind> for &str {
    fn from(kind: InterpolationKind) -> &'static str {
        match kind {
            InterpolationKind::Nearest => "nearest",
            InterpolationKind::Linear  => "linear"
        }
    }
}

impl std::str::FromStr for InterpolationKind {
    type Err = TransformError;
    fn from_str(s: &str) -> Result<InterpolationKind, TransformError> {

        for kind in InterpolationKind::iter() {
            if s == Into::<&str>::into(kind) {
                return Ok(kind);
            }
        }

        Err(TransformError::UnknownInterpolation(s.to_string()))
    }
}

impl InterpolationKind {
    /// Returns value of `projection` at the (fractional) index `pos`; zero outside [0, len - 1].
    fn sample(&self, projection: &[f64], pos: f64) -> f64 {
        let last = projection.len() as f64 - 1.0;
        if !(pos >= 0.0 && pos <= last) {
            return 0.0;
        }

        match self {
            // exactly halfway between two samples: the lower one is used
            InterpolationKind::Nearest => projection[(pos - 0.5).ceil().max(0.0) as usize],

            InterpolationKind::Linear => {
                let lo = pos.floor();
                let i = lo as usize;
                if i + 1 >= projection.len() {
                    projection[i]
                } else {
                    let t = pos - lo;
                    projection[i] * (1.0 - t) + projection[i + 1] * t
                }
            }
        }
    }
}

/// Reconstructs an image from `sinogram` using filtered backprojection.
///
/// # Parameters
///
/// * `sinogram` - One projection per column, as produced by `radon`.
/// * `theta` - Projection angles (degrees) of consecutive columns; if `None`, the columns are assumed
///     to be evenly spaced over [0°, 180°).
/// * `output_size` - Side of the reconstructed (square) image; if `None`, derived from the number of
///     sinogram rows so that `iradon(radon(image))` approximately recovers the original size.
/// * `filter` - Projection filter.
/// * `interpolation` - Interpolation used for sampling the filtered projections.
/// * `circle` - If true, the sinogram is assumed to come from `radon` in circle mode and only the
///     inscribed circle is reconstructed (pixels outside are zero).
///
pub fn iradon(
    sinogram: &Image,
    theta: Option<&[f64]>,
    output_size: Option<usize>,
    filter: FilterKind,
    interpolation: InterpolationKind,
    circle: bool
) -> Result<Image, TransformError> {
    let num_projections = sinogram.width();

    let default_theta;
    let theta = match theta {
        Some(theta) => theta,
        None => {
            default_theta = default_reconstruction_angles(num_projections);
            &default_theta[..]
        }
    };

    if theta.len() != num_projections {
        return Err(TransformError::ShapeMismatch{ angles: theta.len(), projections: num_projections });
    }

    let output_size = geometry::output_size(sinogram.height(), circle, output_size);

    let converted;
    let sinogram = if circle {
        converted = geometry::sinogram_circle_to_square(sinogram);
        &converted
    } else {
        sinogram
    };

    let mut output = Image::new(output_size, output_size);
    if num_projections == 0 || output_size == 0 {
        return Ok(output);
    }

    let filtered = filter::filter_projections(sinogram, filter);

    let mid = (sinogram.height() / 2) as f64;
    let radius = output_size / 2;
    let sqr_radius = (radius * radius) as f64;
    let angles: Vec<(f64, f64)> = theta.iter().map(|a| {
        let a = a.to_radians();
        (a.cos(), a.sin())
    }).collect();
    let normalization = std::f64::consts::PI / (2.0 * num_projections as f64);

    output.pixels_mut().par_chunks_mut(output_size).enumerate().for_each(|(y, line)| {
        let dy = y as f64 - radius as f64;
        for (x, value) in line.iter_mut().enumerate() {
            let dx = x as f64 - radius as f64;
            if circle && dx * dx + dy * dy > sqr_radius {
                continue;
            }

            let mut sum = 0.0;
            for (projection, (cos, sin)) in filtered.iter().zip(angles.iter()) {
                let t = dx * cos - dy * sin;
                sum += interpolation.sample(projection, t + mid);
            }
            *value = sum * normalization;
        }
    });

    Ok(output)
}
