//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

use crate::image::Image;
use rayon::prelude::*;
use super::{default_projection_angles, geometry, rotate, TransformError};

/// Calculates the Radon transform (sinogram) of `image`.
///
/// # Parameters
///
/// * `image` - Input image.
/// * `theta` - Projection angles in degrees; if `None`, 0, 1, ..., 179 are used.
/// * `circle` - If true, the image is assumed to be zero outside the circle inscribed in it
///     (non-square images are cropped to the central square first); otherwise the image is padded so that
///     nothing is lost during rotation.
///
/// Returns an image with one column per angle and one row per detector position.
///
pub fn radon(image: &Image, theta: Option<&[f64]>, circle: bool) -> Result<Image, TransformError> {
    let default_theta;
    let theta = match theta {
        Some(theta) => theta,
        None => {
            default_theta = default_projection_angles();
            &default_theta[..]
        }
    };

    let geometry = geometry::Geometry::resolve(image.height(), image.width(), circle);
    if circle {
        geometry::check_circle_containment(image, geometry.radius)?;
    }

    let square = geometry.square_image(image);

    let projections: Vec<Vec<f64>> = theta.par_iter().map(|angle| {
        rotate::RotatedImage::new(&square, angle.to_radians()).column_sums()
    }).collect();

    Ok(Image::from_columns(geometry.detector_length(), &projections))
}
