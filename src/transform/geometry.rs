//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Reconstruction domain bookkeeping: circle vs. rectangular mode.
//!
//! In circle mode only the circle inscribed in the (square) image is reconstructed and the image must be
//! zero outside of it; no padding is needed. In rectangular mode the image is padded to a square whose side
//! is the image's diagonal, so that no content leaves the square when rotated.
//!

use crate::image::{Image, Point};
use super::TransformError;

/// Returns ceil(√2·`size`).
pub fn diagonal(size: usize) -> usize {
    (std::f64::consts::SQRT_2 * size as f64).ceil() as usize
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Geometry {
    pub circle: bool,
    /// Radius of the reconstruction circle (in circle mode: min(rows, cols) / 2).
    pub radius: usize,
    /// Side of the square the projections are calculated on; equal to the detector length.
    pub padded_size: usize,
    /// Position of the square's top-left corner in the source image (negative coordinates mean padding).
    pub origin: Point
}

impl Geometry {
    /// Determines the geometry of projecting an image of `rows`x`cols` pixels.
    pub fn resolve(rows: usize, cols: usize, circle: bool) -> Geometry {
        let min_size = rows.min(cols);
        if circle {
            // crop the longer axis symmetrically
            let crop_start = |size: usize| ((size - min_size + 1) / 2) as i32;
            Geometry{
                circle,
                radius: min_size / 2,
                padded_size: min_size,
                origin: Point{ x: crop_start(cols), y: crop_start(rows) }
            }
        } else {
            let side = diagonal(rows.max(cols));
            // the center of the image (`size` / 2) is moved to the center of the square (`side` / 2)
            let pad_before = |size: usize| (side / 2 - size / 2) as i32;
            Geometry{
                circle,
                radius: side / 2,
                padded_size: side,
                origin: Point{ x: -pad_before(cols), y: -pad_before(rows) }
            }
        }
    }

    pub fn detector_length(&self) -> usize {
        self.padded_size
    }

    /// Rotation center (both coordinates) in the square image.
    pub fn center(&self) -> usize {
        self.padded_size / 2
    }

    /// Returns the cropped or padded square image to project.
    pub fn square_image(&self, image: &Image) -> Image {
        image.fragment_copy(&self.origin, self.padded_size, self.padded_size)
    }
}

/// Fails if `image` has any nonzero pixel farther than `radius` from its center (`rows/2`, `cols/2`).
pub fn check_circle_containment(image: &Image, radius: usize) -> Result<(), TransformError> {
    let center = Point{ x: (image.width() / 2) as i32, y: (image.height() / 2) as i32 };
    let max_sqr_dist = (radius as i64).pow(2);

    for y in 0..image.height() {
        for (x, value) in image.line(y).iter().enumerate() {
            if *value != 0.0 && (Point{ x: x as i32, y: y as i32 } - center).sqr_dist() > max_sqr_dist {
                return Err(TransformError::Geometry(format!(
                    "image must be zero outside the reconstruction circle (radius {}, nonzero pixel at ({}, {}))",
                    radius, x, y
                )));
            }
        }
    }

    Ok(())
}

/// Returns the side of the reconstructed image for a sinogram with `detector_length` rows.
pub fn output_size(detector_length: usize, circle: bool, requested: Option<usize>) -> usize {
    match requested {
        Some(size) => size,
        None => if circle {
            detector_length
        } else {
            // inverse of `diagonal`, rounded down
            ((detector_length * detector_length) as f64 / 2.0).sqrt().floor() as usize
        }
    }
}

/// Converts a sinogram calculated in circle mode to its rectangular-mode equivalent.
///
/// Each projection (column) of length L is zero-padded to `diagonal(L)`, keeping the projection centers aligned.
///
pub fn sinogram_circle_to_square(sinogram: &Image) -> Image {
    let length = sinogram.height();
    let side = diagonal(length);
    let pad_before = (side / 2 - length / 2) as i32;

    sinogram.fragment_copy(&Point{ x: 0, y: -pad_before }, sinogram.width(), side)
}
