//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

use cgmath::{Basis2, Rad, Rotation, Rotation2, Vector2};
use crate::image::Image;

/// Number of samples per row taken along the summation axis.
const SUBROWS: usize = 4;

/// Rows added above and below the rotated image when summing, so that interpolation spill along
/// the summation axis is kept.
const MARGIN_ROWS: usize = 2;

/// Returns bilinearly interpolated value of `pixels` (square image of `size`x`size`) at (`x`, `y`);
/// the image is treated as zero outside.
fn interpolate_bilinear(pixels: &[f64], size: usize, x: f64, y: f64) -> f64 {
    let x_lo = x.floor();
    let y_lo = y.floor();

    let tx = x - x_lo;
    let ty = y - y_lo;

    let x_lo = x_lo as i64;
    let y_lo = y_lo as i64;

    let value = |x: i64, y: i64| -> f64 {
        if x < 0 || y < 0 || x >= size as i64 || y >= size as i64 {
            0.0
        } else {
            pixels[x as usize + y as usize * size]
        }
    };

    let v_00 = value(x_lo,     y_lo);
    let v_10 = value(x_lo + 1, y_lo);
    let v_11 = value(x_lo + 1, y_lo + 1);
    let v_01 = value(x_lo,     y_lo + 1);

    v_00 * (1.0 - tx) * (1.0 - ty) +
    v_10 * tx         * (1.0 - ty) +
    v_11 * tx         * ty +
    v_01 * (1.0 - tx) * ty
}

/// Square image rotated by an angle about the pixel (`size`/2, `size`/2).
///
/// Point (x, y) of the rotated image has the value at (c + cos·(x-c) + sin·(y-c), c - sin·(x-c) + cos·(y-c))
/// of the source image (bilinearly interpolated).
///
pub struct RotatedImage<'a> {
    image: &'a Image,
    rot: Basis2<f64>,
    center: Vector2<f64>
}

impl<'a> RotatedImage<'a> {
    /// Creates a rotated view of the square `image`; `angle` in radians.
    pub fn new(image: &'a Image, angle: f64) -> RotatedImage<'a> {
        assert!(image.is_square());
        let c = (image.width() / 2) as f64;
        RotatedImage{
            image,
            rot: Rotation2::from_angle(Rad(-angle)),
            center: Vector2{ x: c, y: c }
        }
    }

    pub fn value(&self, x: f64, y: f64) -> f64 {
        let offset = Vector2{ x, y } - self.center;
        let Vector2{ x: src_x, y: src_y } = self.rot.rotate_vector(offset) + self.center;
        interpolate_bilinear(self.image.pixels(), self.image.width(), src_x, src_y)
    }

    /// Returns sums along `y` of all columns of the rotated image.
    ///
    /// Each column is sampled at `SUBROWS` points per row and extended by `MARGIN_ROWS` rows
    /// at both ends.
    ///
    pub fn column_sums(&self) -> Vec<f64> {
        let size = self.image.width();
        let num_samples = (size + 2 * MARGIN_ROWS) * SUBROWS;

        (0..size).map(|x| {
            let mut sum = 0.0;
            for i in 0..num_samples {
                let y = i as f64 / SUBROWS as f64 - MARGIN_ROWS as f64;
                sum += self.value(x as f64, y);
            }
            sum / SUBROWS as f64
        }).collect()
    }
}
