//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Synthetic images for transform tests.
//!

use crate::image::Image;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

/// (intensity, semi-axis a, semi-axis b, center x, center y, rotation in degrees); coordinates in [-1, 1].
const SHEPP_LOGAN_ELLIPSES: [(f64, f64, f64, f64, f64, f64); 10] = [
    ( 1.0, 0.69,   0.92,    0.0,   0.0,     0.0),
    (-0.8, 0.6624, 0.874,   0.0,  -0.0184,  0.0),
    (-0.2, 0.11,   0.31,    0.22,  0.0,   -18.0),
    (-0.2, 0.16,   0.41,   -0.22,  0.0,    18.0),
    ( 0.1, 0.21,   0.25,    0.0,   0.35,    0.0),
    ( 0.1, 0.046,  0.046,   0.0,   0.1,     0.0),
    ( 0.1, 0.046,  0.046,   0.0,  -0.1,     0.0),
    ( 0.1, 0.046,  0.023,  -0.08, -0.605,   0.0),
    ( 0.1, 0.023,  0.023,   0.0,  -0.606,   0.0),
    ( 0.1, 0.023,  0.046,   0.06, -0.605,   0.0)
];

/// Modified (high contrast) Shepp-Logan head phantom of `size`x`size` pixels, values in [0, 1].
pub fn shepp_logan_phantom(size: usize) -> Image {
    Image::from_fn(size, size, |x, y| {
        let u = (2.0 * x as f64 + 1.0 - size as f64) / size as f64;
        let v = (size as f64 - 2.0 * y as f64 - 1.0) / size as f64;

        let mut value = 0.0;
        for &(intensity, a, b, x0, y0, phi) in SHEPP_LOGAN_ELLIPSES.iter() {
            let (sin, cos) = phi.to_radians().sin_cos();
            let xr = (u - x0) * cos + (v - y0) * sin;
            let yr = -(u - x0) * sin + (v - y0) * cos;
            if (xr / a).powi(2) + (yr / b).powi(2) <= 1.0 {
                value += intensity;
            }
        }

        value
    })
}

/// Sum of a lower-triangular matrix of ones and its vertically flipped copy.
pub fn triangles(size: usize) -> Image {
    Image::from_fn(size, size, |x, y| {
        let lower = if x <= y { 1.0 } else { 0.0 };
        let flipped = if x <= size - 1 - y { 1.0 } else { 0.0 };
        lower + flipped
    })
}

fn dist_from_center(x: usize, y: usize, rows: usize, cols: usize) -> f64 {
    let dx = x as f64 - (cols / 2) as f64;
    let dy = y as f64 - (rows / 2) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Uniform random values in [0, 1) inside the circle of radius min(`rows`, `cols`)/2, zero elsewhere.
pub fn random_circle(rows: usize, cols: usize, seed: u64) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    let radius = (rows.min(cols) / 2) as f64;

    Image::from_fn(cols, rows, |x, y| {
        let value: f64 = rng.gen();
        if dist_from_center(x, y, rows, cols) >= radius { 0.0 } else { value }
    })
}

/// Cone with the apex at the image center, falling to zero at radius min(`rows`, `cols`)/2; values in [0, 1].
pub fn radial_cone(rows: usize, cols: usize) -> Image {
    let radius = (rows.min(cols) / 2) as f64;
    let cone = Image::from_fn(cols, rows, |x, y| (radius - dist_from_center(x, y, rows, cols)).max(0.0));
    rescaled(&cone)
}

/// Pixel statistics used by the transform tests.
impl Image {
    pub fn sum(&self) -> f64 {
        self.pixels().iter().sum()
    }

    pub fn max_value(&self) -> f64 {
        self.pixels().iter().copied().fold(f64::MIN, f64::max)
    }

    pub fn min_value(&self) -> f64 {
        self.pixels().iter().copied().fold(f64::MAX, f64::min)
    }

    pub fn scale_values(&mut self, factor: f64) {
        for value in self.pixels_mut() { *value *= factor; }
    }

    /// Returns sums of all columns.
    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.width()).map(|x| self.column(x).iter().sum()).collect()
    }
}

/// Returns a copy of `image` with values linearly mapped to [0, 1].
pub fn rescaled(image: &Image) -> Image {
    let min = image.min_value();
    let range = image.max_value() - min;
    Image::from_fn(image.width(), image.height(), |x, y| (image.value(x, y) - min) / range)
}

pub fn mean_abs_diff(img1: &Image, img2: &Image) -> f64 {
    assert_eq!(img1.pixels().len(), img2.pixels().len());

    img1.pixels().iter().zip(img2.pixels().iter()).map(|(a, b)| (a - b).abs()).sum::<f64>()
        / img1.pixels().len() as f64
}

#[test]
fn phantom_has_expected_values() {
    let phantom = shepp_logan_phantom(200);
    // skull
    assert!((phantom.value(100, 10) - 1.0).abs() < 1.0e-12);
    // brain
    assert!((phantom.value(100, 150) - 0.2).abs() < 1.0e-12);
    // outside
    assert_eq!(0.0, phantom.value(2, 2));
    assert!(phantom.min_value() > -1.0e-12);
    assert!(phantom.max_value() <= 1.0 + 1.0e-12);
}

#[test]
fn column_statistics() {
    let mut image = Image::from_fn(2, 3, |x, y| (x + 2 * y) as f64);
    assert_eq!(vec![6.0, 9.0], image.column_sums());
    assert_eq!(15.0, image.sum());
    image.scale_values(-0.5);
    assert_eq!(-2.5, image.min_value());
    assert_eq!(0.0, image.max_value());
}
