//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Image data structure, I/O and basic operations.
//!

mod fits;

pub mod point;

pub use fits::FitsError;
pub use point::{Point, Rect};
use std::path::Path;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FileType {
    /// Determined automatically from file name extension
    Auto,
    Fits
}

fn file_type_from_ext(file_name: &str) -> Result<FileType, ImageError> {
    match Path::new(file_name).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => match ext.to_lowercase().as_str() {
            "fit" | "fits" => Ok(FileType::Fits),
            _ => Err(ImageError::UnsupportedFileType(file_name.to_string()))
        },
        None => Err(ImageError::UnsupportedFileType(file_name.to_string()))
    }
}

/// Single-channel image with 64-bit floating-point pixels, stored row by row.
///
/// Also used for sinograms: then each row corresponds to a detector position and each column
/// to a projection angle.
///
#[derive(Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<f64>
}

#[derive(Debug)]
pub enum ImageError {
    UnsupportedFileType(String),
    FitsError(FitsError)
}

impl From<FitsError> for ImageError {
    fn from(e: FitsError) -> ImageError { ImageError::FitsError(e) }
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageError::UnsupportedFileType(file_name) => write!(f, "unsupported file type: {}", file_name),
            ImageError::FitsError(e) => write!(f, "FITS error: {:?}", e)
        }
    }
}

impl std::error::Error for ImageError {}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Image {}x{}, pixels = {:?}...",
            self.width,
            self.height,
            &self.pixels[..self.pixels.len().min(8)]
        )
    }
}

impl Image {
    /// Creates a new zero-filled image.
    pub fn new(width: usize, height: usize) -> Image {
        Image{ width, height, pixels: vec![0.0; width * height] }
    }

    /// Creates a new image with pixel values given by `func(x, y)`.
    pub fn from_fn<F: FnMut(usize, usize) -> f64>(width: usize, height: usize, mut func: F) -> Image {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(func(x, y));
            }
        }

        Image{ width, height, pixels }
    }

    /// Creates an image whose columns are `columns`; each column must have `height` values.
    pub fn from_columns(height: usize, columns: &[Vec<f64>]) -> Image {
        let width = columns.len();
        let mut image = Image::new(width, height);
        for (x, column) in columns.iter().enumerate() {
            assert!(column.len() == height);
            for (y, value) in column.iter().enumerate() {
                image.pixels[x + y * width] = *value;
            }
        }

        image
    }

    pub fn load(file_name: &str, file_type: FileType) -> Result<Image, ImageError> {
        let ftype = if file_type == FileType::Auto { file_type_from_ext(file_name)? } else { file_type };
        match ftype {
            FileType::Fits => Ok(fits::load_fits(file_name)?),
            FileType::Auto => unreachable!()
        }
    }

    /// Overwrites existing file.
    pub fn save(&self, file_name: &str, file_type: FileType) -> Result<(), ImageError> {
        let ftype = if file_type == FileType::Auto { file_type_from_ext(file_name)? } else { file_type };
        match ftype {
            FileType::Fits => Ok(fits::save_fits(self, file_name)?),
            FileType::Auto => unreachable!()
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn pixels(&self) -> &[f64] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [f64] {
        &mut self.pixels
    }

    pub fn line(&self, y: usize) -> &[f64] {
        assert!(y < self.height);
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn line_mut(&mut self, y: usize) -> &mut [f64] {
        assert!(y < self.height);
        &mut self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn value(&self, x: usize, y: usize) -> f64 {
        self.pixels[x + y * self.width]
    }

    /// Returns a copy of column `x`.
    pub fn column(&self, x: usize) -> Vec<f64> {
        assert!(x < self.width);
        self.pixels.iter().skip(x).step_by(self.width).copied().collect()
    }

    pub fn img_rect(&self) -> Rect {
        Rect{ x: 0, y: 0, width: self.width as u32, height: self.height as u32 }
    }

    /// Returns a copy of image's fragment. The fragment boundaries may extend outside of the image.
    ///
    /// The fragment to copy is `width`x`height` pixels and starts at `src_pos`. Fragment's areas
    /// outside of the image are cleared to zero.
    ///
    pub fn fragment_copy(&self, src_pos: &Point, width: usize, height: usize) -> Image {
        let mut dest_img = Image::new(width, height);
        self.translate_into(&mut dest_img, *src_pos, Point::zero());
        dest_img
    }

    /// Copies (with cropping) the part of `self` starting at `src_pos` into `dest_img` starting at `dest_pos`.
    ///
    /// Pixels of `dest_img` not covered by `self` are left unchanged.
    ///
    pub fn translate_into(&self, dest_img: &mut Image, src_pos: Point, dest_pos: Point) {
        // source area expressed in destination coordinates
        let src_in_dest = Rect{
            x: dest_pos.x - src_pos.x,
            y: dest_pos.y - src_pos.y,
            width: self.width as u32,
            height: self.height as u32
        };

        let common = match src_in_dest.intersection(&dest_img.img_rect()) {
            Some(r) => r,
            None => return // nothing to copy
        };

        let offset = src_in_dest.get_pos();
        let line_len = common.width as usize;
        for dest_y in common.y..common.y + common.height as i32 {
            let src_x = (common.x - offset.x) as usize;
            let src_line = &self.line((dest_y - offset.y) as usize)[src_x..src_x + line_len];
            let dest_x = common.x as usize;
            dest_img.line_mut(dest_y as usize)[dest_x..dest_x + line_len].copy_from_slice(src_line);
        }
    }
}
