//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! FITS image format handling code (low-level).
//!

use super::Image;
use std::ffi::CString;
use std::mem::MaybeUninit;
use std::os::raw::{c_int, c_long};
use fitsio_sys;

const TDOUBLE: c_int = 82;
const DOUBLE_IMG: c_int = -64;
const READONLY: c_int = 0;

#[derive(Debug)]
pub enum FitsError {
    InvalidFileName,
    CannotOpenFile,
    InvalidImage,
    CannotReadImage,
    CannotCreateFile,
    CannotCreateImage,
    CannotWriteImage
}

struct FitsFileHandle {
    fptr: *mut fitsio_sys::fitsfile
}

impl FitsFileHandle {
    /// Closes the file (flushing pending writes) and returns the CFITSIO status.
    fn close(mut self) -> c_int {
        let fptr = std::mem::replace(&mut self.fptr, std::ptr::null_mut());
        let mut status = 0;
        unsafe { fitsio_sys::ffclos(fptr, &mut status) };
        status
    }
}

impl Drop for FitsFileHandle {
    fn drop(&mut self) {
        if !self.fptr.is_null() {
            let mut status = 0;
            unsafe { fitsio_sys::ffclos(self.fptr, &mut status) };
        }
    }
}

/// Returns (file, width, height).
fn open_fits_file(file_name: &str) -> Result<(FitsFileHandle, usize, usize), FitsError> {
    let file_name_image0 = CString::new(file_name.to_string() + "[0]").map_err(|_| FitsError::InvalidFileName)?;
    let mut file = FitsFileHandle{ fptr: std::ptr::null_mut() };
    let mut status = 0;
    unsafe { fitsio_sys::ffopen(
        &mut file.fptr as *mut *mut _,
        file_name_image0.as_ptr(),
        READONLY,
        &mut status
    ) };
    if status != 0 { return Err(FitsError::CannotOpenFile); }

    let mut bits_per_pixel = MaybeUninit::<c_int>::uninit();
    let mut num_axes = MaybeUninit::<c_int>::uninit();
    let mut dimensions: [c_long; 3] = [0; 3];
    unsafe { fitsio_sys::ffghpr(
        file.fptr as *mut _,
        3,
        std::ptr::null_mut(),
        bits_per_pixel.as_mut_ptr(),
        num_axes.as_mut_ptr(),
        dimensions.as_mut_ptr(),
        std::ptr::null_mut(),
        std::ptr::null_mut(),
        std::ptr::null_mut(),
        &mut status
    ) };
    if status != 0 {
        return Err(FitsError::InvalidImage);
    }
    let num_axes = unsafe { num_axes.assume_init() };

    if num_axes != 2 || dimensions[0] <= 0 || dimensions[1] <= 0 {
        return Err(FitsError::InvalidImage);
    }

    Ok((file, dimensions[0] as usize, dimensions[1] as usize))
}

/// Loads the primary HDU; pixel values of any type are converted to `f64`.
pub fn load_fits(file_name: &str) -> Result<Image, FitsError> {
    let (file, width, height) = open_fits_file(file_name)?;

    let mut image = Image::new(width, height);

    let mut status = 0;

    // FITS rows are stored in reverse order
    for y in 0..height {
        unsafe { fitsio_sys::ffgpv(
            file.fptr as *mut _,
            TDOUBLE,
            (1 + y * width) as _,
            width as _,
            std::ptr::null_mut(),
            image.line_mut(height - 1 - y).as_mut_ptr() as *mut _,
            std::ptr::null_mut(),
            &mut status
        ) };
        if status != 0 {
            return Err(FitsError::CannotReadImage);
        }
    }

    Ok(image)
}

pub fn save_fits(image: &Image, file_name: &str) -> Result<(), FitsError> {
    let mut dimensions: [c_long; 2] = [
        image.width() as _,
        image.height() as _
    ];

    // a leading "!" overwrites an existing file
    let file_name = CString::new("!".to_string() + file_name).map_err(|_| FitsError::InvalidFileName)?;

    let mut status = 0;
    let mut file = FitsFileHandle{ fptr: std::ptr::null_mut() };
    unsafe { fitsio_sys::ffinit(
        &mut file.fptr as *mut *mut _,
        file_name.as_ptr(),
        &mut status
    ) };
    if status != 0 { return Err(FitsError::CannotCreateFile); }

    unsafe { fitsio_sys::ffcrim(file.fptr as *mut _, DOUBLE_IMG, 2, dimensions.as_mut_ptr(), &mut status) };
    if status != 0 { return Err(FitsError::CannotCreateImage); }

    // FITS rows are stored in reverse order
    for y in 0..image.height() {
        unsafe { fitsio_sys::ffppr(
            file.fptr as *mut _,
            TDOUBLE,
            (1 + (image.height() - 1 - y) * image.width()) as _,
            image.width() as _,
            image.line(y).as_ptr() as *mut _,
            &mut status
        ) };
        if status != 0 { return Err(FitsError::CannotWriteImage); }
    }

    // buffered data reach the disk only here
    if file.close() != 0 { return Err(FitsError::CannotWriteImage); }

    Ok(())
}
