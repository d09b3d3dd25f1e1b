//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Projection filters, built directly in the frequency domain.
//!
//! A filter response has `filter_length(n)` values in FFT bin order (bin 0: DC, bin N/2: Nyquist)
//! and is real and even (H[k] = H[N - k]).
//!

use crate::image::Image;
use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;
use strum::IntoEnumIterator;
use super::{fft, TransformError};

/// Filters shorter than this are not used, regardless of the projection length.
const MIN_FILTER_LENGTH: usize = 64;

#[derive(Copy, Clone, Debug, strum_macros::EnumIter, PartialEq)]
pub enum FilterKind {
    /// Band-limited |f| (Ram-Lak).
    Ramp,
    /// Ramp multiplied by sinc.
    SheppLogan,
    Cosine,
    Hamming,
    Hann,
    /// No filtering (plain backprojection).
    NoFilter
}

impl Default for FilterKind {
    fn default() -> FilterKind { FilterKind::Ramp }
}

impl From<FilterKind> for &str {
    fn from(kind: FilterKind) -> &'static str {
        match kind {
            FilterKind::Ramp       => "ramp",
            FilterKind::SheppLogan => "shepp-logan",
            FilterKind::Cosine     => "cosine",
            FilterKind::Hamming    => "hamming",
            FilterKind::Hann       => "hann",
            FilterKind::NoFilter   => "none"
        }
    }
}

impl std::str::FromStr for FilterKind {
    type Err = TransformError;
    fn from_str(s: &str) -> Result<FilterKind, TransformError> {

        for kind in FilterKind::iter() {
            if s == Into::<&str>::into(kind) {
                return Ok(kind);
            }
        }

        Err(TransformError::UnknownFilter(s.to_string()))
    }
}

/// Returns the (padded) filter length used for projections of length `n`: the next power of 2 >= 2`n`,
/// but no less than 64.
pub fn filter_length(n: usize) -> usize {
    (2 * n).next_power_of_two().max(MIN_FILTER_LENGTH)
}

/// Returns the digital frequency (cycles per sample, in [-1/2, 1/2)) of FFT bin `k` out of `size`.
fn fft_freq(k: usize, size: usize) -> f64 {
    if k < (size + 1) / 2 {
        k as f64 / size as f64
    } else {
        (k as f64 - size as f64) / size as f64
    }
}

/// Ramp response: DFT of the band-limited ramp kernel h[0] = 1/4, h[m] = -1/(πm)² (odd m), 0 (even m ≠ 0),
/// wrapped to `size` samples; evaluated per bin in closed form.
fn ramp_response(size: usize) -> Vec<f64> {
    let mut response = vec![0.0; size];

    for k in 0..=size / 2 {
        let mut sum = 0.25;
        for m in (1..size / 2).step_by(2) {
            let phase = 2.0 * PI * ((k * m) % size) as f64 / size as f64;
            sum -= 2.0 * phase.cos() / (PI * m as f64).powi(2);
        }
        response[k] = 2.0 * sum;
        if k > 0 {
            response[size - k] = 2.0 * sum;
        }
    }

    response
}

/// Returns the frequency response of `kind` for projections of length `n`; see `filter_length`.
///
/// Windows are functions of the signed bin frequency `f` in [-0.5, 0.5): Hamming is
/// 0.54 + 0.46·cos(2πf) and Hann is 0.5 + 0.5·cos(2πf). These are the periodic forms; the symmetric
/// `N-1` forms (as in NumPy's `hamming`/`hanning`) are not used, so bins `k` and `size-k` always get
/// the same weight and Hann is exactly zero at Nyquist.
///
pub fn fourier_filter(kind: FilterKind, n: usize) -> Vec<f64> {
    let size = filter_length(n);

    if kind == FilterKind::NoFilter {
        return vec![1.0; size];
    }

    let mut response = ramp_response(size);

    let window: fn(f64) -> f64 = match kind {
        FilterKind::Ramp | FilterKind::NoFilter => return response,
        FilterKind::SheppLogan => |f| if f == 0.0 { 1.0 } else { (PI * f).sin() / (PI * f) },
        FilterKind::Cosine => |f| (PI * f).cos(),
        FilterKind::Hamming => |f| 0.54 + 0.46 * (2.0 * PI * f).cos(),
        FilterKind::Hann => |f| 0.5 + 0.5 * (2.0 * PI * f).cos()
    };

    for (k, value) in response.iter_mut().enumerate() {
        *value *= window(fft_freq(k, size));
    }

    response
}

/// Filters every projection (column) of `sinogram`; returns the filtered columns.
///
/// Each column is zero-padded to the filter length, multiplied by the filter response in the frequency
/// domain and truncated back to its original length.
///
pub fn filter_projections(sinogram: &Image, kind: FilterKind) -> Vec<Vec<f64>> {
    let length = sinogram.height();

    if kind == FilterKind::NoFilter {
        return (0..sinogram.width()).map(|x| sinogram.column(x)).collect();
    }

    let response = fourier_filter(kind, length);
    let size = response.len();
    let twiddles = fft::calc_twiddle_factors(size, false);
    let inv_twiddles = fft::calc_twiddle_factors(size, true);

    (0..sinogram.width()).into_par_iter().map(|x| {
        let mut padded = sinogram.column(x);
        padded.resize(size, 0.0);

        let mut spectrum: Vec<Complex64> = fft::fft(&padded, &twiddles);
        for (value, weight) in spectrum.iter_mut().zip(response.iter()) {
            *value *= *weight;
        }

        fft::fft_inverse(&spectrum, &inv_twiddles).iter().take(length).map(|c| c.re).collect()
    }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest(n, expected,
        case(0, 64),
        case(1, 64),
        case(32, 64),
        case(33, 128),
        case(50, 128),
        case(283, 1024),
        case(512, 1024)
    )]
    fn length_is_power_of_2(n: usize, expected: usize) {
        assert_eq!(expected, filter_length(n));
        assert_eq!(expected, fourier_filter(FilterKind::Hann, n).len());
    }

    #[test]
    fn names_round_trip() {
        for kind in FilterKind::iter() {
            assert_eq!(kind, FilterKind::from_str(Into::<&str>::into(kind)).unwrap());
        }
        assert_eq!(FilterKind::SheppLogan, FilterKind::from_str("shepp-logan").unwrap());
    }

    #[test]
    fn unknown_name_fails() {
        assert_eq!(
            Err(TransformError::UnknownFilter("gauss".to_string())),
            FilterKind::from_str("gauss")
        );
    }

    #[test]
    fn responses_are_even() {
        for kind in FilterKind::iter() {
            let response = fourier_filter(kind, 100);
            let size = response.len();
            for k in 1..size {
                assert!((response[k] - response[size - k]).abs() < 1.0e-12, "{:?}, bin {}", kind, k);
            }
        }
    }

    #[test]
    fn ramp_rises_linearly_from_dc_to_nyquist() {
        let response = fourier_filter(FilterKind::Ramp, 128);
        let size = response.len();

        assert!(response[0].abs() < 1.0e-2);
        assert!((response[size / 2] - 1.0).abs() < 1.0e-2);
        for k in 1..size / 2 {
            assert!(response[k] > response[k - 1]);
            // close to 2|f|
            assert!((response[k] - 2.0 * k as f64 / size as f64).abs() < 1.0e-2);
        }
    }

    #[test]
    fn windows_attenuate_the_ramp() {
        let ramp = fourier_filter(FilterKind::Ramp, 64);
        for kind in [FilterKind::SheppLogan, FilterKind::Cosine, FilterKind::Hamming, FilterKind::Hann].iter() {
            let response = fourier_filter(*kind, 64);
            assert!((response[0] - ramp[0]).abs() < 1.0e-6 * ramp[0].abs().max(1.0));
            for (r, w) in ramp.iter().zip(response.iter()) {
                assert!(w.abs() <= r.abs() + 1.0e-12);
            }
        }

        // windows vanishing at Nyquist
        let nyquist = ramp.len() / 2;
        assert!(fourier_filter(FilterKind::Cosine, 64)[nyquist].abs() < 1.0e-12);
        assert!(fourier_filter(FilterKind::Hann, 64)[nyquist].abs() < 1.0e-2);
    }

    #[test]
    fn hamming_and_hann_are_periodic_in_bin_frequency() {
        let ramp = fourier_filter(FilterKind::Ramp, 100);
        let hamming = fourier_filter(FilterKind::Hamming, 100);
        let hann = fourier_filter(FilterKind::Hann, 100);
        let size = ramp.len();

        // f = 0.25 and f = -0.5
        for &(k, hamming_weight, hann_weight) in [(size / 4, 0.54, 0.5), (size / 2, 0.08, 0.0)].iter() {
            assert!((hamming[k] / ramp[k] - hamming_weight).abs() < 1.0e-12);
            assert!((hann[k] / ramp[k] - hann_weight).abs() < 1.0e-12);
            assert_eq!(hamming[k], hamming[size - k]);
        }
    }

    #[test]
    fn no_filter_is_all_ones_and_leaves_projections_unchanged() {
        assert!(fourier_filter(FilterKind::NoFilter, 10).iter().all(|v| *v == 1.0));

        let sinogram = Image::from_fn(3, 10, |x, y| (x + y) as f64);
        let filtered = filter_projections(&sinogram, FilterKind::NoFilter);
        for (x, column) in filtered.iter().enumerate() {
            assert_eq!(&sinogram.column(x), column);
        }
    }

    #[test]
    fn filtered_impulse_is_symmetric() {
        for length in [23usize, 25].iter().copied() {
            let mut sinogram = Image::new(1, length);
            sinogram.line_mut(length / 2)[0] = 1.0;

            for kind in FilterKind::iter() {
                let filtered = &filter_projections(&sinogram, kind)[0];
                assert_eq!(length, filtered.len());
                let mid = length / 2;
                for d in 1..=mid {
                    assert!((filtered[mid - d] - filtered[mid + d]).abs() < 1.0e-12);
                }
            }
        }
    }

    #[test]
    fn ramp_removes_constant_offset() {
        // the filtered projection of a wide constant profile is close to zero in the middle
        let sinogram = Image::from_fn(1, 101, |_, _| 1.0);
        let filtered = &filter_projections(&sinogram, FilterKind::Ramp)[0];
        assert!(filtered[50].abs() < 0.05);
    }
}
