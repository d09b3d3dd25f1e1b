//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Fast Fourier Transform functions.
//!
//! Convention: the forward transform uses exp(-2πi·kn/N) and is not normalized; the inverse uses
//! exp(2πi·kn/N) and is normalized by 1/N.
//!

use num_complex::Complex64;
use num_traits::identities::{One, Zero};

/// Returns floor(log2(n)).
pub fn quick_log2(mut n: usize) -> usize
{
    if n == 0 {
        return 0;
    }

    let mut result = 0;
    while n > 0 {
        n >>= 1;
        result += 1;
    }

    result - 1
}

pub fn is_power_of_2(n: usize) -> bool {
    n.count_ones() == 1
}

/// Calculates twiddle factors for FFT input of `fft_size`.
pub fn calc_twiddle_factors(fft_size: usize, inverse: bool) -> Vec<Complex64> {
    let mut result = vec![Complex64::zero(); quick_log2(fft_size) + 1];

    let mut denominator = fft_size;
    for n in (0..=quick_log2(fft_size)).rev() {
        result[n] = if inverse {
            (2.0 * std::f64::consts::PI * Complex64::i() / denominator as f64).exp()
        } else {
            (-2.0 * std::f64::consts::PI * Complex64::i() / denominator as f64).exp()
        };
        denominator >>= 1;
    }

    result
}

/// Calculates 1-dimensional discrete Fourier transform or its inverse (not normalized by `input`'s length,
/// the caller must do this).
///
/// # Parameters
///
/// * `n` - Number of values to calculate (must be a power of 2).
/// * `input` - Input values.
/// * `output` - Output values.
/// * `i_step` - Input step; external callers must specify 1.
/// * `o_step` - Output step; external callers must specify 1.
/// * `twiddle_factors` - Last element is the twiddle factor corresponding to input's length `n`, i.e. exp(-2*π*i / n)
///     (or exp(2*π*i / n) for inverse transform). Second-to-last element must be the next lower twiddle factor,
///     i.e. exp(±2*π*i / (n/2).
///
pub fn fft_1d<T: Copy + Into<Complex64>>(
    n: usize,
    input: &[T],
    output: &mut [Complex64],
    i_step: usize,
    o_step: usize,
    twiddles: &[Complex64]
) {
    if n == 1 {
        output[0] = input[0].into();
    } else {
        fft_1d(
            n / 2,
            input,
            output,
            2 * i_step,
            o_step,
            &twiddles[..twiddles.len() - 1]
        );

        fft_1d(
            n / 2,
            &input[i_step..],
            &mut output[n / 2 * o_step..],
            2 * i_step,
            o_step,
            &twiddles[..twiddles.len() - 1]
        );

        // initial twiddle factor
        let t_factor_0 = twiddles[twiddles.len() - 1];

        let mut t_factor = Complex64::one();

        for k in 0..n / 2 {
            let t = output[k * o_step];
            let h = t_factor * output[(k + n / 2) * o_step];

            output[k * o_step] = t + h;
            output[(k + n / 2) * o_step] = t - h;

            t_factor *= t_factor_0; // in effect, t_factor = exp(-2*π*i * k/n)
        }
    }
}

/// Forward transform of `input` (length must be a power of 2); `twiddles` from `calc_twiddle_factors(len, false)`.
pub fn fft<T: Copy + Into<Complex64>>(input: &[T], twiddles: &[Complex64]) -> Vec<Complex64> {
    assert!(is_power_of_2(input.len()));
    assert!(twiddles.len() > quick_log2(input.len()));

    let mut output = vec![Complex64::zero(); input.len()];
    fft_1d(input.len(), input, &mut output, 1, 1, &twiddles[..quick_log2(input.len()) + 1]);

    output
}

/// Normalized inverse transform of `input` (length must be a power of 2); `twiddles` from
/// `calc_twiddle_factors(len, true)`.
pub fn fft_inverse(input: &[Complex64], twiddles: &[Complex64]) -> Vec<Complex64> {
    let mut output = fft(input, twiddles);
    let n = input.len() as f64;
    for c in &mut output {
        *c /= n;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn naive_dft(input: &[f64]) -> Vec<Complex64> {
        let n = input.len();
        (0..n).map(|k| {
            input.iter().enumerate().fold(Complex64::zero(), |acc, (j, x)| {
                acc + Complex64::new(*x, 0.0)
                    * (-2.0 * std::f64::consts::PI * Complex64::i() * (k * j) as f64 / n as f64).exp()
            })
        }).collect()
    }

    #[test]
    fn log2_of_powers_and_non_powers() {
        assert_eq!(0, quick_log2(1));
        assert_eq!(6, quick_log2(64));
        assert_eq!(6, quick_log2(100));
        assert!(is_power_of_2(128));
        assert!(!is_power_of_2(96));
        assert!(!is_power_of_2(0));
    }

    #[test]
    fn matches_direct_dft() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1234);
        let input: Vec<f64> = (0..64).map(|_| rng.gen_range(-1.0..1.0)).collect();

        let expected = naive_dft(&input);
        let result = fft(&input, &calc_twiddle_factors(64, false));

        for (e, r) in expected.iter().zip(result.iter()) {
            assert!((e - r).norm() < 1.0e-10);
        }
    }

    #[test]
    fn inverse_restores_input() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5678);
        let input: Vec<f64> = (0..256).map(|_| rng.gen_range(-10.0..10.0)).collect();

        let spectrum = fft(&input, &calc_twiddle_factors(256, false));
        let restored = fft_inverse(&spectrum, &calc_twiddle_factors(256, true));

        for (i, r) in input.iter().zip(restored.iter()) {
            assert!((i - r.re).abs() < 1.0e-10);
            assert!(r.im.abs() < 1.0e-10);
        }
    }

    #[test]
    fn impulse_has_flat_spectrum() {
        let mut input = vec![0.0; 16];
        input[0] = 1.0;
        let spectrum = fft(&input, &calc_twiddle_factors(16, false));
        assert!(spectrum.iter().all(|c| (c - Complex64::one()).norm() < 1.0e-14));
    }
}
