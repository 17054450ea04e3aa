//! Elementwise amplitude scaling and complex-to-real reduction.

use ndarray::{Array, ArrayBase, Data, Dimension};
use rustfft::num_complex::Complex;
use std::ops::Mul;

/// Types with a real component.
///
/// Real scalars are their own real part.
pub trait RealPart {
    /// Type of the real component.
    type Real;

    /// Real component of `self`.
    fn real_part(&self) -> Self::Real;
}

impl RealPart for f32 {
    type Real = f32;

    #[inline]
    fn real_part(&self) -> f32 {
        *self
    }
}

impl RealPart for f64 {
    type Real = f64;

    #[inline]
    fn real_part(&self) -> f64 {
        *self
    }
}

impl RealPart for Complex<f32> {
    type Real = f32;

    #[inline]
    fn real_part(&self) -> f32 {
        self.re
    }
}

impl RealPart for Complex<f64> {
    type Real = f64;

    #[inline]
    fn real_part(&self) -> f64 {
        self.re
    }
}

/// Multiply every sample by `factor`.
pub fn amplify<A, S, D>(signal: &ArrayBase<S, D>, factor: A) -> Array<A, D>
where
    A: Clone + Mul<Output = A>,
    S: Data<Elem = A>,
    D: Dimension,
{
    signal.mapv(|x| x * factor.clone())
}

/// Keep the real component of every sample.
///
/// Real input comes back unchanged.
pub fn complex_to_real<A, S, D>(signal: &ArrayBase<S, D>) -> Array<A::Real, D>
where
    A: RealPart,
    S: Data<Elem = A>,
    D: Dimension,
{
    signal.map(RealPart::real_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_amplify_real() {
        let signal = array![1.0, -2.0, 0.5];
        assert_eq!(amplify(&signal, 3.0), array![3.0, -6.0, 1.5]);
        assert_eq!(amplify(&signal, 0.0), array![0.0, -0.0, 0.0]);
    }

    #[test]
    fn test_amplify_keeps_shape() {
        let signal = Array2::from_shape_fn((2, 3), |(r, c)| (r * 3 + c) as i32);
        let result = amplify(&signal, 2);

        assert_eq!(result.shape(), &[2, 3]);
        assert_eq!(result[[1, 2]], 10);
    }

    #[test]
    fn test_amplify_complex() {
        let signal = array![Complex::new(1.0, 1.0), Complex::new(0.0, -2.0)];
        let result = amplify(&signal, Complex::new(2.0, 0.0));

        assert_eq!(result, array![Complex::new(2.0, 2.0), Complex::new(0.0, -4.0)]);
    }

    #[test]
    fn test_complex_to_real() {
        let signal = array![Complex::new(1.5, 9.0), Complex::new(-2.0, 0.5)];
        assert_eq!(complex_to_real(&signal), array![1.5, -2.0]);

        let signal = array![Complex::new(1.5f32, 9.0), Complex::new(-2.0, 0.5)];
        assert_eq!(complex_to_real(&signal), array![1.5f32, -2.0]);
    }

    #[test]
    fn test_complex_to_real_passes_real_through() {
        let signal = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(complex_to_real(&signal), signal);
    }
}
