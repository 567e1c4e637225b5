//! Normalisation of contracted Gaussian functions.

use std::error::Error;
use std::fmt;

use ndarray::{Array2, ArrayView1, Axis};

#[cfg(test)]
#[path = "contraction_tests.rs"]
mod contraction_tests;

/// The prefactor $`(2\pi)^{-3/4}`$ in the normalisation constant of a primitive Gaussian.
#[allow(clippy::excessive_precision)]
pub const GAUSSIAN_NORM_PREFACTOR: f64 = 0.25197943553838073034791409490358;

/// Computes the overlap between two normalised primitive Gaussians of angular momentum `l` with
/// exponents `ej` and `ek` on the same centre,
///
/// ```math
/// S_{jk} = \left(\frac{2\sqrt{e_j e_k}}{e_j + e_k}\right)^{l + 3/2}.
/// ```
pub fn primitive_overlap(l: u32, ej: f64, ek: f64) -> f64 {
    (2.0 * (ej * ek).sqrt() / (ej + ek)).powf(f64::from(l) + 1.5)
}

/// Computes the normalisation factor $`N = (2\pi)^{-3/4} (4e)^{(l + 3/2)/2}`$ of a primitive
/// Gaussian of angular momentum `l` and exponent `e`.
pub fn primitive_norm(l: u32, e: f64) -> f64 {
    GAUSSIAN_NORM_PREFACTOR * (4.0 * e).powf((f64::from(l) + 1.5) / 2.0)
}

/// Computes the squared norm $`\sum_{jk} c_j c_k S_{jk}`$ of a contraction whose coefficients
/// refer to normalised primitives.
pub fn contraction_norm(l: u32, exponents: &[f64], coefficients: ArrayView1<f64>) -> f64 {
    exponents
        .iter()
        .zip(coefficients.iter())
        .map(|(&ej, &cj)| {
            exponents
                .iter()
                .zip(coefficients.iter())
                .map(|(&ek, &ck)| cj * ck * primitive_overlap(l, ej, ek))
                .sum::<f64>()
        })
        .sum()
}

/// Computes the self-overlap of a contraction whose coefficients already carry the primitive
/// normalisation factors, *i.e.* $`\sum_{jk} c'_j c'_k S_{jk} / (N_j N_k)`$.
pub fn contraction_self_overlap(l: u32, exponents: &[f64], coefficients: ArrayView1<f64>) -> f64 {
    exponents
        .iter()
        .zip(coefficients.iter())
        .map(|(&ej, &cj)| {
            exponents
                .iter()
                .zip(coefficients.iter())
                .map(|(&ek, &ck)| {
                    cj * ck * primitive_overlap(l, ej, ek)
                        / (primitive_norm(l, ej) * primitive_norm(l, ek))
                })
                .sum::<f64>()
        })
        .sum()
}

/// Error indicating that a contraction column has a non-positive or non-finite norm.
#[derive(Debug, Clone, PartialEq)]
pub struct DegenerateContractionError {
    /// The index of the offending contraction column.
    pub column: usize,

    /// The computed squared norm.
    pub norm: f64,
}

impl fmt::Display for DegenerateContractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Contraction {} has a degenerate squared norm of {:+.6e}.",
            self.column, self.norm
        )
    }
}

impl Error for DegenerateContractionError {}

/// Normalises in place every contraction (column) of a coefficient matrix so that each
/// contracted function has unit self-overlap. Each coefficient $`c_{ji}`$ is replaced by
/// $`c_{ji} N_j / \sqrt{\sum_{jk} c_{ji} c_{ki} S_{jk}}`$.
///
/// All norms are computed before any coefficient is touched, so `coefficients` is left unchanged
/// on failure.
///
/// # Arguments
///
/// * `l` - The angular momentum of the shell.
/// * `exponents` - The primitive exponents.
/// * `coefficients` - The $`n_{\mathrm{prim}} \times n_{\mathrm{contr}}`$ coefficient matrix.
///
/// # Errors
///
/// Errors if any column has a squared norm that is not strictly positive and finite.
pub fn normalise_contractions(
    l: u32,
    exponents: &[f64],
    coefficients: &mut Array2<f64>,
) -> Result<(), DegenerateContractionError> {
    let norms = coefficients
        .axis_iter(Axis(1))
        .enumerate()
        .map(|(column, coeffs)| {
            let norm = contraction_norm(l, exponents, coeffs);
            if norm > 0.0 && norm.is_finite() {
                Ok(norm)
            } else {
                Err(DegenerateContractionError { column, norm })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    let prim_norms = exponents
        .iter()
        .map(|&e| primitive_norm(l, e))
        .collect::<Vec<_>>();
    coefficients
        .axis_iter_mut(Axis(1))
        .zip(norms.iter())
        .for_each(|(mut coeffs, norm)| {
            let inv_sqrt_norm = 1.0 / norm.sqrt();
            coeffs
                .iter_mut()
                .zip(prim_norms.iter())
                .for_each(|(c, n)| *c *= n * inv_sqrt_norm);
        });
    Ok(())
}
