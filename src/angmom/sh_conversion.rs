//! Conversion between Cartesian Gaussians and real solid harmonic Gaussians.

use factorial::Factorial;
use ndarray::Array2;
use num::{BigInt, BigRational, BigUint};
use num_traits::{cast::ToPrimitive, One, Signed, Zero};

use crate::basis::ao::{CartOrder, PureOrder};

#[cfg(test)]
#[path = "sh_conversion_tests.rs"]
mod sh_conversion_tests;

/// Calculates the number of combinations of `n` things taken `r` at a time (signed arguments).
///
/// If $`n < 0`$ or $`r < 0`$ or $`r > n`$, `0` is returned.
///
/// # Arguments
///
/// * `n` - Number of things.
/// * `r` - Number of elements taken.
///
/// # Returns
///
/// The number of combinations.
pub fn comb(n: i32, r: i32) -> BigUint {
    if n < 0 || r < 0 || r > n {
        BigUint::zero()
    } else {
        let nu = n.unsigned_abs();
        let ru = r.unsigned_abs();
        (nu - ru + 1..=nu).product::<BigUint>()
            / BigUint::from(ru)
                .checked_factorial()
                .unwrap_or_else(|| panic!("Unable to compute the factorial of {ru}."))
    }
}

/// Calculates the double factorial $`n!!`$.
///
/// The conventions $`0!! = (-1)!! = 1`$ are used, and any other non-positive argument also
/// yields `1`.
///
/// # Arguments
///
/// * `n` - The argument of the double factorial.
///
/// # Returns
///
/// The double factorial $`n!!`$.
pub fn dfact(n: i32) -> BigUint {
    if n <= 0 {
        BigUint::one()
    } else {
        (1..=n.unsigned_abs())
            .rev()
            .step_by(2)
            .map(BigUint::from)
            .product::<BigUint>()
    }
}

fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or_else(|_| panic!("Cannot convert `{v}` to `i32`."))
}

/// Obtains the coefficient of a Cartesian Gaussian $`x^{l_x} y^{l_y} z^{l_z}`$ in the expansion
/// of a real solid harmonic Gaussian of degree $`l`$ and order $`m`$.
///
/// With $`\lvert m \rvert = a`$ and $`j = (l_x + l_y - a)/2`$, the coefficient vanishes when
/// $`l_x + l_y - a`$ is odd, and otherwise reads
///
/// ```math
/// c = \frac{\lambda}{2^l} \sqrt{\frac{
///         \binom{2l_x}{l_x}\binom{2l_y}{l_y}\binom{2l_z}{l_z}\binom{l+a}{a}
///     }{
///         \binom{2l}{l}\binom{l}{a}\binom{l_x+l_y+l_z}{l_x}\binom{l_y+l_z}{l_y}
///         (2l_x-1)!!(2l_y-1)!!(2l_z-1)!!
///     }}
///     \sum_{i=0}^{(l-a)/2} \sum_{k=0}^{j} (-1)^{i+k}
///         \binom{2l-2i}{l+a}\binom{l}{i}\binom{i}{j}\binom{j}{k}\binom{a}{l_x-2k},
/// ```
///
/// where $`\lambda = \pm\sqrt{2}`$ for $`m \neq 0`$ and $`\pm 1`$ for $`m = 0`$. The sign and
/// the vanishing of cosine-type ($`m \geq 0`$) and sine-type ($`m < 0`$) components are fixed by
/// $`(a - l_x) \bmod 4`$.
///
/// The squared coefficient is assembled as an exact rational number and converted to `f64` only
/// once, so that the large intermediate factorials of high degrees never overflow. The Cartesian degree $`l_x + l_y + l_z`$ may exceed $`l`$ (contaminant
/// components).
///
/// # Arguments
///
/// * `lpureqns` - A tuple of $`(l, m)`$ specifying the real solid harmonic.
/// * `lcartqns` - A tuple of $`(l_x, l_y, l_z)`$ specifying the Cartesian Gaussian.
///
/// # Returns
///
/// The expansion coefficient.
///
/// # Panics
///
/// Panics if $`\lvert m \rvert > l`$.
pub fn cartcoef(lpureqns: (u32, i32), lcartqns: (u32, u32, u32)) -> f64 {
    let (lu, m) = lpureqns;
    assert!(
        m.unsigned_abs() <= lu,
        "m must be between -l and l (inclusive)."
    );
    let l = to_i32(lu);
    let (lx, ly, lz) = (to_i32(lcartqns.0), to_i32(lcartqns.1), to_i32(lcartqns.2));
    let am = m.abs();

    let jnum = lx + ly - am;
    if jnum.rem_euclid(2) == 1 {
        return 0.0;
    }
    let j = jnum.div_euclid(2);

    let phase = am - lx;
    let negate = if m >= 0 {
        if phase.rem_euclid(2) == 1 {
            return 0.0;
        }
        phase.rem_euclid(4) == 2
    } else {
        if phase.rem_euclid(2) == 0 {
            return 0.0;
        }
        phase.rem_euclid(4) == 3
    };

    let sum = (0..=(l - am).div_euclid(2)).fold(BigInt::zero(), |acc_i, i| {
        (0..=j).fold(acc_i, |acc_k, k| {
            let term = BigInt::from(
                comb(2 * l - 2 * i, l + am)
                    * comb(l, i)
                    * comb(i, j)
                    * comb(j, k)
                    * comb(am, lx - 2 * k),
            );
            if (i + k) % 2 == 1 {
                acc_k - term
            } else {
                acc_k + term
            }
        })
    });
    if sum.is_zero() {
        return 0.0;
    }

    let num = comb(2 * lx, lx)
        * comb(2 * ly, ly)
        * comb(2 * lz, lz)
        * comb(l + am, am)
        * if m != 0 { BigUint::from(2u32) } else { BigUint::one() };
    let den = comb(2 * l, l)
        * comb(l, am)
        * comb(lx + ly + lz, lx)
        * comb(ly + lz, ly)
        * dfact(2 * lx - 1)
        * dfact(2 * ly - 1)
        * dfact(2 * lz - 1)
        * (BigUint::one() << (2 * lu));
    let c2 = BigRational::new(
        BigInt::from(num) * &sum * &sum,
        BigInt::from(den),
    );
    let c = c2
        .to_f64()
        .expect("Unable to convert a `BigRational` value to `f64`.")
        .sqrt();
    if sum.is_negative() != negate {
        -c
    } else {
        c
    }
}

/// Obtains the matrix whose columns expand the real solid harmonic Gaussians of a [`PureOrder`]
/// in terms of the Cartesian Gaussians of a [`CartOrder`], *i.e.*
///
/// ```math
/// \tilde{g}_{\lambda} = \sum_{\lambda_{\mathrm{cart}}}
///     g_{\lambda_{\mathrm{cart}}} T_{\lambda_{\mathrm{cart}}\lambda},
/// \quad T_{\lambda_{\mathrm{cart}}\lambda} = c(l, m, l_x, l_y, l_z),
/// ```
///
/// where $`c`$ is given by [`cartcoef`]. The matrix has dimensions
/// $`\frac{1}{2}(l_{\mathrm{cart}}+1)(l_{\mathrm{cart}}+2) \times n_{\mathrm{pure}}`$.
///
/// # Arguments
///
/// * `cartorder` - The Cartesian components labelling the rows.
/// * `pureorder` - The pure components labelling the columns, possibly including contaminants.
///
/// # Returns
///
/// The Cartesian-to-spherical transformation matrix.
///
/// # Panics
///
/// Panics if the Cartesian rank of `cartorder` differs from the rank of `pureorder`.
pub fn sh_cart2spher_mat(cartorder: &CartOrder, pureorder: &PureOrder) -> Array2<f64> {
    assert_eq!(cartorder.lcart, pureorder.lcart, "Mismatched Cartesian ranks.");
    let mut tmat = Array2::<f64>::zeros((cartorder.ncomps(), pureorder.ncomps()));
    for (ipure, &lpureqns) in pureorder.iter().enumerate() {
        for (icart, &lcartqns) in cartorder.iter().enumerate() {
            tmat[(icart, ipure)] = cartcoef(lpureqns, lcartqns);
        }
    }
    tmat
}
