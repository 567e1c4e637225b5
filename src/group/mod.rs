//! Point groups acting on atomic-orbital shells.

use std::fmt;
use std::str::FromStr;

use anyhow::{self, format_err};
use itertools::Itertools;
use nalgebra::{Matrix3, Point3, Vector3};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "group_tests.rs"]
mod group_tests;

// =================
// Trait definitions
// =================

/// Trait for point groups whose characters and whose action on Cartesian and real solid harmonic
/// angular functions are known.
///
/// Operations and irreducible representations are referred to by their indices
/// `0..order()` and `0..n_irreps()`, respectively.
pub trait PointGroup: fmt::Debug + Send + Sync {
    /// Returns the name of the group.
    fn name(&self) -> String;

    /// Returns the number of operations in the group.
    fn order(&self) -> usize;

    /// Returns the number of irreducible representations of the group.
    fn n_irreps(&self) -> usize;

    /// Returns the character of an operation in an irreducible representation.
    fn character(&self, irrep: usize, op: usize) -> f64;

    /// Returns the factor acquired by the real solid harmonic $`S_{lm}`$ under an operation.
    ///
    /// # Arguments
    ///
    /// * `lpureqns` - A tuple of $`(l, m)`$.
    /// * `op` - The index of the operation.
    fn spherical_parity(&self, lpureqns: (u32, i32), op: usize) -> f64;

    /// Returns the factor acquired by the Cartesian monomial $`x^{l_x}y^{l_y}z^{l_z}`$ under an
    /// operation.
    ///
    /// # Arguments
    ///
    /// * `lcartqns` - A tuple of $`(l_x, l_y, l_z)`$.
    /// * `op` - The index of the operation.
    fn cartesian_parity(&self, lcartqns: (u32, u32, u32), op: usize) -> f64;

    /// Returns the $`3 \times 3`$ representation matrix of an operation acting on points.
    fn operation_matrix(&self, op: usize) -> Matrix3<f64>;

    /// Returns the symbol of an irreducible representation.
    fn irrep_symbol(&self, irrep: usize) -> String;

    /// Returns the symbol of an operation.
    fn operation_symbol(&self, op: usize) -> String;

    /// Applies an operation to a point.
    fn transform_point(&self, op: usize, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.operation_matrix(op) * point.coords)
    }
}

// ================
// Enum definitions
// ================

/// Enumerated type for the Abelian point groups whose operations are all diagonal in Cartesian
/// coordinates, *i.e.* $`\mathcal{D}_{2h}`$ and its subgroups in their standard orientations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbelianPointGroupKind {
    /// The trivial group.
    C1,

    /// Inversion only.
    Ci,

    /// Reflection in the $`xy`$-plane.
    Cs,

    /// Two-fold rotation about $`z`$.
    C2,

    /// Two-fold rotation about $`z`$ with a horizontal mirror plane.
    C2h,

    /// Two-fold rotation about $`z`$ with the $`xz`$ and $`yz`$ mirror planes.
    C2v,

    /// Three mutually perpendicular two-fold rotations.
    D2,

    /// Three mutually perpendicular two-fold rotations with inversion.
    D2h,
}

impl fmt::Display for AbelianPointGroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for AbelianPointGroupKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c1" => Ok(Self::C1),
            "ci" => Ok(Self::Ci),
            "cs" => Ok(Self::Cs),
            "c2" => Ok(Self::C2),
            "c2h" => Ok(Self::C2h),
            "c2v" => Ok(Self::C2v),
            "d2" => Ok(Self::D2),
            "d2h" => Ok(Self::D2h),
            _ => Err(format_err!("Unsupported point group `{s}`.")),
        }
    }
}

// ==================
// Struct definitions
// ==================

/// Structure for a symmetry operation represented by a diagonal matrix
/// $`\mathrm{diag}(s_x, s_y, s_z)`$ with $`s_i = \pm 1`$.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct DiagonalOperation {
    symbol: &'static str,
    signs: [i8; 3],
}

const E: DiagonalOperation = DiagonalOperation {
    symbol: "E",
    signs: [1, 1, 1],
};
const C2Z: DiagonalOperation = DiagonalOperation {
    symbol: "C2(z)",
    signs: [-1, -1, 1],
};
const C2Y: DiagonalOperation = DiagonalOperation {
    symbol: "C2(y)",
    signs: [-1, 1, -1],
};
const C2X: DiagonalOperation = DiagonalOperation {
    symbol: "C2(x)",
    signs: [1, -1, -1],
};
const INV: DiagonalOperation = DiagonalOperation {
    symbol: "i",
    signs: [-1, -1, -1],
};
const SIGMA_XY: DiagonalOperation = DiagonalOperation {
    symbol: "σ(xy)",
    signs: [1, 1, -1],
};
const SIGMA_XZ: DiagonalOperation = DiagonalOperation {
    symbol: "σ(xz)",
    signs: [1, -1, 1],
};
const SIGMA_YZ: DiagonalOperation = DiagonalOperation {
    symbol: "σ(yz)",
    signs: [-1, 1, 1],
};

/// Structure for a one-dimensional irreducible representation labelled by the exponent parities
/// $`(p_x, p_y, p_z)`$ of a representative monomial $`x^{p_x}y^{p_y}z^{p_z}`$.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct AbelianIrrep {
    symbol: &'static str,
    parities: [u32; 3],
}

const fn irrep(symbol: &'static str, parities: [u32; 3]) -> AbelianIrrep {
    AbelianIrrep { symbol, parities }
}

/// Returns the factor $`s_x^{e_x} s_y^{e_y} s_z^{e_z}`$.
fn sign_product(signs: &[i8; 3], exponents: [u32; 3]) -> f64 {
    let odd_flips = signs
        .iter()
        .zip(exponents.iter())
        .filter(|&(&s, &e)| s < 0 && e % 2 == 1)
        .count();
    if odd_flips % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Returns the exponent parities of the monomials constituting the real solid harmonic
/// $`S_{lm}`$: cosine-type ($`m \geq 0`$) components are even in $`y`$ and sine-type
/// ($`m < 0`$) components odd.
fn solid_harmonic_parities(lpureqns: (u32, i32)) -> [u32; 3] {
    let (l, m) = lpureqns;
    let am = m.unsigned_abs();
    let pz = (l - am.min(l)) % 2;
    if m >= 0 {
        [am % 2, 0, pz]
    } else {
        [(am + 1) % 2, 1, pz]
    }
}

/// Structure for an Abelian point group all of whose operations are diagonal in Cartesian
/// coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AbelianPointGroup {
    kind: AbelianPointGroupKind,
    operations: Vec<DiagonalOperation>,
    irreps: Vec<AbelianIrrep>,
}

impl AbelianPointGroup {
    /// Constructs an Abelian point group of a given kind in its standard orientation.
    pub fn new(kind: AbelianPointGroupKind) -> Self {
        let (operations, irreps) = match kind {
            AbelianPointGroupKind::C1 => (vec![E], vec![irrep("A", [0, 0, 0])]),
            AbelianPointGroupKind::Ci => (
                vec![E, INV],
                vec![irrep("Ag", [0, 0, 0]), irrep("Au", [1, 0, 0])],
            ),
            AbelianPointGroupKind::Cs => (
                vec![E, SIGMA_XY],
                vec![irrep("A'", [0, 0, 0]), irrep("A''", [0, 0, 1])],
            ),
            AbelianPointGroupKind::C2 => (
                vec![E, C2Z],
                vec![irrep("A", [0, 0, 0]), irrep("B", [1, 0, 0])],
            ),
            AbelianPointGroupKind::C2h => (
                vec![E, C2Z, INV, SIGMA_XY],
                vec![
                    irrep("Ag", [0, 0, 0]),
                    irrep("Bg", [1, 0, 1]),
                    irrep("Au", [0, 0, 1]),
                    irrep("Bu", [1, 0, 0]),
                ],
            ),
            AbelianPointGroupKind::C2v => (
                vec![E, C2Z, SIGMA_XZ, SIGMA_YZ],
                vec![
                    irrep("A1", [0, 0, 0]),
                    irrep("A2", [1, 1, 0]),
                    irrep("B1", [1, 0, 0]),
                    irrep("B2", [0, 1, 0]),
                ],
            ),
            AbelianPointGroupKind::D2 => (
                vec![E, C2Z, C2Y, C2X],
                vec![
                    irrep("A", [0, 0, 0]),
                    irrep("B1", [0, 0, 1]),
                    irrep("B2", [0, 1, 0]),
                    irrep("B3", [1, 0, 0]),
                ],
            ),
            AbelianPointGroupKind::D2h => (
                vec![E, C2Z, C2Y, C2X, INV, SIGMA_XY, SIGMA_XZ, SIGMA_YZ],
                vec![
                    irrep("Ag", [0, 0, 0]),
                    irrep("B1g", [1, 1, 0]),
                    irrep("B2g", [1, 0, 1]),
                    irrep("B3g", [0, 1, 1]),
                    irrep("Au", [1, 1, 1]),
                    irrep("B1u", [0, 0, 1]),
                    irrep("B2u", [0, 1, 0]),
                    irrep("B3u", [1, 0, 0]),
                ],
            ),
        };
        Self {
            kind,
            operations,
            irreps,
        }
    }

    /// Returns the kind of this group.
    pub fn kind(&self) -> AbelianPointGroupKind {
        self.kind
    }
}

impl PointGroup for AbelianPointGroup {
    fn name(&self) -> String {
        self.kind.to_string()
    }

    fn order(&self) -> usize {
        self.operations.len()
    }

    fn n_irreps(&self) -> usize {
        self.irreps.len()
    }

    fn character(&self, irrep: usize, op: usize) -> f64 {
        sign_product(&self.operations[op].signs, self.irreps[irrep].parities)
    }

    fn spherical_parity(&self, lpureqns: (u32, i32), op: usize) -> f64 {
        sign_product(
            &self.operations[op].signs,
            solid_harmonic_parities(lpureqns),
        )
    }

    fn cartesian_parity(&self, lcartqns: (u32, u32, u32), op: usize) -> f64 {
        let (lx, ly, lz) = lcartqns;
        sign_product(&self.operations[op].signs, [lx, ly, lz])
    }

    fn operation_matrix(&self, op: usize) -> Matrix3<f64> {
        let [sx, sy, sz] = self.operations[op].signs;
        Matrix3::from_diagonal(&Vector3::new(
            f64::from(sx),
            f64::from(sy),
            f64::from(sz),
        ))
    }

    fn irrep_symbol(&self, irrep: usize) -> String {
        self.irreps[irrep].symbol.to_string()
    }

    fn operation_symbol(&self, op: usize) -> String {
        self.operations[op].symbol.to_string()
    }
}

impl fmt::Display for AbelianPointGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opwidth = self
            .operations
            .iter()
            .map(|op| op.symbol.chars().count())
            .max()
            .unwrap_or(1)
            .max(2);
        let irwidth = self
            .irreps
            .iter()
            .map(|ir| ir.symbol.chars().count())
            .max()
            .unwrap_or(1);
        writeln!(f, "Point group: {}", self.kind)?;
        writeln!(
            f,
            "{:irwidth$} │ {}",
            "",
            self.operations
                .iter()
                .map(|op| format!("{:>opwidth$}", op.symbol))
                .join(" ")
        )?;
        for (irrep, ir) in self.irreps.iter().enumerate() {
            writeln!(
                f,
                "{:irwidth$} │ {}",
                ir.symbol,
                (0..self.order())
                    .map(|op| format!("{:>+opwidth$}", self.character(irrep, op) as i32))
                    .join(" ")
            )?;
        }
        Ok(())
    }
}
