//! Symmetry-adapted contracted shells of atomic orbitals.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use derive_builder::Builder;
use itertools::Itertools;
use ndarray::{Array2, Axis};

use crate::angmom::angmom_label;
use crate::angmom::sh_conversion::sh_cart2spher_mat;
use crate::auxiliary::center::Center;
use crate::basis::ao::{CartOrder, ShellOrder};
use crate::basis::contraction::{contraction_self_overlap, normalise_contractions};
use crate::group::PointGroup;

#[cfg(test)]
#[path = "shell_tests.rs"]
mod shell_tests;

// ======
// Errors
// ======

/// Errors arising during the construction of a [`Shell`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShellError {
    /// The shell definition or the centre it is attached to violates a structural requirement.
    Structure {
        /// Description of the offending shell.
        shell: String,

        /// Description of the centre.
        center: String,

        /// The violated requirement.
        reason: String,
    },

    /// A contraction of the shell cannot be normalised.
    Degenerate {
        /// Description of the offending shell.
        shell: String,

        /// Description of the centre.
        center: String,

        /// The index of the offending contraction.
        contraction: usize,

        /// The computed squared norm of the contraction.
        norm: f64,
    },
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Structure {
                shell,
                center,
                reason,
            } => write!(f, "Structural error in {shell} on {center}: {reason}."),
            ShellError::Degenerate {
                shell,
                center,
                contraction,
                norm,
            } => write!(
                f,
                "Degenerate contraction {contraction} in {shell} on {center}: squared norm \
                {norm:+.6e} is not a positive finite number."
            ),
        }
    }
}

impl Error for ShellError {}

// ===============
// ShellDefinition
// ===============

/// Structure containing the user-facing description of a contracted shell prior to its
/// symmetry adaptation.
#[derive(Clone, Builder, Debug, PartialEq)]
pub struct ShellDefinition {
    /// The angular momentum of the shell.
    pub l: u32,

    /// Whether the shell consists of real solid harmonics rather than Cartesian functions.
    #[builder(default = "true")]
    pub spherical: bool,

    /// Whether the lower-degree contaminants of a spherical shell are retained.
    #[builder(default = "false")]
    pub keep_contaminants: bool,

    /// The primitive exponents.
    #[builder(setter(custom))]
    pub exponents: Vec<f64>,

    /// The $`n_{\mathrm{prim}} \times n_{\mathrm{contr}}`$ contraction coefficients.
    pub coefficients: Array2<f64>,
}

impl ShellDefinitionBuilder {
    pub fn exponents(&mut self, exponents: &[f64]) -> &mut Self {
        self.exponents = Some(exponents.to_vec());
        self
    }
}

impl ShellDefinition {
    /// Returns a builder to construct a new [`ShellDefinition`].
    pub fn builder() -> ShellDefinitionBuilder {
        ShellDefinitionBuilder::default()
    }

    /// Returns a short description of the shell used in reports and error messages.
    pub fn description(&self) -> String {
        format!(
            "{} shell ({}, {} primitive(s), {} contraction(s))",
            angmom_label(self.l),
            if self.spherical {
                if self.keep_contaminants {
                    "spherical with contaminants"
                } else {
                    "spherical"
                }
            } else {
                "Cartesian"
            },
            self.exponents.len(),
            self.coefficients.ncols()
        )
    }
}

// =====
// Shell
// =====

fn sign(value: f64) -> i8 {
    if value < 0.0 {
        -1
    } else {
        1
    }
}

/// Structure for a contracted shell attached to a set of symmetry-equivalent centres, holding
/// the classification of its functions into irreducible representations of the point group.
///
/// A function of the shell is classified into every irreducible representation onto which its
/// projection over the orbit of the centre is non-vanishing. As the orbit may contain several
/// centres, a single function can occupy several *slots*, each giving one irreducible
/// representation and the index of the resulting symmetry-adapted function within that
/// irreducible representation.
#[derive(Debug)]
pub struct Shell<G: PointGroup> {
    center: Arc<Center<G>>,

    description: String,

    shell_order: ShellOrder,

    exponents: Vec<f64>,

    /// Normalised contraction coefficients.
    coefficients: Array2<f64>,

    /// Signs of the functions under the operations, indexed by `(function, operation)`.
    parity: Array2<i8>,

    /// Number of occupied slots of each function.
    n_slots: Vec<usize>,

    /// Irreducible representations, indexed by `(function, slot)`.
    irreps: Array2<usize>,

    /// Indices within the irreducible representation, indexed by `(function, slot)`.
    func_irrep: Array2<usize>,

    /// Slots, indexed by `(function, irrep)`.
    irrep_pos: Array2<Option<usize>>,

    nfunc_per_irrep: Vec<usize>,

    /// Cartesian-to-spherical transformation, indexed by `(Cartesian, spherical)`.
    cart2spher: Array2<f64>,
}

impl<G: PointGroup> Shell<G> {
    /// Constructs a symmetry-adapted shell from a shell definition on a centre.
    ///
    /// # Arguments
    ///
    /// * `center` - The shared centre carrying the point group and the orbit.
    /// * `definition` - The shell definition. Its coefficients are copied and normalised.
    ///
    /// # Errors
    ///
    /// Errors with [`ShellError::Structure`] if the definition or the centre is inconsistent,
    /// and with [`ShellError::Degenerate`] if a contraction cannot be normalised.
    pub fn new(center: Arc<Center<G>>, definition: &ShellDefinition) -> Result<Self, ShellError> {
        let description = definition.description();
        let structure_error = |reason: String| ShellError::Structure {
            shell: description.clone(),
            center: center.to_string(),
            reason,
        };

        let group = center.group();
        let order = group.order();
        let ndegen = center.ndegen();
        let images = center.images();

        // -----------------
        // Structural checks
        // -----------------
        if group.n_irreps() != order {
            return Err(structure_error(format!(
                "point group {} has {} irreducible representations but order {order}; only groups \
                with one-dimensional irreducible representations are supported",
                group.name(),
                group.n_irreps()
            )));
        }
        if images.len() != order {
            return Err(structure_error(format!(
                "{} operation image(s) given for a group of order {order}",
                images.len()
            )));
        }
        if let Some((op, image)) = images
            .iter()
            .enumerate()
            .find(|&(_, &image)| image >= ndegen)
        {
            return Err(structure_error(format!(
                "operation {op} maps onto centre {image}, outside the orbit of size {ndegen}"
            )));
        }
        if order % ndegen != 0 {
            return Err(structure_error(format!(
                "group order {order} is not divisible by the orbit size {ndegen}"
            )));
        }
        let coset_size = order / ndegen;
        let coset_sizes = images.iter().counts();
        if let Some(image) =
            (0..ndegen).find(|image| coset_sizes.get(image).copied().unwrap_or(0) != coset_size)
        {
            return Err(structure_error(format!(
                "{} operation(s) map onto centre {image} instead of {coset_size}",
                coset_sizes.get(&image).copied().unwrap_or(0)
            )));
        }

        let nprim = definition.exponents.len();
        let ncontr = definition.coefficients.ncols();
        if nprim == 0 {
            return Err(structure_error("no primitives given".to_string()));
        }
        if ncontr == 0 {
            return Err(structure_error("no contractions given".to_string()));
        }
        if definition.coefficients.nrows() != nprim {
            return Err(structure_error(format!(
                "coefficient matrix has {} row(s) for {nprim} primitive(s)",
                definition.coefficients.nrows()
            )));
        }
        if let Some(e) = definition
            .exponents
            .iter()
            .find(|e| !(**e > 0.0 && e.is_finite()))
        {
            return Err(structure_error(format!("invalid exponent {e}")));
        }

        // -------------
        // Normalisation
        // -------------
        let mut coefficients = definition.coefficients.clone();
        normalise_contractions(definition.l, &definition.exponents, &mut coefficients).map_err(
            |err| ShellError::Degenerate {
                shell: description.clone(),
                center: center.to_string(),
                contraction: err.column,
                norm: err.norm,
            },
        )?;

        // ------------
        // Parity table
        // ------------
        let shell_order = ShellOrder::new(
            definition.l,
            definition.spherical,
            definition.keep_contaminants,
        );
        let nfunc = shell_order.ncomps();
        let mut parity = Array2::<i8>::zeros((nfunc, order));
        match &shell_order {
            ShellOrder::Pure(pure_order) => {
                for (f, &lpureqns) in pure_order.iter().enumerate() {
                    for op in 0..order {
                        parity[(f, op)] = sign(group.spherical_parity(lpureqns, op));
                    }
                }
            }
            ShellOrder::Cart(cart_order) => {
                for (f, &lcartqns) in cart_order.iter().enumerate() {
                    for op in 0..order {
                        parity[(f, op)] = sign(group.cartesian_parity(lcartqns, op));
                    }
                }
            }
        }

        // --------------
        // Classification
        // --------------
        let nirrep = group.n_irreps();
        let mut n_slots = vec![0; nfunc];
        let mut irreps = Array2::<usize>::zeros((nfunc, nirrep));
        let mut func_irrep = Array2::<usize>::zeros((nfunc, nirrep));
        let mut irrep_pos = Array2::<Option<usize>>::from_elem((nfunc, nirrep), None);
        let mut nfunc_per_irrep = vec![0; nirrep];
        let coset_size_i = i64::try_from(coset_size).map_err(|_| {
            structure_error(format!("coset size {coset_size} is too large"))
        })?;
        for f in 0..nfunc {
            let mut slot = 0;
            for irrep in 0..order {
                let mut proj = vec![0i64; ndegen];
                for (op, &image) in images.iter().enumerate() {
                    proj[image] += i64::from(sign(
                        group.character(irrep, op) * f64::from(parity[(f, op)]),
                    ));
                }
                let total = proj
                    .iter()
                    .map(|p| (p / coset_size_i).abs())
                    .sum::<i64>();
                if total != 0 {
                    irrep_pos[(f, irrep)] = Some(slot);
                    func_irrep[(f, slot)] = nfunc_per_irrep[irrep];
                    irreps[(f, slot)] = irrep;
                    nfunc_per_irrep[irrep] += 1;
                    slot += 1;
                }
            }
            n_slots[f] = slot;
        }

        // -----------------------------
        // Cartesian-to-spherical matrix
        // -----------------------------
        let ncart = CartOrder::lex(definition.l).ncomps();
        let cart2spher = match &shell_order {
            ShellOrder::Pure(pure_order) => {
                sh_cart2spher_mat(&CartOrder::lex(definition.l), pure_order)
            }
            ShellOrder::Cart(_) => Array2::<f64>::eye(ncart),
        };
        if cart2spher.dim() != (ncart, nfunc) {
            return Err(structure_error(format!(
                "Cartesian-to-spherical matrix has shape {:?} instead of ({ncart}, {nfunc})",
                cart2spher.dim()
            )));
        }

        let shell = Self {
            center: Arc::clone(&center),
            description,
            shell_order,
            exponents: definition.exponents.clone(),
            coefficients,
            parity,
            n_slots,
            irreps,
            func_irrep,
            irrep_pos,
            nfunc_per_irrep,
            cart2spher,
        };
        log::debug!("{shell}");
        log::debug!(
            "Functions per irrep: {}",
            shell
                .nfunc_per_irrep
                .iter()
                .enumerate()
                .map(|(irrep, n)| format!("{}: {n}", group.irrep_symbol(irrep)))
                .join(", ")
        );
        Ok(shell)
    }

    /// Returns the shared centre.
    pub fn center(&self) -> &Arc<Center<G>> {
        &self.center
    }

    /// Returns the angular momentum.
    pub fn l(&self) -> u32 {
        match &self.shell_order {
            ShellOrder::Pure(pure_order) => pure_order.lcart,
            ShellOrder::Cart(cart_order) => cart_order.lcart,
        }
    }

    /// Returns `true` if the shell consists of real solid harmonics.
    pub fn is_spherical(&self) -> bool {
        matches!(self.shell_order, ShellOrder::Pure(_))
    }

    /// Returns `true` if the lower-degree contaminants of a spherical shell are retained.
    pub fn keeps_contaminants(&self) -> bool {
        match &self.shell_order {
            ShellOrder::Pure(pure_order) => pure_order.keep_contaminants,
            ShellOrder::Cart(_) => false,
        }
    }

    /// Returns the ordering of the angular functions.
    pub fn shell_order(&self) -> &ShellOrder {
        &self.shell_order
    }

    /// Returns a short description of the shell.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the number of angular functions.
    pub fn n_funcs(&self) -> usize {
        self.shell_order.ncomps()
    }

    /// Returns the number of primitives.
    pub fn n_prim(&self) -> usize {
        self.exponents.len()
    }

    /// Returns the number of contractions.
    pub fn n_contr(&self) -> usize {
        self.coefficients.ncols()
    }

    /// Returns the primitive exponents.
    pub fn exponents(&self) -> &[f64] {
        &self.exponents
    }

    /// Returns the normalised contraction coefficients.
    pub fn coefficients(&self) -> &Array2<f64> {
        &self.coefficients
    }

    /// Returns the parity table indexed by `(function, operation)`; every entry is $`\pm 1`$.
    pub fn parity(&self) -> &Array2<i8> {
        &self.parity
    }

    /// Returns the number of irreducible representations a function is classified into.
    pub fn n_irreps_of(&self, func: usize) -> usize {
        self.n_slots[func]
    }

    /// Returns the irreducible representations a function is classified into, in increasing
    /// order.
    pub fn irreps_of(&self, func: usize) -> Vec<usize> {
        self.irreps
            .row(func)
            .iter()
            .take(self.n_slots[func])
            .copied()
            .collect()
    }

    /// Returns, for each slot of a function, the index of the resulting symmetry-adapted function
    /// within its irreducible representation.
    pub fn func_irrep_of(&self, func: usize) -> Vec<usize> {
        self.func_irrep
            .row(func)
            .iter()
            .take(self.n_slots[func])
            .copied()
            .collect()
    }

    /// Returns the slot in which a function is classified into an irreducible representation,
    /// or `None` if the function has no component in it.
    pub fn irrep_pos(&self, func: usize, irrep: usize) -> Option<usize> {
        self.irrep_pos[(func, irrep)]
    }

    /// Returns the raw `(function, slot)` irrep table. Only the first
    /// [`Self::n_irreps_of`] slots of each function are meaningful.
    pub fn irreps(&self) -> &Array2<usize> {
        &self.irreps
    }

    /// Returns the raw `(function, slot)` table of indices within irreducible representations.
    pub fn func_irrep(&self) -> &Array2<usize> {
        &self.func_irrep
    }

    /// Returns the number of symmetry-adapted functions of this shell in each irreducible
    /// representation.
    pub fn nfunc_per_irrep(&self) -> &[usize] {
        &self.nfunc_per_irrep
    }

    /// Returns the Cartesian-to-spherical transformation matrix, indexed by
    /// `(Cartesian, spherical)`. This is the identity for Cartesian shells.
    pub fn cart2spher(&self) -> &Array2<f64> {
        &self.cart2spher
    }

    /// Returns the number of symmetry-equivalent centres the shell lives on.
    pub fn degeneracy(&self) -> usize {
        self.center.ndegen()
    }

    /// Returns the self-overlaps of the normalised contractions.
    pub fn self_overlaps(&self) -> Vec<f64> {
        self.coefficients
            .axis_iter(Axis(1))
            .map(|coeffs| contraction_self_overlap(self.l(), &self.exponents, coeffs))
            .collect()
    }
}

impl<G: PointGroup> fmt::Display for Shell<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let group = self.center.group();
        writeln!(f, "{} on {}", self.description, self.center)?;
        let labels = self.shell_order.labels();
        let label_width = labels
            .iter()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(1)
            .max(4);
        for (func, label) in labels.iter().enumerate() {
            writeln!(
                f,
                "  {label:<label_width$} │ {}",
                self.irreps_of(func)
                    .iter()
                    .zip(self.func_irrep_of(func).iter())
                    .map(|(&irrep, idx)| format!("{}[{idx}]", group.irrep_symbol(irrep)))
                    .join(" ")
            )?;
        }
        Ok(())
    }
}
