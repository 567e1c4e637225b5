//! Symmetry-adapted basis sets made of shells on symmetry-unique centres.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use anyhow::{self, ensure, format_err, Context};
use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;

use crate::auxiliary::center::Center;
use crate::basis::shell::{Shell, ShellDefinition};
use crate::group::PointGroup;

#[cfg(test)]
#[path = "basis_set_tests.rs"]
mod basis_set_tests;

// ----------------
// CenterDefinition
// ----------------

/// Structure to hold the shell definitions on one symmetry-unique centre.
#[derive(Debug)]
pub struct CenterDefinition<G: PointGroup> {
    /// A label for the centre, *e.g.* an atomic symbol.
    pub label: String,

    /// The shared centre.
    pub center: Arc<Center<G>>,

    /// The shells on this centre.
    pub shells: Vec<ShellDefinition>,
}

// -----------
// BasisCenter
// -----------

/// Structure for the constructed shells on one symmetry-unique centre.
#[derive(Debug)]
pub struct BasisCenter<G: PointGroup> {
    label: String,
    center: Arc<Center<G>>,
    shells: Vec<Shell<G>>,
}

impl<G: PointGroup> BasisCenter<G> {
    /// The label of the centre.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The shared centre.
    pub fn center(&self) -> &Arc<Center<G>> {
        &self.center
    }

    /// The symmetry-adapted shells on this centre.
    pub fn shells(&self) -> &[Shell<G>] {
        &self.shells
    }
}

// --------
// BasisSet
// --------

/// Structure to manage the symmetry-adapted shells of a molecule.
///
/// Shells are numbered consecutively over the centres in the order given. Within each irreducible
/// representation, the symmetry-adapted functions of a shell occupy a contiguous block starting at
/// the shell's offset for that irreducible representation.
#[derive(Debug)]
pub struct BasisSet<G: PointGroup> {
    /// The point group shared by all centres.
    group: Arc<G>,

    /// The constructed shells grouped by centre.
    basis_centers: Vec<BasisCenter<G>>,

    /// The offsets of the shells within each irreducible representation, indexed by
    /// `(shell, irrep)`.
    irrep_offsets: Array2<usize>,

    /// The total number of symmetry-adapted functions in each irreducible representation.
    nfunc_per_irrep: Vec<usize>,
}

impl<G: PointGroup> BasisSet<G> {
    /// Constructs all shells of a basis set.
    ///
    /// The shells are built in parallel. Any failing shell fails the whole basis set.
    ///
    /// # Arguments
    ///
    /// * `group` - The point group of the molecule.
    /// * `center_definitions` - The shell definitions on each symmetry-unique centre.
    ///
    /// # Errors
    ///
    /// Errors if a centre does not share `group`, or if any shell cannot be constructed.
    pub fn new(
        group: Arc<G>,
        center_definitions: Vec<CenterDefinition<G>>,
    ) -> Result<Self, anyhow::Error> {
        for cdef in center_definitions.iter() {
            ensure!(
                Arc::ptr_eq(cdef.center.group(), &group),
                "Centre `{}` does not share the point group {} of the basis set.",
                cdef.label,
                group.name()
            );
        }

        let basis_centers = center_definitions
            .into_par_iter()
            .map(|cdef| -> Result<BasisCenter<G>, anyhow::Error> {
                let shells = cdef
                    .shells
                    .par_iter()
                    .enumerate()
                    .map(|(ishell, sdef)| {
                        Shell::new(Arc::clone(&cdef.center), sdef).with_context(|| {
                            format!(
                                "Unable to construct shell {ishell} on centre `{}`.",
                                cdef.label
                            )
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(BasisCenter {
                    label: cdef.label,
                    center: cdef.center,
                    shells,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let nirrep = group.n_irreps();
        let n_shells = basis_centers
            .iter()
            .map(|bc| bc.shells.len())
            .sum::<usize>();
        let mut irrep_offsets = Array2::<usize>::zeros((n_shells, nirrep));
        let mut nfunc_per_irrep = vec![0; nirrep];
        for (ishell, shell) in basis_centers
            .iter()
            .flat_map(|bc| bc.shells.iter())
            .enumerate()
        {
            for (irrep, n) in shell.nfunc_per_irrep().iter().enumerate() {
                irrep_offsets[(ishell, irrep)] = nfunc_per_irrep[irrep];
                nfunc_per_irrep[irrep] += n;
            }
        }
        log::debug!(
            "Basis set with {n_shells} shell(s) on {} symmetry-unique centre(s) constructed.",
            basis_centers.len()
        );

        Ok(Self {
            group,
            basis_centers,
            irrep_offsets,
            nfunc_per_irrep,
        })
    }

    /// The point group shared by all centres.
    pub fn group(&self) -> &Arc<G> {
        &self.group
    }

    /// The constructed shells grouped by centre.
    pub fn basis_centers(&self) -> &[BasisCenter<G>] {
        &self.basis_centers
    }

    /// Returns an iterator over all shells in the basis set.
    pub fn all_shells(&self) -> impl Iterator<Item = &Shell<G>> {
        self.basis_centers.iter().flat_map(|bc| bc.shells.iter())
    }

    /// The number of shells in the basis set.
    pub fn n_shells(&self) -> usize {
        self.irrep_offsets.nrows()
    }

    /// The number of atomic-orbital functions over all symmetry-equivalent centres.
    pub fn n_funcs(&self) -> usize {
        self.all_shells()
            .map(|shell| shell.n_funcs() * shell.degeneracy())
            .sum()
    }

    /// The total number of symmetry-adapted functions in each irreducible representation.
    pub fn nfunc_per_irrep(&self) -> &[usize] {
        &self.nfunc_per_irrep
    }

    /// The offsets of a shell within each irreducible representation.
    pub fn irrep_offsets(&self, ishell: usize) -> ArrayView1<usize> {
        self.irrep_offsets.row(ishell)
    }

    /// Locates a symmetry-adapted function in its irreducible-representation block.
    ///
    /// # Arguments
    ///
    /// * `ishell` - The index of the shell in the basis set.
    /// * `func` - The index of the function within the shell.
    /// * `slot` - The classification slot of the function.
    ///
    /// # Returns
    ///
    /// A tuple of the irreducible representation and the index of the symmetry-adapted function
    /// within it.
    ///
    /// # Errors
    ///
    /// Errors if any index is out of range.
    pub fn so_index(
        &self,
        ishell: usize,
        func: usize,
        slot: usize,
    ) -> Result<(usize, usize), anyhow::Error> {
        let shell = self
            .all_shells()
            .nth(ishell)
            .ok_or_else(|| format_err!("Shell index {ishell} out of range."))?;
        ensure!(
            func < shell.n_funcs(),
            "Function index {func} out of range for shell {ishell}."
        );
        ensure!(
            slot < shell.n_irreps_of(func),
            "Slot {slot} out of range for function {func} of shell {ishell}."
        );
        let irrep = shell.irreps()[(func, slot)];
        Ok((
            irrep,
            self.irrep_offsets[(ishell, irrep)] + shell.func_irrep()[(func, slot)],
        ))
    }
}

impl<G: PointGroup> Index<usize> for BasisSet<G> {
    type Output = Shell<G>;

    fn index(&self, i: usize) -> &Self::Output {
        self.all_shells()
            .nth(i)
            .unwrap_or_else(|| panic!("Unable to obtain the basis shell with index {i}."))
    }
}

impl<G: PointGroup> fmt::Display for BasisSet<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Basis set in {}: {} shell(s), {} function(s)",
            self.group.name(),
            self.n_shells(),
            self.n_funcs()
        )?;
        for (irrep, n) in self.nfunc_per_irrep.iter().enumerate() {
            writeln!(f, "  {}: {n}", self.group.irrep_symbol(irrep))?;
        }
        Ok(())
    }
}
