//! Human-readable specification of centres and shells in ShellSym input configuration.

use std::sync::Arc;

use anyhow::{self, ensure, format_err};
use derive_builder::Builder;
use nalgebra::Point3;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::angmom::{angmom_label, ANGMOM_INDICES};
use crate::auxiliary::center::Center;
use crate::basis::basis_set::CenterDefinition;
use crate::basis::shell::ShellDefinition;
use crate::group::PointGroup;

// --------------------
// InputAngularMomentum
// --------------------

/// Serialisable/deserialisable enumerated type for the angular momentum of a shell, given either
/// as a non-negative integer or as an alphabetical label.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum InputAngularMomentum {
    /// Angular momentum given as an integer, *e.g.* `2`.
    Index(u32),

    /// Angular momentum given as a case-insensitive letter, *e.g.* `D`.
    Label(String),
}

impl InputAngularMomentum {
    /// Resolves the angular momentum into an integer.
    ///
    /// # Errors
    ///
    /// Errors if the label is not a recognised angular momentum letter.
    pub fn l(&self) -> Result<u32, anyhow::Error> {
        match self {
            InputAngularMomentum::Index(l) => Ok(*l),
            InputAngularMomentum::Label(label) => ANGMOM_INDICES
                .get(label.to_uppercase().as_str())
                .copied()
                .ok_or_else(|| format_err!("Unknown angular momentum label `{label}`.")),
        }
    }
}

impl Default for InputAngularMomentum {
    fn default() -> Self {
        InputAngularMomentum::Label(angmom_label(0))
    }
}

// ----------
// InputShell
// ----------

fn default_true() -> bool {
    true
}

/// Serialisable/deserialisable structure representing a contracted shell in the input.
#[derive(Clone, Debug, Builder, Serialize, Deserialize, PartialEq)]
pub struct InputShell {
    /// The angular momentum of the shell.
    pub l: InputAngularMomentum,

    /// Whether the shell consists of real solid harmonics. Cartesian functions are used otherwise.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub spherical: bool,

    /// Whether the lower-degree contaminants of a spherical shell are retained.
    #[builder(default = "false")]
    #[serde(default)]
    pub keep_contaminants: bool,

    /// The primitive exponents.
    pub exponents: Vec<f64>,

    /// The contraction coefficients, one row per primitive and one column per contraction.
    pub coefficients: Vec<Vec<f64>>,
}

impl InputShell {
    /// Returns a builder to construct [`InputShell`].
    pub fn builder() -> InputShellBuilder {
        InputShellBuilder::default()
    }

    /// Converts the [`InputShell`] into a [`ShellDefinition`].
    ///
    /// # Errors
    ///
    /// Errors if the angular momentum cannot be resolved or if the coefficient rows are ragged.
    pub fn to_shell_definition(&self) -> Result<ShellDefinition, anyhow::Error> {
        let l = self.l.l()?;
        let nrows = self.coefficients.len();
        let ncols = self.coefficients.first().map(Vec::len).unwrap_or(0);
        ensure!(
            self.coefficients.iter().all(|row| row.len() == ncols),
            "Contraction coefficient rows of the {} shell have inconsistent lengths.",
            angmom_label(l)
        );
        let coefficients = Array2::from_shape_vec(
            (nrows, ncols),
            self.coefficients.iter().flatten().copied().collect(),
        )?;
        ShellDefinition::builder()
            .l(l)
            .spherical(self.spherical)
            .keep_contaminants(self.keep_contaminants)
            .exponents(&self.exponents)
            .coefficients(coefficients)
            .build()
            .map_err(|err| format_err!(err))
    }
}

impl Default for InputShell {
    fn default() -> Self {
        InputShell::builder()
            .l(InputAngularMomentum::default())
            .exponents(vec![1.0])
            .coefficients(vec![vec![1.0]])
            .build()
            .expect("Unable to build a default `InputShell`.")
    }
}

// -----------
// InputCenter
// -----------

/// Serialisable/deserialisable structure representing a symmetry-unique centre and its shells.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InputCenter {
    /// A label for the centre, *e.g.* an atomic symbol.
    pub label: String,

    /// The Cartesian position of the centre.
    pub position: Point3<f64>,

    /// The shells on this centre.
    #[serde(default)]
    pub shells: Vec<InputShell>,
}

impl InputCenter {
    /// Converts the [`InputCenter`] into a [`CenterDefinition`] whose orbit is generated by a
    /// point group.
    ///
    /// # Arguments
    ///
    /// * `group` - The point group generating the orbit of the centre.
    /// * `threshold` - The distance below which two images are considered identical.
    ///
    /// # Errors
    ///
    /// Errors if any shell cannot be converted.
    pub fn to_center_definition<G: PointGroup>(
        &self,
        group: &Arc<G>,
        threshold: f64,
    ) -> Result<CenterDefinition<G>, anyhow::Error> {
        let center = Arc::new(Center::from_group(Arc::clone(group), self.position, threshold));
        let shells = self
            .shells
            .iter()
            .enumerate()
            .map(|(ishell, shell)| {
                shell.to_shell_definition().map_err(|err| {
                    format_err!(
                        "Invalid shell {ishell} on centre `{}`: {err}",
                        self.label
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CenterDefinition {
            label: self.label.clone(),
            center,
            shells,
        })
    }
}

impl Default for InputCenter {
    fn default() -> Self {
        InputCenter {
            label: "X".to_string(),
            position: Point3::origin(),
            shells: vec![InputShell::default()],
        }
    }
}
