//! Driver for the symmetry classification of the shells in a basis set.

use std::fmt;
use std::path::PathBuf;

use anyhow::{self, format_err};
use derive_builder::Builder;
use indexmap::IndexMap;
use itertools::Itertools;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::basis::basis_set::BasisSet;
use crate::basis::shell::Shell;
use crate::drivers::ShellSymDriver;
use crate::group::PointGroup;
use crate::io::format::{
    log_macsec_begin, log_macsec_end, log_subtitle, log_title, nice_bool, shellsym_output,
    shellsym_warn, write_subtitle, ShellSymOutput,
};
use crate::io::{write_shellsym_binary, ShellSymFileType};

#[cfg(test)]
#[path = "shell_classification_tests.rs"]
mod shell_classification_tests;

// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

/// A structure containing control parameters for shell classification.
#[derive(Clone, Builder, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShellClassificationParams {
    /// Boolean indicating if the parity of every function under every operation is to be written
    /// to the output.
    #[builder(default = "false")]
    pub write_parity_tables: bool,

    /// Boolean indicating if the Cartesian-to-spherical transformation matrices are to be written
    /// to the output.
    #[builder(default = "false")]
    pub write_transformation_matrices: bool,

    /// Optional name for saving the result as a binary file of type [`ShellSymFileType::Cls`].
    /// If `None`, the result will not be saved.
    #[builder(default = "None")]
    pub result_save_name: Option<PathBuf>,
}

impl ShellClassificationParams {
    /// Returns a builder to construct a [`ShellClassificationParams`] structure.
    pub fn builder() -> ShellClassificationParamsBuilder {
        ShellClassificationParamsBuilder::default()
    }
}

impl Default for ShellClassificationParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to build a default `ShellClassificationParams`.")
    }
}

impl fmt::Display for ShellClassificationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Write parity tables: {}",
            nice_bool(self.write_parity_tables)
        )?;
        writeln!(
            f,
            "Write Cartesian-to-spherical matrices: {}",
            nice_bool(self.write_transformation_matrices)
        )?;
        writeln!(
            f,
            "Save shell classification results to file: {}",
            if let Some(name) = self.result_save_name.as_ref() {
                let mut path = name.clone();
                path.set_extension(ShellSymFileType::Cls.ext());
                path.display().to_string()
            } else {
                nice_bool(false)
            }
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Result
// ------

/// A structure containing the classification of one shell.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShellSummary {
    /// The label of the centre carrying the shell.
    pub center_label: String,

    /// The description of the shell.
    pub description: String,

    /// The number of symmetry-equivalent centres.
    pub ndegen: usize,

    /// The labels of the angular functions.
    pub function_labels: Vec<String>,

    /// For each function, the symbols of the irreducible representations it is classified into.
    pub irreps: Vec<Vec<String>>,

    /// For each function, the indices of its symmetry-adapted functions within the irreducible
    /// representations of [`Self::irreps`].
    pub func_irrep: Vec<Vec<usize>>,

    /// The number of symmetry-adapted functions of the shell in each irreducible representation.
    pub nfunc_per_irrep: Vec<usize>,

    /// The offsets of the shell in each irreducible representation block.
    pub irrep_offsets: Vec<usize>,

    /// The normalised contraction coefficients.
    pub coefficients: Array2<f64>,

    /// The Cartesian-to-spherical transformation matrix.
    pub cart2spher: Array2<f64>,

    /// The parity table indexed by `(function, operation)`.
    pub parity: Array2<i8>,
}

impl ShellSummary {
    fn new<G: PointGroup>(
        center_label: &str,
        shell: &Shell<G>,
        irrep_offsets: Vec<usize>,
    ) -> Self {
        let group = shell.center().group();
        let nfunc = shell.n_funcs();
        Self {
            center_label: center_label.to_string(),
            description: shell.description().to_string(),
            ndegen: shell.degeneracy(),
            function_labels: shell.shell_order().labels(),
            irreps: (0..nfunc)
                .map(|func| {
                    shell
                        .irreps_of(func)
                        .into_iter()
                        .map(|irrep| group.irrep_symbol(irrep))
                        .collect()
                })
                .collect(),
            func_irrep: (0..nfunc).map(|func| shell.func_irrep_of(func)).collect(),
            nfunc_per_irrep: shell.nfunc_per_irrep().to_vec(),
            irrep_offsets,
            coefficients: shell.coefficients().clone(),
            cart2spher: shell.cart2spher().clone(),
            parity: shell.parity().clone(),
        }
    }
}

impl fmt::Display for ShellSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} on centre {} ({} symmetry-equivalent)",
            self.description, self.center_label, self.ndegen
        )?;
        let label_width = self
            .function_labels
            .iter()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(1)
            .max(4);
        writeln!(f, "{}", "┈".repeat(label_width + 30))?;
        writeln!(f, " {:<label_width$}  Irreps [index]", "Func")?;
        writeln!(f, "{}", "┈".repeat(label_width + 30))?;
        for ((label, irreps), indices) in self
            .function_labels
            .iter()
            .zip(self.irreps.iter())
            .zip(self.func_irrep.iter())
        {
            writeln!(
                f,
                " {label:<label_width$}  {}",
                irreps
                    .iter()
                    .zip(indices.iter())
                    .map(|(irrep, idx)| format!("{irrep}[{idx}]"))
                    .join(" ")
            )?;
        }
        writeln!(f, "{}", "┈".repeat(label_width + 30))?;
        Ok(())
    }
}

/// A structure to contain shell classification results.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShellClassificationResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: ShellClassificationParams,

    /// The name of the point group.
    pub group_name: String,

    /// The symbols of the irreducible representations.
    pub irrep_symbols: Vec<String>,

    /// The symbols of the operations.
    pub operation_symbols: Vec<String>,

    /// The classification of every shell, in basis-set order.
    pub shells: Vec<ShellSummary>,

    /// The total number of symmetry-adapted functions in each irreducible representation.
    pub nfunc_per_irrep: IndexMap<String, usize>,
}

impl ShellClassificationResult {
    /// The total number of symmetry-adapted functions.
    pub fn n_funcs(&self) -> usize {
        self.nfunc_per_irrep.values().sum()
    }
}

impl fmt::Display for ShellClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(
            f,
            &format!("Symmetry-adapted functions in {}", self.group_name),
        )?;
        let irrep_width = self
            .irrep_symbols
            .iter()
            .map(|symbol| symbol.chars().count())
            .max()
            .unwrap_or(1)
            .max(5);
        let desc_width = self
            .shells
            .iter()
            .map(|shell| shell.description.chars().count())
            .max()
            .unwrap_or(5)
            .max(5);
        let label_width = self
            .shells
            .iter()
            .map(|shell| shell.center_label.chars().count())
            .max()
            .unwrap_or(6)
            .max(6);
        let nshells = self.shells.len();
        let index_width = nshells.to_string().len().max(1);
        let total_width =
            index_width + label_width + desc_width + 6 + (irrep_width + 1) * self.irrep_symbols.len();
        writeln!(f, "{}", "┈".repeat(total_width))?;
        writeln!(
            f,
            "{:>index_width$} {:<label_width$} {:<desc_width$}   {}",
            "#",
            "Centre",
            "Shell",
            self.irrep_symbols
                .iter()
                .map(|symbol| format!("{symbol:>irrep_width$}"))
                .join(" ")
        )?;
        writeln!(f, "{}", "┈".repeat(total_width))?;
        for (ishell, shell) in self.shells.iter().enumerate() {
            writeln!(
                f,
                "{ishell:>index_width$} {:<label_width$} {:<desc_width$}   {}",
                shell.center_label,
                shell.description,
                shell
                    .nfunc_per_irrep
                    .iter()
                    .map(|n| format!("{n:>irrep_width$}"))
                    .join(" ")
            )?;
        }
        writeln!(f, "{}", "┈".repeat(total_width))?;
        writeln!(
            f,
            "{:>index_width$} {:<label_width$} {:<desc_width$}   {}",
            "",
            "Total",
            format!("{} function(s)", self.n_funcs()),
            self.nfunc_per_irrep
                .values()
                .map(|n| format!("{n:>irrep_width$}"))
                .join(" ")
        )?;
        writeln!(f, "{}", "┈".repeat(total_width))?;
        Ok(())
    }
}

// ------
// Driver
// ------

/// A driver for the symmetry classification of the shells in a basis set.
#[derive(Clone, Builder)]
pub struct ShellClassificationDriver<'a, G>
where
    G: PointGroup + Clone,
{
    /// The control parameters for shell classification.
    parameters: &'a ShellClassificationParams,

    /// The symmetry-adapted basis set whose shells are reported.
    basis_set: &'a BasisSet<G>,

    /// The result of the shell classification.
    #[builder(setter(skip), default = "None")]
    result: Option<ShellClassificationResult>,
}

impl<'a, G> ShellClassificationDriver<'a, G>
where
    G: PointGroup + Clone,
{
    /// Returns a builder to construct a [`ShellClassificationDriver`] structure.
    pub fn builder() -> ShellClassificationDriverBuilder<'a, G> {
        ShellClassificationDriverBuilder::default()
    }

    /// Logs the character table of the point group.
    fn log_character_table(&self) {
        let group = self.basis_set.group();
        let irwidth = (0..group.n_irreps())
            .map(|irrep| group.irrep_symbol(irrep).chars().count())
            .max()
            .unwrap_or(1);
        let opwidth = (0..group.order())
            .map(|op| group.operation_symbol(op).chars().count())
            .max()
            .unwrap_or(1)
            .max(2);
        shellsym_output!(
            "{:irwidth$} │ {}",
            "",
            (0..group.order())
                .map(|op| format!("{:>opwidth$}", group.operation_symbol(op)))
                .join(" ")
        );
        for irrep in 0..group.n_irreps() {
            shellsym_output!(
                "{:irwidth$} │ {}",
                group.irrep_symbol(irrep),
                (0..group.order())
                    .map(|op| format!("{:>+opwidth$.0}", group.character(irrep, op)))
                    .join(" ")
            );
        }
    }

    /// Logs the parity table of a shell.
    fn log_parity_table(&self, summary: &ShellSummary) {
        let group = self.basis_set.group();
        let label_width = summary
            .function_labels
            .iter()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(1)
            .max(4);
        let opwidth = (0..group.order())
            .map(|op| group.operation_symbol(op).chars().count())
            .max()
            .unwrap_or(1)
            .max(2);
        shellsym_output!("Parities:");
        shellsym_output!(
            " {:<label_width$} │ {}",
            "Func",
            (0..group.order())
                .map(|op| format!("{:>opwidth$}", group.operation_symbol(op)))
                .join(" ")
        );
        for (label, row) in summary
            .function_labels
            .iter()
            .zip(summary.parity.rows())
        {
            shellsym_output!(
                " {label:<label_width$} │ {}",
                row.iter().map(|p| format!("{p:>+opwidth$}")).join(" ")
            );
        }
    }

    /// Logs the Cartesian-to-spherical transformation matrix of a shell.
    fn log_transformation_matrix(&self, summary: &ShellSummary) {
        shellsym_output!("Cartesian-to-spherical transformation:");
        for row in summary.cart2spher.rows() {
            shellsym_output!(
                "  {}",
                row.iter().map(|v| format!("{v:>+10.6}")).join(" ")
            );
        }
    }

    /// Executes shell classification.
    fn classify_shells(&mut self) -> Result<(), anyhow::Error> {
        log_title("Shell Symmetry Classification");
        shellsym_output!("");
        let params = self.parameters;
        params.log_output_display();

        let basis_set = self.basis_set;
        let group = basis_set.group();
        log_subtitle(&format!("Character table of {}", group.name()));
        shellsym_output!("");
        self.log_character_table();
        shellsym_output!("");

        log_subtitle("Shell classification");
        shellsym_output!("");
        let shells = basis_set
            .basis_centers()
            .iter()
            .flat_map(|bc| bc.shells().iter().map(move |shell| (bc.label(), shell)))
            .enumerate()
            .map(|(ishell, (label, shell))| {
                let summary =
                    ShellSummary::new(label, shell, basis_set.irrep_offsets(ishell).to_vec());
                log_macsec_begin(&format!("Shell {ishell}"));
                shellsym_output!("");
                summary.log_output_display();
                if params.write_parity_tables {
                    self.log_parity_table(&summary);
                    shellsym_output!("");
                }
                if params.write_transformation_matrices {
                    self.log_transformation_matrix(&summary);
                    shellsym_output!("");
                }
                log_macsec_end(&format!("Shell {ishell}"));
                shellsym_output!("");
                summary
            })
            .collect::<Vec<_>>();

        let irrep_symbols = (0..group.n_irreps())
            .map(|irrep| group.irrep_symbol(irrep))
            .collect::<Vec<_>>();
        let nfunc_per_irrep = irrep_symbols
            .iter()
            .cloned()
            .zip(basis_set.nfunc_per_irrep().iter().copied())
            .collect::<IndexMap<_, _>>();
        for (symbol, n) in nfunc_per_irrep.iter() {
            if *n == 0 {
                shellsym_warn!("No symmetry-adapted functions span irreducible representation {symbol}.");
            }
        }

        let result = ShellClassificationResult {
            parameters: params.clone(),
            group_name: group.name(),
            irrep_symbols,
            operation_symbols: (0..group.order())
                .map(|op| group.operation_symbol(op))
                .collect(),
            shells,
            nfunc_per_irrep,
        };
        result.log_output_display();
        shellsym_output!("");

        if let Some(name) = params.result_save_name.as_ref() {
            write_shellsym_binary(name, ShellSymFileType::Cls, &result)?;
            shellsym_output!(
                "Shell classification results saved as {}.{}.",
                name.display(),
                ShellSymFileType::Cls.ext()
            );
            shellsym_output!("");
        }

        self.result = Some(result);
        Ok(())
    }
}

impl<'a, G> ShellSymDriver for ShellClassificationDriver<'a, G>
where
    G: PointGroup + Clone,
{
    type Params = ShellClassificationParams;

    type Outcome = ShellClassificationResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No shell classification results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.classify_shells()
    }
}
