//! ShellSym input configuration parsed from YAML.

use std::sync::Arc;

use anyhow::{self, ensure, Context};
use serde::{Deserialize, Serialize};

use crate::auxiliary::center::MAX_ORBIT_THRESHOLD;
use crate::basis::basis_set::BasisSet;
use crate::drivers::shell_classification::{ShellClassificationDriver, ShellClassificationParams};
use crate::drivers::ShellSymDriver;
use crate::group::{AbelianPointGroup, AbelianPointGroupKind};
use crate::interfaces::input::ao_basis::InputCenter;
use crate::interfaces::InputHandle;
use crate::io::format::{log_subtitle, shellsym_output, ShellSymOutput};

pub mod ao_basis;


fn default_orbit_threshold() -> f64 {
    1e-6
}

/// A structure containing ShellSym input parameters which can be serialised into and
/// deserialised from a YAML input file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Input {
    /// The point group of the molecule in its standard orientation.
    pub point_group: AbelianPointGroupKind,

    /// The distance below which two images of a centre are considered identical.
    ///
    /// # Default
    ///
    /// If not specified, this will be taken to be `1e-6`.
    #[serde(default = "default_orbit_threshold")]
    pub orbit_threshold: f64,

    /// The symmetry-unique centres and their shells.
    pub centers: Vec<InputCenter>,

    /// Control parameters for shell classification.
    ///
    /// # Default
    ///
    /// If not specified, the default parameters are used.
    #[serde(default)]
    pub classification: ShellClassificationParams,
}

impl Input {
    /// Constructs the symmetry-adapted basis set described by this input.
    ///
    /// # Errors
    ///
    /// Errors if the orbit threshold is not positive or exceeds [`MAX_ORBIT_THRESHOLD`], or if any
    /// centre or shell is invalid.
    pub fn basis_set(&self) -> Result<BasisSet<AbelianPointGroup>, anyhow::Error> {
        ensure!(
            self.orbit_threshold > 0.0 && self.orbit_threshold <= MAX_ORBIT_THRESHOLD,
            "The orbit threshold must lie in (0, {MAX_ORBIT_THRESHOLD:e}], but {} was given.",
            self.orbit_threshold
        );
        let group = Arc::new(AbelianPointGroup::new(self.point_group));
        let center_definitions = self
            .centers
            .iter()
            .map(|center| center.to_center_definition(&group, self.orbit_threshold))
            .collect::<Result<Vec<_>, _>>()?;
        BasisSet::new(group, center_definitions)
    }
}

impl Default for Input {
    fn default() -> Self {
        Input {
            point_group: AbelianPointGroupKind::C1,
            orbit_threshold: default_orbit_threshold(),
            centers: vec![InputCenter::default()],
            classification: ShellClassificationParams::default(),
        }
    }
}

impl InputHandle for Input {
    fn handle(&self) -> Result<(), anyhow::Error> {
        let basis_set = self
            .basis_set()
            .with_context(|| "Unable to construct the symmetry-adapted basis set from the input")?;
        log_subtitle("Symmetry-adapted basis set");
        shellsym_output!("");
        basis_set.group().log_output_display();
        shellsym_output!("");
        for center in basis_set.basis_centers() {
            shellsym_output!("{}: {}", center.label(), center.center());
        }
        shellsym_output!("");
        basis_set.log_output_display();
        shellsym_output!("");

        let mut driver = ShellClassificationDriver::builder()
            .parameters(&self.classification)
            .basis_set(&basis_set)
            .build()
            .with_context(|| "Unable to construct a shell classification driver")?;
        driver
            .run()
            .with_context(|| "Unable to execute the shell classification driver successfully")
    }
}
