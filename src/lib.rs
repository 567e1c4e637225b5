//! # ShellSym: symmetry-adapted atomic-orbital shells
//!
//! ShellSym classifies the functions of contracted Gaussian shells into the irreducible
//! representations of the Abelian point groups $`\mathcal{D}_{2h}`$ and its subgroups. Given a
//! shell attached to a set of symmetry-equivalent centres, it
//! - builds the parity of every Cartesian or real solid harmonic function under every operation,
//! - projects every function onto every irreducible representation over the orbit of its centre,
//! - records which irreducible representations each function contributes to and at which index,
//! - normalises the contraction coefficients of the shell, and
//! - builds the Cartesian-to-spherical transformation, optionally keeping the lower-degree
//!   contaminants.
//!
//! Shells are assembled into a [`basis::basis_set::BasisSet`] which locates every
//! symmetry-adapted function within the block of its irreducible representation.
//!
//! ## Examples and usage
//!
//! For most items (structs, enums, functions, and traits), their usages are illustrated in test
//! functions. The `shellsym` binary reads a YAML configuration such as `demos/water_c2v.yml`:
//!
//! ```text
//! shellsym -c demos/water_c2v.yml -o water -v
//! ```
//!
//! ## License
//!
//! GNU Lesser General Public License v3.0.

pub mod angmom;
pub mod auxiliary;
pub mod basis;
pub mod drivers;
pub mod group;
pub mod interfaces;
pub mod io;
