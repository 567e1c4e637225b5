//! Atomic-orbital shells, their contractions and their symmetry adaptation.

pub mod ao;
pub mod basis_set;
pub mod contraction;
pub mod shell;
