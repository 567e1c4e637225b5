//! Helper items to assist the construction of symmetry-adapted shells.

pub mod center;
