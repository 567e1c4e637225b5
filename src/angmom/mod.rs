//! Angular momentum labels and Cartesian-to-spherical conversion.

use phf::phf_map;

pub mod sh_conversion;

/// Alphabetical labels of angular momenta.
pub static ANGMOM_LABELS: [&str; 7] = ["S", "P", "D", "F", "G", "H", "I"];

/// Indices of alphabetical labels of angular momenta.
pub static ANGMOM_INDICES: phf::Map<&'static str, u32> = phf_map! {
    "S" => 0,
    "P" => 1,
    "D" => 2,
    "F" => 3,
    "G" => 4,
    "H" => 5,
    "I" => 6,
};

/// Returns the alphabetical label of an angular momentum, falling back to `L=<l>` for values
/// beyond the tabulated letters.
pub fn angmom_label(l: u32) -> String {
    ANGMOM_LABELS
        .get(l as usize)
        .map(|label| (*label).to_string())
        .unwrap_or_else(|| format!("L={l}"))
}
