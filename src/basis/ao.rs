//! Angular component orderings of atomic-orbital shells.

use std::cmp::Ordering;
use std::slice::Iter;

use itertools::Itertools;

use crate::angmom::ANGMOM_LABELS;

#[cfg(test)]
#[path = "ao_tests.rs"]
mod ao_tests;

// -------------------
// Shell order structs
// -------------------

// ~~~~~~~~~
// CartOrder
// ~~~~~~~~~

/// Structure to contain the lexicographic ordering of Cartesian Gaussians of a certain rank, *i.e.*
/// $`l_x`$ decreasing from $`l_{\mathrm{cart}}`$ to $`0`$ and, for each $`l_x`$, $`l_y`$
/// decreasing from $`l_{\mathrm{cart}} - l_x`$ to $`0`$.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CartOrder {
    cart_tuples: Vec<(u32, u32, u32)>,

    /// The rank of the Cartesian Gaussians.
    pub lcart: u32,
}

impl CartOrder {
    /// Constructs the lexicographic [`CartOrder`] of a specified rank.
    #[must_use]
    pub fn lex(lcart: u32) -> Self {
        let cart_tuples = (0..=lcart)
            .rev()
            .flat_map(|lx| {
                (0..=(lcart - lx))
                    .rev()
                    .map(move |ly| (lx, ly, lcart - lx - ly))
            })
            .collect_vec();
        Self { cart_tuples, lcart }
    }

    /// Iterates over the $`(l_x, l_y, l_z)`$ tuples.
    pub fn iter(&'_ self) -> Iter<'_, (u32, u32, u32)> {
        self.cart_tuples.iter()
    }

    /// Returns the number of Cartesian components, $`\frac{1}{2}(l+1)(l+2)`$.
    pub fn ncomps(&self) -> usize {
        self.cart_tuples.len()
    }
}

/// Translates a Cartesian exponent tuple to a human-understandable string.
///
/// # Arguments
///
/// * `cart_tuple` - A tuple of $`(l_x, l_y, l_z)`$ specifying the exponents of the Cartesian
/// components of the Cartesian Gaussian.
/// * `flat` - A flag indicating if the string representation is flat (*e.g.* `xxyz`) or compact
/// (*e.g.* `x^2yz`).
///
/// Returns
///
/// The string representation of the Cartesian exponent tuple.
pub(crate) fn cart_tuple_to_str(cart_tuple: &(u32, u32, u32), flat: bool) -> String {
    if cart_tuple.0 + cart_tuple.1 + cart_tuple.2 == 0u32 {
        "1".to_string()
    } else {
        let cart_array = [cart_tuple.0, cart_tuple.1, cart_tuple.2];
        let carts = ["x", "y", "z"];
        cart_array
            .iter()
            .enumerate()
            .map(|(i, &l)| {
                if flat {
                    carts[i].repeat(l as usize)
                } else {
                    match l.cmp(&1) {
                        Ordering::Greater => format!("{}^{l}", carts[i]),
                        Ordering::Equal => carts[i].to_string(),
                        Ordering::Less => String::new(),
                    }
                }
            })
            .collect::<String>()
    }
}

// ~~~~~~~~~
// PureOrder
// ~~~~~~~~~

/// Structure to contain the ordering of real solid harmonic Gaussians spanning a Cartesian rank,
/// possibly including lower-degree contaminants.
///
/// The components are arranged with $`l`$ decreasing from $`l_{\mathrm{cart}}`$ in steps of
/// two (only $`l = l_{\mathrm{cart}}`$ without contaminants) and, for each $`l`$, with
/// $`m = +l, -l, +(l-1), -(l-1), \ldots, +1, -1, 0`$.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PureOrder {
    pure_tuples: Vec<(u32, i32)>,

    /// The Cartesian rank spanned by the pure Gaussians.
    pub lcart: u32,

    /// Whether the lower-degree contaminants $`l = l_{\mathrm{cart}} - 2, l_{\mathrm{cart}} - 4,
    /// \ldots`$ are included.
    pub keep_contaminants: bool,
}

impl PureOrder {
    /// Constructs the [`PureOrder`] spanning a specified Cartesian rank.
    ///
    /// # Arguments
    ///
    /// * `lcart` - The Cartesian rank.
    /// * `keep_contaminants` - Whether the lower-degree contaminants are included.
    #[must_use]
    pub fn new(lcart: u32, keep_contaminants: bool) -> Self {
        let lmin = if keep_contaminants { lcart % 2 } else { lcart };
        let pure_tuples = (lmin..=lcart)
            .rev()
            .step_by(2)
            .flat_map(|l| {
                // Solid harmonics beyond i32::MAX are never tabulated.
                let li32 = i32::try_from(l).unwrap_or(i32::MAX);
                (1..=li32)
                    .rev()
                    .flat_map(move |absm| [(l, absm), (l, -absm)])
                    .chain(std::iter::once((l, 0)))
            })
            .collect_vec();
        Self {
            pure_tuples,
            lcart,
            keep_contaminants,
        }
    }

    /// Iterates over the $`(l, m)`$ tuples.
    pub fn iter(&'_ self) -> Iter<'_, (u32, i32)> {
        self.pure_tuples.iter()
    }

    /// Returns the number of pure components, which is $`2l_{\mathrm{cart}} + 1`$ without
    /// contaminants and $`\frac{1}{2}(l_{\mathrm{cart}}+1)(l_{\mathrm{cart}}+2)`$ with.
    pub fn ncomps(&self) -> usize {
        self.pure_tuples.len()
    }
}

/// Translates an $`(l, m)`$ tuple to a human-understandable string such as `d+2` or `s0`.
pub(crate) fn pure_tuple_to_str(pure_tuple: &(u32, i32)) -> String {
    let (l, m) = pure_tuple;
    let label = ANGMOM_LABELS
        .get(*l as usize)
        .map(|label| label.to_lowercase())
        .unwrap_or_else(|| format!("[{l}]"));
    if *m == 0 {
        format!("{label}0")
    } else {
        format!("{label}{m:+}")
    }
}

// ~~~~~~~~~~
// ShellOrder
// ~~~~~~~~~~

/// Enumerated type to indicate the type of the angular functions in a shell and how they are
/// ordered.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ShellOrder {
    /// This variant indicates that the angular functions are real solid harmonics.
    Pure(PureOrder),

    /// This variant indicates that the angular functions are Cartesian functions.
    Cart(CartOrder),
}

impl ShellOrder {
    /// Constructs the canonical [`ShellOrder`] of a shell.
    ///
    /// # Arguments
    ///
    /// * `l` - The angular momentum of the shell.
    /// * `spherical` - Whether the shell consists of real solid harmonics.
    /// * `keep_contaminants` - Whether lower-degree contaminants are retained. Ignored for
    /// Cartesian shells.
    pub fn new(l: u32, spherical: bool, keep_contaminants: bool) -> Self {
        if spherical {
            ShellOrder::Pure(PureOrder::new(l, keep_contaminants))
        } else {
            ShellOrder::Cart(CartOrder::lex(l))
        }
    }

    /// Returns the number of angular functions.
    pub fn ncomps(&self) -> usize {
        match self {
            ShellOrder::Pure(pure_order) => pure_order.ncomps(),
            ShellOrder::Cart(cart_order) => cart_order.ncomps(),
        }
    }

    /// Returns human-readable labels of the angular functions in order.
    pub fn labels(&self) -> Vec<String> {
        match self {
            ShellOrder::Pure(pure_order) => pure_order.iter().map(pure_tuple_to_str).collect(),
            ShellOrder::Cart(cart_order) => cart_order
                .iter()
                .map(|cart_tuple| cart_tuple_to_str(cart_tuple, true))
                .collect(),
        }
    }
}
