//! Symmetry-equivalent centres carrying atomic-orbital shells.

use std::fmt;
use std::sync::Arc;

use anyhow::{self, ensure};
use nalgebra::Point3;
use num_traits::ToPrimitive;

use crate::group::PointGroup;

#[cfg(test)]
#[path = "center_tests.rs"]
mod center_tests;

/// The largest admissible distance threshold for identifying symmetry-equivalent images.
pub const MAX_ORBIT_THRESHOLD: f64 = 1e-3;

/// Relative distance above which an identification of two images is no longer numerical noise.
const MERGE_NOISE: f64 = 1e-10;

/// Structure representing a centre together with its orbit of symmetry-equivalent images under a
/// point group.
#[derive(Debug)]
pub struct Center<G: PointGroup> {
    /// The point group acting on the centre.
    group: Arc<G>,

    /// The ordered symmetry-equivalent centres. The first element is the generating position.
    orbit: Vec<Point3<f64>>,

    /// The index in [`Self::orbit`] of the image of the generating position under each
    /// operation of [`Self::group`].
    images: Vec<usize>,

    /// The threshold used to identify symmetry-equivalent images.
    threshold: f64,
}

impl<G: PointGroup> Center<G> {
    /// Constructs a centre from an explicit orbit and operation image table.
    ///
    /// The image table is not checked against the group here; any inconsistency is reported as a
    /// structural error when a shell is built on this centre.
    ///
    /// # Arguments
    ///
    /// * `group` - The shared point group.
    /// * `orbit` - The symmetry-equivalent centres, the generating position first.
    /// * `images` - For each operation, the index of the orbit element the generating position is
    /// mapped onto.
    ///
    /// # Errors
    ///
    /// Errors if `orbit` is empty.
    pub fn new(
        group: Arc<G>,
        orbit: Vec<Point3<f64>>,
        images: Vec<usize>,
    ) -> Result<Self, anyhow::Error> {
        ensure!(!orbit.is_empty(), "A centre must have at least one orbit element.");
        Ok(Self {
            group,
            orbit,
            images,
            threshold: 1e-7,
        })
    }

    /// Generates the orbit of a position by applying every operation of a point group to it.
    ///
    /// Images lying within `threshold` (Euclidean distance) of an already known orbit element
    /// are identified with it.
    ///
    /// # Arguments
    ///
    /// * `group` - The shared point group.
    /// * `position` - The generating position.
    /// * `threshold` - The distance threshold for identifying images.
    pub fn from_group(group: Arc<G>, position: Point3<f64>, threshold: f64) -> Self {
        let mut orbit = vec![position];
        let images = (0..group.order())
            .map(|op| {
                let image = group.transform_point(op, &position);
                orbit
                    .iter()
                    .position(|known| {
                        let dist = nalgebra::distance(known, &image);
                        let merged = dist < threshold;
                        if merged && dist > MERGE_NOISE * (1.0 + position.coords.norm()) {
                            log::warn!(
                                "Image {image} of centre {position} is identified with {known} \
                                at a distance of {dist:.3e}, well above numerical noise."
                            );
                        }
                        merged
                    })
                    .unwrap_or_else(|| {
                        orbit.push(image);
                        orbit.len() - 1
                    })
            })
            .collect::<Vec<_>>();
        log::debug!(
            "Centre at {position} has {} symmetry-equivalent image(s) in {}.",
            orbit.len(),
            group.name()
        );
        Self {
            group,
            orbit,
            images,
            threshold,
        }
    }

    /// Returns the shared point group.
    pub fn group(&self) -> &Arc<G> {
        &self.group
    }

    /// Returns the generating position.
    pub fn position(&self) -> &Point3<f64> {
        &self.orbit[0]
    }

    /// Returns the ordered symmetry-equivalent centres.
    pub fn orbit(&self) -> &[Point3<f64>] {
        &self.orbit
    }

    /// Returns the number of symmetry-equivalent centres.
    pub fn ndegen(&self) -> usize {
        self.orbit.len()
    }

    /// Returns the image table, one entry per operation.
    pub fn images(&self) -> &[usize] {
        &self.images
    }

    /// Returns the index of the orbit element onto which operation `op` maps the generating
    /// position, or `None` if `op` has no entry in the image table.
    pub fn center_after_op(&self, op: usize) -> Option<usize> {
        self.images.get(op).copied()
    }
}

impl<G: PointGroup> fmt::Display for Center<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self
            .threshold
            .log10()
            .abs()
            .round()
            .to_usize()
            .unwrap_or(7)
            .min(10);
        let length = (precision + precision.div_euclid(2)).max(6);
        let pos = self.position();
        write!(
            f,
            "Centre ({:+length$.precision$}, {:+length$.precision$}, {:+length$.precision$}) \
            with {} image(s) in {}",
            pos[0],
            pos[1],
            pos[2],
            self.ndegen(),
            self.group.name()
        )
    }
}
