//! Eye geometry and the eye aspect ratio (EAR) openness estimate.
//!
//! Each eye is described by six landmarks in a fixed order: outer corner,
//! two upper-lid points, inner corner, then the two lower-lid points facing
//! the upper ones (index 4 under index 2, index 5 under index 1).

use crate::{
    constants::{EPSILON, EYE_LANDMARK_COUNT, MIN_EYE_WIDTH_FRACTION},
    Error, Result,
};

/// A 2D landmark position in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point2 {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f64; 2]> for Point2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Six boundary landmarks of one eye
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeLandmarkSet {
    /// Points in anatomical order
    pub points: [Point2; EYE_LANDMARK_COUNT],
}

impl EyeLandmarkSet {
    /// Create a landmark set from six ordered points
    #[must_use]
    pub const fn new(points: [Point2; EYE_LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Pick the six eye points out of a full face mesh
    ///
    /// # Errors
    ///
    /// Returns an error if any index falls outside the mesh
    pub fn from_mesh(mesh: &[Point2], indices: &[usize; EYE_LANDMARK_COUNT]) -> Result<Self> {
        let mut points = [Point2::default(); EYE_LANDMARK_COUNT];
        for (slot, &index) in points.iter_mut().zip(indices) {
            *slot = *mesh.get(index).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Landmark index {index} out of range for mesh of {} points",
                    mesh.len()
                ))
            })?;
        }
        Ok(Self { points })
    }

    /// Raw aspect ratio `(|p1-p5| + |p2-p4|) / (2 |p0-p3|)`
    ///
    /// A zero-width eye yields a non-finite value.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        let p = &self.points;
        let vertical_outer = p[1].distance(&p[5]);
        let vertical_inner = p[2].distance(&p[4]);
        let horizontal = p[0].distance(&p[3]);
        (vertical_outer + vertical_inner) / (2.0 * horizontal)
    }

    /// Aspect ratio, or `None` when the geometry is degenerate
    ///
    /// The width counts as near zero when it is below [`EPSILON`] or below
    /// [`MIN_EYE_WIDTH_FRACTION`] of the mean lid gap, whatever the pixel scale.
    #[must_use]
    pub fn checked_aspect_ratio(&self) -> Option<f64> {
        let p = &self.points;
        let width = p[0].distance(&p[3]);
        let lid_gap = (p[1].distance(&p[5]) + p[2].distance(&p[4])) / 2.0;
        if width < EPSILON || width < lid_gap * MIN_EYE_WIDTH_FRACTION {
            return None;
        }
        let ratio = self.aspect_ratio();
        ratio.is_finite().then_some(ratio)
    }
}

/// Both eyes of the single tracked face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyePair {
    /// Subject's left eye
    pub left: EyeLandmarkSet,
    /// Subject's right eye
    pub right: EyeLandmarkSet,
}

impl EyePair {
    /// Create a new eye pair
    #[must_use]
    pub const fn new(left: EyeLandmarkSet, right: EyeLandmarkSet) -> Self {
        Self { left, right }
    }

    /// Select both eyes out of a face mesh
    ///
    /// # Errors
    ///
    /// Returns an error if any index falls outside the mesh
    pub fn from_mesh(
        mesh: &[Point2],
        left_indices: &[usize; EYE_LANDMARK_COUNT],
        right_indices: &[usize; EYE_LANDMARK_COUNT],
    ) -> Result<Self> {
        Ok(Self {
            left: EyeLandmarkSet::from_mesh(mesh, left_indices)?,
            right: EyeLandmarkSet::from_mesh(mesh, right_indices)?,
        })
    }

    /// Mean openness of both eyes, `None` if either eye is degenerate
    #[must_use]
    pub fn openness(&self) -> Option<f64> {
        let left = self.left.checked_aspect_ratio()?;
        let right = self.right.checked_aspect_ratio()?;
        Some((left + right) / 2.0)
    }
}

/// Build a symmetric eye of unit width whose aspect ratio equals `ratio`
///
/// Useful for synthetic signals and replay fixtures.
#[must_use]
pub fn synthetic_eye(origin_x: f64, ratio: f64) -> EyeLandmarkSet {
    let half = ratio / 2.0;
    EyeLandmarkSet::new([
        Point2::new(origin_x, 0.0),
        Point2::new(origin_x + 1.0 / 3.0, -half),
        Point2::new(origin_x + 2.0 / 3.0, -half),
        Point2::new(origin_x + 1.0, 0.0),
        Point2::new(origin_x + 2.0 / 3.0, half),
        Point2::new(origin_x + 1.0 / 3.0, half),
    ])
}

/// Build an eye pair where both eyes have aspect ratio `ratio`
#[must_use]
pub fn synthetic_pair(ratio: f64) -> EyePair {
    EyePair::new(synthetic_eye(0.0, ratio), synthetic_eye(2.0, ratio))
}
