//! Facet dimensions for an N-sided polygonal tube.
//!
//! A tube is approximated by `side_count` flat panels arranged as a regular
//! polygon around the longitudinal axis. The distance from the axis can be
//! given either to a vertex (`Radius`, circumradius) or to the middle of a
//! panel (`Apothem`, inradius); both yield the same panel count but different
//! panel widths.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Smallest cross-section that still encloses the axis.
pub const MIN_SIDE_COUNT: u32 = 3;

/// Which distance `distance_from_axis` measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistanceMode {
    /// Axis to a vertex (circumradius).
    Radius,
    /// Axis to the midpoint of a facet (inradius).
    Apothem,
}

/// What exactly is wrong with a facet definition.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryFault {
    #[error("tube requires at least 3 sides, got {0}")]
    TooFewSides(u32),
    #[error("distance from axis must be finite and > 0, got {0}")]
    InvalidDistance(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeomError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryFault),
}

/// Cross-section definition shared by every facet of a section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSpec {
    pub side_count: u32,
    pub distance_from_axis: f64,
    pub distance_mode: DistanceMode,
}

impl FacetSpec {
    #[must_use]
    pub const fn new(side_count: u32, distance_from_axis: f64, distance_mode: DistanceMode) -> Self {
        Self {
            side_count,
            distance_from_axis,
            distance_mode,
        }
    }

    #[must_use]
    pub const fn radius(side_count: u32, radius: f64) -> Self {
        Self::new(side_count, radius, DistanceMode::Radius)
    }

    #[must_use]
    pub const fn apothem(side_count: u32, apothem: f64) -> Self {
        Self::new(side_count, apothem, DistanceMode::Apothem)
    }

    pub fn validate(&self) -> Result<(), GeomError> {
        validate_facet(self.side_count, self.distance_from_axis)
    }

    /// Width of one facet, see [`compute_facet_width`].
    pub fn facet_width(&self) -> Result<f64, GeomError> {
        compute_facet_width(self.side_count, self.distance_from_axis, self.distance_mode)
    }
}

fn validate_facet(side_count: u32, distance_from_axis: f64) -> Result<(), GeomError> {
    if side_count < MIN_SIDE_COUNT {
        return Err(GeometryFault::TooFewSides(side_count).into());
    }
    if !distance_from_axis.is_finite() || distance_from_axis <= 0.0 {
        return Err(GeometryFault::InvalidDistance(distance_from_axis).into());
    }
    Ok(())
}

/// Computes the width of one facet of a regular `side_count`-gon.
///
/// - `Radius`: chord of the circumscribed circle, `2·r·sin(π/N)`.
/// - `Apothem`: side length from the inradius, `2·a·tan(π/N)`.
///
/// The result is unrounded; rounding belongs to the presentation layer.
pub fn compute_facet_width(
    side_count: u32,
    distance_from_axis: f64,
    distance_mode: DistanceMode,
) -> Result<f64, GeomError> {
    validate_facet(side_count, distance_from_axis)?;

    let half_angle = PI / f64::from(side_count);
    let width = match distance_mode {
        DistanceMode::Radius => 2.0 * distance_from_axis * half_angle.sin(),
        DistanceMode::Apothem => 2.0 * distance_from_axis * half_angle.tan(),
    };
    Ok(width)
}

/// Rotation of facet `index` around the axis, in degrees.
///
/// For `index < side_count` the values are evenly spaced by `360 / side_count`
/// and lie in `[0, 360)`.
#[must_use]
pub fn facet_rotation(index: u32, side_count: u32) -> f64 {
    debug_assert!(side_count > 0, "facet_rotation needs a non-zero side count");
    f64::from(index) * 360.0 / f64::from(side_count)
}

/// All `side_count` rotations in index order.
pub fn facet_rotations(side_count: u32) -> impl Iterator<Item = f64> {
    (0..side_count).map(move |index| facet_rotation(index, side_count))
}
