//! One longitudinal slice of the tube.
//!
//! A section is a ring of identical facets with a single facet count and scale,
//! optionally repeated `subdivisions` times along the axis with the same
//! angular layout.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::facet::{FacetSpec, GeomError, facet_rotation};

const ONE: NonZeroU32 = NonZeroU32::MIN;

fn default_scale_factor() -> f64 {
    1.0
}

fn default_subdivisions() -> NonZeroU32 {
    ONE
}

/// Caller-supplied definition of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSpec {
    pub facet: FacetSpec,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    pub length: f64,
    #[serde(default)]
    pub longitudinal_offset: f64,
    #[serde(default)]
    pub show_labels: bool,
    #[serde(default = "default_subdivisions")]
    pub subdivisions: NonZeroU32,
}

impl SectionSpec {
    /// Unscaled, unlabeled, undivided section starting at offset 0.
    #[must_use]
    pub fn new(facet: FacetSpec, length: f64) -> Self {
        Self {
            facet,
            scale_factor: 1.0,
            length,
            longitudinal_offset: 0.0,
            show_labels: false,
            subdivisions: ONE,
        }
    }

    #[must_use]
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, longitudinal_offset: f64) -> Self {
        self.longitudinal_offset = longitudinal_offset;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    #[must_use]
    pub fn with_subdivisions(mut self, subdivisions: NonZeroU32) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    /// Where the next section is expected to start.
    #[must_use]
    pub fn end_offset(&self) -> f64 {
        self.longitudinal_offset + self.length
    }

    /// Number of records `build_section` emits for this spec.
    #[must_use]
    pub fn placement_count(&self) -> usize {
        (self.facet.side_count as usize).saturating_mul(self.subdivisions.get() as usize)
    }
}

/// Placement of one rectangular panel. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetPlacement {
    /// Angular index in `[0, side_count)`.
    pub index: u32,
    /// Sub-segment in `[0, subdivisions)`.
    pub segment: u32,
    pub rotation_degrees: f64,
    pub width: f64,
    pub height: f64,
    pub longitudinal_offset: f64,
    pub scale_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FacetPlacement {
    #[must_use]
    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }
}

/// Builds the placements of one section.
///
/// Output holds `side_count × subdivisions` records ordered by angular index,
/// then by sub-segment. Only the first sub-segment of each facet carries a
/// label, and only when `show_labels` is set.
pub fn build_section(spec: &SectionSpec) -> Result<Vec<FacetPlacement>, GeomError> {
    let mut placements = Vec::with_capacity(spec.placement_count());
    append_section(spec, &mut placements)?;
    Ok(placements)
}

pub(crate) fn append_section(
    spec: &SectionSpec,
    placements: &mut Vec<FacetPlacement>,
) -> Result<(), GeomError> {
    let side_count = spec.facet.side_count;
    let width = spec.facet.facet_width()?;

    for index in 0..side_count {
        let rotation_degrees = facet_rotation(index, side_count);
        for segment in 0..spec.subdivisions.get() {
            let label = (segment == 0 && spec.show_labels).then(|| (index + 1).to_string());
            placements.push(FacetPlacement {
                index,
                segment,
                rotation_degrees,
                width,
                height: spec.length,
                longitudinal_offset: spec.longitudinal_offset,
                scale_factor: spec.scale_factor,
                label,
            });
        }
    }

    Ok(())
}
