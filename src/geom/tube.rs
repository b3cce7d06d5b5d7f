//! End-to-end assembly of sections into one tube.
//!
//! Sections are concatenated front to back in the order given. Each section may
//! use its own facet count and scale, which is how callers trade panel count for
//! fidelity along the tube (level of detail). Placement along the axis is taken
//! as-is: see [`super::inspect_layout`] for gap/overlap reporting.

use serde::{Deserialize, Serialize};

use super::facet::GeomError;
use super::section::{FacetPlacement, SectionSpec, append_section};

/// Ordered sections, nearest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TubeLayout {
    sections: Vec<SectionSpec>,
}

impl TubeLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_sections(sections: Vec<SectionSpec>) -> Self {
        Self { sections }
    }

    #[must_use]
    pub fn with_section(mut self, section: SectionSpec) -> Self {
        self.sections.push(section);
        self
    }

    pub fn push(&mut self, section: SectionSpec) {
        self.sections.push(section);
    }

    #[must_use]
    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Total number of placements the layout assembles into.
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.sections
            .iter()
            .fold(0usize, |acc, section| acc.saturating_add(section.placement_count()))
    }

    /// Axial extent `(start, end)` covered by the sections, `None` when empty.
    #[must_use]
    pub fn extent(&self) -> Option<(f64, f64)> {
        self.sections.iter().fold(None, |acc, section| {
            let start = section.longitudinal_offset;
            let end = section.end_offset();
            Some(match acc {
                None => (start, end),
                Some((lo, hi)) => (f64::min(lo, start), f64::max(hi, end)),
            })
        })
    }
}

impl From<Vec<SectionSpec>> for TubeLayout {
    fn from(sections: Vec<SectionSpec>) -> Self {
        Self::from_sections(sections)
    }
}

impl FromIterator<SectionSpec> for TubeLayout {
    fn from_iter<I: IntoIterator<Item = SectionSpec>>(iter: I) -> Self {
        Self::from_sections(iter.into_iter().collect())
    }
}

/// Concatenates `build_section` over every section, in order.
///
/// The first invalid section aborts the whole call.
pub fn assemble_tube(layout: &TubeLayout) -> Result<Vec<FacetPlacement>, GeomError> {
    let mut placements = Vec::with_capacity(layout.placement_count());
    for section in layout.sections() {
        append_section(section, &mut placements)?;
    }

    log::debug!(
        "assembled tube: {} sections, {} placements",
        layout.len(),
        placements.len()
    );
    Ok(placements)
}

/// Same output as [`assemble_tube`], with sections built on the rayon pool.
#[cfg(feature = "parallel")]
pub fn assemble_tube_parallel(layout: &TubeLayout) -> Result<Vec<FacetPlacement>, GeomError> {
    use rayon::prelude::*;

    let built: Vec<Result<Vec<FacetPlacement>, GeomError>> = layout
        .sections()
        .par_iter()
        .map(super::section::build_section)
        .collect();
    // Fold in section order so the first failing section wins.
    let built = built.into_iter().collect::<Result<Vec<_>, _>>()?;

    let mut placements = Vec::with_capacity(layout.placement_count());
    for section in built {
        placements.extend(section);
    }
    Ok(placements)
}
