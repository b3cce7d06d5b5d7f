//! Level-of-detail layouts.
//!
//! The geometry core assembles whatever [`TubeLayout`] it is given. Choosing
//! one is the caller's job; this module holds the named layouts the renderer
//! experimented with and a small policy that lowers facet density when the host
//! reports little video memory.

use std::num::NonZeroU32;

use crate::capability::CapabilityReport;
use crate::geom::{DistanceMode, FacetSpec, MIN_SIDE_COUNT, SectionSpec, TubeLayout};

/// Cross-section and tessellation shared by every section of a preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodBase {
    /// Facet count of the nearest section.
    pub side_count: u32,
    pub distance_from_axis: f64,
    pub distance_mode: DistanceMode,
    pub subdivisions: NonZeroU32,
}

impl Default for LodBase {
    fn default() -> Self {
        Self {
            side_count: 32,
            distance_from_axis: 50.0,
            distance_mode: DistanceMode::Apothem,
            subdivisions: NonZeroU32::MIN,
        }
    }
}

impl LodBase {
    #[must_use]
    pub fn with_side_count(mut self, side_count: u32) -> Self {
        self.side_count = side_count;
        self
    }

    /// Facet count for a section drawn with `1 / divisor` of the base density.
    ///
    /// Never drops below [`MIN_SIDE_COUNT`], but leaves an already invalid
    /// base count alone so assembly can report it.
    #[must_use]
    pub fn reduced_side_count(&self, divisor: u32) -> u32 {
        if self.side_count < MIN_SIDE_COUNT {
            return self.side_count;
        }
        (self.side_count / divisor.max(1)).max(MIN_SIDE_COUNT)
    }

    fn facet(&self, divisor: u32) -> FacetSpec {
        FacetSpec::new(
            self.reduced_side_count(divisor),
            self.distance_from_axis,
            self.distance_mode,
        )
    }
}

/// `(scale, length, offset, labels, side divisor)`
type SectionRow = (f64, f64, f64, bool, u32);

const NEAR: SectionRow = (1.0, 301.0, 0.0, true, 1);
const SHORT_NEAR: SectionRow = (1.0, 101.0, 200.0, true, 1);
const MIDDLE: SectionRow = (5.0, 1501.0, 300.0, false, 2);
const MIDDLE_LATE: SectionRow = (5.0, 1501.0, 600.0, false, 2);
const FAR: SectionRow = (25.0, 6001.0, 1800.0, false, 4);

/// Named section arrangements, nearest section first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LodPreset {
    /// Three sections at 1x, 5x and 25x scale, each overlapping the next by one unit.
    Working,
    /// Like `Working`, with a short near section starting at 200.
    ShortFirstSection,
    /// `Working` without its near section.
    SkippedSection,
    /// Middle section pushed back to 600, leaving a gap behind the near one.
    AlternateGap,
}

impl LodPreset {
    pub const ALL: &'static [LodPreset] = &[
        LodPreset::Working,
        LodPreset::ShortFirstSection,
        LodPreset::SkippedSection,
        LodPreset::AlternateGap,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LodPreset::Working => "working",
            LodPreset::ShortFirstSection => "short_first_section",
            LodPreset::SkippedSection => "skipped_section",
            LodPreset::AlternateGap => "alternate_gap",
        }
    }

    /// Accepts the snake-case name, ignoring case, `-` and surrounding spaces.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.name() == normalized)
    }

    fn rows(self) -> &'static [SectionRow] {
        match self {
            LodPreset::Working => &[NEAR, MIDDLE, FAR],
            LodPreset::ShortFirstSection => &[SHORT_NEAR, MIDDLE, FAR],
            LodPreset::SkippedSection => &[MIDDLE, FAR],
            LodPreset::AlternateGap => &[NEAR, MIDDLE_LATE, FAR],
        }
    }

    #[must_use]
    pub fn layout(self, base: &LodBase) -> TubeLayout {
        self.rows()
            .iter()
            .map(|&(scale, length, offset, labels, divisor)| {
                SectionSpec::new(base.facet(divisor), length)
                    .with_scale_factor(scale)
                    .with_offset(offset)
                    .with_labels(labels)
                    .with_subdivisions(base.subdivisions)
            })
            .collect()
    }
}

/// One labeled section of `base.side_count` facets, as a single plain tube.
#[must_use]
pub fn single_section_layout(base: &LodBase, length: f64) -> TubeLayout {
    TubeLayout::new().with_section(
        SectionSpec::new(base.facet(1), length)
            .with_labels(true)
            .with_subdivisions(base.subdivisions),
    )
}

/// Adjusts facet density to the reported memory budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LodPolicy {
    /// Budgets below this many megabytes count as low memory.
    pub low_memory_threshold_mb: u64,
    /// Side count divisor applied on low memory.
    pub low_memory_divisor: u32,
}

impl Default for LodPolicy {
    fn default() -> Self {
        Self {
            low_memory_threshold_mb: 1024,
            low_memory_divisor: 2,
        }
    }
}

impl LodPolicy {
    /// Returns `base`, with fewer sides if `report` shows a low budget.
    ///
    /// An unavailable report keeps `base` as-is.
    #[must_use]
    pub fn resolve_base(&self, base: &LodBase, report: &CapabilityReport) -> LodBase {
        if !report.is_low_memory(self.low_memory_threshold_mb) {
            return *base;
        }

        let side_count = base.reduced_side_count(self.low_memory_divisor);
        log::debug!(
            "low gpu memory ({:?} MB); reducing tube sides {} -> {}",
            report.total_mb(),
            base.side_count,
            side_count
        );
        base.with_side_count(side_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Tolerance, assemble_tube, inspect_layout_with_tolerance};

    #[test]
    fn preset_names_round_trip() {
        for preset in LodPreset::ALL {
            assert_eq!(LodPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(
            LodPreset::from_name(" Short-First-Section "),
            Some(LodPreset::ShortFirstSection)
        );
        assert_eq!(LodPreset::from_name("adaptive"), None);
    }

    #[test]
    fn working_preset_reduces_far_sections() {
        let layout = LodPreset::Working.layout(&LodBase::default());
        let sides: Vec<u32> = layout.sections().iter().map(|s| s.facet.side_count).collect();
        assert_eq!(sides, vec![32, 16, 8]);

        let scales: Vec<f64> = layout.sections().iter().map(|s| s.scale_factor).collect();
        assert_eq!(scales, vec![1.0, 5.0, 25.0]);
        assert!(layout.sections()[0].show_labels);
        assert!(!layout.sections()[1].show_labels);
    }

    #[test]
    fn working_and_short_first_are_seam_contiguous() {
        for preset in [LodPreset::Working, LodPreset::ShortFirstSection, LodPreset::SkippedSection] {
            let layout = preset.layout(&LodBase::default());
            let diag = inspect_layout_with_tolerance(&layout, Tolerance::SEAM);
            assert!(diag.is_contiguous(), "{}: {diag}", preset.name());
        }
    }

    #[test]
    fn alternate_gap_is_not_contiguous() {
        let layout = LodPreset::AlternateGap.layout(&LodBase::default());
        let diag = inspect_layout_with_tolerance(&layout, Tolerance::SEAM);
        assert_eq!(diag.gap_count, 1);
        assert_eq!(diag.overlap_count, 1);
    }

    #[test]
    fn reduced_side_count_never_below_triangle() {
        let base = LodBase::default().with_side_count(6);
        assert_eq!(base.reduced_side_count(4), 3);
        assert_eq!(base.reduced_side_count(0), 6);
        assert_eq!(LodBase::default().with_side_count(2).reduced_side_count(2), 2);
    }

    #[test]
    fn skipped_section_assembles() {
        let placements =
            assemble_tube(&LodPreset::SkippedSection.layout(&LodBase::default())).expect("valid");
        assert_eq!(placements.len(), 16 + 8);
    }

    #[test]
    fn policy_reduces_sides_on_low_memory_only() {
        let policy = LodPolicy::default();
        let base = LodBase::default();

        let low = CapabilityReport::Available {
            total_mb: 512,
            dedicated_mb: 0,
            shared_mb: 512,
        };
        let high = CapabilityReport::Available {
            total_mb: 8192,
            dedicated_mb: 4096,
            shared_mb: 4096,
        };

        assert_eq!(policy.resolve_base(&base, &low).side_count, 16);
        assert_eq!(policy.resolve_base(&base, &high), base);
        assert_eq!(policy.resolve_base(&base, &CapabilityReport::Unavailable), base);
    }

    #[test]
    fn single_section_matches_create_tube() {
        let base = LodBase {
            side_count: 12,
            subdivisions: NonZeroU32::new(3).expect("non-zero"),
            ..LodBase::default()
        };
        let placements = assemble_tube(&single_section_layout(&base, 301.0)).expect("valid");
        assert_eq!(placements.len(), 36);
        assert_eq!(placements.iter().filter(|p| p.label.is_some()).count(), 12);
    }
}
