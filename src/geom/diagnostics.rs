//! Layout diagnostics for assembled tubes.
//!
//! Assembly never checks how sections line up along the axis: gaps and overlaps
//! between consecutive sections are the caller's responsibility. This module
//! reports them (and other suspicious section values) on request, so a caller
//! can pre-flight a layout or log what it is about to render.
//!
//! # Example
//!
//! ```ignore
//! use tube_engine::geom::{inspect_layout_with_tolerance, Tolerance};
//!
//! let diagnostics = inspect_layout_with_tolerance(&layout, Tolerance::SEAM);
//!
//! if !diagnostics.is_contiguous() {
//!     for warning in &diagnostics.warnings {
//!         eprintln!("Warning: {}", warning);
//!     }
//! }
//! ```

use std::fmt;

use super::core::Tolerance;
use super::tube::TubeLayout;

/// Join between two consecutive sections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSeam {
    /// Index of the nearer section.
    pub before: usize,
    /// Index of the farther section (`before + 1`).
    pub after: usize,
    /// `offset[after] - (offset[before] + length[before])`.
    ///
    /// Positive values are gaps, negative values are overlaps.
    pub delta: f64,
}

impl SectionSeam {
    #[must_use]
    pub fn is_gap(&self, tol: Tolerance) -> bool {
        self.delta > 0.0 && !tol.approx_zero_f64(self.delta)
    }

    #[must_use]
    pub fn is_overlap(&self, tol: Tolerance) -> bool {
        self.delta < 0.0 && !tol.approx_zero_f64(self.delta)
    }
}

/// Read-only report about a [`TubeLayout`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LayoutDiagnostics {
    /// Number of sections in the layout.
    pub section_count: usize,

    /// Number of placements `assemble_tube` would emit.
    pub placement_count: usize,

    /// One entry per pair of consecutive sections.
    pub seams: Vec<SectionSeam>,

    /// Seams whose delta exceeds the tolerance.
    pub gap_count: usize,

    /// Seams whose delta is below minus the tolerance.
    pub overlap_count: usize,

    /// Largest gap found, 0 when there is none.
    pub max_gap: f64,

    /// Largest overlap found (as a positive distance), 0 when there is none.
    pub max_overlap: f64,

    /// Sections whose facet definition would make assembly fail.
    pub invalid_section_count: usize,

    /// Human-readable warnings, e.g. "gap of 300 between sections 0 and 1".
    pub warnings: Vec<String>,
}

impl LayoutDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when every seam is within tolerance.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.gap_count == 0 && self.overlap_count == 0
    }

    /// Returns `true` when the layout is contiguous and has no warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.is_contiguous() && self.invalid_section_count == 0 && self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("S:{} P:{}", self.section_count, self.placement_count)];

        if self.gap_count > 0 {
            parts.push(format!("gaps:{} (max {})", self.gap_count, self.max_gap));
        }
        if self.overlap_count > 0 {
            parts.push(format!(
                "overlaps:{} (max {})",
                self.overlap_count, self.max_overlap
            ));
        }
        if self.invalid_section_count > 0 {
            parts.push(format!("invalid:{}", self.invalid_section_count));
        }

        parts.join(" ")
    }
}

impl fmt::Display for LayoutDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())?;
        for warning in &self.warnings {
            write!(f, "\n  - {warning}")?;
        }
        Ok(())
    }
}

/// Inspects a layout with [`Tolerance::DEFAULT`].
#[must_use]
pub fn inspect_layout(layout: &TubeLayout) -> LayoutDiagnostics {
    inspect_layout_with_tolerance(layout, Tolerance::DEFAULT)
}

/// Inspects a layout, treating seams within `tol` as touching.
#[must_use]
pub fn inspect_layout_with_tolerance(layout: &TubeLayout, tol: Tolerance) -> LayoutDiagnostics {
    let sections = layout.sections();
    let mut diag = LayoutDiagnostics {
        section_count: sections.len(),
        placement_count: layout.placement_count(),
        ..LayoutDiagnostics::default()
    };

    for (index, section) in sections.iter().enumerate() {
        if let Err(err) = section.facet.validate() {
            diag.invalid_section_count += 1;
            diag.add_warning(format!("section {index}: {err}"));
        }
        if !section.length.is_finite() || section.length <= 0.0 {
            diag.add_warning(format!(
                "section {index}: length must be finite and > 0, got {}",
                section.length
            ));
        }
        if !section.scale_factor.is_finite() || section.scale_factor <= 0.0 {
            diag.add_warning(format!(
                "section {index}: scale factor must be finite and > 0, got {}",
                section.scale_factor
            ));
        }
        if !section.longitudinal_offset.is_finite() {
            diag.add_warning(format!("section {index}: offset is not finite"));
        }
    }

    for (before, pair) in sections.windows(2).enumerate() {
        let seam = SectionSeam {
            before,
            after: before + 1,
            delta: pair[1].longitudinal_offset - pair[0].end_offset(),
        };

        if seam.is_gap(tol) {
            diag.gap_count += 1;
            diag.max_gap = diag.max_gap.max(seam.delta);
            diag.add_warning(format!(
                "gap of {} between sections {} and {}",
                seam.delta, seam.before, seam.after
            ));
        } else if seam.is_overlap(tol) {
            diag.overlap_count += 1;
            diag.max_overlap = diag.max_overlap.max(-seam.delta);
            diag.add_warning(format!(
                "overlap of {} between sections {} and {}",
                -seam.delta, seam.before, seam.after
            ));
        }

        diag.seams.push(seam);
    }

    diag
}
