// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

/// Tolerance configuration for longitudinal seam comparisons.
///
/// Common presets:
/// - `Tolerance::DEFAULT` - General comparisons (1e-9)
/// - `Tolerance::SEAM` - Accepts the one-unit overlaps used to hide section joins (1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9).
    pub const DEFAULT: Self = Self { eps: 1e-9 };

    /// One layout unit. Adjacent sections that overlap or gap by at most this
    /// much are treated as touching.
    pub const SEAM: Self = Self { eps: 1.0 };

    #[must_use]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    #[must_use]
    pub fn approx_zero_f64(self, a: f64) -> bool {
        a.abs() <= self.eps
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
