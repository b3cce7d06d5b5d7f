//! Presentation boundary: placements to styled panels.
//!
//! Placements keep full precision; numbers are rounded here, when they become
//! the CSS strings the page applies to each panel (`--rotation`, `--width`,
//! `data-segment`, ...). The page owns the surface and rebuilds it completely
//! on every render.

use serde::Serialize;

use crate::geom::{DistanceMode, FacetPlacement, GeomError, compute_facet_width};

/// Formatting of the emitted panel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationOptions {
    pub decimals: usize,
    pub width_unit: String,
    pub length_unit: String,
    pub class_name: String,
}

impl Default for PresentationOptions {
    fn default() -> Self {
        Self {
            decimals: 6,
            width_unit: "vmin".to_string(),
            length_unit: "px".to_string(),
            class_name: "tube-side".to_string(),
        }
    }
}

/// `value` with exactly `decimals` fractional digits followed by `unit`.
#[must_use]
pub fn format_length(value: f64, unit: &str, decimals: usize) -> String {
    format!("{value:.decimals$}{unit}")
}

/// Width of one side of a `side_count`-sided tube whose vertices lie `radius`
/// away from the axis, as a CSS length in `vmin`.
pub fn tube_side_width(side_count: u32, radius: f64) -> Result<String, GeomError> {
    let options = PresentationOptions::default();
    let width = compute_facet_width(side_count, radius, DistanceMode::Radius)?;
    Ok(format_length(width, &options.width_unit, options.decimals))
}

/// Everything the page needs to create one panel element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelStyle {
    pub class_name: String,
    pub rotation: String,
    pub n: String,
    pub segment: String,
    pub width: String,
    pub height: String,
    pub offset: String,
    pub scale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl PanelStyle {
    #[must_use]
    pub fn from_placement(placement: &FacetPlacement, options: &PresentationOptions) -> Self {
        let decimals = options.decimals;
        Self {
            class_name: options.class_name.clone(),
            rotation: format!("{}deg", placement.rotation_degrees),
            n: placement.index.to_string(),
            segment: placement.segment.to_string(),
            width: format_length(placement.width, &options.width_unit, decimals),
            height: format_length(placement.height, &options.length_unit, decimals),
            offset: format_length(placement.longitudinal_offset, &options.length_unit, decimals),
            scale: placement.scale_factor.to_string(),
            text: placement.label.clone(),
        }
    }
}

/// A place panels are drawn into.
pub trait RenderSurface {
    /// Removes everything drawn so far.
    fn clear(&mut self);
    fn append(&mut self, panel: PanelStyle);
}

impl RenderSurface for Vec<PanelStyle> {
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn append(&mut self, panel: PanelStyle) {
        self.push(panel);
    }
}

/// Replaces the surface contents with one panel per placement, in order.
///
/// Returns the number of panels written.
pub fn render_placements<S: RenderSurface + ?Sized>(
    surface: &mut S,
    placements: &[FacetPlacement],
    options: &PresentationOptions,
) -> usize {
    surface.clear();
    for placement in placements {
        surface.append(PanelStyle::from_placement(placement, options));
    }
    placements.len()
}
