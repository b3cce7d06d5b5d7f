#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capability;
pub mod geom;
pub mod lod;
pub mod present;

use std::fmt;
use std::num::NonZeroU32;

use capability::{CapabilityReport, MemoryHeap, summarize_heaps};
use geom::{GeomError, LayoutDiagnostics, Tolerance, TubeLayout, inspect_layout_with_tolerance};
use lod::{LodBase, LodPolicy, LodPreset, single_section_layout};
use present::{PanelStyle, PresentationOptions, render_placements};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("kon rayon threadpool niet initialiseren: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Buislengte wanneer de pagina geen eigen lengte opgeeft.
const DEFAULT_TUBE_LENGTH: f64 = 301.0;

/// Public entry point for consumers.
#[wasm_bindgen]
pub struct TubeEngine {
    initialized: bool,
    policy: LodPolicy,
    options: PresentationOptions,
    capability: CapabilityReport,
    panels: Vec<PanelStyle>,
    last_layout: Option<TubeLayout>,
    last_diagnostics: Option<LayoutDiagnostics>,
}

impl Default for TubeEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl TubeEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TubeEngine {
        TubeEngine {
            initialized: true,
            policy: LodPolicy::default(),
            options: PresentationOptions::default(),
            capability: CapabilityReport::Unavailable,
            panels: Vec::new(),
            last_layout: None,
            last_diagnostics: None,
        }
    }

    /// Geeft terug of de engine de minimale initialisatie heeft doorlopen.
    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Sla de `memoryHeaps` van de GPU-adapter op. `null`/`undefined` of een
    /// onleesbare lijst betekent: geen gegevens.
    #[wasm_bindgen]
    pub fn set_memory_heaps(&mut self, heaps: JsValue) {
        let heaps = if heaps.is_null() || heaps.is_undefined() {
            None
        } else {
            match serde_wasm_bindgen::from_value::<Vec<MemoryHeap>>(heaps) {
                Ok(heaps) => Some(heaps),
                Err(err) => {
                    log::warn!("memoryHeaps niet leesbaar: {err}");
                    None
                }
            }
        };
        self.set_capability(summarize_heaps(heaps.as_deref()));
    }

    /// Vergeet eerder gemelde geheugeninformatie.
    #[wasm_bindgen]
    pub fn clear_capability(&mut self) {
        self.set_capability(CapabilityReport::Unavailable);
    }

    /// Haal de huidige geheugeninschatting op.
    #[wasm_bindgen]
    pub fn get_capability(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.capability)
    }

    /// Bouw een van de vaste LOD-indelingen op en geef de panelen terug.
    #[wasm_bindgen]
    pub fn build_preset(&mut self, name: &str, side_count: u32) -> Result<JsValue, JsValue> {
        let preset = LodPreset::from_name(name)
            .ok_or_else(|| js_error(&format!("onbekende indeling `{name}`")))?;
        self.render_preset(preset, side_count).map_err(to_js_error)?;
        self.get_panels()
    }

    /// Bouw een door de pagina opgegeven lijst van secties op.
    #[wasm_bindgen]
    pub fn build_layout(&mut self, layout: JsValue) -> Result<JsValue, JsValue> {
        let layout: TubeLayout = serde_wasm_bindgen::from_value(layout).map_err(to_js_error)?;
        self.render_layout(layout).map_err(to_js_error)?;
        self.get_panels()
    }

    /// Eén buis met `sides` zijden, elke zijde `segments` keer herhaald.
    #[wasm_bindgen]
    pub fn create_tube(
        &mut self,
        sides: u32,
        segments: u32,
        length: Option<f64>,
    ) -> Result<JsValue, JsValue> {
        let subdivisions =
            NonZeroU32::new(segments).ok_or_else(|| js_error("aantal segmenten moet > 0 zijn"))?;
        self.render_single(sides, subdivisions, length.unwrap_or(DEFAULT_TUBE_LENGTH))
            .map_err(to_js_error)?;
        self.get_panels()
    }

    /// Panelen van de laatste opbouw.
    #[wasm_bindgen]
    pub fn get_panels(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.panels)
    }

    /// De laatst opgebouwde indeling, als lijst van secties.
    #[wasm_bindgen]
    pub fn get_last_layout(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.last_layout)
    }

    #[wasm_bindgen]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Korte samenvatting van naden en waarschuwingen van de laatste indeling.
    #[wasm_bindgen]
    pub fn get_layout_summary(&self) -> String {
        self.last_diagnostics
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

impl TubeEngine {
    pub fn set_capability(&mut self, report: CapabilityReport) {
        self.capability = report;
    }

    #[must_use]
    pub fn capability(&self) -> CapabilityReport {
        self.capability
    }

    /// Basisinstellingen voor een indeling, aangepast aan het gemelde geheugen.
    #[must_use]
    pub fn base_for(&self, side_count: u32) -> LodBase {
        let base = LodBase::default().with_side_count(side_count);
        self.policy.resolve_base(&base, &self.capability)
    }

    pub fn render_preset(&mut self, preset: LodPreset, side_count: u32) -> Result<usize, GeomError> {
        let layout = preset.layout(&self.base_for(side_count));
        self.render_layout(layout)
    }

    pub fn render_single(
        &mut self,
        sides: u32,
        subdivisions: NonZeroU32,
        length: f64,
    ) -> Result<usize, GeomError> {
        let base = LodBase {
            subdivisions,
            ..LodBase::default().with_side_count(sides)
        };
        self.render_layout(single_section_layout(&base, length))
    }

    /// Assembleer `layout` en vervang alle panelen.
    ///
    /// Bij een fout blijven de vorige panelen staan.
    pub fn render_layout(&mut self, layout: TubeLayout) -> Result<usize, GeomError> {
        let placements = assemble(&layout)?;
        let diagnostics = inspect_layout_with_tolerance(&layout, Tolerance::SEAM);
        if !diagnostics.is_contiguous() {
            log::debug!("tube layout is not contiguous: {}", diagnostics.summary());
        }

        let count = render_placements(&mut self.panels, &placements, &self.options);
        debug_log!("buis opgebouwd: {} panelen ({})", count, diagnostics.summary());

        self.last_layout = Some(layout);
        self.last_diagnostics = Some(diagnostics);
        Ok(count)
    }

    #[must_use]
    pub fn panels(&self) -> &[PanelStyle] {
        &self.panels
    }

    #[must_use]
    pub fn last_layout(&self) -> Option<&TubeLayout> {
        self.last_layout.as_ref()
    }

    #[must_use]
    pub fn last_diagnostics(&self) -> Option<&LayoutDiagnostics> {
        self.last_diagnostics.as_ref()
    }
}

/// Breedte van één zijde bij een straal tot de hoekpunten, bv. `"70.710678vmin"`.
#[wasm_bindgen]
pub fn compute_tube_side_width(sides: u32, radius: Option<f64>) -> Result<String, JsValue> {
    present::tube_side_width(sides, radius.unwrap_or(50.0)).map_err(to_js_error)
}

#[cfg(feature = "parallel")]
fn assemble(layout: &TubeLayout) -> Result<Vec<geom::FacetPlacement>, GeomError> {
    geom::assemble_tube_parallel(layout)
}

#[cfg(not(feature = "parallel"))]
fn assemble(layout: &TubeLayout) -> Result<Vec<geom::FacetPlacement>, GeomError> {
    geom::assemble_tube(layout)
}

fn to_js_value<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()).into())
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::TubeEngine;
    use crate::capability::CapabilityReport;
    use crate::lod::LodPreset;

    #[test]
    fn preset_render_fills_panels() {
        let mut engine = TubeEngine::new();
        let count = engine
            .render_preset(LodPreset::Working, 32)
            .expect("working preset is valid");

        assert_eq!(count, 32 + 16 + 8);
        assert_eq!(engine.panel_count(), count);
        assert!(engine.last_diagnostics().is_some_and(|d| d.is_contiguous()));
    }

    #[test]
    fn low_memory_halves_preset_density() {
        let mut engine = TubeEngine::new();
        engine.set_capability(CapabilityReport::Available {
            total_mb: 256,
            dedicated_mb: 0,
            shared_mb: 256,
        });

        let count = engine
            .render_preset(LodPreset::Working, 32)
            .expect("working preset is valid");
        assert_eq!(count, 16 + 8 + 4);
    }

    #[test]
    fn failed_render_keeps_previous_panels() {
        let mut engine = TubeEngine::new();
        engine
            .render_preset(LodPreset::SkippedSection, 12)
            .expect("valid preset");
        let before = engine.panels().to_vec();

        assert!(engine.render_preset(LodPreset::Working, 2).is_err());
        assert_eq!(engine.panels(), before.as_slice());
    }

    #[test]
    fn last_layout_tracks_successful_renders_only() {
        let mut engine = TubeEngine::new();
        engine
            .render_preset(LodPreset::ShortFirstSection, 12)
            .expect("valid preset");
        let layout = engine.last_layout().cloned().expect("layout after render");
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.sections()[0].length, 101.0);

        assert!(engine.render_single(2, std::num::NonZeroU32::MIN, 301.0).is_err());
        assert_eq!(engine.last_layout(), Some(&layout));
    }

    #[test]
    fn gap_layout_summary_mentions_gap() {
        let mut engine = TubeEngine::new();
        engine
            .render_preset(LodPreset::AlternateGap, 16)
            .expect("valid preset");
        assert!(engine.get_layout_summary().contains("gap"));
    }
}
