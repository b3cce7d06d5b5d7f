//! Video memory capability reporting.
//!
//! The host decides how to find out about GPU memory (on the web: the
//! non-standard `adapter.info.memoryHeaps` extension). This module only turns
//! whatever the host found into a [`CapabilityReport`]. Not knowing is the
//! common case and is reported as [`CapabilityReport::Unavailable`], never as an
//! error.

use serde::{Deserialize, Serialize};

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// One memory heap as reported by the host, e.g. `{ size: 4294967296, type: "dedicated" }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryHeap {
    /// Heap size in bytes. Missing or unusable sizes count as zero.
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl MemoryHeap {
    #[must_use]
    pub fn new(size: f64, kind: impl Into<String>) -> Self {
        Self {
            size: Some(size),
            kind: Some(kind.into()),
        }
    }

    fn usable_size(&self) -> f64 {
        self.size
            .filter(|size| size.is_finite() && *size > 0.0)
            .unwrap_or(0.0)
    }

    fn is_kind(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }
}

/// Outcome of a capability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CapabilityReport {
    #[serde(rename_all = "camelCase")]
    Available {
        total_mb: u64,
        dedicated_mb: u64,
        shared_mb: u64,
    },
    #[default]
    Unavailable,
}

impl CapabilityReport {
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    #[must_use]
    pub fn total_mb(&self) -> Option<u64> {
        match self {
            Self::Available { total_mb, .. } => Some(*total_mb),
            Self::Unavailable => None,
        }
    }

    /// `true` only when a budget is known and below `threshold_mb`.
    #[must_use]
    pub fn is_low_memory(&self, threshold_mb: u64) -> bool {
        self.total_mb().is_some_and(|total| total < threshold_mb)
    }
}

/// Anything that can answer "how much video memory is there".
pub trait CapabilityProbe {
    fn query(&self) -> CapabilityReport;
}

/// Probe for hosts without any memory reporting.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableProbe;

impl CapabilityProbe for UnavailableProbe {
    fn query(&self) -> CapabilityReport {
        CapabilityReport::Unavailable
    }
}

/// Probe backed by a heap list the host already collected.
#[derive(Debug, Clone, Default)]
pub struct HeapProbe {
    heaps: Option<Vec<MemoryHeap>>,
}

impl HeapProbe {
    #[must_use]
    pub fn new(heaps: Option<Vec<MemoryHeap>>) -> Self {
        Self { heaps }
    }
}

impl CapabilityProbe for HeapProbe {
    fn query(&self) -> CapabilityReport {
        summarize_heaps(self.heaps.as_deref())
    }
}

/// Sums the heaps into megabyte totals.
///
/// `dedicated` and `shared` come from the first heap of that type. A missing
/// heap list means the host could not tell; an empty one reports 0 MB.
#[must_use]
pub fn summarize_heaps(heaps: Option<&[MemoryHeap]>) -> CapabilityReport {
    let Some(heaps) = heaps else {
        log::warn!("memory heaps not available; keeping default quality");
        return CapabilityReport::Unavailable;
    };

    let total: f64 = heaps.iter().map(MemoryHeap::usable_size).sum();
    let first_of = |kind: &str| {
        heaps
            .iter()
            .find(|heap| heap.is_kind(kind))
            .map_or(0.0, MemoryHeap::usable_size)
    };

    let report = CapabilityReport::Available {
        total_mb: bytes_to_mb(total),
        dedicated_mb: bytes_to_mb(first_of("dedicated")),
        shared_mb: bytes_to_mb(first_of("shared")),
    };
    log::debug!("gpu memory: {report:?} from {} heaps", heaps.len());
    report
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bytes_to_mb(bytes: f64) -> u64 {
    (bytes / BYTES_PER_MIB).round() as u64
}
