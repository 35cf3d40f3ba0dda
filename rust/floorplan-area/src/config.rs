// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Calculator configuration loaded from environment variables.

use crate::rasterizer::{PdftoppmRasterizer, Rasterizer};
use crate::types::DetectionConfig;
use crate::units::DEFAULT_DPI;
use std::path::PathBuf;

pub const DEFAULT_DEBUG_IMAGE: &str = "debug_outline.png";

/// Which PDF renderer to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterizerKind {
    Pdftoppm,
    /// Needs the `pdfium` cargo feature; falls back to pdftoppm without it.
    Pdfium,
}

impl RasterizerKind {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pdftoppm" | "poppler" => Some(RasterizerKind::Pdftoppm),
            "pdfium" => Some(RasterizerKind::Pdfium),
            _ => None,
        }
    }
}

/// Calculator configuration.
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    /// Resolution the PDF page is rendered at.
    pub dpi: u32,
    /// Path or name of the poppler `pdftoppm` binary.
    pub pdftoppm_path: PathBuf,
    /// Where the debug overlay is written.
    pub debug_image_path: PathBuf,
    /// PDF renderer.
    pub rasterizer: RasterizerKind,
    /// Outline detection parameters.
    pub detection: DetectionConfig,
}

impl CalculatorConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dpi: std::env::var("FLOORPLAN_AREA_DPI")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .filter(|&dpi: &u32| dpi > 0)
                .unwrap_or(defaults.dpi),
            pdftoppm_path: std::env::var("FLOORPLAN_AREA_PDFTOPPM")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.pdftoppm_path),
            debug_image_path: std::env::var("FLOORPLAN_AREA_DEBUG_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.debug_image_path),
            rasterizer: std::env::var("FLOORPLAN_AREA_RASTERIZER")
                .ok()
                .and_then(|v| RasterizerKind::from_name(&v))
                .unwrap_or(defaults.rasterizer),
            detection: defaults.detection,
        }
    }

    /// Build the configured rasterizer.
    pub fn build_rasterizer(&self) -> Box<dyn Rasterizer> {
        match self.rasterizer {
            RasterizerKind::Pdftoppm => Box::new(PdftoppmRasterizer::new(&self.pdftoppm_path)),
            #[cfg(feature = "pdfium")]
            RasterizerKind::Pdfium => Box::new(crate::rasterizer::PdfiumRasterizer),
            #[cfg(not(feature = "pdfium"))]
            RasterizerKind::Pdfium => {
                tracing::warn!("Built without the pdfium feature, using pdftoppm instead");
                Box::new(PdftoppmRasterizer::new(&self.pdftoppm_path))
            }
        }
    }
}

/// Hard-coded defaults; use [`CalculatorConfig::from_env`] to read overrides.
impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            pdftoppm_path: PathBuf::from("pdftoppm"),
            debug_image_path: PathBuf::from(DEFAULT_DEBUG_IMAGE),
            rasterizer: RasterizerKind::Pdftoppm,
            detection: DetectionConfig::default(),
        }
    }
}
