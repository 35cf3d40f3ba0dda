// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rendering the first page of a PDF to an RGB raster

use crate::error::ConversionError;
use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Renders page 1 of a PDF at a given resolution
pub trait Rasterizer {
    fn rasterize_first_page(&self, pdf_path: &Path, dpi: u32) -> Result<RgbImage, ConversionError>;
}

/// Rasterizer backed by poppler's `pdftoppm`
///
/// The page is written as PNG to the tool's stdout and decoded in memory, so
/// no temporary files are involved.
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    binary: PathBuf,
}

impl PdftoppmRasterizer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new("pdftoppm")
    }
}

impl Rasterizer for PdftoppmRasterizer {
    fn rasterize_first_page(&self, pdf_path: &Path, dpi: u32) -> Result<RgbImage, ConversionError> {
        if !pdf_path.is_file() {
            return Err(ConversionError::NotFound(pdf_path.to_path_buf()));
        }

        let tool = self.binary.display().to_string();
        tracing::debug!(tool = %tool, pdf = %pdf_path.display(), dpi, "Rendering first page");

        let output = Command::new(&self.binary)
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-f")
            .arg("1")
            .arg("-l")
            .arg("1")
            .arg(pdf_path)
            .output()
            .map_err(|source| ConversionError::Spawn {
                tool: tool.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ConversionError::ToolFailed {
                tool,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if output.stdout.is_empty() {
            return Err(ConversionError::EmptyOutput);
        }

        let page = image::load_from_memory_with_format(&output.stdout, ImageFormat::Png)?;
        Ok(page.to_rgb8())
    }
}

/// Rasterizer backed by a pdfium shared library
#[cfg(feature = "pdfium")]
#[derive(Debug, Clone, Default)]
pub struct PdfiumRasterizer;

#[cfg(feature = "pdfium")]
impl Rasterizer for PdfiumRasterizer {
    fn rasterize_first_page(&self, pdf_path: &Path, dpi: u32) -> Result<RgbImage, ConversionError> {
        use pdfium_render::prelude::*;

        if !pdf_path.is_file() {
            return Err(ConversionError::NotFound(pdf_path.to_path_buf()));
        }

        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| ConversionError::Pdfium(format!("Failed to bind pdfium library: {}", e)))?;
        let pdfium = Pdfium::new(bindings);

        let document = pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|e| ConversionError::Pdfium(e.to_string()))?;
        let page = document
            .pages()
            .first()
            .map_err(|_| ConversionError::NoPages)?;

        // PDF user space is 72 units per inch
        let config = PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / 72.0);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| ConversionError::Pdfium(e.to_string()))?;

        Ok(bitmap.as_image().to_rgb8())
    }
}
