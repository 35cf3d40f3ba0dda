// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end area calculation for a single PDF

use crate::classifier::classify_shape;
use crate::config::CalculatorConfig;
use crate::error::AreaError;
use crate::outline::detect_building_outline;
use crate::rasterizer::Rasterizer;
use crate::report::{write_debug_image, AreaReport, CalculationOutcome};
use crate::scale::Scale;
use crate::units::UnitConverter;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// Calculates the floor area of one PDF floor plan.
///
/// Construct a fresh calculator per invocation; it holds only the input path,
/// the parsed scale, the debug flag and configuration.
pub struct AreaCalculator {
    pdf_path: PathBuf,
    scale: Scale,
    debug: bool,
    config: CalculatorConfig,
    rasterizer: Box<dyn Rasterizer>,
}

impl AreaCalculator {
    /// Create a calculator with default configuration.
    ///
    /// `scale` is parsed leniently; anything malformed means 1:100.
    pub fn new(pdf_path: impl Into<PathBuf>, scale: &str, debug: bool) -> Self {
        Self::with_config(pdf_path, scale, debug, CalculatorConfig::default())
    }

    pub fn with_config(
        pdf_path: impl Into<PathBuf>,
        scale: &str,
        debug: bool,
        config: CalculatorConfig,
    ) -> Self {
        let rasterizer = config.build_rasterizer();
        Self {
            pdf_path: pdf_path.into(),
            scale: Scale::parse_or_default(scale),
            debug,
            config,
            rasterizer,
        }
    }

    /// Replace the PDF renderer.
    pub fn with_rasterizer(mut self, rasterizer: impl Rasterizer + 'static) -> Self {
        self.rasterizer = Box::new(rasterizer);
        self
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn pdf_path(&self) -> &Path {
        &self.pdf_path
    }

    /// Run the whole pipeline.
    ///
    /// Never fails: every error, including a panic inside the pipeline,
    /// becomes a failure outcome.
    pub fn calculate(&self) -> CalculationOutcome {
        let result = catch_unwind(AssertUnwindSafe(|| self.run()))
            .unwrap_or_else(|panic| Err(AreaError::Internal(panic_message(panic.as_ref()))));

        if let Err(err) = &result {
            tracing::warn!(pdf = %self.pdf_path.display(), error = %err, "Area calculation failed");
        }

        result.into()
    }

    fn run(&self) -> Result<AreaReport, AreaError> {
        let dpi = self.config.dpi;
        let image = self.rasterizer.rasterize_first_page(&self.pdf_path, dpi)?;

        tracing::debug!(
            width = image.width(),
            height = image.height(),
            dpi,
            "Rendered first page"
        );

        let outline = detect_building_outline(&image, &self.config.detection)
            .ok_or(AreaError::DetectionFailure)?;

        let shape = classify_shape(&outline);
        let converter = UnitConverter::new(dpi, self.scale);
        let mut report = AreaReport::assemble(&shape, &converter, &self.scale);

        if self.debug {
            let path = &self.config.debug_image_path;
            write_debug_image(&image, &outline, path)?;
            report.debug_image = Some(path.display().to_string());
        }

        tracing::info!(
            shape = %report.shape_type,
            total_area_m2 = report.total_area_m2,
            scale = %report.scale_used,
            "Calculated floor area"
        );

        Ok(report)
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected panic".to_string()
    }
}
