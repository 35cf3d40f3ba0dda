// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building floor area estimation from PDF floor plans
//!
//! This crate provides a single, synchronous pipeline:
//! 1. Rendering the first PDF page to a raster image (default 300 DPI)
//! 2. Detecting the building outline with classical computer vision
//!    (blur, Canny edges, dilation, external contours)
//! 3. Classifying the outline as rectangle, L-shape or complex
//! 4. Converting pixel measurements to meters from the DPI and drawing scale
//! 5. Assembling a JSON-ready result with a confidence score
//!
//! # Usage
//!
//! ```rust,ignore
//! use floorplan_area::AreaCalculator;
//!
//! let outcome = AreaCalculator::new("plan.pdf", "1:100", false).calculate();
//! println!("{}", outcome.to_json_pretty()?);
//! std::process::exit(outcome.exit_code() as i32);
//! ```

pub mod calculator;
pub mod classifier;
pub mod config;
pub mod error;
pub mod image_ops;
pub mod outline;
pub mod polygon;
pub mod rasterizer;
pub mod report;
pub mod scale;
pub mod types;
pub mod units;

// Re-export commonly used types and functions
pub use calculator::AreaCalculator;
pub use classifier::classify_shape;
pub use config::{CalculatorConfig, RasterizerKind};
pub use error::{AreaError, ConversionError, ScaleError};
pub use outline::detect_building_outline;
#[cfg(feature = "pdfium")]
pub use rasterizer::PdfiumRasterizer;
pub use rasterizer::{PdftoppmRasterizer, Rasterizer};
pub use report::{AreaReport, CalculationOutcome, FailureReport, MeasuredExtent, MeasuredSection};
pub use scale::Scale;
pub use types::{
    BoundingBox, DetectionConfig, Outline, Point, Section, SectionGeometry, ShapeInfo, ShapeType,
};
pub use units::UnitConverter;

use std::path::Path;

/// Calculate the floor area of a PDF using configuration from the environment
///
/// # Arguments
///
/// * `pdf_path` - Floor plan PDF; only the first page is used
/// * `scale` - Drawing scale such as `"1:100"`
/// * `debug` - Also write the outline overlay image
pub fn calculate_area(pdf_path: &Path, scale: &str, debug: bool) -> CalculationOutcome {
    AreaCalculator::with_config(pdf_path, scale, debug, CalculatorConfig::from_env()).calculate()
}
