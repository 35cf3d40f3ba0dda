// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Result assembly: metric sections, totals, confidence and the JSON shapes
//! printed by the CLI.

use crate::error::AreaError;
use crate::scale::Scale;
use crate::types::{Outline, Section, SectionGeometry, ShapeInfo, ShapeType};
use crate::units::{round2, UnitConverter};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use serde::{Serialize, Serializer};
use std::path::Path;

pub const METHOD: &str = "computer_vision";
pub const RECTANGLE_CONFIDENCE: f64 = 0.85;
pub const IRREGULAR_CONFIDENCE: f64 = 0.65;

/// Outline colour and stroke width of the debug overlay
pub const OVERLAY_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const OVERLAY_THICKNESS: i32 = 3;

fn rounded<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round2(*value))
}

/// Section with its measurements converted to meters.
///
/// Values are kept unrounded and rounded when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasuredSection {
    pub name: String,
    #[serde(flatten)]
    pub extent: MeasuredExtent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(serialize_with = "rounded")]
    pub area_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MeasuredExtent {
    Rectangle {
        width_pixels: u32,
        height_pixels: u32,
        #[serde(serialize_with = "rounded")]
        width_m: f64,
        #[serde(serialize_with = "rounded")]
        height_m: f64,
    },
    Irregular {
        area_pixels: u64,
    },
}

impl MeasuredSection {
    pub fn measure(section: &Section, converter: &UnitConverter) -> Self {
        let (extent, area_m2) = match section.geometry {
            SectionGeometry::Rectangle {
                width_pixels,
                height_pixels,
            } => {
                let width_m = converter.pixels_to_meters(width_pixels as f64);
                let height_m = converter.pixels_to_meters(height_pixels as f64);
                (
                    MeasuredExtent::Rectangle {
                        width_pixels,
                        height_pixels,
                        width_m,
                        height_m,
                    },
                    width_m * height_m,
                )
            }
            SectionGeometry::Irregular { area_pixels } => (
                MeasuredExtent::Irregular { area_pixels },
                converter.square_pixels_to_square_meters(area_pixels as f64),
            ),
        };

        Self {
            name: section.name.clone(),
            extent,
            note: section.note.clone(),
            area_m2,
        }
    }
}

/// Successful calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaReport {
    success: bool,
    pub shape_type: ShapeType,
    pub is_simple_rectangle: bool,
    pub sections: Vec<MeasuredSection>,
    #[serde(serialize_with = "rounded")]
    pub total_area_m2: f64,
    pub scale_used: String,
    pub method: &'static str,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_image: Option<String>,
}

impl AreaReport {
    /// Convert a classified shape into metric sections and a total.
    ///
    /// The total is the unrounded sum of the section areas; rounding happens
    /// once, on output.
    pub fn assemble(shape: &ShapeInfo, converter: &UnitConverter, scale: &Scale) -> Self {
        let sections: Vec<MeasuredSection> = shape
            .sections
            .iter()
            .map(|s| MeasuredSection::measure(s, converter))
            .collect();
        let total_area_m2 = sections.iter().map(|s| s.area_m2).sum();

        Self {
            success: true,
            shape_type: shape.shape_type,
            is_simple_rectangle: shape.is_simple_rectangle,
            sections,
            total_area_m2,
            scale_used: scale.to_string(),
            method: METHOD,
            confidence: if shape.is_simple_rectangle {
                RECTANGLE_CONFIDENCE
            } else {
                IRREGULAR_CONFIDENCE
            },
            debug_image: None,
        }
    }
}

/// Failed calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    success: bool,
    pub error: String,
    pub message: String,
}

impl FailureReport {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
        }
    }
}

impl From<&AreaError> for FailureReport {
    fn from(err: &AreaError) -> Self {
        Self::new(err.to_string(), err.user_message())
    }
}

/// The document printed for one invocation: either a report or a failure,
/// never a mix of both
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationOutcome {
    Success(AreaReport),
    Failure(FailureReport),
}

impl CalculationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CalculationOutcome::Success(_))
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<Result<AreaReport, AreaError>> for CalculationOutcome {
    fn from(result: Result<AreaReport, AreaError>) -> Self {
        match result {
            Ok(report) => CalculationOutcome::Success(report),
            Err(err) => CalculationOutcome::Failure(FailureReport::from(&err)),
        }
    }
}

/// Copy of the raster with the outline stroked on top
pub fn draw_outline_overlay(image: &RgbImage, outline: &Outline) -> RgbImage {
    let mut canvas = image.clone();
    let points = outline.points();
    if points.is_empty() {
        return canvas;
    }

    let half = OVERLAY_THICKNESS / 2;
    for (i, start) in points.iter().enumerate() {
        let end = &points[(i + 1) % points.len()];
        for oy in -half..=half {
            for ox in -half..=half {
                draw_line_segment_mut(
                    &mut canvas,
                    ((start.x + ox) as f32, (start.y + oy) as f32),
                    ((end.x + ox) as f32, (end.y + oy) as f32),
                    OVERLAY_COLOR,
                );
            }
        }
    }

    canvas
}

/// Draw the outline overlay and save it as PNG
pub fn write_debug_image(
    image: &RgbImage,
    outline: &Outline,
    path: &Path,
) -> Result<(), AreaError> {
    let overlay = draw_outline_overlay(image, outline);
    overlay.save_with_format(path, image::ImageFormat::Png)?;
    tracing::debug!(path = %path.display(), "Wrote debug overlay");
    Ok(())
}
