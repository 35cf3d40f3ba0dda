// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for outline detection and shape classification

use serde::Serialize;
use std::fmt;

/// An integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<imageproc::point::Point<i32>> for Point {
    fn from(p: imageproc::point::Point<i32>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Axis-aligned bounding box in pixels
///
/// Extents are inclusive: a box spanning columns 10..=19 has width 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Simplified closed polygon around the largest detected boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    points: Vec<Point>,
}

impl Outline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Coarse shape classification
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ShapeType {
    #[serde(rename = "rectangle")]
    Rectangle,
    /// Label only, no multi-rectangle decomposition is attempted
    #[serde(rename = "L-shape (detected)")]
    LShape,
    #[serde(rename = "complex")]
    Complex,
}

impl ShapeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Rectangle => "rectangle",
            ShapeType::LShape => "L-shape (detected)",
            ShapeType::Complex => "complex",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel extent of a section, before unit conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionGeometry {
    Rectangle { width_pixels: u32, height_pixels: u32 },
    Irregular { area_pixels: u64 },
}

/// Named sub-region of the detected shape
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub geometry: SectionGeometry,
    /// Advisory note for the reader of the result
    pub note: Option<String>,
}

/// Shape classification result
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeInfo {
    pub shape_type: ShapeType,
    pub is_simple_rectangle: bool,
    pub bounding_box: BoundingBox,
    /// Enclosed polygon area in square pixels
    pub total_area_pixels: f64,
    /// Polygon area divided by bounding-box area (0 for an empty box)
    pub fill_ratio: f64,
    pub sections: Vec<Section>,
}

/// Configuration for the outline detection pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionConfig {
    /// Gaussian kernel size (odd, binomial weights)
    pub blur_kernel_size: usize,
    /// Canny hysteresis low threshold
    pub canny_low: f32,
    /// Canny hysteresis high threshold
    pub canny_high: f32,
    /// Square structuring element size for dilation (odd)
    pub dilation_kernel_size: u8,
    /// Number of dilation passes
    pub dilation_iterations: u8,
    /// Polygon approximation tolerance as a fraction of the contour perimeter
    pub approx_epsilon_fraction: f64,
}

impl DetectionConfig {
    /// Chebyshev radius equivalent to the repeated square dilation
    pub fn dilation_radius(&self) -> u8 {
        (self.dilation_kernel_size / 2).saturating_mul(self.dilation_iterations)
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: 5,
            canny_low: 50.0,
            canny_high: 150.0,
            dilation_kernel_size: 3,
            dilation_iterations: 2,
            approx_epsilon_fraction: 0.01,
        }
    }
}
