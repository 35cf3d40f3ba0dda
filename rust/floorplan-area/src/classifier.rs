// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heuristic shape classification based on bounding-box fill ratio
//!
//! The outline is bucketed on a single scalar, the ratio between its enclosed
//! area and the area of its bounding box:
//!
//! | fill ratio        | shape                 |
//! |-------------------|-----------------------|
//! | > 0.95            | `rectangle`           |
//! | (0.50, 0.75]      | `L-shape (detected)`  |
//! | anything else     | `complex`             |
//!
//! Outlines in (0.75, 0.95] are reported as `complex` as well.

use crate::polygon::{bounding_rect, polygon_area};
use crate::types::{Outline, Section, SectionGeometry, ShapeInfo, ShapeType};

pub const RECTANGLE_MIN_FILL: f64 = 0.95;
pub const L_SHAPE_MIN_FILL: f64 = 0.50;
pub const L_SHAPE_MAX_FILL: f64 = 0.75;

pub const DECOMPOSITION_NOTE: &str = "Complex shape detected - manual decomposition recommended";

/// Classify an outline and describe it as pixel-space sections
pub fn classify_shape(outline: &Outline) -> ShapeInfo {
    let points = outline.points();
    let bounding_box = bounding_rect(points);
    let total_area = polygon_area(points);

    let bounding_area = bounding_box.area();
    let fill_ratio = if bounding_area > 0 {
        total_area / bounding_area as f64
    } else {
        0.0
    };

    let (shape_type, section) = if fill_ratio > RECTANGLE_MIN_FILL {
        (
            ShapeType::Rectangle,
            Section {
                name: "main".into(),
                geometry: SectionGeometry::Rectangle {
                    width_pixels: bounding_box.width,
                    height_pixels: bounding_box.height,
                },
                note: None,
            },
        )
    } else if fill_ratio > L_SHAPE_MIN_FILL && fill_ratio <= L_SHAPE_MAX_FILL {
        (
            ShapeType::LShape,
            irregular_section(total_area, Some(DECOMPOSITION_NOTE.into())),
        )
    } else {
        (ShapeType::Complex, irregular_section(total_area, None))
    };

    tracing::debug!(
        shape = %shape_type,
        fill_ratio,
        area_pixels = total_area,
        bbox_width = bounding_box.width,
        bbox_height = bounding_box.height,
        "Classified outline"
    );

    ShapeInfo {
        shape_type,
        is_simple_rectangle: shape_type == ShapeType::Rectangle,
        bounding_box,
        total_area_pixels: total_area,
        fill_ratio,
        sections: vec![section],
    }
}

fn irregular_section(area_pixels: f64, note: Option<String>) -> Section {
    Section {
        name: "complex".into(),
        geometry: SectionGeometry::Irregular {
            area_pixels: area_pixels as u64,
        },
        note,
    }
}
