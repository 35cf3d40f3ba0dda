// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building outline detection via edge maps and external contours

use crate::image_ops::{canny, dilate_square, gaussian_blur, rgb_to_grayscale};
use crate::polygon::{approximate_closed_polygon, arc_length, compress_chain, polygon_area};
use crate::types::{DetectionConfig, Outline, Point};
use image::{GrayImage, RgbImage};
use imageproc::contours::{find_contours, BorderType};

/// Build the dilated edge map the contours are traced on
///
/// grayscale -> Gaussian blur -> Canny -> square dilation
pub fn edge_map(image: &RgbImage, config: &DetectionConfig) -> GrayImage {
    let gray = rgb_to_grayscale(image);
    let blurred = gaussian_blur(&gray, config.blur_kernel_size);
    let edges = canny(&blurred, config.canny_low, config.canny_high);
    dilate_square(&edges, config.dilation_kernel_size, config.dilation_iterations)
}

/// Outer borders of top-level foreground components, run-compressed
pub fn external_contours(binary: &GrayImage) -> Vec<Vec<Point>> {
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| {
            let chain: Vec<Point> = c.points.into_iter().map(Point::from).collect();
            compress_chain(&chain)
        })
        .collect()
}

/// Contour with the largest enclosed area; the first one wins a tie
fn largest_contour(contours: Vec<Vec<Point>>) -> Option<Vec<Point>> {
    let mut best: Option<(f64, Vec<Point>)> = None;
    for contour in contours {
        let area = polygon_area(&contour);
        match &best {
            Some((best_area, _)) if area <= *best_area => {}
            _ => best = Some((area, contour)),
        }
    }
    best.map(|(_, contour)| contour)
}

/// Detect the building outline in a rendered floor plan.
///
/// Returns `None` when the edge map has no contours at all (for example a
/// blank page).
pub fn detect_building_outline(image: &RgbImage, config: &DetectionConfig) -> Option<Outline> {
    let edges = edge_map(image, config);
    let contours = external_contours(&edges);

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        contours = contours.len(),
        "Traced external contours"
    );

    let largest = largest_contour(contours)?;
    let epsilon = config.approx_epsilon_fraction * arc_length(&largest, true);
    let simplified = approximate_closed_polygon(&largest, epsilon);

    tracing::debug!(
        raw_points = largest.len(),
        points = simplified.len(),
        epsilon,
        "Simplified largest contour"
    );

    Some(Outline::new(simplified))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::bounding_rect;
    use image::{Luma, Rgb};

    fn white_page(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
    }

    fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
    }

    #[test]
    fn test_blank_page_has_no_outline() {
        let img = white_page(120, 80);
        assert!(detect_building_outline(&img, &DetectionConfig::default()).is_none());
    }

    #[test]
    fn test_solid_rectangle_outline() {
        let mut img = white_page(300, 200);
        fill_rect(&mut img, 100, 50, 200, 150);

        let outline = detect_building_outline(&img, &DetectionConfig::default())
            .expect("rectangle should be detected");

        assert_eq!(outline.len(), 4);
        let bbox = bounding_rect(outline.points());
        // Edge band sits on the boundary and is widened by the dilation
        assert!((100..=110).contains(&bbox.width), "width {}", bbox.width);
        assert!((100..=110).contains(&bbox.height), "height {}", bbox.height);
        assert!(bbox.x >= 94 && bbox.x <= 100);
    }

    #[test]
    fn test_largest_contour_wins() {
        let mut img = white_page(400, 200);
        fill_rect(&mut img, 20, 20, 60, 60);
        fill_rect(&mut img, 150, 30, 350, 170);

        let outline = detect_building_outline(&img, &DetectionConfig::default()).unwrap();
        let bbox = bounding_rect(outline.points());

        assert!(bbox.x > 100, "expected the big rectangle, got {:?}", bbox);
    }

    #[test]
    fn test_external_contours_ignore_holes() {
        let mut ring = GrayImage::new(30, 30);
        for y in 5..25 {
            for x in 5..25 {
                if !(10..20).contains(&x) || !(10..20).contains(&y) {
                    ring.put_pixel(x, y, Luma([255]));
                }
            }
        }

        let contours = external_contours(&ring);

        assert_eq!(contours.len(), 1);
        assert_eq!(bounding_rect(&contours[0]).width, 20);
    }

    #[test]
    fn test_largest_contour_tie_keeps_first() {
        let a = vec![Point::new(0, 0), Point::new(2, 0), Point::new(2, 2), Point::new(0, 2)];
        let b = vec![Point::new(5, 5), Point::new(7, 5), Point::new(7, 7), Point::new(5, 7)];
        assert_eq!(largest_contour(vec![a.clone(), b]), Some(a));
        assert_eq!(largest_contour(Vec::new()), None);
    }
}
