// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Image processing operations for outline detection

use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::filter::Kernel;

/// Convert an RGB raster to grayscale (ITU-R BT.601 luma, rounded)
pub fn rgb_to_grayscale(rgb: &RgbImage) -> GrayImage {
    let mut gray = GrayImage::new(rgb.width(), rgb.height());

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        gray.put_pixel(x, y, Luma([luma.round().min(255.0) as u8]));
    }

    gray
}

/// Integer binomial weights for an odd kernel size: 5 gives [1, 4, 6, 4, 1]
fn binomial_weights(size: usize) -> Vec<u64> {
    let mut weights = vec![1u64];
    for _ in 1..size {
        let mut next = vec![1u64; weights.len() + 1];
        for i in 1..weights.len() {
            next[i] = weights[i - 1] + weights[i];
        }
        weights = next;
    }
    weights
}

/// Gaussian blur with a fixed-size binomial kernel.
///
/// For kernel sizes up to 5 this is the kernel a Gaussian gets when sigma is
/// derived from the size. `gaussian_blur_f32` sizes its kernel from sigma
/// instead, so the 2D kernel is built here and run through
/// `imageproc::filter::Kernel` with integer accumulation. Borders are
/// replicated and the result is rounded to nearest.
pub fn gaussian_blur(image: &GrayImage, kernel_size: usize) -> GrayImage {
    let kernel_size = if kernel_size % 2 == 0 {
        kernel_size + 1
    } else {
        kernel_size.max(1)
    };
    let weights = binomial_weights(kernel_size);
    let data: Vec<u64> = weights
        .iter()
        .flat_map(|&wy| weights.iter().map(move |&wx| wx * wy))
        .collect();
    let norm: u64 = data.iter().sum();

    let size = kernel_size as u32;
    Kernel::new(&data, size, size).filter(image, |out: &mut u8, acc: u64| {
        *out = ((acc + norm / 2) / norm).min(255) as u8;
    })
}

/// Canny edge detection on an already smoothed image.
///
/// 3x3 Sobel gradients, L1 magnitude, non-maximum suppression and 8-connected
/// hysteresis. Edge pixels are 255, everything else 0. Unlike
/// `imageproc::edges::canny` no additional blur is applied.
pub fn canny(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let mut edges = GrayImage::new(image.width(), image.height());
    if width == 0 || height == 0 {
        return edges;
    }

    let gx = imageproc::gradients::horizontal_sobel(image);
    let gy = imageproc::gradients::vertical_sobel(image);

    // Read straight from the Sobel planes, nothing else is kept per pixel
    let gradient = |x: usize, y: usize| -> (i32, i32) {
        (
            gx.get_pixel(x as u32, y as u32).0[0] as i32,
            gy.get_pixel(x as u32, y as u32).0[0] as i32,
        )
    };
    let mag_at = |x: i64, y: i64| -> i32 {
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            0
        } else {
            let (dx, dy) = gradient(x as usize, y as usize);
            dx.abs() + dy.abs()
        }
    };

    // tan(22.5deg) and tan(67.5deg)
    const TAN_22_5: f64 = 0.414_213_562_373_095_1;
    const TAN_67_5: f64 = 2.414_213_562_373_095;

    // 0 = suppressed, 1 = weak candidate, 2 = strong edge
    let mut state = vec![0u8; width * height];
    let mut stack = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let (dx, dy) = gradient(x, y);
            let m = dx.abs() + dy.abs();
            if (m as f32) <= low_threshold {
                continue;
            }

            let (xi, yi) = (x as i64, y as i64);
            let ax = dx.abs() as f64;
            let ay = dy.abs() as f64;

            let is_local_max = if ay < ax * TAN_22_5 {
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else if ay > ax * TAN_67_5 {
                m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
            } else {
                let s = if (dx < 0) != (dy < 0) { -1 } else { 1 };
                m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
            };

            if !is_local_max {
                continue;
            }

            if m as f32 > high_threshold {
                state[i] = 2;
                stack.push((x, y));
            } else {
                state[i] = 1;
            }
        }
    }

    while let Some((x, y)) = stack.pop() {
        edges.put_pixel(x as u32, y as u32, Luma([255]));
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                let n = ny * width + nx;
                if state[n] == 1 {
                    state[n] = 2;
                    stack.push((nx, ny));
                }
            }
        }
    }

    edges
}

/// Dilate with a square structuring element of `kernel_size`, repeated
/// `iterations` times
///
/// Repeated square dilations compose into a single square of radius
/// `kernel_size / 2 * iterations`, which is a Chebyshev-norm dilation.
pub fn dilate_square(image: &GrayImage, kernel_size: u8, iterations: u8) -> GrayImage {
    let radius = (kernel_size / 2).saturating_mul(iterations);
    if radius == 0 {
        return image.clone();
    }
    imageproc::morphology::dilate(image, Norm::LInf, radius)
}
