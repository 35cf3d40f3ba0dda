// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pixel to real-world unit conversion

use crate::scale::Scale;

pub const MM_PER_INCH: f64 = 25.4;
pub const DEFAULT_DPI: u32 = 300;

/// Round to two decimals, the precision every emitted measurement uses
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts pixel measurements of a rendered drawing into meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    dpi: f64,
    multiplier: f64,
}

impl UnitConverter {
    pub fn new(dpi: u32, scale: Scale) -> Self {
        Self {
            dpi: dpi as f64,
            multiplier: scale.multiplier(),
        }
    }

    /// `(pixels / dpi) * 25.4 * multiplier / 1000`
    pub fn pixels_to_meters(&self, pixels: f64) -> f64 {
        let inches = pixels / self.dpi;
        let mm = inches * MM_PER_INCH;
        let real_mm = mm * self.multiplier;
        real_mm / 1000.0
    }

    /// Number of square pixels covering one real-world square meter
    pub fn pixels_per_square_meter(&self) -> f64 {
        let pixels_per_real_mm = self.dpi / MM_PER_INCH / self.multiplier;
        pixels_per_real_mm.powi(2) * 1_000_000.0
    }

    pub fn square_pixels_to_square_meters(&self, area_pixels: f64) -> f64 {
        area_pixels / self.pixels_per_square_meter()
    }
}
