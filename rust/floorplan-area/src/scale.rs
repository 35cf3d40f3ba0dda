// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Architectural drawing scale ("1:100" and friends)

use crate::error::ScaleError;
use std::fmt;
use std::str::FromStr;

/// Multiplier used whenever a scale string cannot be interpreted
pub const DEFAULT_MULTIPLIER: f64 = 100.0;

/// Largest accepted multiplier; anything beyond is treated as malformed
pub const MAX_MULTIPLIER: f64 = 1_000_000.0;

/// Drawing scale stored as `real = drawing * multiplier`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    multiplier: f64,
}

impl Scale {
    /// Parse `"<draw>:<real>"`, e.g. `"1:50"` gives a multiplier of 50.
    ///
    /// Anything after a second `:` is ignored.
    pub fn parse(input: &str) -> Result<Self, ScaleError> {
        let mut parts = input.split(':');
        let (drawing, real) = match (parts.next(), parts.next()) {
            (Some(drawing), Some(real)) => (drawing, real),
            _ => return Err(ScaleError::MissingSeparator(input.to_string())),
        };

        let drawing = parse_component(drawing)?;
        let real = parse_component(real)?;
        let multiplier = real / drawing;

        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ScaleError::NotPositive(input.to_string()));
        }
        if multiplier > MAX_MULTIPLIER {
            return Err(ScaleError::OutOfRange(input.to_string()));
        }

        Ok(Self { multiplier })
    }

    /// Total variant of [`Scale::parse`]: malformed input yields 1:100.
    pub fn parse_or_default(input: &str) -> Self {
        Self::parse(input).unwrap_or_else(|err| {
            tracing::debug!(scale = input, error = %err, "Falling back to default scale");
            Self::default()
        })
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

fn parse_component(part: &str) -> Result<f64, ScaleError> {
    part.trim()
        .parse::<f64>()
        .map_err(|_| ScaleError::InvalidNumber(part.to_string()))
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

impl FromStr for Scale {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for Scale {
    fn from(s: &str) -> Self {
        Self::parse_or_default(s)
    }
}

/// Formats as `1:<multiplier>` with the multiplier truncated toward zero
impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1:{}", self.multiplier.trunc() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_scales() {
        assert_eq!(Scale::parse_or_default("1:100").multiplier(), 100.0);
        assert_eq!(Scale::parse_or_default("1:50").multiplier(), 50.0);
        assert_eq!(Scale::parse_or_default("2:100").multiplier(), 50.0);
        assert_eq!(Scale::parse_or_default(" 1 : 200 ").multiplier(), 200.0);
    }

    #[test]
    fn test_malformed_scales_fall_back() {
        for input in ["garbage", "", "1:", ":100", "a:b", "5:0", "0:5", "1:-100", "1:inf"] {
            assert_eq!(
                Scale::parse_or_default(input).multiplier(),
                DEFAULT_MULTIPLIER,
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_reports_reason() {
        assert_eq!(
            Scale::parse("garbage"),
            Err(ScaleError::MissingSeparator("garbage".into()))
        );
        assert_eq!(Scale::parse("5:0"), Err(ScaleError::NotPositive("5:0".into())));
        assert!(matches!(Scale::parse("x:1"), Err(ScaleError::InvalidNumber(_))));
    }

    #[test]
    fn test_huge_multiplier_falls_back() {
        assert_eq!(
            Scale::parse("1:1e300"),
            Err(ScaleError::OutOfRange("1:1e300".into()))
        );
        assert_eq!(Scale::parse_or_default("1:1e300").to_string(), "1:100");
        assert_eq!(Scale::parse_or_default("1e-300:1").multiplier(), DEFAULT_MULTIPLIER);
        assert_eq!(Scale::parse_or_default("1:1000000").multiplier(), MAX_MULTIPLIER);
    }

    #[test]
    fn test_extra_components_ignored() {
        assert_eq!(Scale::parse_or_default("1:100:3").multiplier(), 100.0);
    }

    #[test]
    fn test_display_truncates() {
        assert_eq!(Scale::parse_or_default("1:100").to_string(), "1:100");
        assert_eq!(Scale::parse_or_default("3:100").to_string(), "1:33");
        assert_eq!(Scale::from("nonsense").to_string(), "1:100");
    }
}
