// src/colormap.rs

//! Named colour maps used by slice plots.
//!
//! `EoR` and `bwr` are linear gradients through fixed colour stops; the
//! remaining maps come from `colorous`.

use std::fmt;
use std::str::FromStr;

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Colour stops of the Epoch-of-Reionization brightness temperature map.
const EOR_STOPS: [(f64, RGBColor); 7] = [
    (0.0, RGBColor(255, 255, 255)),
    (0.21, RGBColor(255, 255, 0)),
    (0.42, RGBColor(255, 165, 0)),
    (0.63, RGBColor(255, 0, 0)),
    (0.86, RGBColor(0, 0, 0)),
    (0.9, RGBColor(0, 0, 255)),
    (1.0, RGBColor(0, 255, 255)),
];

/// Blue-white-red diverging map.
const BWR_STOPS: [(f64, RGBColor); 3] = [
    (0.0, RGBColor(0, 0, 255)),
    (0.5, RGBColor(255, 255, 255)),
    (1.0, RGBColor(255, 0, 0)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colormap {
    #[serde(rename = "EoR")]
    Eor,
    #[serde(rename = "bwr")]
    Bwr,
    #[serde(rename = "viridis")]
    Viridis,
    #[serde(rename = "magma")]
    Magma,
    #[serde(rename = "Reds")]
    Reds,
    #[serde(rename = "cubehelix")]
    Cubehelix,
}

impl Colormap {
    pub const ALL: [Colormap; 6] = [
        Colormap::Eor,
        Colormap::Bwr,
        Colormap::Viridis,
        Colormap::Magma,
        Colormap::Reds,
        Colormap::Cubehelix,
    ];

    /// Registered name of the map.
    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Eor => "EoR",
            Colormap::Bwr => "bwr",
            Colormap::Viridis => "viridis",
            Colormap::Magma => "magma",
            Colormap::Reds => "Reds",
            Colormap::Cubehelix => "cubehelix",
        }
    }

    /// Value range this map forces when the caller gives none.
    pub fn fixed_range(&self) -> Option<(f64, f64)> {
        match self {
            Colormap::Eor => Some((crate::constants::EOR_VMIN, crate::constants::EOR_VMAX)),
            _ => None,
        }
    }

    /// Colour at normalized position `t` in [0, 1].
    pub fn eval(&self, t: f64) -> RGBColor {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let gradient = match self {
            Colormap::Eor => return eval_stops(&EOR_STOPS, t),
            Colormap::Bwr => return eval_stops(&BWR_STOPS, t),
            Colormap::Viridis => colorous::VIRIDIS,
            Colormap::Magma => colorous::MAGMA,
            Colormap::Reds => colorous::REDS,
            Colormap::Cubehelix => colorous::CUBEHELIX,
        };
        let color = gradient.eval_continuous(t);
        RGBColor(color.r, color.g, color.b)
    }

    /// Map a data value onto the colour scale spanning `[vmin, vmax]`.
    /// Non-finite values have no colour and are left undrawn.
    pub fn map_value(&self, value: f64, vmin: f64, vmax: f64) -> Option<RGBColor> {
        if !value.is_finite() || !vmin.is_finite() || !vmax.is_finite() {
            return None;
        }
        // Ensure span is non-zero to avoid division by zero
        let span = (vmax - vmin).abs().max(1e-12);
        let t = ((value - vmin) / span).clamp(0.0, 1.0);
        Some(self.eval(t))
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colormap::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown colour map '{s}'"))
    }
}

/// Helper function for linear interpolation between two RGB colors.
fn interpolate_color(c1: &RGBColor, c2: &RGBColor, ratio: f64) -> RGBColor {
    let ratio = ratio.clamp(0.0, 1.0);
    RGBColor(
        (c1.0 as f64 * (1.0 - ratio) + c2.0 as f64 * ratio).round() as u8,
        (c1.1 as f64 * (1.0 - ratio) + c2.1 as f64 * ratio).round() as u8,
        (c1.2 as f64 * (1.0 - ratio) + c2.2 as f64 * ratio).round() as u8,
    )
}

fn eval_stops(stops: &[(f64, RGBColor)], t: f64) -> RGBColor {
    for pair in stops.windows(2) {
        let (p0, c0) = pair[0];
        let (p1, c1) = pair[1];
        if t <= p1 {
            let width = (p1 - p0).max(1e-12);
            return interpolate_color(&c0, &c1, (t - p0) / width);
        }
    }
    stops[stops.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eor_endpoints_and_stops() {
        assert_eq!(Colormap::Eor.eval(0.0), RGBColor(255, 255, 255));
        assert_eq!(Colormap::Eor.eval(0.63), RGBColor(255, 0, 0));
        assert_eq!(Colormap::Eor.eval(0.86), RGBColor(0, 0, 0));
        assert_eq!(Colormap::Eor.eval(1.0), RGBColor(0, 255, 255));
    }

    #[test]
    fn test_bwr_midpoint_is_white() {
        assert_eq!(Colormap::Bwr.eval(0.5), RGBColor(255, 255, 255));
        assert_eq!(Colormap::Bwr.eval(0.0), RGBColor(0, 0, 255));
        assert_eq!(Colormap::Bwr.eval(1.0), RGBColor(255, 0, 0));
    }

    #[test]
    fn test_map_value_clamps_and_skips_nan() {
        let lo = Colormap::Bwr.map_value(-1e9, -1.0, 1.0);
        assert_eq!(lo, Some(RGBColor(0, 0, 255)));
        assert_eq!(Colormap::Viridis.map_value(f64::NAN, 0.0, 1.0), None);
    }

    #[test]
    fn test_only_eor_has_fixed_range() {
        assert_eq!(Colormap::Eor.fixed_range(), Some((-150.0, 30.0)));
        assert!(Colormap::ALL
            .iter()
            .filter(|c| **c != Colormap::Eor)
            .all(|c| c.fixed_range().is_none()));
    }

    #[test]
    fn test_names_parse_back() {
        for cmap in Colormap::ALL {
            assert_eq!(cmap.name().parse::<Colormap>().unwrap(), cmap);
        }
        assert!("jet".parse::<Colormap>().is_err());
    }
}

// src/colormap.rs
