//! Hex color parsing and blending used for chart shading.

use std::fmt;

/// Dark ring background that muted arcs are blended toward.
pub const RING_BACKGROUND: Rgb = Rgb {
    r: 42,
    g: 50,
    b: 55,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses `#RRGGBB` or `RRGGBB`. Anything else yields `None`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        Some(Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }

    /// Linear blend: `alpha` of `self` over `(1 - alpha)` of `background`.
    pub fn blend(self, background: Rgb, alpha: f64) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            (f64::from(fg) * alpha + f64::from(bg) * (1.0 - alpha)).round() as u8
        };
        Rgb {
            r: mix(self.r, background.r),
            g: mix(self.g, background.g),
            b: mix(self.b, background.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Mutes a hex color toward [`RING_BACKGROUND`]; unparsable input falls back to the
/// background itself.
pub fn mix_muted(hex: &str, alpha: f64) -> Rgb {
    Rgb::from_hex(hex)
        .unwrap_or(RING_BACKGROUND)
        .blend(RING_BACKGROUND, alpha)
}
