//! 8-bit RGBA color with HSV/HSL conversion.
//!
//! Conversions to and from HSV and HSL are exact inverses over the whole 8-bit
//! channel domain: converting any `(r, g, b)` to either space and back yields
//! the original channels. Channel reconstruction rounds to nearest.

use std::fmt;

/// An RGBA color with 8 bits per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

/// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREY: Color = Color::rgb(127, 127, 127);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);

    /// Create a color from all four channels.
    #[inline]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Create an opaque color.
    #[inline]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    /// The same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }

    #[inline]
    pub fn norm_red(self) -> f64 {
        f64::from(self.red) / 255.0
    }

    #[inline]
    pub fn norm_green(self) -> f64 {
        f64::from(self.green) / 255.0
    }

    #[inline]
    pub fn norm_blue(self) -> f64 {
        f64::from(self.blue) / 255.0
    }

    #[inline]
    pub fn norm_alpha(self) -> f64 {
        f64::from(self.alpha) / 255.0
    }

    fn max_channel(self) -> u8 {
        self.red.max(self.green).max(self.blue)
    }

    fn min_channel(self) -> u8 {
        self.red.min(self.green).min(self.blue)
    }

    /// Average of the largest and smallest channel.
    pub fn lightness(self) -> u8 {
        self.max_channel() / 2 + self.min_channel() / 2
    }

    /// Perceived brightness (Rec. 601 weights).
    pub fn luma(self) -> u8 {
        let l = 0.299 * f64::from(self.red)
            + 0.587 * f64::from(self.green)
            + 0.114 * f64::from(self.blue);
        to_channel(l / 255.0)
    }

    /// Interpolate every channel, alpha included.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        };
        Color {
            red: mix(self.red, other.red),
            green: mix(self.green, other.green),
            blue: mix(self.blue, other.blue),
            alpha: mix(self.alpha, other.alpha),
        }
    }

    // ── HSV ──────────────────────────────────────────────────────────

    /// Convert the RGB channels to HSV. Alpha is ignored.
    pub fn to_hsv(self) -> Hsv {
        let max = self.max_channel();
        let min = self.min_channel();
        let value = f64::from(max) / 255.0;
        if max == 0 {
            return Hsv { hue: 0.0, saturation: 0.0, value };
        }
        let delta = f64::from(max - min);
        let saturation = delta / f64::from(max);
        if max == min {
            return Hsv { hue: 0.0, saturation, value };
        }
        let hue = hue_degrees(self, max, delta);
        Hsv { hue, saturation, value }
    }

    /// Build an opaque color from HSV components.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Color {
        Color::BLACK.with_hsv(hue, saturation, value)
    }

    /// Replace the RGB channels from HSV components, keeping alpha.
    ///
    /// Saturation and value are clamped to `[0, 1]`; hue wraps into `[0, 360)`.
    pub fn with_hsv(self, hue: f64, saturation: f64, value: f64) -> Color {
        let value = value.clamp(0.0, 1.0);
        let saturation = saturation.clamp(0.0, 1.0);
        if saturation == 0.0 {
            let v = to_channel(value);
            return Color { red: v, green: v, blue: v, alpha: self.alpha };
        }
        let hf = wrap_hue(hue) / 60.0;
        let sector = hf.floor();
        let f = hf - sector;
        let p = value * (1.0 - saturation);
        let q = value * (1.0 - saturation * f);
        let t = value * (1.0 - saturation * (1.0 - f));
        let (r, g, b) = match sector as i32 {
            0 | 6 => (value, t, p),
            1 => (q, value, p),
            2 => (p, value, t),
            3 => (p, q, value),
            4 => (t, p, value),
            _ => (value, p, q),
        };
        Color {
            red: to_channel(r),
            green: to_channel(g),
            blue: to_channel(b),
            alpha: self.alpha,
        }
    }

    // ── HSL ──────────────────────────────────────────────────────────

    /// Convert the RGB channels to HSL. Alpha is ignored.
    pub fn to_hsl(self) -> Hsl {
        let max = self.max_channel();
        let min = self.min_channel();
        let lightness = (f64::from(max) + f64::from(min)) / 510.0;
        if max == min {
            return Hsl { hue: 0.0, saturation: 0.0, lightness };
        }
        let delta = f64::from(max - min);
        let chroma = delta / 255.0;
        let saturation = chroma / (1.0 - (2.0 * lightness - 1.0).abs());
        let hue = hue_degrees(self, max, delta);
        Hsl { hue, saturation, lightness }
    }

    /// Build an opaque color from HSL components.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Color {
        Color::BLACK.with_hsl(hue, saturation, lightness)
    }

    /// Replace the RGB channels from HSL components, keeping alpha.
    pub fn with_hsl(self, hue: f64, saturation: f64, lightness: f64) -> Color {
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);
        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let h = wrap_hue(hue) / 60.0;
        let x = chroma * (1.0 - ((h % 2.0) - 1.0).abs());
        let (r, g, b) = if h < 1.0 {
            (chroma, x, 0.0)
        } else if h < 2.0 {
            (x, chroma, 0.0)
        } else if h < 3.0 {
            (0.0, chroma, x)
        } else if h < 4.0 {
            (0.0, x, chroma)
        } else if h < 5.0 {
            (x, 0.0, chroma)
        } else {
            (chroma, 0.0, x)
        };
        let m = lightness - chroma / 2.0;
        Color {
            red: to_channel(r + m),
            green: to_channel(g + m),
            blue: to_channel(b + m),
            alpha: self.alpha,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

impl From<Hsv> for Color {
    fn from(hsv: Hsv) -> Self {
        Color::from_hsv(hsv.hue, hsv.saturation, hsv.value)
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        Color::from_hsl(hsl.hue, hsl.saturation, hsl.lightness)
    }
}

/// Hue in degrees for a color with at least two distinct channels.
///
/// Channel differences are taken on the integer values so the ratios are exact
/// up to a single division.
fn hue_degrees(c: Color, max: u8, delta: f64) -> f64 {
    let (r, g, b) = (f64::from(c.red), f64::from(c.green), f64::from(c.blue));
    let hue = if max == c.red {
        60.0 * ((g - b) / delta)
    } else if max == c.green {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    if hue < 0.0 {
        hue + 360.0
    } else {
        hue
    }
}

fn wrap_hue(hue: f64) -> f64 {
    let h = hue % 360.0;
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// Map a normalized channel to `0..=255`, rounding to nearest.
fn to_channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_colors_to_hsv() {
        let red = Color::RED.to_hsv();
        assert_eq!(red.hue, 0.0);
        assert_eq!(red.saturation, 1.0);
        assert_eq!(red.value, 1.0);

        assert_eq!(Color::GREEN.to_hsv().hue, 120.0);
        assert_eq!(Color::BLUE.to_hsv().hue, 240.0);
        assert_eq!(Color::MAGENTA.to_hsv().hue, 300.0);
    }

    #[test]
    fn black_and_grey_have_no_hue() {
        let black = Color::BLACK.to_hsv();
        assert_eq!((black.hue, black.saturation, black.value), (0.0, 0.0, 0.0));
        let grey = Color::GREY.to_hsl();
        assert_eq!(grey.saturation, 0.0);
        assert_eq!(grey.hue, 0.0);
    }

    #[test]
    fn from_hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::RED);
        assert_eq!(Color::from_hsv(120.0, 1.0, 1.0), Color::GREEN);
        assert_eq!(Color::from_hsv(240.0, 1.0, 1.0), Color::BLUE);
        assert_eq!(Color::from_hsv(60.0, 1.0, 1.0), Color::YELLOW);
    }

    #[test]
    fn from_hsl_primaries() {
        assert_eq!(Color::from_hsl(0.0, 1.0, 0.5), Color::RED);
        assert_eq!(Color::from_hsl(180.0, 1.0, 0.5), Color::CYAN);
        assert_eq!(Color::from_hsl(0.0, 0.0, 1.0), Color::WHITE);
    }

    #[test]
    fn hue_wraps() {
        assert_eq!(Color::from_hsv(360.0, 1.0, 1.0), Color::RED);
        assert_eq!(Color::from_hsv(-120.0, 1.0, 1.0), Color::BLUE);
        assert_eq!(Color::from_hsl(480.0, 1.0, 0.5), Color::GREEN);
    }

    #[test]
    fn with_hsv_preserves_alpha() {
        let c = Color::rgba(10, 200, 30, 77);
        let hsv = c.to_hsv();
        let back = c.with_hsv(hsv.hue, hsv.saturation, hsv.value);
        assert_eq!(back, c);
        assert_eq!(back.alpha, 77);
    }

    #[test]
    fn from_hsv_forces_opaque() {
        let c = Color::rgba(10, 200, 30, 77);
        assert_eq!(Color::from(c.to_hsv()), c.with_alpha(255));
        assert_eq!(Color::from(c.to_hsl()), c.with_alpha(255));
    }

    #[test]
    fn out_of_range_components_clamp() {
        assert_eq!(Color::from_hsv(0.0, 2.0, 5.0), Color::RED);
        assert_eq!(Color::from_hsv(0.0, 1.0, -1.0), Color::BLACK);
    }

    #[test]
    fn display_as_hex() {
        assert_eq!(Color::rgba(255, 0, 16, 128).to_string(), "#FF001080");
    }

    #[test]
    fn lerp_endpoints_and_middle() {
        let a = Color::rgba(0, 0, 0, 0);
        let b = Color::rgba(200, 100, 50, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgba(100, 50, 25, 128));
    }

    #[test]
    fn luma_and_lightness() {
        assert_eq!(Color::WHITE.luma(), 255);
        assert_eq!(Color::BLACK.luma(), 0);
        assert_eq!(Color::rgb(200, 100, 0).lightness(), 100);
    }

    #[test]
    fn hsv_round_trip_all_rgb() {
        for r in 0..=255u8 {
            for g in 0..=255u8 {
                for b in 0..=255u8 {
                    let c = Color::rgb(r, g, b);
                    let hsv = c.to_hsv();
                    assert_eq!(
                        Color::from_hsv(hsv.hue, hsv.saturation, hsv.value),
                        c,
                        "hsv round trip failed for {c}"
                    );
                }
            }
        }
    }

    #[test]
    fn hsl_round_trip_all_rgb() {
        for r in 0..=255u8 {
            for g in 0..=255u8 {
                for b in 0..=255u8 {
                    let c = Color::rgb(r, g, b);
                    let hsl = c.to_hsl();
                    assert_eq!(
                        Color::from_hsl(hsl.hue, hsl.saturation, hsl.lightness),
                        c,
                        "hsl round trip failed for {c}"
                    );
                }
            }
        }
    }
}
