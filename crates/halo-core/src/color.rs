//! CSS colour strings to GPU clear colours.

use crate::constants::CLEAR_COLOR;

/// Parse `rgb(..)`, `rgba(..)` or `#rrggbb` into sRGB components in 0..=1.
pub fn parse_css_color(css: &str) -> Option<[f32; 4]> {
    let css = css.trim();
    if let Some(hex) = css.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(hex.get(i..i + 2)?, 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        return Some([channel(0)?, channel(2)?, channel(4)?, 1.0]);
    }

    let body = css
        .strip_prefix("rgba(")
        .or_else(|| css.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<f32> = body
        .split([',', ' ', '/'])
        .filter(|p| !p.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [r, g, b] => Some([r / 255.0, g / 255.0, b / 255.0, 1.0]),
        [r, g, b, a] => Some([r / 255.0, g / 255.0, b / 255.0, a.clamp(0.0, 1.0)]),
        _ => None,
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear clear colour for a page background, or [`CLEAR_COLOR`] when the
/// background is transparent or not understood.
pub fn clear_color_from_css(css: &str) -> [f32; 4] {
    match parse_css_color(css) {
        Some([r, g, b, a]) if a > 0.0 => [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0],
        _ => CLEAR_COLOR,
    }
}
