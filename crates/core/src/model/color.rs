//! Colors and the indexed color table.
//!
//! The default table follows the 256-entry AutoCAD Color Index layout used
//! by W2D streams that never ship their own color map.

use std::fmt;
use std::sync::{Arc, LazyLock};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::BLACK
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// An ordered, read-only color table addressed by a byte index.
///
/// Cloning shares the underlying table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(Arc<[Rgba]>);

impl Palette {
    pub fn new(colors: Vec<Rgba>) -> Self {
        Self(colors.into())
    }

    /// Look up an index. Indices past the end of the table yield `None`.
    pub fn get(&self, index: u8) -> Option<Rgba> {
        self.0.get(usize::from(index)).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_COLOR_MAP.clone()
    }
}

impl From<Vec<Rgba>> for Palette {
    fn from(colors: Vec<Rgba>) -> Self {
        Self::new(colors)
    }
}

const BASE_COLORS: [Rgba; 10] = [
    Rgba::opaque(0, 0, 0),
    Rgba::opaque(255, 0, 0),
    Rgba::opaque(255, 255, 0),
    Rgba::opaque(0, 255, 0),
    Rgba::opaque(0, 255, 255),
    Rgba::opaque(0, 0, 255),
    Rgba::opaque(255, 0, 255),
    Rgba::opaque(255, 255, 255),
    Rgba::opaque(128, 128, 128),
    Rgba::opaque(192, 192, 192),
];

const SHADE_VALUES: [f32; 5] = [255.0, 204.0, 153.0, 127.0, 76.0];

const GRAY_RAMP: [u8; 6] = [51, 91, 132, 173, 214, 255];

/// Fully saturated hue at unit value, as RGB fractions.
fn hue_fractions(degrees: f32) -> [f32; 3] {
    let h = degrees / 60.0;
    let x = 1.0 - ((h % 2.0) - 1.0).abs();
    match h as u32 {
        0 => [1.0, x, 0.0],
        1 => [x, 1.0, 0.0],
        2 => [0.0, 1.0, x],
        3 => [0.0, x, 1.0],
        4 => [x, 0.0, 1.0],
        _ => [1.0, 0.0, x],
    }
}

/// Entry `index` of the standard color map.
fn standard_color(index: usize) -> Rgba {
    match index {
        0..=9 => BASE_COLORS[index],
        10..=249 => {
            let k = index - 10;
            let hue = (k / 10) as f32 * 15.0;
            let shade = k % 10;
            let value = SHADE_VALUES[shade / 2];
            // odd columns are the desaturated variant of the same hue
            let pastel = shade % 2 == 1;
            let [r, g, b] = hue_fractions(hue).map(|c| {
                let c = if pastel { 0.5 + 0.5 * c } else { c };
                (c * value).round() as u8
            });
            Rgba::opaque(r, g, b)
        }
        _ => {
            let v = GRAY_RAMP[(index - 250).min(GRAY_RAMP.len() - 1)];
            Rgba::opaque(v, v, v)
        }
    }
}

/// The standard 256-entry color map.
pub static DEFAULT_COLOR_MAP: LazyLock<Palette> =
    LazyLock::new(|| Palette::new((0..256).map(standard_color).collect()));
