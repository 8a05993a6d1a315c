//! Render state threaded through one interpreter pass.

use super::color::{Palette, Rgba};
use crate::opcode::CoordinateMode;
use crate::utils::{LogicalPoint, ORIGIN};

/// Ambient drawing style attached to every emitted primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Style {
    pub color: Rgba,
    pub line_weight: i32,
}

/// Working state of a render pass.
///
/// One instance lives for exactly one pass and is discarded at its end.
#[derive(Debug, Clone)]
pub struct RenderState {
    /// Running absolute position; origin for the next relative point.
    pub current_point: LogicalPoint,
    /// How the next payload point is resolved.
    pub coordinate_mode: CoordinateMode,
    /// Gates whether primitives reach the device.
    pub visible: bool,
    pub active_color: Rgba,
    /// Indexed color table; never modified after construction.
    pub palette: Palette,
    pub line_weight: i32,
}

impl RenderState {
    /// Create a state with the default color map.
    pub fn new() -> Self {
        Self::with_palette(Palette::default())
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self {
            current_point: ORIGIN,
            coordinate_mode: CoordinateMode::Relative,
            visible: true,
            active_color: Rgba::BLACK,
            palette,
            line_weight: 0,
        }
    }

    /// Snapshot of the style primitives are emitted with.
    pub const fn style(&self) -> Style {
        Style {
            color: self.active_color,
            line_weight: self.line_weight,
        }
    }

    /// Resolve one payload point and make it the new current point.
    pub fn resolve(&mut self, p: impl Into<LogicalPoint>) -> LogicalPoint {
        let p = p.into();
        let resolved = match self.coordinate_mode {
            CoordinateMode::Relative => self.current_point.offset_by(p),
            CoordinateMode::Absolute => p,
        };
        self.current_point = resolved;
        resolved
    }

    /// Resolve a point list in drawing order.
    pub fn resolve_all<P>(&mut self, points: &[P]) -> Vec<LogicalPoint>
    where
        P: Copy + Into<LogicalPoint>,
    {
        points.iter().map(|&p| self.resolve(p)).collect()
    }

    /// Select a palette entry; out-of-range indices keep the current color.
    pub fn select_color_index(&mut self, index: u8) {
        if let Some(color) = self.palette.get(index) {
            self.active_color = color;
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}
