//! W2D Device - output interface for the rendering interpreter.
//!
//! Devices receive resolved absolute coordinates together with the ambient
//! style. Rasterization, stroke width and text layout are the device's
//! business; the interpreter only hands over primitives.

use crate::model::state::Style;
use crate::utils::{LogicalPoint, format_points};
use std::fmt;

/// Output device trait - the drawing backend of a render pass.
pub trait W2dDevice {
    /// Called before a frame's primitives are replayed.
    fn begin_frame(&mut self) {}

    /// Called after the last primitive of a frame.
    fn end_frame(&mut self) {}

    /// Draw a single segment.
    fn draw_line(&mut self, from: LogicalPoint, to: LogicalPoint, style: &Style);

    /// Draw a connected segment chain through `points`, in order.
    fn draw_polyline(&mut self, points: &[LogicalPoint], style: &Style);

    /// Draw one marker. Called once per polymarker point.
    fn draw_marker(&mut self, at: LogicalPoint, style: &Style);

    /// Draw a text run anchored at `at`.
    fn draw_text(&mut self, at: LogicalPoint, text: &str, style: &Style);
}

impl<D: W2dDevice + ?Sized> W2dDevice for &mut D {
    fn begin_frame(&mut self) {
        (**self).begin_frame();
    }

    fn end_frame(&mut self) {
        (**self).end_frame();
    }

    fn draw_line(&mut self, from: LogicalPoint, to: LogicalPoint, style: &Style) {
        (**self).draw_line(from, to, style);
    }

    fn draw_polyline(&mut self, points: &[LogicalPoint], style: &Style) {
        (**self).draw_polyline(points, style);
    }

    fn draw_marker(&mut self, at: LogicalPoint, style: &Style) {
        (**self).draw_marker(at, style);
    }

    fn draw_text(&mut self, at: LogicalPoint, text: &str, style: &Style) {
        (**self).draw_text(at, text, style);
    }
}

/// Value form of one device call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Primitive {
    Line {
        from: LogicalPoint,
        to: LogicalPoint,
        style: Style,
    },
    Polyline {
        points: Vec<LogicalPoint>,
        style: Style,
    },
    Marker {
        at: LogicalPoint,
        style: Style,
    },
    Text {
        at: LogicalPoint,
        text: String,
        style: Style,
    },
}

impl Primitive {
    pub const fn style(&self) -> &Style {
        match self {
            Primitive::Line { style, .. }
            | Primitive::Polyline { style, .. }
            | Primitive::Marker { style, .. }
            | Primitive::Text { style, .. } => style,
        }
    }

    /// Perform the device call this primitive stands for.
    pub fn replay<D: W2dDevice + ?Sized>(&self, device: &mut D) {
        match self {
            Primitive::Line { from, to, style } => device.draw_line(*from, *to, style),
            Primitive::Polyline { points, style } => device.draw_polyline(points, style),
            Primitive::Marker { at, style } => device.draw_marker(*at, style),
            Primitive::Text { at, text, style } => device.draw_text(*at, text, style),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.style();
        match self {
            Primitive::Line { from, to, .. } => write!(f, "line {from} {to}")?,
            Primitive::Polyline { points, .. } => write!(f, "polyline {}", format_points(points))?,
            Primitive::Marker { at, .. } => write!(f, "marker {at}")?,
            Primitive::Text { at, text, .. } => write!(f, "text {at} {text:?}")?,
        }
        write!(f, " color={} weight={}", style.color, style.line_weight)
    }
}

/// Device that records every call as a `Primitive`.
#[derive(Debug, Default, Clone)]
pub struct PrimitiveRecorder {
    primitives: Vec<Primitive>,
    frames: usize,
}

impl PrimitiveRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn into_primitives(self) -> Vec<Primitive> {
        self.primitives
    }

    /// Number of completed frames.
    pub const fn frames(&self) -> usize {
        self.frames
    }

    pub(crate) fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }
}

impl W2dDevice for PrimitiveRecorder {
    fn end_frame(&mut self) {
        self.frames += 1;
    }

    fn draw_line(&mut self, from: LogicalPoint, to: LogicalPoint, style: &Style) {
        self.push(Primitive::Line {
            from,
            to,
            style: *style,
        });
    }

    fn draw_polyline(&mut self, points: &[LogicalPoint], style: &Style) {
        self.push(Primitive::Polyline {
            points: points.to_vec(),
            style: *style,
        });
    }

    fn draw_marker(&mut self, at: LogicalPoint, style: &Style) {
        self.push(Primitive::Marker { at, style: *style });
    }

    fn draw_text(&mut self, at: LogicalPoint, text: &str, style: &Style) {
        self.push(Primitive::Text {
            at,
            text: text.to_string(),
            style: *style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::color::Rgba;

    #[test]
    fn test_replay_into_recorder() {
        let style = Style {
            color: Rgba::WHITE,
            line_weight: 3,
        };
        let prims = vec![
            Primitive::Line {
                from: LogicalPoint::new(0, 0),
                to: LogicalPoint::new(1, 1),
                style,
            },
            Primitive::Marker {
                at: LogicalPoint::new(2, 2),
                style,
            },
        ];
        let mut recorder = PrimitiveRecorder::new();
        for p in &prims {
            p.replay(&mut recorder);
        }
        assert_eq!(recorder.primitives(), prims.as_slice());
    }

    #[test]
    fn test_display() {
        let p = Primitive::Polyline {
            points: vec![LogicalPoint::new(15, 10), LogicalPoint::new(15, 15)],
            style: Style::default(),
        };
        assert_eq!(
            p.to_string(),
            "polyline (15,10) (15,15) color=#000000ff weight=0"
        );
    }
}
