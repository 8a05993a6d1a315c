//! W2D rendering interpreter.
//!
//! The interpreter is a fold over the decoded opcode sequence. `step`
//! applies one opcode to a `RenderState` and returns the primitives it would
//! draw; `W2dInterpreter` threads the state through every step, applies the
//! visibility gate once at the emission boundary and forwards what passes to
//! its device.
//!
//! Opcodes are processed strictly in order: every relative point is a delta
//! from the point resolved just before it, possibly by an earlier opcode.

use super::device::{Primitive, W2dDevice};
use crate::model::state::RenderState;
use crate::opcode::{Opcode, keywords};
use crate::utils::LogicalPoint;
use smallvec::SmallVec;
use smol_str::SmolStr;
use std::fmt;
use tracing::{debug, warn};

/// What one opcode produced.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Emission {
    /// Primitives in drawing order, before the visibility gate.
    pub primitives: SmallVec<[Primitive; 1]>,
    /// Id of an unrecognized opcode, for the driver to judge.
    pub unrecognized: Option<SmolStr>,
}

impl Emission {
    fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }
}

/// Non-fatal report about an opcode that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Position of the opcode in the decoded sequence.
    pub index: usize,
    /// Raw id of the opcode.
    pub opcode: SmolStr,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized opcode {:?} at index {}", self.opcode, self.index)
    }
}

/// Apply one opcode to the render state.
///
/// Coordinate resolution and current point updates always happen; whether
/// the returned primitives are drawn is decided by the caller.
pub fn step(state: &mut RenderState, opcode: &Opcode) -> Emission {
    let mut emission = Emission::default();
    // draw opcodes switch the mode to their own kind before resolving
    let mode = opcode.coordinate_mode();

    match opcode {
        Opcode::SetVisibility(on) => state.visible = *on,
        Opcode::SetCurrentPoint(p) => {
            state.coordinate_mode = mode;
            state.resolve(*p);
        }
        Opcode::SetLineWeight(weight) => state.line_weight = i32::from(*weight),
        Opcode::DrawLine { start, end } => {
            state.coordinate_mode = mode;
            emission.push(draw_line(state, *start, *end));
        }
        Opcode::DrawLineLong { start, end } => {
            state.coordinate_mode = mode;
            emission.push(draw_line(state, *start, *end));
        }
        Opcode::DrawPolyline(points) => {
            state.coordinate_mode = mode;
            emission.primitives.extend(draw_polyline(state, points));
        }
        Opcode::DrawPolylineLong(points) => {
            state.coordinate_mode = mode;
            emission.primitives.extend(draw_polyline(state, points));
        }
        Opcode::DrawPolymarker(points) => {
            state.coordinate_mode = mode;
            emission.primitives.extend(draw_markers(state, points));
        }
        Opcode::DrawPolymarkerLong(points) => {
            state.coordinate_mode = mode;
            emission.primitives.extend(draw_markers(state, points));
        }
        Opcode::SetColorIndex(index) => state.select_color_index(*index),
        Opcode::SetColorRgba(color) => state.active_color = *color,
        Opcode::DrawText { position, text } => {
            state.coordinate_mode = mode;
            let at = state.resolve(*position);
            emission.push(Primitive::Text {
                at,
                text: text.clone(),
                style: state.style(),
            });
        }
        Opcode::Unsupported(_) => {}
        Opcode::Unrecognized(id) => emission.unrecognized = Some(id.clone()),
    }

    emission
}

fn draw_line<P: Into<LogicalPoint>>(state: &mut RenderState, start: P, end: P) -> Primitive {
    let from = state.resolve(start);
    let to = state.resolve(end);
    Primitive::Line {
        from,
        to,
        style: state.style(),
    }
}

fn draw_polyline<P>(state: &mut RenderState, points: &[P]) -> Option<Primitive>
where
    P: Copy + Into<LogicalPoint>,
{
    if points.is_empty() {
        return None;
    }
    Some(Primitive::Polyline {
        points: state.resolve_all(points),
        style: state.style(),
    })
}

fn draw_markers<P>(state: &mut RenderState, points: &[P]) -> Vec<Primitive>
where
    P: Copy + Into<LogicalPoint>,
{
    let style = state.style();
    points
        .iter()
        .map(|&p| Primitive::Marker {
            at: state.resolve(p),
            style,
        })
        .collect()
}

/// Counters for one interpreter pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    pub opcodes: usize,
    /// Draw opcodes seen, visible or not.
    pub draw_opcodes: usize,
    /// Primitives forwarded to the device.
    pub emitted: usize,
    /// Primitives dropped by the visibility gate.
    pub suppressed: usize,
    pub unsupported: usize,
}

/// W2D Interpreter - executes an opcode sequence against one device.
pub struct W2dInterpreter<'a, D: W2dDevice + ?Sized> {
    device: &'a mut D,
    state: RenderState,
    ignored: Vec<SmolStr>,
    diagnostics: Vec<Diagnostic>,
    stats: PassStats,
}

impl<'a, D: W2dDevice + ?Sized> W2dInterpreter<'a, D> {
    /// Create an interpreter with a fresh default state. `URL` markers are
    /// ignored until `with_ignored` says otherwise.
    pub fn new(device: &'a mut D) -> Self {
        Self::with_state(device, RenderState::new())
    }

    pub fn with_state(device: &'a mut D, state: RenderState) -> Self {
        Self {
            device,
            state,
            ignored: keywords::DEFAULT_IGNORED
                .iter()
                .copied()
                .map(SmolStr::new_static)
                .collect(),
            diagnostics: Vec::new(),
            stats: PassStats::default(),
        }
    }

    /// Replace the unrecognized opcode ids dropped without a diagnostic. The
    /// empty id is always dropped.
    pub fn with_ignored<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.ignored = ids.into_iter().map(Into::into).collect();
        self
    }

    pub const fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub const fn stats(&self) -> PassStats {
        self.stats
    }

    /// Consume the interpreter, returning its final state and diagnostics.
    pub fn finish(self) -> (RenderState, Vec<Diagnostic>, PassStats) {
        (self.state, self.diagnostics, self.stats)
    }

    /// Process every opcode in order.
    pub fn execute<'o, I>(&mut self, opcodes: I)
    where
        I: IntoIterator<Item = &'o Opcode>,
    {
        for opcode in opcodes {
            self.process(opcode);
        }
        debug!(
            opcodes = self.stats.opcodes,
            draw_opcodes = self.stats.draw_opcodes,
            emitted = self.stats.emitted,
            suppressed = self.stats.suppressed,
            diagnostics = self.diagnostics.len(),
            "interpreted opcode sequence"
        );
    }

    /// Process a single opcode.
    pub fn process(&mut self, opcode: &Opcode) {
        let index = self.stats.opcodes;
        self.stats.opcodes += 1;
        if opcode.is_drawing() {
            self.stats.draw_opcodes += 1;
        } else if let Opcode::Unsupported(_) = opcode {
            self.stats.unsupported += 1;
        }

        let emission = step(&mut self.state, opcode);
        if let Some(id) = emission.unrecognized {
            self.report_unrecognized(index, id);
        }
        self.emit(&emission.primitives);
    }

    fn report_unrecognized(&mut self, index: usize, id: SmolStr) {
        if id.is_empty() || self.ignored.contains(&id) {
            return;
        }
        warn!(opcode = %id, index, "unrecognized opcode");
        self.diagnostics.push(Diagnostic { index, opcode: id });
    }

    /// The visibility gate: the only path from a step to the device.
    fn emit(&mut self, primitives: &[Primitive]) {
        if !self.state.visible {
            self.stats.suppressed += primitives.len();
            return;
        }
        for primitive in primitives {
            primitive.replay(&mut *self.device);
        }
        self.stats.emitted += primitives.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::device::PrimitiveRecorder;
    use crate::model::color::{Palette, Rgba};
    use crate::opcode::CoordinateMode;
    use crate::utils::Point;

    #[test]
    fn test_step_set_current_point_is_absolute() {
        let mut state = RenderState::new();
        state.current_point = LogicalPoint::new(50, 50);
        let emission = step(&mut state, &Opcode::SetCurrentPoint(Point::new(10, 10)));
        assert!(emission.primitives.is_empty());
        assert_eq!(state.current_point, LogicalPoint::new(10, 10));
        assert_eq!(state.coordinate_mode, CoordinateMode::Absolute);
    }

    #[test]
    fn test_step_draw_resets_relative() {
        let mut state = RenderState::new();
        step(&mut state, &Opcode::SetCurrentPoint(Point::new(10, 10)));
        let emission = step(
            &mut state,
            &Opcode::DrawLine {
                start: Point::new(1, 0),
                end: Point::new(0, 1),
            },
        );
        assert_eq!(state.coordinate_mode, CoordinateMode::Relative);
        assert_eq!(
            emission.primitives[0],
            Primitive::Line {
                from: LogicalPoint::new(11, 10),
                to: LogicalPoint::new(11, 11),
                style: state.style(),
            }
        );
    }

    #[test]
    fn test_step_markers_chain() {
        let mut state = RenderState::new();
        let emission = step(
            &mut state,
            &Opcode::DrawPolymarker(vec![Point::new(2, 2), Point::new(3, -1)]),
        );
        let ats: Vec<_> = emission
            .primitives
            .iter()
            .map(|p| match p {
                Primitive::Marker { at, .. } => *at,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(ats, vec![LogicalPoint::new(2, 2), LogicalPoint::new(5, 1)]);
    }

    #[test]
    fn test_step_empty_polyline() {
        let mut state = RenderState::new();
        let emission = step(&mut state, &Opcode::DrawPolyline(Vec::new()));
        assert!(emission.primitives.is_empty());
        assert_eq!(state.current_point, LogicalPoint::new(0, 0));
    }

    #[test]
    fn test_style_is_snapshot_at_emission() {
        let mut recorder = PrimitiveRecorder::new();
        let mut interp = W2dInterpreter::new(&mut recorder);
        interp.execute(&[
            Opcode::SetColorRgba(Rgba::opaque(9, 9, 9)),
            Opcode::SetLineWeight(4),
            Opcode::DrawPolymarker(vec![Point::new(1, 1)]),
            Opcode::SetColorRgba(Rgba::opaque(1, 1, 1)),
        ]);
        let style = recorder.primitives()[0].style();
        assert_eq!(style.color, Rgba::opaque(9, 9, 9));
        assert_eq!(style.line_weight, 4);
    }

    #[test]
    fn test_invisible_still_moves_current_point() {
        let mut recorder = PrimitiveRecorder::new();
        let mut interp = W2dInterpreter::new(&mut recorder);
        interp.execute(&[
            Opcode::SetVisibility(false),
            Opcode::DrawPolyline(vec![Point::new(5, 5)]),
            Opcode::SetVisibility(true),
            Opcode::DrawLine {
                start: Point::new(0, 0),
                end: Point::new(1, 0),
            },
        ]);
        assert_eq!(interp.stats().suppressed, 1);
        assert_eq!(interp.stats().emitted, 1);
        assert_eq!(
            recorder.primitives(),
            &[Primitive::Line {
                from: LogicalPoint::new(5, 5),
                to: LogicalPoint::new(6, 5),
                style: Default::default(),
            }]
        );
    }

    #[test]
    fn test_diagnostics_filter() {
        let mut recorder = PrimitiveRecorder::new();
        let mut interp = W2dInterpreter::new(&mut recorder).with_ignored(["URL"]);
        interp.execute(&[
            Opcode::Unrecognized("".into()),
            Opcode::Unrecognized("URL".into()),
            Opcode::Unrecognized("Font".into()),
        ]);
        assert_eq!(
            interp.diagnostics(),
            &[Diagnostic {
                index: 2,
                opcode: "Font".into()
            }]
        );
    }

    #[test]
    fn test_custom_palette() {
        let palette = Palette::new(vec![Rgba::WHITE, Rgba::opaque(0, 128, 0)]);
        let mut recorder = PrimitiveRecorder::new();
        let mut interp =
            W2dInterpreter::with_state(&mut recorder, RenderState::with_palette(palette));
        interp.execute(&[Opcode::SetColorIndex(1), Opcode::SetColorIndex(3)]);
        assert_eq!(interp.state().active_color, Rgba::opaque(0, 128, 0));
    }
}
