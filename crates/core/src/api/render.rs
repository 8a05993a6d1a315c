//! Render passes: decode, interpret, commit.
//!
//! A pass stages every primitive in a frame before the caller's device sees
//! anything. The frame is committed only after the whole stream decoded and
//! interpreted cleanly; on any error it is dropped and the device receives
//! no calls at all.

use rayon::prelude::*;
use tracing::{debug, trace};

use super::params::RenderParams;
use crate::error::Result;
use crate::interp::device::{Primitive, PrimitiveRecorder, W2dDevice};
use crate::interp::interpreter::{Diagnostic, PassStats, W2dInterpreter};
use crate::opcode::registry::{OpcodeRegistry, STANDARD_REGISTRY};
use crate::parser::decoder::decode_all_with;
use crate::utils::LogicalPoint;

/// Summary of a finished pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderReport {
    pub stats: PassStats,
    /// Non-fatal reports about skipped opcodes.
    pub diagnostics: Vec<Diagnostic>,
    /// Current point after the last opcode.
    pub current_point: LogicalPoint,
}

/// Primitives of one fully interpreted stream, not yet committed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub primitives: Vec<Primitive>,
    pub report: RenderReport,
}

impl Frame {
    /// Replay the frame into a device, bracketed by begin/end frame calls.
    pub fn commit<D: W2dDevice + ?Sized>(&self, device: &mut D) {
        trace!(primitives = self.primitives.len(), "committing frame");
        device.begin_frame();
        for primitive in &self.primitives {
            primitive.replay(&mut *device);
        }
        device.end_frame();
    }
}

/// Decode and interpret a stream into an uncommitted frame.
pub fn render_frame(data: &[u8], params: &RenderParams) -> Result<Frame> {
    render_frame_with(data, &STANDARD_REGISTRY, params)
}

/// Like `render_frame`, with a custom opcode registry.
pub fn render_frame_with(
    data: &[u8],
    registry: &OpcodeRegistry,
    params: &RenderParams,
) -> Result<Frame> {
    let opcodes = decode_all_with(data, registry).inspect_err(|e| {
        debug!(error = %e, bytes = data.len(), "decode failed, frame discarded");
    })?;

    let mut staging = PrimitiveRecorder::new();
    let mut interpreter = W2dInterpreter::with_state(&mut staging, params.new_state())
        .with_ignored(params.ignored_opcodes.iter().cloned());
    interpreter.execute(&opcodes);
    let (state, diagnostics, stats) = interpreter.finish();

    Ok(Frame {
        primitives: staging.into_primitives(),
        report: RenderReport {
            stats,
            diagnostics,
            current_point: state.current_point,
        },
    })
}

/// Render a stream into `device`. Nothing reaches the device unless the
/// whole pass succeeds.
pub fn render<D: W2dDevice + ?Sized>(
    data: &[u8],
    params: &RenderParams,
    device: &mut D,
) -> Result<RenderReport> {
    render_with(data, &STANDARD_REGISTRY, params, device)
}

/// Like `render`, with a custom opcode registry.
pub fn render_with<D: W2dDevice + ?Sized>(
    data: &[u8],
    registry: &OpcodeRegistry,
    params: &RenderParams,
    device: &mut D,
) -> Result<RenderReport> {
    let frame = render_frame_with(data, registry, params)?;
    frame.commit(device);
    Ok(frame.report)
}

/// Render independent streams in parallel, one state per stream.
///
/// Results are returned in input order.
pub fn render_frames<S>(streams: &[S], params: &RenderParams) -> Vec<Result<Frame>>
where
    S: AsRef<[u8]> + Sync,
{
    streams
        .par_iter()
        .map(|data| render_frame(data.as_ref(), params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingDevice {
        begins: usize,
        ends: usize,
        calls: usize,
    }

    impl W2dDevice for CountingDevice {
        fn begin_frame(&mut self) {
            self.begins += 1;
        }
        fn end_frame(&mut self) {
            self.ends += 1;
        }
        fn draw_line(&mut self, _: LogicalPoint, _: LogicalPoint, _: &crate::Style) {
            self.calls += 1;
        }
        fn draw_polyline(&mut self, _: &[LogicalPoint], _: &crate::Style) {
            self.calls += 1;
        }
        fn draw_marker(&mut self, _: LogicalPoint, _: &crate::Style) {
            self.calls += 1;
        }
        fn draw_text(&mut self, _: LogicalPoint, _: &str, _: &crate::Style) {
            self.calls += 1;
        }
    }

    #[test]
    fn test_commit_brackets_frame() {
        let mut device = CountingDevice::default();
        let data = [b'l', 1, 0, 1, 0, 2, 0, 2, 0];
        let report = render(&data, &RenderParams::default(), &mut device).unwrap();
        assert_eq!((device.begins, device.calls, device.ends), (1, 1, 1));
        assert_eq!(report.current_point, LogicalPoint::new(3, 3));
    }

    #[test]
    fn test_failed_pass_touches_nothing() {
        let mut device = CountingDevice::default();
        // a good line followed by a truncated one
        let data = [b'l', 1, 0, 1, 0, 2, 0, 2, 0, b'l', 1, 0];
        assert!(render(&data, &RenderParams::default(), &mut device).is_err());
        assert_eq!((device.begins, device.calls, device.ends), (0, 0, 0));
    }

    #[test]
    fn test_parallel_frames_keep_order() {
        let streams: Vec<Vec<u8>> = (1..=8u8)
            .map(|n| vec![b'O', n, 0, 0, 0, b'p', 1, 1, 0, 0, 0])
            .chain(std::iter::once(vec![0xff]))
            .collect();
        let frames = render_frames(&streams, &RenderParams::default());
        assert_eq!(frames.len(), 9);
        for (i, frame) in frames[..8].iter().enumerate() {
            let frame = frame.as_ref().unwrap();
            assert_eq!(
                frame.report.current_point,
                LogicalPoint::new(i as i32 + 2, 0)
            );
        }
        assert!(frames[8].is_err());
    }
}
