//! Render pass parameters.

use crate::model::color::Palette;
use crate::model::state::RenderState;
use crate::opcode::keywords;
use smol_str::SmolStr;

/// Parameters for a render pass.
///
/// Controls the initial render state and which unrecognized opcodes are
/// expected in a stream and need no diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    /// Color table for `SetColorIndex`. None uses the standard color map.
    pub palette: Option<Palette>,

    /// Unrecognized opcode ids that are dropped silently. The empty id is
    /// always dropped.
    pub ignored_opcodes: Vec<SmolStr>,

    /// Visibility at the start of the pass.
    pub initial_visibility: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            palette: None,
            ignored_opcodes: keywords::DEFAULT_IGNORED
                .iter()
                .copied()
                .map(SmolStr::new_static)
                .collect(),
            initial_visibility: true,
        }
    }
}

impl RenderParams {
    /// Replace the color table.
    pub fn with_palette(mut self, palette: impl Into<Palette>) -> Self {
        self.palette = Some(palette.into());
        self
    }

    /// Add an opcode id to the silently ignored set.
    pub fn ignore_opcode(mut self, id: &str) -> Self {
        self.ignored_opcodes.push(SmolStr::new(id));
        self
    }

    /// Build the fresh state a pass starts from.
    pub fn new_state(&self) -> RenderState {
        let mut state = match &self.palette {
            Some(palette) => RenderState::with_palette(palette.clone()),
            None => RenderState::new(),
        };
        state.visible = self.initial_visibility;
        state
    }
}
