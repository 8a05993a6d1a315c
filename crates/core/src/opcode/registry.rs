//! Opcode registry: leading id byte / keyword name to decoding routine.

use super::{Opcode, attribute, extended, geometry, ids, keywords, text};
use crate::error::Result;
use crate::parser::reader::OpcodeReader;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::fmt;
use std::sync::LazyLock;

/// Shared instance of `OpcodeRegistry::standard()`.
pub static STANDARD_REGISTRY: LazyLock<OpcodeRegistry> = LazyLock::new(OpcodeRegistry::standard);

/// Decodes the payload of a single-byte opcode. The id byte has already
/// been consumed; the factory must consume exactly the payload.
pub type OpcodeFactory = fn(&mut OpcodeReader<'_>, &OpcodeRegistry) -> Result<Opcode>;

/// Builds an opcode from the payload of a keyword-form `(Name payload)`
/// opcode. The payload excludes the name and the closing parenthesis and is
/// trimmed of surrounding whitespace.
pub type KeywordFactory = fn(&[u8]) -> Result<Opcode>;

/// Dispatch table for the decoder.
#[derive(Clone)]
pub struct OpcodeRegistry {
    single: [Option<OpcodeFactory>; 256],
    keywords: FxHashMap<SmolStr, KeywordFactory>,
}

impl OpcodeRegistry {
    /// An empty registry. Every id byte is unknown.
    pub fn new() -> Self {
        Self {
            single: [None; 256],
            keywords: FxHashMap::default(),
        }
    }

    /// Registry with every opcode this crate understands.
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register(ids::DRAW_LINE, geometry::read_draw_line);
        registry.register(ids::DRAW_LINE_LONG, geometry::read_draw_line_long);
        registry.register(ids::DRAW_POLYLINE, geometry::read_draw_polyline);
        registry.register(ids::DRAW_POLYLINE_LONG, geometry::read_draw_polyline_long);
        registry.register(ids::DRAW_POLYMARKER, geometry::read_draw_polymarker);
        registry.register(
            ids::DRAW_POLYMARKER_LONG,
            geometry::read_draw_polymarker_long,
        );
        registry.register(ids::DRAW_POLYTRIANGLE, geometry::read_draw_polytriangle);
        registry.register(
            ids::DRAW_POLYTRIANGLE_LONG,
            geometry::read_draw_polytriangle_long,
        );

        registry.register(ids::SET_CURRENT_POINT, attribute::read_set_current_point);
        registry.register(ids::SET_LINE_WEIGHT, attribute::read_set_line_weight);
        registry.register(ids::SET_COLOR_INDEX, attribute::read_set_color_index);
        registry.register(ids::SET_COLOR_RGBA, attribute::read_set_color_rgba);
        registry.register(ids::VISIBILITY_ON, attribute::read_visibility_on);
        registry.register(ids::VISIBILITY_OFF, attribute::read_visibility_off);

        registry.register(ids::DRAW_TEXT, text::read_draw_text);

        registry.register(ids::EXTENDED_ASCII, extended::read_extended_ascii);
        registry.register(ids::EXTENDED_BINARY, extended::read_extended_binary);

        registry.register_keyword(keywords::LINE_WEIGHT, attribute::parse_line_weight_keyword);

        registry
    }

    /// Register (or replace) the factory for a single-byte id.
    pub fn register(&mut self, id: u8, factory: OpcodeFactory) {
        self.single[usize::from(id)] = Some(factory);
    }

    /// Register (or replace) the factory for a keyword-form opcode.
    pub fn register_keyword(&mut self, name: &str, factory: KeywordFactory) {
        self.keywords.insert(SmolStr::new(name), factory);
    }

    pub fn factory(&self, id: u8) -> Option<OpcodeFactory> {
        self.single[usize::from(id)]
    }

    pub fn keyword(&self, name: &str) -> Option<KeywordFactory> {
        self.keywords.get(name).copied()
    }

    /// Registered single-byte ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|&id| self.single[usize::from(id)].is_some())
    }
}

impl Default for OpcodeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for OpcodeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.keywords.keys().map(SmolStr::as_str).collect();
        names.sort_unstable();
        f.debug_struct("OpcodeRegistry")
            .field("ids", &self.ids().collect::<Vec<_>>())
            .field("keywords", &names)
            .finish()
    }
}
