//! Document access: the host-editor contract and buffer types.
//!
//! The lexers and folders never touch text storage directly. Everything they
//! need from the host editor is expressed by the [Document] trait: random
//! byte and style reads, line geometry, per-line 32-bit state words, and
//! packed per-line fold levels. [StyledDocument] is the in-crate
//! implementation used by the CLI, the tests, and the fuzz targets;
//! [SourceBuffer] supplies the underlying text from a file mapping or from
//! memory.

pub mod source_buffer;
pub mod styled_document;

mod styled_document_unittests;

pub use source_buffer::SourceBuffer;
pub use styled_document::StyledDocument;

/// Base fold level for the outermost scope of a document.
pub const FOLD_LEVEL_BASE: u32 = 0x400;

/// Flag bit in the low half of a packed fold level marking a line that opens
/// a region.
pub const FOLD_LEVEL_HEADER_FLAG: u32 = 0x2000;

/// Mask extracting the numeric fold level from the low half of a packed
/// fold level.
pub const FOLD_LEVEL_NUMBER_MASK: u32 = 0x0fff;

/// Everything the engine requires from the host editor's document.
///
/// The packed values written through this trait are an external contract
/// (host tools may inspect line states for features like matching a brace
/// across a folded region): the low 16 bits of a fold level are the line's
/// own level, the high 16 bits the next line's level, and
/// [FOLD_LEVEL_HEADER_FLAG] in the low half marks fold headers. The line
/// state bit layouts are defined per language in `lexers::csharp` and
/// `lexers::basic`.
pub trait Document {
    /// Total length of the document in bytes.
    fn len(&self) -> usize;

    /// True for a zero-length document.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The byte at `pos`, or 0 past the end of the document.
    fn byte_at(&self, pos: usize) -> u8;

    /// The style previously assigned to the byte at `pos`, or 0 past the
    /// end.
    fn style_at(&self, pos: usize) -> u16;

    /// Assigns `style` to the `len` bytes starting at `start`.
    fn set_style_range(&mut self, start: usize, len: usize, style: u16);

    /// The index of the line containing byte `pos`. Positions past the end
    /// belong to the last line.
    fn line_of_pos(&self, pos: usize) -> usize;

    /// The start offset of `line`. Lines past the end of the document
    /// report the document length.
    fn line_start(&self, line: usize) -> usize;

    /// Number of lines in the document. A document always has at least one
    /// line.
    fn line_count(&self) -> usize;

    /// The packed 32-bit lexer state stored for `line`, or 0 if never set.
    fn line_state(&self, line: usize) -> u32;

    /// Stores the packed lexer state for `line`.
    fn set_line_state(&mut self, line: usize, state: u32);

    /// The packed fold level stored for `line`.
    fn fold_level(&self, line: usize) -> u32;

    /// Stores the packed fold level for `line`.
    fn set_fold_level(&mut self, line: usize, level: u32);
}
