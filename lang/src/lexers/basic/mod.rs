//! Incremental lexer and folder for the Basic family: VB.NET, classic
//! VB/VBA, and VBScript.
//!
//! Folding in Basic is keyword-driven (`Sub … End Sub`, `If … End If`)
//! rather than brace-driven, so the folder re-reads styled keyword spans and
//! matches openers against `End`-style closers with one-line lookahead.

mod folder;
mod lexer;

mod folder_unittests;
mod lexer_unittests;

pub use folder::fold;
pub use lexer::lex;

use super::style_context::StyleCode;

/// Which Basic the engine is lexing. Selected by a single host integer
/// property: 0 modern .NET, 1 classic, 2 scripting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dialect {
    /// VB.NET: interpolated and multi-line strings, If-operator.
    #[default]
    Modern = 0,
    /// VB6/VBA: type characters, `Type` blocks, comment continuation.
    Classic = 1,
    /// VBScript: no type characters, no preprocessor identifiers.
    Script = 2,
}

impl Dialect {
    /// Maps the host's integer property; out-of-range values read as modern.
    pub fn from_property(value: i32) -> Dialect {
        match value {
            1 => Dialect::Classic,
            2 => Dialect::Script,
            _ => Dialect::Modern,
        }
    }
}

/// Style codes assigned to document bytes.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Default = 0,
    CommentLine = 1,
    TaskMarker = 2,
    LineContinuation = 3,
    Number = 4,
    Date = 5,
    FileNumber = 6,
    String = 7,
    InterpolatedString = 8,
    FormatSpecifier = 9,
    Operator = 10,
    /// Operators inside an interpolation hole, including the braces that
    /// delimit it.
    Operator2 = 11,
    Identifier = 12,
    Keyword = 13,
    TypeKeyword = 14,
    /// A keyword outside statement position: after `.`, carrying a type
    /// suffix, or the VB.NET If-operator.
    ContextKeyword = 15,
    Class = 16,
    Interface = 17,
    Enumeration = 18,
    Attribute = 19,
    Constant = 20,
    BasicFunction = 21,
    FunctionDefinition = 22,
    Label = 23,
    Preprocessor = 24,
    PreprocessorWord = 25,
}

impl Style {
    /// Styles that read as blank space when looking back for context.
    pub(crate) const fn is_space_equiv(self) -> bool {
        (self as u16) <= (Style::LineContinuation as u16)
    }
}

impl StyleCode for Style {
    fn bits(self) -> u16 {
        self as u16
    }

    fn from_bits(bits: u16) -> Style {
        match bits {
            0 => Style::Default,
            1 => Style::CommentLine,
            2 => Style::TaskMarker,
            3 => Style::LineContinuation,
            4 => Style::Number,
            5 => Style::Date,
            6 => Style::FileNumber,
            7 => Style::String,
            8 => Style::InterpolatedString,
            9 => Style::FormatSpecifier,
            10 => Style::Operator,
            11 => Style::Operator2,
            12 => Style::Identifier,
            13 => Style::Keyword,
            14 => Style::TypeKeyword,
            15 => Style::ContextKeyword,
            16 => Style::Class,
            17 => Style::Interface,
            18 => Style::Enumeration,
            19 => Style::Attribute,
            20 => Style::Constant,
            21 => Style::BasicFunction,
            22 => Style::FunctionDefinition,
            23 => Style::Label,
            24 => Style::Preprocessor,
            25 => Style::PreprocessorWord,
            _ => Style::Default,
        }
    }
}

// Lookback treats everything up to the continuation style as blank space.
const_assert!((Style::CommentLine as u16) < (Style::LineContinuation as u16));
const_assert!((Style::TaskMarker as u16) < (Style::LineContinuation as u16));

/// Per-line lexer state, LSB to MSB: two bits of line-type, the VB6
/// Type-block bit, the continuation bit, the interpolation bit, and the
/// paren depth in the top half. The layout is an external contract.
pub const LINE_TYPE_COMMENT: u32 = 1;
pub const LINE_TYPE_DIM: u32 = 2;
pub const LINE_TYPE_CONST: u32 = 3;
pub const LINE_TYPE_VB6_TYPE: u32 = 4;
pub const LINE_STATE_CONTINUATION: u32 = 1 << 3;
pub const LINE_STATE_INTERPOLATION: u32 = 1 << 4;

pub const fn line_state_line_type(state: u32) -> u32 {
    state & 3
}

pub const fn line_state_paren_depth(state: u32) -> u32 {
    state >> 16
}
