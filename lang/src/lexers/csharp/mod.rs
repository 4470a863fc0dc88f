//! Incremental lexer and folder for C#.
//!
//! The nine string variants share a single state-machine arm; the style
//! numbering below is chosen so that the variant predicates collapse to
//! single comparisons (see the assertions at the bottom of this file):
//! interpolated variants sit at plain variant + 1, the raw range is
//! contiguous, and the verbatim styles cap the string block.

mod folder;
mod lexer;

mod folder_unittests;

pub use folder::fold;
pub use lexer::lex;

use super::style_context::StyleCode;

/// Style codes assigned to document bytes.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Default = 0,
    CommentLine = 1,
    CommentBlock = 2,
    CommentLineDoc = 3,
    CommentBlockDoc = 4,
    CommentTagXml = 5,
    TaskMarker = 6,
    Character = 7,
    String = 8,
    InterpolatedString = 9,
    RawStringSl = 10,
    InterpolatedRawStringSl = 11,
    RawStringMl = 12,
    InterpolatedRawStringMl = 13,
    VerbatimString = 14,
    InterpolatedVerbatimString = 15,
    EscapeChar = 16,
    FormatSpecifier = 17,
    Placeholder = 18,
    Number = 19,
    Operator = 20,
    /// Operators inside an interpolation hole, including the braces that
    /// delimit it.
    Operator2 = 21,
    Identifier = 22,
    Keyword = 23,
    TypeKeyword = 24,
    Class = 25,
    Struct = 26,
    Interface = 27,
    Enumeration = 28,
    Record = 29,
    Attribute = 30,
    Constant = 31,
    Function = 32,
    FunctionDefinition = 33,
    Label = 34,
    Preprocessor = 35,
    PreprocessorWord = 36,
    PreprocessorMessage = 37,
}

impl Style {
    /// Styles that read as blank space when looking back for context:
    /// default, all comment styles, and task markers.
    pub(crate) const fn is_space_equiv(self) -> bool {
        (self as u16) <= (Style::TaskMarker as u16)
    }

    /// String states whose content processes backslash escapes.
    pub(crate) const fn has_escape_char(self) -> bool {
        (self as u16) <= (Style::InterpolatedString as u16)
    }

    pub(crate) const fn is_verbatim_string(self) -> bool {
        (self as u16) >= (Style::VerbatimString as u16)
    }

    /// Interpolated variants share the parity of [Style::InterpolatedString].
    pub(crate) const fn is_interpolated_string(self) -> bool {
        (self as u16) & 1 == (Style::InterpolatedString as u16) & 1
    }

    pub(crate) const fn is_single_line_string(self) -> bool {
        (self as u16) < (Style::RawStringMl as u16)
    }

    /// Everything outside the raw range: escapes and placeholders apply,
    /// and quotes need no delimiter-run matching.
    pub(crate) const fn is_plain_string(self) -> bool {
        (self as u16) < (Style::RawStringSl as u16)
            || (self as u16) > (Style::InterpolatedRawStringMl as u16)
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
            2 => Style::CommentBlock,
            3 => Style::CommentLineDoc,
            4 => Style::CommentBlockDoc,
            5 => Style::CommentTagXml,
            6 => Style::TaskMarker,
            7 => Style::Character,
            8 => Style::String,
            9 => Style::InterpolatedString,
            10 => Style::RawStringSl,
            11 => Style::InterpolatedRawStringSl,
            12 => Style::RawStringMl,
            13 => Style::InterpolatedRawStringMl,
            14 => Style::VerbatimString,
            15 => Style::InterpolatedVerbatimString,
            16 => Style::EscapeChar,
            17 => Style::FormatSpecifier,
            18 => Style::Placeholder,
            19 => Style::Number,
            20 => Style::Operator,
            21 => Style::Operator2,
            22 => Style::Identifier,
            23 => Style::Keyword,
            24 => Style::TypeKeyword,
            25 => Style::Class,
            26 => Style::Struct,
            27 => Style::Interface,
            28 => Style::Enumeration,
            29 => Style::Record,
            30 => Style::Attribute,
            31 => Style::Constant,
            32 => Style::Function,
            33 => Style::FunctionDefinition,
            34 => Style::Label,
            35 => Style::Preprocessor,
            36 => Style::PreprocessorWord,
            37 => Style::PreprocessorMessage,
            _ => Style::Default,
        }
    }
}

// The predicate encodings above only hold for this exact numbering.
const_assert!(Style::InterpolatedString as u16 == Style::String as u16 + 1);
const_assert!(Style::InterpolatedRawStringSl as u16 == Style::RawStringSl as u16 + 1);
const_assert!(Style::InterpolatedRawStringMl as u16 == Style::RawStringMl as u16 + 1);
const_assert!(Style::InterpolatedVerbatimString as u16 == Style::VerbatimString as u16 + 1);
const_assert!(
    Style::CommentLineDoc as u16 - Style::CommentLine as u16
        == Style::CommentBlockDoc as u16 - Style::CommentBlock as u16
);
const_assert!(Style::RawStringSl as u16 > Style::InterpolatedString as u16);
const_assert!(Style::VerbatimString as u16 > Style::InterpolatedRawStringMl as u16);

/// Per-line lexer state, LSB to MSB: the three flag bits below, one reserved
/// bit, 8 bits of raw-string delimiter count, 8 bits of interpolator count,
/// and 12 bits of paren/bracket depth outside interpolation. The layout is
/// an external contract.
pub const LINE_STATE_LINE_COMMENT: u32 = 1;
pub const LINE_STATE_USING: u32 = 1 << 1;
pub const LINE_STATE_INTERPOLATION: u32 = 1 << 2;

pub const fn line_state_delimiter_count(state: u32) -> u32 {
    (state >> 4) & 0xff
}

pub const fn line_state_interpolator_count(state: u32) -> u32 {
    (state >> 12) & 0xff
}

pub const fn line_state_paren_depth(state: u32) -> u32 {
    state >> 20
}

pub(crate) const fn pack_line_state(
    line_type: u32,
    interpolation: bool,
    delimiter_count: usize,
    interpolator_count: usize,
    paren_depth: u32,
) -> u32 {
    line_type
        | if interpolation { LINE_STATE_INTERPOLATION } else { 0 }
        | ((delimiter_count as u32 & 0xff) << 4)
        | ((interpolator_count as u32 & 0xff) << 12)
        | ((paren_depth & 0xfff) << 20)
}
