//! Byte classification predicates shared by the lexers.
//!
//! The engine works on raw bytes. Bytes at or above 0x80 are treated as
//! identifier characters, which keeps multi-byte UTF-8 sequences inside
//! identifier and string spans without decoding them.

/// Unchecked ASCII lowercasing; callers only compare the result against
/// lowercase letters.
pub const fn lower(ch: u8) -> u8 {
    ch | 0x20
}

pub const fn is_space(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t'..=b'\r')
}

pub const fn is_space_or_tab(ch: u8) -> bool {
    ch == b' ' || ch == b'\t'
}

pub const fn is_eol(ch: u8) -> bool {
    ch == b'\r' || ch == b'\n'
}

/// Printable ASCII other than space.
pub const fn is_graphic(ch: u8) -> bool {
    ch > b' ' && ch < 0x7f
}

pub const fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

pub const fn is_hex_digit(ch: u8) -> bool {
    ch.is_ascii_hexdigit()
}

pub const fn is_alpha(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
}

pub const fn is_upper_or_lower(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
}

/// ASCII-only identifier character, used for XML doc-comment tag names.
pub const fn is_ascii_identifier_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

pub const fn is_identifier_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch >= 0x80
}

pub const fn is_identifier_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_' || ch >= 0x80
}

pub const fn is_xml_tag_char(ch: u8) -> bool {
    is_ascii_identifier_char(ch) || ch == b'-' || ch == b':'
}

/// A number begins on a digit, or on `.` directly followed by a digit.
pub const fn is_number_start(ch: u8, ch_next: u8) -> bool {
    is_digit(ch) || (ch == b'.' && is_digit(ch_next))
}

const fn is_number_continue(ch_prev: u8, ch: u8, ch_next: u8) -> bool {
    ((ch == b'+' || ch == b'-') && (lower(ch_prev) == b'e' || lower(ch_prev) == b'p'))
        || (ch == b'.' && ch_next != b'.')
}

/// Whether `ch` continues a number span. Accepts hex/octal/binary digits and
/// type suffixes (identifier characters), digit separators, exponent signs
/// after `e`/`p`, and a decimal point not starting a `..` range.
pub const fn is_decimal_number(ch_prev: u8, ch: u8, ch_next: u8) -> bool {
    is_identifier_char(ch) || is_number_continue(ch_prev, ch, ch_next)
}

/// Custom format strings allow any character; only controls, quotes, and
/// braces terminate a composite format specifier.
pub const fn is_invalid_format_specifier(ch: u8) -> bool {
    ch < b' ' || ch == b'"' || ch == b'{' || ch == b'}'
}

// C# predicates.

/// `\u` / `\U` escapes may appear inside C# identifiers.
pub const fn is_unicode_escape(ch: u8, ch_next: u8) -> bool {
    ch == b'\\' && lower(ch_next) == b'u'
}

pub const fn is_csharp_identifier_start(ch: u8, ch_next: u8) -> bool {
    is_identifier_start(ch) || is_unicode_escape(ch, ch_next)
}

pub const fn is_csharp_identifier_char(ch: u8, ch_next: u8) -> bool {
    is_identifier_char(ch) || is_unicode_escape(ch, ch_next)
}

/// Bytes that may precede a jump label; 0 means no previous byte on record.
pub const fn is_jump_label_prev_char(ch: u8) -> bool {
    matches!(ch, 0 | b';' | b':' | b'{' | b'}')
}

/// After one of these, `[` reads as array indexing rather than an attribute.
pub const fn prefer_array_index(ch: u8) -> bool {
    ch == b')' || ch == b']' || is_identifier_char(ch)
}

/// Interface-name convention: leading `I` followed by another uppercase.
pub const fn is_interface_name(ch: u8, ch_next: u8) -> bool {
    ch == b'I' && ch_next.is_ascii_uppercase()
}

// Basic predicates.

/// Type characters that may suffix a Basic identifier or number:
/// `%` Integer, `&` Long, `^` LongLong, `@` Decimal/Currency, `!` Single,
/// `#` Double, `$` String.
pub const fn is_type_character(ch: u8) -> bool {
    matches!(ch, b'%' | b'&' | b'^' | b'@' | b'!' | b'#' | b'$')
}

/// Radix markers after `&`: hexadecimal, octal, binary.
pub const fn is_basic_number_prefix(ch: u8) -> bool {
    matches!(lower(ch), b'h' | b'o' | b'b')
}
