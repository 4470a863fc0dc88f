//! The C# lexer state machine.

use crate::document::Document;

use super::super::chars::{
    is_alpha, is_csharp_identifier_char, is_csharp_identifier_start, is_decimal_number, is_digit,
    is_eol, is_graphic, is_hex_digit, is_identifier_char, is_identifier_start, is_interface_name,
    is_invalid_format_specifier, is_jump_label_prev_char, is_number_start, is_space,
    is_space_or_tab, is_xml_tag_char, lower, prefer_array_index,
};
use super::super::style_context::{StyleCode, StyleContext};
use super::super::support::{
    backtrack_to_start, highlight_task_marker, lookback_non_white, matched_delimiter_count,
    next_line_char,
};
use super::super::words::CSharpWordLists;
use super::{pack_line_state, Style, LINE_STATE_INTERPOLATION, LINE_STATE_LINE_COMMENT,
            LINE_STATE_USING};

/// Tracks an escape sequence, and doubles as the stash for the state to
/// restore after an XML tag, format specifier, or placeholder.
struct EscapeSequence {
    outer_state: Style,
    digits_left: i32,
}

impl EscapeSequence {
    fn new() -> EscapeSequence {
        EscapeSequence { outer_state: Style::Default, digits_left: 0 }
    }

    /// Starts an escape at a backslash; any single character escapes, `\x`
    /// and `\u` take up to four hex digits, `\U` up to eight.
    fn reset(&mut self, state: Style, ch_next: u8) -> bool {
        if is_eol(ch_next) {
            return false;
        }
        self.outer_state = state;
        self.digits_left = 1;
        if ch_next == b'x' || ch_next == b'u' {
            self.digits_left = 5;
        } else if ch_next == b'U' {
            self.digits_left = 9;
        }
        true
    }

    fn at_escape_end(&mut self, ch: u8) -> bool {
        self.digits_left -= 1;
        self.digits_left <= 0 || !is_hex_digit(ch)
    }
}

/// One suspended string while an interpolation hole is open.
struct InterpolatedStringState {
    state: Style,
    paren_count: i32,
    delimiter_count: usize,
    interpolator_count: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PreprocessorKind {
    None,
    Init,
    Pragma,
    Message,
    Other,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum DocTagState {
    None,
    XmlOpen,
    XmlClose,
}

/// Classification hint set when a keyword is recognized and consumed when
/// the following identifier is classified.
#[derive(Clone, Copy, PartialEq, Eq)]
enum KeywordType {
    None,
    Attribute,
    Class,
    Interface,
    Struct,
    Enum,
    Record,
    Label,
    Return,
    While,
}

impl KeywordType {
    /// The style forced onto the next identifier; hints like `return` and
    /// `while` only suppress heuristics and have no style of their own.
    fn target_style(self) -> Option<Style> {
        match self {
            KeywordType::Attribute => Some(Style::Attribute),
            KeywordType::Class => Some(Style::Class),
            KeywordType::Interface => Some(Style::Interface),
            KeywordType::Struct => Some(Style::Struct),
            KeywordType::Enum => Some(Style::Enumeration),
            KeywordType::Record => Some(Style::Record),
            KeywordType::Label => Some(Style::Label),
            _ => None,
        }
    }
}

fn str_eq(s: &[u8], word: &[u8]) -> bool {
    s == word
}

fn str_eq_any(s: &[u8], words: &[&[u8]]) -> bool {
    words.iter().any(|&word| s == word)
}

fn is_interpolated_string_end(sc: &StyleContext<Style>) -> bool {
    sc.ch == b'}'
        || sc.ch == b':'
        || (sc.ch == b','
            && (is_digit(sc.ch_next) || (sc.ch_next == b'-' && is_digit(sc.get_relative(2)))))
}

/// Scans ahead from a placeholder for `[,[-]digits][:format]}` and returns
/// the specifier length, or 0 when the tail is not a valid specifier.
fn check_format_specifier(sc: &StyleContext<Style>) -> usize {
    let doc = sc.doc();
    let mut pos = sc.pos();
    let mut ch = doc.byte_at(pos);
    // [,alignment]
    if ch == b',' {
        pos += 1;
        ch = doc.byte_at(pos);
        if ch == b'-' {
            pos += 1;
            ch = doc.byte_at(pos);
        }
        while is_digit(ch) {
            pos += 1;
            ch = doc.byte_at(pos);
        }
    }
    // [:formatString], at most 32 characters
    if ch == b':' {
        pos += 1;
        ch = doc.byte_at(pos);
        let end_pos = pos + 32;
        while pos < end_pos && !is_invalid_format_specifier(ch) {
            pos += 1;
            ch = doc.byte_at(pos);
        }
    }
    if ch == b'}' {
        pos - sc.pos()
    } else {
        0
    }
}

/// Styles `[start_pos, start_pos + length)` and records per-line resume
/// state. `init_style` is the style at `start_pos` from the previous batch;
/// pass [Style::Default] for a scan from the top.
pub fn lex(
    doc: &mut dyn Document,
    words: &CSharpWordLists,
    start_pos: usize,
    length: usize,
    init_style: Style,
) {
    let mut line_state_line_type = 0u32;

    let mut kw_type = KeywordType::None;
    let mut ch_before_identifier = 0u8;
    let mut paren_count = 0u32;
    let mut string_delimiter_count = 0usize;
    let mut string_interpolator_count = 0usize;
    let mut pp_kind = PreprocessorKind::None;

    let mut visible_chars = 0usize;
    let mut ch_before = 0u8;
    let mut ch_prev_non_white = 0u8;
    let mut doc_tag_state = DocTagState::None;
    let mut esc_seq = EscapeSequence::new();
    let mut close_brace = false;

    let mut nested_state: Vec<InterpolatedStringState> = Vec::new();

    // An expression hole may span lines; restart from the line that opened
    // the interpolated string so the suspended-string stack is rebuilt.
    let (start_pos, length, init_style) = if start_pos != 0 {
        let (start, len, style) =
            backtrack_to_start(doc, LINE_STATE_INTERPOLATION, start_pos, length, init_style.bits());
        (start, len, Style::from_bits(style))
    } else {
        (start_pos, length, init_style)
    };

    let mut sc = StyleContext::new(doc, start_pos, length, init_style);
    if sc.current_line > 0 {
        let line_state = sc.doc().line_state(sc.current_line - 1);
        string_delimiter_count = super::line_state_delimiter_count(line_state) as usize;
        string_interpolator_count = super::line_state_interpolator_count(line_state) as usize;
        paren_count = super::line_state_paren_depth(line_state);
    }
    if start_pos == 0 {
        if sc.match2(b'#', b'!') {
            // Shell shebang at the beginning of the file.
            sc.set_state(Style::CommentLine);
            sc.forward();
            line_state_line_type = LINE_STATE_LINE_COMMENT;
        }
    } else if init_style.is_space_equiv() {
        let (ch, _) = lookback_non_white(sc.doc(), start_pos, Style::TaskMarker.bits());
        ch_prev_non_white = ch;
    }

    'doc: while sc.more() {
        match sc.state {
            Style::Operator | Style::Operator2 => {
                sc.set_state(Style::Default);
            }

            Style::Number => {
                if !is_decimal_number(sc.ch_prev, sc.ch, sc.ch_next) {
                    sc.set_state(Style::Default);
                }
            }

            Style::Identifier | Style::Preprocessor => {
                if !is_csharp_identifier_char(sc.ch, sc.ch_next) {
                    let mut buf = [0u8; 127];
                    let s = sc.current_text(&mut buf);
                    match pp_kind {
                        PreprocessorKind::None => {
                            if s.first() != Some(&b'@') {
                                if words.keywords.contains(s) {
                                    sc.change_state(Style::Keyword);
                                    if str_eq(s, b"using") {
                                        if visible_chars == sc.length_current() {
                                            line_state_line_type = LINE_STATE_USING;
                                        }
                                    } else if str_eq_any(s, &[b"class", b"new", b"as", b"is"]) {
                                        kw_type = KeywordType::Class;
                                    } else if str_eq(s, b"struct") {
                                        kw_type = KeywordType::Struct;
                                    } else if str_eq(s, b"interface") {
                                        kw_type = KeywordType::Interface;
                                    } else if str_eq(s, b"enum") {
                                        kw_type = KeywordType::Enum;
                                    } else if str_eq(s, b"record") {
                                        kw_type = KeywordType::Record;
                                    } else if str_eq(s, b"goto") {
                                        kw_type = KeywordType::Label;
                                    } else if str_eq_any(s, &[b"return", b"await", b"yield"]) {
                                        kw_type = KeywordType::Return;
                                    } else if str_eq_any(s, &[b"if", b"while"]) {
                                        // Avoids reading the following code as a
                                        // type cast: if (identifier) expression.
                                        kw_type = KeywordType::While;
                                    }
                                    if kw_type.target_style().is_some() {
                                        let ch_next = sc.get_doc_next_char(false);
                                        if !is_identifier_start(ch_next) {
                                            kw_type = KeywordType::None;
                                        }
                                    }
                                } else if words.types.contains(s) {
                                    sc.change_state(Style::TypeKeyword);
                                } else if words.classes.contains(s) {
                                    sc.change_state(Style::Class);
                                } else if words.structs.contains(s) {
                                    sc.change_state(Style::Struct);
                                } else if words.interfaces.contains(s) {
                                    sc.change_state(Style::Interface);
                                } else if words.enumerations.contains(s) {
                                    sc.change_state(Style::Enumeration);
                                } else if words.attributes.contains(s) {
                                    sc.change_state(Style::Attribute);
                                } else if words.constants.contains(s) {
                                    sc.change_state(Style::Constant);
                                }
                            }
                        }

                        PreprocessorKind::Init => {
                            if sc.state == Style::Identifier {
                                sc.change_state(Style::Preprocessor);
                            }
                            if sc.length_current() > 1 {
                                let word =
                                    if s.first() == Some(&b'#') { &s[1..] } else { s };
                                pp_kind = if str_eq_any(word, &[b"pragma", b"line", b"nullable"]) {
                                    PreprocessorKind::Pragma
                                } else if str_eq_any(
                                    word,
                                    &[b"error", b"warning", b"region", b"endregion"],
                                ) {
                                    PreprocessorKind::Message
                                } else {
                                    PreprocessorKind::Other
                                };
                            } else if !is_space_or_tab(sc.ch) {
                                pp_kind = PreprocessorKind::Other;
                            }
                        }

                        PreprocessorKind::Pragma => {
                            pp_kind = PreprocessorKind::Other;
                            sc.change_state(Style::PreprocessorWord);
                        }

                        _ => {}
                    }

                    if pp_kind == PreprocessorKind::None && sc.state == Style::Identifier {
                        if sc.ch == b':' {
                            if paren_count == 0 && is_jump_label_prev_char(ch_before) {
                                sc.change_state(Style::Label);
                            } else if ch_before == b'[' {
                                // [target: Attribute]
                                sc.change_state(Style::Attribute);
                                kw_type = KeywordType::Attribute;
                            }
                        } else if sc.ch != b'.' {
                            if let Some(style) = kw_type.target_style() {
                                sc.change_state(style);
                            } else {
                                let ch_next =
                                    sc.get_doc_next_char(sc.ch == b'?' || sc.ch == b')');
                                if sc.ch == b')' {
                                    if ch_before_identifier == b'('
                                        && (ch_next == b'('
                                            || (kw_type != KeywordType::While
                                                && is_identifier_char(ch_next)))
                                    {
                                        // (type)(expression)
                                        // (type)expression, (type)++identifier
                                        sc.change_state(Style::Class);
                                    }
                                } else if ch_next == b'(' {
                                    if kw_type != KeywordType::Return
                                        && (is_identifier_char(ch_before) || ch_before == b']')
                                    {
                                        // type method(), type[] method(),
                                        // type<type> method()
                                        sc.change_state(Style::FunctionDefinition);
                                    } else {
                                        sc.change_state(Style::Function);
                                    }
                                } else if (sc.ch == b'['
                                    && (sc.ch_next == b']' || sc.ch_next == b','))
                                    || (ch_before_identifier == b'<'
                                        && (ch_next == b'>' || ch_next == b'<'))
                                    || is_identifier_start(ch_next)
                                {
                                    // type[] identifier, type<type, type>,
                                    // class type: type, interface {},
                                    // type identifier
                                    let first = s.first().copied().unwrap_or(0);
                                    let second = s.get(1).copied().unwrap_or(0);
                                    sc.change_state(if is_interface_name(first, second) {
                                        Style::Interface
                                    } else {
                                        Style::Class
                                    });
                                }
                            }
                        }
                    }
                    if sc.state != Style::Keyword && sc.state != Style::Attribute && sc.ch != b'.'
                    {
                        kw_type = KeywordType::None;
                    }
                    sc.set_state(Style::Default);
                }
            }

            Style::PreprocessorMessage => {
                if sc.at_line_start {
                    sc.set_state(Style::Default);
                }
            }

            Style::CommentLine
            | Style::CommentLineDoc
            | Style::CommentBlock
            | Style::CommentBlockDoc => {
                if sc.at_line_start
                    && matches!(sc.state, Style::CommentLine | Style::CommentLineDoc)
                {
                    sc.set_state(Style::Default);
                } else {
                    if doc_tag_state != DocTagState::None
                        && (sc.match2(b'/', b'>') || sc.ch == b'>')
                    {
                        doc_tag_state = DocTagState::None;
                        sc.set_state(Style::CommentTagXml);
                        sc.advance(if sc.ch == b'/' { 2 } else { 1 });
                        sc.set_state(esc_seq.outer_state);
                    }
                    if matches!(sc.state, Style::CommentBlock | Style::CommentBlockDoc)
                        && sc.match2(b'*', b'/')
                    {
                        sc.forward();
                        sc.forward_set_state(Style::Default);
                    } else if doc_tag_state == DocTagState::None {
                        if sc.ch == b'<'
                            && matches!(sc.state, Style::CommentLineDoc | Style::CommentBlockDoc)
                        {
                            if is_alpha(sc.ch_next) {
                                doc_tag_state = DocTagState::XmlOpen;
                                esc_seq.outer_state = sc.state;
                                sc.set_state(Style::CommentTagXml);
                            } else if sc.ch_next == b'/' && is_alpha(sc.get_relative(2)) {
                                doc_tag_state = DocTagState::XmlClose;
                                esc_seq.outer_state = sc.state;
                                sc.set_state(Style::CommentTagXml);
                                sc.forward();
                            }
                        } else if highlight_task_marker(&mut sc, &words.task_markers, Style::TaskMarker)
                        {
                            continue 'doc;
                        }
                    }
                }
            }

            Style::CommentTagXml => {
                if !is_xml_tag_char(sc.ch) {
                    sc.set_state(esc_seq.outer_state);
                    continue 'doc;
                }
            }

            Style::Character
            | Style::String
            | Style::InterpolatedString
            | Style::VerbatimString
            | Style::InterpolatedVerbatimString
            | Style::RawStringSl
            | Style::InterpolatedRawStringSl
            | Style::RawStringMl
            | Style::InterpolatedRawStringMl => {
                if sc.at_line_start && sc.state.is_single_line_string() && !close_brace {
                    // Unterminated single-line string; the close-brace latch
                    // keeps a string alive when a hole closed at line end.
                    sc.set_state(Style::Default);
                } else if sc.ch == b'\\' {
                    if sc.state.has_escape_char() && esc_seq.reset(sc.state, sc.ch_next) {
                        sc.set_state(Style::EscapeChar);
                        sc.forward();
                    }
                } else if sc.ch == b'\'' && sc.state == Style::Character {
                    sc.forward_set_state(Style::Default);
                } else if sc.state != Style::Character {
                    if sc.ch == b'"' {
                        if sc.ch_next == b'"' && sc.state.is_verbatim_string() {
                            // "" is the literal-quote escape.
                            esc_seq.outer_state = sc.state;
                            esc_seq.digits_left = 1;
                            sc.set_state(Style::EscapeChar);
                            sc.forward();
                        } else {
                            sc.forward();
                            let mut handled = sc.state.is_plain_string();
                            if !handled
                                && sc.match2(b'"', b'"')
                                && (visible_chars == 0 || sc.state.is_single_line_string())
                            {
                                // Raw strings close only on a run matching
                                // the opening delimiter count.
                                let delimiter_count =
                                    matched_delimiter_count(sc.doc(), sc.pos() + 1, b'"') + 2;
                                if delimiter_count == string_delimiter_count {
                                    handled = true;
                                    string_delimiter_count = 0;
                                    string_interpolator_count = 0;
                                    sc.advance(delimiter_count - 1);
                                }
                            }
                            if handled {
                                if sc.ch_next == b'8' && lower(sc.ch) == b'u' {
                                    // C# 11 UTF-8 string literal suffix.
                                    sc.advance(2);
                                }
                                sc.set_state(Style::Default);
                                if nested_state
                                    .last()
                                    .is_some_and(|top| top.state == sc.state)
                                {
                                    nested_state.pop();
                                }
                            } else {
                                continue 'doc;
                            }
                        }
                    } else if sc.ch == b'{' {
                        if sc.ch_next == b'{' && sc.state.is_plain_string() {
                            esc_seq.outer_state = sc.state;
                            esc_seq.digits_left = 1;
                            sc.set_state(Style::EscapeChar);
                            sc.forward();
                        } else {
                            let mut opened = false;
                            if sc.state.is_interpolated_string() {
                                let interpolator_count =
                                    matched_delimiter_count(sc.doc(), sc.pos(), b'{');
                                if sc.state.is_plain_string()
                                    || interpolator_count >= string_interpolator_count
                                {
                                    nested_state.push(InterpolatedStringState {
                                        state: sc.state,
                                        paren_count: 0,
                                        delimiter_count: string_delimiter_count,
                                        interpolator_count: string_interpolator_count,
                                    });
                                    // Leading braces beyond the interpolator
                                    // count are string content.
                                    sc.advance(
                                        interpolator_count
                                            .saturating_sub(string_interpolator_count),
                                    );
                                    sc.set_state(Style::Operator2);
                                    sc.advance(string_interpolator_count.saturating_sub(1));
                                    sc.forward_set_state(Style::Default);
                                    string_delimiter_count = 0;
                                    string_interpolator_count = 0;
                                    opened = true;
                                }
                            }
                            if !opened
                                && (is_identifier_char(sc.ch_next)
                                    || sc.ch_next == b'@'
                                    || sc.ch_next == b'$')
                            {
                                // Composite format {index,alignment:format},
                                // or template placeholders {@id} {$id} {id}.
                                esc_seq.outer_state = sc.state;
                                sc.set_state(Style::Placeholder);
                                if sc.ch_next == b'@' || sc.ch_next == b'$' {
                                    sc.forward();
                                }
                            }
                        }
                    } else if sc.ch == b'}' {
                        close_brace = false;
                        if sc.state.is_interpolated_string() {
                            let interpolator_count = if sc.state.is_plain_string() {
                                1
                            } else {
                                matched_delimiter_count(sc.doc(), sc.pos(), b'}')
                            };
                            let interpolating = !nested_state.is_empty()
                                && interpolator_count >= string_interpolator_count;
                            if interpolating {
                                nested_state.pop();
                            }
                            if interpolating
                                || (sc.ch_next != b'}' && sc.state.is_plain_string())
                            {
                                let state = sc.state;
                                sc.set_state(Style::Operator2);
                                sc.advance(string_interpolator_count.saturating_sub(1));
                                sc.forward_set_state(state);
                                sc.advance(
                                    interpolator_count.saturating_sub(string_interpolator_count),
                                );
                                continue 'doc;
                            }
                        }
                        if sc.ch_next == b'}' && sc.state.is_plain_string() {
                            esc_seq.outer_state = sc.state;
                            esc_seq.digits_left = 1;
                            sc.set_state(Style::EscapeChar);
                            sc.forward();
                        }
                    }
                }
            }

            Style::FormatSpecifier => {
                if is_invalid_format_specifier(sc.ch) {
                    sc.set_state(esc_seq.outer_state);
                    continue 'doc;
                }
            }

            Style::Placeholder => {
                if !is_identifier_char(sc.ch) {
                    if sc.ch != b'}' {
                        let length = check_format_specifier(&sc);
                        if length == 0 {
                            // Not a specifier after all: restyle the whole
                            // span as string content.
                            sc.rewind();
                            sc.change_state(esc_seq.outer_state);
                        } else {
                            sc.set_state(Style::FormatSpecifier);
                            sc.advance(length);
                            sc.set_state(Style::Placeholder);
                        }
                    }
                    sc.forward_set_state(esc_seq.outer_state);
                    continue 'doc;
                }
            }

            Style::EscapeChar => {
                if esc_seq.at_escape_end(sc.ch) {
                    sc.set_state(esc_seq.outer_state);
                    continue 'doc;
                }
            }

            _ => {}
        }

        if sc.state == Style::Default {
            if pp_kind == PreprocessorKind::Message && !is_space(sc.ch) {
                sc.set_state(Style::PreprocessorMessage);
            } else if sc.ch == b'/' && (sc.ch_next == b'/' || sc.ch_next == b'*') {
                doc_tag_state = DocTagState::None;
                let ch_next = sc.ch_next;
                if ch_next == b'/' && visible_chars == 0 {
                    line_state_line_type = LINE_STATE_LINE_COMMENT;
                }
                sc.set_state(if ch_next == b'/' {
                    Style::CommentLine
                } else {
                    Style::CommentBlock
                });
                sc.advance(2);
                if sc.ch == ch_next && sc.ch_next != ch_next {
                    // /// and /** open doc comments; //// and /*** do not.
                    sc.change_state(if sc.state == Style::CommentLine {
                        Style::CommentLineDoc
                    } else {
                        Style::CommentBlockDoc
                    });
                }
                continue 'doc;
            } else if sc.ch == b'"' || sc.ch == b'$' || sc.ch == b'@' {
                let ch_after2 = sc.get_relative(2);
                if ch_after2 == b'"' && (sc.match2(b'$', b'@') || sc.match2(b'@', b'$')) {
                    // C# 8 verbatim interpolated string: @$" or $@".
                    string_delimiter_count = 0;
                    string_interpolator_count = 1;
                    sc.set_state(Style::InterpolatedVerbatimString);
                    sc.advance(2);
                } else if sc.ch == b'@' {
                    let mut state = Style::Default;
                    if sc.ch_next == b'"' {
                        state = Style::VerbatimString;
                        string_delimiter_count = 0;
                        string_interpolator_count = 0;
                    } else if is_csharp_identifier_start(sc.ch_next, ch_after2) {
                        state = Style::Identifier;
                        ch_before = ch_prev_non_white;
                        if ch_prev_non_white != b'.' {
                            ch_before_identifier = ch_prev_non_white;
                        }
                    }
                    if state != Style::Default {
                        sc.set_state(state);
                        sc.forward();
                    }
                } else {
                    let mut interpolator_count = 0usize;
                    let mut pos = sc.pos();
                    let mut ch_next = sc.ch;
                    if ch_next == b'$' {
                        interpolator_count = 1;
                        if sc.ch_next == b'"' {
                            ch_next = b'"';
                            pos += 1;
                        } else if sc.ch_next == b'$' {
                            interpolator_count +=
                                matched_delimiter_count(sc.doc(), pos + 1, b'$');
                            pos += interpolator_count;
                            ch_next = sc.doc().byte_at(pos);
                        }
                    }
                    if ch_next == b'"' {
                        let mut delimiter_count = matched_delimiter_count(sc.doc(), pos, b'"');
                        let state;
                        if delimiter_count >= 3 {
                            // Raw string; multi-line when the delimiter run
                            // ends the line.
                            let after = next_line_char(
                                sc.doc(),
                                pos + delimiter_count,
                                sc.line_start_next(),
                            );
                            string_delimiter_count = delimiter_count;
                            string_interpolator_count = interpolator_count;
                            let base =
                                if after == 0 { Style::RawStringMl } else { Style::RawStringSl };
                            state = if interpolator_count != 0 {
                                delimiter_count += interpolator_count;
                                Style::from_bits(base.bits() + 1)
                            } else {
                                base
                            };
                        } else {
                            delimiter_count = 1 + interpolator_count;
                            string_delimiter_count = 0;
                            string_interpolator_count = interpolator_count;
                            state = Style::from_bits(Style::String.bits() + interpolator_count as u16);
                        }
                        sc.set_state(state);
                        sc.advance(delimiter_count - 1);
                    }
                }
            } else if sc.ch == b'\'' {
                sc.set_state(Style::Character);
            } else if visible_chars == 0 && sc.ch == b'#' {
                pp_kind = PreprocessorKind::Init;
                sc.set_state(Style::Preprocessor);
            } else if is_number_start(sc.ch, sc.ch_next) {
                sc.set_state(Style::Number);
            } else if is_csharp_identifier_start(sc.ch, sc.ch_next) {
                ch_before = ch_prev_non_white;
                if ch_prev_non_white != b'.' {
                    ch_before_identifier = ch_prev_non_white;
                }
                sc.set_state(Style::Identifier);
            } else if is_graphic(sc.ch) && sc.ch != b'\\' {
                let interpolating = !nested_state.is_empty();
                sc.set_state(if interpolating { Style::Operator2 } else { Style::Operator });
                if sc.ch == b'(' || sc.ch == b'[' {
                    if let Some(top) = nested_state.last_mut() {
                        top.paren_count += 1;
                    } else {
                        paren_count += 1;
                    }
                } else if sc.ch == b')' || sc.ch == b']' {
                    if let Some(top) = nested_state.last_mut() {
                        top.paren_count -= 1;
                    } else if paren_count > 0 {
                        paren_count -= 1;
                    }
                }
                if let Some(top) = nested_state.last() {
                    if top.paren_count <= 0 && is_interpolated_string_end(&sc) {
                        esc_seq.outer_state = top.state;
                        string_delimiter_count = top.delimiter_count;
                        string_interpolator_count = top.interpolator_count;
                        close_brace = sc.ch == b'}';
                        let restored = if close_brace { top.state } else { Style::FormatSpecifier };
                        sc.change_state(restored);
                        continue 'doc;
                    }
                } else if kw_type == KeywordType::None && sc.ch == b'[' {
                    if visible_chars == 0 || !prefer_array_index(ch_prev_non_white) {
                        kw_type = KeywordType::Attribute;
                    }
                } else if kw_type == KeywordType::Attribute
                    && (sc.ch == b'(' || sc.ch == b']')
                {
                    kw_type = KeywordType::None;
                }
            }
        }

        if !is_space(sc.ch) {
            visible_chars += 1;
            if !sc.state.is_space_equiv() {
                ch_prev_non_white = sc.ch;
            }
        }
        if sc.at_line_end() {
            let line_state = pack_line_state(
                line_state_line_type,
                !nested_state.is_empty(),
                string_delimiter_count,
                string_interpolator_count,
                paren_count,
            );
            sc.set_line_state(sc.current_line, line_state);
            line_state_line_type = 0;
            visible_chars = 0;
            doc_tag_state = DocTagState::None;
            pp_kind = PreprocessorKind::None;
            kw_type = KeywordType::None;
        }
        sc.forward();
    }

    sc.complete();
}
