//! The Basic lexer state machine.

use crate::document::Document;

use super::super::chars::{
    is_basic_number_prefix, is_decimal_number, is_digit, is_graphic, is_identifier_char,
    is_identifier_start, is_invalid_format_specifier, is_number_start, is_space,
    is_type_character, is_upper_or_lower,
};
use super::super::style_context::{StyleCode, StyleContext};
use super::super::support::{backtrack_to_start, highlight_task_marker, lookback_non_white};
use super::super::words::BasicWordLists;
use super::{Dialect, Style, LINE_STATE_CONTINUATION, LINE_STATE_INTERPOLATION, LINE_TYPE_COMMENT,
            LINE_TYPE_CONST, LINE_TYPE_DIM, LINE_TYPE_VB6_TYPE};

const MAX_KEYWORD_SIZE: usize = 32;

/// Pending context from the previous keyword on the line.
#[derive(Clone, Copy, PartialEq, Eq)]
enum KeywordType {
    None,
    End,
    AccessModifier,
    Function,
    Preprocessor,
}

fn str_eq(s: &[u8], word: &[u8]) -> bool {
    s == word
}

fn str_eq_any(s: &[u8], words: &[&[u8]]) -> bool {
    words.iter().any(|&word| s == word)
}

/// A `&` forms string concatenation rather than a typed number when it
/// follows a closing delimiter, a string, or a plain identifier.
fn prefer_string_concat(ch_prev_non_white: u8, style_prev_non_white: Style) -> bool {
    ch_prev_non_white == b'"'
        || ch_prev_non_white == b')'
        || ch_prev_non_white == b']'
        || (style_prev_non_white != Style::Keyword && is_identifier_char(ch_prev_non_white))
}

fn is_interpolated_string_end(sc: &StyleContext<Style>) -> bool {
    sc.ch == b'}'
        || sc.ch == b':'
        || (sc.ch == b','
            && (is_digit(sc.ch_next) || (sc.ch_next == b'-' && is_digit(sc.get_relative(2)))))
}

/// Styles `[start_pos, start_pos + length)` and records per-line resume
/// state. `init_style` is the style at `start_pos` from the previous batch;
/// pass [Style::Default] for a scan from the top.
pub fn lex(
    doc: &mut dyn Document,
    words: &BasicWordLists,
    dialect: Dialect,
    start_pos: usize,
    length: usize,
    init_style: Style,
) {
    let mut kw_type = KeywordType::None;
    let mut preprocessor = false;
    let mut line_state = 0u32;
    let mut paren_count = 0u32;
    let mut file_nb_digits = 0i32;
    let mut visible_chars = 0usize;
    let mut ch_before = 0u8;
    let mut ch_prev_non_white = 0u8;
    let mut style_prev_non_white = Style::Default;
    let mut continued = false;
    let mut nested_state: Vec<i32> = Vec::new();

    // Interpolation holes may span lines in the modern dialect; restart from
    // the line that opened the interpolated string.
    let (start_pos, length, init_style) = if start_pos != 0 {
        let (start, len, style) =
            backtrack_to_start(doc, LINE_STATE_INTERPOLATION, start_pos, length, init_style.bits());
        (start, len, Style::from_bits(style))
    } else {
        (start_pos, length, init_style)
    };

    let mut sc = StyleContext::new(doc, start_pos, length, init_style);
    if sc.current_line > 0 {
        let prev = sc.doc().line_state(sc.current_line - 1);
        paren_count = super::line_state_paren_depth(prev);
        continued = prev & LINE_STATE_CONTINUATION != 0;
    }
    if start_pos != 0 && init_style.is_space_equiv() {
        let (ch, style) =
            lookback_non_white(sc.doc(), start_pos, Style::LineContinuation.bits());
        ch_prev_non_white = ch;
        style_prev_non_white = Style::from_bits(style);
    }

    'doc: while sc.more() {
        match sc.state {
            Style::Operator | Style::Operator2 | Style::LineContinuation => {
                sc.set_state(Style::Default);
            }

            Style::Identifier => {
                if !is_identifier_char(sc.ch) {
                    // A name may end with a type character denoting the value
                    // type held, or with the `]` of a bracketed identifier.
                    let mut skip_type = false;
                    if sc.ch == b']'
                        || (dialect != Dialect::Script && is_type_character(sc.ch))
                    {
                        skip_type = sc.ch != b']';
                        visible_chars += 1;
                        sc.forward();
                    }
                    let mut buf = [0u8; MAX_KEYWORD_SIZE];
                    let len = sc.length_current();
                    let mut s = sc.current_text_lowered(&mut buf);
                    if skip_type && len < MAX_KEYWORD_SIZE {
                        s = &s[..s.len() - 1];
                    }
                    if str_eq(s, b"rem") {
                        // Rest of the line is a comment whatever it holds.
                        sc.change_state(Style::CommentLine);
                    } else {
                        let kw_prev = kw_type;
                        kw_type = KeywordType::None;
                        if s.first() == Some(&b'#') {
                            if words.preprocessor.contains(&s[1..]) {
                                preprocessor = true;
                                sc.change_state(Style::Preprocessor);
                                if str_eq(&s[1..], b"end") {
                                    kw_type = KeywordType::Preprocessor;
                                }
                            } else {
                                sc.change_state(Style::Date);
                                continue 'doc;
                            }
                        } else if kw_prev == KeywordType::Preprocessor {
                            sc.change_state(Style::PreprocessorWord);
                        } else {
                            let ch_next = sc.get_line_next_char(false);
                            if s.first() != Some(&b'[') {
                                if words.keywords.contains_prefixed(s, b'(') {
                                    sc.change_state(Style::ContextKeyword);
                                    if !skip_type && ch_before != b'.' {
                                        sc.change_state(Style::Keyword);
                                        if str_eq(s, b"if") {
                                            if dialect == Dialect::Modern
                                                && ch_next == b'('
                                                && (paren_count != 0 || visible_chars > 2)
                                            {
                                                // If operator, not a block.
                                                sc.change_state(Style::ContextKeyword);
                                            }
                                        } else if str_eq(s, b"then") {
                                            if preprocessor {
                                                sc.change_state(Style::PreprocessorWord);
                                            }
                                        } else if str_eq(s, b"dim") {
                                            line_state = LINE_TYPE_DIM;
                                        } else if str_eq(s, b"const") {
                                            line_state = LINE_TYPE_CONST;
                                        } else if str_eq(s, b"type") {
                                            if (!continued && visible_chars == len)
                                                || kw_prev == KeywordType::AccessModifier
                                            {
                                                line_state = LINE_TYPE_VB6_TYPE;
                                            }
                                        } else if str_eq(s, b"end") {
                                            kw_type = KeywordType::End;
                                        } else if str_eq_any(s, &[b"sub", b"function"]) {
                                            if kw_prev != KeywordType::End {
                                                kw_type = KeywordType::Function;
                                            }
                                        } else if str_eq_any(s, &[b"public", b"private"]) {
                                            kw_type = KeywordType::AccessModifier;
                                        }
                                    }
                                } else if words.classic_keywords.contains(s) {
                                    sc.change_state(Style::ContextKeyword);
                                    if dialect == Dialect::Classic
                                        && !skip_type
                                        && ch_before != b'.'
                                    {
                                        sc.change_state(Style::Keyword);
                                    }
                                } else if words.type_keywords.contains(s) {
                                    sc.change_state(Style::TypeKeyword);
                                } else if words.classes.contains(s) {
                                    sc.change_state(Style::Class);
                                } else if words.interfaces.contains(s) {
                                    sc.change_state(Style::Interface);
                                } else if words.enumerations.contains(s) {
                                    sc.change_state(Style::Enumeration);
                                } else if words.attributes.contains_prefixed(s, b'(') {
                                    sc.change_state(Style::Attribute);
                                } else if words.constants.contains(s) {
                                    sc.change_state(Style::Constant);
                                } else if words.functions.contains_prefixed(s, b'(') {
                                    sc.change_state(Style::BasicFunction);
                                }
                            }
                            if sc.state == Style::Identifier {
                                if !continued && visible_chars == len && ch_next == b':' {
                                    sc.change_state(Style::Label);
                                } else if kw_prev == KeywordType::Function {
                                    sc.change_state(Style::FunctionDefinition);
                                }
                            }
                        }
                        style_prev_non_white = sc.state;
                        sc.set_state(Style::Default);
                    }
                }
            }

            Style::Number => {
                if !is_decimal_number(sc.ch_prev, sc.ch, sc.ch_next) {
                    if dialect != Dialect::Script && is_type_character(sc.ch) {
                        sc.forward();
                    }
                    sc.set_state(Style::Default);
                }
            }

            Style::String | Style::InterpolatedString => {
                if sc.at_line_start && dialect != Dialect::Modern {
                    // Strings are multi-line since VB.NET 14 only.
                    sc.set_state(Style::Default);
                } else if sc.ch == b'"' {
                    if sc.ch_next == b'"' {
                        sc.forward();
                    } else {
                        if sc.ch_next == b'c' || sc.ch_next == b'C' || sc.ch_next == b'$' {
                            sc.forward();
                        }
                        ch_prev_non_white = sc.ch;
                        sc.forward_set_state(Style::Default);
                    }
                } else if sc.state == Style::InterpolatedString {
                    if sc.ch == b'{' {
                        if sc.ch_next == b'{' {
                            sc.forward();
                        } else {
                            paren_count += 1;
                            nested_state.push(0);
                            sc.set_state(Style::Operator2);
                            sc.forward_set_state(Style::Default);
                        }
                    } else if sc.ch == b'}' {
                        if !nested_state.is_empty() {
                            if paren_count > 0 {
                                paren_count -= 1;
                            }
                            nested_state.pop();
                            sc.set_state(Style::Operator2);
                            sc.forward_set_state(Style::InterpolatedString);
                            continue 'doc;
                        }
                        if sc.ch_next == b'}' {
                            sc.forward();
                        }
                    }
                }
            }

            Style::CommentLine => {
                if sc.at_line_start {
                    if continued {
                        // Comment continued from the previous line.
                        line_state = LINE_TYPE_COMMENT;
                    } else {
                        sc.set_state(Style::Default);
                    }
                } else if dialect == Dialect::Classic && sc.ch == b'_' && sc.ch_prev <= b' ' {
                    if sc.get_line_next_char(true) == 0 {
                        line_state |= LINE_STATE_CONTINUATION;
                        sc.set_state(Style::LineContinuation);
                        sc.forward_set_state(Style::CommentLine);
                    }
                } else if highlight_task_marker(&mut sc, &words.task_markers, Style::TaskMarker) {
                    continue 'doc;
                }
            }

            Style::FileNumber => {
                if is_digit(sc.ch) {
                    file_nb_digits += 1;
                    if file_nb_digits > 3 {
                        sc.change_state(Style::Date);
                    }
                } else if sc.ch == b'\r' || sc.ch == b'\n' || sc.ch == b',' {
                    // Close #1; Put #1, ...; Get #1, ...
                    sc.change_state(Style::Number);
                    sc.set_state(Style::Default);
                } else {
                    sc.change_state(Style::Date);
                    continue 'doc;
                }
            }

            Style::Date => {
                if sc.at_line_start {
                    sc.set_state(Style::Default);
                } else if sc.ch == b'#' {
                    ch_prev_non_white = sc.ch;
                    sc.forward_set_state(Style::Default);
                }
            }

            Style::FormatSpecifier => {
                if is_invalid_format_specifier(sc.ch) {
                    sc.set_state(Style::InterpolatedString);
                    continue 'doc;
                }
            }

            _ => {}
        }

        if sc.state == Style::Default {
            if sc.ch == b'\'' {
                sc.set_state(Style::CommentLine);
                if visible_chars == 0 {
                    line_state = LINE_TYPE_COMMENT;
                }
            } else if sc.ch == b'"' {
                sc.set_state(Style::String);
            } else if dialect == Dialect::Modern && sc.match2(b'$', b'"') {
                sc.set_state(Style::InterpolatedString);
                sc.forward();
            } else if sc.ch == b'#' {
                if visible_chars == 0
                    && dialect != Dialect::Script
                    && is_upper_or_lower(sc.ch_next)
                {
                    // Candidate preprocessor directive, resolved at the end
                    // of the identifier.
                    sc.set_state(Style::Identifier);
                } else {
                    file_nb_digits = 0;
                    sc.set_state(Style::FileNumber);
                }
            } else if sc.ch == b'&'
                && is_basic_number_prefix(sc.ch_next)
                && !prefer_string_concat(ch_prev_non_white, style_prev_non_white)
            {
                sc.set_state(Style::Number);
                sc.forward();
            } else if is_number_start(sc.ch, sc.ch_next) {
                sc.set_state(Style::Number);
            } else if sc.ch == b'_' && sc.ch_next <= b' ' {
                sc.set_state(Style::LineContinuation);
                if sc.get_line_next_char(true) == 0 {
                    line_state |= LINE_STATE_CONTINUATION;
                }
            } else if is_identifier_start(sc.ch) || sc.ch == b'[' {
                // `[` opens a bracketed [keyword] identifier.
                ch_before = ch_prev_non_white;
                sc.set_state(Style::Identifier);
            } else if is_graphic(sc.ch) {
                sc.set_state(Style::Operator);
                if nested_state.is_empty() {
                    if sc.ch == b'(' {
                        paren_count += 1;
                    } else if sc.ch == b')' && paren_count > 0 {
                        paren_count -= 1;
                    }
                } else {
                    sc.change_state(Style::Operator2);
                    if let Some(top) = nested_state.last_mut() {
                        if sc.ch == b'(' {
                            *top += 1;
                        } else if sc.ch == b')' {
                            *top -= 1;
                        }
                    }
                    if nested_state.last().is_some_and(|&top| top <= 0)
                        && is_interpolated_string_end(&sc)
                    {
                        sc.change_state(if sc.ch == b'}' {
                            Style::InterpolatedString
                        } else {
                            Style::FormatSpecifier
                        });
                        continue 'doc;
                    }
                }
            }
        }

        if !is_space(sc.ch) {
            visible_chars += 1;
            if !sc.state.is_space_equiv() {
                ch_prev_non_white = sc.ch;
                style_prev_non_white = sc.state;
            }
        }
        if sc.at_line_end() {
            if !nested_state.is_empty() {
                line_state |= LINE_STATE_INTERPOLATION;
            }
            sc.set_line_state(sc.current_line, line_state | ((paren_count & 0xffff) << 16));
            continued = line_state & LINE_STATE_CONTINUATION != 0;
            line_state = 0;
            visible_chars = 0;
            kw_type = KeywordType::None;
            preprocessor = false;
        }
        sc.forward();
    }

    sc.complete();
}
