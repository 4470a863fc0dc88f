//! The Basic folder: keyword-driven begin/end matching with lookahead.

use crate::document::{Document, FOLD_LEVEL_BASE, FOLD_LEVEL_HEADER_FLAG};

use super::super::chars::{is_alpha, is_space, lower};
use super::super::style_context::StyleCode;
use super::super::support::{match_lower_case, skip_space_tab};
use super::{line_state_line_type, Style, LINE_TYPE_VB6_TYPE};

/// The word at `start_pos` (blanks skipped) followed by a space character.
fn match_next_word(doc: &dyn Document, start_pos: usize, end_pos: usize, word: &[u8]) -> bool {
    let pos = skip_space_tab(doc, start_pos, end_pos);
    is_space(doc.byte_at(pos + word.len())) && match_lower_case(doc, pos, word)
}

/// Whether a `Property` line opens a block: 1 when the rest of the line has
/// a `(` operator (the block fold, leaving Get/Set folds armed), 2 when it
/// begins with a `Get`/`Set`/`Let` keyword (VB6 property procedures), 0
/// otherwise.
fn is_property_block(doc: &dyn Document, line: usize, start_pos: usize) -> i32 {
    let end_pos = doc.line_start(line + 1).saturating_sub(1);
    let mut visible_chars = false;
    let mut pos = start_pos;
    while pos < end_pos {
        let ch = lower(doc.byte_at(pos));
        let style = Style::from_bits(doc.style_at(pos));
        if style == Style::Operator && ch == b'(' {
            return 1;
        }
        if style == Style::Keyword
            && !visible_chars
            && matches!(ch, b'g' | b'l' | b's')
            && lower(doc.byte_at(pos + 1)) == b'e'
            && lower(doc.byte_at(pos + 2)) == b't'
            && is_space(doc.byte_at(pos + 3))
        {
            return 2;
        }
        if ch > b' ' {
            visible_chars = true;
        }
        pos += 1;
    }
    0
}

/// Computes packed fold levels for the styled bytes in
/// `[start_pos, start_pos + length)`. Runs after [super::lex] over the same
/// range.
pub fn fold(doc: &mut dyn Document, start_pos: usize, length: usize, init_style: Style) {
    let end_pos = (start_pos + length).min(doc.len());
    let mut start_pos = start_pos;
    let mut line_current = doc.line_of_pos(start_pos);
    let mut fold_prev = 0u32;
    let mut level_current = FOLD_LEVEL_BASE as i32;
    if line_current > 0 {
        level_current = (doc.fold_level(line_current - 1) >> 16) as i32;
        fold_prev = doc.line_state(line_current - 1);
    }

    let mut level_next = level_current;
    let mut fold_current = doc.line_state(line_current);
    let mut line_start_next = doc.line_start(line_current + 1);

    let mut style = init_style;
    let mut style_next = Style::from_bits(doc.style_at(start_pos));

    let mut visible_chars = 0;
    // Nested Begin ... End, found in VB6 Forms.
    let mut num_begin = 0i32;
    // End {Function Sub If Class Module Structure Interface Operator
    // Property Event Type}
    let mut is_end = false;
    // Interface members declare without bodies; suppress their folds.
    let mut is_interface = false;
    // Property block armed for inner Get/Set folds.
    let mut is_property = false;
    // Custom Event
    let mut is_custom = false;
    // Exit {Function Sub Property}
    let mut is_exit = false;
    // Declare, Delegate {Function Sub}
    let mut is_declare = false;
    // If ... Then <EOL> ... End If; bit 1 = If seen, bit 2 = Then seen.
    let mut if_then_mask = 0u32;

    while start_pos < end_pos {
        let i = start_pos;
        let style_prev = style;
        style = style_next;
        let ch = doc.byte_at(i);
        start_pos += 1;
        style_next = Style::from_bits(doc.style_at(start_pos));

        // Only at a keyword span start: members after `.` and bracketed
        // [keyword] identifiers carry other styles.
        if style == Style::Keyword && style_prev != Style::Keyword {
            let d: &dyn Document = &*doc;
            let m = |word: &[u8]| match_lower_case(d, i, word);
            let m_next = |pos: usize, word: &[u8]| match_next_word(d, pos, end_pos, word);
            if visible_chars == 0
                && (m(b"for")
                    || (m(b"do") && is_space(doc.byte_at(i + 2))) // not Double
                    || m(b"while")
                    || (m(b"try") && is_space(doc.byte_at(i + 3))) // not TryCast
                    || (m(b"select") && m_next(i + 6, b"case"))
                    || (m(b"with") && is_space(doc.byte_at(i + 4))) // not WithEvents
                    || m(b"namespace")
                    || m(b"synclock")
                    || m(b"using")
                    || (is_property
                        && (m(b"set") || (m(b"get") && is_space(doc.byte_at(i + 3))))) // not GetType
                    || (is_custom
                        && (m(b"raiseevent") || m(b"addhandler") || m(b"removehandler"))))
            {
                level_next += 1;
            } else if visible_chars == 0 && (m(b"next") || m(b"loop") || m(b"wend")) {
                level_next -= 1;
            } else if m(b"exit")
                && (m_next(i + 4, b"function")
                    || m_next(i + 4, b"sub")
                    || m_next(i + 4, b"property"))
            {
                is_exit = true;
            } else if m(b"begin") {
                level_next += 1;
                if is_space(doc.byte_at(i + 5)) {
                    num_begin += 1;
                }
            } else if m(b"end") {
                level_next -= 1;
                let mut ch_end = doc.byte_at(i + 3);
                if ch_end == b' ' || ch_end == b'\t' {
                    let pos = skip_space_tab(doc, i + 3, end_pos);
                    ch_end = doc.byte_at(pos);
                    // Check whether End terminates a block statement.
                    if is_alpha(ch_end)
                        && (m_next(pos, b"function")
                            || m_next(pos, b"sub")
                            || m_next(pos, b"if")
                            || m_next(pos, b"class")
                            || m_next(pos, b"structure")
                            || m_next(pos, b"module")
                            || m_next(pos, b"enum")
                            || m_next(pos, b"interface")
                            || m_next(pos, b"operator")
                            || m_next(pos, b"property")
                            || m_next(pos, b"event")
                            || m_next(pos, b"type"))
                    {
                        is_end = true;
                    }
                }
                if ch_end == b'\r' || ch_end == b'\n' || ch_end == b'\'' {
                    // A bare End is the End statement, not a block
                    // terminator, except inside VB6 Begin nesting.
                    is_end = false;
                    if num_begin == 0 {
                        level_next += 1;
                    }
                    if num_begin > 0 {
                        num_begin -= 1;
                    }
                }
                // One line: If ... Then ... End If
                if if_then_mask == 3 {
                    level_next += 1;
                }
                if_then_mask = 0;
            } else if m(b"if") {
                if is_end {
                    is_end = false;
                } else {
                    if_then_mask = 1;
                    level_next += 1;
                }
            } else if m(b"then") {
                if if_then_mask & 1 != 0 {
                    if_then_mask |= 2;
                    let pos = skip_space_tab(doc, i + 4, end_pos);
                    let ch_end = doc.byte_at(pos);
                    if !(ch_end == b'\r' || ch_end == b'\n' || ch_end == b'\'') {
                        // Single-line If ... Then statement cancels.
                        level_next -= 1;
                    }
                }
            } else if (!is_interface && (m(b"class") || m(b"structure")))
                || m(b"module")
                || m(b"enum")
                || m(b"operator")
            {
                if is_end {
                    is_end = false;
                } else {
                    level_next += 1;
                }
            } else if m(b"interface") {
                if !(is_end || is_interface) {
                    level_next += 1;
                }
                is_interface = true;
                if is_end {
                    is_end = false;
                    is_interface = false;
                }
            } else if m(b"declare") || m(b"delegate") {
                is_declare = true;
            } else if !is_interface && (m(b"sub") || m(b"function")) {
                if !(is_end || is_exit || is_declare) {
                    level_next += 1;
                }
                if is_end {
                    is_end = false;
                }
                if is_exit {
                    is_exit = false;
                }
                if is_declare {
                    is_declare = false;
                }
            } else if !is_interface && m(b"property") {
                is_property = true;
                if !(is_end || is_exit) {
                    let result = is_property_block(d, line_current, i + 8);
                    if result != 0 {
                        level_next += 1;
                    }
                    is_property = result == 1;
                }
                if is_end {
                    is_end = false;
                    is_property = false;
                }
                if is_exit {
                    is_exit = false;
                }
            } else if m(b"custom") {
                is_custom = true;
            } else if !is_interface && is_custom && m(b"event") {
                if is_end {
                    is_end = false;
                    is_custom = false;
                } else {
                    level_next += 1;
                }
            } else if m(b"type") && is_space(doc.byte_at(i + 4)) {
                // Not TypeOf; VB6: [Public|Private] Type ... End Type
                if !is_end && (fold_current & LINE_TYPE_VB6_TYPE) != 0 {
                    level_next += 1;
                }
                if is_end {
                    is_end = false;
                }
            }
        } else if style == Style::Preprocessor && style_prev != Style::Preprocessor {
            let d: &dyn Document = &*doc;
            let m = |word: &[u8]| match_lower_case(d, i, word);
            if m(b"#if") || m(b"#region") || m(b"#externalsource") {
                level_next += 1;
            } else if m(b"#end") {
                level_next -= 1;
            }
        } else if style == Style::Operator {
            // Anonymous With { ... }
            if ch == b'{' {
                level_next += 1;
            } else if ch == b'}' {
                level_next -= 1;
            }
        }

        if visible_chars == 0 && !is_space(ch) {
            visible_chars += 1;
        }
        if start_pos == line_start_next {
            let fold_next = doc.line_state(line_current + 1);
            level_next = level_next.max(FOLD_LEVEL_BASE as i32);
            let line_type = line_state_line_type(fold_current);
            if line_type != 0 {
                // Runs of comment, Dim, and Const lines fold as soft groups.
                if line_type != line_state_line_type(fold_prev) {
                    level_next += 1;
                }
                if line_type != line_state_line_type(fold_next) {
                    level_next -= 1;
                }
            }

            let level_use = level_current;
            let mut lev = (level_use as u32) | ((level_next as u32) << 16);
            if level_use < level_next {
                lev |= FOLD_LEVEL_HEADER_FLAG;
            }
            doc.set_fold_level(line_current, lev);

            line_current += 1;
            line_start_next = doc.line_start(line_current + 1);
            level_current = level_next;
            fold_prev = fold_current;
            fold_current = fold_next;
            visible_chars = 0;
            if_then_mask = 0;
        }
    }
}
