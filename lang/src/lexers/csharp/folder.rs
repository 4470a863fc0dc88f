//! The C# folder: brace, multi-line-span, and preprocessor based levels.

use crate::document::{Document, FOLD_LEVEL_BASE, FOLD_LEVEL_HEADER_FLAG};

use super::super::style_context::StyleCode;
use super::super::support::check_brace_on_next_line;
use super::{Style, LINE_STATE_LINE_COMMENT, LINE_STATE_USING};

/// The per-line flags the folder groups soft regions by.
#[derive(Clone, Copy, Default)]
struct FoldLineState {
    line_comment: i32,
    using_name: i32,
}

impl FoldLineState {
    fn new(line_state: u32) -> FoldLineState {
        FoldLineState {
            line_comment: (line_state & LINE_STATE_LINE_COMMENT) as i32,
            using_name: ((line_state & LINE_STATE_USING) >> 1) as i32,
        }
    }
}

const MAX_FOLD_WORD_LENGTH: usize = 11; // endregion, with the leading #

/// Computes packed fold levels for the styled bytes in
/// `[start_pos, start_pos + length)`. Runs after [super::lex] over the same
/// range.
pub fn fold(doc: &mut dyn Document, start_pos: usize, length: usize, init_style: Style) {
    let end_pos = (start_pos + length).min(doc.len());
    let mut start_pos = start_pos;
    let mut line_current = doc.line_of_pos(start_pos);
    let mut fold_prev = FoldLineState::default();
    let mut level_current = FOLD_LEVEL_BASE as i32;
    if line_current > 0 {
        level_current = (doc.fold_level(line_current - 1) >> 16) as i32;
        fold_prev = FoldLineState::new(doc.line_state(line_current - 1));
        // A brace attributed to the previous line was already counted there.
        if let Some(brace_pos) = check_brace_on_next_line(
            doc,
            line_current - 1,
            Style::Operator.bits(),
            Style::TaskMarker.bits(),
            Style::Preprocessor.bits(),
        ) {
            start_pos = brace_pos + 1;
        }
    }

    let mut level_next = level_current;
    let mut fold_current = FoldLineState::new(doc.line_state(line_current));
    let mut line_start_next = doc.line_start(line_current + 1).min(end_pos);

    let mut word_buf = [0u8; MAX_FOLD_WORD_LENGTH];
    let mut word_len = 0usize;

    let mut style_next = Style::from_bits(doc.style_at(start_pos));
    let mut style = init_style;
    let mut visible_chars = 0;

    while start_pos < end_pos {
        let style_prev = style;
        style = style_next;
        style_next = Style::from_bits(doc.style_at(start_pos + 1));

        match style {
            // Block comments and multi-line strings fold over their span.
            Style::CommentBlock
            | Style::CommentBlockDoc
            | Style::VerbatimString
            | Style::InterpolatedVerbatimString
            | Style::RawStringMl
            | Style::InterpolatedRawStringMl => {
                if style != style_prev {
                    level_next += 1;
                }
                if style != style_next {
                    level_next -= 1;
                }
            }

            Style::Operator | Style::Operator2 => {
                let ch = doc.byte_at(start_pos);
                if ch == b'{' || ch == b'[' || ch == b'(' {
                    level_next += 1;
                } else if ch == b'}' || ch == b']' || ch == b')' {
                    level_next -= 1;
                }
            }

            Style::Preprocessor => {
                if word_len < MAX_FOLD_WORD_LENGTH {
                    word_buf[word_len] = doc.byte_at(start_pos);
                    word_len += 1;
                }
                if style_next != style {
                    let mut word = &word_buf[..word_len];
                    word_len = 0;
                    if word.first() == Some(&b'#') {
                        word = &word[1..];
                    }
                    if word == b"if" || word == b"region" {
                        level_next += 1;
                    } else if word.starts_with(b"end") {
                        level_next -= 1;
                    }
                }
            }

            _ => {}
        }

        if visible_chars == 0 && !style.is_space_equiv() {
            visible_chars += 1;
        }
        start_pos += 1;
        if start_pos == line_start_next {
            let fold_next = FoldLineState::new(doc.line_state(line_current + 1));
            level_next = level_next.max(FOLD_LEVEL_BASE as i32);
            if fold_current.line_comment != 0 {
                // Runs of comment lines fold as one soft region.
                level_next += fold_next.line_comment - fold_prev.line_comment;
            } else if fold_current.using_name != 0 {
                level_next += fold_next.using_name - fold_prev.using_name;
            } else if visible_chars != 0 {
                if let Some(brace_pos) = check_brace_on_next_line(
                    doc,
                    line_current,
                    Style::Operator.bits(),
                    Style::TaskMarker.bits(),
                    Style::Preprocessor.bits(),
                ) {
                    level_next += 1;
                    start_pos = brace_pos + 1;
                    style = Style::Operator;
                    style_next = Style::from_bits(doc.style_at(start_pos));
                }
            }

            let level_use = level_current;
            let mut lev = (level_use as u32) | ((level_next as u32) << 16);
            if level_use < level_next {
                lev |= FOLD_LEVEL_HEADER_FLAG;
            }
            doc.set_fold_level(line_current, lev);

            line_current += 1;
            line_start_next = doc.line_start(line_current + 1).min(end_pos);
            level_current = level_next;
            fold_prev = fold_current;
            fold_current = fold_next;
            visible_chars = 0;
        }
    }
}
