//! The styling cursor shared by both lexers.

use crate::document::Document;

/// A language's style vocabulary as stored in the document's 16-bit style
/// array.
pub trait StyleCode: Copy + Eq {
    fn bits(self) -> u16;

    /// Decodes a stored style; unknown values map to the default style.
    fn from_bits(bits: u16) -> Self;
}

/// A forward cursor over a byte range of a [Document] that carries the
/// running style.
///
/// The cursor exposes the previous, current, and next byte plus line
/// geometry, and buffers the currently open style run: [StyleContext::set_state]
/// writes the run that just ended and opens a new one,
/// [StyleContext::change_state] renames the open run without writing.
/// Styling a batch therefore covers every byte of the range exactly once,
/// finished by [StyleContext::complete].
pub struct StyleContext<'a, S: StyleCode> {
    doc: &'a mut dyn Document,
    pub state: S,
    pub ch_prev: u8,
    pub ch: u8,
    pub ch_next: u8,
    pub current_line: usize,
    pub at_line_start: bool,
    pos: usize,
    seg_start: usize,
    end: usize,
    line_start_next: usize,
}

impl<'a, S: StyleCode> StyleContext<'a, S> {
    pub fn new(
        doc: &'a mut dyn Document,
        start: usize,
        length: usize,
        init_style: S,
    ) -> StyleContext<'a, S> {
        let end = start.saturating_add(length).min(doc.len());
        let current_line = doc.line_of_pos(start);
        let line_start_next = doc.line_start(current_line + 1);
        let at_line_start = doc.line_start(current_line) == start;
        StyleContext {
            ch_prev: if start > 0 { doc.byte_at(start - 1) } else { 0 },
            ch: doc.byte_at(start),
            ch_next: doc.byte_at(start + 1),
            state: init_style,
            current_line,
            at_line_start,
            pos: start,
            seg_start: start,
            end,
            line_start_next,
            doc,
        }
    }

    /// Read access to the document, for helpers that scan ahead or behind.
    pub fn doc(&self) -> &dyn Document {
        &*self.doc
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Start offset of the line after the current one.
    pub fn line_start_next(&self) -> usize {
        self.line_start_next
    }

    /// Length of the currently open style run.
    pub fn length_current(&self) -> usize {
        self.pos - self.seg_start
    }

    pub fn more(&self) -> bool {
        self.pos < self.end
    }

    /// True on the last byte of the current line, including the final byte
    /// of the buffer.
    pub fn at_line_end(&self) -> bool {
        self.pos + 1 >= self.line_start_next
    }

    pub fn match2(&self, ch: u8, ch_next: u8) -> bool {
        self.ch == ch && self.ch_next == ch_next
    }

    /// The byte `offset` positions ahead of the cursor.
    pub fn get_relative(&self, offset: usize) -> u8 {
        self.doc.byte_at(self.pos + offset)
    }

    pub fn forward(&mut self) {
        if self.pos < self.end {
            self.at_line_start = self.pos + 1 == self.line_start_next;
            if self.at_line_start {
                self.current_line += 1;
                self.line_start_next = self.doc.line_start(self.current_line + 1);
            }
            self.pos += 1;
            self.ch_prev = self.ch;
            self.ch = self.ch_next;
            self.ch_next = self.doc.byte_at(self.pos + 1);
        }
    }

    pub fn advance(&mut self, count: usize) {
        for _ in 0..count {
            self.forward();
        }
    }

    /// Writes the open run with its current style and opens a new run in
    /// `state` at the cursor.
    pub fn set_state(&mut self, state: S) {
        self.flush();
        self.state = state;
    }

    /// Renames the open run without writing anything.
    pub fn change_state(&mut self, state: S) {
        self.state = state;
    }

    /// Moves past the current byte, then starts a new run in `state`; the
    /// byte just left gets the old style.
    pub fn forward_set_state(&mut self, state: S) {
        self.forward();
        self.set_state(state);
    }

    /// Moves the cursor back to the start of the open run, leaving the run
    /// empty. Used to abandon a speculative span and rescan it in another
    /// state.
    pub fn rewind(&mut self) {
        self.pos = self.seg_start;
        self.ch_prev = if self.pos > 0 { self.doc.byte_at(self.pos - 1) } else { 0 };
        self.ch = self.doc.byte_at(self.pos);
        self.ch_next = self.doc.byte_at(self.pos + 1);
        self.current_line = self.doc.line_of_pos(self.pos);
        self.line_start_next = self.doc.line_start(self.current_line + 1);
        self.at_line_start = self.doc.line_start(self.current_line) == self.pos;
    }

    /// Writes the final style run of the batch.
    pub fn complete(&mut self) {
        self.flush();
    }

    fn flush(&mut self) {
        if self.pos > self.seg_start {
            self.doc.set_style_range(self.seg_start, self.pos - self.seg_start, self.state.bits());
        }
        self.seg_start = self.pos;
    }

    pub fn set_line_state(&mut self, line: usize, state: u32) {
        self.doc.set_line_state(line, state);
    }

    /// Copies the open run's bytes into `buf`, truncating to its length.
    pub fn current_text<'b>(&self, buf: &'b mut [u8]) -> &'b [u8] {
        let len = self.length_current().min(buf.len());
        for (offset, slot) in buf[..len].iter_mut().enumerate() {
            *slot = self.doc.byte_at(self.seg_start + offset);
        }
        &buf[..len]
    }

    /// Like [StyleContext::current_text], ASCII-lowercased.
    pub fn current_text_lowered<'b>(&self, buf: &'b mut [u8]) -> &'b [u8] {
        let len = self.length_current().min(buf.len());
        for (offset, slot) in buf[..len].iter_mut().enumerate() {
            *slot = self.doc.byte_at(self.seg_start + offset).to_ascii_lowercase();
        }
        &buf[..len]
    }

    /// First byte after the cursor that is not whitespace, scanning across
    /// line ends; 0 at end of document.
    pub fn get_doc_next_char(&self, ignore_current: bool) -> u8 {
        let mut pos = self.pos + usize::from(ignore_current);
        while pos < self.doc.len() {
            let ch = self.doc.byte_at(pos);
            if !super::chars::is_space(ch) {
                return ch;
            }
            pos += 1;
        }
        0
    }

    /// First byte from the cursor to the end of the current line that is not
    /// a space or tab; 0 when only blanks (or nothing) remain.
    pub fn get_line_next_char(&self, ignore_current: bool) -> u8 {
        let mut pos = self.pos + usize::from(ignore_current);
        while pos < self.line_start_next {
            let ch = self.doc.byte_at(pos);
            if !super::chars::is_space_or_tab(ch) {
                if super::chars::is_eol(ch) {
                    return 0;
                }
                return ch;
            }
            pos += 1;
        }
        0
    }
}
