use bstr::BStr;

use super::{Document, SourceBuffer, FOLD_LEVEL_BASE};

/// An in-memory [Document]: source text plus the style, line-state, and
/// fold-level arrays the engine writes into.
///
/// Hosts embedding the engine in an editor normally provide their own
/// [Document] implementation backed by the editor's buffers; this one backs
/// the CLI, the tests, and the fuzz targets.
pub struct StyledDocument<'s> {
    text: &'s [u8],
    /// Start offset of each line. `line_starts[0]` is always 0; a trailing
    /// line terminator opens one final empty line, as editors expect.
    line_starts: Vec<usize>,
    styles: Vec<u16>,
    line_states: Vec<u32>,
    levels: Vec<u32>,
}

impl<'s> StyledDocument<'s> {
    pub fn new(source: &'s SourceBuffer) -> StyledDocument<'s> {
        let text: &[u8] = source.code().as_ref();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < text.len() {
            match text[i] {
                b'\n' => line_starts.push(i + 1),
                // Lone carriage return; \r\n counts once at the \n.
                b'\r' if text.get(i + 1) != Some(&b'\n') => line_starts.push(i + 1),
                _ => {}
            }
            i += 1;
        }
        let line_count = line_starts.len();
        StyledDocument {
            text,
            line_starts,
            styles: vec![0; text.len()],
            line_states: vec![0; line_count],
            levels: vec![FOLD_LEVEL_BASE | (FOLD_LEVEL_BASE << 16); line_count],
        }
    }

    pub fn text(&self) -> &BStr {
        BStr::new(self.text)
    }

    /// The text of the byte range `[start, end)`, clamped to the document.
    pub fn text_range(&self, start: usize, end: usize) -> &BStr {
        let end = end.min(self.text.len());
        let start = start.min(end);
        BStr::new(&self.text[start..end])
    }

    pub fn styles(&self) -> &[u16] {
        &self.styles
    }

    pub fn line_states(&self) -> &[u32] {
        &self.line_states
    }

    pub fn fold_levels(&self) -> &[u32] {
        &self.levels
    }

    /// Iterates maximal runs of equal style as `(start, len, style)`.
    pub fn style_runs(&self) -> StyleRuns<'_> {
        StyleRuns { styles: &self.styles, pos: 0 }
    }
}

impl<'s> Document for StyledDocument<'s> {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn byte_at(&self, pos: usize) -> u8 {
        self.text.get(pos).copied().unwrap_or(0)
    }

    fn style_at(&self, pos: usize) -> u16 {
        self.styles.get(pos).copied().unwrap_or(0)
    }

    fn set_style_range(&mut self, start: usize, len: usize, style: u16) {
        let end = start.saturating_add(len).min(self.styles.len());
        if start < end {
            self.styles[start..end].fill(style);
        }
    }

    fn line_of_pos(&self, pos: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= pos) - 1
    }

    fn line_start(&self, line: usize) -> usize {
        self.line_starts.get(line).copied().unwrap_or(self.text.len())
    }

    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_state(&self, line: usize) -> u32 {
        self.line_states.get(line).copied().unwrap_or(0)
    }

    fn set_line_state(&mut self, line: usize, state: u32) {
        if let Some(slot) = self.line_states.get_mut(line) {
            *slot = state;
        }
    }

    fn fold_level(&self, line: usize) -> u32 {
        self.levels.get(line).copied().unwrap_or(FOLD_LEVEL_BASE)
    }

    fn set_fold_level(&mut self, line: usize, level: u32) {
        if let Some(slot) = self.levels.get_mut(line) {
            *slot = level;
        }
    }
}

/// Iterator over maximal equal-style runs of a [StyledDocument].
pub struct StyleRuns<'a> {
    styles: &'a [u16],
    pos: usize,
}

impl<'a> Iterator for StyleRuns<'a> {
    type Item = (usize, usize, u16);

    fn next(&mut self) -> Option<(usize, usize, u16)> {
        let start = self.pos;
        let style = *self.styles.get(start)?;
        let mut end = start + 1;
        while self.styles.get(end) == Some(&style) {
            end += 1;
        }
        self.pos = end;
        Some((start, end - start, style))
    }
}
