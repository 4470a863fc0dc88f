#[cfg(test)]
mod tests {
    use crate::document::{Document, StyledDocument, FOLD_LEVEL_BASE};
    use crate::srcdoc;

    #[test]
    fn line_geometry() {
        let source = srcdoc!("one\ntwo\r\nthree");
        let doc = StyledDocument::new(source);
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_start(0), 0);
        assert_eq!(doc.line_start(1), 4);
        assert_eq!(doc.line_start(2), 9);
        // Lines past the end report the document length.
        assert_eq!(doc.line_start(3), 14);
        assert_eq!(doc.line_of_pos(0), 0);
        assert_eq!(doc.line_of_pos(3), 0);
        assert_eq!(doc.line_of_pos(4), 1);
        // Both bytes of \r\n belong to the line they terminate.
        assert_eq!(doc.line_of_pos(7), 1);
        assert_eq!(doc.line_of_pos(8), 1);
        assert_eq!(doc.line_of_pos(9), 2);
        assert_eq!(doc.line_of_pos(100), 2);
    }

    #[test]
    fn lone_carriage_return_ends_a_line() {
        let source = srcdoc!("a\rb\nc");
        let doc = StyledDocument::new(source);
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_start(1), 2);
        assert_eq!(doc.line_start(2), 4);
    }

    #[test]
    fn trailing_newline_opens_an_empty_line() {
        let source = srcdoc!("a\n");
        let doc = StyledDocument::new(source);
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_start(1), 2);
        assert_eq!(doc.line_of_pos(1), 0);
    }

    #[test]
    fn bytes_past_the_end_read_as_zero() {
        let source = srcdoc!("ab");
        let doc = StyledDocument::new(source);
        assert_eq!(doc.byte_at(0), b'a');
        assert_eq!(doc.byte_at(2), 0);
        assert_eq!(doc.style_at(7), 0);
    }

    #[test]
    fn style_runs_merge_equal_styles() {
        let source = srcdoc!("abcdef");
        let mut doc = StyledDocument::new(source);
        doc.set_style_range(0, 2, 5);
        doc.set_style_range(2, 3, 7);
        doc.set_style_range(5, 1, 7);
        let runs: Vec<_> = doc.style_runs().collect();
        assert_eq!(runs, vec![(0, 2, 5), (2, 4, 7)]);
    }

    #[test]
    fn style_range_clamps_to_document() {
        let source = srcdoc!("abc");
        let mut doc = StyledDocument::new(source);
        doc.set_style_range(1, 100, 3);
        assert_eq!(doc.styles(), &[0, 3, 3]);
    }

    #[test]
    fn fold_levels_default_to_base() {
        let source = srcdoc!("a\nb");
        let doc = StyledDocument::new(source);
        assert_eq!(doc.fold_level(0), FOLD_LEVEL_BASE | (FOLD_LEVEL_BASE << 16));
        assert_eq!(doc.fold_level(9), FOLD_LEVEL_BASE);
    }
}
