#[cfg(test)]
mod tests {
    use crate::document::{
        Document, SourceBuffer, StyledDocument, FOLD_LEVEL_BASE, FOLD_LEVEL_HEADER_FLAG,
        FOLD_LEVEL_NUMBER_MASK,
    };
    use crate::lexers::basic::{fold, lex, Dialect, Style};
    use crate::lexers::words::BasicWordLists;
    use crate::srcdoc;

    /// Lexes and folds `source`, then compares a per-line dump of
    /// base-relative levels: `line: current next` plus a header marker.
    fn check_fold(source: &SourceBuffer, dialect: Dialect, expect: &str) {
        let words = BasicWordLists::standard();
        let mut doc = StyledDocument::new(source);
        let length = doc.len();
        lex(&mut doc, &words, dialect, 0, length, Style::Default);
        fold(&mut doc, 0, length, Style::Default);
        let actual: String = (0..doc.line_count())
            .map(|line| {
                let lev = doc.fold_level(line);
                format!(
                    "\n{}: {} {}{}",
                    line,
                    (lev & FOLD_LEVEL_NUMBER_MASK) - FOLD_LEVEL_BASE,
                    ((lev >> 16) & FOLD_LEVEL_NUMBER_MASK) - FOLD_LEVEL_BASE,
                    if lev & FOLD_LEVEL_HEADER_FLAG != 0 { " header" } else { "" },
                )
            })
            .collect();
        assert_eq!(expect, &actual);
    }

    #[test]
    fn sub_blocks_and_single_line_if() {
        check_fold(
            srcdoc!(
                "Sub Demo()\n\
                 \x20   If a Then b Else c\n\
                 \x20   If a Then\n\
                 \x20       b()\n\
                 \x20   End If\n\
                 End Sub\n"
            ),
            Dialect::Modern,
            r#"
0: 0 1 header
1: 1 1
2: 1 2 header
3: 2 2
4: 2 1
5: 1 0
6: 0 0"#,
        );
    }

    #[test]
    fn vb6_type_block_requires_the_line_flag() {
        check_fold(
            srcdoc!("Private Type Rec\n    a As Integer\nEnd Type\n"),
            Dialect::Classic,
            r#"
0: 0 1 header
1: 1 1
2: 1 0
3: 0 0"#,
        );
    }

    #[test]
    fn comment_dim_and_const_soft_groups() {
        check_fold(
            srcdoc!(
                "' one\n\
                 ' two\n\
                 Dim a\n\
                 Dim b\n\
                 Sub S()\n\
                 End Sub\n"
            ),
            Dialect::Modern,
            r#"
0: 0 1 header
1: 1 0
2: 0 1 header
3: 1 0
4: 0 1 header
5: 1 0
6: 0 0"#,
        );
    }

    #[test]
    fn preprocessor_region_folds() {
        check_fold(
            srcdoc!("#Region \"R\"\nx = 1\n#End Region\n"),
            Dialect::Modern,
            r#"
0: 0 1 header
1: 1 1
2: 1 0
3: 0 0"#,
        );
    }

    #[test]
    fn while_and_loop_blocks() {
        check_fold(
            srcdoc!(
                "Do\n\
                 \x20   While x\n\
                 \x20       y()\n\
                 \x20   Wend\n\
                 Loop\n"
            ),
            Dialect::Classic,
            r#"
0: 0 1 header
1: 1 2 header
2: 2 2
3: 2 1
4: 1 0
5: 0 0"#,
        );
    }

    #[test]
    fn fold_level_ends_at_base_for_balanced_input() {
        let source = srcdoc!("Module M\nSub S()\nEnd Sub\nEnd Module\n");
        let words = BasicWordLists::standard();
        let mut doc = StyledDocument::new(source);
        let length = doc.len();
        lex(&mut doc, &words, Dialect::Modern, 0, length, Style::Default);
        fold(&mut doc, 0, length, Style::Default);
        let last = doc.line_count() - 1;
        assert_eq!(doc.fold_level(last) >> 16, FOLD_LEVEL_BASE);
    }
}
