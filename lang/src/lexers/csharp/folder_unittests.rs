#[cfg(test)]
mod tests {
    use crate::document::{
        Document, SourceBuffer, StyledDocument, FOLD_LEVEL_BASE, FOLD_LEVEL_HEADER_FLAG,
        FOLD_LEVEL_NUMBER_MASK,
    };
    use crate::lexers::csharp::{fold, lex, Style};
    use crate::lexers::words::CSharpWordLists;
    use crate::srcdoc;

    /// Lexes and folds `source`, then compares a per-line dump of
    /// base-relative levels: `line: current next` plus a header marker.
    fn check_fold(source: &SourceBuffer, expect: &str) {
        let words = CSharpWordLists::standard();
        let mut doc = StyledDocument::new(source);
        let length = doc.len();
        lex(&mut doc, &words, 0, length, Style::Default);
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
    fn braces_usings_comments_and_allman_headers() {
        check_fold(
            srcdoc!(
                "using System;\n\
                 using System.IO;\n\
                 \n\
                 class C\n\
                 {\n\
                 \x20   // one\n\
                 \x20   // two\n\
                 \x20   void M()\n\
                 \x20   {\n\
                 \x20       if (x)\n\
                 \x20       {\n\
                 \x20           y();\n\
                 \x20       }\n\
                 \x20   }\n\
                 }\n"
            ),
            r#"
0: 0 1 header
1: 1 0
2: 0 0
3: 0 1 header
4: 1 1
5: 1 2 header
6: 2 1
7: 1 2 header
8: 2 2
9: 2 3 header
10: 3 3
11: 3 3
12: 3 2
13: 2 1
14: 1 0
15: 0 0"#,
        );
    }

    #[test]
    fn region_directives_fold() {
        check_fold(
            srcdoc!("#region R\nint a;\n#endregion\n"),
            r#"
0: 0 1 header
1: 1 1
2: 1 0
3: 0 0"#,
        );
    }

    #[test]
    fn block_comment_folds_over_its_span() {
        check_fold(
            srcdoc!("/* a\n   b */\nint x;\n"),
            r#"
0: 0 1 header
1: 1 0
2: 0 0
3: 0 0"#,
        );
    }

    #[test]
    fn multi_line_raw_string_folds() {
        check_fold(
            srcdoc!("var s = \"\"\"\ntext\n\"\"\";\n"),
            r#"
0: 0 1 header
1: 1 1
2: 1 0
3: 0 0"#,
        );
    }

    #[test]
    fn fold_level_ends_at_base_for_balanced_input() {
        let source = srcdoc!("class A\n{\n  void F() { g(); }\n}\n");
        let words = CSharpWordLists::standard();
        let mut doc = StyledDocument::new(source);
        let length = doc.len();
        lex(&mut doc, &words, 0, length, Style::Default);
        fold(&mut doc, 0, length, Style::Default);
        let last = doc.line_count() - 1;
        assert_eq!(doc.fold_level(last) >> 16, FOLD_LEVEL_BASE);
    }
}
