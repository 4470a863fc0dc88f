#[cfg(test)]
mod tests {
    use crate::document::{Document, SourceBuffer, StyledDocument};
    use crate::lexers::basic::{lex, Dialect, Style};
    use crate::lexers::style_context::StyleCode;
    use crate::lexers::words::BasicWordLists;
    use crate::srcdoc;

    /// Lexes `source` in `dialect` from the top and compares a dump of the
    /// style runs, one per line as the style name plus the run text.
    fn check_styles(source: &SourceBuffer, dialect: Dialect, expect: &str) {
        let words = BasicWordLists::standard();
        let mut doc = StyledDocument::new(source);
        let length = doc.len();
        lex(&mut doc, &words, dialect, 0, length, Style::Default);
        let actual: String = doc
            .style_runs()
            .map(|(start, len, style)| {
                format!(
                    "\n{:?} {:?}",
                    Style::from_bits(style),
                    doc.text_range(start, start + len)
                )
            })
            .collect();
        assert_eq!(expect, &actual);
    }

    fn lexed<'a>(source: &'a SourceBuffer<'a>, dialect: Dialect) -> StyledDocument<'a> {
        let words = BasicWordLists::standard();
        let mut doc = StyledDocument::new(source);
        let length = doc.len();
        lex(&mut doc, &words, dialect, 0, length, Style::Default);
        doc
    }

    #[test]
    fn interpolated_string_with_format_specifier() {
        let source = srcdoc!("Dim x = $\"a={v:N2}b\"\n");
        check_styles(
            source,
            Dialect::Modern,
            r#"
Keyword "Dim"
Default " "
Identifier "x"
Default " "
Operator "="
Default " "
InterpolatedString "$\"a="
Operator2 "{"
Identifier "v"
FormatSpecifier ":N2"
Operator2 "}"
InterpolatedString "b\""
Default "\n""#,
        );
        let doc = lexed(source, Dialect::Modern);
        assert_eq!(doc.line_states()[0], 2); // Dim line
    }

    #[test]
    fn doubled_quotes_and_char_suffix_stay_in_the_literal() {
        check_styles(
            srcdoc!("s = \"a\"\"b\"c\n"),
            Dialect::Modern,
            r#"
Identifier "s"
Default " "
Operator "="
Default " "
String "\"a\"\"b\"c"
Default "\n""#,
        );
    }

    #[test]
    fn brace_escapes_stay_string_content() {
        check_styles(
            srcdoc!("s = $\"a{{b}}c\"\n"),
            Dialect::Modern,
            r#"
Identifier "s"
Default " "
Operator "="
Default " "
InterpolatedString "$\"a{{b}}c\""
Default "\n""#,
        );
    }

    #[test]
    fn number_type_suffix_is_consumed() {
        check_styles(
            srcdoc!("n = 42&\n"),
            Dialect::Modern,
            r#"
Identifier "n"
Default " "
Operator "="
Default " "
Number "42&"
Default "\n""#,
        );
    }

    #[test]
    fn ampersand_number_prefix() {
        check_styles(
            srcdoc!("mask = &HFF\n"),
            Dialect::Modern,
            r#"
Identifier "mask"
Default " "
Operator "="
Default " "
Number "&HFF"
Default "\n""#,
        );
    }

    #[test]
    fn ampersand_after_identifier_is_concatenation() {
        check_styles(
            srcdoc!("q = x &HFF\n"),
            Dialect::Modern,
            r#"
Identifier "q"
Default " "
Operator "="
Default " "
Identifier "x"
Default " "
Operator "&"
Identifier "HFF"
Default "\n""#,
        );
    }

    #[test]
    fn file_number_after_close() {
        check_styles(
            srcdoc!("Close #1\n"),
            Dialect::Classic,
            r##"
Keyword "Close"
Default " "
Number "#1"
Default "\n""##,
        );
    }

    #[test]
    fn date_literal() {
        check_styles(
            srcdoc!("d = #10/23/2003#\n"),
            Dialect::Classic,
            r##"
Identifier "d"
Default " "
Operator "="
Default " "
Date "#10/23/2003#"
Default "\n""##,
        );
    }

    #[test]
    fn preprocessor_directives() {
        check_styles(
            srcdoc!("#If DEBUG Then\n#End If\n"),
            Dialect::Modern,
            r##"
Preprocessor "#If"
Default " "
Identifier "DEBUG"
Default " "
PreprocessorWord "Then"
Default "\n"
Preprocessor "#End"
Default " "
PreprocessorWord "If"
Default "\n""##,
        );
    }

    #[test]
    fn rem_comments_out_the_rest_of_the_line() {
        check_styles(
            srcdoc!("Rem old stuff\n"),
            Dialect::Classic,
            r#"
CommentLine "Rem old stuff\n""#,
        );
    }

    #[test]
    fn bracketed_identifier_skips_keyword_lookup() {
        check_styles(
            srcdoc!("[end] = 5\n"),
            Dialect::Modern,
            r#"
Identifier "[end]"
Default " "
Operator "="
Default " "
Number "5"
Default "\n""#,
        );
    }

    #[test]
    fn task_marker_in_comment() {
        check_styles(
            srcdoc!("' TODO later\n"),
            Dialect::Modern,
            r#"
CommentLine "' "
TaskMarker "TODO"
CommentLine " later\n""#,
        );
    }

    #[test]
    fn sub_names_the_function_definition() {
        check_styles(
            srcdoc!("Sub Render()\n"),
            Dialect::Modern,
            r#"
Keyword "Sub"
Default " "
FunctionDefinition "Render"
Operator "("
Operator ")"
Default "\n""#,
        );
    }

    #[test]
    fn line_continuation_suppresses_label_detection() {
        let source = srcdoc!("Dim a, _\nb:\nlbl:\nx = 1\n");
        check_styles(
            source,
            Dialect::Modern,
            r#"
Keyword "Dim"
Default " "
Identifier "a"
Operator ","
Default " "
LineContinuation "_"
Default "\n"
Identifier "b"
Operator ":"
Default "\n"
Label "lbl"
Operator ":"
Default "\n"
Identifier "x"
Default " "
Operator "="
Default " "
Number "1"
Default "\n""#,
        );
        let doc = lexed(source, Dialect::Modern);
        assert_eq!(doc.line_states()[0], 2 | (1 << 3));
        assert_eq!(doc.line_states()[1], 0);
    }

    #[test]
    fn classic_comment_continuation_forces_comment_line() {
        let source = srcdoc!("' first _\nsecond\nx = 1\n");
        check_styles(
            source,
            Dialect::Classic,
            r#"
CommentLine "' first "
LineContinuation "_"
CommentLine "\nsecond\n"
Identifier "x"
Default " "
Operator "="
Default " "
Number "1"
Default "\n""#,
        );
        let doc = lexed(source, Dialect::Classic);
        assert_eq!(doc.line_states()[0], 1 | (1 << 3));
        assert_eq!(doc.line_states()[1], 1);
    }

    #[test]
    fn classic_strings_close_at_line_end() {
        check_styles(
            srcdoc!("s = \"open\nt = 1\n"),
            Dialect::Classic,
            r#"
Identifier "s"
Default " "
Operator "="
Default " "
String "\"open\n"
Identifier "t"
Default " "
Operator "="
Default " "
Number "1"
Default "\n""#,
        );
    }

    #[test]
    fn if_operator_is_not_a_statement_keyword() {
        check_styles(
            srcdoc!("y = If(a, b)\n"),
            Dialect::Modern,
            r#"
Identifier "y"
Default " "
Operator "="
Default " "
ContextKeyword "If"
Operator "("
Identifier "a"
Operator ","
Default " "
Identifier "b"
Operator ")"
Default "\n""#,
        );
    }

    #[test]
    fn interpolation_spanning_lines_sets_the_line_bit() {
        let source = srcdoc!("s = $\"v={\na}\"\n");
        let doc = lexed(source, Dialect::Modern);
        assert_eq!(doc.line_states()[0] & (1 << 4), 1 << 4);
        assert_eq!(doc.line_states()[1] & (1 << 4), 0);
    }
}
