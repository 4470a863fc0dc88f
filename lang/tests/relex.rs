//! End-to-end properties of the lexers and folders: restarting a scan from
//! any line boundary must reproduce the full scan byte for byte.

use siderite::document::{Document, SourceBuffer, StyledDocument, FOLD_LEVEL_BASE};
use siderite::lexers::style_context::StyleCode;
use siderite::lexers::words::{BasicWordLists, CSharpWordLists};
use siderite::lexers::{basic, csharp};

const CSHARP_SAMPLE: &str = r#"using System;
using System.Text;

namespace Demo
{
    /// <summary>Entry point.</summary>
    public class Program
    {
        // TODO handle args
        private const string Banner = "hi\tthere";

        static int Main()
        {
            var who = "world";
            var msg = $"hello {who,10:N0}!";
            var path = @"C:\tmp\x";
            var raw = """
                no "escapes" here
                """;
            /* block
               comment */
            #region Body
            if (msg.Length > 2)
            {
                Console.WriteLine(msg);
            }
            #endregion
            return 0;
        }
    }
}
"#;

const BASIC_SAMPLE: &str = r#"Imports System

Module Program
    ' NOTE startup
    Dim total As Integer
    Dim a, _
        b
    Const Greeting = "hey"

    Sub Main()
        Dim msg = $"v={total,4:N0}!"
        If total > 0 Then
            Render(msg)
        End If
        While total < 3
            total += 1
        End While
    End Sub

    Sub Render(text As String)
        Console.WriteLine(text)
    End Sub
End Module
"#;

fn csharp_lex_full(doc: &mut StyledDocument, words: &CSharpWordLists) {
    let length = doc.len();
    csharp::lex(doc, words, 0, length, csharp::Style::Default);
}

fn basic_lex_full(doc: &mut StyledDocument, words: &BasicWordLists) {
    let length = doc.len();
    basic::lex(doc, words, basic::Dialect::Modern, 0, length, basic::Style::Default);
}

#[test]
fn csharp_relex_from_every_line_boundary() {
    let source = SourceBuffer::new_from_string(CSHARP_SAMPLE, "csharp_sample");
    let words = CSharpWordLists::standard();
    let mut doc = StyledDocument::new(&source);
    csharp_lex_full(&mut doc, &words);
    let styles = doc.styles().to_vec();
    let states = doc.line_states().to_vec();

    let length = doc.len();
    for line in 1..doc.line_count() {
        let start = doc.line_start(line);
        if start >= length {
            continue;
        }
        let init = csharp::Style::from_bits(doc.style_at(start - 1));
        csharp::lex(&mut doc, &words, start, length - start, init);
        assert_eq!(doc.styles(), &styles[..], "styles diverge relexing from line {}", line);
        assert_eq!(doc.line_states(), &states[..], "states diverge relexing from line {}", line);
    }
}

#[test]
fn basic_relex_from_every_line_boundary() {
    let source = SourceBuffer::new_from_string(BASIC_SAMPLE, "basic_sample");
    let words = BasicWordLists::standard();
    let mut doc = StyledDocument::new(&source);
    basic_lex_full(&mut doc, &words);
    let styles = doc.styles().to_vec();
    let states = doc.line_states().to_vec();

    let length = doc.len();
    for line in 1..doc.line_count() {
        let start = doc.line_start(line);
        if start >= length {
            continue;
        }
        let init = basic::Style::from_bits(doc.style_at(start - 1));
        basic::lex(&mut doc, &words, basic::Dialect::Modern, start, length - start, init);
        assert_eq!(doc.styles(), &styles[..], "styles diverge relexing from line {}", line);
        assert_eq!(doc.line_states(), &states[..], "states diverge relexing from line {}", line);
    }
}

#[test]
fn csharp_refold_from_every_line_boundary() {
    let source = SourceBuffer::new_from_string(CSHARP_SAMPLE, "csharp_sample");
    let words = CSharpWordLists::standard();
    let mut doc = StyledDocument::new(&source);
    csharp_lex_full(&mut doc, &words);
    let length = doc.len();
    csharp::fold(&mut doc, 0, length, csharp::Style::Default);
    let levels = doc.fold_levels().to_vec();

    for line in 1..doc.line_count() {
        let start = doc.line_start(line);
        if start >= length {
            continue;
        }
        let init = csharp::Style::from_bits(doc.style_at(start - 1));
        csharp::fold(&mut doc, start, length - start, init);
        assert_eq!(doc.fold_levels(), &levels[..], "levels diverge refolding from line {}", line);
    }
}

#[test]
fn basic_refold_from_every_line_boundary() {
    let source = SourceBuffer::new_from_string(BASIC_SAMPLE, "basic_sample");
    let words = BasicWordLists::standard();
    let mut doc = StyledDocument::new(&source);
    basic_lex_full(&mut doc, &words);
    let length = doc.len();
    basic::fold(&mut doc, 0, length, basic::Style::Default);
    let levels = doc.fold_levels().to_vec();

    for line in 1..doc.line_count() {
        let start = doc.line_start(line);
        if start >= length {
            continue;
        }
        let init = basic::Style::from_bits(doc.style_at(start - 1));
        basic::fold(&mut doc, start, length - start, init);
        assert_eq!(doc.fold_levels(), &levels[..], "levels diverge refolding from line {}", line);
    }
}

#[test]
fn every_byte_gets_exactly_one_style() {
    let source = SourceBuffer::new_from_string(CSHARP_SAMPLE, "csharp_sample");
    let words = CSharpWordLists::standard();
    let mut doc = StyledDocument::new(&source);
    let length = doc.len();
    doc.set_style_range(0, length, 0xffff);
    csharp_lex_full(&mut doc, &words);
    assert!(doc.styles().iter().all(|&style| style != 0xffff));

    let source = SourceBuffer::new_from_string(BASIC_SAMPLE, "basic_sample");
    let words = BasicWordLists::standard();
    let mut doc = StyledDocument::new(&source);
    let length = doc.len();
    doc.set_style_range(0, length, 0xffff);
    basic_lex_full(&mut doc, &words);
    assert!(doc.styles().iter().all(|&style| style != 0xffff));
}

#[test]
fn interpolation_stack_drains_on_well_formed_input() {
    let source = SourceBuffer::new_from_string(CSHARP_SAMPLE, "csharp_sample");
    let words = CSharpWordLists::standard();
    let mut doc = StyledDocument::new(&source);
    csharp_lex_full(&mut doc, &words);
    // No line ends with an interpolation hole still open.
    assert!(doc.line_states().iter().all(|&state| state & (1 << 2) == 0));
}

#[test]
fn fold_levels_return_to_base() {
    let source = SourceBuffer::new_from_string(CSHARP_SAMPLE, "csharp_sample");
    let words = CSharpWordLists::standard();
    let mut doc = StyledDocument::new(&source);
    csharp_lex_full(&mut doc, &words);
    let length = doc.len();
    csharp::fold(&mut doc, 0, length, csharp::Style::Default);
    let last = doc.line_count() - 1;
    assert_eq!(doc.fold_level(last) >> 16, FOLD_LEVEL_BASE);

    let source = SourceBuffer::new_from_string(BASIC_SAMPLE, "basic_sample");
    let words = BasicWordLists::standard();
    let mut doc = StyledDocument::new(&source);
    basic_lex_full(&mut doc, &words);
    let length = doc.len();
    basic::fold(&mut doc, 0, length, basic::Style::Default);
    let last = doc.line_count() - 1;
    assert_eq!(doc.fold_level(last) >> 16, FOLD_LEVEL_BASE);
}

#[test]
fn raw_string_needs_the_exact_closing_run() {
    // Opened with four quotes: inner runs of two stay literal, the string
    // ends at the first run of four.
    let source = SourceBuffer::new_from_string("x = \"\"\"\"a\"\"b\"\"\"\";\n", "raw");
    let words = CSharpWordLists::standard();
    let mut doc = StyledDocument::new(&source);
    csharp_lex_full(&mut doc, &words);
    let raw = csharp::Style::RawStringSl.bits();
    assert_eq!(doc.style_at(4), raw);
    assert_eq!(doc.style_at(9), raw); // inner "" is content
    assert_eq!(doc.style_at(15), raw); // final quote of the closing run
    assert_eq!(doc.style_at(16), csharp::Style::Operator.bits());
}
