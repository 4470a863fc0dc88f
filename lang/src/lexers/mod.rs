//! The incremental lexers and folders.
//!
//! Each language module exposes two resumable entry points with the same
//! shape: `lex(doc, words, start, len, init_style)` classifies every byte in
//! `[start, start + len)` into a style code and records per-line resume
//! state, and `fold(doc, start, len, init_style)` reads the styled bytes
//! back and writes packed fold levels. Starting a batch at any line boundary
//! with the style of the preceding byte reproduces a full scan, provided
//! previously written line states are intact.
//!
//! The design follows the classic editor-lexer shape: a single forward pass
//! over bytes through a [style_context::StyleContext] cursor, with a `match`
//! on the current style as the state machine and a handful of per-line
//! locals reset at each line end.

pub mod basic;
pub mod chars;
pub mod csharp;
pub mod style_context;
pub mod support;
pub mod words;
