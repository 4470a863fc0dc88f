//! Incremental syntax highlighting and code folding for editors.
//!
//! Siderite classifies every byte of a document into a style code and assigns
//! every line a structural fold level, for two language families: C# (nested
//! interpolated strings, raw string literals, XML doc comments, a
//! preprocessor) and the Basic family (VB.NET, classic VB/VBA, VBScript).
//!
//! Both the lexers and the folders are *incremental*: they can restart from
//! any line boundary and produce output identical to a full rescan, using a
//! packed 32-bit state word stored per line. The host editor supplies text
//! access, style storage, line states, fold levels, and keyword tables; see
//! [document::Document] and the per-language entry points in [lexers].
//!

#[macro_use]
extern crate static_assertions;

pub mod document;
pub mod lexers;
