#![no_main]

use libfuzzer_sys::fuzz_target;

use siderite::document::{Document, SourceBuffer, StyledDocument};
use siderite::lexers::csharp;
use siderite::lexers::words::CSharpWordLists;

fuzz_target!(|data: &[u8]| {
    let source = SourceBuffer::new_from_bytes(data, "fuzz_targets/lex_csharp.rs");
    let mut doc = StyledDocument::new(&source);
    let words = CSharpWordLists::standard();
    let length = doc.len();
    csharp::lex(&mut doc, &words, 0, length, csharp::Style::Default);
    csharp::fold(&mut doc, 0, length, csharp::Style::Default);
});
