#![no_main]

use libfuzzer_sys::fuzz_target;

use siderite::document::{Document, SourceBuffer, StyledDocument};
use siderite::lexers::basic;
use siderite::lexers::words::BasicWordLists;

fuzz_target!(|data: &[u8]| {
    // The first byte selects the dialect, the rest is the document.
    let (dialect, code) = match data.split_first() {
        Some((&selector, code)) => (basic::Dialect::from_property(selector as i32 % 3), code),
        None => return,
    };
    let source = SourceBuffer::new_from_bytes(code, "fuzz_targets/lex_basic.rs");
    let mut doc = StyledDocument::new(&source);
    let words = BasicWordLists::standard();
    let length = doc.len();
    basic::lex(&mut doc, &words, dialect, 0, length, basic::Style::Default);
    basic::fold(&mut doc, 0, length, basic::Style::Default);
});
