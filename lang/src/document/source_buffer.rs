use std::fs::File;

use bstr::BStr;

enum SourceBufferKind<'a> {
    File { buffer: mmap_rs::Mmap },
    Memory { bytes: &'a [u8] },
}

/// Keeps source text and a buffer name in the same object, so they provide
/// the same lifetimes.
///
/// The text is treated as raw bytes throughout the engine; no encoding
/// validation is performed.
pub struct SourceBuffer<'a> {
    kind: SourceBufferKind<'a>,
    file_name: String,
}

impl<'a> SourceBuffer<'a> {
    /// Maps the file at `file_path` into memory.
    pub fn new_from_file(file_path: &std::path::Path) -> Result<SourceBuffer<'_>, mmap_rs::Error> {
        let file = File::open(file_path)?;
        let len = File::metadata(&file)?.len();
        let buffer = unsafe {
            mmap_rs::MmapOptions::new(len.try_into().unwrap())?.with_file(&file, 0).map()?
        };
        let file_name = file_path.display().to_string();
        Ok(SourceBuffer { kind: SourceBufferKind::File { buffer }, file_name })
    }

    pub fn new_from_string(string: &'a str, name: &str) -> SourceBuffer<'a> {
        SourceBuffer::new_from_bytes(string.as_bytes(), name)
    }

    pub fn new_from_bytes(bytes: &'a [u8], name: &str) -> SourceBuffer<'a> {
        SourceBuffer { kind: SourceBufferKind::Memory { bytes }, file_name: String::from(name) }
    }

    pub fn code(&self) -> &BStr {
        match &self.kind {
            SourceBufferKind::File { buffer } => BStr::new(buffer.as_slice()),
            SourceBufferKind::Memory { bytes } => BStr::new(bytes),
        }
    }

    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }
}

/// Builds a borrowed [SourceBuffer] from a string literal, named after the
/// source location of the macro invocation.
#[macro_export]
macro_rules! srcdoc {
    ( $s:literal ) => {
        &$crate::document::SourceBuffer::new_from_string(
            $s,
            const_format::formatcp!("{}:{}:{}", file!(), line!(), column!()),
        )
    };
}
