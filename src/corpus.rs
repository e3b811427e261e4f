//! Pre-normalized news corpus: one story per line.
//!
//! The corpus is kept as raw bytes. Stage-1 statistics read a lossy UTF-8 view
//! of the whole text; the polarity classifier decodes each line separately so
//! one bad line cannot poison the rest.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{CorpusError, Result};

#[derive(Debug, Clone)]
pub struct Corpus {
    bytes: Arc<[u8]>,
}

impl Corpus {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| CorpusError::from_read(path, e))?;
        let corpus = Self::from_bytes(bytes);
        tracing::info!(
            target: "corpus",
            path = %path.display(),
            bytes = corpus.bytes.len(),
            documents = corpus.document_count(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Whole corpus as text; invalid sequences become U+FFFD, which never
    /// forms part of a token.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Line spans in file order, without line terminators. `\n`, `\r\n` and a
    /// bare `\r` all end a line. A trailing terminator does not add an empty
    /// document; an empty corpus has no documents.
    pub fn documents(&self) -> Documents<'_> {
        Documents { rest: &self.bytes }
    }

    pub fn document_count(&self) -> usize {
        self.documents().count()
    }
}

/// Iterator over the documents of a [`Corpus`].
#[derive(Debug, Clone)]
pub struct Documents<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Documents<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.rest.is_empty() {
            return None;
        }
        let Some(end) = self.rest.iter().position(|b| matches!(b, b'\n' | b'\r')) else {
            return Some(std::mem::take(&mut self.rest));
        };
        let line = &self.rest[..end];
        let crlf = self.rest[end] == b'\r' && self.rest.get(end + 1) == Some(&b'\n');
        self.rest = &self.rest[end + if crlf { 2 } else { 1 }..];
        Some(line)
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::from_bytes(Vec::new())
    }
}
