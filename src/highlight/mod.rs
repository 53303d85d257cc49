//! Turns Swift source into an ordered list of highlighted spans.

use std::time::Instant;

use crate::{
    errors::HighlightResult,
    pathlib::FilePath,
    syntax::{SwiftParser, SyntaxParser},
};

mod classify;
mod refine;
mod token;
mod trivia;
mod walker;

pub use classify::{category_of, classify};
pub use refine::{refine, starts_uppercase};
pub use token::{HighlightCategory, HighlightToken, Position};
pub use trivia::{classify_trivia, highlight_trivia};
pub use walker::highlight_tree;

/// Highlights a buffer of Swift source with the default parser.
pub fn highlight(source: &[u8]) -> HighlightResult<Vec<HighlightToken>> {
    Highlighter::new().highlight(source)
}

#[derive(Clone, Debug, Default)]
pub struct Highlighter<P = SwiftParser> {
    parser: P,
}

impl Highlighter<SwiftParser> {
    pub fn new() -> Highlighter<SwiftParser> {
        Highlighter {
            parser: SwiftParser,
        }
    }
}

impl<P: SyntaxParser> Highlighter<P> {
    pub fn with_parser(parser: P) -> Highlighter<P> {
        Highlighter { parser }
    }

    /// Fails with a parse error when the source is not UTF-8 or does not
    /// parse. Nothing is returned for a source that fails part way.
    pub fn highlight(&self, source: &[u8]) -> HighlightResult<Vec<HighlightToken>> {
        let start = Instant::now();
        let source = std::str::from_utf8(source)?;
        let tree = self.parser.parse(source)?;
        let tokens = highlight_tree(&tree);
        log::debug!(
            "highlighted {} bytes into {} tokens in {:?}",
            source.len(),
            tokens.len(),
            start.elapsed()
        );
        Ok(tokens)
    }

    /// Reads and highlights a file. The parser is never run when the file
    /// cannot be read.
    pub fn highlight_file(&self, filepath: &FilePath) -> HighlightResult<Vec<HighlightToken>> {
        log::debug!("reading {}", filepath);
        let source = filepath.read_bytes()?;
        self.highlight(&source)
    }
}
