//! Swift source as a lossless token tree: every byte of the input belongs to
//! exactly one token or one piece of trivia.

pub mod lexer;
pub mod token;
pub mod tree;
pub mod trivia;

pub use lexer::Lexer;
pub use token::{IntegerBase, Keyword, PoundKeyword, TokenKind, TokenSyntax};
pub use tree::{Group, SourceFile, SyntaxNode, TokenWalk};
pub use trivia::{Trivia, TriviaPiece};

use crate::errors::HighlightResult;

/// Anything that can hand out its tokens in source order.
pub trait SyntaxTree {
    fn tokens(&self) -> Box<dyn Iterator<Item = &TokenSyntax> + '_>;
}

/// Turns source text into a `SyntaxTree`.
pub trait SyntaxParser {
    type Tree: SyntaxTree;

    fn parse(&self, source: &str) -> HighlightResult<Self::Tree>;
}

impl SyntaxTree for SourceFile {
    fn tokens(&self) -> Box<dyn Iterator<Item = &TokenSyntax> + '_> {
        Box::new(self.walk())
    }
}

impl SyntaxTree for Vec<TokenSyntax> {
    fn tokens(&self) -> Box<dyn Iterator<Item = &TokenSyntax> + '_> {
        Box::new(self.iter())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SwiftParser;

impl SyntaxParser for SwiftParser {
    type Tree = SourceFile;

    fn parse(&self, source: &str) -> HighlightResult<SourceFile> {
        log::trace!("parsing {} bytes of swift", source.len());
        SourceFile::parse(source)
    }
}
