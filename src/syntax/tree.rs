use crate::{
    errors::{HighlightError, HighlightResult},
    syntax::{
        lexer::Lexer,
        token::{TokenKind, TokenSyntax},
    },
};

/// A parsed source file. Tokens are grouped by their delimiters; the `eof`
/// token holds any trivia after the last real token.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub items: Vec<SyntaxNode>,
    pub eof: TokenSyntax,
}

#[derive(Clone, Debug)]
pub enum SyntaxNode {
    Token(TokenSyntax),
    Group(Group),
}

/// A balanced `( )`, `[ ]` or `{ }` pair, or an interpolation `( ... )`
/// closed by its anchor.
#[derive(Clone, Debug)]
pub struct Group {
    pub open: TokenSyntax,
    pub items: Vec<SyntaxNode>,
    pub close: TokenSyntax,
}

fn closes(open: TokenKind, close: TokenKind) -> bool {
    matches!(
        (open, close),
        (TokenKind::LeftParen, TokenKind::RightParen)
            | (TokenKind::LeftParen, TokenKind::StringInterpolationAnchor)
            | (TokenKind::LeftBrace, TokenKind::RightBrace)
            | (TokenKind::LeftSquareBracket, TokenKind::RightSquareBracket)
    )
}

fn push_node(
    open: &mut Vec<(TokenSyntax, Vec<SyntaxNode>)>,
    root: &mut Vec<SyntaxNode>,
    node: SyntaxNode,
) {
    match open.last_mut() {
        Some((_, items)) => items.push(node),
        None => root.push(node),
    }
}

impl SourceFile {
    pub fn parse(src: &str) -> HighlightResult<SourceFile> {
        let mut lexer = Lexer::new(src);
        let mut root = vec![];
        let mut open: Vec<(TokenSyntax, Vec<SyntaxNode>)> = vec![];

        loop {
            let token = lexer.next_token()?;
            match token.kind {
                TokenKind::LeftParen | TokenKind::LeftBrace | TokenKind::LeftSquareBracket => {
                    open.push((token, vec![]))
                }
                TokenKind::RightParen
                | TokenKind::RightBrace
                | TokenKind::RightSquareBracket
                | TokenKind::StringInterpolationAnchor => {
                    let (open_tok, items) = match open.pop() {
                        Some(frame) => frame,
                        None => {
                            return Err(HighlightError::parse(
                                format!("unexpected closing delimiter {}", token.kind.desc()),
                                token.span,
                            ))
                        }
                    };

                    if !closes(open_tok.kind, token.kind) {
                        return Err(HighlightError::parse(
                            format!(
                                "mismatched closing delimiter {}, expected the {} opened at {} to be closed first",
                                token.kind.desc(),
                                open_tok.kind.desc(),
                                open_tok.span,
                            ),
                            token.span,
                        ));
                    }

                    let group = SyntaxNode::Group(Group {
                        open: open_tok,
                        items,
                        close: token,
                    });
                    push_node(&mut open, &mut root, group);
                }
                TokenKind::Eof => {
                    if let Some((open_tok, _)) = open.last() {
                        return Err(HighlightError::parse(
                            format!("unclosed delimiter {}", open_tok.kind.desc()),
                            open_tok.span,
                        ));
                    }
                    return Ok(SourceFile {
                        items: root,
                        eof: token,
                    });
                }
                _ => push_node(&mut open, &mut root, SyntaxNode::Token(token)),
            }
        }
    }

    /// Visits every token in source order, ending with `eof`.
    pub fn walk(&self) -> TokenWalk<'_> {
        let mut stack = vec![WalkItem::Token(&self.eof)];
        for item in self.items.iter().rev() {
            stack.push(WalkItem::Node(item));
        }
        TokenWalk { stack }
    }
}

#[derive(Clone, Copy)]
enum WalkItem<'a> {
    Node(&'a SyntaxNode),
    Token(&'a TokenSyntax),
}

pub struct TokenWalk<'a> {
    stack: Vec<WalkItem<'a>>,
}

impl<'a> Iterator for TokenWalk<'a> {
    type Item = &'a TokenSyntax;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                WalkItem::Token(token) => return Some(token),
                WalkItem::Node(SyntaxNode::Token(token)) => return Some(token),
                WalkItem::Node(SyntaxNode::Group(group)) => {
                    self.stack.push(WalkItem::Token(&group.close));
                    for item in group.items.iter().rev() {
                        self.stack.push(WalkItem::Node(item));
                    }
                    self.stack.push(WalkItem::Token(&group.open));
                }
            }
        }
    }
}
