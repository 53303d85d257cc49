use crate::syntax::{SyntaxTree, TokenKind, TokenSyntax};

use super::{
    classify::classify,
    refine::{refine, starts_uppercase},
    token::{HighlightToken, Position},
    trivia::highlight_trivia,
};

/// Emits the leading trivia, the token itself and its trailing trivia, in
/// that order. `previous` is the kind of the token visited before this one.
fn highlight_token(
    token: &TokenSyntax,
    previous: Option<&TokenKind>,
    out: &mut Vec<HighlightToken>,
) {
    let position = Position::new(token.span.start.offset, token.span.end.offset);

    out.extend(highlight_trivia(&token.leading_trivia, token.full_start()));

    if let Some(candidate) = classify(&token.kind, &token.text, position) {
        if !position.is_empty() {
            out.push(refine(candidate, previous, starts_uppercase(&token.text)));
        }
    }

    out.extend(highlight_trivia(&token.trailing_trivia, position.end));
}

/// Walks every token of `tree` in source order. The lookback used for
/// refinement is updated after each token, including tokens that are not
/// highlighted themselves, and never by trivia.
pub fn highlight_tree<T: SyntaxTree + ?Sized>(tree: &T) -> Vec<HighlightToken> {
    let mut out = Vec::new();
    let mut previous: Option<&TokenKind> = None;
    for token in tree.tokens() {
        highlight_token(token, previous, &mut out);
        previous = Some(&token.kind);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::highlight_tree;
    use crate::highlight::token::{HighlightCategory, Position};
    use crate::syntax::{lexer, SourceFile};

    #[test]
    fn trivia_is_positioned_around_its_token() {
        let file = SourceFile::parse("  let x // c\n").unwrap();
        let toks = highlight_tree(&file);
        let got = toks
            .iter()
            .map(|t| (t.category, t.position))
            .collect::<Vec<_>>();
        assert_eq!(
            got,
            vec![
                (HighlightCategory::Unknown, Position::new(0, 2)),
                (HighlightCategory::Keyword, Position::new(2, 5)),
                (HighlightCategory::Unknown, Position::new(5, 6)),
                (HighlightCategory::Identifier, Position::new(6, 7)),
                (HighlightCategory::Unknown, Position::new(7, 8)),
                (HighlightCategory::LineComment, Position::new(8, 12)),
                (HighlightCategory::Newline, Position::new(12, 13)),
            ]
        );
    }

    #[test]
    fn unhighlighted_tokens_still_update_the_lookback() {
        // the prefix `!` emits nothing, but `Bar` no longer follows `=`
        let toks = lexer::tokens("let a = !Bar").unwrap();
        let out = highlight_tree(&toks);
        let bar = out.iter().find(|t| t.text == "Bar").unwrap();
        assert_eq!(bar.category, HighlightCategory::Identifier);
    }

    #[test]
    fn trivia_does_not_break_the_lookback() {
        let file = SourceFile::parse("class /* c */\n  Foo {}").unwrap();
        let out = highlight_tree(&file);
        let foo = out.iter().find(|t| t.text == "Foo").unwrap();
        assert_eq!(foo.category, HighlightCategory::ClassName);
    }

    #[test]
    fn works_over_any_tree() {
        let toks = lexer::tokens("import UIKit").unwrap();
        let out = highlight_tree(&toks);
        assert_eq!(out.last().map(|t| t.category), Some(HighlightCategory::ImportName));
    }
}
