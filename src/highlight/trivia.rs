use crate::syntax::{Trivia, TriviaPiece};

use super::token::{HighlightCategory, HighlightToken, Position};

/// Highlights one trivia piece occupying `position`. Backticks and garbage
/// text are never highlighted.
pub fn classify_trivia(piece: &TriviaPiece, position: Position) -> Option<HighlightToken> {
    let category = match piece {
        TriviaPiece::Spaces(_)
        | TriviaPiece::Tabs(_)
        | TriviaPiece::VerticalTabs(_)
        | TriviaPiece::Formfeeds(_) => HighlightCategory::Unknown,
        TriviaPiece::Newlines(_)
        | TriviaPiece::CarriageReturns(_)
        | TriviaPiece::CarriageReturnLineFeeds(_) => HighlightCategory::Newline,
        TriviaPiece::LineComment(_) | TriviaPiece::DocLineComment(_) => {
            HighlightCategory::LineComment
        }
        TriviaPiece::BlockComment(_) | TriviaPiece::DocBlockComment(_) => {
            HighlightCategory::BlockComment
        }
        TriviaPiece::Backticks(_) | TriviaPiece::GarbageText(_) => return None,
    };
    Some(HighlightToken::new(piece.to_string(), category, position))
}

/// Highlights a run of trivia whose first byte is at `start`. Every piece
/// advances the cursor, including the ones that emit nothing.
pub fn highlight_trivia(trivia: &Trivia, start: usize) -> Vec<HighlightToken> {
    trivia
        .iter()
        .scan(start, |cursor, piece| {
            let position = Position::new(*cursor, *cursor + piece.len());
            *cursor = position.end;
            Some(classify_trivia(piece, position))
        })
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{classify_trivia, highlight_trivia};
    use crate::highlight::token::{HighlightCategory, Position};
    use crate::syntax::{Trivia, TriviaPiece};

    #[test]
    fn whitespace_is_reconstructed() {
        let tok = classify_trivia(&TriviaPiece::VerticalTabs(2), Position::new(0, 2)).unwrap();
        assert_eq!(tok.text, "\u{0B}\u{0B}");
        assert_eq!(tok.category, HighlightCategory::Unknown);

        let tok = classify_trivia(&TriviaPiece::CarriageReturnLineFeeds(2), Position::new(0, 4))
            .unwrap();
        assert_eq!(tok.text, "\r\n\r\n");
        assert_eq!(tok.category, HighlightCategory::Newline);
    }

    #[test]
    fn comments_keep_their_markers() {
        let tok = classify_trivia(
            &TriviaPiece::DocLineComment("/// doc".to_string()),
            Position::new(0, 7),
        )
        .unwrap();
        assert_eq!(tok.category, HighlightCategory::LineComment);
        assert_eq!(tok.text, "/// doc");

        let tok = classify_trivia(
            &TriviaPiece::DocBlockComment("/** doc */".to_string()),
            Position::new(0, 10),
        )
        .unwrap();
        assert_eq!(tok.category, HighlightCategory::BlockComment);
    }

    #[test]
    fn cursor_advances_past_dropped_pieces() {
        let trivia = Trivia::from(vec![
            TriviaPiece::Spaces(1),
            TriviaPiece::Backticks(1),
            TriviaPiece::GarbageText("§".to_string()),
            TriviaPiece::Newlines(2),
        ]);
        let toks = highlight_trivia(&trivia, 10);
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].position, Position::new(10, 11));
        // one backtick byte, then two bytes of `§`
        assert_eq!(toks[1].position, Position::new(14, 16));
        assert_eq!(toks[1].text, "\n\n");
    }
}
