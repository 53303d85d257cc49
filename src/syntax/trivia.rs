use std::fmt;

/// One piece of non-semantic source material. Runs of the same whitespace
/// character are stored as a count.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TriviaPiece {
    Spaces(usize),
    Tabs(usize),
    VerticalTabs(usize),
    Formfeeds(usize),
    Newlines(usize),
    CarriageReturns(usize),
    CarriageReturnLineFeeds(usize),
    Backticks(usize),
    LineComment(String),
    DocLineComment(String),
    BlockComment(String),
    DocBlockComment(String),
    GarbageText(String),
}

impl TriviaPiece {
    /// Length of the piece in bytes.
    pub fn len(&self) -> usize {
        match self {
            TriviaPiece::Spaces(n)
            | TriviaPiece::Tabs(n)
            | TriviaPiece::VerticalTabs(n)
            | TriviaPiece::Formfeeds(n)
            | TriviaPiece::Newlines(n)
            | TriviaPiece::CarriageReturns(n)
            | TriviaPiece::Backticks(n) => *n,
            TriviaPiece::CarriageReturnLineFeeds(n) => 2 * n,
            TriviaPiece::LineComment(text)
            | TriviaPiece::DocLineComment(text)
            | TriviaPiece::BlockComment(text)
            | TriviaPiece::DocBlockComment(text)
            | TriviaPiece::GarbageText(text) => text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn repeated(&self) -> Option<(&'static str, usize)> {
        match self {
            TriviaPiece::Spaces(n) => Some((" ", *n)),
            TriviaPiece::Tabs(n) => Some(("\t", *n)),
            TriviaPiece::VerticalTabs(n) => Some(("\u{0B}", *n)),
            TriviaPiece::Formfeeds(n) => Some(("\u{0C}", *n)),
            TriviaPiece::Newlines(n) => Some(("\n", *n)),
            TriviaPiece::CarriageReturns(n) => Some(("\r", *n)),
            TriviaPiece::CarriageReturnLineFeeds(n) => Some(("\r\n", *n)),
            TriviaPiece::Backticks(n) => Some(("`", *n)),
            _ => None,
        }
    }
}

impl fmt::Display for TriviaPiece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TriviaPiece::LineComment(text)
            | TriviaPiece::DocLineComment(text)
            | TriviaPiece::BlockComment(text)
            | TriviaPiece::DocBlockComment(text)
            | TriviaPiece::GarbageText(text) => write!(f, "{}", text),
            _ => match self.repeated() {
                Some((s, n)) => write!(f, "{}", s.repeat(n)),
                None => Ok(()),
            },
        }
    }
}

/// The trivia attached to one side of a token, in source order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Trivia {
    pieces: Vec<TriviaPiece>,
}

impl Trivia {
    pub fn new() -> Trivia {
        Trivia { pieces: vec![] }
    }

    /// Appends a piece, folding it into the previous one when both are runs
    /// of the same character.
    pub fn push(&mut self, piece: TriviaPiece) {
        use TriviaPiece::*;

        let merged = match (self.pieces.last_mut(), &piece) {
            (Some(Spaces(a)), Spaces(b))
            | (Some(Tabs(a)), Tabs(b))
            | (Some(VerticalTabs(a)), VerticalTabs(b))
            | (Some(Formfeeds(a)), Formfeeds(b))
            | (Some(Newlines(a)), Newlines(b))
            | (Some(CarriageReturns(a)), CarriageReturns(b))
            | (Some(CarriageReturnLineFeeds(a)), CarriageReturnLineFeeds(b))
            | (Some(Backticks(a)), Backticks(b)) => {
                *a += b;
                true
            }
            _ => false,
        };

        if !merged {
            self.pieces.push(piece);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TriviaPiece> {
        self.pieces.iter()
    }

    /// Total length in bytes.
    pub fn len(&self) -> usize {
        self.pieces.iter().map(TriviaPiece::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl From<Vec<TriviaPiece>> for Trivia {
    fn from(pieces: Vec<TriviaPiece>) -> Trivia {
        let mut trivia = Trivia::new();
        for piece in pieces {
            trivia.push(piece);
        }
        trivia
    }
}

impl<'a> IntoIterator for &'a Trivia {
    type Item = &'a TriviaPiece;
    type IntoIter = std::slice::Iter<'a, TriviaPiece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}

impl fmt::Display for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for piece in &self.pieces {
            write!(f, "{}", piece)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Trivia, TriviaPiece};

    #[test]
    fn push_merges_runs_of_the_same_character() {
        let mut trivia = Trivia::new();
        trivia.push(TriviaPiece::Spaces(2));
        trivia.push(TriviaPiece::Spaces(1));
        trivia.push(TriviaPiece::Newlines(1));
        trivia.push(TriviaPiece::LineComment("// a".to_string()));
        trivia.push(TriviaPiece::LineComment("// b".to_string()));
        assert_eq!(
            trivia.iter().cloned().collect::<Vec<_>>(),
            vec![
                TriviaPiece::Spaces(3),
                TriviaPiece::Newlines(1),
                TriviaPiece::LineComment("// a".to_string()),
                TriviaPiece::LineComment("// b".to_string()),
            ]
        );
    }

    #[test]
    fn len_counts_bytes() {
        let trivia = Trivia::from(vec![
            TriviaPiece::CarriageReturnLineFeeds(2),
            TriviaPiece::Tabs(1),
            TriviaPiece::BlockComment("/* é */".to_string()),
        ]);
        assert_eq!(trivia.len(), 4 + 1 + 8);
        assert_eq!(trivia.to_string(), "\r\n\r\n\t/* é */");
    }
}
