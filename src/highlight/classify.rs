use crate::syntax::{Keyword, TokenKind};

use super::token::{HighlightCategory, HighlightToken, Position};

/// The category a token kind is drawn as, or `None` for kinds that are not
/// highlighted at all (prefix/postfix operators, `!`, `&`, `#`, EOF).
///
/// Binary operators and contextual keywords land in `Float`. That is how
/// existing consumers of the output have always seen them, so it stays.
pub fn category_of(kind: &TokenKind) -> Option<HighlightCategory> {
    let category = match kind {
        TokenKind::IntegerLiteral(_) => HighlightCategory::Integer,
        TokenKind::FloatingLiteral
        | TokenKind::SpacedBinaryOperator
        | TokenKind::UnspacedBinaryOperator
        | TokenKind::ContextualKeyword => HighlightCategory::Float,
        TokenKind::StringLiteral | TokenKind::StringSegment => HighlightCategory::String,
        TokenKind::StringInterpolationAnchor => HighlightCategory::StringInterpolationAnchor,
        TokenKind::AtSign => HighlightCategory::AtSign,
        TokenKind::Keyword(Keyword::SelfValue) | TokenKind::Keyword(Keyword::Super) => {
            HighlightCategory::SelfOrSuper
        }
        TokenKind::Keyword(Keyword::Any) => HighlightCategory::AnyKeyword,
        TokenKind::Keyword(Keyword::Wildcard) => HighlightCategory::OperatorOrPunctuation,
        TokenKind::Keyword(_) | TokenKind::PoundKeyword(_) => HighlightCategory::Keyword,
        TokenKind::Equal
        | TokenKind::Arrow
        | TokenKind::Comma
        | TokenKind::Period
        | TokenKind::PrefixPeriod
        | TokenKind::Colon
        | TokenKind::Semicolon
        | TokenKind::StringQuote
        // drawn like `"` rather than dropped
        | TokenKind::MultilineStringQuote
        | TokenKind::Backslash
        | TokenKind::InfixQuestionMark
        | TokenKind::PostfixQuestionMark
        | TokenKind::LeftAngle
        | TokenKind::RightAngle
        | TokenKind::LeftBrace
        | TokenKind::RightBrace
        | TokenKind::LeftParen
        | TokenKind::RightParen
        | TokenKind::LeftSquareBracket
        | TokenKind::RightSquareBracket => HighlightCategory::OperatorOrPunctuation,
        // `$0` is drawn as an identifier rather than dropped; it is never refined
        // into a type name since it cannot start with an uppercase letter
        TokenKind::Identifier | TokenKind::DollarIdentifier => HighlightCategory::Identifier,
        TokenKind::PrefixOperator
        | TokenKind::PostfixOperator
        | TokenKind::PrefixAmpersand
        | TokenKind::ExclamationMark
        | TokenKind::Pound
        | TokenKind::Unknown
        | TokenKind::Eof => return None,
    };
    Some(category)
}

pub fn classify(kind: &TokenKind, text: &str, position: Position) -> Option<HighlightToken> {
    category_of(kind).map(|category| HighlightToken::new(text, category, position))
}

#[cfg(test)]
mod tests {
    use super::{category_of, classify};
    use crate::highlight::token::{HighlightCategory, Position};
    use crate::syntax::{IntegerBase, Keyword, PoundKeyword, TokenKind};

    #[test]
    fn literals() {
        for base in &[
            IntegerBase::Binary,
            IntegerBase::Octal,
            IntegerBase::Decimal,
            IntegerBase::Hex,
        ] {
            assert_eq!(
                category_of(&TokenKind::IntegerLiteral(*base)),
                Some(HighlightCategory::Integer)
            );
        }
        assert_eq!(category_of(&TokenKind::FloatingLiteral), Some(HighlightCategory::Float));
        assert_eq!(category_of(&TokenKind::StringSegment), Some(HighlightCategory::String));
        assert_eq!(category_of(&TokenKind::StringLiteral), Some(HighlightCategory::String));
    }

    #[test]
    fn operators_and_contextual_keywords_are_floats() {
        for kind in &[
            TokenKind::SpacedBinaryOperator,
            TokenKind::UnspacedBinaryOperator,
            TokenKind::ContextualKeyword,
        ] {
            assert_eq!(category_of(kind), Some(HighlightCategory::Float));
        }
    }

    #[test]
    fn keywords() {
        assert_eq!(
            category_of(&TokenKind::Keyword(Keyword::SelfValue)),
            Some(HighlightCategory::SelfOrSuper)
        );
        assert_eq!(
            category_of(&TokenKind::Keyword(Keyword::Super)),
            Some(HighlightCategory::SelfOrSuper)
        );
        assert_eq!(
            category_of(&TokenKind::Keyword(Keyword::Any)),
            Some(HighlightCategory::AnyKeyword)
        );
        assert_eq!(
            category_of(&TokenKind::Keyword(Keyword::Wildcard)),
            Some(HighlightCategory::OperatorOrPunctuation)
        );
        for kw in &[Keyword::SelfType, Keyword::Nil, Keyword::True, Keyword::Line, Keyword::Func] {
            assert_eq!(
                category_of(&TokenKind::Keyword(*kw)),
                Some(HighlightCategory::Keyword)
            );
        }
        assert_eq!(
            category_of(&TokenKind::PoundKeyword(PoundKeyword::Endif)),
            Some(HighlightCategory::Keyword)
        );
    }

    #[test]
    fn multiline_quotes_and_dollar_identifiers_are_drawn() {
        assert_eq!(
            category_of(&TokenKind::MultilineStringQuote),
            category_of(&TokenKind::StringQuote)
        );
        assert_eq!(
            category_of(&TokenKind::DollarIdentifier),
            Some(HighlightCategory::Identifier)
        );
    }

    #[test]
    fn unhighlighted_kinds_emit_nothing() {
        for kind in &[
            TokenKind::Eof,
            TokenKind::PrefixOperator,
            TokenKind::PostfixOperator,
            TokenKind::ExclamationMark,
            TokenKind::PrefixAmpersand,
            TokenKind::Pound,
            TokenKind::Unknown,
        ] {
            assert_eq!(classify(kind, "!", Position::new(0, 1)), None);
        }
    }

    #[test]
    fn classify_keeps_text_and_position() {
        let tok = classify(&TokenKind::AtSign, "@", Position::new(4, 5)).unwrap();
        assert_eq!(tok.text, "@");
        assert_eq!(tok.category, HighlightCategory::AtSign);
        assert_eq!(tok.position, Position::new(4, 5));
    }
}
