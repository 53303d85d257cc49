use crate::syntax::{Keyword, TokenKind};

use super::token::{HighlightCategory, HighlightToken};

pub fn starts_uppercase(text: &str) -> bool {
    text.chars().next().map_or(false, char::is_uppercase)
}

/// Upgrades an identifier to a class, function or import name based on the
/// kind of the token before it. Anything that is not an identifier passes
/// through untouched.
pub fn refine(
    mut candidate: HighlightToken,
    previous: Option<&TokenKind>,
    starts_uppercase: bool,
) -> HighlightToken {
    if candidate.category != HighlightCategory::Identifier {
        return candidate;
    }

    let previous = match previous {
        Some(kind) => kind,
        None => return candidate,
    };

    let refined = match previous {
        TokenKind::Keyword(Keyword::Import) => Some(HighlightCategory::ImportName),
        TokenKind::Keyword(Keyword::Func) => Some(HighlightCategory::FunctionName),
        TokenKind::Keyword(Keyword::Class)
        | TokenKind::Keyword(Keyword::Enum)
        | TokenKind::Keyword(Keyword::Struct)
        | TokenKind::Keyword(Keyword::Protocol)
        | TokenKind::Keyword(Keyword::Is)
        | TokenKind::Keyword(Keyword::As)
        | TokenKind::Period
        | TokenKind::Comma
        | TokenKind::Equal
        | TokenKind::LeftSquareBracket
            if starts_uppercase =>
        {
            Some(HighlightCategory::ClassName)
        }
        TokenKind::Keyword(Keyword::Typealias) | TokenKind::Colon => {
            Some(HighlightCategory::ClassName)
        }
        _ => None,
    };

    if let Some(category) = refined {
        log::trace!("{} refined to {} after {}", candidate.text, category, previous);
        candidate.category = category;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::{refine, starts_uppercase};
    use crate::highlight::token::{HighlightCategory, HighlightToken, Position};
    use crate::syntax::{Keyword, TokenKind};

    fn ident(text: &str) -> HighlightToken {
        HighlightToken::new(text, HighlightCategory::Identifier, Position::new(0, text.len()))
    }

    fn refined(previous: TokenKind, text: &str) -> HighlightCategory {
        refine(ident(text), Some(&previous), starts_uppercase(text)).category
    }

    #[test]
    fn import_and_func_ignore_case() {
        assert_eq!(
            refined(TokenKind::Keyword(Keyword::Import), "os"),
            HighlightCategory::ImportName
        );
        assert_eq!(
            refined(TokenKind::Keyword(Keyword::Func), "Make"),
            HighlightCategory::FunctionName
        );
    }

    #[test]
    fn type_positions_need_an_uppercase_start() {
        for previous in &[
            TokenKind::Keyword(Keyword::Class),
            TokenKind::Keyword(Keyword::Enum),
            TokenKind::Keyword(Keyword::Struct),
            TokenKind::Keyword(Keyword::Protocol),
            TokenKind::Keyword(Keyword::Is),
            TokenKind::Keyword(Keyword::As),
            TokenKind::Period,
            TokenKind::Comma,
            TokenKind::Equal,
            TokenKind::LeftSquareBracket,
        ] {
            assert_eq!(refined(*previous, "Foo"), HighlightCategory::ClassName);
            assert_eq!(refined(*previous, "foo"), HighlightCategory::Identifier);
        }
    }

    #[test]
    fn typealias_and_colon_always_name_a_type() {
        assert_eq!(
            refined(TokenKind::Keyword(Keyword::Typealias), "handler"),
            HighlightCategory::ClassName
        );
        assert_eq!(refined(TokenKind::Colon, "int"), HighlightCategory::ClassName);
    }

    #[test]
    fn only_identifiers_are_refined() {
        let tok = HighlightToken::new("1", HighlightCategory::Integer, Position::new(0, 1));
        let out = refine(tok.clone(), Some(&TokenKind::Colon), false);
        assert_eq!(out, tok);
        assert_eq!(refine(ident("x"), None, false).category, HighlightCategory::Identifier);
        assert_eq!(
            refined(TokenKind::PrefixPeriod, "Foo"),
            HighlightCategory::Identifier
        );
    }

    #[test]
    fn uppercase_check_handles_unicode_and_empty_text() {
        assert!(starts_uppercase("Élan"));
        assert!(!starts_uppercase("élan"));
        assert!(!starts_uppercase("_Foo"));
        assert!(!starts_uppercase(""));
    }
}
