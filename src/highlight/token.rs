use std::fmt;

use serde::{Serialize, Serializer};

/// Half-open byte range into the source buffer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

impl Position {
    pub fn new(start: usize, end: usize) -> Position {
        Position { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// What a span of source should be drawn as. The discriminants are part of
/// the serialized format and must not be reordered.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum HighlightCategory {
    ClassName = 0,
    FunctionName,
    ImportName,
    Identifier,
    Integer,
    Float,
    Keyword,
    String,
    AtSign,
    SelfOrSuper,
    AnyKeyword,
    StringInterpolationAnchor,
    LineComment,
    BlockComment,
    OperatorOrPunctuation,
    Newline,
    Unknown,
}

impl HighlightCategory {
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            HighlightCategory::ClassName => "className",
            HighlightCategory::FunctionName => "functionName",
            HighlightCategory::ImportName => "importName",
            HighlightCategory::Identifier => "identifier",
            HighlightCategory::Integer => "integer",
            HighlightCategory::Float => "float",
            HighlightCategory::Keyword => "keyword",
            HighlightCategory::String => "string",
            HighlightCategory::AtSign => "atSign",
            HighlightCategory::SelfOrSuper => "selfOrSuper",
            HighlightCategory::AnyKeyword => "anyKeyword",
            HighlightCategory::StringInterpolationAnchor => "stringInterpolationAnchor",
            HighlightCategory::LineComment => "lineComment",
            HighlightCategory::BlockComment => "blockComment",
            HighlightCategory::OperatorOrPunctuation => "operatorOrPunctuation",
            HighlightCategory::Newline => "newline",
            HighlightCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HighlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for HighlightCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.ordinal())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct HighlightToken {
    #[serde(rename = "string")]
    pub text: String,
    #[serde(rename = "tokenType")]
    pub category: HighlightCategory,
    pub position: Position,
}

impl HighlightToken {
    pub fn new<S: Into<String>>(
        text: S,
        category: HighlightCategory,
        position: Position,
    ) -> HighlightToken {
        HighlightToken {
            text: text.into(),
            category,
            position,
        }
    }
}

impl fmt::Display for HighlightToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {:?}", self.position, self.category, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::{HighlightCategory, HighlightToken, Position};

    #[test]
    fn categories_serialize_as_ordinals() {
        assert_eq!(HighlightCategory::ClassName.ordinal(), 0);
        assert_eq!(HighlightCategory::Keyword.ordinal(), 6);
        assert_eq!(HighlightCategory::Unknown.ordinal(), 16);
        assert_eq!(serde_json::to_string(&HighlightCategory::Newline).unwrap(), "15");
    }

    #[test]
    fn token_json_uses_interchange_field_names() {
        let tok = HighlightToken::new("let", HighlightCategory::Keyword, Position::new(0, 3));
        let value = serde_json::to_value(&tok).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "string": "let",
                "tokenType": 6,
                "position": { "start": 0, "end": 3 },
            })
        );
    }
}
