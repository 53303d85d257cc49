use fnv::FnvHashSet;

use crate::{
    errors::{HighlightError, HighlightResult},
    span::{Pos, Span},
    syntax::{
        token::{
            IntegerBase, Keyword, TokenKind, TokenSyntax, KEYWORD_TABLE, POUND_KEYWORD_TABLE,
        },
        trivia::{Trivia, TriviaPiece},
    },
};

/// Words that only act as keywords inside accessor blocks.
const ACCESSORS: &[&str] = &["get", "set", "willSet", "didSet"];

/// Declaration modifiers that are ordinary identifiers anywhere else.
const MODIFIERS: &[&str] = &[
    "mutating",
    "nonmutating",
    "override",
    "convenience",
    "final",
    "lazy",
    "weak",
    "unowned",
    "optional",
    "required",
    "dynamic",
    "infix",
    "prefix",
    "postfix",
    "open",
    "indirect",
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    Code,
    /// Between the `\` and the `(` of an interpolation.
    InterpolationOpen { open: Pos },
    /// Inside `\(...)`; `depth` counts the parens opened since.
    Interpolation { depth: usize, open: Pos },
    /// Inside a string literal that was opened at `open`.
    Str { multiline: bool, open: Pos },
}

pub struct Lexer {
    src: Vec<char>,
    idx: usize,
    pos: Pos,
    modes: Vec<Mode>,
    angle_openers: FnvHashSet<usize>,
    angle_closers: FnvHashSet<usize>,
    finished: bool,
}

fn is_valid_id_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '/' | '=' | '-' | '+' | '!' | '*' | '%' | '<' | '>' | '&' | '|' | '^' | '~' | '?'
    )
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{0B}' | '\u{0C}')
}

/// Characters that can neither start a token nor be whitespace.
fn is_garbage(c: char) -> bool {
    !(is_whitespace(c)
        || is_ident_start(c)
        || c.is_ascii_digit()
        || is_operator_char(c)
        || matches!(
            c,
            '.' | '(' | ')' | '{' | '}' | '[' | ']' | ',' | ':' | ';' | '@' | '#' | '$' | '\\'
                | '"' | '`'
        ))
}

fn is_digit_of(base: IntegerBase, c: char) -> bool {
    match base {
        IntegerBase::Binary => c == '0' || c == '1',
        IntegerBase::Octal => ('0'..='7').contains(&c),
        IntegerBase::Decimal => c.is_ascii_digit(),
        IntegerBase::Hex => c.is_ascii_hexdigit(),
    }
}

impl Lexer {
    pub fn new(src: &str) -> Lexer {
        Lexer {
            src: src.chars().collect(),
            idx: 0,
            pos: Pos::new(),
            modes: vec![Mode::Code],
            angle_openers: FnvHashSet::default(),
            angle_closers: FnvHashSet::default(),
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn is_eof(&self) -> bool {
        self.idx >= self.src.len()
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.src.get(index).copied()
    }

    fn first(&self) -> char {
        self.char_at(self.idx).unwrap_or('\0')
    }

    fn second(&self) -> char {
        self.char_at(self.idx + 1).unwrap_or('\0')
    }

    fn third(&self) -> char {
        self.char_at(self.idx + 2).unwrap_or('\0')
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.char_at(self.idx)?;
        if ch == '\n' {
            self.pos.lineno += 1;
            self.pos.col = 0;
        } else {
            self.pos.col += 1;
        }
        self.idx += 1;
        self.pos.offset += ch.len_utf8();
        Some(ch)
    }

    fn consume_chars(&mut self, n: usize) {
        for _ in 0..n {
            self.next_char();
        }
    }

    /// Consumes characters while `f` holds, returning how many were consumed.
    fn next_char_while(&mut self, mut f: impl FnMut(char) -> bool) -> usize {
        let mut count = 0;
        while !self.is_eof() && f(self.first()) {
            self.next_char();
            count += 1;
        }
        count
    }

    fn text_from(&self, start_idx: usize) -> String {
        self.src[start_idx..self.idx].iter().collect()
    }

    fn text_span(&self, start_idx: usize, start: Pos) -> (String, Span) {
        (
            self.text_from(start_idx),
            Span {
                start,
                end: self.pos,
            },
        )
    }

    fn word_at(&self, index: usize) -> Option<String> {
        match self.char_at(index) {
            Some(c) if is_ident_start(c) => Some(
                self.src[index..]
                    .iter()
                    .take_while(|c| is_valid_id_char(**c))
                    .collect(),
            ),
            _ => None,
        }
    }

    fn mode(&self) -> Mode {
        self.modes.last().copied().unwrap_or(Mode::Code)
    }

    fn set_mode(&mut self, mode: Mode) {
        match self.modes.last_mut() {
            Some(top) => *top = mode,
            None => self.modes.push(mode),
        }
    }

    fn in_code(&self) -> bool {
        matches!(self.mode(), Mode::Code | Mode::Interpolation { .. })
    }

    /// Lexes the next token together with its leading and trailing trivia.
    /// The final token is always `TokenKind::Eof`, which owns whatever trivia
    /// follows the last real token.
    pub fn next_token(&mut self) -> HighlightResult<TokenSyntax> {
        match self.mode() {
            Mode::Str { multiline, open } => self.string_part(multiline, open),
            Mode::InterpolationOpen { open } => {
                let (start_idx, start) = (self.idx, self.pos);
                self.next_char();
                self.set_mode(Mode::Interpolation { depth: 0, open });
                let (text, span) = self.text_span(start_idx, start);
                let trailing_trivia = self.trivia(true)?;
                Ok(TokenSyntax {
                    kind: TokenKind::LeftParen,
                    text,
                    span,
                    leading_trivia: Trivia::new(),
                    trailing_trivia,
                })
            }
            Mode::Code | Mode::Interpolation { .. } => {
                let leading_trivia = self.trivia(false)?;
                let (start_idx, start) = (self.idx, self.pos);
                let kind = self.code_token(start_idx, start)?;
                let (text, span) = self.text_span(start_idx, start);
                let trailing_trivia = if kind != TokenKind::Eof && self.in_code() {
                    self.trivia(true)?
                } else {
                    Trivia::new()
                };
                if kind == TokenKind::Eof {
                    self.finished = true;
                }
                Ok(TokenSyntax {
                    kind,
                    text,
                    span,
                    leading_trivia,
                    trailing_trivia,
                })
            }
        }
    }

    /// Trailing trivia stops before the first line break; leading trivia
    /// takes everything up to the next token.
    fn trivia(&mut self, trailing: bool) -> HighlightResult<Trivia> {
        let mut trivia = Trivia::new();
        loop {
            if self.is_eof() {
                break;
            }

            let start_idx = self.idx;
            let piece = match self.first() {
                ' ' => TriviaPiece::Spaces(self.next_char_while(|c| c == ' ')),
                '\t' => TriviaPiece::Tabs(self.next_char_while(|c| c == '\t')),
                '\u{0B}' => TriviaPiece::VerticalTabs(self.next_char_while(|c| c == '\u{0B}')),
                '\u{0C}' => TriviaPiece::Formfeeds(self.next_char_while(|c| c == '\u{0C}')),
                '\n' | '\r' if trailing => break,
                '\n' => TriviaPiece::Newlines(self.next_char_while(|c| c == '\n')),
                '\r' if self.second() == '\n' => {
                    let mut count = 0;
                    while self.first() == '\r' && self.second() == '\n' {
                        self.consume_chars(2);
                        count += 1;
                    }
                    TriviaPiece::CarriageReturnLineFeeds(count)
                }
                '\r' => {
                    let mut count = 0;
                    while self.first() == '\r' && self.second() != '\n' {
                        self.next_char();
                        count += 1;
                    }
                    TriviaPiece::CarriageReturns(count)
                }
                '/' if self.second() == '/' => self.line_comment(),
                '/' if self.second() == '*' => self.block_comment()?,
                '`' => TriviaPiece::Backticks(self.next_char_while(|c| c == '`')),
                '#' if self.idx == 0 && self.second() == '!' => {
                    // hashbang line
                    self.next_char_while(|c| c != '\n' && c != '\r');
                    TriviaPiece::GarbageText(self.text_from(start_idx))
                }
                c if is_garbage(c) => {
                    self.next_char_while(is_garbage);
                    TriviaPiece::GarbageText(self.text_from(start_idx))
                }
                _ => break,
            };
            trivia.push(piece);
        }
        Ok(trivia)
    }

    fn line_comment(&mut self) -> TriviaPiece {
        let start_idx = self.idx;
        let doc_style = self.third() == '/' && self.char_at(self.idx + 3) != Some('/');
        self.next_char_while(|c| c != '\n' && c != '\r');
        let text = self.text_from(start_idx);
        if doc_style {
            TriviaPiece::DocLineComment(text)
        } else {
            TriviaPiece::LineComment(text)
        }
    }

    /// Block comments nest, so `/* a /* b */ c */` is a single comment.
    fn block_comment(&mut self) -> HighlightResult<TriviaPiece> {
        let (start_idx, start) = (self.idx, self.pos);
        let doc_style = self.third() == '*' && self.char_at(self.idx + 3) != Some('/');
        self.consume_chars(2);
        let opener = Span {
            start,
            end: self.pos,
        };

        let mut depth = 1;
        while depth > 0 {
            if self.is_eof() {
                return Err(HighlightError::parse("unterminated block comment", opener));
            }
            match (self.first(), self.second()) {
                ('/', '*') => {
                    self.consume_chars(2);
                    depth += 1;
                }
                ('*', '/') => {
                    self.consume_chars(2);
                    depth -= 1;
                }
                _ => {
                    self.next_char();
                }
            }
        }

        let text = self.text_from(start_idx);
        Ok(if doc_style {
            TriviaPiece::DocBlockComment(text)
        } else {
            TriviaPiece::BlockComment(text)
        })
    }

    fn code_token(&mut self, start_idx: usize, start: Pos) -> HighlightResult<TokenKind> {
        let c = match self.next_char() {
            Some(c) => c,
            None => {
                if let Mode::Interpolation { open, .. } = self.mode() {
                    return Err(HighlightError::parse(
                        "unterminated string interpolation",
                        Span::from(open),
                    ));
                }
                return Ok(TokenKind::Eof);
            }
        };

        let kind = match c {
            '(' => {
                if let Mode::Interpolation { depth, open } = self.mode() {
                    self.set_mode(Mode::Interpolation {
                        depth: depth + 1,
                        open,
                    });
                }
                TokenKind::LeftParen
            }
            ')' => match self.mode() {
                Mode::Interpolation { depth: 0, .. } => {
                    self.modes.pop();
                    TokenKind::StringInterpolationAnchor
                }
                Mode::Interpolation { depth, open } => {
                    self.set_mode(Mode::Interpolation {
                        depth: depth - 1,
                        open,
                    });
                    TokenKind::RightParen
                }
                _ => TokenKind::RightParen,
            },
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftSquareBracket,
            ']' => TokenKind::RightSquareBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '@' => TokenKind::AtSign,
            '\\' => TokenKind::Backslash,
            '"' => self.open_string(start),
            '#' => self.pound(start)?,
            '$' => {
                self.next_char_while(is_valid_id_char);
                TokenKind::DollarIdentifier
            }
            '0'..='9' => self.number(c),
            c if is_ident_start(c) => self.keyword_or_ident(start_idx),
            c if c == '.' || is_operator_char(c) => self.operator(start_idx, c),
            _ => TokenKind::Unknown,
        };

        Ok(kind)
    }

    fn open_string(&mut self, open: Pos) -> TokenKind {
        if self.first() == '"' && self.second() == '"' {
            self.consume_chars(2);
            self.modes.push(Mode::Str {
                multiline: true,
                open,
            });
            TokenKind::MultilineStringQuote
        } else {
            self.modes.push(Mode::Str {
                multiline: false,
                open,
            });
            TokenKind::StringQuote
        }
    }

    fn at_closing_quote(&self, multiline: bool) -> bool {
        if multiline {
            self.first() == '"' && self.second() == '"' && self.third() == '"'
        } else {
            self.first() == '"'
        }
    }

    /// Lexes the next piece of a string literal: a run of text, the `\` of an
    /// interpolation, or the closing quote. None of these carry leading trivia.
    fn string_part(&mut self, multiline: bool, open: Pos) -> HighlightResult<TokenSyntax> {
        let (start_idx, start) = (self.idx, self.pos);
        let kind = if self.at_closing_quote(multiline) {
            self.modes.pop();
            if multiline {
                self.consume_chars(3);
                TokenKind::MultilineStringQuote
            } else {
                self.next_char();
                TokenKind::StringQuote
            }
        } else if self.first() == '\\' && self.second() == '(' {
            self.next_char();
            // the anchor pops this frame and lexing resumes inside the string
            self.modes.push(Mode::InterpolationOpen { open });
            TokenKind::Backslash
        } else {
            self.string_segment(multiline, open)?;
            TokenKind::StringSegment
        };

        let (text, span) = self.text_span(start_idx, start);
        let trailing_trivia = if self.in_code() {
            self.trivia(true)?
        } else {
            Trivia::new()
        };
        Ok(TokenSyntax {
            kind,
            text,
            span,
            leading_trivia: Trivia::new(),
            trailing_trivia,
        })
    }

    fn string_segment(&mut self, multiline: bool, open: Pos) -> HighlightResult<()> {
        let unterminated = || HighlightError::parse("unterminated string literal", Span::from(open));
        loop {
            if self.is_eof() {
                return Err(unterminated());
            }
            match self.first() {
                '\\' if self.second() == '(' => break,
                '\\' => {
                    self.next_char();
                    if self.is_eof() || (!multiline && matches!(self.first(), '\n' | '\r')) {
                        return Err(unterminated());
                    }
                    self.next_char();
                }
                '"' if self.at_closing_quote(multiline) => break,
                '\n' | '\r' if !multiline => return Err(unterminated()),
                _ => {
                    self.next_char();
                }
            }
        }
        Ok(())
    }

    /// `#` starts a raw string (`#"..."#`), a pound keyword (`#if`), or is
    /// punctuation on its own.
    fn pound(&mut self, start: Pos) -> HighlightResult<TokenKind> {
        let extra_hashes = self.src[self.idx..]
            .iter()
            .take_while(|c| **c == '#')
            .count();
        if self.char_at(self.idx + extra_hashes) == Some('"') {
            self.raw_string(extra_hashes + 1, start)?;
            return Ok(TokenKind::StringLiteral);
        }

        if let Some(word) = self.word_at(self.idx) {
            if let Some(kw) = POUND_KEYWORD_TABLE.get(word.as_str()) {
                self.consume_chars(word.chars().count());
                return Ok(TokenKind::PoundKeyword(*kw));
            }
        }

        Ok(TokenKind::Pound)
    }

    fn raw_string(&mut self, hashes: usize, open: Pos) -> HighlightResult<()> {
        // the first `#` has already been consumed
        self.consume_chars(hashes - 1);
        self.next_char();
        let multiline = self.first() == '"' && self.second() == '"';
        if multiline {
            self.consume_chars(2);
        }
        let quotes = if multiline { 3 } else { 1 };

        loop {
            if self.is_eof() || (!multiline && matches!(self.first(), '\n' | '\r')) {
                return Err(HighlightError::parse(
                    "unterminated raw string literal",
                    Span::from(open),
                ));
            }

            let terminated = (0..quotes).all(|i| self.char_at(self.idx + i) == Some('"'))
                && (0..hashes).all(|i| self.char_at(self.idx + quotes + i) == Some('#'));
            if terminated {
                self.consume_chars(quotes + hashes);
                return Ok(());
            }
            self.next_char();
        }
    }

    fn number(&mut self, first: char) -> TokenKind {
        if first == '0' {
            let base = match self.first() {
                'x' => Some(IntegerBase::Hex),
                'o' => Some(IntegerBase::Octal),
                'b' => Some(IntegerBase::Binary),
                _ => None,
            };

            if let Some(base) = base {
                self.next_char();
                self.next_char_while(|c| c == '_' || is_digit_of(base, c));
                if base == IntegerBase::Hex {
                    // hexadecimal floats: 0x1.8p3
                    let mut is_float = false;
                    if self.first() == '.' && self.second().is_ascii_hexdigit() {
                        self.next_char();
                        self.next_char_while(|c| c == '_' || c.is_ascii_hexdigit());
                        is_float = true;
                    }
                    if matches!(self.first(), 'p' | 'P') {
                        self.exponent();
                        is_float = true;
                    }
                    if is_float {
                        return TokenKind::FloatingLiteral;
                    }
                }
                return TokenKind::IntegerLiteral(base);
            }
        }

        self.next_char_while(|c| c == '_' || c.is_ascii_digit());
        let mut is_float = false;

        // (.[0-9]+)?
        if self.first() == '.' && self.second().is_ascii_digit() {
            self.next_char();
            self.next_char_while(|c| c == '_' || c.is_ascii_digit());
            is_float = true;
        }

        // ([eE][+-]?[0-9]+)?
        let has_exponent = matches!(self.first(), 'e' | 'E')
            && (self.second().is_ascii_digit()
                || (matches!(self.second(), '+' | '-') && self.third().is_ascii_digit()));
        if has_exponent {
            self.exponent();
            is_float = true;
        }

        if is_float {
            TokenKind::FloatingLiteral
        } else {
            TokenKind::IntegerLiteral(IntegerBase::Decimal)
        }
    }

    fn exponent(&mut self) {
        // consume 'e' | 'E' | 'p' | 'P'
        self.next_char();
        if matches!(self.first(), '+' | '-') {
            self.next_char();
        }
        self.next_char_while(|c| c == '_' || c.is_ascii_digit());
    }

    fn keyword_or_ident(&mut self, start_idx: usize) -> TokenKind {
        self.next_char_while(is_valid_id_char);

        // `class` between backticks is a plain identifier
        let escaped = start_idx > 0 && self.src[start_idx - 1] == '`';
        if escaped {
            return TokenKind::Identifier;
        }

        let word = self.text_from(start_idx);
        if let Some(kw) = KEYWORD_TABLE.get(word.as_str()) {
            return TokenKind::Keyword(*kw);
        }

        let is_member = start_idx > 0 && self.src[start_idx - 1] == '.';
        if !is_member && self.in_modifier_position(&word) {
            TokenKind::ContextualKeyword
        } else {
            TokenKind::Identifier
        }
    }

    /// Decides whether a contextual keyword such as `mutating` or `get` is
    /// acting as a keyword, by looking at what follows it.
    fn in_modifier_position(&self, word: &str) -> bool {
        let is_accessor = ACCESSORS.contains(&word);
        if !is_accessor && !MODIFIERS.contains(&word) {
            return false;
        }

        let mut i = self.idx;
        while self.char_at(i).map_or(false, is_whitespace) {
            i += 1;
        }

        let next = match self.char_at(i) {
            Some(c) => c,
            None => return false,
        };

        match next {
            '{' | '}' => is_accessor,
            '(' => is_accessor && word != "get",
            _ => match self.word_at(i) {
                Some(next_word) => {
                    ACCESSORS.contains(&next_word.as_str())
                        || MODIFIERS.contains(&next_word.as_str())
                        || KEYWORD_TABLE
                            .get(next_word.as_str())
                            .map_or(false, Keyword::is_declaration)
                }
                None => false,
            },
        }
    }

    fn is_left_bound(&self, start_idx: usize) -> bool {
        if start_idx == 0 {
            return false;
        }

        match self.src[start_idx - 1] {
            c if is_whitespace(c) => false,
            '(' | '[' | '{' | ',' | ';' | ':' => false,
            // the end of a block comment counts as whitespace
            '/' => !(start_idx >= 2 && self.src[start_idx - 2] == '*'),
            _ => true,
        }
    }

    fn is_right_bound(&self, end_idx: usize) -> bool {
        match self.char_at(end_idx) {
            None => false,
            Some(c) if is_whitespace(c) => false,
            Some(')' | ']' | '}' | ',' | ';' | ':') => false,
            Some('/') => !matches!(self.char_at(end_idx + 1), Some('/' | '*')),
            Some(_) => true,
        }
    }

    fn operator(&mut self, start_idx: usize, first: char) -> TokenKind {
        if first == '<'
            && (self.angle_openers.remove(&start_idx) || self.generic_arguments_at(start_idx))
        {
            return TokenKind::LeftAngle;
        }
        if first == '>' && self.angle_closers.remove(&start_idx) {
            return TokenKind::RightAngle;
        }

        let left_bound = self.is_left_bound(start_idx);
        if first == '?' && left_bound {
            return TokenKind::PostfixQuestionMark;
        }

        // only operators that start with a dot may contain one
        let dotted = first == '.';
        while !self.is_eof() {
            let c = self.first();
            if !(is_operator_char(c) || (dotted && c == '.')) {
                break;
            }
            if c == '/' && matches!(self.second(), '/' | '*') {
                break;
            }
            if c == '>' && self.angle_closers.contains(&self.idx) {
                break;
            }
            self.next_char();
        }

        let right_bound = self.is_right_bound(self.idx);
        match self.text_from(start_idx).as_str() {
            "=" => TokenKind::Equal,
            "->" => TokenKind::Arrow,
            "." if !left_bound && right_bound => TokenKind::PrefixPeriod,
            "." => TokenKind::Period,
            "?" => TokenKind::InfixQuestionMark,
            "!" if left_bound => TokenKind::ExclamationMark,
            "&" if !left_bound && right_bound => TokenKind::PrefixAmpersand,
            _ => match (left_bound, right_bound) {
                (true, true) => TokenKind::UnspacedBinaryOperator,
                (false, false) => TokenKind::SpacedBinaryOperator,
                (false, true) => TokenKind::PrefixOperator,
                (true, false) => TokenKind::PostfixOperator,
            },
        }
    }

    /// Looks ahead from a `<` that directly follows an identifier for a
    /// balanced generic argument list such as `Array<[String: Int]>`. On
    /// success every nested `<` and `>` is remembered so that they lex as
    /// angle brackets rather than operators.
    fn generic_arguments_at(&mut self, start_idx: usize) -> bool {
        match start_idx.checked_sub(1).and_then(|i| self.char_at(i)) {
            Some(c) if is_valid_id_char(c) => {}
            _ => return false,
        }

        let mut depth = 1;
        let mut openers = vec![];
        let mut closers = vec![];
        let mut i = start_idx + 1;
        while let Some(c) = self.char_at(i) {
            match c {
                '<' => {
                    depth += 1;
                    openers.push(i);
                }
                // the tail of `->` inside a function type
                '>' if self.src[i - 1] == '-' => {}
                '>' => {
                    depth -= 1;
                    closers.push(i);
                    if depth == 0 {
                        let follows = matches!(
                            self.char_at(i + 1),
                            None | Some(
                                ' ' | '\t'
                                    | '\n'
                                    | '\r'
                                    | '('
                                    | ')'
                                    | '['
                                    | ']'
                                    | '{'
                                    | '}'
                                    | ','
                                    | ';'
                                    | '.'
                                    | ':'
                                    | '!'
                                    | '?'
                                    | '>'
                                    | '='
                            )
                        );
                        if follows {
                            self.angle_openers.extend(openers);
                            self.angle_closers.extend(closers);
                        }
                        return follows;
                    }
                }
                '-' if self.char_at(i + 1) == Some('>') => {}
                ' ' | '\t' | ',' | '.' | '?' | '!' | '[' | ']' | '(' | ')' | ':' => {}
                c if is_valid_id_char(c) => {}
                _ => return false,
            }
            i += 1;
        }
        false
    }
}

/// Runs the lexer to completion, returning every token including the
/// trailing `Eof`.
pub fn tokens(src: &str) -> HighlightResult<Vec<TokenSyntax>> {
    let mut lexer = Lexer::new(src);
    let mut out = Vec::new();
    while !lexer.is_finished() {
        out.push(lexer.next_token()?);
    }
    Ok(out)
}
