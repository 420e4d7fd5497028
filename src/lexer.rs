//! Character-level lexer for doc comment text.
//!
//! The input is trimmed and CRLF-normalized up front, then scanned left to
//! right through a fixed character→pattern table. Kinds flagged as
//! "multiple" absorb adjacent same-kind characters into a single token via
//! [`Token::merge`]. Line/column bookkeeping resets on every `Newline`
//! token, and the stream stops right after the `Slash` of the first
//! top-level `*/`; anything following the comment close is never
//! tokenized.

/// Lexical token kinds. Every character maps to some kind, so lexing
/// itself cannot fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum TokenKind {
    Newline,
    Spaces,
    AsciiWord,
    Slash,
    Star,
    Backslash,
    DoubleQuote,
    Tilde,
    AtSign,
    LeftCurlyBracket,
    RightCurlyBracket,
    Backtick,
    Period,
    Colon,
    Pipe,
    PoundSymbol,
    RightSquareBracket,
    LeftSquareBracket,
    Equal,
    Hyphen,
    Other,
}

/// The pattern table: token kind for a character, and whether adjacent
/// tokens of that kind merge into one.
fn pattern(ch: char) -> (TokenKind, bool) {
    match ch {
        'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => (TokenKind::AsciiWord, true),
        ' ' | '\t' | '\u{c}' => (TokenKind::Spaces, true),
        '\n' => (TokenKind::Newline, false),
        '/' => (TokenKind::Slash, false),
        '*' => (TokenKind::Star, false),
        '\\' => (TokenKind::Backslash, false),
        '"' => (TokenKind::DoubleQuote, false),
        '~' => (TokenKind::Tilde, false),
        '@' => (TokenKind::AtSign, false),
        '{' => (TokenKind::LeftCurlyBracket, false),
        '}' => (TokenKind::RightCurlyBracket, false),
        '`' => (TokenKind::Backtick, false),
        '.' => (TokenKind::Period, false),
        ':' => (TokenKind::Colon, false),
        '|' => (TokenKind::Pipe, false),
        '#' => (TokenKind::PoundSymbol, false),
        ']' => (TokenKind::RightSquareBracket, false),
        '[' => (TokenKind::LeftSquareBracket, false),
        '=' => (TokenKind::Equal, false),
        '-' => (TokenKind::Hyphen, false),
        _ => (TokenKind::Other, true),
    }
}

/// One lexed unit: a kind, its accumulated text, and its position within
/// the trimmed comment (`line` is zero-based, `start`/`end` are column
/// offsets on that line).
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Token {
    kind: TokenKind,
    lexeme: String,
    line: usize,
    start: usize,
    end: usize,
}

impl Token {
    fn new(kind: TokenKind, lexeme: String, line: usize, start: usize, end: usize) -> Self {
        Self {
            kind,
            lexeme,
            line,
            start,
            end,
        }
    }

    pub(crate) fn kind(&self) -> TokenKind {
        self.kind
    }

    pub(crate) fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn start(&self) -> usize {
        self.start
    }

    pub(crate) fn end(&self) -> usize {
        self.end
    }

    /// Absorb a following token of the same kind, extending this token's
    /// end offset and lexeme.
    fn merge(&mut self, other: &Token) {
        self.end = other.end;
        self.lexeme.push_str(&other.lexeme);
    }
}

/// Lazy, finite, non-restartable token stream over one comment's text.
pub(crate) struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    /// Kind of the previous token on the current line; `None` right after
    /// a newline. Used to spot the closing `*/`.
    prev_on_line: Option<TokenKind>,
    done: bool,
}

impl Lexer {
    pub(crate) fn new(text: &str) -> Self {
        let normalized = text.trim().replace("\r\n", "\n");
        Self {
            chars: normalized.chars().collect(),
            pos: 0,
            line: 0,
            column: 0,
            prev_on_line: None,
            done: false,
        }
    }

    fn single(&self, kind: TokenKind, ch: char) -> Token {
        Token::new(kind, ch.to_string(), self.line, self.column, self.column + 1)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done || self.pos >= self.chars.len() {
            return None;
        }

        let (kind, multiple) = pattern(self.chars[self.pos]);
        let mut token = self.single(kind, self.chars[self.pos]);
        self.pos += 1;
        self.column += 1;

        while multiple && self.pos < self.chars.len() {
            let ch = self.chars[self.pos];
            if pattern(ch).0 != kind {
                break;
            }
            token.merge(&self.single(kind, ch));
            self.pos += 1;
            self.column += 1;
        }

        if kind == TokenKind::Newline {
            self.line += 1;
            self.column = 0;
            self.prev_on_line = None;
        } else {
            if kind == TokenKind::Slash && self.prev_on_line == Some(TokenKind::Star) {
                // Closing `*/` reached; trailing text is not tokenized.
                self.done = true;
            }
            self.prev_on_line = Some(kind);
        }

        Some(token)
    }
}
