//! Primitive combinators: the building blocks that consume one or more
//! tokens under simple acceptance rules.

use crate::ast::CommentPart;
use crate::grammar::{unexpected, GrammarSymbol, ParserStatus};
use crate::lexer::{Token, TokenKind};

/// Accepts tokens of exactly one kind, optionally capped at a number of
/// matches, optionally serializing its accumulated text.
pub(crate) struct Terminal {
    kind: TokenKind,
    limit: Option<usize>,
    serializable: bool,
    accepted: Vec<Token>,
}

impl Terminal {
    pub(crate) fn new(kind: TokenKind, limit: Option<usize>, serializable: bool) -> Self {
        Self {
            kind,
            limit,
            serializable,
            accepted: Vec::new(),
        }
    }

    /// A single-token, non-serializing terminal.
    pub(crate) fn single(kind: TokenKind) -> Self {
        Self::new(kind, Some(1), false)
    }

    /// A single-token terminal whose text shows up in the output.
    pub(crate) fn single_text(kind: TokenKind) -> Self {
        Self::new(kind, Some(1), true)
    }
}

impl GrammarSymbol for Terminal {
    fn next(&mut self, token: Token) -> ParserStatus {
        if token.kind() != self.kind {
            return ParserStatus::Backtrack(vec![token]);
        }
        if let Some(limit) = self.limit {
            if self.accepted.len() >= limit {
                // Cap hit: the excess match is handed back.
                return ParserStatus::Backtrack(vec![token]);
            }
            self.accepted.push(token);
            if self.accepted.len() == limit {
                return ParserStatus::Success;
            }
        } else {
            self.accepted.push(token);
        }
        ParserStatus::InProgress
    }

    fn is_valid(&self) -> bool {
        !self.accepted.is_empty()
    }

    fn serialize(&self) -> Vec<CommentPart> {
        if !self.serializable || self.accepted.is_empty() {
            return Vec::new();
        }
        let text: String = self.accepted.iter().map(Token::lexeme).collect();
        vec![CommentPart::text(text)]
    }
}

/// Makes absence acceptable: an inner error is swallowed and reported as
/// a backtrack of whatever the inner symbol had consumed.
pub(crate) struct Optional {
    inner: Box<dyn GrammarSymbol>,
    consumed: Vec<Token>,
    failed: bool,
}

impl Optional {
    pub(crate) fn new(inner: impl GrammarSymbol + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            consumed: Vec::new(),
            failed: false,
        }
    }

}

impl GrammarSymbol for Optional {
    fn next(&mut self, token: Token) -> ParserStatus {
        self.consumed.push(token.clone());
        match self.inner.next(token) {
            ParserStatus::Error(_) => {
                self.failed = true;
                ParserStatus::Backtrack(std::mem::take(&mut self.consumed))
            }
            ParserStatus::Backtrack(tokens) => {
                // The returned tokens were never kept by the inner symbol.
                self.consumed
                    .truncate(self.consumed.len().saturating_sub(tokens.len()));
                ParserStatus::Backtrack(tokens)
            }
            status => status,
        }
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn serialize(&self) -> Vec<CommentPart> {
        if self.failed {
            return Vec::new();
        }
        self.inner.serialize()
    }
}

/// Zero-width rejection gate: any token outside the forbidden set is
/// immediately handed back untouched; a forbidden kind is a hard error.
pub(crate) struct Not {
    forbidden: Vec<TokenKind>,
    passed: bool,
}

impl Not {
    pub(crate) fn new(forbidden: Vec<TokenKind>) -> Self {
        Self {
            forbidden,
            passed: false,
        }
    }
}

impl GrammarSymbol for Not {
    fn next(&mut self, token: Token) -> ParserStatus {
        if self.forbidden.contains(&token.kind()) {
            return ParserStatus::Error(unexpected(&token));
        }
        self.passed = true;
        ParserStatus::Backtrack(vec![token])
    }

    fn is_valid(&self) -> bool {
        self.passed
    }

    fn serialize(&self) -> Vec<CommentPart> {
        Vec::new()
    }
}

/// A forbidden trailing kind sequence for [`Omit`]. When `can_escape` is
/// set, a match immediately preceded by a `Backslash` token is ignored.
pub(crate) struct Boundary {
    kinds: Vec<TokenKind>,
    can_escape: bool,
}

impl Boundary {
    pub(crate) fn new(kinds: Vec<TokenKind>) -> Self {
        Self {
            kinds,
            can_escape: false,
        }
    }

    pub(crate) fn escapable(kinds: Vec<TokenKind>) -> Self {
        Self {
            kinds,
            can_escape: true,
        }
    }
}

/// Accepts an open-ended run of tokens, continuously checking the
/// trailing tokens against forbidden fixed-length kind sequences. A match
/// backtracks exactly the matching tail, keeping everything before it.
pub(crate) struct Omit {
    boundaries: Vec<Boundary>,
    accepted: Vec<Token>,
}

impl Omit {
    pub(crate) fn new(boundaries: Vec<Boundary>) -> Self {
        Self {
            boundaries,
            accepted: Vec::new(),
        }
    }

    fn trailing_match(&self) -> Option<usize> {
        for boundary in &self.boundaries {
            let len = boundary.kinds.len();
            if self.accepted.len() < len {
                continue;
            }
            let tail_start = self.accepted.len() - len;
            let tail_matches = self.accepted[tail_start..]
                .iter()
                .zip(&boundary.kinds)
                .all(|(token, kind)| token.kind() == *kind);
            if !tail_matches {
                continue;
            }
            if boundary.can_escape
                && tail_start > 0
                && self.accepted[tail_start - 1].kind() == TokenKind::Backslash
            {
                continue;
            }
            return Some(len);
        }
        None
    }
}

impl GrammarSymbol for Omit {
    fn next(&mut self, token: Token) -> ParserStatus {
        self.accepted.push(token);
        if let Some(len) = self.trailing_match() {
            let tail = self.accepted.split_off(self.accepted.len() - len);
            return ParserStatus::Backtrack(tail);
        }
        ParserStatus::InProgress
    }

    fn is_valid(&self) -> bool {
        !self.accepted.is_empty()
    }

    fn serialize(&self) -> Vec<CommentPart> {
        if self.accepted.is_empty() {
            return Vec::new();
        }
        let text: String = self.accepted.iter().map(Token::lexeme).collect();
        vec![CommentPart::text(text)]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexer::Lexer;

    fn toks(text: &str) -> Vec<Token> {
        Lexer::new(text).collect()
    }

    fn feed(symbol: &mut dyn GrammarSymbol, text: &str) -> Vec<ParserStatus> {
        toks(text).into_iter().map(|t| symbol.next(t)).collect()
    }

    fn lexemes(status: &ParserStatus) -> Vec<String> {
        match status {
            ParserStatus::Backtrack(tokens) => {
                tokens.iter().map(|t| t.lexeme().to_owned()).collect()
            }
            other => panic!("expected backtrack, got {other:?}"),
        }
    }

    #[test]
    fn test_terminal_single_succeeds_on_match() {
        let mut terminal = Terminal::single(TokenKind::AtSign);
        let statuses = feed(&mut terminal, "@");
        assert!(matches!(statuses[0], ParserStatus::Success));
        assert!(terminal.is_valid());
    }

    #[test]
    fn test_terminal_backtracks_on_mismatch() {
        let mut terminal = Terminal::single(TokenKind::AtSign);
        let statuses = feed(&mut terminal, "x");
        assert_eq!(lexemes(&statuses[0]), vec!["x"]);
        assert!(!terminal.is_valid());
    }

    #[test]
    fn test_unlimited_terminal_accepts_run_then_backtracks() {
        let mut terminal = Terminal::new(TokenKind::Star, None, false);
        let statuses = feed(&mut terminal, "**@");
        assert!(matches!(statuses[0], ParserStatus::InProgress));
        assert!(matches!(statuses[1], ParserStatus::InProgress));
        assert_eq!(lexemes(&statuses[2]), vec!["@"]);
        assert!(terminal.is_valid());
    }

    #[test]
    fn test_serializable_terminal_emits_text() {
        let mut terminal = Terminal::single_text(TokenKind::AsciiWord);
        feed(&mut terminal, "param");
        assert_eq!(terminal.serialize(), vec![CommentPart::text("param")]);
    }

    #[test]
    fn test_optional_absorbs_inner_error() {
        let mut optional = Optional::new(Not::new(vec![TokenKind::AtSign]));
        let statuses = feed(&mut optional, "@");
        assert_eq!(lexemes(&statuses[0]), vec!["@"]);
        assert!(optional.is_valid());
        assert_eq!(optional.serialize(), Vec::<CommentPart>::new());
    }

    #[test]
    fn test_optional_passes_success_through() {
        let mut optional = Optional::new(Terminal::single(TokenKind::AtSign));
        let statuses = feed(&mut optional, "@");
        assert!(matches!(statuses[0], ParserStatus::Success));
    }

    #[test]
    fn test_not_hands_back_allowed_token() {
        let mut gate = Not::new(vec![TokenKind::AtSign]);
        let statuses = feed(&mut gate, "x");
        assert_eq!(lexemes(&statuses[0]), vec!["x"]);
        assert!(gate.is_valid());
    }

    #[test]
    fn test_not_errors_on_forbidden_token() {
        let mut gate = Not::new(vec![TokenKind::AtSign]);
        let statuses = feed(&mut gate, "@");
        assert!(matches!(statuses[0], ParserStatus::Error(_)));
        assert!(!gate.is_valid());
    }

    #[test]
    fn test_omit_backtracks_matching_tail_only() {
        let mut omit = Omit::new(vec![Boundary::new(vec![
            TokenKind::Star,
            TokenKind::Slash,
        ])]);
        let statuses = feed(&mut omit, "abc */");
        assert_eq!(lexemes(&statuses[3]), vec!["*", "/"]);
        assert_eq!(omit.serialize(), vec![CommentPart::text("abc ")]);
        assert!(omit.is_valid());
    }

    #[test]
    fn test_omit_single_kind_boundary() {
        let mut omit = Omit::new(vec![Boundary::new(vec![TokenKind::AtSign])]);
        let statuses = feed(&mut omit, "a@");
        assert!(matches!(statuses[0], ParserStatus::InProgress));
        assert_eq!(lexemes(&statuses[1]), vec!["@"]);
    }

    #[test]
    fn test_omit_escaped_boundary_is_kept_literally() {
        let mut omit = Omit::new(vec![Boundary::escapable(vec![TokenKind::AtSign])]);
        let statuses = feed(&mut omit, "a\\@b");
        assert!(statuses
            .iter()
            .all(|s| matches!(s, ParserStatus::InProgress)));
        assert_eq!(omit.serialize(), vec![CommentPart::text("a\\@b")]);
    }

    #[test]
    fn test_omit_non_escapable_boundary_ignores_backslash() {
        let mut omit = Omit::new(vec![Boundary::new(vec![TokenKind::Newline])]);
        let statuses = feed(&mut omit, "a\\\nb");
        assert_eq!(lexemes(&statuses[2]), vec!["\n"]);
    }

    #[test]
    fn test_omit_empty_run_is_invalid_after_backtrack() {
        let mut omit = Omit::new(vec![Boundary::new(vec![TokenKind::AtSign])]);
        let statuses = feed(&mut omit, "@");
        assert_eq!(lexemes(&statuses[0]), vec!["@"]);
        assert!(!omit.is_valid());
        assert_eq!(omit.serialize(), Vec::<CommentPart>::new());
    }
}
