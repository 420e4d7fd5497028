//! The grammar evaluation protocol.
//!
//! Every grammar rule, primitive or composite, is a stateful,
//! single-use instance implementing [`GrammarSymbol`]: it is fed one
//! token at a time through `next`, reports its acceptance state through
//! the four-variant [`ParserStatus`], and produces its output fragment
//! through `serialize`. A fresh instance must be constructed for every
//! attempt (each repetition iteration, each alternative of a choice).

pub(crate) mod composites;
pub(crate) mod primitives;
pub(crate) mod rules;

use crate::ast::CommentPart;
use crate::error::ParserError;
use crate::lexer::Token;

/// Status returned by [`GrammarSymbol::next`].
///
/// Once a symbol reports `Success` or `Error` it must never be fed
/// again; `Backtrack` hands back already-consumed tokens that the caller
/// must re-offer to a sibling or ancestor symbol.
#[derive(Debug)]
pub(crate) enum ParserStatus {
    /// Token accepted; the symbol needs more input.
    InProgress,
    /// The symbol is complete and will accept no more tokens.
    Success,
    /// The symbol is permanently invalid.
    Error(ParserError),
    /// The symbol is done deciding; these tokens were not kept and must
    /// be reconsidered elsewhere.
    Backtrack(Vec<Token>),
}

pub(crate) trait GrammarSymbol {
    /// Feed exactly one token.
    fn next(&mut self, token: Token) -> ParserStatus;

    /// Whether the tokens consumed so far (ignoring any backtracked
    /// tail) form an acceptable production, regardless of whether more
    /// input could still extend it.
    fn is_valid(&self) -> bool;

    /// Output fragment for whatever was validly consumed; empty when
    /// nothing was.
    fn serialize(&self) -> Vec<CommentPart>;
}

/// Generic grammar error for a token no rule could place.
pub(crate) fn unexpected(token: &Token) -> ParserError {
    ParserError::new(
        format!("unexpected token '{}'", token.lexeme()),
        token.line(),
        token.start(),
        token.end(),
    )
}
