//! Composite combinators: ordered sequences, priority-ranked ambiguous
//! alternation, and repetition with lookahead-based continuation.
//!
//! Backtracked tokens are always re-offered through explicit queue loops
//! in the owning combinator, never by a symbol recursively calling
//! itself, so stack depth stays bounded by grammar nesting.

use std::collections::VecDeque;
use std::mem;

use crate::ast::CommentPart;
use crate::error::ParserError;
use crate::grammar::{unexpected, GrammarSymbol, ParserStatus};
use crate::lexer::Token;

/// What a [`Sequence`] does with a token arriving after its last symbol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EndBehavior {
    /// Hard error; only the root `comment` rule does this.
    Reject,
    /// Hand the token (and anything queued behind it) back to the caller.
    Yield,
}

/// An ordered run of child symbols, driven one token at a time.
///
/// The current child is fed until it finalizes. A child that backtracks
/// while valid is stepped past and its returned tokens are re-offered to
/// the following children; a child that finalizes invalid outside an
/// `Optional`/`OneOf` wrapper is a hard error.
pub(crate) struct Sequence {
    symbols: Vec<Box<dyn GrammarSymbol>>,
    index: usize,
    end_behavior: EndBehavior,
    failed: bool,
}

impl Sequence {
    pub(crate) fn new(symbols: Vec<Box<dyn GrammarSymbol>>, end_behavior: EndBehavior) -> Self {
        Self {
            symbols,
            index: 0,
            end_behavior,
            failed: false,
        }
    }

    /// Borrow a child for rule-level serialization.
    pub(crate) fn symbol(&self, index: usize) -> &dyn GrammarSymbol {
        &*self.symbols[index]
    }
}

impl GrammarSymbol for Sequence {
    fn next(&mut self, token: Token) -> ParserStatus {
        let mut queue = VecDeque::new();
        queue.push_back(token);

        while let Some(token) = queue.pop_front() {
            if self.index == self.symbols.len() {
                return match self.end_behavior {
                    EndBehavior::Reject => ParserStatus::Error(ParserError::new(
                        "unexpected token at the end of the comment",
                        token.line(),
                        token.start(),
                        token.end(),
                    )),
                    EndBehavior::Yield => {
                        let mut rest = vec![token];
                        rest.extend(queue);
                        ParserStatus::Backtrack(rest)
                    }
                };
            }

            let symbol = &mut self.symbols[self.index];
            match symbol.next(token) {
                ParserStatus::InProgress => {}
                ParserStatus::Success => self.index += 1,
                ParserStatus::Error(error) => {
                    self.failed = true;
                    return ParserStatus::Error(error);
                }
                ParserStatus::Backtrack(tokens) => {
                    if symbol.is_valid() {
                        self.index += 1;
                        for token in tokens.into_iter().rev() {
                            queue.push_front(token);
                        }
                    } else {
                        self.failed = true;
                        let error = tokens
                            .first()
                            .map(unexpected)
                            .unwrap_or_else(|| ParserError::new("unexpected end of input", 0, 0, 0));
                        return ParserStatus::Error(error);
                    }
                }
            }
        }

        if self.index == self.symbols.len() {
            ParserStatus::Success
        } else {
            ParserStatus::InProgress
        }
    }

    fn is_valid(&self) -> bool {
        !self.failed && self.index == self.symbols.len()
    }

    fn serialize(&self) -> Vec<CommentPart> {
        if self.failed {
            return Vec::new();
        }
        self.symbols
            .iter()
            .flat_map(|symbol| symbol.serialize())
            .collect()
    }
}

struct Branch {
    symbol: Box<dyn GrammarSymbol>,
    priority: i32,
    finalized: bool,
    valid: bool,
    /// Tokens offered (or returned) after this branch finalized; handed
    /// to the caller if this branch wins.
    pending: Vec<Token>,
    error: Option<ParserError>,
}

/// Priority-ranked ambiguous alternation: every token is offered to every
/// still-viable branch in parallel, and the highest-priority finalized
/// valid branch wins once every branch has finalized.
pub(crate) struct OneOf {
    branches: Vec<Branch>,
    winner: Option<usize>,
}

impl OneOf {
    pub(crate) fn new(branches: Vec<(Box<dyn GrammarSymbol>, i32)>) -> Self {
        Self {
            branches: branches
                .into_iter()
                .map(|(symbol, priority)| Branch {
                    symbol,
                    priority,
                    finalized: false,
                    valid: false,
                    pending: Vec::new(),
                    error: None,
                })
                .collect(),
            winner: None,
        }
    }

    /// Offer the winner slot to a branch that just finalized valid. Only
    /// a strictly greater priority displaces the current winner, so
    /// equal-priority branches keep whichever finalized first, with
    /// declaration order breaking same-token ties.
    fn consider(&mut self, index: usize) {
        match self.winner {
            Some(current) if self.branches[current].priority >= self.branches[index].priority => {}
            _ => self.winner = Some(index),
        }
    }
}

impl GrammarSymbol for OneOf {
    fn next(&mut self, token: Token) -> ParserStatus {
        let mut finalized_now = Vec::new();
        for (index, branch) in self.branches.iter_mut().enumerate() {
            if branch.finalized {
                if branch.valid {
                    branch.pending.push(token.clone());
                }
                continue;
            }
            match branch.symbol.next(token.clone()) {
                ParserStatus::InProgress => {}
                ParserStatus::Success => {
                    branch.finalized = true;
                    branch.valid = true;
                }
                ParserStatus::Error(error) => {
                    branch.finalized = true;
                    branch.valid = false;
                    branch.error = Some(error);
                }
                ParserStatus::Backtrack(tokens) => {
                    branch.finalized = true;
                    branch.valid = branch.symbol.is_valid();
                    if branch.valid {
                        branch.pending = tokens;
                    } else {
                        branch.error = tokens.first().map(unexpected);
                    }
                }
            }
            if branch.finalized && branch.valid {
                finalized_now.push(index);
            }
        }
        for index in finalized_now {
            self.consider(index);
        }

        if self.branches.iter().all(|b| b.finalized && !b.valid) {
            // Branch 0's error stands in for the whole alternation.
            let error = self
                .branches
                .iter()
                .find_map(|b| b.error.clone())
                .unwrap_or_else(|| unexpected(&token));
            return ParserStatus::Error(error);
        }

        if self.branches.iter().any(|b| !b.finalized) {
            return ParserStatus::InProgress;
        }

        match self.winner {
            None => ParserStatus::InProgress,
            Some(winner) => {
                let pending = mem::take(&mut self.branches[winner].pending);
                if pending.is_empty() {
                    ParserStatus::Success
                } else {
                    ParserStatus::Backtrack(pending)
                }
            }
        }
    }

    fn is_valid(&self) -> bool {
        self.branches.iter().any(|b| b.finalized && b.valid)
    }

    fn serialize(&self) -> Vec<CommentPart> {
        match self.winner {
            Some(winner) => self.branches[winner].symbol.serialize(),
            None => Vec::new(),
        }
    }
}

type SymbolFactory = Box<dyn Fn(usize) -> Box<dyn GrammarSymbol>>;

/// Repetition of a factory-produced rule, one iteration at a time.
///
/// A clean boundary (the current iteration backtracks while valid)
/// triggers a lookahead: the returned tokens are replayed into a trial
/// next iteration to decide whether they start a new repetition or
/// belong to the caller.
pub(crate) struct OneOrMore {
    factory: SymbolFactory,
    completed: Vec<Box<dyn GrammarSymbol>>,
    current: Option<Box<dyn GrammarSymbol>>,
    /// Tokens fed to the current iteration, for handing back wholesale
    /// when the iteration is discarded.
    fed: Vec<Token>,
}

impl OneOrMore {
    pub(crate) fn new(factory: impl Fn(usize) -> Box<dyn GrammarSymbol> + 'static) -> Self {
        let factory: SymbolFactory = Box::new(factory);
        let first = factory(0);
        Self {
            factory,
            completed: Vec::new(),
            current: Some(first),
            fed: Vec::new(),
        }
    }

    /// Replay `tokens` into a freshly built trial iteration. The trial is
    /// kept if it is still in progress (or completes) by the time the
    /// tokens run out; otherwise it is discarded and everything from its
    /// first token onward is handed back to the caller.
    fn lookahead(&mut self, tokens: Vec<Token>) -> ParserStatus {
        let mut trial = (self.factory)(self.completed.len());
        let mut fed: Vec<Token> = Vec::new();
        let mut queue: VecDeque<Token> = tokens.into();

        while let Some(token) = queue.pop_front() {
            fed.push(token.clone());
            match trial.next(token) {
                ParserStatus::InProgress => {
                    if queue.is_empty() {
                        self.fed = fed;
                        self.current = Some(trial);
                        return ParserStatus::InProgress;
                    }
                }
                ParserStatus::Success => {
                    self.completed.push(trial);
                    if queue.is_empty() {
                        // The trial consumed exactly the lookahead tokens
                        // and landed on success: that status is final.
                        self.current = None;
                        return ParserStatus::Success;
                    }
                    trial = (self.factory)(self.completed.len());
                    fed.clear();
                }
                ParserStatus::Error(_) => {
                    let mut rest = fed;
                    rest.extend(queue);
                    self.current = None;
                    return ParserStatus::Backtrack(rest);
                }
                ParserStatus::Backtrack(tokens) => {
                    if trial.is_valid() {
                        fed.truncate(fed.len().saturating_sub(tokens.len()));
                        self.completed.push(trial);
                        for token in tokens.into_iter().rev() {
                            queue.push_front(token);
                        }
                        trial = (self.factory)(self.completed.len());
                        fed.clear();
                    } else {
                        // `tokens` is a suffix of `fed` already.
                        let mut rest = fed;
                        rest.extend(queue);
                        self.current = None;
                        return ParserStatus::Backtrack(rest);
                    }
                }
            }
        }

        // Empty lookahead: the fresh trial simply becomes current.
        self.fed.clear();
        self.current = Some(trial);
        ParserStatus::InProgress
    }
}

impl GrammarSymbol for OneOrMore {
    fn next(&mut self, token: Token) -> ParserStatus {
        let Some(current) = self.current.as_mut() else {
            // Finalized; nothing here keeps the token.
            return ParserStatus::Backtrack(vec![token]);
        };

        self.fed.push(token.clone());
        match current.next(token) {
            ParserStatus::InProgress => ParserStatus::InProgress,
            ParserStatus::Success => {
                if let Some(done) = self.current.take() {
                    self.completed.push(done);
                }
                self.current = Some((self.factory)(self.completed.len()));
                self.fed.clear();
                ParserStatus::InProgress
            }
            ParserStatus::Error(error) => {
                let failed_tokens = mem::take(&mut self.fed);
                self.current = None;
                if self.completed.is_empty() {
                    ParserStatus::Error(error)
                } else {
                    ParserStatus::Backtrack(failed_tokens)
                }
            }
            ParserStatus::Backtrack(tokens) => {
                self.fed.truncate(self.fed.len().saturating_sub(tokens.len()));
                let valid = self
                    .current
                    .as_ref()
                    .map(|c| c.is_valid())
                    .unwrap_or(false);
                if valid {
                    if let Some(done) = self.current.take() {
                        self.completed.push(done);
                    }
                    self.fed.clear();
                    self.lookahead(tokens)
                } else {
                    let mut all = mem::take(&mut self.fed);
                    all.extend(tokens);
                    self.current = None;
                    if self.completed.is_empty() {
                        let error = all
                            .first()
                            .map(unexpected)
                            .unwrap_or_else(|| ParserError::new("unexpected end of input", 0, 0, 0));
                        ParserStatus::Error(error)
                    } else {
                        ParserStatus::Backtrack(all)
                    }
                }
            }
        }
    }

    fn is_valid(&self) -> bool {
        match self.completed.first() {
            Some(first) => first.is_valid(),
            None => self
                .current
                .as_ref()
                .map(|c| c.is_valid())
                .unwrap_or(false),
        }
    }

    fn serialize(&self) -> Vec<CommentPart> {
        let mut parts: Vec<CommentPart> = self
            .completed
            .iter()
            .flat_map(|iteration| iteration.serialize())
            .collect();
        if let Some(current) = &self.current {
            parts.extend(current.serialize());
        }
        parts
    }
}
