//! <div align="center">
//!   <h1>docblock</h1>
//!   <p>
//!     <strong>Backtracking push-based parser for JSDoc-style doc comments.</strong>
//!   </p>
//! </div>
//!
//! ## Example
//!
//! ```rust
//! use docblock::parse;
//!
//! let result = parse("/** @param {Object} options - Options bag */");
//!
//! assert!(result.error.is_none());
//! assert_eq!(result.parts[0].kind.as_deref(), Some("param"));
//! assert_eq!(result.parts[0].ty.as_deref(), Some("Object"));
//! assert_eq!(result.parts[0].name.as_deref(), Some("options"));
//! ```
//!
//! ## Design Goals
//!
//! - Parsing never panics and never rejects input outright: a malformed
//!   comment yields a [`ParserResult`](ast::ParserResult) carrying a
//!   positioned [`ParserError`](error::ParserError) instead.
//! - The grammar is evaluated push-style, one token at a time, so ambiguous
//!   constructs are explored in parallel without input rewinding.

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

pub mod ast;
pub mod error;
mod grammar;
mod lexer;

use ast::ParserResult;
use error::ParserError;
use grammar::rules::CommentRule;
use grammar::{unexpected, GrammarSymbol, ParserStatus};
use lexer::{Lexer, Token};

/// Parses `raw_comment` into a [`ParserResult`]: a flat list of comment
/// parts (the description plus one part per block tag), or a positioned
/// error.
///
/// The input must be a complete `/** ... */` comment; leading and
/// trailing whitespace is ignored, as is anything after the closing
/// `*/`.
///
/// # Examples
///
/// ```
/// use docblock::parse;
/// use docblock::ast::PartText;
///
/// let result = parse("/** Adds two numbers. */");
///
/// assert!(result.error.is_none());
/// assert_eq!(result.parts[0].kind.as_deref(), Some("description"));
/// assert_eq!(
///     result.parts[0].text,
///     Some(PartText::Plain("Adds two numbers.".to_owned()))
/// );
/// ```
#[must_use]
pub fn parse(raw_comment: &str) -> ParserResult {
    let mut root = CommentRule::new();
    let mut last: Option<Token> = None;

    for token in Lexer::new(raw_comment) {
        last = Some(token.clone());
        match root.next(token) {
            ParserStatus::InProgress => {}
            ParserStatus::Success => break,
            ParserStatus::Error(error) => return ParserResult::failure(error),
            ParserStatus::Backtrack(tokens) => {
                // The root rule rejects trailing tokens, so a backtrack
                // reaching here means the comment shape itself is off.
                let error = match tokens.first() {
                    Some(token) => unexpected(token),
                    None => end_of_comment(last.as_ref()),
                };
                return ParserResult::failure(error);
            }
        }
    }

    if root.is_valid() {
        ParserResult::success(root.serialize())
    } else {
        ParserResult::failure(end_of_comment(last.as_ref()))
    }
}

fn end_of_comment(last: Option<&Token>) -> ParserError {
    match last {
        Some(token) => ParserError::new(
            "unexpected end of comment",
            token.line(),
            token.start(),
            token.end(),
        ),
        None => ParserError::new("unexpected end of comment", 0, 0, 0),
    }
}
