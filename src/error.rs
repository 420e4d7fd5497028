use thiserror::Error;

/// A structural grammar error, attributed to the token that triggered it.
///
/// `line` is the zero-based line within the trimmed comment text; `start`
/// and `end` are column offsets on that line.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("{message} (line {line}, columns {start}..{end})")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserError {
    pub message: String,
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl ParserError {
    pub(crate) fn new(message: impl Into<String>, line: usize, start: usize, end: usize) -> Self {
        Self {
            message: message.into(),
            line,
            start,
            end,
        }
    }
}
