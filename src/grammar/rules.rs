//! The concrete doc-comment grammar, built from the primitive and
//! composite combinators.
//!
//! Rule layout mirrors the comment shape: a `comment` root wrapping an
//! optional description, a run of block-tag/empty lines, and the `/**`
//! and `*/` fences. Description and tag-body text is post-processed here
//! as well (adjacent text parts merge, doubled newlines collapse, and a
//! single text part collapses to a plain string).

use crate::ast::{CommentPart, PartText};
use crate::grammar::composites::{EndBehavior, OneOf, OneOrMore, Sequence};
use crate::grammar::primitives::{Boundary, Not, Omit, Optional, Terminal};
use crate::grammar::{unexpected, GrammarSymbol, ParserStatus};
use crate::lexer::{Token, TokenKind};

/// Block tags whose positional name-like token folds into `text` instead
/// of populating `name`.
const BLOCK_TAGS_WITHOUT_NAME: [&str; 18] = [
    "access",
    "author",
    "default",
    "description",
    "example",
    "exception",
    "file",
    "fileoverview",
    "kind",
    "license",
    "overview",
    "return",
    "returns",
    "since",
    "summary",
    "throws",
    "version",
    "variation",
];

fn boxed(symbol: impl GrammarSymbol + 'static) -> Box<dyn GrammarSymbol> {
    Box::new(symbol)
}

fn optional(symbol: impl GrammarSymbol + 'static) -> Box<dyn GrammarSymbol> {
    boxed(Optional::new(symbol))
}

fn single(kind: TokenKind) -> Box<dyn GrammarSymbol> {
    boxed(Terminal::single(kind))
}

fn opt_single(kind: TokenKind) -> Box<dyn GrammarSymbol> {
    optional(Terminal::single(kind))
}

/// The text a description or tag-body line may hold between inline tags:
/// everything up to an unescaped `[`, `{`, `@`, a newline, or the
/// comment close.
fn text_run() -> Box<dyn GrammarSymbol> {
    boxed(Omit::new(vec![
        Boundary::escapable(vec![TokenKind::LeftSquareBracket]),
        Boundary::escapable(vec![TokenKind::LeftCurlyBracket]),
        Boundary::escapable(vec![TokenKind::AtSign]),
        Boundary::new(vec![TokenKind::Newline]),
        Boundary::new(vec![TokenKind::Star, TokenKind::Slash]),
    ]))
}

/// Free text interleaved with inline tags.
fn body_items() -> OneOrMore {
    OneOrMore::new(|_| {
        boxed(OneOf::new(vec![
            (text_run(), 0),
            (boxed(inline_tag()), 0),
        ]))
    })
}

/// One physical line of a description (or of a block tag body when
/// `require_leading` is set for continuations). The first line may start
/// bare after `/**`; every later line needs its ` *` leading.
fn text_line(require_leading: bool) -> Box<dyn GrammarSymbol> {
    let mut symbols: Vec<Box<dyn GrammarSymbol>> = Vec::new();
    if require_leading {
        symbols.push(single(TokenKind::Spaces));
        symbols.push(single(TokenKind::Star));
    } else {
        symbols.push(opt_single(TokenKind::Spaces));
        symbols.push(opt_single(TokenKind::Star));
    }
    symbols.push(boxed(Not::new(vec![TokenKind::Star, TokenKind::Slash])));
    symbols.push(opt_single(TokenKind::Spaces));
    symbols.push(boxed(Not::new(vec![TokenKind::AtSign])));
    symbols.push(optional(body_items()));
    symbols.push(optional(Terminal::single_text(TokenKind::Newline)));
    boxed(Sequence::new(symbols, EndBehavior::Yield))
}

/// First line of a block tag body: the remainder of the tag's own line.
fn tag_body_first_line() -> Box<dyn GrammarSymbol> {
    boxed(Sequence::new(
        vec![
            boxed(Not::new(vec![TokenKind::AtSign])),
            optional(body_items()),
            optional(Terminal::single_text(TokenKind::Newline)),
        ],
        EndBehavior::Yield,
    ))
}

/// A ` *` line carrying nothing, separating description from tags or one
/// tag from the next.
fn empty_line() -> Box<dyn GrammarSymbol> {
    boxed(Sequence::new(
        vec![
            opt_single(TokenKind::Spaces),
            single(TokenKind::Star),
            opt_single(TokenKind::Spaces),
            single(TokenKind::Newline),
        ],
        EndBehavior::Yield,
    ))
}

/// Pull the plain text out of a symbol's serialized fragment.
fn text_of(symbol: &dyn GrammarSymbol) -> Option<String> {
    symbol
        .serialize()
        .into_iter()
        .next()
        .and_then(|part| part.plain_text().map(str::to_owned))
}

fn collapse_newlines(text: &str) -> String {
    let mut text = text.to_owned();
    while text.contains("\n\n") {
        text = text.replace("\n\n", "\n");
    }
    text
}

/// Merge adjacent text parts, collapsing doubled newlines inside each
/// merged run.
fn merge_text_parts(parts: Vec<CommentPart>) -> Vec<CommentPart> {
    let mut merged: Vec<CommentPart> = Vec::new();
    for part in parts {
        if part.is_text() {
            if let Some(last) = merged.last_mut() {
                if last.is_text() {
                    let joined = format!(
                        "{}{}",
                        last.plain_text().unwrap_or_default(),
                        part.plain_text().unwrap_or_default()
                    );
                    last.text = Some(PartText::Plain(collapse_newlines(&joined)));
                    continue;
                }
            }
            let collapsed = collapse_newlines(part.plain_text().unwrap_or_default());
            merged.push(CommentPart::text(collapsed));
        } else {
            merged.push(part);
        }
    }
    merged
}

/// Normalize the flat text/inline-tag list of a description or tag body:
/// all-whitespace input vanishes, a lone trailing newline is dropped, and
/// a single surviving text part collapses to a plain string.
fn fold_body(parts: Vec<CommentPart>) -> Option<PartText> {
    let mut merged = merge_text_parts(parts);

    if let Some(last) = merged.last_mut() {
        if last.is_text() {
            let trimmed = last.plain_text().unwrap_or_default().trim_end().to_owned();
            if trimmed.is_empty() {
                merged.pop();
            } else {
                last.text = Some(PartText::Plain(trimmed));
            }
        }
    }
    if let Some(first) = merged.first_mut() {
        if first.is_text() {
            let trimmed = first
                .plain_text()
                .unwrap_or_default()
                .trim_start_matches('\n')
                .to_owned();
            if trimmed.is_empty() {
                merged.remove(0);
            } else {
                first.text = Some(PartText::Plain(trimmed));
            }
        }
    }

    match merged.len() {
        0 => None,
        1 if merged[0].is_text() => {
            let text = merged[0].plain_text().unwrap_or_default().to_owned();
            Some(PartText::Plain(text))
        }
        _ => Some(PartText::Parts(merged)),
    }
}

/// The comment description: one or more lines, normalized into a single
/// `description` part.
pub(crate) struct DescriptionRule {
    lines: OneOrMore,
}

impl DescriptionRule {
    pub(crate) fn new() -> Self {
        Self {
            lines: OneOrMore::new(|index| text_line(index > 0)),
        }
    }
}

impl GrammarSymbol for DescriptionRule {
    fn next(&mut self, token: Token) -> ParserStatus {
        self.lines.next(token)
    }

    fn is_valid(&self) -> bool {
        self.lines.is_valid()
    }

    fn serialize(&self) -> Vec<CommentPart> {
        match fold_body(self.lines.serialize()) {
            Some(text) => vec![CommentPart::description(text)],
            None => Vec::new(),
        }
    }
}

/// `{...}` type annotation after a block tag name. Nested braces are
/// tolerated via a running depth counter; the outermost pair is dropped
/// from the serialized text.
pub(crate) struct TypeAnnotationRule {
    depth: usize,
    text: String,
    started: bool,
    done: bool,
}

impl TypeAnnotationRule {
    pub(crate) fn new() -> Self {
        Self {
            depth: 0,
            text: String::new(),
            started: false,
            done: false,
        }
    }
}

impl GrammarSymbol for TypeAnnotationRule {
    fn next(&mut self, token: Token) -> ParserStatus {
        if self.done {
            return ParserStatus::Backtrack(vec![token]);
        }
        if !self.started {
            return if token.kind() == TokenKind::LeftCurlyBracket {
                self.started = true;
                self.depth = 1;
                ParserStatus::InProgress
            } else {
                ParserStatus::Error(unexpected(&token))
            };
        }
        match token.kind() {
            TokenKind::LeftCurlyBracket => {
                self.depth += 1;
                self.text.push_str(token.lexeme());
                ParserStatus::InProgress
            }
            TokenKind::RightCurlyBracket => {
                self.depth -= 1;
                if self.depth == 0 {
                    self.done = true;
                    ParserStatus::Success
                } else {
                    self.text.push_str(token.lexeme());
                    ParserStatus::InProgress
                }
            }
            TokenKind::Newline => ParserStatus::Error(unexpected(&token)),
            _ => {
                self.text.push_str(token.lexeme());
                ParserStatus::InProgress
            }
        }
    }

    fn is_valid(&self) -> bool {
        self.done
    }

    fn serialize(&self) -> Vec<CommentPart> {
        if !self.done {
            return Vec::new();
        }
        let text = self.text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        vec![CommentPart::text(text)]
    }
}

/// `=<default>` inside a bracketed optional name.
struct DefaultValueRule {
    seq: Sequence,
}

impl DefaultValueRule {
    fn new() -> Self {
        Self {
            seq: Sequence::new(
                vec![
                    single(TokenKind::Equal),
                    optional(Omit::new(vec![
                        Boundary::escapable(vec![TokenKind::RightSquareBracket]),
                        Boundary::escapable(vec![TokenKind::AtSign]),
                        Boundary::new(vec![TokenKind::Newline]),
                        Boundary::new(vec![TokenKind::Star, TokenKind::Slash]),
                    ])),
                ],
                EndBehavior::Yield,
            ),
        }
    }
}

impl GrammarSymbol for DefaultValueRule {
    fn next(&mut self, token: Token) -> ParserStatus {
        self.seq.next(token)
    }

    fn is_valid(&self) -> bool {
        self.seq.is_valid()
    }

    fn serialize(&self) -> Vec<CommentPart> {
        self.seq.serialize()
    }
}

/// `[name]` / `[name=default]` optional-parameter form.
///
/// The trailing gate refuses a `{` right after the closing bracket, so a
/// `[text]{@tag ...}` at the start of a tag body stays a bracketed
/// inline tag instead of being read as an optional name.
pub(crate) struct OptionalNameRule {
    seq: Sequence,
}

const OPT_NAME_WORD: usize = 1;
const OPT_NAME_DEFAULT: usize = 2;

impl OptionalNameRule {
    pub(crate) fn new() -> Self {
        Self {
            seq: Sequence::new(
                vec![
                    single(TokenKind::LeftSquareBracket),
                    boxed(Terminal::single_text(TokenKind::AsciiWord)),
                    optional(DefaultValueRule::new()),
                    single(TokenKind::RightSquareBracket),
                    boxed(Not::new(vec![TokenKind::LeftCurlyBracket])),
                ],
                EndBehavior::Yield,
            ),
        }
    }
}

impl GrammarSymbol for OptionalNameRule {
    fn next(&mut self, token: Token) -> ParserStatus {
        self.seq.next(token)
    }

    fn is_valid(&self) -> bool {
        self.seq.is_valid()
    }

    fn serialize(&self) -> Vec<CommentPart> {
        if !self.seq.is_valid() {
            return Vec::new();
        }
        let Some(name) = text_of(self.seq.symbol(OPT_NAME_WORD)) else {
            return Vec::new();
        };
        vec![CommentPart {
            name: Some(name),
            optional: Some(true),
            default: text_of(self.seq.symbol(OPT_NAME_DEFAULT)),
            ..CommentPart::default()
        }]
    }
}

/// `{@tag target}` / `{@tag target|text}`.
struct PlainInlineRule {
    seq: Sequence,
}

const PLAIN_TAG: usize = 2;
const PLAIN_TARGET: usize = 4;
const PLAIN_PIPE_TEXT: usize = 5;

impl PlainInlineRule {
    fn new() -> Self {
        Self {
            seq: Sequence::new(
                vec![
                    single(TokenKind::LeftCurlyBracket),
                    single(TokenKind::AtSign),
                    boxed(Terminal::single_text(TokenKind::AsciiWord)),
                    opt_single(TokenKind::Spaces),
                    optional(Omit::new(vec![
                        Boundary::escapable(vec![TokenKind::RightCurlyBracket]),
                        Boundary::escapable(vec![TokenKind::LeftCurlyBracket]),
                        Boundary::new(vec![TokenKind::AtSign]),
                        Boundary::new(vec![TokenKind::Pipe]),
                        Boundary::new(vec![TokenKind::Newline]),
                        Boundary::new(vec![TokenKind::Star, TokenKind::Slash]),
                    ])),
                    optional(PipeTextRule::new()),
                    single(TokenKind::RightCurlyBracket),
                ],
                EndBehavior::Yield,
            ),
        }
    }
}

impl GrammarSymbol for PlainInlineRule {
    fn next(&mut self, token: Token) -> ParserStatus {
        self.seq.next(token)
    }

    fn is_valid(&self) -> bool {
        self.seq.is_valid()
    }

    fn serialize(&self) -> Vec<CommentPart> {
        if !self.seq.is_valid() {
            return Vec::new();
        }
        let Some(kind) = text_of(self.seq.symbol(PLAIN_TAG)) else {
            return Vec::new();
        };
        vec![CommentPart {
            kind: Some(kind),
            target: text_of(self.seq.symbol(PLAIN_TARGET)).map(|t| t.trim().to_owned()),
            target_text: text_of(self.seq.symbol(PLAIN_PIPE_TEXT)).map(|t| t.trim().to_owned()),
            ..CommentPart::default()
        }]
    }
}

/// `|<text>` tail inside a plain inline tag.
struct PipeTextRule {
    seq: Sequence,
}

impl PipeTextRule {
    fn new() -> Self {
        Self {
            seq: Sequence::new(
                vec![
                    single(TokenKind::Pipe),
                    optional(Omit::new(vec![
                        Boundary::escapable(vec![TokenKind::RightCurlyBracket]),
                        Boundary::escapable(vec![TokenKind::LeftCurlyBracket]),
                        Boundary::new(vec![TokenKind::AtSign]),
                        Boundary::new(vec![TokenKind::Newline]),
                        Boundary::new(vec![TokenKind::Star, TokenKind::Slash]),
                    ])),
                ],
                EndBehavior::Yield,
            ),
        }
    }
}

impl GrammarSymbol for PipeTextRule {
    fn next(&mut self, token: Token) -> ParserStatus {
        self.seq.next(token)
    }

    fn is_valid(&self) -> bool {
        self.seq.is_valid()
    }

    fn serialize(&self) -> Vec<CommentPart> {
        self.seq.serialize()
    }
}

/// `[<linkText>]{@tag target}`.
struct BracketedInlineRule {
    seq: Sequence,
}

const BRACKETED_LINK_TEXT: usize = 1;
const BRACKETED_TAG: usize = 5;
const BRACKETED_TARGET: usize = 7;

impl BracketedInlineRule {
    fn new() -> Self {
        Self {
            seq: Sequence::new(
                vec![
                    single(TokenKind::LeftSquareBracket),
                    optional(Omit::new(vec![
                        Boundary::escapable(vec![TokenKind::RightSquareBracket]),
                        Boundary::escapable(vec![TokenKind::LeftCurlyBracket]),
                        Boundary::new(vec![TokenKind::AtSign]),
                        Boundary::new(vec![TokenKind::Newline]),
                        Boundary::new(vec![TokenKind::Star, TokenKind::Slash]),
                    ])),
                    single(TokenKind::RightSquareBracket),
                    single(TokenKind::LeftCurlyBracket),
                    single(TokenKind::AtSign),
                    boxed(Terminal::single_text(TokenKind::AsciiWord)),
                    opt_single(TokenKind::Spaces),
                    optional(Omit::new(vec![
                        Boundary::escapable(vec![TokenKind::RightCurlyBracket]),
                        Boundary::escapable(vec![TokenKind::LeftCurlyBracket]),
                        Boundary::new(vec![TokenKind::AtSign]),
                        Boundary::new(vec![TokenKind::Newline]),
                        Boundary::new(vec![TokenKind::Star, TokenKind::Slash]),
                    ])),
                    single(TokenKind::RightCurlyBracket),
                ],
                EndBehavior::Yield,
            ),
        }
    }
}

impl GrammarSymbol for BracketedInlineRule {
    fn next(&mut self, token: Token) -> ParserStatus {
        self.seq.next(token)
    }

    fn is_valid(&self) -> bool {
        self.seq.is_valid()
    }

    fn serialize(&self) -> Vec<CommentPart> {
        if !self.seq.is_valid() {
            return Vec::new();
        }
        let Some(kind) = text_of(self.seq.symbol(BRACKETED_TAG)) else {
            return Vec::new();
        };
        vec![CommentPart {
            kind: Some(kind),
            target: text_of(self.seq.symbol(BRACKETED_TARGET)).map(|t| t.trim().to_owned()),
            target_text: text_of(self.seq.symbol(BRACKETED_LINK_TEXT))
                .map(|t| t.trim().to_owned()),
            ..CommentPart::default()
        }]
    }
}

/// The two inline-tag shapes, tried in parallel at equal priority.
fn inline_tag() -> OneOf {
    OneOf::new(vec![
        (boxed(BracketedInlineRule::new()), 0),
        (boxed(PlainInlineRule::new()), 0),
    ])
}

/// `@tag {type} name-or-[name=default] - body...` occupying one or more
/// lines.
pub(crate) struct BlockTagRule {
    seq: Sequence,
}

const TAG_NAME: usize = 4;
const TAG_TYPE: usize = 6;
const TAG_PARAM: usize = 8;
const TAG_BODY: usize = 12;

impl BlockTagRule {
    pub(crate) fn new() -> Self {
        Self {
            seq: Sequence::new(
                vec![
                    opt_single(TokenKind::Spaces),
                    opt_single(TokenKind::Star),
                    opt_single(TokenKind::Spaces),
                    single(TokenKind::AtSign),
                    boxed(Terminal::single_text(TokenKind::AsciiWord)),
                    opt_single(TokenKind::Spaces),
                    optional(TypeAnnotationRule::new()),
                    opt_single(TokenKind::Spaces),
                    optional(OneOf::new(vec![
                        (boxed(OptionalNameRule::new()), 1),
                        (boxed(Terminal::single_text(TokenKind::AsciiWord)), 0),
                    ])),
                    opt_single(TokenKind::Spaces),
                    opt_single(TokenKind::Hyphen),
                    opt_single(TokenKind::Spaces),
                    optional(OneOrMore::new(|index| {
                        if index == 0 {
                            tag_body_first_line()
                        } else {
                            text_line(true)
                        }
                    })),
                ],
                EndBehavior::Yield,
            ),
        }
    }
}

impl GrammarSymbol for BlockTagRule {
    fn next(&mut self, token: Token) -> ParserStatus {
        self.seq.next(token)
    }

    fn is_valid(&self) -> bool {
        self.seq.is_valid()
    }

    fn serialize(&self) -> Vec<CommentPart> {
        let Some(kind) = text_of(self.seq.symbol(TAG_NAME)) else {
            return Vec::new();
        };

        let ty = text_of(self.seq.symbol(TAG_TYPE));
        let mut name = None;
        let mut optional = None;
        let mut default = None;
        if let Some(param) = self.seq.symbol(TAG_PARAM).serialize().into_iter().next() {
            if param.is_text() {
                name = param.plain_text().map(str::to_owned);
            } else {
                name = param.name;
                optional = param.optional;
                default = param.default;
            }
        }

        let mut text = fold_body(self.seq.symbol(TAG_BODY).serialize());

        if BLOCK_TAGS_WITHOUT_NAME.contains(&kind.as_str()) {
            if let Some(folded) = name.take() {
                text = Some(match text {
                    None => PartText::Plain(folded),
                    Some(PartText::Plain(rest)) => PartText::Plain(format!("{folded} {rest}")),
                    Some(PartText::Parts(mut parts)) => {
                        parts.insert(0, CommentPart::text(format!("{folded} ")));
                        PartText::Parts(parts)
                    }
                });
            }
        }

        let modifier = if ty.is_none()
            && name.is_none()
            && default.is_none()
            && optional.is_none()
            && text.is_none()
        {
            Some(true)
        } else {
            None
        };

        vec![CommentPart {
            kind: Some(kind),
            ty,
            name,
            modifier,
            default,
            optional,
            text,
            ..CommentPart::default()
        }]
    }
}

/// The tag section: a run of block tags and empty ` *` separator lines.
fn tag_section() -> OneOrMore {
    OneOrMore::new(|_| {
        boxed(OneOf::new(vec![
            (empty_line(), 0),
            (boxed(BlockTagRule::new()), 0),
        ]))
    })
}

/// The root rule: `/**`, optional newline, optional description,
/// optional tag section, the closing `*/`.
pub(crate) struct CommentRule {
    seq: Sequence,
}

impl CommentRule {
    pub(crate) fn new() -> Self {
        Self {
            seq: Sequence::new(
                vec![
                    single(TokenKind::Slash),
                    single(TokenKind::Star),
                    single(TokenKind::Star),
                    opt_single(TokenKind::Newline),
                    optional(DescriptionRule::new()),
                    optional(tag_section()),
                    opt_single(TokenKind::Spaces),
                    single(TokenKind::Star),
                    single(TokenKind::Slash),
                ],
                EndBehavior::Reject,
            ),
        }
    }
}

impl GrammarSymbol for CommentRule {
    fn next(&mut self, token: Token) -> ParserStatus {
        self.seq.next(token)
    }

    fn is_valid(&self) -> bool {
        self.seq.is_valid()
    }

    fn serialize(&self) -> Vec<CommentPart> {
        self.seq.serialize()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexer::Lexer;

    fn drive(symbol: &mut dyn GrammarSymbol, text: &str) -> Vec<ParserStatus> {
        Lexer::new(text).map(|t| symbol.next(t)).collect()
    }

    #[test]
    fn test_type_annotation_tracks_nested_braces() {
        let mut rule = TypeAnnotationRule::new();
        let statuses = drive(&mut rule, "{Record<string,{a:number}>}");
        assert!(matches!(
            statuses.last(),
            Some(ParserStatus::Success)
        ));
        assert_eq!(
            rule.serialize(),
            vec![CommentPart::text("Record<string,{a:number}>")]
        );
    }

    #[test]
    fn test_type_annotation_rejects_missing_brace() {
        let mut rule = TypeAnnotationRule::new();
        let statuses = drive(&mut rule, "Boolean");
        assert!(matches!(statuses[0], ParserStatus::Error(_)));
    }

    #[test]
    fn test_optional_name_with_default() {
        let mut rule = OptionalNameRule::new();
        drive(&mut rule, "[opt=\"x\"] ");
        assert!(rule.is_valid());
        assert_eq!(
            rule.serialize(),
            vec![CommentPart {
                name: Some("opt".to_owned()),
                optional: Some(true),
                default: Some("\"x\"".to_owned()),
                ..CommentPart::default()
            }]
        );
    }

    #[test]
    fn test_optional_name_without_default() {
        let mut rule = OptionalNameRule::new();
        drive(&mut rule, "[opt] ");
        assert!(rule.is_valid());
        assert_eq!(
            rule.serialize(),
            vec![CommentPart {
                name: Some("opt".to_owned()),
                optional: Some(true),
                ..CommentPart::default()
            }]
        );
    }

    #[test]
    fn test_optional_name_rejects_bracketed_inline_tag() {
        // `[Docs]{` opens an inline tag, not an optional name.
        let mut rule = OptionalNameRule::new();
        let statuses = drive(&mut rule, "[Docs]{");
        assert!(matches!(statuses.last(), Some(ParserStatus::Error(_))));
        assert!(!rule.is_valid());
    }

    #[test]
    fn test_plain_inline_tag_with_pipe_text() {
        let mut rule = PlainInlineRule::new();
        drive(&mut rule, "{@link https://example.com|Example}");
        assert!(rule.is_valid());
        assert_eq!(
            rule.serialize(),
            vec![CommentPart {
                kind: Some("link".to_owned()),
                target: Some("https://example.com".to_owned()),
                target_text: Some("Example".to_owned()),
                ..CommentPart::default()
            }]
        );
    }

    #[test]
    fn test_bracketed_inline_tag() {
        let mut rule = BracketedInlineRule::new();
        drive(&mut rule, "[Example]{@link https://example.com}");
        assert!(rule.is_valid());
        assert_eq!(
            rule.serialize(),
            vec![CommentPart {
                kind: Some("link".to_owned()),
                target: Some("https://example.com".to_owned()),
                target_text: Some("Example".to_owned()),
                ..CommentPart::default()
            }]
        );
    }

    #[test]
    fn test_fold_body_merges_and_trims() {
        let parts = vec![
            CommentPart::text("line1"),
            CommentPart::text("\n"),
            CommentPart::text("\n"),
            CommentPart::text("line2"),
            CommentPart::text("\n"),
        ];
        assert_eq!(fold_body(parts), Some(PartText::Plain("line1\nline2".to_owned())));
    }

    #[test]
    fn test_fold_body_drops_whitespace_only_input() {
        let parts = vec![CommentPart::text("\n"), CommentPart::text("\n")];
        assert_eq!(fold_body(parts), None);
        assert_eq!(fold_body(Vec::new()), None);
    }

    #[test]
    fn test_fold_body_keeps_mixed_content_as_parts() {
        let link = CommentPart {
            kind: Some("link".to_owned()),
            target: Some("a".to_owned()),
            ..CommentPart::default()
        };
        let parts = vec![
            CommentPart::text("see "),
            link.clone(),
            CommentPart::text(" here\n"),
        ];
        assert_eq!(
            fold_body(parts),
            Some(PartText::Parts(vec![
                CommentPart::text("see "),
                link,
                CommentPart::text(" here"),
            ]))
        );
    }
}
