use crate::error::ParserError;

/// One serialized unit of a doc comment: the description, one block tag,
/// one inline tag, or one plain text segment inside mixed content.
///
/// Every field is optional; which fields are populated depends on `kind`.
/// A block tag whose body is nothing but the tag name (e.g. `@readonly`)
/// carries `modifier: Some(true)` and nothing else besides `kind`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommentPart {
    /// Tag name, or `"description"` / `"text"` for non-tag parts.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub kind: Option<String>,
    /// Bracketed type annotation text, minus the outermost braces.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", skip_serializing_if = "Option::is_none")
    )]
    pub ty: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// True when the tag body is only a kind, e.g. `@readonly`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub modifier: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub default: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub optional: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub text: Option<PartText>,
    /// Link-like inline tag target, e.g. a URL or symbol path.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub target: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "targetText", skip_serializing_if = "Option::is_none")
    )]
    pub target_text: Option<String>,
}

impl CommentPart {
    /// A plain text segment (`kind: "text"`).
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Some("text".to_owned()),
            text: Some(PartText::Plain(text.into())),
            ..Self::default()
        }
    }

    /// The description part (`kind: "description"`).
    pub(crate) fn description(text: PartText) -> Self {
        Self {
            kind: Some("description".to_owned()),
            text: Some(text),
            ..Self::default()
        }
    }

    pub(crate) fn plain_text(&self) -> Option<&str> {
        match &self.text {
            Some(PartText::Plain(text)) => Some(text),
            _ => None,
        }
    }

    pub(crate) fn is_text(&self) -> bool {
        self.kind.as_deref() == Some("text")
    }
}

/// Tag or description text: a plain string, or a mixed list of text
/// segments and inline tags when the two are interleaved.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum PartText {
    Plain(String),
    Parts(Vec<CommentPart>),
}

/// The outcome of one `parse` call: either `error` is set and `parts` is
/// empty, or `error` is `None` and `parts` holds the comment's parts.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserResult {
    pub error: Option<ParserError>,
    pub parts: Vec<CommentPart>,
}

impl ParserResult {
    pub(crate) fn success(parts: Vec<CommentPart>) -> Self {
        Self { error: None, parts }
    }

    pub(crate) fn failure(error: ParserError) -> Self {
        Self {
            error: Some(error),
            parts: Vec::new(),
        }
    }
}
