//! Result types for decoder queries: hover data, completion candidates and
//! semantic tokens.

use quill_syntax::Span;

/// How a piece of content should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    /// Plain text.
    PlainText,
    /// Markdown.
    Markdown,
}

/// A piece of renderable content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupContent {
    /// Rendering hint.
    pub kind: MarkupKind,
    /// The content itself.
    pub value: String,
}

impl MarkupContent {
    /// Markdown content.
    pub fn markdown(value: impl Into<String>) -> Self {
        MarkupContent {
            kind: MarkupKind::Markdown,
            value: value.into(),
        }
    }

    /// Plain-text content.
    pub fn plain_text(value: impl Into<String>) -> Self {
        MarkupContent {
            kind: MarkupKind::PlainText,
            value: value.into(),
        }
    }
}

/// The result of a hover query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverData {
    /// Descriptive content for the construct under the cursor.
    pub content: MarkupContent,
    /// The span of the construct the content describes.
    pub span: Span,
}

/// What kind of construct a completion candidate inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// A literal value.
    LiteralValue,
    /// An attribute (`name = value`).
    Attribute,
    /// A block (`type "label" { ... }`).
    Block,
}

/// The edit a completion candidate performs when accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Replacement text.
    pub new_text: String,
    /// Replacement text with tab-stop placeholders (`${n:default}`).
    pub snippet: String,
    /// The range the edit replaces.
    pub span: Span,
}

/// A single completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Display label.
    pub label: String,
    /// Short detail text, typically a type name.
    pub detail: String,
    /// Longer description, if any.
    pub description: Option<MarkupContent>,
    /// What the candidate inserts.
    pub kind: CandidateKind,
    /// The edit to perform.
    pub text_edit: TextEdit,
}

/// A list of completion candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    /// The candidates, in preference order.
    pub list: Vec<Candidate>,
    /// Whether the list is exhaustive.
    pub is_complete: bool,
}

impl Candidates {
    /// An exhaustive list with the given candidates.
    pub fn complete(list: Vec<Candidate>) -> Self {
        Candidates {
            list,
            is_complete: true,
        }
    }

    /// An exhaustive empty list: nothing can be suggested here.
    pub fn none() -> Self {
        Candidates::complete(Vec::new())
    }
}

/// Semantic category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TokenType {
    /// A block type keyword.
    BlockType,
    /// A block label.
    BlockLabel,
    /// An attribute name.
    AttrName,
    /// A string literal.
    String,
    /// A number literal.
    Number,
    /// A boolean literal.
    Bool,
    /// A key inside an object-typed construction.
    ObjectKey,
    /// A key inside a map-typed construction.
    MapKey,
}

/// Modifier attached to a semantic token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TokenModifier {
    /// The token belongs to (or selects) a value-dependent schema.
    Dependent,
    /// The schema marks the construct as deprecated.
    Deprecated,
}

/// A semantic token: category, modifiers and source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticToken {
    /// The token's category.
    pub token_type: TokenType,
    /// Modifiers, in emission order.
    pub modifiers: Vec<TokenModifier>,
    /// Source span of the token.
    pub span: Span,
}
