//! Body, attribute, block and label schemas.

use std::collections::HashMap;

use crate::constraint::ExprConstraints;
use crate::dependent::SchemaKey;

/// Schema of a body: which attributes and blocks are legal inside it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodySchema {
    /// Named attribute schemas. Lookup is exact-match.
    pub attributes: HashMap<String, AttributeSchema>,
    /// Named block schemas. Lookup is exact-match.
    pub blocks: HashMap<String, BlockSchema>,
    /// Fallback schema applied to attribute names with no named entry.
    /// When both a named entry and this fallback are absent, the attribute
    /// is an unknown construct.
    pub any_attribute: Option<AttributeSchema>,
    /// Short signature-line text, shown next to the name in hover output.
    pub detail: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Documentation link, rendered in hover output for dependency-key
    /// labels that selected this body schema.
    pub docs_link: Option<DocsLink>,
}

impl BodySchema {
    /// Merge this schema with a dependent body schema selected for the same
    /// block.
    ///
    /// Dependent entries take precedence on name collision; entries the
    /// dependent schema does not declare fall back to this schema's.
    pub fn merged_with(&self, dependent: &BodySchema) -> BodySchema {
        let mut merged = self.clone();
        for (name, attr) in &dependent.attributes {
            merged.attributes.insert(name.clone(), attr.clone());
        }
        for (name, block) in &dependent.blocks {
            merged.blocks.insert(name.clone(), block.clone());
        }
        if dependent.any_attribute.is_some() {
            merged.any_attribute = dependent.any_attribute.clone();
        }
        if dependent.detail.is_some() {
            merged.detail = dependent.detail.clone();
        }
        if dependent.description.is_some() {
            merged.description = dependent.description.clone();
        }
        if dependent.docs_link.is_some() {
            merged.docs_link = dependent.docs_link.clone();
        }
        merged
    }
}

/// Schema of a single attribute.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeSchema {
    /// Constraints on the value expression, tried in order.
    pub expr: ExprConstraints,
    /// Whether the attribute is deprecated.
    pub is_deprecated: bool,
    /// Whether this attribute's literal value participates in dependency-key
    /// computation for the owning block.
    pub is_dep_key: bool,
    /// Free-text description.
    pub description: Option<String>,
    /// Short signature-line text. When absent, hover output synthesizes one
    /// from the declared constraint types.
    pub detail: Option<String>,
}

/// Schema of a block type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockSchema {
    /// Label schemas, position-significant: label *i* of an instance is
    /// governed by entry *i*.
    pub labels: Vec<LabelSchema>,
    /// Schema of the block's own body content.
    pub body: Option<BodySchema>,
    /// Body schemas selected by the block instance's dependency keys.
    pub dependent_body: HashMap<SchemaKey, BodySchema>,
    /// Whether the block type is deprecated.
    pub is_deprecated: bool,
    /// Free-text description.
    pub description: Option<String>,
    /// Short signature-line text.
    pub detail: Option<String>,
}

/// Schema of one block label position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelSchema {
    /// The label's role name, e.g. `type` or `name`.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Whether this label's literal value participates in dependency-key
    /// computation for the owning block.
    pub is_dep_key: bool,
}

impl LabelSchema {
    /// Create a plain (non-dependency-key) label schema.
    pub fn new(name: impl Into<String>) -> Self {
        LabelSchema {
            name: name.into(),
            description: None,
            is_dep_key: false,
        }
    }

    /// Create a dependency-key label schema.
    pub fn dep_key(name: impl Into<String>) -> Self {
        LabelSchema {
            name: name.into(),
            description: None,
            is_dep_key: true,
        }
    }
}

/// A documentation link carried by a body schema.
#[derive(Debug, Clone, PartialEq)]
pub struct DocsLink {
    /// Absolute URL of the documentation page.
    pub url: String,
    /// Optional tooltip text.
    pub tooltip: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueType;

    fn attr(ty: ValueType) -> AttributeSchema {
        AttributeSchema {
            expr: ExprConstraints::literal_type_only(ty),
            ..Default::default()
        }
    }

    #[test]
    fn merged_with_dependent_entry_wins_on_collision() {
        let plain = BodySchema {
            attributes: HashMap::from([
                ("count".to_string(), attr(ValueType::Number)),
                ("name".to_string(), attr(ValueType::String)),
            ]),
            ..Default::default()
        };
        let dependent = BodySchema {
            attributes: HashMap::from([("count".to_string(), attr(ValueType::String))]),
            ..Default::default()
        };

        let merged = plain.merged_with(&dependent);
        assert_eq!(merged.attributes.len(), 2);
        // Collision resolved in favor of the dependent schema.
        assert_eq!(
            merged.attributes["count"].expr,
            ExprConstraints::literal_type_only(ValueType::String)
        );
        // Non-colliding plain entry survives.
        assert_eq!(
            merged.attributes["name"].expr,
            ExprConstraints::literal_type_only(ValueType::String)
        );
    }

    #[test]
    fn merged_with_prefers_dependent_metadata() {
        let plain = BodySchema {
            detail: Some("plain".to_string()),
            description: Some("plain body".to_string()),
            ..Default::default()
        };
        let dependent = BodySchema {
            detail: Some("dependent".to_string()),
            ..Default::default()
        };

        let merged = plain.merged_with(&dependent);
        assert_eq!(merged.detail.as_deref(), Some("dependent"));
        // The dependent schema declares no description, so the plain one is kept.
        assert_eq!(merged.description.as_deref(), Some("plain body"));
    }

    #[test]
    fn merged_with_empty_dependent_is_identity() {
        let plain = BodySchema {
            attributes: HashMap::from([("a".to_string(), attr(ValueType::Bool))]),
            ..Default::default()
        };
        let merged = plain.merged_with(&BodySchema::default());
        assert_eq!(merged, plain);
    }
}
