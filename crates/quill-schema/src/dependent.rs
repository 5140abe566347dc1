//! Dependency keys: selecting a body schema from concrete document values.
//!
//! A block schema may declare that some of its labels or attributes are
//! *dependency keys*. The literal values found at those positions in a block
//! instance are collected into a [`DependencyKeys`] set and canonicalized
//! into a [`SchemaKey`], which selects a dependent body schema from the block
//! schema's table. Matching is all-or-nothing: a table entry activates only
//! when the canonical keys are equal, never on a partial match.

use quill_syntax::{Block, Expression, LiteralValue};

use crate::schema::{BlockSchema, BodySchema};
use crate::types::number_to_string;

/// A (label-index, literal-value) dependency fact.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDependent {
    /// Index of the label within the block.
    pub index: usize,
    /// The label's literal value.
    pub value: String,
}

/// An (attribute-name, literal-value) dependency fact.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDependent {
    /// The attribute name.
    pub name: String,
    /// The attribute's literal value.
    pub value: LiteralValue,
}

/// The set of dependency facts extracted from a block instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DependencyKeys {
    /// Label facts.
    pub labels: Vec<LabelDependent>,
    /// Attribute facts.
    pub attributes: Vec<AttributeDependent>,
}

impl DependencyKeys {
    /// Whether no dependency fact was declared.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.attributes.is_empty()
    }

    /// Add a label fact.
    pub fn with_label(mut self, index: usize, value: impl Into<String>) -> Self {
        self.labels.push(LabelDependent {
            index,
            value: value.into(),
        });
        self
    }

    /// Add an attribute fact.
    pub fn with_attribute(mut self, name: impl Into<String>, value: LiteralValue) -> Self {
        self.attributes.push(AttributeDependent {
            name: name.into(),
            value,
        });
        self
    }

    /// Extract the dependency keys of a block instance under a block schema.
    ///
    /// Labels beyond the instance's label count, absent keyed attributes and
    /// keyed attributes whose value is not a wholly-known literal are simply
    /// not collected; the resulting key then fails to match any table entry
    /// that declares them.
    pub fn from_block(block: &Block, schema: &BlockSchema) -> Self {
        let mut keys = DependencyKeys::default();

        for (i, label_schema) in schema.labels.iter().enumerate() {
            if !label_schema.is_dep_key {
                continue;
            }
            if let Some(label) = block.labels.get(i) {
                keys.labels.push(LabelDependent {
                    index: i,
                    value: label.value.clone(),
                });
            }
        }

        let Some(body_schema) = &schema.body else {
            return keys;
        };
        let Some(body) = &block.body else {
            return keys;
        };
        for attr in &body.attributes {
            let Some(attr_schema) = body_schema.attributes.get(&attr.name) else {
                continue;
            };
            if !attr_schema.is_dep_key {
                continue;
            }
            if let Some(value) = literal_value(&attr.expr) {
                if value.is_known() {
                    keys.attributes.push(AttributeDependent {
                        name: attr.name.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        keys
    }

    /// Canonicalize into a [`SchemaKey`].
    pub fn schema_key(&self) -> SchemaKey {
        SchemaKey::new(self)
    }
}

/// The canonical, order-independent serialization of a [`DependencyKeys`]
/// set, used as the lookup key into a dependent-body-schema table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaKey(String);

impl SchemaKey {
    /// Canonicalize a dependency-key set. Construction order of the facts
    /// does not affect the result.
    pub fn new(keys: &DependencyKeys) -> Self {
        let mut labels: Vec<&LabelDependent> = keys.labels.iter().collect();
        labels.sort_by_key(|l| l.index);

        let mut attrs: Vec<&AttributeDependent> = keys.attributes.iter().collect();
        attrs.sort_by(|a, b| a.name.cmp(&b.name));

        let mut parts = Vec::with_capacity(labels.len() + attrs.len());
        for label in labels {
            parts.push(format!("label[{}]={:?}", label.index, label.value));
        }
        for attr in attrs {
            parts.push(format!(
                "attr[{:?}]={}",
                attr.name,
                serialize_literal(&attr.value)
            ));
        }

        SchemaKey(parts.join(";"))
    }
}

fn serialize_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Unknown => "?".to_string(),
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Number(n) => number_to_string(*n),
        LiteralValue::String(s) => format!("{:?}", s),
    }
}

/// Unwrap single-part templates down to the inner literal, if any.
fn literal_value(expr: &Expression) -> Option<&LiteralValue> {
    match expr {
        Expression::Literal(lit) => Some(&lit.value),
        Expression::Template(tpl) if tpl.parts.len() == 1 => literal_value(&tpl.parts[0]),
        Expression::TemplateWrap(wrap) => literal_value(&wrap.wrapped),
        _ => None,
    }
}

impl BlockSchema {
    /// Resolve the dependent body schema for a block instance, if its
    /// dependency keys match a registered entry.
    ///
    /// Missing labels or non-literal keyed attributes never error; they make
    /// the lookup miss, and the caller falls back to the plain body schema.
    pub fn dependent_body_schema(&self, block: &Block) -> Option<&BodySchema> {
        let keys = DependencyKeys::from_block(block, self);
        if keys.is_empty() {
            return None;
        }
        self.dependent_body.get(&keys.schema_key())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use quill_syntax::{Attribute, Body, Label, Span};

    use super::*;
    use crate::schema::{AttributeSchema, LabelSchema};
    use crate::types::ValueType;
    use crate::ExprConstraints;

    fn block_with_labels(labels: &[&str]) -> Block {
        Block {
            block_type: "resource".to_string(),
            type_span: Span::new(0, 8),
            labels: labels
                .iter()
                .enumerate()
                .map(|(i, v)| Label::new(*v, Span::new(10 + i as u32 * 10, 15 + i as u32 * 10)))
                .collect(),
            body: Some(Body::new(Span::new(40, 42))),
            span: Span::new(0, 42),
        }
    }

    fn dep_key_schema() -> BlockSchema {
        BlockSchema {
            labels: vec![LabelSchema::dep_key("type"), LabelSchema::new("name")],
            dependent_body: HashMap::from([(
                DependencyKeys::default()
                    .with_label(0, "aws_instance")
                    .schema_key(),
                BodySchema {
                    detail: Some("aws instance".to_string()),
                    ..Default::default()
                },
            )]),
            ..Default::default()
        }
    }

    #[test]
    fn schema_key_is_order_independent() {
        let a = DependencyKeys::default()
            .with_label(1, "x")
            .with_label(0, "y")
            .with_attribute("provider", LiteralValue::String("aws".into()));
        let b = DependencyKeys::default()
            .with_attribute("provider", LiteralValue::String("aws".into()))
            .with_label(0, "y")
            .with_label(1, "x");
        assert_eq!(a.schema_key(), b.schema_key());
    }

    #[test]
    fn schema_key_distinguishes_values_and_positions() {
        let a = DependencyKeys::default().with_label(0, "x");
        let b = DependencyKeys::default().with_label(1, "x");
        let c = DependencyKeys::default().with_label(0, "y");
        assert_ne!(a.schema_key(), b.schema_key());
        assert_ne!(a.schema_key(), c.schema_key());
    }

    #[test]
    fn matching_label_selects_dependent_schema() {
        let schema = dep_key_schema();
        let block = block_with_labels(&["aws_instance", "web"]);
        let dep = schema.dependent_body_schema(&block).expect("should match");
        assert_eq!(dep.detail.as_deref(), Some("aws instance"));
    }

    #[test]
    fn non_matching_label_yields_none() {
        let schema = dep_key_schema();
        let block = block_with_labels(&["other_type", "web"]);
        assert!(schema.dependent_body_schema(&block).is_none());
    }

    #[test]
    fn missing_label_yields_none() {
        let schema = dep_key_schema();
        let block = block_with_labels(&[]);
        assert!(schema.dependent_body_schema(&block).is_none());
    }

    #[test]
    fn keyed_attribute_participates_in_lookup() {
        let mut schema = BlockSchema {
            body: Some(BodySchema {
                attributes: HashMap::from([(
                    "provider".to_string(),
                    AttributeSchema {
                        expr: ExprConstraints::literal_type_only(ValueType::String),
                        is_dep_key: true,
                        ..Default::default()
                    },
                )]),
                ..Default::default()
            }),
            ..Default::default()
        };
        schema.dependent_body.insert(
            DependencyKeys::default()
                .with_attribute("provider", LiteralValue::String("aws".into()))
                .schema_key(),
            BodySchema {
                detail: Some("aws provider".to_string()),
                ..Default::default()
            },
        );

        let mut block = block_with_labels(&[]);
        block.body.as_mut().unwrap().attributes.push(Attribute::new(
            "provider",
            Span::new(41, 49),
            Expression::literal(LiteralValue::String("aws".into()), Span::new(52, 57)),
        ));

        let dep = schema.dependent_body_schema(&block).expect("should match");
        assert_eq!(dep.detail.as_deref(), Some("aws provider"));
    }

    #[test]
    fn unknown_keyed_attribute_value_misses() {
        let mut schema = BlockSchema {
            body: Some(BodySchema {
                attributes: HashMap::from([(
                    "provider".to_string(),
                    AttributeSchema {
                        is_dep_key: true,
                        ..Default::default()
                    },
                )]),
                ..Default::default()
            }),
            ..Default::default()
        };
        schema.dependent_body.insert(
            DependencyKeys::default()
                .with_attribute("provider", LiteralValue::String("aws".into()))
                .schema_key(),
            BodySchema::default(),
        );

        let mut block = block_with_labels(&[]);
        block.body.as_mut().unwrap().attributes.push(Attribute::new(
            "provider",
            Span::new(41, 49),
            Expression::literal(LiteralValue::Unknown, Span::new(52, 52)),
        ));

        assert!(schema.dependent_body_schema(&block).is_none());
    }
}
