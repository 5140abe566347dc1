//! The value type system: literal shapes an expression may take.

use std::collections::BTreeMap;

use quill_syntax::LiteralValue;

/// The type of a literal value.
///
/// Objects carry a fixed attribute-name-to-type mapping; maps, lists and sets
/// carry a single homogeneous element type; tuples carry a positional
/// sequence of element types.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    /// `true` or `false`.
    Bool,
    /// A number.
    Number,
    /// A string.
    String,
    /// A list with a homogeneous element type.
    List(Box<ValueType>),
    /// A set with a homogeneous element type.
    Set(Box<ValueType>),
    /// A tuple with positional element types.
    Tuple(Vec<ValueType>),
    /// A map with a homogeneous element type (keys are strings).
    Map(Box<ValueType>),
    /// An object with a fixed set of named attributes.
    ///
    /// `BTreeMap` keeps attribute names ordered, so everything derived from
    /// an object type (hover listings, candidate skeletons) is deterministic.
    Object(BTreeMap<String, ValueType>),
}

impl ValueType {
    /// Whether this is a primitive (string, bool or number) type.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            ValueType::Bool | ValueType::Number | ValueType::String
        )
    }

    /// Whether this is a list type.
    pub fn is_list(&self) -> bool {
        matches!(self, ValueType::List(_))
    }

    /// Whether this is a set type.
    pub fn is_set(&self) -> bool {
        matches!(self, ValueType::Set(_))
    }

    /// Whether this is a tuple type.
    pub fn is_tuple(&self) -> bool {
        matches!(self, ValueType::Tuple(_))
    }

    /// Whether this is a map type.
    pub fn is_map(&self) -> bool {
        matches!(self, ValueType::Map(_))
    }

    /// Whether this is an object type.
    pub fn is_object(&self) -> bool {
        matches!(self, ValueType::Object(_))
    }

    /// The type of a known literal value, or `None` for unknown values.
    pub fn of_literal(value: &LiteralValue) -> Option<ValueType> {
        match value {
            LiteralValue::Unknown => None,
            LiteralValue::Bool(_) => Some(ValueType::Bool),
            LiteralValue::Number(_) => Some(ValueType::Number),
            LiteralValue::String(_) => Some(ValueType::String),
        }
    }

    /// A human-readable name for this type, e.g. `list of string`.
    pub fn friendly_name(&self) -> String {
        match self {
            ValueType::Bool => "bool".to_string(),
            ValueType::Number => "number".to_string(),
            ValueType::String => "string".to_string(),
            ValueType::List(elem) => format!("list of {}", elem.friendly_name()),
            ValueType::Set(elem) => format!("set of {}", elem.friendly_name()),
            ValueType::Tuple(_) => "tuple".to_string(),
            ValueType::Map(elem) => format!("map of {}", elem.friendly_name()),
            ValueType::Object(_) => "object".to_string(),
        }
    }

    /// Convenience constructor for an object type.
    pub fn object<I, K>(attrs: I) -> ValueType
    where
        I: IntoIterator<Item = (K, ValueType)>,
        K: Into<String>,
    {
        ValueType::Object(
            attrs
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        )
    }

    /// Convenience constructor for a list type.
    pub fn list(elem: ValueType) -> ValueType {
        ValueType::List(Box::new(elem))
    }

    /// Convenience constructor for a set type.
    pub fn set(elem: ValueType) -> ValueType {
        ValueType::Set(Box::new(elem))
    }

    /// Convenience constructor for a map type.
    pub fn map(elem: ValueType) -> ValueType {
        ValueType::Map(Box::new(elem))
    }
}

/// Render a number the way Quill sources write it: integral values without a
/// fractional part.
pub fn number_to_string(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < (i64::MAX as f64) {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friendly_names() {
        assert_eq!(ValueType::Bool.friendly_name(), "bool");
        assert_eq!(
            ValueType::list(ValueType::String).friendly_name(),
            "list of string"
        );
        assert_eq!(
            ValueType::map(ValueType::list(ValueType::Number)).friendly_name(),
            "map of list of number"
        );
        assert_eq!(
            ValueType::Tuple(vec![ValueType::Bool]).friendly_name(),
            "tuple"
        );
        assert_eq!(ValueType::object([("a", ValueType::Bool)]).friendly_name(), "object");
    }

    #[test]
    fn literal_types() {
        assert_eq!(
            ValueType::of_literal(&LiteralValue::Bool(true)),
            Some(ValueType::Bool)
        );
        assert_eq!(
            ValueType::of_literal(&LiteralValue::String("x".into())),
            Some(ValueType::String)
        );
        assert_eq!(ValueType::of_literal(&LiteralValue::Unknown), None);
    }

    #[test]
    fn number_rendering() {
        assert_eq!(number_to_string(1.0), "1");
        assert_eq!(number_to_string(-42.0), "-42");
        assert_eq!(number_to_string(1.5), "1.5");
    }
}
