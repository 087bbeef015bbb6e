//! Property values of declarations and assignments.

use std::fmt;

use usdj_am_crdt::{NodeKind, Scalar};

use crate::error::{Error, Result};
use crate::external_reference_import::ExternalReferenceImport;
use crate::node::{check_document, AstNode, FromItem};
use crate::object_value::ObjectValue;
use crate::path::Path;
use crate::utils::{Document, Item};
use crate::value_type::ValueType;

/// A numeric scalar, keeping the representation it was stored with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Uint(u64),
    Real(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Uint(u) => u as f64,
            Number::Real(r) => r,
        }
    }

    /// `None` for reals and for integers outside the `i64` range.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(i),
            Number::Uint(u) => i64::try_from(u).ok(),
            Number::Real(_) => None,
        }
    }

    /// The JSON number; non-finite reals have no JSON spelling and become
    /// `null`.
    pub fn to_json(self) -> serde_json::Value {
        match self {
            Number::Int(i) => i.into(),
            Number::Uint(u) => u.into(),
            Number::Real(r) => serde_json::Number::from_f64(r)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Uint(u) => write!(f, "{u}"),
            Number::Real(r) => write!(f, "{r}"),
        }
    }
}

pub type ConstValues<'d> = Vec<Value<'d>>;

/// Right-hand side of a declaration or assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'d> {
    Bool(bool),
    Number(Number),
    String(&'d str),
    Path(Path<'d>),
    ConstValues(ConstValues<'d>),
    ObjectValue(ObjectValue<'d>),
    ExternalReferenceImport(ExternalReferenceImport<'d>),
}

impl<'d> Value<'d> {
    pub fn get_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Path(_) => ValueType::Path,
            Value::ConstValues(_) => ValueType::ConstValues,
            Value::ObjectValue(_) => ValueType::ObjectValue,
            Value::ExternalReferenceImport(_) => ValueType::ExternalReferenceImport,
        }
    }

    /// The discriminant of a value backed by a typed map object.
    pub fn as_node_type(&self) -> Option<ValueType> {
        match self {
            Value::Path(path) => Some(path.get_type()),
            Value::ObjectValue(object) => Some(object.get_type()),
            Value::ExternalReferenceImport(reference) => Some(reference.get_type()),
            _ => None,
        }
    }
}

impl<'d> FromItem<'d> for Value<'d> {
    fn from_item(document: &'d Document, item: Item<'d>) -> Result<Self> {
        check_document(document, item)?;
        match item.kind() {
            NodeKind::Con => match item.scalar() {
                Some(Scalar::Bool(b)) => Ok(Value::Bool(*b)),
                Some(Scalar::Str(s)) => Ok(Value::String(s)),
                Some(Scalar::Null) | None => Err(Error::WrongValue {
                    expected: "a value",
                    found: "null".to_string(),
                }),
                Some(_) => item.as_number().map(Value::Number),
            },
            NodeKind::Arr => {
                let values = (0..item.size())
                    .map(|pos| Value::from_item(document, item.at(pos)?))
                    .collect::<Result<ConstValues<'d>>>()?;
                Ok(Value::ConstValues(values))
            }
            NodeKind::Obj => {
                let tag = item.get("type")?.as_str()?;
                match tag.parse::<ValueType>()? {
                    ValueType::Path => Path::new(document, item).map(Value::Path),
                    ValueType::ObjectValue => {
                        ObjectValue::new(document, item).map(Value::ObjectValue)
                    }
                    ValueType::ExternalReferenceImport => {
                        ExternalReferenceImport::new(document, item)
                            .map(Value::ExternalReferenceImport)
                    }
                    _ => Err(Error::WrongValue {
                        expected: "a value",
                        found: tag.to_string(),
                    }),
                }
            }
        }
    }
}

impl<'d> From<Path<'d>> for Value<'d> {
    fn from(path: Path<'d>) -> Self {
        Value::Path(path)
    }
}

impl<'d> From<ObjectValue<'d>> for Value<'d> {
    fn from(object: ObjectValue<'d>) -> Self {
        Value::ObjectValue(object)
    }
}

impl<'d> From<ExternalReferenceImport<'d>> for Value<'d> {
    fn from(reference: ExternalReferenceImport<'d>) -> Self {
        Value::ExternalReferenceImport(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Document {
        Document::from_json(
            &json!({
                "bool": false,
                "int": -4,
                "uint": 4,
                "real": 0.25,
                "string": "Y",
                "null": null,
                "list": [1, [2.5, "x"]],
                "path": {"type": "Path", "path": "</Ball>"},
                "reference": {
                    "type": "ExternalReferenceImport",
                    "field": null,
                    "importPath": "@./ball.usda@",
                },
                "object": {"type": "ObjectValue", "declarations": []},
                "file": {"type": "File", "descriptor": null, "statements": []},
            }),
            100_005,
        )
    }

    fn value<'d>(document: &'d Document, key: &str) -> Result<Value<'d>> {
        Value::from_item(document, document.get_item()?.get(key)?)
    }

    #[test]
    fn decodes_scalars() {
        let document = document();
        assert_eq!(value(&document, "bool"), Ok(Value::Bool(false)));
        assert_eq!(value(&document, "int"), Ok(Value::Number(Number::Int(-4))));
        assert_eq!(value(&document, "uint"), Ok(Value::Number(Number::Uint(4))));
        assert_eq!(value(&document, "real"), Ok(Value::Number(Number::Real(0.25))));
        assert_eq!(value(&document, "string"), Ok(Value::String("Y")));
        assert!(value(&document, "null").is_err());
    }

    #[test]
    fn decodes_lists_recursively() {
        let document = document();
        assert_eq!(
            value(&document, "list"),
            Ok(Value::ConstValues(vec![
                Value::Number(Number::Uint(1)),
                Value::ConstValues(vec![
                    Value::Number(Number::Real(2.5)),
                    Value::String("x"),
                ]),
            ]))
        );
    }

    #[test]
    fn decodes_typed_maps() {
        let document = document();
        assert_eq!(value(&document, "path").unwrap().get_type(), ValueType::Path);
        assert_eq!(
            value(&document, "reference").unwrap().get_type(),
            ValueType::ExternalReferenceImport
        );
        assert_eq!(
            value(&document, "object").unwrap().as_node_type(),
            Some(ValueType::ObjectValue)
        );
        assert_eq!(
            value(&document, "file"),
            Err(Error::WrongValue {
                expected: "a value",
                found: "File".to_string(),
            })
        );
    }

    #[test]
    fn numbers_convert() {
        assert_eq!(Number::Uint(3).as_f64(), 3.0);
        assert_eq!(Number::Uint(u64::MAX).as_i64(), None);
        assert_eq!(Number::Int(-3).as_i64(), Some(-3));
        assert_eq!(Number::Real(1.5).to_json(), json!(1.5));
        assert_eq!(Number::Real(f64::NAN).to_json(), json!(null));
        assert_eq!(Number::Real(2.0).to_string(), "2");
    }
}
