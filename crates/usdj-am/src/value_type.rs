//! Discriminant of every node and value kind.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Kind of a syntax tree node or value.
///
/// The node kinds are stored verbatim in the `"type"` property of their
/// backing map object. `Number`, `String`, `Bool` and `ConstValues` describe
/// plain values and never appear in a `"type"` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    File,
    Descriptor,
    Assignment,
    Definition,
    ClassDeclaration,
    OverDeclaration,
    VariantSet,
    Variant,
    Declaration,
    ObjectValue,
    ExternalReferenceImport,
    Path,
    Number,
    String,
    Bool,
    ConstValues,
}

const TAGS: [(&str, ValueType); 16] = [
    ("File", ValueType::File),
    ("Descriptor", ValueType::Descriptor),
    ("Assignment", ValueType::Assignment),
    ("Definition", ValueType::Definition),
    ("ClassDeclaration", ValueType::ClassDeclaration),
    ("OverDeclaration", ValueType::OverDeclaration),
    ("VariantSet", ValueType::VariantSet),
    ("Variant", ValueType::Variant),
    ("Declaration", ValueType::Declaration),
    ("ObjectValue", ValueType::ObjectValue),
    ("ExternalReferenceImport", ValueType::ExternalReferenceImport),
    ("Path", ValueType::Path),
    ("Number", ValueType::Number),
    ("String", ValueType::String),
    ("Bool", ValueType::Bool),
    ("ConstValues", ValueType::ConstValues),
];

impl ValueType {
    pub fn as_str(self) -> &'static str {
        TAGS.iter()
            .find(|(_, value_type)| *value_type == self)
            .map_or("???", |(tag, _)| tag)
    }
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TAGS.iter()
            .find(|(tag, _)| *tag == s)
            .map(|(_, value_type)| *value_type)
            .ok_or_else(|| Error::UnknownValueType(s.to_string()))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
