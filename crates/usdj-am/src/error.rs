//! Error type of the syntax tree layer.
//!
//! Every variant is an invalid-argument condition: the caller passed a path,
//! item, or document that doesn't conform to the USDA JSON schema. None of
//! them is retriable.

use thiserror::Error;
use usdj_am_crdt::{ModelError, NodeKind};

use crate::value_type::ValueType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("empty document file path")]
    EmptyFilePath,
    #[error("can't access {path:?}: {message}")]
    Io { path: String, message: String },
    #[error("malformed document: {0}")]
    Model(#[from] ModelError),
    #[error("document has no root map object")]
    MissingRoot,
    #[error("empty item path")]
    EmptyItemPath,
    #[error("item path {0:?} doesn't start with '/'")]
    RelativeItemPath(String),
    #[error("item path {0:?} has an empty segment")]
    EmptySegment(String),
    #[error("no property {0:?} in the map object")]
    NoSuchKey(String),
    #[error("position {pos} is out of range for a list object of {len} elements")]
    NoSuchPosition { pos: usize, len: usize },
    #[error("segment {segment:?} can't address a {kind} object")]
    NotIndexable { segment: String, kind: NodeKind },
    #[error("item belongs to another document")]
    ForeignItem,
    #[error("expected a {expected} object but found a {found} object")]
    WrongKind { expected: NodeKind, found: NodeKind },
    #[error("expected a map object with {expected} properties but found {found}")]
    WrongSize { expected: usize, found: usize },
    #[error("property {name:?} is {found:?} instead of {expected:?}")]
    Discriminant {
        name: String,
        expected: ValueType,
        found: String,
    },
    #[error("missing required property {0:?}")]
    MissingProperty(String),
    #[error("expected {expected} but found {found}")]
    WrongValue {
        expected: &'static str,
        found: String,
    },
    #[error("unknown value type {0:?}")]
    UnknownValueType(String),
    #[error("unknown declaration keyword {0:?}")]
    UnknownKeyword(String),
    #[error("no alternative of {0} matches the map object")]
    NoAlternative(&'static str),
}
