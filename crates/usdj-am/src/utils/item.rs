use std::fmt;
use std::ptr;

use usdj_am_crdt::{CrdtNode, NodeKind, Scalar, Ts};

use crate::error::{Error, Result};
use crate::utils::segment::Segment;
use crate::utils::Document;
use crate::value::Number;

/// Handle to one object of a [`Document`].
///
/// Items are cheap to copy and compare equal when they refer to the same
/// object of the same document instance.
#[derive(Clone, Copy)]
pub struct Item<'d> {
    document: &'d Document,
    node: &'d CrdtNode,
}

impl<'d> Item<'d> {
    pub(crate) fn new(document: &'d Document, node: &'d CrdtNode) -> Self {
        Self { document, node }
    }

    pub fn document(&self) -> &'d Document {
        self.document
    }

    pub fn object_id(&self) -> Ts {
        self.node.id()
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// Property count of a map object or element count of a list object.
    pub fn size(&self) -> usize {
        self.node.size()
    }

    pub fn scalar(&self) -> Option<&'d Scalar> {
        match self.node {
            CrdtNode::Con(con) => Some(&con.val),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.scalar(), Some(Scalar::Null))
    }

    pub fn as_str(&self) -> Result<&'d str> {
        match self.scalar() {
            Some(Scalar::Str(s)) => Ok(s),
            _ => Err(self.wrong_value("a string")),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self.scalar() {
            Some(Scalar::Bool(b)) => Ok(*b),
            _ => Err(self.wrong_value("a boolean")),
        }
    }

    pub fn as_number(&self) -> Result<Number> {
        match self.scalar() {
            Some(Scalar::Int(i)) => Ok(Number::Int(*i)),
            Some(Scalar::Uint(u)) => Ok(Number::Uint(*u)),
            Some(Scalar::Float(f)) => Ok(Number::Real(*f)),
            _ => Err(self.wrong_value("a number")),
        }
    }

    /// Looks up a property of a map object.
    pub fn get(&self, key: &str) -> Result<Item<'d>> {
        match self.node {
            CrdtNode::Obj(obj) => {
                let id = obj
                    .get(key)
                    .ok_or_else(|| Error::NoSuchKey(key.to_string()))?;
                self.document.item(id)
            }
            _ => Err(Error::NotIndexable {
                segment: key.to_string(),
                kind: self.kind(),
            }),
        }
    }

    /// Looks up an element of a list object.
    pub fn at(&self, pos: usize) -> Result<Item<'d>> {
        match self.node {
            CrdtNode::Arr(arr) => {
                let id = arr.get(pos).ok_or(Error::NoSuchPosition {
                    pos,
                    len: arr.elements.len(),
                })?;
                self.document.item(id)
            }
            _ => Err(Error::NotIndexable {
                segment: pos.to_string(),
                kind: self.kind(),
            }),
        }
    }

    /// Resolves one path segment.
    ///
    /// A position segment applied to a map object looks up the key spelled
    /// by its digits.
    pub fn join(&self, segment: impl Into<Segment>) -> Result<Item<'d>> {
        match (segment.into(), self.kind()) {
            (Segment::Pos(pos), NodeKind::Arr) => self.at(pos),
            (segment, NodeKind::Obj) => self.get(&segment.key()),
            (segment, kind) => Err(Error::NotIndexable {
                segment: segment.to_string(),
                kind,
            }),
        }
    }

    /// JSON view of the object and everything below it.
    pub fn view(&self) -> serde_json::Value {
        self.document.model().view_of(self.object_id())
    }

    fn wrong_value(&self, expected: &'static str) -> Error {
        let found = match self.scalar() {
            Some(scalar) => scalar.type_name().to_string(),
            None => format!("a {}", self.kind()),
        };
        Error::WrongValue { expected, found }
    }
}

impl PartialEq for Item<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.document, other.document) && self.object_id() == other.object_id()
    }
}

impl Eq for Item<'_> {}

impl fmt::Debug for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.object_id())
            .field("kind", &self.kind())
            .field("size", &self.size())
            .finish()
    }
}
