//! CRDT node types.
//!
//! | Rust type  | Semantics                                   |
//! |------------|---------------------------------------------|
//! | `ConNode`  | Immutable scalar constant                   |
//! | `ObjNode`  | LWW key→node map, keys in insertion order   |
//! | `ArrNode`  | Ordered list of node references             |

use indexmap::IndexMap;
use serde_json::{Number, Value};
use std::fmt;

use crate::clock::Ts;

// ── Scalar ────────────────────────────────────────────────────────────────

/// Payload of a constant node.
///
/// Non-negative integers are always held as `Uint` and negative ones as
/// `Int`, which is also how they come back out of the binary codec.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Converts a non-composite JSON value; returns `None` for arrays and
    /// objects.
    pub fn from_json(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Scalar::Uint(u)
                } else if let Some(i) = n.as_i64() {
                    Scalar::Int(i)
                } else {
                    Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Scalar::Str(s.clone()),
            Value::Array(_) | Value::Object(_) => return None,
        })
    }

    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::Number(Number::from(*i)),
            Scalar::Uint(u) => Value::Number(Number::from(*u)),
            Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Scalar::Str(s) => Value::String(s.clone()),
        }
    }

    /// Short name of the scalar's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Uint(_) => "uint",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        if i >= 0 {
            Scalar::Uint(i as u64)
        } else {
            Scalar::Int(i)
        }
    }
}

impl From<u64> for Scalar {
    fn from(u: u64) -> Self {
        Scalar::Uint(u)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

// ── ConNode ───────────────────────────────────────────────────────────────

/// Immutable constant node.
#[derive(Debug, Clone, PartialEq)]
pub struct ConNode {
    pub id: Ts,
    pub val: Scalar,
}

impl ConNode {
    pub fn new(id: Ts, val: Scalar) -> Self {
        Self { id, val }
    }
}

// ── ObjNode ───────────────────────────────────────────────────────────────

/// Last-write-wins object (map from string keys to node IDs).
#[derive(Debug, Clone, PartialEq)]
pub struct ObjNode {
    pub id: Ts,
    /// key → winning node ID
    pub keys: IndexMap<String, Ts>,
}

impl ObjNode {
    pub fn new(id: Ts) -> Self {
        Self {
            id,
            keys: IndexMap::new(),
        }
    }

    /// Puts `key`, keeping it only if `new_id` is newer than the current
    /// winner. Returns the replaced ID, if any.
    ///
    /// A replaced key keeps its original position.
    pub fn put(&mut self, key: &str, new_id: Ts) -> Option<Ts> {
        match self.keys.get(key).copied() {
            Some(old) if new_id <= old => None,
            old => {
                self.keys.insert(key.to_string(), new_id);
                old
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<Ts> {
        self.keys.get(key).copied()
    }
}

// ── ArrNode ───────────────────────────────────────────────────────────────

/// Ordered list of node references.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrNode {
    pub id: Ts,
    pub elements: Vec<Ts>,
}

impl ArrNode {
    pub fn new(id: Ts) -> Self {
        Self {
            id,
            elements: Vec::new(),
        }
    }

    pub fn get(&self, pos: usize) -> Option<Ts> {
        self.elements.get(pos).copied()
    }
}

// ── CrdtNode ──────────────────────────────────────────────────────────────

/// Shape of a node, independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Con,
    Obj,
    Arr,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Con => "scalar",
            NodeKind::Obj => "map",
            NodeKind::Arr => "list",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CrdtNode {
    Con(ConNode),
    Obj(ObjNode),
    Arr(ArrNode),
}

impl CrdtNode {
    pub fn id(&self) -> Ts {
        match self {
            CrdtNode::Con(n) => n.id,
            CrdtNode::Obj(n) => n.id,
            CrdtNode::Arr(n) => n.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            CrdtNode::Con(_) => NodeKind::Con,
            CrdtNode::Obj(_) => NodeKind::Obj,
            CrdtNode::Arr(_) => NodeKind::Arr,
        }
    }

    /// Number of properties of a map or elements of a list; `0` for scalars.
    pub fn size(&self) -> usize {
        match self {
            CrdtNode::Con(_) => 0,
            CrdtNode::Obj(n) => n.keys.len(),
            CrdtNode::Arr(n) => n.elements.len(),
        }
    }
}
