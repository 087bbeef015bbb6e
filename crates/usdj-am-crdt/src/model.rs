//! JSON CRDT document model.
//!
//! A [`Model`] owns every node of a document in an index keyed by node ID,
//! plus the document root register and the logical clock that hands out
//! new IDs. Documents are built either operation by operation
//! ([`Model::new_obj`], [`Model::obj_set`], ...) or wholesale from a JSON
//! tree with [`Model::from_json`].

use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::clock::{ClockVector, Ts};
use crate::codec;
use crate::nodes::{ArrNode, ConNode, CrdtNode, NodeKind, ObjNode, Scalar};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid model clock table")]
    InvalidClockTable,
    #[error("invalid model binary")]
    InvalidModelBinary,
    #[error("duplicate node {0}")]
    DuplicateNode(Ts),
    #[error("unknown node {0}")]
    UnknownNode(Ts),
    #[error("node {id} is a {found} node, expected a {expected} node")]
    WrongNodeKind {
        id: Ts,
        expected: NodeKind,
        found: NodeKind,
    },
    #[error("position {pos} is out of range for list {id}")]
    OutOfRange { id: Ts, pos: usize },
}

/// In-memory JSON CRDT document model.
///
/// Builders accept trees of any depth, but only trees nested at most
/// [`codec::MAX_DEPTH`] levels deep decode again.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Document root; `None` for an empty document.
    pub root: Option<Ts>,
    /// All CRDT nodes keyed by their timestamp ID.
    pub index: HashMap<Ts, CrdtNode>,
    /// Logical clock tracking local time and the times of all peers.
    pub clock: ClockVector,
}

impl Model {
    /// Creates a new empty model with the given session ID.
    ///
    /// The clock starts at time `1` so that time `0` stays reserved.
    pub fn new(sid: u64) -> Self {
        Self {
            root: None,
            index: HashMap::new(),
            clock: ClockVector::new(sid, 1),
        }
    }

    /// Builds a model whose root is the CRDT rendition of `value`.
    ///
    /// Objects become map nodes (keys keep their order), arrays become list
    /// nodes and everything else becomes a constant node.
    pub fn from_json(value: &Value, sid: u64) -> Self {
        let mut model = Self::new(sid);
        let root = model.build_json(value);
        model.root = Some(root);
        model
    }

    /// Decodes a model from the structural binary format.
    pub fn from_binary(data: &[u8]) -> Result<Self, ModelError> {
        codec::decode(data)
    }

    /// Encodes the model with the structural binary format.
    pub fn to_binary(&self) -> Vec<u8> {
        codec::encode(self)
    }

    pub fn get(&self, id: Ts) -> Option<&CrdtNode> {
        self.index.get(&id)
    }

    pub fn root_node(&self) -> Option<&CrdtNode> {
        self.root.and_then(|id| self.get(id))
    }

    /// Returns the JSON view of the current document state.
    pub fn view(&self) -> Value {
        match self.root {
            Some(id) => self.view_of(id),
            None => Value::Null,
        }
    }

    /// Returns the JSON view of the subtree rooted at `id`.
    pub fn view_of(&self, id: Ts) -> Value {
        match self.get(id) {
            Some(CrdtNode::Con(n)) => n.val.to_json(),
            Some(CrdtNode::Obj(n)) => {
                let mut map = Map::new();
                for (key, &child) in &n.keys {
                    map.insert(key.clone(), self.view_of(child));
                }
                Value::Object(map)
            }
            Some(CrdtNode::Arr(n)) => {
                Value::Array(n.elements.iter().map(|&child| self.view_of(child)).collect())
            }
            None => Value::Null,
        }
    }

    // ── Builders ───────────────────────────────────────────────────────────

    pub fn new_con(&mut self, val: impl Into<Scalar>) -> Ts {
        let id = self.clock.tick();
        self.index
            .insert(id, CrdtNode::Con(ConNode::new(id, val.into())));
        id
    }

    pub fn new_obj(&mut self) -> Ts {
        let id = self.clock.tick();
        self.index.insert(id, CrdtNode::Obj(ObjNode::new(id)));
        id
    }

    pub fn new_arr(&mut self) -> Ts {
        let id = self.clock.tick();
        self.index.insert(id, CrdtNode::Arr(ArrNode::new(id)));
        id
    }

    /// Points the document root at `id`.
    pub fn set_root(&mut self, id: Ts) -> Result<(), ModelError> {
        if !self.index.contains_key(&id) {
            return Err(ModelError::UnknownNode(id));
        }
        self.root = Some(id);
        Ok(())
    }

    /// Sets `key` of map `obj` to node `val` (last writer wins).
    pub fn obj_set(&mut self, obj: Ts, key: &str, val: Ts) -> Result<(), ModelError> {
        if !self.index.contains_key(&val) {
            return Err(ModelError::UnknownNode(val));
        }
        match self.index.get_mut(&obj) {
            Some(CrdtNode::Obj(node)) => {
                node.put(key, val);
                Ok(())
            }
            Some(other) => Err(ModelError::WrongNodeKind {
                id: obj,
                expected: NodeKind::Obj,
                found: other.kind(),
            }),
            None => Err(ModelError::UnknownNode(obj)),
        }
    }

    /// Inserts node `val` at `pos` of list `arr`.
    pub fn arr_insert(&mut self, arr: Ts, pos: usize, val: Ts) -> Result<(), ModelError> {
        if !self.index.contains_key(&val) {
            return Err(ModelError::UnknownNode(val));
        }
        match self.index.get_mut(&arr) {
            Some(CrdtNode::Arr(node)) => {
                if pos > node.elements.len() {
                    return Err(ModelError::OutOfRange { id: arr, pos });
                }
                node.elements.insert(pos, val);
                Ok(())
            }
            Some(other) => Err(ModelError::WrongNodeKind {
                id: arr,
                expected: NodeKind::Arr,
                found: other.kind(),
            }),
            None => Err(ModelError::UnknownNode(arr)),
        }
    }

    /// Appends node `val` to list `arr`.
    pub fn arr_push(&mut self, arr: Ts, val: Ts) -> Result<(), ModelError> {
        let len = match self.index.get(&arr) {
            Some(node) => node.size(),
            None => return Err(ModelError::UnknownNode(arr)),
        };
        self.arr_insert(arr, len, val)
    }

    /// Creates the nodes for `value` and returns the ID of its top node.
    pub fn build_json(&mut self, value: &Value) -> Ts {
        match value {
            Value::Object(map) => {
                let obj = self.new_obj();
                for (key, child) in map {
                    let child = self.build_json(child);
                    if let Some(CrdtNode::Obj(node)) = self.index.get_mut(&obj) {
                        node.put(key, child);
                    }
                }
                obj
            }
            Value::Array(items) => {
                let arr = self.new_arr();
                for child in items {
                    let child = self.build_json(child);
                    if let Some(CrdtNode::Arr(node)) = self.index.get_mut(&arr) {
                        node.elements.push(child);
                    }
                }
                arr
            }
            scalar => {
                let val = Scalar::from_json(scalar).unwrap_or(Scalar::Null);
                self.new_con(val)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sid() -> u64 {
        123_456
    }

    #[test]
    fn from_json_preserves_the_view() {
        let value = json!({"b": [1, -2, 0.5], "a": {"x": null, "y": "z"}, "c": true});
        let model = Model::from_json(&value, sid());
        assert_eq!(model.view(), value);
        let keys: Vec<String> = model
            .view()
            .as_object()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn builders_assemble_a_document() {
        let mut model = Model::new(sid());
        let obj = model.new_obj();
        let arr = model.new_arr();
        let one = model.new_con(1_u64);
        let two = model.new_con("two");
        model.arr_push(arr, two).unwrap();
        model.arr_insert(arr, 0, one).unwrap();
        model.obj_set(obj, "list", arr).unwrap();
        model.set_root(obj).unwrap();
        assert_eq!(model.view(), json!({"list": [1, "two"]}));
    }

    #[test]
    fn builders_reject_wrong_targets() {
        let mut model = Model::new(sid());
        let con = model.new_con(true);
        let arr = model.new_arr();
        assert_eq!(
            model.obj_set(con, "k", arr),
            Err(ModelError::WrongNodeKind {
                id: con,
                expected: NodeKind::Obj,
                found: NodeKind::Con,
            })
        );
        assert_eq!(
            model.arr_insert(arr, 1, con),
            Err(ModelError::OutOfRange { id: arr, pos: 1 })
        );
        assert_eq!(
            model.set_root(Ts::new(sid(), 99)),
            Err(ModelError::UnknownNode(Ts::new(sid(), 99)))
        );
    }

    #[test]
    fn empty_model_views_as_null() {
        assert_eq!(Model::new(sid()).view(), Value::Null);
    }
}
