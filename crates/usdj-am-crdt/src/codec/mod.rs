//! Structural binary codec.
//!
//! Wire format:
//! ```text
//! [4-byte offset to clock table] [root] [clock table]
//! ```
//!
//! `root` is a single `0x00` byte for an empty document, otherwise a node.
//! A node is never one byte long, so a root section holding just `0x00` is
//! unambiguous even when the root ID itself encodes as `0x00`.
//! Each node starts with its compact ID `(session index, time)`, then a
//! type-length byte:
//! - Bits 7-5: major type (0=con, 2=obj, 6=arr)
//! - Bits 4-0: inline length (0-30), or 31 = read extended vu57
//!
//! followed by the payload: a constant carries one CBOR item, a map carries
//! `length` pairs of CBOR text key and node, a list carries `length` nodes.
//!
//! The clock table is a vu57 entry count followed by `(sid, time)` vu57
//! pairs: the local session first, then the peer sessions in clock order.
//! Nothing in the encoding depends on hash order, so decoding and
//! re-encoding reproduces the input bytes.
//!
//! Decoding rejects trees nested deeper than [`MAX_DEPTH`].

pub mod reader;
pub mod writer;

use ciborium::value::Value as CborValue;
use indexmap::IndexMap;
use std::collections::HashMap;

use crate::clock::{ClockVector, Ts};
use crate::model::{Model, ModelError};
use crate::nodes::{ArrNode, ConNode, CrdtNode, ObjNode, Scalar};
use reader::Reader;
use writer::Writer;

const MAJOR_CON: u8 = 0;
const MAJOR_OBJ: u8 = 2 << 5;
const MAJOR_ARR: u8 = 6 << 5;

/// Deepest node nesting accepted by [`decode`]; the root is at depth 0.
pub const MAX_DEPTH: usize = 256;

// ── Encode ──────────────────────────────────────────────────────────────────

/// Encodes a [`Model`] to the structural binary format.
///
/// Only nodes reachable from the root are written.
pub fn encode(model: &Model) -> Vec<u8> {
    let mut sessions: IndexMap<u64, u64> = IndexMap::new();
    sessions.insert(model.clock.sid, model.clock.time);
    for (&sid, &time) in &model.clock.peers {
        sessions.entry(sid).or_insert(time);
    }
    if let Some(root) = model.root {
        collect_sessions(model, root, &mut sessions);
    }

    let mut w = Writer::new();
    let offset_pos = w.reserve_u32();
    let tree_start = w.len();
    match model.root_node() {
        Some(node) => encode_node(model, node, &mut w, &sessions),
        None => w.u8(0),
    }
    let table_offset = w.len() - tree_start;
    w.patch_u32_be(offset_pos, table_offset as u32);

    w.vu57(sessions.len() as u64);
    for (&sid, &time) in &sessions {
        w.vu57(sid);
        w.vu57(time);
    }
    w.flush()
}

/// Registers sessions that appear in the tree but not in the clock.
fn collect_sessions(model: &Model, root: Ts, sessions: &mut IndexMap<u64, u64>) {
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        let entry = sessions.entry(id.sid).or_insert(id.time);
        if *entry < id.time {
            *entry = id.time;
        }
        match model.get(id) {
            Some(CrdtNode::Obj(n)) => pending.extend(n.keys.values().rev()),
            Some(CrdtNode::Arr(n)) => pending.extend(n.elements.iter().rev()),
            Some(CrdtNode::Con(_)) | None => {}
        }
    }
}

fn write_id(w: &mut Writer, id: Ts, sessions: &IndexMap<u64, u64>) {
    let index = sessions.get_index_of(&id.sid).unwrap_or_default();
    w.id(index as u64, id.time);
}

fn write_tl(w: &mut Writer, major: u8, length: usize) {
    if length < 31 {
        w.u8(major | length as u8);
    } else {
        w.u8(major | 31);
        w.vu57(length as u64);
    }
}

enum Step<'m> {
    Node(&'m CrdtNode),
    Key(&'m str),
}

/// Writes `root` and its subtree depth-first with an explicit stack.
fn encode_node(model: &Model, root: &CrdtNode, w: &mut Writer, sessions: &IndexMap<u64, u64>) {
    let mut steps = vec![Step::Node(root)];
    while let Some(step) = steps.pop() {
        let node = match step {
            Step::Key(key) => {
                write_cbor_str(w, key);
                continue;
            }
            Step::Node(node) => node,
        };
        write_id(w, node.id(), sessions);
        match node {
            CrdtNode::Con(n) => {
                w.u8(MAJOR_CON);
                write_cbor_scalar(w, &n.val);
            }
            CrdtNode::Obj(n) => {
                let entries: Vec<(&str, &CrdtNode)> = n
                    .keys
                    .iter()
                    .filter_map(|(key, &child)| model.get(child).map(|child| (key.as_str(), child)))
                    .collect();
                write_tl(w, MAJOR_OBJ, entries.len());
                for (key, child) in entries.into_iter().rev() {
                    steps.push(Step::Node(child));
                    steps.push(Step::Key(key));
                }
            }
            CrdtNode::Arr(n) => {
                let elements: Vec<&CrdtNode> =
                    n.elements.iter().filter_map(|&child| model.get(child)).collect();
                write_tl(w, MAJOR_ARR, elements.len());
                steps.extend(elements.into_iter().rev().map(Step::Node));
            }
        }
    }
}

// ── CBOR primitive writers ─────────────────────────────────────────────────

fn write_cbor_head(w: &mut Writer, major: u8, n: u64) {
    let major = major << 5;
    if n <= 23 {
        w.u8(major | n as u8);
    } else if n <= 0xFF {
        w.u8(major | 24);
        w.u8(n as u8);
    } else if n <= 0xFFFF {
        w.u8(major | 25);
        w.buf(&(n as u16).to_be_bytes());
    } else if n <= 0xFFFF_FFFF {
        w.u8(major | 26);
        w.buf(&(n as u32).to_be_bytes());
    } else {
        w.u8(major | 27);
        w.buf(&n.to_be_bytes());
    }
}

fn write_cbor_str(w: &mut Writer, s: &str) {
    write_cbor_head(w, 3, s.len() as u64);
    w.buf(s.as_bytes());
}

/// Floats are always written at double precision.
fn write_cbor_scalar(w: &mut Writer, val: &Scalar) {
    match val {
        Scalar::Null => w.u8(0xF6),
        Scalar::Bool(false) => w.u8(0xF4),
        Scalar::Bool(true) => w.u8(0xF5),
        Scalar::Uint(u) => write_cbor_head(w, 0, *u),
        Scalar::Int(i) if *i >= 0 => write_cbor_head(w, 0, *i as u64),
        Scalar::Int(i) => write_cbor_head(w, 1, !(*i as u64)),
        Scalar::Float(f) => {
            w.u8(0xFB);
            w.buf(&f.to_be_bytes());
        }
        Scalar::Str(s) => write_cbor_str(w, s),
    }
}

// ── Decode ──────────────────────────────────────────────────────────────────

struct Decoder {
    sessions: Vec<u64>,
    index: HashMap<Ts, CrdtNode>,
}

/// Decodes a [`Model`] from the structural binary format.
pub fn decode(data: &[u8]) -> Result<Model, ModelError> {
    let mut reader = Reader::new(data);
    let table_offset = reader.u32_be()? as usize;
    let mut table = reader.split_at(table_offset)?;

    let table_len = table.vu57()?;
    if table_len == 0 {
        return Err(ModelError::InvalidClockTable);
    }
    let sid = table.vu57()?;
    let time = table.vu57()?;
    let mut clock = ClockVector::new(sid, time);
    let mut sessions = vec![sid];
    for _ in 1..table_len {
        let peer = table.vu57()?;
        let peer_time = table.vu57()?;
        if clock.peers.insert(peer, peer_time).is_some() || peer == sid {
            return Err(ModelError::InvalidClockTable);
        }
        sessions.push(peer);
    }
    if !table.is_eof() {
        return Err(ModelError::InvalidClockTable);
    }

    let mut decoder = Decoder {
        sessions,
        index: HashMap::new(),
    };
    let root = if reader.remaining() == 1 && reader.peek()? == 0 {
        reader.u8()?;
        None
    } else {
        Some(decoder.decode_node(&mut reader, 0)?)
    };
    if !reader.is_eof() {
        return Err(ModelError::InvalidModelBinary);
    }

    Ok(Model {
        root,
        index: decoder.index,
        clock,
    })
}

impl Decoder {
    fn read_id(&self, reader: &mut Reader<'_>) -> Result<Ts, ModelError> {
        let (index, time) = reader.id()?;
        let sid = usize::try_from(index)
            .ok()
            .and_then(|index| self.sessions.get(index))
            .ok_or(ModelError::InvalidModelBinary)?;
        Ok(Ts::new(*sid, time))
    }

    fn insert(&mut self, node: CrdtNode) -> Result<Ts, ModelError> {
        let id = node.id();
        if self.index.insert(id, node).is_some() {
            return Err(ModelError::DuplicateNode(id));
        }
        Ok(id)
    }

    fn decode_node(&mut self, reader: &mut Reader<'_>, depth: usize) -> Result<Ts, ModelError> {
        if depth > MAX_DEPTH {
            return Err(ModelError::InvalidModelBinary);
        }
        let id = self.read_id(reader)?;
        let octet = reader.u8()?;
        let major = octet & 0b1110_0000;
        let minor = (octet & 0b1_1111) as u64;
        match major {
            MAJOR_CON => {
                if minor != 0 {
                    return Err(ModelError::InvalidModelBinary);
                }
                let val = cbor_to_scalar(reader.read_one_cbor()?)?;
                self.insert(CrdtNode::Con(ConNode::new(id, val)))
            }
            MAJOR_OBJ => {
                let len = if minor != 31 { minor } else { reader.vu57()? };
                let mut node = ObjNode::new(id);
                for _ in 0..len {
                    let key = match reader.read_one_cbor()? {
                        CborValue::Text(s) => s,
                        _ => return Err(ModelError::InvalidModelBinary),
                    };
                    let child = self.decode_node(reader, depth + 1)?;
                    if node.keys.insert(key, child).is_some() {
                        return Err(ModelError::InvalidModelBinary);
                    }
                }
                self.insert(CrdtNode::Obj(node))
            }
            MAJOR_ARR => {
                let len = if minor != 31 { minor } else { reader.vu57()? };
                let mut node = ArrNode::new(id);
                for _ in 0..len {
                    node.elements.push(self.decode_node(reader, depth + 1)?);
                }
                self.insert(CrdtNode::Arr(node))
            }
            _ => Err(ModelError::InvalidModelBinary),
        }
    }
}

fn cbor_to_scalar(v: CborValue) -> Result<Scalar, ModelError> {
    Ok(match v {
        CborValue::Null => Scalar::Null,
        CborValue::Bool(b) => Scalar::Bool(b),
        CborValue::Integer(i) => {
            let signed: i128 = i.into();
            if signed >= 0 {
                Scalar::Uint(u64::try_from(signed).map_err(|_| ModelError::InvalidModelBinary)?)
            } else {
                Scalar::Int(i64::try_from(signed).map_err(|_| ModelError::InvalidModelBinary)?)
            }
        }
        CborValue::Float(f) => Scalar::Float(f),
        CborValue::Text(s) => Scalar::Str(s),
        _ => return Err(ModelError::InvalidModelBinary),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sid() -> u64 {
        100_001
    }

    #[test]
    fn empty_model_round_trips() {
        let model = Model::new(sid());
        let bytes = encode(&model);
        assert_eq!(bytes, vec![0, 0, 0, 1, 0, 1, 0xA1, 0x8D, 0x06, 1]);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, model);
        assert_eq!(encode(&decoded), bytes);
    }

    #[test]
    fn scalars_round_trip() {
        let value = json!([null, true, false, 0, 23, 24, 300, 70000, 5_000_000_000_u64, -1, -25, -300, 0.5, -1.0e300, "", "héllo"]);
        let model = Model::from_json(&value, sid());
        let bytes = encode(&model);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.view(), value);
        assert_eq!(decoded, model);
        assert_eq!(encode(&decoded), bytes);
    }

    #[test]
    fn long_containers_use_extended_lengths() {
        let items: Vec<serde_json::Value> = (0..40).map(|i| json!(i)).collect();
        let mut map = serde_json::Map::new();
        for i in 0..33 {
            map.insert(format!("k{i}"), json!(i));
        }
        let value = json!({"items": items, "map": map});
        let model = Model::from_json(&value, sid());
        let bytes = encode(&model);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.view(), value);
        assert_eq!(encode(&decoded), bytes);
    }

    #[test]
    fn peer_sessions_are_kept_in_order() {
        let mut model = Model::from_json(&json!({"a": 1}), sid());
        model.clock.observe(Ts::new(300_000, 7));
        model.clock.observe(Ts::new(200_000, 9));
        let bytes = encode(&model);
        let decoded = decode(&bytes).unwrap();
        let peers: Vec<u64> = decoded.clock.peers.keys().copied().collect();
        assert_eq!(peers, [300_000, 200_000]);
        assert_eq!(encode(&decoded), bytes);
    }

    #[test]
    fn corrupt_payloads_are_rejected() {
        let bytes = encode(&Model::from_json(&json!({"a": [1, 2]}), sid()));
        assert_eq!(decode(&[]), Err(ModelError::InvalidClockTable));
        assert!(decode(&bytes[..bytes.len() - 1]).is_err());
        let mut bad_offset = bytes.clone();
        bad_offset[3] = 0xFF;
        assert_eq!(decode(&bad_offset), Err(ModelError::InvalidClockTable));
        let mut trailing = bytes[..4].to_vec();
        let table_offset = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        trailing.extend_from_slice(&bytes[4..4 + table_offset]);
        trailing.push(0);
        trailing.extend_from_slice(&bytes[4 + table_offset..]);
        trailing[3] += 1;
        assert_eq!(decode(&trailing), Err(ModelError::InvalidModelBinary));
    }

    fn with_clock_table(tree: &[u8]) -> Vec<u8> {
        let mut bytes = (tree.len() as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(tree);
        let mut w = Writer::new();
        w.vu57(1);
        w.vu57(sid());
        w.vu57(1);
        bytes.extend(w.flush());
        bytes
    }

    #[test]
    fn runaway_nesting_is_rejected() {
        let mut tree = Vec::with_capacity(400_003);
        for _ in 0..200_000 {
            tree.extend_from_slice(&[0x01, 0xC1]);
        }
        tree.extend_from_slice(&[0x01, 0x00, 0xF6]);
        assert_eq!(
            decode(&with_clock_table(&tree)),
            Err(ModelError::InvalidModelBinary)
        );
    }

    fn nested(levels: usize) -> serde_json::Value {
        (0..levels).fold(json!("leaf"), |inner, _| json!([inner]))
    }

    #[test]
    fn nesting_up_to_the_limit_round_trips() {
        let model = Model::from_json(&nested(MAX_DEPTH), sid());
        let bytes = encode(&model);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, model);
        assert_eq!(encode(&decoded), bytes);

        let deeper = encode(&Model::from_json(&nested(MAX_DEPTH + 1), sid()));
        assert_eq!(decode(&deeper), Err(ModelError::InvalidModelBinary));
    }

    #[test]
    fn root_at_time_zero_is_not_the_empty_marker() {
        let mut model = Model::new(sid());
        let id = Ts::new(sid(), 0);
        model
            .index
            .insert(id, CrdtNode::Con(ConNode::new(id, Scalar::Null)));
        model.root = Some(id);
        let bytes = encode(&model);
        assert_eq!(bytes[4], 0x00);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, model);
        assert_eq!(encode(&decoded), bytes);
    }
}
