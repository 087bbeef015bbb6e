//! JSON CRDT document store used as the backing store of USDJ-AM scenes.
//!
//! A [`Model`] holds constant, map and list nodes keyed by logical
//! timestamps ([`Ts`]). Map keys are last-writer-wins registers. Documents
//! can be authored from a JSON tree and persisted with the structural binary
//! codec in [`codec`], whose encoding is a pure function of the model state
//! so that re-saving a loaded document reproduces the original bytes.

pub mod clock;
pub mod codec;
pub mod model;
pub mod nodes;

pub use clock::{compare, random_session_id, ClockVector, Ts, MIN_SESSION_ID};
pub use model::{Model, ModelError};
pub use nodes::{ArrNode, ConNode, CrdtNode, NodeKind, ObjNode, Scalar};
