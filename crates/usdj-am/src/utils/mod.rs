//! Adapter over the JSON CRDT document store.

mod document;
mod item;
mod json_writer;
pub mod segment;

pub use document::Document;
pub use item::Item;
pub use json_writer::{Indenter, JsonWriter};
pub use segment::{parse_item_path, Segment};
