use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;
use usdj_am_crdt::{Model, ModelError, NodeKind, Ts};

use crate::error::{Error, Result};
use crate::utils::item::Item;
use crate::utils::segment::parse_item_path;

/// A USDJ-AM document: a JSON CRDT model holding one or more USDA scenes.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    model: Model,
}

impl Document {
    /// Reads a document saved by [`Document::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::EmptyFilePath);
        }
        let data = fs::read(path).map_err(|err| io_error(path, err))?;
        let document = Self::from_binary(&data)?;
        debug!(path = %path.display(), bytes = data.len(), "loaded document");
        Ok(document)
    }

    /// Writes the binary encoding of the document.
    ///
    /// Saving a loaded, unmodified document reproduces the loaded bytes.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::EmptyFilePath);
        }
        let data = self.to_binary();
        fs::write(path, &data).map_err(|err| io_error(path, err))?;
        debug!(path = %path.display(), bytes = data.len(), "saved document");
        Ok(())
    }

    pub fn from_binary(data: &[u8]) -> Result<Self> {
        Ok(Self::from_model(Model::from_binary(data)?))
    }

    pub fn to_binary(&self) -> Vec<u8> {
        self.model.to_binary()
    }

    /// Authors a document whose root is the CRDT rendition of `value`.
    pub fn from_json(value: &Value, sid: u64) -> Self {
        Self::from_model(Model::from_json(value, sid))
    }

    pub fn from_model(model: Model) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    pub fn view(&self) -> Value {
        self.model.view()
    }

    /// The root map object.
    pub fn get_item(&self) -> Result<Item<'_>> {
        let node = self.model.root_node().ok_or(Error::MissingRoot)?;
        if node.kind() != NodeKind::Obj {
            return Err(Error::MissingRoot);
        }
        Ok(Item::new(self, node))
    }

    /// Resolves an absolute item path such as `/data/scene/statements/0`.
    pub fn get_item_at(&self, path: &str) -> Result<Item<'_>> {
        let segments = parse_item_path(path)?;
        segments
            .into_iter()
            .try_fold(self.get_item()?, |item, segment| item.join(segment))
    }

    pub(crate) fn item(&self, id: Ts) -> Result<Item<'_>> {
        let node = self
            .model
            .get(id)
            .ok_or(Error::Model(ModelError::UnknownNode(id)))?;
        Ok(Item::new(self, node))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> Error {
    Error::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_must_be_a_map() {
        let document = Document::from_json(&json!([1, 2]), 100_002);
        assert_eq!(document.get_item(), Err(Error::MissingRoot));
        let empty = Document::from_model(Model::new(100_002));
        assert_eq!(empty.get_item(), Err(Error::MissingRoot));
        assert_eq!(empty.get_item_at("/"), Err(Error::MissingRoot));
    }

    #[test]
    fn resolves_item_paths() {
        let document = Document::from_json(&json!({"a": {"b": [10, 20]}}), 100_002);
        let root = document.get_item().unwrap();
        assert_eq!(document.get_item_at("/"), Ok(root));
        let expected = root.get("a").unwrap().get("b").unwrap().at(1).unwrap();
        assert_eq!(document.get_item_at("/a/b/1"), Ok(expected));
        assert_eq!(
            document.get_item_at("/a/b/2"),
            Err(Error::NoSuchPosition { pos: 2, len: 2 })
        );
    }

    #[test]
    fn empty_file_path_is_rejected() {
        assert_eq!(Document::load(""), Err(Error::EmptyFilePath));
        let document = Document::from_json(&json!({}), 100_002);
        assert_eq!(document.save(""), Err(Error::EmptyFilePath));
    }

    #[test]
    fn corrupt_binary_is_rejected() {
        assert_eq!(
            Document::from_binary(&[0, 0, 0]),
            Err(Error::Model(ModelError::InvalidClockTable))
        );
    }
}
