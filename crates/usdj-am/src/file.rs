//! Root production of a USDA scene.

use crate::array::Array;
use crate::definition_statement::DefinitionStatement;
use crate::descriptor::Descriptor;
use crate::error::Result;
use crate::node::{ast_node, AstNode};
use crate::utils::Document;

ast_node!(
    /// A parsed USDA file: an optional layer descriptor followed by the
    /// root statements.
    File,
    3
);

impl<'d> File<'d> {
    /// The `File` stored as the document root.
    pub fn from_root(document: &'d Document) -> Result<Self> {
        Self::new(document, document.get_item()?)
    }

    pub fn get_descriptor(&self) -> Result<Option<Descriptor<'d>>> {
        self.node().get_nullable_object_property("descriptor")
    }

    pub fn get_statements(&self) -> Result<Array<'d, DefinitionStatement<'d>>> {
        self.node().get_array_property("statements")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::value_type::ValueType;
    use serde_json::json;

    #[test]
    fn reads_an_empty_file() {
        let document = Document::from_json(
            &json!({"type": "File", "descriptor": null, "statements": []}),
            100_010,
        );
        let file = File::from_root(&document).unwrap();
        assert_eq!(file.get_type(), ValueType::File);
        assert_eq!(file.get_descriptor(), Ok(None));
        assert!(file.get_statements().unwrap().is_empty());
        assert_eq!(file.get_object_id(), document.get_item().unwrap().object_id());
    }

    #[test]
    fn rejects_other_shapes() {
        let wrong_type = Document::from_json(
            &json!({"type": "Variant", "descriptor": null, "statements": []}),
            100_010,
        );
        assert!(matches!(
            File::from_root(&wrong_type),
            Err(Error::Discriminant { .. })
        ));
        let wrong_size = Document::from_json(&json!({"type": "File", "statements": []}), 100_010);
        assert_eq!(
            File::from_root(&wrong_size),
            Err(Error::WrongSize {
                expected: 3,
                found: 2,
            })
        );
    }
}
