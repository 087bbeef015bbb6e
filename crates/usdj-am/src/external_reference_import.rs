use crate::error::Result;
use crate::node::{ast_node, AstNode};

ast_node!(
    /// An `@asset@` reference, optionally followed by a prim path.
    ExternalReferenceImport,
    3
);

impl<'d> ExternalReferenceImport<'d> {
    pub fn get_field(&self) -> Result<Option<&'d str>> {
        self.node().get_nullable_object_property("field")
    }

    pub fn get_import_path(&self) -> Result<&'d str> {
        self.node().get_object_property("importPath")
    }
}
