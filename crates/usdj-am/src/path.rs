use crate::error::Result;
use crate::node::{ast_node, AstNode};

ast_node!(
    /// A scene path literal such as `</World/Ball>`.
    Path,
    2
);

impl<'d> Path<'d> {
    pub fn get_path(&self) -> Result<&'d str> {
        self.node().get_object_property("path")
    }
}
